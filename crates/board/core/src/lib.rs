//! Board interaction and camera perspective engine.
//!
//! `board-core` keeps a chess-like 3D viewport consistent: board notation and
//! board-local coordinates, irregular board shapes, a camera orbiting the
//! board on a discrete grid of poses, camera-relative cursor movement, and
//! pointer picking that turns a ray into a tile or a movement destination.
//!
//! # Modules
//!
//! - [`notation`], [`coords`], [`topology`]: cells and where they are.
//! - [`perspective`], [`orbit`], [`camera`]: the orbital camera.
//! - [`cursor`], [`interaction`], [`movement`]: input and its feedback.
//! - [`animation`]: frame-driven transitions with injected time.
//! - [`scene`], [`board`]: the node graph shared with the render host.
//! - [`viewport`]: the facade hosts talk to.
//!
//! The crate is single-threaded and never blocks. Hosts feed it frame
//! timestamps through [`Viewport::tick`]; tests feed synthetic ones.
pub mod animation;
pub mod board;
pub mod camera;
pub mod config;
pub mod coords;
pub mod cursor;
pub mod encounter;
pub mod error;
pub mod geometry;
pub mod interaction;
pub mod movement;
pub mod notation;
pub mod orbit;
pub mod perspective;
pub mod scene;
pub mod topology;
pub mod viewport;

pub use animation::{
    AnimationChannel, AnimationSink, AnimationTask, Easing, FrameDispatcher, Stage, Timestamp,
};
pub use board::{AssetKey, AssetProvider, BoardNodes, PlaceholderAssets, build_board};
pub use camera::Camera;
pub use config::{CameraConfig, ViewportConfig};
pub use coords::{
    BoardCoordinate, OutOfRangeError, coordinate_to_placement, notation_to_coordinate,
    placement_to_coordinate,
};
pub use cursor::{CursorDirection, CursorMove, CursorMoveError, CursorNavigator, CursorState};
pub use encounter::{BoardSpec, Character, Encounter, Environment, PieceColor, SetupEntry, Setting};
pub use error::{BoardError, ErrorSeverity};
pub use geometry::{Aabb, Ray};
pub use interaction::{
    CanvasRect, InteractionKind, InteractionResult, PointerEvent, resolve_interaction,
};
pub use movement::{
    Maneuver, MovementOption, OptionKind, RevealConfig, clear_movement_options,
    show_movement_options,
};
pub use notation::{NotationError, Placement};
pub use orbit::{CameraOrbitController, CommandPolicy};
pub use perspective::{Azimuth, Elevation, PerspectiveCommand, PerspectiveError, PerspectiveState};
pub use scene::{Intersection, Material, Model, Node, NodeId, NodeKind, Scene};
pub use topology::{BoardShape, IMPASSABLE, ShapeError, is_occupiable};
pub use viewport::{Viewport, ViewportError};
