//! Pointer picking against the board scene.
//!
//! Scene nodes carry their semantics in their names: `tile:<placement>` for
//! board cells and `moveTo:<placement>` for movement indicators. Resolution is
//! read-only and cheap enough to run on every pointer move.

use glam::{Vec2, Vec3};
use strum::{Display, IntoStaticStr};

use crate::camera::Camera;
use crate::notation::{NotationError, Placement};
use crate::scene::{NodeId, Scene};
use crate::topology::BoardShape;

pub const TILE_TAG: &str = "tile:";
pub const MOVE_TO_TAG: &str = "moveTo:";

/// Pointer position in canvas client pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub client_x: f32,
    pub client_y: f32,
}

impl PointerEvent {
    pub const fn new(client_x: f32, client_y: f32) -> Self {
        Self { client_x, client_y }
    }
}

/// Bounding rectangle of the render surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl CanvasRect {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    /// Maps a pointer to `[-1, 1] × [-1, 1]`, y pointing up.
    ///
    /// Returns `None` for a degenerate rectangle.
    pub fn normalize(&self, pointer: PointerEvent) -> Option<Vec2> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return None;
        }
        Some(Vec2::new(
            (pointer.client_x - self.left) / self.width * 2.0 - 1.0,
            -((pointer.client_y - self.top) / self.height) * 2.0 + 1.0,
        ))
    }
}

impl Default for CanvasRect {
    fn default() -> Self {
        Self::new(0.0, 0.0, 2.0, 1.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, IntoStaticStr)]
#[strum(serialize_all = "camelCase")]
pub enum InteractionKind {
    Tile,
    MoveTo,
}

impl InteractionKind {
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Tile => TILE_TAG,
            Self::MoveTo => MOVE_TO_TAG,
        }
    }
}

/// Semantic target under the pointer.
///
/// `position` is the matched node's board-local position.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum InteractionResult {
    #[default]
    None,
    Tile { placement: Placement, position: Vec3 },
    MoveTo { placement: Placement, position: Vec3 },
}

impl InteractionResult {
    fn new(kind: InteractionKind, placement: Placement, position: Vec3) -> Self {
        match kind {
            InteractionKind::Tile => Self::Tile { placement, position },
            InteractionKind::MoveTo => Self::MoveTo { placement, position },
        }
    }

    pub fn kind(&self) -> Option<InteractionKind> {
        match self {
            Self::None => None,
            Self::Tile { .. } => Some(InteractionKind::Tile),
            Self::MoveTo { .. } => Some(InteractionKind::MoveTo),
        }
    }

    pub fn placement(&self) -> Option<Placement> {
        match *self {
            Self::None => None,
            Self::Tile { placement, .. } | Self::MoveTo { placement, .. } => Some(placement),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// Resolves the pointer into the most specific reachable board target.
///
/// Movement indicators win over tiles anywhere along the ray. Tags naming a
/// placement that is not occupiable on `shape` are skipped; malformed tags are
/// reported as [`NotationError`].
pub fn resolve_interaction(
    scene: &Scene,
    camera: &Camera,
    shape: &BoardShape,
    canvas: CanvasRect,
    pointer: PointerEvent,
) -> Result<InteractionResult, NotationError> {
    let Some(ndc) = canvas.normalize(pointer) else {
        return Ok(InteractionResult::None);
    };
    let hits = scene.raycast(&camera.ray_from_ndc(ndc));

    for kind in [InteractionKind::MoveTo, InteractionKind::Tile] {
        for hit in &hits {
            let Some((node, notation)) = tagged(scene, hit.node, kind.tag()) else {
                continue;
            };
            let placement: Placement = notation.parse()?;
            if !shape.is_occupiable(placement) {
                tracing::debug!(%placement, %kind, "skipping hit on unoccupiable placement");
                continue;
            }
            let position = scene.node(node).map(|node| node.position).unwrap_or_default();
            tracing::trace!(%placement, %kind, distance = hit.distance, "interaction resolved");
            return Ok(InteractionResult::new(kind, placement, position));
        }
    }
    Ok(InteractionResult::None)
}

/// Nearest node at or above `id` whose name starts with `tag`, with the
/// remainder of the name.
fn tagged<'a>(scene: &'a Scene, id: NodeId, tag: &str) -> Option<(NodeId, &'a str)> {
    let mut cursor = Some(id);
    while let Some(current) = cursor {
        let node = scene.node(current)?;
        if let Some(rest) = node.name.strip_prefix(tag) {
            return Some((current, rest));
        }
        cursor = node.parent();
    }
    None
}
