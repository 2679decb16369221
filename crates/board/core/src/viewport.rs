//! Host-facing facade over the board engine.
//!
//! A [`Viewport`] owns the scene, the camera and every piece of interaction
//! state for one encounter at a time. Hosts call it from a single thread: input
//! handlers issue commands, the render loop calls [`Viewport::tick`] with the
//! frame timestamp and then draws [`Viewport::scene`] through
//! [`Viewport::camera`].

use crate::animation::{FrameDispatcher, Stage, Timestamp};
use crate::board::{AssetProvider, BoardNodes, build_board};
use crate::camera::Camera;
use crate::config::ViewportConfig;
use crate::coords::placement_to_coordinate;
use crate::cursor::{CursorMove, CursorMoveError, CursorNavigator};
use crate::encounter::Encounter;
use crate::error::{BoardError, ErrorSeverity};
use crate::interaction::{CanvasRect, InteractionResult, PointerEvent, resolve_interaction};
use crate::movement::{Maneuver, clear_movement_options, show_movement_options};
use crate::notation::{NotationError, Placement};
use crate::orbit::CameraOrbitController;
use crate::perspective::{PerspectiveCommand, PerspectiveState};
use crate::scene::Scene;

#[derive(Debug, thiserror::Error)]
pub enum ViewportError {
    #[error(transparent)]
    Notation(#[from] NotationError),

    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    #[error("cursor move 'to' needs a target placement")]
    MissingPlacement,

    #[error("encounter '{0}' has no occupiable placement for the cursor")]
    NoStartingPlacement(String),

    #[error("cursor is flagged on {0}, which is not occupiable")]
    CursorOffBoard(Placement),

    #[error("no encounter has been created")]
    NoEncounter,
}

impl From<CursorMoveError> for ViewportError {
    fn from(error: CursorMoveError) -> Self {
        match error {
            CursorMoveError::UnknownDirection(name) => Self::UnknownCommand(name),
            CursorMoveError::MissingPlacement => Self::MissingPlacement,
            CursorMoveError::Notation(error) => Self::Notation(error),
        }
    }
}

impl BoardError for ViewportError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Notation(error) => error.severity(),
            Self::UnknownCommand(_) | Self::MissingPlacement => ErrorSeverity::Validation,
            Self::NoStartingPlacement(_) => ErrorSeverity::Fatal,
            Self::CursorOffBoard(_) => ErrorSeverity::Validation,
            Self::NoEncounter => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Notation(error) => error.error_code(),
            Self::UnknownCommand(_) => "VIEWPORT_UNKNOWN_COMMAND",
            Self::MissingPlacement => "VIEWPORT_MISSING_PLACEMENT",
            Self::NoStartingPlacement(_) => "VIEWPORT_NO_STARTING_PLACEMENT",
            Self::CursorOffBoard(_) => "VIEWPORT_CURSOR_OFF_BOARD",
            Self::NoEncounter => "VIEWPORT_NO_ENCOUNTER",
        }
    }
}

/// State that lives exactly as long as one encounter.
#[derive(Debug)]
struct Session {
    encounter: Encounter,
    nodes: BoardNodes,
    cursor: CursorNavigator,
    initial_cursor: Placement,
}

#[derive(Debug)]
pub struct Viewport {
    config: ViewportConfig,
    scene: Scene,
    camera: Camera,
    dispatcher: FrameDispatcher,
    orbit: CameraOrbitController,
    canvas: CanvasRect,
    session: Option<Session>,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(ViewportConfig::default())
    }
}

impl Viewport {
    pub fn new(config: ViewportConfig) -> Self {
        let canvas = CanvasRect::default();
        Self {
            scene: Scene::new(),
            camera: config.camera.camera(canvas.aspect()),
            dispatcher: FrameDispatcher::new(),
            orbit: config.camera.controller(),
            canvas,
            session: None,
            config,
        }
    }

    /// Replaces the scene with the board for `encounter` and resets the
    /// camera to the configured home pose.
    pub fn create_encounter(
        &mut self,
        encounter: Encounter,
        assets: &dyn AssetProvider,
    ) -> Result<(), ViewportError> {
        if let Some((&flagged, _)) = encounter.board.setup.iter().find(|(_, entry)| entry.cursor)
            && !encounter.board.shape.is_occupiable(flagged)
        {
            return Err(ViewportError::CursorOffBoard(flagged));
        }
        let initial_cursor = encounter
            .board
            .initial_cursor()
            .ok_or_else(|| ViewportError::NoStartingPlacement(encounter.name.clone()))?;

        self.scene = Scene::new();
        self.dispatcher = FrameDispatcher::new();
        let nodes = build_board(
            &mut self.scene,
            &encounter.board,
            &encounter.environment,
            assets,
            initial_cursor,
        );
        self.initialize_camera(self.config.camera.home);

        tracing::info!(
            encounter = %encounter.name,
            environment = %encounter.environment.name,
            setting = %encounter.environment.setting.name,
            cursor = %initial_cursor,
            nodes = self.scene.len(),
            "encounter created"
        );
        self.session = Some(Session {
            encounter,
            nodes,
            cursor: CursorNavigator::new(initial_cursor),
            initial_cursor,
        });
        Ok(())
    }

    /// Sets `home` as both the initial and current pose and snaps the camera.
    pub fn initialize_camera(&mut self, home: PerspectiveState) {
        self.orbit
            .initialize(home, &mut self.camera, &mut self.dispatcher);
    }

    /// Returns `false` when the command changed nothing.
    pub fn change_perspective(&mut self, command: PerspectiveCommand, now: Timestamp) -> bool {
        self.orbit
            .change_perspective(command, now, &self.camera, &mut self.dispatcher)
    }

    /// [`change_perspective`](Self::change_perspective) for a command name.
    pub fn change_perspective_named(
        &mut self,
        command: &str,
        now: Timestamp,
    ) -> Result<bool, ViewportError> {
        let command = command
            .parse::<PerspectiveCommand>()
            .map_err(|_| ViewportError::UnknownCommand(command.to_owned()))?;
        Ok(self.change_perspective(command, now))
    }

    /// Moves the cursor and mirrors the result onto the cursor node.
    pub fn move_cursor(&mut self, movement: CursorMove) -> Result<Placement, ViewportError> {
        let alpha = self.orbit.current().alpha;
        let session = self.session.as_mut().ok_or(ViewportError::NoEncounter)?;
        let placement = session
            .cursor
            .move_cursor(movement, &session.encounter.board.shape, alpha);
        self.scene.set_position(
            session.nodes.cursor,
            placement_to_coordinate(placement).to_vec3(),
        );
        Ok(placement)
    }

    /// [`move_cursor`](Self::move_cursor) in host form: a direction name, or
    /// `"to"` with a placement.
    pub fn move_cursor_named(
        &mut self,
        direction: &str,
        placement: Option<&str>,
    ) -> Result<Placement, ViewportError> {
        let movement = CursorMove::parse(direction, placement)?;
        self.move_cursor(movement)
    }

    /// Resolves a pointer against the current scene; `None` before any
    /// encounter exists.
    pub fn resolve_interaction(
        &self,
        pointer: PointerEvent,
    ) -> Result<InteractionResult, ViewportError> {
        let Some(session) = &self.session else {
            return Ok(InteractionResult::None);
        };
        Ok(resolve_interaction(
            &self.scene,
            &self.camera,
            &session.encounter.board.shape,
            self.canvas,
            pointer,
        )?)
    }

    pub fn show_movement_options(
        &mut self,
        maneuver: &Maneuver,
        now: Timestamp,
    ) -> Result<(), ViewportError> {
        let session = self.session.as_ref().ok_or(ViewportError::NoEncounter)?;
        show_movement_options(
            &mut self.scene,
            session.nodes.movement_options,
            maneuver,
            &self.config.movement_options,
            now,
            &mut self.dispatcher,
        );
        Ok(())
    }

    pub fn clear_movement_options(&mut self) {
        if let Some(session) = &self.session {
            clear_movement_options(
                &mut self.scene,
                session.nodes.movement_options,
                &self.config.movement_options,
                &mut self.dispatcher,
            );
        }
    }

    /// Advances every animation to `now`. Returns true while any is in flight.
    pub fn tick(&mut self, now: Timestamp) -> bool {
        self.orbit.pump(now, &self.camera, &mut self.dispatcher);
        let mut stage = Stage {
            scene: &mut self.scene,
            camera: &mut self.camera,
        };
        self.dispatcher.tick(now, &mut stage) || self.orbit.is_transitioning(&self.dispatcher)
    }

    /// Records the render surface and updates the camera aspect ratio.
    pub fn set_canvas(&mut self, canvas: CanvasRect) {
        self.canvas = canvas;
        if canvas.width > 0.0 && canvas.height > 0.0 {
            self.camera.aspect = canvas.aspect();
        }
    }

    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn canvas(&self) -> CanvasRect {
        self.canvas
    }

    pub fn perspective(&self) -> PerspectiveState {
        self.orbit.current()
    }

    pub fn initial_perspective(&self) -> PerspectiveState {
        self.orbit.initial()
    }

    pub fn is_camera_animating(&self) -> bool {
        self.orbit.is_transitioning(&self.dispatcher)
    }

    pub fn encounter(&self) -> Option<&Encounter> {
        self.session.as_ref().map(|session| &session.encounter)
    }

    pub fn board_nodes(&self) -> Option<BoardNodes> {
        self.session.as_ref().map(|session| session.nodes)
    }

    pub fn cursor(&self) -> Option<Placement> {
        self.session
            .as_ref()
            .map(|session| session.cursor.placement())
    }

    pub fn initial_cursor(&self) -> Option<Placement> {
        self.session.as_ref().map(|session| session.initial_cursor)
    }
}
