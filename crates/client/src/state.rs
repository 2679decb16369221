//! Selection and hover state layered over the viewport.
//!
//! Mirrors how a player explores the board: hovering or steering the cursor
//! onto a piece previews it, clicking or pressing Enter selects it, and both
//! show the configured maneuver's movement options.

use board_core::{
    Character, CursorMove, InteractionResult, Placement, PointerEvent, SetupEntry, Timestamp,
    Viewport, ViewportError,
};
use strum::Display;

/// How a piece came to be selected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum SelectionKind {
    /// Previewed by hover or cursor.
    Exploration,
    /// Chosen by click or Enter.
    Selection,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    pub placement: Placement,
    pub character: Character,
    pub owner: String,
    pub kind: SelectionKind,
}

/// What [`AppState::select_at`] did with a placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Outcome {
    /// Nothing stands there.
    NoPiece,
    /// The piece there is already selected; options stay as they are.
    Unchanged,
    Selected,
}

/// A destination picked for the selected piece, for the game service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveRequest {
    pub character_id: u32,
    pub from: Placement,
    pub to: Placement,
}

#[derive(Debug)]
pub struct AppState {
    pub selection: Option<Selection>,
    /// Tile under the pointer at the last hover resolution.
    pub hovered: Option<Placement>,
    pub last_move: Option<MoveRequest>,
    maneuver: String,
    hover_interval_ms: u64,
    last_hover: Option<Timestamp>,
}

impl AppState {
    pub fn new(maneuver: impl Into<String>, hover_interval_ms: u64) -> Self {
        Self {
            selection: None,
            hovered: None,
            last_move: None,
            maneuver: maneuver.into(),
            hover_interval_ms,
            last_hover: None,
        }
    }

    pub fn maneuver(&self) -> &str {
        &self.maneuver
    }

    /// Puts the cursor on its starting placement and previews the piece there.
    pub fn start(&mut self, viewport: &mut Viewport, now: Timestamp) -> Result<(), ViewportError> {
        let initial = viewport.initial_cursor().ok_or(ViewportError::NoEncounter)?;
        viewport.move_cursor(CursorMove::To(initial))?;
        self.select_at(viewport, initial, SelectionKind::Exploration, now)?;
        Ok(())
    }

    /// Pointer moved. Resolved at most once per hover interval; returns
    /// whether anything visible changed.
    pub fn hover(
        &mut self,
        viewport: &mut Viewport,
        pointer: PointerEvent,
        now: Timestamp,
    ) -> Result<bool, ViewportError> {
        if self
            .last_hover
            .is_some_and(|last| now.since(last) < self.hover_interval_ms)
        {
            return Ok(false);
        }
        self.last_hover = Some(now);

        let result = viewport.resolve_interaction(pointer)?;
        let hovered = match result {
            InteractionResult::Tile { placement, .. } => Some(placement),
            _ => None,
        };
        let mut changed = hovered != self.hovered;
        self.hovered = hovered;

        // Hover only ever previews; it never drops a selection.
        if let Some(placement) = hovered
            && piece_at(viewport, placement).is_some()
        {
            let outcome = self.select_at(viewport, placement, SelectionKind::Exploration, now)?;
            changed |= outcome == Outcome::Selected;
        }
        Ok(changed)
    }

    /// Pointer clicked. A tile moves the cursor there and selects what stands
    /// on it, keeping the current selection when it is the same piece; a
    /// movement indicator requests the move.
    pub fn click(
        &mut self,
        viewport: &mut Viewport,
        pointer: PointerEvent,
        now: Timestamp,
    ) -> Result<bool, ViewportError> {
        match viewport.resolve_interaction(pointer)? {
            InteractionResult::None => Ok(false),
            InteractionResult::Tile { placement, .. } => {
                viewport.move_cursor(CursorMove::To(placement))?;
                let outcome = self.select_at(viewport, placement, SelectionKind::Selection, now)?;
                if outcome == Outcome::NoPiece {
                    self.unselect(viewport);
                }
                Ok(true)
            }
            InteractionResult::MoveTo { placement, .. } => Ok(self.request_move(placement)),
        }
    }

    /// Cursor moved by key; preview whatever is under it now. A cursor held
    /// at the board edge keeps the current selection.
    pub fn cursor_moved(
        &mut self,
        viewport: &mut Viewport,
        placement: Placement,
        now: Timestamp,
    ) -> Result<(), ViewportError> {
        let outcome = self.select_at(viewport, placement, SelectionKind::Exploration, now)?;
        if outcome == Outcome::NoPiece {
            self.unselect(viewport);
        }
        Ok(())
    }

    /// Enter on the cursor. Empty tiles leave the selection alone.
    pub fn select_under_cursor(
        &mut self,
        viewport: &mut Viewport,
        now: Timestamp,
    ) -> Result<bool, ViewportError> {
        let cursor = viewport.cursor().ok_or(ViewportError::NoEncounter)?;
        let outcome = self.select_at(viewport, cursor, SelectionKind::Selection, now)?;
        Ok(outcome == Outcome::Selected)
    }

    pub fn unselect(&mut self, viewport: &mut Viewport) {
        if let Some(selection) = self.selection.take() {
            tracing::debug!(character = selection.character.id, "unselected");
        }
        viewport.clear_movement_options();
    }

    /// Selects the piece on `placement` and shows its maneuver.
    ///
    /// Re-selecting the current piece leaves its options in place; a preview
    /// chosen by click or Enter is promoted without redrawing them.
    fn select_at(
        &mut self,
        viewport: &mut Viewport,
        placement: Placement,
        kind: SelectionKind,
        now: Timestamp,
    ) -> Result<Outcome, ViewportError> {
        let Some(entry) = piece_at(viewport, placement) else {
            return Ok(Outcome::NoPiece);
        };
        if let Some(current) = self.selection.as_mut()
            && current.placement == placement
            && current.character == entry.character
        {
            if kind == SelectionKind::Selection && current.kind != kind {
                current.kind = kind;
                tracing::debug!(%placement, character = current.character.id, "preview promoted");
                return Ok(Outcome::Selected);
            }
            return Ok(Outcome::Unchanged);
        }

        let selection = Selection {
            placement,
            character: entry.character,
            owner: entry.owner,
            kind,
        };

        let maneuver = viewport
            .encounter()
            .and_then(|encounter| encounter.maneuver(placement, &self.maneuver))
            .filter(|maneuver| !maneuver.options.is_empty())
            .cloned();
        viewport.clear_movement_options();
        match maneuver {
            Some(maneuver) => viewport.show_movement_options(&maneuver, now)?,
            None => tracing::debug!(%placement, maneuver = %self.maneuver, "no movement options"),
        }

        tracing::debug!(%placement, character = selection.character.id, %kind, "selected");
        self.selection = Some(selection);
        Ok(Outcome::Selected)
    }

    /// Only pieces owned by the human player can be moved.
    fn request_move(&mut self, to: Placement) -> bool {
        let Some(selection) = &self.selection else {
            return false;
        };
        if !selection.owner.starts_with('H') {
            tracing::debug!(
                owner = %selection.owner,
                "move ignored for a piece not owned by the player"
            );
            return false;
        }

        let request = MoveRequest {
            character_id: selection.character.id,
            from: selection.placement,
            to,
        };
        tracing::info!(
            character = request.character_id,
            from = %request.from,
            to = %request.to,
            "move requested"
        );
        self.last_move = Some(request);
        true
    }
}

fn piece_at(viewport: &Viewport, placement: Placement) -> Option<SetupEntry> {
    viewport
        .encounter()
        .and_then(|encounter| encounter.board.piece_at(placement))
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use board_content::{EncounterLoader, PrimitiveCatalog};
    use board_core::{CanvasRect, InteractionKind, ViewportConfig, placement_to_coordinate};

    const DUEL: &str = r#"(
        name: "Duel",
        board: (
            shape: ["4111", "3111", "2111", "1111", " abc"],
            setup: {
                "b1": (
                    character: (id: 1, role: "shah", color: white, name: "Kaveh"),
                    owner: "H1",
                    cursor: true,
                ),
                "b4": (
                    character: (id: 2, role: "shah", color: black, name: "Zahhak"),
                    owner: "C1",
                ),
            },
        ),
        movement_options: {
            "b1": [(name: "regular", options: [
                (placement: "a2", type: unoccupied),
                (placement: "b2", type: unoccupied),
            ])],
        },
    )"#;

    /// Client pixel over the centre of the tile at `notation`.
    fn pointer_on(viewport: &Viewport, notation: &str) -> PointerEvent {
        let placement = notation.parse().unwrap();
        let nodes = viewport.board_nodes().unwrap();
        let world = viewport.scene().world_position(nodes.board)
            + placement_to_coordinate(placement).to_vec3();
        let ndc = viewport.camera().project(world).unwrap();
        let canvas = viewport.canvas();
        PointerEvent::new(
            canvas.left + (ndc.x + 1.0) / 2.0 * canvas.width,
            canvas.top + (1.0 - ndc.y) / 2.0 * canvas.height,
        )
    }

    fn started() -> (Viewport, AppState) {
        let mut viewport = Viewport::new(ViewportConfig::default());
        viewport.set_canvas(CanvasRect::new(0.0, 0.0, 800.0, 400.0));
        viewport
            .create_encounter(EncounterLoader::from_str(DUEL).unwrap(), &PrimitiveCatalog::new())
            .unwrap();
        let mut state = AppState::new("regular", 500);
        state.start(&mut viewport, Timestamp(0)).unwrap();
        viewport.tick(Timestamp(1000));
        (viewport, state)
    }

    #[test]
    fn start_previews_the_piece_on_the_cursor() {
        let (viewport, state) = started();
        let selection = state.selection.as_ref().unwrap();
        assert_eq!(selection.character.name, "Kaveh");
        assert_eq!(selection.kind, SelectionKind::Exploration);
        let options = viewport.board_nodes().unwrap().movement_options;
        assert_eq!(viewport.scene().children(options).len(), 2);
    }

    #[test]
    fn hover_is_throttled() {
        let (mut viewport, mut state) = started();
        let over_black = pointer_on(&viewport, "b4");

        assert!(state.hover(&mut viewport, over_black, Timestamp(2000)).unwrap());
        assert_eq!(state.selection.as_ref().unwrap().character.id, 2);

        let over_white = pointer_on(&viewport, "b1");
        assert!(!state.hover(&mut viewport, over_white, Timestamp(2100)).unwrap());
        assert_eq!(state.selection.as_ref().unwrap().character.id, 2);
        assert!(state.hover(&mut viewport, over_white, Timestamp(2500)).unwrap());
        assert_eq!(state.selection.as_ref().unwrap().character.id, 1);
    }

    #[test]
    fn clicking_an_empty_tile_moves_the_cursor_and_unselects() {
        let (mut viewport, mut state) = started();
        let empty = pointer_on(&viewport, "c3");

        assert!(state.click(&mut viewport, empty, Timestamp(2000)).unwrap());
        assert_eq!(viewport.cursor(), Some("c3".parse().unwrap()));
        assert!(state.selection.is_none());
        let options = viewport.board_nodes().unwrap().movement_options;
        assert!(viewport.scene().children(options).is_empty());
    }

    #[test]
    fn clicking_an_indicator_requests_the_move() {
        let (mut viewport, mut state) = started();
        let target = pointer_on(&viewport, "b2");
        assert_eq!(
            viewport.resolve_interaction(target).unwrap().kind(),
            Some(InteractionKind::MoveTo)
        );

        assert!(state.click(&mut viewport, target, Timestamp(2000)).unwrap());
        assert_eq!(
            state.last_move,
            Some(MoveRequest {
                character_id: 1,
                from: "b1".parse().unwrap(),
                to: "b2".parse().unwrap(),
            })
        );
    }

    #[test]
    fn computer_pieces_cannot_be_moved() {
        let (mut viewport, mut state) = started();
        let black = "b4".parse().unwrap();
        viewport.move_cursor(CursorMove::To(black)).unwrap();
        assert!(state.select_under_cursor(&mut viewport, Timestamp(2000)).unwrap());
        assert_eq!(state.selection.as_ref().unwrap().kind, SelectionKind::Selection);

        assert!(!state.request_move("b3".parse().unwrap()));
        assert!(state.last_move.is_none());
    }

    fn indicators(viewport: &Viewport) -> usize {
        let options = viewport.board_nodes().unwrap().movement_options;
        viewport.scene().children(options).len()
    }

    #[test]
    fn a_cursor_held_at_the_edge_keeps_the_preview() {
        let (mut viewport, mut state) = started();
        let held = viewport.move_cursor_named("down", None).unwrap();
        assert_eq!(held, "b1".parse().unwrap());

        state.cursor_moved(&mut viewport, held, Timestamp(2000)).unwrap();
        assert_eq!(state.selection.as_ref().unwrap().character.id, 1);
        assert_eq!(indicators(&viewport), 2);
    }

    #[test]
    fn clicking_the_selected_piece_again_keeps_it_selected() {
        let (mut viewport, mut state) = started();
        assert!(state.select_under_cursor(&mut viewport, Timestamp(1500)).unwrap());
        assert_eq!(state.selection.as_ref().unwrap().kind, SelectionKind::Selection);

        let own_tile = pointer_on(&viewport, "b1");
        assert!(matches!(
            viewport.resolve_interaction(own_tile).unwrap(),
            InteractionResult::Tile { placement, .. } if placement == "b1".parse().unwrap()
        ));
        assert!(state.click(&mut viewport, own_tile, Timestamp(2000)).unwrap());

        let selection = state.selection.as_ref().unwrap();
        assert_eq!(selection.character.id, 1);
        assert_eq!(selection.kind, SelectionKind::Selection);
        assert_eq!(indicators(&viewport), 2);
    }

    #[test]
    fn enter_on_an_already_selected_piece_changes_nothing() {
        let (mut viewport, mut state) = started();
        assert!(state.select_under_cursor(&mut viewport, Timestamp(1500)).unwrap());
        assert!(!state.select_under_cursor(&mut viewport, Timestamp(1600)).unwrap());
        assert_eq!(indicators(&viewport), 2);
    }
}
