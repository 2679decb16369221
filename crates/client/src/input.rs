//! Input processing for the terminal host.
//!
//! Owns the key and mouse bindings so the rest of the client deals in
//! engine commands only.

use board_core::{CursorDirection, PerspectiveCommand};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

/// High-level outcome of processing a keyboard event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    /// Camera-relative cursor step.
    Cursor(CursorDirection),
    Perspective(PerspectiveCommand),
    /// Select the piece under the cursor.
    Select,
    /// Drop the selection and hide its options.
    Unselect,
    None,
}

/// Pointer events in terminal cell coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerAction {
    Hover { column: u16, row: u16 },
    Click { column: u16, row: u16 },
    None,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    /// Converts a raw key event into a higher-level command.
    pub fn handle_key(&self, key: KeyEvent) -> KeyAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            KeyCode::Char(ch) => self.handle_char(ch),
            KeyCode::Left => KeyAction::Perspective(PerspectiveCommand::Left),
            KeyCode::Right => KeyAction::Perspective(PerspectiveCommand::Right),
            KeyCode::Up => KeyAction::Perspective(PerspectiveCommand::Up),
            KeyCode::Down => KeyAction::Perspective(PerspectiveCommand::Down),
            KeyCode::Home => KeyAction::Perspective(PerspectiveCommand::Home),
            KeyCode::Enter => KeyAction::Select,
            KeyCode::Esc => KeyAction::Unselect,
            // Reserved for zoom.
            KeyCode::PageUp | KeyCode::PageDown => KeyAction::None,
            _ => KeyAction::None,
        }
    }

    fn handle_char(&self, raw: char) -> KeyAction {
        match raw.to_ascii_lowercase() {
            'q' => KeyAction::Quit,
            'w' => KeyAction::Cursor(CursorDirection::Up),
            'a' => KeyAction::Cursor(CursorDirection::Left),
            's' => KeyAction::Cursor(CursorDirection::Down),
            'd' => KeyAction::Cursor(CursorDirection::Right),
            ' ' => KeyAction::Select,
            _ => KeyAction::None,
        }
    }

    pub fn handle_mouse(&self, mouse: MouseEvent) -> PointerAction {
        let (column, row) = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => PointerAction::Click { column, row },
            MouseEventKind::Moved | MouseEventKind::Drag(_) => PointerAction::Hover { column, row },
            _ => PointerAction::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::empty(),
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn mouse(kind: MouseEventKind) -> MouseEvent {
        MouseEvent {
            kind,
            column: 12,
            row: 4,
            modifiers: KeyModifiers::empty(),
        }
    }

    #[test]
    fn maps_cursor_keys() {
        let handler = InputHandler::new();
        assert_eq!(
            handler.handle_key(key(KeyCode::Char('w'))),
            KeyAction::Cursor(CursorDirection::Up)
        );
        assert_eq!(
            handler.handle_key(key(KeyCode::Char('D'))),
            KeyAction::Cursor(CursorDirection::Right)
        );
    }

    #[test]
    fn arrows_and_home_drive_the_camera() {
        let handler = InputHandler::new();
        assert_eq!(
            handler.handle_key(key(KeyCode::Left)),
            KeyAction::Perspective(PerspectiveCommand::Left)
        );
        assert_eq!(
            handler.handle_key(key(KeyCode::Home)),
            KeyAction::Perspective(PerspectiveCommand::Home)
        );
    }

    #[test]
    fn zoom_keys_are_reserved() {
        let handler = InputHandler::new();
        assert_eq!(handler.handle_key(key(KeyCode::PageUp)), KeyAction::None);
        assert_eq!(handler.handle_key(key(KeyCode::PageDown)), KeyAction::None);
    }

    #[test]
    fn quit_and_ctrl_c() {
        let handler = InputHandler::new();
        assert_eq!(handler.handle_key(key(KeyCode::Char('q'))), KeyAction::Quit);

        let mut ctrl_c = key(KeyCode::Char('c'));
        ctrl_c.modifiers = KeyModifiers::CONTROL;
        assert_eq!(handler.handle_key(ctrl_c), KeyAction::Quit);
    }

    #[test]
    fn maps_mouse_events() {
        let handler = InputHandler::new();
        assert_eq!(
            handler.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left))),
            PointerAction::Click { column: 12, row: 4 }
        );
        assert_eq!(
            handler.handle_mouse(mouse(MouseEventKind::Moved)),
            PointerAction::Hover { column: 12, row: 4 }
        );
        assert_eq!(
            handler.handle_mouse(mouse(MouseEventKind::ScrollUp)),
            PointerAction::None
        );
    }
}
