//! Terminal presentation: setup, layout, panels and the board view.

pub mod board_view;
pub mod terminal;
pub mod theme;
pub mod ui;
