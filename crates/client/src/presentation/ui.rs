//! Frame layout and panel composition.
use anyhow::Result;
use board_core::Viewport;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::presentation::{board_view::BoardView, terminal::Tui, theme::Theme};
use crate::state::AppState;

pub const STATUS_PANEL_WIDTH: u16 = 34;

/// Where each panel goes for a given terminal size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct UiLayout {
    pub header: Rect,
    /// Outer board panel, border included.
    pub board_panel: Rect,
    /// Cells the board is drawn into.
    pub board: Rect,
    pub status: Rect,
    pub footer: Rect,
}

impl UiLayout {
    pub fn new(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(2),
            ])
            .split(area);
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(STATUS_PANEL_WIDTH)])
            .split(rows[1]);

        Self {
            header: rows[0],
            board_panel: body[0],
            board: Block::default().borders(Borders::ALL).inner(body[0]),
            status: body[1],
            footer: rows[2],
        }
    }

    pub fn contains_board_cell(&self, column: u16, row: u16) -> bool {
        column >= self.board.left()
            && column < self.board.right()
            && row >= self.board.top()
            && row < self.board.bottom()
    }
}

pub fn render(
    terminal: &mut Tui,
    viewport: &Viewport,
    state: &AppState,
    theme: &Theme,
) -> Result<()> {
    terminal.draw(|frame| render_frame(frame, viewport, state, theme))?;
    Ok(())
}

fn render_frame(frame: &mut Frame, viewport: &Viewport, state: &AppState, theme: &Theme) {
    let layout = UiLayout::new(frame.area());

    render_header(frame, layout.header, viewport, theme);

    let board_block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border)
        .title(Span::styled(" Board ", theme.title));
    frame.render_widget(board_block, layout.board_panel);
    frame.render_widget(BoardView::new(viewport, theme), layout.board);

    render_status(frame, layout.status, viewport, state, theme);
    render_footer(frame, layout.footer, theme);
}

fn render_header(frame: &mut Frame, area: Rect, viewport: &Viewport, theme: &Theme) {
    let line = match viewport.encounter() {
        Some(encounter) => Line::from(vec![
            Span::styled(encounter.name.clone(), theme.title),
            Span::styled("  in  ", theme.muted),
            Span::styled(encounter.environment.name.clone(), theme.value),
            Span::styled(format!(" ({})", encounter.environment.setting.name), theme.muted),
        ]),
        None => Line::from(Span::styled("No encounter", theme.muted)),
    };
    let header = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border),
    );
    frame.render_widget(header, area);
}

fn render_status(
    frame: &mut Frame,
    area: Rect,
    viewport: &Viewport,
    state: &AppState,
    theme: &Theme,
) {
    let pose = viewport.perspective();
    let field = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("{label:<10}"), theme.label),
            Span::styled(value, theme.value),
        ])
    };
    let placement = |placement: Option<board_core::Placement>| {
        placement.map_or_else(|| "-".to_owned(), |placement| placement.to_string())
    };

    let mut lines = vec![
        Line::from(Span::styled("Camera", theme.accent)),
        field("azimuth", format!("{}°", pose.alpha.degrees())),
        field("elevation", format!("{}°", pose.beta.degrees())),
        field("radius", format!("{:.1}", pose.radius)),
        field(
            "moving",
            if viewport.is_camera_animating() { "yes" } else { "no" }.to_owned(),
        ),
        Line::default(),
        Line::from(Span::styled("Board", theme.accent)),
        field("cursor", placement(viewport.cursor())),
        field("hover", placement(state.hovered)),
        Line::default(),
        Line::from(Span::styled("Selection", theme.accent)),
    ];

    match &state.selection {
        Some(selection) => {
            lines.push(field("piece", selection.character.name.clone()));
            lines.push(field(
                "role",
                format!("{} {}", selection.character.color, selection.character.role),
            ));
            lines.push(field("on", selection.placement.to_string()));
            lines.push(field("owner", selection.owner.clone()));
            lines.push(field("mode", selection.kind.to_string()));
            let options = viewport
                .encounter()
                .and_then(|encounter| encounter.maneuver(selection.placement, state.maneuver()))
                .map_or(0, |maneuver| maneuver.options.len());
            lines.push(field("maneuver", format!("{} ({options})", state.maneuver())));
        }
        None => lines.push(Line::from(Span::styled("nothing selected", theme.muted))),
    }

    if let Some(request) = &state.last_move {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled("Last move", theme.accent)));
        lines.push(field("request", format!("{} -> {}", request.from, request.to)));
    }

    let panel = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border)
            .title(Span::styled(" Status ", theme.title)),
    );
    frame.render_widget(panel, area);
}

fn render_footer(frame: &mut Frame, area: Rect, theme: &Theme) {
    let line = Line::from(vec![
        Span::raw("[WASD] Cursor | "),
        Span::raw("[Arrows] Orbit | "),
        Span::raw("[Home] Reset | "),
        Span::raw("[Enter] Select | "),
        Span::raw("[Esc] Clear | "),
        Span::raw("[Mouse] Pick | "),
        Span::raw("[q] Quit"),
    ])
    .style(theme.muted);
    let footer = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(theme.border),
    );
    frame.render_widget(footer, area);
}
