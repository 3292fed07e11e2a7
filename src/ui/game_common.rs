//! Shared UI components for the play and store screens.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Layout areas returned by `create_game_layout`.
pub struct GameLayout {
    /// Main content area - top left, inside outer border
    pub content: Rect,
    /// Status bar area (2 lines) - bottom left, inside outer border
    pub status_bar: Rect,
    /// Info panel area - right side, with its own border
    pub info_panel: Rect,
}

/// Create the standard screen layout with an outer border.
///
/// ```text
/// ┌─ Title ─────────────────────────┬─ Info ──────┐
/// │                                 │             │
/// │   [content area]                │  [info]     │
/// │                                 │             │
/// │ [status bar - 2 lines]          │             │
/// └─────────────────────────────────┴─────────────┘
/// ```
pub fn create_game_layout(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    border_color: Color,
    background: Color,
    info_panel_width: u16,
) -> GameLayout {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .style(Style::default().bg(background));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(info_panel_width)])
        .split(inner);

    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(2)])
        .split(h_chunks[0]);

    GameLayout {
        content: v_chunks[0],
        status_bar: v_chunks[1],
        info_panel: h_chunks[1],
    }
}

/// Render a status bar (2 lines: status message + controls).
///
/// `controls` is a slice of (key, action) pairs, e.g. `[("[Enter]", "Submit")]`.
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    status_text: &str,
    status_color: Color,
    controls: &[(&str, &str)],
) {
    if area.height < 1 {
        return;
    }

    let status = Paragraph::new(status_text)
        .style(Style::default().fg(status_color))
        .alignment(Alignment::Center);
    frame.render_widget(status, Rect { height: 1, ..area });

    if area.height >= 2 && !controls.is_empty() {
        let mut spans = Vec::new();
        for (i, (key, action)) in controls.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(*key, Style::default().fg(Color::White)));
            spans.push(Span::styled(
                format!(" {}", action),
                Style::default().fg(Color::DarkGray),
            ));
        }

        let controls_line = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
        frame.render_widget(
            controls_line,
            Rect {
                y: area.y + 1,
                height: 1,
                ..area
            },
        );
    }
}

/// Render a compact game-over banner at the bottom of an area, leaving the
/// last puzzle visible above it.
pub fn render_game_over_banner(frame: &mut Frame, area: Rect, title: &str, lines: &[String]) {
    let banner_height = (lines.len() as u16 + 3).min(area.height);
    let banner_area = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(banner_height),
        width: area.width,
        height: banner_height,
    };

    frame.render_widget(Clear, banner_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));
    let inner = block.inner(banner_area);
    frame.render_widget(block, banner_area);

    let mut text = vec![Line::from(Span::styled(
        title,
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    ))];
    text.extend(
        lines
            .iter()
            .map(|l| Line::from(Span::styled(l.as_str(), Style::default().fg(Color::White)))),
    );

    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), inner);
}

/// Render an info panel frame with the standard " Info " title.
///
/// Returns the inner Rect for content rendering.
pub fn render_info_panel_frame(frame: &mut Frame, area: Rect) -> Rect {
    let block = Block::default()
        .title(" Info ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}
