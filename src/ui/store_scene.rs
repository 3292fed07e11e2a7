//! The theme store: catalog with prices, ownership and the active selection.

use super::game_common::{create_game_layout, render_info_panel_frame, render_status_bar};
use super::palette::Palette;
use super::{notice_lines, View};
use banamatix::economy::can_afford;
use banamatix::themes::{all_themes, ThemeDefinition};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const INFO_PANEL_WIDTH: u16 = 30;

pub fn render(frame: &mut Frame, area: Rect, view: &View, palette: &Palette) {
    let game = view.game;
    let layout = create_game_layout(
        frame,
        area,
        " Theme Store ",
        palette.accent,
        palette.background,
        INFO_PANEL_WIDTH,
    );

    let mut lines = vec![
        Line::from(Span::styled(
            format!("\u{1F34C} {} Banana Coins", game.profile.coins),
            Style::default()
                .fg(palette.readable_text())
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    for (i, theme) in all_themes().iter().enumerate() {
        lines.push(theme_row(theme, i == view.store_cursor, view));
    }
    frame.render_widget(Paragraph::new(lines), layout.content);

    let inner = render_info_panel_frame(frame, layout.info_panel);
    let mut info = Vec::new();
    if let Some(theme) = all_themes().get(view.store_cursor) {
        info.push(Line::from(Span::styled(
            theme.display_name,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )));
        info.push(Line::from(Span::styled(
            theme.description,
            Style::default().fg(Color::DarkGray),
        )));
        info.push(Line::from(""));
    }
    info.extend(notice_lines(game.notices.iter(), 3));
    frame.render_widget(Paragraph::new(info), inner);

    render_status_bar(
        frame,
        layout.status_bar,
        "Unlock themes with Banana Coins",
        palette.accent,
        &[
            ("[\u{2191}\u{2193}]", "Browse"),
            ("[Enter]", "Buy/Apply"),
            ("[Esc]", "Back"),
        ],
    );
}

fn theme_row<'a>(theme: &'a ThemeDefinition, highlighted: bool, view: &View) -> Line<'a> {
    let profile = &view.game.profile;
    let marker = if highlighted { "> " } else { "  " };
    let (state, color) = if profile.selected_theme_id == theme.id {
        ("Active".to_string(), Color::Green)
    } else if profile.owns(theme.id) {
        ("Owned".to_string(), Color::Cyan)
    } else if can_afford(theme.id, profile) {
        (format!("{} coins", theme.price), Color::Yellow)
    } else {
        (format!("{} coins", theme.price), Color::DarkGray)
    };

    let name_style = if highlighted {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    Line::from(vec![
        Span::styled(marker, name_style),
        Span::styled(format!("{:<16}", theme.display_name), name_style),
        Span::styled(state, Style::default().fg(color)),
    ])
}
