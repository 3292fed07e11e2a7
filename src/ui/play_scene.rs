//! The puzzle screen: prompt, answer box, lives, score and countdown.

use super::game_common::{
    create_game_layout, render_game_over_banner, render_info_panel_frame, render_status_bar,
};
use super::palette::Palette;
use super::{notice_lines, View};
use banamatix::game::ProfileSync;
use banamatix::session::SessionMode;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const INFO_PANEL_WIDTH: u16 = 26;

pub fn render(frame: &mut Frame, area: Rect, view: &View, palette: &Palette) {
    let game = view.game;
    let title = match game.session.config.mode {
        SessionMode::Player => " BANAMATIX ",
        SessionMode::Trial => " BANAMATIX - Trial ",
    };
    let layout = create_game_layout(
        frame,
        area,
        title,
        palette.accent,
        palette.background,
        INFO_PANEL_WIDTH,
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(layout.content);

    let prompt = Paragraph::new(Line::from(Span::styled(
        game.session.current_puzzle.prompt.as_str(),
        Style::default()
            .fg(palette.readable_text())
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(prompt, chunks[1]);

    let input = Paragraph::new(format!("{}_", view.input))
        .style(Style::default().fg(palette.readable_text()))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.accent))
                .title(" Answer "),
        );
    frame.render_widget(input, centered(chunks[2], 24));

    if game.session.is_game_over() {
        let mut lines = vec![
            format!("Final score: {}", game.session.score),
            format!("Answer was: {}", game.session.current_puzzle.solution),
        ];
        if game.session.config.earns_coins() {
            lines.push(format!("Best: {}", game.profile.high_score));
        }
        render_game_over_banner(frame, chunks[3], "GAME OVER", &lines);
    } else {
        let notices = Paragraph::new(notice_lines(game.notices.iter(), 3))
            .alignment(Alignment::Center);
        frame.render_widget(notices, chunks[3]);
    }

    render_info(frame, layout.info_panel, view);

    let (status, color) = status_text(view);
    let controls: &[(&str, &str)] = if game.session.is_game_over() {
        &[("[R]", "Restart"), ("[S]", "Store"), ("[Esc]", "Quit")]
    } else {
        &[("[Enter]", "Submit"), ("[Tab]", "Store"), ("[Esc]", "Quit")]
    };
    render_status_bar(frame, layout.status_bar, &status, color, controls);
}

fn render_info(frame: &mut Frame, area: Rect, view: &View) {
    let inner = render_info_panel_frame(frame, area);
    let game = view.game;
    let session = &game.session;

    let hearts = "\u{2764}\u{FE0F} ".repeat(session.lives as usize);
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Lives: ", Style::default().fg(Color::DarkGray)),
            Span::styled(hearts, Style::default().fg(Color::Red)),
        ]),
        Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::DarkGray)),
            Span::styled(session.score.to_string(), Style::default().fg(Color::White)),
        ]),
    ];

    if session.config.is_timed() {
        let color = if session.time_remaining <= 10 {
            Color::Red
        } else {
            Color::White
        };
        lines.push(Line::from(vec![
            Span::styled("Time: ", Style::default().fg(Color::DarkGray)),
            Span::styled(format!("{}s", session.time_remaining), Style::default().fg(color)),
        ]));
    }

    lines.push(Line::from(""));
    match game.user.as_deref() {
        Some(user) => {
            lines.push(Line::from(Span::styled(
                user,
                Style::default().fg(Color::Cyan),
            )));
            lines.push(Line::from(vec![
                Span::styled("\u{1F34C} ", Style::default()),
                Span::styled(game.profile.coins.to_string(), Style::default().fg(Color::Yellow)),
            ]));
            lines.push(Line::from(vec![
                Span::styled("Best: ", Style::default().fg(Color::DarkGray)),
                Span::styled(
                    game.profile.high_score.to_string(),
                    Style::default().fg(Color::White),
                ),
            ]));
        }
        None => lines.push(Line::from(Span::styled(
            "Not logged in",
            Style::default().fg(Color::DarkGray),
        ))),
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn status_text(view: &View) -> (String, Color) {
    let game = view.game;
    if game.session.is_game_over() {
        return ("Game over".to_string(), Color::Red);
    }
    match game.profile_sync() {
        ProfileSync::Pending => ("Loading profile...".to_string(), Color::Yellow),
        ProfileSync::Local if game.user.is_some() => {
            ("Playing offline - coins won't be saved".to_string(), Color::Yellow)
        }
        _ => match game.session.config.mode {
            SessionMode::Trial => (
                format!("Trial: {} attempts left", game.session.lives),
                Color::Cyan,
            ),
            SessionMode::Player => ("Solve for \u{1F34C}".to_string(), Color::Green),
        },
    }
}

fn centered(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    }
}
