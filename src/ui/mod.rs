pub mod game_common;
pub mod palette;
pub mod play_scene;
pub mod store_scene;

use banamatix::game::Game;
use banamatix::notice::{Notice, NoticeLevel};
use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
    Frame,
};

use palette::Palette;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Play,
    Store,
}

/// Everything a frame needs from the event loop.
pub struct View<'a> {
    pub game: &'a Game,
    pub screen: Screen,
    /// Answer being typed
    pub input: &'a str,
    /// Highlighted row on the store screen
    pub store_cursor: usize,
}

/// Main UI drawing function
pub fn draw(frame: &mut Frame, view: &View) {
    let area = frame.size();
    let palette = Palette::from_scope(&view.game.style);
    match view.screen {
        Screen::Play => play_scene::render(frame, area, view, &palette),
        Screen::Store => store_scene::render(frame, area, view, &palette),
    }
}

pub fn notice_color(level: NoticeLevel) -> Color {
    match level {
        NoticeLevel::Info => Color::Cyan,
        NoticeLevel::Success => Color::Green,
        NoticeLevel::Warning => Color::Yellow,
        NoticeLevel::Error => Color::Red,
    }
}

/// Most recent notices, newest last.
pub fn notice_lines<'a>(notices: impl Iterator<Item = &'a Notice>, max: usize) -> Vec<Line<'a>> {
    let all: Vec<&Notice> = notices.collect();
    let skip = all.len().saturating_sub(max);
    all.into_iter()
        .skip(skip)
        .map(|n| {
            Line::from(Span::styled(
                n.text.as_str(),
                Style::default().fg(notice_color(n.level)),
            ))
        })
        .collect()
}
