mod ui;

use banamatix::config::{CliCommand, Config};
use banamatix::constants::TICK_INTERVAL_MS;
use banamatix::economy::EconomyProfile;
use banamatix::game::{Game, GameEvent};
use banamatix::puzzle::RandomPuzzleSource;
use banamatix::session::SessionConfig;
use banamatix::sync::{
    HttpProfileStore, MemoryProfileStore, ProfileRecord, ProfileStore, SyncWorker,
};
use banamatix::themes::{all_themes, CATALOG_VERSION};
use banamatix::utils::persistence::{data_path, load_active_theme, save_active_theme};
use chrono::Utc;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::OpenOptions;
use std::io;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;
use ui::{Screen, View};

const LOG_FILE: &str = "banamatix.log";
const MAX_INPUT_LEN: usize = 8;

/// Event-loop state that lives outside the game itself.
struct App {
    game: Game,
    screen: Screen,
    input: String,
    store_cursor: usize,
    quit: bool,
}

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut config = Config::load();

    match config.apply_args(&args) {
        Ok(CliCommand::Play) => {}
        Ok(CliCommand::Version) => {
            println!("banamatix {}", env!("CARGO_PKG_VERSION"));
            std::process::exit(0);
        }
        Ok(CliCommand::Help) => {
            print_help();
            std::process::exit(0);
        }
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("Run 'banamatix --help' for usage.");
            std::process::exit(1);
        }
    }

    init_tracing();
    tracing::info!(
        user = ?config.user,
        policy = config.reward_policy.name(),
        offline = config.offline,
        catalog = CATALOG_VERSION,
        "starting"
    );

    let mut app = App {
        game: build_game(&config),
        screen: Screen::Play,
        input: String::new(),
        store_cursor: 0,
        quit: false,
    };
    if let Some(theme_id) = load_active_theme().theme_id {
        app.game.preview_theme(&theme_id);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app, &config);

    // Restore terminal
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    app.game.shutdown();
    tracing::info!("exiting");
    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    config: &Config,
) -> io::Result<()> {
    let tick_interval = Duration::from_millis(TICK_INTERVAL_MS);
    let mut last_tick = Instant::now();
    let mut saved_theme = app.game.style.theme_id.clone();

    while !app.quit {
        terminal.draw(|frame| {
            let view = View {
                game: &app.game,
                screen: app.screen,
                input: &app.input,
                store_cursor: app.store_cursor,
            };
            ui::draw(frame, &view);
        })?;

        // Input is drained before the tick so an answer typed in the same
        // interval as the expiring second still counts.
        while event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key(app, key);
                }
            }
            if app.quit {
                break;
            }
        }

        if app.game.is_logged_out() {
            app.game = trial_game(config);
            app.screen = Screen::Play;
            app.input.clear();
        }

        if last_tick.elapsed() >= tick_interval {
            app.game.handle(GameEvent::Tick);
            last_tick = Instant::now();
        }

        app.game.poll_sync();
        app.game.notices.expire(Utc::now());

        if app.game.style.theme_id != saved_theme {
            if let Some(id) = app.game.style.theme_id.as_deref() {
                if let Err(e) = save_active_theme(id) {
                    tracing::warn!(error = %e, "could not remember active theme");
                }
            }
            saved_theme = app.game.style.theme_id.clone();
        }
    }
    Ok(())
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') => app.quit = true,
            KeyCode::Char('l') => app.game.handle(GameEvent::Logout),
            _ => {}
        }
        return;
    }

    match app.screen {
        Screen::Play => handle_play_key(app, key.code),
        Screen::Store => handle_store_key(app, key.code),
    }
}

fn handle_play_key(app: &mut App, code: KeyCode) {
    if app.game.session.is_game_over() {
        match code {
            KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter => {
                app.input.clear();
                app.game.handle(GameEvent::Restart);
            }
            KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Tab => app.screen = Screen::Store,
            KeyCode::Esc => app.quit = true,
            _ => {}
        }
        return;
    }

    match code {
        KeyCode::Char(c) if !c.is_control() => {
            if app.input.chars().count() < MAX_INPUT_LEN {
                app.input.push(c);
            }
        }
        KeyCode::Backspace => {
            app.input.pop();
        }
        KeyCode::Enter => {
            let answer = std::mem::take(&mut app.input);
            app.game.handle(GameEvent::Submit(answer));
        }
        KeyCode::Tab => app.screen = Screen::Store,
        KeyCode::Esc => app.quit = true,
        _ => {}
    }
}

fn handle_store_key(app: &mut App, code: KeyCode) {
    let themes = all_themes();
    match code {
        KeyCode::Up => app.store_cursor = app.store_cursor.saturating_sub(1),
        KeyCode::Down => {
            app.store_cursor = (app.store_cursor + 1).min(themes.len().saturating_sub(1))
        }
        KeyCode::Enter => {
            if let Some(theme) = themes.get(app.store_cursor) {
                let event = if app.game.profile.owns(theme.id) {
                    GameEvent::Select(theme.id.to_string())
                } else {
                    GameEvent::Purchase(theme.id.to_string())
                };
                app.game.handle(event);
            }
        }
        KeyCode::Esc | KeyCode::Tab => app.screen = Screen::Play,
        _ => {}
    }
}

fn build_game(config: &Config) -> Game {
    let Some(user) = config.user.clone() else {
        return trial_game(config);
    };

    let store: Arc<dyn ProfileStore> = if config.offline {
        Arc::new(MemoryProfileStore::with_record(ProfileRecord::from_profile(
            &user,
            &EconomyProfile::default(),
        )))
    } else {
        Arc::new(HttpProfileStore::new(
            &config.api_base,
            config.auth_token.clone(),
            config.request_timeout_secs,
        ))
    };

    Game::new(
        config.session_config(),
        config.reward_policy,
        Some(user),
        Box::new(RandomPuzzleSource::new(rand::thread_rng())),
        Some(SyncWorker::spawn(store)),
    )
}

fn trial_game(config: &Config) -> Game {
    Game::new(
        SessionConfig::trial(),
        config.reward_policy,
        None,
        Box::new(RandomPuzzleSource::new(rand::thread_rng())),
        None,
    )
}

/// Log to ~/.banamatix/banamatix.log; stdout belongs to the terminal UI.
fn init_tracing() {
    let filter = EnvFilter::try_from_env("BANAMATIX_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    let file = data_path(LOG_FILE).and_then(|path| {
        OpenOptions::new().create(true).append(true).open(path)
    });
    match file {
        Ok(file) => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init(),
        // No log file: run without logs rather than drawing over the UI.
        Err(_) => tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new("off"))
            .with_writer(io::sink)
            .init(),
    }
}

fn print_help() {
    println!("BANAMATIX - Banana arithmetic puzzles\n");
    println!("Usage: banamatix [options]\n");
    println!("Options:");
    println!("  -u, --user NAME     Play as NAME (coins and themes are synced)");
    println!("  --trial             Play the 3-attempt trial without an account");
    println!("  --policy POLICY     Coin rewards: milestone (default) or end_of_session");
    println!("  --untimed           Disable the 60 second countdown");
    println!("  --offline           Keep the profile in memory");
    println!("  --api URL           Profile store base URL");
    println!("  -v, --version       Show version information");
    println!("  -h, --help          Show this help message");
    println!("\nEnvironment: BANAMATIX_API, BANAMATIX_TOKEN, BANAMATIX_USER, BANAMATIX_LOG");
}
