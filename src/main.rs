mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    style::Print,
    terminal, ExecutableCommand, QueueableCommand,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use street_puncher::compute::pulse::PulseAndTilt;
use street_puncher::compute::World;
use street_puncher::config::GameConfig;
use street_puncher::entities::{Command, GameEvent, GameStatus};
use street_puncher::error::StoreError;
use street_puncher::menu::{MenuAction, MenuInput, StartMenu};
use street_puncher::prefs::FileStore;
use street_puncher::score::ScoreBoard;

const FRAME: Duration = Duration::from_millis(33); // ≈30 FPS

/// Longest step fed to the simulation, so a stalled terminal doesn't teleport
/// enemies through the player.
const MAX_STEP: f32 = 0.1;

/// Terminal brawler: punch the thugs walking in from both sides.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// RON file overriding the default game parameters.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory for prefs.ron (high score and volume).
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Seed the RNG for a reproducible run.
    #[arg(long)]
    seed: Option<u64>,

    /// Where to write the log; the terminal itself is busy drawing.
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

fn init_logging(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating log directory {}", parent.display()))?;
    }
    let file = File::create(path).with_context(|| format!("opening log {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

/// The preferences file, plus the reason when falling back to the working
/// directory.  Logging is not up yet, so the caller reports it.
fn open_store(data_dir: Option<PathBuf>) -> (FileStore, Option<StoreError>) {
    match data_dir {
        Some(dir) => (FileStore::in_dir(&dir), None),
        None => match FileStore::default_location() {
            Ok(store) => (store, None),
            Err(e) => (FileStore::in_dir(Path::new(".")), Some(e)),
        },
    }
}

// ── Menu ──────────────────────────────────────────────────────────────────────

fn menu_input(code: KeyCode) -> Option<MenuInput> {
    match code {
        KeyCode::Enter | KeyCode::Char(' ') => Some(MenuInput::Start),
        KeyCode::Char('s') | KeyCode::Char('S') => Some(MenuInput::OpenSettings),
        KeyCode::Char('b') | KeyCode::Char('B') | KeyCode::Backspace => Some(MenuInput::Back),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(MenuInput::Quit),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('+') => Some(MenuInput::VolumeUp),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('-') => Some(MenuInput::VolumeDown),
        _ => None,
    }
}

/// Animate the title and wait for Start or Quit.
fn show_menu<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    menu: &mut StartMenu,
    pulse: &PulseAndTilt,
    high_score: u32,
) -> std::io::Result<MenuAction> {
    let opened = Instant::now();
    loop {
        display::render_menu(out, menu, pulse, high_score, opened.elapsed().as_secs_f32())?;

        while let Ok(Event::Key(KeyEvent { code, kind, .. })) = rx.try_recv() {
            if kind != KeyEventKind::Press {
                continue;
            }
            if let Some(action) = menu_input(code).and_then(|input| menu.handle(input)) {
                return Ok(action);
            }
        }
        thread::sleep(FRAME);
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

enum RoundEnd {
    Quit,
    Menu,
}

/// Punches fire on key-down only, so holding a key does not keep the fist out.
fn game_loop<W: Write>(
    out: &mut W,
    world: &mut World,
    rx: &mpsc::Receiver<Event>,
    rng: &mut impl Rng,
    muted: bool,
) -> std::io::Result<RoundEnd> {
    let mut last = Instant::now();

    loop {
        let frame_start = Instant::now();
        let dt = frame_start.duration_since(last).as_secs_f32().min(MAX_STEP);
        last = frame_start;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        let mut commands = Vec::new();
        while let Ok(Event::Key(KeyEvent { code, kind, modifiers, .. })) = rx.try_recv() {
            if kind != KeyEventKind::Press {
                continue;
            }
            match code {
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    return Ok(RoundEnd::Quit);
                }
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(RoundEnd::Quit);
                }
                KeyCode::Char('r') | KeyCode::Char('R')
                    if world.status == GameStatus::GameOver =>
                {
                    world.restart();
                }
                KeyCode::Char('m') | KeyCode::Char('M')
                    if world.status == GameStatus::GameOver =>
                {
                    return Ok(RoundEnd::Menu);
                }
                KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
                    commands.push(Command::PunchLeft);
                }
                KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
                    commands.push(Command::PunchRight);
                }
                _ => {}
            }
        }

        let events = world.tick(dt, &commands, rng);
        let mut ring = false;
        for event in &events {
            match event {
                GameEvent::PunchThrown { .. } | GameEvent::PlayerHurt { .. } => ring = true,
                GameEvent::EnemyPunched { score, new_high: true } => {
                    info!(score = *score, "new high score");
                }
                _ => {}
            }
        }

        display::render(out, world)?;
        if ring && !muted {
            out.queue(Print('\u{7}'))?;
            out.flush()?;
        }

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            std::thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (store, fallback) = open_store(cli.data_dir.clone());
    let log_path = cli
        .log_file
        .clone()
        .unwrap_or_else(|| store.path().with_file_name("street_puncher.log"));
    init_logging(&log_path)?;
    if let Some(e) = fallback {
        warn!("{e}; keeping preferences in the working directory");
    }

    let config = match &cli.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => GameConfig::default(),
    };
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    info!(prefs = ?store.path(), seed = ?cli.seed, "starting");

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = run(&mut out, &rx, config, &store, &mut rng);

    // Always restore the terminal
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result.context("game loop failed")
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: GameConfig,
    store: &FileStore,
    rng: &mut StdRng,
) -> std::io::Result<()> {
    let pulse = PulseAndTilt::from_config(&config);
    let mut menu = StartMenu::load(Box::new(store.clone()));
    let mut board = ScoreBoard::load(Box::new(store.clone()));

    loop {
        match show_menu(out, rx, &mut menu, &pulse, board.high_score())? {
            MenuAction::Quit => break,
            MenuAction::StartGame => {
                board.reset();
                let mut world = World::new(config.clone(), board);
                let end = game_loop(out, &mut world, rx, rng, menu.is_muted())?;

                board = world.into_score_board();
                if board.persist_failures() > 0 {
                    warn!(failures = board.persist_failures(), "high score was not always saved");
                }
                if let RoundEnd::Quit = end {
                    break;
                }
                // Otherwise loop back to the menu
            }
        }
    }
    info!(high_score = board.high_score(), "bye");
    Ok(())
}
