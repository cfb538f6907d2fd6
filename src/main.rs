use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

use asteroids::config::{self, GameConfig};
use asteroids::display::{self, Canvas};
use asteroids::entities::PlayerControls;
use asteroids::game::{Game, GameStatus};

// ── Command line ──────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "asteroids")]
#[command(about = "Asteroids with alien saucers, in the terminal")]
struct Args {
    /// RNG seed for a reproducible game
    #[arg(long, env = "ASTEROIDS_SEED")]
    seed: Option<u64>,

    /// Side of the square, wrapping world
    #[arg(long, env = "ASTEROIDS_WORLD_SIZE", default_value_t = config::DEFAULT_WORLD_SIZE)]
    world_size: f64,

    /// Simulation frames per second
    #[arg(long, env = "ASTEROIDS_FPS", default_value_t = config::DEFAULT_FPS)]
    fps: u32,

    #[arg(long, env = "ASTEROIDS_LIVES", default_value_t = config::DEFAULT_LIVES)]
    lives: u32,

    /// Frames between alien ship spawn attempts
    #[arg(long, env = "ASTEROIDS_ALIEN_INTERVAL", default_value_t = config::DEFAULT_ALIEN_SPAWN_INTERVAL)]
    alien_interval: u32,

    #[arg(long, env = "ASTEROIDS_MAX_ALIENS", default_value_t = config::DEFAULT_MAX_ALIEN_SHIPS)]
    max_aliens: usize,

    /// Run the simulation without a terminal and log a summary
    #[arg(long)]
    headless: bool,

    /// Frames to simulate in headless mode
    #[arg(long, default_value_t = 3600)]
    frames: u64,

    /// Write logs here (interactive mode logs nowhere otherwise)
    #[arg(long, env = "ASTEROIDS_LOG_FILE")]
    log_file: Option<PathBuf>,
}

impl Args {
    fn game_config(&self) -> anyhow::Result<GameConfig> {
        let config = GameConfig {
            world_size: self.world_size,
            fps: self.fps,
            starting_lives: self.lives,
            alien_spawn_interval: self.alien_interval,
            max_alien_ships: self.max_aliens,
            seed: self.seed,
        };
        Ok(config.validate()?)
    }
}

// ── Logging ───────────────────────────────────────────────────────────────────

/// The terminal is in raw mode while playing, so interactive logs only go to
/// a file when one is given.
fn init_tracing(log_file: Option<&Path>, headless: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let writer = match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None if headless => BoxMakeWriter::new(std::io::stderr),
        None => BoxMakeWriter::new(std::io::sink),
    };

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(writer)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(writer)
            .compact()
            .init();
    }
    Ok(())
}

fn make_rng(config: &GameConfig) -> StdRng {
    match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

// ── Simultaneous-input constants ──────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so 8 frames at 60 FPS (≈133 ms) is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 8;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame))
}

fn held_controls(key_frame: &HashMap<KeyCode, u64>, frame: u64) -> PlayerControls {
    PlayerControls {
        thrust: any_held(key_frame, &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')], frame),
        rotate_left: any_held(key_frame, &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')], frame),
        rotate_right: any_held(key_frame, &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')], frame),
        firing: is_held(key_frame, &KeyCode::Char(' '), frame),
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

enum LoopExit {
    Quit,
    Restart,
}

/// Input model: a `key_frame` map records the frame of the last press/repeat
/// event for every key; each frame, the keys still "fresh" drive the ship's
/// controls together, so turning, thrusting and firing combine freely.
fn game_loop<W: Write>(
    out: &mut W,
    game: &mut Game,
    rng: &mut StdRng,
    rx: &mpsc::Receiver<Event>,
) -> anyhow::Result<LoopExit> {
    let frame_time = game.config().frame_duration();
    let (cols, rows) = terminal::size()?;
    let mut canvas = Canvas::new(cols, rows, game.config().world_size);

    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent { code, kind, modifiers, .. }) => match kind {
                    KeyEventKind::Press => {
                        key_frame.insert(code, frame);
                        match code {
                            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                                return Ok(LoopExit::Quit);
                            }
                            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                                return Ok(LoopExit::Quit);
                            }
                            KeyCode::Char('r') | KeyCode::Char('R')
                                if game.status() == GameStatus::GameOver =>
                            {
                                return Ok(LoopExit::Restart);
                            }
                            _ => {}
                        }
                    }
                    KeyEventKind::Repeat => {
                        key_frame.insert(code, frame);
                    }
                    KeyEventKind::Release => {
                        key_frame.remove(&code);
                    }
                },
                Event::Resize(cols, rows) => canvas.resize(cols, rows),
                _ => {}
            }
        }

        if game.status() == GameStatus::Playing {
            if !game.is_player_dead() {
                game.player_mut().controls = held_controls(&key_frame, frame);
            }
            game.tick(rng);
        }

        display::render(out, game, &mut canvas)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

// ── Entry points ──────────────────────────────────────────────────────────────

fn run_headless(config: GameConfig, frames: u64) {
    let mut rng = make_rng(&config);
    let mut game = Game::new(config, &mut rng);

    for _ in 0..frames {
        if game.status() == GameStatus::GameOver {
            break;
        }
        game.tick(&mut rng);
    }

    info!(
        frames = game.frame(),
        score = game.score(),
        level = game.level(),
        lives = game.lives(),
        entities = game.entities().len(),
        status = ?game.status(),
        "headless run finished"
    );
}

fn run_interactive(config: GameConfig) -> anyhow::Result<()> {
    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = play(&mut out, config, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn play<W: Write>(out: &mut W, config: GameConfig, rx: &mpsc::Receiver<Event>) -> anyhow::Result<()> {
    let mut rng = make_rng(&config);
    loop {
        let mut game = Game::new(config.clone(), &mut rng);
        match game_loop(out, &mut game, &mut rng, rx)? {
            LoopExit::Quit => {
                info!(score = game.score(), level = game.level(), "player quit");
                return Ok(());
            }
            LoopExit::Restart => info!(score = game.score(), "restarting"),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.log_file.as_deref(), args.headless)?;
    let config = args.game_config()?;
    info!(?config, "configuration loaded");

    if args.headless {
        run_headless(config, args.frames);
        Ok(())
    } else {
        run_interactive(config)
    }
}
