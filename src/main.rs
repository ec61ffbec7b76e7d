//! Asteroid Field entry point
//!
//! Headless native driver: reads input events from stdin, one per line
//! (`press fire`, `release fire`, `char a`), and runs the screen state
//! machine at the configured tick rate. Frames can be dumped to stdout as
//! JSON draw commands for an external renderer.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::mpsc::{self, TryRecvError};
use std::thread;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;

use asteroid_field::input::InputEvent;
use asteroid_field::renderer::Frame;
use asteroid_field::screens::{App, Screen};
use asteroid_field::{FileScoreStore, GameConfig};

#[derive(Parser, Debug)]
#[command(name = "asteroid-field")]
#[command(about = "Wrap-around arena asteroid shooter, driven by stdin input events")]
struct Cli {
    /// JSON configuration file (missing keys use defaults)
    #[arg(long)]
    config: Option<PathBuf>,
    /// High score file (JSON lines)
    #[arg(long, default_value = "highscores.jsonl")]
    scores: PathBuf,
    /// Seed for the whole run; defaults to the clock
    #[arg(long)]
    seed: Option<u64>,
    /// Print each frame's draw commands as one JSON line
    #[arg(long)]
    dump_frames: bool,
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

/// Forward stdin lines to the game loop until EOF
fn spawn_input_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

/// Feed pending input to the app; returns false once stdin is closed
fn drain_input(app: &mut App, rx: &mpsc::Receiver<String>) -> bool {
    loop {
        match rx.try_recv() {
            Ok(line) => match InputEvent::parse(&line) {
                Some(event) => app.handle_event(event),
                None => log::debug!("Ignoring input {:?}", line),
            },
            Err(TryRecvError::Empty) => return true,
            Err(TryRecvError::Disconnected) => return false,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => GameConfig::load(path).with_context(|| format!("loading config {}", path.display()))?,
        None => GameConfig::default(),
    };
    config.validate().context("validating config")?;

    let seed = cli.seed.unwrap_or_else(clock_seed);
    log::info!(
        "Asteroid Field starting: {}x{} arena, {} ms ticks, seed {}",
        config.width,
        config.height,
        config.tick_interval_ms,
        seed
    );

    let interval = config.tick_interval();
    let store = FileScoreStore::new(&cli.scores);
    let mut app = App::new(config, Box::new(store), seed);
    let input = spawn_input_reader();
    let mut frame = Frame::new();
    let stdout = io::stdout();

    while app.is_running() {
        let started = Instant::now();
        let input_open = drain_input(&mut app, &input);

        if app.wants_tick() {
            app.tick(&mut frame);
            if cli.dump_frames {
                let mut out = stdout.lock();
                serde_json::to_writer(&mut out, &frame.commands).context("writing frame")?;
                writeln!(out).context("writing frame")?;
            }
        }

        // Without input only a running game can still make progress
        let game_running = matches!(app.screen(), Screen::Game(game) if game.wants_tick());
        if !input_open && !game_running {
            log::info!("Input closed on {} screen, exiting", app.screen().name());
            break;
        }

        if let Some(rest) = interval.checked_sub(started.elapsed()) {
            thread::sleep(rest);
        }
    }

    log::info!("Asteroid Field exiting");
    Ok(())
}
