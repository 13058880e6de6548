//! Flappy QL headless driver
//!
//! Runs the simulation without a renderer, usually with the Q-learning agent
//! at the controls, and reports how the rounds went.
//!
//! Usage:
//!   RUST_LOG=info cargo run --release -- --frames 200000 --save-qtable q.json

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use flappy_ql::persistence::{load_q_table, save_q_table};
use flappy_ql::platform::FrameClock;
use flappy_ql::sim::view::medal;
use flappy_ql::sim::Mode;
use flappy_ql::{Game, Tuning};

#[derive(Parser)]
#[command(name = "flappy-ql")]
#[command(about = "Train a Q-learning agent on a headless pipe dodger")]
struct Args {
    /// Frames to simulate
    #[arg(long, default_value_t = 100_000)]
    frames: u64,

    /// Run seed (pipe gaps and exploration)
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Play with nobody at the controls (the bird just falls)
    #[arg(long)]
    no_agent: bool,

    /// JSON file overriding tuning constants
    #[arg(long)]
    tuning: Option<PathBuf>,

    /// Resume from a saved Q-table
    #[arg(long)]
    load_qtable: Option<PathBuf>,

    /// Write the Q-table here when done
    #[arg(long)]
    save_qtable: Option<PathBuf>,

    /// Pace frames at the nominal rate instead of running flat out
    #[arg(long)]
    realtime: bool,

    /// Speed-up multiplier for --realtime
    #[arg(long, default_value_t = 1.0)]
    time_scale: f64,
}

#[derive(Default)]
struct Summary {
    rounds: u32,
    total: u64,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let tuning = match &args.tuning {
        Some(path) => Tuning::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => Tuning::default(),
    };

    let mut game = match &args.load_qtable {
        Some(path) => {
            let envelope = load_q_table(path).with_context(|| format!("loading {}", path.display()))?;
            Game::with_q_table(tuning, args.seed, envelope.entries)?
        }
        None if args.no_agent => Game::new(tuning, args.seed)?,
        None => Game::with_agent(tuning, args.seed)?,
    };
    if args.no_agent {
        game.set_agent_enabled(false);
    }

    let mut clock = FrameClock::new(game.tuning());
    clock.set_time_scale(args.time_scale);

    log::info!(
        "Running {} frames (seed {}, agent {})",
        args.frames,
        args.seed,
        if game.agent().is_enabled() { "on" } else { "off" }
    );

    // Nobody is in Ready to tap; start the first round like a player would
    game.request_jump();

    let started = Instant::now();
    let mut summary = Summary::default();
    let mut last_mode = game.state().mode;

    while clock.frames() < args.frames {
        let frame = clock.next_frame();
        let state = game.step(frame)?;

        if state.mode == Mode::Dead && last_mode != Mode::Dead {
            summary.rounds += 1;
            summary.total += u64::from(state.score);
            log::info!(
                "Round {} died at frame {} with score {}{}",
                state.round,
                frame,
                state.score,
                medal(state).map(|m| format!(" ({} medal)", m.as_str())).unwrap_or_default()
            );
        }
        last_mode = game.state().mode;

        if args.no_agent && last_mode == Mode::Dead {
            // Keep tapping like a player; ignored until the flash is over
            game.request_jump();
        }

        if args.realtime {
            clock.record_tick(Instant::now());
            log::trace!("{} fps", clock.fps());
            std::thread::sleep(clock.frame_interval());
        }
    }

    let elapsed = started.elapsed();
    let state = game.state();
    let mean = if summary.rounds > 0 {
        summary.total as f64 / f64::from(summary.rounds)
    } else {
        0.0
    };

    println!();
    println!("=== RESULTS ===");
    println!("  Frames:       {}", clock.frames());
    println!("  Rounds:       {}", summary.rounds);
    println!("  Max score:    {}", state.max_score);
    println!("  Total score:  {}", state.total_score);
    println!("  Mean score:   {mean:.2}");
    println!("  Q-table size: {}", game.agent().table().len());
    println!("  Wall time:    {:.2}s", elapsed.as_secs_f64());

    if let Some(path) = &args.save_qtable {
        save_q_table(path, game.agent().table(), state.round)
            .with_context(|| format!("saving {}", path.display()))?;
        println!("  Saved Q-table to {}", path.display());
    }

    Ok(())
}
