//! Bonewalk entry point
//!
//! Headless demo runner: the sim plays itself while the shell does its usual
//! duties - fixed-step combat accumulation, cue draining, and high score
//! persistence.

use std::time::{Duration, Instant};

use bonewalk::audio::{self, LogSink};
use bonewalk::consts::*;
use bonewalk::highscores::HighScore;
use bonewalk::sim::{self, GamePhase, GameState, TickInput};

/// Stop a demo run that refuses to die
const MAX_DEMO_SECS: u64 = 120;

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut store = HighScore::load();

    if args.iter().any(|a| a == "--reset-high-score") {
        store.reset();
        return;
    }

    let seed = args
        .first()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0xB0E5_CAFE);

    let mut state = GameState::new(seed, store.best());
    let mut sink = LogSink;
    let input = TickInput {
        demo: true,
        ..Default::default()
    };

    log::info!("starting demo run with seed {seed}");

    let started = Instant::now();
    let mut last = Instant::now();
    let mut accumulator = 0.0f32;

    loop {
        let now = Instant::now();
        let dt = (now - last).as_secs_f32().min(0.1);
        last = now;

        sim::frame(&mut state, &input, dt);

        // Combat resolves on its own fixed 10ms cadence
        accumulator += dt;
        let mut substeps = 0;
        while accumulator >= COMBAT_TICK_DT && substeps < MAX_SUBSTEPS {
            sim::combat_tick(&mut state);
            accumulator -= COMBAT_TICK_DT;
            substeps += 1;
        }

        audio::drain_into(&mut state, &mut sink);

        // Persist whenever the run pushes past the stored value
        if state.high_score > store.best() {
            store.record(state.high_score);
        }

        if state.phase == GamePhase::GameOver {
            println!(
                "game over - score {} / high score {}",
                state.score, state.high_score
            );
            break;
        }
        if started.elapsed().as_secs() >= MAX_DEMO_SECS {
            println!(
                "demo timeout - score {} / high score {}",
                state.score, state.high_score
            );
            break;
        }

        // Roughly frame cadence; the sim uses measured dt either way
        std::thread::sleep(Duration::from_millis(4));
    }
}
