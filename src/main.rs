//! Retro Platformer entry point
//!
//! The browser build starts from the library's `wasm_bindgen(start)` hook.
//! Natively this runs a headless demo: the autopilot plays one run and the
//! outcome is logged.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use retro_platformer::Settings;
    use retro_platformer::consts::TICK_RATE_HZ;
    use retro_platformer::platform::{Frame, Frontend, GameLoop};
    use retro_platformer::sim::GamePhase;

    /// Logs level changes instead of drawing
    struct LogFrontend {
        last_level: usize,
    }

    impl Frontend for LogFrontend {
        fn present(&mut self, frame: &Frame<'_>) {
            let snapshot = &frame.snapshot;
            if snapshot.level != self.last_level {
                log::info!("Tick {}: now on level {} (score {})", snapshot.tick, snapshot.level, snapshot.score);
                self.last_level = snapshot.level;
            }
        }

        fn return_to_menu(&mut self) {}
    }

    env_logger::init();
    log::info!("Retro Platformer (native) starting...");
    log::info!("Native mode runs a headless demo - build for wasm32 to play in a browser");

    let settings = Settings::load();
    let mut game = GameLoop::new(&settings);
    game.set_demo(true);
    let mut frontend = LogFrontend { last_level: 1 };

    // Five minutes of game time at most
    let max_ticks = u64::from(TICK_RATE_HZ) * 300;
    while !game.state.phase.is_terminal() && game.state.time_ticks < max_ticks {
        game.step(&mut frontend);
    }

    let state = &game.state;
    match state.phase {
        GamePhase::Terminal(outcome) => log::info!(
            "Demo finished: {:?} on level {} with score {} after {} ticks",
            outcome,
            state.level_index() + 1,
            state.score,
            state.time_ticks
        ),
        _ => log::info!(
            "Demo stopped after {} ticks on level {} with score {}",
            state.time_ticks,
            state.level_index() + 1,
            state.score
        ),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is the library's start hook, this is just to satisfy the compiler
}
