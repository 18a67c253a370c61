//! Letter Strike entry point
//!
//! The browser build starts from `platform::web`. Natively this runs a
//! headless autoplay session to exercise the engine end to end.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Letter Strike (native) starting...");
    log::info!("Native mode is headless - serve the wasm build for the playable version");

    let seed = letter_strike::platform::session_seed();
    let (score, level) = autoplay::run(seed);
    println!("Autoplay finished: score {} at level {} (seed {})", score, level, seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::wasm_start, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod autoplay {
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use letter_strike::persistence::MemoryStorage;
    use letter_strike::sim::{GameEvent, LetterId};
    use letter_strike::{Game, Tuning};

    /// 60 Hz
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Hard stop in case the bot never loses
    const MAX_FRAMES: u32 = 60 * 60 * 10;

    /// A letter the bot has noticed and will react to
    struct Target {
        id: LetterId,
        character: char,
        react_at_ms: f64,
    }

    /// Play until game over. Returns (score, level).
    pub fn run(seed: u64) -> (u64, u32) {
        let mut game = Game::new(Tuning::default(), seed, MemoryStorage::new());
        game.set_viewport(1280.0, 720.0);
        game.start();

        let mut rng = Pcg32::seed_from_u64(seed ^ 0x5eed);
        let mut targets: Vec<Target> = Vec::new();
        let mut clock_ms = 0.0;

        for _ in 0..MAX_FRAMES {
            clock_ms += FRAME_MS;
            for event in game.frame(FRAME_MS) {
                match event {
                    GameEvent::LetterSpawned { id, character } => {
                        // Slow reactions lose the race against faster letters
                        let delay = rng.random_range(600.0..4_500.0);
                        targets.push(Target {
                            id,
                            character,
                            react_at_ms: clock_ms + delay,
                        });
                    }
                    GameEvent::LevelUp { level } => log::info!("Reached level {}", level),
                    GameEvent::LifeLost { lives } => log::info!("Missed! {} lives left", lives),
                    GameEvent::GameOver { score } => log::info!("Game over, score {}", score),
                    _ => {}
                }
            }
            if game.engine().is_game_over() {
                break;
            }

            let engine = game.engine();
            let live = |id: LetterId| {
                !engine.is_destroyed(id) && engine.letters().iter().any(|l| l.id == id)
            };
            targets.retain(|t| live(t.id));
            let due: Vec<char> = targets
                .iter()
                .filter(|t| t.react_at_ms <= clock_ms)
                .map(|t| t.character)
                .collect();
            for character in due {
                game.tap(character);
            }
        }

        let engine = game.engine();
        (engine.score(), engine.level())
    }
}
