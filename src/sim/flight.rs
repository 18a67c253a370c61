//! Reach-base signalling
//!
//! The engine does not re-check whether a letter reaching the base was
//! already destroyed or already reported. [`LandingWatch`] owns that
//! guarantee: each landed letter is reported exactly once, never while the
//! session is paused and never for a letter in its destruction animation.

use std::collections::HashSet;

use super::engine::Engine;
use super::state::{GamePhase, LetterId};

#[derive(Debug, Default, Clone)]
pub struct LandingWatch {
    signalled: HashSet<LetterId>,
}

impl LandingWatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Letters that finished their flight since the last poll
    pub fn poll(&mut self, engine: &Engine) -> Vec<LetterId> {
        // Forget letters the engine has already dropped
        self.signalled
            .retain(|id| engine.letters().iter().any(|l| l.id == *id));

        if engine.phase() != GamePhase::Playing {
            return Vec::new();
        }

        let mut landed = Vec::new();
        for letter in engine.letters() {
            if letter.has_landed()
                && !engine.is_destroyed(letter.id)
                && self.signalled.insert(letter.id)
            {
                landed.push(letter.id);
            }
        }
        landed
    }

    /// Poll and forward every landing to the engine. Returns how many fired.
    pub fn deliver(&mut self, engine: &mut Engine) -> usize {
        let landed = self.poll(engine);
        for id in &landed {
            engine.handle_letter_reach_base(*id);
        }
        landed.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    fn playing() -> Engine {
        let mut engine = Engine::new(Tuning::default(), 9, 0);
        engine.start_game();
        engine
    }

    #[test]
    fn test_landing_reported_once() {
        let mut engine = playing();
        let id = engine.spawn_letter_of('Z');
        let mut watch = LandingWatch::new();

        engine.advance(4_999.0);
        assert!(watch.poll(&engine).is_empty());
        engine.advance(1.0);
        assert_eq!(watch.poll(&engine), vec![id]);
        assert!(watch.poll(&engine).is_empty());
    }

    #[test]
    fn test_deliver_costs_a_life() {
        let mut engine = playing();
        engine.spawn_letter_of('Q');
        let mut watch = LandingWatch::new();

        engine.advance(5_000.0);
        assert_eq!(watch.deliver(&mut engine), 1);
        assert_eq!(engine.lives(), 2);
        assert_eq!(watch.deliver(&mut engine), 0);
        assert_eq!(engine.lives(), 2);
    }

    #[test]
    fn test_destroyed_letters_never_land() {
        let mut engine = playing();
        engine.spawn_letter_of('S');
        engine.advance(4_900.0);
        engine.destroy_letter('S');
        engine.advance(200.0);

        let mut watch = LandingWatch::new();
        assert_eq!(watch.deliver(&mut engine), 0);
        assert_eq!(engine.lives(), 3);
    }

    #[test]
    fn test_silent_while_paused() {
        let mut engine = playing();
        engine.spawn_letter_of('D');
        engine.advance(5_000.0);
        engine.pause_game();

        let mut watch = LandingWatch::new();
        assert_eq!(watch.deliver(&mut engine), 0);
        engine.resume_game();
        assert_eq!(watch.deliver(&mut engine), 1);
    }

    #[test]
    fn test_simultaneous_landings_can_end_the_game() {
        let mut engine = playing();
        for _ in 0..4 {
            engine.spawn_letter_of('Z');
        }
        engine.advance(5_000.0);

        let mut watch = LandingWatch::new();
        watch.deliver(&mut engine);
        assert!(engine.is_game_over());
        assert_eq!(engine.lives(), 0);
        assert!(engine.letters().is_empty());
    }
}
