//! Browser bridge
//!
//! JavaScript owns rendering and the requestAnimationFrame loop; it calls
//! `frame` each animation frame and draws the returned snapshot. Keyboard
//! and visibility listeners are installed here so input reaches the engine
//! without a round trip through JS.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::game::Game;
use crate::persistence::LocalStorage;
use crate::tuning::Tuning;

type Shared = Rc<RefCell<Game<LocalStorage>>>;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to init logger");
    log::info!("Letter Strike starting...");
}

/// Handle held by the JS presentation layer
#[wasm_bindgen]
pub struct WebGame {
    game: Shared,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32) -> Result<WebGame, JsValue> {
        let seed = super::session_seed();
        let mut game = Game::new(Tuning::default(), seed, LocalStorage::new());
        game.set_viewport(width, height);
        log::info!("Game initialized with seed: {}", seed);

        let game = Rc::new(RefCell::new(game));
        setup_keyboard(game.clone())?;
        setup_auto_pause(game.clone())?;
        Ok(WebGame { game })
    }

    /// Advance by `dt_ms`; returns the frame's events as a JSON array
    pub fn frame(&self, dt_ms: f64) -> String {
        let events = self.game.borrow_mut().frame(dt_ms);
        serde_json::to_string(&events).unwrap_or_else(|_| "[]".to_string())
    }

    /// Current state as JSON, see `sim::Snapshot`
    pub fn snapshot(&self) -> String {
        serde_json::to_string(&self.game.borrow().snapshot()).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn start(&self) {
        self.game.borrow_mut().start();
    }

    pub fn pause(&self) {
        self.game.borrow_mut().pause();
    }

    pub fn resume(&self) {
        self.game.borrow_mut().resume();
    }

    pub fn restart(&self) {
        self.game.borrow_mut().restart();
    }

    pub fn quit_to_menu(&self) {
        self.game.borrow_mut().quit_to_menu();
    }

    /// Mobile button press. Returns true if a letter was destroyed.
    pub fn tap(&self, key: &str) -> bool {
        self.game.borrow_mut().key_pressed(key).is_some()
    }

    pub fn set_viewport(&self, width: f32, height: f32) {
        self.game.borrow_mut().set_viewport(width, height);
    }

    pub fn set_music_volume(&self, volume: f32) {
        self.game.borrow_mut().set_music_volume(volume);
    }

    pub fn set_sfx_volume(&self, volume: f32) {
        self.game.borrow_mut().set_sfx_volume(volume);
    }

    pub fn music_volume(&self) -> f32 {
        self.game.borrow().volume().music_volume()
    }

    pub fn sfx_volume(&self) -> f32 {
        self.game.borrow().volume().sfx_volume()
    }

    /// Gain for the music element (slider x mix factor)
    pub fn music_gain(&self) -> f32 {
        self.game.borrow().volume().effective_music()
    }

    /// Gain for the effect elements (slider x mix factor)
    pub fn sfx_gain(&self) -> f32 {
        self.game.borrow().volume().effective_sfx()
    }
}

fn setup_keyboard(game: Shared) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

    let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
        if event.repeat() {
            return;
        }
        // A JS callback may still hold the game; drop the key rather than panic
        if let Ok(mut g) = game.try_borrow_mut() {
            g.key_pressed(&event.key());
        }
    });
    window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn setup_auto_pause(game: Shared) -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;

    // Visibility change (tab switch, minimize)
    let document_clone = document.clone();
    let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
        let visible = document_clone.visibility_state() != web_sys::VisibilityState::Hidden;
        if let Ok(mut g) = game.try_borrow_mut() {
            g.set_visible(visible);
        }
    });
    document.add_event_listener_with_callback(
        "visibilitychange",
        closure.as_ref().unchecked_ref(),
    )?;
    closure.forget();
    Ok(())
}
