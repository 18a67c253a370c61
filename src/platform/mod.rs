//! Platform abstraction layer
//!
//! Browser-only glue lives in `web`:
//! - Frame timing (requestAnimationFrame)
//! - Keyboard input
//! - Visibility detection
//! - Storage (LocalStorage)

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Seed for a new session from the host clock
#[cfg(target_arch = "wasm32")]
pub fn session_seed() -> u64 {
    js_sys::Date::now() as u64
}

/// Seed for a new session from the host clock
#[cfg(not(target_arch = "wasm32"))]
pub fn session_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
