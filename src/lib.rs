//! Ski Patrol core crate.
//!
//! A canvas prototype of a downhill ski-patrol run: a perspective-projected
//! slope, one player-controlled patroller, and decorative night scenery
//! (mountains, stars, drifting snow lines). All simulation math (slope
//! projection, corridor clamping, scenery drift, pose easing) lives in pure
//! submodules under [`slope`] so it runs under native `cargo test`;
//! `start_game()` wires the browser shell.

use wasm_bindgen::prelude::*;

pub mod slope;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Unified entrypoint: builds the slope scene and starts the frame loop.
/// The run itself stays paused until the start control is clicked.
#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    slope::start_patrol_mode()
}
