//! wasm-bindgen exports for the brawl engine.
//!
//! JS calls `game_init` once, then `game_tick` every animation frame and reads
//! the packed frame from linear memory at `get_buffer_ptr()`.

use std::cell::RefCell;

use brawl_engine::{Action, InputEvent};
use wasm_bindgen::prelude::*;

pub mod runner;

pub use runner::GameRunner;

thread_local! {
    static RUNNER: RefCell<Option<GameRunner>> = const { RefCell::new(None) };
}

/// Run `f` against the runner. Calls before `game_init` are logged and ignored.
fn with_runner<R>(f: impl FnOnce(&mut GameRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(runner) => Some(f(runner)),
            None => {
                log::warn!("game not initialized; call game_init() first");
                None
            }
        }
    })
}

fn action_from_code(code: u32) -> Option<Action> {
    Action::ALL.get(code as usize).copied()
}

/// Create the runner. `config_json` may be empty for defaults.
/// Returns false if the config does not parse.
#[wasm_bindgen]
pub fn game_init(config_json: &str) -> bool {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    match GameRunner::from_json(config_json) {
        Ok(runner) => {
            RUNNER.with(|cell| *cell.borrow_mut() = Some(runner));
            log::info!("brawl: initialized");
            true
        }
        Err(e) => {
            log::error!("brawl: {}", e);
            false
        }
    }
}

#[wasm_bindgen]
pub fn game_tick(dt: f32) {
    with_runner(|r| r.tick(dt));
}

#[wasm_bindgen]
pub fn game_key_down(key_code: u32) {
    with_runner(|r| r.push_input(InputEvent::KeyDown { key_code }));
}

#[wasm_bindgen]
pub fn game_key_up(key_code: u32) {
    with_runner(|r| r.push_input(InputEvent::KeyUp { key_code }));
}

/// Touch controls: `action` is the index into `Action::ALL`.
#[wasm_bindgen]
pub fn game_action(action: u32, down: bool) {
    let Some(action) = action_from_code(action) else {
        log::warn!("unknown action code {}", action);
        return;
    };
    with_runner(|r| r.push_input(InputEvent::Action { action, down }));
}

/// One-shot touch button: press and release `action` on the next tick.
#[wasm_bindgen]
pub fn game_tap(action: u32) {
    let Some(action) = action_from_code(action) else {
        log::warn!("unknown action code {}", action);
        return;
    };
    with_runner(|r| r.tap(action));
}

#[wasm_bindgen]
pub fn game_load_manifest(json: &str) -> bool {
    with_runner(|r| r.load_manifest(json))
        .map(|res| res.map_err(|e| log::error!("manifest: {}", e)).is_ok())
        .unwrap_or(false)
}

#[wasm_bindgen]
pub fn game_load_levels(json: &str) -> bool {
    with_runner(|r| r.load_levels(json))
        .map(|res| res.map_err(|e| log::error!("levels: {}", e)).is_ok())
        .unwrap_or(false)
}

#[wasm_bindgen]
pub fn set_master_volume(volume: f32) {
    with_runner(|r| r.set_master_volume(volume));
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_buffer_ptr() -> *const f32 {
    with_runner(|r| r.buffer_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_buffer_total_floats() -> u32 {
    with_runner(|r| r.buffer_total_floats()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_frame_counter() -> u32 {
    with_runner(|r| r.frame_counter()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_codes_follow_declaration_order() {
        assert_eq!(action_from_code(0), Some(Action::MoveLeft));
        assert_eq!(action_from_code(6), Some(Action::Confirm));
        assert_eq!(action_from_code(7), None);
    }

    #[test]
    fn exports_are_inert_before_init() {
        assert_eq!(get_buffer_total_floats(), 0);
        assert!(get_buffer_ptr().is_null());
        game_tick(0.016);
    }
}
