//! `#[wasm_bindgen]` surface for the blockbox simulation.
//!
//! The page initializes once, wires its event handlers to the input
//! exports, and reads entity state each frame through the pointer
//! accessors. Boundary errors (bad cell indices, unknown codes, malformed
//! config) surface as JS exceptions rather than being absorbed.

pub mod raf;
pub mod runner;

pub use raf::RafLoop;
pub use runner::SimRunner;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

use blockbox_sim::{Action, EntityView, Material, MobKind, SimConfig};

thread_local! {
    static RUNNER: RefCell<Option<SimRunner>> = RefCell::new(None);
    static RAF: RafLoop = RafLoop::new();
}

fn with_runner<R>(f: impl FnOnce(&mut SimRunner) -> R) -> R {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let runner = borrow
            .as_mut()
            .expect("Simulation not initialized. Call sim_init() first.");
        f(runner)
    })
}

/// Build the simulation. `config_json` overrides the defaults field by
/// field; pass nothing for the stock 20×20 world.
#[wasm_bindgen]
pub fn sim_init(config_json: Option<String>) -> Result<(), JsError> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let config = match config_json {
        Some(json) => SimConfig::from_json(&json)?,
        None => SimConfig::default(),
    };
    let runner = SimRunner::new(config);

    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });

    log::info!("blockbox: initialized");
    Ok(())
}

// ---- Loop control ----

/// Start ticking, one simulation frame per display refresh.
#[wasm_bindgen]
pub fn sim_start() {
    with_runner(|r| r.scheduler_mut().start());
    RAF.with(|raf| raf.start(|dt| with_runner(|r| r.tick(dt))));
}

/// Stop ticking and cancel the pending animation-frame callback. Owners of
/// a discarded view must call this, or the loop keeps running against
/// orphaned state.
#[wasm_bindgen]
pub fn sim_stop() {
    RAF.with(|raf| raf.stop());
    with_runner(|r| r.scheduler_mut().stop());
}

#[wasm_bindgen]
pub fn sim_is_running() -> bool {
    with_runner(|r| r.scheduler().is_running())
}

// ---- Input producers ----

#[wasm_bindgen]
pub fn sim_key_down(key_code: u32) {
    with_runner(|r| r.scheduler_mut().input_mut().key_down(key_code));
}

#[wasm_bindgen]
pub fn sim_key_up(key_code: u32) {
    with_runner(|r| r.scheduler_mut().input_mut().key_up(key_code));
}

/// Direction-button press. Action codes: 0 = left, 1 = right, 2 = jump.
#[wasm_bindgen]
pub fn sim_button_down(action_code: u32) {
    if let Some(action) = Action::from_code(action_code) {
        with_runner(|r| r.scheduler_mut().input_mut().press(action));
    }
}

#[wasm_bindgen]
pub fn sim_button_up(action_code: u32) {
    if let Some(action) = Action::from_code(action_code) {
        with_runner(|r| r.scheduler_mut().input_mut().release(action));
    }
}

/// Joystick horizontal axis in [-1, 1].
#[wasm_bindgen]
pub fn sim_joystick(axis: f32) {
    with_runner(|r| r.scheduler_mut().input_mut().joystick(axis));
}

#[wasm_bindgen]
pub fn sim_joystick_end() {
    with_runner(|r| r.scheduler_mut().input_mut().joystick_end());
}

// ---- Editor and palette ----

#[wasm_bindgen]
pub fn sim_paint(material_code: u32, row: i32, col: i32) -> Result<(), JsError> {
    let material = Material::from_code(material_code)?;
    with_runner(|r| r.scheduler_mut().world_mut().paint(material, row, col))?;
    Ok(())
}

#[wasm_bindgen]
pub fn sim_erase(row: i32, col: i32) -> Result<(), JsError> {
    with_runner(|r| r.scheduler_mut().world_mut().erase(row, col))?;
    Ok(())
}

#[wasm_bindgen]
pub fn sim_clear_grid() {
    with_runner(|r| r.scheduler_mut().world_mut().clear_grid());
}

/// Place a mob from the palette. Returns its entity id.
#[wasm_bindgen]
pub fn sim_spawn_mob(mob_code: u32, row: i32, col: i32) -> Result<u32, JsError> {
    let kind = MobKind::from_code(mob_code)?;
    let id = with_runner(|r| {
        let id = r.scheduler_mut().world_mut().spawn_mob(kind, row, col)?;
        r.refresh_frame();
        Ok::<_, blockbox_sim::SimError>(id)
    })?;
    Ok(id.0)
}

/// The "New/Reset" action: clear mobs, respawn the player. Grid contents
/// are cleared separately via `sim_clear_grid`.
#[wasm_bindgen]
pub fn sim_reset() {
    with_runner(|r| {
        r.scheduler_mut().world_mut().reset();
        r.refresh_frame();
    });
}

// ---- Frame accessors for the renderer ----

#[wasm_bindgen]
pub fn get_entities_ptr() -> *const f32 {
    with_runner(|r| r.entities_ptr())
}

#[wasm_bindgen]
pub fn get_entity_count() -> u32 {
    with_runner(|r| r.entity_count())
}

/// Floats per entity record: id, kind, x, y, vx, vy, grounded.
#[wasm_bindgen]
pub fn get_entity_floats() -> u32 {
    EntityView::FLOATS as u32
}

#[wasm_bindgen]
pub fn get_world_width() -> f32 {
    with_runner(|r| r.world_width())
}

#[wasm_bindgen]
pub fn get_world_height() -> f32 {
    with_runner(|r| r.world_height())
}

#[wasm_bindgen]
pub fn get_tile_size() -> f32 {
    with_runner(|r| r.tile_size())
}
