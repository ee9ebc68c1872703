use glam::Vec2;
use serde::Deserialize;

use crate::api::types::SimError;
use crate::core::scheduler::TickPacing;

/// Simulation configuration, provided by the host page.
///
/// Defaults mirror the original sandbox: a 20×20 grid of 30 px tiles with
/// gravity 0.4 px/tick². All velocities and impulses are per-tick, not
/// per-second; under the default per-frame pacing a tick is one display
/// refresh.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    /// Grid dimension in tiles (the grid is always square).
    pub grid_size: usize,
    /// Tile edge length in pixels. Entity boxes are square and tile-sized.
    pub tile_size: f32,
    /// Downward acceleration in px/tick².
    pub gravity: f32,
    /// Horizontal speed in px/tick. Assigned, never accumulated.
    pub move_speed: f32,
    /// Jump impulse in px/tick. Negative is up.
    pub jump_impulse: f32,
    /// Player spawn point (top-left of the box), also the respawn target
    /// after falling out of the world.
    pub spawn_x: f32,
    pub spawn_y: f32,
    /// Tick pacing. Per-frame by default (simulation speed follows the
    /// display refresh rate, as the original did).
    pub pacing: TickPacing,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            grid_size: 20,
            tile_size: 30.0,
            gravity: 0.4,
            move_speed: 3.0,
            jump_impulse: -8.0,
            spawn_x: 72.0,
            spawn_y: 0.0,
            pacing: TickPacing::PerFrame,
        }
    }
}

impl SimConfig {
    /// Parse a config from host-supplied JSON. Missing fields fall back to
    /// the defaults above.
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let config: SimConfig =
            serde_json::from_str(json).map_err(|e| SimError::Config(e.to_string()))?;
        if config.grid_size == 0 {
            return Err(SimError::Config("grid_size must be non-zero".into()));
        }
        if !(config.tile_size > 0.0) {
            return Err(SimError::Config("tile_size must be positive".into()));
        }
        Ok(config)
    }

    /// World width in pixels.
    pub fn world_width(&self) -> f32 {
        self.grid_size as f32 * self.tile_size
    }

    /// World height in pixels. An entity whose y exceeds this is out of
    /// the world.
    pub fn world_height(&self) -> f32 {
        self.grid_size as f32 * self.tile_size
    }

    /// Entity bounding-box edge length. Always one tile.
    pub fn box_size(&self) -> f32 {
        self.tile_size
    }

    pub fn spawn_point(&self) -> Vec2 {
        Vec2::new(self.spawn_x, self.spawn_y)
    }
}
