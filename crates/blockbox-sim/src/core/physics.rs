//! The per-entity, per-tick physics step.
//!
//! Axis-separated AABB-vs-tile-grid resolution: integrate and resolve X
//! first, then integrate and resolve Y using the already-corrected X. One
//! colliding tile is resolved per axis per tick (the first hit in row-major
//! scan order), which is the original sandbox's behavior, not a
//! minimum-translation solver. Tunneling at extreme velocity is possible
//! and accepted.

use std::ops::RangeInclusive;

use crate::api::config::SimConfig;
use crate::core::entity::Body;
use crate::core::grid::TileGrid;

/// Horizontal intent for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Steer {
    Left,
    Right,
    #[default]
    None,
}

/// One frame's worth of input for a single entity. Mobs always step with
/// the default (no steering, no jump): they are passive fallers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Intent {
    pub steer: Steer,
    pub jump: bool,
}

/// Result of stepping one entity.
///
/// The stepper does not decide removal vs. respawn; the world applies
/// kind-specific policy to `OutOfWorld` (player respawns, mobs are dropped).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    Moved(Body),
    OutOfWorld,
}

/// Trailing-edge epsilon for tile spans. The box occupies the half-open
/// interval [p, p + box): a body clamped flush onto a tile boundary does
/// not occupy the tile beyond it, which is what keeps resting contact and
/// walking along the ground stable.
const EDGE_EPS: f32 = 1e-4;

/// Inclusive range of tile indices covered by a box edge starting at
/// `origin` and extending `extent` pixels.
fn tile_span(origin: f32, extent: f32, tile: f32) -> RangeInclusive<i32> {
    let lo = (origin / tile).floor() as i32;
    let hi = ((origin + extent - EDGE_EPS) / tile).floor() as i32;
    lo..=hi
}

/// Advance one body by one tick against the grid.
pub fn step_body(body: &Body, intent: Intent, grid: &TileGrid, cfg: &SimConfig) -> StepOutcome {
    let tile = cfg.tile_size;
    let box_size = cfg.box_size();
    let mut pos = body.pos;
    let mut vel = body.vel;

    // Horizontal velocity is assigned, never accumulated.
    vel.x = match intent.steer {
        Steer::Left => -cfg.move_speed,
        Steer::Right => cfg.move_speed,
        Steer::None => 0.0,
    };

    // Jump requires ground contact from the previous tick's resolution.
    // Grounded is not cleared here; the vertical pass recomputes it below.
    if intent.jump && body.grounded {
        vel.y = cfg.jump_impulse;
    }

    // Gravity applies every tick, grounded or not. The collision clamp is
    // what returns vel.y to rest, not a gravity skip.
    vel.y += cfg.gravity;

    // Horizontal integration + collision. Row-major scan, first hit clamps
    // to the tile's near edge and ends the scan for this tick.
    pos.x += vel.x;
    if vel.x != 0.0 {
        'horizontal: for row in tile_span(pos.y, box_size, tile) {
            for col in tile_span(pos.x, box_size, tile) {
                if grid.is_solid(row, col) {
                    pos.x = if vel.x > 0.0 {
                        col as f32 * tile - box_size
                    } else {
                        (col + 1) as f32 * tile
                    };
                    vel.x = 0.0;
                    break 'horizontal;
                }
            }
        }
    }

    // Vertical integration + collision, against the resolved x.
    let mut grounded = false;
    pos.y += vel.y;
    if vel.y != 0.0 {
        'vertical: for row in tile_span(pos.y, box_size, tile) {
            for col in tile_span(pos.x, box_size, tile) {
                if grid.is_solid(row, col) {
                    if vel.y > 0.0 {
                        pos.y = row as f32 * tile - box_size;
                        grounded = true;
                    } else {
                        pos.y = (row + 1) as f32 * tile;
                    }
                    vel.y = 0.0;
                    break 'vertical;
                }
            }
        }
    }

    // Side walls clamp; the floor does not. Crossing the bottom edge is a
    // modeled out-of-world transition, not a collision.
    pos.x = pos.x.clamp(0.0, cfg.world_width() - box_size);
    if pos.y > cfg.world_height() {
        return StepOutcome::OutOfWorld;
    }

    StepOutcome::Moved(Body {
        pos,
        vel,
        grounded,
    })
}
