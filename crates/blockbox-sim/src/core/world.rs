use glam::Vec2;
use log::info;

use crate::api::config::SimConfig;
use crate::api::types::{EntityId, Material, MobKind, SimError};
use crate::core::entity::{Body, Entity, EntityKind};
use crate::core::grid::TileGrid;
use crate::core::physics::{step_body, Intent, Steer, StepOutcome};
use crate::input::snapshot::ActionSnapshot;

/// The world: grid, player and mobs, stepped once per tick.
///
/// Owns the player record and the mob collection exclusively. The grid is
/// mutated only through the editor passthroughs; the stepper reads it.
pub struct World {
    config: SimConfig,
    grid: TileGrid,
    player: Entity,
    mobs: Vec<Entity>,
    next_id: u32,
}

impl World {
    pub fn new(config: SimConfig) -> Self {
        let grid = TileGrid::new(config.grid_size);
        let player = Entity::new(EntityId(0), EntityKind::Player, config.spawn_point());
        info!(
            "world created: {0}x{0} tiles, tile size {1}",
            config.grid_size, config.tile_size
        );
        Self {
            config,
            grid,
            player,
            mobs: Vec::new(),
            next_id: 1,
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn player(&self) -> &Entity {
        &self.player
    }

    /// Mobs in spawn order. Order is stable across steps; despawned mobs
    /// simply disappear from the slice.
    pub fn mobs(&self) -> &[Entity] {
        &self.mobs
    }

    /// Place a mob at a tile's origin. Bounds-checked like the editor calls.
    pub fn spawn_mob(&mut self, kind: MobKind, row: i32, col: i32) -> Result<EntityId, SimError> {
        if !self.grid.contains(row, col) {
            return Err(SimError::OutOfBounds { row, col });
        }
        let id = EntityId(self.next_id);
        self.next_id += 1;
        let pos = Vec2::new(
            col as f32 * self.config.tile_size,
            row as f32 * self.config.tile_size,
        );
        self.mobs.push(Entity::new(id, EntityKind::Mob(kind), pos));
        Ok(id)
    }

    /// Advance the whole world by one tick.
    ///
    /// The player steps with the frame's input snapshot and respawns in
    /// place on falling out of the world. Mobs step with no intent (passive
    /// fallers); a mob that falls out is dropped permanently, survivors keep
    /// their spawn order.
    pub fn step(&mut self, snapshot: ActionSnapshot) {
        match step_body(
            &self.player.body,
            player_intent(snapshot),
            &self.grid,
            &self.config,
        ) {
            StepOutcome::Moved(body) => self.player.body = body,
            StepOutcome::OutOfWorld => {
                self.player.body = Body::at(self.config.spawn_point());
            }
        }

        let grid = &self.grid;
        let config = &self.config;
        self.mobs.retain_mut(|mob| {
            match step_body(&mob.body, Intent::default(), grid, config) {
                StepOutcome::Moved(body) => {
                    mob.body = body;
                    true
                }
                StepOutcome::OutOfWorld => false,
            }
        });
    }

    /// Clear every mob and put the player back at spawn. Grid contents are
    /// untouched; clearing them is a separate editor operation.
    pub fn reset(&mut self) {
        self.mobs.clear();
        self.player.body = Body::at(self.config.spawn_point());
        info!("world reset");
    }

    // -- Editor passthroughs: the sole writers of grid contents --

    pub fn paint(&mut self, material: Material, row: i32, col: i32) -> Result<(), SimError> {
        self.grid.paint(material, row, col)
    }

    pub fn erase(&mut self, row: i32, col: i32) -> Result<(), SimError> {
        self.grid.erase(row, col)
    }

    pub fn clear_grid(&mut self) {
        self.grid.clear();
    }
}

/// Translate the frame snapshot into a stepper intent. With both direction
/// booleans held, right wins: the original assigned left then right in
/// sequence, so the later write took effect.
fn player_intent(snapshot: ActionSnapshot) -> Intent {
    let steer = if snapshot.move_right {
        Steer::Right
    } else if snapshot.move_left {
        Steer::Left
    } else {
        Steer::None
    };
    Intent {
        steer,
        jump: snapshot.jump,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idle() -> ActionSnapshot {
        ActionSnapshot::default()
    }

    #[test]
    fn spawn_ids_are_sequential() {
        let mut world = World::new(SimConfig::default());
        let a = world.spawn_mob(MobKind::Pig, 2, 3).unwrap();
        let b = world.spawn_mob(MobKind::Zombie, 2, 4).unwrap();
        assert_eq!(a, EntityId(1));
        assert_eq!(b, EntityId(2));
        assert_eq!(world.mobs().len(), 2);
        // Spawned at the tile origin, at rest, airborne.
        let pig = &world.mobs()[0];
        assert_eq!(pig.body.pos, Vec2::new(90.0, 60.0));
        assert_eq!(pig.body.vel, Vec2::ZERO);
        assert!(!pig.body.grounded);
    }

    #[test]
    fn spawn_out_of_range_fails() {
        let mut world = World::new(SimConfig::default());
        assert_eq!(
            world.spawn_mob(MobKind::Pig, 20, 0),
            Err(SimError::OutOfBounds { row: 20, col: 0 })
        );
        assert!(world.mobs().is_empty());
    }

    #[test]
    fn mob_over_bottomless_column_despawns() {
        let mut world = World::new(SimConfig::default());
        world.spawn_mob(MobKind::Creeper, 0, 5).unwrap();

        let mut despawn_tick = None;
        for tick in 0..300 {
            world.step(idle());
            if world.mobs().is_empty() {
                despawn_tick = Some(tick);
                break;
            }
        }
        // Gone the very tick its y crossed the bottom bound, and it never
        // comes back.
        let despawn_tick = despawn_tick.expect("mob never fell out");
        world.step(idle());
        assert!(world.mobs().is_empty());

        // Sanity: y(t) = 0.2 t (t+1) must exceed 600 on that tick and not
        // on the one before.
        let y = |t: f32| 0.2 * t * (t + 1.0);
        let t = (despawn_tick + 1) as f32;
        assert!(y(t) > 600.0);
        assert!(y(t - 1.0) <= 600.0);
    }

    #[test]
    fn survivor_mobs_keep_spawn_order() {
        let mut world = World::new(SimConfig::default());
        // Two mobs land on platforms, the middle one falls forever.
        world.paint(Material::Stone, 5, 2).unwrap();
        world.paint(Material::Stone, 5, 8).unwrap();
        let a = world.spawn_mob(MobKind::Pig, 4, 2).unwrap();
        let doomed = world.spawn_mob(MobKind::Zombie, 4, 5).unwrap();
        let b = world.spawn_mob(MobKind::Creeper, 4, 8).unwrap();

        for _ in 0..300 {
            world.step(idle());
        }
        let ids: Vec<EntityId> = world.mobs().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![a, b]);
        assert!(!ids.contains(&doomed));
    }

    #[test]
    fn mobs_are_passive_fallers() {
        let mut world = World::new(SimConfig::default());
        world.paint(Material::Stone, 5, 2).unwrap();
        world.spawn_mob(MobKind::Pig, 4, 2).unwrap();

        // Player input must not leak into mob intent.
        let held = ActionSnapshot {
            move_right: true,
            jump: true,
            ..Default::default()
        };
        for _ in 0..60 {
            world.step(held);
        }
        let pig = &world.mobs()[0];
        assert_eq!(pig.body.pos.x, 60.0);
        assert!(pig.body.grounded);
    }

    #[test]
    fn player_respawns_after_falling_out() {
        let mut world = World::new(SimConfig::default());
        let spawn = world.config().spawn_point();

        let mut respawned = false;
        for _ in 0..300 {
            let before = world.player().body.pos.y;
            world.step(idle());
            let after = world.player().body.pos.y;
            if after < before {
                // Only a respawn moves the player up with no input.
                respawned = true;
                break;
            }
        }
        assert!(respawned, "player never fell out of the world");
        assert_eq!(world.player().body.pos, spawn);
        assert_eq!(world.player().body.vel, Vec2::ZERO);
        assert!(!world.player().body.grounded);
    }

    #[test]
    fn player_moves_with_snapshot() {
        let mut world = World::new(SimConfig::default());
        // Floor under the spawn column so the player can walk.
        for col in 0..20 {
            world.paint(Material::Grass, 5, col).unwrap();
        }
        for _ in 0..60 {
            world.step(idle());
        }
        assert!(world.player().body.grounded);
        let x0 = world.player().body.pos.x;

        world.step(ActionSnapshot {
            move_right: true,
            ..Default::default()
        });
        assert_eq!(world.player().body.pos.x, x0 + world.config().move_speed);

        world.step(ActionSnapshot {
            move_left: true,
            ..Default::default()
        });
        assert_eq!(world.player().body.pos.x, x0);
    }

    #[test]
    fn both_directions_held_steers_right() {
        let mut world = World::new(SimConfig::default());
        for col in 0..20 {
            world.paint(Material::Grass, 5, col).unwrap();
        }
        for _ in 0..60 {
            world.step(idle());
        }
        let x0 = world.player().body.pos.x;
        world.step(ActionSnapshot {
            move_left: true,
            move_right: true,
            ..Default::default()
        });
        assert!(world.player().body.pos.x > x0);
    }

    #[test]
    fn reset_clears_mobs_and_respawns_player() {
        let mut world = World::new(SimConfig::default());
        world.paint(Material::Stone, 10, 10).unwrap();
        world.spawn_mob(MobKind::Pig, 3, 3).unwrap();
        for _ in 0..10 {
            world.step(idle());
        }

        world.reset();
        assert!(world.mobs().is_empty());
        assert_eq!(world.player().body.pos, world.config().spawn_point());
        assert_eq!(world.player().body.vel, Vec2::ZERO);
        // The grid is untouched by a world reset.
        assert!(world.grid().is_solid(10, 10));

        // Ids stay monotonic across resets.
        let next = world.spawn_mob(MobKind::Zombie, 0, 0).unwrap();
        assert_eq!(next, EntityId(2));
    }

    #[test]
    fn grid_edit_takes_effect_next_tick() {
        let mut world = World::new(SimConfig::default());
        // Let the player fall a while, then paint a platform right below.
        for _ in 0..20 {
            world.step(idle());
        }
        let row = (world.player().body.pos.y / 30.0).floor() as i32 + 2;
        world.paint(Material::Stone, row, 2).unwrap();
        world.paint(Material::Stone, row, 3).unwrap();

        let mut landed = false;
        for _ in 0..40 {
            world.step(idle());
            if world.player().body.grounded {
                landed = true;
                break;
            }
        }
        assert!(landed);
        assert_eq!(
            world.player().body.pos.y,
            row as f32 * 30.0 - world.config().box_size()
        );
    }
}
