//! Flat per-tick entity state for the rendering layer.
//!
//! The renderer lives in TypeScript and reads WASM memory directly, so the
//! frame is packed as a contiguous f32 array read through raw-pointer
//! accessors. Must match the TypeScript protocol: 7 floats per entity.

use bytemuck::{Pod, Zeroable};

use crate::core::entity::Entity;
use crate::core::world::World;

/// One entity's state on the wire. Player first, then mobs in spawn order.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct EntityView {
    pub id: f32,
    /// 0 for the player, the mob code otherwise.
    pub kind: f32,
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    /// 1.0 when grounded this tick, else 0.0.
    pub grounded: f32,
}

impl EntityView {
    pub const FLOATS: usize = 7;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// The frame buffer rebuilt after every tick.
pub struct FrameBuffer {
    views: Vec<EntityView>,
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self {
            views: Vec::with_capacity(64),
        }
    }

    /// Repack the world's entity states.
    pub fn rebuild(&mut self, world: &World) {
        self.views.clear();
        self.views.push(pack(world.player()));
        for mob in world.mobs() {
            self.views.push(pack(mob));
        }
    }

    pub fn entity_count(&self) -> u32 {
        self.views.len() as u32
    }

    /// Raw pointer for direct reads from WASM memory.
    pub fn entities_ptr(&self) -> *const f32 {
        self.views.as_ptr() as *const f32
    }

    pub fn views(&self) -> &[EntityView] {
        &self.views
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

fn pack(entity: &Entity) -> EntityView {
    EntityView {
        id: entity.id.0 as f32,
        kind: entity.kind.code() as f32,
        x: entity.body.pos.x,
        y: entity.body.pos.y,
        vx: entity.body.vel.x,
        vy: entity.body.vel.y,
        grounded: if entity.body.grounded { 1.0 } else { 0.0 },
    }
}
