use glam::Vec2;

use crate::api::types::{EntityId, MobKind};

/// What an entity is. The player is a singleton managed by the world; mobs
/// are spawned from the palette and tagged with their variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Player,
    Mob(MobKind),
}

impl EntityKind {
    /// Wire code: 0 for the player, the mob code otherwise.
    pub fn code(self) -> u32 {
        match self {
            EntityKind::Player => 0,
            EntityKind::Mob(kind) => kind.code(),
        }
    }
}

/// The physical state shared by every entity.
///
/// `pos` is the top-left corner of the tile-sized bounding box, in pixels.
/// `grounded` is recomputed from the vertical collision outcome every tick;
/// it is true only on ticks where a downward collision was resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    pub grounded: bool,
}

impl Body {
    /// A body at rest at `pos`, airborne until the first tick says otherwise.
    pub fn at(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            grounded: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub body: Body,
}

impl Entity {
    pub fn new(id: EntityId, kind: EntityKind, pos: Vec2) -> Self {
        Self {
            id,
            kind,
            body: Body::at(pos),
        }
    }
}
