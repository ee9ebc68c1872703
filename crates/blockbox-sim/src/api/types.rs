use thiserror::Error;

/// Unique identifier for an entity in the world.
/// Monotonically assigned, stable for the entity's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(pub u32);

/// Block material painted into a grid cell.
/// Every placed material is solid; the physics core only reads occupancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Material {
    Stone,
    Dirt,
    Grass,
    Water,
    Sand,
    Wood,
    Leaves,
    Brick,
    Glass,
    Gold,
}

impl Material {
    /// Numeric code used on the wire (0 is reserved for "empty").
    pub fn code(self) -> u32 {
        match self {
            Material::Stone => 1,
            Material::Dirt => 2,
            Material::Grass => 3,
            Material::Water => 4,
            Material::Sand => 5,
            Material::Wood => 6,
            Material::Leaves => 7,
            Material::Brick => 8,
            Material::Glass => 9,
            Material::Gold => 10,
        }
    }

    pub fn from_code(code: u32) -> Result<Self, SimError> {
        Ok(match code {
            1 => Material::Stone,
            2 => Material::Dirt,
            3 => Material::Grass,
            4 => Material::Water,
            5 => Material::Sand,
            6 => Material::Wood,
            7 => Material::Leaves,
            8 => Material::Brick,
            9 => Material::Glass,
            10 => Material::Gold,
            _ => return Err(SimError::UnknownMaterial(code)),
        })
    }
}

/// The mob palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MobKind {
    Pig,
    Zombie,
    Creeper,
}

impl MobKind {
    /// Numeric code used on the wire (0 is reserved for the player).
    pub fn code(self) -> u32 {
        match self {
            MobKind::Pig => 1,
            MobKind::Zombie => 2,
            MobKind::Creeper => 3,
        }
    }

    pub fn from_code(code: u32) -> Result<Self, SimError> {
        Ok(match code {
            1 => MobKind::Pig,
            2 => MobKind::Zombie,
            3 => MobKind::Creeper,
            _ => return Err(SimError::UnknownMob(code)),
        })
    }
}

/// Errors at the editor/palette boundary.
///
/// Steady-state ticking has no error paths: falling out of the world is a
/// modeled transition, not a failure. These exist so a caller supplying an
/// out-of-range index or an unknown code fails loudly instead of being
/// silently absorbed.
#[derive(Debug, Error, PartialEq)]
pub enum SimError {
    #[error("cell ({row}, {col}) is outside the grid")]
    OutOfBounds { row: i32, col: i32 },
    #[error("unknown material code {0}")]
    UnknownMaterial(u32),
    #[error("unknown mob code {0}")]
    UnknownMob(u32),
    #[error("invalid config: {0}")]
    Config(String),
}
