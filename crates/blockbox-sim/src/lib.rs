pub mod api;
pub mod bridge;
pub mod core;
pub mod input;

// Re-export key types at crate root for convenience
pub use crate::api::config::SimConfig;
pub use crate::api::types::{EntityId, Material, MobKind, SimError};
pub use crate::bridge::frame::{EntityView, FrameBuffer};
pub use crate::core::entity::{Body, Entity, EntityKind};
pub use crate::core::grid::TileGrid;
pub use crate::core::physics::{step_body, Intent, Steer, StepOutcome};
pub use crate::core::scheduler::{FramePacer, Scheduler, TickPacing};
pub use crate::core::world::World;
pub use crate::input::snapshot::{Action, ActionSnapshot, InputState, JOYSTICK_DEAD_ZONE};
