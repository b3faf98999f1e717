//! Unique-effect dispatch.
//!
//! Equipped items may carry behavior that reacts to run milestones. The
//! behavior itself lives in a [`UniqueEffectRegistry`] built from content;
//! items reference it by embedded id, by exact name, or through their set.

mod dispatch;
mod handlers;
mod registry;

pub use dispatch::{DispatchResult, dispatch};
pub use handlers::{
    BattleFury, HandlerSpec, PhoenixRevival, RadiationAura, RestoringPulse, TreasureSense,
    UniqueEffectSpec,
};
pub use registry::{
    HandlerOutput, Invocation, Trigger, TriggerContext, UniqueEffectDefinition, UniqueEffectHandler,
    UniqueEffectRegistry,
};
