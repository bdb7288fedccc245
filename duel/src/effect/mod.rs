mod context;
mod dispatch;
mod effect;
mod effect_map;
mod hook;
mod outcome;
mod source;

pub use context::EffectContext;
pub use dispatch::Handler;
pub(crate) use dispatch::{
    RetiredSlot,
    Retirement,
};
pub use effect::{
    Effect,
    EffectAsAny,
    EffectClone,
    Immunity,
};
pub use effect_map::{
    EffectMap,
    EffectSlot,
};
pub use hook::Hook;
pub use outcome::HookOutcome;
pub use source::{
    EffectCategory,
    EffectSource,
};
