use std::fmt::{
    self,
    Display,
};

use duel_data::Status;
use serde_string_enum::{
    DeserializeLabeledStringEnum,
    SerializeLabeledStringEnum,
};

use crate::common::Id;

/// The category of an effect, which determines its slot rules.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    SerializeLabeledStringEnum,
    DeserializeLabeledStringEnum,
)]
pub enum EffectCategory {
    #[string = "Status"]
    Status,
    #[string = "Volatile"]
    Volatile,
    #[string = "Hazard"]
    Hazard,
    #[string = "SideCondition"]
    #[alias = "Side Condition"]
    SideCondition,
    #[string = "PseudoWeather"]
    #[alias = "Pseudo-Weather"]
    PseudoWeather,
    #[string = "Weather"]
    Weather,
    #[string = "Ability"]
    Ability,
    #[string = "Item"]
    Item,
}

impl EffectCategory {
    /// Whether an effect of this category always replaces the existing one in its slot.
    pub fn always_replaces(&self) -> bool {
        matches!(self, Self::Ability | Self::Item)
    }
}

/// The key of an effect on its host.
///
/// A host holds at most one effect per source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EffectSource {
    Status(Status),
    Volatile(Id),
    Hazard(Id),
    SideCondition(Id),
    PseudoWeather(Id),
    Weather(Id),
    Ability,
    Item,
}

impl EffectSource {
    pub fn category(&self) -> EffectCategory {
        match self {
            Self::Status(_) => EffectCategory::Status,
            Self::Volatile(_) => EffectCategory::Volatile,
            Self::Hazard(_) => EffectCategory::Hazard,
            Self::SideCondition(_) => EffectCategory::SideCondition,
            Self::PseudoWeather(_) => EffectCategory::PseudoWeather,
            Self::Weather(_) => EffectCategory::Weather,
            Self::Ability => EffectCategory::Ability,
            Self::Item => EffectCategory::Item,
        }
    }

    /// Shorthand for a volatile source from a known ID.
    pub const fn volatile(id: &'static str) -> Self {
        Self::Volatile(Id::from_known(id))
    }

    /// Shorthand for a side condition source from a known ID.
    pub const fn side_condition(id: &'static str) -> Self {
        Self::SideCondition(Id::from_known(id))
    }

    /// Shorthand for a hazard source from a known ID.
    pub const fn hazard(id: &'static str) -> Self {
        Self::Hazard(Id::from_known(id))
    }

    /// Shorthand for a pseudo-weather source from a known ID.
    pub const fn pseudo_weather(id: &'static str) -> Self {
        Self::PseudoWeather(Id::from_known(id))
    }

    /// Shorthand for a weather source from a known ID.
    pub const fn weather(id: &'static str) -> Self {
        Self::Weather(Id::from_known(id))
    }
}

impl Display for EffectSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status(status) => write!(f, "{status}"),
            Self::Volatile(id)
            | Self::Hazard(id)
            | Self::SideCondition(id)
            | Self::PseudoWeather(id)
            | Self::Weather(id) => write!(f, "{id}"),
            Self::Ability => write!(f, "ability"),
            Self::Item => write!(f, "item"),
        }
    }
}
