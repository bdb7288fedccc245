use serde_string_enum::{
    DeserializeLabeledStringEnum,
    SerializeLabeledStringEnum,
};

/// The category of a move, which selects the stats used in damage calculation.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    SerializeLabeledStringEnum,
    DeserializeLabeledStringEnum,
)]
pub enum MoveCategory {
    /// Uses Atk against Def.
    #[string = "Physical"]
    #[default]
    Physical,
    /// Uses SpA against SpD.
    #[string = "Special"]
    Special,
    /// Deals no direct damage.
    #[string = "Status"]
    Status,
}
