use serde_string_enum::{
    DeserializeLabeledStringEnum,
    SerializeLabeledStringEnum,
};

/// The target of a move in a single battle.
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
pub enum MoveTarget {
    /// The opposing Mon.
    #[string = "Normal"]
    #[default]
    Normal,
    /// The user.
    #[string = "User"]
    User,
    /// The entire battlefield.
    #[string = "Field"]
    Field,
    /// The user's side.
    #[string = "UserSide"]
    UserSide,
    /// The opposing side.
    #[string = "FoeSide"]
    FoeSide,
}

impl MoveTarget {
    /// Whether the move acts on its user instead of the opposing Mon.
    pub fn affects_user(&self) -> bool {
        !matches!(self, Self::Normal)
    }
}
