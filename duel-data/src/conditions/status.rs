use serde_string_enum::{
    DeserializeLabeledStringEnum,
    SerializeLabeledStringEnum,
};

use crate::Type;

/// A non-volatile status condition.
///
/// A Mon has at most one status, and it persists when the Mon switches out.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    SerializeLabeledStringEnum,
    DeserializeLabeledStringEnum,
)]
pub enum Status {
    #[string = "brn"]
    #[alias = "burn"]
    Burn,
    #[string = "frz"]
    #[alias = "freeze"]
    Freeze,
    #[string = "par"]
    #[alias = "paralysis"]
    Paralysis,
    #[string = "psn"]
    #[alias = "poison"]
    Poison,
    #[string = "slp"]
    #[alias = "sleep"]
    Sleep,
    #[string = "tox"]
    #[alias = "toxic"]
    Toxic,
}

impl Status {
    /// Types that can never receive this status.
    pub fn immune_types(&self) -> &'static [Type] {
        match self {
            Self::Burn => &[Type::Fire],
            Self::Freeze => &[Type::Ice],
            Self::Paralysis => &[Type::Electric],
            Self::Poison | Self::Toxic => &[Type::Poison, Type::Steel],
            Self::Sleep => &[],
        }
    }
}

#[cfg(test)]
mod status_test {
    use crate::{
        Status,
        Type,
        test_util::test_string_serialization,
    };

    #[test]
    fn serializes_to_short_name() {
        test_string_serialization(Status::Toxic, "tox");
        test_string_serialization(Status::Paralysis, "par");
    }

    #[test]
    fn steel_types_cannot_be_poisoned() {
        assert!(Status::Poison.immune_types().contains(&Type::Steel));
        assert!(Status::Toxic.immune_types().contains(&Type::Steel));
        assert!(Status::Sleep.immune_types().is_empty());
    }
}
