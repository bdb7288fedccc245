use serde_string_enum::{
    DeserializeLabeledStringEnum,
    SerializeLabeledStringEnum,
};

use crate::Type;

/// A property of a move that effects can check.
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
pub enum MoveFlag {
    /// Makes contact with the target.
    #[string = "Contact"]
    Contact,
    /// Blocked by protection moves.
    #[string = "Protect"]
    Protect,
    /// Sound-based.
    #[string = "Sound"]
    Sound,
    /// Powder-based.
    #[string = "Powder"]
    Powder,
    /// Punching move.
    #[string = "Punch"]
    Punch,
}

impl MoveFlag {
    /// Types that are unaffected by moves with this flag.
    pub fn immune_types(&self) -> &'static [Type] {
        match self {
            Self::Powder => &[Type::Grass],
            _ => &[],
        }
    }
}

#[cfg(test)]
mod move_flag_test {
    use crate::{
        MoveFlag,
        Type,
    };

    #[test]
    fn grass_types_ignore_powder() {
        assert_eq!(MoveFlag::Powder.immune_types(), &[Type::Grass]);
        assert!(MoveFlag::Contact.immune_types().is_empty());
    }
}
