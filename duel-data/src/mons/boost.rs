use serde::{
    Deserialize,
    Serialize,
};
use serde_string_enum::{
    DeserializeLabeledStringEnum,
    SerializeLabeledStringEnum,
};

use crate::Stat;

/// A single value that can be boosted.
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
pub enum Boost {
    #[string = "atk"]
    Atk,
    #[string = "def"]
    Def,
    #[string = "spa"]
    SpAtk,
    #[string = "spd"]
    SpDef,
    #[string = "spe"]
    Spe,
    #[string = "acc"]
    #[alias = "accuracy"]
    Accuracy,
    #[string = "eva"]
    #[alias = "evasion"]
    Evasion,
}

impl Boost {
    /// The boost that applies to the given stat, if any.
    pub fn for_stat(stat: Stat) -> Option<Self> {
        match stat {
            Stat::HP => None,
            Stat::Atk => Some(Self::Atk),
            Stat::Def => Some(Self::Def),
            Stat::SpAtk => Some(Self::SpAtk),
            Stat::SpDef => Some(Self::SpDef),
            Stat::Spe => Some(Self::Spe),
        }
    }
}

const BOOST_ORDER: [Boost; 7] = [
    Boost::Atk,
    Boost::Def,
    Boost::SpAtk,
    Boost::SpDef,
    Boost::Spe,
    Boost::Accuracy,
    Boost::Evasion,
];

/// Iterator over the non-zero entries of a [`BoostTable`].
pub struct BoostTableEntries<'b> {
    table: &'b BoostTable,
    index: usize,
}

impl Iterator for BoostTableEntries<'_> {
    type Item = (Boost, i8);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(boost) = BOOST_ORDER.get(self.index) {
            self.index += 1;
            let value = self.table.get(*boost);
            if value != 0 {
                return Some((*boost, value));
            }
        }
        None
    }
}

/// A table of boost stages, each in `[-6, 6]`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoostTable {
    #[serde(default)]
    pub atk: i8,
    #[serde(default)]
    pub def: i8,
    #[serde(default)]
    pub spa: i8,
    #[serde(default)]
    pub spd: i8,
    #[serde(default)]
    pub spe: i8,
    #[serde(default)]
    pub acc: i8,
    #[serde(default)]
    pub eva: i8,
}

impl BoostTable {
    /// Maximum absolute boost stage.
    pub const MAX_STAGE: i8 = 6;

    /// Returns the stage for the given boost.
    pub fn get(&self, boost: Boost) -> i8 {
        match boost {
            Boost::Atk => self.atk,
            Boost::Def => self.def,
            Boost::SpAtk => self.spa,
            Boost::SpDef => self.spd,
            Boost::Spe => self.spe,
            Boost::Accuracy => self.acc,
            Boost::Evasion => self.eva,
        }
    }

    fn get_mut(&mut self, boost: Boost) -> &mut i8 {
        match boost {
            Boost::Atk => &mut self.atk,
            Boost::Def => &mut self.def,
            Boost::SpAtk => &mut self.spa,
            Boost::SpDef => &mut self.spd,
            Boost::Spe => &mut self.spe,
            Boost::Accuracy => &mut self.acc,
            Boost::Evasion => &mut self.eva,
        }
    }

    /// Sets the stage for the given boost, clamped to the legal range.
    pub fn set(&mut self, boost: Boost, value: i8) {
        *self.get_mut(boost) = value.clamp(-Self::MAX_STAGE, Self::MAX_STAGE);
    }

    /// Adds to the stage for the given boost, clamped to the legal range.
    ///
    /// Returns the change that actually took effect.
    pub fn add(&mut self, boost: Boost, delta: i8) -> i8 {
        let before = self.get(boost);
        self.set(boost, before.saturating_add(delta));
        self.get(boost) - before
    }

    /// Iterates over all non-zero boosts.
    pub fn non_zero(&self) -> BoostTableEntries<'_> {
        BoostTableEntries {
            table: self,
            index: 0,
        }
    }

    /// Whether every stage is zero.
    pub fn is_empty(&self) -> bool {
        self.non_zero().next().is_none()
    }
}

#[cfg(test)]
mod boost_test {
    use crate::{
        Boost,
        BoostTable,
    };

    #[test]
    fn clamps_stages() {
        let mut table = BoostTable::default();
        assert_eq!(table.add(Boost::Atk, 4), 4);
        assert_eq!(table.add(Boost::Atk, 4), 2);
        assert_eq!(table.get(Boost::Atk), 6);
        assert_eq!(table.add(Boost::Evasion, -12), -6);
        assert_eq!(table.add(Boost::Evasion, -1), 0);
    }

    #[test]
    fn iterates_non_zero_boosts() {
        let table: BoostTable = serde_json::from_str(r#"{"def":-1,"spd":-1}"#).unwrap();
        assert_eq!(
            table.non_zero().collect::<Vec<_>>(),
            vec![(Boost::Def, -1), (Boost::SpDef, -1)]
        );
        assert!(BoostTable::default().is_empty());
    }
}
