use serde::{
    Deserialize,
    Serialize,
};
use serde_string_enum::{
    DeserializeLabeledStringEnum,
    SerializeLabeledStringEnum,
};

/// A single stat.
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
pub enum Stat {
    #[string = "hp"]
    HP,
    #[string = "atk"]
    #[alias = "Attack"]
    Atk,
    #[string = "def"]
    #[alias = "Defense"]
    Def,
    #[string = "spa"]
    #[alias = "Special Attack"]
    SpAtk,
    #[string = "spd"]
    #[alias = "Special Defense"]
    SpDef,
    #[string = "spe"]
    #[alias = "Speed"]
    Spe,
}

const STAT_ORDER: [Stat; 6] = [
    Stat::HP,
    Stat::Atk,
    Stat::Def,
    Stat::SpAtk,
    Stat::SpDef,
    Stat::Spe,
];

/// Iterator over the entries of a [`StatTable`].
pub struct StatTableEntries<'s> {
    table: &'s StatTable,
    index: usize,
}

impl Iterator for StatTableEntries<'_> {
    type Item = (Stat, u16);

    fn next(&mut self) -> Option<Self::Item> {
        let stat = *STAT_ORDER.get(self.index)?;
        self.index += 1;
        Some((stat, self.table.get(stat)))
    }
}

/// A full stat table.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatTable {
    #[serde(default)]
    pub hp: u16,
    #[serde(default)]
    pub atk: u16,
    #[serde(default)]
    pub def: u16,
    #[serde(default)]
    pub spa: u16,
    #[serde(default)]
    pub spd: u16,
    #[serde(default)]
    pub spe: u16,
}

impl StatTable {
    /// Creates a table with the same value for every stat.
    pub fn uniform(value: u16) -> Self {
        Self {
            hp: value,
            atk: value,
            def: value,
            spa: value,
            spd: value,
            spe: value,
        }
    }

    /// Returns the value for the given stat.
    pub fn get(&self, stat: Stat) -> u16 {
        match stat {
            Stat::HP => self.hp,
            Stat::Atk => self.atk,
            Stat::Def => self.def,
            Stat::SpAtk => self.spa,
            Stat::SpDef => self.spd,
            Stat::Spe => self.spe,
        }
    }

    /// Sets the given value in the stat table.
    pub fn set(&mut self, stat: Stat, value: u16) {
        let stat = match stat {
            Stat::HP => &mut self.hp,
            Stat::Atk => &mut self.atk,
            Stat::Def => &mut self.def,
            Stat::SpAtk => &mut self.spa,
            Stat::SpDef => &mut self.spd,
            Stat::Spe => &mut self.spe,
        };
        *stat = value;
    }

    /// Creates an iterator over all stat entries, in canonical order.
    pub fn entries(&self) -> StatTableEntries<'_> {
        StatTableEntries {
            table: self,
            index: 0,
        }
    }
}

#[cfg(test)]
mod stat_test {
    use crate::{
        Stat,
        StatTable,
        test_util::test_string_serialization,
    };

    #[test]
    fn serializes_to_string() {
        test_string_serialization(Stat::SpAtk, "spa");
        test_string_serialization(Stat::Spe, "spe");
    }

    #[test]
    fn deserializes_aliases() {
        assert_eq!(
            serde_json::from_str::<Stat>("\"Special Defense\"").unwrap(),
            Stat::SpDef
        );
    }

    #[test]
    fn iterates_entries_in_order() {
        let table = StatTable {
            hp: 1,
            atk: 2,
            def: 3,
            spa: 4,
            spd: 5,
            spe: 6,
        };
        pretty_assertions::assert_eq!(
            table.entries().collect::<Vec<_>>(),
            vec![
                (Stat::HP, 1),
                (Stat::Atk, 2),
                (Stat::Def, 3),
                (Stat::SpAtk, 4),
                (Stat::SpDef, 5),
                (Stat::Spe, 6),
            ]
        );
    }
}
