use std::fmt;

use ahash::HashMap;
use serde::{
    Deserialize,
    Serialize,
    de::Visitor,
};
use serde_string_enum::{
    DeserializeLabeledStringEnum,
    SerializeLabeledStringEnum,
};

/// The type of a Mon or move, which determines weaknesses and resistances.
#[derive(
    Debug,
    Default,
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
pub enum Type {
    #[string = "Normal"]
    #[default]
    Normal,
    #[string = "Fighting"]
    Fighting,
    #[string = "Flying"]
    Flying,
    #[string = "Poison"]
    Poison,
    #[string = "Ground"]
    Ground,
    #[string = "Rock"]
    Rock,
    #[string = "Bug"]
    Bug,
    #[string = "Ghost"]
    Ghost,
    #[string = "Steel"]
    Steel,
    #[string = "Fire"]
    Fire,
    #[string = "Water"]
    Water,
    #[string = "Grass"]
    Grass,
    #[string = "Electric"]
    Electric,
    #[string = "Psychic"]
    Psychic,
    #[string = "Ice"]
    Ice,
    #[string = "Dragon"]
    Dragon,
    #[string = "Dark"]
    Dark,
    #[string = "Fairy"]
    Fairy,
    /// Typeless. Neutral against everything, and everything is neutral against it.
    #[string = "None"]
    #[alias = "???"]
    None,
}

/// Type effectiveness of one type against a single other type.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub enum TypeEffectiveness {
    /// No effect.
    None,
    /// Not very effective.
    Weak,
    /// Normal effectiveness.
    #[default]
    Normal,
    /// Super effective.
    Strong,
}

impl TypeEffectiveness {
    /// The damage multiplier.
    pub fn multiplier(&self) -> f64 {
        match self {
            Self::None => 0.0,
            Self::Weak => 0.5,
            Self::Normal => 1.0,
            Self::Strong => 2.0,
        }
    }
}

impl From<f64> for TypeEffectiveness {
    fn from(value: f64) -> Self {
        if value <= f64::EPSILON {
            Self::None
        } else if value <= 0.5 {
            Self::Weak
        } else if value <= 1.0 {
            Self::Normal
        } else {
            Self::Strong
        }
    }
}

impl Serialize for TypeEffectiveness {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Weak => serializer.serialize_f64(0.5),
            _ => serializer.serialize_u64(self.multiplier() as u64),
        }
    }
}

struct TypeEffectivenessVisitor;

impl<'de> Visitor<'de> for TypeEffectivenessVisitor {
    type Value = TypeEffectiveness;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("one of the following values: 0, 0.5, 1, 2")
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Self::Value::from(v as f64))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Self::Value::from(v as f64))
    }

    fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Self::Value::from(v))
    }
}

impl<'de> Deserialize<'de> for TypeEffectiveness {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_any(TypeEffectivenessVisitor)
    }
}

/// A type chart, keyed by attacking type and then defending type.
///
/// Only non-neutral matchups need to be present. The typeless [`Type::None`] is neutral in both
/// directions.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeChart {
    pub types: HashMap<Type, HashMap<Type, TypeEffectiveness>>,
}

impl TypeChart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Effectiveness of an attacking type against a single defending type.
    pub fn effectiveness(&self, attack: Type, defense: Type) -> TypeEffectiveness {
        self.types
            .get(&attack)
            .and_then(|row| row.get(&defense))
            .copied()
            .unwrap_or_default()
    }

    /// Combined damage multiplier of an attacking type against all of a defender's types.
    ///
    /// The result is one of 0, 0.25, 0.5, 1, 2 or 4 for a dual-typed defender.
    pub fn multiplier<'t, I>(&self, attack: Type, defense: I) -> f64
    where
        I: IntoIterator<Item = &'t Type>,
    {
        defense
            .into_iter()
            .map(|defense| self.effectiveness(attack, *defense).multiplier())
            .product()
    }
}

#[cfg(test)]
mod type_test {
    use crate::{
        Type,
        TypeChart,
        TypeEffectiveness,
        test_util::{
            test_serialization,
            test_string_serialization,
        },
    };

    #[test]
    fn serializes_to_string() {
        test_string_serialization(Type::Water, "Water");
        test_string_serialization(Type::None, "None");
    }

    #[test]
    fn serializes_effectiveness_as_number() {
        test_serialization(TypeEffectiveness::None, 0);
        test_serialization(TypeEffectiveness::Weak, 0.5);
        test_serialization(TypeEffectiveness::Strong, 2);
    }

    #[test]
    fn multiplies_dual_types() {
        let chart: TypeChart = serde_json::from_str(
            r#"{
                "types": {
                    "Water": { "Rock": 2, "Ground": 2, "Dragon": 0.5, "Water": 0.5 },
                    "Dragon": { "Fairy": 0 }
                }
            }"#,
        )
        .unwrap();
        assert_eq!(chart.multiplier(Type::Water, &[Type::Rock, Type::Ground]), 4.0);
        assert_eq!(chart.multiplier(Type::Water, &[Type::Water, Type::Dragon]), 0.25);
        assert_eq!(chart.multiplier(Type::Dragon, &[Type::Fairy]), 0.0);
        assert_eq!(chart.multiplier(Type::None, &[Type::Fairy]), 1.0);
        assert_eq!(chart.multiplier(Type::Water, &[Type::None]), 1.0);
    }
}
