use std::{
    fmt,
    fmt::{
        Debug,
        Display,
    },
    hash::{
        Hash,
        Hasher,
    },
    str::FromStr,
};

use serde::{
    Deserialize,
    Serialize,
    de::Visitor,
};

#[derive(Clone)]
enum IdString {
    Owned(String),
    Static(&'static str),
}

impl AsRef<str> for IdString {
    fn as_ref(&self) -> &str {
        match self {
            Self::Owned(str) => str.as_ref(),
            Self::Static(str) => str,
        }
    }
}

impl PartialEq for IdString {
    fn eq(&self, other: &Self) -> bool {
        self.as_ref() == other.as_ref()
    }
}

impl Eq for IdString {}

impl PartialOrd for IdString {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for IdString {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.as_ref().cmp(other.as_ref())
    }
}

impl Hash for IdString {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_ref().hash(state)
    }
}

/// The canonical name of a catalog entry.
///
/// IDs are lowercase and alphanumeric, so "Dragon Claw", "dragon-claw" and "dragonclaw" all refer
/// to the same move.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Id(IdString);

impl Id {
    /// Creates an ID from a string that is already normalized.
    ///
    /// No allocation or normalization takes place, so this is suitable for constants.
    pub const fn from_known(value: &'static str) -> Self {
        Self(IdString::Static(value))
    }

    /// Returns the ID as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_ref()
    }
}

impl Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.as_str())
    }
}

impl AsRef<str> for Id {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<String> for Id {
    fn from(value: String) -> Self {
        normalize_id(&value)
    }
}

impl From<&str> for Id {
    fn from(value: &str) -> Self {
        normalize_id(value)
    }
}

impl FromStr for Id {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Id::from(s))
    }
}

impl Serialize for Id {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

struct IdVisitor;

impl<'de> Visitor<'de> for IdVisitor {
    type Value = Id;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "a string")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Self::Value::from(v))
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_str(IdVisitor)
    }
}

/// A resource that is identified by an [`Id`].
pub trait Identifiable {
    fn id(&self) -> &Id;
}

fn normalize_id(id: &str) -> Id {
    Id(IdString::Owned(
        id.chars()
            .filter_map(|c| match c {
                '0'..='9' | 'a'..='z' => Some(c),
                'A'..='Z' => Some(c.to_ascii_lowercase()),
                _ => None,
            })
            .collect(),
    ))
}

#[cfg(test)]
mod id_tests {
    use crate::Id;

    #[test]
    fn normalizes_names() {
        assert_eq!(Id::from("Dragon Claw"), Id::from_known("dragonclaw"));
        assert_eq!(Id::from("X-Scissor"), Id::from_known("xscissor"));
        assert_eq!(Id::from("King's Shield"), Id::from_known("kingsshield"));
        assert_eq!(Id::from("Mr. Mime"), Id::from_known("mrmime"));
    }

    #[test]
    fn static_and_owned_ids_hash_alike() {
        let mut set = ahash::HashSet::default();
        set.insert(Id::from("Leftovers"));
        assert!(set.contains(&Id::from_known("leftovers")));
    }
}
