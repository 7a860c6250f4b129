use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Records collected for one pattern, keyed by the pattern's permalink.
///
/// On disk a group is a one-key object: `{"<permalink>": [ ... ]}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternGroup<T> {
    pub permalink: String,
    pub entries: Vec<T>,
}

impl<T> PatternGroup<T> {
    pub fn new(permalink: impl Into<String>, entries: Vec<T>) -> Self {
        Self {
            permalink: permalink.into(),
            entries,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: Serialize> Serialize for PatternGroup<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.permalink, &self.entries)?;
        map.end()
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for PatternGroup<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = BTreeMap::<String, Vec<T>>::deserialize(deserializer)?;
        let found = map.len();
        let mut iter = map.into_iter();

        match (iter.next(), iter.next()) {
            (Some((permalink, entries)), None) => Ok(Self { permalink, entries }),
            _ => Err(de::Error::custom(format!(
                "pattern group must have exactly one key, found {found}"
            ))),
        }
    }
}
