//! Persona records and the slot-key vocabulary they use.
//!
//! Seed data stores every multi-valued slot as one `"; "`-joined string. A
//! [`ProfileRecord`] keeps the fragments as an ordered list and only joins them
//! again when serialized, so the file format is unchanged.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Separator between fragments of a multi-valued slot.
pub const SLOT_DELIMITER: &str = "; ";

pub const AGE_RANGE: &str = "Age Range";
pub const NAME: &str = "Name";
pub const GENDER: &str = "Gender";
pub const RESIDENCE: &str = "Residence";
pub const OCCUPATION: &str = "Occupation";
pub const POI: &str = "POI";
pub const ACCEPTED_MOVIES: &str = "Accepted movies";
pub const ACCEPTED_MUSIC: &str = "Accepted music";
pub const ACCEPTED_CELEBRITIES: &str = "Accepted celebrities";
pub const ACCEPTED_FOOD: &str = "Accepted food";
pub const ACCEPTED_POI: &str = "Accepted POI";
pub const REJECT: &str = "Reject";
pub const REJECTED_MOVIES: &str = "Rejected movies";
pub const REJECTED_MUSIC: &str = "Rejected music";
pub const ACCEPTED_NEWS: &str = "Accepted news";
pub const FAVORITE_NEWS: &str = "Favorite news";

/// Canonical slots collected into a slot catalog, in catalog order.
pub const SLOT_KEYS: [&str; 14] = [
    AGE_RANGE,
    NAME,
    GENDER,
    RESIDENCE,
    OCCUPATION,
    POI,
    ACCEPTED_MOVIES,
    ACCEPTED_MUSIC,
    ACCEPTED_CELEBRITIES,
    ACCEPTED_FOOD,
    ACCEPTED_POI,
    REJECT,
    REJECTED_MOVIES,
    REJECTED_MUSIC,
];

/// Maps misspelled keys found in raw data to their canonical slot.
pub fn canonical_slot_key(raw_key: &str) -> &str {
    match raw_key {
        "Accepted Music" => ACCEPTED_MUSIC,
        "Accepted movie" => ACCEPTED_MOVIES,
        other => other,
    }
}

/// Strips the "years old" unit from an age bracket.
pub fn clean_age_range(value: &str) -> String {
    value.replace("years old", "").trim().to_string()
}

pub fn split_slot_value(value: &str) -> Vec<String> {
    value.split(SLOT_DELIMITER).map(str::to_string).collect()
}

/// Ordered persona record: slot key to ordered value fragments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileRecord {
    slots: IndexMap<String, Vec<String>>,
}

impl ProfileRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a record from `(key, joined value)` pairs, splitting each value.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let mut record = Self::new();
        for (key, value) in pairs {
            record.set_joined(key, value.as_ref());
        }
        record
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.slots.get(key).map(Vec::as_slice)
    }

    /// The slot value in its `"; "`-joined external form.
    pub fn joined(&self, key: &str) -> Option<String> {
        self.slots.get(key).map(|values| values.join(SLOT_DELIMITER))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.slots.contains_key(key)
    }

    pub fn set(&mut self, key: impl Into<String>, values: Vec<String>) {
        self.slots.insert(key.into(), values);
    }

    pub fn set_joined(&mut self, key: impl Into<String>, value: &str) {
        self.set(key, split_slot_value(value));
    }

    /// Appends fragments after any existing ones; never overwrites.
    pub fn append<I>(&mut self, key: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.slots.entry(key.into()).or_default().extend(values);
    }

    pub fn append_joined(&mut self, key: impl Into<String>, value: &str) {
        self.append(key, split_slot_value(value));
    }

    /// Removes a slot while keeping the order of the remaining ones.
    pub fn remove(&mut self, key: &str) -> Option<Vec<String>> {
        self.slots.shift_remove(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.slots.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.slots
            .iter()
            .map(|(key, values)| (key.as_str(), values.as_slice()))
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (&String, &mut Vec<String>)> {
        self.slots.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl Serialize for ProfileRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let joined: IndexMap<&str, String> = self
            .slots
            .iter()
            .map(|(key, values)| (key.as_str(), values.join(SLOT_DELIMITER)))
            .collect();
        joined.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ProfileRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = IndexMap::<String, String>::deserialize(deserializer)?;
        Ok(Self::from_pairs(raw))
    }
}
