use crate::error::CurationError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Recommendation domain; decides which profile slots survive and which graph
/// relations are queried for profile knowledge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    Movie,
    Music,
    Food,
    Poi,
}

impl Domain {
    pub const ALL: [Domain; 4] = [Domain::Movie, Domain::Music, Domain::Food, Domain::Poi];

    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Movie => "movie",
            Domain::Music => "music",
            Domain::Food => "food",
            Domain::Poi => "poi",
        }
    }

    /// Derives the domain from a target action such as "Movie recommendation".
    ///
    /// Matching is a case-insensitive substring test, tried in the order
    /// movie, music, food, poi.
    pub fn from_action(action: &str) -> Result<Self, CurationError> {
        let lowered = action.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|domain| lowered.contains(domain.as_str()))
            .ok_or_else(|| CurationError::invalid_domain(action))
    }

    /// Movie and music profiles keep media slots; food and POI keep venue slots.
    pub fn is_media(&self) -> bool {
        matches!(self, Domain::Movie | Domain::Music)
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Domain {
    type Err = CurationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "movie" => Ok(Domain::Movie),
            "music" => Ok(Domain::Music),
            "food" => Ok(Domain::Food),
            "poi" => Ok(Domain::Poi),
            other => Err(CurationError::invalid_domain(other)),
        }
    }
}

/// The recommendation a dialogue steers toward: `(action, topic)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Target {
    pub action: String,
    pub topic: String,
}

impl Target {
    pub fn new(action: impl Into<String>, topic: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            topic: topic.into(),
        }
    }

    pub fn domain(&self) -> Result<Domain, CurationError> {
        Domain::from_action(&self.action)
    }
}

impl Serialize for Target {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (&self.action, &self.topic).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Target {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (action, topic) = <(String, String)>::deserialize(deserializer)?;
        Ok(Self { action, topic })
    }
}
