use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A single `(subject, relation, object)` fact from the knowledge graph.
///
/// Identity is exact, case-sensitive equality on all three fields. On the wire
/// a triple is a three element array, matching the seed dataset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Triple {
    pub subject: String,
    pub relation: String,
    pub object: String,
}

impl Triple {
    pub fn new(
        subject: impl Into<String>,
        relation: impl Into<String>,
        object: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            relation: relation.into(),
            object: object.into(),
        }
    }

    /// True when the entity is this fact's subject or object.
    pub fn touches(&self, entity: &str) -> bool {
        self.subject == entity || self.object == entity
    }

    /// Whitespace-token count of `"subject relation object"`.
    pub fn token_count(&self) -> usize {
        [&self.subject, &self.relation, &self.object]
            .iter()
            .map(|field| field.split_whitespace().count())
            .sum()
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.subject, self.relation, self.object)
    }
}

impl Serialize for Triple {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (&self.subject, &self.relation, &self.object).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Triple {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (subject, relation, object) = <(String, String, String)>::deserialize(deserializer)?;
        Ok(Self {
            subject,
            relation,
            object,
        })
    }
}

/// Whitespace-token count of a fact list joined into one knowledge string.
pub fn knowledge_token_count<'a, I>(facts: I) -> usize
where
    I: IntoIterator<Item = &'a Triple>,
{
    facts.into_iter().map(Triple::token_count).sum()
}
