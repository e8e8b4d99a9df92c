use crate::models::is_sentinel;
use indexmap::IndexSet;

/// A topic path with sentinel positions hidden from every query.
#[derive(Debug, Clone, Copy)]
pub struct TopicPath<'a> {
    raw: &'a [String],
}

/// A topic and the topic visited right before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition<'a> {
    pub topic: &'a str,
    pub predecessor: &'a str,
}

impl<'a> Transition<'a> {
    /// The subject is one endpoint and the object contains the other, either way round.
    pub fn links(&self, subject: &str, object: &str) -> bool {
        (subject == self.topic && object.contains(self.predecessor))
            || (subject == self.predecessor && object.contains(self.topic))
    }
}

impl<'a> TopicPath<'a> {
    pub fn new(raw: &'a [String]) -> Self {
        Self { raw }
    }

    /// Distinct non-sentinel entities in path order.
    pub fn entities(&self) -> IndexSet<&'a str> {
        self.raw
            .iter()
            .map(String::as_str)
            .filter(|topic| !is_sentinel(topic))
            .collect()
    }

    /// The opening topic, unless the path is empty or opens on the sentinel.
    pub fn first_topic(&self) -> Option<&'a str> {
        self.raw
            .first()
            .map(String::as_str)
            .filter(|topic| !is_sentinel(topic))
    }

    /// Transitions into every interior position; pairs touching a sentinel are skipped.
    pub fn transitions(&self) -> Vec<Transition<'a>> {
        if self.raw.len() < 3 {
            return Vec::new();
        }
        (1..self.raw.len() - 1)
            .filter_map(|j| {
                let topic = self.raw[j].as_str();
                let predecessor = self.raw[j - 1].as_str();
                if is_sentinel(topic) || is_sentinel(predecessor) {
                    None
                } else {
                    Some(Transition { topic, predecessor })
                }
            })
            .collect()
    }
}
