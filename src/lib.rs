pub mod config;
pub mod curation;
pub mod error;
pub mod graph;
pub mod knowledge;
pub mod logging;
pub mod models;
pub mod persona;
pub mod profiles;

// Re-export commonly used types for convenience.
pub use config::CuratorConfig;
pub use curation::{CurationDriver, CurationSummary};
pub use error::CurationError;
pub use graph::{GraphFactProvider, InMemoryGraph, Neo4jGraph};
pub use knowledge::{CuratedFactSet, KnowledgeSelector};
pub use models::{
    ConversationContext, CurationRecord, Domain, ProfileRecord, SeedDialogue, Target, Triple,
};
pub use profiles::{normalize_profile, sample_profile, SlotCatalog};
