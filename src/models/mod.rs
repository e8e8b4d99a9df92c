pub mod dialogue;
pub mod profile;
pub mod target;
pub mod triple;

pub use dialogue::{
    is_sentinel, ConversationContext, CurationRecord, SeedDialogue, SeedId, TOPIC_SENTINEL,
};
pub use profile::{ProfileRecord, SLOT_DELIMITER, SLOT_KEYS};
pub use target::{Domain, Target};
pub use triple::{knowledge_token_count, Triple};
