use crate::actor::ActorId;
use crate::effect::EffectId;
use crate::item::ItemId;

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised by the document model and document stores.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The requested item does not exist in the store.
    #[error("item not found: {0}")]
    ItemNotFound(ItemId),

    /// The requested actor does not exist in the store.
    #[error("actor not found: {0}")]
    ActorNotFound(ActorId),

    /// The requested effect does not exist on the item.
    #[error("effect {effect} not found on item {item}")]
    EffectNotFound {
        /// The item that was searched.
        item: ItemId,
        /// The missing effect.
        effect: EffectId,
    },

    /// A write was based on a stale snapshot of the document.
    #[error("version conflict: expected {expected}, found {found}")]
    Conflict {
        /// The version the writer based its change on.
        expected: u64,
        /// The version currently stored.
        found: u64,
    },

    /// A write would violate the document schema.
    #[error("validation error: {0}")]
    Validation(String),

    /// A string could not be parsed as die notation.
    #[error("malformed die: \"{0}\"")]
    MalformedDie(String),

    /// Reading or writing a persisted store failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A persisted store could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
