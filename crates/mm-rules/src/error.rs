//! Error types for the rules engine.

use mm_core::{CoreError, ItemKind};

/// Errors that can occur while enchanting items or linking scrolls.
#[derive(Debug, thiserror::Error)]
pub enum RulesError {
    /// The item already carries the magic marker.
    #[error("{0} is already magic")]
    AlreadyEnchanted(String),

    /// The power has already been turned into a scroll.
    #[error("{0} is already a scroll")]
    AlreadyLinked(String),

    /// A stat string could not be parsed.
    #[error("malformed {field}: \"{value}\"")]
    MalformedStat {
        /// The stat that failed to parse.
        field: &'static str,
        /// The raw value.
        value: String,
    },

    /// An option was applied to an item of the wrong category.
    #[error("cannot apply a {expected} option to a {found}")]
    WrongCategory {
        /// The category the option belongs to.
        expected: ItemKind,
        /// The item's category.
        found: ItemKind,
    },

    /// The item does not offer the make-magic action.
    #[error("{name} cannot be made magic: {reason}")]
    NotEligible {
        /// Item name.
        name: String,
        /// Why the action is unavailable.
        reason: String,
    },

    /// The presenter answered with an option that was not offered.
    #[error("unknown option: {0}")]
    UnknownOption(String),

    /// A jewelry choice came back without a trait.
    #[error("no trait selected")]
    NoTraitSelected,

    /// The actor already has a ledger entry under the scroll's name.
    #[error("power-point entry '{0}' already exists")]
    LedgerCollision(String),

    /// The item is not owned by an actor.
    #[error("{0} is not owned by an actor")]
    NotOwned(String),

    /// The cost settings could not be loaded.
    #[error("invalid settings: {0}")]
    Config(String),

    /// A write failed and undoing the earlier writes failed too.
    #[error("{cause}; rollback failed: {rollback}")]
    RollbackFailed {
        /// The error that triggered the rollback.
        cause: String,
        /// The error raised while rolling back.
        rollback: String,
    },

    /// The document store rejected an operation.
    #[error(transparent)]
    Store(#[from] CoreError),
}

/// Convenience result type for rules operations.
pub type RulesResult<T> = Result<T, RulesError>;
