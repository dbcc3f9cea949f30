//! Enchantment rules for Make Magic.
//!
//! Turns mundane weapons, armor and shields into magic versions, gear into
//! trait jewelry, and powers into single-use scrolls. Rule functions are pure
//! and plan [`Command`]s; the [`Workshop`] runs them against a
//! [`mm_core::DocumentStore`], asking a [`ChoicePresenter`] when the user has
//! to pick an option.

/// The enchantment option table and jewelry forms.
pub mod catalog;
/// Choice requests and presenters.
pub mod choice;
/// Store commands and the compensating executor.
pub mod command;
/// Configurable costs.
pub mod config;
/// Damage-expression rewriting.
pub mod damage;
/// Which items can be made magic.
pub mod eligibility;
/// Error types for the rules engine.
pub mod error;
/// Host events and handlers.
pub mod events;
/// One-way enchantment markers.
pub mod guard;
/// Stat mutation.
pub mod mutate;
/// Scroll linking.
pub mod scroll;
/// Trait resolution for jewelry.
pub mod traits;
/// Entry points.
pub mod workshop;

/// Re-export catalog types.
pub use catalog::{EnchantmentOption, JewelryForm, StatDelta, find_option, options_for};
/// Re-export choice types.
pub use choice::{
    ChannelPresenter, ChoiceOption, ChoicePresenter, ChoiceRequest, ChoiceResponder,
    ChoiceResponse, PresetPresenter,
};
/// Re-export command types.
pub use command::{Command, Committed, execute};
/// Re-export configuration.
pub use config::{CostKey, CostSettings};
/// Re-export eligibility types.
pub use eligibility::MagicAction;
/// Re-export error types.
pub use error::{RulesError, RulesResult};
/// Re-export event types.
pub use events::{EventBus, EventContext, EventKind, HostEvent, Prompt, Reaction};
/// Re-export scroll planning.
pub use scroll::{LinkState, ScrollPlan};
/// Re-export trait resolution.
pub use traits::TraitTarget;
/// Re-export the workshop.
pub use workshop::{Outcome, Workshop};
