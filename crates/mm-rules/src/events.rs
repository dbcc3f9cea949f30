//! Host events and the handlers that react to them.
//!
//! Handlers are plain functions over a snapshot. They never write; they
//! return a [`Reaction`] whose commands the workshop executes and whose
//! prompts it hands back to the front end.

use std::collections::HashMap;
use std::fmt;

use mm_core::{Actor, ActorId, ActorUpdate, DocumentStore, Item, ItemId, ItemStats, PowerPool};
use tracing::debug;

use crate::command::Command;
use crate::config::CostSettings;
use crate::eligibility::{self, MagicAction};
use crate::error::RulesResult;

/// Something that happened in the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    /// An item was added to the world or to an actor.
    ItemCreated {
        /// The new item.
        item: ItemId,
    },
    /// An item sheet is about to be shown.
    SheetOpened {
        /// The displayed item.
        item: ItemId,
    },
}

impl HostEvent {
    /// The event's kind, used to look up handlers.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::ItemCreated { .. } => EventKind::ItemCreated,
            Self::SheetOpened { .. } => EventKind::SheetOpened,
        }
    }

    /// The item the event concerns.
    pub fn item(&self) -> ItemId {
        match self {
            Self::ItemCreated { item } | Self::SheetOpened { item } => *item,
        }
    }
}

/// Kinds of [`HostEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// See [`HostEvent::ItemCreated`].
    ItemCreated,
    /// See [`HostEvent::SheetOpened`].
    SheetOpened,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ItemCreated => f.write_str("item-created"),
            Self::SheetOpened => f.write_str("sheet-opened"),
        }
    }
}

/// Snapshot handed to handlers.
#[derive(Debug, Clone)]
pub struct EventContext {
    /// The item the event concerns.
    pub item: Item,
    /// Its owning actor, if any.
    pub actor: Option<Actor>,
}

impl EventContext {
    /// Load the item and its owner from the store.
    pub fn load(store: &impl DocumentStore, item: ItemId) -> RulesResult<Self> {
        let item = store.get_item(item)?;
        let actor = item.owner.map(|id| store.get_actor(id)).transpose()?;
        Ok(Self { item, actor })
    }
}

/// Something the front end should ask the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    /// Offer a power to inscribe on a blank scroll.
    AttachScrollPower {
        /// The blank scroll.
        scroll: ItemId,
        /// Its owner.
        actor: ActorId,
    },
    /// Show the "Make Magic" action for an item.
    OfferMakeMagic {
        /// The item.
        item: ItemId,
        /// The flow the action runs.
        action: MagicAction,
    },
}

/// What handlers want done.
#[derive(Debug, Clone, Default)]
pub struct Reaction {
    /// Writes to execute, in order.
    pub commands: Vec<Command>,
    /// Prompts for the front end.
    pub prompts: Vec<Prompt>,
}

impl Reaction {
    /// Returns true if nothing is to be done.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty() && self.prompts.is_empty()
    }

    fn merge(&mut self, other: Reaction) {
        self.commands.extend(other.commands);
        self.prompts.extend(other.prompts);
    }
}

/// A pure event handler.
pub type Handler = fn(&EventContext, &CostSettings) -> RulesResult<Reaction>;

/// Handlers registered per event kind.
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    handlers: HashMap<EventKind, Vec<(&'static str, Handler)>>,
}

impl EventBus {
    /// An empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// A bus with the built-in handlers.
    pub fn with_defaults() -> Self {
        let mut bus = Self::new();
        bus.register(
            EventKind::ItemCreated,
            "arcane-device-ledger",
            arcane_device_ledger,
        );
        bus.register(
            EventKind::ItemCreated,
            "blank-scroll-prompt",
            blank_scroll_prompt,
        );
        bus.register(EventKind::SheetOpened, "make-magic-button", make_magic_button);
        bus
    }

    /// Register a handler. Handlers run in registration order.
    pub fn register(&mut self, kind: EventKind, name: &'static str, handler: Handler) {
        self.handlers.entry(kind).or_default().push((name, handler));
    }

    /// Names of the handlers registered for `kind`.
    pub fn handler_names(&self, kind: EventKind) -> Vec<&'static str> {
        self.handlers
            .get(&kind)
            .map(|hs| hs.iter().map(|(name, _)| *name).collect())
            .unwrap_or_default()
    }

    /// Run every handler for the event and merge their reactions.
    pub fn react(
        &self,
        event: &HostEvent,
        context: &EventContext,
        settings: &CostSettings,
    ) -> RulesResult<Reaction> {
        let mut reaction = Reaction::default();
        let Some(handlers) = self.handlers.get(&event.kind()) else {
            return Ok(reaction);
        };
        for (name, handler) in handlers {
            let out = handler(context, settings)?;
            if !out.is_empty() {
                debug!(
                    handler = name,
                    kind = %event.kind(),
                    commands = out.commands.len(),
                    prompts = out.prompts.len(),
                    "handler reacted"
                );
            }
            reaction.merge(out);
        }
        Ok(reaction)
    }
}

/// Give the owner a ledger entry for a newly added arcane device.
///
/// The entry is keyed by the arcane background of the first grant that
/// names one and starts full. An existing entry under that key is replaced.
pub fn arcane_device_ledger(ctx: &EventContext, _settings: &CostSettings) -> RulesResult<Reaction> {
    let Some(actor) = &ctx.actor else {
        return Ok(Reaction::default());
    };
    let ItemStats::Gear(gear) = &ctx.item.stats else {
        return Ok(Reaction::default());
    };
    let Some(device) = &gear.arcane_device else {
        return Ok(Reaction::default());
    };
    if device.power_points.max == 0 {
        return Ok(Reaction::default());
    }
    let Some(arcane) = device.grants.iter().find_map(|g| g.arcane.as_deref()) else {
        return Ok(Reaction::default());
    };
    Ok(Reaction {
        commands: vec![Command::UpdateActor {
            id: actor.id,
            expected_version: actor.version,
            update: ActorUpdate::SetPowerPoints {
                key: arcane.to_string(),
                pool: PowerPool::full(device.power_points.max),
            },
        }],
        prompts: Vec::new(),
    })
}

/// Ask for a power when a blank scroll lands on a character or NPC.
pub fn blank_scroll_prompt(ctx: &EventContext, _settings: &CostSettings) -> RulesResult<Reaction> {
    let Some(actor) = &ctx.actor else {
        return Ok(Reaction::default());
    };
    if !actor.kind.can_make_magic() || !eligibility::is_blank_scroll(&ctx.item) {
        return Ok(Reaction::default());
    }
    Ok(Reaction {
        commands: Vec::new(),
        prompts: vec![Prompt::AttachScrollPower {
            scroll: ctx.item.id,
            actor: actor.id,
        }],
    })
}

/// Offer the "Make Magic" action on eligible item sheets.
pub fn make_magic_button(ctx: &EventContext, _settings: &CostSettings) -> RulesResult<Reaction> {
    let owner = ctx.actor.as_ref();
    if !eligibility::offers_make_magic(&ctx.item, owner) {
        return Ok(Reaction::default());
    }
    let action = eligibility::action_for(&ctx.item, owner)?;
    Ok(Reaction {
        commands: Vec::new(),
        prompts: vec![Prompt::OfferMakeMagic {
            item: ctx.item.id,
            action,
        }],
    })
}
