//! Entry points tying eligibility, choices, planning and execution together.

use mm_core::{Actor, DocumentStore, Item, ItemId, ItemStats};
use tracing::{debug, info};

use crate::catalog::{self, JewelryForm};
use crate::choice::{ChoiceOption, ChoicePresenter, ChoiceRequest, ChoiceResponse};
use crate::command::{self, Command};
use crate::config::CostSettings;
use crate::eligibility::{self, MagicAction};
use crate::error::{RulesError, RulesResult};
use crate::events::{EventBus, EventContext, HostEvent, Prompt};
use crate::guard;
use crate::mutate;
use crate::scroll;
use crate::traits;

/// The result of an entry point.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// An item was enchanted.
    Enchanted {
        /// The committed item.
        item: Item,
    },
    /// A power was linked to a scroll.
    Scrolled {
        /// The committed power.
        power: Item,
        /// The created or inscribed scroll.
        scroll: Item,
    },
    /// The user dismissed the choice. Nothing was written.
    Cancelled,
}

/// Runs enchantment flows against a store, asking a presenter for choices.
pub struct Workshop<'a, S, P> {
    store: &'a mut S,
    presenter: &'a mut P,
    settings: &'a CostSettings,
    bus: EventBus,
}

impl<'a, S: DocumentStore, P: ChoicePresenter> Workshop<'a, S, P> {
    /// A workshop with the built-in event handlers.
    pub fn new(store: &'a mut S, presenter: &'a mut P, settings: &'a CostSettings) -> Self {
        Self {
            store,
            presenter,
            settings,
            bus: EventBus::with_defaults(),
        }
    }

    /// Run the "Make Magic" action for an item.
    pub fn make_magic(&mut self, id: ItemId) -> RulesResult<Outcome> {
        let item = self.store.get_item(id)?;
        let owner = self.owner_of(&item)?;
        let action = eligibility::action_for(&item, owner.as_ref())?;
        debug!(item = %item.name, %action, "make magic");
        match (action, owner) {
            (MagicAction::Weapon | MagicAction::Armor | MagicAction::Shield, _) => {
                self.enchant_stats(item)
            }
            (MagicAction::Jewelry, _) => self.enchant_jewelry(item),
            (MagicAction::Scroll, Some(actor)) => self.link(item, actor),
            (MagicAction::Scroll, None) => Err(RulesError::NotOwned(item.name)),
        }
    }

    /// Turn a power into a new scroll consumable.
    pub fn link_scroll(&mut self, power: ItemId) -> RulesResult<Outcome> {
        let power = self.store.get_item(power)?;
        match self.owner_of(&power)? {
            Some(actor) => self.link(power, actor),
            None => Err(RulesError::NotOwned(power.name)),
        }
    }

    /// Inscribe a power onto an existing blank scroll.
    pub fn attach_scroll(&mut self, scroll: ItemId, power: ItemId) -> RulesResult<Outcome> {
        let scroll = self.store.get_item(scroll)?;
        let power = self.store.get_item(power)?;
        let Some(actor) = self.owner_of(&scroll)? else {
            return Err(RulesError::NotOwned(scroll.name));
        };
        let items = self.store.items_of(actor.id)?;
        let plan = scroll::plan_attach(&scroll, &power, &actor, &items)?;
        self.commit_scroll(plan)
    }

    /// Run the handlers for a host event, apply their writes and return the
    /// prompts they raised.
    pub fn dispatch(&mut self, event: &HostEvent) -> RulesResult<Vec<Prompt>> {
        let context = EventContext::load(&*self.store, event.item())?;
        let reaction = self.bus.react(event, &context, self.settings)?;
        if !reaction.commands.is_empty() {
            command::execute(&mut *self.store, reaction.commands)?;
        }
        Ok(reaction.prompts)
    }

    /// Answer a prompt raised by [`Workshop::dispatch`].
    pub fn resolve_prompt(&mut self, prompt: Prompt) -> RulesResult<Outcome> {
        match prompt {
            Prompt::OfferMakeMagic { item, .. } => self.make_magic(item),
            Prompt::AttachScrollPower { scroll, actor } => {
                let actor = self.store.get_actor(actor)?;
                let powers: Vec<Item> = self
                    .store
                    .items_of(actor.id)?
                    .into_iter()
                    .filter(|i| matches!(i.stats, ItemStats::Power(_)) && !guard::is_scrolled(i))
                    .collect();
                if powers.is_empty() {
                    debug!(actor = %actor.name, "no unlinked powers, scroll left blank");
                    return Ok(Outcome::Cancelled);
                }
                let request = ChoiceRequest {
                    title: format!("Add Scroll to {}", actor.name),
                    options: powers
                        .iter()
                        .map(|p| ChoiceOption::new(p.id.0.to_string(), p.name.clone()))
                        .collect(),
                    traits: None,
                };
                let ChoiceResponse::Chosen { option, .. } = self.presenter.choose(&request) else {
                    return Ok(Outcome::Cancelled);
                };
                let power = powers
                    .iter()
                    .find(|p| p.id.0.to_string() == option)
                    .ok_or(RulesError::UnknownOption(option))?;
                self.attach_scroll(scroll, power.id)
            }
        }
    }

    fn owner_of(&self, item: &Item) -> RulesResult<Option<Actor>> {
        item.owner
            .map(|id| self.store.get_actor(id))
            .transpose()
            .map_err(RulesError::from)
    }

    fn enchant_stats(&mut self, item: Item) -> RulesResult<Outcome> {
        guard::ensure_not_enchanted(&item)?;
        let kind = item.kind();
        let request = ChoiceRequest {
            title: format!("Make {} Magic", item.name),
            options: catalog::options_for(kind)
                .iter()
                .map(|o| ChoiceOption::new(o.id, o.priced_label(self.settings)))
                .collect(),
            traits: None,
        };
        let ChoiceResponse::Chosen { option, .. } = self.presenter.choose(&request) else {
            debug!(item = %item.name, "enchantment cancelled");
            return Ok(Outcome::Cancelled);
        };
        let option =
            catalog::find_option(kind, &option).ok_or(RulesError::UnknownOption(option))?;
        let successor = mutate::apply_option(&item, option, self.settings)?;

        let id = item.id;
        command::execute(
            &mut *self.store,
            vec![Command::UpdateItem {
                id,
                expected_version: item.version,
                update: successor.into_update(item.markers),
            }],
        )?;
        let item = self.store.get_item(id)?;
        info!(item = %item.name, price = item.price, option = option.id, "item enchanted");
        Ok(Outcome::Enchanted { item })
    }

    fn enchant_jewelry(&mut self, item: Item) -> RulesResult<Outcome> {
        guard::ensure_not_enchanted(&item)?;
        let choices = traits::trait_choices(&*self.store)?;
        let request = ChoiceRequest {
            title: format!("Make {} Magic Jewelry", item.name),
            options: JewelryForm::ALL
                .iter()
                .map(|f| ChoiceOption::new(f.name(), f.name()))
                .collect(),
            traits: Some(choices.clone()),
        };
        let ChoiceResponse::Chosen { option, trait_name } = self.presenter.choose(&request) else {
            debug!(item = %item.name, "jewelry cancelled");
            return Ok(Outcome::Cancelled);
        };
        let form = JewelryForm::parse(&option).ok_or(RulesError::UnknownOption(option))?;
        let trait_name = trait_name
            .filter(|t| !t.trim().is_empty())
            .ok_or(RulesError::NoTraitSelected)?;
        let trait_name = choices
            .into_iter()
            .find(|c| c.eq_ignore_ascii_case(trait_name.trim()))
            .ok_or(RulesError::UnknownOption(trait_name))?;
        let target = traits::resolve(&trait_name);
        let enchantment = mutate::enchant_jewelry(&item, form, &target, self.settings)?;

        // Effects leave the item version alone, so the update still applies.
        let id = item.id;
        command::execute(
            &mut *self.store,
            vec![
                Command::CreateEffect {
                    item: id,
                    effect: enchantment.effect,
                },
                Command::UpdateItem {
                    id,
                    expected_version: item.version,
                    update: enchantment.successor.into_update(item.markers),
                },
            ],
        )?;
        let item = self.store.get_item(id)?;
        info!(item = %item.name, price = item.price, %trait_name, "jewelry enchanted");
        Ok(Outcome::Enchanted { item })
    }

    fn link(&mut self, power: Item, actor: Actor) -> RulesResult<Outcome> {
        guard::ensure_not_scrolled(&power)?;
        let items = self.store.items_of(actor.id)?;
        let plan = scroll::plan_link(&power, &actor, &items)?;
        self.commit_scroll(plan)
    }

    fn commit_scroll(&mut self, plan: scroll::ScrollPlan) -> RulesResult<Outcome> {
        debug!(
            scroll = %plan.scroll_name,
            price = plan.price,
            casting_trait = %plan.casting_trait,
            commands = plan.commands.len(),
            "planned scroll"
        );
        command::execute(&mut *self.store, plan.commands)?;
        let power = self.store.get_item(plan.power)?;
        let scroll = self.store.get_item(plan.scroll)?;
        info!(scroll = %scroll.name, price = scroll.price, pool = %plan.pool, "scroll linked");
        Ok(Outcome::Scrolled { power, scroll })
    }
}
