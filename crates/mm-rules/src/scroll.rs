//! Scroll linking.
//!
//! A power moves from [`LinkState::Unlinked`] to [`LinkState::Linked`]
//! exactly once. Linking either creates a single-use consumable for the
//! power or inscribes an existing blank scroll, and in both cases gives the
//! power its own power-point ledger entry on the owning actor.
//!
//! Planning is pure; the returned command list writes the power last so a
//! failed plan never leaves a linked power without its scroll.

use mm_core::{
    Actor, ActorUpdate, ConsumableStats, Item, ItemId, ItemStats, ItemUpdate, PowerPool,
    PowerStats,
};

use crate::catalog::SCROLL_PRICE_PER_POINT;
use crate::command::Command;
use crate::error::{RulesError, RulesResult};
use crate::guard;

/// Item names that mark an arcane casting skill, in lookup order.
pub const CASTING_SKILLS: [&str; 5] = [
    "Gifted",
    "Miracles",
    "Spellcasting",
    "Psionics",
    "Weird Science",
];

/// Casting trait used when the actor has none of [`CASTING_SKILLS`].
pub const DEFAULT_CASTING_TRAIT: &str = "Smarts";

/// The two states of a power.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    /// An ordinary power.
    Unlinked,
    /// The power has a scroll. Terminal.
    Linked,
}

impl LinkState {
    /// The state of a power item.
    pub fn of(item: &Item) -> Self {
        if guard::is_scrolled(item) {
            Self::Linked
        } else {
            Self::Unlinked
        }
    }
}

/// The casting trait for an actor: the first item named after a casting
/// skill, else Smarts.
pub fn casting_trait(actor_items: &[Item]) -> String {
    actor_items
        .iter()
        .find(|item| CASTING_SKILLS.contains(&item.name.as_str()))
        .map(|item| item.name.clone())
        .unwrap_or_else(|| DEFAULT_CASTING_TRAIT.to_string())
}

/// Scroll price: `pp * 50 * rank index`.
pub fn scroll_price(power: &PowerStats) -> u32 {
    power
        .pp
        .saturating_mul(SCROLL_PRICE_PER_POINT)
        .saturating_mul(power.rank.index())
}

/// The scroll name, which is also the ledger key and arcane label.
pub fn scroll_name(power_name: &str) -> String {
    format!("{power_name} Scroll")
}

/// Description linking a scroll back to its power.
pub fn link_description(power: &Item) -> String {
    format!(
        "<p>The @UUID[{}]{{{}}} power is linked to this scroll.</p>",
        power.reference(),
        power.name
    )
}

/// A planned link, ready to execute.
#[derive(Debug, Clone)]
pub struct ScrollPlan {
    /// The power being linked.
    pub power: ItemId,
    /// The scroll consumable (created or inscribed).
    pub scroll: ItemId,
    /// Ledger key and new arcane label.
    pub scroll_name: String,
    /// Casting trait written to the power.
    pub casting_trait: String,
    /// Price of the scroll.
    pub price: u32,
    /// Ledger entry added to the actor.
    pub pool: PowerPool,
    /// Store writes, in order.
    pub commands: Vec<Command>,
}

/// Plan turning `power` into a new scroll consumable owned by `actor`.
pub fn plan_link(power: &Item, actor: &Actor, actor_items: &[Item]) -> RulesResult<ScrollPlan> {
    let stats = check_power(power, actor)?;
    let name = scroll_name(&power.name);
    check_ledger(actor, &name)?;

    let casting_trait = casting_trait(actor_items);
    let price = scroll_price(stats);
    let pool = PowerPool::full(stats.pp);

    let mut scroll = Item::new(name.clone(), ItemStats::Consumable(ConsumableStats::default()))
        .with_price(price)
        .with_description(link_description(power))
        .with_swid(slug(&name));
    scroll.weight = 0;
    scroll.grants = vec![power.id];
    scroll.owner = Some(actor.id);
    let scroll_id = scroll.id;

    let commands = vec![
        Command::CreateItem {
            owner: actor.id,
            item: scroll,
        },
        ledger_command(actor, &name, pool),
        power_command(power, stats, &name, &casting_trait),
    ];

    Ok(ScrollPlan {
        power: power.id,
        scroll: scroll_id,
        scroll_name: name,
        casting_trait,
        price,
        pool,
        commands,
    })
}

/// Plan inscribing `power` onto an existing blank scroll consumable.
///
/// The scroll keeps its own price.
pub fn plan_attach(
    scroll: &Item,
    power: &Item,
    actor: &Actor,
    actor_items: &[Item],
) -> RulesResult<ScrollPlan> {
    if !matches!(scroll.stats, ItemStats::Consumable(_)) {
        return Err(RulesError::WrongCategory {
            expected: mm_core::ItemKind::Consumable,
            found: scroll.kind(),
        });
    }
    if !scroll.grants.is_empty() {
        return Err(RulesError::AlreadyLinked(scroll.name.clone()));
    }
    if scroll.owner != Some(actor.id) {
        return Err(RulesError::NotOwned(scroll.name.clone()));
    }
    let stats = check_power(power, actor)?;
    let name = scroll_name(&power.name);
    check_ledger(actor, &name)?;

    let casting_trait = casting_trait(actor_items);
    let pool = PowerPool::full(stats.pp);

    let commands = vec![
        Command::UpdateItem {
            id: scroll.id,
            expected_version: scroll.version,
            update: ItemUpdate::new()
                .name(name.clone())
                .description(link_description(power))
                .grants(vec![power.id]),
        },
        ledger_command(actor, &name, pool),
        power_command(power, stats, &name, &casting_trait),
    ];

    Ok(ScrollPlan {
        power: power.id,
        scroll: scroll.id,
        scroll_name: name,
        casting_trait,
        price: scroll.price,
        pool,
        commands,
    })
}

fn check_power<'a>(power: &'a Item, actor: &Actor) -> RulesResult<&'a PowerStats> {
    let ItemStats::Power(stats) = &power.stats else {
        return Err(RulesError::WrongCategory {
            expected: mm_core::ItemKind::Power,
            found: power.kind(),
        });
    };
    guard::ensure_not_scrolled(power)?;
    if power.owner != Some(actor.id) {
        return Err(RulesError::NotOwned(power.name.clone()));
    }
    Ok(stats)
}

fn check_ledger(actor: &Actor, key: &str) -> RulesResult<()> {
    if actor.power_points.contains_key(key) {
        return Err(RulesError::LedgerCollision(key.to_string()));
    }
    Ok(())
}

fn ledger_command(actor: &Actor, key: &str, pool: PowerPool) -> Command {
    Command::UpdateActor {
        id: actor.id,
        expected_version: actor.version,
        update: ActorUpdate::SetPowerPoints {
            key: key.to_string(),
            pool,
        },
    }
}

fn power_command(power: &Item, stats: &PowerStats, name: &str, casting_trait: &str) -> Command {
    Command::UpdateItem {
        id: power.id,
        expected_version: power.version,
        update: ItemUpdate::new()
            .name(name)
            .stats(ItemStats::Power(PowerStats {
                arcane: name.to_string(),
                casting_trait: casting_trait.to_string(),
                ..stats.clone()
            }))
            .markers(guard::mark_scrolled(power.markers)),
    }
}

/// Lowercase, hyphen-separated identifier: "Fireball Scroll" → "fireball-scroll".
fn slug(name: &str) -> String {
    name.split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use mm_core::{ActorKind, Rank, SkillStats};

    fn actor() -> Actor {
        Actor::new(ActorKind::Character, "Valeria")
    }

    fn power(owner: &Actor, name: &str, rank: Rank, pp: u32) -> Item {
        let mut item = Item::new(
            name,
            ItemStats::Power(PowerStats {
                rank,
                pp,
                arcane: String::new(),
                casting_trait: String::new(),
            }),
        );
        item.owner = Some(owner.id);
        item
    }

    fn skill(name: &str) -> Item {
        Item::new(
            name,
            ItemStats::Skill(SkillStats {
                die: mm_core::DieStep::D8,
            }),
        )
    }

    #[test]
    fn price_scales_with_rank() {
        let stats = |rank| PowerStats {
            rank,
            pp: 3,
            arcane: String::new(),
            casting_trait: String::new(),
        };
        assert_eq!(scroll_price(&stats(Rank::Novice)), 150);
        assert_eq!(scroll_price(&stats(Rank::Seasoned)), 300);
        assert_eq!(scroll_price(&stats(Rank::Veteran)), 450);
        assert_eq!(scroll_price(&stats(Rank::Heroic)), 600);
        assert_eq!(scroll_price(&stats(Rank::Legendary)), 750);
    }

    #[test]
    fn casting_trait_prefers_arcane_skill() {
        let items = vec![skill("Fighting"), skill("Spellcasting")];
        assert_eq!(casting_trait(&items), "Spellcasting");
        assert_eq!(casting_trait(&[skill("Fighting")]), "Smarts");
        assert_eq!(casting_trait(&[]), "Smarts");
    }

    #[test]
    fn plan_link_orders_power_last() {
        let owner = actor();
        let fireball = power(&owner, "Fireball", Rank::Veteran, 3);
        let plan = plan_link(&fireball, &owner, &[skill("Spellcasting")]).unwrap();

        assert_eq!(plan.scroll_name, "Fireball Scroll");
        assert_eq!(plan.price, 450);
        assert_eq!(plan.casting_trait, "Spellcasting");
        assert_eq!(plan.pool, PowerPool::full(3));
        assert_eq!(plan.commands.len(), 3);

        let Command::CreateItem { item, .. } = &plan.commands[0] else {
            panic!("expected create first");
        };
        assert_eq!(item.name, "Fireball Scroll");
        assert_eq!(item.grants, vec![fireball.id]);
        assert_eq!(item.swid, "fireball-scroll");
        assert!(item.description.contains(&fireball.reference().to_string()));
        assert!(item.description.contains("{Fireball}"));

        assert!(matches!(plan.commands[1], Command::UpdateActor { .. }));
        let Command::UpdateItem { id, update, .. } = &plan.commands[2] else {
            panic!("expected power update last");
        };
        assert_eq!(*id, fireball.id);
        assert_eq!(update.name.as_deref(), Some("Fireball Scroll"));
        assert_eq!(update.markers.map(|m| m.is_scroll), Some(true));
    }

    #[test]
    fn linked_power_rejected() {
        let owner = actor();
        let mut fireball = power(&owner, "Fireball", Rank::Novice, 2);
        fireball.markers.is_scroll = true;
        assert_eq!(LinkState::of(&fireball), LinkState::Linked);
        assert!(matches!(
            plan_link(&fireball, &owner, &[]),
            Err(RulesError::AlreadyLinked(_))
        ));
    }

    #[test]
    fn ledger_collision_rejected() {
        let mut owner = actor();
        owner
            .power_points
            .insert("Fireball Scroll".into(), PowerPool::full(1));
        let fireball = power(&owner, "Fireball", Rank::Novice, 2);
        assert!(matches!(
            plan_link(&fireball, &owner, &[]),
            Err(RulesError::LedgerCollision(key)) if key == "Fireball Scroll"
        ));
    }

    #[test]
    fn power_of_another_actor_rejected() {
        let owner = actor();
        let other = actor();
        let fireball = power(&other, "Fireball", Rank::Novice, 2);
        assert!(matches!(
            plan_link(&fireball, &owner, &[]),
            Err(RulesError::NotOwned(_))
        ));
    }

    #[test]
    fn attach_keeps_scroll_price() {
        let owner = actor();
        let bolt = power(&owner, "Bolt", Rank::Novice, 1);
        let mut blank = Item::new("Scroll", ItemStats::Consumable(ConsumableStats::default()))
            .with_swid("scroll")
            .with_price(75);
        blank.owner = Some(owner.id);

        let plan = plan_attach(&blank, &bolt, &owner, &[]).unwrap();
        assert_eq!(plan.scroll, blank.id);
        assert_eq!(plan.price, 75);
        assert_eq!(plan.casting_trait, "Smarts");
        let Command::UpdateItem { update, .. } = &plan.commands[0] else {
            panic!("expected scroll update first");
        };
        assert_eq!(update.name.as_deref(), Some("Bolt Scroll"));
        assert_eq!(update.grants.as_deref(), Some(&[bolt.id][..]));
    }

    #[test]
    fn attach_to_inscribed_scroll_rejected() {
        let owner = actor();
        let bolt = power(&owner, "Bolt", Rank::Novice, 1);
        let mut used = Item::new("Scroll", ItemStats::Consumable(ConsumableStats::default()));
        used.owner = Some(owner.id);
        used.grants = vec![ItemId::new()];
        assert!(matches!(
            plan_attach(&used, &bolt, &owner, &[]),
            Err(RulesError::AlreadyLinked(_))
        ));
    }

    #[test]
    fn slug_joins_words() {
        assert_eq!(slug("Fireball Scroll"), "fireball-scroll");
        assert_eq!(slug("  Weird  Science! "), "weird-science");
    }
}
