//! Catalog of held items.
//!
//! An item starts alongside its holder's ability on switch-in. Items that are not in the catalog
//! are inert.

use std::sync::LazyLock;

use anyhow::Result;

use crate::{
    battle::{
        DamageCause,
        DamageOutcome,
        HostId,
        MonHandle,
    },
    common::{
        FastHashMap,
        Id,
    },
    conditions::{
        self,
        log_activate,
    },
    effect::{
        Effect,
        EffectContext,
        EffectSource,
        Hook,
    },
    moves::ActiveMove,
};

/// An item with no effect in battle.
#[derive(Debug, Clone)]
pub struct InertItem {
    id: Id,
}

impl InertItem {
    pub fn new(id: Id) -> Self {
        Self { id }
    }
}

impl Effect for InertItem {
    fn source(&self) -> EffectSource {
        EffectSource::Item
    }

    fn name(&self) -> &str {
        self.id.as_str()
    }
}

/// Restores 1/16 of max HP at the end of every turn.
#[derive(Debug, Default, Clone)]
pub struct Leftovers;

impl Effect for Leftovers {
    fn source(&self) -> EffectSource {
        EffectSource::Item
    }

    fn name(&self) -> &str {
        "Leftovers"
    }

    fn hooks(&self) -> &'static [(Hook, i32)] {
        &[(Hook::Residual, -6)]
    }

    fn on_residual(&mut self, ctx: &mut EffectContext) -> Result<()> {
        let mon = ctx.mon()?;
        if mon.fainted() || mon.hp == mon.max_hp {
            return Ok(());
        }
        let amount = (mon.max_hp / 16).max(1);
        let handle = ctx.mon_handle()?;
        ctx.battle().heal(handle, amount as u32)?;
        Ok(())
    }
}

/// Boosts damage by 30%, at the cost of 1/10 of max HP per damaging move.
#[derive(Debug, Default, Clone)]
pub struct LifeOrb;

impl Effect for LifeOrb {
    fn source(&self) -> EffectSource {
        EffectSource::Item
    }

    fn name(&self) -> &str {
        "Life Orb"
    }

    fn hooks(&self) -> &'static [(Hook, i32)] {
        &[(Hook::ModifyDamage, 0), (Hook::AfterMoveSecondary, 0)]
    }

    fn on_modify_damage(
        &mut self,
        _: &mut EffectContext,
        _: &ActiveMove,
        _: MonHandle,
        _: MonHandle,
        _: f64,
        damage: f64,
    ) -> Result<f64> {
        Ok(damage * 1.3)
    }

    fn on_after_move_secondary(
        &mut self,
        ctx: &mut EffectContext,
        active_move: &ActiveMove,
        _: MonHandle,
        damage: u16,
    ) -> Result<()> {
        if damage == 0 || active_move.is_status() || ctx.mon()?.fainted() {
            return Ok(());
        }
        let mon = ctx.mon_handle()?;
        let amount = (ctx.mon()?.max_hp / 10).max(1);
        ctx.battle()
            .damage(mon, amount as u32, DamageCause::Effect(EffectSource::Item))?;
        Ok(())
    }
}

/// Which stat a choice item boosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceStat {
    Atk,
    Spe,
}

/// Boosts a stat by 50%, but locks the holder into the first move it uses.
#[derive(Debug, Clone)]
pub struct ChoiceItem {
    name: &'static str,
    stat: ChoiceStat,
}

impl ChoiceItem {
    pub fn new(name: &'static str, stat: ChoiceStat) -> Self {
        Self { name, stat }
    }
}

impl Effect for ChoiceItem {
    fn source(&self) -> EffectSource {
        EffectSource::Item
    }

    fn name(&self) -> &str {
        self.name
    }

    fn hooks(&self) -> &'static [(Hook, i32)] {
        match self.stat {
            ChoiceStat::Atk => &[(Hook::ModifyMove, 0), (Hook::ModifyAtk, 0)],
            ChoiceStat::Spe => &[(Hook::ModifyMove, 0), (Hook::ModifySpe, 0)],
        }
    }

    fn on_modify_move(
        &mut self,
        ctx: &mut EffectContext,
        active_move: &mut ActiveMove,
        _: Option<MonHandle>,
    ) -> Result<()> {
        // Moves the holder does not know, like Struggle, never lock.
        if ctx.mon()?.move_slot(&active_move.id).is_none() {
            return Ok(());
        }
        let host = HostId::Mon(ctx.mon_handle()?);
        if !ctx
            .battle_ref()
            .has_effect(host, &EffectSource::volatile("choicelock"))
        {
            ctx.battle()
                .insert_effect(host, conditions::choice_lock(active_move.id.clone()))?;
        }
        Ok(())
    }

    fn on_modify_atk(
        &mut self,
        _: &mut EffectContext,
        _: MonHandle,
        _: &ActiveMove,
        atk: f64,
    ) -> Result<f64> {
        Ok(atk * 1.5)
    }

    fn on_modify_spe(&mut self, _: &mut EffectContext, _: MonHandle, spe: f64) -> Result<f64> {
        Ok(spe * 1.5)
    }
}

/// Survives a hit from full HP with 1 HP, then is consumed.
#[derive(Debug, Default, Clone)]
pub struct FocusSash;

impl Effect for FocusSash {
    fn source(&self) -> EffectSource {
        EffectSource::Item
    }

    fn name(&self) -> &str {
        "Focus Sash"
    }

    fn hooks(&self) -> &'static [(Hook, i32)] {
        &[(Hook::Damage, -100)]
    }

    fn on_damage(
        &mut self,
        ctx: &mut EffectContext,
        damage: u16,
        cause: &DamageCause,
    ) -> Result<DamageOutcome> {
        let mon = ctx.mon()?;
        if !cause.is_move() || mon.hp != mon.max_hp || damage < mon.hp {
            return Ok(DamageOutcome::Damage(damage));
        }
        let hp = mon.hp;
        log_activate(ctx, "focussash")?;
        ctx.mon_mut()?.item = None;
        ctx.remove_self()?;
        Ok(DamageOutcome::Damage(hp - 1))
    }
}

type Constructor = fn() -> Box<dyn Effect>;

fn boxed<E>() -> Box<dyn Effect>
where
    E: Effect + Default + Clone + 'static,
{
    Box::new(E::default())
}

fn choice_band() -> Box<dyn Effect> {
    Box::new(ChoiceItem::new("Choice Band", ChoiceStat::Atk))
}

fn choice_scarf() -> Box<dyn Effect> {
    Box::new(ChoiceItem::new("Choice Scarf", ChoiceStat::Spe))
}

static ITEMS: LazyLock<FastHashMap<Id, Constructor>> = LazyLock::new(|| {
    let entries: [(&'static str, Constructor); 5] = [
        ("choiceband", choice_band),
        ("choicescarf", choice_scarf),
        ("focussash", boxed::<FocusSash>),
        ("leftovers", boxed::<Leftovers>),
        ("lifeorb", boxed::<LifeOrb>),
    ];
    entries
        .into_iter()
        .map(|(id, constructor)| (Id::from_known(id), constructor))
        .collect()
});

/// Creates the effect for a held item.
///
/// Unknown items are inert.
pub fn create_item(id: &Id) -> Box<dyn Effect> {
    match ITEMS.get(id) {
        Some(constructor) => constructor(),
        None => Box::new(InertItem::new(id.clone())),
    }
}

#[cfg(test)]
mod items_test {
    use pretty_assertions::assert_eq;

    use crate::{
        common::Id,
        effect::{
            EffectSource,
            Hook,
        },
        items::create_item,
    };

    #[test]
    fn creates_known_items() {
        let item = create_item(&Id::from("Choice Scarf"));
        assert_eq!(item.source(), EffectSource::Item);
        assert_eq!(item.name(), "Choice Scarf");
        assert_eq!(item.priority_of(Hook::ModifySpe), Some(0));
        assert_eq!(item.priority_of(Hook::ModifyAtk), None);

        let item = create_item(&Id::from("Choice Band"));
        assert_eq!(item.priority_of(Hook::ModifyAtk), Some(0));
        assert_eq!(item.priority_of(Hook::ModifySpe), None);
    }

    #[test]
    fn unknown_items_are_inert() {
        let item = create_item(&Id::from("Sitrus Berry"));
        assert_eq!(item.source(), EffectSource::Item);
        assert_eq!(item.name(), "sitrusberry");
        assert!(item.hooks().is_empty());
    }

    #[test]
    fn leftovers_heal_after_weather() {
        assert_eq!(
            create_item(&Id::from("leftovers")).priority_of(Hook::Residual),
            Some(-6)
        );
        assert_eq!(
            create_item(&Id::from("focussash")).priority_of(Hook::Damage),
            Some(-100)
        );
    }
}
