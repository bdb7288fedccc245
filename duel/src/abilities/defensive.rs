use anyhow::Result;
use duel_data::{
    BoostTable,
    MoveCategory,
    Status,
    Type,
};
use duel_prng::rand_util;

use crate::{
    abilities::ability_identity,
    battle::{
        DamageCause,
        DamageOutcome,
        MonHandle,
    },
    battle_event,
    conditions::log_activate,
    effect::{
        Effect,
        EffectContext,
        EffectSource,
        Hook,
        HookOutcome,
        Immunity,
    },
    moves::ActiveMove,
};

/// Absorbs moves of a type to heal 1/4 HP.
#[derive(Debug, Clone)]
pub struct Absorb {
    name: &'static str,
    absorbs: Type,
}

impl Absorb {
    pub fn new(name: &'static str, absorbs: Type) -> Self {
        Self { name, absorbs }
    }
}

impl Effect for Absorb {
    ability_identity!(field name);

    fn hooks(&self) -> &'static [(Hook, i32)] {
        &[(Hook::FoeTryHit, 0)]
    }

    fn on_foe_try_hit(
        &mut self,
        ctx: &mut EffectContext,
        active_move: &ActiveMove,
        user: MonHandle,
        target: MonHandle,
    ) -> Result<HookOutcome> {
        if active_move.move_type() != self.absorbs || user == target {
            return Ok(HookOutcome::Continue);
        }
        let amount = ctx.battle_ref().mon(target)?.max_hp / 4;
        if ctx.battle().heal(target, amount as u32)? == 0 {
            let event = battle_event!("immune", ctx.mon()?.log_id());
            ctx.log(event);
        }
        Ok(HookOutcome::Fail)
    }
}

/// Damages attackers that make contact by 1/8 of their HP.
#[derive(Debug, Clone)]
pub struct ContactDamage {
    name: &'static str,
}

impl ContactDamage {
    pub fn new(name: &'static str) -> Self {
        Self { name }
    }
}

impl Effect for ContactDamage {
    ability_identity!(field name);

    fn hooks(&self) -> &'static [(Hook, i32)] {
        &[(Hook::AfterFoeHit, 0)]
    }

    fn on_after_foe_hit(
        &mut self,
        ctx: &mut EffectContext,
        active_move: &ActiveMove,
        user: MonHandle,
        _: u16,
    ) -> Result<()> {
        if !active_move.is_contact() || ctx.battle_ref().mon(user)?.fainted() {
            return Ok(());
        }
        let amount = (ctx.battle_ref().mon(user)?.max_hp / 8).max(1);
        ctx.battle()
            .damage(user, amount as u32, DamageCause::Effect(EffectSource::Ability))?;
        Ok(())
    }
}

/// Prevents critical hits against the holder.
#[derive(Debug, Clone)]
pub struct CritBlocker {
    name: &'static str,
}

impl CritBlocker {
    pub fn new(name: &'static str) -> Self {
        Self { name }
    }
}

impl Effect for CritBlocker {
    ability_identity!(field name);

    fn hooks(&self) -> &'static [(Hook, i32)] {
        &[(Hook::ModifyCrit, 0)]
    }

    fn on_modify_crit(
        &mut self,
        ctx: &mut EffectContext,
        _: &ActiveMove,
        user: MonHandle,
        crit: bool,
    ) -> Result<bool> {
        // Only guards the holder, not its own attacks.
        if ctx.mon_handle()? == user {
            return Ok(crit);
        }
        Ok(false)
    }
}

/// Raises attack when hit by a Dark move.
#[derive(Debug, Default, Clone)]
pub struct Justified;

impl Effect for Justified {
    ability_identity!("Justified");

    fn hooks(&self) -> &'static [(Hook, i32)] {
        &[(Hook::AfterDamage, 0)]
    }

    fn on_after_damage(
        &mut self,
        ctx: &mut EffectContext,
        _: u16,
        cause: &DamageCause,
    ) -> Result<()> {
        let DamageCause::Move {
            move_type: Type::Dark,
            ..
        } = cause
        else {
            return Ok(());
        };
        let mon = ctx.mon_handle()?;
        if ctx.mon()?.fainted() {
            return Ok(());
        }
        ctx.battle().apply_boosts(
            mon,
            BoostTable {
                atk: 1,
                ..Default::default()
            },
            Some(mon),
        )?;
        Ok(())
    }
}

/// Grants immunity to Ground moves and grounded effects.
#[derive(Debug, Default, Clone)]
pub struct Levitate;

impl Effect for Levitate {
    ability_identity!("Levitate");

    fn hooks(&self) -> &'static [(Hook, i32)] {
        &[(Hook::GetImmunity, 0)]
    }

    fn on_get_immunity(
        &mut self,
        _: &mut EffectContext,
        immunity: Immunity<'_>,
    ) -> Result<Option<bool>> {
        match immunity {
            Immunity::Type(Type::Ground) => Ok(Some(true)),
            _ => Ok(None),
        }
    }
}

/// Prevents all damage except from attacks.
#[derive(Debug, Default, Clone)]
pub struct MagicGuard;

impl Effect for MagicGuard {
    ability_identity!("Magic Guard");

    fn hooks(&self) -> &'static [(Hook, i32)] {
        &[(Hook::Damage, 0)]
    }

    fn on_damage(
        &mut self,
        _: &mut EffectContext,
        damage: u16,
        cause: &DamageCause,
    ) -> Result<DamageOutcome> {
        match cause {
            DamageCause::Move { .. } | DamageCause::SelfHit => Ok(DamageOutcome::Damage(damage)),
            _ => Ok(DamageOutcome::Fail),
        }
    }
}

/// Halves damage taken at full HP.
#[derive(Debug, Default, Clone)]
pub struct Multiscale;

impl Effect for Multiscale {
    ability_identity!("Multiscale");

    fn hooks(&self) -> &'static [(Hook, i32)] {
        &[(Hook::ModifyFoeDamage, 0)]
    }

    fn on_modify_foe_damage(
        &mut self,
        ctx: &mut EffectContext,
        _: &ActiveMove,
        _: MonHandle,
        _: MonHandle,
        _: bool,
        _: f64,
        damage: f64,
    ) -> Result<f64> {
        let mon = ctx.mon()?;
        if mon.hp == mon.max_hp {
            return Ok(damage * 0.5);
        }
        Ok(damage)
    }
}

/// Cures the holder's status when it switches out.
#[derive(Debug, Default, Clone)]
pub struct NaturalCure;

impl Effect for NaturalCure {
    ability_identity!("Natural Cure");

    fn hooks(&self) -> &'static [(Hook, i32)] {
        &[(Hook::SwitchOut, 0)]
    }

    fn on_switch_out(&mut self, ctx: &mut EffectContext) -> Result<()> {
        let mon = ctx.mon_handle()?;
        ctx.battle().cure_status(mon)?;
        Ok(())
    }
}

/// May paralyze attackers that make contact.
#[derive(Debug, Default, Clone)]
pub struct Static;

impl Effect for Static {
    ability_identity!("Static");

    fn hooks(&self) -> &'static [(Hook, i32)] {
        &[(Hook::AfterFoeHit, 0)]
    }

    fn on_after_foe_hit(
        &mut self,
        ctx: &mut EffectContext,
        active_move: &ActiveMove,
        user: MonHandle,
        _: u16,
    ) -> Result<()> {
        if !active_move.is_contact() || ctx.battle_ref().mon(user)?.fainted() {
            return Ok(());
        }
        if rand_util::range(ctx.prng(), 0, 10) < 3 {
            let mon = ctx.mon_handle()?;
            ctx.battle().set_status(user, Status::Paralysis, Some(mon))?;
        }
        Ok(())
    }
}

/// Survives a hit from full HP with 1 HP.
#[derive(Debug, Default, Clone)]
pub struct Sturdy;

impl Effect for Sturdy {
    ability_identity!("Sturdy");

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
        if cause.is_move() && mon.hp == mon.max_hp && damage >= mon.hp {
            let hp = mon.hp;
            log_activate(ctx, "sturdy")?;
            return Ok(DamageOutcome::Damage(hp - 1));
        }
        Ok(DamageOutcome::Damage(damage))
    }
}

/// Passes poison, burn, and paralysis back to the Mon that inflicted it.
#[derive(Debug, Default, Clone)]
pub struct Synchronize;

impl Effect for Synchronize {
    ability_identity!("Synchronize");

    fn hooks(&self) -> &'static [(Hook, i32)] {
        &[(Hook::AfterSetStatus, 0)]
    }

    fn on_after_set_status(
        &mut self,
        ctx: &mut EffectContext,
        status: Status,
        setter: Option<MonHandle>,
    ) -> Result<()> {
        let mon = ctx.mon_handle()?;
        let Some(setter) = setter.filter(|setter| *setter != mon) else {
            return Ok(());
        };
        if matches!(status, Status::Freeze | Status::Sleep)
            || ctx.battle_ref().mon(setter)?.fainted()
        {
            return Ok(());
        }
        ctx.battle().set_status(setter, status, Some(mon))?;
        Ok(())
    }
}

/// Halves damage from Fire and Ice moves.
#[derive(Debug, Default, Clone)]
pub struct ThickFat;

impl Effect for ThickFat {
    ability_identity!("Thick Fat");

    fn hooks(&self) -> &'static [(Hook, i32)] {
        &[(Hook::ModifyFoeDamage, 0)]
    }

    fn on_modify_foe_damage(
        &mut self,
        _: &mut EffectContext,
        active_move: &ActiveMove,
        _: MonHandle,
        _: MonHandle,
        _: bool,
        _: f64,
        damage: f64,
    ) -> Result<f64> {
        if matches!(active_move.move_type(), Type::Fire | Type::Ice) {
            return Ok(damage * 0.5);
        }
        Ok(damage)
    }
}

/// Trades defense for speed when hit by a physical move.
#[derive(Debug, Default, Clone)]
pub struct WeakArmor;

impl Effect for WeakArmor {
    ability_identity!("Weak Armor");

    fn hooks(&self) -> &'static [(Hook, i32)] {
        &[(Hook::AfterDamage, 0)]
    }

    fn on_after_damage(
        &mut self,
        ctx: &mut EffectContext,
        _: u16,
        cause: &DamageCause,
    ) -> Result<()> {
        let DamageCause::Move {
            category: MoveCategory::Physical,
            ..
        } = cause
        else {
            return Ok(());
        };
        let mon = ctx.mon_handle()?;
        if ctx.mon()?.fainted() {
            return Ok(());
        }
        ctx.battle().apply_boosts(
            mon,
            BoostTable {
                def: -1,
                spe: 1,
                ..Default::default()
            },
            Some(mon),
        )?;
        Ok(())
    }
}

/// Only super-effective attacks can hit the holder.
#[derive(Debug, Default, Clone)]
pub struct WonderGuard;

impl Effect for WonderGuard {
    ability_identity!("Wonder Guard");

    fn hooks(&self) -> &'static [(Hook, i32)] {
        &[(Hook::FoeTryHit, 0)]
    }

    fn on_foe_try_hit(
        &mut self,
        ctx: &mut EffectContext,
        active_move: &ActiveMove,
        user: MonHandle,
        target: MonHandle,
    ) -> Result<HookOutcome> {
        if active_move.is_status() || active_move.move_type() == Type::None || user == target {
            return Ok(HookOutcome::Continue);
        }
        let battle = ctx.battle_ref();
        let effectiveness = battle
            .type_chart()
            .multiplier(active_move.move_type(), &battle.mon(target)?.types);
        if effectiveness > 1.0 {
            return Ok(HookOutcome::Continue);
        }
        let event = battle_event!("immune", battle.mon(target)?.log_id(), "from:wonderguard");
        ctx.log(event);
        Ok(HookOutcome::Fail)
    }
}
