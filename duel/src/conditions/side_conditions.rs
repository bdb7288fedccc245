use anyhow::Result;
use duel_data::{
    MoveCategory,
    Status,
};

use crate::{
    battle::MonHandle,
    effect::{
        Effect,
        EffectContext,
        EffectSource,
        Hook,
        HookOutcome,
    },
    moves::ActiveMove,
};

/// Halves non-critical damage of the given category dealt to the side.
fn screen(active_move: &ActiveMove, category: MoveCategory, crit: bool, damage: f64) -> f64 {
    if active_move.category() == category && !crit {
        damage * 0.5
    } else {
        damage
    }
}

/// Halves physical damage taken by the side.
#[derive(Debug, Default, Clone)]
pub struct Reflect;

impl Effect for Reflect {
    fn source(&self) -> EffectSource {
        EffectSource::side_condition("reflect")
    }

    fn name(&self) -> &str {
        "Reflect"
    }

    fn hooks(&self) -> &'static [(Hook, i32)] {
        &[(Hook::ModifyFoeDamage, 0)]
    }

    fn initial_duration(&self) -> Option<u8> {
        Some(5)
    }

    fn on_modify_foe_damage(
        &mut self,
        _: &mut EffectContext,
        active_move: &ActiveMove,
        _: MonHandle,
        _: MonHandle,
        crit: bool,
        _: f64,
        damage: f64,
    ) -> Result<f64> {
        Ok(screen(active_move, MoveCategory::Physical, crit, damage))
    }
}

/// Halves special damage taken by the side.
#[derive(Debug, Default, Clone)]
pub struct LightScreen;

impl Effect for LightScreen {
    fn source(&self) -> EffectSource {
        EffectSource::side_condition("lightscreen")
    }

    fn name(&self) -> &str {
        "Light Screen"
    }

    fn hooks(&self) -> &'static [(Hook, i32)] {
        &[(Hook::ModifyFoeDamage, 0)]
    }

    fn initial_duration(&self) -> Option<u8> {
        Some(5)
    }

    fn on_modify_foe_damage(
        &mut self,
        _: &mut EffectContext,
        active_move: &ActiveMove,
        _: MonHandle,
        _: MonHandle,
        crit: bool,
        _: f64,
        damage: f64,
    ) -> Result<f64> {
        Ok(screen(active_move, MoveCategory::Special, crit, damage))
    }
}

/// Doubles the speed of the side's Mons.
#[derive(Debug, Default, Clone)]
pub struct Tailwind;

impl Effect for Tailwind {
    fn source(&self) -> EffectSource {
        EffectSource::side_condition("tailwind")
    }

    fn name(&self) -> &str {
        "Tailwind"
    }

    fn hooks(&self) -> &'static [(Hook, i32)] {
        &[(Hook::ModifySpe, 0)]
    }

    fn initial_duration(&self) -> Option<u8> {
        Some(4)
    }

    fn on_modify_spe(&mut self, _: &mut EffectContext, _: MonHandle, spe: f64) -> Result<f64> {
        Ok(spe * 2.0)
    }
}

/// Blocks statuses that the side's Mons did not inflict on themselves.
#[derive(Debug, Default, Clone)]
pub struct Safeguard;

impl Effect for Safeguard {
    fn source(&self) -> EffectSource {
        EffectSource::side_condition("safeguard")
    }

    fn name(&self) -> &str {
        "Safeguard"
    }

    fn hooks(&self) -> &'static [(Hook, i32)] {
        &[(Hook::SetStatus, 0)]
    }

    fn initial_duration(&self) -> Option<u8> {
        Some(5)
    }

    fn on_set_status(
        &mut self,
        _: &mut EffectContext,
        _: Status,
        target: MonHandle,
        setter: Option<MonHandle>,
    ) -> Result<HookOutcome> {
        Ok((setter == Some(target)).into())
    }
}

/// Heals the side's active Mon when the wish comes true.
#[derive(Debug, Default, Clone)]
pub struct Wish {
    hp: u16,
}

impl Effect for Wish {
    fn source(&self) -> EffectSource {
        EffectSource::side_condition("wish")
    }

    fn name(&self) -> &str {
        "Wish"
    }

    fn initial_duration(&self) -> Option<u8> {
        Some(2)
    }

    fn on_start(&mut self, ctx: &mut EffectContext) -> Result<HookOutcome> {
        let Some(user) = ctx
            .side_index()
            .and_then(|side| ctx.battle_ref().living_active_mon(side))
        else {
            return Ok(HookOutcome::Fail);
        };
        self.hp = ctx.battle_ref().mon(user)?.max_hp / 2;
        Ok(HookOutcome::Continue)
    }

    fn on_timeout(&mut self, ctx: &mut EffectContext) -> Result<()> {
        let Some(mon) = ctx
            .side_index()
            .and_then(|side| ctx.battle_ref().living_active_mon(side))
        else {
            return Ok(());
        };
        let target = ctx.battle_ref().mon(mon)?;
        if target.hp < target.max_hp {
            ctx.battle().heal(mon, self.hp as u32)?;
        }
        Ok(())
    }
}
