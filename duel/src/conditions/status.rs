use anyhow::Result;
use duel_data::{
    MoveCategory,
    Status,
    Type,
};
use duel_prng::rand_util;

use crate::{
    battle::{
        DamageCause,
        MonHandle,
    },
    conditions::{
        chip,
        log_cant,
    },
    effect::{
        Effect,
        EffectContext,
        EffectSource,
        Hook,
        HookOutcome,
    },
    moves::ActiveMove,
};

/// Halves physical damage and chips 1/8 HP at the end of each turn.
#[derive(Debug, Default, Clone)]
pub struct Burn;

impl Effect for Burn {
    fn source(&self) -> EffectSource {
        EffectSource::Status(Status::Burn)
    }

    fn name(&self) -> &str {
        "Burn"
    }

    fn hooks(&self) -> &'static [(Hook, i32)] {
        &[(Hook::ModifyDamage, 0), (Hook::Residual, -9)]
    }

    fn on_modify_damage(
        &mut self,
        ctx: &mut EffectContext,
        active_move: &ActiveMove,
        _: MonHandle,
        _: MonHandle,
        _: f64,
        damage: f64,
    ) -> Result<f64> {
        if active_move.category() == MoveCategory::Physical && ctx.mon()?.ability.as_str() != "guts"
        {
            return Ok(damage * 0.5);
        }
        Ok(damage)
    }

    fn on_residual(&mut self, ctx: &mut EffectContext) -> Result<()> {
        chip(ctx, 8)?;
        Ok(())
    }
}

/// Prevents moving until thawed.
#[derive(Debug, Default, Clone)]
pub struct Freeze;

impl Effect for Freeze {
    fn source(&self) -> EffectSource {
        EffectSource::Status(Status::Freeze)
    }

    fn name(&self) -> &str {
        "Freeze"
    }

    fn hooks(&self) -> &'static [(Hook, i32)] {
        &[(Hook::BeforeMove, 10), (Hook::AfterFoeHit, 0)]
    }

    fn on_before_move(
        &mut self,
        ctx: &mut EffectContext,
        _: &mut ActiveMove,
    ) -> Result<HookOutcome> {
        if rand_util::range(ctx.prng(), 0, 5) == 0 {
            let mon = ctx.mon_handle()?;
            ctx.battle().cure_status(mon)?;
            return Ok(HookOutcome::Continue);
        }
        log_cant(ctx, "frz")?;
        Ok(HookOutcome::Fail)
    }

    fn on_after_foe_hit(
        &mut self,
        ctx: &mut EffectContext,
        active_move: &ActiveMove,
        _: MonHandle,
        _: u16,
    ) -> Result<()> {
        if active_move.move_type() == Type::Fire {
            let mon = ctx.mon_handle()?;
            ctx.battle().cure_status(mon)?;
        }
        Ok(())
    }
}

/// Halves speed and sometimes prevents moving.
#[derive(Debug, Default, Clone)]
pub struct Paralysis;

impl Effect for Paralysis {
    fn source(&self) -> EffectSource {
        EffectSource::Status(Status::Paralysis)
    }

    fn name(&self) -> &str {
        "Paralysis"
    }

    fn hooks(&self) -> &'static [(Hook, i32)] {
        &[(Hook::ModifySpe, 0), (Hook::BeforeMove, 1)]
    }

    fn on_modify_spe(&mut self, ctx: &mut EffectContext, _: MonHandle, spe: f64) -> Result<f64> {
        if ctx.mon()?.ability.as_str() == "quickfeet" {
            return Ok(spe);
        }
        Ok(spe * 0.5)
    }

    fn on_before_move(
        &mut self,
        ctx: &mut EffectContext,
        _: &mut ActiveMove,
    ) -> Result<HookOutcome> {
        if rand_util::range(ctx.prng(), 0, 4) == 0 {
            log_cant(ctx, "par")?;
            return Ok(HookOutcome::Fail);
        }
        Ok(HookOutcome::Continue)
    }
}

/// Chips 1/8 HP at the end of each turn.
#[derive(Debug, Default, Clone)]
pub struct Poison;

impl Effect for Poison {
    fn source(&self) -> EffectSource {
        EffectSource::Status(Status::Poison)
    }

    fn name(&self) -> &str {
        "Poison"
    }

    fn hooks(&self) -> &'static [(Hook, i32)] {
        &[(Hook::Residual, -9)]
    }

    fn on_residual(&mut self, ctx: &mut EffectContext) -> Result<()> {
        chip(ctx, 8)?;
        Ok(())
    }
}

/// Prevents moving for up to three attempts.
///
/// The Mon always sleeps through the first attempt, and wakes after the first, second, or third
/// slept turn with growing likelihood. The counter survives switching out.
#[derive(Debug, Default, Clone)]
pub struct Sleep {
    turns_slept: u8,
}

impl Sleep {
    pub fn turns_slept(&self) -> u8 {
        self.turns_slept
    }
}

impl Effect for Sleep {
    fn source(&self) -> EffectSource {
        EffectSource::Status(Status::Sleep)
    }

    fn name(&self) -> &str {
        "Sleep"
    }

    fn hooks(&self) -> &'static [(Hook, i32)] {
        &[(Hook::BeforeMove, 10)]
    }

    fn on_before_move(
        &mut self,
        ctx: &mut EffectContext,
        _: &mut ActiveMove,
    ) -> Result<HookOutcome> {
        let wake = match self.turns_slept {
            0 => false,
            1 => rand_util::range(ctx.prng(), 0, 3) == 0,
            2 => rand_util::range(ctx.prng(), 0, 2) == 0,
            _ => true,
        };
        if wake {
            let mon = ctx.mon_handle()?;
            ctx.battle().cure_status(mon)?;
            return Ok(HookOutcome::Continue);
        }
        self.turns_slept += 1;
        log_cant(ctx, "slp")?;
        Ok(HookOutcome::Fail)
    }
}

/// Chips an increasing fraction of HP at the end of each turn.
///
/// The counter resets when the Mon switches out.
#[derive(Debug, Default, Clone)]
pub struct Toxic {
    stage: u16,
}

impl Toxic {
    pub fn stage(&self) -> u16 {
        self.stage
    }
}

impl Effect for Toxic {
    fn source(&self) -> EffectSource {
        EffectSource::Status(Status::Toxic)
    }

    fn name(&self) -> &str {
        "Toxic"
    }

    fn hooks(&self) -> &'static [(Hook, i32)] {
        &[(Hook::SwitchOut, 0), (Hook::Residual, -9)]
    }

    fn on_switch_out(&mut self, _: &mut EffectContext) -> Result<()> {
        self.stage = 0;
        Ok(())
    }

    fn on_residual(&mut self, ctx: &mut EffectContext) -> Result<()> {
        self.stage += 1;
        let mon = ctx.mon_handle()?;
        let amount = ((ctx.mon()?.max_hp / 16) * self.stage).max(1);
        let cause = DamageCause::Effect(ctx.source().clone());
        ctx.battle().damage(mon, amount as u32, cause)?;
        Ok(())
    }
}
