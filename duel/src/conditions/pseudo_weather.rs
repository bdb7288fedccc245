use anyhow::Result;
use duel_data::{
    Status,
    Type,
};

use crate::{
    battle::MonHandle,
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

/// Slower Mons move first.
#[derive(Debug, Default, Clone)]
pub struct TrickRoom;

impl Effect for TrickRoom {
    fn source(&self) -> EffectSource {
        EffectSource::pseudo_weather("trickroom")
    }

    fn name(&self) -> &str {
        "Trick Room"
    }

    fn hooks(&self) -> &'static [(Hook, i32)] {
        // Runs after every other speed modifier.
        &[(Hook::ModifySpe, -100)]
    }

    fn initial_duration(&self) -> Option<u8> {
        Some(5)
    }

    fn on_modify_spe(&mut self, _: &mut EffectContext, _: MonHandle, spe: f64) -> Result<f64> {
        Ok(-spe)
    }
}

/// Powers up Electric moves of grounded Mons and keeps grounded Mons awake.
#[derive(Debug, Default, Clone)]
pub struct ElectricTerrain;

impl Effect for ElectricTerrain {
    fn source(&self) -> EffectSource {
        EffectSource::pseudo_weather("electricterrain")
    }

    fn name(&self) -> &str {
        "Electric Terrain"
    }

    fn hooks(&self) -> &'static [(Hook, i32)] {
        &[(Hook::ModifyBasePower, 0), (Hook::SetStatus, 0)]
    }

    fn initial_duration(&self) -> Option<u8> {
        Some(5)
    }

    fn on_modify_base_power(
        &mut self,
        ctx: &mut EffectContext,
        active_move: &ActiveMove,
        user: MonHandle,
        _: MonHandle,
        base_power: f64,
    ) -> Result<f64> {
        if active_move.move_type() == Type::Electric
            && !ctx.battle().is_immune(user, Immunity::Type(Type::Ground))?
        {
            return Ok(base_power * 1.5);
        }
        Ok(base_power)
    }

    fn on_set_status(
        &mut self,
        ctx: &mut EffectContext,
        status: Status,
        target: MonHandle,
        _: Option<MonHandle>,
    ) -> Result<HookOutcome> {
        if status == Status::Sleep && !ctx.battle().is_immune(target, Immunity::Type(Type::Ground))? {
            return Ok(HookOutcome::Fail);
        }
        Ok(HookOutcome::Continue)
    }
}
