use anyhow::Result;
use duel_data::{
    BoostTable,
    Type,
};

use crate::{
    abilities::ability_identity,
    battle::MonHandle,
    conditions::log_activate,
    effect::{
        Effect,
        EffectContext,
        Hook,
        HookOutcome,
    },
    moves::ActiveMove,
};

/// Abilities that mold breakers ignore.
const MOLDS: &[&str] = &[
    "aromaveil",
    "battlearmor",
    "bigpecks",
    "bulletproof",
    "clearbody",
    "contrary",
    "damp",
    "dryskin",
    "filter",
    "flashfire",
    "flowergift",
    "flowerveil",
    "friendguard",
    "furcoat",
    "heatproof",
    "heavymetal",
    "hypercutter",
    "immunity",
    "innerfocus",
    "insomnia",
    "keeneye",
    "leafguard",
    "levitate",
    "lightmetal",
    "lightningrod",
    "limber",
    "magicbounce",
    "magmaarmor",
    "marvelscale",
    "motordrive",
    "multiscale",
    "oblivious",
    "overcoat",
    "owntempo",
    "sandveil",
    "sapsipper",
    "shellarmor",
    "shielddust",
    "simple",
    "snowcloak",
    "solidrock",
    "soundproof",
    "stickyhold",
    "stormdrain",
    "sturdy",
    "suctioncups",
    "sweetveil",
    "tangledfeet",
    "telepathy",
    "thickfat",
    "unaware",
    "vitalspirit",
    "voltabsorb",
    "waterabsorb",
    "waterveil",
    "whitesmoke",
    "wonderguard",
    "wonderskin",
];

/// Doubles the same-type bonus.
#[derive(Debug, Default, Clone)]
pub struct Adaptability;

impl Effect for Adaptability {
    ability_identity!("Adaptability");

    fn hooks(&self) -> &'static [(Hook, i32)] {
        &[(Hook::ModifyMove, 0)]
    }

    fn on_modify_move(
        &mut self,
        _: &mut EffectContext,
        active_move: &mut ActiveMove,
        _: Option<MonHandle>,
    ) -> Result<()> {
        active_move.stab_multiplier = 2.0;
        Ok(())
    }
}

/// Flying moves gain priority.
#[derive(Debug, Default, Clone)]
pub struct GaleWings;

impl Effect for GaleWings {
    ability_identity!("Gale Wings");

    fn hooks(&self) -> &'static [(Hook, i32)] {
        &[(Hook::ModifyPriority, 0)]
    }

    fn on_modify_priority(
        &mut self,
        _: &mut EffectContext,
        active_move: &ActiveMove,
        priority: i8,
    ) -> Result<i8> {
        if active_move.move_type() == Type::Flying {
            return Ok(priority + 1);
        }
        Ok(priority)
    }
}

/// Boosts attack while statused. Burn no longer halves physical damage.
#[derive(Debug, Default, Clone)]
pub struct Guts;

impl Effect for Guts {
    ability_identity!("Guts");

    fn hooks(&self) -> &'static [(Hook, i32)] {
        &[(Hook::ModifyAtk, 0)]
    }

    fn on_modify_atk(
        &mut self,
        ctx: &mut EffectContext,
        _: MonHandle,
        _: &ActiveMove,
        atk: f64,
    ) -> Result<f64> {
        if ctx.mon()?.status.is_some() {
            return Ok(atk * 1.5);
        }
        Ok(atk)
    }
}

/// Doubles attack.
#[derive(Debug, Default, Clone)]
pub struct HugePower;

impl Effect for HugePower {
    ability_identity!("Huge Power");

    fn hooks(&self) -> &'static [(Hook, i32)] {
        &[(Hook::ModifyAtk, 0)]
    }

    fn on_modify_atk(
        &mut self,
        _: &mut EffectContext,
        _: MonHandle,
        _: &ActiveMove,
        atk: f64,
    ) -> Result<f64> {
        Ok(atk * 2.0)
    }
}

/// Lowers the foe's attack on entry.
#[derive(Debug, Default, Clone)]
pub struct Intimidate;

impl Effect for Intimidate {
    ability_identity!("Intimidate");

    fn on_start(&mut self, ctx: &mut EffectContext) -> Result<HookOutcome> {
        let mon = ctx.mon_handle()?;
        if let Some(foe) = ctx.battle_ref().living_active_mon(1 - mon.side) {
            log_activate(ctx, "intimidate")?;
            ctx.battle().apply_boosts(
                foe,
                BoostTable {
                    atk: -1,
                    ..Default::default()
                },
                Some(mon),
            )?;
        }
        Ok(HookOutcome::Continue)
    }
}

/// Moves ignore the target's ability when it would get in the way.
#[derive(Debug, Default, Clone)]
pub struct MoldBreaker;

impl Effect for MoldBreaker {
    ability_identity!("Mold Breaker");

    fn hooks(&self) -> &'static [(Hook, i32)] {
        &[(Hook::BreakMold, 0)]
    }

    fn on_break_mold(&mut self, ctx: &mut EffectContext, target: MonHandle) -> Result<bool> {
        let ability = &ctx.battle_ref().mon(target)?.ability;
        Ok(MOLDS.contains(&ability.as_str()))
    }
}

/// Moves used by or against the holder always hit.
#[derive(Debug, Default, Clone)]
pub struct NoGuard;

impl Effect for NoGuard {
    ability_identity!("No Guard");

    fn hooks(&self) -> &'static [(Hook, i32)] {
        &[(Hook::Accuracy, 0), (Hook::FoeAccuracy, 0)]
    }

    fn on_accuracy(
        &mut self,
        _: &mut EffectContext,
        _: &ActiveMove,
        _: MonHandle,
        _: Option<f64>,
    ) -> Result<Option<f64>> {
        Ok(None)
    }

    fn on_foe_accuracy(
        &mut self,
        _: &mut EffectContext,
        _: &ActiveMove,
        _: MonHandle,
        _: Option<f64>,
    ) -> Result<Option<f64>> {
        Ok(None)
    }
}

/// Boosts speed while statused. Paralysis no longer slows the holder.
#[derive(Debug, Default, Clone)]
pub struct QuickFeet;

impl Effect for QuickFeet {
    ability_identity!("Quick Feet");

    fn hooks(&self) -> &'static [(Hook, i32)] {
        &[(Hook::ModifySpe, 0)]
    }

    fn on_modify_spe(&mut self, ctx: &mut EffectContext, _: MonHandle, spe: f64) -> Result<f64> {
        if ctx.mon()?.status.is_some() {
            return Ok(spe * 1.5);
        }
        Ok(spe)
    }
}

/// Trades a move's secondary effects for power.
#[derive(Debug, Default, Clone)]
pub struct SheerForce;

impl Effect for SheerForce {
    ability_identity!("Sheer Force");

    fn hooks(&self) -> &'static [(Hook, i32)] {
        &[(Hook::ModifyMove, 0), (Hook::ModifyBasePower, 0)]
    }

    fn on_modify_move(
        &mut self,
        _: &mut EffectContext,
        active_move: &mut ActiveMove,
        _: Option<MonHandle>,
    ) -> Result<()> {
        if active_move.has_secondary_effects() {
            active_move.data.secondary_effects.clear();
            active_move.secondaries_suppressed = true;
        }
        Ok(())
    }

    fn on_modify_base_power(
        &mut self,
        _: &mut EffectContext,
        active_move: &ActiveMove,
        _: MonHandle,
        _: MonHandle,
        base_power: f64,
    ) -> Result<f64> {
        if active_move.secondaries_suppressed {
            return Ok(base_power * 1.3);
        }
        Ok(base_power)
    }
}

/// Multi-hit moves always hit the maximum number of times.
#[derive(Debug, Default, Clone)]
pub struct SkillLink;

impl Effect for SkillLink {
    ability_identity!("Skill Link");

    fn hooks(&self) -> &'static [(Hook, i32)] {
        &[(Hook::ModifyMove, 0)]
    }

    fn on_modify_move(
        &mut self,
        _: &mut EffectContext,
        active_move: &mut ActiveMove,
        _: Option<MonHandle>,
    ) -> Result<()> {
        if let Some(most) = active_move.data.multihit.iter().max().copied() {
            active_move.data.multihit = Vec::from([most]);
        }
        Ok(())
    }
}

/// Boosts weak moves.
#[derive(Debug, Default, Clone)]
pub struct Technician;

impl Effect for Technician {
    ability_identity!("Technician");

    fn hooks(&self) -> &'static [(Hook, i32)] {
        &[(Hook::ModifyBasePower, 0)]
    }

    fn on_modify_base_power(
        &mut self,
        _: &mut EffectContext,
        active_move: &ActiveMove,
        _: MonHandle,
        _: MonHandle,
        base_power: f64,
    ) -> Result<f64> {
        if active_move.data.base_power <= 60 {
            return Ok(base_power * 1.5);
        }
        Ok(base_power)
    }
}
