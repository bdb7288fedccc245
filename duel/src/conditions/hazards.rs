use anyhow::Result;
use duel_data::{
    Status,
    Type,
};

use crate::{
    battle::{
        DamageCause,
        MonHandle,
    },
    effect::{
        Effect,
        EffectContext,
        EffectSource,
        Hook,
        Immunity,
    },
};

fn grounded(ctx: &mut EffectContext, mon: MonHandle) -> Result<bool> {
    Ok(!ctx.battle().is_immune(mon, Immunity::Type(Type::Ground))?)
}

fn hazard_damage(ctx: &mut EffectContext, mon: MonHandle, amount: u32) -> Result<()> {
    let cause = DamageCause::Effect(ctx.source().clone());
    ctx.battle().damage(mon, amount, cause)?;
    Ok(())
}

/// Damages grounded Mons switching in, more with each layer.
#[derive(Debug, Clone)]
pub struct Spikes {
    layers: u8,
}

impl Default for Spikes {
    fn default() -> Self {
        Self { layers: 1 }
    }
}

impl Spikes {
    pub const MAX_LAYERS: u8 = 3;

    pub fn layers(&self) -> u8 {
        self.layers
    }
}

impl Effect for Spikes {
    fn source(&self) -> EffectSource {
        EffectSource::hazard("spikes")
    }

    fn name(&self) -> &str {
        "Spikes"
    }

    fn hooks(&self) -> &'static [(Hook, i32)] {
        &[(Hook::SwitchIn, 0)]
    }

    fn add_layer(&mut self) -> bool {
        if self.layers >= Self::MAX_LAYERS {
            return false;
        }
        self.layers += 1;
        true
    }

    fn on_switch_in(&mut self, ctx: &mut EffectContext, mon: MonHandle) -> Result<()> {
        if !grounded(ctx, mon)? {
            return Ok(());
        }
        let divisor = match self.layers {
            1 => 8,
            2 => 6,
            _ => 4,
        };
        let max_hp = ctx.battle_ref().mon(mon)?.max_hp as u32;
        hazard_damage(ctx, mon, (max_hp / divisor).max(1))
    }
}

/// Damages Mons switching in according to their weakness to Rock.
#[derive(Debug, Default, Clone)]
pub struct StealthRock;

impl Effect for StealthRock {
    fn source(&self) -> EffectSource {
        EffectSource::hazard("stealthrock")
    }

    fn name(&self) -> &str {
        "Stealth Rock"
    }

    fn hooks(&self) -> &'static [(Hook, i32)] {
        &[(Hook::SwitchIn, 0)]
    }

    fn on_switch_in(&mut self, ctx: &mut EffectContext, mon: MonHandle) -> Result<()> {
        let battle = ctx.battle_ref();
        let target = battle.mon(mon)?;
        let effectiveness = battle.type_chart().multiplier(Type::Rock, &target.types);
        let amount = ((target.max_hp as f64 * effectiveness / 8.0) as u32).max(1);
        hazard_damage(ctx, mon, amount)
    }
}

/// Poisons grounded Mons switching in, badly with two layers.
///
/// A grounded Poison type absorbs the spikes.
#[derive(Debug, Clone)]
pub struct ToxicSpikes {
    layers: u8,
}

impl Default for ToxicSpikes {
    fn default() -> Self {
        Self { layers: 1 }
    }
}

impl ToxicSpikes {
    pub const MAX_LAYERS: u8 = 2;

    pub fn layers(&self) -> u8 {
        self.layers
    }
}

impl Effect for ToxicSpikes {
    fn source(&self) -> EffectSource {
        EffectSource::hazard("toxicspikes")
    }

    fn name(&self) -> &str {
        "Toxic Spikes"
    }

    fn hooks(&self) -> &'static [(Hook, i32)] {
        &[(Hook::SwitchIn, 0)]
    }

    fn add_layer(&mut self) -> bool {
        if self.layers >= Self::MAX_LAYERS {
            return false;
        }
        self.layers += 1;
        true
    }

    fn on_switch_in(&mut self, ctx: &mut EffectContext, mon: MonHandle) -> Result<()> {
        if !grounded(ctx, mon)? {
            return Ok(());
        }
        if ctx.battle_ref().mon(mon)?.has_type(Type::Poison) {
            ctx.remove_self()?;
            return Ok(());
        }
        let status = if self.layers == 1 {
            Status::Poison
        } else {
            Status::Toxic
        };
        ctx.battle().set_status(mon, status, None)?;
        Ok(())
    }
}
