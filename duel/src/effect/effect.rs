use std::{
    any::Any,
    fmt::Debug,
};

use anyhow::Result;
use duel_data::{
    BoostTable,
    MoveFlag,
    Status,
    Type,
};

use crate::{
    battle::{
        DamageCause,
        DamageOutcome,
        MonHandle,
    },
    common::Id,
    effect::{
        EffectContext,
        EffectSource,
        Hook,
        HookOutcome,
    },
    moves::ActiveMove,
};

/// Something a Mon may be immune to.
#[derive(Debug, Clone, Copy)]
pub enum Immunity<'a> {
    /// An attacking type.
    Type(Type),
    /// A specific move.
    Move(&'a ActiveMove),
    Status(Status),
    /// A volatile condition, along with the types it can never affect.
    Volatile {
        id: &'a Id,
        immune_types: &'static [Type],
    },
    Weather(&'a Id),
    /// Moves with the given flag.
    Flag(MoveFlag),
}

/// Helper trait for cloning effects behind a box.
pub trait EffectClone {
    fn clone_box(&self) -> Box<dyn Effect>;
}

impl<E> EffectClone for E
where
    E: 'static + Effect + Clone,
{
    fn clone_box(&self) -> Box<dyn Effect> {
        Box::new(self.clone())
    }
}

/// Helper trait for converting an [`Effect`] to [`Any`].
pub trait EffectAsAny {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<E> EffectAsAny for E
where
    E: 'static,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// An attachable behavior.
///
/// Effects attach to a Mon, a side, or the field. Every hook has a no-op default, and an effect
/// only receives calls for the hooks it lists in [`Effect::hooks`]. Lifecycle hooks
/// ([`Hook::Start`], [`Hook::End`], [`Hook::Timeout`]) are always called.
///
/// Effects never hold references into the battle. Any state they need is stored on the effect
/// itself or looked up through the [`EffectContext`].
#[allow(unused_variables)]
pub trait Effect: EffectClone + EffectAsAny + Send + Sync + Debug {
    /// The slot this effect occupies on its host.
    fn source(&self) -> EffectSource;

    /// Name used in battle logs.
    fn name(&self) -> &str;

    /// Hooks implemented by this effect, with their priority.
    fn hooks(&self) -> &'static [(Hook, i32)] {
        &[]
    }

    /// The priority of the given hook, if the effect implements it.
    fn priority_of(&self, hook: Hook) -> Option<i32> {
        if hook.is_lifecycle() {
            return Some(0);
        }
        self.hooks()
            .iter()
            .find(|(candidate, _)| *candidate == hook)
            .map(|(_, priority)| *priority)
    }

    /// Number of turns the effect lasts for, if limited.
    fn initial_duration(&self) -> Option<u8> {
        None
    }

    /// Whether a non-forced removal is allowed.
    fn removable(&self) -> bool {
        true
    }

    /// Types that can never be given this effect.
    fn immune_types(&self) -> &'static [Type] {
        &[]
    }

    /// Adds a layer to a stacking effect.
    ///
    /// Returns whether a layer was added.
    fn add_layer(&mut self) -> bool {
        false
    }

    fn on_start(&mut self, ctx: &mut EffectContext) -> Result<HookOutcome> {
        Ok(HookOutcome::Continue)
    }

    fn on_end(&mut self, ctx: &mut EffectContext) -> Result<()> {
        Ok(())
    }

    fn on_timeout(&mut self, ctx: &mut EffectContext) -> Result<()> {
        Ok(())
    }

    fn on_get_move_choices(&mut self, ctx: &mut EffectContext, choices: &mut Vec<Id>) -> Result<()> {
        Ok(())
    }

    fn on_before_turn(&mut self, ctx: &mut EffectContext) -> Result<()> {
        Ok(())
    }

    fn on_before_move(
        &mut self,
        ctx: &mut EffectContext,
        active_move: &mut ActiveMove,
    ) -> Result<HookOutcome> {
        Ok(HookOutcome::Continue)
    }

    fn on_modify_move(
        &mut self,
        ctx: &mut EffectContext,
        active_move: &mut ActiveMove,
        target: Option<MonHandle>,
    ) -> Result<()> {
        Ok(())
    }

    fn on_modify_foe_move(
        &mut self,
        ctx: &mut EffectContext,
        active_move: &mut ActiveMove,
        user: MonHandle,
    ) -> Result<()> {
        Ok(())
    }

    fn on_try_hit(
        &mut self,
        ctx: &mut EffectContext,
        active_move: &ActiveMove,
        user: MonHandle,
        target: MonHandle,
    ) -> Result<HookOutcome> {
        Ok(HookOutcome::Continue)
    }

    fn on_foe_try_hit(
        &mut self,
        ctx: &mut EffectContext,
        active_move: &ActiveMove,
        user: MonHandle,
        target: MonHandle,
    ) -> Result<HookOutcome> {
        Ok(HookOutcome::Continue)
    }

    fn on_move_hit(
        &mut self,
        ctx: &mut EffectContext,
        active_move: &ActiveMove,
        target: MonHandle,
    ) -> Result<()> {
        Ok(())
    }

    fn on_move_success(
        &mut self,
        ctx: &mut EffectContext,
        active_move: &ActiveMove,
        target: Option<MonHandle>,
    ) -> Result<()> {
        Ok(())
    }

    fn on_after_foe_hit(
        &mut self,
        ctx: &mut EffectContext,
        active_move: &ActiveMove,
        user: MonHandle,
        damage: u16,
    ) -> Result<()> {
        Ok(())
    }

    fn on_after_move_secondary(
        &mut self,
        ctx: &mut EffectContext,
        active_move: &ActiveMove,
        target: MonHandle,
        damage: u16,
    ) -> Result<()> {
        Ok(())
    }

    /// Results are not rounded between handlers.
    fn on_modify_base_power(
        &mut self,
        ctx: &mut EffectContext,
        active_move: &ActiveMove,
        user: MonHandle,
        target: MonHandle,
        base_power: f64,
    ) -> Result<f64> {
        Ok(base_power)
    }

    fn on_faint(&mut self, ctx: &mut EffectContext, attacker: Option<MonHandle>) -> Result<()> {
        Ok(())
    }

    fn on_foe_faint(&mut self, ctx: &mut EffectContext, fainted: MonHandle) -> Result<()> {
        Ok(())
    }

    /// `None` skips the accuracy check.
    fn on_accuracy(
        &mut self,
        ctx: &mut EffectContext,
        active_move: &ActiveMove,
        target: MonHandle,
        accuracy: Option<f64>,
    ) -> Result<Option<f64>> {
        Ok(accuracy)
    }

    /// `None` skips the accuracy check.
    fn on_foe_accuracy(
        &mut self,
        ctx: &mut EffectContext,
        active_move: &ActiveMove,
        user: MonHandle,
        accuracy: Option<f64>,
    ) -> Result<Option<f64>> {
        Ok(accuracy)
    }

    fn on_modify_effectiveness(
        &mut self,
        ctx: &mut EffectContext,
        active_move: &ActiveMove,
        target: MonHandle,
        effectiveness: f64,
    ) -> Result<f64> {
        Ok(effectiveness)
    }

    fn on_modify_atk(
        &mut self,
        ctx: &mut EffectContext,
        mon: MonHandle,
        active_move: &ActiveMove,
        atk: f64,
    ) -> Result<f64> {
        Ok(atk)
    }

    fn on_modify_def(
        &mut self,
        ctx: &mut EffectContext,
        mon: MonHandle,
        active_move: &ActiveMove,
        def: f64,
    ) -> Result<f64> {
        Ok(def)
    }

    fn on_modify_spa(
        &mut self,
        ctx: &mut EffectContext,
        mon: MonHandle,
        active_move: &ActiveMove,
        spa: f64,
    ) -> Result<f64> {
        Ok(spa)
    }

    fn on_modify_spd(
        &mut self,
        ctx: &mut EffectContext,
        mon: MonHandle,
        active_move: &ActiveMove,
        spd: f64,
    ) -> Result<f64> {
        Ok(spd)
    }

    fn on_modify_spe(&mut self, ctx: &mut EffectContext, mon: MonHandle, spe: f64) -> Result<f64> {
        Ok(spe)
    }

    /// `mon` is the Mon that just switched in.
    fn on_switch_in(&mut self, ctx: &mut EffectContext, mon: MonHandle) -> Result<()> {
        Ok(())
    }

    fn on_switch_out(&mut self, ctx: &mut EffectContext) -> Result<()> {
        Ok(())
    }

    /// Returns whether the Mon is trapped.
    fn on_trap_check(&mut self, ctx: &mut EffectContext) -> Result<bool> {
        Ok(false)
    }

    fn on_residual(&mut self, ctx: &mut EffectContext) -> Result<()> {
        Ok(())
    }

    fn on_modify_damage(
        &mut self,
        ctx: &mut EffectContext,
        active_move: &ActiveMove,
        user: MonHandle,
        target: MonHandle,
        effectiveness: f64,
        damage: f64,
    ) -> Result<f64> {
        Ok(damage)
    }

    fn on_modify_foe_damage(
        &mut self,
        ctx: &mut EffectContext,
        active_move: &ActiveMove,
        user: MonHandle,
        target: MonHandle,
        crit: bool,
        effectiveness: f64,
        damage: f64,
    ) -> Result<f64> {
        Ok(damage)
    }

    fn on_weather_modify_damage(
        &mut self,
        ctx: &mut EffectContext,
        active_move: &ActiveMove,
        damage: f64,
    ) -> Result<f64> {
        Ok(damage)
    }

    /// `Some(true)` grants immunity, `Some(false)` removes it and `None` defers.
    fn on_get_immunity(
        &mut self,
        ctx: &mut EffectContext,
        immunity: Immunity<'_>,
    ) -> Result<Option<bool>> {
        Ok(None)
    }

    fn on_damage(
        &mut self,
        ctx: &mut EffectContext,
        damage: u16,
        cause: &DamageCause,
    ) -> Result<DamageOutcome> {
        Ok(DamageOutcome::Damage(damage))
    }

    fn on_after_damage(
        &mut self,
        ctx: &mut EffectContext,
        damage: u16,
        cause: &DamageCause,
    ) -> Result<()> {
        Ok(())
    }

    fn on_foe_heal(
        &mut self,
        ctx: &mut EffectContext,
        healed: MonHandle,
        amount: u16,
    ) -> Result<HookOutcome> {
        Ok(HookOutcome::Continue)
    }

    fn on_set_status(
        &mut self,
        ctx: &mut EffectContext,
        status: Status,
        target: MonHandle,
        setter: Option<MonHandle>,
    ) -> Result<HookOutcome> {
        Ok(HookOutcome::Continue)
    }

    fn on_after_set_status(
        &mut self,
        ctx: &mut EffectContext,
        status: Status,
        setter: Option<MonHandle>,
    ) -> Result<()> {
        Ok(())
    }

    fn on_boost(
        &mut self,
        ctx: &mut EffectContext,
        boosts: &mut BoostTable,
        self_induced: bool,
    ) -> Result<()> {
        Ok(())
    }

    /// Called on each active Mon by the weather's residual.
    fn on_weather(&mut self, ctx: &mut EffectContext, weather: &Id) -> Result<()> {
        Ok(())
    }

    fn on_modify_priority(
        &mut self,
        ctx: &mut EffectContext,
        active_move: &ActiveMove,
        priority: i8,
    ) -> Result<i8> {
        Ok(priority)
    }

    fn on_update(&mut self, ctx: &mut EffectContext) -> Result<()> {
        Ok(())
    }

    /// Returns whether the target's ability should be ignored for the rest of the move.
    fn on_break_mold(&mut self, ctx: &mut EffectContext, target: MonHandle) -> Result<bool> {
        Ok(false)
    }

    fn on_modify_crit(
        &mut self,
        ctx: &mut EffectContext,
        active_move: &ActiveMove,
        user: MonHandle,
        crit: bool,
    ) -> Result<bool> {
        Ok(crit)
    }
}

impl Clone for Box<dyn Effect> {
    fn clone(&self) -> Self {
        self.as_ref().clone_box()
    }
}
