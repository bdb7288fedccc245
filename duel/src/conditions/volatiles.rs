use anyhow::Result;
use duel_data::{
    MoveCategory,
    MoveFlag,
    Type,
};
use duel_prng::rand_util;

use crate::{
    battle::{
        DamageCause,
        MonHandle,
        calculate_damage,
    },
    common::Id,
    conditions::{
        chip,
        log_activate,
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

/// Sometimes prevents moving while the Mon's mate is the active foe.
#[derive(Debug, Default, Clone)]
pub struct Attract {
    mate: Option<MonHandle>,
}

impl Effect for Attract {
    fn source(&self) -> EffectSource {
        EffectSource::volatile("attract")
    }

    fn name(&self) -> &str {
        "Attract"
    }

    fn hooks(&self) -> &'static [(Hook, i32)] {
        &[(Hook::BeforeMove, 2)]
    }

    fn on_start(&mut self, ctx: &mut EffectContext) -> Result<HookOutcome> {
        self.mate = ctx.foe();
        Ok(self.mate.is_some().into())
    }

    fn on_before_move(
        &mut self,
        ctx: &mut EffectContext,
        _: &mut ActiveMove,
    ) -> Result<HookOutcome> {
        if ctx.foe() != self.mate {
            ctx.remove_self()?;
            return Ok(HookOutcome::Continue);
        }
        if rand_util::range(ctx.prng(), 0, 2) != 0 {
            log_cant(ctx, "attract")?;
            return Ok(HookOutcome::Fail);
        }
        Ok(HookOutcome::Continue)
    }
}

/// Locks the Mon into a single move.
#[derive(Debug, Clone)]
pub struct ChoiceLock {
    move_id: Id,
}

impl ChoiceLock {
    pub fn new(move_id: Id) -> Self {
        Self { move_id }
    }

    pub fn move_id(&self) -> &Id {
        &self.move_id
    }
}

impl Effect for ChoiceLock {
    fn source(&self) -> EffectSource {
        EffectSource::volatile("choicelock")
    }

    fn name(&self) -> &str {
        "Choice Lock"
    }

    fn hooks(&self) -> &'static [(Hook, i32)] {
        &[(Hook::GetMoveChoices, 0)]
    }

    fn on_get_move_choices(&mut self, ctx: &mut EffectContext, choices: &mut Vec<Id>) -> Result<()> {
        if ctx.mon()?.move_slot(&self.move_id).is_none() {
            ctx.remove_self()?;
            return Ok(());
        }
        choices.retain(|choice| *choice == self.move_id);
        Ok(())
    }
}

/// Makes the Mon hit itself half of the time, for one to four attempts.
#[derive(Debug, Default, Clone)]
pub struct Confusion {
    turns_left: u8,
}

impl Effect for Confusion {
    fn source(&self) -> EffectSource {
        EffectSource::volatile("confusion")
    }

    fn name(&self) -> &str {
        "Confusion"
    }

    fn hooks(&self) -> &'static [(Hook, i32)] {
        &[(Hook::BeforeMove, 3)]
    }

    fn on_start(&mut self, ctx: &mut EffectContext) -> Result<HookOutcome> {
        self.turns_left = rand_util::range(ctx.prng(), 1, 5) as u8;
        Ok(HookOutcome::Continue)
    }

    fn on_before_move(
        &mut self,
        ctx: &mut EffectContext,
        _: &mut ActiveMove,
    ) -> Result<HookOutcome> {
        if self.turns_left == 0 {
            ctx.remove_self()?;
            return Ok(HookOutcome::Continue);
        }
        self.turns_left -= 1;
        log_activate(ctx, "confusion")?;
        if rand_util::range(ctx.prng(), 0, 2) != 0 {
            return Ok(HookOutcome::Continue);
        }

        let mon = ctx.mon_handle()?;
        let mut self_hit = ActiveMove::confusion_self_hit();
        let damage = calculate_damage(ctx.battle(), mon, mon, &mut self_hit)?;
        if !damage.failed() {
            ctx.battle()
                .damage(mon, damage.amount() as u32, DamageCause::SelfHit)?;
        }
        Ok(HookOutcome::Fail)
    }
}

/// Takes the attacker down with the Mon if it faints before moving again.
#[derive(Debug, Default, Clone)]
pub struct DestinyBond;

impl Effect for DestinyBond {
    fn source(&self) -> EffectSource {
        EffectSource::volatile("destinybond")
    }

    fn name(&self) -> &str {
        "Destiny Bond"
    }

    fn hooks(&self) -> &'static [(Hook, i32)] {
        &[(Hook::BeforeMove, 100), (Hook::Faint, 0)]
    }

    fn on_before_move(
        &mut self,
        ctx: &mut EffectContext,
        _: &mut ActiveMove,
    ) -> Result<HookOutcome> {
        ctx.remove_self()?;
        Ok(HookOutcome::Continue)
    }

    fn on_faint(&mut self, ctx: &mut EffectContext, attacker: Option<MonHandle>) -> Result<()> {
        let Some(attacker) = attacker else {
            return Ok(());
        };
        if ctx.battle_ref().mon(attacker)?.fainted() {
            return Ok(());
        }
        log_activate(ctx, "destinybond")?;
        ctx.battle().faint_directly(attacker)
    }
}

/// Prevents the Mon from using the last move it used.
#[derive(Debug, Default, Clone)]
pub struct Disable {
    move_id: Option<Id>,
}

impl Disable {
    pub fn move_id(&self) -> Option<&Id> {
        self.move_id.as_ref()
    }
}

impl Effect for Disable {
    fn source(&self) -> EffectSource {
        EffectSource::volatile("disable")
    }

    fn name(&self) -> &str {
        "Disable"
    }

    fn hooks(&self) -> &'static [(Hook, i32)] {
        &[(Hook::GetMoveChoices, 0), (Hook::BeforeMove, 7)]
    }

    fn initial_duration(&self) -> Option<u8> {
        Some(4)
    }

    fn on_start(&mut self, ctx: &mut EffectContext) -> Result<HookOutcome> {
        let mon = ctx.mon()?;
        self.move_id = mon
            .last_move
            .clone()
            .filter(|last_move| mon.move_slot(last_move).is_some());
        Ok(self.move_id.is_some().into())
    }

    fn on_get_move_choices(&mut self, _: &mut EffectContext, choices: &mut Vec<Id>) -> Result<()> {
        if let Some(disabled) = &self.move_id {
            choices.retain(|choice| choice != disabled);
        }
        Ok(())
    }

    fn on_before_move(
        &mut self,
        ctx: &mut EffectContext,
        active_move: &mut ActiveMove,
    ) -> Result<HookOutcome> {
        if self.move_id.as_ref() == Some(&active_move.id) {
            log_cant(ctx, "disable")?;
            return Ok(HookOutcome::Fail);
        }
        Ok(HookOutcome::Continue)
    }
}

/// Prevents moving for the rest of the turn.
#[derive(Debug, Default, Clone)]
pub struct Flinch;

impl Effect for Flinch {
    fn source(&self) -> EffectSource {
        EffectSource::volatile("flinch")
    }

    fn name(&self) -> &str {
        "Flinch"
    }

    fn hooks(&self) -> &'static [(Hook, i32)] {
        &[(Hook::BeforeMove, 8)]
    }

    fn initial_duration(&self) -> Option<u8> {
        Some(1)
    }

    fn on_before_move(
        &mut self,
        ctx: &mut EffectContext,
        _: &mut ActiveMove,
    ) -> Result<HookOutcome> {
        log_cant(ctx, "flinch")?;
        Ok(HookOutcome::Fail)
    }
}

/// Drains 1/8 of the Mon's HP to the foe at the end of each turn.
#[derive(Debug, Default, Clone)]
pub struct LeechSeed;

impl Effect for LeechSeed {
    fn source(&self) -> EffectSource {
        EffectSource::volatile("leechseed")
    }

    fn name(&self) -> &str {
        "Leech Seed"
    }

    fn immune_types(&self) -> &'static [Type] {
        &[Type::Grass]
    }

    fn hooks(&self) -> &'static [(Hook, i32)] {
        &[(Hook::Residual, -8)]
    }

    fn on_residual(&mut self, ctx: &mut EffectContext) -> Result<()> {
        let Some(foe) = ctx
            .side_index()
            .and_then(|side| ctx.battle_ref().living_active_mon(1 - side))
        else {
            return Ok(());
        };
        let drained = chip(ctx, 8)?.amount();
        if drained > 0 {
            ctx.battle().heal(foe, drained as u32)?;
        }
        Ok(())
    }
}

/// Blocks protectable moves for the rest of the turn.
#[derive(Debug, Default, Clone)]
pub struct Protect;

impl Effect for Protect {
    fn source(&self) -> EffectSource {
        EffectSource::volatile("protect")
    }

    fn name(&self) -> &str {
        "Protect"
    }

    fn hooks(&self) -> &'static [(Hook, i32)] {
        &[(Hook::FoeTryHit, 3)]
    }

    fn initial_duration(&self) -> Option<u8> {
        Some(1)
    }

    fn on_foe_try_hit(
        &mut self,
        ctx: &mut EffectContext,
        active_move: &ActiveMove,
        _: MonHandle,
        _: MonHandle,
    ) -> Result<HookOutcome> {
        if !active_move.has_flag(MoveFlag::Protect) {
            return Ok(HookOutcome::Continue);
        }
        log_activate(ctx, "protect")?;
        Ok(HookOutcome::Fail)
    }
}

/// Prevents the Mon from using status moves.
#[derive(Debug, Default, Clone)]
pub struct Taunt;

impl Effect for Taunt {
    fn source(&self) -> EffectSource {
        EffectSource::volatile("taunt")
    }

    fn name(&self) -> &str {
        "Taunt"
    }

    fn hooks(&self) -> &'static [(Hook, i32)] {
        &[(Hook::GetMoveChoices, 0), (Hook::BeforeMove, 5)]
    }

    fn initial_duration(&self) -> Option<u8> {
        Some(3)
    }

    fn on_get_move_choices(&mut self, ctx: &mut EffectContext, choices: &mut Vec<Id>) -> Result<()> {
        let dex = ctx.battle_ref().dex();
        choices.retain(|choice| {
            dex.move_data(choice)
                .map_or(true, |data| data.category != MoveCategory::Status)
        });
        Ok(())
    }

    fn on_before_move(
        &mut self,
        ctx: &mut EffectContext,
        active_move: &mut ActiveMove,
    ) -> Result<HookOutcome> {
        if active_move.is_status() {
            log_cant(ctx, "taunt")?;
            return Ok(HookOutcome::Fail);
        }
        Ok(HookOutcome::Continue)
    }
}
