use anyhow::Result;
use duel_data::{
    HitEffect,
    MoveFlag,
    Status,
};
use duel_prng::rand_util;
use log::debug;

use crate::{
    battle::{
        Battle,
        DamageCause,
        DamageOutcome,
        HostId,
        MonHandle,
        MoveOutcome,
        calculations::apply_accuracy_boosts,
        damage::calculate_damage,
    },
    battle_event,
    common::Id,
    effect::{
        Hook,
        HookOutcome,
    },
    moves::{
        ActiveMove,
        move_behavior,
    },
};

const STRUGGLE: Id = Id::from_known("struggle");

impl Battle {
    /// Moves the Mon may currently choose.
    ///
    /// Falls back to Struggle when nothing else is usable.
    pub fn move_choices(&mut self, mon: MonHandle) -> Result<Vec<Id>> {
        let mut choices = self.mon(mon)?.usable_moves();
        self.activate_effect(&[HostId::Mon(mon)], Hook::GetMoveChoices, false, |effect, context| {
            effect
                .on_get_move_choices(context, &mut choices)
                .map(|_| HookOutcome::Continue)
        })?;
        if choices.is_empty() {
            choices.push(STRUGGLE);
        }
        Ok(choices)
    }

    /// Runs a move action for a Mon.
    ///
    /// The choice is re-validated against the Mon's current state, and before-move effects may
    /// stop the Mon from moving at all.
    pub(crate) fn run_move_action(&mut self, user: MonHandle, move_id: &Id) -> Result<MoveOutcome> {
        let mon = self.mon(user)?;
        if mon.fainted() || !mon.active {
            return Ok(MoveOutcome::Failed);
        }
        let choices = self.move_choices(user)?;
        let mut move_id = move_id.clone();
        if !choices.contains(&move_id) {
            if self.mon(user)?.move_slot(&move_id).is_some() {
                let event = battle_event!("cant", self.mon(user)?.log_id(), format!("move:{move_id}"));
                self.log(event);
                return Ok(MoveOutcome::Failed);
            }
            self.invariant_violation(format!(
                "{} does not know move {move_id}",
                self.mon(user)?.name
            ));
            move_id = choices.first().cloned().unwrap_or(STRUGGLE);
        }

        let mut active_move = self.active_move(&move_id)?;
        if self
            .activate_effect(&[HostId::Mon(user)], Hook::BeforeMove, true, |effect, context| {
                effect.on_before_move(context, &mut active_move)
            })?
            .failed()
        {
            return Ok(MoveOutcome::Failed);
        }
        if let Some(slot) = self.mon_mut(user)?.move_slot_mut(&move_id) {
            slot.pp = slot.pp.saturating_sub(1);
        }
        let outcome = self.use_move(user, active_move)?;
        self.mon_mut(user)?.last_move = Some(move_id);
        Ok(outcome)
    }

    /// Uses a move, without any before-move checks.
    pub fn use_move(&mut self, user: MonHandle, mut active_move: ActiveMove) -> Result<MoveOutcome> {
        let event = battle_event!(
            "move",
            self.mon(user)?.log_id(),
            format!("name:{}", active_move.name())
        );
        self.log(event);

        let target = if active_move.targets_foe() {
            self.foe_of(user)
        } else {
            None
        };
        if let Some(target) = target {
            let broken = self.accumulate_effect(
                &[HostId::Mon(user)],
                Hook::BreakMold,
                false,
                |effect, context, broken| Ok(effect.on_break_mold(context, target)? || broken),
            )?;
            if broken {
                debug!("mold broken for {}", self.mon(target)?.name);
                self.mold_broken = Some(target);
            }
        }
        let outcome = self.use_move_internal(user, target, &mut active_move);
        self.mold_broken = None;
        outcome
    }

    fn use_move_internal(
        &mut self,
        user: MonHandle,
        target: Option<MonHandle>,
        active_move: &mut ActiveMove,
    ) -> Result<MoveOutcome> {
        let behavior = move_behavior(&active_move.id);
        if let Some(behavior) = behavior {
            behavior.on_modify_move(self, user, active_move)?;
        }
        self.activate_effect(&[HostId::Mon(user)], Hook::ModifyMove, false, |effect, context| {
            effect
                .on_modify_move(context, active_move, target)
                .map(|_| HookOutcome::Continue)
        })?;
        if let Some(target) = target {
            self.activate_effect(&[HostId::Mon(target)], Hook::ModifyFoeMove, false, |effect, context| {
                effect
                    .on_modify_foe_move(context, active_move, user)
                    .map(|_| HookOutcome::Continue)
            })?;
        }

        if !active_move.targets_foe() {
            return self.use_self_move(user, active_move);
        }

        let target = match target {
            Some(target) if !self.mon(target)?.fainted() => target,
            _ => {
                self.log_fail(user)?;
                if active_move.data.self_destruct {
                    self.faint_directly(user)?;
                }
                return Ok(MoveOutcome::Failed);
            }
        };

        let outcome = self.try_move_hit(user, target, active_move)?;

        if let Some(recoil) = active_move.data.recoil_percent {
            if active_move.total_damage > 0 {
                let recoil = (active_move.total_damage as f64 * recoil as f64 / 100.0).round() as u32;
                self.damage(user, recoil.max(1), DamageCause::Recoil)?;
            }
        }
        if active_move.data.self_destruct {
            self.faint_directly(user)?;
        }
        if let Some(behavior) = behavior {
            behavior.after_hits(self, user, active_move)?;
        }
        if outcome == MoveOutcome::Success && !active_move.secondaries_suppressed {
            let damage = active_move.total_damage.min(u16::MAX as u32) as u16;
            self.activate_effect(&[HostId::Mon(user)], Hook::AfterMoveSecondary, false, |effect, context| {
                effect
                    .on_after_move_secondary(context, active_move, target, damage)
                    .map(|_| HookOutcome::Continue)
            })?;
        }
        Ok(outcome)
    }

    /// Moves that act on the user, its side, or the field.
    fn use_self_move(&mut self, user: MonHandle, active_move: &mut ActiveMove) -> Result<MoveOutcome> {
        if let Some(behavior) = move_behavior(&active_move.id) {
            if behavior
                .check_success(self, user, None, active_move)?
                .failed()
            {
                self.log_fail(user)?;
                return Ok(MoveOutcome::Failed);
            }
        }
        if self
            .activate_effect(&[HostId::Mon(user), HostId::Field], Hook::TryHit, true, |effect, context| {
                effect.on_try_hit(context, active_move, user, user)
            })?
            .failed()
        {
            return Ok(MoveOutcome::Failed);
        }

        let data = active_move.data.clone();
        let mut attempted = false;
        let mut succeeded = false;
        if let Some(effect) = &data.user_effect {
            attempted = true;
            succeeded |= self.apply_hit_effect(user, effect, user)?;
        }
        if let Some(id) = &data.side_condition {
            attempted = true;
            succeeded |= !self.add_side_condition(user.side, &Id::from(id.as_str()))?.failed();
        }
        if let Some(id) = &data.hazard {
            attempted = true;
            succeeded |= !self.add_hazard(user.foe_side(), &Id::from(id.as_str()))?.failed();
        }
        if let Some(id) = &data.weather {
            attempted = true;
            succeeded |= !self.set_weather(&Id::from(id.as_str()), None)?.failed();
        }
        if let Some(id) = &data.pseudo_weather {
            attempted = true;
            succeeded |= !self.add_pseudo_weather(&Id::from(id.as_str()))?.failed();
        }
        if attempted && !succeeded {
            self.log_fail(user)?;
            return Ok(MoveOutcome::Failed);
        }

        self.activate_effect(&[HostId::Mon(user)], Hook::MoveSuccess, false, |effect, context| {
            effect
                .on_move_success(context, active_move, None)
                .map(|_| HookOutcome::Continue)
        })?;
        self.mark_user_switch(user, active_move)?;
        Ok(MoveOutcome::Success)
    }

    fn try_move_hit(
        &mut self,
        user: MonHandle,
        target: MonHandle,
        active_move: &mut ActiveMove,
    ) -> Result<MoveOutcome> {
        if let Some(behavior) = move_behavior(&active_move.id) {
            if behavior
                .check_success(self, user, Some(target), active_move)?
                .failed()
            {
                self.log_fail(user)?;
                return Ok(MoveOutcome::Failed);
            }
        }
        if self
            .activate_effect(&[HostId::Mon(user), HostId::Field], Hook::TryHit, true, |effect, context| {
                effect.on_try_hit(context, active_move, user, target)
            })?
            .failed()
        {
            return Ok(MoveOutcome::Failed);
        }
        if self
            .activate_effect(
                &[HostId::Mon(target), HostId::Side(target.side)],
                Hook::FoeTryHit,
                true,
                |effect, context| effect.on_foe_try_hit(context, active_move, user, target),
            )?
            .failed()
        {
            return Ok(MoveOutcome::Failed);
        }
        if self.is_immune_to_move(target, active_move)? {
            let event = battle_event!("immune", self.mon(target)?.log_id());
            self.log(event);
            return Ok(MoveOutcome::Failed);
        }
        if !self.accuracy_check(user, target, active_move)? {
            let event = battle_event!("miss", self.mon(user)?.log_id());
            self.log(event);
            return Ok(MoveOutcome::Missed);
        }

        let hits = match active_move.data.multihit.as_slice() {
            [] => 1,
            hits => rand_util::sample_slice(self.prng(), hits)
                .copied()
                .unwrap_or(1),
        };
        for hit in 1..=hits {
            active_move.hit = hit;
            let outcome = self.move_hit(user, target, active_move)?;
            if outcome != MoveOutcome::Success {
                if hit == 1 {
                    return Ok(outcome);
                }
                break;
            }
            let user_mon = self.mon(user)?;
            if self.mon(target)?.fainted()
                || user_mon.fainted()
                || user_mon.status == Some(Status::Sleep)
            {
                break;
            }
        }
        Ok(MoveOutcome::Success)
    }

    fn move_hit(
        &mut self,
        user: MonHandle,
        target: MonHandle,
        active_move: &mut ActiveMove,
    ) -> Result<MoveOutcome> {
        self.activate_effect(&[HostId::Mon(user)], Hook::MoveHit, false, |effect, context| {
            effect
                .on_move_hit(context, active_move, target)
                .map(|_| HookOutcome::Continue)
        })?;

        let mut dealt = 0;
        if !active_move.is_status() {
            let damage = match calculate_damage(self, user, target, active_move)? {
                DamageOutcome::Damage(damage) => damage,
                DamageOutcome::Fail => {
                    self.log_fail(user)?;
                    return Ok(MoveOutcome::Failed);
                }
            };
            if active_move.crit {
                let event = battle_event!("crit", self.mon(target)?.log_id());
                self.log(event);
            }
            let cause = DamageCause::Move {
                user,
                move_id: active_move.id.clone(),
                category: active_move.category(),
                move_type: active_move.move_type(),
                contact: active_move.has_flag(MoveFlag::Contact),
            };
            dealt = self.damage(target, damage as u32, cause)?.amount();
            active_move.total_damage += dealt as u32;
            if let Some(drain) = active_move.data.drain_percent {
                if dealt > 0 {
                    let amount = (dealt as u32 * drain as u32).div_ceil(100);
                    self.heal(user, amount)?;
                }
            }
        }

        let data = active_move.data.clone();
        if let Some(effect) = &data.hit_effect {
            if !self.mon(target)?.fainted() {
                let applied = self.apply_hit_effect(target, effect, user)?;
                if !applied && active_move.is_status() {
                    self.log_fail(user)?;
                    return Ok(MoveOutcome::Failed);
                }
            }
        }
        if let Some(effect) = &data.user_effect {
            self.apply_hit_effect(user, effect, user)?;
        }

        self.activate_effect(&[HostId::Mon(user)], Hook::MoveSuccess, false, |effect, context| {
            effect
                .on_move_success(context, active_move, Some(target))
                .map(|_| HookOutcome::Continue)
        })?;
        self.activate_effect(&[HostId::Mon(target)], Hook::AfterFoeHit, false, |effect, context| {
            effect
                .on_after_foe_hit(context, active_move, user, dealt)
                .map(|_| HookOutcome::Continue)
        })?;

        for secondary in &data.secondary_effects {
            if rand_util::range(self.prng(), 0, 100) >= secondary.chance as u64 {
                continue;
            }
            if let Some(effect) = &secondary.target {
                if !self.mon(target)?.fainted() {
                    self.apply_hit_effect(target, effect, user)?;
                }
            }
            if let Some(effect) = &secondary.user {
                self.apply_hit_effect(user, effect, user)?;
            }
        }

        self.mark_user_switch(user, active_move)?;
        Ok(MoveOutcome::Success)
    }

    /// Applies a status, volatile, and boosts to a Mon.
    ///
    /// Returns whether anything was applied.
    fn apply_hit_effect(&mut self, target: MonHandle, effect: &HitEffect, user: MonHandle) -> Result<bool> {
        if self.mon(target)?.fainted() {
            return Ok(false);
        }
        let mut applied = false;
        if let Some(status) = effect.status {
            applied |= !self.set_status(target, status, Some(user))?.failed();
        }
        if let Some(volatile) = &effect.volatile {
            applied |= !self.add_volatile(target, &Id::from(volatile.as_str()))?.failed();
        }
        if let Some(boosts) = &effect.boosts {
            applied |= self.apply_boosts(target, boosts.clone(), Some(user))?;
        }
        Ok(applied)
    }

    /// Whether the move hits, after accuracy modifiers and stages.
    fn accuracy_check(
        &mut self,
        user: MonHandle,
        target: MonHandle,
        active_move: &ActiveMove,
    ) -> Result<bool> {
        let accuracy = active_move.data.accuracy.percentage().map(f64::from);
        let accuracy = self.accumulate_effect(
            &[HostId::Mon(user)],
            Hook::Accuracy,
            accuracy,
            |effect, context, accuracy| effect.on_accuracy(context, active_move, target, accuracy),
        )?;
        let accuracy = self.accumulate_effect(
            &[HostId::Mon(target)],
            Hook::FoeAccuracy,
            accuracy,
            |effect, context, accuracy| {
                effect.on_foe_accuracy(context, active_move, user, accuracy)
            },
        )?;
        let Some(accuracy) = accuracy else {
            return Ok(true);
        };
        let accuracy = apply_accuracy_boosts(
            accuracy,
            self.mon(user)?.boosts.acc,
            self.mon(target)?.boosts.eva,
        );
        Ok(rand_util::range(self.prng(), 0, 100) < accuracy as u64)
    }

    fn mark_user_switch(&mut self, user: MonHandle, active_move: &ActiveMove) -> Result<()> {
        if active_move.data.user_switch
            && !self.mon(user)?.fainted()
            && !self.side(user.side)?.switch_options().is_empty()
        {
            self.mon_mut(user)?.must_switch = true;
        }
        Ok(())
    }

    /// Faints a Mon regardless of its HP.
    pub(crate) fn faint_directly(&mut self, mon: MonHandle) -> Result<()> {
        let handle = mon;
        let mon = self.mon_mut(handle)?;
        if mon.fainted() {
            return Ok(());
        }
        mon.hp = 0;
        self.faint_queue.push(handle, None);
        Ok(())
    }

    fn log_fail(&mut self, user: MonHandle) -> Result<()> {
        let event = battle_event!("fail", self.mon(user)?.log_id());
        self.log(event);
        Ok(())
    }
}
