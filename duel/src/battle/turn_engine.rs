use std::mem;

use anyhow::Result;
use duel_data::{
    MoveTarget,
    Stat,
};
use log::{
    debug,
    info,
};

use crate::{
    battle::{
        Action,
        Battle,
        BattleOutcome,
        HostId,
        MonHandle,
        MoveAction,
        SwitchAction,
        calculations::apply_boost,
        speed_order::speed_sort,
    },
    battle_event,
    decision::{
        Choice,
        DecisionMaker,
        DecisionRequest,
        FirstChoiceDecisionMaker,
    },
    effect::{
        EffectCategory,
        Handler,
        Hook,
        HookOutcome,
    },
    error::general_error,
};

/// The phase of the turn loop a battle is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    /// Leads have not been sent out.
    Init,
    /// Waiting for both sides to choose an action.
    DecisionPending,
    OrderingActions,
    ExecutingActions,
    Residual,
    TurnComplete,
    /// An active slot is empty and must be filled.
    ForcedSwitch,
    /// The battle has an outcome.
    Terminal,
}

impl Battle {
    /// Sends out both leads, in speed order, and starts the first turn.
    pub fn init_battle(&mut self) -> Result<()> {
        if self.state != TurnState::Init {
            return Err(general_error(format!(
                "battle cannot be initialized in state {:?}",
                self.state
            )));
        }

        let mut leads = Vec::new();
        for side in 0..self.field.sides.len() {
            let Some(position) = self.side(side)?.mons.iter().position(|mon| !mon.fainted())
            else {
                continue;
            };
            let mon = self.mon(MonHandle::new(side, position))?;
            let mut action = SwitchAction::new(side, position);
            action.speed = apply_boost(mon.stat(Stat::Spe) as u32, mon.boosts.spe) as i64;
            leads.push(Action::Switch(action));
        }
        let tie_resolution = self.options.speed_tie_resolution;
        speed_sort(&mut leads, self.prng.as_mut(), tie_resolution);
        for lead in leads {
            if let Action::Switch(action) = lead {
                self.switch_in(action.side, action.position)?;
                self.drain_faints()?;
            }
        }

        self.field.turn = 1;
        self.log(battle_event!("turn", "turn:1"));
        self.check_terminal()?;
        if !self.ended() {
            self.fill_empty_slots()?;
        }
        self.state = if self.ended() {
            TurnState::Terminal
        } else {
            TurnState::DecisionPending
        };
        Ok(())
    }

    /// The choices a side has at the start of this turn.
    pub fn decision_request(&mut self, side: usize) -> Result<Option<DecisionRequest>> {
        let Some(mon) = self.living_active_mon(side) else {
            return Ok(None);
        };
        let moves = self.move_choices(mon)?;
        let hosts = self.mon_hosts(mon);
        let trapped =
            self.accumulate_effect(&hosts, Hook::TrapCheck, false, |effect, context, trapped| {
                Ok(effect.on_trap_check(context)? || trapped)
            })?;
        let switches = if trapped {
            Vec::new()
        } else {
            self.side(side)?.switch_options()
        };
        Ok(Some(DecisionRequest {
            side,
            turn: self.field.turn,
            moves,
            switches,
        }))
    }

    /// Collects one action per side from the decision makers.
    pub fn init_turn(&mut self) -> Result<()> {
        match self.state {
            TurnState::DecisionPending => (),
            TurnState::ForcedSwitch => {
                self.fill_empty_slots()?;
                if self.ended() {
                    return Ok(());
                }
            }
            TurnState::Terminal => return Ok(()),
            state => {
                return Err(general_error(format!(
                    "turn cannot be initialized in state {state:?}"
                )));
            }
        }

        self.actions.clear();
        self.next_action = 0;
        for side in 0..self.field.sides.len() {
            let Some(request) = self.decision_request(side)? else {
                continue;
            };
            let choice = self.with_decision_maker(side, |decision_maker, battle| {
                decision_maker.choose_action(battle, &request)
            });
            let action = self.resolve_choice(&request, choice)?;
            debug!("side {side} chose {action:?}");
            self.actions.push(action);
        }
        self.state = TurnState::OrderingActions;
        Ok(())
    }

    /// Runs a turn whose actions have already been collected.
    pub fn run_initialized_turn(&mut self) -> Result<()> {
        if self.state == TurnState::Terminal {
            return Ok(());
        }
        if self.state != TurnState::OrderingActions {
            return Err(general_error(format!(
                "turn cannot run in state {:?}",
                self.state
            )));
        }
        self.order_actions()?;

        self.state = TurnState::ExecutingActions;
        self.execute_actions()?;
        if self.ended() {
            self.state = TurnState::Terminal;
            return Ok(());
        }

        self.state = TurnState::Residual;
        self.run_residual()?;
        if self.ended() {
            self.state = TurnState::Terminal;
            return Ok(());
        }

        self.state = TurnState::TurnComplete;
        self.complete_turn()?;
        if self.ended() {
            self.state = TurnState::Terminal;
            return Ok(());
        }

        self.state = TurnState::ForcedSwitch;
        self.fill_empty_slots()?;
        self.state = if self.ended() {
            TurnState::Terminal
        } else {
            TurnState::DecisionPending
        };
        Ok(())
    }

    /// Collects decisions and runs a full turn.
    pub fn run_turn(&mut self) -> Result<()> {
        self.init_turn()?;
        self.run_initialized_turn()
    }

    /// Runs the battle until it has an outcome.
    pub fn run_battle(&mut self) -> Result<BattleOutcome> {
        if self.state == TurnState::Init {
            self.init_battle()?;
        }
        loop {
            if let Some(outcome) = self.outcome() {
                return Ok(outcome);
            }
            self.run_turn()?;
        }
    }

    /// Calls a side's decision maker with read access to the battle.
    fn with_decision_maker<R, F>(&mut self, side: usize, call: F) -> R
    where
        F: FnOnce(&mut dyn DecisionMaker, &Battle) -> R,
    {
        let mut decision_maker = mem::replace(
            &mut self.decision_makers[side],
            Box::new(FirstChoiceDecisionMaker),
        );
        let result = call(decision_maker.as_mut(), self);
        self.decision_makers[side] = decision_maker;
        result
    }

    fn resolve_choice(&mut self, request: &DecisionRequest, choice: Choice) -> Result<Action> {
        let side = request.side;
        let mon = self
            .living_active_mon(side)
            .ok_or_else(|| general_error(format!("side {side} has no active mon")))?;
        match choice {
            Choice::Switch(position) if request.switches.contains(&position) => {
                return Ok(Action::Switch(SwitchAction::new(side, position)));
            }
            Choice::Move(id)
                if request.moves.contains(&id) || self.mon(mon)?.move_slot(&id).is_some() =>
            {
                return Ok(Action::Move(MoveAction::new(mon, id)));
            }
            choice => self.invariant_violation(format!("side {side} made an illegal choice: {choice:?}")),
        }
        let fallback = request
            .moves
            .first()
            .cloned()
            .ok_or_else(|| general_error(format!("side {side} has no moves")))?;
        Ok(Action::Move(MoveAction::new(mon, fallback)))
    }

    /// Speed after boosts and modifiers.
    pub fn live_speed(&mut self, mon: MonHandle) -> Result<i64> {
        let data = self.mon(mon)?;
        let speed = apply_boost(data.stat(Stat::Spe) as u32, data.boosts.spe) as f64;
        let hosts = self.mon_hosts(mon);
        let speed = self.accumulate_effect(&hosts, Hook::ModifySpe, speed, |effect, context, speed| {
            effect.on_modify_spe(context, mon, speed)
        })?;
        Ok(speed as i64)
    }

    fn order_actions(&mut self) -> Result<()> {
        let mut actions = mem::take(&mut self.actions);
        for action in &mut actions {
            match action {
                Action::Switch(action) => {
                    if let Some(mon) = self.living_active_mon(action.side) {
                        action.speed = self.live_speed(mon)?;
                    }
                }
                Action::Move(action) => {
                    let active_move = self.active_move(&action.id)?;
                    let priority = self.accumulate_effect(
                        &[HostId::Mon(action.mon)],
                        Hook::ModifyPriority,
                        active_move.data.priority,
                        |effect, context, priority| {
                            effect.on_modify_priority(context, &active_move, priority)
                        },
                    )?;
                    action.priority = priority as i32;
                    action.speed = self.live_speed(action.mon)?;
                }
            }
        }
        let tie_resolution = self.options.speed_tie_resolution;
        speed_sort(&mut actions, self.prng.as_mut(), tie_resolution);
        self.actions = actions;
        self.next_action = 0;
        Ok(())
    }

    fn execute_actions(&mut self) -> Result<()> {
        while let Some(action) = self.actions.get(self.next_action).cloned() {
            self.next_action += 1;
            self.run_action(action)?;
            self.drain_faints()?;
            if self.ended() {
                return Ok(());
            }
            self.run_update()?;
            self.resolve_forced_switches()?;
            if self.ended() {
                return Ok(());
            }
        }
        Ok(())
    }

    fn run_action(&mut self, action: Action) -> Result<()> {
        match action {
            Action::Switch(action) => {
                let mon = self.mon(MonHandle::new(action.side, action.position))?;
                if mon.fainted() || mon.active {
                    self.invariant_violation(format!(
                        "{} can no longer switch in",
                        mon.name
                    ));
                    return Ok(());
                }
                self.switch_in(action.side, action.position)?;
            }
            Action::Move(action) => {
                let mon = action.mon;
                if self.living_active_mon(mon.side) != Some(mon) {
                    return Ok(());
                }
                let target = self.dex.move_data(&action.id)?.target;
                if target == MoveTarget::Normal && self.foe_of(mon).is_none_or(|foe| {
                    self.mon(foe).is_ok_and(|foe| foe.fainted())
                }) {
                    debug!("skipping {} because its target is gone", action.id);
                    return Ok(());
                }
                self.run_move_action(mon, &action.id)?;
                self.drain_faints()?;
            }
        }
        Ok(())
    }

    fn run_update(&mut self) -> Result<()> {
        let hosts = self.all_hosts();
        self.activate_effect(&hosts, Hook::Update, false, |effect, context| {
            effect.on_update(context).map(|_| HookOutcome::Continue)
        })?;
        self.drain_faints()
    }

    /// Switches out Mons that were forced out by a move.
    fn resolve_forced_switches(&mut self) -> Result<()> {
        for side in 0..self.field.sides.len() {
            let Some(mon) = self.living_active_mon(side) else {
                continue;
            };
            if !self.mon(mon)?.must_switch {
                continue;
            }
            self.mon_mut(mon)?.must_switch = false;
            let options = self.side(side)?.switch_options();
            if options.is_empty() {
                continue;
            }
            let position = self.choose_switch(side, &options);
            self.switch_in(side, position)?;
            self.drain_faints()?;
            if self.ended() {
                return Ok(());
            }
        }
        Ok(())
    }

    fn choose_switch(&mut self, side: usize, options: &[usize]) -> usize {
        let position = self.with_decision_maker(side, |decision_maker, battle| {
            decision_maker.choose_switch(battle, side, options)
        });
        if options.contains(&position) {
            return position;
        }
        self.invariant_violation(format!("side {side} chose illegal switch {position}"));
        options[0]
    }

    fn run_residual(&mut self) -> Result<()> {
        let hosts = self.all_hosts();
        let handlers = self.collect_handlers(&hosts, Hook::Residual);
        for handler in handlers {
            self.call_handler(&handler, |effect, context| effect.on_residual(context))?;
            if !self.faint_queue.is_empty() {
                self.drain_faints()?;
                if self.ended() {
                    return Ok(());
                }
            }
        }
        Ok(())
    }

    fn complete_turn(&mut self) -> Result<()> {
        for host in self.all_hosts() {
            let Some(effects) = self.effects(host) else {
                continue;
            };
            for source in effects.sources() {
                let category = source.category();
                if category == EffectCategory::Weather
                    || !self.options.auto_expire.contains(&category)
                {
                    continue;
                }
                let Some(slot) = self
                    .effects_mut(host)
                    .and_then(|effects| effects.slot_mut(&source))
                else {
                    continue;
                };
                let Some(duration) = slot.duration else {
                    continue;
                };
                let duration = duration.saturating_sub(1);
                slot.duration = Some(duration);
                if duration > 0 {
                    continue;
                }
                let handler = Handler {
                    host,
                    source: source.clone(),
                    order: slot.order,
                    priority: 0,
                };
                self.call_handler(&handler, |effect, context| effect.on_timeout(context))?;
                self.remove_effect(host, &source, true)?;
                self.drain_faints()?;
                if self.ended() {
                    return Ok(());
                }
            }
        }

        for mon in self.active_mons() {
            self.mon_mut(mon)?.active_turns += 1;
        }
        if let Some(limit) = self.options.turn_limit {
            if self.field.turn >= limit {
                info!("turn limit {limit} reached");
                self.field.outcome = Some(BattleOutcome::Tie);
                self.log(battle_event!("tie"));
                return Ok(());
            }
        }
        self.field.turn += 1;
        let event = battle_event!("turn", format!("turn:{}", self.field.turn));
        self.log(event);
        Ok(())
    }

    /// Fills every empty active slot, repeating while switch-ins cause new faints.
    fn fill_empty_slots(&mut self) -> Result<()> {
        loop {
            if self.ended() {
                return Ok(());
            }
            let empty = (0..self.field.sides.len())
                .filter(|side| {
                    self.field.sides[*side].active.is_none()
                        && !self.field.sides[*side].switch_options().is_empty()
                })
                .collect::<Vec<_>>();
            if empty.is_empty() {
                return Ok(());
            }
            for side in empty {
                let options = self.side(side)?.switch_options();
                let position = self.choose_switch(side, &options);
                self.switch_in(side, position)?;
            }
            self.drain_faints()?;
        }
    }

    /// Processes queued faints in the order they were detected.
    pub(crate) fn drain_faints(&mut self) -> Result<()> {
        let mut fainted = false;
        while let Some(entry) = self.faint_queue.pop() {
            let mon = entry.mon;
            if !self.mon(mon)?.active {
                continue;
            }
            fainted = true;
            let event = battle_event!("faint", self.mon(mon)?.log_id());
            self.log(event);
            info!("{} fainted", self.mon(mon)?.name);

            self.activate_effect(&[HostId::Mon(mon)], Hook::Faint, false, |effect, context| {
                effect
                    .on_faint(context, entry.attacker)
                    .map(|_| HookOutcome::Continue)
            })?;
            if let Some(foe) = self.living_active_mon(mon.foe_side()) {
                self.activate_effect(&[HostId::Mon(foe)], Hook::FoeFaint, false, |effect, context| {
                    effect.on_foe_faint(context, mon).map(|_| HookOutcome::Continue)
                })?;
            }

            self.clear_effects(mon, false)?;
            self.mon_mut(mon)?.active = false;
            self.side_mut(mon.side)?.active = None;
        }
        if fainted {
            self.check_terminal()?;
        }
        Ok(())
    }

    fn check_terminal(&mut self) -> Result<()> {
        if self.ended() {
            return Ok(());
        }
        let outcome = match (self.side(0)?.remaining(), self.side(1)?.remaining()) {
            (0, 0) => BattleOutcome::Tie,
            (0, _) => BattleOutcome::Win(1),
            (_, 0) => BattleOutcome::Win(0),
            _ => return Ok(()),
        };
        let event = match outcome {
            BattleOutcome::Tie => battle_event!("tie"),
            BattleOutcome::Win(side) => battle_event!("win", format!("side:{side}")),
        };
        self.log(event);
        info!("battle ended: {outcome:?}");
        self.field.outcome = Some(outcome);
        self.state = TurnState::Terminal;
        Ok(())
    }
}
