use std::sync::Arc;

use anyhow::{
    Context,
    Result,
};
use duel_data::TypeChart;
use duel_prng::{
    PseudoRandomNumberGenerator,
    RealPseudoRandomNumberGenerator,
};
use log::warn;

use crate::{
    battle::{
        Action,
        BattleOptions,
        BattleOutcome,
        FaintQueue,
        Field,
        HostId,
        Mon,
        MonHandle,
        Side,
        TurnState,
        battle_builder::build_mon,
    },
    common::Id,
    decision::DecisionMaker,
    dex::Dex,
    effect::{
        Effect,
        EffectMap,
        EffectSource,
        RetiredSlot,
    },
    error::{
        OrNotFound,
        invariant_violation_error,
    },
    log::{
        BattleEvent,
        EventLog,
    },
    moves::ActiveMove,
    teams::MonData,
};

/// A single battle between two sides.
///
/// A battle owns all of its state, including its random stream and both sides' decision makers,
/// so a clone is a fully independent simulation.
#[derive(Clone)]
pub struct Battle {
    pub(crate) field: Field,
    pub(crate) prng: Box<dyn PseudoRandomNumberGenerator>,
    pub(crate) log: EventLog,
    pub(crate) options: BattleOptions,
    pub(crate) dex: Arc<Dex>,
    pub(crate) faint_queue: FaintQueue,
    pub(crate) next_effect_order: u64,
    pub(crate) mold_broken: Option<MonHandle>,
    pub(crate) retired: Vec<RetiredSlot>,
    pub(crate) decision_makers: [Box<dyn DecisionMaker>; 2],
    pub(crate) state: TurnState,
    pub(crate) actions: Vec<Action>,
    pub(crate) next_action: usize,
}

impl Battle {
    pub(crate) fn new(
        field: Field,
        dex: Arc<Dex>,
        options: BattleOptions,
        prng: Box<dyn PseudoRandomNumberGenerator>,
        decision_makers: [Box<dyn DecisionMaker>; 2],
    ) -> Self {
        Self {
            field,
            prng,
            log: EventLog::new(),
            options,
            dex,
            faint_queue: FaintQueue::new(),
            next_effect_order: 0,
            mold_broken: None,
            retired: Vec::new(),
            decision_makers,
            state: TurnState::Init,
            actions: Vec::new(),
            next_action: 0,
        }
    }

    /// Creates an independent copy of the battle.
    ///
    /// Effects, random streams, and decision makers are all deep-copied.
    pub fn snapshot(&self) -> Self {
        self.clone()
    }

    /// Replaces the battle's random stream, and reseeds both decision makers.
    pub fn reseed(&mut self, seed: u64) {
        self.prng = Box::new(RealPseudoRandomNumberGenerator::new(Some(seed)));
        for (side, decision_maker) in self.decision_makers.iter_mut().enumerate() {
            decision_maker.reseed(seed.wrapping_add(side as u64 + 1));
        }
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn options(&self) -> &BattleOptions {
        &self.options
    }

    pub fn dex(&self) -> &Dex {
        &self.dex
    }

    pub fn type_chart(&self) -> &TypeChart {
        self.dex.type_chart()
    }

    pub fn turn(&self) -> u64 {
        self.field.turn
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        self.field.outcome
    }

    pub fn ended(&self) -> bool {
        self.field.ended()
    }

    pub fn weather(&self) -> Option<&Id> {
        self.field.weather.as_ref()
    }

    pub fn prng(&mut self) -> &mut dyn PseudoRandomNumberGenerator {
        self.prng.as_mut()
    }

    /// Replaces the decision maker for a side.
    pub fn set_decision_maker(&mut self, side: usize, decision_maker: Box<dyn DecisionMaker>) -> Result<()> {
        *self
            .decision_makers
            .get_mut(side)
            .or_not_found(format_args!("side {side}"))? = decision_maker;
        Ok(())
    }

    pub fn side(&self, side: usize) -> Result<&Side> {
        self.field
            .sides
            .get(side)
            .or_not_found(format_args!("side {side}"))
    }

    pub fn side_mut(&mut self, side: usize) -> Result<&mut Side> {
        self.field
            .sides
            .get_mut(side)
            .or_not_found(format_args!("side {side}"))
    }

    pub fn mon(&self, mon: MonHandle) -> Result<&Mon> {
        self.side(mon.side)?
            .mons
            .get(mon.position)
            .or_not_found(format_args!("mon {},{}", mon.side, mon.position))
    }

    pub fn mon_mut(&mut self, mon: MonHandle) -> Result<&mut Mon> {
        self.side_mut(mon.side)?
            .mons
            .get_mut(mon.position)
            .or_not_found(format_args!("mon {},{}", mon.side, mon.position))
    }

    /// Adds a Mon to the back of a side's team, such as an opponent's Mon that was just revealed.
    pub fn add_mon(&mut self, side: usize, data: &MonData) -> Result<MonHandle> {
        let position = self.side(side)?.mons.len();
        let mon = build_mon(&self.dex, side, position, data)
            .with_context(|| format!("invalid mon for side {side}"))?;
        self.side_mut(side)?.mons.push(mon);
        Ok(MonHandle::new(side, position))
    }

    /// The active Mon on a side, fainted or not.
    pub fn active_mon_handle(&self, side: usize) -> Option<MonHandle> {
        let position = self.field.sides.get(side)?.active?;
        Some(MonHandle::new(side, position))
    }

    /// The active Mon on a side, if it has not fainted.
    pub fn living_active_mon(&self, side: usize) -> Option<MonHandle> {
        self.active_mon_handle(side)
            .filter(|mon| self.mon(*mon).is_ok_and(|mon| !mon.fainted()))
    }

    /// The active Mon opposing the given Mon.
    pub fn foe_of(&self, mon: MonHandle) -> Option<MonHandle> {
        self.active_mon_handle(mon.foe_side())
    }

    /// All active Mons that have not fainted, side by side.
    pub fn active_mons(&self) -> Vec<MonHandle> {
        (0..self.field.sides.len())
            .filter_map(|side| self.living_active_mon(side))
            .collect()
    }

    /// The Mon, then its side, then the field.
    pub fn mon_hosts(&self, mon: MonHandle) -> [HostId; 3] {
        [HostId::Mon(mon), HostId::Side(mon.side), HostId::Field]
    }

    /// Every host that can currently run effects.
    pub fn all_hosts(&self) -> Vec<HostId> {
        let mut hosts = Vec::from([HostId::Field, HostId::Side(0), HostId::Side(1)]);
        hosts.extend(self.active_mons().into_iter().map(HostId::Mon));
        hosts
    }

    pub fn effects(&self, host: HostId) -> Option<&EffectMap> {
        match host {
            HostId::Mon(mon) => self.mon(mon).ok().map(|mon| &mon.effects),
            HostId::Side(side) => self.field.sides.get(side).map(|side| &side.effects),
            HostId::Field => Some(&self.field.effects),
        }
    }

    pub(crate) fn effects_mut(&mut self, host: HostId) -> Option<&mut EffectMap> {
        match host {
            HostId::Mon(mon) => self.mon_mut(mon).ok().map(|mon| &mut mon.effects),
            HostId::Side(side) => self.field.sides.get_mut(side).map(|side| &mut side.effects),
            HostId::Field => Some(&mut self.field.effects),
        }
    }

    pub fn get_effect(&self, host: HostId, source: &EffectSource) -> Option<&dyn Effect> {
        self.effects(host).and_then(|effects| effects.get(source))
    }

    pub fn has_effect(&self, host: HostId, source: &EffectSource) -> bool {
        self.effects(host)
            .is_some_and(|effects| effects.contains(source))
    }

    pub(crate) fn next_order(&mut self) -> u64 {
        self.next_effect_order += 1;
        self.next_effect_order
    }

    pub(crate) fn is_mold_broken(&self, host: HostId) -> bool {
        matches!(host, HostId::Mon(mon) if self.mold_broken == Some(mon))
    }

    /// Creates a single-use copy of a move.
    pub fn active_move(&self, id: &Id) -> Result<ActiveMove> {
        Ok(ActiveMove::new(id.clone(), self.dex.move_data(id)?))
    }

    pub fn log(&mut self, event: BattleEvent) {
        self.log.push(event);
    }

    pub fn event_log(&self) -> &EventLog {
        &self.log
    }

    /// Logs added since the last call.
    pub fn new_logs(&mut self) -> Vec<String> {
        self.log.read_out().map(|log| log.to_owned()).collect()
    }

    /// Reports a broken invariant.
    ///
    /// The caller is expected to correct the state on its own. With strict invariants, this
    /// panics instead.
    #[track_caller]
    pub(crate) fn invariant_violation(&self, message: String) {
        if self.options.strict_invariants {
            panic!("{}", invariant_violation_error(message));
        }
        warn!("invariant violated: {message}");
    }

    /// Whether the opposing side still has an action queued this turn.
    pub fn foe_moves_later(&self, mon: MonHandle) -> bool {
        self.actions
            .iter()
            .skip(self.next_action)
            .any(|action| action.side() != mon.side)
    }
}
