use anyhow::Result;
use duel_data::{
    BoostTable,
    Status,
};
use log::{
    debug,
    info,
    warn,
};

use crate::{
    abilities,
    battle::{
        Battle,
        DamageCause,
        DamageOutcome,
        HostId,
        MonHandle,
    },
    battle_event,
    common::Id,
    conditions,
    effect::{
        Effect,
        EffectContext,
        EffectSlot,
        EffectSource,
        Handler,
        Hook,
        HookOutcome,
        Immunity,
        RetiredSlot,
        Retirement,
    },
    error::{
        OrNotFound,
        general_error,
    },
    items,
    moves::ActiveMove,
};

/// Mutators shared by the engine, effect hooks, and outside callers.
///
/// Every mutator is a no-op on a fainted Mon.
impl Battle {
    /// Deals damage to a Mon.
    ///
    /// A request for 0 damage fails without running any hooks. The Mon is queued to faint if its
    /// HP reaches 0.
    pub fn damage(
        &mut self,
        target: MonHandle,
        amount: u32,
        cause: DamageCause,
    ) -> Result<DamageOutcome> {
        if self.mon(target)?.fainted() {
            warn!("ignoring damage to fainted mon {}", self.mon(target)?.name);
            return Ok(DamageOutcome::Fail);
        }
        if amount == 0 {
            return Ok(DamageOutcome::Fail);
        }
        if let DamageCause::Effect(EffectSource::Weather(weather)) = &cause {
            if self.is_immune(target, Immunity::Weather(weather))? {
                return Ok(DamageOutcome::Fail);
            }
        }

        let mut damage = amount.min(u16::MAX as u32) as u16;
        for handler in self.collect_handlers(&[HostId::Mon(target)], Hook::Damage) {
            match self.call_handler(&handler, |effect, context| {
                effect.on_damage(context, damage, &cause)
            })? {
                Some(DamageOutcome::Damage(next)) => damage = next,
                Some(DamageOutcome::Fail) => return Ok(DamageOutcome::Fail),
                None => (),
            }
        }
        if damage == 0 {
            return Ok(DamageOutcome::Fail);
        }

        let mon = self.mon_mut(target)?;
        let dealt = damage.min(mon.hp);
        mon.hp -= dealt;
        let event = match &cause {
            DamageCause::Effect(source) => battle_event!(
                "damage",
                mon.log_id(),
                format!("health:{}", mon.health()),
                format!("from:{source}")
            ),
            DamageCause::Recoil => battle_event!(
                "damage",
                mon.log_id(),
                format!("health:{}", mon.health()),
                "from:recoil"
            ),
            DamageCause::SelfHit => battle_event!(
                "damage",
                mon.log_id(),
                format!("health:{}", mon.health()),
                "from:confusion"
            ),
            DamageCause::Move { .. } => {
                battle_event!("damage", mon.log_id(), format!("health:{}", mon.health()))
            }
        };
        self.log(event);

        self.activate_effect(&[HostId::Mon(target)], Hook::AfterDamage, false, |effect, context| {
            effect
                .on_after_damage(context, dealt, &cause)
                .map(|_| HookOutcome::Continue)
        })?;

        if self.mon(target)?.fainted() {
            self.faint_queue.push(target, cause.attacker());
        }
        Ok(DamageOutcome::Damage(dealt))
    }

    /// Heals a Mon, up to its maximum HP.
    ///
    /// Returns the HP restored.
    pub fn heal(&mut self, target: MonHandle, amount: u32) -> Result<u16> {
        let mon = self.mon(target)?;
        if mon.fainted() {
            warn!("ignoring heal of fainted mon {}", mon.name);
            return Ok(0);
        }
        if mon.hp >= mon.max_hp {
            return Ok(0);
        }
        let amount = amount.clamp(1, u16::MAX as u32) as u16;
        if let Some(foe) = self.living_active_mon(target.foe_side()) {
            if self
                .activate_effect(&[HostId::Mon(foe)], Hook::FoeHeal, true, |effect, context| {
                    effect.on_foe_heal(context, target, amount)
                })?
                .failed()
            {
                return Ok(0);
            }
        }
        let mon = self.mon_mut(target)?;
        let healed = amount.min(mon.max_hp - mon.hp);
        mon.hp += healed;
        let event = battle_event!("heal", mon.log_id(), format!("health:{}", mon.health()));
        self.log(event);
        Ok(healed)
    }

    /// Sets a major status on a Mon.
    ///
    /// `setter` is the Mon that caused the status, which is the target itself for self-inflicted
    /// statuses.
    pub fn set_status(
        &mut self,
        target: MonHandle,
        status: Status,
        setter: Option<MonHandle>,
    ) -> Result<HookOutcome> {
        let mon = self.mon(target)?;
        if mon.fainted() {
            warn!("ignoring status on fainted mon {}", mon.name);
            return Ok(HookOutcome::Fail);
        }
        if self.options.sleep_clause
            && status == Status::Sleep
            && setter.is_some_and(|setter| setter.side != target.side)
            && self.side(target.side)?.mons.iter().any(|teammate| {
                teammate.position != target.position && teammate.status == Some(Status::Sleep)
            })
        {
            debug!("sleep clause prevents sleep on {}", mon.name);
            return Ok(HookOutcome::Fail);
        }
        if mon.status.is_some() || self.is_immune(target, Immunity::Status(status))? {
            return Ok(HookOutcome::Fail);
        }
        let hosts = self.mon_hosts(target);
        if self
            .activate_effect(&hosts, Hook::SetStatus, true, |effect, context| {
                effect.on_set_status(context, status, target, setter)
            })?
            .failed()
        {
            return Ok(HookOutcome::Fail);
        }
        if self
            .attach_effect(HostId::Mon(target), conditions::status_effect(status))?
            .failed()
        {
            return Ok(HookOutcome::Fail);
        }
        self.activate_effect(&[HostId::Mon(target)], Hook::AfterSetStatus, false, |effect, context| {
            effect
                .on_after_set_status(context, status, setter)
                .map(|_| HookOutcome::Continue)
        })?;
        Ok(HookOutcome::Continue)
    }

    /// Cures a Mon's major status.
    pub fn cure_status(&mut self, target: MonHandle) -> Result<bool> {
        let Some(status) = self.mon(target)?.status else {
            return Ok(false);
        };
        self.remove_effect(HostId::Mon(target), &EffectSource::Status(status), true)
    }

    /// Applies stat stage changes to a Mon.
    ///
    /// Returns whether any stage changed.
    pub fn apply_boosts(
        &mut self,
        target: MonHandle,
        boosts: BoostTable,
        setter: Option<MonHandle>,
    ) -> Result<bool> {
        if self.mon(target)?.fainted() {
            return Ok(false);
        }
        let mut boosts = boosts;
        let self_induced = setter == Some(target);
        self.activate_effect(&[HostId::Mon(target)], Hook::Boost, false, |effect, context| {
            effect
                .on_boost(context, &mut boosts, self_induced)
                .map(|_| HookOutcome::Continue)
        })?;

        let mut changed = false;
        for (boost, delta) in boosts.non_zero().collect::<Vec<_>>() {
            let mon = self.mon_mut(target)?;
            let applied = mon.boosts.add(boost, delta);
            if applied == 0 {
                continue;
            }
            changed = true;
            let kind = if applied > 0 { "boost" } else { "unboost" };
            let event = battle_event!(
                kind,
                mon.log_id(),
                format!("stat:{boost}"),
                format!("by:{}", applied.abs())
            );
            self.log(event);
        }
        Ok(changed)
    }

    /// Starts a weather, replacing the current one.
    ///
    /// Without a duration, the weather's own default is used. Fails if the weather is already
    /// active, or if the current weather can only be replaced by another indefinite weather.
    pub fn set_weather(&mut self, weather: &Id, duration: Option<u8>) -> Result<HookOutcome> {
        if let Some(current) = self.field.weather.clone() {
            if current == *weather {
                return Ok(HookOutcome::Fail);
            }
            if conditions::is_trio_weather(&current) && !conditions::is_trio_weather(weather) {
                return Ok(HookOutcome::Fail);
            }
            self.remove_effect(HostId::Field, &EffectSource::Weather(current), true)?;
        }
        let effect = conditions::create_weather(weather)
            .or_not_found(format_args!("weather {weather}"))?;
        if self.attach_effect(HostId::Field, effect)?.failed() {
            return Ok(HookOutcome::Fail);
        }
        if duration.is_some() {
            if let Some(slot) = self
                .field
                .effects
                .slot_mut(&EffectSource::Weather(weather.clone()))
            {
                slot.duration = duration;
            }
        }
        info!("weather started: {weather}");
        Ok(HookOutcome::Continue)
    }

    /// Ends the current weather.
    pub fn clear_weather(&mut self) -> Result<bool> {
        let Some(weather) = self.field.weather.clone() else {
            return Ok(false);
        };
        self.remove_effect(HostId::Field, &EffectSource::Weather(weather), true)
    }

    /// Attaches an effect to a host.
    ///
    /// Abilities and items replace the existing one. Any other effect fails if its source is
    /// already present, unless the existing effect accepts another layer.
    pub fn set_effect(
        &mut self,
        host: HostId,
        effect: Box<dyn Effect>,
        override_immunity: bool,
    ) -> Result<HookOutcome> {
        let source = effect.source();
        if let HostId::Mon(mon) = host {
            let mon = self.mon(mon)?;
            if mon.fainted() {
                warn!("ignoring effect {source} on fainted mon {}", mon.name);
                return Ok(HookOutcome::Fail);
            }
            if let EffectSource::Status(_) = source {
                if mon.status.is_some() {
                    return Ok(HookOutcome::Fail);
                }
            }
        }
        if !override_immunity && self.is_immune_to_effect(host, effect.as_ref())? {
            return Ok(HookOutcome::Fail);
        }
        if self.has_effect(host, &source) {
            if source.category().always_replaces() {
                self.remove_effect(host, &source, true)?;
            } else {
                let layered = self
                    .effects_mut(host)
                    .and_then(|effects| effects.get_mut(&source))
                    .is_some_and(|existing| existing.add_layer());
                if !layered {
                    return Ok(HookOutcome::Fail);
                }
                self.log_effect_start(host, &source)?;
                return Ok(HookOutcome::Continue);
            }
        }
        self.attach_effect(host, effect)
    }

    /// Attaches an effect, ending any instance of the same source already on the host first.
    pub fn force_effect(
        &mut self,
        host: HostId,
        effect: Box<dyn Effect>,
        override_immunity: bool,
    ) -> Result<HookOutcome> {
        let source = effect.source();
        if self.has_effect(host, &source) {
            self.remove_effect(host, &source, true)?;
        }
        self.set_effect(host, effect, override_immunity)
    }

    /// Adds a volatile condition from the catalog to a Mon.
    pub fn add_volatile(&mut self, target: MonHandle, id: &Id) -> Result<HookOutcome> {
        let effect = conditions::create_volatile(id)
            .or_not_found(format_args!("volatile {id}"))?;
        self.set_effect(HostId::Mon(target), effect, false)
    }

    /// Adds a side condition from the catalog to a side.
    pub fn add_side_condition(&mut self, side: usize, id: &Id) -> Result<HookOutcome> {
        let effect = conditions::create_side_condition(id)
            .or_not_found(format_args!("side condition {id}"))?;
        self.set_effect(HostId::Side(side), effect, false)
    }

    /// Lays a hazard from the catalog on a side.
    pub fn add_hazard(&mut self, side: usize, id: &Id) -> Result<HookOutcome> {
        let effect = conditions::create_hazard(id)
            .or_not_found(format_args!("hazard {id}"))?;
        self.set_effect(HostId::Side(side), effect, false)
    }

    /// Starts a pseudo-weather from the catalog.
    pub fn add_pseudo_weather(&mut self, id: &Id) -> Result<HookOutcome> {
        let effect = conditions::create_pseudo_weather(id)
            .or_not_found(format_args!("pseudo-weather {id}"))?;
        self.set_effect(HostId::Field, effect, false)
    }

    /// Inserts an effect into its slot without starting it.
    pub(crate) fn insert_effect(&mut self, host: HostId, effect: Box<dyn Effect>) -> Result<u64> {
        let source = effect.source();
        let duration = effect.initial_duration();
        let order = self.next_order();
        self.effects_mut(host)
            .or_not_found(format_args!("{host}"))?
            .insert(source.clone(), EffectSlot::new(effect, duration, order));
        match (&source, host) {
            (EffectSource::Status(status), HostId::Mon(mon)) => {
                self.mon_mut(mon)?.status = Some(*status);
            }
            (EffectSource::Weather(weather), _) => {
                self.field.weather = Some(weather.clone());
            }
            _ => (),
        }
        Ok(order)
    }

    /// Runs `on_start` for an inserted effect.
    ///
    /// An effect that fails to start is removed without running `on_end`.
    pub(crate) fn start_effect(
        &mut self,
        host: HostId,
        source: &EffectSource,
        announce: bool,
    ) -> Result<HookOutcome> {
        let order = self
            .effects(host)
            .and_then(|effects| effects.slot(source))
            .map(|slot| slot.order)
            .or_not_found(format_args!("effect {source} on {host}"))?;
        let handler = Handler {
            host,
            source: source.clone(),
            order,
            priority: 0,
        };
        let outcome = self
            .call_handler(&handler, |effect, context| effect.on_start(context))?
            .unwrap_or_default();
        if outcome.failed() {
            let still_attached = self
                .effects(host)
                .and_then(|effects| effects.slot(source))
                .is_some_and(|slot| slot.order == order);
            if still_attached {
                if let Some(effects) = self.effects_mut(host) {
                    effects.remove(source);
                }
                self.after_detach(host, source)?;
            }
            return Ok(HookOutcome::Fail);
        }
        if announce {
            self.log_effect_start(host, source)?;
        }
        Ok(HookOutcome::Continue)
    }

    fn attach_effect(&mut self, host: HostId, effect: Box<dyn Effect>) -> Result<HookOutcome> {
        let source = effect.source();
        self.insert_effect(host, effect)?;
        self.start_effect(host, &source, true)
    }

    /// Removes an effect from a host, running its `on_end` hook.
    ///
    /// A non-forced removal is refused if the effect is not removable. Returns whether the effect
    /// was removed.
    pub fn remove_effect(&mut self, host: HostId, source: &EffectSource, force: bool) -> Result<bool> {
        self.detach_effect(host, source, force, true)
    }

    fn detach_effect(
        &mut self,
        host: HostId,
        source: &EffectSource,
        force: bool,
        announce: bool,
    ) -> Result<bool> {
        let Some(slot) = self.effects(host).and_then(|effects| effects.slot(source)) else {
            return Ok(false);
        };
        if !force && slot.effect().is_some_and(|effect| !effect.removable()) {
            return Ok(false);
        }
        let Some(slot) = self.effects_mut(host).and_then(|effects| effects.remove(source)) else {
            return Ok(false);
        };
        if announce {
            self.log_effect_end(host, source)?;
        }
        self.after_detach(host, source)?;
        match slot.effect {
            Some(mut effect) => {
                let mut context = EffectContext::new(self, host, source.clone(), slot.order);
                effect.on_end(&mut context)?;
            }
            None => self.retired.push(RetiredSlot {
                host,
                source: source.clone(),
                order: slot.order,
                retirement: Retirement::End,
            }),
        }
        Ok(true)
    }

    fn after_detach(&mut self, host: HostId, source: &EffectSource) -> Result<()> {
        match (source, host) {
            (EffectSource::Status(_), HostId::Mon(mon)) => self.mon_mut(mon)?.status = None,
            (EffectSource::Weather(weather), _) => {
                if self.field.weather.as_ref() == Some(weather) {
                    self.field.weather = None;
                }
            }
            _ => (),
        }
        Ok(())
    }

    /// Strips every effect from a Mon and resets its boosts.
    ///
    /// With `keep_status`, the status instance is stashed on the Mon instead, so that it can be
    /// reattached on switch-in without starting again.
    pub fn clear_effects(&mut self, mon: MonHandle, keep_status: bool) -> Result<()> {
        let host = HostId::Mon(mon);
        for source in self.mon(mon)?.effects.sources() {
            match source {
                EffectSource::Status(_) if keep_status => self.stash_status(mon, &source)?,
                _ => {
                    self.detach_effect(host, &source, true, false)?;
                }
            }
        }
        let mon = self.mon_mut(mon)?;
        mon.boosts = BoostTable::default();
        mon.must_switch = false;
        Ok(())
    }

    fn stash_status(&mut self, mon: MonHandle, source: &EffectSource) -> Result<()> {
        let Some(slot) = self.mon_mut(mon)?.effects.remove(source) else {
            return Ok(());
        };
        match slot.effect {
            Some(effect) => self.mon_mut(mon)?.stashed_status = Some(effect),
            None => self.retired.push(RetiredSlot {
                host: HostId::Mon(mon),
                source: source.clone(),
                order: slot.order,
                retirement: Retirement::Stash,
            }),
        }
        Ok(())
    }

    /// Switches the active Mon on a side out.
    pub fn switch_out(&mut self, side: usize) -> Result<()> {
        let Some(mon) = self.active_mon_handle(side) else {
            return Ok(());
        };
        if !self.mon(mon)?.fainted() {
            self.activate_effect(&[HostId::Mon(mon)], Hook::SwitchOut, false, |effect, context| {
                effect.on_switch_out(context).map(|_| HookOutcome::Continue)
            })?;
        }
        self.clear_effects(mon, true)?;
        self.mon_mut(mon)?.active = false;
        self.side_mut(side)?.active = None;
        Ok(())
    }

    /// Switches a Mon in, replacing the active Mon on its side.
    ///
    /// Entry hazards run before the Mon's ability and item start. Returns whether the switch
    /// happened.
    pub fn switch_in(&mut self, side: usize, position: usize) -> Result<bool> {
        let handle = MonHandle::new(side, position);
        let mon = self.mon(handle)?;
        if mon.fainted() || mon.active {
            self.invariant_violation(format!(
                "cannot switch in {} on side {side}",
                mon.name
            ));
            return Ok(false);
        }
        if self.active_mon_handle(side).is_some() {
            self.switch_out(side)?;
        }

        self.side_mut(side)?.active = Some(position);
        let mon = self.mon_mut(handle)?;
        mon.active = true;
        mon.active_turns = 0;
        mon.must_switch = false;
        let stashed_status = mon.stashed_status.take();
        let ability = abilities::create_ability(&mon.ability);
        let item = mon.item.as_ref().map(items::create_item);
        let event = battle_event!(
            "switch",
            mon.log_id(),
            format!("species:{}", mon.species),
            format!("health:{}", mon.health())
        );
        self.log(event);

        if let Some(status) = stashed_status {
            self.insert_effect(HostId::Mon(handle), status)?;
        }
        self.insert_effect(HostId::Mon(handle), ability)?;
        if let Some(item) = item {
            self.insert_effect(HostId::Mon(handle), item)?;
        }

        for host in [HostId::Side(side), HostId::Mon(handle)] {
            self.activate_effect(&[host], Hook::SwitchIn, false, |effect, context| {
                effect
                    .on_switch_in(context, handle)
                    .map(|_| HookOutcome::Continue)
            })?;
        }

        if !self.mon(handle)?.fainted() {
            for source in [EffectSource::Ability, EffectSource::Item] {
                if self.has_effect(HostId::Mon(handle), &source) {
                    self.start_effect(HostId::Mon(handle), &source, false)?;
                }
            }
        }
        Ok(true)
    }

    /// Whether a Mon is immune to something.
    ///
    /// Effects may grant or remove immunity before the Mon's typing is considered.
    pub fn is_immune(&mut self, target: MonHandle, immunity: Immunity<'_>) -> Result<bool> {
        if let Some(answer) = self.query_effect(&[HostId::Mon(target)], Hook::GetImmunity, |effect, context| {
            effect.on_get_immunity(context, immunity)
        })? {
            return Ok(answer);
        }
        let mon = self.mon(target)?;
        let immune = match immunity {
            Immunity::Type(typ) => self.type_chart().multiplier(typ, &mon.types) == 0.0,
            Immunity::Status(status) => status
                .immune_types()
                .iter()
                .any(|typ| mon.has_type(*typ)),
            Immunity::Weather(weather) => conditions::weather_immune_types(weather)
                .iter()
                .any(|typ| mon.has_type(*typ)),
            Immunity::Volatile { immune_types, .. } => {
                immune_types.iter().any(|typ| mon.has_type(*typ))
            }
            Immunity::Flag(flag) => flag.immune_types().iter().any(|typ| mon.has_type(*typ)),
            Immunity::Move(_) => false,
        };
        Ok(immune)
    }

    /// Whether a Mon is immune to a move.
    pub fn is_immune_to_move(&mut self, target: MonHandle, active_move: &ActiveMove) -> Result<bool> {
        if let Some(answer) = self.query_effect(&[HostId::Mon(target)], Hook::GetImmunity, |effect, context| {
            effect.on_get_immunity(context, Immunity::Type(active_move.move_type()))
        })? {
            return Ok(answer);
        }
        if let Some(answer) = self.query_effect(&[HostId::Mon(target)], Hook::GetImmunity, |effect, context| {
            effect.on_get_immunity(context, Immunity::Move(active_move))
        })? {
            return Ok(answer);
        }
        let mut flags = active_move.data.flags.iter().copied().collect::<Vec<_>>();
        flags.sort_by_key(|flag| *flag as u8);
        for flag in flags {
            if self.is_immune(target, Immunity::Flag(flag))? {
                return Ok(true);
            }
        }
        if active_move.ignore_immunity {
            return Ok(false);
        }
        let mon = self.mon(target)?;
        Ok(self
            .type_chart()
            .multiplier(active_move.move_type(), &mon.types)
            == 0.0)
    }

    fn is_immune_to_effect(&mut self, host: HostId, effect: &dyn Effect) -> Result<bool> {
        let HostId::Mon(mon) = host else {
            return Ok(false);
        };
        match effect.source() {
            EffectSource::Status(status) => self.is_immune(mon, Immunity::Status(status)),
            EffectSource::Volatile(id) => self.is_immune(
                mon,
                Immunity::Volatile {
                    id: &id,
                    immune_types: effect.immune_types(),
                },
            ),
            _ => Ok(false),
        }
    }

    fn log_effect_start(&mut self, host: HostId, source: &EffectSource) -> Result<()> {
        let event = match (host, source) {
            (HostId::Mon(mon), EffectSource::Status(status)) => battle_event!(
                "status",
                self.mon(mon)?.log_id(),
                format!("status:{status}")
            ),
            (HostId::Mon(mon), EffectSource::Volatile(id)) => {
                battle_event!("start", self.mon(mon)?.log_id(), format!("what:{id}"))
            }
            (HostId::Side(side), _) => {
                battle_event!("sidestart", format!("side:{side}"), format!("what:{source}"))
            }
            (HostId::Field, EffectSource::Weather(weather)) => {
                battle_event!("weather", format!("weather:{weather}"))
            }
            (HostId::Field, _) => battle_event!("fieldstart", format!("what:{source}")),
            _ => return Ok(()),
        };
        self.log(event);
        Ok(())
    }

    fn log_effect_end(&mut self, host: HostId, source: &EffectSource) -> Result<()> {
        let event = match (host, source) {
            (HostId::Mon(mon), EffectSource::Status(status)) => battle_event!(
                "curestatus",
                self.mon(mon)?.log_id(),
                format!("status:{status}")
            ),
            (HostId::Mon(mon), EffectSource::Volatile(id)) => {
                battle_event!("end", self.mon(mon)?.log_id(), format!("what:{id}"))
            }
            (HostId::Side(side), _) => {
                battle_event!("sideend", format!("side:{side}"), format!("what:{source}"))
            }
            (HostId::Field, EffectSource::Weather(_)) => battle_event!("weather", "weather:none"),
            (HostId::Field, _) => battle_event!("fieldend", format!("what:{source}")),
            _ => return Ok(()),
        };
        self.log(event);
        Ok(())
    }

    /// Fails with an error if the Mon is not active.
    pub(crate) fn expect_active(&self, mon: MonHandle) -> Result<()> {
        if self.active_mon_handle(mon.side) != Some(mon) {
            return Err(general_error(format!(
                "mon {},{} is not active",
                mon.side, mon.position
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod core_battle_actions_test {
    use pretty_assertions::assert_eq;

    use crate::{
        battle::{
            DamageCause,
            DamageOutcome,
            HostId,
            MonHandle,
        },
        common::Id,
        conditions::create_volatile,
        effect::{
            EffectSource,
            HookOutcome,
        },
        test_util::{
            test_battle,
            test_battle_with_prng,
            test_mon,
        },
    };

    #[test]
    fn zero_damage_fails_without_touching_hp() {
        let mut battle = test_battle();
        battle.init_battle().unwrap();
        battle.new_logs();

        let vaporeon = MonHandle::new(0, 0);
        assert_eq!(
            battle.damage(vaporeon, 0, DamageCause::Recoil).unwrap(),
            DamageOutcome::Fail
        );
        assert_eq!(battle.mon(vaporeon).unwrap().hp, 401);
        assert_eq!(battle.new_logs(), Vec::<String>::new());
    }

    #[test]
    fn duplicate_volatile_is_rejected_unless_forced() {
        let mut battle = test_battle();
        battle.init_battle().unwrap();
        battle.new_logs();

        let vaporeon = MonHandle::new(0, 0);
        let confusion = Id::from("confusion");
        assert_eq!(
            battle.add_volatile(vaporeon, &confusion).unwrap(),
            HookOutcome::Continue
        );
        assert_eq!(
            battle.add_volatile(vaporeon, &confusion).unwrap(),
            HookOutcome::Fail
        );
        assert_eq!(
            battle.new_logs(),
            vec!["start|mon:Vaporeon,0|what:confusion"]
        );

        assert_eq!(
            battle
                .force_effect(
                    HostId::Mon(vaporeon),
                    create_volatile(&confusion).unwrap(),
                    false
                )
                .unwrap(),
            HookOutcome::Continue
        );
        assert_eq!(
            battle.new_logs(),
            vec![
                "end|mon:Vaporeon,0|what:confusion",
                "start|mon:Vaporeon,0|what:confusion",
            ]
        );
        assert!(battle.has_effect(HostId::Mon(vaporeon), &EffectSource::volatile("confusion")));
    }

    #[test]
    fn grass_types_resist_leech_seed_and_powder() {
        let mut battle =
            test_battle_with_prng(vec![test_mon("Vaporeon")], vec![test_mon("Leafeon")], Vec::new());
        battle.init_battle().unwrap();
        battle.new_logs();

        let vaporeon = MonHandle::new(0, 0);
        let leafeon = MonHandle::new(1, 0);
        let leech_seed = Id::from("leechseed");
        assert_eq!(
            battle.add_volatile(leafeon, &leech_seed).unwrap(),
            HookOutcome::Fail
        );
        assert_eq!(battle.new_logs(), Vec::<String>::new());
        assert_eq!(
            battle
                .set_effect(
                    HostId::Mon(leafeon),
                    create_volatile(&leech_seed).unwrap(),
                    true
                )
                .unwrap(),
            HookOutcome::Continue
        );
        assert_eq!(
            battle.add_volatile(vaporeon, &leech_seed).unwrap(),
            HookOutcome::Continue
        );

        let spore = battle.active_move(&Id::from("spore")).unwrap();
        assert!(battle.is_immune_to_move(leafeon, &spore).unwrap());
        assert!(!battle.is_immune_to_move(vaporeon, &spore).unwrap());
    }
}
