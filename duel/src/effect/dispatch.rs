use anyhow::Result;
use log::debug;

use crate::{
    battle::{
        Battle,
        HostId,
    },
    effect::{
        Effect,
        EffectContext,
        EffectSource,
        Hook,
        HookOutcome,
    },
};

/// A handler collected for a single dispatch pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handler {
    pub host: HostId,
    pub source: EffectSource,
    pub order: u64,
    pub priority: i32,
}

/// What happens to an effect that was removed while one of its hooks was running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Retirement {
    /// Run `on_end` once the hook returns.
    End,
    /// Keep the instance on the Mon for a later switch-in.
    Stash,
}

#[derive(Debug, Clone)]
pub(crate) struct RetiredSlot {
    pub host: HostId,
    pub source: EffectSource,
    pub order: u64,
    pub retirement: Retirement,
}

impl Battle {
    /// Collects every handler for the hook across the given hosts, in call order.
    ///
    /// Handlers run by descending priority, with ties broken by attach order. Ability handlers on
    /// a mold-broken Mon are skipped.
    pub fn collect_handlers(&self, hosts: &[HostId], hook: Hook) -> Vec<Handler> {
        let mut handlers = Vec::new();
        for host in hosts {
            let Some(effects) = self.effects(*host) else {
                continue;
            };
            for (source, slot) in effects.iter() {
                let Some(effect) = slot.effect() else {
                    continue;
                };
                if *source == EffectSource::Ability && self.is_mold_broken(*host) {
                    continue;
                }
                if let Some(priority) = effect.priority_of(hook) {
                    handlers.push(Handler {
                        host: *host,
                        source: source.clone(),
                        order: slot.order,
                        priority,
                    });
                }
            }
        }
        handlers.sort_by(|a, b| {
            b.priority
                .cmp(&a.priority)
                .then_with(|| a.order.cmp(&b.order))
        });
        handlers
    }

    /// Calls a single handler.
    ///
    /// The handler is skipped, returning `None`, if its effect was removed or replaced since it
    /// was collected.
    pub fn call_handler<R, F>(&mut self, handler: &Handler, call: F) -> Result<Option<R>>
    where
        F: FnOnce(&mut dyn Effect, &mut EffectContext) -> Result<R>,
    {
        let Some(slot) = self
            .effects_mut(handler.host)
            .and_then(|effects| effects.slot_mut(&handler.source))
        else {
            return Ok(None);
        };
        if slot.order != handler.order {
            return Ok(None);
        }
        let Some(mut effect) = slot.effect.take() else {
            return Ok(None);
        };
        let result = {
            let mut context =
                EffectContext::new(self, handler.host, handler.source.clone(), handler.order);
            call(effect.as_mut(), &mut context)
        };
        self.settle_effect(handler.host, &handler.source, handler.order, effect)?;
        result.map(Some)
    }

    /// Returns a detached effect to its slot, or finishes its removal if the slot was removed
    /// in the meantime.
    fn settle_effect(
        &mut self,
        host: HostId,
        source: &EffectSource,
        order: u64,
        mut effect: Box<dyn Effect>,
    ) -> Result<()> {
        if let Some(index) = self
            .retired
            .iter()
            .position(|retired| retired.host == host && retired.order == order)
        {
            let retired = self.retired.remove(index);
            match retired.retirement {
                Retirement::End => {
                    let mut context = EffectContext::new(self, host, source.clone(), order);
                    effect.on_end(&mut context)?;
                }
                Retirement::Stash => {
                    if let HostId::Mon(mon) = host {
                        self.mon_mut(mon)?.stashed_status = Some(effect);
                    }
                }
            }
            return Ok(());
        }
        if let Some(slot) = self
            .effects_mut(host)
            .and_then(|effects| effects.slot_mut(source))
            .filter(|slot| slot.order == order)
        {
            slot.effect = Some(effect);
        }
        Ok(())
    }

    /// Runs the hook on every effect across the given hosts, as one merged sequence.
    ///
    /// With `failfast`, the first [`HookOutcome::Fail`] stops the pass and is returned. Otherwise,
    /// failures are ignored.
    pub fn activate_effect<F>(
        &mut self,
        hosts: &[HostId],
        hook: Hook,
        failfast: bool,
        mut call: F,
    ) -> Result<HookOutcome>
    where
        F: FnMut(&mut dyn Effect, &mut EffectContext) -> Result<HookOutcome>,
    {
        for handler in self.collect_handlers(hosts, hook) {
            let outcome = self.call_handler(&handler, &mut call)?;
            if failfast && outcome == Some(HookOutcome::Fail) {
                debug!("{hook:?} failed by {} on {}", handler.source, handler.host);
                return Ok(HookOutcome::Fail);
            }
        }
        Ok(HookOutcome::Continue)
    }

    /// Folds a value through the hook on every effect across the given hosts.
    ///
    /// Intermediate values are passed along unrounded.
    pub fn accumulate_effect<T, F>(
        &mut self,
        hosts: &[HostId],
        hook: Hook,
        seed: T,
        mut call: F,
    ) -> Result<T>
    where
        T: Copy,
        F: FnMut(&mut dyn Effect, &mut EffectContext, T) -> Result<T>,
    {
        let mut value = seed;
        for handler in self.collect_handlers(hosts, hook) {
            if let Some(next) =
                self.call_handler(&handler, |effect, context| call(effect, context, value))?
            {
                value = next;
            }
        }
        Ok(value)
    }

    /// Returns the first answer given by an effect across the given hosts.
    pub fn query_effect<T, F>(&mut self, hosts: &[HostId], hook: Hook, mut call: F) -> Result<Option<T>>
    where
        F: FnMut(&mut dyn Effect, &mut EffectContext) -> Result<Option<T>>,
    {
        for handler in self.collect_handlers(hosts, hook) {
            if let Some(Some(answer)) = self.call_handler(&handler, &mut call)? {
                return Ok(Some(answer));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod dispatch_test {
    use std::sync::{
        Arc,
        Mutex,
    };

    use anyhow::Result;
    use pretty_assertions::assert_eq;

    use crate::{
        battle::{
            Battle,
            HostId,
            MonHandle,
        },
        effect::{
            Effect,
            EffectContext,
            EffectSource,
            Hook,
            HookOutcome,
        },
        test_util::test_battle,
    };

    #[derive(Debug, Clone)]
    struct Recorder {
        id: &'static str,
        hooks: &'static [(Hook, i32)],
        fail: bool,
        calls: Arc<Mutex<Vec<&'static str>>>,
        remove_other: Option<EffectSource>,
    }

    impl Effect for Recorder {
        fn source(&self) -> EffectSource {
            EffectSource::volatile(self.id)
        }

        fn name(&self) -> &str {
            self.id
        }

        fn hooks(&self) -> &'static [(Hook, i32)] {
            self.hooks
        }

        fn on_before_turn(&mut self, context: &mut EffectContext) -> Result<()> {
            self.calls.lock().unwrap().push(self.id);
            if let Some(other) = &self.remove_other {
                let host = context.host();
                context.battle().remove_effect(host, other, true)?;
            }
            Ok(())
        }

        fn on_end(&mut self, _: &mut EffectContext) -> Result<()> {
            self.calls.lock().unwrap().push("end");
            Ok(())
        }

        fn on_before_move(
            &mut self,
            _: &mut EffectContext,
            _: &mut crate::moves::ActiveMove,
        ) -> Result<HookOutcome> {
            self.calls.lock().unwrap().push(self.id);
            Ok(if self.fail {
                HookOutcome::Fail
            } else {
                HookOutcome::Continue
            })
        }

        fn on_modify_spe(&mut self, _: &mut EffectContext, _: MonHandle, spe: f64) -> Result<f64> {
            self.calls.lock().unwrap().push(self.id);
            Ok(spe * 1.5)
        }
    }

    fn recorder(
        id: &'static str,
        hooks: &'static [(Hook, i32)],
        calls: &Arc<Mutex<Vec<&'static str>>>,
    ) -> Box<dyn Effect> {
        Box::new(Recorder {
            id,
            hooks,
            fail: false,
            calls: calls.clone(),
            remove_other: None,
        })
    }

    fn host() -> HostId {
        HostId::Mon(MonHandle::new(0, 0))
    }

    fn battle() -> Battle {
        let mut battle = test_battle();
        battle.init_battle().unwrap();
        battle
    }

    #[test]
    fn calls_handlers_by_priority_then_attach_order() {
        let mut battle = battle();
        let calls = Arc::new(Mutex::new(Vec::new()));
        battle
            .set_effect(host(), recorder("low", &[(Hook::BeforeTurn, 1)], &calls), false)
            .unwrap();
        battle
            .set_effect(host(), recorder("first", &[(Hook::BeforeTurn, 5)], &calls), false)
            .unwrap();
        battle
            .set_effect(host(), recorder("second", &[(Hook::BeforeTurn, 5)], &calls), false)
            .unwrap();
        battle
            .activate_effect(&[host()], Hook::BeforeTurn, false, |effect, context| {
                effect.on_before_turn(context).map(|_| HookOutcome::Continue)
            })
            .unwrap();
        assert_eq!(*calls.lock().unwrap(), vec!["first", "second", "low"]);
    }

    #[test]
    fn failfast_stops_lower_priority_handlers() {
        let mut battle = battle();
        let calls = Arc::new(Mutex::new(Vec::new()));
        battle
            .set_effect(
                host(),
                Box::new(Recorder {
                    id: "high",
                    hooks: &[(Hook::BeforeMove, 5)],
                    fail: true,
                    calls: calls.clone(),
                    remove_other: None,
                }),
                false,
            )
            .unwrap();
        battle
            .set_effect(host(), recorder("low", &[(Hook::BeforeMove, 1)], &calls), false)
            .unwrap();

        let mut active_move = battle.active_move(&"tackle".into()).unwrap();
        let outcome = battle
            .activate_effect(&[host()], Hook::BeforeMove, true, |effect, context| {
                effect.on_before_move(context, &mut active_move)
            })
            .unwrap();
        assert_eq!(outcome, HookOutcome::Fail);
        assert_eq!(*calls.lock().unwrap(), vec!["high"]);

        calls.lock().unwrap().clear();
        let outcome = battle
            .activate_effect(&[host()], Hook::BeforeMove, false, |effect, context| {
                effect.on_before_move(context, &mut active_move)
            })
            .unwrap();
        assert_eq!(outcome, HookOutcome::Continue);
        assert_eq!(*calls.lock().unwrap(), vec!["high", "low"]);
    }

    #[test]
    fn accumulates_without_rounding() {
        let mut battle = battle();
        let calls = Arc::new(Mutex::new(Vec::new()));
        battle
            .set_effect(host(), recorder("a", &[(Hook::ModifySpe, 0)], &calls), false)
            .unwrap();
        battle
            .set_effect(host(), recorder("b", &[(Hook::ModifySpe, 0)], &calls), false)
            .unwrap();
        let mon = MonHandle::new(0, 0);
        let value = battle
            .accumulate_effect(&[host()], Hook::ModifySpe, 1.0, |effect, context, spe| {
                effect.on_modify_spe(context, mon, spe)
            })
            .unwrap();
        assert_eq!(value, 2.25);
    }

    #[test]
    fn skips_handlers_removed_earlier_in_the_pass() {
        let mut battle = battle();
        let calls = Arc::new(Mutex::new(Vec::new()));
        battle
            .set_effect(
                host(),
                Box::new(Recorder {
                    id: "remover",
                    hooks: &[(Hook::BeforeTurn, 2)],
                    fail: false,
                    calls: calls.clone(),
                    remove_other: Some(EffectSource::volatile("victim")),
                }),
                false,
            )
            .unwrap();
        battle
            .set_effect(host(), recorder("victim", &[(Hook::BeforeTurn, 1)], &calls), false)
            .unwrap();
        battle
            .activate_effect(&[host()], Hook::BeforeTurn, false, |effect, context| {
                effect.on_before_turn(context).map(|_| HookOutcome::Continue)
            })
            .unwrap();
        assert_eq!(*calls.lock().unwrap(), vec!["remover", "end"]);
        assert!(!battle.has_effect(host(), &EffectSource::volatile("victim")));
    }

    #[test]
    fn self_removal_ends_after_hook_returns() {
        let mut battle = battle();
        let calls = Arc::new(Mutex::new(Vec::new()));
        battle
            .set_effect(
                host(),
                Box::new(Recorder {
                    id: "selfish",
                    hooks: &[(Hook::BeforeTurn, 0)],
                    fail: false,
                    calls: calls.clone(),
                    remove_other: Some(EffectSource::volatile("selfish")),
                }),
                false,
            )
            .unwrap();
        battle
            .activate_effect(&[host()], Hook::BeforeTurn, false, |effect, context| {
                effect.on_before_turn(context).map(|_| HookOutcome::Continue)
            })
            .unwrap();
        assert_eq!(*calls.lock().unwrap(), vec!["selfish", "end"]);
        assert!(!battle.has_effect(host(), &EffectSource::volatile("selfish")));
    }
}
