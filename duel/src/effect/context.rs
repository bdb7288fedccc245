use anyhow::Result;
use duel_prng::PseudoRandomNumberGenerator;

use crate::{
    battle::{
        Battle,
        HostId,
        Mon,
        MonHandle,
    },
    effect::EffectSource,
    error::general_error,
    log::BattleEvent,
};

/// Context for a single effect hook call.
///
/// The effect itself is detached from its host while the hook runs, so the hook has full mutable
/// access to the battle.
pub struct EffectContext<'b> {
    battle: &'b mut Battle,
    host: HostId,
    source: EffectSource,
    order: u64,
}

impl<'b> EffectContext<'b> {
    pub(crate) fn new(battle: &'b mut Battle, host: HostId, source: EffectSource, order: u64) -> Self {
        Self {
            battle,
            host,
            source,
            order,
        }
    }

    pub fn battle(&mut self) -> &mut Battle {
        self.battle
    }

    pub fn battle_ref(&self) -> &Battle {
        self.battle
    }

    /// The host the effect is attached to.
    pub fn host(&self) -> HostId {
        self.host
    }

    /// The slot the effect occupies on its host.
    pub fn source(&self) -> &EffectSource {
        &self.source
    }

    /// The Mon the effect is attached to.
    pub fn mon_handle(&self) -> Result<MonHandle> {
        match self.host {
            HostId::Mon(mon) => Ok(mon),
            host => Err(general_error(format!(
                "effect {} is attached to {host}, not a mon",
                self.source
            ))),
        }
    }

    pub fn mon(&self) -> Result<&Mon> {
        let mon = self.mon_handle()?;
        self.battle.mon(mon)
    }

    pub fn mon_mut(&mut self) -> Result<&mut Mon> {
        let mon = self.mon_handle()?;
        self.battle.mon_mut(mon)
    }

    /// The side the host belongs to, if any.
    pub fn side_index(&self) -> Option<usize> {
        self.host.side()
    }

    /// The active Mon on the other side of the host.
    pub fn foe(&self) -> Option<MonHandle> {
        let side = self.side_index()?;
        self.battle.active_mon_handle(1 - side)
    }

    /// The remaining duration of the effect.
    pub fn duration(&self) -> Option<u8> {
        self.battle
            .effects(self.host)
            .and_then(|effects| effects.slot(&self.source))
            .filter(|slot| slot.order == self.order)
            .and_then(|slot| slot.duration)
    }

    pub fn set_duration(&mut self, duration: Option<u8>) {
        if let Some(slot) = self
            .battle
            .effects_mut(self.host)
            .and_then(|effects| effects.slot_mut(&self.source))
            .filter(|slot| slot.order == self.order)
        {
            slot.duration = duration;
        }
    }

    /// Removes the effect from its host.
    ///
    /// The effect's `on_end` hook runs after the current hook returns.
    pub fn remove_self(&mut self) -> Result<bool> {
        let still_attached = self
            .battle
            .effects(self.host)
            .and_then(|effects| effects.slot(&self.source))
            .is_some_and(|slot| slot.order == self.order);
        if !still_attached {
            return Ok(false);
        }
        self.battle.remove_effect(self.host, &self.source, true)
    }

    pub fn prng(&mut self) -> &mut dyn PseudoRandomNumberGenerator {
        self.battle.prng()
    }

    pub fn log(&mut self, event: BattleEvent) {
        self.battle.log(event)
    }
}
