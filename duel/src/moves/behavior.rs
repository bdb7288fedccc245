use std::sync::LazyLock;

use anyhow::Result;
use duel_data::Type;
use duel_prng::rand_util;

use crate::{
    battle::{
        Battle,
        DamageCause,
        MonHandle,
    },
    common::{
        FastHashMap,
        Id,
    },
    effect::HookOutcome,
    moves::ActiveMove,
};

/// Behavior of a move that its data alone cannot describe.
#[allow(unused_variables)]
pub trait MoveBehavior: Send + Sync {
    /// Base power for this use of the move.
    fn base_power(
        &self,
        battle: &Battle,
        user: MonHandle,
        target: MonHandle,
        active_move: &ActiveMove,
    ) -> Result<u32> {
        Ok(active_move.data.base_power)
    }

    /// Fixed damage that replaces the damage calculation.
    fn damage_override(
        &self,
        battle: &Battle,
        user: MonHandle,
        target: MonHandle,
        active_move: &ActiveMove,
    ) -> Result<Option<u16>> {
        Ok(None)
    }

    fn on_modify_move(
        &self,
        battle: &mut Battle,
        user: MonHandle,
        active_move: &mut ActiveMove,
    ) -> Result<()> {
        Ok(())
    }

    /// Checked before the move hits.
    fn check_success(
        &self,
        battle: &mut Battle,
        user: MonHandle,
        target: Option<MonHandle>,
        active_move: &ActiveMove,
    ) -> Result<HookOutcome> {
        Ok(HookOutcome::Continue)
    }

    /// Runs after every hit of the move has resolved.
    fn after_hits(
        &self,
        battle: &mut Battle,
        user: MonHandle,
        active_move: &ActiveMove,
    ) -> Result<()> {
        Ok(())
    }
}

struct LevelDamage;

impl MoveBehavior for LevelDamage {
    fn damage_override(
        &self,
        battle: &Battle,
        user: MonHandle,
        _: MonHandle,
        _: &ActiveMove,
    ) -> Result<Option<u16>> {
        Ok(Some(battle.mon(user)?.level as u16))
    }
}

struct SuperFang;

impl MoveBehavior for SuperFang {
    fn damage_override(
        &self,
        battle: &Battle,
        _: MonHandle,
        target: MonHandle,
        _: &ActiveMove,
    ) -> Result<Option<u16>> {
        Ok(Some((battle.mon(target)?.hp / 2).max(1)))
    }
}

struct Eruption;

impl MoveBehavior for Eruption {
    fn base_power(
        &self,
        battle: &Battle,
        user: MonHandle,
        _: MonHandle,
        active_move: &ActiveMove,
    ) -> Result<u32> {
        let user = battle.mon(user)?;
        let power = active_move.data.base_power * user.hp as u32 / user.max_hp.max(1) as u32;
        Ok(power.max(1))
    }
}

struct Struggle;

impl MoveBehavior for Struggle {
    fn on_modify_move(&self, _: &mut Battle, _: MonHandle, active_move: &mut ActiveMove) -> Result<()> {
        active_move.data.primary_type = Type::None;
        Ok(())
    }

    fn after_hits(&self, battle: &mut Battle, user: MonHandle, _: &ActiveMove) -> Result<()> {
        let recoil = (battle.mon(user)?.max_hp / 4).max(1);
        battle.damage(user, recoil as u32, DamageCause::Recoil)?;
        Ok(())
    }
}

struct Protect;

impl MoveBehavior for Protect {
    fn check_success(
        &self,
        battle: &mut Battle,
        user: MonHandle,
        _: Option<MonHandle>,
        active_move: &ActiveMove,
    ) -> Result<HookOutcome> {
        if !battle.foe_moves_later(user) {
            return Ok(HookOutcome::Fail);
        }
        // Consecutive uses succeed a third of the time.
        if battle.mon(user)?.last_move.as_ref() == Some(&active_move.id) {
            return Ok(rand_util::chance(battle.prng(), 1, 3).into());
        }
        Ok(HookOutcome::Continue)
    }
}

struct ThunderWave;

impl MoveBehavior for ThunderWave {
    fn on_modify_move(&self, _: &mut Battle, _: MonHandle, active_move: &mut ActiveMove) -> Result<()> {
        active_move.ignore_immunity = false;
        Ok(())
    }
}

static BEHAVIORS: LazyLock<FastHashMap<Id, Box<dyn MoveBehavior>>> = LazyLock::new(|| {
    let mut behaviors: FastHashMap<Id, Box<dyn MoveBehavior>> = FastHashMap::default();
    behaviors.insert(Id::from_known("nightshade"), Box::new(LevelDamage));
    behaviors.insert(Id::from_known("seismictoss"), Box::new(LevelDamage));
    behaviors.insert(Id::from_known("superfang"), Box::new(SuperFang));
    behaviors.insert(Id::from_known("eruption"), Box::new(Eruption));
    behaviors.insert(Id::from_known("struggle"), Box::new(Struggle));
    behaviors.insert(Id::from_known("protect"), Box::new(Protect));
    behaviors.insert(Id::from_known("thunderwave"), Box::new(ThunderWave));
    behaviors
});

/// Looks up the custom behavior of a move.
pub fn move_behavior(id: &Id) -> Option<&'static dyn MoveBehavior> {
    BEHAVIORS.get(id).map(|behavior| behavior.as_ref())
}
