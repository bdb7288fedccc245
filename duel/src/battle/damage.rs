use anyhow::Result;
use duel_data::{
    Boost,
    MoveCategory,
    Stat,
    Type,
};
use duel_prng::rand_util;

use crate::{
    battle::{
        Battle,
        DamageOutcome,
        HostId,
        MonHandle,
        calculations::apply_boost,
    },
    battle_event,
    common::gf_round,
    effect::Hook,
    moves::{
        ActiveMove,
        move_behavior,
    },
};

/// Critical hit chance denominators, indexed by critical hit ratio.
const CRIT_ROLL: [u64; 4] = [16, 8, 2, 1];

/// Calculates the damage a move would deal to a target.
///
/// Consumes exactly two random draws, the critical hit roll and then the damage roll, unless the
/// calculation fails or is overridden before base power is computed. Sets
/// [`ActiveMove::crit`].
pub fn calculate_damage(
    battle: &mut Battle,
    user: MonHandle,
    target: MonHandle,
    active_move: &mut ActiveMove,
) -> Result<DamageOutcome> {
    if active_move.is_status() {
        return Ok(DamageOutcome::Fail);
    }
    if battle.is_immune_to_move(target, active_move)? {
        return Ok(DamageOutcome::Fail);
    }

    let behavior = move_behavior(&active_move.id);
    if let Some(behavior) = behavior {
        if let Some(damage) = behavior.damage_override(battle, user, target, active_move)? {
            return Ok(DamageOutcome::Damage(damage.max(1)));
        }
    }

    let base_power = match behavior {
        Some(behavior) => behavior.base_power(battle, user, target, active_move)?,
        None => active_move.data.base_power,
    };
    if base_power == 0 {
        return Ok(DamageOutcome::Fail);
    }
    let base_power = modify_base_power(battle, user, target, active_move, base_power)?;

    let crit = roll_crit(battle, user, active_move)?;
    active_move.crit = crit;
    let active_move: &ActiveMove = active_move;

    let level = battle.mon(user)?.level as u64;
    let (attack, defense) = attacking_stats(battle, user, target, active_move, crit)?;
    let mut damage =
        (2 * level / 5 + 2) * base_power as u64 * attack as u64 / defense.max(1) as u64 / 50 + 2;

    if crit {
        damage = damage * 3 / 2;
    }
    let roll = 100 - rand_util::range(battle.prng(), 0, 16);
    damage = damage * roll / 100;

    let move_type = active_move.move_type();
    if move_type != Type::None && battle.mon(user)?.has_type(move_type) {
        damage = (damage as f64 * active_move.stab_multiplier) as u64;
    }

    let weather_damage = battle.accumulate_effect(
        &[HostId::Field],
        Hook::WeatherModifyDamage,
        damage as f64,
        |effect, context, damage| effect.on_weather_modify_damage(context, active_move, damage),
    )?;
    let damage = gf_round(weather_damage) as f64;

    let effectiveness = effectiveness(battle, user, target, active_move)?;
    let damage = damage * effectiveness;

    let damage = battle.accumulate_effect(
        &[HostId::Mon(user), HostId::Side(user.side), HostId::Field],
        Hook::ModifyDamage,
        damage,
        |effect, context, damage| {
            effect.on_modify_damage(context, active_move, user, target, effectiveness, damage)
        },
    )?;
    let damage = battle.accumulate_effect(
        &[HostId::Mon(target), HostId::Side(target.side)],
        Hook::ModifyFoeDamage,
        damage,
        |effect, context, damage| {
            effect.on_modify_foe_damage(
                context,
                active_move,
                user,
                target,
                crit,
                effectiveness,
                damage,
            )
        },
    )?;

    let damage = gf_round(damage).clamp(1, u16::MAX as u32) as u16;
    Ok(DamageOutcome::Damage(damage))
}

fn modify_base_power(
    battle: &mut Battle,
    user: MonHandle,
    target: MonHandle,
    active_move: &ActiveMove,
    base_power: u32,
) -> Result<u32> {
    let base_power = battle.accumulate_effect(
        &[HostId::Mon(user), HostId::Field],
        Hook::ModifyBasePower,
        base_power as f64,
        |effect, context, base_power| {
            effect.on_modify_base_power(context, active_move, user, target, base_power)
        },
    )?;
    Ok(gf_round(base_power).max(1))
}

fn roll_crit(battle: &mut Battle, user: MonHandle, active_move: &ActiveMove) -> Result<bool> {
    let ratio = active_move.data.crit_ratio.min(3) as usize;
    let roll = rand_util::range(battle.prng(), 0, CRIT_ROLL[ratio]) == 0;
    let crit = active_move.data.always_crit || roll;
    let hosts = match battle.foe_of(user) {
        Some(target) => Vec::from([HostId::Mon(user), HostId::Mon(target)]),
        None => Vec::from([HostId::Mon(user)]),
    };
    battle.accumulate_effect(&hosts, Hook::ModifyCrit, crit, |effect, context, crit| {
        effect.on_modify_crit(context, active_move, user, crit)
    })
}

/// The attacking and defending stats, after boosts and modifiers.
fn attacking_stats(
    battle: &mut Battle,
    user: MonHandle,
    target: MonHandle,
    active_move: &ActiveMove,
    crit: bool,
) -> Result<(u32, u32)> {
    let offensive = match active_move.category() {
        MoveCategory::Special => Stat::SpAtk,
        _ => Stat::Atk,
    };
    let defensive = match active_move
        .data
        .defensive_category
        .unwrap_or(active_move.category())
    {
        MoveCategory::Special => Stat::SpDef,
        _ => Stat::Def,
    };

    let attacker = battle.mon(user)?;
    let mut attack_stage = boost_stage(attacker.boosts.get(boost_for(offensive)), active_move.data.ignore_offensive_boosts);
    if crit && attack_stage < 0 {
        attack_stage = 0;
    }
    let attack = apply_boost(attacker.stat(offensive) as u32, attack_stage);

    let defender = battle.mon(target)?;
    let mut defense_stage = boost_stage(defender.boosts.get(boost_for(defensive)), active_move.data.ignore_defensive_boosts);
    if crit && defense_stage > 0 {
        defense_stage = 0;
    }
    let defense = apply_boost(defender.stat(defensive) as u32, defense_stage);

    let attack = match offensive {
        Stat::SpAtk => battle.accumulate_effect(
            &[HostId::Mon(user)],
            Hook::ModifySpA,
            attack as f64,
            |effect, context, spa| effect.on_modify_spa(context, user, active_move, spa),
        )?,
        _ => battle.accumulate_effect(
            &[HostId::Mon(user)],
            Hook::ModifyAtk,
            attack as f64,
            |effect, context, atk| effect.on_modify_atk(context, user, active_move, atk),
        )?,
    };
    let defense = match defensive {
        Stat::SpDef => battle.accumulate_effect(
            &[HostId::Mon(target), HostId::Field],
            Hook::ModifySpD,
            defense as f64,
            |effect, context, spd| effect.on_modify_spd(context, target, active_move, spd),
        )?,
        _ => battle.accumulate_effect(
            &[HostId::Mon(target)],
            Hook::ModifyDef,
            defense as f64,
            |effect, context, def| effect.on_modify_def(context, target, active_move, def),
        )?,
    };
    Ok((attack as u32, defense as u32))
}

fn boost_for(stat: Stat) -> Boost {
    Boost::for_stat(stat).unwrap_or(Boost::Atk)
}

fn boost_stage(stage: i8, ignore: bool) -> i8 {
    if ignore { 0 } else { stage }
}

/// Type effectiveness of the move against the target, after modifiers.
///
/// Logs super-effective and resisted hits.
fn effectiveness(
    battle: &mut Battle,
    user: MonHandle,
    target: MonHandle,
    active_move: &ActiveMove,
) -> Result<f64> {
    let defender = battle.mon(target)?;
    let base = battle
        .type_chart()
        .multiplier(active_move.move_type(), &defender.types);
    let effectiveness = battle.accumulate_effect(
        &[HostId::Mon(user), HostId::Field],
        Hook::ModifyEffectiveness,
        base,
        |effect, context, effectiveness| {
            effect.on_modify_effectiveness(context, active_move, target, effectiveness)
        },
    )?;
    let log_id = battle.mon(target)?.log_id();
    if effectiveness > 1.0 {
        battle.log(battle_event!("supereffective", log_id));
    } else if effectiveness < 1.0 && effectiveness > 0.0 {
        battle.log(battle_event!("resisted", log_id));
    }
    Ok(effectiveness)
}

#[cfg(test)]
mod damage_test {
    use assert_matches::assert_matches;
    use duel_data::StatTable;

    use crate::{
        battle::{
            Battle,
            DamageOutcome,
            MonHandle,
            damage::calculate_damage,
        },
        test_util::{
            test_battle_with_prng,
            test_mon,
        },
    };

    fn damage(battle: &mut Battle, user: MonHandle, target: MonHandle, move_id: &str) -> DamageOutcome {
        let mut active_move = battle.active_move(&move_id.into()).unwrap();
        calculate_damage(battle, user, target, &mut active_move).unwrap()
    }

    #[test]
    fn calculates_max_roll_without_crit() {
        // Crit roll of 1 misses, damage roll of 0 is the maximum.
        let mut battle = test_battle_with_prng(
            vec![test_mon("Vaporeon")],
            vec![test_mon("Flareon")],
            vec![1, 0],
        );
        battle.init_battle().unwrap();
        assert_eq!(
            damage(&mut battle, MonHandle::new(0, 0), MonHandle::new(1, 0), "dragonclaw"),
            DamageOutcome::Damage(73)
        );
    }

    #[test]
    fn calculates_min_roll_without_crit() {
        let mut battle = test_battle_with_prng(
            vec![test_mon("Vaporeon")],
            vec![test_mon("Flareon")],
            vec![1, 15],
        );
        battle.init_battle().unwrap();
        assert_eq!(
            damage(&mut battle, MonHandle::new(0, 0), MonHandle::new(1, 0), "dragonclaw"),
            DamageOutcome::Damage(62)
        );
    }

    #[test]
    fn type_immunity_fails_before_any_draw() {
        let mut battle = test_battle_with_prng(
            vec![test_mon("Vaporeon")],
            vec![test_mon("Sylveon")],
            vec![],
        );
        battle.init_battle().unwrap();
        assert_matches!(
            damage(&mut battle, MonHandle::new(0, 0), MonHandle::new(1, 0), "dragonclaw"),
            DamageOutcome::Fail
        );
    }

    #[test]
    fn level_damage_ignores_stats() {
        let mut attacker = test_mon("Vaporeon");
        attacker.evs = Some(StatTable::uniform(252));
        let mut battle =
            test_battle_with_prng(vec![attacker], vec![test_mon("Flareon")], vec![]);
        battle.init_battle().unwrap();
        assert_eq!(
            damage(&mut battle, MonHandle::new(0, 0), MonHandle::new(1, 0), "nightshade"),
            DamageOutcome::Damage(100)
        );
    }
}
