//! Catalog of conditions: statuses, volatiles, side conditions, hazards, pseudo-weathers, and
//! weathers.
//!
//! Conditions are looked up by ID when a move or another effect attaches them.

mod hazards;
mod pseudo_weather;
mod side_conditions;
mod status;
mod volatiles;
mod weather;

use std::sync::LazyLock;

use anyhow::Result;
use duel_data::{
    Status,
    Type,
};
pub use hazards::{
    Spikes,
    StealthRock,
    ToxicSpikes,
};
pub use pseudo_weather::{
    ElectricTerrain,
    TrickRoom,
};
pub use side_conditions::{
    LightScreen,
    Reflect,
    Safeguard,
    Tailwind,
    Wish,
};
pub use status::{
    Burn,
    Freeze,
    Paralysis,
    Poison,
    Sleep,
    Toxic,
};
pub use volatiles::{
    Attract,
    ChoiceLock,
    Confusion,
    DestinyBond,
    Disable,
    Flinch,
    LeechSeed,
    Protect,
    Taunt,
};
pub use weather::{
    WeatherEffect,
    WeatherKind,
};

use crate::{
    battle::{
        DamageCause,
        DamageOutcome,
    },
    battle_event,
    common::{
        FastHashMap,
        Id,
    },
    effect::{
        Effect,
        EffectContext,
    },
};

type Constructor = fn() -> Box<dyn Effect>;

fn boxed<E>() -> Box<dyn Effect>
where
    E: Effect + Default + Clone + 'static,
{
    Box::new(E::default())
}

fn registry<const N: usize>(entries: [(&'static str, Constructor); N]) -> FastHashMap<Id, Constructor> {
    entries
        .into_iter()
        .map(|(id, constructor)| (Id::from_known(id), constructor))
        .collect()
}

static VOLATILES: LazyLock<FastHashMap<Id, Constructor>> = LazyLock::new(|| {
    let entries: [(&'static str, Constructor); 8] = [
        ("attract", boxed::<Attract>),
        ("confusion", boxed::<Confusion>),
        ("destinybond", boxed::<DestinyBond>),
        ("disable", boxed::<Disable>),
        ("flinch", boxed::<Flinch>),
        ("leechseed", boxed::<LeechSeed>),
        ("protect", boxed::<Protect>),
        ("taunt", boxed::<Taunt>),
    ];
    registry(entries)
});

static SIDE_CONDITIONS: LazyLock<FastHashMap<Id, Constructor>> = LazyLock::new(|| {
    let entries: [(&'static str, Constructor); 5] = [
        ("lightscreen", boxed::<LightScreen>),
        ("reflect", boxed::<Reflect>),
        ("safeguard", boxed::<Safeguard>),
        ("tailwind", boxed::<Tailwind>),
        ("wish", boxed::<Wish>),
    ];
    registry(entries)
});

static HAZARDS: LazyLock<FastHashMap<Id, Constructor>> = LazyLock::new(|| {
    let entries: [(&'static str, Constructor); 3] = [
        ("spikes", boxed::<Spikes>),
        ("stealthrock", boxed::<StealthRock>),
        ("toxicspikes", boxed::<ToxicSpikes>),
    ];
    registry(entries)
});

static PSEUDO_WEATHERS: LazyLock<FastHashMap<Id, Constructor>> = LazyLock::new(|| {
    let entries: [(&'static str, Constructor); 2] = [
        ("electricterrain", boxed::<ElectricTerrain>),
        ("trickroom", boxed::<TrickRoom>),
    ];
    registry(entries)
});

fn create(registry: &FastHashMap<Id, Constructor>, id: &Id) -> Option<Box<dyn Effect>> {
    registry.get(id).map(|constructor| constructor())
}

/// Creates the effect for a major status.
pub fn status_effect(status: Status) -> Box<dyn Effect> {
    match status {
        Status::Burn => Box::new(Burn),
        Status::Freeze => Box::new(Freeze),
        Status::Paralysis => Box::new(Paralysis),
        Status::Poison => Box::new(Poison),
        Status::Sleep => Box::new(Sleep::default()),
        Status::Toxic => Box::new(Toxic::default()),
    }
}

pub fn create_volatile(id: &Id) -> Option<Box<dyn Effect>> {
    create(&VOLATILES, id)
}

pub fn create_side_condition(id: &Id) -> Option<Box<dyn Effect>> {
    create(&SIDE_CONDITIONS, id)
}

pub fn create_hazard(id: &Id) -> Option<Box<dyn Effect>> {
    create(&HAZARDS, id)
}

pub fn create_pseudo_weather(id: &Id) -> Option<Box<dyn Effect>> {
    create(&PSEUDO_WEATHERS, id)
}

pub fn create_weather(id: &Id) -> Option<Box<dyn Effect>> {
    WeatherKind::from_id(id).map(|kind| Box::new(WeatherEffect::new(kind)) as Box<dyn Effect>)
}

/// Locks a Mon into a single move.
pub fn choice_lock(move_id: Id) -> Box<dyn Effect> {
    Box::new(ChoiceLock::new(move_id))
}

/// Whether the weather is one of the indefinite weathers that only another of its kind can
/// replace.
pub fn is_trio_weather(id: &Id) -> bool {
    WeatherKind::from_id(id).is_some_and(|kind| kind.is_trio())
}

/// Types that take no residual damage from the weather.
pub fn weather_immune_types(id: &Id) -> &'static [Type] {
    match WeatherKind::from_id(id) {
        Some(WeatherKind::Sandstorm) => &[Type::Rock, Type::Ground, Type::Steel],
        Some(WeatherKind::Hail) => &[Type::Ice],
        _ => &[],
    }
}

/// Damages the host Mon by `1/divisor` of its max HP, attributed to the effect itself.
pub(crate) fn chip(ctx: &mut EffectContext, divisor: u16) -> Result<DamageOutcome> {
    let mon = ctx.mon_handle()?;
    let amount = (ctx.mon()?.max_hp / divisor).max(1);
    let cause = DamageCause::Effect(ctx.source().clone());
    ctx.battle().damage(mon, amount as u32, cause)
}

/// Logs that the host Mon cannot move.
pub(crate) fn log_cant(ctx: &mut EffectContext, reason: &str) -> Result<()> {
    let event = battle_event!("cant", ctx.mon()?.log_id(), format!("reason:{reason}"));
    ctx.log(event);
    Ok(())
}

/// Logs that an effect on the host Mon activated.
pub(crate) fn log_activate(ctx: &mut EffectContext, what: &str) -> Result<()> {
    let event = battle_event!("activate", ctx.mon()?.log_id(), format!("what:{what}"));
    ctx.log(event);
    Ok(())
}

#[cfg(test)]
mod conditions_test {
    use duel_data::{
        Status,
        Type,
    };

    use crate::{
        common::Id,
        conditions::{
            create_hazard,
            create_volatile,
            create_weather,
            is_trio_weather,
            status_effect,
            weather_immune_types,
        },
        effect::EffectSource,
    };

    #[test]
    fn creates_effects_by_id() {
        assert_eq!(
            create_volatile(&Id::from("flinch")).map(|effect| effect.source()),
            Some(EffectSource::volatile("flinch"))
        );
        assert_eq!(
            create_hazard(&Id::from("Stealth Rock")).map(|effect| effect.source()),
            Some(EffectSource::hazard("stealthrock"))
        );
        assert!(create_volatile(&Id::from("notacondition")).is_none());
        assert!(create_weather(&Id::from("sunnyday")).is_some());
    }

    #[test]
    fn status_effects_occupy_status_slot() {
        assert_eq!(
            status_effect(Status::Toxic).source(),
            EffectSource::Status(Status::Toxic)
        );
    }

    #[test]
    fn trio_weathers_are_indefinite() {
        for weather in ["desolateland", "primordialsea", "deltastream"] {
            let id = Id::from(weather);
            assert!(is_trio_weather(&id));
            assert_eq!(
                create_weather(&id).and_then(|effect| effect.initial_duration()),
                None
            );
        }
        assert!(!is_trio_weather(&Id::from("raindance")));
        assert_eq!(
            create_weather(&Id::from("raindance")).and_then(|effect| effect.initial_duration()),
            Some(5)
        );
    }

    #[test]
    fn sandstorm_spares_rock_ground_steel() {
        assert_eq!(
            weather_immune_types(&Id::from("sandstorm")),
            &[Type::Rock, Type::Ground, Type::Steel]
        );
        assert!(weather_immune_types(&Id::from("sunnyday")).is_empty());
    }
}
