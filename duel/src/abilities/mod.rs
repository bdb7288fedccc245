//! Catalog of abilities.
//!
//! Every Mon holds exactly one ability effect while active. Abilities that are not in the catalog
//! are inert.

mod defensive;
mod offensive;
mod weather;

use std::sync::LazyLock;

use duel_data::Type;

pub use defensive::{
    Absorb,
    ContactDamage,
    CritBlocker,
    Justified,
    Levitate,
    MagicGuard,
    Multiscale,
    NaturalCure,
    Static,
    Sturdy,
    Synchronize,
    ThickFat,
    WeakArmor,
    WonderGuard,
};
pub use offensive::{
    Adaptability,
    GaleWings,
    Guts,
    HugePower,
    Intimidate,
    MoldBreaker,
    NoGuard,
    QuickFeet,
    SheerForce,
    SkillLink,
    Technician,
};
pub use weather::{
    PrimalWeather,
    WeatherOnStart,
    WeatherSpeed,
};

use crate::{
    common::{
        FastHashMap,
        Id,
    },
    conditions::WeatherKind,
    effect::{
        Effect,
        EffectSource,
    },
};

/// Implements the identity of an ability effect.
///
/// The name is either a literal or, with `field`, a `&'static str` field of the effect.
macro_rules! ability_identity {
    (field $field:ident) => {
        fn source(&self) -> $crate::effect::EffectSource {
            $crate::effect::EffectSource::Ability
        }

        fn name(&self) -> &str {
            self.$field
        }
    };
    ($name:literal) => {
        fn source(&self) -> $crate::effect::EffectSource {
            $crate::effect::EffectSource::Ability
        }

        fn name(&self) -> &str {
            $name
        }
    };
}

pub(crate) use ability_identity;

/// An ability with no effect in battle.
#[derive(Debug, Clone)]
pub struct InertAbility {
    id: Id,
}

impl InertAbility {
    pub fn new(id: Id) -> Self {
        Self { id }
    }
}

impl Effect for InertAbility {
    fn source(&self) -> EffectSource {
        EffectSource::Ability
    }

    fn name(&self) -> &str {
        self.id.as_str()
    }
}

type Constructor = fn() -> Box<dyn Effect>;

fn boxed<E>() -> Box<dyn Effect>
where
    E: Effect + Default + Clone + 'static,
{
    Box::new(E::default())
}

fn battle_armor() -> Box<dyn Effect> {
    Box::new(CritBlocker::new("Battle Armor"))
}

fn shell_armor() -> Box<dyn Effect> {
    Box::new(CritBlocker::new("Shell Armor"))
}

fn volt_absorb() -> Box<dyn Effect> {
    Box::new(Absorb::new("Volt Absorb", Type::Electric))
}

fn water_absorb() -> Box<dyn Effect> {
    Box::new(Absorb::new("Water Absorb", Type::Water))
}

fn rough_skin() -> Box<dyn Effect> {
    Box::new(ContactDamage::new("Rough Skin"))
}

fn iron_barbs() -> Box<dyn Effect> {
    Box::new(ContactDamage::new("Iron Barbs"))
}

fn drizzle() -> Box<dyn Effect> {
    Box::new(WeatherOnStart::new("Drizzle", WeatherKind::RainDance))
}

fn drought() -> Box<dyn Effect> {
    Box::new(WeatherOnStart::new("Drought", WeatherKind::SunnyDay))
}

fn sand_stream() -> Box<dyn Effect> {
    Box::new(WeatherOnStart::new("Sand Stream", WeatherKind::Sandstorm))
}

fn snow_warning() -> Box<dyn Effect> {
    Box::new(WeatherOnStart::new("Snow Warning", WeatherKind::Hail))
}

fn desolate_land() -> Box<dyn Effect> {
    Box::new(PrimalWeather::new("Desolate Land", WeatherKind::DesolateLand))
}

fn primordial_sea() -> Box<dyn Effect> {
    Box::new(PrimalWeather::new("Primordial Sea", WeatherKind::PrimordialSea))
}

fn delta_stream() -> Box<dyn Effect> {
    Box::new(PrimalWeather::new("Delta Stream", WeatherKind::DeltaStream))
}

fn chlorophyll() -> Box<dyn Effect> {
    Box::new(WeatherSpeed::new(
        "Chlorophyll",
        &[WeatherKind::SunnyDay, WeatherKind::DesolateLand],
    ))
}

fn swift_swim() -> Box<dyn Effect> {
    Box::new(WeatherSpeed::new(
        "Swift Swim",
        &[WeatherKind::RainDance, WeatherKind::PrimordialSea],
    ))
}

static ABILITIES: LazyLock<FastHashMap<Id, Constructor>> = LazyLock::new(|| {
    let entries: [(&'static str, Constructor); 37] = [
        ("adaptability", boxed::<Adaptability>),
        ("battlearmor", battle_armor),
        ("chlorophyll", chlorophyll),
        ("deltastream", delta_stream),
        ("desolateland", desolate_land),
        ("drizzle", drizzle),
        ("drought", drought),
        ("galewings", boxed::<GaleWings>),
        ("guts", boxed::<Guts>),
        ("hugepower", boxed::<HugePower>),
        ("intimidate", boxed::<Intimidate>),
        ("ironbarbs", iron_barbs),
        ("justified", boxed::<Justified>),
        ("levitate", boxed::<Levitate>),
        ("magicguard", boxed::<MagicGuard>),
        ("moldbreaker", boxed::<MoldBreaker>),
        ("multiscale", boxed::<Multiscale>),
        ("naturalcure", boxed::<NaturalCure>),
        ("noguard", boxed::<NoGuard>),
        ("primordialsea", primordial_sea),
        ("quickfeet", boxed::<QuickFeet>),
        ("roughskin", rough_skin),
        ("sandstream", sand_stream),
        ("sheerforce", boxed::<SheerForce>),
        ("shellarmor", shell_armor),
        ("skilllink", boxed::<SkillLink>),
        ("snowwarning", snow_warning),
        ("static", boxed::<Static>),
        ("sturdy", boxed::<Sturdy>),
        ("swiftswim", swift_swim),
        ("synchronize", boxed::<Synchronize>),
        ("technician", boxed::<Technician>),
        ("thickfat", boxed::<ThickFat>),
        ("voltabsorb", volt_absorb),
        ("waterabsorb", water_absorb),
        ("weakarmor", boxed::<WeakArmor>),
        ("wonderguard", boxed::<WonderGuard>),
    ];
    entries
        .into_iter()
        .map(|(id, constructor)| (Id::from_known(id), constructor))
        .collect()
});

/// Creates the effect for an ability.
///
/// Unknown abilities are inert.
pub fn create_ability(id: &Id) -> Box<dyn Effect> {
    match ABILITIES.get(id) {
        Some(constructor) => constructor(),
        None => Box::new(InertAbility::new(id.clone())),
    }
}

/// Whether the ability has an effect in battle.
pub fn is_implemented(id: &Id) -> bool {
    ABILITIES.contains_key(id)
}

#[cfg(test)]
mod abilities_test {
    use pretty_assertions::assert_eq;

    use crate::{
        abilities::{
            create_ability,
            is_implemented,
        },
        common::Id,
        effect::{
            EffectSource,
            Hook,
        },
    };

    #[test]
    fn creates_known_abilities() {
        let ability = create_ability(&Id::from("Water Absorb"));
        assert_eq!(ability.source(), EffectSource::Ability);
        assert_eq!(ability.name(), "Water Absorb");
        assert_eq!(ability.priority_of(Hook::FoeTryHit), Some(0));
        assert!(is_implemented(&Id::from("wonderguard")));
    }

    #[test]
    fn unknown_abilities_are_inert() {
        let ability = create_ability(&Id::from("Pixilate"));
        assert_eq!(ability.source(), EffectSource::Ability);
        assert_eq!(ability.name(), "pixilate");
        assert!(ability.hooks().is_empty());
        assert!(!is_implemented(&Id::from("pixilate")));
    }

    #[test]
    fn sturdy_runs_after_other_damage_hooks() {
        assert_eq!(
            create_ability(&Id::from("sturdy")).priority_of(Hook::Damage),
            Some(-100)
        );
    }
}
