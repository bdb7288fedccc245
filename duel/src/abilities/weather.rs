use anyhow::Result;

use crate::{
    abilities::ability_identity,
    battle::MonHandle,
    common::Id,
    conditions::WeatherKind,
    effect::{
        Effect,
        EffectContext,
        Hook,
        HookOutcome,
    },
};

/// Starts a weather on entry.
#[derive(Debug, Clone)]
pub struct WeatherOnStart {
    name: &'static str,
    weather: WeatherKind,
}

impl WeatherOnStart {
    pub fn new(name: &'static str, weather: WeatherKind) -> Self {
        Self { name, weather }
    }
}

impl Effect for WeatherOnStart {
    ability_identity!(field name);

    fn on_start(&mut self, ctx: &mut EffectContext) -> Result<HookOutcome> {
        ctx.battle()
            .set_weather(&Id::from_known(self.weather.id()), None)?;
        Ok(HookOutcome::Continue)
    }
}

/// Starts an indefinite weather on entry, which ends when the holder leaves.
///
/// The weather stays if the foe holds the same ability.
#[derive(Debug, Clone)]
pub struct PrimalWeather {
    name: &'static str,
    weather: WeatherKind,
}

impl PrimalWeather {
    pub fn new(name: &'static str, weather: WeatherKind) -> Self {
        Self { name, weather }
    }
}

impl Effect for PrimalWeather {
    ability_identity!(field name);

    fn on_start(&mut self, ctx: &mut EffectContext) -> Result<HookOutcome> {
        ctx.battle()
            .set_weather(&Id::from_known(self.weather.id()), None)?;
        Ok(HookOutcome::Continue)
    }

    fn on_end(&mut self, ctx: &mut EffectContext) -> Result<()> {
        let weather = Id::from_known(self.weather.id());
        if ctx.battle_ref().weather() != Some(&weather) {
            return Ok(());
        }
        let foe_holds_same = match ctx.foe() {
            Some(foe) => {
                let foe = ctx.battle_ref().mon(foe)?;
                !foe.fainted() && foe.ability.as_str() == weather.as_str()
            }
            None => false,
        };
        if !foe_holds_same {
            ctx.battle().clear_weather()?;
        }
        Ok(())
    }
}

/// Doubles speed in the given weathers.
#[derive(Debug, Clone)]
pub struct WeatherSpeed {
    name: &'static str,
    weathers: &'static [WeatherKind],
}

impl WeatherSpeed {
    pub fn new(name: &'static str, weathers: &'static [WeatherKind]) -> Self {
        Self { name, weathers }
    }
}

impl Effect for WeatherSpeed {
    ability_identity!(field name);

    fn hooks(&self) -> &'static [(Hook, i32)] {
        &[(Hook::ModifySpe, 0)]
    }

    fn on_modify_spe(&mut self, ctx: &mut EffectContext, _: MonHandle, spe: f64) -> Result<f64> {
        let active = ctx
            .battle_ref()
            .weather()
            .and_then(WeatherKind::from_id)
            .is_some_and(|weather| self.weathers.contains(&weather));
        if active {
            return Ok(spe * 2.0);
        }
        Ok(spe)
    }
}
