use anyhow::Result;
use duel_data::{
    MoveCategory,
    Status,
    Type,
};

use crate::{
    battle::{
        DamageCause,
        HostId,
        MonHandle,
        SpeedOrderable,
        speed_order::speed_sort,
    },
    battle_event,
    common::Id,
    effect::{
        Effect,
        EffectContext,
        EffectSource,
        Hook,
        HookOutcome,
    },
    moves::ActiveMove,
};

/// A kind of weather.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherKind {
    SunnyDay,
    RainDance,
    Sandstorm,
    Hail,
    DesolateLand,
    PrimordialSea,
    DeltaStream,
}

impl WeatherKind {
    pub fn from_id(id: &Id) -> Option<Self> {
        match id.as_str() {
            "sunnyday" => Some(Self::SunnyDay),
            "raindance" => Some(Self::RainDance),
            "sandstorm" => Some(Self::Sandstorm),
            "hail" => Some(Self::Hail),
            "desolateland" => Some(Self::DesolateLand),
            "primordialsea" => Some(Self::PrimordialSea),
            "deltastream" => Some(Self::DeltaStream),
            _ => None,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            Self::SunnyDay => "sunnyday",
            Self::RainDance => "raindance",
            Self::Sandstorm => "sandstorm",
            Self::Hail => "hail",
            Self::DesolateLand => "desolateland",
            Self::PrimordialSea => "primordialsea",
            Self::DeltaStream => "deltastream",
        }
    }

    /// Whether the weather lasts until its ability leaves the field.
    pub fn is_trio(&self) -> bool {
        matches!(
            self,
            Self::DesolateLand | Self::PrimordialSea | Self::DeltaStream
        )
    }

    /// Whether the weather chips 1/16 HP from every active Mon each turn.
    pub fn chips(&self) -> bool {
        matches!(self, Self::Sandstorm | Self::Hail)
    }
}

struct MonSpeed {
    mon: MonHandle,
    speed: i64,
}

impl SpeedOrderable for MonSpeed {
    fn order(&self) -> u32 {
        0
    }

    fn priority(&self) -> i32 {
        0
    }

    fn speed(&self) -> i64 {
        self.speed
    }
}

/// The field's weather.
///
/// Weather counts down its own duration during its residual, after affecting active Mons.
#[derive(Debug, Clone)]
pub struct WeatherEffect {
    kind: WeatherKind,
}

impl WeatherEffect {
    pub fn new(kind: WeatherKind) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> WeatherKind {
        self.kind
    }

    /// Active Mons, fastest first.
    fn active_mons_by_speed(ctx: &mut EffectContext) -> Result<Vec<MonHandle>> {
        let battle = ctx.battle();
        let mut mons = Vec::new();
        for mon in battle.active_mons() {
            if battle.mon(mon)?.fainted() {
                continue;
            }
            let speed = battle.live_speed(mon)?;
            mons.push(MonSpeed { mon, speed });
        }
        let tie_resolution = battle.options().speed_tie_resolution;
        speed_sort(&mut mons, battle.prng(), tie_resolution);
        Ok(mons.into_iter().map(|entry| entry.mon).collect())
    }
}

impl Effect for WeatherEffect {
    fn source(&self) -> EffectSource {
        EffectSource::weather(self.kind.id())
    }

    fn name(&self) -> &str {
        self.kind.id()
    }

    fn hooks(&self) -> &'static [(Hook, i32)] {
        match self.kind {
            WeatherKind::SunnyDay => &[
                (Hook::Residual, -1),
                (Hook::WeatherModifyDamage, 0),
                (Hook::SetStatus, 0),
            ],
            WeatherKind::RainDance => &[(Hook::Residual, -1), (Hook::WeatherModifyDamage, 0)],
            WeatherKind::Sandstorm => &[(Hook::Residual, -1), (Hook::ModifySpD, 0)],
            WeatherKind::Hail => &[(Hook::Residual, -1)],
            WeatherKind::DesolateLand => &[
                (Hook::Residual, -1),
                (Hook::WeatherModifyDamage, 0),
                (Hook::TryHit, 0),
                (Hook::SetStatus, 0),
            ],
            WeatherKind::PrimordialSea => &[
                (Hook::Residual, -1),
                (Hook::WeatherModifyDamage, 0),
                (Hook::TryHit, 0),
            ],
            WeatherKind::DeltaStream => &[(Hook::Residual, -1), (Hook::ModifyEffectiveness, 0)],
        }
    }

    fn initial_duration(&self) -> Option<u8> {
        if self.kind.is_trio() { None } else { Some(5) }
    }

    fn on_residual(&mut self, ctx: &mut EffectContext) -> Result<()> {
        let weather = Id::from_known(self.kind.id());
        let mons = Self::active_mons_by_speed(ctx)?;
        for mon in &mons {
            ctx.battle()
                .activate_effect(&[HostId::Mon(*mon)], Hook::Weather, false, |effect, context| {
                    effect
                        .on_weather(context, &weather)
                        .map(|_| HookOutcome::Continue)
                })?;
        }
        if self.kind.chips() {
            for mon in mons {
                let battle = ctx.battle();
                let target = battle.mon(mon)?;
                if target.fainted() {
                    continue;
                }
                let amount = (target.max_hp / 16).max(1);
                battle.damage(
                    mon,
                    amount as u32,
                    DamageCause::Effect(EffectSource::Weather(weather.clone())),
                )?;
            }
        }

        match ctx.duration() {
            Some(duration) if duration <= 1 => {
                ctx.remove_self()?;
            }
            Some(duration) => ctx.set_duration(Some(duration - 1)),
            None => (),
        }
        Ok(())
    }

    fn on_weather_modify_damage(
        &mut self,
        _: &mut EffectContext,
        active_move: &ActiveMove,
        damage: f64,
    ) -> Result<f64> {
        let modifier = match (self.kind, active_move.move_type()) {
            (WeatherKind::SunnyDay | WeatherKind::DesolateLand, Type::Fire) => 1.5,
            (WeatherKind::SunnyDay, Type::Water) => 0.5,
            (WeatherKind::RainDance | WeatherKind::PrimordialSea, Type::Water) => 1.5,
            (WeatherKind::RainDance, Type::Fire) => 0.5,
            _ => 1.0,
        };
        Ok(damage * modifier)
    }

    fn on_set_status(
        &mut self,
        _: &mut EffectContext,
        status: Status,
        _: MonHandle,
        _: Option<MonHandle>,
    ) -> Result<HookOutcome> {
        Ok((status != Status::Freeze).into())
    }

    fn on_try_hit(
        &mut self,
        ctx: &mut EffectContext,
        active_move: &ActiveMove,
        user: MonHandle,
        _: MonHandle,
    ) -> Result<HookOutcome> {
        let doused = match self.kind {
            WeatherKind::DesolateLand => Type::Water,
            WeatherKind::PrimordialSea => Type::Fire,
            _ => return Ok(HookOutcome::Continue),
        };
        if active_move.category() == MoveCategory::Status || active_move.move_type() != doused {
            return Ok(HookOutcome::Continue);
        }
        let event = battle_event!(
            "fail",
            ctx.battle_ref().mon(user)?.log_id(),
            format!("from:{}", self.kind.id())
        );
        ctx.log(event);
        Ok(HookOutcome::Fail)
    }

    fn on_modify_spd(
        &mut self,
        ctx: &mut EffectContext,
        mon: MonHandle,
        _: &ActiveMove,
        spd: f64,
    ) -> Result<f64> {
        if ctx.battle_ref().mon(mon)?.has_type(Type::Rock) {
            return Ok(spd * 1.5);
        }
        Ok(spd)
    }

    fn on_modify_effectiveness(
        &mut self,
        ctx: &mut EffectContext,
        active_move: &ActiveMove,
        target: MonHandle,
        effectiveness: f64,
    ) -> Result<f64> {
        if !ctx.battle_ref().mon(target)?.has_type(Type::Flying) {
            return Ok(effectiveness);
        }
        let against_flying = ctx
            .battle_ref()
            .type_chart()
            .effectiveness(active_move.move_type(), Type::Flying)
            .multiplier();
        if against_flying > 1.0 {
            return Ok(effectiveness * 0.5);
        }
        Ok(effectiveness)
    }
}
