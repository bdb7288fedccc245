/// A point in the battle where effects may run.
///
/// An effect declares the hooks it implements, with a priority for each, through
/// [`Effect::hooks`][`crate::effect::Effect::hooks`]. Higher priorities run first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hook {
    Start,
    End,
    Timeout,
    GetMoveChoices,
    BeforeTurn,
    BeforeMove,
    ModifyMove,
    ModifyFoeMove,
    TryHit,
    FoeTryHit,
    MoveHit,
    MoveSuccess,
    AfterFoeHit,
    AfterMoveSecondary,
    ModifyBasePower,
    Faint,
    FoeFaint,
    Accuracy,
    FoeAccuracy,
    ModifyEffectiveness,
    ModifyAtk,
    ModifyDef,
    ModifySpA,
    ModifySpD,
    ModifySpe,
    SwitchIn,
    SwitchOut,
    TrapCheck,
    Residual,
    ModifyDamage,
    ModifyFoeDamage,
    WeatherModifyDamage,
    GetImmunity,
    Damage,
    AfterDamage,
    FoeHeal,
    SetStatus,
    AfterSetStatus,
    Boost,
    Weather,
    ModifyPriority,
    Update,
    BreakMold,
    ModifyCrit,
}

impl Hook {
    /// Lifecycle hooks are called directly on a single effect, whether or not it lists them.
    pub fn is_lifecycle(&self) -> bool {
        matches!(self, Self::Start | Self::End | Self::Timeout)
    }
}
