use serde::{
    Deserialize,
    Serialize,
};

/// Options for sampling outcomes of a battle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RolloutOptions {
    /// Number of simulations run by [`crate::rollout::BattleRoller::rollout`].
    pub rollouts: usize,
    /// Turn after which a simulation is abandoned.
    pub turn_limit: Option<u64>,
    /// Simulation `i` is seeded with `base_seed + i`.
    pub base_seed: u64,
    /// The side the rollouts are run for. The other side's roster may be incomplete.
    pub side: usize,
    /// Number of Mons the opponent is assumed to bring.
    pub team_size: usize,
}

impl Default for RolloutOptions {
    fn default() -> Self {
        Self {
            rollouts: 100,
            turn_limit: Some(100),
            base_seed: 0,
            side: 0,
            team_size: 6,
        }
    }
}

#[cfg(test)]
mod options_test {
    use pretty_assertions::assert_eq;

    use crate::rollout::RolloutOptions;

    #[test]
    fn fills_missing_fields_with_defaults() {
        let options: RolloutOptions =
            serde_json::from_str(r#"{ "rollouts": 8, "base_seed": 42 }"#).unwrap();
        assert_eq!(
            options,
            RolloutOptions {
                rollouts: 8,
                base_seed: 42,
                ..Default::default()
            }
        );
        assert_eq!(options.turn_limit, Some(100));
    }
}
