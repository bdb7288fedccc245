#[cfg(test)]
mod determinism_tests {
    use duel::{
        battle::{
            Battle,
            MonHandle,
            SpeedTieResolution,
        },
        decision::RandomWithSwitchesDecisionMaker,
    };
    use duel_test_utils::{
        TestBattleBuilder,
        test_mon,
    };
    use pretty_assertions::assert_eq;

    fn random_battle(seed: u64) -> Battle {
        TestBattleBuilder::new()
            .with_seed(seed)
            .with_speed_tie_resolution(SpeedTieResolution::Random)
            .with_strict_invariants(false)
            .with_turn_limit(300)
            .with_mons(
                0,
                vec![
                    test_mon("Vaporeon", &["Scald", "Toxic", "Protect", "Wish"]),
                    test_mon("Jolteon", &["Thunderbolt", "Thunder Wave", "Dark Pulse", "U-turn"]),
                    test_mon("Skarmory", &["Double Kick", "Spikes", "Swords Dance", "Tackle"]),
                ],
            )
            .with_mons(
                1,
                vec![
                    test_mon("Flareon", &["Flare Blitz", "Will-O-Wisp", "Quick Attack", "Sunny Day"]),
                    test_mon("Umbreon", &["Crunch", "Confuse Ray", "Stealth Rock", "Toxic"]),
                    test_mon("Garchomp", &["Earthquake", "Dragon Claw", "Sandstorm", "Rock Blast"]),
                ],
            )
            .with_decision_maker(0, Box::new(RandomWithSwitchesDecisionMaker::new(Some(seed))))
            .with_decision_maker(1, Box::new(RandomWithSwitchesDecisionMaker::new(Some(seed + 1))))
            .build()
            .unwrap()
    }

    #[test]
    fn same_seed_replays_identically() {
        for seed in [0, 1, 2, 3] {
            let mut first = random_battle(seed);
            let mut second = random_battle(seed);
            let first_outcome = first.run_battle().unwrap();
            let second_outcome = second.run_battle().unwrap();
            assert_eq!(first_outcome, second_outcome);
            assert_eq!(first.new_logs(), second.new_logs());
            assert_eq!(first.turn(), second.turn());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut first = random_battle(10);
        let mut second = random_battle(11);
        first.run_battle().unwrap();
        second.run_battle().unwrap();
        assert_ne!(first.new_logs(), second.new_logs());
    }

    #[test]
    fn snapshot_continues_identically() {
        let mut battle = random_battle(5);
        battle.init_battle().unwrap();
        battle.run_turn().unwrap();
        battle.run_turn().unwrap();
        battle.new_logs();

        let mut snapshot = battle.snapshot();
        let outcome = battle.run_battle().unwrap();
        let snapshot_outcome = snapshot.run_battle().unwrap();
        assert_eq!(outcome, snapshot_outcome);
        assert_eq!(battle.new_logs(), snapshot.new_logs());
    }

    #[test]
    fn snapshot_is_independent() {
        let mut battle = random_battle(5);
        battle.init_battle().unwrap();
        let mut snapshot = battle.snapshot();

        let lead = MonHandle::new(0, 0);
        snapshot.mon_mut(lead).unwrap().hp = 1;
        snapshot.run_turn().unwrap();

        assert_eq!(battle.mon(lead).unwrap().hp, 401);
        assert_eq!(battle.turn(), 1);
        assert!(battle.new_logs().iter().all(|log| !log.starts_with("move|")));
    }
}
