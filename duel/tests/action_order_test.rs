#[cfg(test)]
mod action_order_tests {
    use assert_matches::assert_matches;
    use duel::{
        battle::{
            Battle,
            BattleOutcome,
            MonHandle,
            TurnState,
        },
        common::Id,
        decision::{
            Choice,
            ScriptedDecisionMaker,
        },
    };
    use duel_test_utils::{
        TestBattleBuilder,
        assert_new_logs_eq,
        get_controlled_rng_for_battle,
        test_mon,
    };
    use pretty_assertions::assert_eq;

    fn move_logs(battle: &mut Battle) -> Vec<String> {
        battle
            .new_logs()
            .into_iter()
            .filter(|log| log.starts_with("move|"))
            .collect()
    }

    #[test]
    fn higher_priority_moves_first() {
        let mut battle = TestBattleBuilder::new()
            .with_mons(0, vec![test_mon("Jolteon", &["Tackle"])])
            .with_mons(1, vec![test_mon("Flareon", &["Quick Attack"])])
            .build()
            .unwrap();
        battle.init_battle().unwrap();
        battle.new_logs();
        battle.run_turn().unwrap();
        assert_eq!(
            move_logs(&mut battle),
            vec![
                "move|mon:Flareon,1|name:Quick Attack",
                "move|mon:Jolteon,0|name:Tackle",
            ]
        );
    }

    #[test]
    fn trick_room_inverts_speed_order() {
        let mut battle = TestBattleBuilder::new()
            .with_mons(0, vec![test_mon("Vaporeon", &["Swords Dance", "Trick Room"])])
            .with_mons(1, vec![test_mon("Jolteon", &["Swords Dance"])])
            .with_decision_maker(
                0,
                Box::new(ScriptedDecisionMaker::new([Choice::Move(Id::from(
                    "trickroom",
                ))])),
            )
            .build()
            .unwrap();
        battle.init_battle().unwrap();
        battle.new_logs();

        battle.run_turn().unwrap();
        assert_new_logs_eq(
            &mut battle,
            &[
                "move|mon:Jolteon,1|name:Swords Dance",
                "boost|mon:Jolteon,1|stat:atk|by:2",
                "move|mon:Vaporeon,0|name:Trick Room",
                "fieldstart|what:trickroom",
                "turn|turn:2",
            ],
        );

        battle.run_turn().unwrap();
        assert_new_logs_eq(
            &mut battle,
            &[
                "move|mon:Vaporeon,0|name:Swords Dance",
                "boost|mon:Vaporeon,0|stat:atk|by:2",
                "move|mon:Jolteon,1|name:Swords Dance",
                "boost|mon:Jolteon,1|stat:atk|by:2",
                "turn|turn:3",
            ],
        );
    }

    #[test]
    fn faster_side_wins_when_both_are_at_one_hp() {
        let mut flareon = test_mon("Flareon", &["Tackle"]);
        flareon.hp = Some(1);
        let mut jolteon = test_mon("Jolteon", &["Tackle"]);
        jolteon.hp = Some(1);
        let mut battle = TestBattleBuilder::new()
            .with_mons(0, vec![flareon])
            .with_mons(1, vec![jolteon])
            .build()
            .unwrap();
        battle.init_battle().unwrap();
        battle.new_logs();

        battle.run_turn().unwrap();
        assert_new_logs_eq(
            &mut battle,
            &[
                "move|mon:Jolteon,1|name:Tackle",
                "damage|mon:Flareon,0|health:0/271",
                "faint|mon:Flareon,0",
                "win|side:1",
            ],
        );
        assert_matches!(battle.outcome(), Some(BattleOutcome::Win(1)));
        assert_eq!(battle.state(), TurnState::Terminal);
        assert_eq!(battle.mon(MonHandle::new(1, 0)).unwrap().hp, 1);
    }

    #[test]
    fn switches_precede_moves() {
        let mut battle = TestBattleBuilder::new()
            .with_mons(0, vec![test_mon("Jolteon", &["Extreme Speed"])])
            .with_mons(
                1,
                vec![
                    test_mon("Snorlax", &["Swords Dance"]),
                    test_mon("Golem", &["Swords Dance"]),
                ],
            )
            .with_decision_maker(1, Box::new(ScriptedDecisionMaker::new([Choice::Switch(1)])))
            .build()
            .unwrap();
        battle.init_battle().unwrap();
        battle.new_logs();

        battle.run_turn().unwrap();
        let logs = battle.new_logs();
        assert_eq!(logs[0], "switch|mon:Golem,1|species:golem|health:301/301");
        assert_eq!(logs[1], "move|mon:Jolteon,0|name:Extreme Speed");
        assert_eq!(battle.active_mon_handle(1), Some(MonHandle::new(1, 1)));
    }

    #[test]
    fn illegal_choices_fall_back_when_invariants_are_relaxed() {
        let mut battle = TestBattleBuilder::new()
            .with_controlled_rng(true)
            .with_strict_invariants(false)
            .with_mons(
                0,
                vec![
                    test_mon("Jolteon", &["Swords Dance", "U-turn"]),
                    test_mon("Umbreon", &["Swords Dance"]),
                ],
            )
            .with_mons(1, vec![test_mon("Vaporeon", &["Swords Dance"])])
            .with_decision_maker(
                0,
                Box::new(ScriptedDecisionMaker::new([
                    Choice::Move(Id::from("thunderbolt")),
                    Choice::Switch(7),
                    Choice::Move(Id::from("uturn")),
                    Choice::Switch(9),
                ])),
            )
            .build()
            .unwrap();
        battle.init_battle().unwrap();
        battle.new_logs();

        // An unknown move and an impossible switch both become the first legal move.
        battle.run_turn().unwrap();
        battle.run_turn().unwrap();
        assert_new_logs_eq(
            &mut battle,
            &[
                "move|mon:Jolteon,0|name:Swords Dance",
                "boost|mon:Jolteon,0|stat:atk|by:2",
                "move|mon:Vaporeon,1|name:Swords Dance",
                "boost|mon:Vaporeon,1|stat:atk|by:2",
                "turn|turn:2",
                "move|mon:Jolteon,0|name:Swords Dance",
                "boost|mon:Jolteon,0|stat:atk|by:2",
                "move|mon:Vaporeon,1|name:Swords Dance",
                "boost|mon:Vaporeon,1|stat:atk|by:2",
                "turn|turn:3",
            ],
        );

        // An out-of-range replacement after U-turn becomes the first eligible Mon.
        get_controlled_rng_for_battle(&mut battle)
            .unwrap()
            .insert_fake_values_relative_to_sequence_count([(1, 0), (2, 1), (3, 0)]);
        battle.run_turn().unwrap();
        assert_new_logs_eq(
            &mut battle,
            &[
                "move|mon:Jolteon,0|name:U-turn",
                "damage|mon:Vaporeon,1|health:212/401",
                "switch|mon:Umbreon,0|species:umbreon|health:331/331",
                "move|mon:Vaporeon,1|name:Swords Dance",
                "boost|mon:Vaporeon,1|stat:atk|by:2",
                "turn|turn:4",
            ],
        );
        assert_eq!(battle.active_mon_handle(0), Some(MonHandle::new(0, 1)));
        assert_eq!(battle.state(), TurnState::DecisionPending);
    }
}
