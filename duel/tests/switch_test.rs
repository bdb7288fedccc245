#[cfg(test)]
mod switch_tests {
    use duel::{
        battle::MonHandle,
        common::Id,
        data::Status,
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

    #[test]
    fn u_turn_switches_user_out_before_foe_moves() {
        let mut battle = TestBattleBuilder::new()
            .with_controlled_rng(true)
            .with_mons(
                0,
                vec![
                    test_mon("Jolteon", &["U-turn"]),
                    test_mon("Umbreon", &["Swords Dance"]),
                ],
            )
            .with_mons(1, vec![test_mon("Vaporeon", &["Swords Dance"])])
            .build()
            .unwrap();
        battle.init_battle().unwrap();
        battle.new_logs();

        get_controlled_rng_for_battle(&mut battle)
            .unwrap()
            .insert_fake_values_relative_to_sequence_count([(1, 0), (2, 1), (3, 0)]);
        battle.run_turn().unwrap();
        assert_new_logs_eq(
            &mut battle,
            &[
                "move|mon:Jolteon,0|name:U-turn",
                "damage|mon:Vaporeon,1|health:337/401",
                "switch|mon:Umbreon,0|species:umbreon|health:331/331",
                "move|mon:Vaporeon,1|name:Swords Dance",
                "boost|mon:Vaporeon,1|stat:atk|by:2",
                "turn|turn:2",
            ],
        );
        assert_eq!(battle.active_mon_handle(0), Some(MonHandle::new(0, 1)));
        assert!(!battle.mon(MonHandle::new(0, 0)).unwrap().must_switch);
    }

    #[test]
    fn u_turn_without_a_replacement_keeps_user_in() {
        let mut battle = TestBattleBuilder::new()
            .with_controlled_rng(true)
            .with_mons(0, vec![test_mon("Jolteon", &["U-turn"])])
            .with_mons(1, vec![test_mon("Vaporeon", &["Swords Dance"])])
            .build()
            .unwrap();
        battle.init_battle().unwrap();
        battle.new_logs();

        get_controlled_rng_for_battle(&mut battle)
            .unwrap()
            .insert_fake_values_relative_to_sequence_count([(1, 0), (2, 1), (3, 0)]);
        battle.run_turn().unwrap();
        assert_new_logs_eq(
            &mut battle,
            &[
                "move|mon:Jolteon,0|name:U-turn",
                "damage|mon:Vaporeon,1|health:337/401",
                "move|mon:Vaporeon,1|name:Swords Dance",
                "boost|mon:Vaporeon,1|stat:atk|by:2",
                "turn|turn:2",
            ],
        );
        assert_eq!(battle.active_mon_handle(0), Some(MonHandle::new(0, 0)));
    }

    #[test]
    fn sleep_counter_survives_switching_out() {
        let mut flareon = test_mon("Flareon", &["Swords Dance"]);
        flareon.status = Some(Status::Sleep);
        let mut battle = TestBattleBuilder::new()
            .with_controlled_rng(true)
            .with_mons(0, vec![test_mon("Jolteon", &["Swords Dance"])])
            .with_mons(
                1,
                vec![flareon, test_mon("Umbreon", &["Swords Dance"])],
            )
            .with_decision_maker(
                1,
                Box::new(ScriptedDecisionMaker::new([
                    Choice::Move(Id::from("swordsdance")),
                    Choice::Switch(1),
                    Choice::Switch(0),
                ])),
            )
            .build()
            .unwrap();
        battle.init_battle().unwrap();
        battle.new_logs();

        let flareon = MonHandle::new(1, 0);
        battle.run_turn().unwrap();
        assert_new_logs_eq(
            &mut battle,
            &[
                "move|mon:Jolteon,0|name:Swords Dance",
                "boost|mon:Jolteon,0|stat:atk|by:2",
                "cant|mon:Flareon,1|reason:slp",
                "turn|turn:2",
            ],
        );

        battle.run_turn().unwrap();
        assert_eq!(battle.mon(flareon).unwrap().status, Some(Status::Sleep));
        battle.new_logs();

        // The status comes back with the Mon, without being announced again.
        battle.run_turn().unwrap();
        assert_new_logs_eq(
            &mut battle,
            &[
                "switch|mon:Flareon,1|species:flareon|health:271/271",
                "move|mon:Jolteon,0|name:Swords Dance",
                "boost|mon:Jolteon,0|stat:atk|by:2",
                "turn|turn:4",
            ],
        );

        // Second and third turns asleep, each surviving the wake roll.
        for turn in [5, 6] {
            get_controlled_rng_for_battle(&mut battle)
                .unwrap()
                .insert_fake_values_relative_to_sequence_count([(1, 1)]);
            battle.run_turn().unwrap();
            let turn = format!("turn|turn:{turn}");
            assert_new_logs_eq(
                &mut battle,
                &[
                    "move|mon:Jolteon,0|name:Swords Dance",
                    "fail|mon:Jolteon,0",
                    "cant|mon:Flareon,1|reason:slp",
                    &turn,
                ],
            );
        }

        // Sleep never outlasts three turns.
        get_controlled_rng_for_battle(&mut battle)
            .unwrap()
            .insert_fake_values_relative_to_sequence_count([(1, 1)]);
        battle.run_turn().unwrap();
        assert_new_logs_eq(
            &mut battle,
            &[
                "move|mon:Jolteon,0|name:Swords Dance",
                "fail|mon:Jolteon,0",
                "curestatus|mon:Flareon,1|status:slp",
                "move|mon:Flareon,1|name:Swords Dance",
                "boost|mon:Flareon,1|stat:atk|by:2",
                "turn|turn:7",
            ],
        );
        assert_eq!(battle.mon(flareon).unwrap().status, None);
    }
}
