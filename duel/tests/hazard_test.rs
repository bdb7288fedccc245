#[cfg(test)]
mod hazard_tests {
    use duel::{
        battle::{
            Battle,
            MonHandle,
        },
        common::Id,
        decision::{
            Choice,
            ScriptedDecisionMaker,
        },
        teams::MonData,
    };
    use duel_test_utils::{
        TestBattleBuilder,
        assert_new_logs_eq,
        test_mon,
    };
    use pretty_assertions::assert_eq;

    fn skarmory_sets_hazards(
        hazards: &[&str],
        foes: Vec<MonData>,
        foe_choices: Vec<Choice>,
    ) -> Battle {
        let mut battle = TestBattleBuilder::new()
            .with_mons(0, vec![test_mon("Skarmory", &["Stealth Rock", "Spikes"])])
            .with_mons(1, foes)
            .with_decision_maker(
                0,
                Box::new(ScriptedDecisionMaker::new(
                    hazards.iter().map(|hazard| Choice::Move(Id::from(*hazard))),
                )),
            )
            .with_decision_maker(1, Box::new(ScriptedDecisionMaker::new(foe_choices)))
            .build()
            .unwrap();
        battle.init_battle().unwrap();
        battle.new_logs();
        battle
    }

    #[test]
    fn hazards_damage_in_attach_order_and_spikes_stack() {
        let swords_dance = || Choice::Move(Id::from("swordsdance"));
        let mut battle = skarmory_sets_hazards(
            &["stealthrock", "spikes", "spikes", "spikes", "spikes"],
            vec![
                test_mon("Vaporeon", &["Swords Dance"]),
                test_mon("Flareon", &["Swords Dance"]),
            ],
            vec![swords_dance(), swords_dance(), swords_dance(), Choice::Switch(1)],
        );

        battle.run_turn().unwrap();
        assert_new_logs_eq(
            &mut battle,
            &[
                "move|mon:Skarmory,0|name:Stealth Rock",
                "sidestart|side:1|what:stealthrock",
                "move|mon:Vaporeon,1|name:Swords Dance",
                "boost|mon:Vaporeon,1|stat:atk|by:2",
                "turn|turn:2",
            ],
        );

        // A second layer is announced like the first.
        battle.run_turn().unwrap();
        battle.run_turn().unwrap();
        assert_new_logs_eq(
            &mut battle,
            &[
                "move|mon:Skarmory,0|name:Spikes",
                "sidestart|side:1|what:spikes",
                "move|mon:Vaporeon,1|name:Swords Dance",
                "boost|mon:Vaporeon,1|stat:atk|by:2",
                "turn|turn:3",
                "move|mon:Skarmory,0|name:Spikes",
                "sidestart|side:1|what:spikes",
                "move|mon:Vaporeon,1|name:Swords Dance",
                "boost|mon:Vaporeon,1|stat:atk|by:2",
                "turn|turn:4",
            ],
        );

        // Stealth Rock was laid first, so it hits first. Two layers of Spikes take 1/6.
        battle.run_turn().unwrap();
        assert_new_logs_eq(
            &mut battle,
            &[
                "switch|mon:Flareon,1|species:flareon|health:271/271",
                "damage|mon:Flareon,1|health:204/271|from:stealthrock",
                "damage|mon:Flareon,1|health:159/271|from:spikes",
                "move|mon:Skarmory,0|name:Spikes",
                "sidestart|side:1|what:spikes",
                "turn|turn:5",
            ],
        );

        // Three layers is the limit.
        battle.run_turn().unwrap();
        assert_new_logs_eq(
            &mut battle,
            &[
                "move|mon:Skarmory,0|name:Spikes",
                "fail|mon:Skarmory,0",
                "move|mon:Flareon,1|name:Swords Dance",
                "boost|mon:Flareon,1|stat:atk|by:2",
                "turn|turn:6",
            ],
        );
    }

    #[test]
    fn mon_fainting_to_hazards_skips_the_rest_and_faints_after_the_switch() {
        let swords_dance = || Choice::Move(Id::from("swordsdance"));
        let mut flareon = test_mon("Flareon", &["Swords Dance"]);
        flareon.hp = Some(50);
        let mut battle = skarmory_sets_hazards(
            &["stealthrock", "spikes", "spikes"],
            vec![
                test_mon("Vaporeon", &["Swords Dance"]),
                flareon,
                test_mon("Umbreon", &["Swords Dance"]),
            ],
            vec![
                swords_dance(),
                swords_dance(),
                Choice::Switch(1),
                Choice::Switch(2),
            ],
        );
        battle.run_turn().unwrap();
        battle.run_turn().unwrap();
        battle.new_logs();

        battle.run_turn().unwrap();
        assert_new_logs_eq(
            &mut battle,
            &[
                "switch|mon:Flareon,1|species:flareon|health:50/271",
                "damage|mon:Flareon,1|health:0/271|from:stealthrock",
                "faint|mon:Flareon,1",
                "move|mon:Skarmory,0|name:Spikes",
                "sidestart|side:1|what:spikes",
                "turn|turn:4",
                "switch|mon:Umbreon,1|species:umbreon|health:331/331",
                "damage|mon:Umbreon,1|health:290/331|from:stealthrock",
                "damage|mon:Umbreon,1|health:235/331|from:spikes",
            ],
        );
        assert_eq!(battle.active_mon_handle(1), Some(MonHandle::new(1, 2)));
        assert_eq!(battle.outcome(), None);
    }
}
