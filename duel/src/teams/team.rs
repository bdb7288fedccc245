use serde::{
    Deserialize,
    Serialize,
};

use crate::teams::MonData;

/// A single team for a battle, made up of one or more Mons.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamData {
    /// Members of the team. The first Mon that has not fainted leads.
    pub members: Vec<MonData>,
}

#[cfg(test)]
mod team_test {
    use duel_data::Status;
    use pretty_assertions::assert_eq;

    use crate::teams::TeamData;

    #[test]
    fn deserializes_team_with_defaults() {
        let team: TeamData = serde_json::from_str(
            r#"{
                "members": [
                    {
                        "species": "Vaporeon",
                        "moves": ["Scald", "Protect"]
                    },
                    {
                        "name": "Sparky",
                        "species": "Flareon",
                        "level": 50,
                        "ability": "Guts",
                        "item": "Leftovers",
                        "moves": ["Flare Blitz"],
                        "hp": 20,
                        "status": "brn",
                        "boosts": { "atk": 1 }
                    }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(team.members.len(), 2);
        assert_eq!(team.members[0].name, "");
        assert_eq!(team.members[0].level, 100);
        assert_eq!(team.members[0].ability, None);
        assert_eq!(team.members[0].evs, None);
        assert_eq!(team.members[1].name, "Sparky");
        assert_eq!(team.members[1].level, 50);
        assert_eq!(team.members[1].status, Some(Status::Burn));
        assert_eq!(team.members[1].hp, Some(20));
        assert_eq!(team.members[1].boosts.atk, 1);
    }
}
