use std::fmt::{
    self,
    Display,
};

use anyhow::Result;

use crate::{
    battle::{
        Battle,
        Mon,
    },
    common::Id,
    teams::MonData,
};

/// Identity of a side's revealed roster: species in team order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RosterKey(Vec<Id>);

impl RosterKey {
    pub fn new(species: Vec<Id>) -> Self {
        Self(species)
    }

    /// The roster of a side as the battle currently knows it.
    pub fn of(battle: &Battle, side: usize) -> Result<Self> {
        Ok(Self(
            battle
                .side(side)?
                .mons
                .iter()
                .map(|mon| mon.species.clone())
                .collect(),
        ))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Display for RosterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, species) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{species}")?;
        }
        write!(f, "]")
    }
}

/// Guesses the Mons an opponent has not revealed yet.
pub trait UnrevealedFiller: Send + Sync {
    /// Returns up to `missing` Mons to complete a roster, given the Mons seen so far.
    fn fill(&self, revealed: &[&Mon], missing: usize) -> Result<Vec<MonData>>;
}

/// Fills unrevealed slots from a fixed pool, skipping species that were already revealed.
#[derive(Debug, Clone, Default)]
pub struct PoolFiller {
    pool: Vec<MonData>,
}

impl PoolFiller {
    pub fn new(pool: Vec<MonData>) -> Self {
        Self { pool }
    }
}

impl UnrevealedFiller for PoolFiller {
    fn fill(&self, revealed: &[&Mon], missing: usize) -> Result<Vec<MonData>> {
        Ok(self
            .pool
            .iter()
            .filter(|candidate| {
                let species = Id::from(candidate.species.as_str());
                !revealed.iter().any(|mon| mon.species == species)
            })
            .take(missing)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod filler_test {
    use pretty_assertions::assert_eq;

    use crate::{
        battle::MonHandle,
        common::Id,
        rollout::{
            PoolFiller,
            RosterKey,
            UnrevealedFiller,
        },
        test_util::{
            test_battle,
            test_mon,
        },
    };

    #[test]
    fn keys_roster_by_species_in_order() {
        let battle = test_battle();
        let key = RosterKey::of(&battle, 1).unwrap();
        assert_eq!(key, RosterKey::new(vec![Id::from("flareon")]));
        assert_eq!(key.to_string(), "[flareon]");
        assert_eq!(key.len(), 1);
    }

    #[test]
    fn pool_skips_revealed_species() {
        let battle = test_battle();
        let filler = PoolFiller::new(vec![
            test_mon("Flareon"),
            test_mon("Jolteon"),
            test_mon("Umbreon"),
            test_mon("Espeon"),
        ]);
        let revealed = [battle.mon(MonHandle::new(1, 0)).unwrap()];
        let filled = filler.fill(&revealed, 2).unwrap();
        assert_eq!(
            filled
                .iter()
                .map(|mon| mon.species.as_str())
                .collect::<Vec<_>>(),
            vec!["Jolteon", "Umbreon"]
        );
    }
}
