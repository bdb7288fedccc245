use std::cmp::Ordering;

use duel_prng::{
    PseudoRandomNumberGenerator,
    rand_util,
};

use crate::battle::SpeedTieResolution;

/// An object that can be ordered by speed.
pub trait SpeedOrderable {
    /// Order. Lowest order goes first.
    fn order(&self) -> u32;
    /// Priority. Highest priority goes first.
    fn priority(&self) -> i32;
    /// Speed. Highest speed goes first.
    fn speed(&self) -> i64;
}

/// Compares the priority of two objects.
pub fn compare_priority<T>(a: &T, b: &T) -> Ordering
where
    T: SpeedOrderable,
{
    a.order()
        .cmp(&b.order())
        .then_with(|| b.priority().cmp(&a.priority()))
        .then_with(|| b.speed().cmp(&a.speed()))
}

fn stable_move_to_position<T>(items: &mut [T], index: usize, target: usize) {
    if index < target {
        items[index..=target].rotate_left(1);
    } else if index > target {
        items[target..=index].rotate_right(1);
    }
}

/// Selection sort that resolves exact ties with the given resolution.
///
/// Random resolution draws from `prng` only when a tie exists.
pub fn sort_with_random_ties<T, C>(
    items: &mut [T],
    comp: C,
    prng: &mut dyn PseudoRandomNumberGenerator,
    tie_resolution: SpeedTieResolution,
) where
    C: Fn(&T, &T) -> Ordering,
{
    let mut sorted = 0;
    while sorted + 1 < items.len() {
        let mut smallest = Vec::from([sorted]);
        for i in (sorted + 1)..items.len() {
            match comp(&items[smallest[0]], &items[i]) {
                Ordering::Greater => smallest = Vec::from([i]),
                Ordering::Less => continue,
                Ordering::Equal => smallest.push(i),
            }
        }
        let ties = smallest.len();
        for (i, index) in smallest.into_iter().enumerate() {
            stable_move_to_position(items, index, sorted + i);
        }
        if ties > 1 {
            let tied = &mut items[sorted..(sorted + ties)];
            match tie_resolution {
                SpeedTieResolution::Random => rand_util::shuffle(prng, tied),
                SpeedTieResolution::Keep => (),
                SpeedTieResolution::Reverse => tied.reverse(),
            }
        }
        sorted += ties;
    }
}

/// Sorts the given items by speed.
pub fn speed_sort<T>(
    items: &mut [T],
    prng: &mut dyn PseudoRandomNumberGenerator,
    tie_resolution: SpeedTieResolution,
) where
    T: SpeedOrderable,
{
    sort_with_random_ties(items, compare_priority, prng, tie_resolution)
}
