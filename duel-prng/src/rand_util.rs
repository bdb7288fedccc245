use crate::PseudoRandomNumberGenerator;

/// Returns whether an event with probability `numerator / denominator` occurs.
pub fn chance(
    prng: &mut dyn PseudoRandomNumberGenerator,
    numerator: u64,
    denominator: u64,
) -> bool {
    prng.next().rem_euclid(denominator) < numerator
}

/// Returns a random integer in the range `[min, max)`.
pub fn range(prng: &mut dyn PseudoRandomNumberGenerator, min: u64, max: u64) -> u64 {
    prng.next().rem_euclid(max - min) + min
}

/// Returns a random element from the given slice.
///
/// A single-element slice does not consume a value from the sequence.
pub fn sample_slice<'a, T>(
    prng: &mut dyn PseudoRandomNumberGenerator,
    slice: &'a [T],
) -> Option<&'a T> {
    match slice.len() {
        0 => None,
        1 => slice.first(),
        len => slice.get(range(prng, 0, len as u64) as usize),
    }
}

/// Returns a random value from the given iterator.
pub fn sample_iter<I, T>(prng: &mut dyn PseudoRandomNumberGenerator, iter: I) -> Option<T>
where
    I: Iterator<Item = T>,
{
    let mut items = iter.collect::<Vec<_>>();
    if items.is_empty() {
        return None;
    }
    let index = range(prng, 0, items.len() as u64) as usize;
    Some(items.swap_remove(index))
}

/// Fisher-Yates shuffle.
pub fn shuffle<T>(prng: &mut dyn PseudoRandomNumberGenerator, items: &mut [T]) {
    let end = items.len() as u64;
    if end < 2 {
        return;
    }
    for start in 0..(end - 1) {
        let next = range(prng, start, end);
        items.swap(start as usize, next as usize);
    }
}

#[cfg(test)]
mod rand_util_test {
    use pretty_assertions::assert_eq;

    use crate::{
        RealPseudoRandomNumberGenerator,
        rand_util,
    };

    #[test]
    fn generates_number_in_range() {
        let mut prng = RealPseudoRandomNumberGenerator::new(None);
        for _ in 0..50 {
            let n = rand_util::range(&mut prng, 85, 101);
            assert!((85..101).contains(&n));
        }
    }

    #[test]
    fn generates_chance() {
        let mut prng = RealPseudoRandomNumberGenerator::new(Some(20240601));
        let got = (0..20)
            .map(|_| rand_util::chance(&mut prng, 1, 4))
            .collect::<Vec<_>>();
        let want = vec![
            true, true, false, false, false, false, false, false, false, false, true, false, false,
            false, true, false, false, false, false, true,
        ];
        assert_eq!(got, want);
    }

    #[test]
    fn shuffles_slice() {
        let mut prng = RealPseudoRandomNumberGenerator::new(Some(777));
        let mut items = [0, 1, 2, 3, 4, 5, 6, 7];
        rand_util::shuffle(&mut prng, &mut items);
        assert_eq!(items, [4, 2, 7, 3, 6, 1, 5, 0]);
        rand_util::shuffle(&mut prng, &mut items);
        assert_eq!(items, [5, 2, 0, 3, 6, 4, 1, 7]);
    }

    #[test]
    fn shuffles_empty_and_single_slices() {
        let mut prng = RealPseudoRandomNumberGenerator::new(Some(1));
        let mut empty: [u8; 0] = [];
        rand_util::shuffle(&mut prng, &mut empty);
        let mut single = [9];
        rand_util::shuffle(&mut prng, &mut single);
        assert_eq!(single, [9]);
    }

    #[test]
    fn samples_element_in_slice() {
        let mut prng = RealPseudoRandomNumberGenerator::new(Some(31337));
        let items = ["w", "x", "y", "z"];
        let got = (0..6)
            .filter_map(|_| rand_util::sample_slice(&mut prng, &items).copied())
            .collect::<Vec<_>>();
        assert_eq!(got, ["w", "w", "z", "z", "w", "w"]);
    }

    #[test]
    fn sample_fails_on_empty_input() {
        let mut prng = RealPseudoRandomNumberGenerator::new(Some(3));
        let items: Vec<u8> = Vec::new();
        assert_eq!(rand_util::sample_slice(&mut prng, &items), None);
        assert_eq!(rand_util::sample_iter(&mut prng, items.iter()), None);
    }
}
