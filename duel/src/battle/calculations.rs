use duel_data::{
    Stat,
    StatTable,
};

const BOOST_FACTORS: [f64; 7] = [1.0, 1.5, 2.0, 2.5, 3.0, 3.5, 4.0];
const ACCURACY_FACTORS: [f64; 7] = [
    1.0,
    4.0 / 3.0,
    5.0 / 3.0,
    2.0,
    7.0 / 3.0,
    8.0 / 3.0,
    3.0,
];

fn factor(table: &[f64; 7], stage: i8) -> f64 {
    let index = stage.unsigned_abs().min(6) as usize;
    table[index]
}

/// Calculates a single non-HP stat.
pub fn calculate_stat(base: u16, iv: u16, ev: u16, level: u8) -> u16 {
    let base = base as u32;
    let raw = 2 * base + iv as u32 + ev as u32 / 4;
    (raw * level as u32 / 100 + 5) as u16
}

/// Calculates maximum HP.
///
/// Species with a base HP of 1 always have exactly 1 HP.
pub fn calculate_hp(base: u16, iv: u16, ev: u16, level: u8) -> u16 {
    if base == 1 {
        return 1;
    }
    let base = base as u32;
    let raw = 2 * base + iv as u32 + ev as u32 / 4 + 100;
    (raw * level as u32 / 100 + 10) as u16
}

/// Calculates a full stat table.
pub fn calculate_stats(base: &StatTable, ivs: &StatTable, evs: &StatTable, level: u8) -> StatTable {
    let mut stats = StatTable::default();
    for (stat, base_value) in base.entries() {
        let value = match stat {
            Stat::HP => calculate_hp(base_value, ivs.get(stat), evs.get(stat), level),
            _ => calculate_stat(base_value, ivs.get(stat), evs.get(stat), level),
        };
        stats.set(stat, value);
    }
    stats
}

/// Applies a boost stage to a stat, truncating the result.
pub fn apply_boost(stat: u32, stage: i8) -> u32 {
    let factor = factor(&BOOST_FACTORS, stage);
    if stage >= 0 {
        (stat as f64 * factor) as u32
    } else {
        (stat as f64 / factor) as u32
    }
}

/// Applies the user's accuracy stage and the target's evasion stage to an accuracy value.
pub fn apply_accuracy_boosts(accuracy: f64, accuracy_stage: i8, evasion_stage: i8) -> f64 {
    let mut accuracy = accuracy;
    if accuracy_stage > 0 {
        accuracy *= factor(&ACCURACY_FACTORS, accuracy_stage);
    } else if accuracy_stage < 0 {
        accuracy /= factor(&ACCURACY_FACTORS, accuracy_stage);
    }
    if evasion_stage > 0 {
        accuracy /= factor(&ACCURACY_FACTORS, evasion_stage);
    } else if evasion_stage < 0 {
        accuracy *= factor(&ACCURACY_FACTORS, evasion_stage);
    }
    accuracy
}
