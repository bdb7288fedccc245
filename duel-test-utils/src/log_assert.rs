use duel::battle::Battle;

/// Asserts that new logs in the battle are equal to the given logs.
#[track_caller]
pub fn assert_new_logs_eq(battle: &mut Battle, want: &[&str]) {
    let got = battle.new_logs();
    let got = got.iter().map(|log| log.as_str()).collect::<Vec<_>>();
    pretty_assertions::assert_eq!(got, want)
}
