use std::{
    borrow::Cow,
    fmt::Display,
    mem,
};

use itertools::Itertools;

/// Trait for objects that can be added directly to the battle log.
///
/// Automatically implemented for types that implement [`Display`].
pub trait BattleLoggable {
    fn log<'s>(&'s self, items: &mut Vec<Cow<'s, str>>);
}

impl<T> BattleLoggable for T
where
    T: Display,
{
    fn log(&self, parts: &mut Vec<Cow<'_, str>>) {
        parts.push(Cow::Owned(format!("{self}")))
    }
}

/// A battle event that is added to the [`EventLog`].
///
/// This object should not be constructed directly. Instead, use the [`battle_event`] macro.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BattleEvent(String);

impl BattleEvent {
    pub fn from_parts(parts: &[&dyn BattleLoggable]) -> Self {
        let mut log_parts = Vec::with_capacity(parts.len());
        for part in parts {
            part.log(&mut log_parts);
        }
        Self(log_parts.into_iter().join("|"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Constructs a [`BattleEvent`] to be added to the [`EventLog`].
///
/// Parts are joined with `|`.
#[macro_export]
macro_rules! battle_event {
    ($($arg:expr),* $(,)?) => {{
        $crate::log::BattleEvent::from_parts(&[$(&$arg),*])
    }};
}

/// A log of battle events.
#[derive(Debug, Default, Clone)]
pub struct EventLog {
    logs: Vec<String>,
    last_read: usize,
}

impl EventLog {
    /// Creates a new event log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Does the log contain new messages since the last call to [`Self::read_out`].
    pub fn has_new_messages(&self) -> bool {
        self.last_read < self.logs.len()
    }

    /// Pushes a new event to the log.
    pub fn push(&mut self, event: BattleEvent) {
        self.logs.push(event.0)
    }

    /// Number of events in the log.
    pub fn len(&self) -> usize {
        self.logs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.logs.is_empty()
    }

    /// Returns an iterator over all logs.
    pub fn logs(&self) -> impl Iterator<Item = &str> {
        self.logs.iter().map(|s| s.as_ref())
    }

    /// Reads out any new logs that have been added since the last call to [`Self::read_out`].
    pub fn read_out(&mut self) -> impl Iterator<Item = &str> {
        let i = mem::replace(&mut self.last_read, self.logs.len());
        self.logs[i..].iter().map(|s| s.as_ref())
    }
}

#[cfg(test)]
mod event_log_test {
    use std::borrow::Cow;

    use pretty_assertions::assert_eq;

    use crate::log::{
        BattleLoggable,
        EventLog,
    };

    struct HealthLog {
        hp: u16,
        max_hp: u16,
    }

    impl BattleLoggable for HealthLog {
        fn log<'s>(&'s self, items: &mut Vec<Cow<'s, str>>) {
            items.push(format!("health:{}/{}", self.hp, self.max_hp).into());
        }
    }

    #[test]
    fn joins_parts_with_pipes() {
        let mut log = EventLog::new();
        log.push(battle_event!("move", "mon:Vaporeon,0", "name:Dragon Claw"));
        log.push(battle_event!(
            "damage",
            "mon:Flareon,1",
            HealthLog {
                hp: 150,
                max_hp: 240
            }
        ));
        log.push(battle_event!("turn", format!("turn:{}", 2)));
        assert_eq!(
            log.logs().collect::<Vec<_>>(),
            vec![
                "move|mon:Vaporeon,0|name:Dragon Claw",
                "damage|mon:Flareon,1|health:150/240",
                "turn|turn:2",
            ]
        );
    }

    #[test]
    fn reads_out_only_new_logs() {
        let mut log = EventLog::new();
        log.push(battle_event!("a"));
        assert!(log.has_new_messages());
        assert_eq!(log.read_out().collect::<Vec<_>>(), vec!["a"]);
        assert!(!log.has_new_messages());
        log.push(battle_event!("b"));
        log.push(battle_event!("c"));
        assert_eq!(log.read_out().collect::<Vec<_>>(), vec!["b", "c"]);
        assert_eq!(log.read_out().count(), 0);
        assert_eq!(log.len(), 3);
    }
}
