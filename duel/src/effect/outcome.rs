/// The result of a hook that can stop the action it is attached to.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum HookOutcome {
    /// Continue as normal.
    #[default]
    Continue,
    /// The action fails.
    Fail,
}

impl HookOutcome {
    pub fn failed(&self) -> bool {
        matches!(self, Self::Fail)
    }
}

impl From<bool> for HookOutcome {
    fn from(value: bool) -> Self {
        if value { Self::Continue } else { Self::Fail }
    }
}
