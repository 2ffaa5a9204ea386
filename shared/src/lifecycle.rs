use std::fmt;

/// Where a federate is in its single pass through the federation.
///
/// The order is strict: a federate enters every state exactly once, in
/// declaration order, and never goes back.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LifecycleState {
    Gestating,
    Initializing,
    Running,
    CleaningUp,
    Expired,
}

impl LifecycleState {
    pub const ALL: [LifecycleState; 5] = [
        LifecycleState::Gestating,
        LifecycleState::Initializing,
        LifecycleState::Running,
        LifecycleState::CleaningUp,
        LifecycleState::Expired,
    ];

    /// Position in the lifecycle, starting at zero
    pub fn rank(self) -> u8 {
        match self {
            LifecycleState::Gestating => 0,
            LifecycleState::Initializing => 1,
            LifecycleState::Running => 2,
            LifecycleState::CleaningUp => 3,
            LifecycleState::Expired => 4,
        }
    }

    /// The state that follows this one, or `None` once expired
    pub fn next(self) -> Option<LifecycleState> {
        match self {
            LifecycleState::Gestating => Some(LifecycleState::Initializing),
            LifecycleState::Initializing => Some(LifecycleState::Running),
            LifecycleState::Running => Some(LifecycleState::CleaningUp),
            LifecycleState::CleaningUp => Some(LifecycleState::Expired),
            LifecycleState::Expired => None,
        }
    }

    pub fn is_before(self, other: LifecycleState) -> bool {
        self.rank() < other.rank()
    }

    pub fn is_after(self, other: LifecycleState) -> bool {
        self.rank() > other.rank()
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LifecycleState::Gestating => "GESTATING",
            LifecycleState::Initializing => "INITIALIZING",
            LifecycleState::Running => "RUNNING",
            LifecycleState::CleaningUp => "CLEANING_UP",
            LifecycleState::Expired => "EXPIRED",
        };
        f.write_str(name)
    }
}
