use std::fmt;

use ucef_shared::rti::RtiError;

/// RTI failures that mean the federate is already where it asked to be.
///
/// Wrapped calls report these as [`RtiOutcome::Benign`] instead of an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BenignOutcome {
    AlreadyConnected,
    FederationAlreadyExists,
    FederationDoesNotExist,
    FederatesStillJoined,
    TimeRegulationAlreadyEnabled,
    TimeRegulationNotEnabled,
    TimeConstrainedAlreadyEnabled,
    TimeConstrainedNotEnabled,
    DeletePrivilegeNotHeld,
}

impl BenignOutcome {
    /// Classifies `error` against the outcomes `allowed` for one call
    pub(crate) fn classify(error: &RtiError, allowed: &[BenignOutcome]) -> Option<BenignOutcome> {
        let outcome = match error {
            RtiError::AlreadyConnected => BenignOutcome::AlreadyConnected,
            RtiError::FederationExecutionAlreadyExists(_) => BenignOutcome::FederationAlreadyExists,
            RtiError::FederationExecutionDoesNotExist(_) => BenignOutcome::FederationDoesNotExist,
            RtiError::FederatesCurrentlyJoined(_) => BenignOutcome::FederatesStillJoined,
            RtiError::TimeRegulationAlreadyEnabled => BenignOutcome::TimeRegulationAlreadyEnabled,
            RtiError::TimeRegulationIsNotEnabled => BenignOutcome::TimeRegulationNotEnabled,
            RtiError::TimeConstrainedAlreadyEnabled => BenignOutcome::TimeConstrainedAlreadyEnabled,
            RtiError::TimeConstrainedIsNotEnabled => BenignOutcome::TimeConstrainedNotEnabled,
            RtiError::DeletePrivilegeNotHeld(_) => BenignOutcome::DeletePrivilegeNotHeld,
            _ => return None,
        };
        allowed.contains(&outcome).then_some(outcome)
    }
}

impl fmt::Display for BenignOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            BenignOutcome::AlreadyConnected => "already connected",
            BenignOutcome::FederationAlreadyExists => "federation already exists",
            BenignOutcome::FederationDoesNotExist => "federation does not exist",
            BenignOutcome::FederatesStillJoined => "other federates are still joined",
            BenignOutcome::TimeRegulationAlreadyEnabled => "time regulation already enabled",
            BenignOutcome::TimeRegulationNotEnabled => "time regulation not enabled",
            BenignOutcome::TimeConstrainedAlreadyEnabled => "time constrained already enabled",
            BenignOutcome::TimeConstrainedNotEnabled => "time constrained not enabled",
            BenignOutcome::DeletePrivilegeNotHeld => "delete privilege not held",
        };
        f.write_str(text)
    }
}

/// Result of an RTI call that has benign failure modes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RtiOutcome {
    /// The call did what was asked
    Done,
    /// The call failed, but only because the end state already held
    Benign(BenignOutcome),
}

impl RtiOutcome {
    pub fn is_done(&self) -> bool {
        matches!(self, RtiOutcome::Done)
    }

    pub fn benign(&self) -> Option<BenignOutcome> {
        match self {
            RtiOutcome::Done => None,
            RtiOutcome::Benign(outcome) => Some(*outcome),
        }
    }
}
