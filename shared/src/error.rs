use thiserror::Error;

use crate::{rti::RtiError, CodecError, LifecycleState};

/// The one error type surfaced by the ucef federate runtime.
///
/// Every wrapped RTI call, name/handle resolution and lifecycle phase fails
/// with a `UcefError`. Callers that only need a diagnostic can use the
/// `Display` form; the variants exist so the engine can tell the fatal and
/// cancelled cases apart from ordinary failures.
#[derive(Debug, Error)]
pub enum UcefError {
    // RTI Call Errors

    /// An RTI call failed outside the enumerated benign outcomes
    #[error("RTI call {operation} failed: {source}")]
    Rti {
        operation: &'static str,
        #[source]
        source: RtiError,
    },

    // Resolution Errors

    /// A semantic name has no counterpart known to the RTI or the object model
    #[error("Unknown {kind} '{name}'")]
    UnknownName { kind: &'static str, name: String },

    /// A wire handle has no counterpart in the local caches
    #[error("Unknown {kind} handle {handle}")]
    UnknownHandle { kind: &'static str, handle: String },

    /// Null, empty or otherwise invalid argument passed to a public operation
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A raw value could not be decoded into the requested type
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    /// Configuration rejected before any RTI call was made
    #[error("Invalid federate configuration: {0}")]
    Config(String),

    // Lifecycle Errors

    /// The federate could not join the federation within the configured attempts
    #[error("Could not join federation '{federation}' after {attempts} attempts")]
    JoinAttemptsExhausted { federation: String, attempts: u32 },

    /// A blocking wait was cancelled through the federate's cancel token
    #[error("Cancelled while waiting for {waiting_for}")]
    WaitCancelled { waiting_for: String },

    /// A blocking wait exceeded the configured wait timeout
    #[error("Timed out after {timeout_ms} ms waiting for {waiting_for}")]
    WaitTimedOut { waiting_for: String, timeout_ms: u64 },

    /// An operation was attempted in a lifecycle state that does not allow it
    #[error("Cannot {operation} while federate is {state}")]
    LifecycleViolation {
        operation: &'static str,
        state: LifecycleState,
    },
}

impl UcefError {
    pub fn rti(operation: &'static str, source: RtiError) -> Self {
        UcefError::Rti { operation, source }
    }

    pub fn unknown_name(kind: &'static str, name: impl Into<String>) -> Self {
        UcefError::UnknownName {
            kind,
            name: name.into(),
        }
    }

    pub fn unknown_handle(kind: &'static str, handle: impl ToString) -> Self {
        UcefError::UnknownHandle {
            kind,
            handle: handle.to_string(),
        }
    }

    /// The fatal-at-boundary case: nothing after setup may run once this is seen
    pub fn is_fatal(&self) -> bool {
        matches!(self, UcefError::JoinAttemptsExhausted { .. })
    }
}
