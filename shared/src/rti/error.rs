use thiserror::Error;

/// The exception kinds an RTI call can fail with.
///
/// This is a closed set so callers can recognise outcomes that already match
/// the state they asked for; anything the binding cannot classify goes into
/// [`RtiError::RtiInternalError`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RtiError {
    // Connection

    #[error("Already connected to the RTI")]
    AlreadyConnected,

    #[error("Not connected to the RTI")]
    NotConnected,

    #[error("Connection to the RTI failed: {0}")]
    ConnectionFailed(String),

    // Federation Management

    #[error("Federation execution '{0}' already exists")]
    FederationExecutionAlreadyExists(String),

    #[error("Federation execution '{0}' does not exist")]
    FederationExecutionDoesNotExist(String),

    #[error("Federates are still joined to federation execution '{0}'")]
    FederatesCurrentlyJoined(String),

    #[error("Federate is already a member of a federation execution")]
    FederateAlreadyExecutionMember,

    #[error("Federate is not a member of a federation execution")]
    FederateNotExecutionMember,

    #[error("Could not open FOM module '{0}'")]
    CouldNotOpenFdd(String),

    // Synchronization

    #[error("Synchronization point '{0}' has not been announced")]
    SynchronizationPointLabelNotAnnounced(String),

    // Time Management

    #[error("Time regulation is already enabled")]
    TimeRegulationAlreadyEnabled,

    #[error("Time regulation is not enabled")]
    TimeRegulationIsNotEnabled,

    #[error("Time constrained is already enabled")]
    TimeConstrainedAlreadyEnabled,

    #[error("Time constrained is not enabled")]
    TimeConstrainedIsNotEnabled,

    #[error("A request to enable time regulation is already pending")]
    RequestForTimeRegulationPending,

    #[error("A request to enable time constrained is already pending")]
    RequestForTimeConstrainedPending,

    #[error("A time advance is already in progress")]
    InTimeAdvancingState,

    #[error("Logical time {0} is not valid here")]
    InvalidLogicalTime(f64),

    #[error("Lookahead {0} is not valid")]
    InvalidLookahead(f64),

    // Declaration & Object Management

    #[error("Name '{0}' not found")]
    NameNotFound(String),

    #[error("Invalid {kind} handle {handle}")]
    InvalidHandle { kind: &'static str, handle: String },

    #[error("Object class {0} is not published")]
    ObjectClassNotPublished(String),

    #[error("Interaction class {0} is not published")]
    InteractionClassNotPublished(String),

    #[error("Object instance {0} is not known")]
    ObjectInstanceNotKnown(String),

    #[error("Attribute {0} is not owned by this federate")]
    AttributeNotOwned(String),

    #[error("Delete privilege for object instance {0} is not held")]
    DeletePrivilegeNotHeld(String),

    // Everything Else

    #[error("RTI internal error: {0}")]
    RtiInternalError(String),
}

/// Why the RTI refused to register a synchronization point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SynchronizationPointFailureReason {
    /// Another federate registered the same label first
    SynchronizationPointLabelNotUnique,
    /// The synchronization set named federates that are not joined
    SynchronizationSetMemberNotJoined,
}
