use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::{AttributeHandle, ParameterHandle};

pub type AttributeHandleValueMap = HashMap<AttributeHandle, Vec<u8>>;
pub type ParameterHandleValueMap = HashMap<ParameterHandle, Vec<u8>>;
pub type AttributeHandleSet = HashSet<AttributeHandle>;

/// How the RTI delivers callbacks to a connected federate
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallbackModel {
    /// Callbacks arrive on a thread owned by the RTI as soon as they are ready
    Immediate,
    /// Callbacks are held until the federate asks for them with an evoke call,
    /// and then run on the federate's own thread inside that call
    Evoked,
}

/// What the RTI does with a federate's objects when it resigns
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResignAction {
    UnconditionallyDivestAttributes,
    DeleteObjects,
    CancelPendingOwnershipAcquisitions,
    DeleteObjectsThenDivest,
    CancelThenDeleteThenDivest,
    NoAction,
}
