//! The RTI API boundary.
//!
//! [`RtiAmbassador`] is the narrow set of calls a federate makes into the
//! runtime infrastructure, [`FederateAmbassador`] is the set of callbacks the
//! runtime infrastructure makes back. Both are implemented outside this crate:
//! the RTI binding provides the former, the federate engine the latter.

mod error;
mod federate_ambassador;
mod rti_ambassador;
mod types;

pub use error::{RtiError, SynchronizationPointFailureReason};
pub use federate_ambassador::FederateAmbassador;
pub use rti_ambassador::RtiAmbassador;
pub use types::{
    AttributeHandleSet, AttributeHandleValueMap, CallbackModel, ParameterHandleValueMap,
    ResignAction,
};
