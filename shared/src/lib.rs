//! # Ucef Shared
//! Common functionality shared between the ucef federate engine, the RTI
//! bindings and the test harness: handles, object model metadata, entity
//! values, the scalar codec, and the RTI API boundary.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

mod codec;
mod entity;
mod error;
mod lifecycle;
mod object_model;
mod sync_point;
mod types;

pub mod rti;

pub use codec::{CodecError, HlaScalar};
pub use entity::{hla_interaction::HlaInteraction, hla_object::HlaObject, ValueMap};
pub use error::UcefError;
pub use lifecycle::LifecycleState;
pub use object_model::{
    data_type::DataType,
    interaction_class::{InteractionClass, InteractionParameter},
    object_class::{ObjectAttribute, ObjectClass},
    sharing::SharingPolicy,
    ObjectModel,
};
pub use sync_point::SyncPoint;
pub use types::{
    AttributeHandle, FederateHandle, InteractionClassHandle, LogicalTime, ObjectClassHandle,
    ObjectInstanceHandle, ParameterHandle,
};
