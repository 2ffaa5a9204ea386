//! # Ucef Federate
//! A federate lifecycle engine for HLA federations. Drives a federate from
//! joining through synchronization and a time-stepped execution loop to
//! resignation, keeps a registry of the objects it knows about, and hands
//! discoveries, reflections and interactions to user-supplied hooks.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

pub mod shared {
    pub use ucef_shared::{
        rti, AttributeHandle, CodecError, DataType, FederateHandle, HlaScalar,
        InteractionClass, InteractionClassHandle, InteractionParameter, LogicalTime,
        ObjectAttribute, ObjectClass, ObjectClassHandle, ObjectInstanceHandle, ObjectModel,
        ParameterHandle, SharingPolicy, ValueMap,
    };
}

mod callback_sink;
mod cancel;
mod config;
mod context;
mod events;
mod federate;
mod hooks;
mod outcome;
mod pump;
mod registry;
mod rti_wrapper;

pub use callback_sink::CallbackSink;
pub use cancel::CancelToken;
pub use config::{FederateConfig, PumpConfig};
pub use context::FederateContext;
pub use events::{FederateEvent, FederateEvents};
pub use federate::Federate;
pub use hooks::FederateHooks;
pub use outcome::{BenignOutcome, RtiOutcome};
pub use pump::{CallbackPump, WaitGuard};
pub use registry::Registry;
pub use rti_wrapper::RtiAmbassadorWrapper;

pub use ucef_shared::{HlaInteraction, HlaObject, LifecycleState, SyncPoint, UcefError};
