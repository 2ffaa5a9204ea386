use std::{mem, sync::Arc};

use parking_lot::Mutex;

use ucef_shared::{HlaInteraction, HlaObject, LogicalTime};

/// Something the RTI told this federate about, waiting to be handed to the
/// federate's hooks on its own thread
pub enum FederateEvent {
    ObjectRegistered(Arc<HlaObject>),
    AttributesReflected {
        object: Arc<HlaObject>,
        time: Option<LogicalTime>,
    },
    InteractionReceived {
        interaction: HlaInteraction,
        time: Option<LogicalTime>,
    },
    ObjectDeleted(Arc<HlaObject>),
    AttributeValuesRequested {
        object: Arc<HlaObject>,
        attribute_names: Vec<String>,
    },
}

impl FederateEvent {
    pub fn log(&self) -> String {
        match self {
            FederateEvent::ObjectRegistered(object) => {
                format!("ObjectRegistered {:?}", object.instance_handle())
            }
            FederateEvent::AttributesReflected { object, time } => {
                format!("AttributesReflected {:?} at {:?}", object.instance_handle(), time)
            }
            FederateEvent::InteractionReceived { interaction, time } => {
                format!("InteractionReceived {} at {:?}", interaction.class_name(), time)
            }
            FederateEvent::ObjectDeleted(object) => {
                format!("ObjectDeleted {:?}", object.instance_handle())
            }
            FederateEvent::AttributeValuesRequested { object, .. } => {
                format!("AttributeValuesRequested {:?}", object.instance_handle())
            }
        }
    }
}

/// Incoming events in arrival order. The callback context pushes, the
/// federate's thread takes everything at once.
#[derive(Default)]
pub struct FederateEvents {
    incoming: Mutex<Vec<FederateEvent>>,
}

impl FederateEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&self, event: FederateEvent) {
        self.incoming.lock().push(event);
    }

    pub fn take(&self) -> Vec<FederateEvent> {
        mem::take(&mut *self.incoming.lock())
    }

    pub fn is_empty(&self) -> bool {
        self.incoming.lock().is_empty()
    }
}
