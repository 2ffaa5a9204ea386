use std::sync::Arc;

use log::info;
use parking_lot::Mutex;

use ucef_shared::{
    HlaInteraction, HlaObject, LifecycleState, LogicalTime, ObjectInstanceHandle, UcefError,
};

use crate::{
    callback_sink::CallbackSink, cancel::CancelToken, config::FederateConfig,
    events::FederateEvents, outcome::RtiOutcome, pump::CallbackPump, registry::Registry,
    rti_wrapper::RtiAmbassadorWrapper,
};

const NO_TAG: &[u8] = &[];

/// Everything a federate's hooks can see and do.
///
/// Handed to every [`FederateHooks`](crate::FederateHooks) call. All methods
/// take `&self`; state shared with the callback delivery context is locked
/// internally.
pub struct FederateContext {
    config: FederateConfig,
    rti: Arc<RtiAmbassadorWrapper>,
    sink: Arc<CallbackSink>,
    registry: Arc<Registry>,
    events: Arc<FederateEvents>,
    pump: CallbackPump,
    cancel: CancelToken,
    state: Mutex<LifecycleState>,
}

impl FederateContext {
    pub(crate) fn new(config: FederateConfig, rti: Arc<RtiAmbassadorWrapper>) -> Self {
        let registry = Arc::new(Registry::new());
        let events = Arc::new(FederateEvents::new());
        let sink = Arc::new(CallbackSink::new(&rti, registry.clone(), events.clone()));
        let pump = CallbackPump::new(config.callback_model, config.pump.clone());
        Self {
            config,
            rti,
            sink,
            registry,
            events,
            pump,
            cancel: CancelToken::new(),
            state: Mutex::new(LifecycleState::Gestating),
        }
    }

    // Accessors

    pub fn config(&self) -> &FederateConfig {
        &self.config
    }

    pub fn rti(&self) -> &Arc<RtiAmbassadorWrapper> {
        &self.rti
    }

    pub fn callback_sink(&self) -> &Arc<CallbackSink> {
        &self.sink
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn lifecycle_state(&self) -> LifecycleState {
        *self.state.lock()
    }

    /// Size of one simulation step, for hooks that integrate over it. Time
    /// itself always advances by the lookahead.
    pub fn step_size(&self) -> LogicalTime {
        self.config.step_size
    }

    /// Federate-local logical time, as last granted by the RTI
    pub fn current_time(&self) -> LogicalTime {
        self.sink.federate_time()
    }

    pub fn get_object(&self, instance: ObjectInstanceHandle) -> Option<Arc<HlaObject>> {
        self.registry.object(instance)
    }

    pub(crate) fn events(&self) -> &FederateEvents {
        &self.events
    }

    pub(crate) fn pump(&self) -> &CallbackPump {
        &self.pump
    }

    /// Moves to the state after the current one, which must be `next`
    pub(crate) fn advance_state(&self, next: LifecycleState) -> Result<(), UcefError> {
        let mut state = self.state.lock();
        if state.next() != Some(next) {
            return Err(UcefError::LifecycleViolation {
                operation: "change lifecycle state",
                state: *state,
            });
        }
        info!(
            "Federate {} lifecycle {} -> {}",
            self.config.federate_name, *state, next
        );
        *state = next;
        Ok(())
    }

    // Objects

    /// Creates an unregistered object of a class from this federate's object
    /// model
    pub fn create_object(&self, class_name: &str) -> Result<Arc<HlaObject>, UcefError> {
        if self.config.object_model.object_class(class_name).is_none() {
            return Err(UcefError::unknown_name("object class", class_name));
        }
        Ok(Arc::new(HlaObject::new_local(class_name)))
    }

    /// Registers `object` with the RTI and records it in the registry. The
    /// object's class must have been published or subscribed during setup.
    pub fn register_object(
        &self,
        object: &Arc<HlaObject>,
        instance_name: Option<&str>,
    ) -> Result<ObjectInstanceHandle, UcefError> {
        if self.registry.object_class_handle(object.class_name()).is_none() {
            return Err(UcefError::unknown_name("object class", object.class_name()));
        }
        let (class_handle, instance) = self.rti.register_object_instance(object, instance_name)?;
        if !self.registry.insert_local_object(object.clone(), class_handle) {
            return Err(UcefError::unknown_handle("object class", class_handle));
        }
        Ok(instance)
    }

    /// Sends all current attribute values of `object`, timestamped if `time`
    /// is given
    pub fn update_attribute_values(
        &self,
        object: &HlaObject,
        time: Option<LogicalTime>,
    ) -> Result<(), UcefError> {
        self.rti.update_attribute_values(object, NO_TAG, time)
    }

    pub fn request_attribute_value_update(
        &self,
        object: &HlaObject,
        attribute_names: &[&str],
    ) -> Result<(), UcefError> {
        self.rti
            .request_attribute_value_update(object, attribute_names, NO_TAG)
    }

    /// Deletes `object` from the federation. When another federate holds the
    /// delete privilege nothing happens and the object stays recorded.
    pub fn delete_object(&self, object: &HlaObject) -> Result<RtiOutcome, UcefError> {
        let Some(instance) = object.instance_handle() else {
            return Err(UcefError::InvalidArgument(format!(
                "object of class '{}' has not been registered",
                object.class_name()
            )));
        };
        let outcome = self.rti.delete_object_instance(instance, NO_TAG)?;
        if outcome.is_done() {
            self.registry.remove_object(instance);
        }
        Ok(outcome)
    }

    // Interactions

    pub fn create_interaction(&self, class_name: &str) -> Result<HlaInteraction, UcefError> {
        if self.config.object_model.interaction_class(class_name).is_none() {
            return Err(UcefError::unknown_name("interaction class", class_name));
        }
        Ok(HlaInteraction::new(class_name))
    }

    /// Sends `interaction`, timestamped if `time` is given
    pub fn send_interaction(
        &self,
        interaction: &HlaInteraction,
        time: Option<LogicalTime>,
    ) -> Result<(), UcefError> {
        self.rti.send_interaction(interaction, NO_TAG, time)
    }
}
