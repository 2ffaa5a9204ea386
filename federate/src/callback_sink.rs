use std::{
    collections::HashSet,
    sync::{Arc, Weak},
};

use log::{debug, info, trace, warn};
use parking_lot::Mutex;

use ucef_shared::{
    rti::{
        AttributeHandleSet, AttributeHandleValueMap, FederateAmbassador, ParameterHandleValueMap,
        SynchronizationPointFailureReason,
    },
    HlaInteraction, InteractionClassHandle, LogicalTime, ObjectClassHandle, ObjectInstanceHandle,
    SyncPoint,
};

use crate::{
    events::{FederateEvent, FederateEvents},
    registry::Registry,
    rti_wrapper::RtiAmbassadorWrapper,
};

#[derive(Default)]
struct SyncStatus {
    announced: HashSet<SyncPoint>,
    achieved: HashSet<SyncPoint>,
    synchronized: HashSet<SyncPoint>,
    current: Option<SyncPoint>,
}

#[derive(Default)]
struct TimeStatus {
    federate_time: LogicalTime,
    regulated: bool,
    constrained: bool,
    advancing: bool,
}

/// The callback target handed to the RTI.
///
/// Records sync point and time policy state for the federate's thread to poll,
/// and turns object and interaction callbacks into registry updates plus
/// [`FederateEvent`]s. Nothing here blocks on the RTI: the only call made back
/// into it is achieving a synchronization point ucef does not gate on.
pub struct CallbackSink {
    sync: Mutex<SyncStatus>,
    time: Mutex<TimeStatus>,
    registry: Arc<Registry>,
    events: Arc<FederateEvents>,
    rti: Weak<RtiAmbassadorWrapper>,
}

impl CallbackSink {
    pub fn new(
        rti: &Arc<RtiAmbassadorWrapper>,
        registry: Arc<Registry>,
        events: Arc<FederateEvents>,
    ) -> Self {
        Self {
            sync: Mutex::new(SyncStatus::default()),
            time: Mutex::new(TimeStatus::default()),
            registry,
            events,
            rti: Arc::downgrade(rti),
        }
    }

    // Synchronization State

    pub fn is_announced(&self, point: SyncPoint) -> bool {
        self.sync.lock().announced.contains(&point)
    }

    /// Whether this federate has declared `point` achieved
    pub fn is_achieved(&self, point: SyncPoint) -> bool {
        self.sync.lock().achieved.contains(&point)
    }

    /// Whether the whole federation has reached `point`
    pub fn is_synchronized(&self, point: SyncPoint) -> bool {
        self.sync.lock().synchronized.contains(&point)
    }

    /// The latest point the whole federation has reached
    pub fn current_sync_point(&self) -> Option<SyncPoint> {
        self.sync.lock().current
    }

    pub(crate) fn mark_achieved(&self, point: SyncPoint) {
        if !self.sync.lock().achieved.insert(point) {
            debug!("{} was already achieved", point);
        }
    }

    // Time State

    pub fn federate_time(&self) -> LogicalTime {
        self.time.lock().federate_time
    }

    pub fn is_time_regulated(&self) -> bool {
        self.time.lock().regulated
    }

    pub fn is_time_constrained(&self) -> bool {
        self.time.lock().constrained
    }

    pub fn is_advancing(&self) -> bool {
        self.time.lock().advancing
    }

    pub(crate) fn begin_advance(&self) {
        self.time.lock().advancing = true;
    }

    pub(crate) fn abort_advance(&self) {
        self.time.lock().advancing = false;
    }

    pub(crate) fn clear_time_policy(&self) {
        let mut time = self.time.lock();
        time.regulated = false;
        time.constrained = false;
    }

    fn rti(&self) -> Option<Arc<RtiAmbassadorWrapper>> {
        let rti = self.rti.upgrade();
        if rti.is_none() {
            warn!("Callback arrived after the RTI wrapper was dropped");
        }
        rti
    }
}

impl FederateAmbassador for CallbackSink {
    fn synchronization_point_registration_succeeded(&self, label: &str) {
        debug!("Registered synchronization point {}", label);
    }

    fn synchronization_point_registration_failed(
        &self,
        label: &str,
        reason: SynchronizationPointFailureReason,
    ) {
        match reason {
            SynchronizationPointFailureReason::SynchronizationPointLabelNotUnique => {
                info!("Synchronization point {} was already registered by another federate", label);
            }
            other => {
                warn!("Registering synchronization point {} failed: {:?}", label, other);
            }
        }
    }

    fn announce_synchronization_point(&self, label: &str, _tag: &[u8]) {
        match SyncPoint::from_label(label) {
            Some(point) => {
                debug!("Synchronization point {} announced", point);
                self.sync.lock().announced.insert(point);
            }
            None => {
                // not one of ours, do not hold the federation up on it
                info!("Achieving pass-through synchronization point {}", label);
                if let Some(rti) = self.rti() {
                    if let Err(error) = rti.synchronization_point_achieved(label) {
                        warn!("Could not achieve pass-through point {}: {}", label, error);
                    }
                }
            }
        }
    }

    fn federation_synchronized(&self, label: &str) {
        match SyncPoint::from_label(label) {
            Some(point) => {
                info!("Federation synchronized on {}", point);
                let mut sync = self.sync.lock();
                sync.synchronized.insert(point);
                sync.current = Some(point);
            }
            None => debug!("Federation synchronized on pass-through point {}", label),
        }
    }

    fn time_regulation_enabled(&self, time: LogicalTime) {
        info!("Time regulation enabled at {}", time);
        let mut status = self.time.lock();
        status.regulated = true;
        status.federate_time = time;
    }

    fn time_constrained_enabled(&self, time: LogicalTime) {
        info!("Time constrained enabled at {}", time);
        let mut status = self.time.lock();
        status.constrained = true;
        status.federate_time = time;
    }

    fn time_advance_grant(&self, time: LogicalTime) {
        trace!("Time advance granted to {}", time);
        let mut status = self.time.lock();
        status.federate_time = time;
        status.advancing = false;
    }

    fn discover_object_instance(
        &self,
        instance: ObjectInstanceHandle,
        object_class: ObjectClassHandle,
        instance_name: &str,
    ) {
        trace!("Discovered {} '{}' of {}", instance, instance_name, object_class);
        if let Some(object) = self.registry.discover_object(instance, object_class) {
            self.events.push(FederateEvent::ObjectRegistered(object));
        }
    }

    fn reflect_attribute_values(
        &self,
        instance: ObjectInstanceHandle,
        values: AttributeHandleValueMap,
        _tag: &[u8],
        time: Option<LogicalTime>,
    ) {
        let Some((class_handle, _)) = self.registry.class_of_instance(instance) else {
            warn!("Reflection for undiscovered {}, dropping it", instance);
            return;
        };
        let Some(rti) = self.rti() else {
            return;
        };
        let values = match rti.to_attribute_name_values(class_handle, values) {
            Ok(values) => values,
            Err(error) => {
                warn!("Reflection for {} has unresolvable attributes: {}", instance, error);
                return;
            }
        };
        if let Some(object) = self.registry.reflect(instance, values) {
            self.events
                .push(FederateEvent::AttributesReflected { object, time });
        }
    }

    fn receive_interaction(
        &self,
        interaction_class: InteractionClassHandle,
        values: ParameterHandleValueMap,
        _tag: &[u8],
        time: Option<LogicalTime>,
    ) {
        let Some(class) = self.registry.interaction_class(interaction_class) else {
            warn!(
                "Interaction of uncached class {}, dropping it",
                interaction_class
            );
            return;
        };
        let Some(rti) = self.rti() else {
            return;
        };
        let parameters = match rti.to_parameter_name_values(interaction_class, values) {
            Ok(parameters) => parameters,
            Err(error) => {
                warn!(
                    "Interaction {} has unresolvable parameters: {}",
                    class.name, error
                );
                return;
            }
        };
        let interaction = HlaInteraction::with_parameters(class.name.clone(), parameters);
        self.events
            .push(FederateEvent::InteractionReceived { interaction, time });
    }

    fn remove_object_instance(&self, instance: ObjectInstanceHandle, _tag: &[u8]) {
        if let Some(object) = self.registry.remove_object(instance) {
            self.events.push(FederateEvent::ObjectDeleted(object));
        }
    }

    fn provide_attribute_value_update(
        &self,
        instance: ObjectInstanceHandle,
        attributes: AttributeHandleSet,
        _tag: &[u8],
    ) {
        let (Some(object), Some((class_handle, _))) = (
            self.registry.object(instance),
            self.registry.class_of_instance(instance),
        ) else {
            warn!("Attribute value request for unknown {}, ignoring it", instance);
            return;
        };
        let Some(rti) = self.rti() else {
            return;
        };
        let mut attribute_names = Vec::with_capacity(attributes.len());
        for handle in attributes {
            match rti.attribute_name(class_handle, handle) {
                Ok(name) => attribute_names.push(name),
                Err(error) => warn!("Attribute value request for {}: {}", instance, error),
            }
        }
        self.events.push(FederateEvent::AttributeValuesRequested {
            object,
            attribute_names,
        });
    }
}
