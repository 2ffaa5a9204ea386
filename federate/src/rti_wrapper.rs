use std::{path::PathBuf, sync::Arc};

use log::{debug, info};

use ucef_shared::{
    rti::{
        AttributeHandleSet, AttributeHandleValueMap, CallbackModel, FederateAmbassador,
        ParameterHandleValueMap, ResignAction, RtiAmbassador, RtiError,
    },
    AttributeHandle, FederateHandle, HlaInteraction, HlaObject, InteractionClassHandle,
    LogicalTime, ObjectClassHandle, ObjectInstanceHandle, ParameterHandle, UcefError, ValueMap,
};

use crate::outcome::{BenignOutcome, RtiOutcome};

/// The only way a federate talks to the RTI.
///
/// Every call takes semantic inputs (names, or handles obtained earlier) and
/// translates RTI failures into [`UcefError`]. Calls whose failure can mean
/// "already in the requested state" return an [`RtiOutcome`] instead of
/// failing for those cases.
pub struct RtiAmbassadorWrapper {
    rti: Arc<dyn RtiAmbassador>,
}

impl RtiAmbassadorWrapper {
    pub fn new(rti: Arc<dyn RtiAmbassador>) -> Self {
        Self { rti }
    }

    /// The wrapped RTI binding, for calls this wrapper does not cover
    pub fn rti(&self) -> &Arc<dyn RtiAmbassador> {
        &self.rti
    }

    // Federation Management

    pub fn connect(
        &self,
        federate_ambassador: Arc<dyn FederateAmbassador>,
        callback_model: CallbackModel,
    ) -> Result<RtiOutcome, UcefError> {
        allowing(
            "connect",
            self.rti.connect(federate_ambassador, callback_model),
            &[BenignOutcome::AlreadyConnected],
        )
    }

    pub fn disconnect(&self) -> Result<(), UcefError> {
        checked("disconnect", self.rti.disconnect())
    }

    pub fn create_federation(
        &self,
        federation_name: &str,
        fom_modules: &[PathBuf],
    ) -> Result<RtiOutcome, UcefError> {
        require_name("federation", federation_name)?;
        allowing(
            "createFederationExecution",
            self.rti
                .create_federation_execution(federation_name, fom_modules),
            &[BenignOutcome::FederationAlreadyExists],
        )
    }

    /// Destroys the federation unless someone else is still using it or has
    /// already destroyed it
    pub fn destroy_federation(&self, federation_name: &str) -> Result<RtiOutcome, UcefError> {
        require_name("federation", federation_name)?;
        allowing(
            "destroyFederationExecution",
            self.rti.destroy_federation_execution(federation_name),
            &[
                BenignOutcome::FederationDoesNotExist,
                BenignOutcome::FederatesStillJoined,
            ],
        )
    }

    pub fn join_federation(
        &self,
        federate_name: &str,
        federate_type: &str,
        federation_name: &str,
        join_modules: &[PathBuf],
    ) -> Result<FederateHandle, UcefError> {
        require_name("federate", federate_name)?;
        require_name("federate type", federate_type)?;
        require_name("federation", federation_name)?;
        checked(
            "joinFederationExecution",
            self.rti.join_federation_execution(
                federate_name,
                federate_type,
                federation_name,
                join_modules,
            ),
        )
    }

    pub fn resign_federation(&self, resign_action: ResignAction) -> Result<(), UcefError> {
        checked(
            "resignFederationExecution",
            self.rti.resign_federation_execution(resign_action),
        )
    }

    // Synchronization

    pub fn register_synchronization_point(&self, label: &str, tag: &[u8]) -> Result<(), UcefError> {
        require_name("synchronization point", label)?;
        checked(
            "registerFederationSynchronizationPoint",
            self.rti
                .register_federation_synchronization_point(label, tag),
        )
    }

    pub fn synchronization_point_achieved(&self, label: &str) -> Result<(), UcefError> {
        require_name("synchronization point", label)?;
        checked(
            "synchronizationPointAchieved",
            self.rti.synchronization_point_achieved(label),
        )
    }

    // Time Management

    pub fn enable_time_regulation(&self, lookahead: LogicalTime) -> Result<RtiOutcome, UcefError> {
        allowing(
            "enableTimeRegulation",
            self.rti.enable_time_regulation(lookahead),
            &[BenignOutcome::TimeRegulationAlreadyEnabled],
        )
    }

    pub fn disable_time_regulation(&self) -> Result<RtiOutcome, UcefError> {
        allowing(
            "disableTimeRegulation",
            self.rti.disable_time_regulation(),
            &[BenignOutcome::TimeRegulationNotEnabled],
        )
    }

    pub fn enable_time_constrained(&self) -> Result<RtiOutcome, UcefError> {
        allowing(
            "enableTimeConstrained",
            self.rti.enable_time_constrained(),
            &[BenignOutcome::TimeConstrainedAlreadyEnabled],
        )
    }

    pub fn disable_time_constrained(&self) -> Result<RtiOutcome, UcefError> {
        allowing(
            "disableTimeConstrained",
            self.rti.disable_time_constrained(),
            &[BenignOutcome::TimeConstrainedNotEnabled],
        )
    }

    pub fn time_advance_request(&self, time: LogicalTime) -> Result<(), UcefError> {
        checked("timeAdvanceRequest", self.rti.time_advance_request(time))
    }

    // Callback Delivery

    pub fn evoke_callback(&self, seconds: f64) -> Result<bool, UcefError> {
        checked("evokeCallback", self.rti.evoke_callback(seconds))
    }

    pub fn evoke_multiple_callbacks(
        &self,
        min_seconds: f64,
        max_seconds: f64,
    ) -> Result<bool, UcefError> {
        checked(
            "evokeMultipleCallbacks",
            self.rti.evoke_multiple_callbacks(min_seconds, max_seconds),
        )
    }

    // Declaration Management

    pub fn publish_object_class_attributes(
        &self,
        object_class: ObjectClassHandle,
        attributes: &AttributeHandleSet,
    ) -> Result<(), UcefError> {
        checked(
            "publishObjectClassAttributes",
            self.rti
                .publish_object_class_attributes(object_class, attributes),
        )
    }

    pub fn subscribe_object_class_attributes(
        &self,
        object_class: ObjectClassHandle,
        attributes: &AttributeHandleSet,
    ) -> Result<(), UcefError> {
        checked(
            "subscribeObjectClassAttributes",
            self.rti
                .subscribe_object_class_attributes(object_class, attributes),
        )
    }

    pub fn publish_interaction_class(
        &self,
        interaction_class: InteractionClassHandle,
    ) -> Result<(), UcefError> {
        checked(
            "publishInteractionClass",
            self.rti.publish_interaction_class(interaction_class),
        )
    }

    pub fn subscribe_interaction_class(
        &self,
        interaction_class: InteractionClassHandle,
    ) -> Result<(), UcefError> {
        checked(
            "subscribeInteractionClass",
            self.rti.subscribe_interaction_class(interaction_class),
        )
    }

    // Object Management

    /// Registers a locally created object and records the assigned handle on it
    pub fn register_object_instance(
        &self,
        object: &HlaObject,
        instance_name: Option<&str>,
    ) -> Result<(ObjectClassHandle, ObjectInstanceHandle), UcefError> {
        if object.is_registered() {
            return Err(UcefError::InvalidArgument(format!(
                "object of class '{}' is already registered",
                object.class_name()
            )));
        }
        let class_handle = self.object_class_handle(object.class_name())?;
        let instance = checked(
            "registerObjectInstance",
            self.rti.register_object_instance(class_handle, instance_name),
        )?;
        object.assign_instance_handle(instance)?;
        Ok((class_handle, instance))
    }

    /// Deletes an object instance, unless another federate holds the right
    /// to delete it
    pub fn delete_object_instance(
        &self,
        instance: ObjectInstanceHandle,
        tag: &[u8],
    ) -> Result<RtiOutcome, UcefError> {
        allowing(
            "deleteObjectInstance",
            self.rti.delete_object_instance(instance, tag),
            &[BenignOutcome::DeletePrivilegeNotHeld],
        )
    }

    /// Sends every attribute value currently held by `object`
    pub fn update_attribute_values(
        &self,
        object: &HlaObject,
        tag: &[u8],
        time: Option<LogicalTime>,
    ) -> Result<(), UcefError> {
        let instance = registered_handle(object)?;
        let class_handle = self.object_class_handle(object.class_name())?;
        let values = self.to_attribute_handle_values(class_handle, &object.snapshot())?;
        checked(
            "updateAttributeValues",
            self.rti
                .update_attribute_values(instance, &values, tag, time),
        )
    }

    pub fn send_interaction(
        &self,
        interaction: &HlaInteraction,
        tag: &[u8],
        time: Option<LogicalTime>,
    ) -> Result<(), UcefError> {
        let class_handle = self.interaction_class_handle(interaction.class_name())?;
        let values = self.to_parameter_handle_values(class_handle, interaction.parameters())?;
        checked(
            "sendInteraction",
            self.rti.send_interaction(class_handle, &values, tag, time),
        )
    }

    pub fn request_attribute_value_update(
        &self,
        object: &HlaObject,
        attribute_names: &[&str],
        tag: &[u8],
    ) -> Result<(), UcefError> {
        let instance = registered_handle(object)?;
        let class_handle = self.object_class_handle(object.class_name())?;
        let attributes = self.attribute_handle_set(class_handle, attribute_names)?;
        checked(
            "requestAttributeValueUpdate",
            self.rti
                .request_attribute_value_update(instance, &attributes, tag),
        )
    }

    // Name / Handle Resolution

    pub fn object_class_handle(&self, name: &str) -> Result<ObjectClassHandle, UcefError> {
        require_name("object class", name)?;
        resolve_name(
            "object class",
            name,
            "getObjectClassHandle",
            self.rti.get_object_class_handle(name),
        )
    }

    pub fn object_class_name(&self, handle: ObjectClassHandle) -> Result<String, UcefError> {
        resolve_handle(
            "object class",
            handle,
            "getObjectClassName",
            self.rti.get_object_class_name(handle),
        )
    }

    pub fn attribute_handle(
        &self,
        object_class: ObjectClassHandle,
        name: &str,
    ) -> Result<AttributeHandle, UcefError> {
        require_name("attribute", name)?;
        resolve_name(
            "attribute",
            name,
            "getAttributeHandle",
            self.rti.get_attribute_handle(object_class, name),
        )
    }

    pub fn attribute_name(
        &self,
        object_class: ObjectClassHandle,
        handle: AttributeHandle,
    ) -> Result<String, UcefError> {
        resolve_handle(
            "attribute",
            handle,
            "getAttributeName",
            self.rti.get_attribute_name(object_class, handle),
        )
    }

    pub fn interaction_class_handle(&self, name: &str) -> Result<InteractionClassHandle, UcefError> {
        require_name("interaction class", name)?;
        resolve_name(
            "interaction class",
            name,
            "getInteractionClassHandle",
            self.rti.get_interaction_class_handle(name),
        )
    }

    pub fn interaction_class_name(
        &self,
        handle: InteractionClassHandle,
    ) -> Result<String, UcefError> {
        resolve_handle(
            "interaction class",
            handle,
            "getInteractionClassName",
            self.rti.get_interaction_class_name(handle),
        )
    }

    pub fn parameter_handle(
        &self,
        interaction_class: InteractionClassHandle,
        name: &str,
    ) -> Result<ParameterHandle, UcefError> {
        require_name("parameter", name)?;
        resolve_name(
            "parameter",
            name,
            "getParameterHandle",
            self.rti.get_parameter_handle(interaction_class, name),
        )
    }

    pub fn parameter_name(
        &self,
        interaction_class: InteractionClassHandle,
        handle: ParameterHandle,
    ) -> Result<String, UcefError> {
        resolve_handle(
            "parameter",
            handle,
            "getParameterName",
            self.rti.get_parameter_name(interaction_class, handle),
        )
    }

    pub fn object_instance_handle(&self, name: &str) -> Result<ObjectInstanceHandle, UcefError> {
        require_name("object instance", name)?;
        resolve_name(
            "object instance",
            name,
            "getObjectInstanceHandle",
            self.rti.get_object_instance_handle(name),
        )
    }

    pub fn object_instance_name(&self, handle: ObjectInstanceHandle) -> Result<String, UcefError> {
        resolve_handle(
            "object instance",
            handle,
            "getObjectInstanceName",
            self.rti.get_object_instance_name(handle),
        )
    }

    pub fn known_object_class_handle(
        &self,
        instance: ObjectInstanceHandle,
    ) -> Result<ObjectClassHandle, UcefError> {
        resolve_handle(
            "object instance",
            instance,
            "getKnownObjectClassHandle",
            self.rti.get_known_object_class_handle(instance),
        )
    }

    // Value Map Conversion

    pub fn attribute_handle_set(
        &self,
        object_class: ObjectClassHandle,
        attribute_names: &[&str],
    ) -> Result<AttributeHandleSet, UcefError> {
        attribute_names
            .iter()
            .map(|name| self.attribute_handle(object_class, name))
            .collect()
    }

    /// Converts name-keyed values to handle-keyed values. Every name must
    /// resolve: an unknown attribute fails the whole conversion.
    pub fn to_attribute_handle_values(
        &self,
        object_class: ObjectClassHandle,
        values: &ValueMap,
    ) -> Result<AttributeHandleValueMap, UcefError> {
        values
            .iter()
            .map(|(name, value)| Ok((self.attribute_handle(object_class, name)?, value.clone())))
            .collect()
    }

    pub fn to_attribute_name_values(
        &self,
        object_class: ObjectClassHandle,
        values: AttributeHandleValueMap,
    ) -> Result<ValueMap, UcefError> {
        values
            .into_iter()
            .map(|(handle, value)| Ok((self.attribute_name(object_class, handle)?, value)))
            .collect()
    }

    pub fn to_parameter_handle_values(
        &self,
        interaction_class: InteractionClassHandle,
        values: &ValueMap,
    ) -> Result<ParameterHandleValueMap, UcefError> {
        values
            .iter()
            .map(|(name, value)| {
                Ok((
                    self.parameter_handle(interaction_class, name)?,
                    value.clone(),
                ))
            })
            .collect()
    }

    pub fn to_parameter_name_values(
        &self,
        interaction_class: InteractionClassHandle,
        values: ParameterHandleValueMap,
    ) -> Result<ValueMap, UcefError> {
        values
            .into_iter()
            .map(|(handle, value)| Ok((self.parameter_name(interaction_class, handle)?, value)))
            .collect()
    }
}

fn checked<T>(operation: &'static str, result: Result<T, RtiError>) -> Result<T, UcefError> {
    result.map_err(|error| UcefError::rti(operation, error))
}

fn allowing(
    operation: &'static str,
    result: Result<(), RtiError>,
    allowed: &[BenignOutcome],
) -> Result<RtiOutcome, UcefError> {
    match result {
        Ok(()) => Ok(RtiOutcome::Done),
        Err(error) => match BenignOutcome::classify(&error, allowed) {
            Some(outcome) => {
                info!("{}: {}, nothing to do", operation, outcome);
                Ok(RtiOutcome::Benign(outcome))
            }
            None => Err(UcefError::rti(operation, error)),
        },
    }
}

fn resolve_name<T>(
    kind: &'static str,
    name: &str,
    operation: &'static str,
    result: Result<T, RtiError>,
) -> Result<T, UcefError> {
    result.map_err(|error| match error {
        RtiError::NameNotFound(_) => {
            debug!("{} '{}' is not known to the RTI", kind, name);
            UcefError::unknown_name(kind, name)
        }
        other => UcefError::rti(operation, other),
    })
}

fn resolve_handle<T, H: ToString>(
    kind: &'static str,
    handle: H,
    operation: &'static str,
    result: Result<T, RtiError>,
) -> Result<T, UcefError> {
    result.map_err(|error| match error {
        RtiError::InvalidHandle { .. } | RtiError::ObjectInstanceNotKnown(_) => {
            UcefError::unknown_handle(kind, handle)
        }
        other => UcefError::rti(operation, other),
    })
}

fn require_name(kind: &'static str, name: &str) -> Result<(), UcefError> {
    if name.trim().is_empty() {
        return Err(UcefError::InvalidArgument(format!("{} name is empty", kind)));
    }
    Ok(())
}

fn registered_handle(object: &HlaObject) -> Result<ObjectInstanceHandle, UcefError> {
    object.instance_handle().ok_or_else(|| {
        UcefError::InvalidArgument(format!(
            "object of class '{}' has not been registered",
            object.class_name()
        ))
    })
}
