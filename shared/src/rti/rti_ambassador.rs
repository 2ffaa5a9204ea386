use std::{path::PathBuf, sync::Arc};

use crate::{
    rti::{
        AttributeHandleSet, AttributeHandleValueMap, CallbackModel, FederateAmbassador,
        ParameterHandleValueMap, ResignAction, RtiError,
    },
    AttributeHandle, FederateHandle, InteractionClassHandle, LogicalTime, ObjectClassHandle,
    ObjectInstanceHandle, ParameterHandle,
};

/// Calls a federate makes into the runtime infrastructure.
///
/// Implementations must be usable from the federate's thread while callbacks
/// are being delivered on another one, so every call takes `&self`. An
/// implementation must not hold internal locks while invoking the connected
/// [`FederateAmbassador`], since callbacks may call straight back in.
///
/// Timed and untimed variants of a call are folded into one method taking an
/// `Option<LogicalTime>`: `None` means receive-order delivery.
pub trait RtiAmbassador: Send + Sync {
    // Federation Management

    fn connect(
        &self,
        federate_ambassador: Arc<dyn FederateAmbassador>,
        callback_model: CallbackModel,
    ) -> Result<(), RtiError>;

    fn disconnect(&self) -> Result<(), RtiError>;

    fn create_federation_execution(
        &self,
        federation_name: &str,
        fom_modules: &[PathBuf],
    ) -> Result<(), RtiError>;

    fn destroy_federation_execution(&self, federation_name: &str) -> Result<(), RtiError>;

    fn join_federation_execution(
        &self,
        federate_name: &str,
        federate_type: &str,
        federation_name: &str,
        join_modules: &[PathBuf],
    ) -> Result<FederateHandle, RtiError>;

    fn resign_federation_execution(&self, resign_action: ResignAction) -> Result<(), RtiError>;

    // Synchronization

    fn register_federation_synchronization_point(
        &self,
        label: &str,
        tag: &[u8],
    ) -> Result<(), RtiError>;

    fn synchronization_point_achieved(&self, label: &str) -> Result<(), RtiError>;

    // Time Management

    fn enable_time_regulation(&self, lookahead: LogicalTime) -> Result<(), RtiError>;

    fn disable_time_regulation(&self) -> Result<(), RtiError>;

    fn enable_time_constrained(&self) -> Result<(), RtiError>;

    fn disable_time_constrained(&self) -> Result<(), RtiError>;

    fn time_advance_request(&self, time: LogicalTime) -> Result<(), RtiError>;

    // Callback Delivery

    /// Delivers at most one pending callback, waiting up to `seconds` for one.
    /// Returns whether more callbacks are pending.
    fn evoke_callback(&self, seconds: f64) -> Result<bool, RtiError>;

    /// Delivers pending callbacks for at least `min_seconds` and at most
    /// `max_seconds`. Returns whether more callbacks are pending.
    fn evoke_multiple_callbacks(&self, min_seconds: f64, max_seconds: f64)
        -> Result<bool, RtiError>;

    // Declaration Management

    fn publish_object_class_attributes(
        &self,
        object_class: ObjectClassHandle,
        attributes: &AttributeHandleSet,
    ) -> Result<(), RtiError>;

    fn subscribe_object_class_attributes(
        &self,
        object_class: ObjectClassHandle,
        attributes: &AttributeHandleSet,
    ) -> Result<(), RtiError>;

    fn publish_interaction_class(
        &self,
        interaction_class: InteractionClassHandle,
    ) -> Result<(), RtiError>;

    fn subscribe_interaction_class(
        &self,
        interaction_class: InteractionClassHandle,
    ) -> Result<(), RtiError>;

    // Object Management

    fn register_object_instance(
        &self,
        object_class: ObjectClassHandle,
        instance_name: Option<&str>,
    ) -> Result<ObjectInstanceHandle, RtiError>;

    fn delete_object_instance(
        &self,
        instance: ObjectInstanceHandle,
        tag: &[u8],
    ) -> Result<(), RtiError>;

    fn update_attribute_values(
        &self,
        instance: ObjectInstanceHandle,
        values: &AttributeHandleValueMap,
        tag: &[u8],
        time: Option<LogicalTime>,
    ) -> Result<(), RtiError>;

    fn send_interaction(
        &self,
        interaction_class: InteractionClassHandle,
        values: &ParameterHandleValueMap,
        tag: &[u8],
        time: Option<LogicalTime>,
    ) -> Result<(), RtiError>;

    fn request_attribute_value_update(
        &self,
        instance: ObjectInstanceHandle,
        attributes: &AttributeHandleSet,
        tag: &[u8],
    ) -> Result<(), RtiError>;

    // Support Services

    fn get_object_class_handle(&self, name: &str) -> Result<ObjectClassHandle, RtiError>;

    fn get_object_class_name(&self, handle: ObjectClassHandle) -> Result<String, RtiError>;

    fn get_attribute_handle(
        &self,
        object_class: ObjectClassHandle,
        name: &str,
    ) -> Result<AttributeHandle, RtiError>;

    fn get_attribute_name(
        &self,
        object_class: ObjectClassHandle,
        handle: AttributeHandle,
    ) -> Result<String, RtiError>;

    fn get_interaction_class_handle(&self, name: &str)
        -> Result<InteractionClassHandle, RtiError>;

    fn get_interaction_class_name(
        &self,
        handle: InteractionClassHandle,
    ) -> Result<String, RtiError>;

    fn get_parameter_handle(
        &self,
        interaction_class: InteractionClassHandle,
        name: &str,
    ) -> Result<ParameterHandle, RtiError>;

    fn get_parameter_name(
        &self,
        interaction_class: InteractionClassHandle,
        handle: ParameterHandle,
    ) -> Result<String, RtiError>;

    fn get_object_instance_handle(&self, name: &str) -> Result<ObjectInstanceHandle, RtiError>;

    fn get_object_instance_name(&self, handle: ObjectInstanceHandle) -> Result<String, RtiError>;

    fn get_known_object_class_handle(
        &self,
        instance: ObjectInstanceHandle,
    ) -> Result<ObjectClassHandle, RtiError>;
}
