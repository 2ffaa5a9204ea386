use crate::{
    rti::{
        AttributeHandleSet, AttributeHandleValueMap, ParameterHandleValueMap,
        SynchronizationPointFailureReason,
    },
    InteractionClassHandle, LogicalTime, ObjectClassHandle, ObjectInstanceHandle,
};

/// Callbacks the RTI makes into a connected federate.
///
/// These run on the RTI's delivery context: a thread of its own under
/// [`CallbackModel::Immediate`](crate::rti::CallbackModel::Immediate), or
/// inside an evoke call under
/// [`CallbackModel::Evoked`](crate::rti::CallbackModel::Evoked).
/// Implementations must not block here.
///
/// A `None` time on a reflection or interaction means the delivery was
/// receive-order.
pub trait FederateAmbassador: Send + Sync {
    // Synchronization

    fn synchronization_point_registration_succeeded(&self, label: &str);

    fn synchronization_point_registration_failed(
        &self,
        label: &str,
        reason: SynchronizationPointFailureReason,
    );

    fn announce_synchronization_point(&self, label: &str, tag: &[u8]);

    fn federation_synchronized(&self, label: &str);

    // Time Management

    fn time_regulation_enabled(&self, time: LogicalTime);

    fn time_constrained_enabled(&self, time: LogicalTime);

    fn time_advance_grant(&self, time: LogicalTime);

    // Object Management

    fn discover_object_instance(
        &self,
        instance: ObjectInstanceHandle,
        object_class: ObjectClassHandle,
        instance_name: &str,
    );

    fn reflect_attribute_values(
        &self,
        instance: ObjectInstanceHandle,
        values: AttributeHandleValueMap,
        tag: &[u8],
        time: Option<LogicalTime>,
    );

    fn receive_interaction(
        &self,
        interaction_class: InteractionClassHandle,
        values: ParameterHandleValueMap,
        tag: &[u8],
        time: Option<LogicalTime>,
    );

    fn remove_object_instance(&self, instance: ObjectInstanceHandle, tag: &[u8]);

    fn provide_attribute_value_update(
        &self,
        instance: ObjectInstanceHandle,
        attributes: AttributeHandleSet,
        tag: &[u8],
    ) {
        let _ = (instance, attributes, tag);
    }
}
