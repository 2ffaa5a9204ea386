use std::sync::Arc;

use log::{debug, warn};

use ucef_shared::{HlaInteraction, HlaObject, LogicalTime, UcefError};

use crate::context::FederateContext;

/// The simulation logic of one federate.
///
/// The engine calls the lifecycle hooks in this order, once each:
/// `before_federation_join`, `before_ready_to_populate`, `before_ready_to_run`,
/// `before_first_step`, then `step` until it returns `false`, then
/// `before_ready_to_resign` and `before_exit`. An error from any lifecycle
/// hook aborts the phase it was called from.
///
/// Event hooks run on the federate's own thread whenever callbacks are
/// pumped, which happens inside every blocking wait and after every step.
/// Untimed and timed deliveries arrive through separate hooks.
pub trait FederateHooks {
    // Lifecycle

    /// Called before connecting; the RTI is not yet reachable
    fn before_federation_join(&mut self, federate: &FederateContext) -> Result<(), UcefError>;

    /// Called once joined, published and subscribed, before READY_TO_POPULATE
    fn before_ready_to_populate(&mut self, federate: &FederateContext) -> Result<(), UcefError>;

    /// Called after READY_TO_POPULATE, typically to register initial objects
    fn before_ready_to_run(&mut self, federate: &FederateContext) -> Result<(), UcefError>;

    /// Called after READY_TO_RUN, right before the first step
    fn before_first_step(&mut self, federate: &FederateContext) -> Result<(), UcefError>;

    /// One simulation step at `current_time`. Returning `false` ends the run.
    fn step(
        &mut self,
        federate: &FederateContext,
        current_time: LogicalTime,
    ) -> Result<bool, UcefError>;

    /// Called after time policy is disabled, before READY_TO_RESIGN
    fn before_ready_to_resign(&mut self, federate: &FederateContext) -> Result<(), UcefError>;

    /// Called right before resigning from the federation
    fn before_exit(&mut self, federate: &FederateContext) -> Result<(), UcefError>;

    // Events

    fn receive_object_registration(&mut self, federate: &FederateContext, object: Arc<HlaObject>);

    fn receive_attribute_reflection(&mut self, federate: &FederateContext, object: Arc<HlaObject>);

    fn receive_timed_attribute_reflection(
        &mut self,
        federate: &FederateContext,
        object: Arc<HlaObject>,
        time: LogicalTime,
    );

    fn receive_interaction(&mut self, federate: &FederateContext, interaction: HlaInteraction);

    fn receive_timed_interaction(
        &mut self,
        federate: &FederateContext,
        interaction: HlaInteraction,
        time: LogicalTime,
    );

    /// `object` has already been removed from the registry
    fn receive_object_deleted(&mut self, federate: &FederateContext, object: Arc<HlaObject>);

    /// Another federate asked for current values of attributes of an object
    /// this federate owns. Sends every current value by default.
    fn provide_attribute_value_update(
        &mut self,
        federate: &FederateContext,
        object: Arc<HlaObject>,
        attribute_names: &[String],
    ) {
        debug!(
            "Providing {} requested attribute(s) of {:?}",
            attribute_names.len(),
            object.instance_handle()
        );
        if let Err(error) = federate.update_attribute_values(&object, None) {
            warn!("Could not provide attribute values: {}", error);
        }
    }
}
