use std::{process, sync::Arc};

use log::{debug, error, info, warn};

use ucef_shared::{
    rti::{AttributeHandleSet, FederateAmbassador, ResignAction, RtiAmbassador, RtiError},
    LifecycleState, SyncPoint, UcefError,
};

use crate::{
    callback_sink::CallbackSink,
    cancel::CancelToken,
    config::FederateConfig,
    context::FederateContext,
    events::FederateEvent,
    hooks::FederateHooks,
    pump::WaitGuard,
    rti_wrapper::RtiAmbassadorWrapper,
};

const NO_TAG: &[u8] = &[];

/// Drives one federate through its whole life in a federation: connect,
/// create-or-join, synchronize, run the step loop, and resign.
pub struct Federate<H: FederateHooks> {
    context: FederateContext,
    hooks: H,
}

impl<H: FederateHooks> Federate<H> {
    /// Create a new Federate talking to the RTI through `rti`
    pub fn new(config: FederateConfig, rti: Arc<dyn RtiAmbassador>, hooks: H) -> Self {
        let rti = Arc::new(RtiAmbassadorWrapper::new(rti));
        Self {
            context: FederateContext::new(config, rti),
            hooks,
        }
    }

    pub fn context(&self) -> &FederateContext {
        &self.context
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    pub fn hooks_mut(&mut self) -> &mut H {
        &mut self.hooks
    }

    pub fn into_hooks(self) -> H {
        self.hooks
    }

    pub fn lifecycle_state(&self) -> LifecycleState {
        self.context.lifecycle_state()
    }

    /// Token that abandons any wait this federate is blocked in
    pub fn cancel_token(&self) -> CancelToken {
        self.context.cancel_token()
    }

    /// Runs the federate from GESTATING to EXPIRED.
    ///
    /// May be called once. An error aborts the phase it happened in and is
    /// returned as is; no later phase runs.
    pub fn run_federate(&mut self) -> Result<(), UcefError> {
        let state = self.context.lifecycle_state();
        if state != LifecycleState::Gestating {
            return Err(UcefError::LifecycleViolation {
                operation: "run federate",
                state,
            });
        }
        self.context.config().validate()?;

        self.context.advance_state(LifecycleState::Initializing)?;
        self.federate_setup()?;

        self.context.advance_state(LifecycleState::Running)?;
        self.federate_execution()?;

        self.context.advance_state(LifecycleState::CleaningUp)?;
        self.federate_teardown()?;

        self.context.advance_state(LifecycleState::Expired)
    }

    /// Like [`Federate::run_federate`], but terminates the process with a
    /// non-zero status when the federate could not join at all
    pub fn run_federate_or_exit(&mut self) -> Result<(), UcefError> {
        match self.run_federate() {
            Err(fatal) if fatal.is_fatal() => {
                error!("{}", fatal);
                process::exit(1);
            }
            other => other,
        }
    }

    // Setup

    fn federate_setup(&mut self) -> Result<(), UcefError> {
        self.hooks.before_federation_join(&self.context)?;

        let rti = self.context.rti().clone();
        let config = self.context.config().clone();

        let sink: Arc<dyn FederateAmbassador> = self.context.callback_sink().clone();
        rti.connect(sink, config.callback_model)?;

        if config.can_create_federation {
            if rti
                .create_federation(&config.federation_name, &config.fom_modules)?
                .is_done()
            {
                info!("Created federation {}", config.federation_name);
            }
        }

        self.join_federation()?;
        self.enable_time_policy()?;
        self.publish_and_subscribe()?;
        self.pump_callbacks()?;

        self.hooks.before_ready_to_populate(&self.context)?;
        self.synchronize(SyncPoint::ReadyToPopulate)?;
        self.pump_callbacks()?;

        self.hooks.before_ready_to_run(&self.context)?;
        self.synchronize(SyncPoint::ReadyToRun)?;
        self.pump_callbacks()?;

        self.hooks.before_first_step(&self.context)
    }

    fn join_federation(&mut self) -> Result<(), UcefError> {
        let config = self.context.config();
        let rti = self.context.rti();
        let max_attempts = config.max_join_attempts;
        let backoff = WaitGuard::new(
            format!("join of {}", config.federation_name),
            self.context.cancel_token(),
            None,
        );

        for attempt in 1..=max_attempts {
            match rti.join_federation(
                &config.federate_name,
                &config.federate_type,
                &config.federation_name,
                &config.join_modules,
            ) {
                Ok(handle) => {
                    info!(
                        "Joined federation {} as {} ({})",
                        config.federation_name, config.federate_name, handle
                    );
                    return Ok(());
                }
                Err(error) => {
                    warn!(
                        "Join attempt {}/{} to {} failed: {}",
                        attempt, max_attempts, config.federation_name, error
                    );
                    if attempt < max_attempts {
                        backoff.sleep(config.join_retry_interval())?;
                    }
                }
            }
        }

        Err(UcefError::JoinAttemptsExhausted {
            federation: config.federation_name.clone(),
            attempts: max_attempts,
        })
    }

    fn enable_time_policy(&mut self) -> Result<(), UcefError> {
        let rti = self.context.rti().clone();
        let regulated = self.context.config().time_regulated;
        let constrained = self.context.config().time_constrained;
        let lookahead = self.context.config().lookahead;

        if regulated {
            let outcome = rti.enable_time_regulation(lookahead)?;
            if outcome.is_done() {
                self.wait_until("time regulation", |sink| sink.is_time_regulated())?;
            }
        }
        if constrained {
            let outcome = rti.enable_time_constrained()?;
            if outcome.is_done() {
                self.wait_until("time constrained", |sink| sink.is_time_constrained())?;
            }
        }
        Ok(())
    }

    fn publish_and_subscribe(&mut self) -> Result<(), UcefError> {
        let rti = self.context.rti();
        let model = &self.context.config().object_model;
        let mut object_classes = Vec::with_capacity(model.object_classes().len());
        let mut interaction_classes = Vec::with_capacity(model.interaction_classes().len());

        for class in model.object_classes() {
            let class_handle = rti.object_class_handle(&class.name)?;

            let published = class
                .published_attributes()
                .map(|attribute| rti.attribute_handle(class_handle, &attribute.name))
                .collect::<Result<AttributeHandleSet, _>>()?;
            if !published.is_empty() {
                rti.publish_object_class_attributes(class_handle, &published)?;
                debug!("Published {} attribute(s) of {}", published.len(), class.name);
            }

            let subscribed = class
                .subscribed_attributes()
                .map(|attribute| rti.attribute_handle(class_handle, &attribute.name))
                .collect::<Result<AttributeHandleSet, _>>()?;
            if !subscribed.is_empty() {
                rti.subscribe_object_class_attributes(class_handle, &subscribed)?;
                debug!("Subscribed to {} attribute(s) of {}", subscribed.len(), class.name);
            }

            object_classes.push((class_handle, class.clone()));
        }

        for class in model.interaction_classes() {
            let class_handle = rti.interaction_class_handle(&class.name)?;
            if class.sharing.is_publish() {
                rti.publish_interaction_class(class_handle)?;
                debug!("Published interaction {}", class.name);
            }
            if class.sharing.is_subscribe() {
                rti.subscribe_interaction_class(class_handle)?;
                debug!("Subscribed to interaction {}", class.name);
            }
            interaction_classes.push((class_handle, class.clone()));
        }

        let registry = self.context.registry();
        for (handle, class) in object_classes {
            registry.install_object_class(handle, class);
        }
        for (handle, class) in interaction_classes {
            registry.install_interaction_class(handle, class);
        }
        Ok(())
    }

    /// Registers `point`, achieves it, and waits for the whole federation to
    /// reach it. Another federate registering the same point first is fine.
    pub fn synchronize(&mut self, point: SyncPoint) -> Result<(), UcefError> {
        info!("Synchronizing on {}", point);
        let rti = self.context.rti().clone();
        rti.register_synchronization_point(point.label(), NO_TAG)?;

        match rti.synchronization_point_achieved(point.label()) {
            Ok(()) => {}
            Err(UcefError::Rti {
                source: RtiError::SynchronizationPointLabelNotAnnounced(_),
                ..
            }) => {
                // some RTIs refuse an achieve that races ahead of the announcement
                self.wait_until(format!("announcement of {}", point), |sink| {
                    sink.is_announced(point)
                })?;
                rti.synchronization_point_achieved(point.label())?;
            }
            Err(error) => return Err(error),
        }
        self.context.callback_sink().mark_achieved(point);

        self.wait_until(point.label(), |sink| sink.is_synchronized(point))
    }

    // Execution

    fn federate_execution(&mut self) -> Result<(), UcefError> {
        loop {
            let current_time = self.context.current_time();
            if !self.hooks.step(&self.context, current_time)? {
                info!("Step at {} asked to stop", current_time);
                return Ok(());
            }
            self.advance_time()?;
        }
    }

    /// Requests an advance by one lookahead and waits for the grant
    pub fn advance_time(&mut self) -> Result<(), UcefError> {
        let sink = self.context.callback_sink().clone();
        let next = sink.federate_time() + self.context.config().lookahead;

        sink.begin_advance();
        if let Err(error) = self.context.rti().time_advance_request(next) {
            sink.abort_advance();
            return Err(error);
        }

        self.wait_until(format!("time advance grant to {}", next), |sink| {
            !sink.is_advancing() && sink.federate_time() >= next
        })
    }

    // Teardown

    fn federate_teardown(&mut self) -> Result<(), UcefError> {
        let rti = self.context.rti().clone();
        let config = self.context.config().clone();

        rti.disable_time_constrained()?;
        rti.disable_time_regulation()?;
        self.context.callback_sink().clear_time_policy();

        self.hooks.before_ready_to_resign(&self.context)?;
        if config.sync_before_resign {
            self.synchronize(SyncPoint::ReadyToResign)?;
        }
        self.hooks.before_exit(&self.context)?;

        rti.resign_federation(ResignAction::DeleteObjectsThenDivest)?;
        info!("Resigned from federation {}", config.federation_name);

        if rti.destroy_federation(&config.federation_name)?.is_done() {
            info!("Destroyed federation {}", config.federation_name);
        }
        rti.disconnect()
    }

    // Callback Pumping

    /// Lets the RTI deliver callbacks, then hands the resulting events to the
    /// hooks
    pub fn pump_callbacks(&mut self) -> Result<(), UcefError> {
        self.context.pump().pump(self.context.rti())?;
        self.dispatch_events();
        Ok(())
    }

    fn wait_until<F>(&mut self, waiting_for: impl Into<String>, done: F) -> Result<(), UcefError>
    where
        F: Fn(&CallbackSink) -> bool,
    {
        let sink = self.context.callback_sink().clone();
        let guard = WaitGuard::new(
            waiting_for,
            self.context.cancel_token(),
            self.context.config().wait_timeout(),
        );
        while !done(&sink) {
            guard.check()?;
            self.pump_callbacks()?;
        }
        // events delivered on another thread alongside the awaited callback
        self.dispatch_events();
        Ok(())
    }

    fn dispatch_events(&mut self) {
        let Self { context, hooks } = self;
        for event in context.events().take() {
            debug!("Dispatching {}", event.log());
            match event {
                FederateEvent::ObjectRegistered(object) => {
                    hooks.receive_object_registration(context, object);
                }
                FederateEvent::AttributesReflected { object, time: None } => {
                    hooks.receive_attribute_reflection(context, object);
                }
                FederateEvent::AttributesReflected {
                    object,
                    time: Some(time),
                } => {
                    hooks.receive_timed_attribute_reflection(context, object, time);
                }
                FederateEvent::InteractionReceived {
                    interaction,
                    time: None,
                } => {
                    hooks.receive_interaction(context, interaction);
                }
                FederateEvent::InteractionReceived {
                    interaction,
                    time: Some(time),
                } => {
                    hooks.receive_timed_interaction(context, interaction, time);
                }
                FederateEvent::ObjectDeleted(object) => {
                    hooks.receive_object_deleted(context, object);
                }
                FederateEvent::AttributeValuesRequested {
                    object,
                    attribute_names,
                } => {
                    hooks.provide_attribute_value_update(context, object, &attribute_names);
                }
            }
        }
    }
}
