use std::sync::Arc;

use log::{info, warn};

use ucef_federate::{FederateConfig, FederateContext, FederateHooks, HlaInteraction, HlaObject, UcefError};
use ucef_shared::{rti::CallbackModel, LogicalTime, SharingPolicy};
use ucef_test::{ping_model, PING, PING_COUNT};

pub const FEDERATION: &str = "PingDemo";

pub fn pinger_config() -> FederateConfig {
    let mut config = FederateConfig::new(FEDERATION, "pinger", "Pinger");
    config.callback_model = CallbackModel::Evoked;
    config.sync_before_resign = true;
    config.object_model = ping_model(SharingPolicy::Publish);
    config
}

pub fn ponger_config() -> FederateConfig {
    let mut config = FederateConfig::new(FEDERATION, "ponger", "Ponger");
    config.callback_model = CallbackModel::Immediate;
    config.sync_before_resign = true;
    config.time_regulated = false;
    config.object_model = ping_model(SharingPolicy::Subscribe);
    config
}

/// Sends one time-stamped Ping per step
pub struct Pinger {
    steps: i32,
    sent: i32,
}

impl Pinger {
    pub fn new(steps: i32) -> Self {
        Self { steps, sent: 0 }
    }
}

impl FederateHooks for Pinger {
    fn before_federation_join(&mut self, _: &FederateContext) -> Result<(), UcefError> {
        info!("Pinger joining {}", FEDERATION);
        Ok(())
    }

    fn before_ready_to_populate(&mut self, _: &FederateContext) -> Result<(), UcefError> {
        Ok(())
    }

    fn before_ready_to_run(&mut self, _: &FederateContext) -> Result<(), UcefError> {
        Ok(())
    }

    fn before_first_step(&mut self, _: &FederateContext) -> Result<(), UcefError> {
        Ok(())
    }

    fn step(
        &mut self,
        federate: &FederateContext,
        current_time: LogicalTime,
    ) -> Result<bool, UcefError> {
        if self.sent >= self.steps {
            return Ok(false);
        }
        self.sent += 1;

        let mut ping = federate.create_interaction(PING)?;
        ping.set(PING_COUNT, &self.sent)?;
        let timestamp = current_time + federate.config().lookahead;
        federate.send_interaction(&ping, Some(timestamp))?;
        info!("Pinger sent ping {} for {}", self.sent, timestamp);
        Ok(true)
    }

    fn before_ready_to_resign(&mut self, _: &FederateContext) -> Result<(), UcefError> {
        Ok(())
    }

    fn before_exit(&mut self, _: &FederateContext) -> Result<(), UcefError> {
        info!("Pinger sent {} ping(s)", self.sent);
        Ok(())
    }

    fn receive_object_registration(&mut self, _: &FederateContext, _: Arc<HlaObject>) {}

    fn receive_attribute_reflection(&mut self, _: &FederateContext, _: Arc<HlaObject>) {}

    fn receive_timed_attribute_reflection(
        &mut self,
        _: &FederateContext,
        _: Arc<HlaObject>,
        _: LogicalTime,
    ) {
    }

    fn receive_interaction(&mut self, _: &FederateContext, _: HlaInteraction) {}

    fn receive_timed_interaction(&mut self, _: &FederateContext, _: HlaInteraction, _: LogicalTime) {}

    fn receive_object_deleted(&mut self, _: &FederateContext, _: Arc<HlaObject>) {}
}

/// Counts the Pings it receives until the pinger goes quiet
pub struct Ponger {
    steps: i32,
    step_count: i32,
    ping_count: u32,
}

impl Ponger {
    pub fn new(steps: i32) -> Self {
        Self {
            steps,
            step_count: 0,
            ping_count: 0,
        }
    }

    fn read_ping(&mut self, ping: &HlaInteraction, time: Option<LogicalTime>) {
        self.ping_count += 1;
        match ping.get_as::<i32>(PING_COUNT) {
            Ok(Some(count)) => match time {
                Some(time) => info!("Ponger got ping {} at {}", count, time),
                None => info!("Ponger got ping {}", count),
            },
            Ok(None) => warn!("Ponger got a ping without a count"),
            Err(error) => warn!("Ponger could not read ping: {}", error),
        }
    }
}

impl FederateHooks for Ponger {
    fn before_federation_join(&mut self, _: &FederateContext) -> Result<(), UcefError> {
        info!("Ponger joining {}", FEDERATION);
        Ok(())
    }

    fn before_ready_to_populate(&mut self, _: &FederateContext) -> Result<(), UcefError> {
        Ok(())
    }

    fn before_ready_to_run(&mut self, _: &FederateContext) -> Result<(), UcefError> {
        Ok(())
    }

    fn before_first_step(&mut self, _: &FederateContext) -> Result<(), UcefError> {
        Ok(())
    }

    fn step(&mut self, _: &FederateContext, _: LogicalTime) -> Result<bool, UcefError> {
        self.step_count += 1;
        Ok(self.step_count <= self.steps)
    }

    fn before_ready_to_resign(&mut self, _: &FederateContext) -> Result<(), UcefError> {
        Ok(())
    }

    fn before_exit(&mut self, _: &FederateContext) -> Result<(), UcefError> {
        info!("Ponger received {} ping(s)", self.ping_count);
        Ok(())
    }

    fn receive_object_registration(&mut self, _: &FederateContext, _: Arc<HlaObject>) {}

    fn receive_attribute_reflection(&mut self, _: &FederateContext, _: Arc<HlaObject>) {}

    fn receive_timed_attribute_reflection(
        &mut self,
        _: &FederateContext,
        _: Arc<HlaObject>,
        _: LogicalTime,
    ) {
    }

    fn receive_interaction(&mut self, _: &FederateContext, interaction: HlaInteraction) {
        self.read_ping(&interaction, None);
    }

    fn receive_timed_interaction(
        &mut self,
        _: &FederateContext,
        interaction: HlaInteraction,
        time: LogicalTime,
    ) {
        self.read_ping(&interaction, Some(time));
    }

    fn receive_object_deleted(&mut self, _: &FederateContext, _: Arc<HlaObject>) {}
}
