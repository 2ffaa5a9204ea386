use std::{
    thread,
    time::{Duration, Instant},
};

use ucef_shared::{rti::CallbackModel, UcefError};

use crate::{cancel::CancelToken, config::PumpConfig, rti_wrapper::RtiAmbassadorWrapper};

/// Hands control to the RTI so callbacks can be delivered.
///
/// Under [`CallbackModel::Immediate`] callbacks arrive on their own thread and
/// a pump is a short sleep. Under [`CallbackModel::Evoked`] a pump is one
/// bounded evoke call, during which callbacks run on the calling thread.
pub struct CallbackPump {
    callback_model: CallbackModel,
    config: PumpConfig,
}

impl CallbackPump {
    pub fn new(callback_model: CallbackModel, config: PumpConfig) -> Self {
        Self {
            callback_model,
            config,
        }
    }

    pub fn callback_model(&self) -> CallbackModel {
        self.callback_model
    }

    pub fn pump(&self, rti: &RtiAmbassadorWrapper) -> Result<(), UcefError> {
        match self.callback_model {
            CallbackModel::Immediate => {
                thread::sleep(self.config.immediate_sleep());
                Ok(())
            }
            CallbackModel::Evoked => rti
                .evoke_multiple_callbacks(self.config.evoke_min_seconds, self.config.evoke_max_seconds)
                .map(|_| ()),
        }
    }
}

/// Bounds a blocking wait. Without a timeout and without cancellation a wait
/// lasts as long as the federation takes to deliver what it waits for.
pub struct WaitGuard {
    waiting_for: String,
    cancel: CancelToken,
    deadline: Option<(Instant, Duration)>,
}

impl WaitGuard {
    pub fn new(
        waiting_for: impl Into<String>,
        cancel: CancelToken,
        timeout: Option<Duration>,
    ) -> Self {
        Self {
            waiting_for: waiting_for.into(),
            cancel,
            deadline: timeout.map(|timeout| (Instant::now() + timeout, timeout)),
        }
    }

    /// Fails once the wait has been cancelled or has run out of time
    pub fn check(&self) -> Result<(), UcefError> {
        if self.cancel.is_cancelled() {
            return Err(UcefError::WaitCancelled {
                waiting_for: self.waiting_for.clone(),
            });
        }
        if let Some((deadline, timeout)) = self.deadline {
            if Instant::now() >= deadline {
                return Err(UcefError::WaitTimedOut {
                    waiting_for: self.waiting_for.clone(),
                    timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
                });
            }
        }
        Ok(())
    }

    /// Sleeps for `duration` in short slices so a cancel is noticed promptly
    pub fn sleep(&self, duration: Duration) -> Result<(), UcefError> {
        const SLICE: Duration = Duration::from_millis(10);
        let until = Instant::now() + duration;
        loop {
            self.check()?;
            let now = Instant::now();
            if now >= until {
                return Ok(());
            }
            thread::sleep(SLICE.min(until - now));
        }
    }
}
