use std::{default::Default, fs, path::Path, path::PathBuf, time::Duration};

use serde::{Deserialize, Serialize};

use ucef_shared::{rti::CallbackModel, LogicalTime, ObjectModel, UcefError};

/// Contains Config properties which will be used by a Federate
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FederateConfig {
    /// Name of the federation execution to join
    pub federation_name: String,
    /// Name this federate joins under, unique within the federation
    pub federate_name: String,
    /// Type this federate joins under, shared by federates of the same kind
    pub federate_type: String,
    /// FOM modules passed when creating the federation
    pub fom_modules: Vec<PathBuf>,
    /// Additional FOM modules passed when joining
    pub join_modules: Vec<PathBuf>,
    /// Simulation Object Model this federate's classes were read from.
    /// Informational only: the engine works from `object_model`.
    pub som_path: Option<PathBuf>,
    /// Whether this federate may create the federation if it does not exist
    pub can_create_federation: bool,
    /// Number of join attempts before giving up, at least one
    pub max_join_attempts: u32,
    /// Fixed delay between join attempts
    pub join_retry_interval_ms: u64,
    /// Whether to wait for the whole federation at READY_TO_RESIGN before
    /// resigning
    pub sync_before_resign: bool,
    /// How the RTI delivers callbacks, fixed for the whole run
    pub callback_model: CallbackModel,
    /// Lookahead offered when time regulating, and the size of every time
    /// advance
    pub lookahead: LogicalTime,
    /// Simulation step size, read by hooks through
    /// [`FederateContext::step_size`](crate::FederateContext::step_size).
    /// The engine only validates it.
    pub step_size: LogicalTime,
    /// Whether this federate honours other federates' lookahead
    pub time_constrained: bool,
    /// Whether this federate imposes its lookahead on others
    pub time_regulated: bool,
    /// Classes this federate publishes and subscribes to
    #[serde(flatten)]
    pub object_model: ObjectModel,
    /// How callbacks are pumped while waiting
    pub pump: PumpConfig,
    /// Upper bound on any single blocking wait. `None` waits for as long as
    /// the federation takes.
    pub wait_timeout_ms: Option<u64>,
}

impl FederateConfig {
    pub fn new(
        federation_name: impl Into<String>,
        federate_name: impl Into<String>,
        federate_type: impl Into<String>,
    ) -> Self {
        Self {
            federation_name: federation_name.into(),
            federate_name: federate_name.into(),
            federate_type: federate_type.into(),
            ..Self::default()
        }
    }

    /// Parses a camelCase JSON configuration document
    pub fn from_json_str(json: &str) -> Result<Self, UcefError> {
        serde_json::from_str(json)
            .map_err(|error| UcefError::Config(format!("could not parse configuration: {}", error)))
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, UcefError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|error| {
            UcefError::Config(format!("could not read '{}': {}", path.display(), error))
        })?;
        Self::from_json_str(&json)
    }

    pub fn join_retry_interval(&self) -> Duration {
        Duration::from_millis(self.join_retry_interval_ms)
    }

    pub fn wait_timeout(&self) -> Option<Duration> {
        self.wait_timeout_ms.map(Duration::from_millis)
    }

    pub fn validate(&self) -> Result<(), UcefError> {
        if self.federation_name.trim().is_empty() {
            return Err(UcefError::Config("federation name is empty".to_string()));
        }
        if self.federate_name.trim().is_empty() {
            return Err(UcefError::Config("federate name is empty".to_string()));
        }
        if self.federate_type.trim().is_empty() {
            return Err(UcefError::Config("federate type is empty".to_string()));
        }
        if self.max_join_attempts == 0 {
            return Err(UcefError::Config(
                "max join attempts must be at least 1".to_string(),
            ));
        }
        if !(self.step_size > 0.0) {
            return Err(UcefError::Config(format!(
                "step size must be positive, got {}",
                self.step_size
            )));
        }
        if !(self.lookahead >= 0.0) {
            return Err(UcefError::Config(format!(
                "lookahead must not be negative, got {}",
                self.lookahead
            )));
        }
        if self.time_regulated && self.lookahead == 0.0 {
            return Err(UcefError::Config(
                "a time regulating federate needs a positive lookahead".to_string(),
            ));
        }
        self.pump.validate()?;
        self.object_model.validate()
    }
}

impl Default for FederateConfig {
    fn default() -> Self {
        Self {
            federation_name: String::new(),
            federate_name: String::new(),
            federate_type: String::new(),
            fom_modules: Vec::new(),
            join_modules: Vec::new(),
            som_path: None,
            can_create_federation: true,
            max_join_attempts: 5,
            join_retry_interval_ms: 5000,
            sync_before_resign: false,
            callback_model: CallbackModel::Evoked,
            lookahead: 1.0,
            step_size: 0.1,
            time_constrained: true,
            time_regulated: true,
            object_model: ObjectModel::default(),
            pump: PumpConfig::default(),
            wait_timeout_ms: None,
        }
    }
}

/// Contains Config properties which determine how a Federate hands control
/// to the RTI while it waits
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PumpConfig {
    /// Sleep per pump when callbacks are delivered on the RTI's own thread
    pub immediate_sleep_ms: u64,
    /// Minimum window of one evoke call when callbacks are evoked
    pub evoke_min_seconds: f64,
    /// Maximum window of one evoke call when callbacks are evoked
    pub evoke_max_seconds: f64,
}

impl PumpConfig {
    pub fn immediate_sleep(&self) -> Duration {
        Duration::from_millis(self.immediate_sleep_ms)
    }

    fn validate(&self) -> Result<(), UcefError> {
        if !(self.evoke_min_seconds >= 0.0) || !(self.evoke_max_seconds >= self.evoke_min_seconds) {
            return Err(UcefError::Config(format!(
                "evoke window [{}, {}] is invalid",
                self.evoke_min_seconds, self.evoke_max_seconds
            )));
        }
        Ok(())
    }
}

impl Default for PumpConfig {
    fn default() -> Self {
        Self {
            immediate_sleep_ms: 5,
            evoke_min_seconds: 0.01,
            evoke_max_seconds: 0.05,
        }
    }
}
