use serde::{Deserialize, Serialize};

/// Whether the federate publishes, subscribes to, both or neither of a class
/// or attribute
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SharingPolicy {
    #[serde(alias = "PUBLISH")]
    Publish,
    #[serde(alias = "SUBSCRIBE")]
    Subscribe,
    #[serde(alias = "PUBLISHSUBSCRIBE", alias = "PublishAndSubscribe")]
    PublishSubscribe,
    #[default]
    #[serde(alias = "NEITHER")]
    Neither,
}

impl SharingPolicy {
    pub fn is_publish(self) -> bool {
        matches!(self, SharingPolicy::Publish | SharingPolicy::PublishSubscribe)
    }

    pub fn is_subscribe(self) -> bool {
        matches!(
            self,
            SharingPolicy::Subscribe | SharingPolicy::PublishSubscribe
        )
    }
}
