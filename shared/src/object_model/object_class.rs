use serde::{Deserialize, Serialize};

use crate::{DataType, SharingPolicy};

/// One attribute of an object class
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectAttribute {
    pub name: String,
    #[serde(default)]
    pub sharing: SharingPolicy,
    #[serde(default)]
    pub data_type: DataType,
}

impl ObjectAttribute {
    pub fn new(name: impl Into<String>, sharing: SharingPolicy, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            sharing,
            data_type,
        }
    }
}

/// Cached metadata of an object class: its fully qualified name, the sharing
/// policy of the class and its attributes, keyed by name
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectClass {
    pub name: String,
    #[serde(default)]
    pub sharing: SharingPolicy,
    #[serde(default)]
    attributes: Vec<ObjectAttribute>,
}

impl ObjectClass {
    pub fn new(name: impl Into<String>, sharing: SharingPolicy) -> Self {
        Self {
            name: name.into(),
            sharing,
            attributes: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, attribute: ObjectAttribute) -> Self {
        self.add_attribute(attribute);
        self
    }

    /// Adds an attribute, replacing any existing one with the same name
    pub fn add_attribute(&mut self, attribute: ObjectAttribute) {
        match self.attributes.iter_mut().find(|a| a.name == attribute.name) {
            Some(existing) => *existing = attribute,
            None => self.attributes.push(attribute),
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&ObjectAttribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    pub fn attributes(&self) -> &[ObjectAttribute] {
        &self.attributes
    }

    /// Attributes this federate publishes, empty unless the class itself is
    /// published
    pub fn published_attributes(&self) -> impl Iterator<Item = &ObjectAttribute> {
        let class_publishes = self.sharing.is_publish();
        self.attributes
            .iter()
            .filter(move |a| class_publishes && a.sharing.is_publish())
    }

    /// Attributes this federate subscribes to, empty unless the class itself
    /// is subscribed
    pub fn subscribed_attributes(&self) -> impl Iterator<Item = &ObjectAttribute> {
        let class_subscribes = self.sharing.is_subscribe();
        self.attributes
            .iter()
            .filter(move |a| class_subscribes && a.sharing.is_subscribe())
    }

    /// Last segment of the namespace-delimited name
    pub fn short_name(&self) -> &str {
        short_name(&self.name)
    }

    pub(crate) fn duplicate_member(&self) -> Option<&str> {
        duplicate(self.attributes.iter().map(|a| a.name.as_str()))
    }
}

pub(crate) fn short_name(qualified: &str) -> &str {
    qualified.rsplit('.').next().unwrap_or(qualified)
}

pub(crate) fn duplicate<'a>(mut names: impl Iterator<Item = &'a str>) -> Option<&'a str> {
    let mut seen = std::collections::HashSet::new();
    names.find(|name| !seen.insert(*name))
}
