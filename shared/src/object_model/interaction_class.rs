use serde::{Deserialize, Serialize};

use crate::{
    object_model::object_class::{duplicate, short_name},
    DataType, SharingPolicy,
};

/// One parameter of an interaction class
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionParameter {
    pub name: String,
    #[serde(default)]
    pub data_type: DataType,
}

impl InteractionParameter {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// Cached metadata of an interaction class
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionClass {
    pub name: String,
    #[serde(default)]
    pub sharing: SharingPolicy,
    #[serde(default)]
    parameters: Vec<InteractionParameter>,
}

impl InteractionClass {
    pub fn new(name: impl Into<String>, sharing: SharingPolicy) -> Self {
        Self {
            name: name.into(),
            sharing,
            parameters: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, parameter: InteractionParameter) -> Self {
        self.add_parameter(parameter);
        self
    }

    /// Adds a parameter, replacing any existing one with the same name
    pub fn add_parameter(&mut self, parameter: InteractionParameter) {
        match self.parameters.iter_mut().find(|p| p.name == parameter.name) {
            Some(existing) => *existing = parameter,
            None => self.parameters.push(parameter),
        }
    }

    pub fn parameter(&self, name: &str) -> Option<&InteractionParameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    pub fn parameters(&self) -> &[InteractionParameter] {
        &self.parameters
    }

    pub fn short_name(&self) -> &str {
        short_name(&self.name)
    }

    pub(crate) fn duplicate_member(&self) -> Option<&str> {
        duplicate(self.parameters.iter().map(|p| p.name.as_str()))
    }
}
