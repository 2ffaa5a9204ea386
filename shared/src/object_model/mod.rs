use serde::{Deserialize, Serialize};

use crate::UcefError;

pub mod data_type;
pub mod interaction_class;
pub mod object_class;
pub mod sharing;

use interaction_class::InteractionClass;
use object_class::{duplicate, ObjectClass};

/// The object and interaction classes a federate works with, before any of
/// them has a wire handle
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectModel {
    #[serde(default)]
    object_classes: Vec<ObjectClass>,
    #[serde(default)]
    interaction_classes: Vec<InteractionClass>,
}

impl ObjectModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_object_class(mut self, class: ObjectClass) -> Self {
        self.add_object_class(class);
        self
    }

    pub fn with_interaction_class(mut self, class: InteractionClass) -> Self {
        self.add_interaction_class(class);
        self
    }

    /// Adds an object class, replacing any existing one with the same name
    pub fn add_object_class(&mut self, class: ObjectClass) {
        match self.object_classes.iter_mut().find(|c| c.name == class.name) {
            Some(existing) => *existing = class,
            None => self.object_classes.push(class),
        }
    }

    /// Adds an interaction class, replacing any existing one with the same name
    pub fn add_interaction_class(&mut self, class: InteractionClass) {
        match self
            .interaction_classes
            .iter_mut()
            .find(|c| c.name == class.name)
        {
            Some(existing) => *existing = class,
            None => self.interaction_classes.push(class),
        }
    }

    pub fn object_class(&self, name: &str) -> Option<&ObjectClass> {
        self.object_classes.iter().find(|c| c.name == name)
    }

    pub fn interaction_class(&self, name: &str) -> Option<&InteractionClass> {
        self.interaction_classes.iter().find(|c| c.name == name)
    }

    pub fn object_classes(&self) -> &[ObjectClass] {
        &self.object_classes
    }

    pub fn interaction_classes(&self) -> &[InteractionClass] {
        &self.interaction_classes
    }

    /// Rejects duplicate class names and duplicate member names within a
    /// class. Deserialized models bypass the replacing `add_*` methods, so
    /// this is the only place duplicates are caught for them.
    pub fn validate(&self) -> Result<(), UcefError> {
        if let Some(name) = duplicate(self.object_classes.iter().map(|c| c.name.as_str())) {
            return Err(UcefError::Config(format!(
                "object class '{}' is declared more than once",
                name
            )));
        }
        if let Some(name) = duplicate(self.interaction_classes.iter().map(|c| c.name.as_str())) {
            return Err(UcefError::Config(format!(
                "interaction class '{}' is declared more than once",
                name
            )));
        }
        for class in &self.object_classes {
            if class.name.is_empty() {
                return Err(UcefError::Config("object class with empty name".to_string()));
            }
            if let Some(attribute) = class.duplicate_member() {
                return Err(UcefError::Config(format!(
                    "attribute '{}' is declared more than once on '{}'",
                    attribute, class.name
                )));
            }
        }
        for class in &self.interaction_classes {
            if class.name.is_empty() {
                return Err(UcefError::Config(
                    "interaction class with empty name".to_string(),
                ));
            }
            if let Some(parameter) = class.duplicate_member() {
                return Err(UcefError::Config(format!(
                    "parameter '{}' is declared more than once on '{}'",
                    parameter, class.name
                )));
            }
        }
        Ok(())
    }
}
