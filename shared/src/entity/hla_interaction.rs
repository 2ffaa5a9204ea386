use crate::{entity::ValueMap, CodecError, HlaScalar};

/// One interaction occurrence: a class name and its raw parameter values.
///
/// Interactions have no identity. They are built, sent or dispatched, and
/// dropped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HlaInteraction {
    class_name: String,
    parameters: ValueMap,
}

impl HlaInteraction {
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            parameters: ValueMap::new(),
        }
    }

    pub fn with_parameters(class_name: impl Into<String>, parameters: ValueMap) -> Self {
        Self {
            class_name: class_name.into(),
            parameters,
        }
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn parameters(&self) -> &ValueMap {
        &self.parameters
    }

    pub fn into_parameters(self) -> ValueMap {
        self.parameters
    }

    pub fn get_raw(&self, name: &str) -> Option<&[u8]> {
        self.parameters.get(name).map(Vec::as_slice)
    }

    pub fn set_raw(&mut self, name: impl Into<String>, value: Vec<u8>) {
        self.parameters.insert(name.into(), value);
    }

    pub fn is_present(&self, name: &str) -> bool {
        self.parameters.contains_key(name)
    }

    pub fn clear(&mut self) {
        self.parameters.clear();
    }

    pub fn get_as<T: HlaScalar>(&self, name: &str) -> Result<Option<T>, CodecError> {
        self.parameters
            .get(name)
            .map(|bytes| T::decode(bytes))
            .transpose()
    }

    pub fn set<T: HlaScalar>(&mut self, name: impl Into<String>, value: &T) -> Result<(), CodecError> {
        let bytes = value.encode()?;
        self.set_raw(name, bytes);
        Ok(())
    }
}
