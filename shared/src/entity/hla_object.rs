use std::{fmt, sync::OnceLock};

use parking_lot::Mutex;

use crate::{entity::ValueMap, CodecError, HlaScalar, ObjectInstanceHandle, UcefError};

/// One federated object instance.
///
/// Identity is the RTI-assigned instance handle plus the class name. A locally
/// created object has no handle until it is registered; a discovered object
/// has one from the start. Attribute state lives behind a per-instance lock so
/// the callback delivery context and the federate's own thread can both touch
/// it.
pub struct HlaObject {
    class_name: String,
    instance_handle: OnceLock<ObjectInstanceHandle>,
    attributes: Mutex<ValueMap>,
}

impl HlaObject {
    /// An object created by this federate, not yet registered with the RTI
    pub fn new_local(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            instance_handle: OnceLock::new(),
            attributes: Mutex::new(ValueMap::new()),
        }
    }

    /// An object discovered through the RTI
    pub fn new_remote(class_name: impl Into<String>, instance_handle: ObjectInstanceHandle) -> Self {
        let object = Self::new_local(class_name);
        // a fresh OnceLock always accepts its first value
        let _ = object.instance_handle.set(instance_handle);
        object
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn instance_handle(&self) -> Option<ObjectInstanceHandle> {
        self.instance_handle.get().copied()
    }

    pub fn is_registered(&self) -> bool {
        self.instance_handle.get().is_some()
    }

    /// Records the handle the RTI assigned at registration. An object is
    /// registered at most once.
    pub fn assign_instance_handle(&self, handle: ObjectInstanceHandle) -> Result<(), UcefError> {
        self.instance_handle.set(handle).map_err(|_| {
            UcefError::InvalidArgument(format!(
                "object of class '{}' is already registered as {}",
                self.class_name,
                self.instance_handle
                    .get()
                    .map(ToString::to_string)
                    .unwrap_or_default()
            ))
        })
    }

    // Raw Values

    pub fn get_raw(&self, name: &str) -> Option<Vec<u8>> {
        self.attributes.lock().get(name).cloned()
    }

    pub fn set_raw(&self, name: impl Into<String>, value: Vec<u8>) {
        self.attributes.lock().insert(name.into(), value);
    }

    pub fn remove(&self, name: &str) -> Option<Vec<u8>> {
        self.attributes.lock().remove(name)
    }

    pub fn is_present(&self, name: &str) -> bool {
        self.attributes.lock().contains_key(name)
    }

    pub fn names(&self) -> Vec<String> {
        self.attributes.lock().keys().cloned().collect()
    }

    /// Copy of the current attribute state
    pub fn snapshot(&self) -> ValueMap {
        self.attributes.lock().clone()
    }

    /// Overlays `values` onto the current state: named attributes are
    /// overwritten, everything else is kept
    pub fn merge(&self, values: ValueMap) {
        self.attributes.lock().extend(values);
    }

    pub fn clear(&self) {
        self.attributes.lock().clear();
    }

    // Typed Values

    /// Decodes an attribute, or `None` if it has no value yet
    pub fn get_as<T: HlaScalar>(&self, name: &str) -> Result<Option<T>, CodecError> {
        let guard = self.attributes.lock();
        guard.get(name).map(|bytes| T::decode(bytes)).transpose()
    }

    pub fn set<T: HlaScalar>(&self, name: impl Into<String>, value: &T) -> Result<(), CodecError> {
        let bytes = value.encode()?;
        self.set_raw(name, bytes);
        Ok(())
    }
}

impl fmt::Debug for HlaObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HlaObject")
            .field("class_name", &self.class_name)
            .field("instance_handle", &self.instance_handle())
            .field("attributes", &self.names())
            .finish()
    }
}
