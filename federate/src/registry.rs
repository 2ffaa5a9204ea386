use std::{collections::HashMap, sync::Arc};

use log::warn;
use parking_lot::Mutex;

use ucef_shared::{
    HlaObject, InteractionClass, InteractionClassHandle, ObjectClass, ObjectClassHandle,
    ObjectInstanceHandle, ValueMap,
};

/// Object and interaction state shared between the federate's thread and the
/// callback delivery context.
///
/// Everything sits behind one coarse lock, held only for the map operation
/// itself: never across an RTI call, a hook, or an object's own attribute lock.
#[derive(Default)]
pub struct Registry {
    maps: Mutex<RegistryMaps>,
}

#[derive(Default)]
struct RegistryMaps {
    object_class_by_handle: HashMap<ObjectClassHandle, Arc<ObjectClass>>,
    interaction_class_by_handle: HashMap<InteractionClassHandle, Arc<InteractionClass>>,
    class_by_instance: HashMap<ObjectInstanceHandle, (ObjectClassHandle, Arc<ObjectClass>)>,
    object_by_instance: HashMap<ObjectInstanceHandle, Arc<HlaObject>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    // Class Caches

    pub(crate) fn install_object_class(&self, handle: ObjectClassHandle, class: ObjectClass) {
        self.maps
            .lock()
            .object_class_by_handle
            .insert(handle, Arc::new(class));
    }

    pub(crate) fn install_interaction_class(
        &self,
        handle: InteractionClassHandle,
        class: InteractionClass,
    ) {
        self.maps
            .lock()
            .interaction_class_by_handle
            .insert(handle, Arc::new(class));
    }

    pub fn object_class(&self, handle: ObjectClassHandle) -> Option<Arc<ObjectClass>> {
        self.maps.lock().object_class_by_handle.get(&handle).cloned()
    }

    pub fn interaction_class(&self, handle: InteractionClassHandle) -> Option<Arc<InteractionClass>> {
        self.maps
            .lock()
            .interaction_class_by_handle
            .get(&handle)
            .cloned()
    }

    pub fn object_class_handle(&self, name: &str) -> Option<ObjectClassHandle> {
        self.maps
            .lock()
            .object_class_by_handle
            .iter()
            .find(|(_, class)| class.name == name)
            .map(|(handle, _)| *handle)
    }

    pub fn interaction_class_handle(&self, name: &str) -> Option<InteractionClassHandle> {
        self.maps
            .lock()
            .interaction_class_by_handle
            .iter()
            .find(|(_, class)| class.name == name)
            .map(|(handle, _)| *handle)
    }

    // Instances

    /// Creates and records an object for an instance the RTI just told us
    /// about. Unknown classes and already known instances are dropped.
    pub fn discover_object(
        &self,
        instance: ObjectInstanceHandle,
        class_handle: ObjectClassHandle,
    ) -> Option<Arc<HlaObject>> {
        let mut maps = self.maps.lock();
        let Some(class) = maps.object_class_by_handle.get(&class_handle).cloned() else {
            warn!(
                "Discovered {} of unknown object class {}, ignoring it",
                instance, class_handle
            );
            return None;
        };
        if maps.object_by_instance.contains_key(&instance) {
            warn!("Discovered {} twice, keeping the first", instance);
            return None;
        }
        let object = Arc::new(HlaObject::new_remote(class.name.clone(), instance));
        maps.class_by_instance
            .insert(instance, (class_handle, class));
        maps.object_by_instance.insert(instance, object.clone());
        Some(object)
    }

    /// Records an object this federate registered itself
    pub(crate) fn insert_local_object(
        &self,
        object: Arc<HlaObject>,
        class_handle: ObjectClassHandle,
    ) -> bool {
        let Some(instance) = object.instance_handle() else {
            warn!(
                "Refusing to record unregistered object of class '{}'",
                object.class_name()
            );
            return false;
        };
        let mut maps = self.maps.lock();
        let Some(class) = maps.object_class_by_handle.get(&class_handle).cloned() else {
            warn!(
                "Registered {} of uncached object class {}, not recording it",
                instance, class_handle
            );
            return false;
        };
        maps.class_by_instance
            .insert(instance, (class_handle, class));
        maps.object_by_instance.insert(instance, object);
        true
    }

    pub fn class_of_instance(
        &self,
        instance: ObjectInstanceHandle,
    ) -> Option<(ObjectClassHandle, Arc<ObjectClass>)> {
        self.maps.lock().class_by_instance.get(&instance).cloned()
    }

    pub fn object(&self, instance: ObjectInstanceHandle) -> Option<Arc<HlaObject>> {
        self.maps.lock().object_by_instance.get(&instance).cloned()
    }

    /// Merges reflected values into a known object.
    ///
    /// A reflection for an instance that was never discovered, or has been
    /// removed since, is dropped and the maps are left untouched.
    pub fn reflect(&self, instance: ObjectInstanceHandle, values: ValueMap) -> Option<Arc<HlaObject>> {
        let object = self.object(instance);
        match object {
            Some(object) => {
                // registry lock is released before taking the object's lock
                object.merge(values);
                Some(object)
            }
            None => {
                warn!(
                    "Reflection for unknown {}, dropping {} attribute(s)",
                    instance,
                    values.len()
                );
                None
            }
        }
    }

    /// Removes an instance from both instance maps at once
    pub fn remove_object(&self, instance: ObjectInstanceHandle) -> Option<Arc<HlaObject>> {
        let mut maps = self.maps.lock();
        maps.class_by_instance.remove(&instance);
        let removed = maps.object_by_instance.remove(&instance);
        if removed.is_none() {
            warn!("Removal of unknown {}, ignoring it", instance);
        }
        removed
    }

    pub fn contains_object(&self, instance: ObjectInstanceHandle) -> bool {
        self.maps.lock().object_by_instance.contains_key(&instance)
    }

    pub fn object_count(&self) -> usize {
        self.maps.lock().object_by_instance.len()
    }

    /// Handles of every object currently known, in no particular order
    pub fn instances(&self) -> Vec<ObjectInstanceHandle> {
        self.maps.lock().object_by_instance.keys().copied().collect()
    }

    /// Whether every recorded object also has its class recorded, and the reverse
    pub fn instance_maps_agree(&self) -> bool {
        let maps = self.maps.lock();
        maps.class_by_instance.len() == maps.object_by_instance.len()
            && maps
                .object_by_instance
                .keys()
                .all(|instance| maps.class_by_instance.contains_key(instance))
    }
}
