/// Object and interaction routing tests: discovery, reflection, deletion and
/// attribute value requests between an evoked owner and an immediate watcher,
/// plus callbacks for instances the registry never knew

use std::{sync::Arc, thread};

use ucef_federate::{Federate, FederateContext, UcefError};
use ucef_shared::{
    rti::{AttributeHandleValueMap, CallbackModel, FederateAmbassador},
    AttributeHandle, HlaObject, ObjectClass, ObjectInstanceHandle, SharingPolicy,
};
use ucef_test::{
    test_config, Journal, LocalRtiConfig, LocalRtiHub, RecordingFederate, BEACON,
    BEACON_POSITION, PING,
};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn hub(journal: &Journal, expected_federates: usize) -> LocalRtiHub {
    let config = test_config("Objects", "any", SharingPolicy::PublishSubscribe);
    LocalRtiHub::with_config(
        &config.object_model,
        LocalRtiConfig {
            expected_federates,
            journal: Some(journal.clone()),
        },
    )
}

fn request_every_known_position(federate: &FederateContext) -> Result<(), UcefError> {
    for instance in federate.registry().instances() {
        if let Some(object) = federate.get_object(instance) {
            federate.request_attribute_value_update(&object, &[BEACON_POSITION])?;
        }
    }
    Ok(())
}

#[test]
fn owner_and_watcher_exchange_objects_and_interactions() {
    init();
    let journal = Journal::new();
    let hub = hub(&journal, 2);

    let mut owner_config = test_config("Objects", "owner", SharingPolicy::Publish);
    owner_config.sync_before_resign = true;
    let owner_hooks = RecordingFederate::new("owner", journal.clone(), 2)
        .owning_object(BEACON)
        .sending_each_step(PING, false);
    let owner_rti = hub.create_rti("owner");
    let owner = thread::spawn(move || {
        let mut federate = Federate::new(owner_config, owner_rti, owner_hooks);
        federate.run_federate().unwrap();
        federate.into_hooks()
    });

    let mut watcher_config = test_config("Objects", "watcher", SharingPolicy::Subscribe);
    watcher_config.sync_before_resign = true;
    watcher_config.callback_model = CallbackModel::Immediate;
    let watcher_hooks =
        RecordingFederate::new("watcher", journal.clone(), 2).with_check(request_every_known_position);
    let mut watcher = Federate::new(watcher_config, hub.create_rti("watcher"), watcher_hooks);
    watcher.run_federate().unwrap();
    owner.join().unwrap();

    let hooks = watcher.hooks();
    assert_eq!(hooks.discovered().len(), 1);
    let beacon = &hooks.discovered()[0];
    assert_eq!(beacon.class_name(), BEACON);
    assert!(beacon.instance_handle().is_some());

    // two step updates plus the one provided on request
    assert_eq!(journal.count("watcher", "requestAttributeValueUpdate"), 1);
    assert_eq!(journal.count("owner", "updateAttributeValues"), 3);
    assert_eq!(hooks.reflections().len(), 3);
    assert!(hooks.reflections().iter().all(|(_, time)| time.is_none()));
    assert_eq!(beacon.get_as::<i32>(BEACON_POSITION).unwrap(), Some(2));

    assert_eq!(hooks.deleted().len(), 1);
    assert_eq!(hooks.deleted()[0].instance_handle(), beacon.instance_handle());
    assert_eq!(watcher.context().registry().object_count(), 0);
    assert!(watcher.context().registry().instance_maps_agree());

    assert_eq!(hooks.interactions().len(), 2);
    assert!(hooks.interactions().iter().all(|(_, time)| time.is_none()));
    assert!(!hub.federation_exists("Objects"));
}

#[test]
fn reflection_before_discovery_is_dropped() {
    init();
    let journal = Journal::new();
    let hub = hub(&journal, 1);
    let config = test_config("Objects", "solo", SharingPolicy::PublishSubscribe);
    let hooks = RecordingFederate::new("solo", journal, 1).with_check(|federate| {
        let registry = federate.registry();
        let before = registry.object_count();

        let mut values = AttributeHandleValueMap::new();
        values.insert(AttributeHandle::new(1), vec![0, 0, 0, 7]);
        federate.callback_sink().reflect_attribute_values(
            ObjectInstanceHandle::new(999),
            values,
            &[],
            None,
        );

        assert_eq!(registry.object_count(), before);
        assert!(!registry.contains_object(ObjectInstanceHandle::new(999)));
        assert!(registry.instance_maps_agree());
        Ok(())
    });
    let mut federate = Federate::new(config, hub.create_rti("solo"), hooks);

    federate.run_federate().unwrap();

    assert!(federate.hooks().reflections().is_empty());
    assert!(federate.hooks().discovered().is_empty());
}

#[test]
fn second_deletion_is_ignored() {
    init();
    let journal = Journal::new();
    let hub = hub(&journal, 1);
    let config = test_config("Objects", "solo", SharingPolicy::PublishSubscribe);
    let hooks = RecordingFederate::new("solo", journal, 1).with_check(|federate| {
        let registry = federate.registry();
        let class = registry
            .object_class_handle(BEACON)
            .ok_or_else(|| UcefError::unknown_name("object class", BEACON))?;
        let instance = ObjectInstanceHandle::new(4242);
        let sink = federate.callback_sink();

        sink.discover_object_instance(instance, class, "ghost");
        assert!(registry.contains_object(instance));
        assert!(registry.class_of_instance(instance).is_some());

        sink.remove_object_instance(instance, &[]);
        assert!(!registry.contains_object(instance));
        assert!(registry.class_of_instance(instance).is_none());

        sink.remove_object_instance(instance, &[]);
        assert!(!registry.contains_object(instance));
        assert!(registry.instance_maps_agree());
        Ok(())
    });
    let mut federate = Federate::new(config, hub.create_rti("solo"), hooks);

    federate.run_federate().unwrap();

    assert_eq!(federate.hooks().discovered().len(), 1);
    assert_eq!(federate.hooks().deleted().len(), 1);
}

#[test]
fn deleting_an_unregistered_object_is_invalid() {
    init();
    let journal = Journal::new();
    let hub = hub(&journal, 1);
    let config = test_config("Objects", "solo", SharingPolicy::PublishSubscribe);
    let hooks = RecordingFederate::new("solo", journal, 0).with_check(|federate| {
        let object = federate.create_object(BEACON)?;
        assert!(matches!(
            federate.delete_object(&object),
            Err(UcefError::InvalidArgument(_))
        ));
        assert!(matches!(
            federate.create_object("HLAobjectRoot.Nowhere"),
            Err(UcefError::UnknownName { .. })
        ));
        Ok(())
    });
    let mut federate = Federate::new(config, hub.create_rti("solo"), hooks);

    federate.run_federate().unwrap();
}

#[test]
fn registering_a_class_outside_the_object_model_fails_before_the_rti() {
    init();
    let journal = Journal::new();
    let config = test_config("Objects", "solo", SharingPolicy::PublishSubscribe);
    // the RTI knows a class this federate never declared
    let hub = LocalRtiHub::with_config(
        &config
            .object_model
            .clone()
            .with_object_class(ObjectClass::new("HLAobjectRoot.Buoy", SharingPolicy::Publish)),
        LocalRtiConfig {
            expected_federates: 1,
            journal: Some(journal.clone()),
        },
    );
    let hooks = RecordingFederate::new("solo", journal.clone(), 0).with_check(|federate| {
        let buoy = Arc::new(HlaObject::new_local("HLAobjectRoot.Buoy"));
        match federate.register_object(&buoy, None) {
            Err(UcefError::UnknownName { kind, name }) => {
                assert_eq!(kind, "object class");
                assert_eq!(name, "HLAobjectRoot.Buoy");
            }
            other => panic!("Expected UnknownName, got {:?}", other),
        }
        assert!(!buoy.is_registered());
        assert_eq!(federate.registry().object_count(), 0);
        Ok(())
    });
    let mut federate = Federate::new(config, hub.create_rti("solo"), hooks);

    federate.run_federate().unwrap();

    assert_eq!(journal.count("solo", "registerObjectInstance"), 0);
    assert_eq!(hub.object_count("Objects"), 0);
}
