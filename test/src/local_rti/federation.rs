use std::{
    collections::{BTreeMap, HashMap, HashSet},
    sync::Arc,
};

use log::{debug, trace};

use ucef_shared::{
    rti::{
        AttributeHandleSet, AttributeHandleValueMap, ParameterHandleValueMap, ResignAction,
        RtiError, SynchronizationPointFailureReason,
    },
    FederateHandle, InteractionClassHandle, LogicalTime, ObjectClassHandle, ObjectInstanceHandle,
};

use super::callback::{Callback, CallbackQueue};

struct Member {
    name: String,
    queue: Arc<CallbackQueue>,
    time: LogicalTime,
    requested: Option<LogicalTime>,
    regulating: bool,
    lookahead: LogicalTime,
    constrained: bool,
    // time-stamped callbacks waiting for a grant that covers them
    held: Vec<(LogicalTime, Callback)>,
    published_attributes: HashMap<ObjectClassHandle, AttributeHandleSet>,
    subscribed_attributes: HashMap<ObjectClassHandle, AttributeHandleSet>,
    published_interactions: HashSet<InteractionClassHandle>,
    subscribed_interactions: HashSet<InteractionClassHandle>,
}

impl Member {
    fn new(name: String, queue: Arc<CallbackQueue>) -> Self {
        Self {
            name,
            queue,
            time: 0.0,
            requested: None,
            regulating: false,
            lookahead: 0.0,
            constrained: false,
            held: Vec::new(),
            published_attributes: HashMap::new(),
            subscribed_attributes: HashMap::new(),
            published_interactions: HashSet::new(),
            subscribed_interactions: HashSet::new(),
        }
    }

    fn subscribes_to(&self, class: ObjectClassHandle) -> Option<&AttributeHandleSet> {
        self.subscribed_attributes
            .get(&class)
            .filter(|attributes| !attributes.is_empty())
    }

    fn publishes(&self, class: ObjectClassHandle) -> Option<&AttributeHandleSet> {
        self.published_attributes
            .get(&class)
            .filter(|attributes| !attributes.is_empty())
    }

    /// Earliest time stamp this member may still send with
    fn earliest_send_time(&self) -> LogicalTime {
        self.requested.unwrap_or(self.time) + self.lookahead
    }

    /// Queues a message for delivery, holding time-stamped ones until a grant
    /// covers them when this member is time constrained
    fn deliver(&mut self, time: Option<LogicalTime>, callback: Callback) {
        match time {
            Some(time) if self.constrained => self.held.push((time, callback)),
            _ => self.queue.push(callback),
        }
    }

    fn grant(&mut self, time: LogicalTime) {
        let mut held = std::mem::take(&mut self.held);
        held.sort_by(|(a, _), (b, _)| a.total_cmp(b));
        let (due, later): (Vec<_>, Vec<_>) = held.into_iter().partition(|(stamp, _)| *stamp <= time);
        for (_, callback) in due {
            self.queue.push(callback);
        }
        self.held = later;
        self.time = time;
        self.requested = None;
        self.queue.push(Callback::TimeAdvanceGrant(time));
    }
}

struct SyncRecord {
    tag: Vec<u8>,
    achieved: HashSet<FederateHandle>,
}

struct ObjectRecord {
    class: ObjectClassHandle,
    name: String,
    owner: FederateHandle,
    known_by: HashSet<FederateHandle>,
}

/// One federation execution of the in-process RTI
pub struct Federation {
    name: String,
    expected_federates: usize,
    joined_ever: usize,
    members: BTreeMap<FederateHandle, Member>,
    sync_points: BTreeMap<String, SyncRecord>,
    objects: BTreeMap<ObjectInstanceHandle, ObjectRecord>,
}

impl Federation {
    pub fn new(name: impl Into<String>, expected_federates: usize) -> Self {
        Self {
            name: name.into(),
            expected_federates,
            joined_ever: 0,
            members: BTreeMap::new(),
            sync_points: BTreeMap::new(),
            objects: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn member_names(&self) -> Vec<String> {
        self.members.values().map(|member| member.name.clone()).collect()
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    fn member(&self, federate: FederateHandle) -> Result<&Member, RtiError> {
        self.members
            .get(&federate)
            .ok_or(RtiError::FederateNotExecutionMember)
    }

    fn member_mut(&mut self, federate: FederateHandle) -> Result<&mut Member, RtiError> {
        self.members
            .get_mut(&federate)
            .ok_or(RtiError::FederateNotExecutionMember)
    }

    fn object(&self, instance: ObjectInstanceHandle) -> Result<&ObjectRecord, RtiError> {
        self.objects
            .get(&instance)
            .ok_or_else(|| RtiError::ObjectInstanceNotKnown(instance.to_string()))
    }

    // Federation Management

    pub fn join(
        &mut self,
        federate: FederateHandle,
        federate_name: &str,
        queue: Arc<CallbackQueue>,
    ) -> Result<(), RtiError> {
        if self
            .members
            .values()
            .any(|member| member.name == federate_name)
        {
            return Err(RtiError::RtiInternalError(format!(
                "federate name '{}' is already in use in '{}'",
                federate_name, self.name
            )));
        }
        // late joiners still see every point that has not synchronized yet
        for (label, record) in &self.sync_points {
            queue.push(Callback::AnnounceSync {
                label: label.clone(),
                tag: record.tag.clone(),
            });
        }
        self.members
            .insert(federate, Member::new(federate_name.to_string(), queue));
        self.joined_ever += 1;
        debug!("{} joined {} as {}", federate_name, self.name, federate);
        Ok(())
    }

    pub fn resign(&mut self, federate: FederateHandle, action: ResignAction) -> Result<(), RtiError> {
        self.member(federate)?;
        match action {
            ResignAction::DeleteObjects
            | ResignAction::DeleteObjectsThenDivest
            | ResignAction::CancelThenDeleteThenDivest => {
                let owned: Vec<ObjectInstanceHandle> = self
                    .objects
                    .iter()
                    .filter(|(_, record)| record.owner == federate)
                    .map(|(instance, _)| *instance)
                    .collect();
                for instance in owned {
                    self.remove_object(instance, &[]);
                }
            }
            ResignAction::UnconditionallyDivestAttributes
            | ResignAction::CancelPendingOwnershipAcquisitions
            | ResignAction::NoAction => {}
        }
        if let Some(member) = self.members.remove(&federate) {
            debug!("{} resigned from {}", member.name, self.name);
        }
        self.complete_sync_points();
        self.grant_pending_advances();
        Ok(())
    }

    // Synchronization

    pub fn register_sync_point(
        &mut self,
        federate: FederateHandle,
        label: &str,
        tag: &[u8],
    ) -> Result<(), RtiError> {
        let registrar = self.member(federate)?.queue.clone();
        if self.sync_points.contains_key(label) {
            registrar.push(Callback::SyncRegistrationFailed(
                label.to_string(),
                SynchronizationPointFailureReason::SynchronizationPointLabelNotUnique,
            ));
            return Ok(());
        }
        self.sync_points.insert(
            label.to_string(),
            SyncRecord {
                tag: tag.to_vec(),
                achieved: HashSet::new(),
            },
        );
        registrar.push(Callback::SyncRegistrationSucceeded(label.to_string()));
        for member in self.members.values() {
            member.queue.push(Callback::AnnounceSync {
                label: label.to_string(),
                tag: tag.to_vec(),
            });
        }
        Ok(())
    }

    pub fn achieve_sync_point(&mut self, federate: FederateHandle, label: &str) -> Result<(), RtiError> {
        self.member(federate)?;
        let record = self
            .sync_points
            .get_mut(label)
            .ok_or_else(|| RtiError::SynchronizationPointLabelNotAnnounced(label.to_string()))?;
        record.achieved.insert(federate);
        self.complete_sync_points();
        Ok(())
    }

    fn complete_sync_points(&mut self) {
        if self.members.is_empty() || self.joined_ever < self.expected_federates {
            return;
        }
        let members = &self.members;
        let complete: Vec<String> = self
            .sync_points
            .iter()
            .filter(|(_, record)| members.keys().all(|federate| record.achieved.contains(federate)))
            .map(|(label, _)| label.clone())
            .collect();
        for label in complete {
            self.sync_points.remove(&label);
            debug!("{} synchronized on {}", self.name, label);
            for member in self.members.values() {
                member
                    .queue
                    .push(Callback::FederationSynchronized(label.clone()));
            }
        }
    }

    // Time Management

    pub fn enable_time_regulation(
        &mut self,
        federate: FederateHandle,
        lookahead: LogicalTime,
    ) -> Result<(), RtiError> {
        let member = self.member_mut(federate)?;
        if member.regulating {
            return Err(RtiError::TimeRegulationAlreadyEnabled);
        }
        if !(lookahead >= 0.0) {
            return Err(RtiError::InvalidLookahead(lookahead));
        }
        if member.requested.is_some() {
            return Err(RtiError::InTimeAdvancingState);
        }
        member.regulating = true;
        member.lookahead = lookahead;
        member.queue.push(Callback::TimeRegulationEnabled(member.time));
        Ok(())
    }

    pub fn disable_time_regulation(&mut self, federate: FederateHandle) -> Result<(), RtiError> {
        let member = self.member_mut(federate)?;
        if !member.regulating {
            return Err(RtiError::TimeRegulationIsNotEnabled);
        }
        member.regulating = false;
        self.grant_pending_advances();
        Ok(())
    }

    pub fn enable_time_constrained(&mut self, federate: FederateHandle) -> Result<(), RtiError> {
        let member = self.member_mut(federate)?;
        if member.constrained {
            return Err(RtiError::TimeConstrainedAlreadyEnabled);
        }
        if member.requested.is_some() {
            return Err(RtiError::InTimeAdvancingState);
        }
        member.constrained = true;
        member.queue.push(Callback::TimeConstrainedEnabled(member.time));
        Ok(())
    }

    pub fn disable_time_constrained(&mut self, federate: FederateHandle) -> Result<(), RtiError> {
        let member = self.member_mut(federate)?;
        if !member.constrained {
            return Err(RtiError::TimeConstrainedIsNotEnabled);
        }
        member.constrained = false;
        let mut held = std::mem::take(&mut member.held);
        held.sort_by(|(a, _), (b, _)| a.total_cmp(b));
        for (_, callback) in held {
            member.queue.push(callback);
        }
        self.grant_pending_advances();
        Ok(())
    }

    pub fn request_time_advance(
        &mut self,
        federate: FederateHandle,
        time: LogicalTime,
    ) -> Result<(), RtiError> {
        let member = self.member_mut(federate)?;
        if member.requested.is_some() {
            return Err(RtiError::InTimeAdvancingState);
        }
        if !(time >= member.time) {
            return Err(RtiError::InvalidLogicalTime(time));
        }
        member.requested = Some(time);
        trace!("{} requested time {}", member.name, time);
        self.grant_pending_advances();
        Ok(())
    }

    /// Lower bound on the time stamp of anything other regulating members may
    /// still send to `federate`
    fn time_bound(&self, federate: FederateHandle) -> LogicalTime {
        self.members
            .iter()
            .filter(|(handle, member)| **handle != federate && member.regulating)
            .map(|(_, member)| member.earliest_send_time())
            .fold(LogicalTime::INFINITY, LogicalTime::min)
    }

    fn grant_pending_advances(&mut self) {
        let grantable: Vec<(FederateHandle, LogicalTime)> = self
            .members
            .iter()
            .filter_map(|(handle, member)| {
                let requested = member.requested?;
                let free = !member.constrained || self.time_bound(*handle) > requested;
                free.then_some((*handle, requested))
            })
            .collect();
        for (handle, time) in grantable {
            if let Some(member) = self.members.get_mut(&handle) {
                trace!("Granting {} time {}", member.name, time);
                member.grant(time);
            }
        }
    }

    fn checked_send_time(
        &self,
        federate: FederateHandle,
        time: Option<LogicalTime>,
    ) -> Result<Option<LogicalTime>, RtiError> {
        let sender = self.member(federate)?;
        match time {
            // a non-regulating sender's time stamps carry no ordering promise
            Some(_) if !sender.regulating => Ok(None),
            Some(stamp) if stamp < sender.earliest_send_time() => {
                Err(RtiError::InvalidLogicalTime(stamp))
            }
            other => Ok(other),
        }
    }

    // Declaration Management

    pub fn publish_object_class(
        &mut self,
        federate: FederateHandle,
        class: ObjectClassHandle,
        attributes: &AttributeHandleSet,
    ) -> Result<(), RtiError> {
        self.member_mut(federate)?
            .published_attributes
            .insert(class, attributes.clone());
        Ok(())
    }

    pub fn subscribe_object_class(
        &mut self,
        federate: FederateHandle,
        class: ObjectClassHandle,
        attributes: &AttributeHandleSet,
    ) -> Result<(), RtiError> {
        let member = self.member_mut(federate)?;
        member.subscribed_attributes.insert(class, attributes.clone());
        if attributes.is_empty() {
            return Ok(());
        }
        let queue = member.queue.clone();
        for (instance, record) in self.objects.iter_mut() {
            if record.class == class && record.owner != federate && record.known_by.insert(federate) {
                queue.push(Callback::Discover {
                    instance: *instance,
                    object_class: class,
                    instance_name: record.name.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn publish_interaction_class(
        &mut self,
        federate: FederateHandle,
        class: InteractionClassHandle,
    ) -> Result<(), RtiError> {
        self.member_mut(federate)?.published_interactions.insert(class);
        Ok(())
    }

    pub fn subscribe_interaction_class(
        &mut self,
        federate: FederateHandle,
        class: InteractionClassHandle,
    ) -> Result<(), RtiError> {
        self.member_mut(federate)?.subscribed_interactions.insert(class);
        Ok(())
    }

    // Object Management

    pub fn register_object(
        &mut self,
        federate: FederateHandle,
        class: ObjectClassHandle,
        instance: ObjectInstanceHandle,
        instance_name: Option<&str>,
    ) -> Result<(), RtiError> {
        if self.member(federate)?.publishes(class).is_none() {
            return Err(RtiError::ObjectClassNotPublished(class.to_string()));
        }
        let name = match instance_name {
            Some(name) => {
                if self.objects.values().any(|record| record.name == name) {
                    return Err(RtiError::RtiInternalError(format!(
                        "object instance name '{}' is already in use",
                        name
                    )));
                }
                name.to_string()
            }
            None => format!("HLAobject{}", instance.value()),
        };

        let mut known_by = HashSet::new();
        for (handle, member) in &self.members {
            if *handle != federate && member.subscribes_to(class).is_some() {
                member.queue.push(Callback::Discover {
                    instance,
                    object_class: class,
                    instance_name: name.clone(),
                });
                known_by.insert(*handle);
            }
        }
        self.objects.insert(
            instance,
            ObjectRecord {
                class,
                name,
                owner: federate,
                known_by,
            },
        );
        Ok(())
    }

    pub fn update_attribute_values(
        &mut self,
        federate: FederateHandle,
        instance: ObjectInstanceHandle,
        values: &AttributeHandleValueMap,
        tag: &[u8],
        time: Option<LogicalTime>,
    ) -> Result<(), RtiError> {
        let time = self.checked_send_time(federate, time)?;
        let record = self.object(instance)?;
        if record.owner != federate {
            return Err(RtiError::AttributeNotOwned(instance.to_string()));
        }
        let class = record.class;
        let published = self.member(federate)?.publishes(class);
        if let Some(unowned) = values
            .keys()
            .find(|attribute| !published.is_some_and(|published| published.contains(*attribute)))
        {
            return Err(RtiError::AttributeNotOwned(unowned.to_string()));
        }

        let Self {
            members, objects, ..
        } = self;
        let Some(record) = objects.get_mut(&instance) else {
            return Err(RtiError::ObjectInstanceNotKnown(instance.to_string()));
        };
        for (handle, member) in members.iter_mut() {
            if *handle == federate {
                continue;
            }
            let Some(subscribed) = member.subscribes_to(class) else {
                continue;
            };
            let reflected: AttributeHandleValueMap = values
                .iter()
                .filter(|(attribute, _)| subscribed.contains(*attribute))
                .map(|(attribute, value)| (*attribute, value.clone()))
                .collect();
            if reflected.is_empty() {
                continue;
            }
            if record.known_by.insert(*handle) {
                // first reflection of an object this member was not told about yet
                member.queue.push(Callback::Discover {
                    instance,
                    object_class: class,
                    instance_name: record.name.clone(),
                });
            }
            member.deliver(
                time,
                Callback::Reflect {
                    instance,
                    values: reflected,
                    tag: tag.to_vec(),
                    time,
                },
            );
        }
        Ok(())
    }

    pub fn send_interaction(
        &mut self,
        federate: FederateHandle,
        class: InteractionClassHandle,
        values: &ParameterHandleValueMap,
        tag: &[u8],
        time: Option<LogicalTime>,
    ) -> Result<(), RtiError> {
        if !self.member(federate)?.published_interactions.contains(&class) {
            return Err(RtiError::InteractionClassNotPublished(class.to_string()));
        }
        let time = self.checked_send_time(federate, time)?;
        for (handle, member) in self.members.iter_mut() {
            if *handle != federate && member.subscribed_interactions.contains(&class) {
                member.deliver(
                    time,
                    Callback::ReceiveInteraction {
                        interaction_class: class,
                        values: values.clone(),
                        tag: tag.to_vec(),
                        time,
                    },
                );
            }
        }
        Ok(())
    }

    pub fn delete_object(
        &mut self,
        federate: FederateHandle,
        instance: ObjectInstanceHandle,
        tag: &[u8],
    ) -> Result<(), RtiError> {
        self.member(federate)?;
        if self.object(instance)?.owner != federate {
            return Err(RtiError::DeletePrivilegeNotHeld(instance.to_string()));
        }
        self.remove_object(instance, tag);
        Ok(())
    }

    fn remove_object(&mut self, instance: ObjectInstanceHandle, tag: &[u8]) {
        let Some(record) = self.objects.remove(&instance) else {
            return;
        };
        for handle in record.known_by {
            if let Some(member) = self.members.get(&handle) {
                member.queue.push(Callback::Remove {
                    instance,
                    tag: tag.to_vec(),
                });
            }
        }
    }

    pub fn request_attribute_value_update(
        &mut self,
        federate: FederateHandle,
        instance: ObjectInstanceHandle,
        attributes: &AttributeHandleSet,
        tag: &[u8],
    ) -> Result<(), RtiError> {
        self.member(federate)?;
        let owner = self.object(instance)?.owner;
        if owner == federate {
            return Ok(());
        }
        if let Some(member) = self.members.get(&owner) {
            member.queue.push(Callback::ProvideAttributeValueUpdate {
                instance,
                attributes: attributes.clone(),
                tag: tag.to_vec(),
            });
        }
        Ok(())
    }

    // Support Services

    pub fn object_instance_handle(&self, name: &str) -> Result<ObjectInstanceHandle, RtiError> {
        self.objects
            .iter()
            .find(|(_, record)| record.name == name)
            .map(|(instance, _)| *instance)
            .ok_or_else(|| RtiError::NameNotFound(name.to_string()))
    }

    pub fn object_instance_name(&self, instance: ObjectInstanceHandle) -> Result<String, RtiError> {
        self.object(instance).map(|record| record.name.clone())
    }

    pub fn known_object_class(
        &self,
        federate: FederateHandle,
        instance: ObjectInstanceHandle,
    ) -> Result<ObjectClassHandle, RtiError> {
        let record = self.object(instance)?;
        if record.owner == federate || record.known_by.contains(&federate) {
            Ok(record.class)
        } else {
            Err(RtiError::ObjectInstanceNotKnown(instance.to_string()))
        }
    }
}
