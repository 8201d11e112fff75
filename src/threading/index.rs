//! Incrementally maintained reply forest
//!
//! `ThreadIndex` holds one container per stored message plus one per missing
//! parent. Parent and child links are updated on every insert and removal,
//! so thread questions never rescan the whole mailbox: finding a root costs
//! the depth of the reply chain and collecting a thread costs its size.

use std::collections::{HashMap, HashSet};
use uuid::Uuid;

use super::algorithm::{
    collect_thread_members, detect_cycle_in_ancestry, identify_thread_roots, resolve_root,
};
use super::container::{Container, ThreadGroup};
use crate::error::{MailboxError, MailboxResult};
use crate::models::{Email, NO_PARENT};

#[derive(Debug, Default)]
pub struct ThreadIndex {
    containers: HashMap<Uuid, Container>,
    message_count: usize,
}

impl ThreadIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        ThreadIndex {
            containers: HashMap::with_capacity(capacity),
            message_count: 0,
        }
    }

    /// Number of stored messages indexed (phantoms excluded)
    pub fn len(&self) -> usize {
        self.message_count
    }

    pub fn is_empty(&self) -> bool {
        self.message_count == 0
    }

    pub fn contains(&self, message_id: &Uuid) -> bool {
        self.containers
            .get(message_id)
            .is_some_and(|container| container.has_message)
    }

    /// Whether linking `email` under its parent would close a reply loop
    pub fn would_create_cycle(&self, email: &Email) -> bool {
        !email.is_thread_start()
            && detect_cycle_in_ancestry(&self.containers, &email.id(), &email.parent_id())
    }

    /// Link a message into the forest
    ///
    /// If a phantom already stands for this id, it is filled in and keeps the
    /// replies that were waiting on it.
    pub fn insert(&mut self, email: &Email) {
        let message_id = email.id();
        let parent = (!email.is_thread_start()).then(|| email.parent_id());

        if self.contains(&message_id) {
            self.remove(&message_id);
        }

        match self.containers.get_mut(&message_id) {
            Some(container) => {
                container.has_message = true;
                container.parent = parent;
            }
            None => {
                self.containers
                    .insert(message_id, Container::new_with_message(message_id, parent));
            }
        }
        self.message_count += 1;

        if let Some(parent_id) = parent {
            let parent_container = self
                .containers
                .entry(parent_id)
                .or_insert_with(|| Container::new_phantom(parent_id));
            if parent_container.is_phantom() {
                log::debug!(
                    "message {} replies to {} which is not stored",
                    message_id,
                    parent_id
                );
            }
            parent_container.add_child(message_id);
        }
    }

    /// Unlink a message from the forest
    ///
    /// A message that still has replies leaves a phantom behind so the replies
    /// stay grouped. Returns false if the message was not indexed.
    pub fn remove(&mut self, message_id: &Uuid) -> bool {
        let Some(container) = self.containers.get_mut(message_id) else {
            return false;
        };
        if container.is_phantom() {
            return false;
        }

        let parent = container.parent;
        if container.children.is_empty() {
            self.containers.remove(message_id);
        } else {
            container.demote_to_phantom();
        }
        self.message_count -= 1;

        if let Some(parent_id) = parent {
            self.detach_child(&parent_id, message_id);
        }
        true
    }

    fn detach_child(&mut self, parent_id: &Uuid, child_id: &Uuid) {
        let Some(parent) = self.containers.get_mut(parent_id) else {
            return;
        };
        parent.remove_child(child_id);

        if parent.is_phantom() && parent.children.is_empty() {
            self.containers.remove(parent_id);
        }
    }

    /// Root of the thread containing `message_id`
    ///
    /// Returns `Ok(None)` when the message is not stored. The root may be a
    /// phantom id when the thread start is missing.
    pub fn root_of(&self, message_id: &Uuid) -> MailboxResult<Option<Uuid>> {
        if !self.contains(message_id) {
            return Ok(None);
        }
        resolve_root(&self.containers, message_id).map(Some)
    }

    /// Stored messages hanging from `root_id`, depth-first
    pub fn members(&self, root_id: &Uuid) -> Vec<Uuid> {
        let mut members = Vec::new();
        collect_thread_members(root_id, &self.containers, &mut members);
        members
    }

    /// The whole thread containing `message_id`
    pub fn thread_of(&self, message_id: &Uuid) -> MailboxResult<Option<ThreadGroup>> {
        Ok(self.root_of(message_id)?.map(|root_id| ThreadGroup {
            message_ids: self.members(&root_id),
            root_id,
        }))
    }

    /// Group every stored message by thread
    ///
    /// Messages caught in a reply loop are unreachable from any root; if any
    /// are left over, one of them is reported as `ThreadCycle`.
    pub fn groups(&self) -> MailboxResult<Vec<ThreadGroup>> {
        let mut groups = Vec::new();
        let mut grouped = 0;

        for root_id in identify_thread_roots(&self.containers) {
            let message_ids = self.members(&root_id);
            if message_ids.is_empty() {
                continue;
            }
            grouped += message_ids.len();
            groups.push(ThreadGroup {
                root_id,
                message_ids,
            });
        }

        if grouped != self.message_count {
            log::warn!(
                "{} of {} messages are not reachable from any thread root",
                self.message_count - grouped,
                self.message_count
            );
            return Err(self.first_unreachable(&groups));
        }

        Ok(groups)
    }

    fn first_unreachable(&self, groups: &[ThreadGroup]) -> MailboxError {
        let reachable: HashSet<&Uuid> = groups
            .iter()
            .flat_map(|group| group.message_ids.iter())
            .collect();

        self.containers
            .values()
            .find(|container| container.has_message && !reachable.contains(&container.message_id))
            .map(|container| MailboxError::cycle(container.message_id))
            .unwrap_or_else(|| MailboxError::cycle(NO_PARENT))
    }
}
