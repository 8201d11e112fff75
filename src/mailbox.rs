//! The mailbox: message store, read flags and thread index
//!
//! `MailBox` owns three structures that must always agree: the message map,
//! the read-state map (same key set) and the `ThreadIndex`. All of them are
//! private and every mutation goes through the methods below.

use std::collections::HashMap;
use uuid::Uuid;

use crate::config::MailboxConfig;
use crate::error::{MailboxError, MailboxResult};
use crate::models::{Email, NO_PARENT};
use crate::threading::{ThreadIndex, ThreadSummary, view};

#[derive(Debug)]
pub struct MailBox {
    messages: HashMap<Uuid, Email>,
    read_state: HashMap<Uuid, bool>,
    index: ThreadIndex,
    check_cycles_on_insert: bool,
}

impl Default for MailBox {
    fn default() -> Self {
        Self::new()
    }
}

impl MailBox {
    pub fn new() -> Self {
        Self::with_config(&MailboxConfig::default())
    }

    pub fn with_config(config: &MailboxConfig) -> Self {
        MailBox {
            messages: HashMap::with_capacity(config.initial_capacity),
            read_state: HashMap::with_capacity(config.initial_capacity),
            index: ThreadIndex::with_capacity(config.initial_capacity),
            check_cycles_on_insert: config.check_cycles_on_insert,
        }
    }

    // ===== Messages =====

    /// Add a message, initially unread
    ///
    /// Returns false if an identical message is already stored or the id is
    /// the reserved [`NO_PARENT`] value. A different message under an already
    /// stored id replaces the old one and resets its read flag.
    pub fn add_message(&mut self, email: Email) -> bool {
        let message_id = email.id();
        if message_id == NO_PARENT {
            log::debug!("rejecting message with reserved id");
            return false;
        }

        match self.messages.get(&message_id) {
            Some(existing) if *existing == email => return false,
            Some(_) => log::debug!("replacing message {}", message_id),
            None => {}
        }

        if self.check_cycles_on_insert && self.index.would_create_cycle(&email) {
            log::warn!(
                "message {} replying to {} closes a reply loop",
                message_id,
                email.parent_id()
            );
        }

        self.index.insert(&email);
        self.messages.insert(message_id, email);
        self.read_state.insert(message_id, false);
        true
    }

    pub fn get_message(&self, message_id: &Uuid) -> Option<&Email> {
        self.messages.get(message_id)
    }

    /// Remove a message together with its read flag
    pub fn delete_message(&mut self, message_id: &Uuid) -> bool {
        if self.messages.remove(message_id).is_none() {
            return false;
        }
        self.read_state.remove(message_id);
        self.index.remove(message_id);
        log::debug!("deleted message {}", message_id);
        true
    }

    pub fn contains(&self, message_id: &Uuid) -> bool {
        self.messages.contains_key(message_id)
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    // ===== Read state =====

    pub fn unread_count(&self) -> usize {
        self.read_state.values().filter(|read| !**read).count()
    }

    pub fn mark_read(&mut self, message_id: &Uuid) -> bool {
        self.set_read(message_id, true)
    }

    pub fn mark_unread(&mut self, message_id: &Uuid) -> bool {
        self.set_read(message_id, false)
    }

    fn set_read(&mut self, message_id: &Uuid, read: bool) -> bool {
        match self.read_state.get_mut(message_id) {
            Some(flag) => {
                *flag = read;
                true
            }
            None => false,
        }
    }

    /// Read flag of a stored message
    ///
    /// Unlike the mark operations, an unknown id is an error here: callers
    /// are expected to only ask about messages they know are stored.
    pub fn is_read(&self, message_id: &Uuid) -> MailboxResult<bool> {
        self.read_state
            .get(message_id)
            .copied()
            .ok_or(MailboxError::UnknownMessage(*message_id))
    }

    // ===== Views =====

    /// Every message, most recent first
    pub fn timestamp_view(&self) -> Vec<Email> {
        view::timestamp_view(self.messages.values())
    }

    /// Messages with `start <= timestamp <= end`, earliest first
    pub fn messages_in_range(&self, start: u64, end: u64) -> MailboxResult<Vec<Email>> {
        if start > end {
            return Err(MailboxError::invalid_range(start, end));
        }
        Ok(view::range_view(self.messages.values(), start, end))
    }

    /// Every message grouped by thread, most recently active thread first
    pub fn threaded_view(&self) -> MailboxResult<Vec<Email>> {
        let groups = self.index.groups()?;
        Ok(view::threaded_view(groups, &self.messages))
    }

    /// One summary per thread, in threaded-view order
    pub fn threads(&self) -> MailboxResult<Vec<ThreadSummary>> {
        let groups = self.index.groups()?;
        Ok(view::thread_summaries(
            groups,
            &self.messages,
            &self.read_state,
        ))
    }

    // ===== Threads =====

    /// Root id of the thread containing `message_id`
    ///
    /// `Ok(None)` if the message is not stored. When the thread start is no
    /// longer (or never was) in the mailbox, the root is the id of the missing
    /// message the surviving replies point at.
    pub fn thread_root(&self, message_id: &Uuid) -> MailboxResult<Option<Uuid>> {
        self.index.root_of(message_id)
    }

    /// Messages in the same thread as `message_id`, most recent first
    pub fn thread_messages(&self, message_id: &Uuid) -> MailboxResult<Option<Vec<Email>>> {
        let Some(group) = self.index.thread_of(message_id)? else {
            return Ok(None);
        };
        let members = group
            .message_ids
            .iter()
            .filter_map(|id| self.messages.get(id));
        Ok(Some(view::timestamp_view(members)))
    }

    pub fn mark_thread_read(&mut self, message_id: &Uuid) -> MailboxResult<bool> {
        self.set_thread_read(message_id, true)
    }

    pub fn mark_thread_unread(&mut self, message_id: &Uuid) -> MailboxResult<bool> {
        self.set_thread_read(message_id, false)
    }

    /// Resolve the whole thread before touching any flag, so a reply loop
    /// leaves read state unchanged.
    fn set_thread_read(&mut self, message_id: &Uuid, read: bool) -> MailboxResult<bool> {
        let Some(group) = self.index.thread_of(message_id)? else {
            return Ok(false);
        };

        for id in &group.message_ids {
            self.set_read(id, read);
        }
        log::debug!(
            "marked {} messages in thread {} as {}",
            group.message_ids.len(),
            group.root_id,
            if read { "read" } else { "unread" }
        );
        Ok(true)
    }
}
