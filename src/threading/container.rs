//! Container data structures for thread reconstruction
//!
//! A container is one node of the reply forest. Containers exist both for
//! messages held in the mailbox and for "phantom" messages: ids that some
//! stored message replies to but which are not (or no longer) stored.

use uuid::Uuid;

/// A node in the reply forest.
///
/// ## Phantom Containers
///
/// A phantom is created when a stored message replies to an id the mailbox
/// does not hold, and when a stored message that still has replies is
/// deleted. Phantoms never have a parent (their own reply link is unknown),
/// so they terminate the backward walk and become the root of whatever
/// replies hang below them.
#[derive(Debug, Clone)]
pub struct Container {
    /// Id of the message this container stands for
    pub message_id: Uuid,

    /// Whether the message itself is stored (false for phantoms)
    pub has_message: bool,

    /// Parent container id (None for thread starts and phantoms)
    pub parent: Option<Uuid>,

    /// Ids of the stored messages that reply to this one
    pub children: Vec<Uuid>,
}

impl Container {
    /// Create a container for a stored message
    pub fn new_with_message(message_id: Uuid, parent: Option<Uuid>) -> Self {
        Container {
            message_id,
            has_message: true,
            parent,
            children: Vec::new(),
        }
    }

    /// Create a phantom container for a referenced but missing message
    pub fn new_phantom(message_id: Uuid) -> Self {
        Container {
            message_id,
            has_message: false,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn is_phantom(&self) -> bool {
        !self.has_message
    }

    /// Add a child to this container (avoiding duplicates)
    pub fn add_child(&mut self, child_id: Uuid) {
        if !self.children.contains(&child_id) {
            self.children.push(child_id);
        }
    }

    pub fn remove_child(&mut self, child_id: &Uuid) {
        self.children.retain(|id| id != child_id);
    }

    /// Turn a stored message's container into a phantom, keeping its replies attached.
    pub fn demote_to_phantom(&mut self) {
        self.has_message = false;
        self.parent = None;
    }
}

/// One thread as grouped by the index, before any ordering is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadGroup {
    /// Id the backward walk terminates at (a thread start or a phantom)
    pub root_id: Uuid,

    /// Stored messages in the thread, in depth-first order from the root
    pub message_ids: Vec<Uuid>,
}

/// Ordered summary of a thread
///
/// This is what the mailbox hands out for thread listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadSummary {
    /// Id the thread hangs from; may name a message no longer in the mailbox
    pub root_id: Uuid,

    /// Member ids, most recent first
    pub message_ids: Vec<Uuid>,

    /// Highest timestamp among the members
    pub activity_timestamp: u64,

    /// Members whose read flag is false
    pub unread_count: usize,
}

impl ThreadSummary {
    pub fn len(&self) -> usize {
        self.message_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.message_ids.is_empty()
    }
}
