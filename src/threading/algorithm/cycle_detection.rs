//! Ancestry walks with cycle detection
//!
//! Reply links come from outside the mailbox, so nothing stops a malformed
//! set of messages from forming a loop. Every walk up the parent chain keeps a
//! visited set and stops as soon as it sees a container twice.

use std::collections::{HashMap, HashSet};
use uuid::Uuid;

use super::super::container::Container;
use crate::error::{MailboxError, MailboxResult};

/// Check if linking a child to a parent would create a cycle
///
/// Walks up the ancestry chain from the proposed parent. If the child shows
/// up anywhere in that chain, or the chain already loops, linking would make
/// the child its own ancestor.
///
/// ## Example
///
/// ```text
/// Current tree:  A → B → C
///
/// Trying to link: A under C (would create cycle A → B → C → A)
/// Result: true (cycle detected)
///
/// Trying to link: D under C
/// Result: false (safe to link)
/// ```
pub fn detect_cycle_in_ancestry(
    containers: &HashMap<Uuid, Container>,
    child_id: &Uuid,
    parent_id: &Uuid,
) -> bool {
    let mut visited = HashSet::new();
    let mut current = Some(*parent_id);

    while let Some(id) = current {
        if id == *child_id || !visited.insert(id) {
            return true;
        }

        current = containers.get(&id).and_then(|container| container.parent);
    }

    false
}

/// Follow parent links from `start_id` until a container without a parent
///
/// The terminal container is the thread root: either a thread start or a
/// phantom standing in for a missing message. Returns `ThreadCycle` if the
/// walk revisits a container, and `start_id` itself if it is not indexed.
pub fn resolve_root(
    containers: &HashMap<Uuid, Container>,
    start_id: &Uuid,
) -> MailboxResult<Uuid> {
    let mut visited = HashSet::new();
    let mut current = *start_id;

    loop {
        if !visited.insert(current) {
            log::warn!(
                "reply chain from {} revisits {} after {} steps",
                start_id,
                current,
                visited.len()
            );
            return Err(MailboxError::cycle(*start_id));
        }

        match containers.get(&current).and_then(|container| container.parent) {
            Some(parent_id) => current = parent_id,
            None => return Ok(current),
        }
    }
}
