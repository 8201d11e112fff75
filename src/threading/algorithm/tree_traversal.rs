//! Tree traversal utilities for thread reconstruction
//!
//! All traversals are iterative with an explicit stack so that a very long
//! reply chain cannot overflow the call stack.

use std::collections::HashMap;
use uuid::Uuid;

use super::super::container::Container;

/// Collect every stored message below (and including) `root_id`
///
/// Phantoms are walked through but not reported. Output is depth-first,
/// children visited in the order they were linked.
pub fn collect_thread_members(
    root_id: &Uuid,
    containers: &HashMap<Uuid, Container>,
    collected_members: &mut Vec<Uuid>,
) {
    let mut traversal_stack = vec![*root_id];

    while let Some(current_id) = traversal_stack.pop() {
        if let Some(container) = containers.get(&current_id) {
            if container.has_message {
                collected_members.push(current_id);
            }

            // Reverse keeps left-to-right order when popping
            for child_id in container.children.iter().rev() {
                traversal_stack.push(*child_id);
            }
        }
    }
}

/// Ids of every container without a parent
pub fn identify_thread_roots(containers: &HashMap<Uuid, Container>) -> Vec<Uuid> {
    containers
        .values()
        .filter(|container| container.parent.is_none())
        .map(|container| container.message_id)
        .collect()
}
