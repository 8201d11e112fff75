//! Ordered views over a set of messages
//!
//! Everything here is pure: callers hand in the messages (and, for the
//! threaded view, the grouping produced by `ThreadIndex`) and get back a
//! freshly sorted sequence.

use std::collections::HashMap;
use uuid::Uuid;

use super::container::{ThreadGroup, ThreadSummary};
use crate::models::{Email, TimestampOrder};

/// All messages, most recent first
pub fn timestamp_view<'a>(emails: impl IntoIterator<Item = &'a Email>) -> Vec<Email> {
    let mut view: Vec<Email> = emails.into_iter().cloned().collect();
    TimestampOrder::Descending.sort(&mut view);
    view
}

/// Messages with `start <= timestamp <= end`, earliest first
///
/// The caller is responsible for rejecting `start > end`; here such a range
/// simply matches nothing.
pub fn range_view<'a>(
    emails: impl IntoIterator<Item = &'a Email>,
    start: u64,
    end: u64,
) -> Vec<Email> {
    let mut view: Vec<Email> = emails
        .into_iter()
        .filter(|email| (start..=end).contains(&email.timestamp()))
        .cloned()
        .collect();
    TimestampOrder::Ascending.sort(&mut view);
    view
}

/// A thread's members resolved to messages and sorted most recent first
struct ResolvedThread<'a> {
    root_id: Uuid,
    activity_timestamp: u64,
    emails: Vec<&'a Email>,
}

/// Resolve each group against the message map and apply the two-level sort:
/// threads by descending activity timestamp, members by descending timestamp.
fn order_threads<'a>(
    groups: Vec<ThreadGroup>,
    messages: &'a HashMap<Uuid, Email>,
) -> Vec<ResolvedThread<'a>> {
    let mut threads: Vec<ResolvedThread<'a>> = groups
        .into_iter()
        .filter_map(|group| {
            let mut emails: Vec<&Email> = group
                .message_ids
                .iter()
                .filter_map(|id| messages.get(id))
                .collect();
            emails.sort_unstable_by(|a, b| TimestampOrder::Descending.compare(a, b));

            // Sorted descending, so the first member carries the activity timestamp
            let activity_timestamp = emails.first()?.timestamp();
            Some(ResolvedThread {
                root_id: group.root_id,
                activity_timestamp,
                emails,
            })
        })
        .collect();

    threads.sort_unstable_by(|a, b| b.activity_timestamp.cmp(&a.activity_timestamp));
    threads
}

/// All messages grouped by thread
///
/// The thread with the most recent activity comes first; within a thread,
/// more recent messages come first.
pub fn threaded_view(groups: Vec<ThreadGroup>, messages: &HashMap<Uuid, Email>) -> Vec<Email> {
    order_threads(groups, messages)
        .into_iter()
        .flat_map(|thread| thread.emails.into_iter().cloned())
        .collect()
}

/// Same ordering as [`threaded_view`], one summary per thread
pub fn thread_summaries(
    groups: Vec<ThreadGroup>,
    messages: &HashMap<Uuid, Email>,
    read_state: &HashMap<Uuid, bool>,
) -> Vec<ThreadSummary> {
    order_threads(groups, messages)
        .into_iter()
        .map(|thread| ThreadSummary {
            root_id: thread.root_id,
            activity_timestamp: thread.activity_timestamp,
            unread_count: thread
                .emails
                .iter()
                .filter(|email| !read_state.get(&email.id()).copied().unwrap_or(false))
                .count(),
            message_ids: thread.emails.iter().map(|email| email.id()).collect(),
        })
        .collect()
}
