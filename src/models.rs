use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::io::Read;
use uuid::Uuid;

use crate::error::MailboxResult;

/// Reserved parent identifier for a message that starts a thread.
///
/// The nil UUID is never produced by `Uuid::new_v4`, so it cannot collide with
/// a generated message id.
pub const NO_PARENT: Uuid = Uuid::nil();

// ===== Email =====

/// An immutable email as seen by the mailbox: identity, reply link and time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Email {
    id: Uuid,
    parent_id: Uuid,
    timestamp: u64,
}

impl Email {
    /// Create an email with a freshly generated id.
    pub fn new(parent_id: Uuid, timestamp: u64) -> Self {
        Self::with_id(Uuid::new_v4(), parent_id, timestamp)
    }

    /// Create an email with a caller-supplied id.
    pub fn with_id(id: Uuid, parent_id: Uuid, timestamp: u64) -> Self {
        Email {
            id,
            parent_id,
            timestamp,
        }
    }

    /// Create an email that starts a new thread.
    pub fn root(timestamp: u64) -> Self {
        Self::new(NO_PARENT, timestamp)
    }

    /// Create a reply to `parent`.
    pub fn reply_to(parent: &Email, timestamp: u64) -> Self {
        Self::new(parent.id, timestamp)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Id of the message this one replies to, or [`NO_PARENT`].
    pub fn parent_id(&self) -> Uuid {
        self.parent_id
    }

    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    pub fn is_thread_start(&self) -> bool {
        self.parent_id == NO_PARENT
    }
}

/// Decode a JSON array of emails.
pub fn emails_from_json<R: Read>(reader: R) -> MailboxResult<Vec<Email>> {
    Ok(serde_json::from_reader(reader)?)
}

// ===== Ordering =====

/// Direction used when ordering messages by timestamp.
///
/// Ties compare equal, so their relative order is whatever the sort leaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampOrder {
    Ascending,
    Descending,
}

impl TimestampOrder {
    pub fn compare(self, a: &Email, b: &Email) -> Ordering {
        match self {
            TimestampOrder::Ascending => a.timestamp.cmp(&b.timestamp),
            TimestampOrder::Descending => b.timestamp.cmp(&a.timestamp),
        }
    }

    pub fn sort(self, emails: &mut [Email]) {
        emails.sort_unstable_by(|a, b| self.compare(a, b));
    }
}
