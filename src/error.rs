use thiserror::Error;
use uuid::Uuid;

/// Errors surfaced by mailbox operations.
///
/// Ordinary "not found" conditions are reported through `bool`/`Option`
/// returns instead; only the cases below are hard failures.
#[derive(Debug, Error)]
pub enum MailboxError {
    #[error("message {0} is not in this mailbox")]
    UnknownMessage(Uuid),
    #[error("invalid time range: start {start} is after end {end}")]
    InvalidRange { start: u64, end: u64 },
    #[error("reply chain starting at message {message_id} loops back on itself")]
    ThreadCycle { message_id: Uuid },
    #[error("failed to decode emails: {0}")]
    Json(#[from] serde_json::Error),
}

impl MailboxError {
    pub fn invalid_range(start: u64, end: u64) -> Self {
        MailboxError::InvalidRange { start, end }
    }

    pub fn cycle(message_id: Uuid) -> Self {
        MailboxError::ThreadCycle { message_id }
    }
}

pub type MailboxResult<T> = Result<T, MailboxError>;
