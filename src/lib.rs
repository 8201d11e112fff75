//! In-memory single mailbox with read tracking and thread reconstruction.
//!
//! Messages are immutable [`Email`] values that carry an id, the id of the
//! message they reply to (or [`NO_PARENT`]) and a timestamp. [`MailBox`]
//! stores them, tracks a read flag per message and keeps a [`ThreadIndex`]
//! in step so that thread operations and the threaded view never rescan
//! every message.

pub mod config;
pub mod error;
pub mod mailbox;
pub mod models;
pub mod shared;
pub mod threading;

pub use config::MailboxConfig;
pub use error::{MailboxError, MailboxResult};
pub use mailbox::MailBox;
pub use models::{Email, NO_PARENT, TimestampOrder, emails_from_json};
pub use shared::SharedMailBox;
pub use threading::{ThreadIndex, ThreadSummary};

use env_logger::Env;
use std::sync::Once;

static LOGGER: Once = Once::new();

/// Initialise `env_logger` once; `RUST_LOG` overrides `default_filter`.
pub fn init_logger(default_filter: &str) {
    LOGGER.call_once(|| {
        env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();
    });
}
