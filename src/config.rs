use std::env;

fn env_bool(key: &str, default: bool) -> bool {
    env::var(key)
        .ok()
        .map(|value| matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(default)
}

fn env_usize(key: &str, default: usize) -> usize {
    env::var(key)
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .unwrap_or(default)
}

fn env_string(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Runtime configuration for a mailbox.
#[derive(Debug, Clone)]
pub struct MailboxConfig {
    /// Default `env_logger` filter used when `RUST_LOG` is unset.
    pub log_filter: String,
    /// Run the ancestry check on every insert and warn when a reply chain closes a loop.
    pub check_cycles_on_insert: bool,
    /// Number of messages the store is pre-sized for.
    pub initial_capacity: usize,
}

impl MailboxConfig {
    pub fn from_env() -> Self {
        Self {
            log_filter: env_string("MAILBOX_LOG_FILTER", "info"),
            check_cycles_on_insert: env_bool("MAILBOX_CHECK_CYCLES_ON_INSERT", true),
            initial_capacity: env_usize("MAILBOX_INITIAL_CAPACITY", 0),
        }
    }
}

impl Default for MailboxConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
