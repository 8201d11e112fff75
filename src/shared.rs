//! Shared access to a single mailbox
//!
//! `MailBox` itself assumes exclusive access. `SharedMailBox` puts the whole
//! store behind one `parking_lot::Mutex`; each method holds the lock for
//! exactly one mailbox operation, so no caller ever sees a half-applied change.

use parking_lot::{Mutex, MutexGuard};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::MailboxResult;
use crate::mailbox::MailBox;
use crate::models::Email;

#[derive(Debug, Clone, Default)]
pub struct SharedMailBox {
    inner: Arc<Mutex<MailBox>>,
}

impl SharedMailBox {
    pub fn new(mailbox: MailBox) -> Self {
        SharedMailBox {
            inner: Arc::new(Mutex::new(mailbox)),
        }
    }

    /// Lock the mailbox for a sequence of operations that must not interleave
    pub fn lock(&self) -> MutexGuard<'_, MailBox> {
        self.inner.lock()
    }

    pub fn add_message(&self, email: Email) -> bool {
        self.inner.lock().add_message(email)
    }

    pub fn get_message(&self, message_id: &Uuid) -> Option<Email> {
        self.inner.lock().get_message(message_id).cloned()
    }

    pub fn delete_message(&self, message_id: &Uuid) -> bool {
        self.inner.lock().delete_message(message_id)
    }

    pub fn message_count(&self) -> usize {
        self.inner.lock().message_count()
    }

    pub fn unread_count(&self) -> usize {
        self.inner.lock().unread_count()
    }

    pub fn mark_read(&self, message_id: &Uuid) -> bool {
        self.inner.lock().mark_read(message_id)
    }

    pub fn mark_unread(&self, message_id: &Uuid) -> bool {
        self.inner.lock().mark_unread(message_id)
    }

    pub fn is_read(&self, message_id: &Uuid) -> MailboxResult<bool> {
        self.inner.lock().is_read(message_id)
    }

    pub fn timestamp_view(&self) -> Vec<Email> {
        self.inner.lock().timestamp_view()
    }

    pub fn messages_in_range(&self, start: u64, end: u64) -> MailboxResult<Vec<Email>> {
        self.inner.lock().messages_in_range(start, end)
    }

    pub fn mark_thread_read(&self, message_id: &Uuid) -> MailboxResult<bool> {
        self.inner.lock().mark_thread_read(message_id)
    }

    pub fn mark_thread_unread(&self, message_id: &Uuid) -> MailboxResult<bool> {
        self.inner.lock().mark_thread_unread(message_id)
    }

    pub fn threaded_view(&self) -> MailboxResult<Vec<Email>> {
        self.inner.lock().threaded_view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_concurrent_adds_are_all_counted() {
        let shared = SharedMailBox::default();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for ts in 0..25 {
                        assert!(shared.add_message(Email::root(ts)));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(shared.message_count(), 100);
        assert_eq!(shared.unread_count(), 100);
    }

    #[test]
    fn test_lock_spans_several_operations() {
        let shared = SharedMailBox::new(MailBox::new());
        let root = Email::root(1);
        let reply = Email::reply_to(&root, 2);

        {
            let mut mailbox = shared.lock();
            mailbox.add_message(root.clone());
            mailbox.add_message(reply.clone());
        }

        assert!(shared.mark_thread_read(&reply.id()).unwrap());
        assert!(shared.is_read(&root.id()).unwrap());
        assert_eq!(shared.get_message(&root.id()), Some(root));
    }
}
