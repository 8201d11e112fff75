use mailbox::{Email, MailBox, MailboxError, NO_PARENT};
use uuid::Uuid;

/// A(1) → B(2) → C(3), plus D(5) starting its own thread
struct Fixture {
    mailbox: MailBox,
    a: Email,
    b: Email,
    c: Email,
    d: Email,
}

fn fixture() -> Fixture {
    let a = Email::root(1);
    let b = Email::reply_to(&a, 2);
    let c = Email::reply_to(&b, 3);
    let d = Email::root(5);

    let mut mailbox = MailBox::new();
    for email in [&a, &b, &c, &d] {
        assert!(mailbox.add_message(email.clone()));
    }

    Fixture {
        mailbox,
        a,
        b,
        c,
        d,
    }
}

fn ids(emails: &[Email]) -> Vec<Uuid> {
    emails.iter().map(Email::id).collect()
}

#[test]
fn mark_thread_read_from_leaf_covers_whole_thread() {
    let mut f = fixture();

    assert!(f.mailbox.mark_thread_read(&f.c.id()).unwrap());

    for email in [&f.a, &f.b, &f.c] {
        assert!(f.mailbox.is_read(&email.id()).unwrap());
    }
    assert!(!f.mailbox.is_read(&f.d.id()).unwrap());
    assert_eq!(f.mailbox.unread_count(), 1);
}

#[test]
fn mark_thread_from_middle_and_root() {
    let mut f = fixture();

    assert!(f.mailbox.mark_thread_read(&f.b.id()).unwrap());
    assert_eq!(f.mailbox.unread_count(), 1);

    assert!(f.mailbox.mark_thread_unread(&f.a.id()).unwrap());
    assert_eq!(f.mailbox.unread_count(), 4);

    // Already in the requested state still succeeds
    assert!(f.mailbox.mark_thread_unread(&f.a.id()).unwrap());
}

#[test]
fn mark_thread_on_unknown_id_is_false() {
    let mut f = fixture();

    assert!(!f.mailbox.mark_thread_read(&Uuid::new_v4()).unwrap());
    assert!(!f.mailbox.mark_thread_unread(&Uuid::new_v4()).unwrap());
    assert_eq!(f.mailbox.unread_count(), 4);
}

#[test]
fn threaded_view_puts_most_active_thread_first() {
    let f = fixture();

    let view = f.mailbox.threaded_view().unwrap();
    assert_eq!(ids(&view), vec![f.d.id(), f.c.id(), f.b.id(), f.a.id()]);
}

#[test]
fn threaded_view_follows_new_activity() {
    let mut f = fixture();
    let late_reply = Email::reply_to(&f.a, 9);
    assert!(f.mailbox.add_message(late_reply.clone()));

    let view = f.mailbox.threaded_view().unwrap();
    assert_eq!(
        ids(&view),
        vec![late_reply.id(), f.c.id(), f.b.id(), f.a.id(), f.d.id()]
    );
}

#[test]
fn threaded_view_of_empty_mailbox_is_empty() {
    assert!(MailBox::new().threaded_view().unwrap().is_empty());
}

#[test]
fn deleting_middle_message_orphans_its_replies() {
    let mut f = fixture();

    assert!(f.mailbox.delete_message(&f.b.id()));
    assert!(f.mailbox.get_message(&f.b.id()).is_none());
    assert!(f.mailbox.is_read(&f.b.id()).is_err());
    assert_eq!(f.mailbox.message_count(), 3);

    // C keeps pointing at the missing B and no longer reaches A
    assert_eq!(f.mailbox.thread_root(&f.c.id()).unwrap(), Some(f.b.id()));
    assert_eq!(f.mailbox.thread_root(&f.a.id()).unwrap(), Some(f.a.id()));

    assert!(f.mailbox.mark_thread_read(&f.c.id()).unwrap());
    assert!(f.mailbox.is_read(&f.c.id()).unwrap());
    assert!(!f.mailbox.is_read(&f.a.id()).unwrap());

    let view = f.mailbox.threaded_view().unwrap();
    assert_eq!(ids(&view), vec![f.d.id(), f.c.id(), f.a.id()]);
}

#[test]
fn restoring_deleted_message_rejoins_thread() {
    let mut f = fixture();

    f.mailbox.delete_message(&f.b.id());
    assert!(f.mailbox.add_message(f.b.clone()));

    assert_eq!(f.mailbox.thread_root(&f.c.id()).unwrap(), Some(f.a.id()));
    let thread = f.mailbox.thread_messages(&f.a.id()).unwrap().unwrap();
    assert_eq!(ids(&thread), vec![f.c.id(), f.b.id(), f.a.id()]);
}

#[test]
fn replies_to_missing_parent_share_a_thread() {
    let mut mailbox = MailBox::new();
    let missing = Uuid::new_v4();
    let first = Email::new(missing, 4);
    let second = Email::new(missing, 6);
    mailbox.add_message(first.clone());
    mailbox.add_message(second.clone());

    let threads = mailbox.threads().unwrap();
    assert_eq!(threads.len(), 1);
    assert_eq!(threads[0].root_id, missing);
    assert_eq!(threads[0].message_ids, vec![second.id(), first.id()]);
    assert_eq!(threads[0].activity_timestamp, 6);
}

#[test]
fn thread_summaries_match_threaded_view() {
    let mut f = fixture();
    f.mailbox.mark_read(&f.b.id());

    let threads = f.mailbox.threads().unwrap();
    assert_eq!(threads.len(), 2);

    assert_eq!(threads[0].root_id, f.d.id());
    assert_eq!(threads[0].unread_count, 1);

    assert_eq!(threads[1].root_id, f.a.id());
    assert_eq!(threads[1].len(), 3);
    assert_eq!(threads[1].unread_count, 2);
    assert_eq!(threads[1].activity_timestamp, 3);

    let flattened: Vec<Uuid> = threads
        .iter()
        .flat_map(|thread| thread.message_ids.iter().copied())
        .collect();
    assert_eq!(flattened, ids(&f.mailbox.threaded_view().unwrap()));
}

#[test]
fn reply_loop_fails_fast() {
    let mut mailbox = MailBox::new();
    let x = Uuid::new_v4();
    let y = Uuid::new_v4();
    let start = Email::root(1);

    mailbox.add_message(Email::with_id(x, y, 2));
    mailbox.add_message(Email::with_id(y, x, 3));
    mailbox.add_message(start.clone());

    assert!(matches!(
        mailbox.thread_root(&x),
        Err(MailboxError::ThreadCycle { message_id }) if message_id == x
    ));
    assert!(matches!(
        mailbox.mark_thread_read(&y),
        Err(MailboxError::ThreadCycle { .. })
    ));
    assert!(matches!(
        mailbox.threaded_view(),
        Err(MailboxError::ThreadCycle { .. })
    ));

    // Unaffected threads and flat views keep working
    assert!(mailbox.mark_thread_read(&start.id()).unwrap());
    assert_eq!(mailbox.timestamp_view().len(), 3);

    // Breaking the loop restores the threaded view
    assert!(mailbox.delete_message(&y));
    let view = mailbox.threaded_view().unwrap();
    assert_eq!(view.len(), 2);
    assert_eq!(mailbox.thread_root(&x).unwrap(), Some(y));
}

#[test]
fn no_parent_sentinel_is_not_a_message() {
    let mut mailbox = MailBox::new();
    let root = Email::root(1);
    mailbox.add_message(root.clone());

    assert_eq!(root.parent_id(), NO_PARENT);
    assert!(mailbox.get_message(&NO_PARENT).is_none());
    assert_eq!(mailbox.thread_root(&NO_PARENT).unwrap(), None);
}
