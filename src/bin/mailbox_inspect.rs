use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use uuid::Uuid;

use mailbox::{Email, MailBox, MailboxConfig, emails_from_json, init_logger};

#[derive(ValueEnum, Clone, Copy, Debug)]
enum View {
    /// Most recent message first
    Timestamp,
    /// Most recently active thread first
    Threaded,
    /// Messages between --start and --end, earliest first
    Range,
    /// One line per thread
    Threads,
}

#[derive(Parser, Debug)]
#[command(
    name = "mailbox-inspect",
    about = "Load a JSON array of emails into a mailbox and print a view of it"
)]
struct Args {
    /// JSON file holding `[{"id": ..., "parent_id": ..., "timestamp": ...}, ...]`.
    file: PathBuf,

    /// Which view to print.
    #[arg(long, value_enum, default_value = "threaded")]
    view: View,

    /// Start of the range for `--view range`.
    #[arg(long, default_value_t = 0)]
    start: u64,

    /// End of the range for `--view range`.
    #[arg(long, default_value_t = u64::MAX)]
    end: u64,

    /// Mark the thread containing this message as read before printing.
    #[arg(long)]
    mark_thread_read: Option<Uuid>,
}

fn print_emails(mailbox: &MailBox, emails: &[Email]) -> io::Result<()> {
    let mut out = io::stdout().lock();
    for email in emails {
        let read = mailbox.is_read(&email.id()).unwrap_or(false);
        writeln!(
            out,
            "{:>20}  {}  {}  parent={}",
            email.timestamp(),
            if read { "read  " } else { "unread" },
            email.id(),
            email.parent_id()
        )?;
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = MailboxConfig::from_env();
    init_logger(&config.log_filter);

    let args = Args::parse();
    let emails = emails_from_json(BufReader::new(File::open(&args.file)?))?;

    let mut mailbox = MailBox::with_config(&config);
    let total = emails.len();
    let added = emails
        .into_iter()
        .map(|email| mailbox.add_message(email))
        .filter(|added| *added)
        .count();
    log::info!(
        "loaded {} of {} emails from {}",
        added,
        total,
        args.file.display()
    );

    if let Some(message_id) = args.mark_thread_read {
        if !mailbox.mark_thread_read(&message_id)? {
            writeln!(io::stderr(), "error: message {message_id} is not in the mailbox")?;
            std::process::exit(1);
        }
    }

    match args.view {
        View::Timestamp => print_emails(&mailbox, &mailbox.timestamp_view())?,
        View::Threaded => print_emails(&mailbox, &mailbox.threaded_view()?)?,
        View::Range => print_emails(&mailbox, &mailbox.messages_in_range(args.start, args.end)?)?,
        View::Threads => {
            let mut out = io::stdout().lock();
            for thread in mailbox.threads()? {
                writeln!(
                    out,
                    "{}  messages={}  unread={}  last_activity={}",
                    thread.root_id,
                    thread.len(),
                    thread.unread_count,
                    thread.activity_timestamp
                )?;
            }
        }
    }

    println!(
        "{} messages, {} unread",
        mailbox.message_count(),
        mailbox.unread_count()
    );
    Ok(())
}
