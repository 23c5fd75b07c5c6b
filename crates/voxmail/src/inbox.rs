use std::{fmt, str::FromStr};

/// A received voice message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Message id, used in `/message/<id>`.
    pub id: String,
    /// Sender display name.
    pub sender: String,
    /// Subject line.
    pub subject: String,
    /// Human-readable age.
    pub timestamp: String,
    /// Length as `M:SS`.
    pub duration: String,
    /// Not yet opened.
    pub is_new: bool,
}

/// Which messages the inbox shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InboxFilter {
    /// Everything.
    #[default]
    All,
    /// Unopened only.
    New,
    /// Opened only.
    Old,
}

impl InboxFilter {
    /// Announcement label.
    pub fn label(self) -> &'static str {
        match self {
            InboxFilter::All => "all messages",
            InboxFilter::New => "new messages",
            InboxFilter::Old => "old messages",
        }
    }

    fn admits(self, message: &Message) -> bool {
        match self {
            InboxFilter::All => true,
            InboxFilter::New => message.is_new,
            InboxFilter::Old => !message.is_new,
        }
    }
}

impl FromStr for InboxFilter {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(InboxFilter::All),
            "new" => Ok(InboxFilter::New),
            "old" => Ok(InboxFilter::Old),
            _ => Err(()),
        }
    }
}

impl fmt::Display for InboxFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// In-memory mailbox.
#[derive(Debug, Clone, Default)]
pub struct Inbox {
    messages: Vec<Message>,
}

impl Inbox {
    /// Inbox over `messages`, newest first.
    pub fn new(messages: Vec<Message>) -> Self {
        Self { messages }
    }

    /// The five sample messages the demo ships with.
    pub fn demo() -> Self {
        Self::new(vec![
            message("1", "Sarah Johnson", "Project Update", "2 hours ago", "1:24", true),
            message("2", "Michael Chen", "Meeting Reminder", "1 day ago", "0:45", true),
            message("3", "Alex Rodriguez", "Vacation Plans", "3 days ago", "2:10", true),
            message("4", "Emma Thompson", "Weekly Report", "1 week ago", "3:22", false),
            message("5", "David Wilson", "Conference Call", "2 weeks ago", "5:07", false),
        ])
    }

    /// Messages admitted by `filter` whose sender or subject contains
    /// `search`, case-insensitively. An empty search matches everything.
    pub fn filtered(&self, filter: InboxFilter, search: &str) -> Vec<&Message> {
        let needle = search.trim().to_lowercase();
        self.messages
            .iter()
            .filter(|m| filter.admits(m))
            .filter(|m| {
                needle.is_empty()
                    || m.sender.to_lowercase().contains(&needle)
                    || m.subject.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Look up a message by id.
    pub fn get(&self, id: &str) -> Option<&Message> {
        self.messages.iter().find(|m| m.id == id)
    }

    /// Mark a message as opened. Returns the message if it exists.
    pub fn mark_read(&mut self, id: &str) -> Option<&Message> {
        let message = self.messages.iter_mut().find(|m| m.id == id)?;
        message.is_new = false;
        Some(message)
    }

    /// Remove a message, returning it.
    pub fn remove(&mut self, id: &str) -> Option<Message> {
        let index = self.messages.iter().position(|m| m.id == id)?;
        Some(self.messages.remove(index))
    }

    /// Number of unopened messages.
    pub fn unread_count(&self) -> usize {
        self.messages.iter().filter(|m| m.is_new).count()
    }

    /// Total number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the inbox is empty.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

fn message(
    id: &str,
    sender: &str,
    subject: &str,
    timestamp: &str,
    duration: &str,
    is_new: bool,
) -> Message {
    Message {
        id: id.to_string(),
        sender: sender.to_string(),
        subject: subject.to_string(),
        timestamp: timestamp.to_string(),
        duration: duration.to_string(),
        is_new,
    }
}
