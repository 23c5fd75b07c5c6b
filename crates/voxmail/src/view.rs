//! Plain-text screens. Every function returns the full screen so callers
//! decide where it is printed.

use crate::inbox::{Inbox, InboxFilter, Message};

use voxmail_core::{Identity, RecordingArtifact, RecordingState, format_elapsed};

use std::fmt::Write;

pub(crate) const HELP: &str = "\
Commands:
  login [face | <email> <password>]   sign in
  logout                              sign out
  home                                dashboard
  inbox [all|new|old] [search]        list messages
  open <id>                           open a message
  compose                             record a new message
  record | stop | play | pause        recorder / message playback
  delete | save                       discard or keep the recording
  listen                              toggle voice commands
  say <utterance>                     speak to the voice listener
  help | quit";

/// Login screen.
pub(crate) fn login(loading: bool, last_error: Option<&str>) -> String {
    let mut out = String::from("== Sign in ==\n");
    if loading {
        out.push_str("Signing in...\n");
    }
    if let Some(error) = last_error {
        let _ = writeln!(out, "! {}", error);
    }
    out.push_str("Type `login` for credentials or `login face` for a face scan.");
    out
}

/// Dashboard with inbox stats and the latest messages.
pub(crate) fn dashboard(identity: Option<&Identity>, inbox: &Inbox) -> String {
    let mut out = String::from("== Dashboard ==\n");
    if let Some(identity) = identity {
        let _ = writeln!(out, "Welcome back, {}.", identity.name);
    }
    let _ = writeln!(
        out,
        "{} messages, {} new",
        inbox.len(),
        inbox.unread_count()
    );

    if !inbox.is_empty() {
        out.push_str("Recent:\n");
        for message in inbox.filtered(InboxFilter::All, "").iter().take(3) {
            out.push_str(&message_row(message));
            out.push('\n');
        }
    }
    out.push_str("Quick actions: compose, inbox");
    out
}

/// Inbox listing under the current filter and search.
pub(crate) fn inbox(messages: &[&Message], filter: InboxFilter, search: &str) -> String {
    let mut out = String::from("== Inbox ==\n");
    let _ = write!(out, "Showing {}", filter.label());
    if !search.is_empty() {
        let _ = write!(out, " matching \"{}\"", search);
    }
    out.push('\n');

    if messages.is_empty() {
        out.push_str("No messages found.");
        return out;
    }

    let rows: Vec<String> = messages.iter().map(|m| message_row(m)).collect();
    out.push_str(&rows.join("\n"));
    out
}

/// Single message view.
pub(crate) fn message(message: &Message) -> String {
    format!(
        "== {} ==\nFrom: {}\nReceived: {}\nDuration: {}\nCommands: play, pause, delete, inbox",
        message.subject, message.sender, message.timestamp, message.duration
    )
}

/// Compose screen with recorder status and the saved draft.
pub(crate) fn compose(
    state: RecordingState,
    elapsed_secs: u64,
    draft: Option<&RecordingArtifact>,
) -> String {
    let mut out = String::from("== Compose message ==\n");
    let status = match state {
        RecordingState::Idle => "Ready to record. Type `record`.".to_string(),
        RecordingState::Recording => {
            format!("Recording {}. Type `stop`.", format_elapsed(elapsed_secs))
        }
        RecordingState::Recorded => format!(
            "Recorded {}. Type `play`, `save` or `delete`.",
            format_elapsed(elapsed_secs)
        ),
    };
    out.push_str(&status);

    if let Some(draft) = draft {
        let _ = write!(
            out,
            "\nAttached: {} ({}, {} bytes)",
            format_elapsed(draft.duration().as_secs()),
            draft.mime_type(),
            draft.len()
        );
    }
    out
}

/// Fallback screen.
pub(crate) fn not_found() -> String {
    "== Page not found ==\nType `home` to return to the dashboard.".to_string()
}

fn message_row(message: &Message) -> String {
    format!(
        "{} {} {:<16} {:<18} {:>5}  {}",
        if message.is_new { "*" } else { " " },
        message.id,
        message.sender,
        message.subject,
        message.duration,
        message.timestamp
    )
}
