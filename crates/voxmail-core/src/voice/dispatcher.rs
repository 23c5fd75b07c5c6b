use crate::{Cue, navigation::Route};

const LOGIN_PHRASES: &[&str] = &["login", "sign in"];
const INBOX_PHRASES: &[&str] = &["go to inbox", "open inbox"];
const DASHBOARD_PHRASES: &[&str] = &["go to dashboard", "open dashboard", "go home"];
const COMPOSE_PHRASES: &[&str] = &["compose message", "new message", "send message"];
const LOGOUT_PHRASES: &[&str] = &["logout", "sign out"];

/// Outcome of dispatching one utterance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Signed-out user asked for anything but login.
    LoginRequired,
    /// Go to the inbox.
    OpenInbox,
    /// Go to the dashboard.
    OpenDashboard,
    /// Go to the compose screen.
    Compose,
    /// Clear the identity and return to login.
    Logout,
    /// Go to the login screen.
    OpenLogin,
    /// Nothing matched.
    Unrecognized(String),
}

impl Command {
    /// Navigation intent carried by the command, if any.
    pub fn route(&self) -> Option<Route> {
        match self {
            Command::OpenInbox => Some(Route::Inbox),
            Command::OpenDashboard => Some(Route::Dashboard),
            Command::Compose => Some(Route::Compose),
            Command::Logout | Command::OpenLogin => Some(Route::Login),
            Command::LoginRequired | Command::Unrecognized(_) => None,
        }
    }

    /// Spoken confirmation.
    pub fn announcement(&self) -> String {
        match self {
            Command::LoginRequired => "Please log in first.".to_string(),
            Command::OpenInbox => "Opening inbox".to_string(),
            Command::OpenDashboard => "Opening dashboard".to_string(),
            Command::Compose => "Opening compose message".to_string(),
            Command::Logout => "Logging out".to_string(),
            Command::OpenLogin => "Opening login page".to_string(),
            Command::Unrecognized(utterance) => format!("Command not recognized: {utterance}"),
        }
    }

    /// Cue accompanying the announcement.
    pub fn cue(&self) -> Cue {
        match self {
            Command::LoginRequired => Cue::Notification,
            Command::Unrecognized(_) => Cue::Error,
            _ => Cue::Success,
        }
    }
}

/// Trim and lower-case raw recognizer text.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

fn mentions(utterance: &str, phrases: &[&str]) -> bool {
    phrases.iter().any(|phrase| utterance.contains(phrase))
}

/// Map a normalized utterance to a command.
///
/// Substring matching in fixed priority order, first match wins. A longer
/// phrase gets no precedence over a shorter one from an earlier group.
pub fn dispatch(utterance: &str, is_authenticated: bool) -> Command {
    if !is_authenticated && !mentions(utterance, LOGIN_PHRASES) {
        return Command::LoginRequired;
    }

    if mentions(utterance, INBOX_PHRASES) {
        Command::OpenInbox
    } else if mentions(utterance, DASHBOARD_PHRASES) {
        Command::OpenDashboard
    } else if mentions(utterance, COMPOSE_PHRASES) {
        Command::Compose
    } else if mentions(utterance, LOGOUT_PHRASES) {
        Command::Logout
    } else if mentions(utterance, LOGIN_PHRASES) {
        Command::OpenLogin
    } else {
        Command::Unrecognized(utterance.to_string())
    }
}
