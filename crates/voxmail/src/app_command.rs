use crate::inbox::InboxFilter;

use voxmail_core::LoginMethod;

/// Email used by a bare `login`.
pub(crate) const DEMO_EMAIL: &str = "john.doe@example.com";
const DEMO_PASSWORD: &str = "password";

/// One line typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    /// Sign in.
    Login(LoginMethod),
    /// Sign out.
    Logout,
    /// Go to the dashboard.
    Home,
    /// Go to the inbox, optionally changing filter and search.
    Inbox {
        /// New filter, if given.
        filter: Option<InboxFilter>,
        /// New search text, if given. Empty clears the search.
        search: Option<String>,
    },
    /// Open a message by id.
    Open(String),
    /// Go to the compose screen.
    Compose,
    /// Start recording.
    Record,
    /// Stop recording.
    Stop,
    /// Play the recording or the open message.
    Play,
    /// Pause playback.
    Pause,
    /// Discard the recording or delete the open message.
    Delete,
    /// Attach the recording to the draft.
    Save,
    /// Toggle voice commands.
    Listen,
    /// Speak an utterance to the recognizer.
    Say(String),
    /// Show the command list.
    Help,
    /// Exit.
    Quit,
    /// Blank line.
    Empty,
    /// Anything else.
    Unknown(String),
}

impl AppCommand {
    /// Parse one input line. Command words are case-insensitive.
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_ascii_lowercase().as_str() {
            "" => AppCommand::Empty,
            "login" => parse_login(rest).unwrap_or_else(|| AppCommand::Unknown(line.to_string())),
            "logout" => AppCommand::Logout,
            "home" => AppCommand::Home,
            "inbox" => parse_inbox(rest),
            "open" if !rest.is_empty() => AppCommand::Open(rest.to_string()),
            "compose" => AppCommand::Compose,
            "record" => AppCommand::Record,
            "stop" => AppCommand::Stop,
            "play" => AppCommand::Play,
            "pause" => AppCommand::Pause,
            "delete" => AppCommand::Delete,
            "save" => AppCommand::Save,
            "listen" => AppCommand::Listen,
            "say" => AppCommand::Say(rest.to_string()),
            "help" | "?" => AppCommand::Help,
            "quit" | "exit" => AppCommand::Quit,
            _ => AppCommand::Unknown(line.to_string()),
        }
    }
}

fn parse_login(rest: &str) -> Option<AppCommand> {
    let mut parts = rest.split_whitespace();
    let method = match (parts.next(), parts.next(), parts.next()) {
        (None, ..) => LoginMethod::Credentials {
            email: DEMO_EMAIL.to_string(),
            password: DEMO_PASSWORD.to_string(),
        },
        (Some(face), None, _) if face.eq_ignore_ascii_case("face") => LoginMethod::FaceScan,
        (Some(email), Some(password), None) => LoginMethod::Credentials {
            email: email.to_string(),
            password: password.to_string(),
        },
        _ => return None,
    };
    Some(AppCommand::Login(method))
}

fn parse_inbox(rest: &str) -> AppCommand {
    if rest.is_empty() {
        return AppCommand::Inbox {
            filter: None,
            search: None,
        };
    }

    let (first, tail) = match rest.split_once(char::is_whitespace) {
        Some((first, tail)) => (first, tail.trim()),
        None => (rest, ""),
    };

    match first.parse::<InboxFilter>() {
        Ok(filter) => AppCommand::Inbox {
            filter: Some(filter),
            search: Some(tail.to_string()),
        },
        Err(()) => AppCommand::Inbox {
            filter: None,
            search: Some(rest.to_string()),
        },
    }
}
