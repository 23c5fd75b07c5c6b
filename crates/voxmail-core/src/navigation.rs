use std::fmt;

/// Abstract navigation targets issued by the core.
///
/// Routing mechanics belong to the view layer; the core only says where to go.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    /// Login screen.
    Login,
    /// Dashboard, the home screen.
    Dashboard,
    /// List of received voice messages.
    Inbox,
    /// Record and send a new voice message.
    Compose,
    /// Playback view for a single message.
    MessageDetail(String),
    /// Fallback for unknown locations.
    NotFound,
}

impl Route {
    /// Whether the route requires a signed-in identity.
    pub fn is_private(&self) -> bool {
        !matches!(self, Route::Login | Route::NotFound)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Login => f.write_str("/login"),
            Route::Dashboard => f.write_str("/"),
            Route::Inbox => f.write_str("/inbox"),
            Route::Compose => f.write_str("/compose"),
            Route::MessageDetail(id) => write!(f, "/message/{id}"),
            Route::NotFound => f.write_str("/not-found"),
        }
    }
}

/// Receiver of navigation intents.
pub trait Navigator {
    /// Move to `route`.
    fn navigate(&mut self, route: Route);

    /// The route currently shown.
    fn current(&self) -> &Route;
}
