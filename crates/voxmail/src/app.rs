use crate::{
    AppCommand, AppResult, TypedInput, TypedRecognizer,
    inbox::{Inbox, InboxFilter},
    router::Router,
    view,
};

use voxmail_core::{
    AudioFeedback, Cue, DemoAuthPolicy, LoginMethod, Microphone, Navigator, RecognitionEvent,
    RecordingArtifact, RecordingSession, Route, SessionHolder, VoiceCommandSession,
};

use std::time::Duration;

use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::mpsc,
    time::MissedTickBehavior,
};
use tracing::{debug, info, instrument, warn};

/// How often finished recording playback is checked for.
const PLAYBACK_POLL: Duration = Duration::from_millis(200);

const LOGIN_FAILED: &str = "Authentication failed. Please try again.";
const LOGIN_REQUIRED: &str = "Please log in first.";
const NOT_FOUND: &str = "Page not found. The page you are looking for does not exist.";

/// Whether the loop keeps going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    Continue,
    Quit,
}

/// Main application state.
///
/// Everything runs on one thread: typed commands, recognition events and
/// announcements are multiplexed by [`run`](Self::run).
pub struct App<M: Microphone> {
    pub(crate) feedback: AudioFeedback,
    pub(crate) identity: SessionHolder,
    pub(crate) policy: DemoAuthPolicy,
    pub(crate) router: Router,
    pub(crate) inbox: Inbox,
    pub(crate) filter: InboxFilter,
    pub(crate) search: String,
    pub(crate) recorder: RecordingSession<M>,
    pub(crate) voice: VoiceCommandSession<TypedRecognizer>,
    pub(crate) typed: TypedInput,
    pub(crate) recognition_rx: mpsc::UnboundedReceiver<RecognitionEvent>,
    pub(crate) announce_rx: mpsc::UnboundedReceiver<String>,
    pub(crate) draft: Option<RecordingArtifact>,
    pub(crate) dirty: bool,
}

impl<M: Microphone> App<M> {
    /// Run the main application event loop until `quit` or end of input.
    #[instrument(skip(self))]
    pub(crate) async fn run(mut self) -> AppResult<()> {
        info!("Voxmail starting");

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut playback = tokio::time::interval(PLAYBACK_POLL);
        playback.set_missed_tick_behavior(MissedTickBehavior::Skip);

        println!("{}\n", self.screen());

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        info!("Input closed, shutting down");
                        break;
                    };
                    if self.handle_command(AppCommand::parse(&line)).await == Flow::Quit {
                        info!("Quit requested");
                        break;
                    }
                }

                Some(event) = self.recognition_rx.recv() => {
                    self.handle_recognition(event);
                }

                Some(text) = self.announce_rx.recv() => {
                    println!("[announce] {}", text);
                }

                _ = playback.tick() => {
                    self.recorder.poll_playback();
                }
            }

            self.flush_announcements();
            if std::mem::take(&mut self.dirty) {
                println!("{}\n", self.screen());
            }
        }

        self.voice.stop_listening();
        self.flush_announcements();
        info!("Voxmail shut down");

        Ok(())
    }

    /// Apply one typed command.
    #[instrument(skip(self))]
    pub(crate) async fn handle_command(&mut self, command: AppCommand) -> Flow {
        let before = self.router.current().clone();

        match command {
            AppCommand::Login(method) => self.login(method).await,
            AppCommand::Logout => self.logout(),
            AppCommand::Home => self.go(Route::Dashboard, "dashboard"),
            AppCommand::Inbox { filter, search } => self.show_inbox(filter, search),
            AppCommand::Open(id) => self.open_message(&id),
            AppCommand::Compose => self.go(Route::Compose, "compose message"),
            AppCommand::Record => self.record().await,
            AppCommand::Stop => self.stop_recording(),
            AppCommand::Play => self.play(),
            AppCommand::Pause => self.pause(),
            AppCommand::Delete => self.delete(),
            AppCommand::Save => self.save(),
            AppCommand::Listen => {
                if let Err(e) = self.voice.toggle_listening() {
                    warn!(error = %e, "Voice commands not started");
                }
            }
            AppCommand::Say(text) => {
                if !self.typed.say(&text) {
                    println!("Voice commands are off. Type `listen` first.");
                }
            }
            AppCommand::Help => println!("{}", view::HELP),
            AppCommand::Quit => return Flow::Quit,
            AppCommand::Empty => {}
            AppCommand::Unknown(line) => println!("Unknown command: {}. Type `help`.", line),
        }

        if self.router.current() != &before {
            self.dirty = true;
        }

        Flow::Continue
    }

    /// Feed a recognizer event to the voice session and follow its navigation.
    pub(crate) fn handle_recognition(&mut self, event: RecognitionEvent) {
        let before = self.router.current().clone();

        let command = self
            .voice
            .handle_event(event, &mut self.identity, &mut self.router);
        self.router.set_authenticated(self.identity.is_authenticated());

        if let Some(command) = command {
            debug!(command = ?command, "Voice command applied");
        }
        if self.router.current() != &before {
            self.dirty = true;
        }
    }

    /// The current screen.
    pub(crate) fn screen(&self) -> String {
        match self.router.current() {
            Route::Login => view::login(self.identity.is_loading(), self.identity.last_error()),
            Route::Dashboard => view::dashboard(self.identity.identity(), &self.inbox),
            Route::Inbox => view::inbox(
                &self.inbox.filtered(self.filter, &self.search),
                self.filter,
                &self.search,
            ),
            Route::Compose => view::compose(
                self.recorder.state(),
                self.recorder.elapsed_secs(),
                self.draft.as_ref(),
            ),
            Route::MessageDetail(id) => match self.inbox.get(id) {
                Some(message) => view::message(message),
                None => view::not_found(),
            },
            Route::NotFound => view::not_found(),
        }
    }

    fn flush_announcements(&mut self) {
        while let Ok(text) = self.announce_rx.try_recv() {
            println!("[announce] {}", text);
        }
    }

    /// Signed in, or bounced to login with a notice.
    fn require_login(&mut self) -> bool {
        if self.identity.is_authenticated() {
            return true;
        }
        self.router.navigate(Route::Login);
        self.feedback.notify(Cue::Notification, LOGIN_REQUIRED);
        false
    }

    fn go(&mut self, route: Route, name: &str) {
        if !self.require_login() {
            return;
        }
        self.feedback.notify(Cue::Click, &format!("Navigating to {}", name));
        self.router.navigate(route);
    }

    async fn login(&mut self, method: LoginMethod) {
        if let Some(identity) = self.identity.identity() {
            let text = format!("Already signed in as {}.", identity.name);
            self.feedback.notify(Cue::Notification, &text);
            return;
        }

        if method == LoginMethod::FaceScan {
            self.feedback.notify(Cue::Recording, "Scanning your face. Please remain still.");
        } else {
            self.feedback.play_cue(Cue::Click);
        }
        self.flush_announcements();

        match self.identity.login(method, &self.policy).await {
            Ok(identity) => {
                self.router.set_authenticated(true);
                self.router.navigate(Route::Dashboard);
                self.feedback.notify(Cue::Login, &format!("Welcome, {}.", identity.name));
            }
            Err(e) => {
                warn!(error = %e, "Login failed");
                self.feedback.notify(Cue::Error, LOGIN_FAILED);
                self.dirty = true;
            }
        }
    }

    fn logout(&mut self) {
        if !self.identity.is_authenticated() {
            self.feedback.notify(Cue::Notification, "You are not signed in.");
            return;
        }

        self.identity.logout();
        self.router.set_authenticated(false);
        self.feedback.notify(Cue::Logout, "You have been logged out.");
    }

    fn show_inbox(&mut self, filter: Option<InboxFilter>, search: Option<String>) {
        if !self.require_login() {
            return;
        }

        if let Some(filter) = filter {
            self.filter = filter;
        }
        if let Some(search) = search {
            self.search = search;
        }

        let text = if self.search.is_empty() {
            format!("Filtered to show {}", self.filter.label())
        } else {
            format!("Searching for {}", self.search)
        };
        self.feedback.notify(Cue::Click, &text);
        self.router.navigate(Route::Inbox);
        self.dirty = true;
    }

    fn open_message(&mut self, id: &str) {
        if !self.require_login() {
            return;
        }

        let Some(message) = self.inbox.mark_read(id) else {
            debug!(id, "Unknown message id");
            self.router.navigate(Route::NotFound);
            self.feedback.announce(NOT_FOUND);
            return;
        };

        let text = format!(
            "Message from {} about {}, received {}",
            message.sender, message.subject, message.timestamp
        );
        self.feedback.notify(Cue::Click, &text);
        self.router.navigate(Route::MessageDetail(id.to_string()));
    }

    fn on_compose(&self) -> bool {
        self.router.current() == &Route::Compose
    }

    fn open_message_id(&self) -> Option<String> {
        match self.router.current() {
            Route::MessageDetail(id) => Some(id.clone()),
            _ => None,
        }
    }

    async fn record(&mut self) {
        if !self.on_compose() {
            self.feedback.notify(Cue::Notification, "Open compose to record a message.");
            return;
        }

        if let Err(e) = self.recorder.start().await {
            warn!(error = %e, "Recording not started");
        }
        self.dirty = true;
    }

    fn stop_recording(&mut self) {
        match self.recorder.stop() {
            Ok(Some(artifact)) => {
                debug!(artifact = %artifact.id(), bytes = artifact.len(), "Recording ready");
                self.dirty = true;
            }
            Ok(None) => debug!("Stop with no recording in progress"),
            Err(e) => {
                warn!(error = %e, "Recording lost");
                self.dirty = true;
            }
        }
    }

    fn play(&mut self) {
        if self.open_message_id().is_some() {
            self.feedback.notify(Cue::Click, "Playing message");
        } else if self.on_compose() && !self.recorder.play() {
            debug!("Nothing recorded to play");
        }
    }

    fn pause(&mut self) {
        if self.open_message_id().is_some() {
            self.feedback.notify(Cue::Click, "Playback paused");
        } else if self.on_compose() && !self.recorder.pause() {
            debug!("Nothing playing");
        }
    }

    fn delete(&mut self) {
        if let Some(id) = self.open_message_id() {
            if let Some(message) = self.inbox.remove(&id) {
                self.feedback.notify(
                    Cue::Notification,
                    &format!("Message from {} deleted", message.sender),
                );
            }
            self.router.navigate(Route::Inbox);
        } else if self.on_compose() && self.recorder.discard() {
            self.dirty = true;
        }
    }

    fn save(&mut self) {
        if !self.on_compose() {
            return;
        }
        if let Some(artifact) = self.recorder.save() {
            info!(artifact = %artifact.id(), "Recording attached to draft");
            self.draft = Some(artifact);
            self.dirty = true;
        }
    }
}
