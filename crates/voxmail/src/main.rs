//! Voxmail: accessible voice messaging in the terminal.

mod app;
mod app_command;
mod capabilities;
mod config;
mod error;
mod identity_store;
mod inbox;
mod recognizer;
mod router;
mod speech;
#[cfg(test)]
mod tests;
mod view;

pub(crate) use {
    app::App,
    app_command::AppCommand,
    error::{AppError, Result as AppResult},
    identity_store::FileIdentityStore,
    recognizer::{TypedInput, TypedRecognizer},
    speech::{MuteSpeaker, ProcessSpeaker},
};

use crate::{
    config::{Config, DEFAULT_LOG_FILTER},
    inbox::{Inbox, InboxFilter},
    router::Router,
};

use voxmail_core::{
    AudioFeedback, AudioOutput, CpalMicrophone, CuePlayer, DemoAuthPolicy, HandleRegistry,
    Player, RecognitionConfig, RecordingSession, SessionHolder, SilentOutput, Speaker,
    VoiceCommandSession,
};

use std::rc::Rc;

use tokio::sync::mpsc;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

/// Application entry point.
fn main() {
    let config = Config::load();

    let filter = match &config {
        Ok(config) => config.logging.filter.clone(),
        Err(_) => DEFAULT_LOG_FILTER.to_string(),
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match config {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load config: {:?}", e);
            std::process::exit(1);
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            error!("Failed to create tokio runtime: {:?}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = runtime.block_on(run(config)) {
        error!(error = ?e, "App error");
        std::process::exit(1);
    }
}

/// Wire collaborators from `config` and run the app.
async fn run(config: Config) -> AppResult<()> {
    let (speaker, has_speech): (Rc<dyn Speaker>, bool) =
        match ProcessSpeaker::discover(config.voice.speech_command.as_deref()) {
            Ok(speaker) => (Rc::new(speaker), true),
            Err(e) => {
                warn!(error = %e, "Announcements will be text only");
                (Rc::new(MuteSpeaker), false)
            }
        };

    let capabilities = capabilities::negotiate(&config, has_speech);

    let (cues, player) = match AudioOutput::new(config.audio.cue_volume) {
        Ok(output) => {
            let output = Rc::new(output);
            let cues: Rc<dyn CuePlayer> = output.clone();
            let player: Rc<dyn Player> = output;
            (cues, player)
        }
        Err(e) => {
            warn!(error = %e, "Audio output unavailable, cues and playback disabled");
            let output = Rc::new(SilentOutput);
            let cues: Rc<dyn CuePlayer> = output.clone();
            let player: Rc<dyn Player> = output;
            (cues, player)
        }
    };

    let (announce_tx, announce_rx) = mpsc::unbounded_channel();
    let feedback = AudioFeedback::new(cues, speaker, capabilities)
        .with_cues_enabled(config.audio.cues_enabled)
        .with_live_region(announce_tx);

    let store = FileIdentityStore::open(config.identity_path()?)?;
    let identity = SessionHolder::restore(Box::new(store));
    let router = Router::new(identity.is_authenticated());

    let recorder = RecordingSession::new(
        CpalMicrophone::new(),
        player,
        feedback.clone(),
        HandleRegistry::new(),
    );

    let (recognizer, typed, recognition_rx) = TypedRecognizer::channel();
    let voice = VoiceCommandSession::new(
        recognizer,
        feedback.clone(),
        RecognitionConfig::new(config.voice.locale.clone()),
    );

    let app = App {
        feedback,
        identity,
        policy: DemoAuthPolicy::new(config.auth.login_delay(), config.auth.face_scan_success_rate),
        router,
        inbox: Inbox::demo(),
        filter: InboxFilter::All,
        search: String::new(),
        recorder,
        voice,
        typed,
        recognition_rx,
        announce_rx,
        draft: None,
        dirty: false,
    };

    app.run().await
}
