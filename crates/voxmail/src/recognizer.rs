use voxmail_core::{
    CoreResult, RecognitionConfig, RecognitionErrorKind, RecognitionEvent, Recognizer,
};

use std::{cell::Cell, rc::Rc};

use tokio::sync::mpsc;
use tracing::{debug, info};

/// Recognizer fed by typed text instead of a microphone.
///
/// Each `say` is one recognition session: a final result (or a no-speech
/// error) followed by the natural end event.
pub struct TypedRecognizer {
    open: Rc<Cell<bool>>,
    tx: mpsc::UnboundedSender<RecognitionEvent>,
}

/// Terminal side of a [`TypedRecognizer`].
#[derive(Clone)]
pub struct TypedInput {
    open: Rc<Cell<bool>>,
    tx: mpsc::UnboundedSender<RecognitionEvent>,
}

impl TypedRecognizer {
    /// Recognizer, its input handle, and the event stream the app drains.
    pub fn channel() -> (Self, TypedInput, mpsc::UnboundedReceiver<RecognitionEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let open = Rc::new(Cell::new(false));

        let recognizer = Self {
            open: Rc::clone(&open),
            tx: tx.clone(),
        };

        (recognizer, TypedInput { open, tx }, rx)
    }
}

impl Recognizer for TypedRecognizer {
    fn start(&mut self, config: &RecognitionConfig) -> CoreResult<()> {
        self.open.set(true);
        debug!(
            locale = %config.locale,
            continuous = config.continuous,
            "Typed recognition session opened"
        );
        Ok(())
    }

    fn stop(&mut self) {
        if self.open.replace(false) {
            // Receiver gone means the app loop has exited.
            let _ = self.tx.send(RecognitionEvent::End);
        }
    }
}

impl TypedInput {
    /// Feed `text` as one utterance. Returns false when no session is open.
    pub fn say(&self, text: &str) -> bool {
        if !self.open.replace(false) {
            debug!("Utterance with no open recognition session dropped");
            return false;
        }

        let text = text.trim();
        let event = if text.is_empty() {
            RecognitionEvent::Error(RecognitionErrorKind::NoSpeech)
        } else {
            info!(text, "Heard");
            RecognitionEvent::Result(text.to_string())
        };

        let _ = self.tx.send(event);
        let _ = self.tx.send(RecognitionEvent::End);
        true
    }

    /// Whether a recognition session is waiting for an utterance.
    pub fn is_open(&self) -> bool {
        self.open.get()
    }
}
