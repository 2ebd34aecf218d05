use std::path::PathBuf;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use strum::Display;
use tokio::sync::mpsc;

use crate::card::state::{CardState, ImageRef};
use crate::share::ShareLinks;

/// The kind of remote request a busy flag belongs to.
///
/// Flags are independent: requests of different kinds run concurrently, and
/// nothing de-duplicates repeated requests of the same kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum RequestKind {
    Message,
    Artwork,
    Speech,
    Export,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteLevel {
    Info,
    Warning,
}

/// A log line for the UI, below the severity of an alert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudioNote {
    pub timestamp: u64,
    pub level: NoteLevel,
    pub text: String,
}

impl StudioNote {
    pub fn info(text: String) -> Self {
        Self {
            timestamp: Utc::now().timestamp_millis() as u64,
            level: NoteLevel::Info,
            text,
        }
    }

    pub fn warning(text: String) -> Self {
        Self {
            timestamp: Utc::now().timestamp_millis() as u64,
            level: NoteLevel::Warning,
            text,
        }
    }
}

/// `StudioEvent` are the messages sent from the actor - the output of the
/// actor.
///
/// The actor is built with 2 channels - an input and output channel.
/// Requests are sent to the actor through the input channel and may generate
/// 1 or more `StudioEvent`s in response. The CLI (and tests) process studio
/// events to implement their rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data")]
pub enum StudioEvent {
    CardChanged(CardState),
    /// True while the actor is handling an input message. Generation work
    /// continues past this; watch `BusyChanged` for that.
    Processing(bool),
    BusyChanged {
        kind: RequestKind,
        busy: bool,
    },
    MessageReady {
        message: String,
        fallback: bool,
    },
    ArtworkReady {
        image: ImageRef,
        fallback: bool,
    },
    SpeechReady {
        samples: usize,
    },
    ExportFinished {
        path: PathBuf,
    },
    PrintSubmitted {
        path: PathBuf,
    },
    ShareLinksReady(ShareLinks),
    MessageCopied,
    Settings(serde_json::Value),
    Note(StudioNote),
    /// Alert-grade failure (export/rasterization). The UI renders this
    /// prominently; the card itself stays usable.
    Error(String),
}

/// A small wrapper over the `event_tx` for convenience.
#[derive(Clone)]
pub struct EventSender {
    event_tx: mpsc::UnboundedSender<StudioEvent>,
}

impl EventSender {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<StudioEvent>) {
        let (event_tx, rx) = mpsc::unbounded_channel();
        (Self { event_tx }, rx)
    }

    pub fn send(&self, event: StudioEvent) {
        let _ = self.event_tx.send(event);
    }

    pub fn card_changed(&self, card: &CardState) {
        self.send(StudioEvent::CardChanged(card.clone()));
    }

    pub fn set_processing(&self, processing: bool) {
        self.send(StudioEvent::Processing(processing));
    }

    pub fn set_busy(&self, kind: RequestKind, busy: bool) {
        self.send(StudioEvent::BusyChanged { kind, busy });
    }

    pub fn note(&self, text: impl Into<String>) {
        self.send(StudioEvent::Note(StudioNote::info(text.into())));
    }

    pub fn warn(&self, text: impl Into<String>) {
        self.send(StudioEvent::Note(StudioNote::warning(text.into())));
    }

    pub fn error(&self, text: impl Into<String>) {
        self.send(StudioEvent::Error(text.into()));
    }
}
