use std::path::PathBuf;
use std::rc::Rc;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::ai::gemini::{GeminiConfig, GeminiProvider};
use crate::ai::mock::{MockBehavior, MockProvider};
use crate::ai::provider::CreativeProvider;
use crate::ai::types::SpeechAudio;
use crate::audio::chime::chime_samples;
use crate::audio::decode::decode_pcm16_base64;
use crate::audio::playback::AudioOutput;
use crate::audio::SPEECH_SAMPLE_RATE;
use crate::card::state::{CardState, ImageRef};
use crate::card::style::{FrameStyle, SealKind, Tone};
use crate::export::{self, ExportOptions};
use crate::settings::{ProviderConfig, Settings, SettingsManager};
use crate::share;
use crate::studio::events::{EventSender, RequestKind, StudioEvent};
use crate::studio::requests;

/// Defines the possible input messages to the `StudioActor`.
///
/// Field edits apply immediately; the Generate* messages start independent
/// remote requests whose completions are fed back into the actor as the
/// `*Generated`/`*Completed` variants below.
#[derive(Debug, Serialize, Deserialize)]
pub enum StudioMessage {
    SetRecipient(String),
    SetSender(String),
    SetTone(Tone),
    SetFrame(FrameStyle),
    SetSeal(SealKind),
    SetMessage(String),

    GenerateMessage,
    GenerateArtwork,
    GenerateSpeech,
    PlayChime,

    Export,
    Print,
    Share,
    CopyMessage,

    GetCard,
    GetSettings,
    SaveSettings {
        settings: serde_json::Value,
    },

    // Completions delivered by the request tasks.
    MessageGenerated {
        message: String,
        fallback: bool,
    },
    ArtworkGenerated {
        image: ImageRef,
        fallback: bool,
    },
    SpeechGenerated {
        audio: Option<SpeechAudio>,
    },
    ExportCompleted {
        result: Result<PathBuf, String>,
    },
    PrintCompleted {
        result: Result<PathBuf, String>,
    },
}

/// The `StudioActor` implements the core (or backend) of Tinsel.
///
/// UI applications do not contain any application logic; they are simple
/// wrappers that take input from the user, send it to the actor, and render
/// events from the actor back into the UI. `StudioMessage`s go in through
/// the handle below; `StudioEvent`s come out of the receiver returned by
/// `launch`.
pub struct StudioActor {
    pub tx: mpsc::UnboundedSender<StudioMessage>,
}

impl StudioActor {
    /// Launch the studio actor and return a handle to it.
    ///
    /// Must be called from within a `tokio::task::LocalSet`: playback
    /// handles are not `Send`, so the actor and its request tasks run on the
    /// local task queue.
    pub fn launch(settings_manager: SettingsManager) -> (Self, mpsc::UnboundedReceiver<StudioEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let (event_sender, event_rx) = EventSender::new();
        let self_tx = tx.clone();

        tokio::task::spawn_local(async move {
            let settings = settings_manager.settings();
            if settings.active_provider().is_none() {
                event_sender.warn(
                    "No AI provider is configured; generation will use the built-in \
                     fallbacks. Add a [providers] entry to settings.toml.",
                );
            }

            let provider = create_provider(&settings);
            let state = ActorState {
                event_sender,
                provider,
                card: CardState::default(),
                settings: settings_manager,
                audio: AudioSlot::Uninit,
                self_tx,
            };

            run_actor(state, rx).await;
        });

        (StudioActor { tx }, event_rx)
    }

    pub fn send(&self, message: StudioMessage) -> Result<()> {
        self.tx.send(message)?;
        Ok(())
    }
}

/// The process-wide audio output. Constructed on first use; a failed
/// construction is remembered so it is attempted at most once.
pub enum AudioSlot {
    Uninit,
    Ready(Rc<AudioOutput>),
    Unavailable,
}

pub struct ActorState {
    pub event_sender: EventSender,
    pub provider: Rc<dyn CreativeProvider>,
    pub card: CardState,
    pub settings: SettingsManager,
    pub audio: AudioSlot,
    pub self_tx: mpsc::UnboundedSender<StudioMessage>,
}

/// Builds the provider named in settings. With nothing configured the studio
/// still runs: an always-failing mock makes every generation resolve to its
/// fallback value.
pub fn create_provider(settings: &Settings) -> Rc<dyn CreativeProvider> {
    match settings.active_provider() {
        Some(ProviderConfig::Gemini {
            api_key,
            text_model,
            image_model,
            speech_model,
        }) => Rc::new(GeminiProvider::new(GeminiConfig {
            api_key: api_key.clone(),
            text_model: text_model.clone(),
            image_model: image_model.clone(),
            speech_model: speech_model.clone(),
            voice: settings.speech.voice.clone(),
        })),
        Some(ProviderConfig::Mock { behavior }) => Rc::new(MockProvider::new(behavior.clone())),
        None => Rc::new(MockProvider::new(MockBehavior::AlwaysTerminalError)),
    }
}

// Actor implementation as free functions
async fn run_actor(mut state: ActorState, mut rx: mpsc::UnboundedReceiver<StudioMessage>) {
    info!("StudioActor started");
    state.event_sender.card_changed(&state.card);

    while let Some(message) = rx.recv().await {
        state.event_sender.set_processing(true);
        if let Err(e) = handle_message(&mut state, message) {
            error!(?e, "Error processing studio message");
            state.event_sender.error(format!("Error: {e:?}"));
        }
        state.event_sender.set_processing(false);
    }
}

pub fn handle_message(state: &mut ActorState, message: StudioMessage) -> Result<()> {
    match message {
        StudioMessage::SetRecipient(value) => {
            state.card.recipient = value;
            state.event_sender.card_changed(&state.card);
        }
        StudioMessage::SetSender(value) => {
            state.card.sender = value;
            state.event_sender.card_changed(&state.card);
        }
        StudioMessage::SetTone(tone) => {
            state.card.tone = tone;
            state.event_sender.card_changed(&state.card);
        }
        StudioMessage::SetFrame(frame) => {
            state.card.frame = frame;
            state.event_sender.card_changed(&state.card);
        }
        StudioMessage::SetSeal(seal) => {
            state.card.seal = seal;
            state.event_sender.card_changed(&state.card);
        }
        StudioMessage::SetMessage(value) => {
            state.card.message = value;
            state.event_sender.card_changed(&state.card);
        }

        StudioMessage::GenerateMessage => {
            state.card.generating_text = true;
            state.event_sender.set_busy(RequestKind::Message, true);
            state.event_sender.card_changed(&state.card);

            let provider = state.provider.clone();
            let tx = state.self_tx.clone();
            let recipient = state.card.recipient.clone();
            let sender = state.card.sender.clone();
            let tone = state.card.tone;
            tokio::task::spawn_local(async move {
                let (message, fallback) =
                    requests::fetch_message(provider.as_ref(), &recipient, &sender, tone).await;
                let _ = tx.send(StudioMessage::MessageGenerated { message, fallback });
            });
        }
        StudioMessage::MessageGenerated { message, fallback } => {
            state.card.message = message.clone();
            state.card.generating_text = false;
            play_samples(state, chime_samples(), SPEECH_SAMPLE_RATE);
            state
                .event_sender
                .send(StudioEvent::MessageReady { message, fallback });
            state.event_sender.set_busy(RequestKind::Message, false);
            state.event_sender.card_changed(&state.card);
        }

        StudioMessage::GenerateArtwork => {
            state.card.generating_image = true;
            state.event_sender.set_busy(RequestKind::Artwork, true);
            state.event_sender.card_changed(&state.card);

            let provider = state.provider.clone();
            let tx = state.self_tx.clone();
            let tone = state.card.tone;
            tokio::task::spawn_local(async move {
                let (image, fallback) = requests::fetch_artwork(provider.as_ref(), tone).await;
                let _ = tx.send(StudioMessage::ArtworkGenerated { image, fallback });
            });
        }
        StudioMessage::ArtworkGenerated { image, fallback } => {
            state.card.image = image.clone();
            state.card.generating_image = false;
            play_samples(state, chime_samples(), SPEECH_SAMPLE_RATE);
            state
                .event_sender
                .send(StudioEvent::ArtworkReady { image, fallback });
            state.event_sender.set_busy(RequestKind::Artwork, false);
            state.event_sender.card_changed(&state.card);
        }

        StudioMessage::GenerateSpeech => {
            state.card.generating_speech = true;
            state.event_sender.set_busy(RequestKind::Speech, true);
            state.event_sender.card_changed(&state.card);

            let provider = state.provider.clone();
            let tx = state.self_tx.clone();
            let text = state.card.message.clone();
            tokio::task::spawn_local(async move {
                let audio = requests::fetch_speech(provider.as_ref(), &text).await;
                let _ = tx.send(StudioMessage::SpeechGenerated { audio });
            });
        }
        StudioMessage::SpeechGenerated { audio } => {
            state.card.generating_speech = false;
            state.card.audio = audio.as_ref().map(|a| a.data.clone());

            // Failure posture is silent: no fallback audio, no user-visible
            // signal, the flow simply completes without sound.
            match audio {
                Some(audio) => match decode_pcm16_base64(&audio.data) {
                    Ok(samples) => {
                        let count = samples.len();
                        if count == 0 {
                            debug!("empty speech payload, skipping playback");
                        } else {
                            play_samples(state, samples, audio.sample_rate);
                        }
                        state
                            .event_sender
                            .send(StudioEvent::SpeechReady { samples: count });
                    }
                    Err(e) => warn!(error = ?e, "speech payload did not decode"),
                },
                None => debug!("no speech payload returned"),
            }

            state.event_sender.set_busy(RequestKind::Speech, false);
            state.event_sender.card_changed(&state.card);
        }

        StudioMessage::PlayChime => {
            play_samples(state, chime_samples(), SPEECH_SAMPLE_RATE);
        }

        StudioMessage::Export => {
            state.card.exporting = true;
            state.event_sender.set_busy(RequestKind::Export, true);
            state.event_sender.card_changed(&state.card);

            let card = state.card.clone();
            let export_settings = state.settings.settings().export;
            let tx = state.self_tx.clone();
            tokio::task::spawn_local(async move {
                let artwork = export::resolve_artwork(&card.image).await;
                let options = ExportOptions {
                    pixel_ratio: export_settings.pixel_ratio,
                    output_dir: export_settings.resolved_output_dir(),
                };
                let result = export::render_poster(&card, artwork.as_deref(), &options)
                    .map_err(|e| e.to_string());
                let _ = tx.send(StudioMessage::ExportCompleted { result });
            });
        }
        StudioMessage::ExportCompleted { result } => {
            state.card.exporting = false;
            match result {
                Ok(path) => state.event_sender.send(StudioEvent::ExportFinished { path }),
                Err(e) => state.event_sender.error(format!("Export failed: {e}")),
            }
            state.event_sender.set_busy(RequestKind::Export, false);
            state.event_sender.card_changed(&state.card);
        }

        StudioMessage::Print => {
            let card = state.card.clone();
            let export_settings = state.settings.settings().export;
            let tx = state.self_tx.clone();
            tokio::task::spawn_local(async move {
                let artwork = export::resolve_artwork(&card.image).await;
                let options = ExportOptions {
                    pixel_ratio: export_settings.pixel_ratio,
                    output_dir: export_settings.resolved_output_dir(),
                };
                let result = match export::render_poster(&card, artwork.as_deref(), &options) {
                    Ok(path) => match export::render::print_poster(&path).await {
                        Ok(()) => Ok(path),
                        Err(e) => Err(e.to_string()),
                    },
                    Err(e) => Err(e.to_string()),
                };
                let _ = tx.send(StudioMessage::PrintCompleted { result });
            });
        }
        StudioMessage::PrintCompleted { result } => match result {
            Ok(path) => state.event_sender.send(StudioEvent::PrintSubmitted { path }),
            Err(e) => state.event_sender.warn(format!("Print failed: {e}")),
        },

        StudioMessage::Share => {
            let links = share::share_links(&state.card)?;
            state.event_sender.send(StudioEvent::ShareLinksReady(links));
        }
        StudioMessage::CopyMessage => match share::copy_message(&state.card) {
            Ok(()) => state.event_sender.send(StudioEvent::MessageCopied),
            Err(e) => state.event_sender.warn(format!("Clipboard copy failed: {e}")),
        },

        StudioMessage::GetCard => {
            state.event_sender.card_changed(&state.card);
        }
        StudioMessage::GetSettings => {
            let settings = serde_json::to_value(state.settings.settings())?;
            state.event_sender.send(StudioEvent::Settings(settings));
        }
        StudioMessage::SaveSettings { settings } => {
            let new_settings: Settings = serde_json::from_value(settings)?;
            state.settings.update(|s| *s = new_settings);
            state.settings.save()?;
            state.event_sender.note("Settings saved");
        }
    }

    Ok(())
}

/// Play mono samples through the shared output. Best effort the whole way:
/// missing device, failed stream, or an empty sample sequence all degrade to
/// silence without surfacing an error.
pub fn play_samples(state: &mut ActorState, samples: Vec<f32>, sample_rate: u32) {
    if samples.is_empty() {
        return;
    }
    let Some(output) = ensure_audio(state) else {
        return;
    };

    match output.play(&samples, sample_rate) {
        Ok(playback) => {
            // Hold the handle until the stream drains. Each playback owns its
            // own stream, so rapid repeated triggers overlap audibly.
            tokio::task::spawn_local(async move {
                playback.wait().await;
            });
        }
        Err(e) => warn!(error = ?e, "audio playback failed"),
    }
}

fn ensure_audio(state: &mut ActorState) -> Option<Rc<AudioOutput>> {
    match &state.audio {
        AudioSlot::Ready(output) => Some(output.clone()),
        AudioSlot::Unavailable => None,
        AudioSlot::Uninit => match AudioOutput::new() {
            Ok(output) => {
                let output = Rc::new(output);
                state.audio = AudioSlot::Ready(output.clone());
                Some(output)
            }
            Err(e) => {
                warn!(error = ?e, "audio output unavailable, playback disabled");
                state.audio = AudioSlot::Unavailable;
                None
            }
        },
    }
}
