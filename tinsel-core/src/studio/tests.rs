use std::rc::Rc;
use std::sync::Once;

use tempfile::TempDir;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::ai::mock::{MockBehavior, MockProvider};
use crate::ai::prompts::{EMPTY_RESPONSE_MESSAGE, FALLBACK_MESSAGE};
use crate::card::state::ImageRef;
use crate::card::style::Tone;
use crate::settings::SettingsManager;
use crate::studio::actor::{handle_message, ActorState, AudioSlot, StudioMessage};
use crate::studio::events::{EventSender, RequestKind, StudioEvent};
use crate::studio::requests;

static TRACING_INIT: Once = Once::new();

fn setup_tracing() {
    TRACING_INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}

struct TestFixture {
    state: ActorState,
    rx: UnboundedReceiver<StudioMessage>,
    event_rx: UnboundedReceiver<StudioEvent>,
    provider: MockProvider,
    _scratch: TempDir,
}

impl TestFixture {
    fn new(behavior: MockBehavior) -> Self {
        setup_tracing();

        let scratch = TempDir::new().expect("tempdir");
        let settings =
            SettingsManager::from_path(scratch.path().join("settings.toml")).expect("settings");

        let provider = MockProvider::new(behavior);
        let (event_sender, event_rx) = EventSender::new();
        let (self_tx, rx) = tokio::sync::mpsc::unbounded_channel();

        let state = ActorState {
            event_sender,
            provider: Rc::new(provider.clone()),
            card: Default::default(),
            settings,
            audio: AudioSlot::Uninit,
            self_tx,
        };

        TestFixture {
            state,
            rx,
            event_rx,
            provider,
            _scratch: scratch,
        }
    }

    /// Pump one completion from the request tasks back through the actor,
    /// the way the run loop would.
    async fn pump_completion(&mut self) {
        let completion = self.rx.recv().await.expect("request task completion");
        handle_message(&mut self.state, completion).expect("completion handling");
    }

    fn drain_events(&mut self) -> Vec<StudioEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.event_rx.try_recv() {
            events.push(event);
        }
        events
    }
}

#[tokio::test]
async fn failing_text_endpoint_substitutes_fallback_greeting() {
    let local = tokio::task::LocalSet::new();
    local
        .run_until(async {
            let mut fixture = TestFixture::new(MockBehavior::AlwaysTerminalError);
            fixture.state.card.recipient = "Anyone".to_string();
            fixture.state.card.tone = Tone::Poetic;

            handle_message(&mut fixture.state, StudioMessage::GenerateMessage).unwrap();
            assert!(fixture.state.card.generating_text);

            fixture.pump_completion().await;

            assert!(!fixture.state.card.generating_text);
            assert_eq!(fixture.state.card.message, FALLBACK_MESSAGE);

            let events = fixture.drain_events();
            assert!(events.iter().any(|e| matches!(
                e,
                StudioEvent::MessageReady { fallback: true, .. }
            )));
            assert!(events.iter().any(|e| matches!(
                e,
                StudioEvent::BusyChanged { kind: RequestKind::Message, busy: false }
            )));
        })
        .await;
}

#[tokio::test]
async fn empty_text_response_substitutes_short_fallback() {
    let local = tokio::task::LocalSet::new();
    local
        .run_until(async {
            let mut fixture = TestFixture::new(MockBehavior::EmptyText);
            handle_message(&mut fixture.state, StudioMessage::GenerateMessage).unwrap();
            fixture.pump_completion().await;
            assert_eq!(fixture.state.card.message, EMPTY_RESPONSE_MESSAGE);
        })
        .await;
}

#[tokio::test]
async fn failing_image_endpoint_substitutes_per_tone_fallback() {
    let provider = MockProvider::new(MockBehavior::AlwaysTerminalError);
    let (image, fallback) = requests::fetch_artwork(&provider, Tone::Funny).await;

    assert!(fallback);
    assert_eq!(image, ImageRef::remote(Tone::Funny.fallback_image_url()));
}

#[tokio::test]
async fn successful_artwork_lands_inline_on_the_card() {
    let local = tokio::task::LocalSet::new();
    local
        .run_until(async {
            let mut fixture = TestFixture::new(MockBehavior::Success);
            handle_message(&mut fixture.state, StudioMessage::GenerateArtwork).unwrap();
            assert!(fixture.state.card.generating_image);

            fixture.pump_completion().await;

            assert!(!fixture.state.card.generating_image);
            assert!(matches!(
                fixture.state.card.image,
                ImageRef::Inline { ref mime, .. } if mime == "image/png"
            ));

            let events = fixture.drain_events();
            assert!(events.iter().any(|e| matches!(
                e,
                StudioEvent::ArtworkReady { fallback: false, .. }
            )));
        })
        .await;
}

#[tokio::test]
async fn rapid_double_speech_triggers_two_independent_playback_requests() {
    let local = tokio::task::LocalSet::new();
    local
        .run_until(async {
            let mut fixture = TestFixture::new(MockBehavior::Success);

            handle_message(&mut fixture.state, StudioMessage::GenerateSpeech).unwrap();
            handle_message(&mut fixture.state, StudioMessage::GenerateSpeech).unwrap();

            fixture.pump_completion().await;
            fixture.pump_completion().await;

            // No de-duplication: both requests hit the endpoint and both
            // payloads were decoded and dispatched.
            assert_eq!(fixture.provider.get_call_count(), 2);
            let ready_count = fixture
                .drain_events()
                .iter()
                .filter(|e| matches!(e, StudioEvent::SpeechReady { .. }))
                .count();
            assert_eq!(ready_count, 2);
            assert!(fixture.state.card.audio.is_some());
        })
        .await;
}

#[tokio::test]
async fn failed_speech_is_silent_with_no_error_event() {
    let local = tokio::task::LocalSet::new();
    local
        .run_until(async {
            let mut fixture = TestFixture::new(MockBehavior::AlwaysTerminalError);
            handle_message(&mut fixture.state, StudioMessage::GenerateSpeech).unwrap();
            fixture.pump_completion().await;

            assert!(!fixture.state.card.generating_speech);
            assert!(fixture.state.card.audio.is_none());

            let events = fixture.drain_events();
            assert!(!events.iter().any(|e| matches!(e, StudioEvent::Error(_))));
            assert!(!events
                .iter()
                .any(|e| matches!(e, StudioEvent::SpeechReady { .. })));
        })
        .await;
}

#[tokio::test]
async fn concurrent_text_and_image_requests_do_not_exclude_each_other() {
    let local = tokio::task::LocalSet::new();
    local
        .run_until(async {
            let mut fixture = TestFixture::new(MockBehavior::Success);

            handle_message(&mut fixture.state, StudioMessage::GenerateMessage).unwrap();
            handle_message(&mut fixture.state, StudioMessage::GenerateArtwork).unwrap();

            // Both flags on at once.
            assert!(fixture.state.card.generating_text);
            assert!(fixture.state.card.generating_image);

            fixture.pump_completion().await;
            fixture.pump_completion().await;

            assert!(!fixture.state.card.generating_text);
            assert!(!fixture.state.card.generating_image);
        })
        .await;
}

#[tokio::test]
async fn field_edits_emit_card_changed() {
    let local = tokio::task::LocalSet::new();
    local
        .run_until(async {
            let mut fixture = TestFixture::new(MockBehavior::Success);
            handle_message(
                &mut fixture.state,
                StudioMessage::SetRecipient("Aunt Carol".to_string()),
            )
            .unwrap();
            handle_message(&mut fixture.state, StudioMessage::SetTone(Tone::Funny)).unwrap();

            assert_eq!(fixture.state.card.recipient, "Aunt Carol");
            assert_eq!(fixture.state.card.tone, Tone::Funny);

            let card_changes = fixture
                .drain_events()
                .iter()
                .filter(|e| matches!(e, StudioEvent::CardChanged(_)))
                .count();
            assert_eq!(card_changes, 2);
        })
        .await;
}

#[tokio::test]
async fn share_links_event_reflects_current_card() {
    let local = tokio::task::LocalSet::new();
    local
        .run_until(async {
            let mut fixture = TestFixture::new(MockBehavior::Success);
            fixture.state.card.message = "Ho ho ho".to_string();
            fixture.state.card.sender = "Santa".to_string();

            handle_message(&mut fixture.state, StudioMessage::Share).unwrap();

            let events = fixture.drain_events();
            let links = events
                .iter()
                .find_map(|e| match e {
                    StudioEvent::ShareLinksReady(links) => Some(links.clone()),
                    _ => None,
                })
                .expect("share links event");
            assert!(links.whatsapp.contains("Ho+ho+ho"));
            assert!(links.whatsapp.contains("Santa"));
        })
        .await;
}

#[tokio::test]
async fn generation_prompts_reach_the_provider() {
    let local = tokio::task::LocalSet::new();
    local
        .run_until(async {
            let mut fixture = TestFixture::new(MockBehavior::Success);
            fixture.state.card.recipient = "Gran".to_string();
            fixture.state.card.sender = "Pip".to_string();
            fixture.state.card.tone = Tone::ShortAndSweet;

            handle_message(&mut fixture.state, StudioMessage::GenerateMessage).unwrap();
            fixture.pump_completion().await;

            let prompts = fixture.provider.get_captured_prompts();
            assert_eq!(prompts, vec!["message:Gran:Pip:Short & Sweet".to_string()]);
        })
        .await;
}
