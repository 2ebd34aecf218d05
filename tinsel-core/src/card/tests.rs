use std::str::FromStr;

use rstest::rstest;
use strum::IntoEnumIterator;

use crate::card::state::{CardState, ImageRef};
use crate::card::style::{FrameStyle, SealKind, Tone};

#[test]
fn tone_display_matches_ui_labels() {
    assert_eq!(Tone::Heartfelt.to_string(), "Heartfelt");
    assert_eq!(Tone::ShortAndSweet.to_string(), "Short & Sweet");
    assert_eq!(FrameStyle::CandyCane.to_string(), "Candy Cane");
    assert_eq!(FrameStyle::SantasWorkshop.to_string(), "Santa's Workshop");
}

#[test]
fn tone_parses_case_insensitively() {
    assert_eq!(Tone::from_str("funny").unwrap(), Tone::Funny);
    assert_eq!(Tone::from_str("Short & Sweet").unwrap(), Tone::ShortAndSweet);
    assert_eq!(Tone::from_str("short").unwrap(), Tone::ShortAndSweet);
    assert_eq!(FrameStyle::from_str("candy").unwrap(), FrameStyle::CandyCane);
    assert_eq!(SealKind::from_str("star").unwrap(), SealKind::Star);
    assert!(Tone::from_str("Grumpy").is_err());
}

#[rstest]
#[case(Tone::Heartfelt)]
#[case(Tone::Funny)]
#[case(Tone::Professional)]
#[case(Tone::Poetic)]
#[case(Tone::ShortAndSweet)]
fn every_tone_has_fallback_art_and_style_prompt(#[case] tone: Tone) {
    assert!(tone.fallback_image_url().starts_with("https://"));
    assert!(!tone.art_style_prompt().is_empty());
}

#[test]
fn fallback_images_are_distinct_per_tone() {
    let urls: Vec<&str> = Tone::iter().map(|t| t.fallback_image_url()).collect();
    for (i, a) in urls.iter().enumerate() {
        for b in urls.iter().skip(i + 1) {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn default_card_matches_original_composition() {
    let card = CardState::default();
    assert_eq!(card.recipient, "Dear Mom & Dad");
    assert_eq!(card.sender, "Your Loving Daughter");
    assert_eq!(card.tone, Tone::Heartfelt);
    assert_eq!(card.frame, FrameStyle::Classic);
    assert_eq!(
        card.image,
        ImageRef::remote(Tone::Heartfelt.fallback_image_url())
    );
    assert!(!card.is_busy());
}

#[test]
fn inline_image_builds_a_data_uri() {
    let image = ImageRef::Inline {
        mime: "image/png".to_string(),
        data: "AAAA".to_string(),
    };
    assert_eq!(
        image.data_uri().as_deref(),
        Some("data:image/png;base64,AAAA")
    );
    assert_eq!(ImageRef::remote("https://example.com/a.png").data_uri(), None);
}

#[test]
fn card_state_round_trips_through_json() {
    let mut card = CardState::default();
    card.tone = Tone::ShortAndSweet;
    card.frame = FrameStyle::MidnightSleigh;
    card.seal = SealKind::Reindeer;
    card.generating_image = true;

    let json = serde_json::to_string(&card).unwrap();
    let back: CardState = serde_json::from_str(&json).unwrap();
    assert_eq!(back.tone, Tone::ShortAndSweet);
    assert_eq!(back.frame, FrameStyle::MidnightSleigh);
    assert_eq!(back.seal, SealKind::Reindeer);
    assert!(back.generating_image);
    assert!(back.is_busy());
}
