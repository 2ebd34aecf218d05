//! End-to-end export: compose, rasterize, and write a poster to disk.

use tempfile::TempDir;

use tinsel_core::card::state::CardState;
use tinsel_core::card::style::{FrameStyle, SealKind, Tone};
use tinsel_core::export::{poster_filename, render_poster, ExportOptions};

fn png_dimensions(bytes: &[u8]) -> (u32, u32) {
    let width = u32::from_be_bytes(bytes[16..20].try_into().unwrap());
    let height = u32::from_be_bytes(bytes[20..24].try_into().unwrap());
    (width, height)
}

#[test]
fn default_card_exports_a_poster_named_after_the_recipient() {
    let out = TempDir::new().unwrap();
    let card = CardState::default();

    let options = ExportOptions {
        pixel_ratio: 1,
        output_dir: out.path().to_path_buf(),
    };
    let path = render_poster(&card, None, &options).unwrap();

    assert_eq!(
        path.file_name().unwrap().to_str().unwrap(),
        "Xmas-Poster-Dear-Mom-&-Dad.png"
    );
    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(&[0x89, b'P', b'N', b'G']));
    assert_eq!(png_dimensions(&bytes), (450, 800));
}

#[test]
fn fully_decorated_card_exports_at_configured_density() {
    let out = TempDir::new().unwrap();
    let card = CardState {
        recipient: "The Whole Crew".to_string(),
        sender: "Me & Mine".to_string(),
        tone: Tone::Funny,
        frame: FrameStyle::CandyCane,
        seal: SealKind::Star,
        message: "A very long holiday message that wraps across several lines of the poster \
                  body, full of sleigh bells and snow and the warm glow of the season for \
                  everyone we know."
            .to_string(),
        ..CardState::default()
    };

    let options = ExportOptions {
        pixel_ratio: 2,
        output_dir: out.path().to_path_buf(),
    };
    let path = render_poster(&card, None, &options).unwrap();

    assert_eq!(path.file_name().unwrap(), poster_filename("The Whole Crew").as_str());
    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(png_dimensions(&bytes), (900, 1600));
}

#[test]
fn inline_artwork_round_trips_through_the_exporter() {
    // 1x1 transparent PNG.
    const PIXEL: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";
    let out = TempDir::new().unwrap();
    let card = CardState::default();
    let artwork = format!("data:image/png;base64,{PIXEL}");

    let options = ExportOptions {
        pixel_ratio: 1,
        output_dir: out.path().to_path_buf(),
    };
    let path = render_poster(&card, Some(&artwork), &options).unwrap();
    assert!(path.exists());
}
