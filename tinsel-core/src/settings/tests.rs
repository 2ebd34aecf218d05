use tempfile::TempDir;

use crate::ai::mock::MockBehavior;
use crate::settings::config::{ProviderConfig, Settings};
use crate::settings::manager::SettingsManager;

fn scratch() -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("settings.toml");
    (dir, path)
}

#[test]
fn missing_file_is_created_with_defaults() {
    let (_dir, path) = scratch();
    let manager = SettingsManager::from_path(path.clone()).unwrap();

    assert!(path.exists());
    let settings = manager.settings();
    assert!(settings.active_provider.is_none());
    assert_eq!(settings.export.pixel_ratio, 4);
    assert_eq!(settings.speech.voice, "Kore");
}

#[test]
fn settings_round_trip_through_toml() {
    let (_dir, path) = scratch();
    let manager = SettingsManager::from_path(path.clone()).unwrap();

    manager.update(|s| {
        s.active_provider = Some("gemini".to_string());
        s.providers.insert(
            "gemini".to_string(),
            ProviderConfig::Gemini {
                api_key: "test-key".to_string(),
                text_model: "gemini-3-flash-preview".to_string(),
                image_model: "gemini-2.5-flash-image".to_string(),
                speech_model: "gemini-2.5-flash-preview-tts".to_string(),
            },
        );
        s.export.pixel_ratio = 2;
    });
    manager.save().unwrap();

    let reloaded = SettingsManager::from_path(path).unwrap();
    let settings = reloaded.settings();
    assert_eq!(settings.export.pixel_ratio, 2);
    match settings.active_provider().unwrap() {
        ProviderConfig::Gemini { api_key, .. } => assert_eq!(api_key, "test-key"),
        other => panic!("unexpected provider: {other:?}"),
    }
}

#[test]
fn corrupted_file_is_backed_up_and_replaced() {
    let (_dir, path) = scratch();
    std::fs::write(&path, "this is { not toml").unwrap();

    let manager = SettingsManager::from_path(path.clone()).unwrap();
    assert!(manager.settings().providers.is_empty());

    assert!(path.with_extension("toml.backup").exists());
    // The replacement parses cleanly.
    let contents = std::fs::read_to_string(&path).unwrap();
    let _: Settings = toml::from_str(&contents).unwrap();
}

#[test]
fn mock_provider_config_defaults_to_success() {
    let toml = r#"
        active_provider = "mock"

        [providers.mock]
        type = "mock"
    "#;
    let settings: Settings = toml::from_str(toml).unwrap();
    match settings.active_provider().unwrap() {
        ProviderConfig::Mock { behavior } => {
            assert!(matches!(behavior, MockBehavior::Success))
        }
        other => panic!("unexpected provider: {other:?}"),
    }
}

#[test]
fn partial_gemini_config_fills_model_defaults() {
    let toml = r#"
        [providers.gemini]
        type = "gemini"
        api_key = "k"
    "#;
    let settings: Settings = toml::from_str(toml).unwrap();
    match settings.providers.get("gemini").unwrap() {
        ProviderConfig::Gemini {
            text_model,
            image_model,
            speech_model,
            ..
        } => {
            assert_eq!(text_model, "gemini-3-flash-preview");
            assert_eq!(image_model, "gemini-2.5-flash-image");
            assert_eq!(speech_model, "gemini-2.5-flash-preview-tts");
        }
        other => panic!("unexpected provider: {other:?}"),
    }
}
