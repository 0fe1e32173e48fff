use std::{
    fs,
    path::{
        Path,
        PathBuf,
    },
};

use serde::{
    Deserialize,
    Serialize,
};
use tracing::{
    info,
    warn,
};

use crate::core::{
    Deck,
    DeckConfig,
    DeckTuning,
    FlickDeckError,
};

const APP_NAME: &str = "flickdeck";
pub const DECK_FILE: &str = "deck.json";

pub fn get_app_data_dir() -> PathBuf {
    if let Some(data_dir) = dirs::data_local_dir() {
        let app_dir = data_dir.join(APP_NAME);
        let _ = fs::create_dir_all(&app_dir);
        app_dir
    } else {
        PathBuf::from(".")
    }
}

pub fn save_json<T: Serialize>(data: &T, path: &Path) -> Result<(), FlickDeckError> {
    let json = serde_json::to_string_pretty(data)?;
    fs::write(path, json)?;
    info!(path = %path.display(), "Data saved");
    Ok(())
}

pub fn load_json<T: for<'de> Deserialize<'de> + Default>(path: &Path) -> Result<T, FlickDeckError> {
    if !path.exists() {
        return Ok(T::default());
    }

    let json = fs::read_to_string(path)?;
    let data: T = serde_json::from_str(&json)?;
    info!(path = %path.display(), "Data loaded");
    Ok(data)
}

pub fn load_json_or_default<T: for<'de> Deserialize<'de> + Default>(path: &Path) -> T {
    match load_json::<T>(path) {
        Ok(data) => data,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to load, using defaults");
            T::default()
        }
    }
}

/// Reads the deck from `dir`, writing the built-in deck there first if none exists.
///
/// A deck that fails to parse or validate falls back to the built-in one.
pub fn load_deck_from(dir: &Path) -> (Deck, DeckTuning) {
    let path = dir.join(DECK_FILE);

    let config = if path.exists() {
        load_json_or_default::<DeckConfig>(&path)
    } else {
        let config = DeckConfig::default();
        if let Err(e) = save_json(&config, &path) {
            warn!(path = %path.display(), error = %e, "Could not write deck template");
        }
        config
    };

    let tuning = config.tuning;
    match config.into_deck(dir) {
        Ok(loaded) => loaded,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Invalid deck, using built-in cards");
            (Deck::default(), tuning)
        }
    }
}

pub fn load_deck() -> (Deck, DeckTuning) {
    load_deck_from(&get_app_data_dir())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_deck_writes_template() {
        let dir = tempfile::tempdir().unwrap();

        let (deck, tuning) = load_deck_from(dir.path());

        assert_eq!(deck, Deck::default());
        assert_eq!(tuning, DeckTuning::default());
        let written: DeckConfig = load_json(&dir.path().join(DECK_FILE)).unwrap();
        assert_eq!(written, DeckConfig::default());
    }

    #[test]
    fn test_custom_deck_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(DECK_FILE),
            r#"{
                "images": ["a.jpg", null],
                "captions": ["first", "second"],
                "tuning": { "flick_velocity": 0.5 }
            }"#,
        )
        .unwrap();

        let (deck, tuning) = load_deck_from(dir.path());

        assert_eq!(deck.len(), 2);
        assert_eq!(deck.caption(1), "second");
        let expected = format!("file://{}", dir.path().join("a.jpg").display());
        assert_eq!(deck.card(0).unwrap().image.as_deref(), Some(expected.as_str()));
        assert_eq!(deck.card(1).unwrap().image, None);
        assert_eq!(tuning.flick_velocity, 0.5);
        assert_eq!(tuning.reset_delay_ms, 600);
    }

    #[test]
    fn test_mismatched_deck_falls_back_but_keeps_tuning() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(DECK_FILE),
            r#"{ "images": ["a.jpg"], "captions": ["one", "two"], "tuning": { "stagger_ms": 40 } }"#,
        )
        .unwrap();

        let (deck, tuning) = load_deck_from(dir.path());

        assert_eq!(deck, Deck::default());
        assert_eq!(tuning.stagger_ms, 40);
    }

    #[test]
    fn test_malformed_json_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(DECK_FILE), "{ not json").unwrap();

        let (deck, tuning) = load_deck_from(dir.path());

        assert_eq!(deck, Deck::default());
        assert_eq!(tuning, DeckTuning::default());
    }
}
