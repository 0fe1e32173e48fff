use std::{
    path::Path,
    time::Duration,
};

use serde::{
    Deserialize,
    Serialize,
};

use super::errors::FlickDeckError;

const DEFAULT_CAPTIONS: [&str; 6] = [
    "Happy 9th Spiritual Birthday! Watching you grow in your faith has been such a blessing, and every day I admire not only your heart for God but also how you inspire me to be better. You're truly amazing.",
    "It's been 9 years since your baptism, and in that time, you've only become more incredible, both in your faith and in the way you carry yourself. You have a light that brightens my world, and I'm so grateful to know you.",
    "9 years ago, you took a step of faith, and ever since, your journey has been so inspiring. I can't help but feel something deeper every time I'm around you. Your joy, your faith, and your presence just mean so much to me.",
    "As you celebrate your 9th spiritual birthday, I can't help but think how lucky I am to witness your walk with God. You're not just special because of your faith, but because of the way you make everyone around you, including me, feel loved and appreciated.",
    "9 years of walking with God, and I hope you know how proud I am of you. You have a way of making everything brighter, and my heart is filled with admiration for you, not just for your faith but for who you are.",
    "On this special day, I want you to know that you're always on my mind. Your spiritual journey is so beautiful, but so is everything else about you. I'm lucky to have you in my life, and I hope you can feel how much you mean to me.",
];

const URI_SCHEMES: [&str; 4] = ["file://", "http://", "https://", "bytes://"];

/// Knobs for gesture interpretation and deck timing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckTuning {
    /// Release speed (points per millisecond) above which a drag dismisses the card.
    pub flick_velocity: f32,
    /// Extra distance past the viewport edge a dismissed card travels.
    pub offscreen_margin: f32,
    pub reset_delay_ms: u64,
    pub stagger_ms: u64,
}

impl Default for DeckTuning {
    fn default() -> Self {
        Self { flick_velocity: 0.2, offscreen_margin: 200.0, reset_delay_ms: 600, stagger_ms: 100 }
    }
}

impl DeckTuning {
    pub fn reset_delay(&self) -> Duration {
        Duration::from_millis(self.reset_delay_ms)
    }

    pub fn stagger(&self, index: usize) -> Duration {
        Duration::from_millis(self.stagger_ms.saturating_mul(index as u64))
    }
}

/// On-disk shape of `deck.json`. `images` and `captions` are parallel lists;
/// a `null` image renders the card in a theme color and an empty `images`
/// list means no card has one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckConfig {
    #[serde(default)]
    pub images: Vec<Option<String>>,
    #[serde(default = "default_captions")]
    pub captions: Vec<String>,
    #[serde(default)]
    pub tuning: DeckTuning,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self { images: Vec::new(), captions: default_captions(), tuning: DeckTuning::default() }
    }
}

fn default_captions() -> Vec<String> {
    DEFAULT_CAPTIONS.iter().map(|c| c.to_string()).collect()
}

impl DeckConfig {
    pub fn into_deck(self, base_dir: &Path) -> Result<(Deck, DeckTuning), FlickDeckError> {
        let deck = Deck::new(self.images, self.captions, base_dir)?;
        Ok((deck, self.tuning))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    /// Image URI understood by the egui loaders.
    pub image: Option<String>,
    pub caption: String,
}

/// The static, validated card content for one session.
#[derive(Debug, Clone, PartialEq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn new(
        images: Vec<Option<String>>,
        captions: Vec<String>,
        base_dir: &Path,
    ) -> Result<Self, FlickDeckError> {
        let images = if images.is_empty() { vec![None; captions.len()] } else { images };
        if images.len() != captions.len() {
            return Err(FlickDeckError::MismatchedLengths {
                images: images.len(),
                captions: captions.len(),
            });
        }
        if captions.is_empty() {
            return Err(FlickDeckError::EmptyDeck);
        }

        let cards = images
            .into_iter()
            .zip(captions)
            .map(|(image, caption)| Card {
                image: image
                    .filter(|raw| !raw.trim().is_empty())
                    .map(|raw| image_uri(&raw, base_dir)),
                caption,
            })
            .collect();

        Ok(Self { cards })
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn card(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn caption(&self, index: usize) -> &str {
        self.cards.get(index).map(|card| card.caption.as_str()).unwrap_or_default()
    }
}

impl Default for Deck {
    /// The built-in deck: every default caption on a plain card.
    fn default() -> Self {
        let cards = default_captions()
            .into_iter()
            .map(|caption| Card { image: None, caption })
            .collect();
        Self { cards }
    }
}

fn image_uri(raw: &str, base_dir: &Path) -> String {
    let raw = raw.trim();
    if URI_SCHEMES.iter().any(|scheme| raw.starts_with(scheme)) {
        return raw.to_string();
    }

    let path = Path::new(raw);
    let path = if path.is_absolute() { path.to_path_buf() } else { base_dir.join(path) };
    format!("file://{}", path.display())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_builds_six_card_deck() {
        let (deck, tuning) = DeckConfig::default().into_deck(Path::new(".")).unwrap();
        assert_eq!(deck.len(), 6);
        assert!(deck.cards().iter().all(|card| card.image.is_none()));
        assert!(deck.caption(0).starts_with("Happy 9th"));
        assert_eq!(tuning, DeckTuning::default());
    }

    #[test]
    fn test_mismatched_lengths_rejected() {
        let result = Deck::new(vec![None, None], vec!["only one".to_string()], Path::new("."));
        match result {
            Err(FlickDeckError::MismatchedLengths { images, captions }) => {
                assert_eq!(images, 2);
                assert_eq!(captions, 1);
            }
            other => panic!("Expected MismatchedLengths, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_images_means_plain_cards() {
        let config: DeckConfig =
            serde_json::from_str(r#"{ "captions": ["one", "two", "three"] }"#).unwrap();
        let (deck, _) = config.into_deck(Path::new(".")).unwrap();
        assert_eq!(deck.len(), 3);
        assert_eq!(deck.caption(2), "three");
        assert!(deck.cards().iter().all(|card| card.image.is_none()));
    }

    #[test]
    fn test_empty_deck_rejected() {
        let result = Deck::new(Vec::new(), Vec::new(), Path::new("."));
        assert!(matches!(result, Err(FlickDeckError::EmptyDeck)));
    }

    #[test]
    fn test_image_uri_resolution() {
        let base = Path::new("/data/flickdeck");
        let deck = Deck::new(
            vec![
                Some("cards/1.jpeg".to_string()),
                Some("https://example.com/2.jpg".to_string()),
                Some("  ".to_string()),
                Some("/abs/3.png".to_string()),
            ],
            vec!["a".into(), "b".into(), "c".into(), "d".into()],
            base,
        )
        .unwrap();

        let expected = format!("file://{}", base.join("cards/1.jpeg").display());
        assert_eq!(deck.card(0).unwrap().image.as_deref(), Some(expected.as_str()));
        assert_eq!(deck.card(1).unwrap().image.as_deref(), Some("https://example.com/2.jpg"));
        assert_eq!(deck.card(2).unwrap().image, None);
        assert_eq!(deck.card(3).unwrap().image.as_deref(), Some("file:///abs/3.png"));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: DeckConfig =
            serde_json::from_str(r#"{ "tuning": { "reset_delay_ms": 900 } }"#).unwrap();
        assert_eq!(config.captions.len(), 6);
        assert_eq!(config.tuning.reset_delay(), Duration::from_millis(900));
        assert_eq!(config.tuning.flick_velocity, 0.2);
        assert_eq!(config.tuning.stagger(3), Duration::from_millis(300));
    }

    #[test]
    fn test_builtin_deck_matches_default_config() {
        let (deck, _) = DeckConfig::default().into_deck(Path::new(".")).unwrap();
        assert_eq!(Deck::default(), deck);
    }

    #[test]
    fn test_caption_out_of_range_is_empty() {
        let (deck, _) = DeckConfig::default().into_deck(Path::new(".")).unwrap();
        assert_eq!(deck.caption(42), "");
    }
}
