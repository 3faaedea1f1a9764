//! Card content store.
//!
//! A [`Card`] is the renderable unit behind a [`PageId`]. The navigator only
//! needs lookups, so the seam is the small [`ContentStore`] trait; the
//! bundled [`CardDeck`] is an in-memory map loaded from JSON:
//!
//! ```json
//! {
//!   "cards": [
//!     { "pageId": "home", "title": "Home", "body": "Start here.", "links": ["intro"] },
//!     { "pageId": "intro", "title": "Intro", "body": "..." }
//!   ]
//! }
//! ```

use cardnav_types::{ErrorCode, PageId, TryNew};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Page id rendered for `/`.
pub const HOME_PAGE: &str = "home";

/// A unit of navigable content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub page_id: PageId,
    pub title: String,
    #[serde(default)]
    pub body: String,
    /// Page ids this card links to.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<PageId>,
}

/// Lookup of card content by page id.
///
/// Unknown ids return `None`; the caller renders its missing view.
pub trait ContentStore: Send + Sync {
    fn card(&self, page_id: &PageId) -> Option<Card>;
}

/// Errors loading a card deck.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read content file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse content: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("duplicate card '{0}'")]
    DuplicateCard(PageId),
}

impl ErrorCode for ContentError {
    fn code(&self) -> &'static str {
        match self {
            Self::ReadFile { .. } => "CONTENT_READ_FILE",
            Self::Parse(_) => "CONTENT_PARSE",
            Self::DuplicateCard(_) => "CONTENT_DUPLICATE_CARD",
        }
    }

    fn is_recoverable(&self) -> bool {
        matches!(self, Self::ReadFile { .. })
    }
}

#[derive(Deserialize)]
struct DeckFile {
    cards: Vec<Card>,
}

/// In-memory [`ContentStore`].
#[derive(Debug, Clone, Default)]
pub struct CardDeck {
    cards: BTreeMap<PageId, Card>,
}

impl CardDeck {
    /// Creates an empty deck.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A deck holding only the home card.
    #[must_use]
    pub fn builtin() -> Self {
        let mut deck = Self::new();
        if let Ok(page_id) = PageId::try_new(HOME_PAGE.to_string()) {
            deck.cards.insert(
                page_id.clone(),
                Card {
                    page_id,
                    title: "Home".into(),
                    body: "No content file configured. Point `paths.content_file` at a card deck."
                        .into(),
                    links: Vec::new(),
                },
            );
        }
        deck
    }

    /// Builds a deck from cards, rejecting duplicate page ids.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::DuplicateCard`] on the first repeated id.
    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Result<Self, ContentError> {
        let mut deck = Self::new();
        for card in cards {
            if deck.cards.contains_key(&card.page_id) {
                return Err(ContentError::DuplicateCard(card.page_id));
            }
            deck.cards.insert(card.page_id.clone(), card);
        }
        Ok(deck)
    }

    /// Parses a `{"cards": [...]}` document.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::Parse`] for malformed JSON (including empty
    /// page ids) and [`ContentError::DuplicateCard`] for repeated ids.
    pub fn from_json(json: &str) -> Result<Self, ContentError> {
        let file: DeckFile = serde_json::from_str(json)?;
        Self::from_cards(file.cards)
    }

    /// Loads a deck from a JSON file.
    ///
    /// # Errors
    ///
    /// See [`from_json`](Self::from_json); unreadable files give
    /// [`ContentError::ReadFile`].
    pub fn load(path: &Path) -> Result<Self, ContentError> {
        let json = std::fs::read_to_string(path).map_err(|source| ContentError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        let deck = Self::from_json(&json)?;
        debug!(path = %path.display(), cards = deck.len(), "Loaded card deck");
        Ok(deck)
    }

    /// Adds or replaces a card.
    pub fn insert(&mut self, card: Card) {
        self.cards.insert(card.page_id.clone(), card);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl ContentStore for CardDeck {
    fn card(&self, page_id: &PageId) -> Option<Card> {
        self.cards.get(page_id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardnav_types::assert_error_codes;

    fn page(id: &str) -> PageId {
        PageId::try_new(id.to_string()).unwrap()
    }

    #[test]
    fn builtin_has_home() {
        let deck = CardDeck::builtin();
        assert_eq!(deck.len(), 1);
        assert_eq!(deck.card(&page(HOME_PAGE)).unwrap().title, "Home");
    }

    #[test]
    fn parses_deck() {
        let deck = CardDeck::from_json(
            r#"{"cards": [
                {"pageId": "home", "title": "Home", "body": "hi", "links": ["intro"]},
                {"pageId": "intro", "title": "Intro"}
            ]}"#,
        )
        .unwrap();

        assert_eq!(deck.len(), 2);
        let home = deck.card(&page("home")).unwrap();
        assert_eq!(home.links, vec![page("intro")]);
        assert!(deck.card(&page("intro")).unwrap().body.is_empty());
        assert!(deck.card(&page("nope")).is_none());
    }

    #[test]
    fn rejects_duplicates() {
        let err = CardDeck::from_json(
            r#"{"cards": [{"pageId": "a", "title": "A"}, {"pageId": "a", "title": "A2"}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ContentError::DuplicateCard(ref id) if id.as_str() == "a"));
    }

    #[test]
    fn rejects_empty_page_id() {
        let err = CardDeck::from_json(r#"{"cards": [{"pageId": "", "title": "?"}]}"#).unwrap_err();
        assert!(matches!(err, ContentError::Parse(_)));
    }

    #[test]
    fn load_from_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("cards.json");
        std::fs::write(&path, r#"{"cards": [{"pageId": "x", "title": "X"}]}"#).unwrap();

        let deck = CardDeck::load(&path).unwrap();
        assert!(deck.card(&page("x")).is_some());

        let missing = CardDeck::load(&temp.path().join("absent.json")).unwrap_err();
        assert!(missing.is_recoverable());
    }

    #[test]
    fn error_codes() {
        assert_error_codes(
            &[
                ContentError::DuplicateCard(page("a")),
                ContentError::ReadFile {
                    path: PathBuf::from("x"),
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
                },
            ],
            "CONTENT_",
        );
    }
}
