//! Card catalog - the ordered list of pairs a board can draw from.
//!
//! Entry `i` of the catalog becomes pair key `i`. A board with `n` pairs
//! uses the first `n` entries.
//!
//! ```
//! use memory_match::cards::{CardCatalog, CatalogEntry, DisplayMode, PairKey};
//!
//! let catalog = CardCatalog::new()
//!     .with_entry(CatalogEntry::new("cat").with_audio("cat.ogg"))
//!     .with_entry(CatalogEntry::new("dog"));
//!
//! let identity = catalog.identity(PairKey::new(0), DisplayMode::Textual).unwrap();
//! assert_eq!(identity.name, "cat");
//! assert!(catalog.ensure_pairs(3).is_err());
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::identity::{AudioClip, CardIdentity, DisplayMode, PairKey};
use crate::core::ConfigError;

/// Visual assets for the two faces of a pair.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualRefs {
    pub pictorial: Option<String>,
    pub textual: Option<String>,
}

impl VisualRefs {
    /// The asset for one face.
    #[must_use]
    pub fn face(&self, mode: DisplayMode) -> Option<&str> {
        match mode {
            DisplayMode::Pictorial => self.pictorial.as_deref(),
            DisplayMode::Textual => self.textual.as_deref(),
        }
    }
}

/// One pair in the catalog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Pair name.
    pub name: String,

    /// Pronunciation clip.
    #[serde(default)]
    pub audio: Option<AudioClip>,

    /// Face assets.
    #[serde(default)]
    pub visuals: VisualRefs,
}

impl CatalogEntry {
    /// Create an entry with no assets.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            audio: None,
            visuals: VisualRefs::default(),
        }
    }

    /// Attach a whole pronunciation clip.
    #[must_use]
    pub fn with_audio(mut self, clip: impl Into<String>) -> Self {
        self.audio = Some(AudioClip::whole(clip));
        self
    }

    /// Attach a clip segment.
    #[must_use]
    pub fn with_audio_segment(mut self, clip: impl Into<String>, start: f32, end: f32) -> Self {
        self.audio = Some(AudioClip::segment(clip, start, end));
        self
    }

    /// Attach face assets.
    #[must_use]
    pub fn with_visuals(mut self, pictorial: impl Into<String>, textual: impl Into<String>) -> Self {
        self.visuals = VisualRefs {
            pictorial: Some(pictorial.into()),
            textual: Some(textual.into()),
        };
        self
    }
}

/// Ordered catalog of pairs.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardCatalog {
    entries: Vec<CatalogEntry>,
}

impl CardCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog of `count` asset-less entries named `pair-0..`.
    ///
    /// Handy for headless runs where only pairing matters.
    #[must_use]
    pub fn numbered(count: usize) -> Self {
        Self {
            entries: (0..count).map(|i| CatalogEntry::new(format!("pair-{i}"))).collect(),
        }
    }

    /// Append an entry (builder pattern).
    #[must_use]
    pub fn with_entry(mut self, entry: CatalogEntry) -> Self {
        self.entries.push(entry);
        self
    }

    /// Append an entry, returning its pair key.
    pub fn push(&mut self, entry: CatalogEntry) -> PairKey {
        let key = PairKey::new(self.entries.len() as u32);
        self.entries.push(entry);
        key
    }

    /// Get an entry by pair key.
    #[must_use]
    pub fn get(&self, key: PairKey) -> Option<&CatalogEntry> {
        self.entries.get(key.raw() as usize)
    }

    /// Build the identity for one face of a pair.
    #[must_use]
    pub fn identity(&self, key: PairKey, mode: DisplayMode) -> Option<CardIdentity> {
        let entry = self.get(key)?;
        Some(CardIdentity {
            pair_key: key,
            name: entry.name.clone(),
            display_mode: mode,
            audio: entry.audio.clone(),
            face: entry.visuals.face(mode).map(str::to_owned),
        })
    }

    /// Fail unless the catalog can supply `needed` pairs.
    pub fn ensure_pairs(&self, needed: usize) -> Result<(), ConfigError> {
        if self.entries.len() < needed {
            return Err(ConfigError::InsufficientCatalog {
                needed,
                available: self.entries.len(),
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    /// Parse a catalog from a JSON array of entries.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|source| ConfigError::Parse {
            what: "card catalog",
            source,
        })
    }

    /// Load a catalog from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }
}
