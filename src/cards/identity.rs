//! Card identities - immutable per-card data.
//!
//! A `CardIdentity` says which pair a card belongs to and which of the two
//! faces it shows. Two identities match when their pair keys are equal;
//! the display mode only changes what the player sees.

use serde::{Deserialize, Serialize};

/// Identity shared by the two cards that must be matched together.
///
/// The key is the index of the pair's entry in the card catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PairKey(pub u32);

impl PairKey {
    /// Create a new pair key.
    #[must_use]
    pub const fn new(key: u32) -> Self {
        Self(key)
    }

    /// Get the raw key value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for PairKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Pair({})", self.0)
    }
}

/// Which of the two faces of a pair a card shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DisplayMode {
    /// Picture-first face. Dealt to the first card of each pair.
    Pictorial,
    /// Text-first face. Both cards of a matched pair settle on this face.
    Textual,
}

impl DisplayMode {
    /// Both modes, in the order the board generator assigns them.
    pub const BOTH: [DisplayMode; 2] = [DisplayMode::Pictorial, DisplayMode::Textual];

    /// The face matched cards switch to while retiring.
    #[must_use]
    pub const fn canonical() -> Self {
        DisplayMode::Textual
    }
}

/// Opaque reference to an audio asset.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClipId(pub String);

impl ClipId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ClipId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A slice of a longer clip, in seconds.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClipSegment {
    pub start: f32,
    pub end: f32,
}

/// Pronunciation audio for a pair.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AudioClip {
    /// The clip to play.
    pub clip: ClipId,

    /// Play only part of the clip. `None` plays it whole.
    #[serde(default)]
    pub segment: Option<ClipSegment>,
}

impl AudioClip {
    /// A whole clip.
    pub fn whole(clip: impl Into<String>) -> Self {
        Self {
            clip: ClipId::new(clip),
            segment: None,
        }
    }

    /// Part of a clip.
    pub fn segment(clip: impl Into<String>, start: f32, end: f32) -> Self {
        Self {
            clip: ClipId::new(clip),
            segment: Some(ClipSegment { start, end }),
        }
    }
}

/// Immutable identity of one card on the board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardIdentity {
    /// The pair this card belongs to.
    pub pair_key: PairKey,

    /// Display name of the pair (for logs and debugging).
    pub name: String,

    /// Which face this card shows.
    pub display_mode: DisplayMode,

    /// Pronunciation clip, if the catalog provides one.
    pub audio: Option<AudioClip>,

    /// Visual asset for this card's face, if the catalog provides one.
    pub face: Option<String>,
}

impl CardIdentity {
    /// Check whether two identities belong to the same pair.
    #[must_use]
    pub fn same_pair(&self, other: &CardIdentity) -> bool {
        self.pair_key == other.pair_key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(key: u32, mode: DisplayMode) -> CardIdentity {
        CardIdentity {
            pair_key: PairKey::new(key),
            name: format!("pair-{key}"),
            display_mode: mode,
            audio: None,
            face: None,
        }
    }

    #[test]
    fn test_pair_key() {
        let key = PairKey::new(4);
        assert_eq!(key.raw(), 4);
        assert_eq!(format!("{}", key), "Pair(4)");
    }

    #[test]
    fn test_same_pair_ignores_display_mode() {
        let a = identity(1, DisplayMode::Pictorial);
        let b = identity(1, DisplayMode::Textual);
        let c = identity(2, DisplayMode::Pictorial);

        assert!(a.same_pair(&b));
        assert!(!a.same_pair(&c));
    }

    #[test]
    fn test_canonical_is_second_dealt_face() {
        assert_eq!(DisplayMode::canonical(), DisplayMode::BOTH[1]);
        assert_ne!(DisplayMode::canonical(), DisplayMode::BOTH[0]);
    }

    #[test]
    fn test_audio_clip_constructors() {
        let whole = AudioClip::whole("ma");
        assert_eq!(whole.clip.as_str(), "ma");
        assert!(whole.segment.is_none());

        let part = AudioClip::segment("syllables", 0.5, 1.25);
        assert_eq!(part.segment, Some(ClipSegment { start: 0.5, end: 1.25 }));
    }
}
