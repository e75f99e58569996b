//! Starter record and related structures.
//!
//! A starter is the vertex of the lineage graph. Each starter has:
//! - A word-sequence identifier (e.g. `["amber", "crust", "lemon"]`)
//! - An optional display name
//! - A starter type and geographic origin
//! - A flag marking it as the focal node of the requested tree

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Separator used to join identifier words into a key.
pub const KEY_SEPARATOR: &str = "-";

/// Number of words in a generated identifier.
const SLUG_WORDS: usize = 3;

/// Length of each generated identifier word.
const SLUG_WORD_LEN: usize = 5;

/// Word-sequence identifier of a starter.
///
/// Edges reference starters by the joined form returned by [`StarterId::key`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StarterId(pub Vec<String>);

impl StarterId {
    /// Create an identifier from its words.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(words.into_iter().map(Into::into).collect())
    }

    /// The words of this identifier.
    #[inline]
    pub fn words(&self) -> &[String] {
        &self.0
    }

    /// Joined key form, as used by edges.
    pub fn key(&self) -> String {
        self.0.join(KEY_SEPARATOR)
    }

    /// Parse a URL slug such as `"amber-crust-lemon"` or `"AMBERCRUSTLEMON"`.
    ///
    /// Case is folded and dashes are dropped; the remaining text must be
    /// exactly fifteen characters, split into three five-character words.
    pub fn parse_slug(slug: &str) -> Option<Self> {
        let chars: Vec<char> = slug
            .to_lowercase()
            .chars()
            .filter(|&c| c != '-')
            .collect();

        if chars.len() != SLUG_WORDS * SLUG_WORD_LEN {
            return None;
        }

        let words = chars
            .chunks(SLUG_WORD_LEN)
            .map(|word| word.iter().collect())
            .collect();
        Some(Self(words))
    }
}

impl fmt::Display for StarterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

impl From<Vec<String>> for StarterId {
    #[inline]
    fn from(words: Vec<String>) -> Self {
        Self(words)
    }
}

/// Kind of fermentation culture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StarterType {
    #[default]
    Sourdough,
    FriendshipBread,
    KefirMilk,
    KefirWater,
    Kombucha,
    GingerBug,
    Jun,
    /// Anything else, including type strings this build does not know.
    #[serde(other)]
    Other,
}

impl StarterType {
    /// All types, in the order they are offered to users.
    pub const ALL: [StarterType; 8] = [
        StarterType::Sourdough,
        StarterType::FriendshipBread,
        StarterType::KefirMilk,
        StarterType::KefirWater,
        StarterType::Kombucha,
        StarterType::GingerBug,
        StarterType::Jun,
        StarterType::Other,
    ];

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            StarterType::Sourdough => "Sourdough",
            StarterType::FriendshipBread => "Friendship Bread",
            StarterType::KefirMilk => "Kefir (Milk)",
            StarterType::KefirWater => "Kefir (Water)",
            StarterType::Kombucha => "Kombucha",
            StarterType::GingerBug => "Ginger Bug",
            StarterType::Jun => "Jun",
            StarterType::Other => "Other",
        }
    }
}

/// Geographic origin of a starter.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "RawLocation")]
pub struct GeoPoint {
    pub lng: f64,
    pub lat: f64,
}

impl GeoPoint {
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }
}

/// GeoJSON-style point as sent by the API: `{ "type": "Point", "coordinates": [lng, lat] }`.
#[derive(Deserialize)]
struct RawLocation {
    coordinates: Vec<f64>,
}

impl TryFrom<RawLocation> for GeoPoint {
    type Error = Error;

    fn try_from(raw: RawLocation) -> Result<Self, Self::Error> {
        match raw.coordinates.as_slice() {
            [lng, lat, ..] => Ok(GeoPoint::new(*lng, *lat)),
            other => Err(Error::InvalidLocation { len: other.len() }),
        }
    }
}

/// A starter record as returned by the tree endpoint.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct StarterNode {
    #[serde(rename = "words")]
    pub id: StarterId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub starter_type: StarterType,
    #[serde(default)]
    pub type_other: Option<String>,
    #[serde(default)]
    pub location: GeoPoint,
    /// Set by the API on the starter the tree was requested for.
    #[serde(default)]
    pub is_target: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl StarterNode {
    /// Create a bare node with the given identifier words.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: StarterId::new(words),
            ..Default::default()
        }
    }

    /// Joined identifier key.
    #[inline]
    pub fn key(&self) -> String {
        self.id.key()
    }

    /// Label shown under the node: the name, or the 2nd and 3rd id words.
    pub fn display_label(&self) -> String {
        if let Some(name) = self.name.as_deref().filter(|n| !n.trim().is_empty()) {
            return name.to_string();
        }
        let words = self.id.words();
        if words.len() < 2 {
            return self.key();
        }
        words[1..words.len().min(3)].join(KEY_SEPARATOR)
    }

    /// Type label, preferring the free-text description for `Other`.
    pub fn type_label(&self) -> String {
        match (self.starter_type, self.type_other.as_deref()) {
            (StarterType::Other, Some(text)) if !text.trim().is_empty() => text.to_string(),
            (kind, _) => kind.label().to_string(),
        }
    }
}
