//! Board, category and clue models
//!
//! These are the client-side copies of the entities owned by the REST
//! backend. They are only ever built from backend responses; the client
//! never fabricates identifiers for persisted entities.

pub mod content;
pub mod normalize;

use std::{convert::Infallible, str::FromStr};

use serde::{Deserialize, Serialize};
use web_time::Duration;

pub use content::{ClueContent, ClueKind, ContentError};
pub use normalize::{BoardGrid, CategorySlot, ClueSlot, GridColumn};

/// Identifier assigned by the backend
///
/// The backend may emit either numeric or string identifiers. Strings that
/// parse as unsigned integers are normalized to [`Id::Number`] so that an id
/// taken from a route (`"42"`) compares equal to the one returned in a
/// response (`42`).
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(untagged, from = "RawId")]
pub enum Id {
    /// Numeric identifier
    #[display("{_0}")]
    Number(u64),
    /// Opaque string identifier
    #[display("{_0}")]
    #[from(ignore)]
    Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(u64),
    Text(String),
}

impl From<RawId> for Id {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Number(n) => Id::Number(n),
            RawId::Text(s) => Id::from(s),
        }
    }
}

impl From<String> for Id {
    fn from(s: String) -> Self {
        match s.parse::<u64>() {
            Ok(n) => Id::Number(n),
            Err(_) => Id::Text(s),
        }
    }
}

impl From<&str> for Id {
    fn from(s: &str) -> Self {
        Id::from(s.to_owned())
    }
}

impl FromStr for Id {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Id::from(s))
    }
}

/// A full trivia grid owned by a host
#[serde_with::serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    /// Backend identifier
    pub id: Id,
    /// Display title
    pub title: String,
    /// Time the players get for each clue
    #[serde(rename = "questionTimeLimit", alias = "timeLimit")]
    #[serde_as(as = "serde_with::DurationSeconds<u64>")]
    pub time_limit: Duration,
    /// Categories in backend order (not necessarily display order)
    #[serde(default)]
    pub categories: Vec<Category>,
    /// Creation timestamp as reported by the backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Board {
    /// Looks up a category by its identifier
    pub fn category(&self, id: &Id) -> Option<&Category> {
        self.categories.iter().find(|c| &c.id == id)
    }

    /// Looks up a clue by its category and clue identifiers
    pub fn clue(&self, category_id: &Id, clue_id: &Id) -> Option<&Clue> {
        self.category(category_id)?.clue(clue_id)
    }

    /// Whether the board has no categories at all
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// A column of clues on a board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Backend identifier
    pub id: Id,
    /// Display title
    #[serde(default)]
    pub title: String,
    /// Display column; `None` means unordered
    #[serde(default)]
    pub position: Option<i64>,
    /// Clues in backend order
    #[serde(default)]
    pub clues: Vec<Clue>,
}

impl Category {
    /// Looks up a clue by its identifier
    pub fn clue(&self, id: &Id) -> Option<&Clue> {
        self.clues.iter().find(|c| &c.id == id)
    }
}

/// A single question/answer cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawClue")]
pub struct Clue {
    /// Backend identifier
    pub id: Id,
    /// Point value
    pub value: u32,
    /// Row index into the value ladder
    pub position: Option<i64>,
    /// Question text shown to the players
    pub question: String,
    /// Answer text revealed by the host
    pub answer: String,
    /// Kind of content and its media URL, if any
    #[serde(flatten)]
    pub content: ClueContent,
}

impl Clue {
    /// A clue is filled once both its question and answer carry text
    pub fn is_filled(&self) -> bool {
        !self.question.trim().is_empty() && !self.answer.trim().is_empty()
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawClue {
    id: Id,
    value: u32,
    #[serde(default)]
    position: Option<i64>,
    #[serde(default)]
    question: String,
    #[serde(default)]
    answer: String,
    #[serde(default, rename = "type")]
    kind: ClueKind,
    #[serde(default)]
    media_url: Option<String>,
}

impl TryFrom<RawClue> for Clue {
    type Error = ContentError;

    fn try_from(raw: RawClue) -> Result<Self, Self::Error> {
        Ok(Clue {
            content: ClueContent::from_parts(raw.kind, raw.media_url)?,
            id: raw.id,
            value: raw.value,
            position: raw.position,
            question: raw.question,
            answer: raw.answer,
        })
    }
}

/// What an edit form is about to persist
///
/// Placeholder slots resolve to [`EditTarget::New`], real entities to
/// [`EditTarget::Existing`]. Only the latter carries a backend id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditTarget {
    /// Create a new entity at the given grid position
    New {
        /// Column (categories) or ladder row (clues)
        position: usize,
    },
    /// Update the entity with this backend identifier
    Existing(Id),
}
