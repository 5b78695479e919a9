//! Request bodies for the board backend
//!
//! Every mutation the client can send lives here, validated with `garde`
//! before it leaves the process. None of these types can be built from a
//! placeholder slot: creating takes a grid position, updating takes a real
//! backend [`Id`].

use garde::Validate;
use serde::Serialize;
use serde_with::skip_serializing_none;
use web_time::Duration;

use crate::{
    board::{ClueContent, Id},
    constants::{
        board::{MAX_TIME_LIMIT, MIN_TIME_LIMIT},
        clue::{MAX_ANSWER_LENGTH, MAX_QUESTION_LENGTH, MIN_VALUE},
        grid::{LAST_COLUMN, LAST_ROW},
    },
};

/// Validation result type for custom rules
type ValidationResult = garde::Result;

/// Validates that a duration in whole seconds falls within specified bounds.
///
/// # Errors
///
/// Returns a `garde::Error` if the duration is outside `[MIN_SECONDS, MAX_SECONDS]`.
pub fn validate_duration<const MIN_SECONDS: u64, const MAX_SECONDS: u64>(
    val: &Duration,
    _ctx: &(),
) -> ValidationResult {
    if (MIN_SECONDS..=MAX_SECONDS).contains(&val.as_secs()) {
        Ok(())
    } else {
        Err(garde::Error::new(format!(
            "outside of bounds [{MIN_SECONDS},{MAX_SECONDS}]",
        )))
    }
}

fn validate_optional_duration<const MIN_SECONDS: u64, const MAX_SECONDS: u64>(
    val: &Option<Duration>,
    ctx: &(),
) -> ValidationResult {
    val.as_ref()
        .map_or(Ok(()), |d| validate_duration::<MIN_SECONDS, MAX_SECONDS>(d, ctx))
}

/// Rejects text made only of whitespace
fn not_blank(value: &str, _ctx: &()) -> ValidationResult {
    if value.trim().is_empty() {
        Err(garde::Error::new("must not be blank"))
    } else {
        Ok(())
    }
}

fn optional_not_blank(value: &Option<String>, ctx: &()) -> ValidationResult {
    value.as_deref().map_or(Ok(()), |v| not_blank(v, ctx))
}

/// Body of `POST /board`
#[serde_with::serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewBoard {
    /// Display title
    #[garde(custom(not_blank), length(chars, max = crate::constants::board::MAX_TITLE_LENGTH))]
    pub title: String,
    /// Time the players get for each clue
    #[garde(custom(validate_duration::<MIN_TIME_LIMIT, MAX_TIME_LIMIT>))]
    #[serde(rename = "questionTimeLimit")]
    #[serde_as(as = "serde_with::DurationSeconds<u64>")]
    pub time_limit: Duration,
}

impl NewBoard {
    /// A board with the given title and the default time limit
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            time_limit: Duration::from_secs(crate::constants::board::DEFAULT_TIME_LIMIT),
        }
    }
}

/// Body of `PATCH /board/{id}`; absent fields are left untouched
#[serde_with::serde_as]
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BoardPatch {
    /// New display title
    #[garde(
        custom(optional_not_blank),
        length(chars, max = crate::constants::board::MAX_TITLE_LENGTH)
    )]
    pub title: Option<String>,
    /// New time limit for each clue
    #[garde(custom(validate_optional_duration::<MIN_TIME_LIMIT, MAX_TIME_LIMIT>))]
    #[serde(rename = "questionTimeLimit")]
    #[serde_as(as = "Option<serde_with::DurationSeconds<u64>>")]
    pub time_limit: Option<Duration>,
}

impl BoardPatch {
    /// Whether the patch would change nothing
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.time_limit.is_none()
    }
}

/// Body of `POST /category`
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    /// Board the category belongs to
    #[garde(skip)]
    pub board_id: Id,
    /// Display title
    #[garde(custom(not_blank), length(chars, max = crate::constants::category::MAX_TITLE_LENGTH))]
    pub title: String,
    /// Display column
    #[garde(range(max = LAST_COLUMN))]
    pub position: usize,
}

/// Body of `PATCH /category/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CategoryUpdate {
    /// Board the category belongs to
    #[garde(skip)]
    pub board_id: Id,
    /// New display title
    #[garde(custom(not_blank), length(chars, max = crate::constants::category::MAX_TITLE_LENGTH))]
    pub title: String,
}

/// What the host typed into a clue form
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ClueForm {
    /// Point value
    #[garde(range(min = MIN_VALUE))]
    pub value: u32,
    /// Question text
    #[garde(custom(not_blank), length(chars, max = MAX_QUESTION_LENGTH))]
    pub question: String,
    /// Answer text
    #[garde(custom(not_blank), length(chars, max = MAX_ANSWER_LENGTH))]
    pub answer: String,
    /// Content kind and media URL
    #[garde(dive)]
    #[serde(flatten)]
    pub content: ClueContent,
}

impl ClueForm {
    /// A plain text clue form
    pub fn text(value: u32, question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            value,
            question: question.into(),
            answer: answer.into(),
            content: ClueContent::Text,
        }
    }
}

/// Body of `POST /clue`
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewClue {
    /// Category the clue belongs to
    #[garde(skip)]
    pub category_id: Id,
    /// Ladder row
    #[garde(range(max = LAST_ROW))]
    pub position: usize,
    /// Clue fields
    #[garde(dive)]
    #[serde(flatten)]
    pub form: ClueForm,
}

/// Body of `PATCH /clue/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ClueUpdate {
    /// Category the clue belongs to
    #[garde(skip)]
    pub category_id: Id,
    /// Clue fields
    #[garde(dive)]
    #[serde(flatten)]
    pub form: ClueForm,
}
