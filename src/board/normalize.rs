//! Dense, positionally addressed views of a board
//!
//! The backend stores categories and clues sparsely: a board may have fewer
//! than six categories, a category fewer than five clues, and positions may
//! be missing. Both the editor and the play view render a fixed grid, so the
//! functions here pad the sparse data with placeholders. They are pure and
//! can be re-run on every render.

use std::collections::HashSet;

use itertools::Itertools;

use super::{Board, Category, Clue, EditTarget, Id};
use crate::constants::grid::{CATEGORY_COUNT, VALUE_LADDER};

/// A column header slot: a real category or a placeholder
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CategorySlot<'a> {
    /// A category persisted by the backend
    Existing(&'a Category),
    /// A synthesized stand-in for a missing column
    Placeholder {
        /// Free position the placeholder would create its category at
        column: usize,
    },
}

impl<'a> CategorySlot<'a> {
    /// Backend identifier; `None` for placeholders
    pub fn id(&self) -> Option<&'a Id> {
        match self {
            Self::Existing(category) => Some(&category.id),
            Self::Placeholder { .. } => None,
        }
    }

    /// Display title; empty for placeholders
    pub fn title(&self) -> &'a str {
        match self {
            Self::Existing(category) => &category.title,
            Self::Placeholder { .. } => "",
        }
    }

    /// Clues in backend order; empty for placeholders
    pub fn clues(&self) -> &'a [Clue] {
        match self {
            Self::Existing(category) => &category.clues,
            Self::Placeholder { .. } => &[],
        }
    }

    /// Whether this slot was synthesized
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder { .. })
    }

    /// Key used to order the slots: the position, with absent meaning 0
    fn sort_key(&self) -> i64 {
        match self {
            Self::Existing(category) => category.position.unwrap_or(0),
            Self::Placeholder { column } => *column as i64,
        }
    }

    /// Stable render key; placeholders use the `placeholder-{column}` sentinel
    pub fn key(&self) -> String {
        match self {
            Self::Existing(category) => category.id.to_string(),
            Self::Placeholder { column } => format!("placeholder-{column}"),
        }
    }

    /// What saving this slot's edit form would do
    pub fn target(&self) -> EditTarget {
        match self {
            Self::Existing(category) => EditTarget::Existing(category.id.clone()),
            Self::Placeholder { column } => EditTarget::New { position: *column },
        }
    }
}

/// A clue cell slot: a real clue or a placeholder
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClueSlot<'a> {
    /// A clue persisted by the backend
    Existing(&'a Clue),
    /// A synthesized stand-in for a missing ladder row
    Placeholder {
        /// Ladder row the placeholder fills
        position: usize,
        /// Point value taken from the ladder
        value: u32,
    },
}

impl<'a> ClueSlot<'a> {
    /// Backend identifier; `None` for placeholders
    pub fn id(&self) -> Option<&'a Id> {
        match self {
            Self::Existing(clue) => Some(&clue.id),
            Self::Placeholder { .. } => None,
        }
    }

    /// The real clue behind this slot
    pub fn clue(&self) -> Option<&'a Clue> {
        match self {
            Self::Existing(clue) => Some(clue),
            Self::Placeholder { .. } => None,
        }
    }

    /// Point value displayed in the cell
    pub fn value(&self) -> u32 {
        match self {
            Self::Existing(clue) => clue.value,
            Self::Placeholder { value, .. } => *value,
        }
    }

    /// Question text; empty for placeholders
    pub fn question(&self) -> &'a str {
        match self {
            Self::Existing(clue) => &clue.question,
            Self::Placeholder { .. } => "",
        }
    }

    /// Answer text; empty for placeholders
    pub fn answer(&self) -> &'a str {
        match self {
            Self::Existing(clue) => &clue.answer,
            Self::Placeholder { .. } => "",
        }
    }

    /// Whether the cell holds a real clue with question and answer
    pub fn is_filled(&self) -> bool {
        self.clue().is_some_and(Clue::is_filled)
    }

    /// Whether this slot was synthesized
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder { .. })
    }

    /// Stable render key within a column
    pub fn key(&self, category_key: &str) -> String {
        match self {
            Self::Existing(clue) => clue.id.to_string(),
            Self::Placeholder { position, .. } => format!("placeholder-{category_key}-{position}"),
        }
    }

    /// What saving this slot's edit form would do
    pub fn target(&self) -> EditTarget {
        match self {
            Self::Existing(clue) => EditTarget::Existing(clue.id.clone()),
            Self::Placeholder { position, .. } => EditTarget::New {
                position: *position,
            },
        }
    }
}

/// Pads a board's categories to exactly `column_count` slots
///
/// The first `column_count` categories in array order are shown; categories
/// past that are not. Every missing slot becomes a placeholder for one of
/// the positions in `[0, column_count)` that no shown category holds, lowest
/// first, so saving a placeholder never reuses a taken position. The slots
/// are then stably sorted by position, an absent position counting as 0.
pub fn normalize_categories(board: &Board, column_count: usize) -> Vec<CategorySlot<'_>> {
    let shown = &board.categories[..board.categories.len().min(column_count)];
    let held = shown
        .iter()
        .map(|category| category.position.unwrap_or(0))
        .collect::<HashSet<_>>();
    let free = (0..column_count).filter(|column| !held.contains(&(*column as i64)));

    shown
        .iter()
        .map(CategorySlot::Existing)
        .chain(free.map(|column| CategorySlot::Placeholder { column }))
        .take(column_count)
        .sorted_by_key(CategorySlot::sort_key)
        .collect_vec()
}

/// Pads a category's clues to exactly one slot per ladder value
///
/// Row `i` holds the first clue whose position is exactly `i`; anything else
/// (missing rows, unpositioned or out-of-range clues) yields a placeholder
/// carrying `ladder[i]`.
pub fn normalize_clues<'a>(category: &'a Category, ladder: &[u32]) -> Vec<ClueSlot<'a>> {
    fill_clues(&category.clues, ladder)
}

/// Legacy slot matching: exact position first, then the first clue with the
/// ladder value
///
/// Earlier boards stored clues without positions and were laid out by value.
/// The two strategies disagree when positions are sparse or duplicated.
#[deprecated(note = "clues are matched by exact position; use `normalize_clues`")]
pub fn normalize_clues_by_value<'a>(category: &'a Category, ladder: &[u32]) -> Vec<ClueSlot<'a>> {
    ladder
        .iter()
        .enumerate()
        .map(|(row, &value)| {
            category
                .clues
                .iter()
                .find(|c| c.position == Some(row as i64))
                .or_else(|| category.clues.iter().find(|c| c.value == value))
                .map_or(ClueSlot::Placeholder { position: row, value }, ClueSlot::Existing)
        })
        .collect_vec()
}

fn fill_clues<'a>(clues: &'a [Clue], ladder: &[u32]) -> Vec<ClueSlot<'a>> {
    ladder
        .iter()
        .enumerate()
        .map(|(row, &value)| {
            clues
                .iter()
                .find(|c| c.position == Some(row as i64))
                .map_or(ClueSlot::Placeholder { position: row, value }, ClueSlot::Existing)
        })
        .collect_vec()
}

/// One rendered column: its header slot and its clue slots
#[derive(Debug, Clone, PartialEq)]
pub struct GridColumn<'a> {
    /// Header slot
    pub category: CategorySlot<'a>,
    /// One slot per ladder row
    pub clues: Vec<ClueSlot<'a>>,
}

impl GridColumn<'_> {
    /// Clue cells can only be edited once their category exists
    pub fn clues_editable(&self) -> bool {
        !self.category.is_placeholder()
    }
}

/// The full render-ready grid of a board
///
/// Always [`CATEGORY_COUNT`] columns of [`VALUE_LADDER`]`.len()` rows each.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardGrid<'a> {
    columns: Vec<GridColumn<'a>>,
}

impl<'a> BoardGrid<'a> {
    /// Builds the standard 6 × 5 grid for a board
    pub fn new(board: &'a Board) -> Self {
        let columns = normalize_categories(board, CATEGORY_COUNT)
            .into_iter()
            .map(|category| GridColumn {
                clues: fill_clues(category.clues(), &VALUE_LADDER),
                category,
            })
            .collect_vec();
        Self { columns }
    }

    /// Columns in display order
    pub fn columns(&self) -> &[GridColumn<'a>] {
        &self.columns
    }

    /// The clue slot at a display column and ladder row
    pub fn slot(&self, column: usize, row: usize) -> Option<&ClueSlot<'a>> {
        self.columns.get(column)?.clues.get(row)
    }

    /// Number of cells holding a filled clue
    pub fn filled_count(&self) -> usize {
        self.columns
            .iter()
            .flat_map(|c| &c.clues)
            .filter(|slot| slot.is_filled())
            .count()
    }
}
