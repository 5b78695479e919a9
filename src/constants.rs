//! Configuration constants for the trivia board system
//!
//! This module contains the grid dimensions, validation limits and timing
//! values used throughout the crate so that the editor, the play view and
//! the request payloads agree on the same boundaries.

/// Board grid dimensions
pub mod grid {
    /// Number of category columns rendered for every board
    pub const CATEGORY_COUNT: usize = 6;
    /// Point values of the clue ladder, indexed by clue position
    pub const VALUE_LADDER: [u32; 5] = [200, 400, 600, 800, 1000];
    /// Number of clue rows rendered for every category
    pub const CLUE_COUNT: usize = VALUE_LADDER.len();
    /// Highest valid category position
    pub const LAST_COLUMN: usize = CATEGORY_COUNT - 1;
    /// Highest valid clue position
    pub const LAST_ROW: usize = CLUE_COUNT - 1;
}

/// Board configuration constants
pub mod board {
    /// Maximum length of a board title in characters
    pub const MAX_TITLE_LENGTH: usize = 200;
    /// Minimum per-question time limit in seconds
    pub const MIN_TIME_LIMIT: u64 = 5;
    /// Maximum per-question time limit in seconds
    pub const MAX_TIME_LIMIT: u64 = 300;
    /// Time limit suggested for a freshly created board, in seconds
    pub const DEFAULT_TIME_LIMIT: u64 = 30;
}

/// Category configuration constants
pub mod category {
    /// Maximum length of a category title in characters
    pub const MAX_TITLE_LENGTH: usize = 200;
}

/// Clue configuration constants
pub mod clue {
    /// Minimum point value of a clue
    pub const MIN_VALUE: u32 = 1;
    /// Maximum length of a clue question in characters
    pub const MAX_QUESTION_LENGTH: usize = 1000;
    /// Maximum length of a clue answer in characters
    pub const MAX_ANSWER_LENGTH: usize = 500;
    /// Maximum length of a media URL
    pub const MAX_MEDIA_URL_LENGTH: usize = 2048;
}

/// Play view timing constants
pub mod play {
    /// Interval between two countdown ticks, in seconds
    pub const TICK_INTERVAL_SECS: u64 = 1;
    /// Media segment lengths (seconds) the host may play before revealing
    pub const PLAYBACK_SEGMENTS: [u64; 4] = [1, 3, 5, 10];
    /// Remaining seconds at or below which the countdown is shown as urgent
    pub const LOW_TIME_SECS: u64 = 5;
}

/// Backend client constants
pub mod client {
    /// Environment variable holding the backend base URL
    pub const API_URL_ENV: &str = "TRIVIA_API_URL";
    /// Base URL used when the environment does not provide one
    pub const DEFAULT_API_URL: &str = "http://localhost:3001/api";
    /// Timeout applied to every backend request, in seconds
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;
}
