//! Game session state machine
//!
//! This module tracks what the play view is showing: which board is being
//! played, the single clue that is currently open, whether its answer has
//! been revealed, the countdown, and which clues have already been played.
//! Every transition is a local state update; invalid requests are ignored
//! and reported through the return value rather than as errors.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    board::{Board, ClueContent, Id},
    constants::play::LOW_TIME_SECS,
};

/// Phase of a play session
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// No board has been loaded
    #[default]
    Idle,
    /// A board is loaded and no clue is open
    BoardLoaded,
    /// A clue is open with its answer hidden; the timer is running or expired
    CluePresented,
    /// A clue is open with its answer shown; the timer is stopped
    AnswerRevealed,
}

/// The clue currently being presented
///
/// Question, answer and value are copied out of the board when the clue is
/// selected, so a later refresh of the board does not change what is shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenClue {
    /// Board the clue was selected from
    pub board_id: Id,
    /// Category the clue belongs to
    pub category_id: Id,
    /// Identifier of the clue
    pub clue_id: Id,
    /// Point value
    pub value: u32,
    /// Question text
    pub question: String,
    /// Answer text
    pub answer: String,
    /// Content kind and media
    pub content: ClueContent,
}

/// Client-side state of one play session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSession {
    /// Board being played
    board_id: Option<Id>,
    /// Current phase
    phase: Phase,
    /// At most one open clue
    current_clue: Option<OpenClue>,
    /// Whether the answer of the open clue is visible
    show_answer: bool,
    /// Seconds left on the countdown
    time_remaining: u64,
    /// Whether the countdown is ticking
    timer_running: bool,
    /// Clues already played on this board
    answered: HashSet<Id>,
}

impl GameSession {
    /// A session with no board loaded
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Board being played, if any
    pub fn board_id(&self) -> Option<&Id> {
        self.board_id.as_ref()
    }

    /// The open clue, if any
    pub fn current_clue(&self) -> Option<&OpenClue> {
        self.current_clue.as_ref()
    }

    /// Whether the open clue's answer is visible
    pub fn is_answer_shown(&self) -> bool {
        self.show_answer
    }

    /// Seconds left on the countdown
    pub fn time_remaining(&self) -> u64 {
        self.time_remaining
    }

    /// Whether the countdown is ticking; the tick source should only run
    /// while this is `true`
    pub fn is_timer_running(&self) -> bool {
        self.timer_running
    }

    /// Whether the countdown ran out before the answer was revealed
    pub fn is_timer_expired(&self) -> bool {
        self.phase == Phase::CluePresented && self.time_remaining == 0
    }

    /// Whether the presented clue's countdown is close to running out
    ///
    /// Always `false` once the answer is shown.
    pub fn is_time_low(&self) -> bool {
        self.phase == Phase::CluePresented && self.time_remaining <= LOW_TIME_SECS
    }

    /// Clues already played on the current board
    pub fn answered(&self) -> &HashSet<Id> {
        &self.answered
    }

    /// Whether a clue has already been played on the current board
    pub fn is_answered(&self, clue_id: &Id) -> bool {
        self.answered.contains(clue_id)
    }

    /// Moves from `before` to `after` if the session is in `before`
    fn change_phase(&mut self, before: Phase, after: Phase) -> bool {
        if self.phase == before {
            self.phase = after;
            true
        } else {
            false
        }
    }

    /// Starts playing `board_id`
    ///
    /// Always resets: the answered set and any open clue are cleared, even
    /// when the same board is loaded again.
    pub fn load_board(&mut self, board_id: Id) {
        debug!(board = %board_id, "loading board into game session");
        *self = Self {
            board_id: Some(board_id),
            phase: Phase::BoardLoaded,
            ..Self::default()
        };
    }

    /// Opens a clue and starts the countdown from the board's time limit
    ///
    /// Ignored (returns `false`) when a clue is already open, when `board` is
    /// not the loaded board, when the clue does not exist or when it has
    /// already been played.
    pub fn select_clue(&mut self, board: &Board, category_id: &Id, clue_id: &Id) -> bool {
        if self.phase != Phase::BoardLoaded {
            debug!(clue = %clue_id, phase = ?self.phase, "ignoring clue selection");
            return false;
        }
        if self.board_id.as_ref() != Some(&board.id) || self.is_answered(clue_id) {
            return false;
        }
        let Some(clue) = board.clue(category_id, clue_id) else {
            return false;
        };

        self.current_clue = Some(OpenClue {
            board_id: board.id.clone(),
            category_id: category_id.clone(),
            clue_id: clue_id.clone(),
            value: clue.value,
            question: clue.question.clone(),
            answer: clue.answer.clone(),
            content: clue.content.clone(),
        });
        self.phase = Phase::CluePresented;
        self.show_answer = false;
        self.time_remaining = board.time_limit.as_secs();
        self.timer_running = self.time_remaining > 0;
        debug!(clue = %clue_id, seconds = self.time_remaining, "clue opened");
        true
    }

    /// Advances the countdown by one second
    ///
    /// Only has an effect while a clue is presented and the timer runs. The
    /// countdown never goes below zero; reaching zero stops the timer but
    /// leaves the clue presented until the host reveals the answer.
    pub fn tick(&mut self) -> bool {
        if self.phase != Phase::CluePresented || !self.timer_running {
            return false;
        }
        self.time_remaining = self.time_remaining.saturating_sub(1);
        if self.time_remaining == 0 {
            self.timer_running = false;
            debug!("countdown expired");
        }
        true
    }

    /// Shows the open clue's answer and stops the timer
    ///
    /// Returns `false` when there is no presented clue, including when the
    /// answer is already shown.
    pub fn reveal_answer(&mut self) -> bool {
        if self.change_phase(Phase::CluePresented, Phase::AnswerRevealed) {
            self.show_answer = true;
            self.timer_running = false;
            true
        } else {
            false
        }
    }

    /// Closes the open clue and records it as played
    ///
    /// Normally called after the answer was revealed, but closing a clue
    /// that is still presented is allowed. Returns the closed clue's id, or
    /// `None` when no clue was open.
    pub fn close_clue(&mut self) -> Option<Id> {
        let clue = self.current_clue.take()?;
        self.answered.insert(clue.clue_id.clone());
        self.phase = Phase::BoardLoaded;
        self.show_answer = false;
        self.timer_running = false;
        self.time_remaining = 0;
        debug!(clue = %clue.clue_id, answered = self.answered.len(), "clue closed");
        Some(clue.clue_id)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::board::{Category, Clue};
    use web_time::Duration;

    fn create_test_board(id: u64, time_limit: u64) -> Board {
        Board {
            id: Id::Number(id),
            title: "Capitals".to_string(),
            time_limit: Duration::from_secs(time_limit),
            categories: vec![Category {
                id: Id::from("cat1"),
                title: "Europe".to_string(),
                position: Some(0),
                clues: vec![
                    Clue {
                        id: Id::from("clueA"),
                        value: 200,
                        position: Some(0),
                        question: "Capital of France".to_string(),
                        answer: "Paris".to_string(),
                        content: ClueContent::Text,
                    },
                    Clue {
                        id: Id::from("clueB"),
                        value: 400,
                        position: Some(1),
                        question: "Capital of Spain".to_string(),
                        answer: "Madrid".to_string(),
                        content: ClueContent::Video {
                            url: "https://youtu.be/abc".to_string(),
                        },
                    },
                ],
            }],
            created_at: None,
        }
    }

    fn loaded_session(board: &Board) -> GameSession {
        let mut session = GameSession::new();
        session.load_board(board.id.clone());
        session
    }

    #[test]
    fn test_new_session_is_idle() {
        let session = GameSession::new();
        assert_eq!(session.phase(), Phase::Idle);
        assert!(session.board_id().is_none());
        assert!(session.current_clue().is_none());
    }

    #[test]
    fn test_select_requires_loaded_board() {
        let board = create_test_board(1, 30);
        let mut session = GameSession::new();

        assert!(!session.select_clue(&board, &Id::from("cat1"), &Id::from("clueA")));
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn test_full_clue_scenario() {
        let board = create_test_board(1, 30);
        let mut session = loaded_session(&board);

        assert!(session.select_clue(&board, &Id::from("cat1"), &Id::from("clueA")));
        assert_eq!(session.phase(), Phase::CluePresented);
        assert_eq!(session.time_remaining(), 30);
        assert!(!session.is_time_low());
        assert!(!session.is_answer_shown());
        assert!(session.is_timer_running());

        for _ in 0..3 {
            assert!(session.tick());
        }
        assert_eq!(session.time_remaining(), 27);

        assert!(session.reveal_answer());
        assert!(session.is_answer_shown());
        assert!(!session.is_timer_running());
        assert_eq!(session.phase(), Phase::AnswerRevealed);

        assert!(!session.tick());
        assert_eq!(session.time_remaining(), 27);

        assert_eq!(session.close_clue(), Some(Id::from("clueA")));
        assert_eq!(session.answered().len(), 1);
        assert!(session.is_answered(&Id::from("clueA")));
        assert!(session.current_clue().is_none());
        assert_eq!(session.phase(), Phase::BoardLoaded);
    }

    #[test]
    fn test_open_clue_is_denormalized() {
        let board = create_test_board(1, 30);
        let mut session = loaded_session(&board);

        session.select_clue(&board, &Id::from("cat1"), &Id::from("clueB"));
        let open = session.current_clue().unwrap();

        assert_eq!(open.board_id, Id::Number(1));
        assert_eq!(open.category_id, Id::from("cat1"));
        assert_eq!(open.value, 400);
        assert_eq!(open.question, "Capital of Spain");
        assert_eq!(open.answer, "Madrid");
        assert_eq!(open.content.media_url(), Some("https://youtu.be/abc"));
    }

    #[test]
    fn test_second_select_while_open_is_noop() {
        let board = create_test_board(1, 30);
        let mut session = loaded_session(&board);

        assert!(session.select_clue(&board, &Id::from("cat1"), &Id::from("clueA")));
        session.tick();
        let before = session.clone();

        assert!(!session.select_clue(&board, &Id::from("cat1"), &Id::from("clueB")));
        assert_eq!(session, before);
        assert_eq!(session.current_clue().unwrap().clue_id, Id::from("clueA"));
    }

    #[test]
    fn test_select_while_revealed_is_noop() {
        let board = create_test_board(1, 30);
        let mut session = loaded_session(&board);

        session.select_clue(&board, &Id::from("cat1"), &Id::from("clueA"));
        session.reveal_answer();

        assert!(!session.select_clue(&board, &Id::from("cat1"), &Id::from("clueB")));
        assert_eq!(session.current_clue().unwrap().clue_id, Id::from("clueA"));
    }

    #[test]
    fn test_select_answered_clue_is_noop() {
        let board = create_test_board(1, 30);
        let mut session = loaded_session(&board);

        session.select_clue(&board, &Id::from("cat1"), &Id::from("clueA"));
        session.reveal_answer();
        session.close_clue();

        assert!(!session.select_clue(&board, &Id::from("cat1"), &Id::from("clueA")));
        assert!(session.current_clue().is_none());
        assert_eq!(session.phase(), Phase::BoardLoaded);
    }

    #[test]
    fn test_select_unknown_clue_or_other_board_is_noop() {
        let board = create_test_board(1, 30);
        let other = create_test_board(2, 30);
        let mut session = loaded_session(&board);

        assert!(!session.select_clue(&board, &Id::from("cat1"), &Id::from("missing")));
        assert!(!session.select_clue(&board, &Id::from("nope"), &Id::from("clueA")));
        assert!(!session.select_clue(&other, &Id::from("cat1"), &Id::from("clueA")));
        assert!(session.current_clue().is_none());
    }

    #[test]
    fn test_tick_floors_at_zero() {
        let board = create_test_board(1, 2);
        let mut session = loaded_session(&board);
        session.select_clue(&board, &Id::from("cat1"), &Id::from("clueA"));

        assert!(session.is_time_low());
        assert!(session.tick());
        assert!(session.tick());
        assert_eq!(session.time_remaining(), 0);
        assert!(!session.is_timer_running());
        assert!(session.is_timer_expired());
        assert_eq!(session.phase(), Phase::CluePresented);

        assert!(!session.tick());
        assert_eq!(session.time_remaining(), 0);

        assert!(session.reveal_answer());
        assert!(!session.is_timer_expired());
        assert!(!session.is_time_low());
    }

    #[test]
    fn test_time_low_clears_on_reveal() {
        let board = create_test_board(1, 10);
        let mut session = loaded_session(&board);
        session.select_clue(&board, &Id::from("cat1"), &Id::from("clueA"));
        for _ in 0..7 {
            session.tick();
        }
        assert_eq!(session.time_remaining(), 3);
        assert!(session.is_time_low());

        session.reveal_answer();
        assert_eq!(session.time_remaining(), 3);
        assert!(!session.is_time_low());

        session.close_clue();
        assert!(!session.is_time_low());
    }

    #[test]
    fn test_tick_without_open_clue_is_noop() {
        let board = create_test_board(1, 30);
        let mut idle = GameSession::new();
        let mut loaded = loaded_session(&board);

        assert!(!idle.tick());
        assert!(!loaded.tick());
        assert_eq!(idle.time_remaining(), 0);
        assert_eq!(loaded.time_remaining(), 0);
    }

    #[test]
    fn test_zero_time_limit_starts_expired() {
        let board = create_test_board(1, 0);
        let mut session = loaded_session(&board);

        assert!(session.select_clue(&board, &Id::from("cat1"), &Id::from("clueA")));
        assert!(!session.is_timer_running());
        assert!(session.is_timer_expired());
    }

    #[test]
    fn test_reveal_is_idempotent() {
        let board = create_test_board(1, 30);
        let mut session = loaded_session(&board);

        assert!(!session.reveal_answer());

        session.select_clue(&board, &Id::from("cat1"), &Id::from("clueA"));
        assert!(session.reveal_answer());
        let after_first = session.clone();
        assert!(!session.reveal_answer());
        assert_eq!(session, after_first);
    }

    #[test]
    fn test_close_twice_records_once() {
        let board = create_test_board(1, 30);
        let mut session = loaded_session(&board);
        session.select_clue(&board, &Id::from("cat1"), &Id::from("clueA"));
        session.reveal_answer();

        assert_eq!(session.close_clue(), Some(Id::from("clueA")));
        assert_eq!(session.close_clue(), None);
        assert_eq!(session.answered().len(), 1);
    }

    #[test]
    fn test_close_before_reveal_is_tolerated() {
        let board = create_test_board(1, 30);
        let mut session = loaded_session(&board);
        session.select_clue(&board, &Id::from("cat1"), &Id::from("clueB"));
        session.tick();

        assert_eq!(session.close_clue(), Some(Id::from("clueB")));
        assert!(!session.is_timer_running());
        assert_eq!(session.time_remaining(), 0);
        assert!(!session.is_answer_shown());
        assert!(session.is_answered(&Id::from("clueB")));
    }

    #[test]
    fn test_load_board_resets_answered() {
        let board = create_test_board(17, 30);
        let mut session = loaded_session(&board);
        session.select_clue(&board, &Id::from("cat1"), &Id::from("clueA"));
        session.close_clue();
        session.select_clue(&board, &Id::from("cat1"), &Id::from("clueB"));

        session.load_board(Id::from("42"));

        assert_eq!(session.board_id(), Some(&Id::Number(42)));
        assert!(session.answered().is_empty());
        assert!(session.current_clue().is_none());
        assert_eq!(session.phase(), Phase::BoardLoaded);
    }

    #[test]
    fn test_session_serializes() {
        let board = create_test_board(1, 30);
        let mut session = loaded_session(&board);
        session.select_clue(&board, &Id::from("cat1"), &Id::from("clueA"));

        let json = serde_json::to_string(&session).unwrap();
        let restored: GameSession = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, session);
    }
}
