//! Play view controller
//!
//! [`PlayView`] ties a board snapshot, a [`GameSession`] and a
//! [`MediaPlayer`] together. Time is driven from outside: the view hands
//! every countdown tick and playback segment end to its [`AlarmSink`], and
//! the owner of the sink feeds delivered alarms back through
//! [`PlayView::receive_alarm`]. Pending alarms are cancelled as soon as the
//! timer stops or the view goes away; each alarm also carries the epoch it
//! was scheduled in, so one that was already in flight is dropped.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use tracing::debug;
use web_time::Duration;

use crate::{
    board::{Board, BoardGrid, Id},
    constants::play::{PLAYBACK_SEGMENTS, TICK_INTERVAL_SECS},
    game::GameSession,
    media::MediaPlayer,
};

/// Epochs are unique across every view in the process.
static NEXT_EPOCH: AtomicU64 = AtomicU64::new(1);

fn next_epoch() -> u64 {
    NEXT_EPOCH.fetch_add(1, Ordering::Relaxed)
}

/// Delayed events scheduled by the play view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlarmMessage {
    /// One second of the countdown elapsed
    Tick {
        /// Countdown epoch the tick was scheduled in
        epoch: u64,
    },
    /// A playback segment reached its end
    StopSegment {
        /// Segment epoch the stop was scheduled in
        epoch: u64,
    },
}

/// The kinds of [`AlarmMessage`], for cancelling one kind at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, enum_map::Enum)]
pub enum AlarmKind {
    /// Countdown ticks
    Tick,
    /// Playback segment ends
    StopSegment,
}

impl AlarmMessage {
    /// Kind of this alarm
    pub fn kind(&self) -> AlarmKind {
        match self {
            Self::Tick { .. } => AlarmKind::Tick,
            Self::StopSegment { .. } => AlarmKind::StopSegment,
        }
    }
}

/// Where a play view sends the alarms it needs delivered later
pub trait AlarmSink {
    /// Delivers `alarm` after `delay`
    fn schedule(&mut self, alarm: AlarmMessage, delay: Duration);

    /// Drops every pending alarm of `kind`
    fn cancel(&mut self, kind: AlarmKind);

    /// Drops every pending alarm
    fn cancel_all(&mut self) {
        self.cancel(AlarmKind::Tick);
        self.cancel(AlarmKind::StopSegment);
    }
}

impl<T: AlarmSink + ?Sized> AlarmSink for &mut T {
    fn schedule(&mut self, alarm: AlarmMessage, delay: Duration) {
        (**self).schedule(alarm, delay);
    }

    fn cancel(&mut self, kind: AlarmKind) {
        (**self).cancel(kind);
    }

    fn cancel_all(&mut self) {
        (**self).cancel_all();
    }
}

/// Controller behind the play screen
#[derive(Debug)]
pub struct PlayView<M: MediaPlayer, S: AlarmSink> {
    board: Board,
    session: GameSession,
    player: M,
    alarms: S,
    tick_epoch: u64,
    segment_epoch: u64,
}

impl<M: MediaPlayer, S: AlarmSink> PlayView<M, S> {
    /// Mounts the view on `board`, starting a fresh session
    ///
    /// # Arguments
    ///
    /// * `board` - Board snapshot to play
    /// * `player` - Player for audio and video clues
    /// * `alarms` - Receives the countdown ticks and segment ends
    pub fn new(board: Board, player: M, alarms: S) -> Self {
        let mut session = GameSession::new();
        session.load_board(board.id.clone());
        Self {
            board,
            session,
            player,
            alarms,
            tick_epoch: next_epoch(),
            segment_epoch: next_epoch(),
        }
    }

    /// The board snapshot being played
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The normalised 6×5 grid of the current snapshot
    pub fn grid(&self) -> BoardGrid<'_> {
        BoardGrid::new(&self.board)
    }

    /// Session state
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// The media player
    pub fn player(&self) -> &M {
        &self.player
    }

    /// The alarm sink
    pub fn alarms(&self) -> &S {
        &self.alarms
    }

    /// Replaces the board snapshot
    ///
    /// A snapshot of a different board starts a new session; a snapshot of
    /// the same board keeps the answered clues and the open clue.
    pub fn refresh_board(&mut self, board: Board) {
        if board.id != self.board.id {
            debug!(from = %self.board.id, to = %board.id, "switching boards");
            self.stop_player();
            self.stop_alarms();
            self.session.load_board(board.id.clone());
        }
        self.board = board;
    }

    /// Opens a clue and schedules the first countdown tick
    ///
    /// # Returns
    ///
    /// `false` when the session ignored the selection.
    pub fn select_clue(&mut self, category_id: &Id, clue_id: &Id) -> bool {
        if !self.session.select_clue(&self.board, category_id, clue_id) {
            return false;
        }
        self.stop_alarms();
        if let Some(clue) = self.session.current_clue() {
            self.player.load(&clue.content);
        }
        if self.session.is_timer_running() {
            self.schedule_tick();
        }
        true
    }

    /// Handles a previously scheduled alarm
    ///
    /// # Returns
    ///
    /// `true` when the alarm changed anything, `false` when it was stale.
    pub fn receive_alarm(&mut self, alarm: &AlarmMessage) -> bool {
        match *alarm {
            AlarmMessage::Tick { epoch } if epoch == self.tick_epoch => {
                if !self.session.tick() {
                    return false;
                }
                if self.session.is_timer_running() {
                    self.schedule_tick();
                }
                true
            }
            AlarmMessage::StopSegment { epoch } if epoch == self.segment_epoch => {
                self.player.pause();
                self.player.seek(Duration::ZERO);
                true
            }
            _ => {
                debug!(?alarm, "dropping stale alarm");
                false
            }
        }
    }

    /// Reveals the answer and suspends the countdown
    pub fn reveal_answer(&mut self) -> bool {
        if self.session.reveal_answer() {
            self.tick_epoch = next_epoch();
            self.alarms.cancel(AlarmKind::Tick);
            true
        } else {
            false
        }
    }

    /// Plays the first `seconds` of the open clue's media
    ///
    /// Only available for audio and video clues while the answer is hidden,
    /// and only for the supported segment lengths. A new segment cancels
    /// the end of the previous one.
    ///
    /// # Arguments
    ///
    /// * `seconds` - Segment length, one of 1, 3, 5 or 10
    pub fn play_segment(&mut self, seconds: u64) -> bool {
        let playable = self
            .session
            .current_clue()
            .is_some_and(|clue| clue.content.is_playable());
        if !playable || self.session.is_answer_shown() || !PLAYBACK_SEGMENTS.contains(&seconds) {
            return false;
        }

        self.segment_epoch = next_epoch();
        self.alarms.cancel(AlarmKind::StopSegment);
        self.player.seek(Duration::ZERO);
        self.player.play();
        self.alarms.schedule(
            AlarmMessage::StopSegment {
                epoch: self.segment_epoch,
            },
            Duration::from_secs(seconds),
        );
        true
    }

    /// Leaves the clue screen, recording the clue as played
    ///
    /// The player and every pending alarm are stopped before the clue
    /// closes. Returns the closed clue's id.
    pub fn back_to_board(&mut self) -> Option<Id> {
        self.stop_player();
        self.stop_alarms();
        self.session.close_clue()
    }

    fn schedule_tick(&mut self) {
        self.alarms.schedule(
            AlarmMessage::Tick {
                epoch: self.tick_epoch,
            },
            Duration::from_secs(TICK_INTERVAL_SECS),
        );
    }

    fn stop_alarms(&mut self) {
        self.tick_epoch = next_epoch();
        self.segment_epoch = next_epoch();
        self.alarms.cancel_all();
    }

    fn stop_player(&mut self) {
        self.player.stop();
        self.player.seek(Duration::ZERO);
    }
}

impl<M: MediaPlayer, S: AlarmSink> Drop for PlayView<M, S> {
    fn drop(&mut self) {
        self.stop_player();
        self.alarms.cancel_all();
    }
}
