//! # Trivia Board Library
//!
//! This library provides the client-side logic for a Jeopardy-style trivia
//! board. It normalises boards fetched from the REST backend into a fixed
//! 6×5 grid, runs the play session state machine (clue selection, countdown,
//! answer reveal, played clues) and drives the editor's create/update flow
//! with validation and read-after-write refetching.

#![cfg_attr(all(coverage_nightly, test), feature(coverage_attribute))]
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::new_ret_no_self)]
#![allow(clippy::struct_field_names)]
#![allow(clippy::doc_markdown)]

pub mod api;
pub mod board;
pub mod config;
pub mod constants;
pub mod game;
pub mod media;
pub mod play;
pub mod scheduler;
pub mod store;

pub use api::{ApiError, Backend, HttpBackend};
pub use board::{Board, BoardGrid, Category, Clue, ClueContent, EditTarget, Id};
pub use config::ClientConfig;
pub use game::{GameSession, Phase};
pub use play::{AlarmKind, AlarmMessage, AlarmSink, PlayView};
pub use scheduler::AlarmScheduler;
pub use store::{BoardStore, StoreError};
