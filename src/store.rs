//! Client-side board store
//!
//! [`BoardStore`] is the only place that talks to the [`Backend`]. Every
//! payload is validated before a request is sent, and every mutation is
//! followed by a refetch of the affected data instead of merging the
//! backend's echo into the cache, so readers always observe what the backend
//! actually stored.

use garde::Validate;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    api::{
        ApiError, Backend, BoardPatch, CategoryUpdate, ClueForm, ClueUpdate, NewBoard,
        NewCategory, NewClue,
    },
    board::{Board, EditTarget, Id},
};

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Failures reported by the store
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend request failed.
    #[error(transparent)]
    Api(#[from] ApiError),
    /// The requested board does not exist.
    #[error("board {id} was not found")]
    NotFound {
        /// Requested board
        id: Id,
    },
    /// The board exists but has no categories to play.
    #[error("board {id} has no categories")]
    EmptyBoard {
        /// Requested board
        id: Id,
    },
    /// A payload failed validation; nothing was sent.
    #[error("invalid input: {0}")]
    Invalid(#[from] garde::Report),
}

impl StoreError {
    /// Short message suitable for showing inline next to a back action
    pub fn message(&self) -> String {
        match self {
            Self::Api(err) => err.message(),
            other => other.to_string(),
        }
    }
}

/// Cached board list and current board, plus the read-after-write
/// mutation flow
///
/// Both caches are only ever filled from backend responses.
#[derive(Debug)]
pub struct BoardStore<B: Backend> {
    backend: B,
    boards: Vec<Board>,
    current: Option<Board>,
}

impl<B: Backend> BoardStore<B> {
    /// A store with an empty cache
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            boards: Vec::new(),
            current: None,
        }
    }

    /// The backend this store talks to
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Board list as of the last refresh
    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    /// The board fetched most recently, as of that fetch
    pub fn current(&self) -> Option<&Board> {
        self.current.as_ref()
    }

    /// Caches a freshly fetched board as current and in the list
    fn remember(&mut self, board: Board) -> Board {
        if let Some(listed) = self.boards.iter_mut().find(|b| b.id == board.id) {
            listed.clone_from(&board);
        }
        self.current = Some(board.clone());
        board
    }

    /// Refetches the board list
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Api`] when the request fails; the cached list
    /// is kept in that case.
    pub async fn refresh_boards(&mut self) -> StoreResult<&[Board]> {
        self.boards = self.backend.list_boards().await?;
        debug!(count = self.boards.len(), "refreshed board list");
        Ok(&self.boards)
    }

    /// Fetches one board with its categories and clues and makes it current
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when the backend does not know `id`,
    /// [`StoreError::Api`] for any other failure.
    pub async fn load_board(&mut self, id: &Id) -> StoreResult<Board> {
        let board = self.backend.get_board(id).await.map_err(|err| match err {
            ApiError::NotFound { .. } => StoreError::NotFound { id: id.clone() },
            other => {
                warn!(board = %id, error = %other, "failed to load board");
                StoreError::Api(other)
            }
        })?;
        Ok(self.remember(board))
    }

    /// Fetches a board for the play view
    ///
    /// # Errors
    ///
    /// As [`BoardStore::load_board`], plus [`StoreError::EmptyBoard`] when
    /// the board has no categories.
    pub async fn load_playable_board(&mut self, id: &Id) -> StoreResult<Board> {
        let board = self.load_board(id).await?;
        if board.is_empty() {
            return Err(StoreError::EmptyBoard { id: id.clone() });
        }
        Ok(board)
    }

    /// Creates a board and refreshes the list
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Invalid`] without contacting the backend when
    /// the payload is invalid, [`StoreError::Api`] when a request fails.
    pub async fn create_board(&mut self, board: NewBoard) -> StoreResult<Board> {
        board.validate()?;
        let created = self.backend.create_board(&board).await?;
        info!(board = %created.id, title = %created.title, "created board");
        self.refresh_boards().await?;
        Ok(created)
    }

    /// Applies a partial update and returns the refetched board
    ///
    /// An empty patch sends no `PATCH` and only refetches.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Invalid`] without contacting the backend when
    /// the patch is invalid, [`StoreError::NotFound`] or
    /// [`StoreError::Api`] when a request fails.
    pub async fn update_board(&mut self, id: &Id, patch: BoardPatch) -> StoreResult<Board> {
        patch.validate()?;
        if !patch.is_empty() {
            self.backend.update_board(id, &patch).await?;
            info!(board = %id, "updated board");
            self.refresh_boards().await?;
        }
        self.load_board(id).await
    }

    /// Deletes a board and refreshes the list
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when the board is already gone,
    /// [`StoreError::Api`] for any other failure.
    pub async fn delete_board(&mut self, id: &Id) -> StoreResult<()> {
        self.backend.delete_board(id).await.map_err(|err| match err {
            ApiError::NotFound { .. } => StoreError::NotFound { id: id.clone() },
            other => StoreError::Api(other),
        })?;
        info!(board = %id, "deleted board");
        if self.current.as_ref().is_some_and(|board| &board.id == id) {
            self.current = None;
        }
        self.refresh_boards().await?;
        Ok(())
    }

    /// Creates or renames a category and returns the refetched board
    ///
    /// # Arguments
    ///
    /// * `board_id` - Board the category belongs to
    /// * `target` - Placeholder column to create at, or the category to rename
    /// * `title` - New title
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Invalid`] without contacting the backend when
    /// the title or column is invalid, [`StoreError::Api`] when a request
    /// fails.
    pub async fn save_category(
        &mut self,
        board_id: &Id,
        target: EditTarget,
        title: String,
    ) -> StoreResult<Board> {
        match target {
            EditTarget::New { position } => {
                let category = NewCategory {
                    board_id: board_id.clone(),
                    title,
                    position,
                };
                category.validate()?;
                let created = self.backend.create_category(&category).await?;
                info!(board = %board_id, category = %created.id, position, "created category");
            }
            EditTarget::Existing(id) => {
                let update = CategoryUpdate {
                    board_id: board_id.clone(),
                    title,
                };
                update.validate()?;
                self.backend.update_category(&id, &update).await?;
                info!(board = %board_id, category = %id, "updated category");
            }
        }
        self.load_board(board_id).await
    }

    /// Creates or edits a clue and returns the refetched board
    ///
    /// # Arguments
    ///
    /// * `board_id` - Board to refetch afterwards
    /// * `category_id` - Category the clue belongs to; must already exist
    /// * `target` - Placeholder row to create at, or the clue to edit
    /// * `form` - Submitted clue fields
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Invalid`] without contacting the backend when
    /// the form or row is invalid, [`StoreError::Api`] when a request fails.
    pub async fn save_clue(
        &mut self,
        board_id: &Id,
        category_id: &Id,
        target: EditTarget,
        form: ClueForm,
    ) -> StoreResult<Board> {
        match target {
            EditTarget::New { position } => {
                let clue = NewClue {
                    category_id: category_id.clone(),
                    position,
                    form,
                };
                clue.validate()?;
                let created = self.backend.create_clue(&clue).await?;
                info!(category = %category_id, clue = %created.id, position, "created clue");
            }
            EditTarget::Existing(id) => {
                let update = ClueUpdate {
                    category_id: category_id.clone(),
                    form,
                };
                update.validate()?;
                self.backend.update_clue(&id, &update).await?;
                info!(category = %category_id, clue = %id, "updated clue");
            }
        }
        self.load_board(board_id).await
    }
}
