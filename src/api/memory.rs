//! In-process backend used by the store and play view tests

use std::sync::Mutex;

use async_trait::async_trait;
use web_time::Duration;

use super::{
    ApiError, ApiResult, Backend, BoardPatch, CategoryUpdate, ClueUpdate, NewBoard, NewCategory,
    NewClue,
};
use crate::board::{Board, Category, Clue, Id};

#[derive(Debug, Default)]
struct Inner {
    boards: Vec<Board>,
    next_id: u64,
    calls: Vec<String>,
}

impl Inner {
    fn allocate(&mut self) -> Id {
        self.next_id += 1;
        Id::Number(self.next_id)
    }

    fn category_mut(&mut self, id: &Id) -> Option<&mut Category> {
        self.boards
            .iter_mut()
            .flat_map(|b| b.categories.iter_mut())
            .find(|c| &c.id == id)
    }
}

/// Backend keeping every board in memory and recording each call
#[derive(Debug, Default)]
pub(crate) struct MemoryBackend {
    inner: Mutex<Inner>,
}

impl MemoryBackend {
    /// A backend preloaded with `boards`; fresh ids start above 1000
    pub(crate) fn with_boards(boards: Vec<Board>) -> Self {
        Self {
            inner: Mutex::new(Inner {
                boards,
                next_id: 1000,
                calls: Vec::new(),
            }),
        }
    }

    /// Every call made so far, as `"METHOD path"`
    pub(crate) fn calls(&self) -> Vec<String> {
        self.inner.lock().unwrap().calls.clone()
    }

    /// Replaces a stored board behind the client's back
    pub(crate) fn replace_board(&self, board: Board) {
        let mut inner = self.inner.lock().unwrap();
        inner.boards.retain(|b| b.id != board.id);
        inner.boards.push(board);
    }

    fn record(&self, call: String) -> std::sync::MutexGuard<'_, Inner> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(call);
        inner
    }
}

fn not_found(path: String) -> ApiError {
    ApiError::NotFound { path }
}

#[async_trait]
impl Backend for MemoryBackend {
    async fn list_boards(&self) -> ApiResult<Vec<Board>> {
        Ok(self.record("GET board".to_string()).boards.clone())
    }

    async fn get_board(&self, id: &Id) -> ApiResult<Board> {
        let inner = self.record(format!("GET board/{id}"));
        inner
            .boards
            .iter()
            .find(|b| &b.id == id)
            .cloned()
            .ok_or_else(|| not_found(format!("board/{id}")))
    }

    async fn create_board(&self, board: &NewBoard) -> ApiResult<Board> {
        let mut inner = self.record("POST board".to_string());
        let created = Board {
            id: inner.allocate(),
            title: board.title.clone(),
            time_limit: board.time_limit,
            categories: Vec::new(),
            created_at: None,
        };
        inner.boards.push(created.clone());
        Ok(created)
    }

    async fn update_board(&self, id: &Id, patch: &BoardPatch) -> ApiResult<Board> {
        let mut inner = self.record(format!("PATCH board/{id}"));
        let board = inner
            .boards
            .iter_mut()
            .find(|b| &b.id == id)
            .ok_or_else(|| not_found(format!("board/{id}")))?;
        if let Some(title) = &patch.title {
            board.title.clone_from(title);
        }
        if let Some(limit) = patch.time_limit {
            board.time_limit = limit;
        }
        Ok(board.clone())
    }

    async fn delete_board(&self, id: &Id) -> ApiResult<()> {
        let mut inner = self.record(format!("DELETE board/{id}"));
        let before = inner.boards.len();
        inner.boards.retain(|b| &b.id != id);
        if inner.boards.len() == before {
            return Err(not_found(format!("board/{id}")));
        }
        Ok(())
    }

    async fn create_category(&self, category: &NewCategory) -> ApiResult<Category> {
        let mut inner = self.record("POST category".to_string());
        let created = Category {
            id: inner.allocate(),
            title: category.title.clone(),
            position: Some(category.position as i64),
            clues: Vec::new(),
        };
        let board = inner
            .boards
            .iter_mut()
            .find(|b| b.id == category.board_id)
            .ok_or_else(|| not_found(format!("board/{}", category.board_id)))?;
        board.categories.push(created.clone());
        Ok(created)
    }

    async fn update_category(&self, id: &Id, update: &CategoryUpdate) -> ApiResult<Category> {
        let mut inner = self.record(format!("PATCH category/{id}"));
        let category = inner
            .category_mut(id)
            .ok_or_else(|| not_found(format!("category/{id}")))?;
        category.title.clone_from(&update.title);
        Ok(category.clone())
    }

    async fn create_clue(&self, clue: &NewClue) -> ApiResult<Clue> {
        let mut inner = self.record("POST clue".to_string());
        let created = Clue {
            id: inner.allocate(),
            value: clue.form.value,
            position: Some(clue.position as i64),
            question: clue.form.question.clone(),
            answer: clue.form.answer.clone(),
            content: clue.form.content.clone(),
        };
        let category = inner
            .category_mut(&clue.category_id)
            .ok_or_else(|| not_found(format!("category/{}", clue.category_id)))?;
        category.clues.push(created.clone());
        Ok(created)
    }

    async fn update_clue(&self, id: &Id, update: &ClueUpdate) -> ApiResult<Clue> {
        let mut inner = self.record(format!("PATCH clue/{id}"));
        let clue = inner
            .category_mut(&update.category_id)
            .and_then(|category| category.clues.iter_mut().find(|c| &c.id == id))
            .ok_or_else(|| not_found(format!("clue/{id}")))?;
        clue.value = update.form.value;
        clue.question.clone_from(&update.form.question);
        clue.answer.clone_from(&update.form.answer);
        clue.content = update.form.content.clone();
        Ok(clue.clone())
    }
}

/// A board with `categories` categories of `clues` filled clues each
pub(crate) fn sample_board(id: u64, categories: usize, clues: usize) -> Board {
    Board {
        id: Id::Number(id),
        title: format!("Board {id}"),
        time_limit: Duration::from_secs(30),
        categories: (0..categories)
            .map(|c| Category {
                id: Id::Number(id * 100 + c as u64),
                title: format!("Category {c}"),
                position: Some(c as i64),
                clues: (0..clues)
                    .map(|r| Clue {
                        id: Id::Number(id * 10_000 + c as u64 * 100 + r as u64),
                        value: crate::constants::grid::VALUE_LADDER[r],
                        position: Some(r as i64),
                        question: format!("Question {c}/{r}"),
                        answer: format!("Answer {c}/{r}"),
                        content: crate::board::ClueContent::Text,
                    })
                    .collect(),
            })
            .collect(),
        created_at: None,
    }
}
