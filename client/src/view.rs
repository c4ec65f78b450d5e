//! Client view state.

use crate::api::ApiError;
use movie_core::{ListItemView, MovieRecord};

/// What the screen shows. The selected record lives inside `Detail`, so there
/// is no way to be in the detail view without one.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Loading,
    List,
    Detail(MovieRecord),
}

#[derive(Debug)]
pub struct App {
    pub movies: Vec<ListItemView>,
    pub view: ViewState,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self { movies: Vec::new(), view: ViewState::Loading }
    }

    /// Empty list view with no fetch in flight, for one-shot commands that
    /// never load the list.
    pub fn idle() -> Self {
        Self { movies: Vec::new(), view: ViewState::List }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.view, ViewState::Loading)
    }

    pub fn selected(&self) -> Option<&MovieRecord> {
        match &self.view {
            ViewState::Detail(movie) => Some(movie),
            _ => None,
        }
    }

    pub fn begin_loading(&mut self) {
        self.view = ViewState::Loading;
    }

    /// Loading always ends in the list view. A failed fetch keeps whatever
    /// movies were already there.
    pub fn on_list_loaded(&mut self, result: Result<Vec<ListItemView>, ApiError>) {
        match result {
            Ok(movies) => self.movies = movies,
            Err(err) => tracing::error!(error = %err, "error fetching movies"),
        }
        self.view = ViewState::List;
    }

    /// Returns true when the detail view was entered and the screen should be
    /// scrolled back to the top. On failure nothing changes.
    pub fn on_detail_loaded(&mut self, result: Result<MovieRecord, ApiError>) -> bool {
        match result {
            Ok(movie) => {
                self.view = ViewState::Detail(movie);
                true
            }
            Err(err) => {
                tracing::error!(error = %err, "error fetching movie details");
                false
            }
        }
    }

    pub fn back(&mut self) {
        self.view = ViewState::List;
    }

    /// Id of the n-th card (1-based) in the list view.
    pub fn card_id(&self, n: usize) -> Option<String> {
        if self.view != ViewState::List {
            return None;
        }
        let item = self.movies.get(n.checked_sub(1)?)?;
        item.id.as_ref().map(|id| id.key())
    }
}
