//! Search state machine: form values in, renderable outcome out.
//!
//! A submission moves the controller from `Idle` (or a finished state) to
//! `Searching`, then to `Success` or `Failed`. The handle is written to the
//! recent-search cache as soon as the search starts, whether or not the
//! request later succeeds.
//!
//! Overlapping submissions are resolved in favour of the latest one: each
//! search takes a generation number, and a response arriving after a newer
//! search started is dropped without touching the state.

use crate::api::{FetchError, SubmissionSource};
use crate::cache::{RecentSearchCache, Storage};
use crate::config::{FETCH_ERROR_TEXT, NO_RESULTS_TEXT};
use crate::utils::{criteria_from_form, format_rating, normalize_handle};
use crate::{filter_problems, Problem};
use log::{error, info, warn};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Raw values read from the search form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchForm {
    pub handle: String,
    pub min_rating: String,
    pub max_rating: String,
    pub checked_topics: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchState {
    Idle,
    Searching,
    /// May be empty; that is a successful search with nothing to show.
    Success(Vec<Problem>),
    Failed,
}

pub struct SearchController<S: Storage, F: SubmissionSource> {
    cache: Rc<RefCell<RecentSearchCache<S>>>,
    source: F,
    generation: Cell<u64>,
    state: RefCell<SearchState>,
}

impl<S: Storage, F: SubmissionSource> SearchController<S, F> {
    pub fn new(cache: Rc<RefCell<RecentSearchCache<S>>>, source: F) -> Self {
        Self {
            cache,
            source,
            generation: Cell::new(0),
            state: RefCell::new(SearchState::Idle),
        }
    }

    pub fn state(&self) -> SearchState {
        self.state.borrow().clone()
    }

    /// Back to `Idle`. A search still in flight will not report.
    pub fn reset(&self) {
        self.generation.set(self.generation.get() + 1);
        *self.state.borrow_mut() = SearchState::Idle;
    }

    /// Run one search. Returns the final state, or `None` if a newer search
    /// (or a reset) superseded this one while it was waiting on the network.
    pub async fn search(&self, form: SearchForm) -> Option<SearchState> {
        let generation = self.generation.get() + 1;
        self.generation.set(generation);
        *self.state.borrow_mut() = SearchState::Searching;

        let handle = normalize_handle(&form.handle);
        let criteria = criteria_from_form(&form.min_rating, &form.max_rating, &form.checked_topics);

        if let Some(handle) = &handle {
            if let Err(e) = self.cache.borrow_mut().save(handle) {
                warn!("{}", e);
            }
        }

        let fetched = match &handle {
            Some(handle) => self.source.fetch_submissions(handle).await,
            None => Err(FetchError::MissingHandle),
        };

        if self.generation.get() != generation {
            info!(
                "Dropping results for '{}', a newer search replaced it",
                handle.as_deref().unwrap_or_default()
            );
            return None;
        }

        let outcome = match fetched {
            Ok(submissions) => SearchState::Success(filter_problems(&submissions, &criteria)),
            Err(e) => {
                error!("Error fetching user data: {}", e);
                SearchState::Failed
            }
        };
        *self.state.borrow_mut() = outcome.clone();
        Some(outcome)
    }
}

/// One line of the results list.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultEntry {
    Problem {
        name: String,
        rating: String,
        url: Option<String>,
    },
    /// The search succeeded but nothing matched.
    NoResults,
    FetchFailed,
}

impl ResultEntry {
    /// Placeholder line for the non-problem entries.
    pub fn placeholder_text(&self) -> Option<&'static str> {
        match self {
            ResultEntry::Problem { .. } => None,
            ResultEntry::NoResults => Some(NO_RESULTS_TEXT),
            ResultEntry::FetchFailed => Some(FETCH_ERROR_TEXT),
        }
    }
}

/// What the results list shows for `state`. Idle and searching show nothing.
pub fn result_entries(state: &SearchState) -> Vec<ResultEntry> {
    match state {
        SearchState::Idle | SearchState::Searching => Vec::new(),
        SearchState::Failed => vec![ResultEntry::FetchFailed],
        SearchState::Success(problems) if problems.is_empty() => {
            vec![ResultEntry::NoResults]
        }
        SearchState::Success(problems) => problems
            .iter()
            .map(|p| ResultEntry::Problem {
                name: p.name.clone(),
                rating: format_rating(p.rating),
                url: p.url(),
            })
            .collect(),
    }
}
