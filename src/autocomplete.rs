//! Debounced handle suggestions drawn from the recent-search cache.

use crate::cache::{RecentSearchCache, Storage};
use crate::debounce::{Debouncer, Scheduler};
use log::debug;
use std::cell::RefCell;
use std::rc::Rc;

/// Suggestions for `input`: nothing for an empty field, otherwise cached
/// handles that start with it.
pub fn suggest<S: Storage>(cache: &RecentSearchCache<S>, input: &str) -> Vec<String> {
    let query = input.to_lowercase();
    if query.is_empty() {
        Vec::new()
    } else {
        cache.matches(&query)
    }
}

pub struct AutocompleteFilter<S: Storage, T: Scheduler> {
    cache: Rc<RefCell<RecentSearchCache<S>>>,
    debouncer: Debouncer<T>,
}

impl<S: Storage + 'static, T: Scheduler> AutocompleteFilter<S, T> {
    pub fn new(cache: Rc<RefCell<RecentSearchCache<S>>>, scheduler: T, delay_ms: u32) -> Self {
        Self {
            cache,
            debouncer: Debouncer::new(scheduler, delay_ms),
        }
    }

    /// React to a change of the handle field. `deliver` receives the
    /// suggestions once input has been quiet for the debounce delay; calls
    /// superseded by a later keystroke never deliver.
    pub fn on_input<F>(&self, input: &str, deliver: F)
    where
        F: FnOnce(Vec<String>) + 'static,
    {
        let input = input.to_string();
        let cache = Rc::clone(&self.cache);
        self.debouncer.call(move || {
            let matches = suggest(&cache.borrow(), &input);
            debug!("{} suggestions for '{}'", matches.len(), input);
            deliver(matches);
        });
    }

    /// Drop any pending suggestion computation, e.g. after a pick.
    pub fn dismiss(&self) {
        self.debouncer.cancel();
    }
}
