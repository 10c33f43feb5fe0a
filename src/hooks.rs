use cf_problem_finder::autocomplete::AutocompleteFilter;
use cf_problem_finder::cache::{RecentSearchCache, Storage};
use cf_problem_finder::config::AUTOCOMPLETE_DEBOUNCE_MS;
use cf_problem_finder::debounce::TimeoutScheduler;
use std::cell::RefCell;
use std::rc::Rc;
use yew::prelude::*;

pub type SharedCache = Rc<RefCell<RecentSearchCache<Box<dyn Storage>>>>;

/// Suggestion list state and the callbacks that drive it.
#[derive(Clone)]
pub struct Autocomplete {
    /// Handles currently offered below the input.
    pub suggestions: Vec<String>,
    /// Feed the latest text of the handle field. Lookups are debounced.
    pub on_input: Callback<String>,
    /// Hide the list and drop any pending lookup.
    pub clear: Callback<()>,
}

/// Custom hook wiring the handle field to the recent-search cache.
#[hook]
pub fn use_autocomplete(cache: SharedCache) -> Autocomplete {
    let suggestions: UseStateHandle<Vec<String>> = use_state(Vec::new);
    let filter = use_memo((), move |_| {
        AutocompleteFilter::new(cache, TimeoutScheduler, AUTOCOMPLETE_DEBOUNCE_MS)
    });

    let on_input = {
        let filter = filter.clone();
        let suggestions = suggestions.clone();
        Callback::from(move |text: String| {
            let setter = suggestions.clone();
            filter.on_input(&text, move |matches| setter.set(matches));
        })
    };

    let clear = {
        let suggestions = suggestions.clone();
        Callback::from(move |_: ()| {
            filter.dismiss();
            suggestions.set(Vec::new());
        })
    };

    Autocomplete {
        suggestions: (*suggestions).clone(),
        on_input,
        clear,
    }
}
