//! Main module for the Codeforces problem finder using Yew.
//! Wires form state, the search controller and the view components.

use cf_problem_finder::{
    api::CodeforcesClient,
    cache::{open_storage, RecentSearchCache},
    config::{ANY_TOPIC, DEFAULT_MAX_RATING, DEFAULT_MIN_RATING},
    controller::{result_entries, SearchController, SearchForm, SearchState},
};
use log::info;
use web_sys::HtmlInputElement;
use yew::prelude::*;

mod components;
mod hooks;

use components::{render_results, RatingSlider, RecentSearches, TopicCheckboxes};
use hooks::{use_autocomplete, SharedCache};

/// Primary application component wiring state, effects, and UI elements.
#[function_component(App)]
fn app() -> Html {
    // Loaded once; every later save goes through the same instance.
    let cache: SharedCache = use_mut_ref(|| RecentSearchCache::load(open_storage()));
    let controller = {
        let cache = cache.clone();
        use_memo((), move |_| SearchController::new(cache, CodeforcesClient::new()))
    };
    let autocomplete = use_autocomplete(cache);

    let handle = use_state(String::new);
    let min_rating = use_state(|| DEFAULT_MIN_RATING.to_string());
    let max_rating = use_state(|| DEFAULT_MAX_RATING.to_string());
    let checked_topics = use_state(|| vec![ANY_TOPIC.to_string()]);
    let search_state = use_state(|| SearchState::Idle);

    let handle_oninput = {
        let handle = handle.clone();
        let on_input = autocomplete.on_input.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let text = input.value();
            handle.set(text.clone());
            on_input.emit(text);
        })
    };

    let on_pick = {
        let handle = handle.clone();
        let clear = autocomplete.clear.clone();
        Callback::from(move |picked: String| {
            handle.set(picked);
            clear.emit(());
        })
    };

    let on_topic_toggle = {
        let checked_topics = checked_topics.clone();
        Callback::from(move |(topic, now_checked): (String, bool)| {
            let mut topics = (*checked_topics).clone();
            topics.retain(|t| *t != topic);
            if now_checked {
                topics.push(topic);
            }
            checked_topics.set(topics);
        })
    };

    let onsubmit = {
        let handle = handle.clone();
        let min_rating = min_rating.clone();
        let max_rating = max_rating.clone();
        let checked_topics = checked_topics.clone();
        let search_state = search_state.clone();
        let clear = autocomplete.clear.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            clear.emit(());

            let form = SearchForm {
                handle: (*handle).clone(),
                min_rating: (*min_rating).clone(),
                max_rating: (*max_rating).clone(),
                checked_topics: (*checked_topics).clone(),
            };
            info!("Searching submissions of '{}'", form.handle.trim());
            search_state.set(SearchState::Searching);

            let controller = controller.clone();
            let search_state = search_state.clone();
            wasm_bindgen_futures::spawn_local(async move {
                // `None` means a newer submit owns the list now.
                if let Some(outcome) = controller.search(form).await {
                    search_state.set(outcome);
                }
            });
        })
    };

    html! {
        <div class="container">
            <h1>{ "Codeforces Problem Finder" }</h1>

            <form id="form" {onsubmit}>
                <div class="form-group handle-group">
                    <label for="handle">{ "Handle:" }</label>
                    <input type="text"
                        id="handle"
                        class="user-id"
                        autocomplete="off"
                        placeholder="e.g. tourist"
                        value={(*handle).clone()}
                        oninput={handle_oninput}
                    />
                    <RecentSearches suggestions={autocomplete.suggestions.clone()} onpick={on_pick} />
                </div>

                <div class="top-controls">
                    <RatingSlider
                        id="minRating"
                        label="Min Rating:"
                        value={(*min_rating).clone()}
                        oninput={
                            let min_rating = min_rating.clone();
                            Callback::from(move |v: String| min_rating.set(v))
                        }
                    />
                    <RatingSlider
                        id="maxRating"
                        label="Max Rating:"
                        value={(*max_rating).clone()}
                        oninput={
                            let max_rating = max_rating.clone();
                            Callback::from(move |v: String| max_rating.set(v))
                        }
                    />
                </div>

                <TopicCheckboxes checked={(*checked_topics).clone()} ontoggle={on_topic_toggle} />

                <button type="submit" class="btn-primary">{ "Find Problems" }</button>
            </form>

            <div class="results-area">
                if *search_state == SearchState::Searching {
                    <p class="searching">{ "Searching..." }</p>
                }
                { render_results(&result_entries(&search_state)) }
            </div>
        </div>
    }
}

/// Entry point: installs logging and panic reporting, then renders the app.
fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
    yew::Renderer::<App>::new().render();
}
