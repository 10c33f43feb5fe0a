//! Pure Yew view components for the problem finder UI.
//!
//! Everything here renders from props; state lives in `main.rs`.

use cf_problem_finder::config::{ANY_TOPIC, MAX_RATING, MIN_RATING, RATING_STEP, TOPICS};
use cf_problem_finder::controller::ResultEntry;
use web_sys::HtmlInputElement;
use yew::prelude::*;

/// Renders the problem list, or the single placeholder line it was given.
pub fn render_results(entries: &[ResultEntry]) -> Html {
    html! {
        <ul class="problem-list">
            { entries.iter().map(render_entry).collect::<Html>() }
        </ul>
    }
}

fn render_entry(entry: &ResultEntry) -> Html {
    match entry {
        ResultEntry::NoResults | ResultEntry::FetchFailed => html! {
            <li>{ entry.placeholder_text().unwrap_or_default() }</li>
        },
        ResultEntry::Problem { name, rating, url: Some(url) } => html! {
            <li>
                <a href={url.clone()} target="_blank" rel="noopener noreferrer">
                    <span class="problem-name">{ name }</span>
                    <span class="problem-rating">{ rating }</span>
                </a>
            </li>
        },
        ResultEntry::Problem { name, rating, url: None } => html! {
            <li>
                <span class="problem-name">{ name }</span>
                <span class="problem-rating">{ rating }</span>
            </li>
        },
    }
}

/// Range input with its current value shown alongside.
#[derive(Properties, PartialEq)]
pub struct RatingSliderProps {
    pub id: AttrValue,
    pub label: AttrValue,
    pub value: String,
    pub oninput: Callback<String>,
}

#[function_component(RatingSlider)]
pub fn rating_slider(props: &RatingSliderProps) -> Html {
    let oninput = props.oninput.reform(|e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        input.value()
    });
    html! {
        <div class="form-group">
            <label for={props.id.clone()}>{ props.label.clone() }</label>
            <div class="slider-with-value">
                <input type="range"
                    id={props.id.clone()}
                    min={MIN_RATING.to_string()}
                    max={MAX_RATING.to_string()}
                    step={RATING_STEP.to_string()}
                    value={props.value.clone()}
                    {oninput}
                />
                <span class="slider-value">{ &props.value }</span>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct TopicCheckboxesProps {
    pub checked: Vec<String>,
    /// `(topic, now_checked)`
    pub ontoggle: Callback<(String, bool)>,
}

#[function_component(TopicCheckboxes)]
pub fn topic_checkboxes(props: &TopicCheckboxesProps) -> Html {
    let boxes = std::iter::once(ANY_TOPIC).chain(TOPICS.iter().copied());
    html! {
        <fieldset class="topics-group">
            <legend>{ "Topics" }</legend>
            { boxes.map(|topic| {
                let ontoggle = props.ontoggle.clone();
                let onchange = Callback::from(move |e: Event| {
                    let input: HtmlInputElement = e.target_unchecked_into();
                    ontoggle.emit((input.value(), input.checked()));
                });
                html! {
                    <label class="topic">
                        <input type="checkbox"
                            class="topics"
                            value={topic}
                            checked={props.checked.iter().any(|t| t == topic)}
                            {onchange}
                        />
                        { topic }
                    </label>
                }
            }).collect::<Html>() }
        </fieldset>
    }
}

/// Dropdown of recently searched handles matching the current input.
#[derive(Properties, PartialEq)]
pub struct RecentSearchesProps {
    pub suggestions: Vec<String>,
    pub onpick: Callback<String>,
}

#[function_component(RecentSearches)]
pub fn recent_searches(props: &RecentSearchesProps) -> Html {
    if props.suggestions.is_empty() {
        return html! {};
    }
    html! {
        <ul id="recentSearches" class="dropdown">
            { props.suggestions.iter().map(|handle| {
                let onpick = props.onpick.clone();
                let picked = handle.clone();
                html! {
                    <li class="dropdown-item" onclick={Callback::from(move |_| onpick.emit(picked.clone()))}>
                        { handle }
                    </li>
                }
            }).collect::<Html>() }
        </ul>
    }
}
