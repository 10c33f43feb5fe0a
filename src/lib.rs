use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use wasm_bindgen::prelude::*;

pub mod api;
pub mod autocomplete;
pub mod cache;
pub mod config;
pub mod controller;
pub mod debounce;
pub mod utils;

use config::PROBLEM_URL_BASE;

/// Verdict string Codeforces reports for an accepted submission.
pub const ACCEPTED_VERDICT: &str = "OK";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    pub name: String,
    #[serde(default)]
    pub rating: Option<i32>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub contest_id: Option<i64>,
    #[serde(default)]
    pub index: String,
}

impl Problem {
    /// Problemset link, or `None` for problems that do not belong to a contest.
    pub fn url(&self) -> Option<String> {
        self.contest_id
            .map(|contest| format!("{}/{}/{}", PROBLEM_URL_BASE, contest, self.index))
    }

    fn has_any_tag(&self, topics: &HashSet<String>) -> bool {
        self.tags.iter().any(|tag| topics.contains(tag))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    /// Absent while the submission is still being judged.
    #[serde(default)]
    pub verdict: Option<String>,
    pub problem: Problem,
}

impl Submission {
    pub fn is_accepted(&self) -> bool {
        self.verdict.as_deref() == Some(ACCEPTED_VERDICT)
    }
}

/// User-selected filter. `min_rating <= max_rating` is not enforced; an
/// inverted range simply matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCriteria {
    pub min_rating: i32,
    pub max_rating: i32,
    #[serde(default)]
    pub topics: HashSet<String>,
    #[serde(default)]
    pub any_topic_selected: bool,
}

impl SearchCriteria {
    fn rating_in_range(&self, rating: Option<i32>) -> bool {
        match rating {
            Some(r) => self.min_rating <= r && r <= self.max_rating,
            None => false,
        }
    }

    fn topic_matches(&self, problem: &Problem) -> bool {
        self.any_topic_selected || problem.has_any_tag(&self.topics)
    }

    /// Whether a single submission passes verdict, rating and topic checks.
    pub fn accepts(&self, submission: &Submission) -> bool {
        submission.is_accepted()
            && self.rating_in_range(submission.problem.rating)
            && self.topic_matches(&submission.problem)
    }
}

/// Accepted problems matching `criteria`, in first-seen order, with later
/// submissions of an already emitted problem name dropped.
pub fn filter_problems(submissions: &[Submission], criteria: &SearchCriteria) -> Vec<Problem> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut problems = Vec::new();

    for submission in submissions {
        if !criteria.accepts(submission) {
            continue;
        }
        if !seen.insert(submission.problem.name.as_str()) {
            debug!("Skipping repeated problem '{}'", submission.problem.name);
            continue;
        }
        problems.push(submission.problem.clone());
    }

    info!(
        "Filtered {} submissions down to {} problems",
        submissions.len(),
        problems.len()
    );
    problems
}

/// JavaScript entry point for running the filter over raw API data.
///
/// # Arguments
/// * `submissions_js` - Array of Codeforces submission objects
/// * `criteria_js` - `{ minRating, maxRating, topics, anyTopicSelected }`
///
/// # Returns
/// Array of matching problems, or an error string if either argument
/// cannot be deserialized.
#[wasm_bindgen(js_name = filterAcceptedProblems)]
pub fn filter_accepted_problems(
    submissions_js: JsValue,
    criteria_js: JsValue,
) -> Result<JsValue, JsValue> {
    let submissions: Vec<Submission> = serde_wasm_bindgen::from_value(submissions_js)
        .map_err(|e| JsValue::from_str(&format!("Failed to deserialize submissions: {}", e)))?;
    let criteria: SearchCriteria = serde_wasm_bindgen::from_value(criteria_js)
        .map_err(|e| JsValue::from_str(&format!("Failed to deserialize criteria: {}", e)))?;

    let problems = filter_problems(&submissions, &criteria);
    serde_wasm_bindgen::to_value(&problems)
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize problems: {}", e)))
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub fn problem(name: &str, rating: Option<i32>, tags: &[&str], contest_id: i64) -> Problem {
        Problem {
            name: name.to_string(),
            rating,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            contest_id: Some(contest_id),
            index: "A".to_string(),
        }
    }

    pub fn submission(verdict: &str, problem: Problem) -> Submission {
        Submission {
            verdict: Some(verdict.to_string()),
            problem,
        }
    }

    pub fn criteria(min: i32, max: i32, topics: &[&str], any: bool) -> SearchCriteria {
        SearchCriteria {
            min_rating: min,
            max_rating: max,
            topics: topics.iter().map(|t| t.to_string()).collect(),
            any_topic_selected: any,
        }
    }
}
