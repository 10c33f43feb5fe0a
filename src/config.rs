//! Application-level configuration constants.

// Codeforces endpoints
pub const API_BASE_URL: &str = "https://codeforces.com/api";
pub const PROBLEM_URL_BASE: &str = "https://codeforces.com/problemset/problem";

// Recent searches
pub const RECENT_SEARCHES_KEY: &str = "recentSearches";
pub const MAX_RECENT_SEARCHES: usize = 5;

// UI Behavior
pub const AUTOCOMPLETE_DEBOUNCE_MS: u32 = 100;

// Rating sliders
pub const MIN_RATING: i32 = 800;
pub const MAX_RATING: i32 = 3500;
pub const RATING_STEP: i32 = 100;
pub const DEFAULT_MIN_RATING: i32 = 800;
pub const DEFAULT_MAX_RATING: i32 = 1600;

/// Checkbox value meaning "do not filter by topic".
pub const ANY_TOPIC: &str = "any";

/// Tags offered as topic checkboxes, in display order.
pub const TOPICS: &[&str] = &[
    "implementation",
    "math",
    "greedy",
    "dp",
    "data structures",
    "brute force",
    "constructive algorithms",
    "graphs",
    "sortings",
    "binary search",
    "dfs and similar",
    "trees",
    "strings",
    "number theory",
    "combinatorics",
    "two pointers",
    "bitmasks",
    "geometry",
    "dsu",
    "shortest paths",
    "probabilities",
    "divide and conquer",
    "hashing",
    "games",
    "interactive",
];

// Result placeholders
pub const NO_RESULTS_TEXT: &str = "No problems found matching the criteria.";
pub const FETCH_ERROR_TEXT: &str = "Error fetching data. Please check the handle and try again.";
