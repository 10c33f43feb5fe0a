use crate::config::ANY_TOPIC;
use crate::SearchCriteria;
use log::warn;

/// Trimmed handle, or `None` if nothing but whitespace was entered.
pub fn normalize_handle(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Read a rating field as an integer, naming the field in the error.
pub fn parse_rating(input: &str, field_name: &str) -> Result<i32, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(format!("{} is empty", field_name));
    }
    trimmed
        .parse::<i32>()
        .map_err(|_| format!("{} '{}' is not a whole number", field_name, trimmed))
}

/// Parse a rating slider value. Values are taken as-is; an unreadable
/// value leaves that side of the range open by returning `open_bound`.
pub fn parse_rating_bound(input: &str, open_bound: i32, field_name: &str) -> i32 {
    parse_rating(input, field_name).unwrap_or_else(|e| {
        warn!("{}, ignoring this bound", e);
        open_bound
    })
}

/// Build filter criteria from raw form values.
///
/// `checked_topics` are the values of the ticked topic boxes; the
/// [`ANY_TOPIC`] sentinel among them disables tag filtering.
pub fn criteria_from_form(
    min_rating: &str,
    max_rating: &str,
    checked_topics: &[String],
) -> SearchCriteria {
    SearchCriteria {
        min_rating: parse_rating_bound(min_rating, i32::MIN, "Minimum rating"),
        max_rating: parse_rating_bound(max_rating, i32::MAX, "Maximum rating"),
        topics: checked_topics.iter().cloned().collect(),
        any_topic_selected: checked_topics.iter().any(|t| t == ANY_TOPIC),
    }
}

pub fn format_rating(rating: Option<i32>) -> String {
    match rating {
        Some(r) => format!("Rating: {}", r),
        None => "Rating: unrated".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_is_trimmed_and_blank_rejected() {
        assert_eq!(normalize_handle("  tourist \n").as_deref(), Some("tourist"));
        assert_eq!(normalize_handle("   "), None);
        assert_eq!(normalize_handle(""), None);
    }

    #[test]
    fn rating_parse_reports_field() {
        assert_eq!(parse_rating(" 1200 ", "Minimum rating"), Ok(1200));
        assert_eq!(parse_rating("-5", "Minimum rating"), Ok(-5));
        assert_eq!(
            parse_rating("", "Minimum rating"),
            Err("Minimum rating is empty".to_string())
        );
        assert_eq!(
            parse_rating("12.5", "Maximum rating"),
            Err("Maximum rating '12.5' is not a whole number".to_string())
        );
    }

    #[test]
    fn criteria_detects_any_sentinel() {
        let checked = vec!["dp".to_string(), "any".to_string()];
        let c = criteria_from_form("1000", "1300", &checked);
        assert_eq!(c.min_rating, 1000);
        assert_eq!(c.max_rating, 1300);
        assert!(c.any_topic_selected);
        assert!(c.topics.contains("dp"));
    }

    #[test]
    fn inverted_range_is_kept_as_is() {
        let c = criteria_from_form("2000", "1000", &[]);
        assert_eq!((c.min_rating, c.max_rating), (2000, 1000));
        assert!(!c.any_topic_selected);
        assert!(c.topics.is_empty());
    }

    #[test]
    fn unreadable_bounds_leave_range_open() {
        let c = criteria_from_form("", "n/a", &[]);
        assert_eq!((c.min_rating, c.max_rating), (i32::MIN, i32::MAX));
    }

    #[test]
    fn rating_label() {
        assert_eq!(format_rating(Some(1900)), "Rating: 1900");
        assert_eq!(format_rating(None), "Rating: unrated");
    }
}
