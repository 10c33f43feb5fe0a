//! Codeforces `user.status` client.

use crate::config::API_BASE_URL;
use crate::Submission;
use futures::future::LocalBoxFuture;
use log::debug;
use serde::Deserialize;
use std::fmt;

#[derive(Debug)]
pub enum FetchError {
    MissingHandle,
    Network(reqwest::Error),
    Status(u16),
    Malformed(serde_json::Error),
    /// The API answered `status: "FAILED"`, e.g. for an unknown handle.
    Api(String),
    /// `status: "OK"` without a `result` list.
    MissingResult,
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::MissingHandle => write!(f, "No handle given"),
            FetchError::Network(e) => write!(f, "Request failed: {}", e),
            FetchError::Status(code) => write!(f, "Unexpected HTTP status {}", code),
            FetchError::Malformed(e) => write!(f, "Malformed response body: {}", e),
            FetchError::Api(comment) => write!(f, "Codeforces rejected the request: {}", comment),
            FetchError::MissingResult => write!(f, "Response carried no result"),
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchError::Network(e) => Some(e),
            FetchError::Malformed(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        FetchError::Network(e)
    }
}

/// Where submission histories come from.
pub trait SubmissionSource {
    fn fetch_submissions<'a>(
        &'a self,
        handle: &'a str,
    ) -> LocalBoxFuture<'a, Result<Vec<Submission>, FetchError>>;
}

/// Envelope every Codeforces API method answers with.
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    status: String,
    comment: Option<String>,
    result: Option<T>,
}

/// Turn a raw `user.status` reply into submissions.
pub fn parse_user_status(http_status: u16, body: &str) -> Result<Vec<Submission>, FetchError> {
    let envelope: ApiResponse<Vec<Submission>> = match serde_json::from_str(body) {
        Ok(envelope) => envelope,
        // A non-JSON error page says less than its status code.
        Err(_) if !(200..300).contains(&http_status) => {
            return Err(FetchError::Status(http_status))
        }
        Err(e) => return Err(FetchError::Malformed(e)),
    };

    if envelope.status != "OK" {
        return Err(FetchError::Api(
            envelope
                .comment
                .unwrap_or_else(|| format!("status {}", envelope.status)),
        ));
    }
    if !(200..300).contains(&http_status) {
        return Err(FetchError::Status(http_status));
    }
    envelope.result.ok_or(FetchError::MissingResult)
}

#[derive(Debug, Clone)]
pub struct CodeforcesClient {
    client: reqwest::Client,
    base_url: String,
}

impl CodeforcesClient {
    pub fn new() -> Self {
        Self::with_base_url(API_BASE_URL)
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn user_status_url(&self) -> String {
        format!("{}/user.status", self.base_url)
    }

    async fn user_status(&self, handle: &str) -> Result<Vec<Submission>, FetchError> {
        let response = self
            .client
            .get(self.user_status_url())
            .query(&[("handle", handle)])
            .send()
            .await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!("user.status for '{}' answered {} ({} bytes)", handle, status, body.len());
        parse_user_status(status, &body)
    }
}

impl Default for CodeforcesClient {
    fn default() -> Self {
        Self::new()
    }
}

impl SubmissionSource for CodeforcesClient {
    fn fetch_submissions<'a>(
        &'a self,
        handle: &'a str,
    ) -> LocalBoxFuture<'a, Result<Vec<Submission>, FetchError>> {
        Box::pin(self.user_status(handle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_envelope_yields_submissions() {
        let body = r#"{"status":"OK","result":[
            {"id":1,"verdict":"OK","problem":{"contestId":1,"index":"A","name":"Theatre Square","rating":1000,"tags":["math"]}},
            {"id":2,"problem":{"contestId":2,"index":"B","name":"Queue","tags":[]}}
        ]}"#;
        let subs = parse_user_status(200, body).unwrap();
        assert_eq!(subs.len(), 2);
        assert_eq!(subs[0].problem.name, "Theatre Square");
        assert_eq!(subs[1].verdict, None);
        assert_eq!(subs[1].problem.rating, None);
    }

    #[test]
    fn failed_envelope_reports_comment() {
        let body = r#"{"status":"FAILED","comment":"handle: User with handle nobody_xyz not found"}"#;
        match parse_user_status(400, body) {
            Err(FetchError::Api(comment)) => assert!(comment.contains("not found")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn non_json_error_page_reports_status() {
        assert!(matches!(
            parse_user_status(503, "<html>busy</html>"),
            Err(FetchError::Status(503))
        ));
    }

    #[test]
    fn garbage_with_success_status_is_malformed() {
        assert!(matches!(
            parse_user_status(200, "{\"status\":"),
            Err(FetchError::Malformed(_))
        ));
        assert!(matches!(
            parse_user_status(200, r#"{"status":"OK","result":{"not":"a list"}}"#),
            Err(FetchError::Malformed(_))
        ));
    }

    #[test]
    fn ok_status_without_result_is_an_error() {
        assert!(matches!(
            parse_user_status(200, r#"{"status":"OK"}"#),
            Err(FetchError::MissingResult)
        ));
        assert!(matches!(
            parse_user_status(200, r#"{"status":"OK","result":null}"#),
            Err(FetchError::MissingResult)
        ));
    }

    #[test]
    fn ok_status_with_empty_result_is_not_an_error() {
        let subs = parse_user_status(200, r#"{"status":"OK","result":[]}"#).unwrap();
        assert!(subs.is_empty());
    }

    #[test]
    fn user_status_url_ignores_trailing_slash() {
        let client = CodeforcesClient::with_base_url("https://codeforces.com/api/");
        assert_eq!(client.user_status_url(), "https://codeforces.com/api/user.status");
    }
}
