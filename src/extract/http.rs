// src/extract/http.rs
// =============================================================================
// This module fetches a single seed page over HTTP.
//
// Key functionality:
// - Makes exactly one GET request per seed (no retries)
// - Measures how long the request took and discards slow results
// - Treats anything other than 200 OK as a failed page
// - Reports every failure as a typed FetchError
//
// The elapsed time is measured after the response body has been read, so a
// page that arrives late is thrown away even though it did arrive. The
// client itself is also built with the same limit (see build_client), which
// is what actually stops a request that hangs.
// =============================================================================

use reqwest::{Client, StatusCode};
use std::collections::BTreeSet;
use std::time::{Duration, Instant};
use thiserror::Error;
use url::Url;

use super::html::extract_absolute_links;

// Everything that can go wrong while fetching one seed page
#[derive(Debug, Error)]
pub enum FetchError {
    /// The seed line is not a valid URL
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The page arrived, but after the time limit
    #[error("took too long ({:.2}s)", .elapsed.as_secs_f64())]
    TooSlow { elapsed: Duration },

    /// The server answered with something other than 200 OK
    #[error("status code {0}")]
    Status(u16),

    /// The HTTP client gave up waiting
    #[error("request timed out")]
    Timeout,

    /// DNS, connection, TLS or body errors
    #[error("network error: {0}")]
    Network(reqwest::Error),
}

impl From<reqwest::Error> for FetchError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            FetchError::Timeout
        } else {
            FetchError::Network(error)
        }
    }
}

// Creates the HTTP client used for the whole run
//
// Parameters:
//   timeout: total time allowed for one request, body included
//
// Returns: a reqwest Client, or the builder error
pub fn build_client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("link-harvester/", env!("CARGO_PKG_VERSION")))
        .build()
}

// Fetches one page and extracts its absolute links
//
// Parameters:
//   client: reqwest HTTP client (borrowed, shared by the whole run)
//   url: the seed URL, already trimmed
//   limit: results that take longer than this are discarded
//
// Returns: the set of absolute links on the page, or why there are none
pub async fn fetch_links(
    client: &Client,
    url: &str,
    limit: Duration,
) -> Result<BTreeSet<String>, FetchError> {
    let target = Url::parse(url)?;

    let started = Instant::now();
    let response = client.get(target).send().await?;
    let status = response.status();
    let body = response.text().await?;
    let elapsed = started.elapsed();

    if elapsed > limit {
        return Err(FetchError::TooSlow { elapsed });
    }

    if status != StatusCode::OK {
        return Err(FetchError::Status(status.as_u16()));
    }

    Ok(extract_absolute_links(&body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    async fn serve_html(mock_server: &MockServer, route: &str, status: u16, body: &str) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(
                ResponseTemplate::new(status)
                    .insert_header("content-type", "text/html")
                    .set_body_string(body),
            )
            .mount(mock_server)
            .await;
    }

    #[tokio::test]
    async fn test_fetch_links_from_page() {
        let mock_server = MockServer::start().await;
        serve_html(
            &mock_server,
            "/",
            200,
            r#"<html><body>
                <a href="http://a.com">A</a>
                <a href="http://a.com">A again</a>
                <a href="/local">Local</a>
                <a href="https://b.com/x">B</a>
            </body></html>"#,
        )
        .await;

        let client = build_client(Duration::from_secs(5)).unwrap();
        let links = fetch_links(&client, &mock_server.uri(), Duration::from_secs(5))
            .await
            .unwrap();

        assert_eq!(
            links.into_iter().collect::<Vec<_>>(),
            vec!["http://a.com", "https://b.com/x"]
        );
    }

    #[tokio::test]
    async fn test_non_200_status_is_an_error() {
        let mock_server = MockServer::start().await;
        serve_html(&mock_server, "/gone", 404, r#"<a href="http://a.com">A</a>"#).await;

        let client = build_client(Duration::from_secs(5)).unwrap();
        let url = format!("{}/gone", mock_server.uri());
        let result = fetch_links(&client, &url, Duration::from_secs(5)).await;

        assert!(matches!(result, Err(FetchError::Status(404))));
    }

    #[tokio::test]
    async fn test_other_success_codes_are_rejected() {
        let mock_server = MockServer::start().await;
        serve_html(&mock_server, "/", 203, r#"<a href="http://a.com">A</a>"#).await;

        let client = build_client(Duration::from_secs(5)).unwrap();
        let result = fetch_links(&client, &mock_server.uri(), Duration::from_secs(5)).await;

        assert!(matches!(result, Err(FetchError::Status(203))));
    }

    #[tokio::test]
    async fn test_slow_response_is_discarded() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"<a href="http://a.com">A</a>"#)
                    .set_delay(Duration::from_millis(300)),
            )
            .mount(&mock_server)
            .await;

        // The client itself has no limit, so only the elapsed check can reject it
        let client = Client::new();
        let result = fetch_links(&client, &mock_server.uri(), Duration::from_millis(50)).await;

        assert!(matches!(result, Err(FetchError::TooSlow { .. })));
    }

    #[tokio::test]
    async fn test_client_timeout_is_reported_as_timeout() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&mock_server)
            .await;

        let client = build_client(Duration::from_millis(100)).unwrap();
        let result = fetch_links(&client, &mock_server.uri(), Duration::from_millis(100)).await;

        assert!(matches!(result, Err(FetchError::Timeout)));
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let client = build_client(Duration::from_secs(5)).unwrap();
        let result = fetch_links(&client, "http://127.0.0.1:1/", Duration::from_secs(5)).await;

        assert!(matches!(result, Err(FetchError::Network(_))));
    }

    #[tokio::test]
    async fn test_invalid_seed_never_hits_network() {
        let client = build_client(Duration::from_secs(5)).unwrap();
        let result = fetch_links(&client, "not a url", Duration::from_secs(5)).await;

        assert!(matches!(result, Err(FetchError::InvalidUrl(_))));
    }

    #[test]
    fn test_too_slow_message_shows_seconds() {
        let error = FetchError::TooSlow {
            elapsed: Duration::from_millis(61_500),
        };
        assert_eq!(error.to_string(), "took too long (61.50s)");
    }
}
