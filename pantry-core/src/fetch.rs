//! Fetching remote datasets over HTTP.

use std::time::Duration;

use crate::error::FetchError;

const USER_AGENT: &str = "Mozilla/5.0 (compatible; Pantry/0.1)";
const TIMEOUT: Duration = Duration::from_secs(30);

/// Fetch binary content from an http(s) URL.
///
/// Non-success statuses are returned as `FetchError::Status` rather than
/// handing an error page to the caller as data.
pub async fn fetch_bytes(url: &str) -> Result<Vec<u8>, FetchError> {
    if !is_http_url(url) {
        return Err(FetchError::InvalidUrl(url.to_string()));
    }

    let client = reqwest::Client::builder()
        .timeout(TIMEOUT)
        .user_agent(USER_AGENT)
        .build()?;

    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let bytes = response.bytes().await?;
    tracing::debug!(url, bytes = bytes.len(), "Fetched remote dataset");
    Ok(bytes.to_vec())
}

pub fn is_http_url(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_http_url() {
        assert!(is_http_url("https://example.com/recipes.csv"));
        assert!(is_http_url("http://localhost:3000/recipes.json"));
        assert!(!is_http_url("data/recipes.csv"));
        assert!(!is_http_url("ftp://example.com/recipes.csv"));
    }

    #[tokio::test]
    async fn test_rejects_non_http_url() {
        let err = fetch_bytes("file:///etc/passwd").await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl(_)));
    }
}
