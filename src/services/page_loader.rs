//! Fetches an HTML page so it can be classified and measured.

use std::time::Duration;

use url::Url;

use crate::types::errors::FetchError;

/// A fetched page.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub html: String,
    /// URL after redirects; its host is what the classifier sees.
    pub url: String,
    pub status: u16,
    pub content_type: String,
}

/// Adds `https://` when the scheme is missing and validates the result.
pub fn normalize_url(url_str: &str) -> Result<Url, FetchError> {
    let trimmed = url_str.trim();
    let candidate = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };
    Url::parse(&candidate).map_err(|e| FetchError::InvalidUrl(format!("{}: {}", url_str, e)))
}

/// Downloads `url_str` and returns its body.
pub async fn fetch_page(url_str: &str) -> Result<FetchedPage, FetchError> {
    let url = normalize_url(url_str)?;

    let client = reqwest::Client::builder()
        .user_agent(concat!("readpace/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(15))
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| FetchError::RequestFailed(format!("Client error: {}", e)))?;

    log::debug!("GET {}", url);
    let response = client
        .get(url.as_str())
        .header(
            "Accept",
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        )
        .send()
        .await
        .map_err(|e| FetchError::RequestFailed(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::HttpStatus(status.as_u16()));
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("text/html")
        .to_string();
    let final_url = response.url().to_string();

    let html = response
        .text()
        .await
        .map_err(|e| FetchError::BodyError(e.to_string()))?;

    Ok(FetchedPage {
        html,
        url: final_url,
        status: status.as_u16(),
        content_type,
    })
}
