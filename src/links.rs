//! URL validation and display titles for saved links.

use crate::error::ApiError;
use url::Url;

/// Accept only absolute `http`/`https` URLs.
pub fn validate_url(input: &str) -> Result<Url, ApiError> {
    let parsed = Url::parse(input.trim()).map_err(|_| ApiError::InvalidUrl(input.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        _ => Err(ApiError::InvalidUrl(input.to_string())),
    }
}

/// Host name of the URL, or the URL itself when it has none.
pub fn title_for(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_else(|| url.to_string())
}
