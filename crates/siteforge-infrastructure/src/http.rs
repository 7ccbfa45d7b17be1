//! Shared HTTP response handling.

use reqwest::Response;
use siteforge_core::error::{Result, SiteforgeError};

/// Converts a non-success response into a typed error, extracting the
/// backend's `detail` message when the body carries one.
///
/// 404 maps to `NotFound` so the routing layer can distinguish a missing
/// resource from a transport failure.
pub async fn ensure_success(
    response: Response,
    entity_type: &'static str,
    id: &str,
) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(SiteforgeError::not_found(entity_type, id));
    }

    let body = response.text().await.unwrap_or_default();
    let detail = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|json| {
            json.get("detail")
                .and_then(|d| d.as_str())
                .map(|d| d.to_string())
        })
        .unwrap_or(body);

    Err(SiteforgeError::network(format!(
        "{entity_type} '{id}': HTTP {status}: {detail}"
    )))
}
