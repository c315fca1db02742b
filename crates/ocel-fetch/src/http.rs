//! HTTP response status checks.

use crate::error::FetchError;

/// Return the response unchanged on success, or [`FetchError::Status`]
/// carrying the status code and response body.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, FetchError> {
    if !resp.status().is_success() {
        return Err(FetchError::Status {
            status: resp.status().as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}
