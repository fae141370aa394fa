use serde::{Deserialize, Serialize};

use crate::outcome::FetchOutcome;
use crate::password::Password;

/// API payload for creating a secret.
#[derive(Clone, Debug, Serialize)]
pub struct CreateSecretRequest {
    pub secret: String,
    #[serde(rename = "hitLimit")]
    pub hit_limit: u32,
    /// Seconds until expiry.
    pub ttl: i64,
    /// Sent as `null` when the secret is not password protected.
    pub password: Option<String>,
}

/// API response from creating a secret.
#[derive(Clone, Debug, Deserialize)]
pub struct CreateSecretResponse {
    pub url: String,
}

/// Error body returned by the creation endpoints.
#[derive(Deserialize)]
pub struct ApiErrorResponse {
    #[serde(default)]
    pub message: String,
}

/// Trait abstracting the service API for testing.
pub trait SnaplinkApi {
    /// Fetch a secret by code. Never fails: every failure is classified
    /// into `FetchOutcome::Error`.
    fn fetch_secret(&self, code: &str, password: Option<&Password>) -> FetchOutcome;

    fn create_secret(&self, req: &CreateSecretRequest) -> Result<CreateSecretResponse, String>;

    /// Create a short link for `url` and return it.
    fn shorten(&self, url: &str) -> Result<String, String>;
}

/// Friendly fallback error message for HTTP status codes when the server
/// provides no JSON error body.
pub fn format_status_error(status: u16) -> String {
    let desc = match status {
        400 => "request rejected",
        404 => "endpoint not found; check the API URL",
        413 => "secret is too large",
        429 => "rate limit exceeded; please try again in a few seconds",
        500 | 502 | 503 => "server is temporarily unavailable; please try again later",
        _ => "",
    };
    if desc.is_empty() {
        format!("server error ({})", status)
    } else {
        format!("server error ({}): {}", status, desc)
    }
}

/// Format a creation error from a JSON body and status code.
pub fn format_api_error(status: u16, body: &str) -> String {
    if let Ok(err_resp) = serde_json::from_str::<ApiErrorResponse>(body) {
        let message = err_resp.message.trim();
        if !message.is_empty() {
            return format!("server error ({}): {}", status, message);
        }
    }
    format_status_error(status)
}
