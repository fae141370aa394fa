/// Shown when a 401 arrives without an explanatory body.
pub const PASSWORD_REQUIRED_FALLBACK: &str = "Password required.";
/// Shown when the server rejects a fetch without a body.
pub const FETCH_FAILED_FALLBACK: &str = "Failed to fetch the secret.";
/// Shown when the transport fails without a usable message.
pub const UNEXPECTED_ERROR_FALLBACK: &str = "Unexpected error occurred.";

/// Classified result of one secret-fetch attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    /// 200: the body is the secret text.
    Success(String),
    /// 401: the body explains why a password is needed.
    NeedsPassword(String),
    /// Anything else, including transport failures.
    Error(String),
}

impl FetchOutcome {
    /// Classify a completed HTTP exchange by status code.
    pub fn from_response(status: u16, body: String) -> Self {
        match status {
            200 => FetchOutcome::Success(body),
            401 => FetchOutcome::NeedsPassword(or_fallback(body, PASSWORD_REQUIRED_FALLBACK)),
            _ => FetchOutcome::Error(or_fallback(body, FETCH_FAILED_FALLBACK)),
        }
    }

    /// Convert a failed request (no response at all) into an outcome.
    pub fn transport_failure(message: impl Into<String>) -> Self {
        FetchOutcome::Error(or_fallback(message.into(), UNEXPECTED_ERROR_FALLBACK))
    }

    pub fn label(&self) -> &'static str {
        match self {
            FetchOutcome::Success(_) => "success",
            FetchOutcome::NeedsPassword(_) => "needs-password",
            FetchOutcome::Error(_) => "error",
        }
    }
}

fn or_fallback(text: String, fallback: &str) -> String {
    if text.trim().is_empty() {
        fallback.to_string()
    } else {
        text
    }
}
