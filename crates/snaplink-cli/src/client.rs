use std::time::Duration;

use tracing::debug;

pub use snaplink_core::api::*;
use snaplink_core::{FetchOutcome, Password};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP API client for the snaplink service.
pub struct ApiClient {
    pub api_url: String,
    pub timeout: Duration,
}

impl ApiClient {
    pub fn new(api_url: &str, timeout: Duration) -> Self {
        ApiClient {
            api_url: api_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    fn agent(&self) -> ureq::Agent {
        ureq::Agent::new_with_config(
            ureq::config::Config::builder()
                .timeout_global(Some(self.timeout))
                .http_status_as_error(false)
                .build(),
        )
    }

    fn handle_ureq_error(&self, err: ureq::Error) -> String {
        let msg = err.to_string();
        if msg.contains("tls") || msg.contains("certificate") || msg.contains("ssl") {
            format!("TLS error connecting to {}: {}", self.api_url, msg)
        } else if msg.contains("dns") || msg.contains("resolve") || msg.contains("No such host") {
            format!("cannot resolve host {}: {}", self.api_url, msg)
        } else if msg.contains("timed out") || msg.contains("timeout") {
            format!("connection to {} timed out", self.api_url)
        } else if msg.contains("Connection refused") || msg.contains("connection refused") {
            format!("connection refused by {}", self.api_url)
        } else {
            format!("HTTP request failed: {}", msg)
        }
    }

    fn read_api_error_from_response(&self, resp: ureq::http::Response<ureq::Body>) -> String {
        let status = resp.status().as_u16();
        let body = resp.into_body().read_to_string().unwrap_or_default();
        format_api_error(status, &body)
    }
}

/// Build the retrieval URL for a secret. The code is encoded as a single
/// path segment and the password, if any, as a query parameter.
pub fn secret_url(api_url: &str, code: &str, password: Option<&Password>) -> String {
    let mut url = format!(
        "{}/secrets/{}",
        api_url.trim_end_matches('/'),
        urlencoding::encode(code)
    );
    if let Some(p) = password {
        url.push_str("?password=");
        url.push_str(&urlencoding::encode(p.expose()));
    }
    url
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

impl SnaplinkApi for ApiClient {
    fn fetch_secret(&self, code: &str, password: Option<&Password>) -> FetchOutcome {
        let endpoint = secret_url(&self.api_url, code, password);
        debug!(code, with_password = password.is_some(), "fetching secret");

        let resp = match self
            .agent()
            .get(&endpoint)
            .header("Accept", "text/html")
            .call()
        {
            Ok(resp) => resp,
            Err(e) => {
                let msg = self.handle_ureq_error(e);
                debug!(code, error = %msg, "secret fetch failed");
                return FetchOutcome::transport_failure(msg);
            }
        };

        let status = resp.status().as_u16();
        debug!(code, status, "secret fetch completed");
        match resp.into_body().read_to_string() {
            Ok(body) => FetchOutcome::from_response(status, body),
            Err(e) => FetchOutcome::transport_failure(format!("decode response: {}", e)),
        }
    }

    fn create_secret(&self, req: &CreateSecretRequest) -> Result<CreateSecretResponse, String> {
        let endpoint = format!("{}/secrets", self.api_url);
        let body = serde_json::to_vec(req).map_err(|e| format!("marshal request: {}", e))?;
        debug!(hit_limit = req.hit_limit, ttl = req.ttl, "creating secret");

        let resp = self
            .agent()
            .post(&endpoint)
            .header("Content-Type", "application/json")
            .send(&body[..])
            .map_err(|e| self.handle_ureq_error(e))?;

        if !is_success(resp.status().as_u16()) {
            return Err(self.read_api_error_from_response(resp));
        }

        let body_str = resp
            .into_body()
            .read_to_string()
            .map_err(|e| format!("decode response: {}", e))?;
        let result: CreateSecretResponse =
            serde_json::from_str(&body_str).map_err(|e| format!("decode response: {}", e))?;

        Ok(result)
    }

    fn shorten(&self, url: &str) -> Result<String, String> {
        debug!(target_url = url, "creating short link");
        let resp = self
            .agent()
            .post(&self.api_url)
            .header("Content-Type", "text/plain")
            .send(url.as_bytes())
            .map_err(|e| self.handle_ureq_error(e))?;

        if !is_success(resp.status().as_u16()) {
            return Err(self.read_api_error_from_response(resp));
        }

        let link = resp
            .into_body()
            .read_to_string()
            .map_err(|e| format!("decode response: {}", e))?;
        let link = link.trim();
        if link.is_empty() {
            return Err("server returned an empty short link".into());
        }
        Ok(link.to_string())
    }
}
