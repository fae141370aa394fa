use url::Url;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LinkError {
    #[error("secret code or link is empty")]
    Empty,
    #[error("link has no secret code in its path")]
    MissingCode,
    #[error("invalid link: {0}")]
    Malformed(String),
    #[error("secret code contains invalid character {0:?}")]
    InvalidCharacter(char),
    #[error("Please enter a valid URL string")]
    InvalidTarget,
}

/// Extract the secret code from a share link or a bare code.
///
/// Accepts:
///   - https://host/<base-dir>/<code>   (last non-empty path segment)
///   - <code>                           (optionally with a leading '/')
pub fn parse_secret_code(raw: &str) -> Result<String, LinkError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(LinkError::Empty);
    }

    let code = if raw.contains("://") {
        let url = Url::parse(raw).map_err(|e| LinkError::Malformed(e.to_string()))?;
        let segment = url
            .path_segments()
            .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
            .ok_or(LinkError::MissingCode)?;
        urlencoding::decode(segment)
            .map_err(|e| LinkError::Malformed(e.to_string()))?
            .into_owned()
    } else {
        raw.trim_start_matches('/').to_string()
    };

    if code.is_empty() {
        return Err(LinkError::MissingCode);
    }
    if let Some(bad) = code
        .chars()
        .find(|c| c.is_whitespace() || matches!(c, '/' | '?' | '#'))
    {
        return Err(LinkError::InvalidCharacter(bad));
    }
    Ok(code)
}

/// Validate the target of a short link: an absolute http(s) URL with a host.
pub fn validate_target_url(raw: &str) -> Result<Url, LinkError> {
    let url = Url::parse(raw.trim()).map_err(|_| LinkError::InvalidTarget)?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(LinkError::InvalidTarget);
    }
    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(LinkError::InvalidTarget),
    }
}
