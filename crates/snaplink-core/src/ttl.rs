/// Maximum allowed TTL (1 year in seconds).
pub const MAX_TTL_SECONDS: i64 = 31_536_000;
/// TTL used when `share` is not given `--ttl`.
pub const DEFAULT_TTL_SECONDS: i64 = 86_400;
/// Hit limit used when `share` is not given `--hit-limit`.
pub const DEFAULT_HIT_LIMIT: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TtlError {
    #[error("empty value")]
    Empty,
    #[error("unknown unit in {0:?}")]
    UnknownUnit(String),
    #[error("malformed value {0:?}")]
    Malformed(String),
    #[error("value must be positive")]
    NotPositive,
    #[error("exceeds maximum (31536000 seconds)")]
    TooLarge,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Please enter a valid positive integer")]
pub struct HitLimitError;

/// Parse a TTL string to seconds.
/// Grammar: <positive-integer>[s|m|h|d|w]; no unit means seconds.
pub fn parse_ttl(s: &str) -> Result<i64, TtlError> {
    let s = s.trim();
    let Some(last) = s.chars().last() else {
        return Err(TtlError::Empty);
    };

    let (digits, multiplier) = if last.is_ascii_digit() {
        (s, 1)
    } else {
        let multiplier = match last {
            's' => 1,
            'm' => 60,
            'h' => 3_600,
            'd' => 86_400,
            'w' => 604_800,
            _ => return Err(TtlError::UnknownUnit(s.to_string())),
        };
        (&s[..s.len() - last.len_utf8()], multiplier)
    };

    // Digits only: no sign, decimal point or inner whitespace.
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TtlError::Malformed(s.to_string()));
    }

    let n: i64 = digits.parse().map_err(|_| TtlError::TooLarge)?;
    if n == 0 {
        return Err(TtlError::NotPositive);
    }

    match n.checked_mul(multiplier) {
        Some(secs) if secs <= MAX_TTL_SECONDS => Ok(secs),
        _ => Err(TtlError::TooLarge),
    }
}

/// Parse the number of permitted retrievals.
pub fn parse_hit_limit(s: &str) -> Result<u32, HitLimitError> {
    match s.trim().parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(HitLimitError),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn units() {
        assert_eq!(parse_ttl("30").unwrap(), 30);
        assert_eq!(parse_ttl("30s").unwrap(), 30);
        assert_eq!(parse_ttl("5m").unwrap(), 300);
        assert_eq!(parse_ttl("2h").unwrap(), 7_200);
        assert_eq!(parse_ttl("1d").unwrap(), 86_400);
        assert_eq!(parse_ttl(" 1w ").unwrap(), 604_800);
    }

    #[test]
    fn bounds() {
        assert_eq!(parse_ttl("365d").unwrap(), MAX_TTL_SECONDS);
        assert_eq!(parse_ttl("366d"), Err(TtlError::TooLarge));
        assert_eq!(parse_ttl("0"), Err(TtlError::NotPositive));
        assert_eq!(parse_ttl("99999999999999999999"), Err(TtlError::TooLarge));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_ttl(""), Err(TtlError::Empty));
        assert!(matches!(parse_ttl("x"), Err(TtlError::UnknownUnit(_))));
        assert!(matches!(parse_ttl("5y"), Err(TtlError::UnknownUnit(_))));
        assert!(matches!(parse_ttl("m"), Err(TtlError::Malformed(_))));
        assert!(matches!(parse_ttl("-5m"), Err(TtlError::Malformed(_))));
        assert!(matches!(parse_ttl("+5m"), Err(TtlError::Malformed(_))));
        assert!(matches!(parse_ttl("1.5h"), Err(TtlError::Malformed(_))));
        assert!(matches!(parse_ttl("1 h"), Err(TtlError::Malformed(_))));
    }

    #[test]
    fn hit_limit() {
        assert_eq!(parse_hit_limit("1").unwrap(), 1);
        assert_eq!(parse_hit_limit(" 25 ").unwrap(), 25);
        assert_eq!(parse_hit_limit("0"), Err(HitLimitError));
        assert_eq!(parse_hit_limit("-3"), Err(HitLimitError));
        assert_eq!(parse_hit_limit("2.5"), Err(HitLimitError));
        assert_eq!(parse_hit_limit("many"), Err(HitLimitError));
    }

    #[test]
    fn default_ttl_is_valid() {
        assert!(DEFAULT_TTL_SECONDS <= MAX_TTL_SECONDS);
    }
}
