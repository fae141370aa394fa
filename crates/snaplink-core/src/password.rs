use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordError {
    #[error("Password is required.")]
    Blank,
}

/// A password that is known to contain at least one non-whitespace character.
///
/// The raw value is kept as entered; only the blank check looks past
/// surrounding whitespace.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    pub fn parse(raw: &str) -> Result<Self, PasswordError> {
        if raw.trim().is_empty() {
            return Err(PasswordError::Blank);
        }
        Ok(Password(raw.to_string()))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank() {
        assert_eq!(Password::parse(""), Err(PasswordError::Blank));
        assert_eq!(Password::parse("   \t\n"), Err(PasswordError::Blank));
    }

    #[test]
    fn keeps_raw_value() {
        let p = Password::parse(" pw ").unwrap();
        assert_eq!(p.expose(), " pw ");
    }

    #[test]
    fn debug_is_redacted() {
        let p = Password::parse("hunter2").unwrap();
        let shown = format!("{:?}", p);
        assert!(!shown.contains("hunter2"), "{}", shown);
    }

    #[test]
    fn error_message_matches_form_text() {
        assert_eq!(PasswordError::Blank.to_string(), "Password is required.");
    }
}
