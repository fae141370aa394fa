use std::fs;
use std::io::Write;

use snaplink_core::Password;

use crate::cli::{Deps, ParsedArgs};
use crate::color::{color_func, ERROR};

/// Where a password for the current command comes from.
#[derive(Debug)]
pub enum PasswordSource {
    None,
    Prompt,
    Preset(Password),
}

/// Resolve the password flags. Env and file values are validated here, so
/// a blank password is rejected before any request is made.
pub fn password_source(args: &ParsedArgs, deps: &Deps) -> Result<PasswordSource, String> {
    let count = [
        args.password_prompt,
        !args.password_env.is_empty(),
        !args.password_file.is_empty(),
    ]
    .iter()
    .filter(|set| **set)
    .count();
    if count > 1 {
        return Err(
            "specify at most one of --password-prompt, --password-env, --password-file".into(),
        );
    }

    if args.password_prompt {
        return Ok(PasswordSource::Prompt);
    }

    if !args.password_env.is_empty() {
        let value = (deps.getenv)(&args.password_env).unwrap_or_default();
        return Password::parse(&value).map(PasswordSource::Preset).map_err(|_| {
            format!(
                "environment variable {:?} is empty or not set",
                args.password_env
            )
        });
    }

    if !args.password_file.is_empty() {
        let data = fs::read_to_string(&args.password_file)
            .map_err(|e| format!("read password file: {}", e))?;
        let value = data.trim_end_matches(['\r', '\n']);
        return Password::parse(value)
            .map(PasswordSource::Preset)
            .map_err(|_| "password file is empty".to_string());
    }

    Ok(PasswordSource::None)
}

/// Prompt for a new password and its confirmation.
pub fn prompt_new_password(deps: &mut Deps) -> Result<Password, String> {
    let first = (deps.read_pass)("Password: ", &mut deps.stderr)
        .map_err(|e| format!("read password: {}", e))?;
    let password = Password::parse(&first).map_err(|e| e.to_string())?;

    let second = (deps.read_pass)("Confirm password: ", &mut deps.stderr)
        .map_err(|e| format!("read password confirmation: {}", e))?;
    if first != second {
        return Err("passwords do not match".into());
    }

    Ok(password)
}

/// Write an error message to the writer, in JSON or plain format.
pub fn write_error(w: &mut dyn Write, json_mode: bool, is_tty: bool, msg: &str) {
    if json_mode {
        let _ = writeln!(w, "{}", serde_json::json!({ "error": msg }));
    } else {
        let c = color_func(is_tty);
        let _ = writeln!(w, "{} {}", c(ERROR, "error:"), msg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_error_plain() {
        let mut buf = Vec::new();
        write_error(&mut buf, false, false, "boom");
        assert_eq!(String::from_utf8(buf).unwrap(), "error: boom\n");
    }

    #[test]
    fn write_error_json() {
        let mut buf = Vec::new();
        write_error(&mut buf, true, false, "say \"hi\"");
        let out = String::from_utf8(buf).unwrap();
        let v: serde_json::Value = serde_json::from_str(out.trim()).unwrap();
        assert_eq!(v["error"], "say \"hi\"");
    }

    #[test]
    fn write_error_colored_on_tty() {
        let mut buf = Vec::new();
        write_error(&mut buf, false, true, "boom");
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("\x1b[31merror:\x1b[0m"), "{:?}", out);
    }
}
