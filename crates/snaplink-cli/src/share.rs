use std::fs;
use std::io::{Read, Write};

use snaplink_core::ttl::{DEFAULT_HIT_LIMIT, DEFAULT_TTL_SECONDS};
use snaplink_core::{parse_hit_limit, parse_ttl, Password};

use crate::cli::{parse_flags, print_share_help, resolve_globals, CliError, Deps, ParsedArgs};
use crate::client::CreateSecretRequest;
use crate::clipboard::{copy_to_clipboard, Notice};
use crate::color::{color_func, DIM, SUCCESS, URL, WARN};
use crate::password::{password_source, prompt_new_password, write_error, PasswordSource};

pub const EMPTY_SECRET: &str = "Secret can not be empty";

pub fn run_share(args: &[String], deps: &mut Deps) -> i32 {
    let mut pa = match parse_flags(args) {
        Ok(pa) => pa,
        Err(CliError::ShowHelp) => {
            print_share_help(deps);
            return 0;
        }
        Err(CliError::Error(e)) => {
            write_error(&mut deps.stderr, false, (deps.is_tty)(), &e);
            return 2;
        }
    };
    resolve_globals(&mut pa, deps);
    let is_tty = (deps.is_tty)();

    if !pa.args.is_empty() {
        write_error(
            &mut deps.stderr,
            pa.json,
            is_tty,
            &format!("unexpected argument {:?}", pa.args[0]),
        );
        return 2;
    }

    let ttl = if pa.ttl.is_empty() {
        DEFAULT_TTL_SECONDS
    } else {
        match parse_ttl(&pa.ttl) {
            Ok(ttl) => ttl,
            Err(e) => {
                write_error(
                    &mut deps.stderr,
                    pa.json,
                    is_tty,
                    &format!("invalid TTL: {}", e),
                );
                return 2;
            }
        }
    };

    let hit_limit = if pa.hit_limit.is_empty() {
        DEFAULT_HIT_LIMIT
    } else {
        match parse_hit_limit(&pa.hit_limit) {
            Ok(n) => n,
            Err(e) => {
                write_error(&mut deps.stderr, pa.json, is_tty, &e.to_string());
                return 2;
            }
        }
    };

    let secret = match read_secret(&pa, deps) {
        Ok(s) => s,
        Err(e) => {
            write_error(&mut deps.stderr, pa.json, is_tty, &e);
            return 2;
        }
    };

    let password = match resolve_share_password(&pa, deps) {
        Ok(p) => p,
        Err(e) => {
            write_error(&mut deps.stderr, pa.json, is_tty, &e);
            return 2;
        }
    };
    let password_protected = password.is_some();

    if is_tty && !pa.silent && !pa.json {
        let c = color_func(true);
        let _ = write!(deps.stderr, "{} Creating secret...", c(WARN, "\u{25CB}"));
        let _ = deps.stderr.flush();
    }

    let client = (deps.make_api)(&pa.api_url, pa.timeout);
    let req = CreateSecretRequest {
        secret,
        hit_limit,
        ttl,
        password: password.map(|p| p.expose().to_string()),
    };

    let resp = match client.create_secret(&req) {
        Ok(r) => {
            if is_tty && !pa.silent && !pa.json {
                let c = color_func(true);
                let detail = format!(
                    "{} view{}, expires in {}",
                    hit_limit,
                    if hit_limit == 1 { "" } else { "s" },
                    humanize_seconds(ttl)
                );
                let _ = write!(
                    deps.stderr,
                    "\r\x1b[2K{} Secret created.  {}\n",
                    c(SUCCESS, "\u{2713}"),
                    c(DIM, &detail)
                );
            }
            r
        }
        Err(e) => {
            if is_tty && !pa.silent && !pa.json {
                let _ = write!(deps.stderr, "\r\x1b[2K");
            }
            write_error(&mut deps.stderr, pa.json, is_tty, &e);
            return 1;
        }
    };

    if pa.json {
        let out = serde_json::json!({
            "url": resp.url,
            "ttl": ttl,
            "hit_limit": hit_limit,
            "password_protected": password_protected,
        });
        let _ = writeln!(deps.stdout, "{}", out);
    } else if (deps.is_stdout_tty)() {
        let c = color_func(true);
        let _ = writeln!(deps.stdout, "{}", c(URL, &resp.url));
    } else {
        let _ = writeln!(deps.stdout, "{}", resp.url);
    }

    if pa.copy {
        let notice = (!pa.silent).then(|| {
            Notice::info(
                "Link to your secret created and copied to clipboard",
                Some(&resp.url),
            )
        });
        copy_to_clipboard(deps, &resp.url, notice);
    }

    if pa.qr && !pa.json && is_tty {
        crate::qr::write_qr(&mut deps.stderr, &resp.url);
    }

    0
}

/// Read the secret from exactly one of `--text`, `--file` or stdin.
fn read_secret(pa: &ParsedArgs, deps: &mut Deps) -> Result<String, String> {
    if !pa.text.is_empty() && !pa.file.is_empty() {
        return Err("specify exactly one input source (stdin, --text, or --file)".into());
    }

    let secret = if !pa.text.is_empty() {
        pa.text.clone()
    } else if !pa.file.is_empty() {
        fs::read_to_string(&pa.file).map_err(|e| format!("read file: {}", e))?
    } else {
        if (deps.is_tty)() && !pa.silent {
            let c = color_func(true);
            let _ = writeln!(
                deps.stderr,
                "{}",
                c(DIM, "Enter your secret, then press Ctrl-D:")
            );
        }
        let mut buf = String::new();
        deps.stdin
            .read_to_string(&mut buf)
            .map_err(|e| format!("read stdin: {}", e))?;
        buf
    };

    if secret.trim().is_empty() {
        return Err(EMPTY_SECRET.into());
    }
    Ok(secret)
}

fn resolve_share_password(pa: &ParsedArgs, deps: &mut Deps) -> Result<Option<Password>, String> {
    match password_source(pa, deps)? {
        PasswordSource::None => Ok(None),
        PasswordSource::Preset(p) => Ok(Some(p)),
        PasswordSource::Prompt => prompt_new_password(deps).map(Some),
    }
}

/// Format seconds as the largest whole unit, e.g. "2 hours" or "90 seconds".
pub(crate) fn humanize_seconds(secs: i64) -> String {
    const UNITS: [(i64, &str); 4] = [
        (604_800, "week"),
        (86_400, "day"),
        (3_600, "hour"),
        (60, "minute"),
    ];

    let (val, unit) = UNITS
        .iter()
        .find(|(size, _)| secs >= *size && secs % size == 0)
        .map(|(size, unit)| (secs / size, *unit))
        .unwrap_or((secs, "second"));
    format!("{val} {unit}{}", if val == 1 { "" } else { "s" })
}
