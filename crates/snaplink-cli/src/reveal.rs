use std::io::Write;

use snaplink_core::{parse_secret_code, FetchTicket, Password, RetrievalSession, View};
use tracing::debug;

use crate::cli::{parse_flags, print_reveal_help, resolve_globals, CliError, Deps, ParsedArgs};
use crate::client::SnaplinkApi;
use crate::clipboard::{copy_to_clipboard, Notice};
use crate::color::{color_func, WARN};
use crate::password::{password_source, write_error, PasswordSource};

pub fn run_reveal(args: &[String], deps: &mut Deps) -> i32 {
    let mut pa = match parse_flags(args) {
        Ok(pa) => pa,
        Err(CliError::ShowHelp) => {
            print_reveal_help(deps);
            return 0;
        }
        Err(CliError::Error(e)) => {
            write_error(&mut deps.stderr, false, (deps.is_tty)(), &e);
            return 2;
        }
    };
    resolve_globals(&mut pa, deps);
    let is_tty = (deps.is_tty)();

    if pa.args.len() > 1 {
        write_error(
            &mut deps.stderr,
            pa.json,
            is_tty,
            "expected a single secret code or link",
        );
        return 2;
    }

    let code = match pa.args.first() {
        None => None,
        Some(raw) => match parse_secret_code(raw) {
            Ok(code) => Some(code),
            Err(e) => {
                write_error(&mut deps.stderr, pa.json, is_tty, &e.to_string());
                return 2;
            }
        },
    };
    let has_code = code.is_some();

    let source = match password_source(&pa, deps) {
        Ok(s) => s,
        Err(e) => {
            write_error(&mut deps.stderr, pa.json, is_tty, &e);
            return 2;
        }
    };
    let can_prompt = match source {
        PasswordSource::Prompt => true,
        PasswordSource::None => is_tty,
        PasswordSource::Preset(_) => false,
    };
    let mut preset = match source {
        PasswordSource::Preset(p) => Some(p),
        _ => None,
    };

    let client = (deps.make_api)(&pa.api_url, pa.timeout);
    let (mut session, mut ticket) = RetrievalSession::mount(code);

    loop {
        if let Some(t) = ticket.take() {
            fetch(&*client, &mut session, t, deps, &pa, is_tty);
        }
        if !session.state().accepts_password() {
            break;
        }
        let password = match preset.take() {
            Some(p) => p,
            None if can_prompt => {
                let message = session.state().error_message().unwrap_or_default().to_string();
                match ask_password(deps, &pa, is_tty, &message) {
                    Ok(p) => p,
                    Err(e) => {
                        write_error(&mut deps.stderr, pa.json, is_tty, &e);
                        return 1;
                    }
                }
            }
            None => break,
        };
        ticket = session.submit_password(password);
    }

    let state = session.state();
    match state.view() {
        View::Revealed { secret } => {
            let secret = secret.clone();
            print_secret(deps, &pa, &secret);
            if pa.copy {
                let notice = (!pa.silent).then(|| Notice::info("Copied to clipboard", None));
                copy_to_clipboard(deps, &secret, notice);
            }
            0
        }
        View::AwaitingPassword { prompt } => {
            let msg = if can_prompt {
                prompt.clone()
            } else {
                format!("{} (use --password-prompt to enter one)", prompt)
            };
            write_error(&mut deps.stderr, pa.json, is_tty, &msg);
            1
        }
        View::Failed { message } => {
            write_error(&mut deps.stderr, pa.json, is_tty, message);
            if has_code {
                1
            } else {
                2
            }
        }
        View::Idle | View::Loading => {
            write_error(
                &mut deps.stderr,
                pa.json,
                is_tty,
                "secret retrieval did not complete",
            );
            1
        }
    }
}

/// Run one fetch and feed its outcome back. The loading line is shown only
/// while the request is outstanding.
fn fetch(
    client: &dyn SnaplinkApi,
    session: &mut RetrievalSession,
    ticket: FetchTicket,
    deps: &mut Deps,
    pa: &ParsedArgs,
    is_tty: bool,
) {
    let show_progress = is_tty && !pa.silent && !pa.json;
    if show_progress {
        let _ = write!(deps.stderr, "Fetching secret...");
        let _ = deps.stderr.flush();
    }

    let outcome = client.fetch_secret(ticket.code(), ticket.password());

    if show_progress {
        let _ = write!(deps.stderr, "\r\x1b[2K");
    }
    let resolution = session.resolve(ticket, outcome);
    debug!(?resolution, phase = ?session.state().phase(), "fetch resolved");
}

/// Show the server's message and prompt until a non-blank password is
/// entered. In JSON mode stderr carries only the final error object, so the
/// message and prompt label are suppressed and blank entries re-prompt
/// quietly.
fn ask_password(
    deps: &mut Deps,
    pa: &ParsedArgs,
    is_tty: bool,
    message: &str,
) -> Result<Password, String> {
    if !pa.json && !message.is_empty() {
        let c = color_func(is_tty);
        let _ = writeln!(deps.stderr, "{}", c(WARN, message));
    }
    loop {
        let read = if pa.json {
            (deps.read_pass)("Password: ", &mut std::io::sink())
        } else {
            (deps.read_pass)("Password: ", &mut deps.stderr)
        };
        let raw = read.map_err(|e| format!("read password: {}", e))?;

        match Password::parse(&raw) {
            Ok(p) => return Ok(p),
            Err(e) if pa.json => debug!(error = %e, "blank password, prompting again"),
            Err(e) => write_error(&mut deps.stderr, false, is_tty, &e.to_string()),
        }
    }
}

fn print_secret(deps: &mut Deps, pa: &ParsedArgs, secret: &str) {
    if pa.json {
        let out = serde_json::json!({ "secret": secret });
        let _ = writeln!(deps.stdout, "{}", out);
    } else if secret.ends_with('\n') {
        let _ = write!(deps.stdout, "{}", secret);
    } else {
        let _ = writeln!(deps.stdout, "{}", secret);
    }
}
