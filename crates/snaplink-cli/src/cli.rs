use std::io::{self, Read, Write};
use std::time::Duration;

use crate::client::{SnaplinkApi, DEFAULT_TIMEOUT};
use crate::color::{color_func, CMD, DIM, HEADING, OPT};
use crate::completion::{BASH_COMPLETION, FISH_COMPLETION, ZSH_COMPLETION};
use crate::config::load_config;
use crate::logging::{filter_directive, LOG_ENV};
use crate::reveal::run_reveal;
use crate::share::run_share;
use crate::shorten::run_shorten;

pub const DEFAULT_API_URL: &str = "https://snaplink.dev/api";
pub const API_URL_ENV: &str = "SNAPLINK_API_URL";
const VERSION: &str = env!("CARGO_PKG_VERSION");

pub type GetenvFn = Box<dyn Fn(&str) -> Option<String>>;
pub type ReadPassFn = Box<dyn Fn(&str, &mut dyn Write) -> io::Result<String>>;
pub type MakeApiFn = Box<dyn Fn(&str, Duration) -> Box<dyn SnaplinkApi>>;
pub type ClipboardFn = Box<dyn Fn(&str) -> Result<(), String>>;
pub type InitLoggingFn = Box<dyn Fn(&str)>;

/// Injectable dependencies for testing.
pub struct Deps {
    pub stdin: Box<dyn Read>,
    pub stdout: Box<dyn Write>,
    pub stderr: Box<dyn Write>,
    pub is_tty: Box<dyn Fn() -> bool>,
    pub is_stdout_tty: Box<dyn Fn() -> bool>,
    pub getenv: GetenvFn,
    /// Installs the log subscriber for an `EnvFilter` directive.
    pub init_logging: InitLoggingFn,
    pub read_pass: ReadPassFn,
    pub make_api: MakeApiFn,
    pub copy_to_clipboard: ClipboardFn,
}

/// Parsed global and command-specific flags.
#[derive(Default)]
pub struct ParsedArgs {
    pub args: Vec<String>,

    // Global
    pub api_url: String,
    pub json: bool,
    pub silent: bool,
    pub verbose: bool,
    pub timeout: Duration,

    // Output
    pub copy: bool,
    pub qr: bool,

    // Share
    pub ttl: String,
    pub hit_limit: String,
    pub text: String,
    pub file: String,

    // Password
    pub password_prompt: bool,
    pub password_env: String,
    pub password_file: String,
}

#[derive(Debug)]
pub enum CliError {
    ShowHelp,
    Error(String),
}

/// Main entry point. Returns exit code.
pub fn run(args: &[String], deps: &mut Deps) -> i32 {
    if args.len() < 2 {
        print_usage(deps);
        return 2;
    }

    let command = &args[1];
    let remaining = &args[2..];

    match command.as_str() {
        "--version" | "-v" | "version" => {
            let _ = writeln!(deps.stdout, "snaplink {}", VERSION);
            0
        }
        "--help" | "-h" => {
            print_help(deps);
            0
        }
        "help" => run_help(remaining, deps),
        "completion" => run_completion(remaining, deps),
        "reveal" | "get" => run_reveal(remaining, deps),
        "share" => run_share(remaining, deps),
        "shorten" => run_shorten(remaining, deps),
        _ => {
            let _ = writeln!(deps.stderr, "error: unknown command {:?}", command);
            print_usage(deps);
            2
        }
    }
}

fn run_help(args: &[String], deps: &mut Deps) -> i32 {
    if args.is_empty() {
        print_help(deps);
        return 0;
    }
    match args[0].as_str() {
        "reveal" | "get" => print_reveal_help(deps),
        "share" => print_share_help(deps),
        "shorten" => print_shorten_help(deps),
        _ => {
            let _ = writeln!(deps.stderr, "error: unknown command {:?}", args[0]);
            return 2;
        }
    }
    0
}

fn run_completion(args: &[String], deps: &mut Deps) -> i32 {
    if args.len() != 1 {
        let _ = writeln!(
            deps.stderr,
            "error: specify a shell (supported: bash, zsh, fish)"
        );
        return 2;
    }
    let script = match args[0].as_str() {
        "bash" => BASH_COMPLETION,
        "zsh" => ZSH_COMPLETION,
        "fish" => FISH_COMPLETION,
        other => {
            let _ = writeln!(
                deps.stderr,
                "error: unsupported shell {:?} (supported: bash, zsh, fish)",
                other
            );
            return 2;
        }
    };
    let _ = write!(deps.stdout, "{}", script);
    0
}

fn take_value(args: &[String], i: &mut usize, flag: &str) -> Result<String, CliError> {
    *i += 1;
    args.get(*i)
        .cloned()
        .ok_or_else(|| CliError::Error(format!("{} requires a value", flag)))
}

/// Parse command-specific flags from args.
pub fn parse_flags(args: &[String]) -> Result<ParsedArgs, CliError> {
    let mut pa = ParsedArgs::default();
    let mut positional = Vec::new();

    let mut i = 0;
    while i < args.len() {
        let arg = &args[i];
        if !arg.starts_with('-') || arg == "-" {
            positional.push(arg.clone());
            i += 1;
            continue;
        }

        match arg.as_str() {
            "--help" | "-h" => return Err(CliError::ShowHelp),
            "--json" => pa.json = true,
            "--silent" => pa.silent = true,
            "--verbose" => pa.verbose = true,
            "--copy" => pa.copy = true,
            "--qr" => pa.qr = true,
            "--api-url" => pa.api_url = take_value(args, &mut i, arg)?,
            "--ttl" => pa.ttl = take_value(args, &mut i, arg)?,
            "--hit-limit" => pa.hit_limit = take_value(args, &mut i, arg)?,
            "--text" => pa.text = take_value(args, &mut i, arg)?,
            "--file" => pa.file = take_value(args, &mut i, arg)?,
            "--password-prompt" => pa.password_prompt = true,
            "--password-env" => pa.password_env = take_value(args, &mut i, arg)?,
            "--password-file" => pa.password_file = take_value(args, &mut i, arg)?,
            _ => return Err(CliError::Error(format!("unknown flag: {}", arg))),
        }
        i += 1;
    }

    pa.args = positional;
    Ok(pa)
}

/// Fill in defaults: flag, then environment, then config file, then built-in.
pub fn resolve_globals(pa: &mut ParsedArgs, deps: &mut Deps) {
    let directive = filter_directive((deps.getenv)(LOG_ENV).as_deref(), pa.verbose);
    (deps.init_logging)(&directive);

    let config = load_config(&*deps.getenv, &mut *deps.stderr);

    if pa.api_url.is_empty() {
        pa.api_url = (deps.getenv)(API_URL_ENV)
            .filter(|v| !v.trim().is_empty())
            .or(config.api_url)
            .unwrap_or_else(|| DEFAULT_API_URL.into());
    }
    pa.api_url = pa.api_url.trim().trim_end_matches('/').to_string();

    pa.timeout = config
        .timeout_secs
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
        .unwrap_or(DEFAULT_TIMEOUT);

    if config.copy == Some(true) {
        pa.copy = true;
    }
}

// --- Help text ---

fn print_usage(deps: &mut Deps) {
    let c = color_func((deps.is_stdout_tty)());
    let _ = write!(
        deps.stderr,
        "{} - short links and one-time secrets\n\nRun '{}' for usage.\n",
        c(CMD, "snaplink"),
        c(CMD, "snaplink help")
    );
}

pub fn print_help(deps: &mut Deps) {
    let c = color_func((deps.is_stdout_tty)());
    let _ = write!(
        deps.stderr,
        "{} - short links and one-time secrets\n\n\
{}\n  {} {} {}\n\n\
{}\n\
  {}       Retrieve a secret (alias: get)\n\
  {}        Create a link to a secret\n\
  {}      Create a short link\n\
  {}   Output shell completion script\n\
  {}      Show version\n\
  {}         Show this help\n\n\
{}\n\
  {} {}    API base URL (default: {})\n\
  {}               Output as JSON\n\
  {}             Suppress status output\n\
  {}            Debug logging to stderr\n\
  {}           Show help\n\
  {}        Show version\n\n\
{}\n\
  echo \"pw123\" | {} {} {} 1h\n\
  {} https://snaplink.dev/abc123\n",
        c(CMD, "snaplink"),
        c(HEADING, "USAGE"),
        c(CMD, "snaplink"),
        c(CMD, "<command>"),
        c(DIM, "[options]"),
        c(HEADING, "COMMANDS"),
        c(CMD, "reveal"),
        c(CMD, "share"),
        c(CMD, "shorten"),
        c(CMD, "completion"),
        c(CMD, "version"),
        c(CMD, "help"),
        c(HEADING, "GLOBAL OPTIONS"),
        c(OPT, "--api-url"),
        c(DIM, "<url>"),
        DEFAULT_API_URL,
        c(OPT, "--json"),
        c(OPT, "--silent"),
        c(OPT, "--verbose"),
        c(OPT, "-h, --help"),
        c(OPT, "-v, --version"),
        c(HEADING, "EXAMPLES"),
        c(CMD, "snaplink"),
        c(CMD, "share"),
        c(OPT, "--ttl"),
        c(CMD, "snaplink reveal"),
    );
}

pub fn print_reveal_help(deps: &mut Deps) {
    let c = color_func((deps.is_stdout_tty)());
    let _ = write!(
        deps.stderr,
        "{} {} - Retrieve a secret\n\n\
{}\n  {} {} {} {}\n\n\
{}\n\
  {}               Copy the secret to the clipboard\n\
  {}    Prompt for the password even without a TTY\n\
  {} {}  Read password from env var\n\
  {} {}  Read password from file\n\
  {} {}     API base URL\n\
  {}               Output as JSON\n\
  {}           Show help\n\n\
{}\n\
  The first request is always made without a password. If the secret is\n\
  password protected you are prompted (on a TTY) until it is revealed.\n\n\
{}\n\
  {} {} abc123\n\
  {} {} https://snaplink.dev/abc123 {}\n",
        c(CMD, "snaplink"),
        c(CMD, "reveal"),
        c(HEADING, "USAGE"),
        c(CMD, "snaplink"),
        c(CMD, "reveal"),
        c(DIM, "<code-or-link>"),
        c(DIM, "[options]"),
        c(HEADING, "OPTIONS"),
        c(OPT, "--copy"),
        c(OPT, "--password-prompt"),
        c(OPT, "--password-env"),
        c(DIM, "<name>"),
        c(OPT, "--password-file"),
        c(DIM, "<path>"),
        c(OPT, "--api-url"),
        c(DIM, "<url>"),
        c(OPT, "--json"),
        c(OPT, "-h, --help"),
        c(HEADING, "PASSWORDS"),
        c(HEADING, "EXAMPLES"),
        c(CMD, "snaplink"),
        c(CMD, "reveal"),
        c(CMD, "snaplink"),
        c(CMD, "reveal"),
        c(OPT, "--copy"),
    );
}

pub fn print_share_help(deps: &mut Deps) {
    let c = color_func((deps.is_stdout_tty)());
    let _ = write!(
        deps.stderr,
        "{} {} - Create a link to a secret\n\n\
{}\n  {} {} {}\n\n\
{}\n\
  {} {}     Secret text (visible in shell history)\n\
  {} {}      Read secret from file\n\
  {} {}         Time to live (e.g. 5m, 2h, 1d; default 1d)\n\
  {} {}     Number of retrievals allowed (default 1)\n\
  {}    Prompt for a password\n\
  {} {}  Read password from env var\n\
  {} {}  Read password from file\n\
  {}               Copy the link to the clipboard\n\
  {}                 Show the link as a QR code\n\
  {} {}     API base URL\n\
  {}               Output as JSON\n\
  {}           Show help\n\n\
{}\n\
  Reads from stdin by default. Use {} or {} for alternatives.\n\
  Exactly one input source must be selected.\n\n\
{}\n\
  echo \"secret\" | {} {}\n\
  {} {} {} \"my secret\" {} 3 {}\n",
        c(CMD, "snaplink"),
        c(CMD, "share"),
        c(HEADING, "USAGE"),
        c(CMD, "snaplink"),
        c(CMD, "share"),
        c(DIM, "[options]"),
        c(HEADING, "OPTIONS"),
        c(OPT, "--text"),
        c(DIM, "<value>"),
        c(OPT, "--file"),
        c(DIM, "<path>"),
        c(OPT, "--ttl"),
        c(DIM, "<ttl>"),
        c(OPT, "--hit-limit"),
        c(DIM, "<n>"),
        c(OPT, "--password-prompt"),
        c(OPT, "--password-env"),
        c(DIM, "<name>"),
        c(OPT, "--password-file"),
        c(DIM, "<path>"),
        c(OPT, "--copy"),
        c(OPT, "--qr"),
        c(OPT, "--api-url"),
        c(DIM, "<url>"),
        c(OPT, "--json"),
        c(OPT, "-h, --help"),
        c(HEADING, "INPUT"),
        c(OPT, "--text"),
        c(OPT, "--file"),
        c(HEADING, "EXAMPLES"),
        c(CMD, "snaplink"),
        c(CMD, "share"),
        c(CMD, "snaplink"),
        c(CMD, "share"),
        c(OPT, "--text"),
        c(OPT, "--hit-limit"),
        c(OPT, "--password-prompt"),
    );
}

pub fn print_shorten_help(deps: &mut Deps) {
    let c = color_func((deps.is_stdout_tty)());
    let _ = write!(
        deps.stderr,
        "{} {} - Create a short link\n\n\
{}\n  {} {} {} {}\n\n\
{}\n\
  {}               Copy the short link to the clipboard\n\
  {}                 Show the short link as a QR code\n\
  {} {}     API base URL\n\
  {}               Output as JSON\n\
  {}           Show help\n\n\
{}\n\
  {} {} https://example.com/a/very/long/path {}\n",
        c(CMD, "snaplink"),
        c(CMD, "shorten"),
        c(HEADING, "USAGE"),
        c(CMD, "snaplink"),
        c(CMD, "shorten"),
        c(DIM, "<url>"),
        c(DIM, "[options]"),
        c(HEADING, "OPTIONS"),
        c(OPT, "--copy"),
        c(OPT, "--qr"),
        c(OPT, "--api-url"),
        c(DIM, "<url>"),
        c(OPT, "--json"),
        c(OPT, "-h, --help"),
        c(HEADING, "EXAMPLES"),
        c(CMD, "snaplink"),
        c(CMD, "shorten"),
        c(OPT, "--copy"),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(strs: &[&str]) -> Vec<String> {
        strs.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parse_positional_and_flags() {
        let pa = parse_flags(&args(&["abc", "--json", "--copy", "--ttl", "5m"])).unwrap();
        assert_eq!(pa.args, vec!["abc".to_string()]);
        assert!(pa.json);
        assert!(pa.copy);
        assert_eq!(pa.ttl, "5m");
    }

    #[test]
    fn parse_missing_value() {
        match parse_flags(&args(&["--hit-limit"])) {
            Err(CliError::Error(e)) => assert_eq!(e, "--hit-limit requires a value"),
            other => panic!("unexpected {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn parse_unknown_flag() {
        match parse_flags(&args(&["--bogus"])) {
            Err(CliError::Error(e)) => assert!(e.contains("unknown flag")),
            other => panic!("unexpected {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn parse_help() {
        assert!(matches!(
            parse_flags(&args(&["x", "-h"])),
            Err(CliError::ShowHelp)
        ));
    }

    #[test]
    fn dash_is_positional() {
        let pa = parse_flags(&args(&["-"])).unwrap();
        assert_eq!(pa.args, vec!["-".to_string()]);
    }
}
