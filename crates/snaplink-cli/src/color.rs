// ANSI SGR codes used across the CLI.
pub const HEADING: &str = "1";
pub const DIM: &str = "2";
pub const ERROR: &str = "31";
pub const SUCCESS: &str = "32";
pub const OPT: &str = "33";
pub const WARN: &str = "33";
pub const URL: &str = "4;36";
pub const CMD: &str = "36";

/// Returns a formatter that wraps text in the given SGR code when `enabled`,
/// and passes it through unchanged otherwise.
pub fn color_func(enabled: bool) -> impl Fn(&str, &str) -> String {
    move |code: &str, text: &str| {
        if enabled {
            format!("\x1b[{}m{}\x1b[0m", code, text)
        } else {
            text.to_string()
        }
    }
}
