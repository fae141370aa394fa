use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "SNAPLINK_LOG";

/// Pick the filter directive: an explicit `SNAPLINK_LOG` wins, then
/// `--verbose`, then the quiet default.
pub fn filter_directive(env_value: Option<&str>, verbose: bool) -> String {
    match env_value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ if verbose => "debug".to_string(),
        _ => "warn".to_string(),
    }
}

/// Install the global subscriber for `directive`. Logs go to stderr so they
/// never mix with secrets or links printed on stdout. Only the first call
/// takes effect.
pub fn init_logging(directive: &str) {
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_beats_verbose() {
        assert_eq!(filter_directive(Some("snaplink_core=trace"), true), "snaplink_core=trace");
    }

    #[test]
    fn verbose_means_debug() {
        assert_eq!(filter_directive(None, true), "debug");
        assert_eq!(filter_directive(Some("  "), true), "debug");
    }

    #[test]
    fn default_is_warn() {
        assert_eq!(filter_directive(None, false), "warn");
    }
}
