use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

/// Configuration loaded from the TOML config file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub api_url: Option<String>,
    pub timeout_secs: Option<u64>,
    /// Copy results to the clipboard without `--copy`.
    pub copy: Option<bool>,
}

/// Returns the config file path: $XDG_CONFIG_HOME/snaplink/config.toml,
/// or the platform config directory when XDG_CONFIG_HOME is unset.
pub fn config_path(getenv: &dyn Fn(&str) -> Option<String>) -> Option<PathBuf> {
    let base = match getenv("XDG_CONFIG_HOME") {
        Some(dir) if !dir.is_empty() => Some(PathBuf::from(dir)),
        _ => dirs::config_dir(),
    };
    base.map(|d| d.join("snaplink").join("config.toml"))
}

/// Load config from the standard path. A missing file yields the default
/// config; unreadable or invalid files are reported as warnings.
pub fn load_config(getenv: &dyn Fn(&str) -> Option<String>, stderr: &mut dyn Write) -> Config {
    match config_path(getenv) {
        Some(path) if path.exists() => load_config_from_path(&path, stderr),
        _ => Config::default(),
    }
}

/// Parse the TOML file at the given path.
pub fn load_config_from_path(path: &Path, stderr: &mut dyn Write) -> Config {
    let contents = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "config unreadable");
            let _ = writeln!(stderr, "warning: failed to read {}: {}", path.display(), e);
            return Config::default();
        }
    };
    match toml::from_str::<Config>(&contents) {
        Ok(config) => config,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "config invalid");
            let _ = writeln!(stderr, "warning: failed to parse {}: {}", path.display(), e);
            Config::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_with(dir: &Path) -> impl Fn(&str) -> Option<String> {
        let dir = dir.to_string_lossy().to_string();
        move |key: &str| (key == "XDG_CONFIG_HOME").then(|| dir.clone())
    }

    #[test]
    fn path_honors_xdg() {
        let tmp = tempfile::tempdir().unwrap();
        let getenv = env_with(tmp.path());
        assert_eq!(
            config_path(&getenv).unwrap(),
            tmp.path().join("snaplink").join("config.toml")
        );
    }

    #[test]
    fn load_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let mut stderr = Vec::new();
        let config = load_config(&env_with(tmp.path()), &mut stderr);
        assert!(config.api_url.is_none());
        assert!(config.timeout_secs.is_none());
        assert!(config.copy.is_none());
        assert!(stderr.is_empty());
    }

    #[test]
    fn load_valid_toml() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("snaplink");
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("config.toml"),
            "api_url = \"https://example.com/api\"\ntimeout_secs = 5\ncopy = true\n",
        )
        .unwrap();
        let config = load_config(&env_with(tmp.path()), &mut Vec::new());
        assert_eq!(config.api_url.as_deref(), Some("https://example.com/api"));
        assert_eq!(config.timeout_secs, Some(5));
        assert_eq!(config.copy, Some(true));
    }

    #[test]
    fn load_partial_toml() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "copy = false\n").unwrap();
        let config = load_config_from_path(&path, &mut Vec::new());
        assert!(config.api_url.is_none());
        assert_eq!(config.copy, Some(false));
    }

    #[test]
    fn load_invalid_toml_warns() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "not valid [[ toml !!!").unwrap();
        let mut stderr = Vec::new();
        let config = load_config_from_path(&path, &mut stderr);
        assert!(config.api_url.is_none());
        let warning = String::from_utf8(stderr).unwrap();
        assert!(warning.contains("warning: failed to parse"), "{}", warning);
    }

    #[test]
    fn unknown_key_warns() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "base_url = \"https://old\"\n").unwrap();
        let mut stderr = Vec::new();
        let config = load_config_from_path(&path, &mut stderr);
        assert!(config.api_url.is_none());
        assert!(!stderr.is_empty());
    }
}
