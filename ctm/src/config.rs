//! Startup configuration for ctm.
//!
//! Read once before terminal init from `$XDG_CONFIG_HOME/ctm/config.toml`
//! (falling back to `~/.config/ctm/config.toml`). Config errors are soft
//! failures printed to stderr — a malformed file never prevents startup.

use serde::Deserialize;

use ctm_client::DEFAULT_BASE_URL;

/// Keys recognised in `config.toml`. Both are optional.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Theme name resolved via `Theme::from_name`.
    pub theme: Option<String>,
    /// Backend base URL override. The default is the fixed local endpoint
    /// the backend serves on.
    pub backend_url: Option<String>,
}

impl Config {
    /// The theme name to use, defaulting to `catppuccin-mocha`.
    pub fn theme_name(&self) -> &str {
        self.theme.as_deref().unwrap_or("catppuccin-mocha")
    }

    /// The backend base URL to use, defaulting to [`DEFAULT_BASE_URL`].
    pub fn backend_url(&self) -> &str {
        self.backend_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }
}

/// Returns the path to the ctm config file.
///
/// Prefers `$XDG_CONFIG_HOME/ctm/config.toml`; falls back to
/// `~/.config/ctm/config.toml` when the env var is absent.
pub fn config_path() -> std::path::PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .ok()
        .map(std::path::PathBuf::from)
        .or_else(|| {
            std::env::var("HOME")
                .ok()
                .map(|h| std::path::PathBuf::from(h).join(".config"))
        })
        .unwrap_or_else(|| std::path::PathBuf::from(".config"));
    base.join("ctm").join("config.toml")
}

/// Loads the config file, tolerating absence and parse errors.
///
/// Returns `Config::default()` if the file does not exist or cannot be
/// parsed. Never panics — parse errors are printed to stderr (safe here:
/// loading happens before the terminal enters raw mode).
pub fn load() -> Config {
    let path = config_path();
    let raw = match std::fs::read_to_string(&path) {
        Ok(s) => s,
        Err(_) => return Config::default(),
    };
    match toml::from_str(&raw) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("ctm: config parse error in {:?}: {}", path, e);
            Config::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_keys_absent() {
        let cfg: Config = toml::from_str("").unwrap();
        assert_eq!(cfg.theme_name(), "catppuccin-mocha");
        assert_eq!(cfg.backend_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn parses_both_keys() {
        let cfg: Config = toml::from_str(
            "theme = \"dark\"\nbackend_url = \"http://127.0.0.1:9000\"\n",
        )
        .unwrap();
        assert_eq!(cfg.theme_name(), "dark");
        assert_eq!(cfg.backend_url(), "http://127.0.0.1:9000");
    }
}
