//! Backend URL resolution
//!
//! Priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! Beyond this there is no startup validation: a wrong URL manifests as
//! failed requests at call time. An explicitly passed config file that
//! cannot be read or parsed is an error, though; the caller asked for
//! it, so silently ignoring it would be surprising.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Default backend base URL
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";

/// Environment variable consulted when no CLI argument is given
pub const BACKEND_URL_ENV: &str = "CREATIVITY_BACKEND_URL";

/// Optional TOML config file contents
#[derive(Debug, Default, Deserialize)]
pub struct TomlConfig {
    pub backend_url: Option<String>,
}

/// Resolve the backend base URL following the priority order above
pub fn resolve_backend_url(cli_arg: Option<&str>, config_file: Option<&Path>) -> Result<String> {
    // Priority 1: Command-line argument
    if let Some(url) = cli_arg {
        debug!(url = %url, "backend URL from command line");
        return Ok(url.to_string());
    }

    // Priority 2: Environment variable
    if let Ok(url) = std::env::var(BACKEND_URL_ENV) {
        if !url.trim().is_empty() {
            debug!(url = %url, "backend URL from {}", BACKEND_URL_ENV);
            return Ok(url);
        }
    }

    // Priority 3: TOML config file
    if let Some(path) = config_file {
        if let Some(url) = load_toml_backend_url(path)? {
            debug!(url = %url, path = %path.display(), "backend URL from config file");
            return Ok(url);
        }
        // File readable but carries no backend_url; fall through
    }

    // Priority 4: Compiled default
    debug!(url = DEFAULT_BACKEND_URL, "backend URL from compiled default");
    Ok(DEFAULT_BACKEND_URL.to_string())
}

fn load_toml_backend_url(path: &Path) -> Result<Option<String>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("config file {} unreadable: {}", path.display(), e))
    })?;

    let config: TomlConfig = toml::from_str(&content).map_err(|e| {
        Error::Config(format!("config file {} unparseable: {}", path.display(), e))
    })?;

    Ok(config.backend_url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{}", contents).unwrap();
        file
    }

    #[test]
    #[serial]
    fn cli_argument_wins() {
        std::env::set_var(BACKEND_URL_ENV, "http://env:1");
        let url = resolve_backend_url(Some("http://cli:1"), None);
        std::env::remove_var(BACKEND_URL_ENV);
        assert_eq!(url.unwrap(), "http://cli:1");
    }

    #[test]
    #[serial]
    fn env_beats_config_file() {
        std::env::set_var(BACKEND_URL_ENV, "http://env:1");
        let file = write_config("backend_url = \"http://toml:1\"");
        let url = resolve_backend_url(None, Some(file.path()));
        std::env::remove_var(BACKEND_URL_ENV);
        assert_eq!(url.unwrap(), "http://env:1");
    }

    #[test]
    #[serial]
    fn config_file_used_when_no_env() {
        std::env::remove_var(BACKEND_URL_ENV);
        let file = write_config("backend_url = \"http://toml:1\"");
        let url = resolve_backend_url(None, Some(file.path())).unwrap();
        assert_eq!(url, "http://toml:1");
    }

    #[test]
    #[serial]
    fn config_file_without_url_key_falls_through() {
        std::env::remove_var(BACKEND_URL_ENV);
        let file = write_config("# no backend_url here");
        let url = resolve_backend_url(None, Some(file.path())).unwrap();
        assert_eq!(url, DEFAULT_BACKEND_URL);
    }

    #[test]
    #[serial]
    fn falls_back_to_compiled_default() {
        std::env::remove_var(BACKEND_URL_ENV);
        let url = resolve_backend_url(None, None).unwrap();
        assert_eq!(url, DEFAULT_BACKEND_URL);
    }

    #[test]
    #[serial]
    fn unparseable_config_file_is_an_error() {
        std::env::remove_var(BACKEND_URL_ENV);
        let file = write_config("not valid toml [[[");
        let result = resolve_backend_url(None, Some(file.path()));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    #[serial]
    fn unreadable_config_file_is_an_error() {
        std::env::remove_var(BACKEND_URL_ENV);
        let missing = Path::new("/nonexistent/creativity-sync.toml");
        let result = resolve_backend_url(None, Some(missing));
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
