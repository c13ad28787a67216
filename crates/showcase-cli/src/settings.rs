//! Connection settings: flags, `SHOWCASE_*` environment, then config file.

use std::{
  path::{Path, PathBuf},
  time::Duration,
};

use anyhow::{Context, Result};
use serde::Deserialize;
use showcase_client::{ApiConfig, build_time_base_url};

/// Shape of the optional TOML config file. Every key may also come from a
/// `SHOWCASE_<KEY>` environment variable.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
pub struct FileSettings {
  #[serde(default)]
  pub url:          Option<String>,
  /// `name=value` session cookie.
  #[serde(default)]
  pub session:      Option<String>,
  #[serde(default)]
  pub prefs:        Option<PathBuf>,
  #[serde(default)]
  pub log_file:     Option<PathBuf>,
  #[serde(default)]
  pub timeout_secs: Option<u64>,
}

/// `$XDG_CONFIG_HOME/showcase`, falling back to `~/.config/showcase`.
pub fn config_dir() -> PathBuf {
  let base = std::env::var_os("XDG_CONFIG_HOME")
    .map(PathBuf::from)
    .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
    .unwrap_or_else(|| PathBuf::from("."));
  base.join("showcase")
}

/// Read `path` (required) or the default config file (optional), layered
/// under the `SHOWCASE_*` environment.
pub fn load(path: Option<&Path>) -> Result<FileSettings> {
  let (file, required) = match path {
    Some(path) => (path.to_path_buf(), true),
    None => (config_dir().join("config.toml"), false),
  };
  let settings = config::Config::builder()
    .add_source(config::File::from(file.as_path()).required(required))
    .add_source(config::Environment::with_prefix("SHOWCASE"))
    .build()
    .with_context(|| format!("failed to read config file {}", file.display()))?;
  settings
    .try_deserialize()
    .context("failed to deserialise config")
}

fn non_empty(value: Option<String>) -> Option<String> {
  value.filter(|v| !v.trim().is_empty())
}

/// Combine command-line values with the loaded settings; flags win.
pub fn api_config(
  url: Option<String>,
  session: Option<String>,
  file: &FileSettings,
) -> ApiConfig {
  let defaults = ApiConfig::default();
  ApiConfig {
    base_url:       non_empty(url)
      .or_else(|| non_empty(file.url.clone()))
      .unwrap_or_else(|| build_time_base_url().to_string()),
    session_cookie: non_empty(session).or_else(|| non_empty(file.session.clone())),
    timeout:        file
      .timeout_secs
      .map(Duration::from_secs)
      .unwrap_or(defaults.timeout),
  }
}

#[cfg(test)]
mod tests {
  use std::io::Write;

  use super::*;

  #[test]
  fn reads_keys_from_an_explicit_file() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "url = \"https://showcase.example.edu/api\"\ntimeout_secs = 5").unwrap();

    let settings = load(Some(file.path())).unwrap();
    assert_eq!(settings.url.as_deref(), Some("https://showcase.example.edu/api"));
    assert_eq!(settings.timeout_secs, Some(5));
  }

  #[test]
  fn explicit_file_must_exist() {
    let dir = tempfile::tempdir().unwrap();
    assert!(load(Some(&dir.path().join("missing.toml"))).is_err());
  }

  #[test]
  fn flags_override_file_which_overrides_build_default() {
    let file = FileSettings {
      url: Some("http://file/api".into()),
      session: Some("connect.sid=abc".into()),
      timeout_secs: Some(3),
      ..Default::default()
    };

    let cfg = api_config(Some("http://flag/api".into()), None, &file);
    assert_eq!(cfg.base_url, "http://flag/api");
    assert_eq!(cfg.session_cookie.as_deref(), Some("connect.sid=abc"));
    assert_eq!(cfg.timeout, Duration::from_secs(3));

    let cfg = api_config(Some("  ".into()), None, &FileSettings::default());
    assert_eq!(cfg.base_url, build_time_base_url());
    assert_eq!(cfg.session_cookie, None);
  }
}
