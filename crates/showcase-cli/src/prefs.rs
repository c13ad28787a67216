//! Client preferences persisted between sessions.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use showcase_core::i18n::Language;
use strum::{Display, EnumIter, IntoEnumIterator};

/// Admin dashboard sections, in sidebar order.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum AdminSection {
  #[default]
  Users,
  Courses,
  Schools,
  Comments,
  Suggestions,
}

impl AdminSection {
  pub fn next(self) -> Self { Self::iter().cycle().skip_while(|s| *s != self).nth(1).unwrap_or(self) }

  pub fn prev(self) -> Self {
    Self::iter().rev().cycle().skip_while(|s| *s != self).nth(1).unwrap_or(self)
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
  pub admin_menu:        AdminSection,
  pub sidebar_collapsed: bool,
  pub language:          Language,
}

impl Preferences {
  pub fn default_path() -> PathBuf { crate::settings::config_dir().join("preferences.toml") }

  /// Read `path`. A missing or unreadable file yields the defaults.
  pub fn load(path: &Path) -> Self {
    let raw = match std::fs::read_to_string(path) {
      Ok(raw) => raw,
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Self::default(),
      Err(e) => {
        tracing::warn!(path = %path.display(), error = %e, "could not read preferences");
        return Self::default();
      }
    };
    toml::from_str(&raw).unwrap_or_else(|e| {
      tracing::warn!(path = %path.display(), error = %e, "ignoring malformed preferences");
      Self::default()
    })
  }

  pub fn save(&self, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
      std::fs::create_dir_all(dir)
        .with_context(|| format!("creating {}", dir.display()))?;
    }
    let raw = toml::to_string_pretty(self).context("serialising preferences")?;
    std::fs::write(path, raw).with_context(|| format!("writing {}", path.display()))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn round_trips_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("preferences.toml");
    let prefs = Preferences {
      admin_menu:        AdminSection::Schools,
      sidebar_collapsed: true,
      language:          Language::Ar,
    };
    prefs.save(&path).unwrap();
    assert_eq!(Preferences::load(&path), prefs);
  }

  #[test]
  fn missing_or_malformed_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("preferences.toml");
    assert_eq!(Preferences::load(&path), Preferences::default());

    std::fs::write(&path, "admin_menu = 42\n[[").unwrap();
    assert_eq!(Preferences::load(&path), Preferences::default());
  }

  #[test]
  fn partial_file_keeps_other_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("preferences.toml");
    std::fs::write(&path, "sidebar_collapsed = true\n").unwrap();
    let prefs = Preferences::load(&path);
    assert!(prefs.sidebar_collapsed);
    assert_eq!(prefs.admin_menu, AdminSection::Users);
  }

  #[test]
  fn sections_cycle_both_ways() {
    assert_eq!(AdminSection::Users.next(), AdminSection::Courses);
    assert_eq!(AdminSection::Suggestions.next(), AdminSection::Users);
    assert_eq!(AdminSection::Users.prev(), AdminSection::Suggestions);
  }
}
