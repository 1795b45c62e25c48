use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_HISTORY: u32 = 50;
/// Bounds offered by the settings dialog; values outside are clamped.
pub const MIN_MAX_HISTORY: u32 = 10;
pub const MAX_MAX_HISTORY: u32 = 200;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => write!(f, "Light"),
            Theme::Dark => write!(f, "Dark"),
        }
    }
}

impl FromStr for Theme {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Light" => Ok(Theme::Light),
            "Dark" => Ok(Theme::Dark),
            _ => Err(()),
        }
    }
}

/// User-facing configuration, persisted as a `key=value` text file.
///
/// The keys match what earlier releases wrote (`alwaysOnTop`,
/// `maxHistorySize`, `theme`), so an existing config file is picked up
/// unchanged. Unknown keys and malformed values fall back to defaults
/// instead of failing the load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub always_on_top: bool,
    pub max_history_size: u32,
    pub theme: Theme,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            always_on_top: true,
            max_history_size: DEFAULT_MAX_HISTORY,
            theme: Theme::Light,
        }
    }
}

impl Settings {
    /// Load settings from `path`, writing the defaults there on first run.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            let settings = Self::default();
            settings.save(path)?;
            return Ok(settings);
        }

        let text = fs::read_to_string(path)
            .with_context(|| format!("cannot read settings file {}", path.display()))?;
        Ok(Self::parse(&text))
    }

    /// Persist the settings, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut out = String::from("# clipstack configuration\n");
        out.push_str(&format!("alwaysOnTop={}\n", self.always_on_top));
        out.push_str(&format!("maxHistorySize={}\n", self.max_history_size));
        out.push_str(&format!("theme={}\n", self.theme));

        fs::write(path, out)
            .with_context(|| format!("cannot write settings file {}", path.display()))
    }

    fn parse(text: &str) -> Self {
        let mut settings = Self::default();

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };

            match (key.trim(), value.trim()) {
                ("alwaysOnTop", v) => settings.always_on_top = v.eq_ignore_ascii_case("true"),
                ("maxHistorySize", v) => {
                    settings.max_history_size = v
                        .parse::<u32>()
                        .map(clamp_history_size)
                        .unwrap_or(DEFAULT_MAX_HISTORY);
                }
                ("theme", v) => settings.theme = Theme::from_str(v).unwrap_or_default(),
                _ => {}
            }
        }

        settings
    }
}

pub fn clamp_history_size(size: u32) -> u32 {
    size.clamp(MIN_MAX_HISTORY, MAX_MAX_HISTORY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn first_run_writes_defaults() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config.properties");

        let settings = Settings::load(&path)?;

        assert!(path.exists());
        assert_eq!(settings, Settings::default());
        assert!(settings.always_on_top);
        assert_eq!(settings.max_history_size, 50);
        assert_eq!(settings.theme, Theme::Light);
        Ok(())
    }

    #[test]
    fn save_load_round_trip() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config.properties");

        let settings = Settings {
            always_on_top: false,
            max_history_size: 120,
            theme: Theme::Dark,
        };
        settings.save(&path)?;

        assert_eq!(Settings::load(&path)?, settings);
        Ok(())
    }

    #[test]
    fn malformed_values_fall_back_to_defaults() {
        let parsed = Settings::parse(
            "alwaysOnTop=banana\nmaxHistorySize=lots\ntheme=Sepia\nnoise line\n",
        );
        assert!(!parsed.always_on_top); // anything but "true" reads as false
        assert_eq!(parsed.max_history_size, DEFAULT_MAX_HISTORY);
        assert_eq!(parsed.theme, Theme::Light);
    }

    #[test]
    fn history_size_is_clamped_to_dialog_bounds() {
        let parsed = Settings::parse("maxHistorySize=5000\n");
        assert_eq!(parsed.max_history_size, MAX_MAX_HISTORY);

        let parsed = Settings::parse("maxHistorySize=1\n");
        assert_eq!(parsed.max_history_size, MIN_MAX_HISTORY);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let parsed = Settings::parse("alwaysOnTop=false\nfontSize=12\n");
        assert!(!parsed.always_on_top);
        assert_eq!(parsed.max_history_size, DEFAULT_MAX_HISTORY);
    }
}
