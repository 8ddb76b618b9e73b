//! Settings for the command line tool.
//!
//! Settings come from three layers, later ones winning:
//! 1. an optional JSON file (`ipcalc.json` by default),
//! 2. `IPCALC_*` environment variables (a `.env` file is loaded by `main`),
//! 3. command line flags, applied by [`crate::cmd`].
//!
//! Nothing here is global. The loaded [`Settings`] value is passed to whatever
//! needs it.

use crate::error::{Error, Result};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Settings file read when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "ipcalc.json";

/// Terminal colour scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl FromStr for Theme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Theme> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(Error::Config(format!(
                "unknown theme '{other}', expected 'light' or 'dark'"
            ))),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Theme::Light => f.write_str("light"),
            Theme::Dark => f.write_str("dark"),
        }
    }
}

/// User settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub theme: Theme,
    /// Directory exports go to when no output path is given.
    pub export_dir: PathBuf,
    /// IANA timezone used for the "generated at" stamp of exports.
    pub timezone: String,
    /// Reject non-contiguous masks when converting a mask to a prefix.
    pub strict_masks: bool,
    /// log4rs YAML file, used when it exists.
    pub log_config: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            theme: Theme::default(),
            export_dir: PathBuf::from("."),
            timezone: "UTC".to_string(),
            strict_masks: false,
            log_config: PathBuf::from("log4rs.yml"),
        }
    }
}

impl Settings {
    /// Load settings from `path`, or from [`DEFAULT_CONFIG_FILE`] when `None`.
    ///
    /// A missing default file gives the defaults; a missing file that was asked
    /// for explicitly is an error. Environment overrides are applied after the
    /// file.
    pub fn load(path: Option<&Path>) -> Result<Settings> {
        let mut settings = match path {
            Some(file) => {
                if !file.exists() {
                    return Err(Error::Config(format!(
                        "settings file does not exist: {}",
                        file.display()
                    )));
                }
                Settings::from_file(file)?
            }
            None => {
                let file = Path::new(DEFAULT_CONFIG_FILE);
                if file.exists() {
                    Settings::from_file(file)?
                } else {
                    log::debug!("No {DEFAULT_CONFIG_FILE}, using default settings");
                    Settings::default()
                }
            }
        };
        settings.apply_env(|key| std::env::var(key).ok())?;
        settings.validate()?;
        Ok(settings)
    }

    fn from_file(file: &Path) -> Result<Settings> {
        log::info!("Reading settings from {}", file.display());
        let json = std::fs::read_to_string(file)?;
        Settings::from_json(&json).map_err(|e| match e {
            Error::Config(msg) => Error::Config(format!("{}: {msg}", file.display())),
            other => other,
        })
    }

    /// Parse settings JSON, reporting the path of a bad field.
    pub fn from_json(json: &str) -> Result<Settings> {
        let mut deserializer = serde_json::Deserializer::from_str(json);
        serde_path_to_error::deserialize(&mut deserializer)
            .map_err(|e| Error::Config(format!("path={} error={}", e.path(), e.inner())))
    }

    /// Apply `IPCALC_*` overrides read through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(theme) = lookup("IPCALC_THEME") {
            self.theme = theme.parse()?;
        }
        if let Some(dir) = lookup("IPCALC_EXPORT_DIR") {
            self.export_dir = PathBuf::from(dir);
        }
        if let Some(tz) = lookup("IPCALC_TIMEZONE") {
            self.timezone = tz;
        }
        if let Some(strict) = lookup("IPCALC_STRICT_MASKS") {
            self.strict_masks = parse_bool(&strict)?;
        }
        Ok(())
    }

    /// Check the settings that are only parsed on use.
    ///
    /// # Returns
    /// * `Ok(())` - The settings are usable
    /// * `Err(Error::Config)` - If `timezone` is not an IANA name
    pub fn validate(&self) -> Result<()> {
        self.tz().map(|_| ())
    }

    /// The configured timezone.
    pub fn tz(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|e| Error::Config(format!("unknown timezone '{}': {e}", self.timezone)))
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(Error::Config(format!("'{other}' is not a boolean"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.theme, Theme::Dark);
        assert_eq!(settings.timezone, "UTC");
        assert!(!settings.strict_masks);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_from_json_partial() {
        let settings = Settings::from_json(r#"{"theme": "light", "strict_masks": true}"#).unwrap();
        assert_eq!(settings.theme, Theme::Light);
        assert!(settings.strict_masks);
        assert_eq!(settings.export_dir, PathBuf::from("."));
    }

    #[test]
    fn test_from_json_reports_path() {
        let err = Settings::from_json(r#"{"theme": "blue"}"#).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("path=theme"), "{msg}");

        let err = Settings::from_json(r#"{"colour": "dark"}"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_apply_env() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("IPCALC_THEME", "Light"),
            ("IPCALC_EXPORT_DIR", "/tmp/exports"),
            ("IPCALC_TIMEZONE", "Pacific/Auckland"),
            ("IPCALC_STRICT_MASKS", "yes"),
        ]);
        let mut settings = Settings::default();
        settings
            .apply_env(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(settings.theme, Theme::Light);
        assert_eq!(settings.export_dir, PathBuf::from("/tmp/exports"));
        assert!(settings.strict_masks);
        assert_eq!(settings.tz().unwrap(), chrono_tz::Pacific::Auckland);
    }

    #[test]
    fn test_apply_env_rejects_bad_values() {
        let mut settings = Settings::default();
        assert!(settings
            .apply_env(|key| (key == "IPCALC_THEME").then(|| "sepia".to_string()))
            .is_err());
        assert!(settings
            .apply_env(|key| (key == "IPCALC_STRICT_MASKS").then(|| "maybe".to_string()))
            .is_err());
    }

    #[test]
    fn test_bad_timezone() {
        let settings = Settings {
            timezone: "Mars/Olympus".to_string(),
            ..Settings::default()
        };
        assert!(matches!(settings.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_theme_from_str() {
        assert_eq!("DARK".parse::<Theme>().unwrap(), Theme::Dark);
        assert_eq!(" light ".parse::<Theme>().unwrap(), Theme::Light);
        assert!("sepia".parse::<Theme>().is_err());
    }
}
