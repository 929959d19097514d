use serde::{Deserialize, Deserializer, Serialize};
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Config directory not found")]
    NoConfigDir,
}

/// Display mode, persisted as "light" / "dark".
///
/// Anything absent or unrecognized reads back as Light - preference data is
/// never a hard error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn parse(value: &str) -> Self {
        match value {
            "dark" => ThemeMode::Dark,
            _ => ThemeMode::Light,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    /// Header indicator: moon offers dark mode, sun offers light
    pub fn glyph(self) -> &'static str {
        match self {
            ThemeMode::Light => "☾",
            ThemeMode::Dark => "☀",
        }
    }
}

impl<'de> Deserialize<'de> for ThemeMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(ThemeMode::parse(&raw))
    }
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Preferences {
    #[serde(default)]
    pub theme: ThemeMode,
    /// Optional subset/order of tool keys to mount; None = every
    /// registered tool in registration order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<String>>,
}

impl Preferences {
    /// Priority: ./quicktools.toml -> <config_dir>/quicktools/quicktools.toml -> default
    pub fn load() -> Result<Self, ConfigError> {
        let paths = [
            std::env::current_dir()?.join("quicktools.toml"),
            Self::user_config_path()?,
        ];

        for path in paths {
            if path.exists() {
                let content = std::fs::read_to_string(path)?;
                return toml::from_str(&content).map_err(ConfigError::Parse);
            }
        }

        Ok(Self::default())
    }

    /// Write the preferences to the user config path, creating the
    /// directory if needed. Called on every theme toggle.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::user_config_path()?;
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(&path, content)?;
        tracing::debug!(path = %path.display(), "saved preferences");
        Ok(())
    }

    fn user_config_path() -> Result<PathBuf, ConfigError> {
        Ok(dirs::config_dir()
            .ok_or(ConfigError::NoConfigDir)?
            .join("quicktools/quicktools.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_parse_is_lenient() {
        assert_eq!(ThemeMode::parse("dark"), ThemeMode::Dark);
        assert_eq!(ThemeMode::parse("light"), ThemeMode::Light);
        assert_eq!(ThemeMode::parse("solarized"), ThemeMode::Light);
        assert_eq!(ThemeMode::parse(""), ThemeMode::Light);
    }

    #[test]
    fn toggle_flips_both_ways() {
        assert_eq!(ThemeMode::Light.toggled(), ThemeMode::Dark);
        assert_eq!(ThemeMode::Dark.toggled(), ThemeMode::Light);
    }

    #[test]
    fn missing_theme_defaults_to_light() {
        let prefs: Preferences = toml::from_str("").unwrap();
        assert_eq!(prefs.theme, ThemeMode::Light);
        assert!(prefs.tools.is_none());
    }

    #[test]
    fn unrecognized_theme_defaults_to_light() {
        let prefs: Preferences = toml::from_str(r#"theme = "sepia""#).unwrap();
        assert_eq!(prefs.theme, ThemeMode::Light);
    }

    #[test]
    fn roundtrip_dark_theme_and_tools() {
        let prefs = Preferences {
            theme: ThemeMode::Dark,
            tools: Some(vec!["bmi".into(), "stopwatch".into()]),
        };
        let text = toml::to_string_pretty(&prefs).unwrap();
        let back: Preferences = toml::from_str(&text).unwrap();
        assert_eq!(back.theme, ThemeMode::Dark);
        assert_eq!(back.tools.as_deref(), Some(&["bmi".to_string(), "stopwatch".to_string()][..]));
    }
}
