use etcetera::BaseStrategy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::normalize::NormalizationForm;

/// Environment variable naming an explicit settings file.
pub const CONFIG_ENV: &str = "UNCONFUSE_CONFIG";

/// Try both `.yaml` and `.yml` extensions in a directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    let yaml = dir.join("config.yaml");
    if yaml.exists() {
        return Some(yaml);
    }
    let yml = dir.join("config.yml");
    if yml.exists() {
        return Some(yml);
    }
    None
}

/// Sanitizer settings loaded from YAML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Path these settings were loaded from.
    #[serde(skip)]
    pub path: Option<PathBuf>,

    /// Unicode normalization applied before confusable replacement.
    /// `none` or `null` disables it.
    #[serde(deserialize_with = "deserialize_normalization")]
    pub normalization: Option<NormalizationForm>,

    /// Remove zero-width characters after normalization.
    pub strip_zero_width: bool,

    pub output: OutputFormat,
}

fn deserialize_normalization<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<NormalizationForm>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(name) => NormalizationForm::parse_optional(&name).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            path: None,
            normalization: None,
            strip_zero_width: true,
            output: OutputFormat::Human,
        }
    }
}

impl Settings {
    /// Discover settings: `UNCONFUSE_CONFIG`, then the user config dir,
    /// else defaults.
    pub fn discover() -> Self {
        let env_path = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        Self::discover_with(env_path.as_deref(), config_dir().as_deref())
    }

    /// Discovery with explicit inputs, so it can run against temp dirs.
    pub fn discover_with(env_path: Option<&Path>, user_dir: Option<&Path>) -> Self {
        if let Some(path) = env_path {
            if path.exists() {
                return Self::load_or_default(path);
            }
            tracing::warn!(path = %path.display(), "{CONFIG_ENV} points at a missing file");
        }

        match user_dir.and_then(find_config_in_dir) {
            Some(path) => Self::load_or_default(&path),
            None => Settings::default(),
        }
    }

    /// Load from `path`, or discover when `None`. An explicit path that
    /// can't be read or parsed is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_from_path(path),
            None => Ok(Self::discover()),
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut settings = Self::from_yaml(&content).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })?;
        settings.path = Some(path.to_path_buf());
        tracing::debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    pub fn from_yaml(content: &str) -> std::result::Result<Self, serde_yaml::Error> {
        // An empty document deserializes to unit, not a mapping.
        if content.trim().is_empty() {
            return Ok(Settings::default());
        }
        serde_yaml::from_str(content)
    }

    fn load_or_default(path: &Path) -> Self {
        match Self::load_from_path(path) {
            Ok(settings) => settings,
            Err(err) => {
                tracing::warn!("{err}; using default settings");
                Settings::default()
            }
        }
    }
}

/// Get the unconfuse config directory.
pub fn config_dir() -> Option<PathBuf> {
    let base = etcetera::choose_base_strategy().ok()?;
    Some(base.config_dir().join("unconfuse"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.normalization, None);
        assert!(s.strip_zero_width);
        assert_eq!(s.output, OutputFormat::Human);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let s = Settings::from_yaml("normalization: nfkc\n").unwrap();
        assert_eq!(s.normalization, Some(NormalizationForm::Nfkc));
        assert!(s.strip_zero_width);
    }

    #[test]
    fn test_full_yaml() {
        let yaml = "normalization: nfd\nstrip_zero_width: false\noutput: json\n";
        let s = Settings::from_yaml(yaml).unwrap();
        assert_eq!(s.normalization, Some(NormalizationForm::Nfd));
        assert!(!s.strip_zero_width);
        assert_eq!(s.output, OutputFormat::Json);
    }

    #[test]
    fn test_empty_yaml() {
        assert_eq!(Settings::from_yaml("").unwrap(), Settings::default());
    }

    #[test]
    fn test_unknown_form_rejected() {
        let err = Settings::from_yaml("normalization: nfx\n").unwrap_err();
        assert!(err.to_string().contains("unknown normalization form 'nfx'"));
    }

    #[test]
    fn test_form_names_match_command_line() {
        for (yaml, expected) in [
            ("normalization: NFKC\n", Some(NormalizationForm::Nfkc)),
            ("normalization: Nfd\n", Some(NormalizationForm::Nfd)),
            ("normalization: none\n", None),
            ("normalization: NONE\n", None),
            ("normalization: null\n", None),
            ("normalization:\n", None),
        ] {
            let s = Settings::from_yaml(yaml).unwrap();
            assert_eq!(s.normalization, expected, "{yaml:?}");
        }
    }

    #[test]
    fn test_yaml_round_trip() {
        let s = Settings {
            normalization: Some(NormalizationForm::Nfkd),
            output: OutputFormat::Json,
            ..Settings::default()
        };
        let yaml = serde_yaml::to_string(&s).unwrap();
        assert_eq!(Settings::from_yaml(&yaml).unwrap(), s);
    }
}
