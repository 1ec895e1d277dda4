//! Finder Configuration
//!
//! Matching, OCR and output settings stored in TOML format.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::vision::fuzzy::{Scorer, DEFAULT_THRESHOLD, DEFAULT_TOP_K};
use crate::vision::segment::MIN_WORD_LEN;

/// Finder settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinderConfig {
    /// Word matching settings
    pub matching: MatchSettings,
    /// OCR backend settings
    pub ocr: OcrSettings,
    /// Result output settings
    pub output: OutputSettings,
}

/// Word matching settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchSettings {
    /// Minimum similarity score (0 - 100) for a word to match
    pub threshold: u8,
    /// Number of best matches considered when picking the closest one
    pub top_k: usize,
    /// Words shorter than this (in characters) are ignored
    pub min_word_len: usize,
    /// Similarity metric
    pub scorer: Scorer,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            top_k: DEFAULT_TOP_K,
            min_word_len: MIN_WORD_LEN,
            scorer: Scorer::default(),
        }
    }
}

/// OCR backend settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrSettings {
    /// Recognizer language tag (e.g., "en-US")
    pub language: String,
}

impl Default for OcrSettings {
    fn default() -> Self {
        Self {
            language: "en-US".to_string(),
        }
    }
}

/// Result output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// RGBA color of highlight rectangles
    pub highlight_color: [u8; 4],
    /// Highlight line thickness in pixels
    pub highlight_thickness: u32,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            highlight_color: [255, 0, 0, 255],
            highlight_thickness: 2,
        }
    }
}

impl FinderConfig {
    /// Check values the TOML types alone cannot bound
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.matching.threshold > 100 {
            return Err(ConfigError::Invalid(format!(
                "matching.threshold must be 0 - 100, got {}",
                self.matching.threshold
            )));
        }
        Ok(())
    }
}

/// Load configuration from file
pub fn load_config(path: &Path) -> Result<FinderConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: FinderConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Save configuration to file
pub fn save_config(config: &FinderConfig, path: &Path) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Get the configuration directory
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    let proj_dirs = directories::ProjectDirs::from("com", "screentextfinder", "ScreenTextFinder")
        .ok_or(ConfigError::NoConfigDir)?;
    Ok(proj_dirs.config_dir().to_path_buf())
}

/// Default location of the configuration file
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("config.toml"))
}

/// Load an explicit config file, or the default one if it exists
///
/// An explicit path must exist; a missing default file means defaults.
pub fn load_or_default(path: Option<&Path>) -> Result<FinderConfig, ConfigError> {
    if let Some(path) = path {
        return load_config(path);
    }
    match default_config_path() {
        Ok(path) if path.exists() => load_config(&path),
        _ => Ok(FinderConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_finder_config() {
        let config = FinderConfig::default();

        assert_eq!(config.matching.threshold, 80);
        assert_eq!(config.matching.top_k, 5);
        assert_eq!(config.matching.min_word_len, 3);
        assert_eq!(config.matching.scorer, Scorer::Levenshtein);

        assert_eq!(config.ocr.language, "en-US");

        assert_eq!(config.output.highlight_color, [255, 0, 0, 255]);
        assert_eq!(config.output.highlight_thickness, 2);
    }

    #[test]
    fn test_config_with_custom_values() {
        let mut config = FinderConfig::default();
        config.matching.threshold = 65;
        config.matching.scorer = Scorer::JaroWinkler;
        config.ocr.language = "de-DE".to_string();

        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("scorer = \"jaro_winkler\""));

        let parsed: FinderConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let parsed: FinderConfig = toml::from_str("[matching]\nthreshold = 90\n").unwrap();

        assert_eq!(parsed.matching.threshold, 90);
        assert_eq!(parsed.matching.top_k, 5);
        assert_eq!(parsed.ocr, OcrSettings::default());
    }

    #[test]
    fn test_save_and_load_config() {
        let mut config = FinderConfig::default();
        config.matching.min_word_len = 4;

        let temp_file = NamedTempFile::new().unwrap();
        save_config(&config, temp_file.path()).unwrap();
        let loaded = load_config(temp_file.path()).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config(Path::new("/nonexistent/path/config.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "this is not valid toml {{{{").unwrap();

        let result = load_config(temp_file.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_threshold_out_of_range() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "[matching]\nthreshold = 150").unwrap();

        let result = load_config(temp_file.path());
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_load_config_threshold_upper_bound() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "[matching]\nthreshold = 100").unwrap();

        let loaded = load_config(temp_file.path()).unwrap();
        assert_eq!(loaded.matching.threshold, 100);
    }

    #[test]
    fn test_load_or_default_explicit_missing_path() {
        let result = load_or_default(Some(Path::new("/nonexistent/path/config.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_scorer_rejected() {
        let result: Result<FinderConfig, _> = toml::from_str("[matching]\nscorer = \"soundex\"\n");
        assert!(result.is_err());
    }
}
