//! Configuration management for the resume gap analyzer

use crate::error::{GapAnalyzerError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub stopwords: StopwordConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StopwordConfig {
    /// Custom stopword list, one word per line. The built-in English list is used when unset.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Shortest run of letters counted as a TF-IDF term
    pub min_token_len: usize,
    pub smooth_idf: bool,
    pub sublinear_tf: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
    pub pretty_json: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
    Html,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            min_token_len: 2,
            smooth_idf: true,
            sublinear_tf: false,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            detailed: false,
            color_output: true,
            pretty_json: true,
        }
    }
}

impl Config {
    /// Load from `config_path`, writing a default file there on first run
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| GapAnalyzerError::Configuration(format!("Failed to parse config: {}", e)))?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| GapAnalyzerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-gap-analyzer")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        if self.scoring.min_token_len == 0 {
            return Err(GapAnalyzerError::Configuration(
                "scoring.min_token_len must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Set a single value by its dotted key, e.g. `scoring.smooth_idf`
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "stopwords.path" => {
                self.stopwords.path = match value.trim() {
                    "" | "builtin" => None,
                    path => Some(PathBuf::from(path)),
                };
            }
            "scoring.min_token_len" => self.scoring.min_token_len = parse_value(key, value)?,
            "scoring.smooth_idf" => self.scoring.smooth_idf = parse_value(key, value)?,
            "scoring.sublinear_tf" => self.scoring.sublinear_tf = parse_value(key, value)?,
            "output.format" => {
                self.output.format = crate::cli::parse_output_format(value)
                    .map_err(GapAnalyzerError::Configuration)?;
            }
            "output.detailed" => self.output.detailed = parse_value(key, value)?,
            "output.color_output" => self.output.color_output = parse_value(key, value)?,
            "output.pretty_json" => self.output.pretty_json = parse_value(key, value)?,
            _ => {
                return Err(GapAnalyzerError::Configuration(format!(
                    "Unknown configuration key: {}. Supported: {}",
                    key,
                    Self::KEYS.join(", ")
                )))
            }
        }
        self.validate()
    }

    pub const KEYS: &'static [&'static str] = &[
        "stopwords.path",
        "scoring.min_token_len",
        "scoring.smooth_idf",
        "scoring.sublinear_tf",
        "output.format",
        "output.detailed",
        "output.color_output",
        "output.pretty_json",
    ];
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    value.trim().parse::<T>().map_err(|e| {
        GapAnalyzerError::Configuration(format!("Invalid value '{}' for {}: {}", value, key, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_match_vectorizer_conventions() {
        let config = Config::default();
        assert_eq!(config.scoring.min_token_len, 2);
        assert!(config.scoring.smooth_idf);
        assert!(!config.scoring.sublinear_tf);
        assert_eq!(config.output.format, OutputFormat::Console);
        assert!(config.stopwords.path.is_none());
    }

    #[test]
    fn test_load_creates_default_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.scoring.min_token_len, 2);

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.output.format, OutputFormat::Console);
    }

    #[test]
    fn test_partial_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[output]\nformat = \"Json\"\ndetailed = true\ncolor_output = false\npretty_json = false\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(config.output.detailed);
        assert!(config.scoring.smooth_idf);
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[output]\nformat = \"Json\"\n\n[scoring]\nsublinear_tf = true\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(config.output.color_output);
        assert!(config.output.pretty_json);
        assert!(config.scoring.sublinear_tf);
        assert_eq!(config.scoring.min_token_len, 2);
    }

    #[test]
    fn test_invalid_file_is_configuration_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "this is = = not toml").unwrap();

        let result = Config::load_from(&path);
        assert!(matches!(result, Err(GapAnalyzerError::Configuration(_))));
    }

    #[test]
    fn test_set_values() {
        let mut config = Config::default();
        config.set("scoring.sublinear_tf", "true").unwrap();
        config.set("output.format", "markdown").unwrap();
        config.set("stopwords.path", "/tmp/words.txt").unwrap();

        assert!(config.scoring.sublinear_tf);
        assert_eq!(config.output.format, OutputFormat::Markdown);
        assert_eq!(config.stopwords.path, Some(PathBuf::from("/tmp/words.txt")));

        config.set("stopwords.path", "builtin").unwrap();
        assert!(config.stopwords.path.is_none());
    }

    #[test]
    fn test_set_rejects_bad_input() {
        let mut config = Config::default();
        assert!(config.set("scoring.smooth_idf", "maybe").is_err());
        assert!(config.set("scoring.min_token_len", "0").is_err());
        assert!(config.set("models.default", "x").is_err());
    }
}
