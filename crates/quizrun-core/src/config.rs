//! Quiz configuration.
//!
//! Settings come from, highest priority first: command-line flags, a
//! `quizrun.toml` file, and the built-in defaults below.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::model::MatchMode;

/// File name searched for in the current directory.
pub const CONFIG_FILE_NAME: &str = "quizrun.toml";

/// Top-level quizrun configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizConfig {
    /// CSV file of `question,answer` rows.
    #[serde(default = "default_csv")]
    pub csv: PathBuf,
    /// Shuffle the problems before asking them.
    #[serde(default)]
    pub shuffle: bool,
    /// Seconds allowed per question. Negative values are treated as zero.
    #[serde(default = "default_limit_secs")]
    pub limit_secs: i64,
    /// Compare answers exactly instead of trimming the user's input.
    #[serde(default)]
    pub strict: bool,
}

fn default_csv() -> PathBuf {
    PathBuf::from("problems.csv")
}
fn default_limit_secs() -> i64 {
    30
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            csv: default_csv(),
            shuffle: false,
            limit_secs: default_limit_secs(),
            strict: false,
        }
    }
}

impl QuizConfig {
    /// Per-question time limit, clamping negative values to zero.
    pub fn limit(&self) -> Duration {
        if self.limit_secs < 0 {
            tracing::warn!(
                "time limit {}s is negative, treating it as 0s",
                self.limit_secs
            );
        }
        Duration::from_secs(self.limit_secs.max(0) as u64)
    }

    pub fn match_mode(&self) -> MatchMode {
        if self.strict {
            MatchMode::Exact
        } else {
            MatchMode::Trimmed
        }
    }
}

/// Load config from an explicit path, or from `quizrun.toml` in the current
/// directory if present, or fall back to defaults.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizConfig, ConfigError> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => return Err(ConfigError::NotFound(p.to_path_buf())),
        None => {
            let local = PathBuf::from(CONFIG_FILE_NAME);
            local.exists().then_some(local)
        }
    };

    match config_path {
        Some(path) => {
            let config = parse_config_file(&path)?;
            tracing::debug!("loaded config from {}", path.display());
            Ok(config)
        }
        None => Ok(QuizConfig::default()),
    }
}

fn parse_config_file(path: &Path) -> Result<QuizConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    toml::from_str(&content).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = QuizConfig::default();
        assert_eq!(config.csv, PathBuf::from("problems.csv"));
        assert!(!config.shuffle);
        assert_eq!(config.limit(), Duration::from_secs(30));
        assert_eq!(config.match_mode(), MatchMode::Trimmed);
    }

    #[test]
    fn parse_partial_config() {
        let config: QuizConfig = toml::from_str("shuffle = true\nlimit_secs = 5\n").unwrap();
        assert!(config.shuffle);
        assert_eq!(config.limit_secs, 5);
        assert_eq!(config.csv, PathBuf::from("problems.csv"));
    }

    #[test]
    fn negative_limit_clamps_to_zero() {
        let config = QuizConfig {
            limit_secs: -4,
            ..Default::default()
        };
        assert_eq!(config.limit(), Duration::ZERO);
    }

    #[test]
    fn strict_selects_exact_matching() {
        let config = QuizConfig {
            strict: true,
            ..Default::default()
        };
        assert_eq!(config.match_mode(), MatchMode::Exact);
    }

    #[test]
    fn load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quiz.toml");
        std::fs::write(&path, "csv = \"capitals.csv\"\nstrict = true\n").unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.csv, PathBuf::from("capitals.csv"));
        assert!(config.strict);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = load_config_from(Some(Path::new("/nonexistent/quizrun.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "limit_secs = \"soon\"").unwrap();

        let err = load_config_from(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
