//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use syllabus_llm::AssistantConfig;
use syllabus_store::JsonCurriculumSource;
use tracing::debug;

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Grade shown at startup; the first configured grade when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_grade: Option<String>,

    /// Persisted learned-set file
    #[serde(default = "default_learned_file")]
    pub learned_file: PathBuf,

    /// Configured grades, in display order
    #[serde(default = "default_grades")]
    pub grades: Vec<GradeConfig>,

    /// AI assistant backend
    #[serde(default)]
    pub assistant: AssistantConfig,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// One grade and its knowledge-base file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeConfig {
    /// Grade identifier (e.g. "7")
    pub id: String,

    /// Path to the grade's JSON knowledge base
    pub path: PathBuf,
}

/// Global CLI settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Command history size
    #[serde(default = "default_history_size")]
    pub history_size: usize,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Directory holding config and history: `~/.syllabus`.
    pub fn dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".syllabus"))
    }

    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        Ok(Self::dir()?.join("config.toml"))
    }

    /// Load from `path`, or from the default location when `None`.
    ///
    /// A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::path()?,
        };
        Self::load_from(&path)
    }

    /// Load configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config = if path.exists() {
            debug!("Loading config from {}", path.display());
            let contents = fs::read_to_string(path)?;
            toml::from_str(&contents)?
        } else {
            debug!("No config at {}, using defaults", path.display());
            Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// Save configuration to a specific file.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Check grade ids and assistant settings.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for grade in &self.grades {
            if grade.id.trim().is_empty() {
                return Err(CliError::Config("Grade id must not be empty".into()));
            }
            if !seen.insert(grade.id.as_str()) {
                return Err(CliError::Config(format!("Duplicate grade id '{}'", grade.id)));
            }
        }
        if let Some(active) = &self.active_grade {
            if !seen.contains(active.as_str()) {
                return Err(CliError::Config(format!(
                    "Active grade '{}' is not configured",
                    active
                )));
            }
        }
        if self.assistant.timeout_secs == 0 {
            return Err(CliError::Config(
                "assistant.timeout_secs must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    /// Curriculum source for every configured grade.
    pub fn curriculum_source(&self) -> JsonCurriculumSource {
        self.grades
            .iter()
            .fold(JsonCurriculumSource::new(), |source, grade| {
                source.with_grade(grade.id.as_str(), grade.path.as_path())
            })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            active_grade: None,
            learned_file: default_learned_file(),
            grades: default_grades(),
            assistant: AssistantConfig::default(),
            settings: Settings::default(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
            history_size: 1000,
        }
    }
}

fn default_learned_file() -> PathBuf {
    PathBuf::from("learned_concepts.json")
}

fn default_grades() -> Vec<GradeConfig> {
    vec![
        GradeConfig {
            id: "7".to_string(),
            path: PathBuf::from("data/grade7_knowledge_base.json"),
        },
        GradeConfig {
            id: "8".to_string(),
            path: PathBuf::from("data/grade8_knowledge_base.json"),
        },
    ]
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_history_size() -> usize {
    1000
}

#[cfg(test)]
mod tests {
    use super::*;
    use syllabus_llm::ProviderKind;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.grades.len(), 2);
        assert_eq!(config.grades[0].id, "7");
        assert!(config.settings.color);
        assert_eq!(config.assistant.provider, ProviderKind::Mock);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
active_grade = "8"
learned_file = "/tmp/learned.json"

[[grades]]
id = "8"
path = "kb/grade8.json"

[assistant]
provider = "ollama"
model = "mistral"

[settings]
format = "json"
"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.active_grade.as_deref(), Some("8"));
        assert_eq!(config.grades.len(), 1);
        assert_eq!(config.assistant.provider, ProviderKind::Ollama);
        assert_eq!(config.assistant.model, "mistral");
        assert_eq!(config.settings.format, OutputFormat::Json);
        assert!(config.settings.color);
        assert_eq!(config.curriculum_source().path_for("8"), Some(Path::new("kb/grade8.json")));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = Config::default();
        config.active_grade = Some("8".to_string());
        config.save_to(&path).unwrap();

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_validation_rejects_duplicates() {
        let mut config = Config::default();
        config.grades[1].id = "7".to_string();
        assert!(matches!(config.validate(), Err(CliError::Config(_))));
    }

    #[test]
    fn test_validation_rejects_unknown_active_grade() {
        let config = Config {
            active_grade: Some("12".to_string()),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_timeout() {
        let mut config = Config::default();
        config.assistant.timeout_secs = 0;
        assert!(config.validate().is_err());
    }
}
