use std::path::Path;

use nonempty::NonEmpty;
use serde::{Deserialize, Serialize};

use crate::domain::{CategoryRule, Classifier};

/// Configuration for requirement extraction and rewrite reports.
///
/// The category table is kept in declaration order. That order decides which
/// category wins when an identifier matches keywords of more than one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Versions", into = "Versions")]
pub struct Config {
    /// The categories and the keywords selecting them.
    categories: Vec<CategoryRule>,

    /// Label of the catch-all category.
    other: String,

    /// Maximum number of example requirements printed per category in the
    /// console summary.
    summary_examples: usize,

    /// Settings for the rewrite comparison report.
    pub diff: DiffConfig,
}

/// Settings for the rewrite comparison report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffConfig {
    /// Extension of the current files to compare (without the dot).
    pub extension: String,

    /// Suffix appended to a current file's name to find its backup.
    pub backup_suffix: String,

    /// Maximum number of diff lines written for a single file.
    pub max_lines: usize,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            extension: "yaml".to_string(),
            backup_suffix: ".bak".to_string(),
            max_lines: 50,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let classifier = Classifier::default();
        Self {
            categories: classifier.rules().to_vec(),
            other: classifier.other().label().to_string(),
            summary_examples: default_summary_examples(),
            diff: DiffConfig::default(),
        }
    }
}

/// Error returned when a configuration file cannot be used.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),
    /// The file is not valid configuration.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    /// The configuration could not be serialized.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Loads the configuration at `path`, or the default configuration if the
    /// file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Builds the classifier described by the category table.
    #[must_use]
    pub fn classifier(&self) -> Classifier {
        Classifier::new(self.categories.clone(), self.other.clone())
    }

    /// Maximum number of example requirements per category in the console
    /// summary.
    #[must_use]
    pub const fn summary_examples(&self) -> usize {
        self.summary_examples
    }
}

const fn default_summary_examples() -> usize {
    5
}

fn default_other() -> String {
    "Others".to_string()
}

/// The serialized versions of the configuration.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_other")]
        other: String,

        #[serde(default = "default_summary_examples")]
        summary_examples: usize,

        /// Absent means the built-in table. An explicitly empty list sends
        /// everything to the catch-all category.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        categories: Option<Vec<RuleV1>>,

        #[serde(default)]
        diff: DiffConfig,
    },
}

#[derive(Debug, Serialize, Deserialize)]
struct RuleV1 {
    label: String,
    keywords: Vec<String>,
}

impl TryFrom<Versions> for Config {
    type Error = String;

    fn try_from(versions: Versions) -> Result<Self, Self::Error> {
        match versions {
            Versions::V1 {
                other,
                summary_examples,
                categories,
                diff,
            } => {
                let categories = match categories {
                    None => Classifier::default().rules().to_vec(),
                    Some(rules) => rules
                        .into_iter()
                        .map(|rule| {
                            NonEmpty::from_vec(rule.keywords)
                                .map(|keywords| CategoryRule::new(rule.label.clone(), keywords))
                                .ok_or_else(|| {
                                    format!("category '{}' must have at least one keyword", rule.label)
                                })
                        })
                        .collect::<Result<_, _>>()?,
                };

                Ok(Self {
                    categories,
                    other,
                    summary_examples,
                    diff,
                })
            }
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            other: config.other,
            summary_examples: config.summary_examples,
            categories: Some(
                config
                    .categories
                    .into_iter()
                    .map(|rule| RuleV1 {
                        label: rule.label().to_string(),
                        keywords: rule.keywords().map(ToString::to_string).collect(),
                    })
                    .collect(),
            ),
            diff: config.diff,
        }
    }
}
