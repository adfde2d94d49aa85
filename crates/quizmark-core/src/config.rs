//! quizmark configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::engine::Grader;
use crate::scoring::CheckboxPolicy;

/// Top-level quizmark configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizmarkConfig {
    /// Checkbox partial-credit overrides.
    #[serde(default)]
    pub grading: CheckboxPolicy,
    /// Output format for `grade` when none is given on the command line.
    #[serde(default = "default_format")]
    pub default_format: String,
    /// Print the authored answer under each question.
    #[serde(default)]
    pub show_hints: bool,
}

fn default_format() -> String {
    "text".to_string()
}

impl Default for QuizmarkConfig {
    fn default() -> Self {
        Self {
            grading: CheckboxPolicy::default(),
            default_format: default_format(),
            show_hints: false,
        }
    }
}

impl QuizmarkConfig {
    /// A grader using the configured checkbox policy.
    pub fn grader(&self) -> Grader {
        Grader::new(self.grading)
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// An explicit path must exist. Without one the search order is:
/// 1. `quizmark.toml` in the current directory
/// 2. `~/.config/quizmark/config.toml`
///
/// Environment variable override: `QUIZMARK_FORMAT`.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizmarkConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizmark.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<QuizmarkConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => QuizmarkConfig::default(),
    };

    if let Ok(format) = std::env::var("QUIZMARK_FORMAT") {
        if !format.trim().is_empty() {
            config.default_format = format.trim().to_string();
        }
    }

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizmark"))
}
