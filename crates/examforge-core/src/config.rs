//! examforge configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::{ExamSettings, ShuffleMode, VersionCount, DEFAULT_VERSIONS};

/// Top-level examforge configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamforgeConfig {
    /// Versions generated when `--versions` is not given. Clamped to 1..=26.
    #[serde(default = "default_versions")]
    pub default_versions: usize,
    /// Shuffle mode used when `--mode` is not given.
    #[serde(default)]
    pub default_mode: ShuffleMode,
    /// Output directory for generated exams.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Header fields applied to banks that leave them empty.
    #[serde(default)]
    pub settings: ExamSettings,
}

fn default_versions() -> usize {
    DEFAULT_VERSIONS
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./examforge-output")
}

impl Default for ExamforgeConfig {
    fn default() -> Self {
        Self {
            default_versions: default_versions(),
            default_mode: ShuffleMode::default(),
            output_dir: default_output_dir(),
            settings: ExamSettings::default(),
        }
    }
}

impl ExamforgeConfig {
    pub fn version_count(&self) -> VersionCount {
        VersionCount::clamped(self.default_versions)
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    let mut search_from = 0;
    while let Some(offset) = result[search_from..].find("${") {
        let start = search_from + offset;
        let Some(end) = result[start..].find('}') else {
            break;
        };
        let var_name = &result[start + 2..start + end];
        let value = std::env::var(var_name).unwrap_or_default();
        result = format!("{}{}{}", &result[..start], value, &result[start + end + 1..]);
        search_from = start + value.len();
    }
    result
}

fn resolve_settings(settings: &mut ExamSettings) {
    for field in [
        &mut settings.professor_name,
        &mut settings.university_name,
        &mut settings.course,
        &mut settings.subject,
        &mut settings.date,
        &mut settings.duration,
        &mut settings.logo_url,
    ] {
        *field = resolve_env_vars(field.as_str());
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `examforge.toml` in the current directory
/// 2. `~/.config/examforge/config.toml`
///
/// Environment variable overrides: `EXAMFORGE_VERSIONS`, `EXAMFORGE_MODE`.
pub fn load_config() -> Result<ExamforgeConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<ExamforgeConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("examforge.toml");
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
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<ExamforgeConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => ExamforgeConfig::default(),
    };

    apply_env_overrides(&mut config)?;
    resolve_settings(&mut config.settings);

    Ok(config)
}

fn apply_env_overrides(config: &mut ExamforgeConfig) -> Result<()> {
    if let Ok(versions) = std::env::var("EXAMFORGE_VERSIONS") {
        config.default_versions = versions
            .trim()
            .parse::<usize>()
            .with_context(|| format!("EXAMFORGE_VERSIONS is not a number: {versions}"))?;
    }

    if let Ok(mode) = std::env::var("EXAMFORGE_MODE") {
        config.default_mode = mode.parse::<ShuffleMode>().context("invalid EXAMFORGE_MODE")?;
    }

    Ok(())
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("examforge"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_EXAMFORGE_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_EXAMFORGE_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_EXAMFORGE_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        assert_eq!(resolve_env_vars("no refs"), "no refs");
        assert_eq!(resolve_env_vars("open ${never"), "open ${never");
        std::env::remove_var("_EXAMFORGE_TEST_VAR");
    }

    #[test]
    fn default_config() {
        let config = ExamforgeConfig::default();
        assert_eq!(config.default_versions, 2);
        assert_eq!(config.default_mode, ShuffleMode::Both);
        assert_eq!(config.version_count().get(), 2);
    }

    #[test]
    fn parse_config() {
        let toml_str = r#"
default_versions = 40
default_mode = "options"
output_dir = "./out"

[settings]
university_name = "State University"
professor_name = "Prof. Silva"
"#;
        let config: ExamforgeConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.default_mode, ShuffleMode::OptionsOnly);
        assert_eq!(config.version_count().get(), 26);
        assert_eq!(config.settings.professor_name, "Prof. Silva");
        assert_eq!(config.settings.duration, "120 minutes");
    }

    #[test]
    fn load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("examforge.toml");
        std::fs::write(&path, "default_versions = 4\ndefault_mode = \"questions\"\n").unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.default_versions, 4);
        assert_eq!(config.default_mode, ShuffleMode::QuestionsOnly);
    }

    #[test]
    fn missing_explicit_path_fails() {
        let err = load_config_from(Some(Path::new("/nonexistent/examforge.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }
}
