//! Driver configuration management
//!
//! Loads the problem set and run settings from a TOML file, then applies
//! environment variable and command line overrides.

use serde::Deserialize;
use solver_core::math::solvers::DEFAULT_MAX_ITERATIONS;
use solver_core::types::ProblemDefinition;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::ConfigError;

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "nlsolve.toml";

const ENV_EPSILON: &str = "NLSOLVE_EPSILON";
const ENV_LOG_LEVEL: &str = "NLSOLVE_LOG_LEVEL";
const ENV_MAX_ITERATIONS: &str = "NLSOLVE_MAX_ITERATIONS";

/// Log levels accepted in config, environment and CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// Run configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Log level
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
    /// Precision; prompted for on stdin when absent
    pub epsilon: Option<f64>,
    /// Iteration cap applied to every solver
    pub max_iterations: usize,
    /// Problems to solve, in order
    pub problems: Vec<ProblemDefinition>,
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            epsilon: None,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            problems: default_problems(),
        }
    }
}

/// One problem per real root of the built-in cubic.
pub fn default_problems() -> Vec<ProblemDefinition> {
    vec![
        ProblemDefinition::new("Root near -3", -4.0, -2.5)
            .with_relaxation_guess(-3.5)
            .with_newton_guess(-3.5),
        ProblemDefinition::new("Root near -1", -1.5, -0.5)
            .with_relaxation_guess(-0.7)
            .with_newton_guess(-1.2),
        ProblemDefinition::new("Root near 1", 0.5, 2.0)
            .with_relaxation_guess(1.5)
            .with_newton_guess(1.5),
    ]
}

impl AppConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::FileError(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Apply overrides from the process environment.
    pub fn with_env_override(self) -> Result<Self, ConfigError> {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`, keyed by the `NLSOLVE_*` variable names.
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = LogLevel::from_str(&level)?;
        }

        if let Some(raw) = lookup(ENV_EPSILON) {
            let epsilon = raw
                .trim()
                .parse::<f64>()
                .map_err(|_| ConfigError::InvalidEpsilon(raw.clone()))?;
            self.epsilon = Some(epsilon);
        }

        if let Some(raw) = lookup(ENV_MAX_ITERATIONS) {
            self.max_iterations = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidMaxIterations(raw.clone()))?;
        }

        Ok(self)
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) -> Result<(), ConfigError> {
        if let Some(level) = &cli.log_level {
            self.log_level = LogLevel::from_str(level)?;
        }
        if cli.verbose {
            self.log_level = LogLevel::Debug;
        }
        if let Some(epsilon) = cli.epsilon {
            self.epsilon = Some(epsilon);
        }
        Ok(())
    }

    /// Validate the configuration, reporting every problem at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if let Some(epsilon) = self.epsilon {
            if !(epsilon.is_finite() && epsilon > 0.0) {
                errors.push(format!("epsilon must be positive and finite, got {}", epsilon));
            }
        }

        if self.max_iterations == 0 {
            errors.push("max_iterations must be > 0".to_string());
        }

        for problem in &self.problems {
            if let Err(e) = problem.validate_interval() {
                errors.push(format!("problem '{}': {}", problem.description, e));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

/// Overrides collected from the command line.
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path; `nlsolve.toml` is tried when absent
    pub config_file: Option<PathBuf>,
    /// Log level override
    pub log_level: Option<String>,
    /// Forces debug logging
    pub verbose: bool,
    /// Precision override
    pub epsilon: Option<f64>,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config(cli: &CliArgs) -> Result<AppConfig, ConfigError> {
    let config = match &cli.config_file {
        Some(path) => AppConfig::from_file(path)?,
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);
            if default_path.exists() {
                AppConfig::from_file(default_path)?
            } else {
                AppConfig::default()
            }
        }
    };

    let mut config = config.with_env_override()?;
    config.merge_with_cli(cli)?;
    config.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.epsilon, None);
        assert_eq!(config.max_iterations, DEFAULT_MAX_ITERATIONS);
        assert_eq!(config.problems.len(), 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("trace").unwrap(), LogLevel::Trace);
        assert_eq!(LogLevel::from_str("DEBUG").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("Info").unwrap(), LogLevel::Info);
        assert_eq!(LogLevel::from_str(" warn ").unwrap(), LogLevel::Warn);
        assert_eq!(LogLevel::from_str("error").unwrap(), LogLevel::Error);

        assert!(LogLevel::from_str("verbose").is_err());
    }

    #[test]
    fn test_parse_full_file() {
        let config = AppConfig::from_toml_str(
            r#"
log_level = "debug"
epsilon = 1e-6
max_iterations = 250

[[problems]]
description = "Root near 1"
a = 1.0
b = 2.0
relaxation_initial_guess = 1.5
newton_initial_guess = 1.5

[[problems]]
description = "No guesses"
a = -4.0
b = -2.5
"#,
        )
        .unwrap();

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_relative_eq!(config.epsilon.unwrap(), 1e-6);
        assert_eq!(config.max_iterations, 250);
        assert_eq!(config.problems.len(), 2);
        assert_eq!(config.problems[0].newton_initial_guess, Some(1.5));
        assert_eq!(config.problems[1].relaxation_initial_guess, None);
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let config = AppConfig::from_toml_str("epsilon = 0.01").unwrap();
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.max_iterations, DEFAULT_MAX_ITERATIONS);
        assert_eq!(config.problems, default_problems());
    }

    #[test]
    fn test_bad_log_level_in_file_is_rejected() {
        let err = AppConfig::from_toml_str(r#"log_level = "chatty""#).unwrap_err();
        assert!(matches!(err, ConfigError::FileError(_)));
        assert!(err.to_string().contains("chatty"));
    }

    #[test]
    fn test_from_file_roundtrip_through_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[[problems]]\ndescription = \"only\"\na = 0.5\nb = 2.0\nnewton_initial_guess = 1.5"
        )
        .unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.problems.len(), 1);
        assert_eq!(config.problems[0].description, "only");
    }

    #[test]
    fn test_from_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::from_file(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileError(_)));
    }

    #[test]
    fn test_env_overrides() {
        let config = AppConfig::default()
            .with_overrides_from(lookup_from(&[
                ("NLSOLVE_EPSILON", "1e-9"),
                ("NLSOLVE_LOG_LEVEL", "TRACE"),
                ("NLSOLVE_MAX_ITERATIONS", "42"),
            ]))
            .unwrap();

        assert_relative_eq!(config.epsilon.unwrap(), 1e-9);
        assert_eq!(config.log_level, LogLevel::Trace);
        assert_eq!(config.max_iterations, 42);
    }

    #[test]
    fn test_env_override_rejects_garbage() {
        let err = AppConfig::default()
            .with_overrides_from(lookup_from(&[("NLSOLVE_EPSILON", "tiny")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEpsilon(_)));

        let err = AppConfig::default()
            .with_overrides_from(lookup_from(&[("NLSOLVE_MAX_ITERATIONS", "-3")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidMaxIterations(_)));
    }

    #[test]
    fn test_cli_beats_env() {
        let mut config = AppConfig::default()
            .with_overrides_from(lookup_from(&[
                ("NLSOLVE_EPSILON", "1e-9"),
                ("NLSOLVE_LOG_LEVEL", "error"),
            ]))
            .unwrap();

        let cli = CliArgs {
            epsilon: Some(1e-4),
            log_level: Some("info".to_string()),
            ..Default::default()
        };
        config.merge_with_cli(&cli).unwrap();

        assert_relative_eq!(config.epsilon.unwrap(), 1e-4);
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn test_verbose_forces_debug() {
        let mut config = AppConfig::default();
        let cli = CliArgs {
            log_level: Some("error".to_string()),
            verbose: true,
            ..Default::default()
        };
        config.merge_with_cli(&cli).unwrap();
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_validation_collects_every_error() {
        let config = AppConfig {
            epsilon: Some(-1.0),
            max_iterations: 0,
            problems: vec![
                ProblemDefinition::new("reversed", 2.0, 1.0),
                ProblemDefinition::new("fine", 1.0, 2.0),
                ProblemDefinition::new("empty", 1.0, 1.0),
            ],
            ..Default::default()
        };

        match config.validate() {
            Err(ConfigError::Validation(errors)) => {
                assert_eq!(errors.len(), 4);
                assert!(errors.iter().any(|e| e.contains("'reversed'")));
                assert!(errors.iter().any(|e| e.contains("'empty'")));
                assert!(!errors.iter().any(|e| e.contains("'fine'")));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_build_config_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_iterations = 77\nproblems = []").unwrap();

        let cli = CliArgs {
            config_file: Some(file.path().to_path_buf()),
            epsilon: Some(1e-5),
            ..Default::default()
        };
        let config = build_config(&cli).unwrap();

        assert!(config.problems.is_empty());
        assert_relative_eq!(config.epsilon.unwrap(), 1e-5);
    }
}
