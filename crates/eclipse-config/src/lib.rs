//! Configuration for the Eclipse model builders, plus `tracing` setup.

use std::io;
use std::path::Path;
use std::sync::Once;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Target prefix of every event the Eclipse crates emit (`eclipse.tooling`, `eclipse.classpath`,
/// `eclipse.config`).
pub const LOG_TARGET: &str = "eclipse";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct EclipseToolingConfig {
    #[serde(default)]
    pub classpath: ClasspathConfig,

    /// Settings for building artifacts of projects the IDE has closed.
    #[serde(default)]
    pub closed_projects: ClosedProjectsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClasspathConfig {
    /// Output location reported when a project's classpath has no output entry.
    #[serde(default = "ClasspathConfig::default_output")]
    pub default_output: String,
}

impl ClasspathConfig {
    fn default_output() -> String {
        "bin".to_owned()
    }
}

impl Default for ClasspathConfig {
    fn default() -> Self {
        Self {
            default_output: Self::default_output(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClosedProjectsConfig {
    /// Base name of the task aggregating the build dependencies of closed projects.
    ///
    /// Underscores are appended while the root project already has a task of that name.
    #[serde(default = "ClosedProjectsConfig::default_task_name")]
    pub task_name: String,
}

impl ClosedProjectsConfig {
    fn default_task_name() -> String {
        "eclipseClosedProjectBuildDependencies".to_owned()
    }
}

impl Default for ClosedProjectsConfig {
    fn default() -> Self {
        Self {
            task_name: Self::default_task_name(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Level for the `eclipse.*` targets (`info`, `debug`, ...) or a full `EnvFilter` directive
    /// string.
    #[serde(default = "LoggingConfig::default_level")]
    pub level: String,

    /// Emit logs in JSON format.
    #[serde(default)]
    pub json: bool,

    /// Write logs to stderr. When disabled no subscriber output is produced.
    #[serde(default = "LoggingConfig::default_stderr")]
    pub stderr: bool,
}

impl LoggingConfig {
    fn default_level() -> String {
        "info".to_owned()
    }

    fn default_stderr() -> bool {
        true
    }

    /// `EnvFilter` directives for the configured level.
    ///
    /// A bare level applies to the [`LOG_TARGET`] targets while everything else stays at `warn`.
    /// Any other value is used as a directive string as is.
    pub(crate) fn directives(&self) -> String {
        let level = self.level.trim();
        let level = if level.is_empty() { "info" } else { level };
        match bare_level(level) {
            Some("error") => format!("error,{LOG_TARGET}=error"),
            Some(level) => format!("warn,{LOG_TARGET}={level}"),
            None => level.to_owned(),
        }
    }

    /// Effective filter: the configured directives, followed by `RUST_LOG` when set.
    pub fn env_filter(&self) -> EnvFilter {
        let mut directives = self.directives();
        if let Ok(env) = std::env::var("RUST_LOG") {
            if !env.trim().is_empty() {
                directives = format!("{directives},{}", env.trim());
            }
        }
        EnvFilter::try_new(&directives)
            .unwrap_or_else(|_| EnvFilter::new(format!("warn,{LOG_TARGET}=info")))
    }
}

fn bare_level(text: &str) -> Option<&'static str> {
    if text.eq_ignore_ascii_case("warning") {
        return Some("warn");
    }
    ["trace", "debug", "info", "warn", "error"]
        .into_iter()
        .find(|level| text.eq_ignore_ascii_case(level))
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
            json: false,
            stderr: Self::default_stderr(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse toml config: {0}")]
    Toml(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        // Keep the message without the source snippet `Display` would add.
        ConfigError::Toml(err.message().to_owned())
    }
}

impl EclipseToolingConfig {
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::load_from_str(&text)
    }

    pub fn load_from_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }
}

static TRACING_INIT: Once = Once::new();

/// Installs the global `tracing` subscriber.
///
/// Safe to call more than once; only the first call has an effect.
pub fn init_tracing(config: &LoggingConfig) {
    TRACING_INIT.call_once(|| {
        if !config.stderr {
            return;
        }

        let filter = config.env_filter();
        let result = if config.json {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(io::stderr),
                )
                .try_init()
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
                .try_init()
        };

        // Another subscriber may already be installed by the embedding process.
        if let Err(err) = result {
            tracing::debug!(
                target = "eclipse.config",
                error = %err,
                "global tracing subscriber already set"
            );
        }
    });
}
