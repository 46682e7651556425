//! Harness configuration for Verdin.
//!
//! Configuration is a small TOML file discovered in the workspace root (or
//! named explicitly via [`CONFIG_ENV_VAR`]). The one value the resolver
//! cares about is the suite identifier; it can always be overridden at run
//! time through [`SUITE_ENV_VAR`], so CI jobs can select a suite without
//! editing the file.
//!
//! This crate also owns logging setup: [`LoggingConfig`] assembles a
//! `tracing` filter from the configured level plus `RUST_LOG`, and
//! [`init_tracing`] installs the global subscriber for harness bootstrap.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use parking_lot::ReentrantMutex;
use thiserror::Error;

/// Environment variable naming the config file (absolute, or relative to the
/// workspace root).
pub const CONFIG_ENV_VAR: &str = "VERDIN_CONFIG_PATH";

/// Environment variable overriding the configured suite identifier.
pub const SUITE_ENV_VAR: &str = "VERDIN_SUITE";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level or full filter directives (e.g. `info` or
    /// `warn,verdin_registry=trace`).
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    fn config_env_filter(&self) -> tracing_subscriber::EnvFilter {
        tracing_subscriber::EnvFilter::try_new(&self.level)
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
    }

    /// Filter combining the configured directives with `RUST_LOG`.
    ///
    /// `RUST_LOG` directives are appended so they win on conflict. Unparsable
    /// combinations fall back to the configured directives alone.
    pub fn env_filter(&self) -> tracing_subscriber::EnvFilter {
        let env_directives = std::env::var("RUST_LOG")
            .ok()
            .filter(|directives| !directives.trim().is_empty());

        match env_directives {
            Some(env_directives) => {
                let combined = format!("{},{env_directives}", self.level);
                tracing_subscriber::EnvFilter::try_new(combined)
                    .or_else(|_| tracing_subscriber::EnvFilter::try_new(env_directives))
                    .unwrap_or_else(|_| self.config_env_filter())
            }
            None => self.config_env_filter(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct HarnessConfig {
    /// Identifier of the suite the harness should resolve and run.
    pub suite: Option<String>,

    pub logging: LoggingConfig,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

impl HarnessConfig {
    /// Parse a config from a TOML string.
    pub fn load_from_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load a config file from TOML.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::load_from_str(&text)
    }

    /// The suite identifier the harness should resolve.
    ///
    /// Read at call time with no caching: [`SUITE_ENV_VAR`] when set,
    /// otherwise the `suite` config field. Values are trimmed; empty values
    /// count as absent.
    pub fn suite_identifier(&self) -> Option<String> {
        std::env::var(SUITE_ENV_VAR)
            .ok()
            .or_else(|| self.suite.clone())
            .map(|identifier| identifier.trim().to_string())
            .filter(|identifier| !identifier.is_empty())
    }
}

static CONFIG_ENV_LOCK: OnceLock<ReentrantMutex<()>> = OnceLock::new();

fn config_env_lock() -> &'static ReentrantMutex<()> {
    CONFIG_ENV_LOCK.get_or_init(|| ReentrantMutex::new(()))
}

/// Run `f` while holding Verdin's config environment lock.
///
/// Tests sometimes need to temporarily set [`CONFIG_ENV_VAR`] or
/// [`SUITE_ENV_VAR`]. Because environment variables are process-global,
/// concurrent config discovery in other threads can observe the temporary
/// override and become flaky. Wrapping the mutation plus the dependent logic
/// in this helper serializes access.
pub fn with_config_env_lock<R>(f: impl FnOnce() -> R) -> R {
    let _guard = config_env_lock().lock();
    f()
}

/// Discover the Verdin configuration file for a workspace root.
///
/// Search order:
/// 1) `VERDIN_CONFIG_PATH` (absolute or relative to `workspace_root`)
/// 2) `verdin.toml` in `workspace_root`
/// 3) `.verdin.toml` in `workspace_root`
pub fn discover_config_path(workspace_root: &Path) -> Option<PathBuf> {
    let _guard = config_env_lock().lock();
    if let Some(value) = std::env::var_os(CONFIG_ENV_VAR) {
        let candidate = PathBuf::from(value);
        let path = if candidate.is_absolute() {
            candidate
        } else {
            workspace_root.join(candidate)
        };
        return Some(path.canonicalize().unwrap_or(path));
    }

    ["verdin.toml", ".verdin.toml"]
        .into_iter()
        .map(|name| workspace_root.join(name))
        .find(|path| path.is_file())
        .map(|path| path.canonicalize().unwrap_or(path))
}

/// Load the Verdin configuration for a workspace root.
///
/// If no config is present, returns [`HarnessConfig::default`] and `None`.
pub fn load_for_workspace(
    workspace_root: &Path,
) -> Result<(HarnessConfig, Option<PathBuf>), ConfigError> {
    let Some(path) = discover_config_path(workspace_root) else {
        return Ok((HarnessConfig::default(), None));
    };

    let config = HarnessConfig::load_from_path(&path)?;
    Ok((config, Some(path)))
}

/// Install the global tracing subscriber for harness bootstrap.
///
/// Tolerates an already-installed subscriber so embedding harnesses that
/// manage their own logging keep working.
pub fn init_tracing(config: &HarnessConfig) {
    let filter = config.logging.env_filter();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        tracing::debug!(
            target: "verdin.config",
            "global tracing subscriber already installed"
        );
    }
}
