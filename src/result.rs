//! Detection result types.

use crate::Engine;
use serde::Serialize;
use thiserror::Error;

/// Literal reported for any version that could not be determined.
pub const UNKNOWN: &str = "unknown";

/// Which detection stage produced the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "file")]
pub enum DetectionSource {
    /// A lock file with this name exists in the working directory.
    LockFile(&'static str),
    /// `npm_config_user_agent` named the engine.
    UserAgent,
    /// `npm_execpath` named the engine.
    ExecPath,
    /// The engine's binary answered `--version`.
    Binary,
    /// Every stage came up empty.
    NotDetected,
}

/// Result of package manager detection.
///
/// Built once per call to [`detect_package_manager`](crate::detect_package_manager).
/// Any part that could not be determined is reported as [`Engine::Unknown`]
/// or the literal [`UNKNOWN`]; detection itself never fails.
///
/// # Example
///
/// ```rust
/// use pm_discovery::{DetectionResult, DetectionSource, Engine};
///
/// let result = DetectionResult {
///     engine: Engine::Pnpm,
///     host_runtime_version: "v20.11.1".to_string(),
///     engine_version: "8.15.4".to_string(),
///     source: DetectionSource::LockFile("pnpm-lock.yaml"),
/// };
/// assert!(result.is_detected());
/// assert!(result.has_engine_version());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionResult {
    /// Detected package manager.
    pub engine: Engine,

    /// Version of the Node.js runtime, such as `v20.11.1`, or `unknown`.
    pub host_runtime_version: String,

    /// Trimmed output of `<engine> --version`, or `unknown`.
    pub engine_version: String,

    /// Stage that produced `engine`.
    pub source: DetectionSource,
}

impl DetectionResult {
    /// Whether a package manager was identified.
    pub fn is_detected(&self) -> bool {
        self.engine.is_known()
    }

    /// Whether the engine reported a usable version string.
    pub fn has_engine_version(&self) -> bool {
        self.engine_version != UNKNOWN
    }
}

/// Failure of a single binary probe.
///
/// Probe failures never reach callers of the resolver; they are logged and
/// degrade to [`Engine::Unknown`] or [`UNKNOWN`]. The type is public so custom
/// [`CommandRunner`](crate::CommandRunner) implementations can report them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ProbeError {
    /// The executable is not on PATH.
    #[error("executable not found")]
    NotFound,

    /// The command did not finish within the configured timeout.
    #[error("timed out")]
    Timeout,

    /// The executable could not be run due to permissions.
    #[error("permission denied")]
    PermissionDenied,

    /// Spawning or waiting on the process failed.
    #[error("i/o error: {0}")]
    Io(String),

    /// The process exited unsuccessfully. `None` when killed by a signal.
    #[error("exited with status {0:?}")]
    NonZeroExit(Option<i32>),

    /// Output was not valid UTF-8.
    #[error("invalid output")]
    InvalidOutput,
}

impl ProbeError {
    /// Human-readable description of the error.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pm_discovery::ProbeError;
    ///
    /// assert_eq!(ProbeError::Timeout.description(), "Probe timed out");
    /// ```
    pub fn description(&self) -> &'static str {
        match self {
            Self::NotFound => "Executable not found",
            Self::Timeout => "Probe timed out",
            Self::PermissionDenied => "Permission denied",
            Self::Io(_) => "I/O error during probe",
            Self::NonZeroExit(_) => "Command exited unsuccessfully",
            Self::InvalidOutput => "Invalid version output",
        }
    }
}
