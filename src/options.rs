//! Detection options configuration.
//!
//! This module provides the [`DetectOptions`] struct for configuring
//! package manager detection, including the probe timeout and whether to
//! query the engine's version at all.

use std::time::Duration;

/// Configuration options for package manager detection.
///
/// # Default Behavior
///
/// Each `--version` probe gets 2 seconds. Package managers started through a
/// cold Node.js cache can be slow on first run, so raise this on slow
/// machines or network mounts.
///
/// By default the engine version is queried (`skip_version: false`).
///
/// # Example
///
/// ```rust
/// use pm_discovery::DetectOptions;
/// use std::time::Duration;
///
/// // Use default options (2 second timeout, version lookup enabled)
/// let opts = DetectOptions::default();
///
/// // Use custom timeout
/// let opts = DetectOptions {
///     timeout: Duration::from_secs(3),
///     ..Default::default()
/// };
///
/// // Identify the engine only
/// let opts = DetectOptions {
///     skip_version: true,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct DetectOptions {
    /// Timeout applied to every subprocess the resolver spawns.
    ///
    /// A probe that exceeds it is killed and treated as unavailable.
    ///
    /// Default: 2 seconds
    pub timeout: Duration,

    /// Skip the engine version lookup.
    ///
    /// When `true`, `engine_version` is always `unknown`. The binary-probe
    /// stage still runs if the earlier stages found nothing.
    ///
    /// Default: `false`
    pub skip_version: bool,
}

impl Default for DetectOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(2),
            skip_version: false,
        }
    }
}
