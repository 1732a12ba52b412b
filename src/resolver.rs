//! Package manager detection.

use crate::detection::{
    detect_from_environment, detect_from_lock_files, parse_runtime_version, CommandRunner,
    EnvSource, PathChecker, SystemCommandRunner, SystemEnv, SystemPaths, UserAgent,
    USER_AGENT_VAR,
};
use crate::{DetectOptions, DetectionResult, DetectionSource, Engine, UNKNOWN};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Detect the package manager for a directory.
///
/// Runs the resolution chain with [`DetectOptions::default`]. `cwd` defaults
/// to the process's current directory.
///
/// # Detection Process
///
/// 1. Lock files in `cwd`: `bun.lockb`, `pnpm-lock.yaml`, `yarn.lock`,
///    `package-lock.json`, first match wins
/// 2. `npm_config_user_agent`, then `npm_execpath`
/// 3. `bun`, `pnpm`, `yarn`, `npm` on PATH, first that answers `--version`
///
/// Each stage runs only if the previous one found nothing. The version of the
/// chosen engine is then queried with `<engine> --version`.
///
/// # Returns
///
/// Always a [`DetectionResult`]. Anything that could not be determined is
/// [`Engine::Unknown`] or `"unknown"`.
///
/// # Example
///
/// ```rust,no_run
/// use pm_discovery::detect_package_manager;
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() {
///     let result = detect_package_manager(None).await;
///     println!(
///         "{} {} on node {}",
///         result.engine, result.engine_version, result.host_runtime_version
///     );
/// }
/// ```
pub async fn detect_package_manager(cwd: Option<&Path>) -> DetectionResult {
    detect_with_options(cwd, &DetectOptions::default()).await
}

/// Detect the package manager with custom options.
///
/// # Example
///
/// ```rust,no_run
/// use pm_discovery::{detect_with_options, DetectOptions};
/// use std::path::Path;
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() {
///     let opts = DetectOptions {
///         skip_version: true,
///         ..Default::default()
///     };
///     let result = detect_with_options(Some(Path::new("./web")), &opts).await;
///     println!("{}", result.engine);
/// }
/// ```
pub async fn detect_with_options(cwd: Option<&Path>, options: &DetectOptions) -> DetectionResult {
    Resolver::new(options.clone()).resolve(cwd).await
}

/// Runs the detection chain against a set of host capabilities.
///
/// [`Resolver::new`] talks to the real system. [`Resolver::with_capabilities`]
/// accepts any [`PathChecker`], [`CommandRunner`] and [`EnvSource`], which is
/// how the chain is exercised without touching the file system or spawning
/// processes.
///
/// The resolver holds no mutable state, so one value can serve any number of
/// calls, concurrent or not.
///
/// # Example
///
/// ```rust,no_run
/// use pm_discovery::{DetectOptions, Engine, Resolver};
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() {
///     let resolver = Resolver::new(DetectOptions::default());
///     let (engine, source) = resolver.detect_engine(None).await;
///     if engine != Engine::Unknown {
///         println!("{engine} (from {source:?})");
///     }
/// }
/// ```
#[derive(Clone)]
pub struct Resolver {
    paths: Arc<dyn PathChecker>,
    commands: Arc<dyn CommandRunner>,
    env: Arc<dyn EnvSource>,
    options: DetectOptions,
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(DetectOptions::default())
    }
}

/// Engine chosen by the chain, plus the `--version` output when the
/// binary-probe stage already ran it.
struct Detection {
    engine: Engine,
    source: DetectionSource,
    probe_output: Option<String>,
}

impl Resolver {
    /// Resolver backed by the real file system, environment and PATH.
    pub fn new(options: DetectOptions) -> Self {
        Self::with_capabilities(SystemPaths, SystemCommandRunner, SystemEnv, options)
    }

    /// Resolver backed by caller-supplied capabilities.
    pub fn with_capabilities(
        paths: impl PathChecker + 'static,
        commands: impl CommandRunner + 'static,
        env: impl EnvSource + 'static,
        options: DetectOptions,
    ) -> Self {
        Self {
            paths: Arc::new(paths),
            commands: Arc::new(commands),
            env: Arc::new(env),
            options,
        }
    }

    /// Options this resolver was built with.
    pub fn options(&self) -> &DetectOptions {
        &self.options
    }

    /// Produce a full [`DetectionResult`] for `cwd`.
    pub async fn resolve(&self, cwd: Option<&Path>) -> DetectionResult {
        let detection = self.run_chain(cwd).await;

        let engine_version = if self.options.skip_version || !detection.engine.is_known() {
            UNKNOWN.to_string()
        } else if let Some(output) = detection.probe_output {
            version_text(&output).unwrap_or_else(|| UNKNOWN.to_string())
        } else {
            self.engine_version(detection.engine).await
        };

        DetectionResult {
            engine: detection.engine,
            host_runtime_version: self.host_runtime_version().await,
            engine_version,
            source: detection.source,
        }
    }

    /// Identify the engine for `cwd` without looking up any versions.
    pub async fn detect_engine(&self, cwd: Option<&Path>) -> (Engine, DetectionSource) {
        let detection = self.run_chain(cwd).await;
        (detection.engine, detection.source)
    }

    /// Version reported by `<engine> --version`, trimmed.
    ///
    /// `Engine::Unknown` returns `"unknown"` without spawning anything, as do
    /// a missing binary, a failed or timed-out probe and blank output.
    pub async fn engine_version(&self, engine: Engine) -> String {
        if !engine.is_known() {
            return UNKNOWN.to_string();
        }

        self.probe(engine.executable_name())
            .await
            .as_deref()
            .and_then(version_text)
            .unwrap_or_else(|| UNKNOWN.to_string())
    }

    /// Version of the Node.js runtime, such as `v20.11.1`.
    ///
    /// Taken from the `node/` token of `npm_config_user_agent` when the
    /// process was launched by a package manager, otherwise from
    /// `node --version`. Anything not shaped like `v<major>.<minor>.<patch>`
    /// yields `"unknown"`.
    pub async fn host_runtime_version(&self) -> String {
        let from_user_agent = self
            .env
            .var(USER_AGENT_VAR)
            .as_deref()
            .and_then(UserAgent::parse)
            .and_then(|ua| ua.node_version)
            .and_then(|v| parse_runtime_version(&v));
        if let Some(version) = from_user_agent {
            return version;
        }

        match self.probe("node").await {
            Some(output) => parse_runtime_version(&output).unwrap_or_else(|| {
                debug!(output = output.trim(), "unrecognized node version output");
                UNKNOWN.to_string()
            }),
            None => UNKNOWN.to_string(),
        }
    }

    async fn run_chain(&self, cwd: Option<&Path>) -> Detection {
        let lock_file = self
            .working_dir(cwd)
            .and_then(|dir| detect_from_lock_files(self.paths.as_ref(), &dir));
        if let Some(rule) = lock_file {
            debug!(engine = %rule.engine, file = rule.file_name, "detected from lock file");
            return Detection {
                engine: rule.engine,
                source: DetectionSource::LockFile(rule.file_name),
                probe_output: None,
            };
        }

        if let Some((engine, source)) = detect_from_environment(self.env.as_ref()) {
            debug!(%engine, ?source, "detected from environment");
            return Detection {
                engine,
                source,
                probe_output: None,
            };
        }

        for engine in Engine::PRIORITY {
            if let Some(output) = self.probe(engine.executable_name()).await {
                debug!(%engine, "detected from binary probe");
                return Detection {
                    engine,
                    source: DetectionSource::Binary,
                    probe_output: Some(output),
                };
            }
        }

        debug!("no package manager detected");
        Detection {
            engine: Engine::Unknown,
            source: DetectionSource::NotDetected,
            probe_output: None,
        }
    }

    fn working_dir(&self, cwd: Option<&Path>) -> Option<PathBuf> {
        match cwd {
            Some(dir) => Some(dir.to_path_buf()),
            None => std::env::current_dir()
                .map_err(|e| debug!(error = %e, "current directory unavailable"))
                .ok(),
        }
    }

    /// Run `<program> --version`, logging and discarding any failure.
    async fn probe(&self, program: &str) -> Option<String> {
        match self.commands.version(program, self.options.timeout).await {
            Ok(output) => Some(output),
            Err(e) => {
                debug!(program, error = %e, "version probe failed");
                None
            }
        }
    }
}

/// Trimmed version output, or `None` if blank.
fn version_text(output: &str) -> Option<String> {
    let trimmed = output.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
