//! # pm-discovery
//!
//! Package manager discovery for JavaScript projects (npm, pnpm, yarn, bun).
//!
//! This crate answers "which package manager drives this project?" by walking
//! a fixed chain of signals: lock files in the working directory, the
//! environment variables package managers set for the scripts they run, and
//! finally which package manager binaries answer `--version` on PATH.
//!
//! ## Features
//!
//! - `Engine` enum identifying supported package managers
//! - `DetectionResult` with the engine, its version and the Node.js version
//! - `detect_package_manager()` async function running the full chain
//! - `Resolver` for running the chain against injected host capabilities
//! - `UserAgent` parser for `npm_config_user_agent`
//!
//! ## Example
//!
//! ```rust,no_run
//! use pm_discovery::{detect_package_manager, Engine};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let result = detect_package_manager(None).await;
//!     match result.engine {
//!         Engine::Unknown => println!("no package manager found"),
//!         engine => println!("{} {}", engine, result.engine_version),
//!     }
//!     println!("node {}", result.host_runtime_version);
//! }
//! ```

mod detection;
mod engine;
mod options;
mod resolver;
mod result;

pub use detection::{
    CommandRunner, EnvSource, PathChecker, SystemCommandRunner, SystemEnv, SystemPaths, UserAgent,
    EXEC_PATH_VAR, USER_AGENT_VAR,
};
pub use engine::{Engine, LockFileRule, LOCK_FILE_RULES};
pub use options::DetectOptions;
pub use resolver::{detect_package_manager, detect_with_options, Resolver};
pub use result::{DetectionResult, DetectionSource, ProbeError, UNKNOWN};
