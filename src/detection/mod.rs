//! Detection implementation submodule.
//!
//! This module contains the building blocks the resolver chains together:
//!
//! - `host`: traits over file checks, environment and process spawning
//! - `lockfile`: the lock file stage
//! - `environment`: the `npm_config_user_agent` / `npm_execpath` stage
//! - `path_finder`: PATH-based executable lookup with fallbacks
//! - `version`: async `--version` query with timeout
//! - `parser`: user agent and runtime version parsing

mod environment;
mod host;
mod lockfile;
mod parser;
mod path_finder;
mod version;

pub use environment::{EXEC_PATH_VAR, USER_AGENT_VAR};
pub use host::{CommandRunner, EnvSource, PathChecker, SystemCommandRunner, SystemEnv, SystemPaths};
pub use parser::UserAgent;

pub(crate) use environment::detect_from_environment;
pub(crate) use lockfile::detect_from_lock_files;
pub(crate) use parser::parse_runtime_version;
