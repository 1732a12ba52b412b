//! Host capabilities used by the resolver.
//!
//! Detection only ever reads from the host: it checks whether files exist,
//! reads environment variables and runs `<binary> --version`. Each of these
//! sits behind a small trait so the resolver can be driven by fakes in tests.

use super::path_finder::find_executable;
use super::version::run_version;
use crate::ProbeError;
use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;

/// File existence checks.
pub trait PathChecker: Send + Sync {
    /// Whether anything exists at `path`.
    fn exists(&self, path: &Path) -> bool;
}

/// Environment variable lookup.
pub trait EnvSource: Send + Sync {
    /// Value of `key`, or `None` if unset or not valid Unicode.
    fn var(&self, key: &str) -> Option<String>;
}

/// Runs version queries against executables.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `<program> --version` and return its raw standard output.
    ///
    /// Implementations must bound the call by `timeout` and report a
    /// non-successful exit as an error.
    async fn version(&self, program: &str, timeout: Duration) -> Result<String, ProbeError>;
}

/// [`PathChecker`] backed by the real file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemPaths;

impl PathChecker for SystemPaths {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// [`EnvSource`] backed by the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnv;

impl EnvSource for SystemEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// [`CommandRunner`] that looks programs up on PATH and spawns them.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandRunner;

#[async_trait]
impl CommandRunner for SystemCommandRunner {
    async fn version(&self, program: &str, timeout: Duration) -> Result<String, ProbeError> {
        let path = find_executable(program).ok_or(ProbeError::NotFound)?;
        run_version(&path, timeout).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_paths() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("yarn.lock");
        assert!(!SystemPaths.exists(&file));

        std::fs::write(&file, "").unwrap();
        assert!(SystemPaths.exists(&file));
        assert!(!SystemPaths.exists(&dir.path().join("missing/yarn.lock")));
    }

    #[test]
    fn test_system_env_missing_var() {
        assert_eq!(SystemEnv.var("PM_DISCOVERY_DEFINITELY_UNSET_VAR_12345"), None);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_system_runner_not_found() {
        let result = SystemCommandRunner
            .version("definitely_not_a_real_package_manager_xyz", Duration::from_secs(1))
            .await;
        assert_eq!(result, Err(ProbeError::NotFound));
    }

    #[cfg(unix)]
    #[tokio::test(flavor = "current_thread")]
    async fn test_system_runner_ignores_binaries_off_path() {
        use std::os::unix::fs::PermissionsExt;

        let home = tempfile::tempdir().unwrap();
        let bin_dir = home.path().join(".bun/bin");
        std::fs::create_dir_all(&bin_dir).unwrap();
        let name = "pm_discovery_home_only_bun";
        let binary = bin_dir.join(name);
        std::fs::write(&binary, "#!/bin/sh\necho 1.1.8\n").unwrap();
        std::fs::set_permissions(&binary, std::fs::Permissions::from_mode(0o755)).unwrap();

        let result = SystemCommandRunner
            .version(name, Duration::from_secs(2))
            .await;
        assert_eq!(result, Err(ProbeError::NotFound));
    }
}
