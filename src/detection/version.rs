//! Async version query with timeout.

use crate::ProbeError;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;

/// Run an executable with `--version` and capture its standard output.
///
/// The child is killed if it outlives `limit`, so a hung package manager
/// (yarn waiting on a corepack prompt, for instance) never stalls detection.
///
/// # Returns
///
/// `Ok(String)` with the raw stdout, or a `ProbeError` on failure:
/// - `Timeout` if the command takes longer than `limit`
/// - `PermissionDenied` if the executable cannot be run due to permissions
/// - `Io` for other spawn or wait failures
/// - `NonZeroExit` if the command exits unsuccessfully
/// - `InvalidOutput` if stdout is not valid UTF-8
///
/// Empty output still counts as success.
pub(crate) async fn run_version(path: &Path, limit: Duration) -> Result<String, ProbeError> {
    let mut cmd = Command::new(path);
    cmd.arg("--version")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .kill_on_drop(true);

    let output = timeout(limit, cmd.output())
        .await
        .map_err(|_| ProbeError::Timeout)?
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::PermissionDenied {
                ProbeError::PermissionDenied
            } else {
                ProbeError::Io(e.to_string())
            }
        })?;

    if !output.status.success() {
        return Err(ProbeError::NonZeroExit(output.status.code()));
    }

    // stderr is discarded: npm prints update notices there, never the version
    String::from_utf8(output.stdout).map_err(|_| ProbeError::InvalidOutput)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[tokio::test]
    async fn test_run_version_nonexistent() {
        let path = PathBuf::from("/nonexistent/path/to/executable");
        let result = run_version(&path, Duration::from_secs(1)).await;
        assert!(matches!(result, Err(ProbeError::Io(_))));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_version_non_zero_exit() {
        // `false` ignores its arguments and exits with status 1
        if let Ok(path) = which::which("false") {
            let result = run_version(&path, Duration::from_secs(2)).await;
            assert_eq!(result, Err(ProbeError::NonZeroExit(Some(1))));
        }
    }

    /// Write an executable shell script and run it with `--version`.
    ///
    /// Retries while the kernel still reports the freshly written file as
    /// busy, which happens when a parallel test forks mid-write.
    #[cfg(unix)]
    async fn run_script(body: &str, limit: Duration) -> Result<String, ProbeError> {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("fakepm");
        std::fs::write(&script, body).unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let mut result = run_version(&script, limit).await;
        for _ in 0..10 {
            match &result {
                Err(ProbeError::Io(msg)) if msg.contains("busy") => {
                    tokio::time::sleep(Duration::from_millis(50)).await;
                    result = run_version(&script, limit).await;
                }
                _ => break,
            }
        }
        result
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_version_timeout() {
        let result = run_script("#!/bin/sh\nsleep 5\necho 1.0.0\n", Duration::from_millis(200)).await;
        assert_eq!(result, Err(ProbeError::Timeout));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_version_empty_output_is_success() {
        let result = run_script("#!/bin/sh\nexit 0\n", Duration::from_secs(2)).await;
        assert_eq!(result, Ok(String::new()));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_version_captures_stdout_only() {
        let result = run_script(
            "#!/bin/sh\necho 10.2.3\necho 'npm warn update available' >&2\n",
            Duration::from_secs(2),
        )
        .await;
        assert_eq!(result, Ok("10.2.3\n".to_string()));
    }
}
