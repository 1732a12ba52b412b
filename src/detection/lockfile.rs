//! Lock file stage.

use super::host::PathChecker;
use crate::{LockFileRule, LOCK_FILE_RULES};
use std::path::Path;
use tracing::trace;

/// First rule in [`LOCK_FILE_RULES`] whose file exists under `cwd`.
///
/// Only existence is checked; modification times and file contents are
/// ignored, so a directory holding both `yarn.lock` and `package-lock.json`
/// is always yarn.
pub(crate) fn detect_from_lock_files(paths: &dyn PathChecker, cwd: &Path) -> Option<LockFileRule> {
    LOCK_FILE_RULES.into_iter().find(|rule| {
        let hit = paths.exists(&cwd.join(rule.file_name));
        trace!(file = rule.file_name, hit, "checked lock file");
        hit
    })
}
