//! Engine enum identifying supported package managers.

use serde::{Deserialize, Serialize};

/// A JavaScript package manager.
///
/// `Unknown` is a regular member of the enum: detection that cannot reach a
/// verdict reports `Engine::Unknown` rather than the absence of a value.
///
/// # Priority
///
/// When several signals disagree (two lock files, or an environment variable
/// and a binary on `PATH`), the engine that comes first in
/// [`Engine::PRIORITY`] wins. Every detection stage walks the same list.
///
/// # Example
///
/// ```rust
/// use pm_discovery::Engine;
///
/// for engine in Engine::PRIORITY {
///     println!("{}: {}", engine, engine.executable_name());
/// }
///
/// assert_eq!("pnpm".parse::<Engine>().unwrap(), Engine::Pnpm);
/// assert_eq!(Engine::Unknown.to_string(), "unknown");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Engine {
    /// npm, bundled with Node.js
    Npm,
    /// pnpm
    Pnpm,
    /// Yarn (classic or berry)
    Yarn,
    /// Bun
    Bun,
    /// No engine could be determined.
    Unknown,
}

impl Engine {
    /// Known engines in tie-break order: bun > pnpm > yarn > npm.
    pub const PRIORITY: [Engine; 4] = [Engine::Bun, Engine::Pnpm, Engine::Yarn, Engine::Npm];

    /// The executable name to search for in PATH.
    ///
    /// `Unknown` has no executable and returns an empty string.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pm_discovery::Engine;
    ///
    /// assert_eq!(Engine::Bun.executable_name(), "bun");
    /// assert_eq!(Engine::Npm.executable_name(), "npm");
    /// ```
    pub fn executable_name(&self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Pnpm => "pnpm",
            Self::Yarn => "yarn",
            Self::Bun => "bun",
            Self::Unknown => "",
        }
    }

    /// Name of the lock file whose presence implies this engine.
    pub fn lock_file(&self) -> Option<&'static str> {
        match self {
            Self::Npm => Some("package-lock.json"),
            Self::Pnpm => Some("pnpm-lock.yaml"),
            Self::Yarn => Some("yarn.lock"),
            Self::Bun => Some("bun.lockb"),
            Self::Unknown => None,
        }
    }

    /// Token identifying this engine inside `npm_config_user_agent`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pm_discovery::Engine;
    ///
    /// assert_eq!(Engine::Yarn.user_agent_token(), Some("yarn/"));
    /// assert_eq!(Engine::Unknown.user_agent_token(), None);
    /// ```
    pub fn user_agent_token(&self) -> Option<&'static str> {
        match self {
            Self::Npm => Some("npm/"),
            Self::Pnpm => Some("pnpm/"),
            Self::Yarn => Some("yarn/"),
            Self::Bun => Some("bun/"),
            Self::Unknown => None,
        }
    }

    /// Whether this is an actual package manager rather than `Unknown`.
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

/// A lock file name paired with the engine it implies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockFileRule {
    /// File name, resolved relative to the working directory.
    pub file_name: &'static str,
    /// Engine implied by the file's presence.
    pub engine: Engine,
}

/// Lock files checked by the lockfile stage, first match wins.
pub const LOCK_FILE_RULES: [LockFileRule; 4] = [
    LockFileRule {
        file_name: "bun.lockb",
        engine: Engine::Bun,
    },
    LockFileRule {
        file_name: "pnpm-lock.yaml",
        engine: Engine::Pnpm,
    },
    LockFileRule {
        file_name: "yarn.lock",
        engine: Engine::Yarn,
    },
    LockFileRule {
        file_name: "package-lock.json",
        engine: Engine::Npm,
    },
];
