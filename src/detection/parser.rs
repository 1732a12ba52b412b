//! User agent and version output parsing.

use crate::Engine;
use regex::Regex;
use semver::Version;
use std::sync::OnceLock;

/// Leading `<name>/<version>` pair, as in `pnpm/8.6.12 npm/? node/v18.17.0`.
fn leading_pair() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\w+)/(\S+)").expect("Invalid user agent regex"))
}

/// The `node/<version>` token anywhere in the string.
fn node_token() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?:^|\s)node/(\S+)").expect("Invalid node token regex"))
}

/// A parsed `npm_config_user_agent` value.
///
/// Package managers set this variable for every script they run, for example
/// `pnpm/8.6.12 npm/? node/v18.17.0 darwin arm64`.
///
/// # Example
///
/// ```rust
/// use pm_discovery::{Engine, UserAgent};
///
/// let ua = UserAgent::parse("yarn/1.22.19 npm/? node/v18.17.0 darwin arm64").unwrap();
/// assert_eq!(ua.engine(), Engine::Yarn);
/// assert_eq!(ua.version, "1.22.19");
/// assert_eq!(ua.node_version.as_deref(), Some("v18.17.0"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAgent {
    /// Name in the leading pair, e.g. `pnpm`.
    pub name: String,
    /// Version in the leading pair, passed through as-is.
    pub version: String,
    /// Version in the `node/` token, if present.
    pub node_version: Option<String>,
}

impl UserAgent {
    /// Parse a user agent string.
    ///
    /// Returns `None` when the string does not start with `<name>/<version>`.
    pub fn parse(user_agent: &str) -> Option<Self> {
        let caps = leading_pair().captures(user_agent.trim())?;
        let node_version = node_token()
            .captures(user_agent)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string());

        Some(Self {
            name: caps[1].to_string(),
            version: caps[2].to_string(),
            node_version,
        })
    }

    /// Engine named by the leading pair, matched by prefix.
    ///
    /// Only the start of the string counts, so `npm/10.0.0 containing-pnpm`
    /// is npm. Names are tried in priority order, so `pnpm` wins over `npm`.
    pub fn engine(&self) -> Engine {
        Engine::PRIORITY
            .into_iter()
            .find(|engine| self.name.starts_with(engine.executable_name()))
            .unwrap_or(Engine::Unknown)
    }
}

/// Accept `output` as a Node.js version if it looks like `v<major>.<minor>.<patch>`.
///
/// Returns the trimmed string on success.
pub(crate) fn parse_runtime_version(output: &str) -> Option<String> {
    let trimmed = output.trim();
    let numeric = trimmed.strip_prefix('v')?;
    Version::parse(numeric).ok()?;
    Some(trimmed.to_string())
}
