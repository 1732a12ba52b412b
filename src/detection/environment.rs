//! Environment variable stage.

use super::host::EnvSource;
use crate::{DetectionSource, Engine};

/// Set by npm, pnpm, yarn and bun for every lifecycle script they run.
pub const USER_AGENT_VAR: &str = "npm_config_user_agent";

/// Path of the package manager's entry script, set alongside the user agent.
pub const EXEC_PATH_VAR: &str = "npm_execpath";

/// Read `key`, treating an empty value as unset.
fn non_empty(env: &dyn EnvSource, key: &str) -> Option<String> {
    env.var(key).filter(|value| !value.trim().is_empty())
}

/// Engine named by the environment, checked in priority order.
///
/// The user agent is consulted first, matching `bun/`, `pnpm/`, `yarn/` and
/// `npm/` anywhere in the string. Only when it yields nothing is the exec path
/// searched for the bare engine names.
pub(crate) fn detect_from_environment(env: &dyn EnvSource) -> Option<(Engine, DetectionSource)> {
    if let Some(user_agent) = non_empty(env, USER_AGENT_VAR) {
        let found = Engine::PRIORITY.into_iter().find(|engine| {
            engine
                .user_agent_token()
                .is_some_and(|token| user_agent.contains(token))
        });
        if let Some(engine) = found {
            return Some((engine, DetectionSource::UserAgent));
        }
    }

    let exec_path = non_empty(env, EXEC_PATH_VAR)?;
    Engine::PRIORITY
        .into_iter()
        .find(|engine| exec_path.contains(engine.executable_name()))
        .map(|engine| (engine, DetectionSource::ExecPath))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct MapEnv(HashMap<&'static str, &'static str>);

    impl EnvSource for MapEnv {
        fn var(&self, key: &str) -> Option<String> {
            self.0.get(key).map(|v| v.to_string())
        }
    }

    fn env(pairs: &[(&'static str, &'static str)]) -> MapEnv {
        MapEnv(pairs.iter().copied().collect())
    }

    #[test]
    fn test_user_agent_engines() {
        let cases = [
            ("pnpm/8.6.12 npm/? node/v18.17.0 darwin arm64", Engine::Pnpm),
            ("yarn/1.22.19 npm/? node/v18.17.0 darwin arm64", Engine::Yarn),
            ("bun/1.0.0 npm/? node/v18.17.0 darwin arm64", Engine::Bun),
            ("npm/10.2.3 node/v20.10.0 linux x64 workspaces/false", Engine::Npm),
        ];
        for (ua, expected) in cases {
            let found = detect_from_environment(&env(&[(USER_AGENT_VAR, ua)]));
            assert_eq!(found, Some((expected, DetectionSource::UserAgent)), "{ua}");
        }
    }

    #[test]
    fn test_user_agent_priority_over_position() {
        // Substring matching walks the priority list, not the string
        let found = detect_from_environment(&env(&[(USER_AGENT_VAR, "npm/10.0.0 bun/1.1.0")]));
        assert_eq!(found, Some((Engine::Bun, DetectionSource::UserAgent)));
    }

    #[test]
    fn test_user_agent_beats_exec_path() {
        let found = detect_from_environment(&env(&[
            (USER_AGENT_VAR, "pnpm/8.6.12 npm/? node/v18.17.0"),
            (EXEC_PATH_VAR, "/usr/lib/node_modules/yarn/bin/yarn.js"),
        ]));
        assert_eq!(found, Some((Engine::Pnpm, DetectionSource::UserAgent)));
    }

    #[test]
    fn test_exec_path_fallback() {
        let found = detect_from_environment(&env(&[
            (USER_AGENT_VAR, "deno/1.40.0"),
            (EXEC_PATH_VAR, "/usr/lib/node_modules/yarn/bin/yarn.js"),
        ]));
        assert_eq!(found, Some((Engine::Yarn, DetectionSource::ExecPath)));
    }

    #[test]
    fn test_exec_path_priority() {
        // "pnpm" contains "npm"; pnpm must win
        let found = detect_from_environment(&env(&[(
            EXEC_PATH_VAR,
            "/home/u/.local/share/pnpm/.tools/pnpm/8.6.12/bin/pnpm.cjs",
        )]));
        assert_eq!(found, Some((Engine::Pnpm, DetectionSource::ExecPath)));
    }

    #[test]
    fn test_empty_values_ignored() {
        let found = detect_from_environment(&env(&[(USER_AGENT_VAR, ""), (EXEC_PATH_VAR, "  ")]));
        assert_eq!(found, None);
    }

    #[test]
    fn test_no_environment() {
        assert_eq!(detect_from_environment(&env(&[])), None);
    }
}
