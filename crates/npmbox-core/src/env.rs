//! Environment construction for npm subprocesses.
//!
//! Every invocation gets a fresh environment derived from the ambient one:
//! the search path is rebuilt to put the configured node first, and a fixed
//! set of `npm_config_*` overrides isolates the child from whatever npm
//! settings the calling process inherited.

use crate::config::{NpmConfig, DEBUG_ENV};

/// Platform separator for `PATH`-style variable values.
pub const PATH_LIST_SEPARATOR: char = if cfg!(windows) { ';' } else { ':' };

/// Where a subprocess's stdout/stderr go.
///
/// Selected once per invocation; `Stream` wires the child directly to the
/// caller's stdio (captured strings come back empty), `Capture` buffers both
/// in memory for decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Capture,
    Stream,
}

impl OutputMode {
    /// Pick the mode the debug flag asks for: `Stream` while debugging so
    /// npm's own log output is visible live, `Capture` otherwise.
    #[must_use]
    pub fn from_debug_env() -> Self {
        if debug_level().is_some() {
            Self::Stream
        } else {
            Self::Capture
        }
    }
}

/// Read the debug level from [`DEBUG_ENV`], if debug mode is active.
///
/// Empty, `"0"`, and `"false"` all mean "off"; any other value enables debug
/// mode and is forwarded verbatim as npm's `--loglevel`.
#[must_use]
pub fn debug_level() -> Option<String> {
    debug_level_from(std::env::var(DEBUG_ENV).ok())
}

/// Pure form of [`debug_level`] for a value already read from somewhere.
#[must_use]
pub fn debug_level_from(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty() && v != "0" && v != "false")
}

/// Build the child environment from an ambient variable snapshot.
///
/// Every case-insensitive `PATH` entry is removed (the first one's value is
/// kept); all other ambient variables pass through untouched and in order.
/// Appended after them:
///
/// - `PATH=<dir-of-node><sep><ambient-path>` — note the trailing separator
///   when no ambient `PATH` existed; npm tolerates the empty tail.
/// - the six `npm_config_*` overrides that pin the cache directory, registry,
///   and disable always-auth, global mode, onload scripts, and auditing.
#[must_use]
pub fn build<I>(config: &NpmConfig, ambient: I) -> Vec<(String, String)>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut env = Vec::new();
    let mut inherited_path: Option<String> = None;

    for (name, value) in ambient {
        if name.eq_ignore_ascii_case("PATH") {
            if inherited_path.is_none() {
                inherited_path = Some(value);
            }
        } else {
            env.push((name, value));
        }
    }

    let path = format!(
        "{}{PATH_LIST_SEPARATOR}{}",
        config.node_dir().to_string_lossy(),
        inherited_path.unwrap_or_default()
    );
    env.push(("PATH".to_string(), path));
    env.push(("npm_config_always_auth".to_string(), "false".to_string()));
    env.push((
        "npm_config_cache".to_string(),
        config.cache_dir().to_string_lossy().into_owned(),
    ));
    env.push(("npm_config_registry".to_string(), config.registry.clone()));
    env.push(("npm_config_global".to_string(), "false".to_string()));
    env.push(("npm_config_onload_script".to_string(), "false".to_string()));
    env.push(("npm_config_audit".to_string(), "false".to_string()));
    env
}
