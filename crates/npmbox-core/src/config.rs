use std::path::{Path, PathBuf};

/// Environment variable that enables debug mode and supplies the npm
/// `--loglevel` value (e.g. `NPMBOX_DEBUG=info`).
pub const DEBUG_ENV: &str = "NPMBOX_DEBUG";

/// Locations and registry settings for one npm installation.
///
/// All four values are supplied by an external locator; nothing here walks
/// the filesystem or consults `PATH`. An `NpmConfig` is plain data and can be
/// cloned freely, so parallel test instances can each point at their own
/// project root.
#[derive(Debug, Clone)]
pub struct NpmConfig {
    /// Project root: the working directory for every npm invocation and the
    /// base against which the node/npm paths are relativized.
    pub root_path: PathBuf,

    /// Path to the node executable used to launch npm.
    pub node_path: PathBuf,

    /// Path to the npm CLI script (`npm-cli.js` or equivalent).
    pub npm_path: PathBuf,

    /// Registry URL forced on every invocation via `npm_config_registry`.
    pub registry: String,
}

impl NpmConfig {
    /// Create a config from its four parts.
    #[must_use]
    pub fn new(
        root_path: impl Into<PathBuf>,
        node_path: impl Into<PathBuf>,
        npm_path: impl Into<PathBuf>,
        registry: impl Into<String>,
    ) -> Self {
        Self {
            root_path: root_path.into(),
            node_path: node_path.into(),
            npm_path: npm_path.into(),
            registry: registry.into(),
        }
    }

    /// The private cache directory handed to npm via `npm_config_cache`.
    #[must_use]
    pub fn cache_dir(&self) -> PathBuf {
        self.root_path.join(".npm-cache")
    }

    /// Where npm materializes installed packages.
    #[must_use]
    pub fn node_modules_dir(&self) -> PathBuf {
        self.root_path.join("node_modules")
    }

    /// The lockfile npm writes next to `package.json`.
    #[must_use]
    pub fn package_lock(&self) -> PathBuf {
        self.root_path.join("package-lock.json")
    }

    /// Directory containing the node executable, prepended to `PATH` so npm
    /// lifecycle scripts resolve the same node.
    #[must_use]
    pub fn node_dir(&self) -> &Path {
        self.node_path.parent().unwrap_or_else(|| Path::new(""))
    }
}
