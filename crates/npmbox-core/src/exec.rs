//! npm subprocess construction and execution.
//!
//! One blocking subprocess per call: the argument vector, working directory,
//! and environment are rebuilt from the config every time and never reused.
//! The executor reports *what happened* ([`Outcome`]); deciding whether a
//! non-zero exit is an error belongs to the per-operation decoders.

use crate::config::NpmConfig;
use crate::env::{self, OutputMode};
use crate::error::Error;
use crate::Result;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// What one npm invocation produced.
///
/// `stdout`/`stderr` are empty in [`OutputMode::Stream`] regardless of what
/// the child actually wrote. `code` is `-1` when the child died to a signal.
#[derive(Debug, Clone, Default)]
pub struct Outcome {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
    pub code: i32,
}

/// Handle for driving the npm CLI against one project root.
///
/// Cheap to clone; holds no open resources and no state between calls, so
/// concurrent use from multiple threads is fine (the `node_modules`
/// creation step is idempotent and races harmlessly).
#[derive(Debug, Clone)]
pub struct NpmClient {
    config: NpmConfig,
}

impl NpmClient {
    #[must_use]
    pub fn new(config: NpmConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &NpmConfig {
        &self.config
    }

    /// Build the runnable process description for one npm subcommand.
    ///
    /// Ensures `node_modules` exists, relativizes the node and npm paths
    /// against the project root (the child's working directory), and
    /// assembles
    /// `node npm --scripts-prepend-node-path=true <args..> [--loglevel=..]`
    /// with the isolated environment from [`env::build`].
    pub(crate) fn command(&self, args: &[&str]) -> Result<Command> {
        npmbox_util::fs::ensure_dir(&self.config.node_modules_dir())?;

        let node_rel = self.relativize(&self.config.node_path)?;
        let npm_rel = self.relativize(&self.config.npm_path)?;

        let mut cmd = Command::new(&node_rel);
        cmd.arg(&npm_rel);
        cmd.arg("--scripts-prepend-node-path=true");
        cmd.args(args);
        if let Some(level) = env::debug_level() {
            cmd.arg(format!("--loglevel={level}"));
        }
        cmd.current_dir(&self.config.root_path);
        cmd.env_clear();
        cmd.envs(env::build(&self.config, ambient_vars()));
        Ok(cmd)
    }

    fn relativize(&self, path: &Path) -> Result<PathBuf> {
        npmbox_util::paths::relative_to(path, &self.config.root_path).ok_or_else(|| {
            Error::NotRelative {
                path: path.to_path_buf(),
                root: self.config.root_path.clone(),
            }
        })
    }

    /// Run one npm subcommand to completion, blocking the calling thread.
    ///
    /// Errors here are launch failures only (directory creation, path
    /// relativization, spawn); a started process always yields an
    /// [`Outcome`], non-zero exit included.
    pub fn exec(&self, args: &[&str], mode: OutputMode) -> Result<Outcome> {
        let mut cmd = self.command(args)?;
        debug!(?args, ?mode, root = %self.config.root_path.display(), "invoking npm");

        let (stdout, stderr, status) = match mode {
            OutputMode::Capture => {
                let output = cmd.output()?;
                (
                    String::from_utf8_lossy(&output.stdout).into_owned(),
                    String::from_utf8_lossy(&output.stderr).into_owned(),
                    output.status,
                )
            }
            OutputMode::Stream => (String::new(), String::new(), cmd.status()?),
        };

        Ok(Outcome {
            stdout,
            stderr,
            success: status.success(),
            code: status.code().unwrap_or(-1),
        })
    }
}

/// Snapshot of the ambient environment, tolerant of entries that are not
/// valid Unicode (legal on unix): those pass through lossily instead of
/// panicking the way `std::env::vars` would.
fn ambient_vars() -> impl Iterator<Item = (String, String)> {
    std::env::vars_os().map(|(name, value)| {
        (
            name.to_string_lossy().into_owned(),
            value.to_string_lossy().into_owned(),
        )
    })
}
