//! Package operations: thin call-sites over [`NpmClient::exec`] plus the
//! decoders that turn captured npm output into typed results.
//!
//! Decoding quirks are load-bearing and preserved: a `list` that produced
//! unparseable stdout reports the captured stderr (not the parse error), and
//! an `outdated` parse failure degrades to an empty result. The true cause
//! is emitted at `debug!` level so callers see unchanged values.

use crate::env::OutputMode;
use crate::error::Error;
use crate::exec::{NpmClient, Outcome};
use crate::Result;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::debug;

/// An installed npm package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    /// Package name, taken from the listing key.
    pub name: String,
    /// Version text as npm reported it; not parsed or validated here.
    pub version: String,
}

/// Shape of `npm list --json` output.
#[derive(Debug, Default, Deserialize)]
struct ListReport {
    #[serde(default)]
    dependencies: HashMap<String, DependencyEntry>,
}

#[derive(Debug, Deserialize)]
struct DependencyEntry {
    #[serde(default)]
    version: String,
}

/// One entry of `npm outdated --json` output.
#[derive(Debug, Deserialize)]
struct OutdatedEntry {
    #[serde(default, alias = "Latest")]
    latest: String,
}

impl NpmClient {
    /// List installed packages (`npm list --json --depth=0`).
    pub fn packages(&self) -> Result<Vec<Package>> {
        let outcome = self.exec(
            &["list", "--json", "--depth=0"],
            OutputMode::from_debug_env(),
        )?;
        decode_packages(&outcome)
    }

    /// Install packages (`npm install --force <names..>`).
    pub fn install_packages<I, S>(&self, packages: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut args = vec!["install".to_string(), "--force".to_string()];
        args.extend(packages.into_iter().map(|p| p.as_ref().to_string()));
        let args: Vec<&str> = args.iter().map(String::as_str).collect();

        let outcome = self.exec(&args, OutputMode::from_debug_env())?;
        if outcome.success {
            Ok(())
        } else {
            Err(Error::Install {
                stderr: outcome.stderr,
            })
        }
    }

    /// Rebuild installed packages (`npm rebuild`).
    pub fn rebuild_packages(&self) -> Result<()> {
        let outcome = self.exec(&["rebuild"], OutputMode::from_debug_env())?;
        if outcome.success {
            Ok(())
        } else {
            Err(Error::Rebuild {
                stderr: outcome.stderr,
            })
        }
    }

    /// Remove packages (`npm remove <names..>`).
    pub fn remove_packages<I, S>(&self, packages: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut args = vec!["remove".to_string()];
        args.extend(packages.into_iter().map(|p| p.as_ref().to_string()));
        let args: Vec<&str> = args.iter().map(String::as_str).collect();

        let outcome = self.exec(&args, OutputMode::from_debug_env())?;
        if outcome.success {
            Ok(())
        } else {
            Err(Error::Npm {
                stderr: outcome.stderr,
            })
        }
    }

    /// Map outdated packages to their latest available version
    /// (`npm outdated --json <names..>`), optionally filtered by name.
    pub fn outdated_packages<I, S>(&self, names: I) -> Result<HashMap<String, String>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut args = vec!["outdated".to_string(), "--json".to_string()];
        args.extend(names.into_iter().map(|n| n.as_ref().to_string()));
        let args: Vec<&str> = args.iter().map(String::as_str).collect();

        let outcome = self.exec(&args, OutputMode::from_debug_env())?;
        decode_outdated(&outcome)
    }

    /// Clear the npm cache (`npm cache clean`), streaming output to the
    /// caller's stdio unconditionally.
    pub fn clear_cache(&self) -> Result<()> {
        let outcome = self.exec(&["cache", "clean"], OutputMode::Stream)?;
        if outcome.success {
            Ok(())
        } else {
            Err(Error::Exit { code: outcome.code })
        }
    }

    /// Delete `<root>/package-lock.json`. Errors if the file does not exist.
    pub fn remove_package_lock(&self) -> Result<()> {
        std::fs::remove_file(self.config().package_lock())?;
        Ok(())
    }
}

/// Decode a `list --json` outcome into package records.
fn decode_packages(outcome: &Outcome) -> Result<Vec<Package>> {
    if !outcome.success {
        return Err(Error::Npm {
            stderr: outcome.stderr.clone(),
        });
    }

    let report: ListReport = match serde_json::from_str(&outcome.stdout) {
        Ok(report) => report,
        Err(err) => {
            // Callers get the stderr text either way; the parse error only
            // surfaces here.
            debug!(%err, "npm list stdout was not the expected JSON");
            return Err(Error::Npm {
                stderr: outcome.stderr.clone(),
            });
        }
    };

    Ok(report
        .dependencies
        .into_iter()
        .map(|(name, entry)| Package {
            name,
            version: entry.version,
        })
        .collect())
}

/// Decode an `outdated --json` outcome into a name → latest-version map.
///
/// npm signals "outdated packages exist" with exit code 1, so a non-zero
/// exit alone is not a failure; only stderr content marks a real one.
fn decode_outdated(outcome: &Outcome) -> Result<HashMap<String, String>> {
    if !outcome.success && !outcome.stderr.is_empty() {
        return Err(Error::Npm {
            stderr: outcome.stderr.clone(),
        });
    }

    let entries: HashMap<String, OutdatedEntry> = match serde_json::from_str(&outcome.stdout) {
        Ok(entries) => entries,
        Err(err) => {
            debug!(%err, "npm outdated stdout was not the expected JSON, treating as empty");
            HashMap::new()
        }
    };

    Ok(entries
        .into_iter()
        .map(|(name, entry)| (name, entry.latest))
        .collect())
}
