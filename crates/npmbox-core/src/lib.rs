#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

//! Programmatic front-end for the npm CLI.
//!
//! Every operation spawns `npm` as a subprocess of a preconfigured node
//! executable, inside an environment isolated from the ambient process's npm
//! settings: private cache directory, fixed registry, global installs and
//! auditing disabled. Captured JSON/text output is decoded into typed
//! results; failures surface the subprocess's stderr.
//!
//! Paths to node, npm, the project root, and the registry URL are supplied
//! by the caller via [`NpmConfig`] — this crate performs no discovery.

pub mod config;
pub mod env;
pub mod error;
pub mod exec;
pub mod pkg;

pub use config::NpmConfig;
pub use env::OutputMode;
pub use error::Error;
pub use exec::{NpmClient, Outcome};
pub use pkg::Package;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
