use std::path::PathBuf;
use thiserror::Error;

/// Error type for npmbox operations.
///
/// The `Install`/`Rebuild` variants carry the hint text callers are meant to
/// see verbatim; everything npm wrote to stderr is embedded in the message
/// rather than attached as a source, because stderr is the only diagnostic
/// npm reliably produces.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{path} is not relative to project root {root}")]
    NotRelative { path: PathBuf, root: PathBuf },

    /// npm failed and this is what it wrote to stderr (possibly empty).
    #[error("{stderr}")]
    Npm { stderr: String },

    #[error(
        "Error installing package. \n{stderr}\nTry running again with NPMBOX_DEBUG=info to see more output."
    )]
    Install { stderr: String },

    #[error(
        "Error rebuilding packages. \n{stderr}\nTry running again with NPMBOX_DEBUG=info to see more output."
    )]
    Rebuild { stderr: String },

    /// A streamed invocation exited non-zero; its output went to the caller's
    /// stdio, so no stderr text is available. Code is `-1` for signal death.
    #[error("npm exited with code {code}")]
    Exit { code: i32 },
}
