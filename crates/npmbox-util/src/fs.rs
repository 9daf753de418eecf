use std::fs::DirBuilder;
use std::io;
use std::path::Path;

/// Create a directory and any missing parents, succeeding if it already exists.
///
/// On unix the directory is created with mode `0o755` (world-readable,
/// owner-writable), matching what npm expects for `node_modules`.
///
/// # Errors
/// Returns an error if a component cannot be created, e.g. because a file
/// with the same name is in the way or permissions are insufficient.
pub fn ensure_dir(path: &Path) -> io::Result<()> {
    let mut builder = DirBuilder::new();
    builder.recursive(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o755);
    }

    builder.create(path)
}
