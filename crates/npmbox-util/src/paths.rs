use std::path::{Component, Path, PathBuf};

/// Compute `path` relative to `base` by purely lexical means.
///
/// Walks the common component prefix, then emits one `..` per remaining
/// `base` component followed by the rest of `path`. Identical paths yield
/// `.` so the result is always a usable relative path.
///
/// Returns `None` when no lexical relation exists: the two paths differ in
/// absoluteness, or `base` contains `..` components that cannot be inverted
/// without touching the filesystem.
#[must_use]
pub fn relative_to(path: &Path, base: &Path) -> Option<PathBuf> {
    if path.is_absolute() != base.is_absolute() {
        return None;
    }

    let mut path_iter = path.components();
    let mut base_iter = base.components();
    let mut out: Vec<Component<'_>> = Vec::new();

    loop {
        match (path_iter.next(), base_iter.next()) {
            (None, None) => break,
            (Some(p), None) => {
                out.push(p);
                out.extend(path_iter);
                break;
            }
            (None, Some(_)) => out.push(Component::ParentDir),
            (Some(p), Some(b)) if out.is_empty() && p == b => {}
            (Some(p), Some(Component::CurDir)) => out.push(p),
            (Some(_), Some(Component::ParentDir)) => return None,
            (Some(p), Some(_)) => {
                out.push(Component::ParentDir);
                for _ in base_iter.by_ref() {
                    out.push(Component::ParentDir);
                }
                out.push(p);
                out.extend(path_iter);
                break;
            }
        }
    }

    if out.is_empty() {
        return Some(PathBuf::from("."));
    }
    Some(out.iter().map(|c| c.as_os_str()).collect())
}
