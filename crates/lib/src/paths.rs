//! Path resolution for build configurations.
//!
//! Every path stored in a [`BuildConfig`](crate::config::BuildConfig) is absolute.
//! Relative inputs are anchored on the working directory here, once, and the
//! result is normalized lexically so it never depends on the filesystem.

use std::path::{Component, Path, PathBuf};

/// Make `path` absolute relative to `base`.
///
/// Absolute paths are returned unchanged. Relative paths are joined onto `base`
/// and `.`/`..` components are resolved without touching the filesystem.
pub fn absolutize(base: &Path, path: &Path) -> PathBuf {
  if path.is_absolute() {
    return path.to_path_buf();
  }

  let mut normalized = PathBuf::new();
  for component in base.join(path).components() {
    match component {
      Component::CurDir => {}
      Component::ParentDir => {
        normalized.pop();
      }
      _ => normalized.push(component),
    }
  }
  normalized
}

/// Absolutize every path in `paths`, preserving order.
pub fn absolutize_all<I, P>(base: &Path, paths: I) -> Vec<PathBuf>
where
  I: IntoIterator<Item = P>,
  P: AsRef<Path>,
{
  paths.into_iter().map(|p| absolutize(base, p.as_ref())).collect()
}
