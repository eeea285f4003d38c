use crate::core::errors::{FencError, Result};
use log::debug;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Resolves path strings to existing regular files.
///
/// A path is used directly when it is absolute, starts with `~`, or starts
/// with `./` or `../`. Anything else is a resource name, looked up in each
/// search directory in order.
#[derive(Debug, Clone, Default)]
pub struct ResourceLocator {
    search_paths: Vec<PathBuf>,
}

impl ResourceLocator {
    pub fn new(search_paths: Vec<PathBuf>) -> Self {
        ResourceLocator { search_paths }
    }

    /// Adds a search directory ahead of the existing ones.
    pub fn prepend(&mut self, dir: impl Into<PathBuf>) {
        self.search_paths.insert(0, dir.into());
    }

    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// Resolves `path` to an existing regular file.
    pub fn resolve(&self, path: &str) -> Result<PathBuf> {
        if let Some(direct) = direct_reference(path) {
            if direct.is_file() {
                debug!("resolved {} as a direct path", direct.display());
                return Ok(direct);
            }
            return Err(FencError::not_found(direct));
        }

        for root in &self.search_paths {
            if let Some(found) = lookup_resource(root, path) {
                debug!("resolved resource '{}' to {}", path, found.display());
                return Ok(found);
            }
        }

        Err(FencError::not_found(path))
    }
}

/// Returns the filesystem path if `path` names one directly.
fn direct_reference(path: &str) -> Option<PathBuf> {
    if path.starts_with('~') {
        return Some(PathBuf::from(shellexpand::tilde(path).as_ref()));
    }

    let candidate = Path::new(path);
    if candidate.is_absolute() {
        return Some(candidate.to_path_buf());
    }

    match candidate.components().next() {
        Some(Component::CurDir) | Some(Component::ParentDir) => Some(candidate.to_path_buf()),
        _ => None,
    }
}

/// Looks `name` up under `root`, refusing anything that escapes it.
fn lookup_resource(root: &Path, name: &str) -> Option<PathBuf> {
    let candidate = root.join(name);
    if !candidate.is_file() {
        return None;
    }

    let canonical_root = fs::canonicalize(root).ok()?;
    let canonical = fs::canonicalize(&candidate).ok()?;
    if !canonical.starts_with(&canonical_root) {
        debug!(
            "resource '{}' escapes {}, skipping",
            name,
            canonical_root.display()
        );
        return None;
    }

    Some(candidate)
}
