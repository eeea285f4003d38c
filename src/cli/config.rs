use crate::cli::global::GlobalArgs;
use fenc::{Charset, FencConfig, FencError, FileAccess};
use log::warn;

/// Builds the file accessor, putting `--resource-dir` entries first.
pub fn build_access(config: &FencConfig, global: &GlobalArgs) -> FileAccess {
    let access = FileAccess::new(config.clone());
    let mut locator = access.locator().clone();
    for dir in global.resource_dirs.iter().rev() {
        locator.prepend(dir.clone());
    }
    access.with_locator(locator)
}

/// Looks up `label`, or the configured default encoding when absent.
pub fn charset_or_default(label: Option<&str>, config: &FencConfig) -> fenc::Result<Charset> {
    match label {
        Some(label) => Charset::for_label(label),
        None => config.settings.default_charset(),
    }
}

/// Refuses files over `--max-size` unless `--force` is given.
pub fn enforce_max_size(access: &FileAccess, path: &str, global: &GlobalArgs) -> fenc::Result<()> {
    if global.max_size == 0 {
        return Ok(());
    }

    let resolved = access.resolve(path)?;
    let size = std::fs::metadata(&resolved)
        .map_err(|e| FencError::io(&resolved, e))?
        .len();

    if size > global.max_size {
        if global.force {
            warn!(
                "processing large file ({} bytes, limit: {} bytes)",
                size, global.max_size
            );
        } else {
            return Err(FencError::InputTooLarge {
                size,
                limit: global.max_size,
            });
        }
    }

    Ok(())
}
