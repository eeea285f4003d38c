use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors produced by file access, detection and conversion.
#[derive(Debug, Error)]
pub enum FencError {
    /// Neither direct lookup nor the resource search found a regular file.
    #[error("file not found: {}", .path.display())]
    FileNotFound { path: PathBuf },

    /// The requested encoding label is not in the registry.
    #[error("unsupported encoding '{label}'{}", suggestion_hint(.suggestion))]
    UnsupportedEncoding {
        label: String,
        suggestion: Option<String>,
    },

    /// Any other I/O failure while reading or writing `path`.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A configuration file could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Input exceeds the configured in-memory size limit.
    #[error("input size ({size} bytes) exceeds limit ({limit} bytes); use --force to process anyway")]
    InputTooLarge { size: u64, limit: u64 },
}

fn suggestion_hint(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(s) => format!(" (did you mean '{}'?)", s),
        None => String::new(),
    }
}

impl FencError {
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        FencError::FileNotFound { path: path.into() }
    }

    /// Wraps an I/O error, mapping `NotFound` to `FileNotFound`.
    pub fn io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            return FencError::not_found(path);
        }
        FencError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Wraps an I/O error on a path that is written rather than resolved.
    ///
    /// Unlike [`FencError::io`], `NotFound` stays an `Io` error: a missing
    /// output directory is not a failed lookup.
    pub fn write(path: &Path, source: io::Error) -> Self {
        FencError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, FencError::FileNotFound { .. })
    }

    pub fn is_unsupported_encoding(&self) -> bool {
        matches!(self, FencError::UnsupportedEncoding { .. })
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, FencError>;

/// Levenshtein distance between two strings, compared case-insensitively.
pub(crate) fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.to_lowercase().chars().collect();
    let b: Vec<char> = b.to_lowercase().chars().collect();

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = if ca == cb { 0 } else { 1 };
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Finds the closest candidate to `name`, if any is within a small edit distance.
pub(crate) fn find_closest<'a, I>(name: &str, candidates: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let max_distance = (name.len() / 3).clamp(1, 3);

    candidates
        .into_iter()
        .map(|c| (c, levenshtein(name, c)))
        .filter(|(_, d)| *d <= max_distance)
        .min_by_key(|(_, d)| *d)
        .map(|(c, _)| c.to_string())
}
