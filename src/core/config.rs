use crate::core::charset::Charset;
use crate::core::errors::{FencError, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const BUILTIN_CONFIG: &str = include_str!("../../fenc.toml");

const DEFAULT_CHUNK_SIZE: usize = 4096;
const DEFAULT_BUFFER_SIZE: usize = 8192;

/// Global settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Encoding label used by the CLI when none is given
    pub default_encoding: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            default_encoding: "UTF-8".to_string(),
        }
    }
}

impl Settings {
    /// Looks up the configured default encoding in the registry.
    pub fn default_charset(&self) -> Result<Charset> {
        Charset::for_label(&self.default_encoding)
    }
}

/// Statistical detector settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct DetectionSettings {
    /// Bytes fed to the detector per read
    pub chunk_size: usize,
    /// Whether the detector may answer UTF-8
    pub allow_utf8: bool,
    /// Top-level-domain hint, lower-case without the leading dot
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tld: Option<String>,
}

impl Default for DetectionSettings {
    fn default() -> Self {
        DetectionSettings {
            chunk_size: DEFAULT_CHUNK_SIZE,
            allow_utf8: true,
            tld: None,
        }
    }
}

/// Streaming conversion settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct StreamingSettings {
    pub buffer_size: usize,
}

impl Default for StreamingSettings {
    fn default() -> Self {
        StreamingSettings {
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

/// Where resource names are looked up.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct ResourceSettings {
    /// Search directories in priority order, tilde-expanded on use
    pub search_paths: Vec<String>,
}

impl Default for ResourceSettings {
    fn default() -> Self {
        ResourceSettings {
            search_paths: vec!["resources".to_string()],
        }
    }
}

impl ResourceSettings {
    pub fn expanded_paths(&self) -> Vec<PathBuf> {
        self.search_paths
            .iter()
            .map(|p| PathBuf::from(shellexpand::tilde(p).as_ref()))
            .collect()
    }
}

/// Complete configuration, assembled from the built-in defaults and any
/// override files.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct FencConfig {
    pub settings: Settings,
    pub detection: DetectionSettings,
    pub streaming: StreamingSettings,
    pub resources: ResourceSettings,
}

impl FencConfig {
    /// Parses a configuration from TOML content. Missing keys take defaults.
    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str::<FencConfig>(content).map(FencConfig::normalized)
    }

    /// Loads the built-in configuration.
    pub fn load_default() -> Result<Self> {
        Self::from_toml(BUILTIN_CONFIG).map_err(|e| FencError::Config(e.to_string()))
    }

    /// Loads configuration from a custom file path.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| FencError::io(path, e))?;
        Self::from_toml(&content)
            .map_err(|e| FencError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Loads configuration with overrides from standard locations.
    ///
    /// Layers, in priority order (later wins, key by key):
    /// 1. Built-in defaults
    /// 2. `~/.config/fenc/config.toml`
    /// 3. `./fenc.toml`
    /// 4. `explicit`, if given
    ///
    /// Unreadable files in 2 and 3 are skipped with a warning. A broken
    /// explicit file is an error.
    pub fn load_with_overrides(explicit: Option<&Path>) -> Result<Self> {
        let mut table = parse_table(BUILTIN_CONFIG, Path::new("<built-in>"))?;

        let mut candidates = Vec::new();
        if let Some(config_dir) = dirs::config_dir() {
            candidates.push(config_dir.join("fenc").join("config.toml"));
        }
        candidates.push(PathBuf::from("fenc.toml"));

        for path in candidates {
            if !path.is_file() {
                continue;
            }
            match read_table(&path) {
                Ok(overlay) => {
                    debug!("applying config overrides from {}", path.display());
                    merge_tables(&mut table, overlay);
                }
                Err(e) => warn!("skipping config {}: {}", path.display(), e),
            }
        }

        if let Some(path) = explicit {
            merge_tables(&mut table, read_table(path)?);
        }

        Self::from_table(table)
    }

    fn from_table(table: toml::Table) -> Result<Self> {
        toml::Value::Table(table)
            .try_into::<FencConfig>()
            .map(FencConfig::normalized)
            .map_err(|e| FencError::Config(e.to_string()))
    }

    /// Renders the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| FencError::Config(e.to_string()))
    }

    fn normalized(mut self) -> Self {
        if self.detection.chunk_size == 0 {
            warn!("detection.chunk_size must be positive, using {}", DEFAULT_CHUNK_SIZE);
            self.detection.chunk_size = DEFAULT_CHUNK_SIZE;
        }
        if self.streaming.buffer_size == 0 {
            warn!("streaming.buffer_size must be positive, using {}", DEFAULT_BUFFER_SIZE);
            self.streaming.buffer_size = DEFAULT_BUFFER_SIZE;
        }
        self.detection.tld = self.detection.tld.take().and_then(normalize_tld);
        self
    }
}

fn normalize_tld(raw: String) -> Option<String> {
    let tld = raw.trim().trim_start_matches('.').to_ascii_lowercase();
    if tld.is_empty() {
        return None;
    }
    if !tld.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-') {
        warn!("ignoring invalid detection.tld '{}'", raw);
        return None;
    }
    Some(tld)
}

fn parse_table(content: &str, origin: &Path) -> Result<toml::Table> {
    toml::from_str::<toml::Table>(content)
        .map_err(|e| FencError::Config(format!("{}: {}", origin.display(), e)))
}

fn read_table(path: &Path) -> Result<toml::Table> {
    let content = std::fs::read_to_string(path).map_err(|e| FencError::io(path, e))?;
    parse_table(&content, path)
}

/// Deep-merges `overlay` into `base`. Tables merge recursively, every other
/// value (arrays included) is replaced.
fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        if let toml::Value::Table(incoming) = value {
            if let Some(toml::Value::Table(existing)) = base.get_mut(&key) {
                merge_tables(existing, incoming);
                continue;
            }
            base.insert(key, toml::Value::Table(incoming));
        } else {
            base.insert(key, value);
        }
    }
}
