//! Configuration and data directory management.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::warn;

/// Paths to the DocGraph data directory and the files kept in it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataPaths {
    /// Root data directory (e.g., `data/`).
    pub root: PathBuf,
    /// Uploaded source documents (`data/uploads/`).
    pub uploads: PathBuf,
    /// LLM configuration (`data/llm-config.json`).
    pub llm_config_file: PathBuf,
}

impl DataPaths {
    /// Create data paths from a root directory. Creates directories if needed.
    pub fn new(root: impl AsRef<Path>) -> std::io::Result<Self> {
        let root = root.as_ref().to_path_buf();
        let paths = Self {
            uploads: root.join("uploads"),
            llm_config_file: root.join("llm-config.json"),
            root,
        };
        paths.ensure_dirs()?;
        Ok(paths)
    }

    fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.root)?;
        std::fs::create_dir_all(&self.uploads)?;
        Ok(())
    }
}

/// Top-level DocGraph configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server port.
    pub port: u16,
    /// Data directory paths.
    pub data_paths: DataPaths,
    /// Load the seed ontology into the graph store at startup.
    pub seed_on_start: bool,
    /// Number of leading document characters handed to the page analyzer as context.
    pub context_chars: usize,
    /// Timeout applied to every LLM request.
    pub llm_timeout_secs: u64,
}

pub const DEFAULT_PORT: u16 = 3003;
pub const DEFAULT_CONTEXT_CHARS: usize = 2000;
pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 60;

impl AppConfig {
    /// Create configuration from environment and defaults.
    pub fn from_env(data_dir: impl AsRef<Path>) -> std::io::Result<Self> {
        Self::from_lookup(data_dir, |key| std::env::var(key).ok())
    }

    /// Create configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(data_dir: impl AsRef<Path>, lookup: F) -> std::io::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_paths = DataPaths::new(data_dir)?;

        Ok(Self {
            port: parse_or(&lookup, "PORT", DEFAULT_PORT),
            data_paths,
            seed_on_start: lookup("DOCGRAPH_SEED_ON_START")
                .map(|v| parse_flag(&v))
                .unwrap_or(true),
            context_chars: parse_or(&lookup, "DOCGRAPH_CONTEXT_CHARS", DEFAULT_CONTEXT_CHARS),
            llm_timeout_secs: parse_or(
                &lookup,
                "DOCGRAPH_LLM_TIMEOUT_SECS",
                DEFAULT_LLM_TIMEOUT_SECS,
            ),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring invalid value for {}: {:?}", key, raw);
            default
        }),
        None => default,
    }
}

fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}
