//! Scan and diff configuration types.

use std::path::PathBuf;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Configuration for walking the library root on disk.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct ScanConfig {
    /// Library root to walk.
    pub root: PathBuf,

    /// Follow symbolic links.
    #[builder(default = "false")]
    #[serde(default)]
    pub follow_symlinks: bool,

    /// Include hidden entries (starting with .).
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub include_hidden: bool,

    /// Number of threads for walking (0 = auto-detect).
    #[builder(default = "0")]
    #[serde(default)]
    pub threads: usize,
}

fn default_true() -> bool {
    true
}

impl ScanConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(ref root) = self.root {
            if root.as_os_str().is_empty() {
                return Err("Root path cannot be empty".to_string());
            }
        } else {
            return Err("Root path is required".to_string());
        }
        Ok(())
    }
}

impl ScanConfig {
    /// Create a new scan config builder.
    pub fn builder() -> ScanConfigBuilder {
        ScanConfigBuilder::default()
    }

    /// Create a simple config for walking a path.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            follow_symlinks: false,
            include_hidden: true,
            threads: 0,
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self::new(".")
    }
}

/// Configuration for the diff engine.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into))]
pub struct DiffConfig {
    /// Pair same-named removals and additions into moves.
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub detect_moves: bool,

    /// Drop additions that land under an excluded record directory.
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub filter_excluded: bool,

    /// Sort each bucket by path before returning.
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub sort_output: bool,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            detect_moves: true,
            filter_excluded: true,
            sort_output: true,
        }
    }
}

impl DiffConfig {
    /// Create a new config builder.
    pub fn builder() -> DiffConfigBuilder {
        DiffConfigBuilder::default()
    }
}
