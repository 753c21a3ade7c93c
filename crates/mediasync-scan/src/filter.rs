//! File acceptance filters for the filesystem builder.

use std::collections::HashSet;
use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};

use mediasync_core::{BuildError, FileFilter};

/// Extensions recognised as media by default.
pub const MEDIA_EXTENSIONS: &[&str] = &[
    // images
    "jpg", "jpeg", "png", "gif", "webp", "bmp", "tif", "tiff", "heic", "avif",
    // video
    "mp4", "m4v", "mkv", "webm", "mov", "avi", "wmv", "mpg", "mpeg", "flv",
    // audio
    "mp3", "flac", "ogg", "opus", "m4a", "wav", "aac",
];

/// Accepts every file.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl FileFilter for AcceptAll {
    fn accept(&self, _path: &Path) -> bool {
        true
    }
}

/// Accepts files whose extension is in an allow-list (case-insensitive).
#[derive(Debug, Clone)]
pub struct ExtensionFilter {
    extensions: HashSet<String>,
}

impl ExtensionFilter {
    /// Create a filter from extensions, with or without the leading dot.
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            extensions: extensions
                .into_iter()
                .map(|e| e.as_ref().trim_start_matches('.').to_ascii_lowercase())
                .filter(|e| !e.is_empty())
                .collect(),
        }
    }

    /// Filter accepting the default media extensions.
    pub fn media() -> Self {
        Self::new(MEDIA_EXTENSIONS)
    }

    /// Number of accepted extensions.
    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    /// Check if no extension is accepted.
    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }
}

impl FileFilter for ExtensionFilter {
    fn accept(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| self.extensions.contains(&e.to_ascii_lowercase()))
    }
}

/// Accepts files whose absolute path matches any of a set of globs.
#[derive(Debug, Clone)]
pub struct GlobFilter {
    globs: GlobSet,
}

impl GlobFilter {
    /// Compile a filter from glob patterns.
    pub fn new<I, S>(patterns: I) -> Result<Self, BuildError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern.as_ref()).map_err(|e| BuildError::InvalidConfig {
                message: e.to_string(),
            })?;
            builder.add(glob);
        }
        let globs = builder.build().map_err(|e| BuildError::InvalidConfig {
            message: e.to_string(),
        })?;
        Ok(Self { globs })
    }
}

impl FileFilter for GlobFilter {
    fn accept(&self, path: &Path) -> bool {
        self.globs.is_match(path)
    }
}
