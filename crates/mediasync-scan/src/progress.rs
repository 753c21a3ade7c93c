//! Build progress reporting.

use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Progress information while walking the library root.
#[derive(Debug, Clone)]
pub struct BuildProgress {
    /// Number of directories seen so far.
    pub dirs_seen: u64,
    /// Number of non-directory entries seen so far.
    pub files_seen: u64,
    /// Number of files accepted by the filter.
    pub files_accepted: u64,
    /// Path of the most recent entry.
    pub current_path: PathBuf,
    /// Time elapsed since the walk started.
    pub elapsed: Duration,
}

impl BuildProgress {
    /// Create initial progress state.
    pub fn new() -> Self {
        Self {
            dirs_seen: 0,
            files_seen: 0,
            files_accepted: 0,
            current_path: PathBuf::new(),
            elapsed: Duration::ZERO,
        }
    }

    /// Calculate walk rate in entries per second.
    pub fn entries_per_second(&self) -> f64 {
        if self.elapsed.as_secs_f64() > 0.0 {
            self.total_entries() as f64 / self.elapsed.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Get total entries seen (files + dirs).
    pub fn total_entries(&self) -> u64 {
        self.files_seen + self.dirs_seen
    }

    /// Number of files rejected by the filter.
    pub fn files_rejected(&self) -> u64 {
        self.files_seen - self.files_accepted
    }
}

impl Default for BuildProgress {
    fn default() -> Self {
        Self::new()
    }
}

/// Internal progress tracker with timing.
#[derive(Debug)]
pub(crate) struct ProgressTracker {
    start_time: Instant,
    dirs_seen: u64,
    files_seen: u64,
    files_accepted: u64,
    current_path: PathBuf,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            dirs_seen: 0,
            files_seen: 0,
            files_accepted: 0,
            current_path: PathBuf::new(),
        }
    }

    pub fn record_dir(&mut self) {
        self.dirs_seen += 1;
    }

    pub fn record_file(&mut self, accepted: bool) {
        self.files_seen += 1;
        if accepted {
            self.files_accepted += 1;
        }
    }

    pub fn set_current_path(&mut self, path: PathBuf) {
        self.current_path = path;
    }

    pub fn entries(&self) -> u64 {
        self.dirs_seen + self.files_seen
    }

    pub fn snapshot(&self) -> BuildProgress {
        BuildProgress {
            dirs_seen: self.dirs_seen,
            files_seen: self.files_seen,
            files_accepted: self.files_accepted,
            current_path: self.current_path.clone(),
            elapsed: self.start_time.elapsed(),
        }
    }
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self::new()
    }
}
