//! Directory scanning.
//!
//! Every regular entry directly inside the target directory becomes one
//! task on a bounded rayon pool. A task reads its file, matches it, and
//! yields `(path, matches)`; the coordinating `collect` is the only place
//! results are merged. Files that cannot be read are left out of the
//! result, only a directory that cannot be listed fails the scan.

use crate::index::set::IndexSetError;
use crate::query::matcher::{match_windows, ScoredWindow};
use crate::query::scorer::NeedleScorer;
use crate::utils::app_data::AppConfig;
use crate::utils::bigram::CanonicalText;
use crate::utils::content::{is_binary, read_text_lossy};
use crate::utils::progress::file_progress_bar;
use rayon::prelude::*;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Matching window texts per file
pub type ScanResult = HashMap<PathBuf, Vec<String>, ahash::RandomState>;

/// Matching windows with positions and scores per file
pub type ScoredScanResult = HashMap<PathBuf, Vec<ScoredWindow>, ahash::RandomState>;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("cannot list directory {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A bigram fell outside its set's capacity while matching a file
    #[error("internal matching error: {0}")]
    Domain(#[from] IndexSetError),

    #[error("failed to start scan workers: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

/// How a scan runs
#[derive(Debug, Clone, PartialEq)]
pub struct ScanOptions {
    /// Minimum similarity for a window to match
    pub threshold: f32,
    /// Worker threads; 0 lets rayon pick one per CPU
    pub jobs: usize,
    /// Skip files larger than this many bytes
    pub max_file_size: Option<u64>,
    /// Skip files whose content looks binary
    pub skip_binary: bool,
    /// Draw a progress bar on stderr
    pub progress: bool,
}

impl ScanOptions {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            jobs: 0,
            max_file_size: None,
            skip_binary: false,
            progress: false,
        }
    }

    pub fn from_config(config: &AppConfig, threshold: f32) -> Self {
        Self {
            threshold,
            jobs: config.effective_jobs(),
            max_file_size: config.max_file_size_limit(),
            skip_binary: config.skip_binary,
            progress: false,
        }
    }
}

/// Scans the files of one directory for approximate matches
#[derive(Debug, Clone)]
pub struct DirectoryScanner {
    options: ScanOptions,
}

impl DirectoryScanner {
    pub fn new(options: ScanOptions) -> Self {
        Self { options }
    }

    /// Matching window texts for every readable file directly in `dir`.
    ///
    /// Files without matches map to an empty list; unreadable files are absent.
    pub fn scan(&self, needle: &str, dir: &Path) -> Result<ScanResult, ScanError> {
        Ok(self
            .scan_scored(needle, dir)?
            .into_iter()
            .map(|(path, windows)| (path, windows.into_iter().map(|w| w.text).collect()))
            .collect())
    }

    /// Like [`scan`](Self::scan), keeping each window's position and score
    pub fn scan_scored(&self, needle: &str, dir: &Path) -> Result<ScoredScanResult, ScanError> {
        let files = list_files(dir)?;
        let scorer = NeedleScorer::new(CanonicalText::new(needle))?;
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.options.jobs)
            .build()?;

        debug!(
            dir = %dir.display(),
            files = files.len(),
            threads = pool.current_num_threads(),
            "dispatching file scans"
        );

        let progress = self.options.progress.then(|| {
            let pb = file_progress_bar(files.len() as u64);
            pb.set_message(dir.display().to_string());
            pb
        });

        let results: Result<ScoredScanResult, IndexSetError> = pool.install(|| {
            files
                .par_iter()
                .filter_map(|path| {
                    let outcome = self
                        .scan_file(&scorer, path)
                        .map(|matches| matches.map(|m| (path.clone(), m)))
                        .transpose();
                    if let Some(ref pb) = progress {
                        pb.inc(1);
                    }
                    outcome
                })
                .collect()
        });

        if let Some(pb) = progress {
            pb.finish_and_clear();
        }

        let results = results?;
        info!(
            dir = %dir.display(),
            dispatched = files.len(),
            read = results.len(),
            matched = results.values().filter(|m| !m.is_empty()).count(),
            "scan complete"
        );
        Ok(results)
    }

    /// Match one file. `Ok(None)` means the file was dropped.
    fn scan_file(
        &self,
        scorer: &NeedleScorer,
        path: &Path,
    ) -> Result<Option<Vec<ScoredWindow>>, IndexSetError> {
        let Some(content) = self.read_eligible(path) else {
            return Ok(None);
        };
        let haystack = CanonicalText::new(&content);
        match_windows(scorer, &haystack, self.options.threshold).map(Some)
    }

    fn read_eligible(&self, path: &Path) -> Option<String> {
        if let Some(limit) = self.options.max_file_size {
            match fs::metadata(path) {
                Ok(meta) if meta.len() > limit => {
                    debug!(path = %path.display(), size = meta.len(), limit, "skipping large file");
                    return None;
                }
                Ok(_) => {}
                Err(e) => {
                    debug!(path = %path.display(), error = %e, "skipping unreadable file");
                    return None;
                }
            }
        }

        let content = match read_text_lossy(path) {
            Ok(content) => content,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "skipping unreadable file");
                return None;
            }
        };

        if self.options.skip_binary && is_binary(content.as_bytes()) {
            debug!(path = %path.display(), "skipping binary file");
            return None;
        }

        Some(content)
    }
}

/// Scan `dir` with default options
pub fn scan_directory(needle: &str, dir: &Path, threshold: f32) -> Result<ScanResult, ScanError> {
    DirectoryScanner::new(ScanOptions::new(threshold)).scan(needle, dir)
}

/// Non-directory entries directly inside `dir`, sorted by path
fn list_files(dir: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let io_error = |source| ScanError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let metadata = fs::metadata(dir).map_err(io_error)?;
    if !metadata.is_dir() {
        return Err(ScanError::NotADirectory(dir.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_error)? {
        let entry = entry.map_err(io_error)?;
        // Symlinks are not followed here; one pointing at a directory
        // fails to read later and is dropped like any unreadable file.
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        if is_dir {
            debug!(path = %entry.path().display(), "skipping subdirectory");
            continue;
        }
        files.push(entry.path());
    }

    files.sort();
    Ok(files)
}
