//! Batch operations for rewriting many GLB files
//!
//! Files are processed in parallel. One failing file is reported and counted,
//! the rest of the batch keeps going.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;
use walkdir::WalkDir;

use crate::options::InlineOptions;
use crate::pipeline::inline_glb_file;

/// Progress information during batch operations
#[derive(Debug, Clone)]
pub struct BatchProgress {
    /// Current item number (1-indexed)
    pub current: usize,
    /// Total number of items
    pub total: usize,
    /// File being processed, relative to the source directory
    pub current_file: String,
}

impl BatchProgress {
    /// Get the progress percentage (0.0 - 1.0)
    #[must_use]
    pub fn percentage(&self) -> f32 {
        if self.total == 0 {
            1.0
        } else {
            self.current as f32 / self.total as f32
        }
    }
}

/// Result of a batch rewrite
#[derive(Debug, Clone, Default)]
pub struct BatchInlineResult {
    /// Number of files rewritten
    pub success_count: usize,
    /// Number of files that failed
    pub fail_count: usize,
    /// One message per file processed
    pub results: Vec<String>,
}

/// Find all .glb files in a directory recursively
///
/// # Returns
/// A sorted list of paths to .glb files found in the directory tree.
pub fn find_glb_files<P: AsRef<Path>>(dir: P) -> Vec<PathBuf> {
    let mut glb_files: Vec<_> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|e| {
            e.path().is_file()
                && e.path()
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("glb"))
        })
        .map(|e| e.path().to_path_buf())
        .collect();

    glb_files.sort();
    glb_files
}

/// Rewrite GLB files in parallel
///
/// Output files keep their path relative to `source_base`, re-rooted under
/// `dest_base`. Files outside `source_base` are counted as failures and never
/// written.
///
/// # Arguments
/// * `glb_files` - Files to rewrite
/// * `source_base` - Base directory of the source (for calculating relative paths)
/// * `dest_base` - Destination directory
/// * `options` - Rewrite options applied to every file
/// * `progress` - Callback for progress updates
pub fn batch_inline<F>(
    glb_files: &[PathBuf],
    source_base: &Path,
    dest_base: &Path,
    options: &InlineOptions,
    progress: F,
) -> BatchInlineResult
where
    F: Fn(&BatchProgress) + Send + Sync,
{
    let success_counter = AtomicUsize::new(0);
    let fail_counter = AtomicUsize::new(0);
    let processed = AtomicUsize::new(0);
    let total = glb_files.len();

    let results: Vec<String> = glb_files
        .par_iter()
        .map(|glb_path| {
            let current = processed.fetch_add(1, Ordering::SeqCst) + 1;

            // Joining a path outside source_base would write back onto the source
            let Ok(relative_path) = glb_path.strip_prefix(source_base) else {
                let display_path = glb_path.to_string_lossy().to_string();
                progress(&BatchProgress {
                    current,
                    total,
                    current_file: display_path.clone(),
                });
                fail_counter.fetch_add(1, Ordering::SeqCst);
                tracing::warn!("Skipping {}: not under {:?}", display_path, source_base);
                return format!("Failed {display_path}: not under the source directory");
            };
            let display_path = relative_path.to_string_lossy().to_string();

            progress(&BatchProgress {
                current,
                total,
                current_file: display_path.clone(),
            });

            let dest = dest_base.join(relative_path);
            match inline_glb_file(glb_path, &dest, options) {
                Ok(report) => {
                    success_counter.fetch_add(1, Ordering::SeqCst);
                    format!(
                        "Inlined {} image(s): {display_path}",
                        report.relocated.len()
                    )
                }
                Err(e) => {
                    fail_counter.fetch_add(1, Ordering::SeqCst);
                    tracing::warn!("Failed to rewrite {}: {}", display_path, e);
                    format!("Failed {display_path}: {e}")
                }
            }
        })
        .collect();

    BatchInlineResult {
        success_count: success_counter.load(Ordering::SeqCst),
        fail_count: fail_counter.load(Ordering::SeqCst),
        results,
    }
}
