//! CLI command for rewriting directories of GLB files

use std::path::Path;
use std::time::Instant;

use crate::batch::{batch_inline, find_glb_files};
use crate::cli::progress::{print_done, simple_bar};
use crate::options::InlineOptions;

/// Rewrite every GLB file under `source` into `dest`
pub fn execute(
    source: &Path,
    dest: &Path,
    options: &InlineOptions,
    quiet: bool,
) -> anyhow::Result<()> {
    let started = Instant::now();
    let files = find_glb_files(source);

    if files.is_empty() {
        println!("No GLB files found in: {}", source.display());
        return Ok(());
    }

    if !quiet {
        println!("Found {} GLB files to rewrite", files.len());
    }

    let pb = if quiet {
        None
    } else {
        Some(simple_bar(files.len() as u64, "Inlining"))
    };

    let result = batch_inline(&files, source, dest, options, |progress| {
        if let Some(pb) = &pb {
            pb.set_position(progress.current as u64);
            pb.set_message(progress.current_file.clone());
        }
    });

    if let Some(pb) = &pb {
        pb.finish_and_clear();
    }

    if !quiet {
        for line in &result.results {
            println!("  {line}");
        }
        println!();
        println!(
            "Rewrote {} files, {} failed",
            result.success_count, result.fail_count
        );
        print_done(started.elapsed());
    }

    if result.fail_count > 0 {
        anyhow::bail!("{} of {} files failed", result.fail_count, files.len());
    }
    Ok(())
}
