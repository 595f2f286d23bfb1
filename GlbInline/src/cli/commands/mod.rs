use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::options::InlineOptions;

pub mod batch;
pub mod execute;
pub mod info;
pub mod inline;

/// Options shared by every rewriting command
#[derive(Args, Debug, Clone)]
pub struct RewriteArgs {
    /// TOML file with rewrite options (flags below override it)
    #[arg(long)]
    config: Option<PathBuf>,

    /// MIME type for images without a mimeType (default: image/png)
    #[arg(long)]
    mime_type: Option<String>,

    /// Skip validation of the BIN chunk header
    #[arg(long)]
    lenient: bool,

    /// Overwrite existing output files
    #[arg(short, long)]
    force: bool,
}

impl RewriteArgs {
    /// Resolve the effective options: defaults, then config file, then flags.
    ///
    /// # Errors
    /// Returns an error if the config file cannot be loaded.
    pub fn to_options(&self) -> anyhow::Result<InlineOptions> {
        let mut options = match &self.config {
            Some(path) => InlineOptions::load(path)?,
            None => InlineOptions::default(),
        };
        if let Some(mime_type) = &self.mime_type {
            options = options.with_default_mime_type(mime_type.clone());
        }
        if self.lenient {
            options = options.lenient_binary_chunk();
        }
        if self.force {
            options = options.overwrite_existing();
        }
        Ok(options)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rewrite a GLB file so its images are embedded as data URIs
    Inline {
        /// Source GLB file
        source: PathBuf,

        /// Output GLB file
        destination: PathBuf,

        #[command(flatten)]
        rewrite: RewriteArgs,

        /// Suppress step output
        #[arg(short, long)]
        quiet: bool,
    },

    /// Show header, chunk and image information for a GLB file
    Info {
        /// Source GLB file
        source: PathBuf,
    },

    /// Rewrite every GLB file under a directory
    Batch {
        /// Source directory (searched recursively)
        source: PathBuf,

        /// Output directory (mirrors the source layout)
        destination: PathBuf,

        #[command(flatten)]
        rewrite: RewriteArgs,

        /// Suppress progress bar
        #[arg(short, long)]
        quiet: bool,
    },
}
