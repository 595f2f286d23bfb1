//! Command execution implementations

use super::Commands;
use super::{batch, info, inline};

impl Commands {
    /// Execute the selected command.
    ///
    /// # Errors
    /// Returns an error if the underlying command fails.
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            Commands::Inline {
                source,
                destination,
                rewrite,
                quiet,
            } => inline::execute(source, destination, &rewrite.to_options()?, *quiet),
            Commands::Info { source } => info::execute(source),
            Commands::Batch {
                source,
                destination,
                rewrite,
                quiet,
            } => batch::execute(source, destination, &rewrite.to_options()?, *quiet),
        }
    }
}
