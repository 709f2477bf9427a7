mod centroid;
mod recommend;

use crate::cli::{Cli, Commands};
use anyhow::Result;

/// Dispatch the parsed command.
pub async fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Centroid(ref args) => centroid::run(args, cli.json),
        Commands::Recommend(args) => recommend::run(args, cli.config, cli.json).await,
    }
}
