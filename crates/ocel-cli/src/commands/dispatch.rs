use ocel_config::OcelConfig;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    config: &OcelConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Download(args) => commands::download::handle(&args, config, flags).await,
        Commands::Write(args) => commands::write::handle(&args, config, flags),
        Commands::Import(args) => commands::import::handle(&args, config, flags).await,
        Commands::Tables => commands::tables::handle(flags),
    }
}
