use clap::Parser;

mod cli;
mod commands;
mod domain;
mod errors;
mod services;

pub use cli::*;
pub use commands::*;
pub use domain::constants::*;
pub use domain::models::*;
pub use errors::ReleaseError;
pub use services::esrp::*;
pub use services::keyring::*;
pub use services::output::*;
pub use services::redact::*;
pub use services::release_assets::*;
pub use services::repo_config::*;
pub use services::settings::*;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.verbosity.tracing_level_filter())
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if handle_signing_commands(&cli)? {
        return Ok(());
    }
    if !handle_pipeline_commands(&cli)? {
        anyhow::bail!("unhandled command: {:?}", cli.command);
    }
    Ok(())
}
