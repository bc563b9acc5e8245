use crate::cli::commands::add::report;
use crate::cli::commands::open_shell;
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::errors::AppResult;

/// Handle the `hydrate` command
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Hydrate { ounces } = &cli.command {
        let mut shell = open_shell(cfg, cli.test)?;
        let outcome = shell.hydrate(*ounces);
        shell.close()?;

        report(&outcome?)?;
    }

    Ok(())
}
