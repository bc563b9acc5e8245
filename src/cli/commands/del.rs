use crate::cli::commands::open_shell;
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::record::RecordId;
use crate::ui::messages::{info, success, warning};

use std::io::{self, Write};

/// Ask a yes/no confirmation from the user
fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

/// `sleep:3` → ("sleep", 3)
fn parse_row(raw: &str) -> AppResult<(String, RecordId)> {
    let bad = || AppError::invalid_input(raw, "expected <record type>:<id>");
    let (name, id) = raw.split_once(':').ok_or_else(bad)?;
    let id = id.trim().parse::<RecordId>().map_err(|_| bad())?;
    if name.trim().is_empty() {
        return Err(bad());
    }
    Ok((name.trim().to_string(), id))
}

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { rows, yes } = &cli.command {
        let selection = rows
            .iter()
            .map(|r| parse_row(r))
            .collect::<AppResult<Vec<_>>>()?;

        let prompt = format!(
            "Delete {} row(s): {}? This action is irreversible.",
            selection.len(),
            rows.join(", ")
        );
        if !*yes && !ask_confirmation(&prompt) {
            info("Operation cancelled.");
            return Ok(());
        }

        let mut shell = open_shell(cfg, cli.test)?;
        let outcome = shell.delete(&selection);
        shell.close()?;

        let report = outcome?;
        if report.deleted > 0 {
            success(format!("{} row(s) deleted.", report.deleted));
        }
        if report.failed > 0 {
            return Err(AppError::Other(format!(
                "delete failed on {} view(s)",
                report.failed
            )));
        }
    }

    Ok(())
}
