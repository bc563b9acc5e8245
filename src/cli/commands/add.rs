use crate::cli::commands::open_shell;
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::commit::CommitReport;
use crate::core::shell::Overrides;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use crate::utils::date::parse_required_date;
use crate::utils::time::parse_required_time;

/// Handle the `add` command
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Add {
        trigger,
        set,
        check,
        date,
        time,
    } = &cli.command
    {
        let overrides = Overrides {
            assignments: set
                .iter()
                .map(|s| Overrides::parse_assignment(s))
                .collect::<AppResult<Vec<_>>>()?,
            checks: check.clone(),
            date: date.as_deref().map(parse_required_date).transpose()?,
            time: time.as_deref().map(parse_required_time).transpose()?,
        };

        let mut shell = open_shell(cfg, cli.test)?;
        let outcome = shell.commit(trigger, &overrides);
        // settings are saved even when the commit failed
        shell.close()?;

        report(&outcome?)?;
    }

    Ok(())
}

/// Print what was stored; any failed record type makes the command fail.
pub(crate) fn report(r: &CommitReport) -> AppResult<()> {
    for (name, id) in &r.committed {
        success(format!("Committed {} (id={})", name, id));
    }
    if r.stale > 0 {
        warning(format!(
            "{} stored row(s) are not shown yet; do not add them again",
            r.stale
        ));
    }

    if r.is_success() {
        Ok(())
    } else {
        Err(AppError::Other(format!(
            "{} record type(s) could not be committed",
            r.failed
        )))
    }
}
