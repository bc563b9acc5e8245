use crate::cli::parser::Commands;
use crate::core::duration::compute_sleep_duration;
use crate::errors::AppResult;
use crate::utils::time::parse_required_time;

/// Handle the `total-hours` command
pub fn handle(cmd: &Commands) -> AppResult<()> {
    if let Commands::TotalHours { asleep, awake } = cmd {
        let sleep_time = parse_required_time(asleep)?;
        let wake_time = parse_required_time(awake)?;
        println!("{}", compute_sleep_duration(wake_time, sleep_time));
    }

    Ok(())
}
