pub mod add;
pub mod config;
pub mod db;
pub mod del;
pub mod form;
pub mod hydrate;
pub mod init;
pub mod log;
pub mod total_hours;
pub mod view;

use crate::config::Config;
use crate::config::settings::Settings;
use crate::core::report::ConsoleSink;
use crate::core::shell::Shell;
use crate::db::pool::DbPool;
use crate::errors::AppResult;

/// Open the configured database and start the shell over it.
pub(crate) fn open_shell(cfg: &Config, test_mode: bool) -> AppResult<Shell> {
    let pool = DbPool::new(&cfg.database)?;
    let settings = Settings::load(
        &cfg.settings_file(test_mode),
        &cfg.organization,
        &cfg.application,
    )?;
    Shell::start(pool, settings, Box::new(ConsoleSink::default()))
}
