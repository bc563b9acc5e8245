use clap::{Parser, Subcommand};

/// Command-line interface definition for rWellog
/// Personal wellness logger backed by SQLite
#[derive(Parser)]
#[command(
    name = "rwellog",
    version = env!("CARGO_PKG_VERSION"),
    about = "A personal wellness logger: sleep, diet, basics, pet care and mood self-reports in SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update, settings next to the DB)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,

        #[arg(long = "last", help = "Only the last N rows")]
        last: Option<usize>,
    },

    /// Commit a form section (sleep, diet, shower, cspr, ...)
    Add {
        /// Trigger name (see `rwellog form --list`)
        trigger: String,

        /// Set a form input before committing
        #[arg(long = "set", value_name = "INPUT=VALUE")]
        set: Vec<String>,

        /// Tick a checkbox input (same as --set INPUT=yes)
        #[arg(long = "check", value_name = "INPUT")]
        check: Vec<String>,

        /// Date for every committed record (YYYY-MM-DD, default today)
        #[arg(long = "date")]
        date: Option<String>,

        /// Time for every committed record (HH:MM[:SS], default now)
        #[arg(long = "time")]
        time: Option<String>,
    },

    /// Log a cup of water, stamped now
    Hydrate {
        /// Cup size in ounces: 8, 16, 24 or 32
        ounces: i64,
    },

    /// Delete rows, selected by record type and id
    Del {
        #[arg(
            long = "row",
            value_name = "TYPE:ID",
            required = true,
            help = "Row to delete, e.g. sleep:3 (repeatable)"
        )]
        rows: Vec<String>,

        #[arg(long = "yes", short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// Show the bound views of a page (sleep, diet, basics, pet, mental) or a record type
    View {
        /// Page or record type; defaults to the last page shown
        page: Option<String>,

        #[arg(long = "limit", help = "Show at most N rows per view")]
        limit: Option<usize>,
    },

    /// Show the current form inputs and their values
    Form {
        /// Only the inputs committed by this trigger
        trigger: Option<String>,

        #[arg(long = "list", help = "List the available triggers and pages")]
        list: bool,
    },

    /// Compute hours slept between two times of day
    TotalHours {
        #[arg(long = "asleep", help = "Time fallen asleep (HH:MM)")]
        asleep: String,

        #[arg(long = "awake", help = "Time woken up (HH:MM)")]
        awake: String,
    },
}
