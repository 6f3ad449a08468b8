use crate::export::ExportFormat;
use crate::models::DayType;
use crate::remote::{ApiStyle, BodyEncoding, DeleteMode};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};

/// Command-line interface definition for timetrack
/// Personal time tracking with a local store and an optional cloud mirror
#[derive(Parser)]
#[command(
    name = "timetrack",
    version = env!("CARGO_PKG_VERSION"),
    about = "Personal time tracking: punches, weekly and monthly views, leave, exports and cloud sync",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Never contact the backend; edits stay pending
    #[arg(global = true, long = "offline")]
    pub offline: bool,

    /// Increase diagnostic output on stderr (-v, -vv, -vvv)
    #[arg(global = true, short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PunchDirection {
    In,
    Out,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view, edit, backend settings)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(long = "editor", help = "Editor to use with --edit (overrides $EDITOR)")]
        editor: Option<String>,

        #[arg(long = "set-user", value_name = "USER", help = "User identifier sent to the backend")]
        set_user: Option<String>,

        #[arg(long = "set-backend", value_name = "URL", help = "Base URL of the remote endpoint")]
        set_backend: Option<String>,

        #[arg(long = "api-style", value_enum, help = "URL layout of the backend")]
        api_style: Option<ApiStyle>,

        #[arg(long = "encoding", value_enum, help = "POST body encoding")]
        encoding: Option<BodyEncoding>,

        #[arg(long = "delete-mode", value_enum, help = "How deletes reach the backend")]
        delete_mode: Option<DeleteMode>,

        #[arg(long = "logout", help = "Forget user and backend URL")]
        logout: bool,
    },

    /// Punch in or out (now, or at a given time)
    Punch {
        #[arg(value_enum)]
        direction: PunchDirection,

        #[arg(long = "at", value_name = "HH:MM", help = "Time of the punch (default: now)")]
        at: Option<String>,

        #[arg(
            long = "date",
            value_name = "YYYY-MM-DD",
            help = "Date of the punch (default: today)"
        )]
        date: Option<String>,

        #[arg(long = "note")]
        note: Option<String>,
    },

    /// Save a full day record (overwrites the date)
    Add {
        /// Date (YYYY-MM-DD)
        date: String,

        #[arg(long = "in", help = "Start time (HH:MM)")]
        start: Option<String>,

        #[arg(long = "out", help = "End time (HH:MM)")]
        end: Option<String>,

        #[arg(long = "pause", help = "Pause in minutes (default from config)")]
        pause: Option<u32>,

        #[arg(long = "note")]
        note: Option<String>,

        #[arg(long = "type", value_name = "TYPE", help = "normal, holiday, leave, sick or remote")]
        day_type: Option<DayType>,
    },

    /// Mark a day or a period as holiday, leave, sick, remote or normal
    Mark {
        /// YYYY-MM-DD, or a range like 2025-08-04:2025-08-15
        range: String,

        /// Day type to apply
        day_type: DayType,

        #[arg(long = "include-weekends", help = "Also mark Saturdays and Sundays")]
        include_weekends: bool,
    },

    /// Delete the record of a date
    Del {
        /// Date (YYYY-MM-DD)
        date: String,

        #[arg(short = 'y', long = "yes", help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// List stored days with gaps filled
    List {
        #[arg(
            long,
            short,
            default_value = "month",
            help = "today, week, month, YYYY, YYYY-MM, YYYY-MM-DD or a:b range"
        )]
        period: String,
    },

    /// Weekly table around a date
    Week {
        #[arg(
            long = "date",
            value_name = "YYYY-MM-DD",
            help = "Any day of the week (default: today)"
        )]
        date: Option<String>,
    },

    /// Monthly calendar
    Calendar {
        #[arg(long = "month", value_name = "YYYY-MM", help = "Month to show (default: current)")]
        month: Option<String>,

        #[arg(long = "next", value_name = "N", default_value_t = 0, help = "Move N months forward")]
        next: u32,

        #[arg(long = "prev", value_name = "N", default_value_t = 0, help = "Move N months back")]
        prev: u32,
    },

    /// Holiday, leave and sick days in a period
    Leaves {
        #[arg(long, short, default_value = "month")]
        period: String,
    },

    /// Push pending records, optionally refresh from the cloud or keep syncing
    Sync {
        #[arg(long = "refresh", help = "Also pull the period from the backend")]
        refresh: bool,

        #[arg(long, short, default_value = "month", help = "Period pulled by --refresh")]
        period: String,

        #[arg(long = "watch", help = "Keep pushing pending records until Ctrl-C")]
        watch: bool,

        #[arg(long = "interval", value_name = "SECS", help = "Sweep interval for --watch")]
        interval: Option<u64>,
    },

    /// One-time import of historical records from the backend
    Import {
        #[arg(long, short, help = "Period to import (default: current year)")]
        period: Option<String>,

        #[arg(long = "force", help = "Import again even if already done")]
        force: bool,
    },

    /// Show backend reachability and pending records
    Status,

    /// Export a period
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE", help = "Absolute output path (default: current dir)")]
        file: Option<String>,

        #[arg(long, default_value = "month", help = "YYYY, YYYY-MM, YYYY-MM-DD or a:b range")]
        range: String,

        #[arg(long = "delimiter", help = "CSV delimiter (default from config)")]
        delimiter: Option<char>,

        #[arg(long = "force", help = "Overwrite without asking")]
        force: bool,
    },

    /// Print or manage the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}
