//! timetrack library root.
//! Exposes the CLI parser, the high-level `run()` function and the modules
//! behind it: local store, remote endpoint, reconciliation, views, export.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod logging;
pub mod models;
pub mod remote;
pub mod store;
pub mod sync;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use db::initialize::init_db;
use db::kv::SqliteKv;
use db::pool::DbPool;
use errors::AppResult;
use remote::{HttpRemote, RemoteEndpoint};
use std::sync::Arc;
use store::LocalStore;
use sync::Tracker;

/// Open (and migrate) the configured database.
pub fn open_db(cfg: &Config) -> AppResult<DbPool> {
    let path = cfg.database_path();
    let pool = DbPool::new(&path.to_string_lossy())?;
    init_db(&pool.conn)?;
    Ok(pool)
}

/// Tracker over the SQLite store, with the HTTP remote unless `offline`
/// or no backend is configured.
pub fn build_tracker(cfg: &Config, offline: bool) -> AppResult<Tracker> {
    let store = LocalStore::new(SqliteKv::new(open_db(cfg)?));

    let remote: Option<Arc<dyn RemoteEndpoint>> = match cfg.remote_config() {
        Some(rc) if !offline => Some(Arc::new(HttpRemote::new(rc)?)),
        _ => None,
    };

    Ok(Tracker::new(store, remote).with_default_pause(cfg.default_pause))
}

/// Central command dispatcher
pub async fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    use cli::commands;

    match &cli.command {
        Commands::Init => commands::init::handle(cli),
        Commands::Config { .. } => commands::config::handle(&cli.command, cfg),
        Commands::Log { .. } => commands::log::handle(&cli.command, cfg),
        Commands::Export { .. } => commands::export::handle(&cli.command, cfg),
        Commands::List { .. }
        | Commands::Week { .. }
        | Commands::Calendar { .. }
        | Commands::Leaves { .. } => commands::view::handle(&cli.command, cfg),
        Commands::Punch { .. } | Commands::Add { .. } | Commands::Mark { .. } => {
            let mut tracker = build_tracker(cfg, cli.offline)?;
            commands::add::handle(&cli.command, cfg, &mut tracker).await
        }
        Commands::Del { .. } => {
            let mut tracker = build_tracker(cfg, cli.offline)?;
            commands::del::handle(&cli.command, &mut tracker).await
        }
        Commands::Sync { .. } | Commands::Import { .. } | Commands::Status => {
            let mut tracker = build_tracker(cfg, cli.offline)?;
            commands::sync::handle(&cli.command, cfg, &mut tracker).await
        }
    }
}

/// Entry point used by main.rs
pub async fn run() -> AppResult<()> {
    // 1️⃣ parse CLI
    let cli = Cli::parse();
    logging::init(cli.verbose);

    // 2️⃣ load config once
    let mut cfg = Config::load()?;

    // 3️⃣ command-line DB override
    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    dispatch(&cli, &cfg).await
}
