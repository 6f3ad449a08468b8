use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::log;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};

/// Handle the `init` command
///
/// Creates the config directory, the configuration file (unless in test
/// mode) and the SQLite database, then runs pending migrations.
pub fn handle(cli: &Cli) -> AppResult<()> {
    let (_cfg, db_path) = Config::init_all(cli.db.as_deref(), cli.test)?;
    let db_str = db_path.to_string_lossy().to_string();

    println!("⚙️  Initializing timetrack…");
    println!("📄 Config file : {}", Config::config_file().display());
    println!("🗄️  Database   : {}", db_str);

    let pool = DbPool::new(&db_str)?;
    init_db(&pool.conn)?;

    let message = format!("Database initialized at {}", db_str);
    if let Err(e) = log::ttlog(&pool.conn, "init", "", &message) {
        warning(format!("Failed to write internal log: {}", e));
    }

    success("timetrack initialization completed!");
    Ok(())
}
