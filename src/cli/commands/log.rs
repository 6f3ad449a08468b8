use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::log::render_log;
use crate::db::log::load_log;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if matches!(cmd, Commands::Log { print: true }) {
        let pool = crate::open_db(cfg)?;
        let rows = load_log(&pool.conn)?;
        println!("📜 Internal log:\n");
        print!("{}", render_log(&rows));
    }

    Ok(())
}
