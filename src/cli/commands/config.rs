use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{error, info, success, warning};
use std::process::Command;

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Config {
        print_config,
        edit_config,
        editor,
        set_user,
        set_backend,
        api_style,
        encoding,
        delete_mode,
        logout,
    } = cmd
    else {
        return Ok(());
    };

    // ---- UPDATE FIELDS ----
    let mut updated = cfg.clone();
    let mut changed = false;

    if *logout {
        updated.logout();
        changed = true;
    }
    if let Some(user) = set_user {
        updated.user = Some(user.trim().to_string()).filter(|u| !u.is_empty());
        changed = true;
    }
    if let Some(url) = set_backend {
        let url = url.trim();
        if !url.is_empty() && !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(AppError::Config(format!(
                "backend URL must start with http:// or https:// (got '{}')",
                url
            )));
        }
        updated.backend_url = Some(url.to_string()).filter(|u| !u.is_empty());
        changed = true;
    }
    if let Some(style) = api_style {
        updated.api_style = *style;
        changed = true;
    }
    if let Some(enc) = encoding {
        updated.body_encoding = *enc;
        changed = true;
    }
    if let Some(mode) = delete_mode {
        updated.delete_mode = *mode;
        changed = true;
    }

    if changed {
        updated.save()?;
        if *logout {
            success("Logged out: user and backend cleared.");
        } else {
            success(format!("Configuration saved to {}", Config::config_file().display()));
        }
    }

    // ---- PRINT CONFIG ----
    if *print_config {
        let yaml = serde_yaml::to_string(&updated).map_err(|e| AppError::Config(e.to_string()))?;
        println!("📄 Current configuration:\n");
        println!("{}", yaml);
    }

    // ---- EDIT CONFIG ----
    if *edit_config {
        let path = Config::config_file();
        if !path.exists() {
            updated.save()?;
        }

        let default_editor = std::env::var("EDITOR")
            .or_else(|_| std::env::var("VISUAL"))
            .unwrap_or_else(|_| {
                if cfg!(target_os = "windows") {
                    "notepad".to_string()
                } else {
                    "nano".to_string()
                }
            });
        let editor_to_use = editor.clone().unwrap_or_else(|| default_editor.clone());

        match Command::new(&editor_to_use).arg(&path).status() {
            Ok(s) if s.success() => {
                success(format!("Configuration file edited using '{}'", editor_to_use));
            }
            _ => {
                warning(format!(
                    "Editor '{}' not available, falling back to '{}'",
                    editor_to_use, default_editor
                ));
                match Command::new(&default_editor).arg(&path).status() {
                    Ok(s) if s.success() => {
                        success(format!("Configuration file edited using '{}'", default_editor));
                    }
                    _ => error(format!(
                        "Failed to edit configuration file using '{}'",
                        default_editor
                    )),
                }
            }
        }
    }

    if !changed && !*print_config && !*edit_config {
        info("Nothing to do. Try `timetrack config --print`.");
    }

    Ok(())
}
