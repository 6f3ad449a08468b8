//! ANSI color helpers for terminal output.
use crate::core::calendar::CellTone;
use regex::Regex;
use std::sync::OnceLock;

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";
pub const MAGENTA: &str = "\x1b[35m";

/// Color of a calendar/week cell.
pub fn tone_color(tone: CellTone) -> &'static str {
    match tone {
        CellTone::Complete => GREEN,
        CellTone::Partial => YELLOW,
        CellTone::Absent => GREY,
        CellTone::Holiday => MAGENTA,
        CellTone::Leave => CYAN,
        CellTone::Sick => RED,
    }
}

/// Grey for empty values (`""`, `00h00`), unchanged otherwise.
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() || value.trim() == "00h00" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}

/// Online/offline indicator.
pub fn colorize_online(online: bool) -> String {
    if online {
        format!("{GREEN}online{RESET}")
    } else {
        format!("{RED}offline{RESET}")
    }
}

pub fn strip_ansi(s: &str) -> String {
    static ANSI: OnceLock<Regex> = OnceLock::new();
    let re = ANSI.get_or_init(|| Regex::new(r"\x1B\[[0-9;]*[mK]").expect("ANSI pattern is valid"));
    re.replace_all(s, "").into_owned()
}
