//! Rendering of the internal audit log.

use crate::db::log::LogRow;
use crate::utils::colors::strip_ansi;
use ansi_term::Colour;

const OP_WIDTH_MAX: usize = 48;

fn color_for_operation(op: &str) -> Colour {
    match op {
        "save" => Colour::Green,
        "delete" => Colour::Red,
        "mark" => Colour::Yellow,
        "sync" | "refresh" => Colour::Cyan,
        "import" => Colour::Blue,
        "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

/// One line per row: `id: date | op (target) => message`, operation tinted.
pub fn render_log(rows: &[LogRow]) -> String {
    if rows.is_empty() {
        return "No entries in the internal log.\n".to_string();
    }

    let id_w = rows.iter().map(|r| r.id.to_string().len()).max().unwrap_or(1);
    let date_w = rows.iter().map(|r| r.date.len()).max().unwrap_or(10);
    let op_w = rows
        .iter()
        .map(|r| op_target(r).chars().count())
        .max()
        .unwrap_or(10)
        .min(OP_WIDTH_MAX);

    let mut out = String::new();
    for r in rows {
        let plain = truncate(&op_target(r), op_w);
        let colored = match plain.split_once(' ') {
            Some((op, rest)) => format!("{} {}", color_for_operation(&r.operation).paint(op), rest),
            None => color_for_operation(&r.operation).paint(plain.as_str()).to_string(),
        };
        let padding = " ".repeat(op_w.saturating_sub(strip_ansi(&colored).chars().count()));

        out.push_str(&format!(
            "{:>id_w$}: {:<date_w$} | {}{} => {}\n",
            r.id,
            r.date,
            colored,
            padding,
            r.message,
            id_w = id_w,
            date_w = date_w
        ));
    }
    out
}

fn op_target(r: &LogRow) -> String {
    if r.target.is_empty() {
        r.operation.clone()
    } else {
        format!("{} ({})", r.operation, r.target)
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut t: String = s.chars().take(max.saturating_sub(3)).collect();
    t.push_str("...");
    t
}
