//! User-facing status lines. Diagnostics go through `tracing` instead.

use std::fmt;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

const FG_BLUE: &str = "\x1b[34m";
const FG_CYAN: &str = "\x1b[36m";
const FG_GREEN: &str = "\x1b[32m";
const FG_YELLOW: &str = "\x1b[33m";
const FG_RED: &str = "\x1b[31m";

enum Stream {
    Out,
    Err,
}

fn emit<T: fmt::Display>(stream: Stream, color: &str, icon: &str, msg: T) {
    let line = format!("{}{}{} {}{}", color, BOLD, icon, RESET, msg);
    match stream {
        Stream::Out => println!("{line}"),
        Stream::Err => eprintln!("{line}"),
    }
}

pub fn info<T: fmt::Display>(msg: T) {
    emit(Stream::Out, FG_BLUE, "ℹ️", msg);
}

pub fn success<T: fmt::Display>(msg: T) {
    emit(Stream::Out, FG_GREEN, "✅", msg);
}

pub fn warning<T: fmt::Display>(msg: T) {
    emit(Stream::Out, FG_YELLOW, "⚠️", msg);
}

pub fn error<T: fmt::Display>(msg: T) {
    emit(Stream::Err, FG_RED, "❌", msg);
}

/// Result of a round-trip with the backend.
pub fn cloud<T: fmt::Display>(msg: T) {
    emit(Stream::Out, FG_CYAN, "☁️", msg);
}
