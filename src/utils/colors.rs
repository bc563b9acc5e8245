/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";

/// Slider scores:
/// 0..=3 → red
/// 4..=6 → yellow
/// 7.. → green
pub fn color_for_score(value: i64) -> &'static str {
    match value {
        i64::MIN..=3 => RED,
        4..=6 => YELLOW,
        _ => GREEN,
    }
}

/// Stored checkbox state rendered as a colored mark.
pub fn colorize_check(value: &str) -> String {
    match value.trim() {
        "1" => format!("{GREEN}yes{RESET}"),
        "0" => format!("{GREY}no{RESET}"),
        other => other.to_string(),
    }
}

/// Grey for empty values and the `00:00` duration.
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() || value.trim() == "00:00" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}
