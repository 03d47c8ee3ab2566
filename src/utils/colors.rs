/// ANSI color helper utilities for terminal output.
use crate::core::expiry::ExpiryClass;

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const MAGENTA: &str = "\x1b[35m";

pub fn color_for_expiry(class: ExpiryClass) -> &'static str {
    match class {
        ExpiryClass::Expired => MAGENTA,
        ExpiryClass::Red => RED,
        ExpiryClass::Yellow => YELLOW,
        ExpiryClass::Green => GREEN,
    }
}

/// Grey out empty placeholders, leave anything else untouched.
pub fn colorize_optional(value: &str) -> String {
    let v = value.trim();
    if v.is_empty() || v == "-" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}
