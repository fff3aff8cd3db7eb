//! Console colors of the printed text.

use colored::Colorize;

/// What the colored text means.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Role {
    /// Departure station or time.
    Departure,
    /// Arrival station or time.
    Arrival,
    /// A message the user must notice.
    Alert,
}

/// Wraps the text into the color of its role.
///
/// Colors are skipped when the output isn't a terminal or `NO_COLOR` is set.
pub fn colorize(text: &str, role: Role) -> String {
    match role {
        Role::Departure | Role::Alert => text.bright_red().to_string(),
        Role::Arrival => text.bright_green().to_string(),
    }
}

// Removes ANSI escape sequences, leaving the visible text.
pub(crate) fn strip_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        if c == '\u{1b}' {
            for c in chars.by_ref() {
                if c.is_ascii_alphabetic() {
                    break;
                }
            }
            continue;
        }
        out.push(c);
    }
    out
}
