use std::fmt;

use serde::{Serialize, Serializer};

/// Literal written to list files for an inherited color
pub const DEFAULT_TOKEN: &str = "default";

/// Title color for a task without a link
pub const TITLE_PLAIN: &str = "#1a1a1a";
/// Title color for a task with a link
pub const TITLE_LINKED: &str = "#2E86AB";
/// Checked sub-task color
pub const SELECTED: &str = "#4CAF50";

/// A customizable color: either inherited or an explicit value
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Color {
    #[default]
    Default,
    /// Color value as written, usually `#RRGGBB`
    Hex(String),
}

impl Color {
    /// Read a color token from a list file. Anything other than `default`
    /// is kept verbatim.
    pub fn from_token(s: &str) -> Color {
        if s == DEFAULT_TOKEN {
            Color::Default
        } else {
            Color::Hex(s.to_string())
        }
    }

    /// Parse a user-supplied color. Only `default`, `#RGB` and `#RRGGBB`
    /// are accepted.
    pub fn parse_user(s: &str) -> Option<Color> {
        let s = s.trim();
        if s.eq_ignore_ascii_case(DEFAULT_TOKEN) {
            return Some(Color::Default);
        }
        if is_hex_color(s) {
            Some(Color::Hex(s.to_string()))
        } else {
            None
        }
    }

    pub fn as_token(&self) -> &str {
        match self {
            Color::Default => DEFAULT_TOKEN,
            Color::Hex(h) => h,
        }
    }

    /// The explicit value, or `fallback` when inherited
    pub fn resolve<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self {
            Color::Default => fallback,
            Color::Hex(h) => h,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_token())
    }
}

/// `#RGB` or `#RRGGBB`
pub fn is_hex_color(s: &str) -> bool {
    match s.strip_prefix('#') {
        Some(digits) => {
            (digits.len() == 3 || digits.len() == 6)
                && digits.chars().all(|c| c.is_ascii_hexdigit())
        }
        None => false,
    }
}
