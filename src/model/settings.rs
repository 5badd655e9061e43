use serde::{Deserialize, Serialize};

pub const DEFAULT_TITLE: &str = "Simply TodoTask";

/// Text size used to render sub-task lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl FontSize {
    /// The token written to list files
    pub fn as_str(self) -> &'static str {
        match self {
            FontSize::Small => "small",
            FontSize::Medium => "medium",
            FontSize::Large => "large",
        }
    }

    /// Parse a size token. Accepts the legacy `piccolo`/`medio`/`grande` names.
    pub fn from_token(s: &str) -> Option<FontSize> {
        match s {
            "small" | "piccolo" => Some(FontSize::Small),
            "medium" | "medio" => Some(FontSize::Medium),
            "large" | "grande" => Some(FontSize::Large),
            _ => None,
        }
    }

    /// Pixel size for sub-task text
    pub fn pixels(self) -> u32 {
        match self {
            FontSize::Small => 12,
            FontSize::Medium => 14,
            FontSize::Large => 16,
        }
    }

    /// Pixel size for task titles (3px above the sub-task size)
    pub fn title_pixels(self) -> u32 {
        self.pixels() + 3
    }
}

/// Document-wide display preferences (the `[SETTINGS]` block)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub title: String,
    pub font_size: FontSize,
    /// Strike through checked sub-tasks
    pub strikethrough: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            title: DEFAULT_TITLE.to_string(),
            font_size: FontSize::Medium,
            strikethrough: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_aliases() {
        assert_eq!(FontSize::from_token("piccolo"), Some(FontSize::Small));
        assert_eq!(FontSize::from_token("medio"), Some(FontSize::Medium));
        assert_eq!(FontSize::from_token("grande"), Some(FontSize::Large));
        assert_eq!(FontSize::from_token("huge"), None);
    }

    #[test]
    fn test_token_round_trip() {
        for size in [FontSize::Small, FontSize::Medium, FontSize::Large] {
            assert_eq!(FontSize::from_token(size.as_str()), Some(size));
        }
    }

    #[test]
    fn test_title_is_larger() {
        assert_eq!(FontSize::Large.title_pixels(), 19);
        assert_eq!(FontSize::default().pixels(), 14);
    }
}
