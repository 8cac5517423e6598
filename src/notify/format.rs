//! Text helpers for badges and notification bodies.

use regex::Regex;
use std::sync::LazyLock;

static FORMATTING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\x02|\x1D|\x1F|\x16|\x0F|\x11|\x1E|\x03(?:[0-9]{1,2}(?:,[0-9]{1,2})?)?|\x04(?:[0-9a-f]{6}(?:,[0-9a-f]{6})?)?",
    )
    .expect("formatting pattern is valid")
});

/// Remove IRC bold/color/reset control codes.
pub fn strip_formatting(text: &str) -> String {
    FORMATTING.replace_all(text, "").trim().to_string()
}

/// Compact unread count: exact below 1000, then thousands with one
/// truncated decimal (1000 -> "1k", 1530 -> "1.5k").
pub fn round_badge_number(count: u32) -> String {
    if count < 1000 {
        return count.to_string();
    }
    let tenths = count / 100;
    match (tenths / 10, tenths % 10) {
        (whole, 0) => format!("{}k", whole),
        (whole, frac) => format!("{}.{}k", whole, frac),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_badge_number() {
        assert_eq!(round_badge_number(0), "0");
        assert_eq!(round_badge_number(5), "5");
        assert_eq!(round_badge_number(999), "999");
        assert_eq!(round_badge_number(1000), "1k");
        assert_eq!(round_badge_number(1530), "1.5k");
        assert_eq!(round_badge_number(1999), "1.9k");
        assert_eq!(round_badge_number(25_000), "25k");
    }

    #[test]
    fn test_strip_formatting() {
        assert_eq!(strip_formatting("\x02bold\x02 text"), "bold text");
        assert_eq!(strip_formatting("\x0304,01red\x03 plain"), "red plain");
        assert_eq!(strip_formatting("\x04ff0000hex\x0f"), "hex");
        assert_eq!(strip_formatting("  \x1Ditalic\x1D  "), "italic");
        assert_eq!(strip_formatting("untouched 10,5"), "untouched 10,5");
    }
}
