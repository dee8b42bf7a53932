use std::fmt;

use serde::Deserialize;
use webpilot_constant::defaults;

#[derive(Debug, Deserialize)]
pub struct ScrollArgs {
    /// "up" or "down", any case
    pub direction: String,

    #[serde(default = "default_amount")]
    pub amount: i64,
}

fn default_amount() -> i64 {
    defaults::SCROLL_AMOUNT
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

impl ScrollDirection {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "up" => Some(ScrollDirection::Up),
            "down" => Some(ScrollDirection::Down),
            _ => None,
        }
    }

    /// Signed pixel offset for `amount`. The magnitude saturates at `i64::MAX`.
    pub fn offset(self, amount: i64) -> i64 {
        let magnitude = amount.saturating_abs();
        match self {
            ScrollDirection::Up => -magnitude,
            ScrollDirection::Down => magnitude,
        }
    }
}

impl fmt::Display for ScrollDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScrollDirection::Up => write!(f, "up"),
            ScrollDirection::Down => write!(f, "down"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_direction() {
        assert_eq!(ScrollDirection::parse("UP"), Some(ScrollDirection::Up));
        assert_eq!(ScrollDirection::parse("down"), Some(ScrollDirection::Down));
        assert_eq!(ScrollDirection::parse("sideways"), None);
    }

    #[test]
    fn test_offset_sign() {
        assert_eq!(ScrollDirection::Up.offset(500), -500);
        assert_eq!(ScrollDirection::Down.offset(-300), 300);
    }

    #[test]
    fn test_offset_saturates_at_extremes() {
        assert_eq!(ScrollDirection::Down.offset(i64::MIN), i64::MAX);
        assert_eq!(ScrollDirection::Up.offset(i64::MIN), -i64::MAX);
        assert_eq!(ScrollDirection::Up.offset(i64::MAX), -i64::MAX);
    }
}
