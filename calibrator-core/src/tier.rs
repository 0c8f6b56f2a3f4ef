//! # Luminance Tiers
//!
//! The five fixed gray levels used both as calibration steps and as
//! test colors in the setup stage.

use std::fmt;

/// One of the five fixed luminance levels, ordered from darkest to brightest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    Black,
    DarkGray,
    Gray,
    LightGray,
    White,
}

impl Tier {
    /// All tiers in calibration order.
    pub const ALL: [Tier; 5] = [
        Tier::Black,
        Tier::DarkGray,
        Tier::Gray,
        Tier::LightGray,
        Tier::White,
    ];

    /// Base gray value of the tier (0-255).
    pub fn base_value(self) -> u8 {
        match self {
            Tier::Black => 0,
            Tier::DarkGray => 64,
            Tier::Gray => 128,
            Tier::LightGray => 192,
            Tier::White => 255,
        }
    }

    /// Lowercase key used in the calibration file (e.g. "dark gray").
    pub fn key(self) -> &'static str {
        match self {
            Tier::Black => "black",
            Tier::DarkGray => "dark gray",
            Tier::Gray => "gray",
            Tier::LightGray => "light gray",
            Tier::White => "white",
        }
    }

    /// Human readable label (e.g. "Dark Gray").
    pub fn label(self) -> &'static str {
        match self {
            Tier::Black => "Black",
            Tier::DarkGray => "Dark Gray",
            Tier::Gray => "Gray",
            Tier::LightGray => "Light Gray",
            Tier::White => "White",
        }
    }

    /// Looks up a tier by key or label, ignoring case and surrounding whitespace.
    pub fn from_key(key: &str) -> Option<Tier> {
        let key = key.trim();
        Tier::ALL
            .into_iter()
            .find(|tier| tier.key().eq_ignore_ascii_case(key))
    }

    /// Position of the tier in calibration order.
    pub fn index(self) -> usize {
        self as usize
    }

    /// The tier following this one, if any.
    pub fn next(self) -> Option<Tier> {
        Tier::ALL.get(self.index() + 1).copied()
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_key_is_case_insensitive() {
        assert_eq!(Tier::from_key("dark gray"), Some(Tier::DarkGray));
        assert_eq!(Tier::from_key("  Light Gray "), Some(Tier::LightGray));
        assert_eq!(Tier::from_key("WHITE"), Some(Tier::White));
        assert_eq!(Tier::from_key("grey"), None);
    }

    #[test]
    fn test_order_and_next() {
        assert_eq!(Tier::Black.next(), Some(Tier::DarkGray));
        assert_eq!(Tier::White.next(), None);
        let bases: Vec<u8> = Tier::ALL.iter().map(|t| t.base_value()).collect();
        assert_eq!(bases, vec![0, 64, 128, 192, 255]);
    }
}
