//! Resolution spec parsing.
//!
//! A spec is either an explicit pixel target (`"1920x1080"`) or an aspect
//! ratio only (`"4:3"`) that is resolved against the live source every tick.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CropError;

/// A parsed target resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolutionSpec {
    /// `true` for `WxH`, `false` for `W:H`.
    pub explicit: bool,
    /// Pixel width when explicit, ratio numerator otherwise.
    pub width_or_num: u32,
    /// Pixel height when explicit, ratio denominator otherwise.
    pub height_or_den: u32,
}

impl ResolutionSpec {
    /// Explicit pixel target. Returns `None` if either side is zero.
    pub fn explicit(width: u32, height: u32) -> Option<Self> {
        (width > 0 && height > 0).then_some(Self {
            explicit: true,
            width_or_num: width,
            height_or_den: height,
        })
    }

    /// Aspect-only target. Returns `None` if either side is zero.
    pub fn aspect_only(num: u32, den: u32) -> Option<Self> {
        (num > 0 && den > 0).then_some(Self {
            explicit: false,
            width_or_num: num,
            height_or_den: den,
        })
    }

    /// Parse `"<int>x<int>"` first, then `"<int>:<int>"`.
    ///
    /// Surrounding whitespace is ignored. Zero or negative components are
    /// rejected even when the textual pattern matched.
    pub fn parse(text: &str) -> Result<Self, CropError> {
        let trimmed = text.trim();
        let invalid = || CropError::InvalidSpec(text.to_string());

        if let Some((w, h)) = split_pair(trimmed, 'x') {
            return Self::explicit(w, h).ok_or_else(invalid);
        }
        if let Some((n, d)) = split_pair(trimmed, ':') {
            return Self::aspect_only(n, d).ok_or_else(invalid);
        }
        Err(invalid())
    }

    /// Target aspect ratio (width / height).
    pub fn aspect(&self) -> f64 {
        self.width_or_num as f64 / self.height_or_den as f64
    }
}

/// Split `"<int><sep><int>"` into its two parts.
///
/// Signed integers are accepted here so that `"-4:3"` is reported as a
/// non-positive spec rather than as an unmatched pattern; the caller rejects
/// anything that does not fit a positive `u32`.
fn split_pair(text: &str, sep: char) -> Option<(u32, u32)> {
    let (a, b) = text.split_once(sep)?;
    let a: i64 = a.trim().parse().ok()?;
    let b: i64 = b.trim().parse().ok()?;
    let clamp = |v: i64| u32::try_from(v.max(0)).unwrap_or(0);
    Some((clamp(a), clamp(b)))
}

impl FromStr for ResolutionSpec {
    type Err = CropError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ResolutionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = if self.explicit { 'x' } else { ':' };
        write!(f, "{}{}{}", self.width_or_num, sep, self.height_or_den)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_explicit() {
        let spec = ResolutionSpec::parse("1920x1080").unwrap();
        assert!(spec.explicit);
        assert_eq!(spec.width_or_num, 1920);
        assert_eq!(spec.height_or_den, 1080);
    }

    #[test]
    fn test_parse_aspect() {
        let spec = ResolutionSpec::parse("4:3").unwrap();
        assert!(!spec.explicit);
        assert_eq!(spec.width_or_num, 4);
        assert_eq!(spec.height_or_den, 3);
        assert!((spec.aspect() - 4.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let spec = ResolutionSpec::parse("  16:9\n").unwrap();
        assert_eq!(spec, ResolutionSpec::aspect_only(16, 9).unwrap());
    }

    #[test]
    fn test_parse_rejects_zero_components() {
        assert!(matches!(
            ResolutionSpec::parse("0x1080"),
            Err(CropError::InvalidSpec(_))
        ));
        assert!(matches!(
            ResolutionSpec::parse("4:0"),
            Err(CropError::InvalidSpec(_))
        ));
    }

    #[test]
    fn test_parse_rejects_negative_components() {
        assert!(ResolutionSpec::parse("-4:3").is_err());
        assert!(ResolutionSpec::parse("640x-480").is_err());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for text in ["", "16/9", "wide", "4:3:2", "1920x", "x1080", "1.5:1"] {
            assert!(
                ResolutionSpec::parse(text).is_err(),
                "{:?} should not parse",
                text
            );
        }
    }

    #[test]
    fn test_parse_rejects_overflow() {
        assert!(ResolutionSpec::parse("99999999999x1080").is_err());
    }

    #[test]
    fn test_display_round_trips() {
        for text in ["1920x1080", "4:3", "16:9", "640x480"] {
            let spec: ResolutionSpec = text.parse().unwrap();
            assert_eq!(spec.to_string(), text);
        }
    }

    #[test]
    fn test_constructors_reject_zero() {
        assert!(ResolutionSpec::explicit(0, 10).is_none());
        assert!(ResolutionSpec::aspect_only(10, 0).is_none());
    }
}
