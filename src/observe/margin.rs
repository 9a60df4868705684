//! Root margin - CSS `rootMargin` shorthand for observers.
//!
//! `"0px 0px -15% 0px"` grows (positive) or shrinks (negative) each edge of the
//! viewport before intersection testing. Percentages resolve against the
//! viewport height for top/bottom and the viewport width for left/right.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::types::Rect;

/// One edge of a root margin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MarginValue {
    Px(f32),
    Percent(f32),
}

impl MarginValue {
    pub const ZERO: Self = Self::Px(0.0);

    /// Resolve against the viewport extent on this edge's axis.
    #[inline]
    pub fn resolve(self, extent: f32) -> f32 {
        match self {
            Self::Px(px) => px,
            Self::Percent(p) => extent * p / 100.0,
        }
    }

    fn parse(token: &str, input: &str) -> Result<Self, Error> {
        let invalid = |reason| Error::RootMargin {
            input: input.to_string(),
            reason,
        };

        let (number, make): (&str, fn(f32) -> Self) = if let Some(n) = token.strip_suffix('%') {
            (n, Self::Percent)
        } else if let Some(n) = token.strip_suffix("px") {
            (n, Self::Px)
        } else if token == "0" {
            ("0", Self::Px)
        } else {
            return Err(invalid("each value needs a `px` or `%` unit"));
        };

        let value: f32 = number
            .parse()
            .map_err(|_| invalid("value is not a number"))?;
        if !value.is_finite() {
            return Err(invalid("value is not finite"));
        }
        Ok(make(value))
    }
}

impl fmt::Display for MarginValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Px(v) => write!(f, "{v}px"),
            Self::Percent(v) => write!(f, "{v}%"),
        }
    }
}

/// Four-edge margin applied to the viewport rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RootMargin {
    pub top: MarginValue,
    pub right: MarginValue,
    pub bottom: MarginValue,
    pub left: MarginValue,
}

impl Default for RootMargin {
    fn default() -> Self {
        Self {
            top: MarginValue::ZERO,
            right: MarginValue::ZERO,
            bottom: MarginValue::ZERO,
            left: MarginValue::ZERO,
        }
    }
}

impl RootMargin {
    /// Only the bottom edge moves, by `percent` of the viewport height.
    pub fn bottom_percent(percent: f32) -> Self {
        Self {
            bottom: MarginValue::Percent(percent),
            ..Self::default()
        }
    }

    /// Apply the margin to a viewport rectangle.
    pub fn apply(&self, viewport: Rect) -> Rect {
        let top = self.top.resolve(viewport.height);
        let bottom = self.bottom.resolve(viewport.height);
        let left = self.left.resolve(viewport.width);
        let right = self.right.resolve(viewport.width);

        Rect::new(
            viewport.x - left,
            viewport.y - top,
            (viewport.width + left + right).max(0.0),
            (viewport.height + top + bottom).max(0.0),
        )
    }
}

impl FromStr for RootMargin {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let values = input
            .split_whitespace()
            .map(|token| MarginValue::parse(token, input))
            .collect::<Result<Vec<_>, _>>()?;

        // Same expansion rules as CSS `margin`.
        let (top, right, bottom, left) = match values.as_slice() {
            [all] => (*all, *all, *all, *all),
            [vertical, horizontal] => (*vertical, *horizontal, *vertical, *horizontal),
            [top, horizontal, bottom] => (*top, *horizontal, *bottom, *horizontal),
            [top, right, bottom, left] => (*top, *right, *bottom, *left),
            _ => {
                return Err(Error::RootMargin {
                    input: input.to_string(),
                    reason: "expected 1 to 4 values",
                });
            }
        };

        Ok(Self {
            top,
            right,
            bottom,
            left,
        })
    }
}

impl TryFrom<String> for RootMargin {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RootMargin> for String {
    fn from(margin: RootMargin) -> Self {
        margin.to_string()
    }
}

impl fmt::Display for RootMargin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.top, self.right, self.bottom, self.left)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_four_values() {
        let m: RootMargin = "0px 0px -15% 0px".parse().unwrap();
        assert_eq!(m, RootMargin::bottom_percent(-15.0));
    }

    #[test]
    fn test_parse_shorthand() {
        let m: RootMargin = "10px 5%".parse().unwrap();
        assert_eq!(m.top, MarginValue::Px(10.0));
        assert_eq!(m.bottom, MarginValue::Px(10.0));
        assert_eq!(m.left, MarginValue::Percent(5.0));
        assert_eq!(m.right, MarginValue::Percent(5.0));
    }

    #[test]
    fn test_bare_zero_allowed() {
        let m: RootMargin = "0".parse().unwrap();
        assert_eq!(m, RootMargin::default());
    }

    #[test]
    fn test_rejects_missing_unit() {
        assert!("0px 0px -15 0px".parse::<RootMargin>().is_err());
    }

    #[test]
    fn test_rejects_too_many_values() {
        assert!("0px 0px 0px 0px 0px".parse::<RootMargin>().is_err());
        assert!("".parse::<RootMargin>().is_err());
    }

    #[test]
    fn test_apply_contracts_bottom() {
        let viewport = Rect::new(0.0, 100.0, 80.0, 20.0);
        let root = RootMargin::bottom_percent(-15.0).apply(viewport);
        assert_eq!(root.y, 100.0);
        assert_eq!(root.height, 17.0);
        assert_eq!(root.width, 80.0);
    }

    #[test]
    fn test_display_round_trips() {
        let m = RootMargin::bottom_percent(-10.0);
        let again: RootMargin = m.to_string().parse().unwrap();
        assert_eq!(m, again);
    }
}
