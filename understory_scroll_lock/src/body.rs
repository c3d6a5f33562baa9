// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::format;
use alloc::string::{String, ToString};

use kurbo::Vec2;

/// Inline positioning styles of the document body.
///
/// Values are raw CSS strings exactly as read from (and written back to) the
/// body's inline style. An empty string means "not set inline".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BodyPosition {
    /// `position`
    pub position: String,
    /// `top`
    pub top: String,
    /// `left`
    pub left: String,
    /// `height`
    pub height: String,
    /// `right`
    pub right: String,
    /// `padding-right`
    pub padding_right: String,
}

impl BodyPosition {
    /// Styles that pin the body at the given scroll offset.
    ///
    /// `position` is `fixed` and hosts must apply it with `!important` so page
    /// stylesheets cannot undo it. `padding_right`, when given, compensates for
    /// the scrollbar that disappears once the body stops scrolling.
    #[must_use]
    pub fn fixed_at(scroll: Vec2, padding_right: Option<f64>, previous: &Self) -> Self {
        Self {
            position: "fixed".to_string(),
            top: px(-scroll.y),
            left: px(-scroll.x),
            height: "auto".to_string(),
            right: "0px".to_string(),
            padding_right: padding_right.map_or_else(|| previous.padding_right.clone(), px),
        }
    }

    /// `top` as pixels, using leading-integer parsing.
    #[must_use]
    pub fn top_px(&self) -> Option<f64> {
        parse_px(&self.top)
    }

    /// `left` as pixels, using leading-integer parsing.
    #[must_use]
    pub fn left_px(&self) -> Option<f64> {
        parse_px(&self.left)
    }
}

/// Formats a pixel length, normalizing negative zero.
pub(crate) fn px(value: f64) -> String {
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{value}px")
}

/// Parses the leading integer of a CSS length (`"-120px"` → `-120`).
///
/// Fractional parts and units are ignored. Returns `None` when the string
/// does not start with an optionally signed digit run.
#[must_use]
pub fn parse_px(value: &str) -> Option<f64> {
    let value = value.trim_start();
    let (sign, digits) = match value.as_bytes().first()? {
        b'-' => (-1.0, &value[1..]),
        b'+' => (1.0, &value[1..]),
        _ => (1.0, value),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let magnitude: f64 = digits[..end].parse().ok()?;
    Some(sign * magnitude)
}

#[cfg(test)]
mod tests {
    use kurbo::Vec2;

    use super::{BodyPosition, parse_px};

    #[test]
    fn parse_px_takes_leading_integer() {
        assert_eq!(parse_px("-120px"), Some(-120.0));
        assert_eq!(parse_px("37.9px"), Some(37.0));
        assert_eq!(parse_px("  8"), Some(8.0));
        assert_eq!(parse_px("auto"), None);
        assert_eq!(parse_px(""), None);
        assert_eq!(parse_px("-"), None);
    }

    #[test]
    fn fixed_at_offsets_by_negative_scroll() {
        let previous = BodyPosition {
            padding_right: "4px".into(),
            ..BodyPosition::default()
        };
        let pinned = BodyPosition::fixed_at(Vec2::new(0.0, 640.0), None, &previous);
        assert_eq!(pinned.position, "fixed");
        assert_eq!(pinned.top, "-640px");
        assert_eq!(pinned.left, "0px");
        assert_eq!(pinned.right, "0px");
        assert_eq!(pinned.height, "auto");
        assert_eq!(pinned.padding_right, "4px");

        let padded = BodyPosition::fixed_at(Vec2::new(10.0, 0.0), Some(15.0), &previous);
        assert_eq!(padded.left, "-10px");
        assert_eq!(padded.top, "0px");
        assert_eq!(padded.padding_right, "15px");
    }
}
