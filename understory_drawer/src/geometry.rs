// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry helpers: translate extraction and over-drag damping.

use crate::direction::DrawerDirection;

/// Logarithmic rubber-band attenuation: `8 · (ln(v + 1) − 2)`.
///
/// Used when a drawer without snap points is pulled past its fully open rest
/// position. The result grows ever more slowly as `v` increases.
#[must_use]
pub fn damp(value: f64) -> f64 {
    8.0 * (libm::log(value + 1.0) - 2.0)
}

/// Extracts the translate component along the drag axis from a computed
/// transform.
///
/// Accepts the two serializations browsers produce for computed transforms:
/// `matrix(a, b, c, d, tx, ty)` and `matrix3d(...)` with the translation in
/// elements 12 (x) and 13 (y). Anything else, including `none`, yields `None`,
/// as does a component that is not a finite number.
#[must_use]
pub fn parse_translate(transform: &str, direction: DrawerDirection) -> Option<f64> {
    let transform = transform.trim();
    let (args, index) = if let Some(args) = function_args(transform, "matrix3d") {
        (args, if direction.is_vertical() { 13 } else { 12 })
    } else if let Some(args) = function_args(transform, "matrix") {
        (args, if direction.is_vertical() { 5 } else { 4 })
    } else {
        return None;
    };
    let value: f64 = args.split(',').nth(index)?.trim().parse().ok()?;
    value.is_finite().then_some(value)
}

fn function_args<'a>(transform: &'a str, name: &str) -> Option<&'a str> {
    transform
        .strip_prefix(name)?
        .strip_prefix('(')?
        .strip_suffix(')')
}

#[cfg(test)]
mod tests {
    use super::{damp, parse_translate};
    use crate::direction::DrawerDirection;

    #[test]
    fn damp_is_slow_and_monotonic() {
        assert!((damp(0.0) + 16.0).abs() < 1e-12);
        let mut last = damp(0.0);
        for v in [1.0, 10.0, 100.0, 1000.0] {
            let d = damp(v);
            assert!(d > last, "damp must increase");
            last = d;
        }
        // Far less than linear.
        assert!(damp(1000.0) < 50.0);
    }

    #[test]
    fn parses_2d_matrix() {
        let t = "matrix(1, 0, 0, 1, 12.5, -340)";
        assert_eq!(parse_translate(t, DrawerDirection::Bottom), Some(-340.0));
        assert_eq!(parse_translate(t, DrawerDirection::Right), Some(12.5));
    }

    #[test]
    fn parses_3d_matrix() {
        let t = "matrix3d(1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1, 0, 30, 120, 0, 1)";
        assert_eq!(parse_translate(t, DrawerDirection::Top), Some(120.0));
        assert_eq!(parse_translate(t, DrawerDirection::Left), Some(30.0));
    }

    #[test]
    fn rejects_malformed_transforms() {
        assert_eq!(parse_translate("none", DrawerDirection::Bottom), None);
        assert_eq!(parse_translate("matrix(1, 0)", DrawerDirection::Bottom), None);
        assert_eq!(parse_translate("matrix(1, 0, 0, 1, 0, abc)", DrawerDirection::Bottom), None);
        assert_eq!(parse_translate("translate3d(0, 10px, 0)", DrawerDirection::Bottom), None);
        assert_eq!(parse_translate("matrix(1, 0, 0, 1, 0, NaN)", DrawerDirection::Bottom), None);
    }
}
