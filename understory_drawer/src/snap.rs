// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Snap points: resting positions, the offset table, and release targets.
//!
//! [`SnapPoints`] is pure state. It answers "where is the panel allowed to
//! rest", "how far has the backdrop faded", and "where should a release
//! land"; the controller turns those answers into style updates.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use kurbo::Size;

use crate::direction::DrawerDirection;

/// Velocity above which a release jumps straight to the first or last snap
/// point, ignoring neighbors.
pub const FAST_RELEASE_VELOCITY: f64 = 2.0;

/// Fraction of the viewport extent below which a fast release counts as a
/// flick and steps one snap point.
pub const FLICK_MAX_DISTANCE_FRACTION: f64 = 0.4;

/// A configured resting position of the panel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SnapPoint {
    /// Fraction of the container extent along the drag axis.
    Fraction(f64),
    /// Absolute visible extent in pixels.
    Pixels(i32),
}

impl fmt::Display for SnapPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fraction(v) => write!(f, "{v}"),
            Self::Pixels(v) => write!(f, "{v}px"),
        }
    }
}

/// Error returned when text is neither `"<int>px"` nor a number.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SnapPointParseError {
    /// The rejected input.
    pub input: String,
}

impl fmt::Display for SnapPointParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid snap point {:?}: expected a fraction or \"<int>px\"",
            self.input
        )
    }
}

impl core::error::Error for SnapPointParseError {}

impl FromStr for SnapPoint {
    type Err = SnapPointParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let err = || SnapPointParseError { input: s.into() };
        if let Some(px) = text.strip_suffix("px") {
            return px.trim().parse().map(Self::Pixels).map_err(|_| err());
        }
        match text.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(Self::Fraction(v)),
            _ => Err(err()),
        }
    }
}

/// Converts snap points into translate offsets for `direction` inside a
/// container of `container` size.
///
/// Offsets run from the most closed point to the most open one when the
/// snap points are sorted by visible extent.
#[must_use]
pub fn compute_offsets(
    points: &[SnapPoint],
    direction: DrawerDirection,
    container: Size,
) -> Vec<f64> {
    let container_extent = direction.axis_extent(container);
    points
        .iter()
        .map(|point| {
            let extent = match *point {
                SnapPoint::Pixels(px) => f64::from(px),
                SnapPoint::Fraction(fraction) => fraction * container_extent,
            };
            direction.offset_for_extent(extent, container_extent)
        })
        .collect()
}

/// Result of snapping to a point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnapTarget {
    /// Index of the snap point now active.
    pub index: usize,
    /// Panel translate for that snap point.
    pub offset: f64,
    /// Backdrop opacity at that snap point.
    pub overlay_opacity: f64,
    /// `true` if this is the most open snap point.
    pub is_last: bool,
}

/// What a release should do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SnapRelease {
    /// Dismiss the drawer.
    Close,
    /// Animate to the snap point at this index.
    SnapTo(usize),
}

/// Inputs to [`SnapPoints::release`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReleaseInput {
    /// Dragged distance, positive toward open.
    pub dragged: f64,
    /// Pointer speed in pixels per millisecond.
    pub velocity: f64,
    /// Speed above which a short release counts as a flick.
    pub velocity_threshold: f64,
    /// Whether closing is allowed.
    pub dismissible: bool,
    /// Viewport extent along the drag axis.
    pub viewport_extent: f64,
}

/// Snap point list with its memoized offset table and the active point.
#[derive(Clone, Debug)]
pub struct SnapPoints {
    points: Vec<SnapPoint>,
    fade_from: Option<usize>,
    sequential: bool,
    direction: DrawerDirection,
    container: Size,
    offsets: Vec<f64>,
    active: Option<SnapPoint>,
}

impl SnapPoints {
    /// Creates the table for `points`.
    ///
    /// `fade_from` defaults to the last index when `None`.
    #[must_use]
    pub fn new(
        points: Vec<SnapPoint>,
        fade_from: Option<usize>,
        direction: DrawerDirection,
        container: Size,
    ) -> Self {
        let fade_from = fade_from.or_else(|| points.len().checked_sub(1));
        let offsets = compute_offsets(&points, direction, container);
        Self {
            points,
            fade_from,
            sequential: false,
            direction,
            container,
            offsets,
            active: None,
        }
    }

    /// Disables the fast-release jumps so releases only step or settle.
    #[must_use]
    pub fn with_sequential(mut self, sequential: bool) -> Self {
        self.sequential = sequential;
        self
    }

    /// Updates the container size, recomputing offsets if it changed.
    ///
    /// Returns `true` if the table was recomputed.
    pub fn set_container(&mut self, container: Size) -> bool {
        if self.container == container {
            return false;
        }
        self.container = container;
        self.offsets = compute_offsets(&self.points, self.direction, container);
        true
    }

    /// Updates the direction, recomputing offsets if it changed.
    pub fn set_direction(&mut self, direction: DrawerDirection) -> bool {
        if self.direction == direction {
            return false;
        }
        self.direction = direction;
        self.offsets = compute_offsets(&self.points, direction, self.container);
        true
    }

    /// Configured snap points.
    #[must_use]
    pub fn points(&self) -> &[SnapPoint] {
        &self.points
    }

    /// Offsets, parallel to [`points`](Self::points).
    #[must_use]
    pub fn offsets(&self) -> &[f64] {
        &self.offsets
    }

    /// `true` when no snap points are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Index from which the backdrop is fully shown.
    #[must_use]
    pub fn fade_from(&self) -> Option<usize> {
        self.fade_from
    }

    /// Active snap point.
    #[must_use]
    pub fn active(&self) -> Option<SnapPoint> {
        self.active
    }

    /// Sets the active snap point. Returns `true` if it changed.
    pub fn set_active(&mut self, active: Option<SnapPoint>) -> bool {
        if self.active == active {
            return false;
        }
        self.active = active;
        true
    }

    /// Index of the active snap point, if it is one of the configured points.
    #[must_use]
    pub fn active_index(&self) -> Option<usize> {
        let active = self.active?;
        self.points.iter().position(|p| *p == active)
    }

    /// Offset of the active snap point.
    #[must_use]
    pub fn active_offset(&self) -> Option<f64> {
        self.offsets.get(self.active_index()?).copied()
    }

    /// `true` if the active snap point is the most open one.
    #[must_use]
    pub fn is_last_snap_point(&self) -> bool {
        self.active.is_some() && self.active == self.points.last().copied()
    }

    /// `true` if the backdrop follows the drag: no snap points, or the active
    /// point is the fade-from point.
    #[must_use]
    pub fn should_fade(&self) -> bool {
        if self.points.is_empty() {
            return true;
        }
        match (self.fade_from, self.active) {
            (Some(fade_from), Some(active)) => self.points.get(fade_from) == Some(&active),
            _ => false,
        }
    }

    /// `true` if the active point sits just before the fade-from point.
    #[must_use]
    pub fn is_overlay_snap_point(&self) -> bool {
        match self.fade_from {
            Some(fade_from) if fade_from > 0 => self.active_index() == Some(fade_from - 1),
            _ => false,
        }
    }

    /// Index whose offset equals `offset` exactly.
    #[must_use]
    pub fn index_of_offset(&self, offset: f64) -> Option<usize> {
        self.offsets.iter().position(|o| *o == offset)
    }

    /// Backdrop opacity when resting at `index`.
    #[must_use]
    pub fn overlay_opacity_at(&self, index: usize) -> f64 {
        let is_last = index + 1 == self.offsets.len();
        match self.fade_from {
            Some(fade_from) if !is_last && index < fade_from => 0.0,
            _ => 1.0,
        }
    }

    /// Makes the snap point at `index` active.
    pub fn snap_to_index(&mut self, index: usize) -> Option<SnapTarget> {
        let offset = *self.offsets.get(index)?;
        self.active = self.points.get(index).copied();
        Some(SnapTarget {
            index,
            offset,
            overlay_opacity: self.overlay_opacity_at(index),
            is_last: index + 1 == self.offsets.len(),
        })
    }

    /// Makes the snap point whose offset is `offset` active.
    pub fn snap_to_offset(&mut self, offset: f64) -> Option<SnapTarget> {
        let index = self.index_of_offset(offset)?;
        self.snap_to_index(index)
    }

    /// Backdrop fade progress while dragging from the active point.
    ///
    /// `0` means fully shown, `1` fully hidden. `None` means the snap points
    /// have no opinion and the caller should use the plain distance ratio.
    #[must_use]
    pub fn percentage_dragged(&self, abs_dragged: f64, toward_open: bool) -> Option<f64> {
        let index = self.active_index()?;
        let fade_from = self.fade_from?;
        let is_overlay = fade_from > 0 && index == fade_from - 1;

        if index >= fade_from && toward_open {
            return Some(0.0);
        }
        if is_overlay && !toward_open {
            return Some(1.0);
        }
        if !self.should_fade() && !is_overlay {
            return None;
        }

        let (low, high) = if is_overlay {
            (index, index + 1)
        } else {
            (index.checked_sub(1)?, index)
        };
        let span = (self.offsets.get(high)? - self.offsets.get(low)?).abs();
        if span == 0.0 {
            return None;
        }
        let fraction = abs_dragged / span;
        Some(if is_overlay { 1.0 - fraction } else { fraction })
    }

    /// Translate for the panel while dragging `dragged` (positive toward
    /// open) from the active point.
    ///
    /// `None` if nothing is active or the move would pass the most open
    /// snap point.
    #[must_use]
    pub fn drag_offset(&self, dragged: f64) -> Option<f64> {
        let active = self.active_offset()?;
        let candidate = active - self.direction.close_sign() * dragged;
        let last = *self.offsets.last()?;
        (!self.direction.is_beyond_open(candidate, last)).then_some(candidate)
    }

    fn closest_index(&self, position: f64) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, offset) in self.offsets.iter().enumerate() {
            let distance = (offset - position).abs();
            if best.is_none_or(|(_, d)| distance < d) {
                best = Some((i, distance));
            }
        }
        best.map(|(i, _)| i)
    }

    /// Decides where a release lands.
    ///
    /// Returns `None` when there are no snap points.
    #[must_use]
    pub fn release(&self, input: &ReleaseInput) -> Option<SnapRelease> {
        self.fade_from?;
        let last = self.offsets.len().checked_sub(1)?;
        let toward_open = input.dragged > 0.0;

        if !self.sequential && input.velocity > FAST_RELEASE_VELOCITY {
            return Some(if toward_open {
                SnapRelease::SnapTo(last)
            } else if input.dismissible {
                SnapRelease::Close
            } else {
                SnapRelease::SnapTo(0)
            });
        }

        let position =
            self.active_offset().unwrap_or(0.0) - self.direction.close_sign() * input.dragged;
        let closest = self.closest_index(position)?;

        let is_flick = input.velocity > input.velocity_threshold
            && input.dragged.abs() < input.viewport_extent * FLICK_MAX_DISTANCE_FRACTION;
        if !is_flick {
            return Some(SnapRelease::SnapTo(closest));
        }
        let Some(index) = self.active_index() else {
            return Some(SnapRelease::SnapTo(closest));
        };
        Some(if toward_open {
            SnapRelease::SnapTo((index + 1).min(last))
        } else if index == 0 {
            if input.dismissible {
                SnapRelease::Close
            } else {
                SnapRelease::SnapTo(0)
            }
        } else {
            SnapRelease::SnapTo(index - 1)
        })
    }
}
