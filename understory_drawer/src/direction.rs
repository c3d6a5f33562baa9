// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The edge a drawer slides from, and the axis math that follows from it.

use kurbo::{Point, Size};

/// Edge of the viewport the drawer slides in from.
///
/// Every direction-dependent formula in the crate goes through the methods on
/// this type, so components never branch on the variant themselves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DrawerDirection {
    /// Slides down from the top edge.
    Top,
    /// Slides up from the bottom edge.
    #[default]
    Bottom,
    /// Slides in from the left edge.
    Left,
    /// Slides in from the right edge.
    Right,
}

impl DrawerDirection {
    /// `true` for top/bottom drawers, which move along the Y axis.
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }

    /// `true` for the edges at the far end of their axis (bottom, right).
    #[must_use]
    pub const fn is_far_edge(self) -> bool {
        matches!(self, Self::Bottom | Self::Right)
    }

    /// Sign that orients axis movement so that positive means "toward open".
    ///
    /// Multiply `pointer_start - pointer_now` by this to get a dragged
    /// distance that is positive when the panel is pulled away from its
    /// closing edge. The same sign maps a positive magnitude to the closing
    /// translation of the panel.
    #[must_use]
    pub const fn close_sign(self) -> f64 {
        if self.is_far_edge() { 1.0 } else { -1.0 }
    }

    /// Coordinate of `point` along the drag axis.
    #[must_use]
    pub fn axis_coordinate(self, point: Point) -> f64 {
        if self.is_vertical() { point.y } else { point.x }
    }

    /// Extent of `size` along the drag axis.
    #[must_use]
    pub fn axis_extent(self, size: Size) -> f64 {
        if self.is_vertical() {
            size.height
        } else {
            size.width
        }
    }

    /// Converts a visible panel extent into its resting translate offset.
    ///
    /// Far edges rest at `container - extent`; near edges at
    /// `extent - container`.
    #[must_use]
    pub fn offset_for_extent(self, extent: f64, container_extent: f64) -> f64 {
        if self.is_far_edge() {
            container_extent - extent
        } else {
            -container_extent + extent
        }
    }

    /// `true` if `offset` lies further open than `limit`.
    ///
    /// Far-edge offsets shrink as the panel opens; near-edge offsets grow.
    #[must_use]
    pub fn is_beyond_open(self, offset: f64, limit: f64) -> bool {
        if self.is_far_edge() {
            offset < limit
        } else {
            offset > limit
        }
    }

    /// `true` if a computed translate shows the panel displaced toward its
    /// closing edge (for example mid-way through an entrance animation).
    #[must_use]
    pub fn is_displaced_toward_close(self, translate: f64) -> bool {
        if self.is_far_edge() {
            translate > 0.0
        } else {
            translate < 0.0
        }
    }

    /// Name used in render attributes.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}
