// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host boundary.
//!
//! A [`DrawerHost`] answers layout queries and receives style updates. Web
//! bindings back it with the DOM; tests back it with a recording fake.

use alloc::string::String;

use kurbo::{Rect, Size};
use understory_scroll_lock::PageHost;

use crate::style::{StyleSnapshot, StyleTarget, StyleUpdate};

/// Queries and writes the drawer engine needs from its environment.
///
/// Methods with defaults describe optional capabilities; a host that lacks
/// them simply skips the related workaround.
pub trait DrawerHost: PageHost {
    /// Bounding box of the panel, or `None` if it is not mounted.
    fn panel_rect(&self) -> Option<Rect>;

    /// Computed transform of the panel (`matrix(...)` or `matrix3d(...)`).
    fn panel_transform(&self) -> Option<String>;

    /// Layout viewport size.
    fn viewport_size(&self) -> Size;

    /// Size of a custom container, if the drawer is rendered inside one.
    fn container_size(&self) -> Option<Size> {
        None
    }

    /// Height of the visual viewport, if the platform reports one.
    fn visual_viewport_height(&self) -> Option<f64> {
        None
    }

    /// `true` if the user has a non-empty text selection.
    fn has_text_selection(&self) -> bool {
        false
    }

    /// `true` if a text input inside the panel has focus.
    fn focused_text_input(&self) -> bool {
        false
    }

    /// `true` if a page wrapper exists for the background scale effect.
    fn has_wrapper(&self) -> bool {
        false
    }

    /// Inline background of the body, if any.
    fn body_background(&self) -> Option<String> {
        None
    }

    /// Captures the inline style of `target`.
    fn style_snapshot(&self, target: StyleTarget) -> StyleSnapshot;

    /// Restores a style captured with [`style_snapshot`](Self::style_snapshot).
    fn restore_style(&mut self, target: StyleTarget, snapshot: &StyleSnapshot);

    /// Applies the properties set in `update` to `target`.
    fn apply_style(&mut self, target: StyleTarget, update: &StyleUpdate);

    /// Toggles the panel's "being dragged" styling hook.
    fn set_dragging_marker(&mut self, _dragging: bool) {}

    /// Routes further events of `pointer_id` to the panel.
    fn capture_pointer(&mut self, _pointer_id: u64) {}
}
