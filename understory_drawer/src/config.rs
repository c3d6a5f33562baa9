// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawer configuration.

use alloc::vec::Vec;

use understory_scroll_lock::LockOptions;

use crate::direction::DrawerDirection;
use crate::snap::SnapPoint;

/// Default fraction of the visible panel a slow release must cover to close.
pub const DEFAULT_CLOSE_THRESHOLD: f64 = 0.25;

/// Default release speed, in pixels per millisecond, that counts as a flick.
pub const DEFAULT_VELOCITY_THRESHOLD: f64 = 0.4;

/// Default window after a vetoed drag during which drags stay vetoed.
pub const DEFAULT_SCROLL_LOCK_TIMEOUT_MS: u64 = 100;

/// Behavior of one drawer. Read-only while the drawer is mounted.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawerConfig {
    /// Edge the drawer slides in from.
    pub direction: DrawerDirection,
    /// Whether the user may close the drawer.
    pub dismissible: bool,
    /// Whether the rest of the page is inert while open.
    pub modal: bool,
    /// Whether this drawer is opened from inside another drawer.
    pub nested: bool,
    /// Resting positions, from most closed to most open.
    pub snap_points: Option<Vec<SnapPoint>>,
    /// Snap index from which the backdrop is fully shown; defaults to the
    /// last snap point.
    pub fade_from_index: Option<usize>,
    /// Fraction of the visible panel a slow release must cover to close.
    pub close_threshold: f64,
    /// Release speed that counts as a flick.
    pub velocity_threshold: f64,
    /// Window after a vetoed drag during which drags stay vetoed.
    pub scroll_lock_timeout_ms: u64,
    /// Shrink rather than lift the panel when the keyboard opens.
    pub fixed: bool,
    /// Only the handle starts drags.
    pub handle_only: bool,
    /// Let the dialog focus its first element on open.
    pub auto_focus: bool,
    /// Resize the panel when the keyboard opens.
    pub reposition_inputs: bool,
    /// Never jump past neighbors on fast releases.
    pub snap_to_sequential_point: bool,
    /// Skip scrollbar padding compensation while the page is locked.
    pub disable_prevent_scroll: bool,
    /// Scale the page wrapper while open.
    pub should_scale_background: bool,
    /// Paint the body black behind the scaled wrapper.
    pub set_background_color_on_scale: bool,
    /// Never touch body styles.
    pub no_body_styles: bool,
    /// Skip scroll restoration after navigating while open.
    pub prevent_scroll_restoration: bool,
    /// Snap point active when the drawer first opens.
    pub active_snap_point: Option<SnapPoint>,
    /// Offsets are measured against a custom container, not the viewport.
    pub has_custom_container: bool,
}

impl Default for DrawerConfig {
    fn default() -> Self {
        Self {
            direction: DrawerDirection::Bottom,
            dismissible: true,
            modal: true,
            nested: false,
            snap_points: None,
            fade_from_index: None,
            close_threshold: DEFAULT_CLOSE_THRESHOLD,
            velocity_threshold: DEFAULT_VELOCITY_THRESHOLD,
            scroll_lock_timeout_ms: DEFAULT_SCROLL_LOCK_TIMEOUT_MS,
            fixed: false,
            handle_only: false,
            auto_focus: false,
            reposition_inputs: true,
            snap_to_sequential_point: false,
            disable_prevent_scroll: true,
            should_scale_background: false,
            set_background_color_on_scale: true,
            no_body_styles: false,
            prevent_scroll_restoration: false,
            active_snap_point: None,
            has_custom_container: false,
        }
    }
}

impl DrawerConfig {
    /// Default configuration: a dismissible, modal bottom sheet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the edge the drawer slides in from.
    #[must_use]
    pub fn with_direction(mut self, direction: DrawerDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Sets whether the user may close the drawer.
    #[must_use]
    pub fn with_dismissible(mut self, dismissible: bool) -> Self {
        self.dismissible = dismissible;
        self
    }

    /// Sets whether the drawer is modal.
    #[must_use]
    pub fn with_modal(mut self, modal: bool) -> Self {
        self.modal = modal;
        self
    }

    /// Marks the drawer as nested inside another.
    #[must_use]
    pub fn with_nested(mut self, nested: bool) -> Self {
        self.nested = nested;
        self
    }

    /// Sets the snap points.
    #[must_use]
    pub fn with_snap_points(mut self, points: impl Into<Vec<SnapPoint>>) -> Self {
        self.snap_points = Some(points.into());
        self
    }

    /// Sets the fade-from index.
    #[must_use]
    pub fn with_fade_from_index(mut self, index: usize) -> Self {
        self.fade_from_index = Some(index);
        self
    }

    /// Sets the close threshold.
    #[must_use]
    pub fn with_close_threshold(mut self, threshold: f64) -> Self {
        self.close_threshold = threshold;
        self
    }

    /// Sets the flick velocity threshold.
    #[must_use]
    pub fn with_velocity_threshold(mut self, threshold: f64) -> Self {
        self.velocity_threshold = threshold;
        self
    }

    /// Sets the scroll lock timeout.
    #[must_use]
    pub fn with_scroll_lock_timeout(mut self, timeout_ms: u64) -> Self {
        self.scroll_lock_timeout_ms = timeout_ms;
        self
    }

    /// Sets keyboard shrink mode.
    #[must_use]
    pub fn with_fixed(mut self, fixed: bool) -> Self {
        self.fixed = fixed;
        self
    }

    /// Restricts drags to the handle.
    #[must_use]
    pub fn with_handle_only(mut self, handle_only: bool) -> Self {
        self.handle_only = handle_only;
        self
    }

    /// Sets whether opening focuses the first element.
    #[must_use]
    pub fn with_auto_focus(mut self, auto_focus: bool) -> Self {
        self.auto_focus = auto_focus;
        self
    }

    /// Sets whether the panel reflows for the keyboard.
    #[must_use]
    pub fn with_reposition_inputs(mut self, reposition: bool) -> Self {
        self.reposition_inputs = reposition;
        self
    }

    /// Sets sequential snapping.
    #[must_use]
    pub fn with_snap_to_sequential_point(mut self, sequential: bool) -> Self {
        self.snap_to_sequential_point = sequential;
        self
    }

    /// Sets whether scrollbar compensation is skipped.
    #[must_use]
    pub fn with_disable_prevent_scroll(mut self, disable: bool) -> Self {
        self.disable_prevent_scroll = disable;
        self
    }

    /// Enables the background scale effect.
    #[must_use]
    pub fn with_scale_background(mut self, scale: bool) -> Self {
        self.should_scale_background = scale;
        self
    }

    /// Sets whether the body is painted behind the scaled wrapper.
    #[must_use]
    pub fn with_background_color_on_scale(mut self, set: bool) -> Self {
        self.set_background_color_on_scale = set;
        self
    }

    /// Keeps the engine away from body styles.
    #[must_use]
    pub fn with_no_body_styles(mut self, no_body_styles: bool) -> Self {
        self.no_body_styles = no_body_styles;
        self
    }

    /// Sets whether navigation while open skips scroll restoration.
    #[must_use]
    pub fn with_prevent_scroll_restoration(mut self, prevent: bool) -> Self {
        self.prevent_scroll_restoration = prevent;
        self
    }

    /// Sets the initially active snap point.
    #[must_use]
    pub fn with_active_snap_point(mut self, point: SnapPoint) -> Self {
        self.active_snap_point = Some(point);
        self
    }

    /// Marks the drawer as rendered in a custom container.
    #[must_use]
    pub fn with_custom_container(mut self, custom: bool) -> Self {
        self.has_custom_container = custom;
        self
    }

    /// `true` when at least one snap point is configured.
    #[must_use]
    pub fn has_snap_points(&self) -> bool {
        self.snap_points.as_ref().is_some_and(|p| !p.is_empty())
    }

    /// Options passed to the viewport lock.
    #[must_use]
    pub fn lock_options(&self) -> LockOptions {
        LockOptions {
            no_body_styles: self.no_body_styles,
            disable_prevent_scroll: self.disable_prevent_scroll,
            prevent_scroll_restoration: self.prevent_scroll_restoration,
        }
    }
}
