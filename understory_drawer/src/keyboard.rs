// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Panel resizing while a virtual keyboard covers part of the viewport.

use crate::scale::WINDOW_TOP_OFFSET;

/// Change in the layout/visual viewport gap treated as the keyboard
/// appearing or disappearing.
pub const KEYBOARD_TOGGLE_DELTA: f64 = 60.0;

/// Fraction of the layout viewport above which a panel counts as tall.
const TALL_PANEL_FRACTION: f64 = 0.8;

/// Viewport and panel measurements at the time of a visual viewport resize.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportMetrics {
    /// Layout viewport height.
    pub layout_height: f64,
    /// Visual viewport height.
    pub visual_height: f64,
    /// Current panel height.
    pub panel_height: f64,
    /// Distance from the viewport top to the panel top.
    pub panel_top: f64,
}

/// Drawer state the reflow depends on.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ReflowOptions {
    /// Shrink the panel instead of lifting it.
    pub fixed: bool,
    /// Offset of the active snap point, when it is past the first one.
    pub active_offset: Option<f64>,
    /// The drawer has snap points.
    pub has_snap_points: bool,
    /// Mobile Firefox reports its own viewport; skip the height reset.
    pub mobile_firefox: bool,
}

/// Panel geometry to apply after a reflow.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanelResize {
    /// New panel height, or `None` to leave it alone.
    pub height: Option<f64>,
    /// New `bottom` offset.
    pub bottom: f64,
}

/// Tracks whether the keyboard is open across visual viewport resizes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct KeyboardReflow {
    is_open: bool,
    previous_diff: f64,
    initial_panel_height: Option<f64>,
}

impl KeyboardReflow {
    /// Creates a tracker that assumes the keyboard is closed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` while the keyboard is believed to be open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Forgets the open keyboard, e.g. after the user taps outside.
    pub fn close(&mut self) {
        self.is_open = false;
    }

    /// Computes the panel geometry for a visual viewport resize.
    pub fn on_resize(&mut self, metrics: &ViewportMetrics, options: &ReflowOptions) -> PanelResize {
        let ViewportMetrics {
            layout_height,
            visual_height,
            panel_height,
            panel_top,
        } = *metrics;

        let mut diff = layout_height - visual_height;
        let is_tall = panel_height > layout_height * TALL_PANEL_FRACTION;
        let initial_height = *self.initial_panel_height.get_or_insert(panel_height);

        if (self.previous_diff - diff).abs() > KEYBOARD_TOGGLE_DELTA {
            self.is_open = !self.is_open;
        }
        if let Some(offset) = options.active_offset {
            diff += offset;
        }
        self.previous_diff = diff;

        let height = if panel_height > visual_height || self.is_open {
            let mut fitted = panel_height;
            if panel_height > visual_height {
                fitted = visual_height - if is_tall { panel_top } else { WINDOW_TOP_OFFSET };
            }
            Some(if options.fixed {
                panel_height - diff.max(0.0)
            } else {
                fitted.max(visual_height - panel_top)
            })
        } else if !options.mobile_firefox {
            Some(initial_height)
        } else {
            None
        };

        let bottom = if options.has_snap_points && !self.is_open {
            0.0
        } else {
            diff.max(0.0)
        };
        PanelResize { height, bottom }
    }
}
