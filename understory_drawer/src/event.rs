// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Notifications a drawer queues for its host.

use kurbo::Size;

use crate::snap::SnapPoint;

/// Something the host may want to react to.
///
/// Events are queued on the drawer and drained with
/// [`Drawer::drain_events`](crate::Drawer::drain_events).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawerEvent {
    /// The open state changed.
    OpenChanged(bool),
    /// A different snap point became active.
    ActiveSnapPointChanged(Option<SnapPoint>),
    /// The viewport was resized and offsets recomputed.
    ViewportResized(Size),
    /// The panel moved under the pointer; `percentage` is 0 fully shown,
    /// 1 fully dismissed. Parents use it to track nested drags.
    Drag {
        /// Drag progress toward closed.
        percentage: f64,
    },
    /// A drag ended.
    Release {
        /// Whether the drawer stays open.
        open: bool,
    },
    /// The drawer started closing.
    Close,
    /// An open or close transition finished.
    AnimationEnd {
        /// Open state the transition ended in.
        open: bool,
    },
}

/// What a pointer release did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// No drag was in progress, or the release was vetoed.
    Ignored,
    /// The panel returned to its rest position.
    Reset,
    /// The drawer closed.
    Closed,
    /// The panel snapped to the snap point at this index.
    Snapped(usize),
}

/// Answer to an interaction outside the panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutsideInteraction {
    /// Suppress the dialog's default dismissal.
    PreventDefault,
    /// Let the dialog dismiss the drawer.
    Dismiss,
}
