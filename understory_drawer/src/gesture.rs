// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture phases and the swipe-start gate.
//!
//! A drag is a linear sequence: press, zero or more moves, release. The
//! phase makes the illegal combinations unrepresentable: a move while
//! [`GesturePhase::Idle`] has nothing to act on, and the post-release guard
//! cannot overlap an active drag.

use kurbo::{Point, Size};

use crate::direction::DrawerDirection;
use crate::pointer::PointerType;

/// What was recorded when the pointer went down on the panel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PressRecord {
    /// Pointer coordinate along the drag axis.
    pub pointer_start: f64,
    /// Press time in milliseconds.
    pub started_at: u64,
    /// Panel size at press time.
    pub panel_size: Size,
}

/// Phase of the current pointer gesture.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum GesturePhase {
    /// No pointer is down on the panel.
    #[default]
    Idle,
    /// Pressed, but no move has passed the drag gate yet.
    PressedPending(PressRecord),
    /// The drag gate accepted a move; the panel follows the pointer until
    /// release.
    Dragging(PressRecord),
    /// A fast release just ended; acts like [`Idle`](Self::Idle) for moves.
    Releasing {
        /// End of the guard window, in milliseconds.
        until: u64,
    },
}

impl GesturePhase {
    /// The press record while a pointer is down.
    #[must_use]
    pub fn press(&self) -> Option<&PressRecord> {
        match self {
            Self::PressedPending(press) | Self::Dragging(press) => Some(press),
            Self::Idle | Self::Releasing { .. } => None,
        }
    }

    /// `true` while a pointer is down on the panel.
    #[must_use]
    pub fn is_pressed(&self) -> bool {
        self.press().is_some()
    }

    /// `true` once the drag gate has accepted a move.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging(_))
    }

    /// `true` during the post-release guard.
    #[must_use]
    pub fn is_releasing(&self) -> bool {
        matches!(self, Self::Releasing { .. })
    }
}

/// Decides whether a content move is a swipe of the panel.
///
/// Small moves are ambiguous: a finger resting on a scroll area wobbles. The
/// gate lets through moves toward open at once, moves toward close only while
/// they run along the drag axis, and latches open once the pointer has moved
/// past the threshold.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SwipeGate {
    start: Option<Point>,
    latched: bool,
}

impl SwipeGate {
    /// Creates an idle gate.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a gesture at `position`.
    pub fn begin(&mut self, position: Point) {
        self.start = Some(position);
        self.latched = false;
    }

    /// Ends the gesture.
    pub fn reset(&mut self) {
        self.start = None;
        self.latched = false;
    }

    /// `true` while a gesture is being tracked.
    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.start.is_some()
    }

    /// Returns `true` if the move to `position` should drive the panel.
    ///
    /// A rejected move that left the threshold ends tracking for the rest of
    /// the gesture.
    pub fn accept(
        &mut self,
        position: Point,
        pointer_type: PointerType,
        direction: DrawerDirection,
    ) -> bool {
        let Some(start) = self.start else {
            return false;
        };
        if self.latched {
            return true;
        }
        let delta = position - start;
        let threshold = pointer_type.swipe_start_threshold();
        let mostly_horizontal = delta.x.abs() > delta.y.abs();
        let (along, along_axis) = if direction.is_vertical() {
            (delta.y, !mostly_horizontal)
        } else {
            (delta.x, mostly_horizontal)
        };
        let toward_open = along * direction.close_sign() < 0.0;

        if !toward_open && along.abs() <= threshold {
            if !along_axis && (delta.x.abs() > threshold || delta.y.abs() > threshold) {
                self.start = None;
            }
            return along_axis;
        }
        self.latched = true;
        true
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Size};

    use super::{GesturePhase, PressRecord, SwipeGate};
    use crate::direction::DrawerDirection;
    use crate::pointer::PointerType;

    #[test]
    fn phase_accessors() {
        let press = PressRecord {
            pointer_start: 10.0,
            started_at: 0,
            panel_size: Size::new(100.0, 100.0),
        };
        assert!(!GesturePhase::Idle.is_pressed());
        assert!(GesturePhase::PressedPending(press).is_pressed());
        assert!(!GesturePhase::PressedPending(press).is_dragging());
        assert!(GesturePhase::Dragging(press).is_dragging());
        assert!(GesturePhase::Releasing { until: 5 }.is_releasing());
        assert!(GesturePhase::Releasing { until: 5 }.press().is_none());
    }

    #[test]
    fn small_sideways_wobble_is_ignored_then_abandons() {
        let mut gate = SwipeGate::new();
        gate.begin(Point::new(100.0, 100.0));
        // Downward (toward close) but mostly sideways, inside the touch threshold.
        assert!(!gate.accept(
            Point::new(106.0, 103.0),
            PointerType::Touch,
            DrawerDirection::Bottom
        ));
        assert!(gate.is_tracking());
        // Sideways past the threshold: the gesture is a horizontal scroll.
        assert!(!gate.accept(
            Point::new(130.0, 103.0),
            PointerType::Touch,
            DrawerDirection::Bottom
        ));
        assert!(!gate.is_tracking());
        assert!(!gate.accept(
            Point::new(100.0, 200.0),
            PointerType::Touch,
            DrawerDirection::Bottom
        ));
    }

    #[test]
    fn toward_open_passes_at_once_and_latches() {
        let mut gate = SwipeGate::new();
        gate.begin(Point::new(0.0, 500.0));
        assert!(gate.accept(
            Point::new(0.0, 499.0),
            PointerType::Mouse,
            DrawerDirection::Bottom
        ));
        // Latched: even a sideways wobble now passes.
        assert!(gate.accept(
            Point::new(5.0, 500.0),
            PointerType::Mouse,
            DrawerDirection::Bottom
        ));
    }

    #[test]
    fn horizontal_drawers_use_x() {
        let mut gate = SwipeGate::new();
        gate.begin(Point::new(50.0, 50.0));
        // Toward close for a left drawer is leftward.
        assert!(gate.accept(
            Point::new(49.0, 50.0),
            PointerType::Mouse,
            DrawerDirection::Left
        ));
        gate.begin(Point::new(50.0, 50.0));
        assert!(!gate.accept(
            Point::new(49.0, 52.0),
            PointerType::Mouse,
            DrawerDirection::Left
        ));
    }
}
