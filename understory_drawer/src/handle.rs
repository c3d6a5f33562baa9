// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drag handle.
//!
//! A tap on the handle cycles through snap points; a long press cancels the
//! tap so the user can drag without the panel jumping on release.

use tracing::trace;
use understory_timing::TimerQueue;

use crate::drawer::Drawer;
use crate::host::DrawerHost;
use crate::pointer::PointerInput;

/// Press duration after which a tap no longer cycles.
pub const LONG_HANDLE_PRESS_MS: u64 = 250;

/// Delay between a click and the cycle, so a double click can be told apart.
pub const DOUBLE_TAP_MS: u64 = 120;

/// Deferred work the handle schedules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HandleTimer {
    /// The press became a long press.
    LongPress,
    /// Advance to the next snap point.
    Cycle,
}

/// Tap and long-press tracking for a drawer's drag handle.
#[derive(Debug, Default)]
pub struct DrawerHandle {
    timers: TimerQueue<HandleTimer>,
    should_cancel_interaction: bool,
    prevent_cycle: bool,
}

impl DrawerHandle {
    /// Creates an idle handle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a handle whose taps never cycle snap points.
    #[must_use]
    pub fn with_prevent_cycle(mut self, prevent: bool) -> Self {
        self.prevent_cycle = prevent;
        self
    }

    /// `true` once the current press has become a long press.
    #[must_use]
    pub fn is_long_press(&self) -> bool {
        self.should_cancel_interaction
    }

    /// Earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.next_deadline()
    }

    /// Pointer down on the handle.
    ///
    /// With `handle_only` the press also starts a drawer gesture.
    pub fn pointer_down<H: DrawerHost + ?Sized>(
        &mut self,
        input: &PointerInput,
        drawer: &mut Drawer,
        host: &mut H,
    ) {
        if drawer.config().handle_only {
            drawer.on_press(input, host);
        }
        self.timers
            .schedule_after(HandleTimer::LongPress, input.time_ms, LONG_HANDLE_PRESS_MS);
    }

    /// Pointer move over the handle.
    pub fn pointer_move<H: DrawerHost + ?Sized>(
        &mut self,
        input: &PointerInput,
        drawer: &mut Drawer,
        host: &mut H,
    ) {
        if drawer.config().handle_only {
            drawer.on_drag(input, host);
        }
    }

    /// Pointer cancelled; forgets the press and any pending cycle.
    pub fn pointer_cancel(&mut self) {
        self.timers.clear();
        self.should_cancel_interaction = false;
    }

    /// Click on the handle. Schedules a cycle unless the press was long.
    pub fn click(&mut self, now: u64) {
        if self.should_cancel_interaction {
            self.pointer_cancel();
            return;
        }
        self.timers
            .schedule_after(HandleTimer::Cycle, now, DOUBLE_TAP_MS);
    }

    /// Runs due timers.
    pub fn tick<H: DrawerHost + ?Sized>(&mut self, now: u64, drawer: &mut Drawer, host: &mut H) {
        while let Some(timer) = self.timers.pop_due(now) {
            match timer {
                HandleTimer::LongPress => self.should_cancel_interaction = true,
                HandleTimer::Cycle => self.cycle(now, drawer, host),
            }
        }
    }

    fn cycle<H: DrawerHost + ?Sized>(&mut self, now: u64, drawer: &mut Drawer, host: &mut H) {
        if drawer.is_dragging() || self.prevent_cycle || self.should_cancel_interaction {
            self.pointer_cancel();
            return;
        }
        self.pointer_cancel();

        let dismissible = drawer.config().dismissible;
        let snap = drawer.snap_points();
        if snap.is_empty() {
            if !dismissible {
                drawer.close(now, host);
            }
            return;
        }
        if snap.is_last_snap_point() && dismissible {
            drawer.close(now, host);
            return;
        }
        let Some(index) = snap.active_index() else {
            return;
        };
        let next = index + 1;
        if next < snap.points().len() {
            trace!(from = index, to = next, "handle cycling snap point");
            drawer.snap_to(next, now, host);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DrawerHandle, HandleTimer};

    #[test]
    fn click_after_long_press_cancels() {
        let mut handle = DrawerHandle::new();
        handle.timers.schedule(HandleTimer::LongPress, 250);
        handle.should_cancel_interaction = true;
        handle.click(300);
        assert!(!handle.is_long_press());
        assert_eq!(handle.next_deadline(), None);
    }

    #[test]
    fn click_schedules_a_cycle() {
        let mut handle = DrawerHandle::new();
        handle.click(1_000);
        assert_eq!(handle.next_deadline(), Some(1_120));
        // A second click replaces the pending cycle.
        handle.click(1_050);
        assert_eq!(handle.next_deadline(), Some(1_170));
    }
}
