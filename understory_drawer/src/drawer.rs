// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drawer controller.
//!
//! [`Drawer`] owns one drawer's session: open state, the gesture phase, the
//! snap point table, and pending timers. Hosts forward pointer, viewport and
//! dialog callbacks to it and call [`Drawer::tick`] when
//! [`Drawer::next_deadline`] passes.

use alloc::vec::Vec;
use core::mem;

use kurbo::Size;
use tracing::{debug, trace};
use understory_scroll_lock::LockOutcome;
use understory_timing::TimerQueue;

use crate::config::DrawerConfig;
use crate::event::{DrawerEvent, OutsideInteraction, ReleaseOutcome};
use crate::geometry::{damp, parse_translate};
use crate::gesture::{GesturePhase, PressRecord, SwipeGate};
use crate::host::DrawerHost;
use crate::keyboard::{KeyboardReflow, ReflowOptions, ViewportMetrics};
use crate::pointer::{PointerInput, TargetPath};
use crate::registry::{DrawerId, SharedEnvironment};
use crate::scale::BackgroundScale;
use crate::snap::{ReleaseInput, SnapPoint, SnapPoints, SnapRelease, SnapTarget};
use crate::style::{
    StyleSnapshot, StyleTarget, StyleUpdate, TRANSITION_DURATION_MS, Transform, Transition,
};

/// Time after opening during which drags are left to content scrolling.
pub const OPEN_DRAG_SUPPRESSION_MS: u64 = 500;

/// Length of the guard after a fast release.
pub const RELEASE_GUARD_MS: u64 = 200;

/// Release speed above which the post-release guard starts.
pub const RELEASE_GUARD_VELOCITY: f64 = 0.05;

/// Delay before checking whether the browser toolbar changed the viewport.
pub const TOOLBAR_CHECK_MS: u64 = 300;

/// Delay before a non-modal drawer gives the page its scrolling back.
pub const NON_MODAL_UNLOCK_MS: u64 = 500;

/// Displacement of a parent drawer while a nested drawer is open, in pixels.
pub const NESTED_DISPLACEMENT: f64 = 16.0;

/// Approximate length of one animation frame.
pub const FRAME_MS: u64 = 16;

/// Deferred work a drawer schedules for itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DrawerTimer {
    /// The close transition finished.
    CloseFinished,
    /// The post-release guard ended.
    JustReleased,
    /// Drop the transition from the parent transform after a nested close.
    NestedRestore,
    /// A non-modal drawer hands scrolling back to the page.
    RestoreNonModalLock,
    /// Compensate the viewport lock for the browser toolbar.
    ToolbarCheck,
    /// An open (`true`) or close (`false`) transition finished.
    AnimationEnd(bool),
    /// Restore the body background painted behind the scaled wrapper.
    BodyBackgroundRestore,
    /// Restore the body's inline style.
    BodyStyleRestore,
    /// The first frame after mounting or opening.
    Frame,
}

/// One drawer's interaction state.
#[derive(Debug)]
pub struct Drawer {
    config: DrawerConfig,
    id: DrawerId,
    env: SharedEnvironment,
    open: bool,
    visible: bool,
    has_been_opened: bool,
    should_animate: bool,
    delayed_snap_points: bool,
    open_time: Option<u64>,
    last_time_drag_prevented: Option<u64>,
    drag_end: Option<u64>,
    phase: GesturePhase,
    snap: SnapPoints,
    timers: TimerQueue<DrawerTimer>,
    events: Vec<DrawerEvent>,
    keyboard: KeyboardReflow,
    scale: BackgroundScale,
    gate: SwipeGate,
    last_pointer: Option<PointerInput>,
    body_snapshot: Option<StyleSnapshot>,
}

impl Drawer {
    /// Creates a closed drawer registered with `env`.
    ///
    /// Snap offsets are measured against the host's custom container, or the
    /// viewport when there is none.
    pub fn new<H: DrawerHost + ?Sized>(
        config: DrawerConfig,
        env: SharedEnvironment,
        host: &H,
    ) -> Self {
        let id = env.borrow_mut().next_id();
        let container = host.container_size().unwrap_or_else(|| host.viewport_size());
        let snap = SnapPoints::new(
            config.snap_points.clone().unwrap_or_default(),
            config.fade_from_index,
            config.direction,
            container,
        )
        .with_sequential(config.snap_to_sequential_point);
        let scale = BackgroundScale::new(config.direction);
        Self {
            config,
            id,
            env,
            open: false,
            visible: false,
            has_been_opened: false,
            should_animate: true,
            delayed_snap_points: false,
            open_time: None,
            last_time_drag_prevented: None,
            drag_end: None,
            phase: GesturePhase::Idle,
            snap,
            timers: TimerQueue::new(),
            events: Vec::new(),
            keyboard: KeyboardReflow::new(),
            scale,
            gate: SwipeGate::new(),
            last_pointer: None,
            body_snapshot: None,
        }
    }

    /// This drawer's id within its environment.
    #[must_use]
    pub fn id(&self) -> DrawerId {
        self.id
    }

    /// The configuration the drawer was created with.
    #[must_use]
    pub fn config(&self) -> &DrawerConfig {
        &self.config
    }

    /// `true` while open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// `true` from opening until the close transition finished.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// `true` once the drawer has been opened at least once.
    #[must_use]
    pub fn has_been_opened(&self) -> bool {
        self.has_been_opened
    }

    /// Current gesture phase.
    #[must_use]
    pub fn phase(&self) -> &GesturePhase {
        &self.phase
    }

    /// `true` while a pointer is down on the panel.
    #[must_use]
    pub fn is_pressed(&self) -> bool {
        self.phase.is_pressed()
    }

    /// `true` once the current gesture moves the panel.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.phase.is_dragging()
    }

    /// Snap point table and active point.
    #[must_use]
    pub fn snap_points(&self) -> &SnapPoints {
        &self.snap
    }

    /// Active snap point.
    #[must_use]
    pub fn active_snap_point(&self) -> Option<SnapPoint> {
        self.snap.active()
    }

    /// `true` while the virtual keyboard is believed open.
    #[must_use]
    pub fn keyboard_is_open(&self) -> bool {
        self.keyboard.is_open()
    }

    /// `true` once transitions should run.
    #[must_use]
    pub fn should_animate(&self) -> bool {
        self.should_animate
    }

    /// `true` one frame after opening with snap points.
    #[must_use]
    pub fn delayed_snap_points(&self) -> bool {
        self.delayed_snap_points
    }

    /// `true` while the page behind the drawer should neither scroll nor
    /// refocus inputs.
    ///
    /// Off while dragging, during the post-release guard, for non-modal
    /// drawers, and when input repositioning is disabled.
    #[must_use]
    pub fn prevents_scroll(&self) -> bool {
        self.open
            && self.has_been_opened
            && self.config.modal
            && self.config.reposition_inputs
            && self.config.disable_prevent_scroll
            && !self.phase.is_dragging()
            && !self.phase.is_releasing()
    }

    /// Time of the last open, or of the last snap to the most open point.
    #[must_use]
    pub fn open_time(&self) -> Option<u64> {
        self.open_time
    }

    /// Time the last drag ended.
    #[must_use]
    pub fn drag_end_time(&self) -> Option<u64> {
        self.drag_end
    }

    /// Earliest pending timer deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.next_deadline()
    }

    /// `true` if `timer` is scheduled.
    #[must_use]
    pub fn is_pending(&self, timer: DrawerTimer) -> bool {
        self.timers.is_pending(&timer)
    }

    /// Takes the queued events.
    pub fn drain_events(&mut self) -> Vec<DrawerEvent> {
        mem::take(&mut self.events)
    }

    fn has_snap_points(&self) -> bool {
        !self.snap.is_empty()
    }

    fn current_translate<H: DrawerHost + ?Sized>(&self, host: &H) -> Option<f64> {
        parse_translate(&host.panel_transform()?, self.config.direction)
    }

    fn set_panel<H: DrawerHost + ?Sized>(&self, host: &mut H, update: StyleUpdate) {
        host.apply_style(StyleTarget::Panel, &update);
    }

    fn set_overlay<H: DrawerHost + ?Sized>(&self, host: &mut H, update: StyleUpdate) {
        host.apply_style(StyleTarget::Overlay, &update);
    }

    fn schedule(&mut self, timer: DrawerTimer, now: u64, delay: u64) {
        self.timers.schedule_after(timer, now, delay);
    }

    // --- Open and close ---------------------------------------------------

    /// Opens or closes the drawer.
    pub fn set_open<H: DrawerHost + ?Sized>(&mut self, open: bool, now: u64, host: &mut H) {
        if open == self.open {
            return;
        }
        if open {
            self.open_drawer(now, host);
        } else {
            self.close(now, host);
        }
    }

    /// Handles an open change requested by the dialog primitive.
    ///
    /// Returns `false` if the request was refused (closing a non-dismissible
    /// drawer).
    pub fn on_dialog_open_change<H: DrawerHost + ?Sized>(
        &mut self,
        open: bool,
        now: u64,
        host: &mut H,
    ) -> bool {
        if !self.config.dismissible && !open {
            return false;
        }
        self.set_open(open, now, host);
        true
    }

    fn open_drawer<H: DrawerHost + ?Sized>(&mut self, now: u64, host: &mut H) {
        self.open = true;
        self.visible = true;
        self.has_been_opened = true;
        self.open_time = Some(now);
        self.timers.cancel(&DrawerTimer::CloseFinished);
        self.timers.cancel(&DrawerTimer::AnimationEnd(false));
        self.timers.cancel(&DrawerTimer::BodyBackgroundRestore);
        self.env.borrow_mut().registry.register(self.id, now);
        self.events.push(DrawerEvent::OpenChanged(true));
        debug!(id = self.id.0, "drawer opened");

        if !self.config.nested {
            self.timers.cancel(&DrawerTimer::BodyStyleRestore);
            if self.body_snapshot.is_none() {
                self.body_snapshot = Some(host.style_snapshot(StyleTarget::Body));
            }
            self.acquire_lock(now, host);
        }
        self.schedule(DrawerTimer::AnimationEnd(true), now, TRANSITION_DURATION_MS);

        if self.config.should_scale_background {
            let set_background =
                self.config.set_background_color_on_scale && !self.config.no_body_styles;
            self.scale.enter(set_background, host);
        }

        let container = host.container_size().unwrap_or_else(|| host.viewport_size());
        self.snap.set_container(container);
        if self.has_snap_points() {
            let index = self
                .snap
                .active_index()
                .or_else(|| {
                    let initial = self.config.active_snap_point?;
                    self.snap.points().iter().position(|p| *p == initial)
                })
                .unwrap_or(0);
            self.snap_to(index, now, host);
            self.schedule(DrawerTimer::Frame, now, FRAME_MS);
        } else {
            self.set_panel(
                host,
                StyleUpdate::new()
                    .with_transform(Transform::Identity)
                    .with_transition(Transition::Transform),
            );
            self.set_overlay(
                host,
                StyleUpdate::new()
                    .with_opacity(1.0)
                    .with_transition(Transition::Opacity),
            );
        }
    }

    fn acquire_lock<H: DrawerHost + ?Sized>(&mut self, now: u64, host: &mut H) {
        if !host.platform().standalone {
            let options = self.config.lock_options();
            let outcome = self.env.borrow_mut().lock.acquire(self.id, &options, host);
            if outcome == LockOutcome::Acquired {
                self.schedule(DrawerTimer::ToolbarCheck, now, TOOLBAR_CHECK_MS);
            }
        }
        if !self.config.modal {
            self.schedule(DrawerTimer::RestoreNonModalLock, now, NON_MODAL_UNLOCK_MS);
        }
    }

    fn release_lock<H: DrawerHost + ?Sized>(&mut self, host: &mut H) {
        let options = self.config.lock_options();
        self.env.borrow_mut().lock.release(&self.id, &options, host);
    }

    /// Closes the drawer: the panel slides off-screen, the backdrop fades,
    /// the page lock and background effect are undone.
    pub fn close<H: DrawerHost + ?Sized>(&mut self, now: u64, host: &mut H) {
        if !self.open {
            return;
        }
        if self.phase.is_pressed() {
            host.set_dragging_marker(false);
            self.phase = GesturePhase::Idle;
            self.drag_end = Some(now);
        }
        self.gate.reset();
        self.open = false;
        self.events.push(DrawerEvent::Close);
        self.events.push(DrawerEvent::OpenChanged(false));
        self.env.borrow_mut().registry.unregister(self.id);
        debug!(id = self.id.0, "drawer closing");

        if !self.config.nested {
            self.timers.cancel(&DrawerTimer::ToolbarCheck);
            self.timers.cancel(&DrawerTimer::RestoreNonModalLock);
            self.release_lock(host);
            self.schedule(DrawerTimer::BodyStyleRestore, now, TRANSITION_DURATION_MS);
        }
        self.timers.cancel(&DrawerTimer::AnimationEnd(true));
        self.timers.cancel(&DrawerTimer::Frame);
        self.schedule(DrawerTimer::AnimationEnd(false), now, TRANSITION_DURATION_MS);
        self.schedule(DrawerTimer::CloseFinished, now, TRANSITION_DURATION_MS);

        let direction = self.config.direction;
        let off_screen = direction.close_sign() * direction.axis_extent(host.viewport_size());
        self.set_panel(
            host,
            StyleUpdate::new()
                .with_transform(Transform::translate(direction, off_screen))
                .with_transition(Transition::Transform),
        );
        self.set_overlay(
            host,
            StyleUpdate::new()
                .with_opacity(0.0)
                .with_transition(Transition::Opacity),
        );
        if self.scale.exit(host) {
            self.schedule(DrawerTimer::BodyBackgroundRestore, now, TRANSITION_DURATION_MS);
        }
    }

    /// Animates the panel back to its rest position.
    pub fn reset<H: DrawerHost + ?Sized>(&mut self, host: &mut H) {
        let swipe = self.current_translate(host);
        self.set_panel(
            host,
            StyleUpdate::new()
                .with_transform(Transform::Identity)
                .with_transition(Transition::Transform),
        );
        self.set_overlay(
            host,
            StyleUpdate::new()
                .with_opacity(1.0)
                .with_transition(Transition::Opacity),
        );
        let displaced = swipe.is_some_and(|s| self.config.direction.is_displaced_toward_close(s));
        if self.config.should_scale_background && displaced && self.open {
            self.scale.reapply(host);
        }
    }

    // --- Snap points ------------------------------------------------------

    fn apply_snap<H: DrawerHost + ?Sized>(
        &mut self,
        target: SnapTarget,
        previous: Option<SnapPoint>,
        now: u64,
        host: &mut H,
    ) {
        if target.is_last {
            self.open_time = Some(now);
        }
        self.set_panel(
            host,
            StyleUpdate::new()
                .with_transform(Transform::translate(self.config.direction, target.offset))
                .with_transition(Transition::Transform),
        );
        self.set_overlay(
            host,
            StyleUpdate::new()
                .with_opacity(target.overlay_opacity)
                .with_transition(Transition::Opacity),
        );
        let active = self.snap.active();
        if active != previous {
            self.events.push(DrawerEvent::ActiveSnapPointChanged(active));
        }
        trace!(index = target.index, offset = target.offset, "snapped");
    }

    /// Animates to the snap point at `index`.
    pub fn snap_to<H: DrawerHost + ?Sized>(
        &mut self,
        index: usize,
        now: u64,
        host: &mut H,
    ) -> Option<SnapTarget> {
        let previous = self.snap.active();
        let target = self.snap.snap_to_index(index)?;
        self.apply_snap(target, previous, now, host);
        Some(target)
    }

    /// Makes `point` active, animating to it if it is one of the configured
    /// snap points. Returns `true` if the panel moved.
    pub fn set_active_snap_point<H: DrawerHost + ?Sized>(
        &mut self,
        point: SnapPoint,
        now: u64,
        host: &mut H,
    ) -> bool {
        let Some(index) = self.snap.points().iter().position(|p| *p == point) else {
            return false;
        };
        self.snap_to(index, now, host).is_some()
    }

    // --- Gestures ---------------------------------------------------------

    /// Starts a gesture. Returns `true` if the press was accepted.
    pub fn on_press<H: DrawerHost + ?Sized>(&mut self, input: &PointerInput, host: &mut H) -> bool {
        if !self.config.dismissible && !self.has_snap_points() {
            return false;
        }
        if !input.target.is_inside_panel() {
            return false;
        }
        let panel_size = host.panel_rect().map_or(Size::ZERO, |r| r.size());
        self.phase = GesturePhase::PressedPending(PressRecord {
            pointer_start: self.config.direction.axis_coordinate(input.position),
            started_at: input.time_ms,
            panel_size,
        });
        host.capture_pointer(input.pointer_id);
        self.last_pointer = Some(input.clone());
        true
    }

    /// Decides whether a move over `target` may drag the panel.
    ///
    /// `toward_open` is the direction of the move. Vetoes that leave room for
    /// content scrolling refresh the scroll lock window.
    pub fn should_drag<H: DrawerHost + ?Sized>(
        &mut self,
        target: &TargetPath,
        toward_open: bool,
        now: u64,
        host: &H,
    ) -> bool {
        if target.target().is_some_and(|n| n.is_select) || target.is_no_drag() {
            return false;
        }
        if !self.config.direction.is_vertical() {
            return true;
        }
        if self
            .open_time
            .is_some_and(|t| now.saturating_sub(t) < OPEN_DRAG_SUPPRESSION_MS)
        {
            return false;
        }
        let swipe = self.current_translate(host);
        if swipe.is_some_and(|s| self.config.direction.is_displaced_toward_close(s)) {
            return true;
        }
        if host.has_text_selection() {
            return false;
        }
        if swipe == Some(0.0)
            && self
                .last_time_drag_prevented
                .is_some_and(|t| now.saturating_sub(t) < self.config.scroll_lock_timeout_ms)
        {
            self.last_time_drag_prevented = Some(now);
            return false;
        }
        if toward_open {
            self.last_time_drag_prevented = Some(now);
            return false;
        }
        for node in target.iter() {
            if node.scrollable && node.scroll_top != 0.0 {
                self.last_time_drag_prevented = Some(now);
                return false;
            }
            if node.is_dialog || node.is_panel_root {
                return true;
            }
        }
        true
    }

    /// Moves the panel with the pointer.
    pub fn on_drag<H: DrawerHost + ?Sized>(&mut self, input: &PointerInput, host: &mut H) {
        self.last_pointer = Some(input.clone());
        let Some(press) = self.phase.press().copied() else {
            return;
        };
        let direction = self.config.direction;
        let has_snap = self.has_snap_points();
        let dragged =
            (press.pointer_start - direction.axis_coordinate(input.position)) * direction.close_sign();
        let toward_open = dragged > 0.0;

        let close_vetoed = has_snap && !self.config.dismissible && !toward_open;
        if close_vetoed && self.snap.active_index() == Some(0) {
            return;
        }

        let abs_dragged = dragged.abs();
        let panel_extent = direction.axis_extent(press.panel_size);
        let mut percentage = if panel_extent > 0.0 {
            abs_dragged / panel_extent
        } else {
            0.0
        };
        if let Some(snap_percentage) = self.snap.percentage_dragged(abs_dragged, toward_open) {
            percentage = snap_percentage;
        }
        if close_vetoed && percentage >= 1.0 {
            return;
        }

        if !self.phase.is_dragging() {
            if !self.should_drag(&input.target, toward_open, input.time_ms, host) {
                return;
            }
            host.set_dragging_marker(true);
            self.phase = GesturePhase::Dragging(press);
        }
        self.set_panel(host, StyleUpdate::new().with_transition(Transition::None));
        self.set_overlay(host, StyleUpdate::new().with_transition(Transition::None));

        if has_snap && let Some(offset) = self.snap.drag_offset(dragged) {
            self.set_panel(
                host,
                StyleUpdate::new().with_transform(Transform::translate(direction, offset)),
            );
        }

        if toward_open && !has_snap {
            let translate = (-damp(dragged)).min(0.0) * direction.close_sign();
            self.set_panel(
                host,
                StyleUpdate::new().with_transform(Transform::translate(direction, translate)),
            );
            return;
        }

        if self.snap.should_fade() || self.snap.is_overlay_snap_point() {
            self.events.push(DrawerEvent::Drag { percentage });
            self.set_overlay(
                host,
                StyleUpdate::new()
                    .with_opacity(1.0 - percentage)
                    .with_transition(Transition::None),
            );
        }

        if self.config.should_scale_background && self.scale.is_active() {
            self.scale.interpolate(percentage, host);
        }

        if !has_snap {
            self.set_panel(
                host,
                StyleUpdate::new().with_transform(Transform::translate(
                    direction,
                    abs_dragged * direction.close_sign(),
                )),
            );
        }
    }

    /// Ends a gesture and decides where the panel goes.
    ///
    /// `input` is the pointer event that ended the gesture, if there is one.
    pub fn on_release<H: DrawerHost + ?Sized>(
        &mut self,
        input: Option<&PointerInput>,
        now: u64,
        host: &mut H,
    ) -> ReleaseOutcome {
        let Some(press) = self.phase.press().copied() else {
            return ReleaseOutcome::Ignored;
        };
        host.set_dragging_marker(false);
        self.phase = GesturePhase::Idle;
        self.drag_end = Some(now);

        let swipe = self.current_translate(host);
        let Some(input) = input else {
            return ReleaseOutcome::Ignored;
        };
        if !self.should_drag(&input.target, false, now, host) {
            return ReleaseOutcome::Ignored;
        }
        let Some(swipe) = swipe.filter(|s| *s != 0.0) else {
            return ReleaseOutcome::Ignored;
        };

        let direction = self.config.direction;
        let elapsed = now.saturating_sub(press.started_at).max(1);
        let moved = press.pointer_start - direction.axis_coordinate(input.position);
        let velocity = moved.abs() / elapsed as f64;

        if velocity > RELEASE_GUARD_VELOCITY {
            self.phase = GesturePhase::Releasing {
                until: now + RELEASE_GUARD_MS,
            };
            self.schedule(DrawerTimer::JustReleased, now, RELEASE_GUARD_MS);
        }

        if self.has_snap_points() {
            return self.release_to_snap_point(moved * direction.close_sign(), velocity, now, host);
        }

        let outcome = if moved * direction.close_sign() > 0.0 {
            self.reset(host);
            ReleaseOutcome::Reset
        } else if velocity > self.config.velocity_threshold {
            self.close(now, host);
            ReleaseOutcome::Closed
        } else {
            let viewport = host.viewport_size();
            let panel = host.panel_rect().map_or(Size::ZERO, |r| r.size());
            let visible = direction
                .axis_extent(panel)
                .min(direction.axis_extent(viewport));
            if swipe.abs() >= visible * self.config.close_threshold {
                self.close(now, host);
                ReleaseOutcome::Closed
            } else {
                self.reset(host);
                ReleaseOutcome::Reset
            }
        };
        let open = outcome != ReleaseOutcome::Closed;
        self.events.push(DrawerEvent::Release { open });
        debug!(id = self.id.0, velocity, ?outcome, "released");
        outcome
    }

    fn release_to_snap_point<H: DrawerHost + ?Sized>(
        &mut self,
        dragged: f64,
        velocity: f64,
        now: u64,
        host: &mut H,
    ) -> ReleaseOutcome {
        if self.snap.is_overlay_snap_point() {
            self.set_overlay(host, StyleUpdate::new().with_transition(Transition::Opacity));
        }
        let input = ReleaseInput {
            dragged,
            velocity,
            velocity_threshold: self.config.velocity_threshold,
            dismissible: self.config.dismissible,
            viewport_extent: self.config.direction.axis_extent(host.viewport_size()),
        };
        let outcome = match self.snap.release(&input) {
            None => ReleaseOutcome::Ignored,
            Some(SnapRelease::Close) => {
                self.close(now, host);
                ReleaseOutcome::Closed
            }
            Some(SnapRelease::SnapTo(index)) => match self.snap_to(index, now, host) {
                Some(target) => ReleaseOutcome::Snapped(target.index),
                None => ReleaseOutcome::Ignored,
            },
        };
        self.events.push(DrawerEvent::Release { open: self.open });
        debug!(id = self.id.0, velocity, ?outcome, "released to snap point");
        outcome
    }

    // --- Nested drawers ---------------------------------------------------

    fn nested_scale(extent: f64) -> f64 {
        if extent <= 0.0 {
            return 1.0;
        }
        (extent - NESTED_DISPLACEMENT) / extent
    }

    /// Pushes this drawer back while a nested drawer is open, and brings it
    /// forward again when the nested drawer closes.
    pub fn on_nested_open_change<H: DrawerHost + ?Sized>(
        &mut self,
        child_open: bool,
        now: u64,
        host: &mut H,
    ) {
        let width = host.viewport_size().width;
        let (scale, translate) = if child_open {
            (Self::nested_scale(width), -NESTED_DISPLACEMENT)
        } else {
            (1.0, 0.0)
        };
        self.timers.cancel(&DrawerTimer::NestedRestore);
        self.set_panel(
            host,
            StyleUpdate::new()
                .with_transition(Transition::Transform)
                .with_transform(Transform::scale_translate(
                    self.config.direction,
                    scale,
                    translate,
                )),
        );
        if !child_open {
            self.schedule(DrawerTimer::NestedRestore, now, TRANSITION_DURATION_MS);
        }
    }

    /// Follows a nested drawer's drag progress.
    pub fn on_nested_drag<H: DrawerHost + ?Sized>(&mut self, percentage: f64, host: &mut H) {
        if percentage < 0.0 {
            return;
        }
        let initial = Self::nested_scale(host.viewport_size().width);
        let scale = initial + percentage * (1.0 - initial);
        let translate = -NESTED_DISPLACEMENT + percentage * NESTED_DISPLACEMENT;
        self.set_panel(
            host,
            StyleUpdate::new()
                .with_transform(Transform::scale_translate(
                    self.config.direction,
                    scale,
                    translate,
                ))
                .with_transition(Transition::None),
        );
    }

    /// Settles after a nested drawer's drag ended.
    pub fn on_nested_release<H: DrawerHost + ?Sized>(&mut self, child_open: bool, host: &mut H) {
        if !child_open {
            return;
        }
        let extent = self.config.direction.axis_extent(host.viewport_size());
        self.set_panel(
            host,
            StyleUpdate::new()
                .with_transition(Transition::Transform)
                .with_transform(Transform::scale_translate(
                    self.config.direction,
                    Self::nested_scale(extent),
                    -NESTED_DISPLACEMENT,
                )),
        );
    }

    // --- Viewport ---------------------------------------------------------

    /// Reflows the panel when the visual viewport changes size, typically
    /// because the virtual keyboard opened or closed.
    pub fn on_visual_viewport_resize<H: DrawerHost + ?Sized>(&mut self, host: &mut H) {
        if !self.config.reposition_inputs {
            return;
        }
        if !(host.focused_text_input() || self.keyboard.is_open()) {
            return;
        }
        let (Some(rect), Some(visual_height)) = (host.panel_rect(), host.visual_viewport_height())
        else {
            return;
        };
        let metrics = ViewportMetrics {
            layout_height: host.inner_height(),
            visual_height,
            panel_height: rect.height(),
            panel_top: rect.y0,
        };
        let active_offset = self
            .snap
            .active_index()
            .filter(|i| *i > 0)
            .and_then(|i| self.snap.offsets().get(i).copied());
        let options = ReflowOptions {
            fixed: self.config.fixed,
            active_offset,
            has_snap_points: self.has_snap_points(),
            mobile_firefox: host.platform().is_mobile_firefox(),
        };
        let resize = self.keyboard.on_resize(&metrics, &options);
        let mut update = StyleUpdate::new().with_bottom(resize.bottom);
        if let Some(height) = resize.height {
            update = update.with_height(height);
        }
        self.set_panel(host, update);
        trace!(
            keyboard_open = self.keyboard.is_open(),
            bottom = resize.bottom,
            "panel reflowed"
        );
    }

    /// Recomputes snap offsets after a window resize.
    pub fn on_viewport_resize<H: DrawerHost + ?Sized>(&mut self, size: Size, now: u64, host: &mut H) {
        let container = host.container_size().unwrap_or(size);
        let recomputed = self.snap.set_container(container);
        self.events.push(DrawerEvent::ViewportResized(size));
        if recomputed
            && self.open
            && !self.phase.is_pressed()
            && let Some(index) = self.snap.active_index()
        {
            self.snap_to(index, now, host);
        }
    }

    /// Window-level `touchend`. iOS does not deliver `pointerup` after a
    /// native scroll, so the drag latch is dropped here.
    pub fn on_window_touch_end<H: DrawerHost + ?Sized>(&mut self, host: &H) {
        if !host.platform().is_ios() {
            return;
        }
        if let GesturePhase::Dragging(press) = self.phase {
            self.phase = GesturePhase::PressedPending(press);
        }
    }

    /// Tears the drawer down: cancels timers, leaves the registry, and gives
    /// the page back its scrolling if this drawer holds the lock or no other
    /// drawer remains open.
    pub fn unmount<H: DrawerHost + ?Sized>(&mut self, host: &mut H) {
        self.timers.clear();
        self.phase = GesturePhase::Idle;
        self.gate.reset();
        let (others_open, owns_lock) = {
            let mut env = self.env.borrow_mut();
            env.registry.unregister(self.id);
            (
                env.registry.any_open_other_than(self.id),
                env.lock.owner() == Some(&self.id),
            )
        };
        // A pending non-modal release dies with the timers, so an owner always
        // gives the lock back here.
        if owns_lock || (self.config.modal && !others_open) {
            self.release_lock(host);
        }
        if self.scale.exit(host) {
            self.scale.restore_background(host);
        }
        debug!(id = self.id.0, "drawer unmounted");
    }

    // --- Dialog hooks -----------------------------------------------------

    /// The dialog saw a pointer interaction outside the panel.
    pub fn on_interact_outside(&mut self, already_prevented: bool) -> OutsideInteraction {
        if !self.config.modal || already_prevented {
            return OutsideInteraction::PreventDefault;
        }
        self.keyboard.close();
        OutsideInteraction::Dismiss
    }

    /// The dialog saw focus move outside the panel.
    #[must_use]
    pub fn on_focus_outside(&self) -> OutsideInteraction {
        if self.config.modal {
            OutsideInteraction::Dismiss
        } else {
            OutsideInteraction::PreventDefault
        }
    }

    /// Returns `true` if the dialog's open auto-focus should be suppressed.
    #[must_use]
    pub fn on_open_auto_focus(&self) -> bool {
        !self.config.auto_focus
    }

    /// Escape was pressed. Returns `true` if the drawer started closing.
    pub fn on_escape_key<H: DrawerHost + ?Sized>(&mut self, now: u64, host: &mut H) -> bool {
        self.open && self.on_dialog_open_change(false, now, host)
    }

    // --- Content and overlay routing ---------------------------------------

    /// Pointer down on the panel content.
    pub fn content_pointer_down<H: DrawerHost + ?Sized>(
        &mut self,
        input: &PointerInput,
        host: &mut H,
    ) -> bool {
        if self.config.handle_only {
            return false;
        }
        self.gate.begin(input.position);
        self.on_press(input, host)
    }

    /// Pointer move over the panel content.
    pub fn content_pointer_move<H: DrawerHost + ?Sized>(&mut self, input: &PointerInput, host: &mut H) {
        self.last_pointer = Some(input.clone());
        if self.config.handle_only {
            return;
        }
        if self
            .gate
            .accept(input.position, input.pointer_type, self.config.direction)
        {
            self.on_drag(input, host);
        }
    }

    /// Pointer up over the panel content.
    pub fn content_pointer_up<H: DrawerHost + ?Sized>(
        &mut self,
        input: &PointerInput,
        host: &mut H,
    ) -> ReleaseOutcome {
        self.gate.reset();
        self.on_release(Some(input), input.time_ms, host)
    }

    /// Pointer left the panel content; releases with the last known move.
    pub fn content_pointer_out<H: DrawerHost + ?Sized>(
        &mut self,
        now: u64,
        host: &mut H,
    ) -> ReleaseOutcome {
        self.gate.reset();
        let last = self.last_pointer.take();
        self.on_release(last.as_ref(), now, host)
    }

    /// Context menu over the panel content.
    pub fn content_context_menu<H: DrawerHost + ?Sized>(
        &mut self,
        now: u64,
        host: &mut H,
    ) -> ReleaseOutcome {
        if self.last_pointer.is_none() {
            return ReleaseOutcome::Ignored;
        }
        self.content_pointer_out(now, host)
    }

    /// Mouse up on the overlay.
    pub fn overlay_mouse_up<H: DrawerHost + ?Sized>(
        &mut self,
        input: &PointerInput,
        host: &mut H,
    ) -> ReleaseOutcome {
        self.on_release(Some(input), input.time_ms, host)
    }

    // --- Timers -----------------------------------------------------------

    /// Runs every timer due at `now`.
    pub fn tick<H: DrawerHost + ?Sized>(&mut self, now: u64, host: &mut H) {
        while let Some(timer) = self.timers.pop_due(now) {
            self.fire(timer, now, host);
        }
    }

    fn fire<H: DrawerHost + ?Sized>(&mut self, timer: DrawerTimer, now: u64, host: &mut H) {
        trace!(id = self.id.0, ?timer, now, "timer fired");
        match timer {
            DrawerTimer::CloseFinished => {
                self.visible = false;
                self.delayed_snap_points = false;
                let first = self.snap.points().first().copied();
                if first.is_some() && self.snap.set_active(first) {
                    self.events.push(DrawerEvent::ActiveSnapPointChanged(first));
                }
            }
            DrawerTimer::JustReleased => {
                if self.phase.is_releasing() {
                    self.phase = GesturePhase::Idle;
                }
            }
            DrawerTimer::NestedRestore => {
                if let Some(translate) = self.current_translate(host) {
                    self.set_panel(
                        host,
                        StyleUpdate::new()
                            .with_transition(Transition::None)
                            .with_transform(Transform::translate(self.config.direction, translate)),
                    );
                }
            }
            DrawerTimer::RestoreNonModalLock => self.release_lock(host),
            DrawerTimer::ToolbarCheck => {
                self.env.borrow_mut().lock.adjust_for_toolbar(&self.id, host);
            }
            DrawerTimer::AnimationEnd(open) => self.events.push(DrawerEvent::AnimationEnd { open }),
            DrawerTimer::BodyBackgroundRestore => self.scale.restore_background(host),
            DrawerTimer::BodyStyleRestore => {
                if let Some(snapshot) = self.body_snapshot.take() {
                    host.restore_style(StyleTarget::Body, &snapshot);
                }
            }
            DrawerTimer::Frame => {
                self.should_animate = true;
                self.delayed_snap_points = self.open && self.has_snap_points();
            }
        }
    }
}
