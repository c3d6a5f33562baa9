// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_drawer --heading-base-level=0

//! Understory Drawer: a headless gesture and snap point engine for drawers.
//!
//! A drawer is a panel that slides in from one edge of the viewport (a bottom
//! sheet, a side panel). The user drags it with a finger or mouse; on release
//! it either settles at a resting position or closes. Optionally it rests at
//! several configured [snap points](SnapPoint), fades a backdrop, and scales
//! the page behind it.
//!
//! This crate decides *where the panel goes*. It never touches a DOM:
//!
//! - Hosts implement [`DrawerHost`] to answer layout queries (panel rect,
//!   computed transform, viewport size) and to receive [`StyleUpdate`]s.
//! - Pointer events arrive as [`PointerInput`] values carrying the hit path,
//!   already annotated with the facts the drag gate needs.
//! - Time is plain `u64` milliseconds supplied by the host. Deferred work is
//!   queued internally; hosts call [`Drawer::tick`] once
//!   [`Drawer::next_deadline`] has passed.
//! - Notifications are queued as [`DrawerEvent`]s and drained with
//!   [`Drawer::drain_events`].
//!
//! Drawers on one page share a [`DrawerEnvironment`] that owns the page-wide
//! [`ViewportLock`](understory_scroll_lock::ViewportLock) and the registry of
//! open drawers.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect, Size, Vec2};
//! use understory_drawer::{
//!     Drawer, DrawerConfig, DrawerEnvironment, DrawerEvent, DrawerHost, PointerInput,
//!     ReleaseOutcome, StyleSnapshot, StyleTarget, StyleUpdate, Transform,
//! };
//! use understory_scroll_lock::{BodyPosition, PageHost, Platform};
//!
//! struct Page {
//!     platform: Platform,
//!     body: BodyPosition,
//!     panel: Transform,
//! }
//!
//! impl PageHost for Page {
//!     fn platform(&self) -> &Platform { &self.platform }
//!     fn body_position(&self) -> BodyPosition { self.body.clone() }
//!     fn set_body_position(&mut self, p: &BodyPosition) { self.body = p.clone(); }
//!     fn scroll_offset(&self) -> Vec2 { Vec2::ZERO }
//!     fn scroll_to(&mut self, _offset: Vec2) {}
//!     fn inner_height(&self) -> f64 { 800.0 }
//!     fn scrollbar_width(&self) -> f64 { 0.0 }
//!     fn location(&self) -> &str { "https://example.test/" }
//! }
//!
//! impl DrawerHost for Page {
//!     fn panel_rect(&self) -> Option<Rect> { Some(Rect::new(0.0, 400.0, 390.0, 800.0)) }
//!     fn panel_transform(&self) -> Option<String> { Some(self.panel.to_matrix()) }
//!     fn viewport_size(&self) -> Size { Size::new(390.0, 800.0) }
//!     fn style_snapshot(&self, _target: StyleTarget) -> StyleSnapshot { StyleSnapshot::default() }
//!     fn restore_style(&mut self, _target: StyleTarget, _snapshot: &StyleSnapshot) {}
//!     fn apply_style(&mut self, target: StyleTarget, update: &StyleUpdate) {
//!         if let (StyleTarget::Panel, Some(transform)) = (target, update.transform) {
//!             self.panel = transform;
//!         }
//!     }
//! }
//!
//! let mut page = Page {
//!     platform: Platform::new("Mozilla/5.0 (X11; Linux x86_64) Firefox/128.0", "Linux"),
//!     body: BodyPosition::default(),
//!     panel: Transform::Identity,
//! };
//! let env = DrawerEnvironment::shared();
//! let mut drawer = Drawer::new(DrawerConfig::default(), env, &page);
//! drawer.set_open(true, 0, &mut page);
//!
//! // A quick downward swipe closes a bottom sheet.
//! drawer.content_pointer_down(&PointerInput::new(Point::new(100.0, 500.0), 1_000), &mut page);
//! drawer.content_pointer_move(&PointerInput::new(Point::new(100.0, 700.0), 1_100), &mut page);
//! let outcome =
//!     drawer.content_pointer_up(&PointerInput::new(Point::new(100.0, 700.0), 1_150), &mut page);
//!
//! assert_eq!(outcome, ReleaseOutcome::Closed);
//! assert!(!drawer.is_open());
//! assert!(drawer.drain_events().contains(&DrawerEvent::OpenChanged(false)));
//!
//! // The panel stays mounted until the close transition finishes.
//! assert!(drawer.is_visible());
//! drawer.tick(1_650, &mut page);
//! assert!(!drawer.is_visible());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod attrs;
mod config;
mod direction;
mod drawer;
mod event;
mod geometry;
mod gesture;
mod handle;
mod host;
mod keyboard;
mod pointer;
mod registry;
mod scale;
mod snap;
mod style;

pub use attrs::Attributes;
pub use config::{
    DEFAULT_CLOSE_THRESHOLD, DEFAULT_SCROLL_LOCK_TIMEOUT_MS, DEFAULT_VELOCITY_THRESHOLD,
    DrawerConfig,
};
pub use direction::DrawerDirection;
pub use drawer::{
    Drawer, DrawerTimer, FRAME_MS, NESTED_DISPLACEMENT, NON_MODAL_UNLOCK_MS,
    OPEN_DRAG_SUPPRESSION_MS, RELEASE_GUARD_MS, RELEASE_GUARD_VELOCITY, TOOLBAR_CHECK_MS,
};
pub use event::{DrawerEvent, OutsideInteraction, ReleaseOutcome};
pub use geometry::{damp, parse_translate};
pub use gesture::{GesturePhase, PressRecord, SwipeGate};
pub use handle::{DOUBLE_TAP_MS, DrawerHandle, HandleTimer, LONG_HANDLE_PRESS_MS};
pub use host::DrawerHost;
pub use keyboard::{KEYBOARD_TOGGLE_DELTA, KeyboardReflow, PanelResize, ReflowOptions, ViewportMetrics};
pub use pointer::{PointerInput, PointerType, TargetNode, TargetPath};
pub use registry::{DrawerEnvironment, DrawerId, DrawerRegistry, SharedEnvironment};
pub use scale::{BORDER_RADIUS, BackgroundScale, SCALE_INSET, WINDOW_TOP_OFFSET, base_scale};
pub use snap::{
    FAST_RELEASE_VELOCITY, FLICK_MAX_DISTANCE_FRACTION, ReleaseInput, SnapPoint,
    SnapPointParseError, SnapPoints, SnapRelease, SnapTarget, compute_offsets,
};
pub use style::{
    Background, StyleSnapshot, StyleTarget, StyleUpdate, TRANSITION_DURATION_MS,
    TRANSITION_EASE, Transform, TransformOrigin, Transition,
};
