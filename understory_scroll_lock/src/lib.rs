// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_scroll_lock --heading-base-level=0

//! Understory Scroll Lock: freeze page scrolling underneath an overlay.
//!
//! On Safari-family browsers, `overflow: hidden` on the body does not stop the
//! page from scrolling behind a modal overlay, and opening the virtual keyboard
//! can scroll the page as well. The reliable workaround is to pin the body with
//! `position: fixed`, offset by the current scroll position so nothing visibly
//! jumps, and to undo all of it (including the scroll position) when the
//! overlay goes away.
//!
//! Because the body is a single shared resource, [`ViewportLock`] arbitrates
//! between overlays: the first owner to acquire it wins, and other owners'
//! acquire/release calls are no-ops until the owner releases. The original
//! body styles are snapshotted exactly once per lock.
//!
//! The crate never touches a DOM. Hosts implement [`PageHost`] to expose the
//! few page-level reads and writes the lock needs.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Vec2;
//! use understory_scroll_lock::{
//!     BodyPosition, LockOptions, LockOutcome, PageHost, Platform, ViewportLock,
//! };
//!
//! struct Page {
//!     platform: Platform,
//!     body: BodyPosition,
//!     scroll: Vec2,
//! }
//!
//! impl PageHost for Page {
//!     fn platform(&self) -> &Platform { &self.platform }
//!     fn body_position(&self) -> BodyPosition { self.body.clone() }
//!     fn set_body_position(&mut self, p: &BodyPosition) { self.body = p.clone(); }
//!     fn scroll_offset(&self) -> Vec2 { self.scroll }
//!     fn scroll_to(&mut self, offset: Vec2) { self.scroll = offset; }
//!     fn inner_height(&self) -> f64 { 800.0 }
//!     fn scrollbar_width(&self) -> f64 { 0.0 }
//!     fn location(&self) -> &str { "https://example.test/" }
//! }
//!
//! let mut page = Page {
//!     platform: Platform::new("Mozilla/5.0 (iPhone) Version/17.0 Safari/604.1", "iPhone"),
//!     body: BodyPosition::default(),
//!     scroll: Vec2::new(0.0, 300.0),
//! };
//!
//! let mut lock = ViewportLock::new();
//! let options = LockOptions::default();
//! assert_eq!(lock.acquire("sheet", &options, &mut page), LockOutcome::Acquired);
//! assert_eq!(page.body.top, "-300px");
//!
//! // A second overlay cannot steal or release the lock.
//! assert_eq!(lock.acquire("menu", &options, &mut page), LockOutcome::HeldByOther);
//! assert!(!lock.release(&"menu", &options, &mut page));
//!
//! page.scroll = Vec2::ZERO;
//! assert!(lock.release(&"sheet", &options, &mut page));
//! assert_eq!(page.scroll, Vec2::new(0.0, 300.0));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod body;
mod lock;
mod platform;

pub use body::{BodyPosition, parse_px};
pub use lock::{LockOptions, LockOutcome, PageHost, ViewportLock};
pub use platform::Platform;
