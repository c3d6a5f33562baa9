// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The ownership-guarded viewport lock.

use alloc::string::String;
use core::fmt::Debug;

use kurbo::Vec2;
use tracing::{debug, trace};

use crate::body::{BodyPosition, px};
use crate::platform::Platform;

/// Page-level queries and writes needed to freeze and restore scrolling.
pub trait PageHost {
    /// Browser description used to decide whether the workaround applies.
    fn platform(&self) -> &Platform;
    /// Current inline positioning styles of the body.
    fn body_position(&self) -> BodyPosition;
    /// Writes the body's inline positioning styles.
    ///
    /// A `position` of `fixed` must be applied with `!important`.
    fn set_body_position(&mut self, position: &BodyPosition);
    /// Current window scroll offset.
    fn scroll_offset(&self) -> Vec2;
    /// Scrolls the window to `offset`.
    fn scroll_to(&mut self, offset: Vec2);
    /// Layout viewport height (`window.innerHeight`).
    fn inner_height(&self) -> f64;
    /// Width of the vertical scrollbar that disappears while locked.
    fn scrollbar_width(&self) -> f64;
    /// Current page location, used to detect navigation while locked.
    fn location(&self) -> &str;
}

/// Per-request options for [`ViewportLock`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LockOptions {
    /// Never touch body styles.
    pub no_body_styles: bool,
    /// Skip the scrollbar padding compensation.
    pub disable_prevent_scroll: bool,
    /// Skip scroll restoration when the location changed while locked.
    pub prevent_scroll_restoration: bool,
}

/// Result of [`ViewportLock::acquire`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LockOutcome {
    /// The body was pinned and the caller now owns the lock.
    Acquired,
    /// The caller already owns the lock; nothing changed.
    AlreadyOwned,
    /// Another owner holds the lock; nothing changed.
    HeldByOther,
    /// The platform does not need the workaround.
    Unsupported,
    /// Body styling is excluded by options.
    Excluded,
}

#[derive(Clone, Debug)]
struct LockRecord<O> {
    owner: O,
    previous: BodyPosition,
    scroll: Vec2,
    inner_height: f64,
}

/// Process-wide body freeze with a single owner.
///
/// The first owner to [`acquire`](Self::acquire) wins. Until it calls
/// [`release`](Self::release), requests from other owners are no-ops, and the
/// snapshot of the body's original styles is never overwritten.
#[derive(Clone, Debug)]
pub struct ViewportLock<O> {
    record: Option<LockRecord<O>>,
    active_url: Option<String>,
}

impl<O> Default for ViewportLock<O> {
    fn default() -> Self {
        Self {
            record: None,
            active_url: None,
        }
    }
}

impl<O: Clone + PartialEq + Debug> ViewportLock<O> {
    /// Creates an unlocked coordinator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` while some owner holds the lock.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.record.is_some()
    }

    /// Current owner, if locked.
    #[must_use]
    pub fn owner(&self) -> Option<&O> {
        self.record.as_ref().map(|r| &r.owner)
    }

    /// Body styles captured when the lock was acquired.
    #[must_use]
    pub fn snapshot(&self) -> Option<&BodyPosition> {
        self.record.as_ref().map(|r| &r.previous)
    }

    /// Pins the body at the current scroll offset on behalf of `owner`.
    pub fn acquire<H: PageHost + ?Sized>(
        &mut self,
        owner: O,
        options: &LockOptions,
        host: &mut H,
    ) -> LockOutcome {
        if !host.platform().is_safari() {
            return LockOutcome::Unsupported;
        }
        if options.no_body_styles {
            return LockOutcome::Excluded;
        }
        if let Some(record) = &self.record {
            return if record.owner == owner {
                LockOutcome::AlreadyOwned
            } else {
                trace!(?owner, holder = ?record.owner, "viewport lock held by another owner");
                LockOutcome::HeldByOther
            };
        }

        let previous = host.body_position();
        let scroll = host.scroll_offset();
        let padding = if options.disable_prevent_scroll {
            None
        } else {
            Some(host.scrollbar_width()).filter(|w| *w > 0.0)
        };
        host.set_body_position(&BodyPosition::fixed_at(scroll, padding, &previous));
        if self.active_url.is_none() {
            self.active_url = Some(host.location().into());
        }
        debug!(?owner, scroll_y = scroll.y, "viewport locked");
        self.record = Some(LockRecord {
            owner,
            previous,
            scroll,
            inner_height: host.inner_height(),
        });
        LockOutcome::Acquired
    }

    /// Compensates for a browser bottom bar that appeared after pinning.
    ///
    /// Hosts call this a short while after [`acquire`](Self::acquire), once the
    /// toolbar animation settled. Returns `true` if `top` was adjusted.
    pub fn adjust_for_toolbar<H: PageHost + ?Sized>(&mut self, owner: &O, host: &mut H) -> bool {
        let Some(record) = self.record.as_ref().filter(|r| r.owner == *owner) else {
            return false;
        };
        let bottom_bar = record.inner_height - host.inner_height();
        if bottom_bar == 0.0 || record.scroll.y < record.inner_height {
            return false;
        }
        let mut position = host.body_position();
        position.top = px(-(record.scroll.y + bottom_bar));
        host.set_body_position(&position);
        trace!(bottom_bar, "viewport lock adjusted for toolbar");
        true
    }

    /// Restores the body and scroll position if `owner` holds the lock.
    ///
    /// Returns `true` if the lock was released. Calls from non-owners, or with
    /// no lock held, are no-ops.
    pub fn release<H: PageHost + ?Sized>(
        &mut self,
        owner: &O,
        options: &LockOptions,
        host: &mut H,
    ) -> bool {
        if !host.platform().is_safari() || options.no_body_styles {
            return false;
        }
        if self.record.as_ref().is_none_or(|r| r.owner != *owner) {
            return false;
        }
        let Some(record) = self.record.take() else {
            return false;
        };

        let pinned = host.body_position();
        let y = pinned.top_px().map_or(record.scroll.y, |top| -top);
        let x = pinned.left_px().map_or(record.scroll.x, |left| -left);
        host.set_body_position(&record.previous);

        let navigated = self.active_url.as_deref() != Some(host.location());
        if options.prevent_scroll_restoration && navigated {
            self.active_url = Some(host.location().into());
            debug!(?owner, "viewport unlocked after navigation, scroll not restored");
        } else {
            host.scroll_to(Vec2::new(x, y));
            debug!(?owner, x, y, "viewport unlocked");
        }
        true
    }
}
