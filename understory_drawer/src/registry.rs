// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Open drawers and the state they share.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use understory_scroll_lock::ViewportLock;

/// Identity of a drawer within one [`DrawerEnvironment`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DrawerId(pub u64);

/// Open drawers, ordered by the time they opened.
#[derive(Clone, Debug, Default)]
pub struct DrawerRegistry {
    open: Vec<(DrawerId, u64)>,
}

impl DrawerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `id` as opened at `now`. Re-registering moves it to the top.
    pub fn register(&mut self, id: DrawerId, now: u64) {
        self.open.retain(|(open, _)| *open != id);
        self.open.push((id, now));
    }

    /// Removes `id`. Returns `true` if it was registered.
    pub fn unregister(&mut self, id: DrawerId) -> bool {
        let before = self.open.len();
        self.open.retain(|(open, _)| *open != id);
        self.open.len() != before
    }

    /// `true` if `id` is registered as open.
    #[must_use]
    pub fn is_open(&self, id: DrawerId) -> bool {
        self.open.iter().any(|(open, _)| *open == id)
    }

    /// Most recently opened drawer.
    #[must_use]
    pub fn topmost(&self) -> Option<DrawerId> {
        self.open.last().map(|(id, _)| *id)
    }

    /// `true` if a drawer other than `id` is open.
    #[must_use]
    pub fn any_open_other_than(&self, id: DrawerId) -> bool {
        self.open.iter().any(|(open, _)| *open != id)
    }

    /// Number of open drawers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.open.len()
    }

    /// `true` if no drawer is open.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }

    /// Open drawers with their open times, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = (DrawerId, u64)> + '_ {
        self.open.iter().copied()
    }
}

/// State shared by every drawer on a page: the viewport lock, the open
/// drawer registry, and id allocation.
#[derive(Clone, Debug, Default)]
pub struct DrawerEnvironment {
    /// Body freeze shared by all drawers.
    pub lock: ViewportLock<DrawerId>,
    /// Drawers currently open.
    pub registry: DrawerRegistry,
    next_id: u64,
}

impl DrawerEnvironment {
    /// Creates an environment with no open drawers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an environment ready to be shared between drawers.
    #[must_use]
    pub fn shared() -> SharedEnvironment {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Allocates a fresh drawer id.
    pub fn next_id(&mut self) -> DrawerId {
        self.next_id += 1;
        DrawerId(self.next_id)
    }
}

/// Handle to a [`DrawerEnvironment`] shared by several drawers.
pub type SharedEnvironment = Rc<RefCell<DrawerEnvironment>>;
