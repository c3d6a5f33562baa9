// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render attributes: the markers and flags hosts put on the drawer's
//! elements so stylesheets can follow the engine's state.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::drawer::Drawer;

/// Ordered `(name, value)` pairs for one element.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Attributes(pub Vec<(&'static str, String)>);

impl Attributes {
    fn push(&mut self, name: &'static str, value: impl Into<String>) {
        self.0.push((name, value.into()));
    }

    fn flag(&mut self, name: &'static str, value: bool) {
        self.push(name, if value { "true" } else { "false" });
    }

    /// Value of attribute `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Iterates over the pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.0.iter().map(|(n, v)| (*n, v.as_str()))
    }
}

impl Drawer {
    fn state_name(&self) -> &'static str {
        if self.is_open() { "open" } else { "closed" }
    }

    /// Attributes for the panel element.
    ///
    /// Includes the `--snap-point-height` style variable when snap points are
    /// configured.
    #[must_use]
    pub fn content_attributes(&self) -> Attributes {
        let has_snap_points = !self.snap_points().is_empty();
        let mut attrs = Attributes::default();
        attrs.push(
            "data-vaul-drawer-direction",
            self.config().direction.as_str(),
        );
        attrs.push("data-vaul-drawer", String::new());
        attrs.push("data-state", self.state_name());
        attrs.flag("data-vaul-dragging", self.is_dragging());
        attrs.flag("data-vaul-delayed-snap-points", self.delayed_snap_points());
        attrs.flag("data-vaul-snap-points", self.is_open() && has_snap_points);
        attrs.flag(
            "data-vaul-custom-container",
            self.config().has_custom_container,
        );
        attrs.flag("data-vaul-animate", self.should_animate());
        if let Some(first) = self.snap_points().offsets().first() {
            attrs.push("--snap-point-height", format!("{first}px"));
        }
        attrs
    }

    /// Attributes for the backdrop element.
    #[must_use]
    pub fn overlay_attributes(&self) -> Attributes {
        let snap = self.snap_points();
        let mut attrs = Attributes::default();
        attrs.push("data-vaul-overlay", String::new());
        attrs.push("data-state", self.state_name());
        attrs.flag("data-vaul-snap-points", self.is_open() && !snap.is_empty());
        attrs.flag(
            "data-vaul-snap-points-overlay",
            self.is_open() && snap.should_fade(),
        );
        attrs.flag("data-vaul-animate", self.should_animate());
        attrs
    }

    /// Attributes for the drag handle.
    #[must_use]
    pub fn handle_attributes(&self) -> Attributes {
        let mut attrs = Attributes::default();
        attrs.flag("data-vaul-drawer-visible", self.is_open());
        attrs.push("data-vaul-handle", String::new());
        attrs.push("aria-hidden", "true");
        attrs
    }
}
