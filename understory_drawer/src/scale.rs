// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The page-wrapper scale effect shown behind an open drawer.

use alloc::string::String;

use tracing::trace;

use crate::direction::DrawerDirection;
use crate::host::DrawerHost;
use crate::style::{
    Background, StyleSnapshot, StyleTarget, StyleUpdate, Transform, TransformOrigin, Transition,
};

/// Corner radius of the scaled wrapper, in pixels.
pub const BORDER_RADIUS: f64 = 8.0;

/// Horizontal room left around the scaled wrapper, in pixels.
pub const WINDOW_TOP_OFFSET: f64 = 26.0;

/// Inset of the scaled wrapper from the top safe area, in pixels.
pub const SCALE_INSET: f64 = 14.0;

/// Scale of the wrapper while a drawer is fully open.
#[must_use]
pub fn base_scale(viewport_width: f64) -> f64 {
    if viewport_width <= 0.0 {
        return 1.0;
    }
    (viewport_width - WINDOW_TOP_OFFSET) / viewport_width
}

/// Scales the page wrapper back while a drawer is open.
#[derive(Clone, Debug)]
pub struct BackgroundScale {
    direction: DrawerDirection,
    wrapper_snapshot: Option<StyleSnapshot>,
    body_background: Option<Option<String>>,
}

impl BackgroundScale {
    /// Creates an inactive effect.
    #[must_use]
    pub fn new(direction: DrawerDirection) -> Self {
        Self {
            direction,
            wrapper_snapshot: None,
            body_background: None,
        }
    }

    /// `true` between [`enter`](Self::enter) and [`exit`](Self::exit).
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.wrapper_snapshot.is_some()
    }

    fn open_visuals(&self, viewport_width: f64) -> StyleUpdate {
        let origin = if self.direction.is_vertical() {
            TransformOrigin::Top
        } else {
            TransformOrigin::Left
        };
        StyleUpdate::new()
            .with_transform_origin(origin)
            .with_transition(Transition::TransformAndRadius)
            .with_border_radius(BORDER_RADIUS)
            .with_overflow_hidden()
            .with_transform(Transform::scale_inset(
                self.direction,
                base_scale(viewport_width),
                SCALE_INSET,
            ))
    }

    /// Shrinks the wrapper to its open-drawer scale.
    ///
    /// Does nothing if the host has no wrapper. When `set_body_background`
    /// is set the body turns black behind the wrapper; its previous value is
    /// kept for [`restore_background`](Self::restore_background).
    pub fn enter<H: DrawerHost + ?Sized>(&mut self, set_body_background: bool, host: &mut H) {
        if !host.has_wrapper() {
            return;
        }
        if set_body_background {
            if self.body_background.is_none() {
                self.body_background = Some(host.body_background());
            }
            host.apply_style(
                StyleTarget::Body,
                &StyleUpdate::new().with_background(Background::Set("black".into())),
            );
        }
        if self.wrapper_snapshot.is_none() {
            self.wrapper_snapshot = Some(host.style_snapshot(StyleTarget::Wrapper));
        }
        let width = host.viewport_size().width;
        host.apply_style(StyleTarget::Wrapper, &self.open_visuals(width));
        trace!(direction = self.direction.as_str(), "background scaled");
    }

    /// Restores the wrapper's pre-enter style with the shared transition.
    ///
    /// Returns `true` if the body background was changed and should be
    /// restored once the transition finishes.
    pub fn exit<H: DrawerHost + ?Sized>(&mut self, host: &mut H) -> bool {
        let Some(snapshot) = self.wrapper_snapshot.take() else {
            return false;
        };
        host.restore_style(StyleTarget::Wrapper, &snapshot);
        host.apply_style(
            StyleTarget::Wrapper,
            &StyleUpdate::new().with_transition(Transition::TransformAndRadius),
        );
        self.body_background.is_some()
    }

    /// Puts the body background back to what it was before
    /// [`enter`](Self::enter).
    pub fn restore_background<H: DrawerHost + ?Sized>(&mut self, host: &mut H) {
        let Some(previous) = self.body_background.take() else {
            return;
        };
        let background = match previous {
            Some(color) if !color.is_empty() => Background::Set(color),
            _ => Background::Remove,
        };
        host.apply_style(
            StyleTarget::Body,
            &StyleUpdate::new().with_background(background),
        );
    }

    /// Tracks a drag: `percentage` 0 is the open look, 1 the unscaled page.
    pub fn interpolate<H: DrawerHost + ?Sized>(&self, percentage: f64, host: &mut H) {
        if !host.has_wrapper() {
            return;
        }
        let base = base_scale(host.viewport_size().width);
        let scale = (base + percentage * (1.0 - base)).min(1.0);
        let radius = BORDER_RADIUS - percentage * BORDER_RADIUS;
        let inset = (SCALE_INSET - percentage * SCALE_INSET).max(0.0);
        host.apply_style(
            StyleTarget::Wrapper,
            &StyleUpdate::new()
                .with_border_radius(radius)
                .with_transform(Transform::scale_translate(self.direction, scale, inset))
                .with_transition(Transition::None),
        );
    }

    /// Re-applies the open look without taking a new snapshot.
    pub fn reapply<H: DrawerHost + ?Sized>(&self, host: &mut H) {
        if !host.has_wrapper() {
            return;
        }
        let width = host.viewport_size().width;
        host.apply_style(StyleTarget::Wrapper, &self.open_visuals(width));
    }
}

#[cfg(test)]
mod tests {
    use super::base_scale;

    #[test]
    fn base_scale_leaves_fixed_margin() {
        assert_eq!(base_scale(260.0), 0.9);
        assert_eq!(base_scale(0.0), 1.0);
    }
}
