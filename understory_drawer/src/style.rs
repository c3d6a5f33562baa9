// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Style values the engine asks the host to apply.
//!
//! The engine never writes CSS itself. It emits [`StyleUpdate`]s addressed to
//! a [`StyleTarget`]; each update only names the properties it changes. The
//! `Display` impls render CSS text for web hosts, while native hosts can read
//! the typed fields directly.

use alloc::format;
use alloc::string::String;
use core::fmt;

use crate::direction::DrawerDirection;

/// Duration of every drawer transition, in milliseconds.
pub const TRANSITION_DURATION_MS: u64 = 500;

/// Cubic-bezier control points of every drawer transition.
pub const TRANSITION_EASE: [f64; 4] = [0.32, 0.72, 0.0, 1.0];

/// Node a style update is addressed to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StyleTarget {
    /// The drawer panel.
    Panel,
    /// The backdrop overlay.
    Overlay,
    /// The page wrapper scaled behind the drawer.
    Wrapper,
    /// The document body.
    Body,
}

/// Opaque copy of a node's inline style, taken before the engine changes it.
///
/// Hosts decide the representation; web hosts typically store `cssText`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StyleSnapshot(pub String);

/// Transform written to the panel or page wrapper.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Transform {
    /// Back at the resting position.
    Identity,
    /// Translation along the drag axis.
    Translate {
        /// Axis of the translation.
        vertical: bool,
        /// Offset in pixels.
        offset: f64,
    },
    /// Uniform scale followed by a translation along the drag axis.
    ScaleTranslate {
        /// Axis of the translation.
        vertical: bool,
        /// Scale factor.
        scale: f64,
        /// Offset in pixels.
        offset: f64,
    },
    /// Uniform scale followed by an inset that includes the top safe area.
    ScaleInset {
        /// Axis of the inset.
        vertical: bool,
        /// Scale factor.
        scale: f64,
        /// Inset in pixels, added to the safe-area inset.
        inset: f64,
    },
}

impl Transform {
    /// Translation by `offset` along `direction`'s axis.
    #[must_use]
    pub fn translate(direction: DrawerDirection, offset: f64) -> Self {
        Self::Translate {
            vertical: direction.is_vertical(),
            offset,
        }
    }

    /// Scale plus translation along `direction`'s axis.
    #[must_use]
    pub fn scale_translate(direction: DrawerDirection, scale: f64, offset: f64) -> Self {
        Self::ScaleTranslate {
            vertical: direction.is_vertical(),
            scale,
            offset,
        }
    }

    /// Scale plus safe-area-aware inset along `direction`'s axis.
    #[must_use]
    pub fn scale_inset(direction: DrawerDirection, scale: f64, inset: f64) -> Self {
        Self::ScaleInset {
            vertical: direction.is_vertical(),
            scale,
            inset,
        }
    }

    /// Serializes as a computed-style `matrix(...)`, as a browser would report
    /// it from `getComputedStyle`.
    ///
    /// Useful for hosts without a style engine. The safe-area term of
    /// [`Transform::ScaleInset`] is taken as zero.
    #[must_use]
    pub fn to_matrix(&self) -> String {
        let (vertical, scale, offset) = match *self {
            Self::Identity => (true, 1.0, 0.0),
            Self::Translate { vertical, offset } => (vertical, 1.0, offset),
            Self::ScaleTranslate {
                vertical,
                scale,
                offset,
            } => (vertical, scale, offset),
            Self::ScaleInset {
                vertical,
                scale,
                inset,
            } => (vertical, scale, inset),
        };
        let moved = scale * offset;
        let (tx, ty) = if vertical { (0.0, moved) } else { (moved, 0.0) };
        format!("matrix({scale}, 0, 0, {scale}, {tx}, {ty})")
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn axis(f: &mut fmt::Formatter<'_>, vertical: bool, value: &dyn fmt::Display) -> fmt::Result {
            if vertical {
                write!(f, "translate3d(0, {value}, 0)")
            } else {
                write!(f, "translate3d({value}, 0, 0)")
            }
        }
        match *self {
            Self::Identity => f.write_str("translate3d(0, 0, 0)"),
            Self::Translate { vertical, offset } => axis(f, vertical, &format_args!("{offset}px")),
            Self::ScaleTranslate {
                vertical,
                scale,
                offset,
            } => {
                write!(f, "scale({scale}) ")?;
                axis(f, vertical, &format_args!("{offset}px"))
            }
            Self::ScaleInset {
                vertical,
                scale,
                inset,
            } => {
                write!(f, "scale({scale}) ")?;
                axis(
                    f,
                    vertical,
                    &format_args!("calc(env(safe-area-inset-top) + {inset}px)"),
                )
            }
        }
    }
}

/// Transition applied alongside a style change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Apply instantly (used while a finger is tracking the panel).
    None,
    /// Animate `transform`.
    Transform,
    /// Animate `opacity`.
    Opacity,
    /// Animate `transform` and `border-radius` (page wrapper).
    TransformAndRadius,
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = TRANSITION_EASE;
        let seconds = TRANSITION_DURATION_MS as f64 / 1000.0;
        let timing = format!("{seconds}s cubic-bezier({a}, {b}, {c}, {d})");
        match self {
            Self::None => f.write_str("none"),
            Self::Transform => write!(f, "transform {timing}"),
            Self::Opacity => write!(f, "opacity {timing}"),
            Self::TransformAndRadius => write!(f, "transform {timing}, border-radius {timing}"),
        }
    }
}

/// Origin for the page wrapper's scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransformOrigin {
    /// Scale toward the top edge.
    Top,
    /// Scale toward the left edge.
    Left,
}

/// Change to the body background.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Background {
    /// Set the background to a CSS color.
    Set(String),
    /// Remove the inline background override.
    Remove,
}

/// A partial set of style properties for one node.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyleUpdate {
    /// `transform`
    pub transform: Option<Transform>,
    /// `transition`
    pub transition: Option<Transition>,
    /// `opacity`
    pub opacity: Option<f64>,
    /// `height`, in pixels.
    pub height: Option<f64>,
    /// `bottom`, in pixels.
    pub bottom: Option<f64>,
    /// `border-radius`, in pixels.
    pub border_radius: Option<f64>,
    /// `overflow: hidden` when `Some(true)`.
    pub overflow_hidden: Option<bool>,
    /// `transform-origin`
    pub transform_origin: Option<TransformOrigin>,
    /// `background`
    pub background: Option<Background>,
}

impl StyleUpdate {
    /// An empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `transform`.
    #[must_use]
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = Some(transform);
        self
    }

    /// Sets `transition`.
    #[must_use]
    pub fn with_transition(mut self, transition: Transition) -> Self {
        self.transition = Some(transition);
        self
    }

    /// Sets `opacity`.
    #[must_use]
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    /// Sets `height`.
    #[must_use]
    pub fn with_height(mut self, height: f64) -> Self {
        self.height = Some(height);
        self
    }

    /// Sets `bottom`.
    #[must_use]
    pub fn with_bottom(mut self, bottom: f64) -> Self {
        self.bottom = Some(bottom);
        self
    }

    /// Sets `border-radius`.
    #[must_use]
    pub fn with_border_radius(mut self, radius: f64) -> Self {
        self.border_radius = Some(radius);
        self
    }

    /// Sets `overflow: hidden`.
    #[must_use]
    pub fn with_overflow_hidden(mut self) -> Self {
        self.overflow_hidden = Some(true);
        self
    }

    /// Sets `transform-origin`.
    #[must_use]
    pub fn with_transform_origin(mut self, origin: TransformOrigin) -> Self {
        self.transform_origin = Some(origin);
        self
    }

    /// Sets `background`.
    #[must_use]
    pub fn with_background(mut self, background: Background) -> Self {
        self.background = Some(background);
        self
    }

    /// Returns `true` if no property is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Renders as inline CSS declarations.
///
/// [`Background::Remove`] renders nothing; hosts should drop the property.
impl fmt::Display for StyleUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(transform) = &self.transform {
            write!(f, "transform: {transform}; ")?;
        }
        if let Some(origin) = self.transform_origin {
            let origin = match origin {
                TransformOrigin::Top => "top",
                TransformOrigin::Left => "left",
            };
            write!(f, "transform-origin: {origin}; ")?;
        }
        if let Some(transition) = &self.transition {
            write!(f, "transition: {transition}; ")?;
        }
        if let Some(opacity) = self.opacity {
            write!(f, "opacity: {opacity}; ")?;
        }
        if let Some(height) = self.height {
            write!(f, "height: {height}px; ")?;
        }
        if let Some(bottom) = self.bottom {
            write!(f, "bottom: {bottom}px; ")?;
        }
        if let Some(radius) = self.border_radius {
            write!(f, "border-radius: {radius}px; ")?;
        }
        if self.overflow_hidden == Some(true) {
            f.write_str("overflow: hidden; ")?;
        }
        if let Some(Background::Set(color)) = &self.background {
            write!(f, "background: {color}; ")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::{StyleUpdate, Transform, Transition};
    use crate::direction::DrawerDirection;

    #[test]
    fn transforms_render_as_css() {
        let t = Transform::translate(DrawerDirection::Bottom, 120.0);
        assert_eq!(t.to_string(), "translate3d(0, 120px, 0)");
        let t = Transform::translate(DrawerDirection::Left, -40.5);
        assert_eq!(t.to_string(), "translate3d(-40.5px, 0, 0)");
        let t = Transform::scale_translate(DrawerDirection::Top, 0.5, -16.0);
        assert_eq!(t.to_string(), "scale(0.5) translate3d(0, -16px, 0)");
        let t = Transform::scale_inset(DrawerDirection::Bottom, 0.9, 14.0);
        assert_eq!(
            t.to_string(),
            "scale(0.9) translate3d(0, calc(env(safe-area-inset-top) + 14px), 0)"
        );
    }

    #[test]
    fn transitions_use_shared_timing() {
        assert_eq!(Transition::None.to_string(), "none");
        assert_eq!(
            Transition::Transform.to_string(),
            "transform 0.5s cubic-bezier(0.32, 0.72, 0, 1)"
        );
    }

    #[test]
    fn matrix_round_trips_through_parser() {
        use crate::geometry::parse_translate;
        let t = Transform::translate(DrawerDirection::Bottom, 300.0);
        assert_eq!(parse_translate(&t.to_matrix(), DrawerDirection::Bottom), Some(300.0));
        let t = Transform::translate(DrawerDirection::Right, -20.0);
        assert_eq!(parse_translate(&t.to_matrix(), DrawerDirection::Right), Some(-20.0));
    }

    #[test]
    fn update_renders_only_set_properties() {
        let update = StyleUpdate::new()
            .with_opacity(0.25)
            .with_transition(Transition::None);
        assert_eq!(update.to_string(), "transition: none; opacity: 0.25; ");
        assert!(StyleUpdate::new().is_empty());
        assert!(!update.is_empty());
    }
}
