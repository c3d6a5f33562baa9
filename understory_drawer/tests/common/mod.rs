// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording fake page shared by the drawer integration tests.

#![allow(
    missing_docs,
    dead_code,
    reason = "Integration-test helper module; not every test file uses every helper."
)]

use kurbo::{Point, Rect, Size, Vec2};
use understory_drawer::{
    Background, Drawer, DrawerHost, PointerInput, PointerType, ReleaseOutcome, StyleSnapshot,
    StyleTarget, StyleUpdate, Transform,
};
use understory_scroll_lock::{BodyPosition, PageHost, Platform};

pub(crate) const DESKTOP_UA: &str = "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";
pub(crate) const IOS_UA: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Mobile/15E148 Safari/604.1";

/// A page that records every style write and reports the last panel
/// transform back the way a browser's computed style would.
pub(crate) struct FakePage {
    pub(crate) platform: Platform,
    pub(crate) body: BodyPosition,
    pub(crate) scroll: Vec2,
    pub(crate) viewport: Size,
    pub(crate) panel: Rect,
    pub(crate) panel_transform: Transform,
    pub(crate) overlay_opacity: Option<f64>,
    pub(crate) wrapper_transform: Option<Transform>,
    pub(crate) visual_height: Option<f64>,
    pub(crate) focused_input: bool,
    pub(crate) text_selection: bool,
    pub(crate) wrapper: bool,
    pub(crate) dragging_marker: bool,
    pub(crate) captured: Vec<u64>,
    pub(crate) body_background: Option<String>,
    pub(crate) applied: Vec<(StyleTarget, StyleUpdate)>,
    pub(crate) restored: Vec<StyleTarget>,
}

impl FakePage {
    /// Desktop Firefox: no viewport lock, 390×800 viewport, panel covering
    /// the lower half.
    pub(crate) fn desktop() -> Self {
        Self::with_platform(Platform::new(DESKTOP_UA, "Linux x86_64"))
    }

    /// iPhone Safari, scrolled down by `scroll_y`.
    pub(crate) fn ios(scroll_y: f64) -> Self {
        let mut page = Self::with_platform(Platform::new(IOS_UA, "iPhone"));
        page.scroll = Vec2::new(0.0, scroll_y);
        page
    }

    fn with_platform(platform: Platform) -> Self {
        Self {
            platform,
            body: BodyPosition::default(),
            scroll: Vec2::ZERO,
            viewport: Size::new(390.0, 800.0),
            panel: Rect::new(0.0, 400.0, 390.0, 800.0),
            panel_transform: Transform::Identity,
            overlay_opacity: None,
            wrapper_transform: None,
            visual_height: None,
            focused_input: false,
            text_selection: false,
            wrapper: false,
            dragging_marker: false,
            captured: Vec::new(),
            body_background: None,
            applied: Vec::new(),
            restored: Vec::new(),
        }
    }

    /// Translate of the panel along the vertical axis.
    pub(crate) fn panel_offset(&self) -> f64 {
        match self.panel_transform {
            Transform::Identity => 0.0,
            Transform::Translate { offset, .. } => offset,
            Transform::ScaleTranslate { scale, offset, .. } => scale * offset,
            Transform::ScaleInset { scale, inset, .. } => scale * inset,
        }
    }

    /// Updates written to `target`, oldest first.
    pub(crate) fn updates_for(&self, target: StyleTarget) -> impl Iterator<Item = &StyleUpdate> {
        self.applied
            .iter()
            .filter(move |(t, _)| *t == target)
            .map(|(_, u)| u)
    }

    /// The last update written to `target`.
    pub(crate) fn last_update(&self, target: StyleTarget) -> Option<&StyleUpdate> {
        self.updates_for(target).last()
    }
}

impl PageHost for FakePage {
    fn platform(&self) -> &Platform {
        &self.platform
    }
    fn body_position(&self) -> BodyPosition {
        self.body.clone()
    }
    fn set_body_position(&mut self, position: &BodyPosition) {
        self.body = position.clone();
    }
    fn scroll_offset(&self) -> Vec2 {
        self.scroll
    }
    fn scroll_to(&mut self, offset: Vec2) {
        self.scroll = offset;
    }
    fn inner_height(&self) -> f64 {
        self.viewport.height
    }
    fn scrollbar_width(&self) -> f64 {
        0.0
    }
    fn location(&self) -> &str {
        "https://example.test/"
    }
}

impl DrawerHost for FakePage {
    fn panel_rect(&self) -> Option<Rect> {
        Some(self.panel)
    }
    fn panel_transform(&self) -> Option<String> {
        Some(self.panel_transform.to_matrix())
    }
    fn viewport_size(&self) -> Size {
        self.viewport
    }
    fn visual_viewport_height(&self) -> Option<f64> {
        self.visual_height
    }
    fn has_text_selection(&self) -> bool {
        self.text_selection
    }
    fn focused_text_input(&self) -> bool {
        self.focused_input
    }
    fn has_wrapper(&self) -> bool {
        self.wrapper
    }
    fn body_background(&self) -> Option<String> {
        self.body_background.clone()
    }
    fn style_snapshot(&self, target: StyleTarget) -> StyleSnapshot {
        StyleSnapshot(format!("{target:?}"))
    }
    fn restore_style(&mut self, target: StyleTarget, _snapshot: &StyleSnapshot) {
        self.restored.push(target);
        if target == StyleTarget::Wrapper {
            self.wrapper_transform = None;
        }
    }
    fn apply_style(&mut self, target: StyleTarget, update: &StyleUpdate) {
        match target {
            StyleTarget::Panel => {
                if let Some(transform) = update.transform {
                    self.panel_transform = transform;
                }
            }
            StyleTarget::Overlay => {
                if let Some(opacity) = update.opacity {
                    self.overlay_opacity = Some(opacity);
                }
            }
            StyleTarget::Wrapper => {
                if let Some(transform) = update.transform {
                    self.wrapper_transform = Some(transform);
                }
            }
            StyleTarget::Body => {
                if let Some(background) = &update.background {
                    self.body_background = match background {
                        Background::Set(color) => Some(color.clone()),
                        Background::Remove => None,
                    };
                }
            }
        }
        self.applied.push((target, update.clone()));
    }
    fn set_dragging_marker(&mut self, dragging: bool) {
        self.dragging_marker = dragging;
    }
    fn capture_pointer(&mut self, pointer_id: u64) {
        self.captured.push(pointer_id);
    }
}

/// A mouse event at `(100, y)`.
pub(crate) fn at(y: f64, time_ms: u64) -> PointerInput {
    PointerInput::new(Point::new(100.0, y), time_ms)
}

/// A touch event at `(100, y)`.
pub(crate) fn touch_at(y: f64, time_ms: u64) -> PointerInput {
    at(y, time_ms).with_type(PointerType::Touch)
}

/// Presses at `from_y`, moves to `to_y` and releases there, taking
/// `duration_ms` between press and release.
pub(crate) fn swipe(
    drawer: &mut Drawer,
    page: &mut FakePage,
    from_y: f64,
    to_y: f64,
    start_ms: u64,
    duration_ms: u64,
) -> ReleaseOutcome {
    drawer.content_pointer_down(&at(from_y, start_ms), page);
    drawer.content_pointer_move(&at(to_y, start_ms + duration_ms), page);
    drawer.content_pointer_up(&at(to_y, start_ms + duration_ms), page)
}
