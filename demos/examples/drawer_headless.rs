// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawer engine basics.
//!
//! Drive a bottom sheet with two snap points through a scripted gesture
//! sequence, printing the CSS the engine asks for and the events it queues.
//!
//! Run:
//! - `cargo run -p understory_demos --example drawer_headless`

use kurbo::{Point, Rect, Size, Vec2};
use understory_drawer::{
    Drawer, DrawerConfig, DrawerEnvironment, DrawerHandle, DrawerHost, PointerInput, PointerType,
    SnapPoint, StyleSnapshot, StyleTarget, StyleUpdate, Transform,
};
use understory_scroll_lock::{BodyPosition, PageHost, Platform};

/// A phone-sized page that prints every style write.
struct PrintingPage {
    platform: Platform,
    body: BodyPosition,
    scroll: Vec2,
    panel_transform: Transform,
}

impl PageHost for PrintingPage {
    fn platform(&self) -> &Platform {
        &self.platform
    }
    fn body_position(&self) -> BodyPosition {
        self.body.clone()
    }
    fn set_body_position(&mut self, position: &BodyPosition) {
        println!("  body    ← position: {}; top: {}", position.position, position.top);
        self.body = position.clone();
    }
    fn scroll_offset(&self) -> Vec2 {
        self.scroll
    }
    fn scroll_to(&mut self, offset: Vec2) {
        println!("  window  ← scroll to {}", offset.y);
        self.scroll = offset;
    }
    fn inner_height(&self) -> f64 {
        844.0
    }
    fn scrollbar_width(&self) -> f64 {
        0.0
    }
    fn location(&self) -> &str {
        "https://example.test/checkout"
    }
}

impl DrawerHost for PrintingPage {
    fn panel_rect(&self) -> Option<Rect> {
        Some(Rect::new(0.0, 0.0, 390.0, 844.0))
    }
    fn panel_transform(&self) -> Option<String> {
        Some(self.panel_transform.to_matrix())
    }
    fn viewport_size(&self) -> Size {
        Size::new(390.0, 844.0)
    }
    fn style_snapshot(&self, _target: StyleTarget) -> StyleSnapshot {
        StyleSnapshot::default()
    }
    fn restore_style(&mut self, target: StyleTarget, _snapshot: &StyleSnapshot) {
        println!("  {target:?} ← (restored)");
    }
    fn apply_style(&mut self, target: StyleTarget, update: &StyleUpdate) {
        if let (StyleTarget::Panel, Some(transform)) = (target, update.transform) {
            self.panel_transform = transform;
        }
        println!("  {target:?} ← {update}");
    }
}

fn touch(y: f64, time_ms: u64) -> PointerInput {
    PointerInput::new(Point::new(195.0, y), time_ms).with_type(PointerType::Touch)
}

fn report(label: &str, drawer: &mut Drawer) {
    println!("{label}");
    for event in drawer.drain_events() {
        println!("  event: {event:?}");
    }
}

fn main() {
    let mut page = PrintingPage {
        platform: Platform::new(
            "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) Version/17.0 Mobile/15E148 Safari/604.1",
            "iPhone",
        ),
        body: BodyPosition::default(),
        scroll: Vec2::new(0.0, 640.0),
        panel_transform: Transform::Identity,
    };

    let config = DrawerConfig::new()
        .with_snap_points([SnapPoint::Pixels(320), SnapPoint::Fraction(1.0)]);
    let env = DrawerEnvironment::shared();
    let mut drawer = Drawer::new(config, env, &page);
    let mut handle = DrawerHandle::new();

    println!("open at t=0");
    drawer.set_open(true, 0, &mut page);
    drawer.tick(600, &mut page);
    report("after the open transition", &mut drawer);

    // A short upward flick steps to the next snap point.
    println!("flick up");
    drawer.content_pointer_down(&touch(700.0, 1_000), &mut page);
    drawer.content_pointer_move(&touch(640.0, 1_060), &mut page);
    let outcome = drawer.content_pointer_up(&touch(640.0, 1_060), &mut page);
    println!("  → {outcome:?}");
    report("", &mut drawer);

    // A tap on the handle at the most open point dismisses.
    println!("tap the handle");
    handle.click(2_000);
    if let Some(deadline) = handle.next_deadline() {
        handle.tick(deadline, &mut drawer, &mut page);
    }
    report("", &mut drawer);

    while let Some(deadline) = drawer.next_deadline() {
        drawer.tick(deadline, &mut page);
    }
    report("after the close transition", &mut drawer);
    println!("visible: {}", drawer.is_visible());
}
