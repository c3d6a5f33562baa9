// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Press, drag and release on drawers without snap points.

use kurbo::{Point, Rect};
use understory_drawer::{
    Drawer, DrawerConfig, DrawerDirection, DrawerEnvironment, DrawerEvent, PointerInput,
    ReleaseOutcome, TargetNode, TargetPath, Transform,
};

mod common;

use common::{FakePage, at, swipe};

fn open_drawer(config: DrawerConfig, page: &mut FakePage) -> Drawer {
    let mut drawer = Drawer::new(config, DrawerEnvironment::shared(), page);
    drawer.set_open(true, 0, page);
    drawer.drain_events();
    drawer
}

#[test]
fn slow_release_past_close_threshold_closes() {
    let mut page = FakePage::desktop();
    let mut drawer = open_drawer(DrawerConfig::default(), &mut page);

    // 100 px of a 400 px panel is exactly the 0.25 threshold; 0.1 px/ms is slow.
    let outcome = swipe(&mut drawer, &mut page, 500.0, 600.0, 1_000, 1_000);
    assert_eq!(outcome, ReleaseOutcome::Closed);
    assert!(!drawer.is_open());
    // Off-screen by the viewport height.
    assert_eq!(page.panel_offset(), 800.0);
    assert_eq!(page.overlay_opacity, Some(0.0));
}

#[test]
fn slow_release_short_of_threshold_resets() {
    let mut page = FakePage::desktop();
    let mut drawer = open_drawer(DrawerConfig::default(), &mut page);

    let outcome = swipe(&mut drawer, &mut page, 500.0, 596.0, 1_000, 1_000);
    assert_eq!(outcome, ReleaseOutcome::Reset);
    assert!(drawer.is_open());
    assert_eq!(page.panel_transform, Transform::Identity);
    assert_eq!(page.overlay_opacity, Some(1.0));
    assert!(
        drawer
            .drain_events()
            .contains(&DrawerEvent::Release { open: true })
    );
}

#[test]
fn fast_short_flick_closes() {
    let mut page = FakePage::desktop();
    let mut drawer = open_drawer(DrawerConfig::default(), &mut page);

    // 40 px in 50 ms is 0.8 px/ms, above the 0.4 velocity threshold.
    let outcome = swipe(&mut drawer, &mut page, 500.0, 540.0, 1_000, 50);
    assert_eq!(outcome, ReleaseOutcome::Closed);
}

#[test]
fn panel_follows_pointer_and_backdrop_fades() {
    let mut page = FakePage::desktop();
    let mut drawer = open_drawer(DrawerConfig::default(), &mut page);

    assert!(drawer.content_pointer_down(&at(500.0, 1_000), &mut page));
    assert_eq!(page.captured, [1]);
    assert!(!drawer.is_dragging());

    drawer.content_pointer_move(&at(600.0, 1_100), &mut page);
    assert!(drawer.is_dragging());
    assert!(page.dragging_marker);
    assert_eq!(page.panel_offset(), 100.0);
    assert_eq!(page.overlay_opacity, Some(0.75));
    assert_eq!(
        drawer.drain_events(),
        [DrawerEvent::Drag { percentage: 0.25 }]
    );

    drawer.content_pointer_up(&at(600.0, 1_200), &mut page);
    assert!(!page.dragging_marker);
}

#[test]
fn pulling_past_open_is_damped() {
    let mut page = FakePage::desktop();
    let mut drawer = open_drawer(DrawerConfig::default(), &mut page);

    drawer.content_pointer_down(&at(500.0, 1_000), &mut page);
    drawer.content_pointer_move(&at(550.0, 1_050), &mut page);
    assert!(drawer.is_dragging());
    // Back up past the start: 50 px toward open.
    drawer.content_pointer_move(&at(450.0, 1_100), &mut page);
    let offset = page.panel_offset();
    assert!(
        offset < -15.0 && offset > -16.0,
        "damped offset out of range: {offset}"
    );
}

#[test]
fn drags_are_ignored_right_after_opening() {
    let mut page = FakePage::desktop();
    let mut drawer = open_drawer(DrawerConfig::default(), &mut page);

    drawer.content_pointer_down(&at(500.0, 100), &mut page);
    drawer.content_pointer_move(&at(650.0, 200), &mut page);
    assert!(!drawer.is_dragging());
    assert_eq!(page.panel_transform, Transform::Identity);
    assert_eq!(
        drawer.content_pointer_up(&at(650.0, 250), &mut page),
        ReleaseOutcome::Ignored
    );
    assert!(drawer.is_open());
}

#[test]
fn scrolled_content_vetoes_the_drag_until_the_timeout() {
    let mut page = FakePage::desktop();
    let mut drawer = open_drawer(DrawerConfig::default(), &mut page);
    let scrolled =
        TargetPath::from_nodes([TargetNode::new().scrollable(50.0), TargetNode::panel()]);
    let at_top = TargetPath::from_nodes([TargetNode::new().scrollable(0.0), TargetNode::panel()]);

    drawer.content_pointer_down(&at(500.0, 1_000).with_target(scrolled.clone()), &mut page);
    drawer.content_pointer_move(&at(600.0, 1_000).with_target(scrolled), &mut page);
    assert!(!drawer.is_dragging());

    // Content scrolled back to the top, but the veto window is still running.
    drawer.content_pointer_move(&at(610.0, 1_050).with_target(at_top.clone()), &mut page);
    assert!(!drawer.is_dragging());

    // The window was refreshed at 1050; 150 ms later the drag goes through.
    drawer.content_pointer_move(&at(620.0, 1_200).with_target(at_top), &mut page);
    assert!(drawer.is_dragging());
}

#[test]
fn no_drag_targets_never_drag() {
    let mut page = FakePage::desktop();
    let mut drawer = open_drawer(DrawerConfig::default(), &mut page);
    let no_drag = TargetPath::from_nodes([TargetNode::new().no_drag(), TargetNode::panel()]);
    let select = TargetPath::from_nodes([TargetNode::new().select(), TargetNode::panel()]);

    drawer.content_pointer_down(&at(500.0, 1_000).with_target(no_drag.clone()), &mut page);
    drawer.content_pointer_move(&at(600.0, 1_100).with_target(no_drag), &mut page);
    assert!(!drawer.is_dragging());
    drawer.content_pointer_move(&at(620.0, 1_200).with_target(select), &mut page);
    assert!(!drawer.is_dragging());
}

#[test]
fn presses_outside_the_panel_are_ignored() {
    let mut page = FakePage::desktop();
    let mut drawer = open_drawer(DrawerConfig::default(), &mut page);
    let outside = at(500.0, 1_000).with_target(TargetPath::from_nodes([TargetNode::new()]));
    assert!(!drawer.on_press(&outside, &mut page));
    assert!(!drawer.is_pressed());
}

#[test]
fn non_dismissible_drawer_cannot_be_closed_by_the_user() {
    let mut page = FakePage::desktop();
    let mut drawer = open_drawer(DrawerConfig::new().with_dismissible(false), &mut page);

    assert!(!drawer.content_pointer_down(&at(500.0, 1_000), &mut page));
    assert!(!drawer.on_dialog_open_change(false, 1_000, &mut page));
    assert!(!drawer.on_escape_key(1_000, &mut page));
    assert!(drawer.is_open());

    // Programmatic close still works.
    drawer.set_open(false, 1_000, &mut page);
    assert!(!drawer.is_open());
}

#[test]
fn fast_release_starts_a_guard_window() {
    let mut page = FakePage::desktop();
    let mut drawer = open_drawer(DrawerConfig::default(), &mut page);

    swipe(&mut drawer, &mut page, 500.0, 560.0, 1_000, 100);
    assert!(drawer.phase().is_releasing());
    drawer.tick(1_199, &mut page);
    assert!(drawer.phase().is_releasing());
    drawer.tick(1_300, &mut page);
    assert!(!drawer.phase().is_releasing());
}

#[test]
fn page_scroll_prevention_pauses_while_dragging_and_after_release() {
    let mut page = FakePage::desktop();
    let mut drawer = Drawer::new(DrawerConfig::default(), DrawerEnvironment::shared(), &page);
    assert!(!drawer.prevents_scroll());
    drawer.set_open(true, 0, &mut page);
    assert!(drawer.prevents_scroll());

    drawer.content_pointer_down(&at(500.0, 1_000), &mut page);
    drawer.content_pointer_move(&at(540.0, 1_500), &mut page);
    assert!(drawer.is_dragging());
    assert!(!drawer.prevents_scroll());

    // 40 px in 500 ms: short of the threshold, but fast enough for the guard.
    let outcome = drawer.content_pointer_up(&at(540.0, 1_500), &mut page);
    assert_eq!(outcome, ReleaseOutcome::Reset);
    assert!(drawer.phase().is_releasing());
    assert!(!drawer.prevents_scroll());
    drawer.tick(1_700, &mut page);
    assert!(drawer.prevents_scroll());

    let non_modal = Drawer::new(
        DrawerConfig::new().with_modal(false),
        DrawerEnvironment::shared(),
        &page,
    );
    assert!(!non_modal.prevents_scroll());
}

#[test]
fn right_drawer_closes_on_rightward_flick() {
    let mut page = FakePage::desktop();
    page.panel = Rect::new(90.0, 0.0, 390.0, 800.0);
    let mut drawer = open_drawer(
        DrawerConfig::new().with_direction(DrawerDirection::Right),
        &mut page,
    );

    // Horizontal drawers skip the open-time suppression.
    let press = PointerInput::new(Point::new(200.0, 300.0), 100);
    drawer.content_pointer_down(&press, &mut page);
    drawer.content_pointer_move(&PointerInput::new(Point::new(300.0, 300.0), 150), &mut page);
    assert!(drawer.is_dragging());
    let outcome =
        drawer.content_pointer_up(&PointerInput::new(Point::new(300.0, 300.0), 150), &mut page);
    assert_eq!(outcome, ReleaseOutcome::Closed);
    // Off-screen to the right by the viewport width.
    assert_eq!(
        page.panel_transform,
        Transform::Translate {
            vertical: false,
            offset: 390.0
        }
    );
}

#[test]
fn open_and_close_lifecycle_events() {
    let mut page = FakePage::desktop();
    let mut drawer = Drawer::new(DrawerConfig::default(), DrawerEnvironment::shared(), &page);
    assert!(!drawer.has_been_opened());

    drawer.set_open(true, 0, &mut page);
    assert!(drawer.is_visible() && drawer.has_been_opened());
    drawer.tick(500, &mut page);
    assert_eq!(
        drawer.drain_events(),
        [
            DrawerEvent::OpenChanged(true),
            DrawerEvent::AnimationEnd { open: true }
        ]
    );

    drawer.set_open(false, 1_000, &mut page);
    drawer.tick(1_500, &mut page);
    assert!(!drawer.is_visible());
    assert_eq!(
        drawer.drain_events(),
        [
            DrawerEvent::Close,
            DrawerEvent::OpenChanged(false),
            DrawerEvent::AnimationEnd { open: false }
        ]
    );
    assert_eq!(drawer.next_deadline(), None);
}
