// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawers resting at snap points: release targets, flicks, fading, and
//! render attributes.

use kurbo::Size;
use understory_drawer::{
    Drawer, DrawerConfig, DrawerEnvironment, DrawerEvent, ReleaseOutcome, SnapPoint, StyleTarget,
};

mod common;

use common::{FakePage, at, swipe};

const QUARTER: SnapPoint = SnapPoint::Fraction(0.25);
const HALF: SnapPoint = SnapPoint::Fraction(0.5);
const FULL: SnapPoint = SnapPoint::Fraction(1.0);

fn open_with(config: DrawerConfig, page: &mut FakePage) -> Drawer {
    let mut drawer = Drawer::new(config, DrawerEnvironment::shared(), page);
    drawer.set_open(true, 0, page);
    drawer.drain_events();
    drawer
}

fn two_points() -> DrawerConfig {
    DrawerConfig::new().with_snap_points([HALF, FULL])
}

fn three_points() -> DrawerConfig {
    DrawerConfig::new().with_snap_points([QUARTER, HALF, FULL])
}

#[test]
fn opening_rests_at_the_first_snap_point() {
    let mut page = FakePage::desktop();
    let mut drawer = Drawer::new(two_points(), DrawerEnvironment::shared(), &page);
    drawer.set_open(true, 0, &mut page);

    assert_eq!(drawer.snap_points().offsets(), [400.0, 0.0]);
    assert_eq!(drawer.active_snap_point(), Some(HALF));
    assert_eq!(page.panel_offset(), 400.0);
    // Below the fade-from point the backdrop stays hidden.
    assert_eq!(page.overlay_opacity, Some(0.0));
    assert_eq!(
        drawer.drain_events(),
        [
            DrawerEvent::OpenChanged(true),
            DrawerEvent::ActiveSnapPointChanged(Some(HALF))
        ]
    );
}

#[test]
fn configured_initial_snap_point_is_used() {
    let mut page = FakePage::desktop();
    let drawer = open_with(three_points().with_active_snap_point(HALF), &mut page);
    assert_eq!(drawer.snap_points().active_index(), Some(1));
    assert_eq!(page.panel_offset(), 400.0);
}

#[test]
fn flick_toward_open_steps_one_point() {
    let mut page = FakePage::desktop();
    let mut drawer = open_with(two_points(), &mut page);

    // 50 px in 50 ms: fast, but well under 40% of the viewport.
    let outcome = swipe(&mut drawer, &mut page, 500.0, 450.0, 1_000, 50);
    assert_eq!(outcome, ReleaseOutcome::Snapped(1));
    assert_eq!(drawer.active_snap_point(), Some(FULL));
    assert_eq!(page.panel_offset(), 0.0);
    assert_eq!(page.overlay_opacity, Some(1.0));
    // Reaching the most open point restarts the open-time window.
    assert_eq!(drawer.open_time(), Some(1_050));
}

#[test]
fn slow_release_settles_on_the_closest_point() {
    let mut page = FakePage::desktop();
    let mut drawer = open_with(two_points(), &mut page);

    // Dragged 100 px toward close from 400: 500 is nearest to 400.
    let outcome = swipe(&mut drawer, &mut page, 500.0, 600.0, 1_000, 1_000);
    assert_eq!(outcome, ReleaseOutcome::Snapped(0));
    assert_eq!(page.panel_offset(), 400.0);

    // Dragged 250 px toward open from 400: 150 is nearest to 0.
    let outcome = swipe(&mut drawer, &mut page, 500.0, 250.0, 3_000, 1_000);
    assert_eq!(outcome, ReleaseOutcome::Snapped(1));
    assert_eq!(page.panel_offset(), 0.0);
}

#[test]
fn flick_toward_close_from_first_point_closes() {
    let mut page = FakePage::desktop();
    let mut drawer = open_with(two_points(), &mut page);

    let outcome = swipe(&mut drawer, &mut page, 500.0, 540.0, 1_000, 50);
    assert_eq!(outcome, ReleaseOutcome::Closed);
    assert!(!drawer.is_open());
}

#[test]
fn non_dismissible_flick_clamps_to_first_point() {
    let mut page = FakePage::desktop();
    let mut drawer = open_with(two_points().with_dismissible(false), &mut page);

    let outcome = swipe(&mut drawer, &mut page, 500.0, 540.0, 1_000, 50);
    assert_eq!(outcome, ReleaseOutcome::Snapped(0));
    assert!(drawer.is_open());
    // The panel never moved past the first point.
    assert_eq!(page.panel_offset(), 400.0);

    // Very fast releases clamp too.
    let outcome = swipe(&mut drawer, &mut page, 300.0, 600.0, 2_000, 100);
    assert_eq!(outcome, ReleaseOutcome::Snapped(0));
    assert!(drawer.is_open());
}

#[test]
fn very_fast_release_jumps_to_the_last_point() {
    let mut page = FakePage::desktop();
    let mut drawer = open_with(three_points(), &mut page);

    // 200 px in 80 ms is 2.5 px/ms.
    let outcome = swipe(&mut drawer, &mut page, 500.0, 300.0, 1_000, 80);
    assert_eq!(outcome, ReleaseOutcome::Snapped(2));
}

#[test]
fn sequential_snapping_only_steps() {
    let mut page = FakePage::desktop();
    let mut drawer = open_with(three_points().with_snap_to_sequential_point(true), &mut page);

    let outcome = swipe(&mut drawer, &mut page, 500.0, 300.0, 1_000, 80);
    assert_eq!(outcome, ReleaseOutcome::Snapped(1));
}

#[test]
fn backdrop_fades_across_the_fade_boundary() {
    let mut page = FakePage::desktop();
    let mut drawer = open_with(three_points().with_active_snap_point(HALF), &mut page);
    assert!(drawer.snap_points().is_overlay_snap_point());

    // Halfway from 400 toward 0, the backdrop is halfway in.
    drawer.content_pointer_down(&at(500.0, 1_000), &mut page);
    drawer.content_pointer_move(&at(300.0, 1_500), &mut page);
    assert_eq!(page.panel_offset(), 200.0);
    assert_eq!(page.overlay_opacity, Some(0.5));
    drawer.content_pointer_up(&at(300.0, 1_500), &mut page);
    drawer.drain_events();

    // Back at the boundary point, dragging toward close keeps it hidden.
    drawer.snap_to(1, 2_000, &mut page);
    drawer.content_pointer_down(&at(500.0, 3_000), &mut page);
    drawer.content_pointer_move(&at(520.0, 3_500), &mut page);
    assert_eq!(page.overlay_opacity, Some(0.0));
    assert!(
        drawer
            .drain_events()
            .contains(&DrawerEvent::Drag { percentage: 1.0 })
    );
}

#[test]
fn set_active_snap_point_moves_the_panel() {
    let mut page = FakePage::desktop();
    let mut drawer = open_with(three_points(), &mut page);

    assert!(drawer.set_active_snap_point(FULL, 1_000, &mut page));
    assert_eq!(page.panel_offset(), 0.0);
    assert_eq!(
        drawer.drain_events(),
        [DrawerEvent::ActiveSnapPointChanged(Some(FULL))]
    );
    assert!(!drawer.set_active_snap_point(SnapPoint::Pixels(123), 1_000, &mut page));
    assert_eq!(drawer.active_snap_point(), Some(FULL));
}

#[test]
fn pixel_snap_points_measure_visible_extent() {
    let mut page = FakePage::desktop();
    let drawer = open_with(
        DrawerConfig::new().with_snap_points([SnapPoint::Pixels(200), FULL]),
        &mut page,
    );
    assert_eq!(drawer.snap_points().offsets(), [600.0, 0.0]);
    assert_eq!(page.panel_offset(), 600.0);
}

#[test]
fn viewport_resize_resnaps_the_open_panel() {
    let mut page = FakePage::desktop();
    let mut drawer = open_with(two_points(), &mut page);

    page.viewport = Size::new(390.0, 1_000.0);
    drawer.on_viewport_resize(page.viewport, 1_000, &mut page);
    assert_eq!(drawer.snap_points().offsets(), [500.0, 0.0]);
    assert_eq!(page.panel_offset(), 500.0);
    assert_eq!(
        drawer.drain_events(),
        [DrawerEvent::ViewportResized(Size::new(390.0, 1_000.0))]
    );
}

#[test]
fn closing_returns_to_the_first_point_once_hidden() {
    let mut page = FakePage::desktop();
    let mut drawer = open_with(two_points(), &mut page);
    drawer.snap_to(1, 1_000, &mut page);
    drawer.drain_events();

    drawer.set_open(false, 2_000, &mut page);
    assert_eq!(drawer.active_snap_point(), Some(FULL));
    drawer.tick(2_500, &mut page);
    assert_eq!(drawer.active_snap_point(), Some(HALF));
    assert!(
        drawer
            .drain_events()
            .contains(&DrawerEvent::ActiveSnapPointChanged(Some(HALF)))
    );
}

#[test]
fn render_attributes_track_state() {
    let mut page = FakePage::desktop();
    let mut drawer = Drawer::new(three_points(), DrawerEnvironment::shared(), &page);

    let content = drawer.content_attributes();
    assert_eq!(content.get("data-vaul-drawer-direction"), Some("bottom"));
    assert_eq!(content.get("data-vaul-snap-points"), Some("false"));
    assert_eq!(content.get("data-state"), Some("closed"));
    assert_eq!(content.get("--snap-point-height"), Some("600px"));

    drawer.set_open(true, 0, &mut page);
    assert_eq!(
        drawer.content_attributes().get("data-vaul-delayed-snap-points"),
        Some("false")
    );
    drawer.tick(16, &mut page);
    let content = drawer.content_attributes();
    assert_eq!(content.get("data-vaul-snap-points"), Some("true"));
    assert_eq!(content.get("data-vaul-delayed-snap-points"), Some("true"));
    assert_eq!(content.get("data-vaul-animate"), Some("true"));
    assert_eq!(content.get("data-state"), Some("open"));
    assert_eq!(content.get("data-vaul-dragging"), Some("false"));

    let overlay = drawer.overlay_attributes();
    assert_eq!(overlay.get("data-vaul-overlay"), Some(""));
    assert_eq!(overlay.get("data-vaul-snap-points-overlay"), Some("false"));
    drawer.snap_to(2, 100, &mut page);
    assert_eq!(
        drawer.overlay_attributes().get("data-vaul-snap-points-overlay"),
        Some("true")
    );

    let handle = drawer.handle_attributes();
    assert_eq!(handle.get("data-vaul-drawer-visible"), Some("true"));
    assert_eq!(handle.get("aria-hidden"), Some("true"));
}

#[test]
fn overlay_transition_is_restored_on_release_at_the_boundary() {
    let mut page = FakePage::desktop();
    let mut drawer = open_with(two_points(), &mut page);
    swipe(&mut drawer, &mut page, 500.0, 450.0, 1_000, 50);
    let opacity_transitions = page
        .updates_for(StyleTarget::Overlay)
        .filter(|u| u.transition.is_some() && u.opacity.is_none())
        .count();
    // One from the drag (none) and one restoring the fade on release.
    assert_eq!(opacity_transitions, 2);
}
