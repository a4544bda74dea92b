use reel_core::{NullFactory, Observable, Orientation, Point, Size, VerticalDirection};
use reel_foundation::{
    Edge, ItemTemplate, LayoutConfig, PageConfig, PageDecision, RefreshConfig, RefreshStage,
    ReelConfig, ReelView, ScrollEvent,
};
use reel_testing::{
    assert_approx_eq, assert_window_consistent, MockScrollDriver, RecordingBinder, ScrollRobot,
};
use std::cell::Cell;
use std::rc::Rc;

fn carousel(footer_loop: bool) -> ReelConfig {
    ReelConfig {
        layout: LayoutConfig {
            orientation: Orientation::Horizontal,
            viewport: Size::new(400.0, 300.0),
            template: ItemTemplate {
                size: Size::new(400.0, 300.0),
                ..Default::default()
            },
            overscan_multiple: 3.0,
            footer_loop,
            ..Default::default()
        },
        paging: Some(PageConfig::default()),
        refresh: None,
    }
}

fn feed() -> ReelConfig {
    ReelConfig {
        layout: LayoutConfig {
            viewport: Size::new(300.0, 500.0),
            template: ItemTemplate {
                size: Size::new(300.0, 100.0),
                ..Default::default()
            },
            ..Default::default()
        },
        paging: None,
        refresh: Some(RefreshConfig::default()),
    }
}

fn robot(config: ReelConfig, total: usize) -> ScrollRobot<NullFactory> {
    let (binder, _log) = RecordingBinder::new();
    let view = ReelView::new(config, NullFactory, binder, MockScrollDriver::new())
        .expect("valid config");
    let mut robot = ScrollRobot::new(view);
    robot.set_item_total(total);
    robot.take_events();
    robot
}

fn page_turns(events: &[ScrollEvent]) -> Vec<usize> {
    events
        .iter()
        .filter_map(|event| match event {
            ScrollEvent::PageTurning { page } => Some(*page),
            _ => None,
        })
        .collect()
}

fn refresh_events(events: &[ScrollEvent]) -> Vec<(Edge, RefreshStage, bool)> {
    events
        .iter()
        .filter_map(|event| match event {
            ScrollEvent::Refresh(refresh) => Some((refresh.edge, refresh.stage, refresh.triggered)),
            _ => None,
        })
        .collect()
}

#[test]
fn swipes_turn_pages_once_per_change() {
    let mut robot = robot(carousel(false), 5);
    assert_eq!(robot.view().layout().len(), 3);

    let decision = robot.drag(Point::new(300.0, 0.0), Point::new(50.0, 0.0), 5);
    assert!(matches!(decision, Some(PageDecision::Snap { turned: true, .. })));
    robot.settle();
    assert_eq!(robot.driver().offset, Point::new(-400.0, 0.0));

    // short and slow: snaps back to page 1
    let decision = robot.drag_over(Point::new(300.0, 0.0), Point::new(250.0, 0.0), 5, 1.0);
    assert!(matches!(decision, Some(PageDecision::Snap { turned: false, .. })));
    robot.settle();
    assert_eq!(robot.driver().offset, Point::new(-400.0, 0.0));

    robot.drag(Point::new(300.0, 0.0), Point::new(50.0, 0.0), 5);
    robot.settle();

    assert_eq!(robot.view().current_page(), Some(2));
    assert_eq!(page_turns(&robot.take_events()), vec![1, 2]);
    assert_eq!(robot.driver().offset, Point::new(-800.0, 0.0));
    assert_window_consistent(robot.view().layout(), false);
}

#[test]
fn quick_flick_turns_page_below_distance_threshold() {
    let mut robot = robot(carousel(false), 5);
    // 60 px over a second: 60 px/s, short of both thresholds
    let decision = robot.drag_over(Point::new(300.0, 0.0), Point::new(240.0, 0.0), 3, 1.0);
    assert!(matches!(decision, Some(PageDecision::Snap { turned: false, .. })));
    assert_eq!(robot.view().current_page(), Some(0));
    robot.settle();
    assert_eq!(robot.driver().offset, Point::ZERO);

    // the same 60 px in three frames: 1200 px/s
    let decision = robot.drag(Point::new(300.0, 0.0), Point::new(240.0, 0.0), 3);
    assert!(matches!(decision, Some(PageDecision::Snap { turned: true, .. })));
    assert_eq!(robot.view().current_page(), Some(1));
    assert_approx_eq(robot.driver().velocity.x, -1200.0, 0.5, "flick velocity");
}

#[test]
fn dragging_back_from_first_page_stays_put() {
    let mut robot = robot(carousel(false), 5);
    let decision = robot.drag(Point::new(50.0, 0.0), Point::new(300.0, 0.0), 5);
    assert!(matches!(decision, Some(PageDecision::Snap { turned: false, .. })));
    assert_eq!(robot.view().current_page(), Some(0));
}

#[test]
fn footer_loop_wraps_last_page_to_first() {
    let mut robot = robot(carousel(true), 5);
    assert!(robot.view_mut().scroll_to_page(4, 0.3));
    robot.settle();
    assert_eq!(robot.view().current_page(), Some(4));

    let decision = robot.drag(Point::new(300.0, 0.0), Point::new(50.0, 0.0), 5);
    match decision {
        Some(PageDecision::Snap { request, turned }) => {
            assert!(turned);
            assert_eq!(request.page, 0);
        }
        other => panic!("expected a snap, got {:?}", other),
    }
    assert_eq!(robot.view().current_page(), Some(0));
    assert_window_consistent(robot.view().layout(), true);
}

#[test]
fn bounce_resolves_to_boundary_page() {
    let mut robot = robot(carousel(false), 5);
    // content pulled right past the first page: the correction points left
    robot.overscroll(Point::new(-80.0, 0.0));
    let decision = robot.drag(Point::new(50.0, 0.0), Point::new(130.0, 0.0), 4);
    assert_eq!(decision, Some(PageDecision::Rebound { page: 0 }));

    robot.overscroll(Point::new(80.0, 0.0));
    let decision = robot.drag(Point::new(130.0, 0.0), Point::new(50.0, 0.0), 4);
    assert_eq!(decision, Some(PageDecision::Rebound { page: 4 }));
    assert_eq!(robot.driver().bounce_requests, 2);
}

#[test]
fn pull_to_refresh_full_cycle() {
    let mut robot = robot(feed(), 30);

    // content dragged down past the top: the correction points up
    robot.overscroll(Point::new(0.0, 250.0));
    robot.view_mut().on_touch_moved();
    assert_eq!(
        refresh_events(&robot.take_events()),
        vec![
            (Edge::Header, RefreshStage::Touch, false),
            (Edge::Footer, RefreshStage::Release, false),
        ]
    );

    robot.overscroll(Point::new(0.0, 420.0));
    robot.view_mut().on_touch_moved();
    let events = robot.take_events();
    assert_eq!(refresh_events(&events)[0], (Edge::Header, RefreshStage::Wait, false));

    robot.settle();
    let events = robot.take_events();
    assert!(refresh_events(&events).contains(&(Edge::Header, RefreshStage::Lock, true)));
    assert_eq!(robot.driver().boundary_extension(Edge::Header), 200.0);

    // further pulls are ignored while locked
    robot.overscroll(Point::new(0.0, -300.0));
    robot.view_mut().on_touch_moved();
    assert!(robot.take_events().is_empty());

    robot.view_mut().release_refresh();
    assert_eq!(robot.driver().boundary_extension(Edge::Header), 0.0);
    assert_eq!(robot.driver().auto_scroll_restarts, 1);
    let refresh = robot.view().refresh().expect("refresh enabled");
    assert!(!refresh.is_locked());
    assert_eq!(refresh.edge_state(Edge::Header).progress, 0.0);
}

#[test]
fn bottom_to_top_feed_refreshes_at_the_top_edge() {
    let mut config = feed();
    config.layout.vertical_direction = VerticalDirection::BottomToTop;
    let mut robot = robot(config, 30);

    // content dragged down past the top, where the last items sit
    robot.overscroll(Point::new(0.0, 420.0));
    robot.view_mut().on_touch_moved();
    assert_eq!(
        refresh_events(&robot.take_events())[0],
        (Edge::Header, RefreshStage::Wait, false)
    );

    robot.settle();
    assert!(refresh_events(&robot.take_events()).contains(&(Edge::Header, RefreshStage::Lock, true)));
    assert_eq!(robot.driver().boundary_extension(Edge::Header), 200.0);
    assert_eq!(robot.driver().boundary_extension(Edge::Footer), 0.0);

    robot.view_mut().release_refresh();
    robot.take_events();

    // pushed up past the bottom
    robot.overscroll(Point::new(0.0, -250.0));
    robot.view_mut().on_touch_moved();
    assert_eq!(
        refresh_events(&robot.take_events())[0],
        (Edge::Footer, RefreshStage::Touch, false)
    );
}

#[test]
fn programmatic_scroll_adopts_page_from_window() {
    let mut robot = robot(carousel(false), 5);
    assert!(robot.view_mut().scroll_to_index(3, 0.3));
    robot.settle();
    assert_eq!(robot.driver().offset, Point::new(-1200.0, 0.0));
    assert_eq!(robot.view().current_page(), Some(0));
    assert!(page_turns(&robot.take_events()).is_empty());

    assert!(robot.view_mut().sync_page_with_window());
    assert_eq!(robot.view().current_page(), Some(3));
    robot.view_mut().on_scroll_ended_with_threshold();
    assert_eq!(page_turns(&robot.take_events()), vec![3]);
}

#[test]
fn settling_only_lowers_progress() {
    let mut robot = robot(feed(), 30);
    robot.overscroll(Point::new(0.0, 150.0));
    robot.view_mut().on_touch_moved();

    robot.driver_mut().auto_scrolling = true;
    robot.overscroll(Point::new(0.0, 180.0));
    robot.scroll_by(Point::new(0.0, -10.0), 1);
    let progress = |robot: &ScrollRobot<NullFactory>| {
        robot
            .view()
            .refresh()
            .map(|refresh| refresh.edge_state(Edge::Header).progress)
    };
    assert_eq!(progress(&robot), Some(0.75));

    robot.overscroll(Point::new(0.0, 60.0));
    robot.scroll_by(Point::new(0.0, 10.0), 1);
    assert_eq!(progress(&robot), Some(0.3));

    robot.overscroll(Point::ZERO);
    robot.scroll_by(Point::new(0.0, 10.0), 1);
    assert_eq!(progress(&robot), Some(0.0));
}

#[test]
fn edges_never_share_progress_or_lock() {
    let mut robot = robot(feed(), 30);
    let mut seed: u32 = 0x2545_f491;
    let mut next = move || {
        seed ^= seed << 13;
        seed ^= seed >> 17;
        seed ^= seed << 5;
        seed
    };

    for step in 0..400 {
        let pull = (next() % 1001) as f32 - 500.0;
        robot.overscroll(Point::new(0.0, pull));
        match next() % 5 {
            0 | 1 => robot.view_mut().on_touch_moved(),
            2 => {
                robot.driver_mut().auto_scrolling = next() % 2 == 0;
                robot.driver_mut().braking = next() % 4 == 0;
                let delta = if step % 2 == 0 { 7.0 } else { -7.0 };
                robot.scroll_by(Point::new(0.0, delta), 1);
            }
            3 => robot.view_mut().on_auto_scroll_started(),
            _ => robot.view_mut().release_refresh(),
        }

        let refresh = robot.view().refresh().expect("refresh enabled");
        let header = refresh.edge_state(Edge::Header);
        let footer = refresh.edge_state(Edge::Footer);
        assert!(
            !(header.progress > 0.0 && footer.progress > 0.0),
            "step {}: both edges in progress {:?} {:?}",
            step,
            header,
            footer
        );
        assert!(!(header.locked && footer.locked), "step {}", step);
    }
}

#[test]
fn observable_total_drives_the_window() {
    let mut robot = robot(feed(), 0);
    let mut total = Observable::new(0usize);
    let pending = Rc::new(Cell::new(None));
    let sink = pending.clone();
    total.subscribe(move |value: &usize| sink.set(Some(*value)));

    total.set(40);
    if let Some(value) = pending.take() {
        robot.set_item_total(value);
    }
    assert_eq!(robot.view().layout().len(), 10);

    robot.scroll_by(Point::new(0.0, 1500.0), 150);
    assert!(robot.view().layout().header().map_or(0, |item| item.data_index) > 0);

    total.update(|value| *value = 4);
    if let Some(value) = pending.take() {
        robot.set_item_total(value);
    }
    let layout = robot.view().layout();
    assert_eq!(layout.len(), 4);
    assert_eq!(layout.header().map(|item| item.data_index), Some(0));
    assert_eq!(robot.driver().last_scroll_request(), Some((Point::ZERO, 0.0)));
}
