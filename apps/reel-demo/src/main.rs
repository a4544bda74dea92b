mod scroller;

use reel_core::{
    EdgeInsets, InstanceFactory, InstanceId, NullFactory, Observable, Orientation, Point, Size,
    Spacing,
};
use reel_foundation::{
    ConfigError, ItemBinder, ItemTemplate, LayoutConfig, PageConfig, RecyclerLayout,
    RefreshConfig, RefreshStage, ReelConfig, ReelView, ScrollEvent,
};
use scroller::Scroller;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

const FRAME: f32 = 1.0 / 60.0;
const MAX_SETTLE_FRAMES: usize = 600;

fn main() -> Result<(), ConfigError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    println!("=== Reel demo ===");
    println!("Set RUST_LOG=debug to watch individual recycles.");
    println!();

    chat_feed()?;
    carousel()?;
    pull_to_refresh()?;
    Ok(())
}

/// Message bodies shared between the data model and the binder.
type Messages = Rc<RefCell<Vec<String>>>;

struct ChatBinder {
    messages: Messages,
}

impl ItemBinder for ChatBinder {
    fn bind(&mut self, instance: InstanceId, data_index: usize) {
        if let Some(message) = self.messages.borrow().get(data_index) {
            log::trace!("{} shows \"{}\"", instance, message);
        }
    }

    fn measure(&mut self, _instance: InstanceId, data_index: usize) -> Option<Size> {
        let messages = self.messages.borrow();
        let message = messages.get(data_index)?;
        let lines = message.len() / 32 + 1;
        Some(Size::new(0.0, 24.0 + 18.0 * lines as f32))
    }
}

fn message(index: usize) -> String {
    let words = ["ok", "see you soon", "did the build pass?", "lunch", "ship it"];
    let mut text = format!("#{index}: ");
    for i in 0..(index % 7 + 1) {
        text.push_str(words[(index + i) % words.len()]);
        text.push(' ');
    }
    text
}

fn chat_feed() -> Result<(), ConfigError> {
    println!("--- chat feed: variable heights, fling, appends ---");
    let mirror: Messages = Rc::default();
    let pending = Rc::new(Cell::new(None));
    let mut messages = Observable::new(Vec::new());
    {
        let mirror = mirror.clone();
        let pending = pending.clone();
        messages.subscribe(move |all: &Vec<String>| {
            *mirror.borrow_mut() = all.clone();
            pending.set(Some(all.len()));
        });
    }

    let config = ReelConfig {
        layout: LayoutConfig {
            viewport: Size::new(360.0, 640.0),
            template: ItemTemplate {
                size: Size::new(360.0, 60.0),
                ..Default::default()
            },
            padding: EdgeInsets::uniform(12.0),
            spacing: Spacing::new(0.0, 8.0),
            ..Default::default()
        },
        ..Default::default()
    };
    let flow = config.layout.flow_axis();
    let binder = ChatBinder {
        messages: mirror.clone(),
    };
    let mut view = ReelView::new(config, NullFactory, binder, Scroller::new(flow))?;

    messages.set((0..500).map(message).collect());
    apply_total(&mut view, &pending);
    log_window("initial", view.layout());

    drag(&mut view, Point::new(0.0, 600.0), 12);
    release(&mut view, Point::new(0.0, 0.0), Point::new(0.0, 600.0));
    settle(&mut view);
    log_window("after fling", view.layout());

    messages.update(|all| all.extend((500..520).map(message)));
    apply_total(&mut view, &pending);
    view.scroll_to_index(510, 0.4);
    settle(&mut view);
    log_window("after jump to 510", view.layout());

    let stats = view.layout().stats();
    log::info!(
        "chat feed: {} live, {} pooled, {} created, {} recycles",
        stats.items_in_use,
        stats.items_in_pool,
        stats.total_created,
        stats.recycle_count
    );
    log::info!("chat feed: content size {:?}", view.driver().content_size());
    view.take_events();
    println!();
    Ok(())
}

fn carousel() -> Result<(), ConfigError> {
    println!("--- carousel: horizontal, looping, paged ---");
    let config = ReelConfig {
        layout: LayoutConfig {
            orientation: Orientation::Horizontal,
            viewport: Size::new(320.0, 200.0),
            template: ItemTemplate {
                size: Size::new(320.0, 200.0),
                ..Default::default()
            },
            spacing: Spacing::uniform(16.0),
            overscan_multiple: 3.0,
            footer_loop: true,
            header_loop: true,
            ..Default::default()
        },
        paging: Some(PageConfig::default()),
        refresh: None,
    };
    let flow = config.layout.flow_axis();
    let mut view = ReelView::new(
        config,
        NullFactory,
        |instance: InstanceId, index: usize| log::debug!("card {} -> slide {}", instance, index),
        Scroller::new(flow),
    )?;
    view.set_item_total(6);

    for swipe in 0..8 {
        let (start, end) = if swipe == 5 {
            (Point::new(60.0, 0.0), Point::new(260.0, 0.0))
        } else {
            (Point::new(260.0, 0.0), Point::new(60.0, 0.0))
        };
        drag(&mut view, end - start, 10);
        release(&mut view, start, end);
        settle(&mut view);
        for event in view.take_events() {
            if let ScrollEvent::PageTurning { page } = event {
                log::info!("carousel: swipe {} turned to page {}", swipe, page);
            }
        }
    }
    println!();
    Ok(())
}

fn pull_to_refresh() -> Result<(), ConfigError> {
    println!("--- pull to refresh ---");
    let config = ReelConfig {
        layout: LayoutConfig {
            viewport: Size::new(360.0, 640.0),
            template: ItemTemplate {
                size: Size::new(360.0, 80.0),
                ..Default::default()
            },
            ..Default::default()
        },
        paging: None,
        refresh: Some(RefreshConfig {
            header_out_offset: 80.0,
            header_multiple: 1.0,
            ..Default::default()
        }),
    };
    let flow = config.layout.flow_axis();
    let mut view = ReelView::new(
        config,
        NullFactory,
        |_: InstanceId, _: usize| {},
        Scroller::new(flow),
    )?;
    let mut total = 20;
    view.set_item_total(total);

    // pull the content down past the top
    drag(&mut view, Point::new(0.0, -300.0), 20);
    release(&mut view, Point::new(0.0, 300.0), Point::new(0.0, 0.0));
    let mut refreshing = false;
    for frame in 0..MAX_SETTLE_FRAMES {
        frame_tick(&mut view);
        for event in view.take_events() {
            if let ScrollEvent::Refresh(refresh) = event {
                if refresh.triggered {
                    log::info!("refresh: {:?} triggered", refresh.edge);
                    refreshing = true;
                }
                if refresh.stage == RefreshStage::Lock && frame % 10 == 0 {
                    log::info!("refresh: holding at progress {:.2}", refresh.progress);
                }
            }
        }
        if refreshing && frame == 60 {
            total += 10;
            view.set_item_total(total);
            view.release_refresh();
            log::info!("refresh: loaded, {} items", total);
        }
        if frame > 60 && !view.driver().is_settling() {
            break;
        }
    }
    log_window("after refresh", view.layout());
    println!();
    Ok(())
}

fn apply_total<F: InstanceFactory>(view: &mut ReelView<F, Scroller>, pending: &Cell<Option<usize>>) {
    if let Some(total) = pending.take() {
        view.set_item_total(total);
    }
}

/// Offset range in which the list's first and last items stay inside the
/// viewport. Unbounded on looping or not-yet-reached ends.
fn flow_bounds<F: InstanceFactory>(layout: &RecyclerLayout<F>) -> (f32, f32) {
    let flow = layout.flow();
    let viewport = layout.viewport();
    let loops = layout.loop_policy();
    let last = layout.item_total().saturating_sub(1);

    let max = match layout.header() {
        Some(header) if header.data_index == 0 && !loops.backward => {
            viewport.start() - flow.leading_edge(&header.bounds)
        }
        Some(_) => f32::INFINITY,
        None => 0.0,
    };
    let min = match layout.footer() {
        Some(footer) if footer.data_index == last && !loops.forward => {
            viewport.trailing_boundary()
                - viewport.trailing_padding()
                - flow.trailing_edge(&footer.bounds)
        }
        Some(_) => f32::NEG_INFINITY,
        None => 0.0,
    };
    (min.min(max), max)
}

fn frame_tick<F: InstanceFactory>(view: &mut ReelView<F, Scroller>) -> bool {
    let (min, max) = flow_bounds(view.layout());
    view.driver_mut().set_bounds(min, max);
    let finished = view.driver_mut().step(FRAME);
    view.on_scrolling();
    if finished {
        view.on_scroll_ended_with_threshold();
        view.sync_page_with_window();
    }
    finished
}

fn drag<F: InstanceFactory>(view: &mut ReelView<F, Scroller>, delta: Point, frames: usize) {
    let frames = frames.max(1);
    let step = Point::new(delta.x / frames as f32, delta.y / frames as f32);
    for _ in 0..frames {
        let (min, max) = flow_bounds(view.layout());
        view.driver_mut().set_bounds(min, max);
        view.driver_mut().drag_by(step, FRAME);
        view.on_scrolling();
        view.on_touch_moved();
    }
}

fn release<F: InstanceFactory>(view: &mut ReelView<F, Scroller>, start: Point, end: Point) {
    view.on_touch_ended(start, end);
    view.driver_mut().release();
    view.on_auto_scroll_started();
}

fn settle<F: InstanceFactory>(view: &mut ReelView<F, Scroller>) {
    for _ in 0..MAX_SETTLE_FRAMES {
        if !view.driver().is_settling() {
            break;
        }
        if frame_tick(view) {
            break;
        }
    }
}

fn log_window<F: InstanceFactory>(label: &str, layout: &RecyclerLayout<F>) {
    let visible: Vec<usize> = layout.visible_items().map(|item| item.data_index).collect();
    log::info!(
        "{}: window {:?}..={:?}, visible {:?}",
        label,
        layout.header().map(|item| item.data_index),
        layout.footer().map(|item| item.data_index),
        visible
    );
}
