//! `ReelView` ties the recycling window, the page controller and the refresh
//! tracker to one scroll driver.
//!
//! Every entry point runs to completion on the caller's tick. Within one
//! scroll notification the window is updated and its content size pushed to
//! the driver before paging or refresh look at the new state.

use crate::driver::ScrollDriver;
use crate::error::ConfigError;
use crate::layout::{ItemBinder, LayoutConfig, RecyclerLayout, ScrollDirection};
use crate::paging::{PageConfig, PageController, PageDecision, PagingContext};
use crate::refresh::{RefreshConfig, RefreshEvent, RefreshEvents, RefreshTracker};
use reel_core::{InstanceFactory, InstanceId, Point, Size};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReelConfig {
    pub layout: LayoutConfig,
    /// Enables page snapping.
    pub paging: Option<PageConfig>,
    /// Enables pull-to-refresh tracking.
    pub refresh: Option<RefreshConfig>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScrollEvent {
    Scrolled {
        offset: Point,
        direction: ScrollDirection,
    },
    PageTurning {
        page: usize,
    },
    Refresh(RefreshEvent),
}

pub struct ReelView<F: InstanceFactory, D: ScrollDriver> {
    layout: RecyclerLayout<F>,
    pages: Option<PageController>,
    refresh: Option<RefreshTracker>,
    driver: D,
    last_offset: Point,
    events: Vec<ScrollEvent>,
}

impl<F: InstanceFactory, D: ScrollDriver> ReelView<F, D> {
    pub fn new(
        config: ReelConfig,
        factory: F,
        binder: impl ItemBinder + 'static,
        driver: D,
    ) -> Result<Self, ConfigError> {
        let layout = RecyclerLayout::new(config.layout, factory, binder)?;
        let pages = config
            .paging
            .map(|paging| {
                PageController::new(
                    paging,
                    *layout.flow(),
                    layout.config().group_size,
                    layout.loop_policy(),
                )
            })
            .transpose()?;
        let refresh = config.refresh.map(RefreshTracker::new).transpose()?;
        let last_offset = driver.content_offset();
        let mut view = Self {
            layout,
            pages,
            refresh,
            driver,
            last_offset,
            events: Vec::new(),
        };
        view.driver.set_content_size(view.layout.content_size());
        Ok(view)
    }

    pub fn layout(&self) -> &RecyclerLayout<F> {
        &self.layout
    }

    pub fn layout_mut(&mut self) -> &mut RecyclerLayout<F> {
        &mut self.layout
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    pub fn pages(&self) -> Option<&PageController> {
        self.pages.as_ref()
    }

    pub fn refresh(&self) -> Option<&RefreshTracker> {
        self.refresh.as_ref()
    }

    pub fn current_page(&self) -> Option<usize> {
        self.pages.as_ref().map(PageController::current_page)
    }

    /// Drains the events produced since the last call.
    pub fn take_events(&mut self) -> Vec<ScrollEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn set_item_total(&mut self, total: usize) {
        if self.layout.set_item_total(total) {
            self.driver.scroll_to_offset(Point::ZERO, 0.0);
            if let Some(pages) = &mut self.pages {
                pages.sync_with_window(0, total);
            }
        }
        self.driver.set_content_size(self.layout.content_size());
    }

    /// Call on every offset change reported by the driver.
    pub fn on_scrolling(&mut self) {
        let current = self.driver.content_offset();
        if current == self.last_offset {
            return;
        }
        let previous = std::mem::replace(&mut self.last_offset, current);
        let direction = self.layout.on_offset_changed(previous, current);
        self.driver.set_content_size(self.layout.content_size());
        self.events.push(ScrollEvent::Scrolled {
            offset: current,
            direction,
        });

        if let Some(refresh) = &mut self.refresh {
            let overscroll = self.layout.flow().overscroll(self.driver.out_of_boundary());
            let events = refresh.on_settle(
                overscroll,
                self.driver.is_auto_scroll_braking(),
                self.driver.is_auto_scrolling(),
            );
            push_refresh(&mut self.events, events);
        }
    }

    /// Call while the user drags.
    pub fn on_touch_moved(&mut self) {
        let Some(refresh) = &mut self.refresh else {
            return;
        };
        let overscroll = self.layout.flow().overscroll(self.driver.out_of_boundary());
        let events = refresh.on_touch_moved(overscroll);
        push_refresh(&mut self.events, events);
    }

    /// Call when the drag ends. Paged views snap to the resolved page.
    pub fn on_touch_ended(&mut self, touch_start: Point, touch_end: Point) -> Option<PageDecision> {
        let pages = self.pages.as_mut()?;
        let context = PagingContext {
            item_total: self.layout.item_total(),
            viewport_extent: self.layout.viewport().main_extent(),
        };
        let decision = pages.auto_scroll_to_page(touch_start, touch_end, context, &mut self.driver);
        if let PageDecision::Snap { request, .. } = decision {
            if let Some(offset) = self.layout.offset_for_index(request.page) {
                self.driver.scroll_to_offset(offset, request.duration);
            }
        }
        Some(decision)
    }

    /// Call when momentum settling starts.
    pub fn on_auto_scroll_started(&mut self) {
        if let Some(refresh) = &mut self.refresh {
            let events = refresh.commit_lock(&mut self.driver);
            push_refresh(&mut self.events, events);
        }
    }

    /// Call when a scroll settles past the driver's end threshold.
    pub fn on_scroll_ended_with_threshold(&mut self) {
        if let Some(pages) = &mut self.pages {
            if let Some(page) = pages.dispatch_page_turning() {
                self.events.push(ScrollEvent::PageTurning { page });
            }
        }
    }

    /// Adopts the live item nearest the view start as the current page.
    pub fn sync_page_with_window(&mut self) -> bool {
        let total = self.layout.item_total();
        match (&mut self.pages, self.layout.nearest_index_to_start()) {
            (Some(pages), Some(index)) => pages.sync_with_window(index, total),
            _ => false,
        }
    }

    /// Ends a locked refresh and lets the content ease back.
    pub fn release_refresh(&mut self) {
        let Some(refresh) = &mut self.refresh else {
            return;
        };
        let layout = &mut self.layout;
        let events = refresh.release(&mut self.driver, || layout.relayout());
        self.driver.set_content_size(self.layout.content_size());
        push_refresh(&mut self.events, events);
    }

    /// Snaps to `page`. Returns `false` without paging or for an invalid page.
    pub fn scroll_to_page(&mut self, page: usize, duration: f32) -> bool {
        let total = self.layout.item_total();
        let Some(pages) = &mut self.pages else {
            return false;
        };
        match pages.scroll_to_page(page, duration, total) {
            Some(request) => self.scroll_to_index(request.page, request.duration),
            None => false,
        }
    }

    /// Asks the driver to bring `index` to the view start.
    pub fn scroll_to_index(&mut self, index: usize, duration: f32) -> bool {
        match self.layout.offset_for_index(index) {
            Some(offset) => {
                self.driver.scroll_to_offset(offset, duration);
                true
            }
            None => false,
        }
    }

    pub fn update_item_size(&mut self, instance: InstanceId, size: Size) -> bool {
        let updated = self.layout.update_item_size(instance, size);
        if updated {
            self.driver.set_content_size(self.layout.content_size());
        }
        updated
    }

    pub fn rebind_all(&mut self) {
        self.layout.rebind_all();
        self.driver.set_content_size(self.layout.content_size());
    }
}

fn push_refresh(sink: &mut Vec<ScrollEvent>, events: RefreshEvents) {
    sink.extend(events.into_iter().map(ScrollEvent::Refresh));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::Edge;
    use crate::refresh::RefreshStage;
    use reel_core::NullFactory;

    #[derive(Default)]
    struct ViewDriver {
        offset: Point,
        out_of_boundary: Point,
        content_size: Size,
        extensions: Vec<(Edge, f32)>,
        scrolls: Vec<(Point, f32)>,
        restarts: usize,
    }

    impl ScrollDriver for ViewDriver {
        fn content_offset(&self) -> Point {
            self.offset
        }
        fn out_of_boundary(&self) -> Point {
            self.out_of_boundary
        }
        fn is_auto_scroll_braking(&self) -> bool {
            false
        }
        fn is_auto_scrolling(&self) -> bool {
            false
        }
        fn touch_velocity(&self) -> Point {
            Point::ZERO
        }
        fn start_bounce_back_if_needed(&mut self) -> bool {
            self.out_of_boundary != Point::ZERO
        }
        fn set_content_size(&mut self, size: Size) {
            self.content_size = size;
        }
        fn extend_boundary(&mut self, edge: Edge, amount: f32) {
            self.extensions.push((edge, amount));
        }
        fn scroll_to_offset(&mut self, offset: Point, duration: f32) {
            self.scrolls.push((offset, duration));
        }
        fn start_auto_scroll(&mut self) {
            self.restarts += 1;
        }
    }

    fn view(config: ReelConfig, total: usize) -> ReelView<NullFactory, ViewDriver> {
        let mut view = ReelView::new(
            config,
            NullFactory,
            |_: InstanceId, _: usize| {},
            ViewDriver::default(),
        )
        .expect("valid config");
        view.set_item_total(total);
        view
    }

    #[test]
    fn unchanged_offset_emits_nothing() {
        let mut view = view(ReelConfig::default(), 30);
        view.on_scrolling();
        assert!(view.take_events().is_empty());

        view.driver_mut().offset = Point::new(0.0, 10.0);
        view.on_scrolling();
        assert_eq!(
            view.take_events(),
            vec![ScrollEvent::Scrolled {
                offset: Point::new(0.0, 10.0),
                direction: ScrollDirection::TowardFooter,
            }]
        );
    }

    #[test]
    fn content_size_reaches_driver() {
        let view = view(ReelConfig::default(), 30);
        assert_eq!(view.driver().content_size, view.layout().content_size());
        assert!(view.layout().len() > 0);
    }

    #[test]
    fn refresh_lock_and_release_drive_boundary() {
        let config = ReelConfig {
            refresh: Some(RefreshConfig::default()),
            ..Default::default()
        };
        let mut view = view(config, 30);

        view.driver_mut().out_of_boundary = Point::new(0.0, 450.0);
        view.on_touch_moved();
        let events = view.take_events();
        assert!(matches!(
            events[0],
            ScrollEvent::Refresh(RefreshEvent {
                edge: Edge::Header,
                stage: RefreshStage::Wait,
                ..
            })
        ));

        view.on_auto_scroll_started();
        assert_eq!(view.driver().extensions, vec![(Edge::Header, 200.0)]);
        assert!(view.refresh().is_some_and(RefreshTracker::is_locked));

        view.release_refresh();
        assert_eq!(view.driver().extensions.last(), Some(&(Edge::Header, -200.0)));
        assert_eq!(view.driver().restarts, 1);
        assert!(view.refresh().is_some_and(|refresh| !refresh.is_locked()));
    }

    #[test]
    fn scroll_to_page_requests_item_offset() {
        let config = ReelConfig {
            paging: Some(PageConfig::default()),
            ..Default::default()
        };
        let mut view = view(config, 30);

        assert!(view.scroll_to_page(3, 0.3));
        assert_eq!(view.current_page(), Some(3));
        // item 3 leads at -400 + 300 in flow space, 300 below the view start
        assert_eq!(view.driver().scrolls.last(), Some(&(Point::new(0.0, 300.0), 0.3)));

        assert!(!view.scroll_to_page(30, 0.3));
        assert_eq!(view.current_page(), Some(3));
    }

    #[test]
    fn drag_turns_page_and_announces_it() {
        let config = ReelConfig {
            paging: Some(PageConfig::default()),
            ..Default::default()
        };
        let mut view = view(config, 30);

        let decision = view.on_touch_ended(Point::ZERO, Point::new(0.0, 500.0));
        assert!(matches!(
            decision,
            Some(PageDecision::Snap { turned: true, .. })
        ));
        assert_eq!(view.driver().scrolls.last(), Some(&(Point::new(0.0, 100.0), 0.3)));

        view.on_scroll_ended_with_threshold();
        view.on_scroll_ended_with_threshold();
        assert_eq!(view.take_events(), vec![ScrollEvent::PageTurning { page: 1 }]);
    }

    #[test]
    fn paging_calls_are_inert_without_paging() {
        let mut view = view(ReelConfig::default(), 30);
        assert_eq!(view.on_touch_ended(Point::ZERO, Point::new(0.0, 500.0)), None);
        assert!(!view.scroll_to_page(1, 0.3));
        assert_eq!(view.current_page(), None);
    }
}
