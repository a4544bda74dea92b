//! The recycling window.
//!
//! [`RecyclerLayout`] owns the live items of a virtualized list as a deque whose
//! front is the header (lowest data index on screen order) and whose back is
//! the footer. Items live in content-local coordinates; the host's scroll
//! driver moves the content as a whole and reports the offset back through
//! [`RecyclerLayout::on_offset_changed`]. Each report moves at most one item
//! from the end that left the viewport to the opposite end and rebinds it.

use super::config::LayoutConfig;
use super::item::{ItemBinder, LayoutItem, LayoutStats};
use super::loop_policy::LoopPolicy;
use super::viewport::ViewportGeometry;
use crate::error::ConfigError;
use reel_core::{FlowAxis, InstanceFactory, InstanceId, InstancePool, ItemBounds, Point, Size};
use std::collections::VecDeque;
use web_time::{Duration, Instant};

/// Time budget for a single growth pass.
const GROWTH_TIME_BUDGET: Duration = Duration::from_millis(50);

/// Hard cap on live items, for zero-sized items and runaway totals.
const MAX_LIVE_ITEMS_SAFETY: usize = 10_000;

/// Items whose leading edge is within this distance of a resized item's old
/// trailing edge are treated as following it.
const RESIZE_EPSILON: f32 = 1e-3;

/// Which way the latest offset change moved through the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollDirection {
    #[default]
    None,
    /// Later data indices are coming into view.
    TowardFooter,
    /// Earlier data indices are coming into view.
    TowardHeader,
}

impl ScrollDirection {
    /// Classifies a flow-space change of the content offset.
    pub fn from_flow_delta(delta: f32) -> Self {
        if delta < 0.0 {
            ScrollDirection::TowardFooter
        } else if delta > 0.0 {
            ScrollDirection::TowardHeader
        } else {
            ScrollDirection::None
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum GrowthSlot {
    First,
    Append(usize),
    Prepend(usize),
}

pub struct RecyclerLayout<F: InstanceFactory> {
    config: LayoutConfig,
    flow: FlowAxis,
    viewport: ViewportGeometry,
    loops: LoopPolicy,
    pool: InstancePool<F>,
    binder: Box<dyn ItemBinder>,
    items: VecDeque<LayoutItem>,
    item_total: usize,
    content_offset: Point,
    content_size: Size,
    scroll_direction: ScrollDirection,
    total_created: usize,
    recycle_count: usize,
    /// Set while the pool refuses instances the window still needs.
    pool_exhausted: bool,
}

impl<F: InstanceFactory> RecyclerLayout<F> {
    pub fn new(
        config: LayoutConfig,
        factory: F,
        binder: impl ItemBinder + 'static,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let flow = config.flow_axis();
        let viewport = ViewportGeometry::new(&config, &flow);
        let loops = LoopPolicy::new(config.header_loop, config.footer_loop, &flow);
        let pool = InstancePool::new(factory, config.pool_capacity);
        let content_size = viewport.size(&flow);
        Ok(Self {
            config,
            flow,
            viewport,
            loops,
            pool,
            binder: Box::new(binder),
            items: VecDeque::new(),
            item_total: 0,
            content_offset: Point::ZERO,
            content_size,
            scroll_direction: ScrollDirection::None,
            total_created: 0,
            recycle_count: 0,
            pool_exhausted: false,
        })
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn flow(&self) -> &FlowAxis {
        &self.flow
    }

    pub fn viewport(&self) -> &ViewportGeometry {
        &self.viewport
    }

    pub fn loop_policy(&self) -> LoopPolicy {
        self.loops
    }

    pub fn items(&self) -> &VecDeque<LayoutItem> {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn header(&self) -> Option<&LayoutItem> {
        self.items.front()
    }

    pub fn footer(&self) -> Option<&LayoutItem> {
        self.items.back()
    }

    pub fn item_total(&self) -> usize {
        self.item_total
    }

    pub fn content_offset(&self) -> Point {
        self.content_offset
    }

    /// Size the scroll driver should give the content.
    pub fn content_size(&self) -> Size {
        self.content_size
    }

    pub fn scroll_direction(&self) -> ScrollDirection {
        self.scroll_direction
    }

    pub fn pool(&self) -> &InstancePool<F> {
        &self.pool
    }

    pub fn pool_mut(&mut self) -> &mut InstancePool<F> {
        &mut self.pool
    }

    pub fn item_for_instance(&self, instance: InstanceId) -> Option<&LayoutItem> {
        self.items.iter().find(|item| item.instance == instance)
    }

    pub fn stats(&self) -> LayoutStats {
        LayoutStats {
            items_in_use: self.items.len(),
            items_in_pool: self.pool.stats().available,
            total_created: self.total_created,
            recycle_count: self.recycle_count,
            pool_exhausted: self.pool_exhausted,
        }
    }

    /// Sets the number of data items and grows the window to cover the
    /// viewport.
    ///
    /// If a live item refers to an index that no longer exists the window is
    /// rebuilt from index 0 and `true` is returned.
    pub fn set_item_total(&mut self, total: usize) -> bool {
        let rebuild = self.items.iter().any(|item| item.data_index >= total);
        if rebuild {
            log::debug!(
                "RecyclerLayout: item total shrank from {} to {}, rebuilding window",
                self.item_total,
                total
            );
            self.clear();
        }
        self.item_total = total;
        self.grow();
        self.update_content_size();
        rebuild
    }

    /// Returns every live instance to the pool.
    pub fn clear(&mut self) {
        for item in self.items.drain(..) {
            self.pool.release(item.instance);
        }
        self.scroll_direction = ScrollDirection::None;
        self.update_content_size();
    }

    /// Reacts to the driver moving the content from `previous` to `current`.
    ///
    /// Moves at most one item between the ends, then grows the window and
    /// recomputes the content size. An unchanged offset does nothing.
    pub fn on_offset_changed(&mut self, previous: Point, current: Point) -> ScrollDirection {
        self.content_offset = current;
        let direction = ScrollDirection::from_flow_delta(self.flow.flow_delta(previous, current));
        self.scroll_direction = direction;
        let recycled = match direction {
            ScrollDirection::None => return direction,
            ScrollDirection::TowardFooter => {
                self.header_passed_leading_boundary() && self.recycle_header_to_footer()
            }
            ScrollDirection::TowardHeader => {
                self.footer_passed_trailing_boundary() && self.recycle_footer_to_header()
            }
        };
        if recycled {
            self.grow();
        }
        self.update_content_size();
        direction
    }

    /// Grows the window and recomputes the content size without an offset change.
    pub fn relayout(&mut self) {
        self.grow();
        self.update_content_size();
    }

    /// Applies a new size to a live item.
    ///
    /// The item keeps its leading edge; every item on later lines shifts by the
    /// change so spacing is preserved. Returns `false` for unknown instances.
    pub fn update_item_size(&mut self, instance: InstanceId, size: Size) -> bool {
        let Some(index) = self.items.iter().position(|item| item.instance == instance) else {
            return false;
        };
        self.resize_at(index, size);
        self.grow();
        self.update_content_size();
        true
    }

    /// Binds every live item again, for data that changed in place.
    pub fn rebind_all(&mut self) {
        let mut resized = Vec::new();
        for (index, item) in self.items.iter().enumerate() {
            self.binder.bind(item.instance, item.data_index);
            if let Some(size) = self.binder.measure(item.instance, item.data_index) {
                resized.push((index, size));
            }
        }
        for (index, size) in resized {
            self.resize_at(index, size);
        }
        self.grow();
        self.update_content_size();
    }

    /// Padded flow-space span from the header's leading edge to the footer's
    /// trailing edge.
    pub fn covered_extent(&self) -> f32 {
        match (self.items.front(), self.items.back()) {
            (Some(header), Some(footer)) => {
                self.flow.trailing_edge(&footer.bounds) - self.flow.leading_edge(&header.bounds)
                    + self.viewport.leading_padding()
                    + self.viewport.trailing_padding()
            }
            _ => 0.0,
        }
    }

    /// Whether any part of the item lies inside the viewport at the current offset.
    pub fn is_visible(&self, item: &LayoutItem) -> bool {
        let offset = self.offset_flow();
        offset + self.flow.leading_edge(&item.bounds) < self.viewport.trailing_boundary()
            && offset + self.flow.trailing_edge(&item.bounds) > self.viewport.leading_boundary()
    }

    pub fn visible_items(&self) -> impl Iterator<Item = &LayoutItem> + '_ {
        self.items.iter().filter(move |item| self.is_visible(item))
    }

    /// Content offset that brings the item's leading edge to the view start.
    ///
    /// Exact for live items; other indices are estimated from the average live
    /// extent. `None` for indices outside the data range or an empty window.
    pub fn offset_for_index(&self, index: usize) -> Option<Point> {
        if index >= self.item_total {
            return None;
        }
        let leading = match self.items.iter().find(|item| item.data_index == index) {
            Some(item) => self.flow.leading_edge(&item.bounds),
            None => {
                let header = self.items.front()?;
                let group = self.config.group_size;
                let lines = (index / group) as f32 - (header.data_index / group) as f32;
                let pitch = self.average_main_extent() + self.main_spacing();
                self.flow.leading_edge(&header.bounds) + lines * pitch
            }
        };
        let main = self.flow.from_flow(self.viewport.start() - leading);
        Some(self.flow.point(main, self.flow.cross(self.content_offset)))
    }

    /// Data index of the live item whose leading edge is closest to the view start.
    pub fn nearest_index_to_start(&self) -> Option<usize> {
        let offset = self.offset_flow();
        let start = self.viewport.start();
        self.items
            .iter()
            .min_by(|a, b| {
                let da = (offset + self.flow.leading_edge(&a.bounds) - start).abs();
                let db = (offset + self.flow.leading_edge(&b.bounds) - start).abs();
                da.total_cmp(&db)
            })
            .map(|item| item.data_index)
    }

    pub fn average_main_extent(&self) -> f32 {
        if self.items.is_empty() {
            return self.flow.main_size(self.config.template.size);
        }
        let sum: f32 = self
            .items
            .iter()
            .map(|item| self.flow.main_extent(&item.bounds))
            .sum();
        sum / self.items.len() as f32
    }

    fn offset_flow(&self) -> f32 {
        self.flow.to_flow(self.flow.main(self.content_offset))
    }

    fn main_spacing(&self) -> f32 {
        self.flow.main_spacing(&self.config.spacing)
    }

    fn cross_spacing(&self) -> f32 {
        self.flow.cross_spacing(&self.config.spacing)
    }

    fn header_passed_leading_boundary(&self) -> bool {
        let Some(header) = self.items.front() else {
            return false;
        };
        self.offset_flow() + self.flow.leading_edge(&header.bounds)
            < self.viewport.leading_boundary() - self.flow.main_extent(&header.bounds)
    }

    fn footer_passed_trailing_boundary(&self) -> bool {
        let Some(footer) = self.items.back() else {
            return false;
        };
        self.offset_flow() + self.flow.trailing_edge(&footer.bounds)
            > self.viewport.trailing_boundary() + self.flow.main_extent(&footer.bounds)
    }

    fn recycle_header_to_footer(&mut self) -> bool {
        let Some(footer) = self.items.back().copied() else {
            return false;
        };
        let Some(next) = self.loops.next_forward(footer.data_index, self.item_total) else {
            return false;
        };
        let Some(mut item) = self.items.pop_front() else {
            return false;
        };
        let previous = item.data_index;
        item.data_index = next;
        item.bounds = self.template_bounds();
        self.bind_item(&mut item);
        self.place_after(&mut item, &footer);
        self.items.push_back(item);
        self.recycle_count += 1;
        log::debug!(
            "RecyclerLayout: recycled {} header->footer, index {} -> {}",
            item.instance,
            previous,
            next
        );
        true
    }

    fn recycle_footer_to_header(&mut self) -> bool {
        let Some(header) = self.items.front().copied() else {
            return false;
        };
        let Some(next) = self.loops.next_backward(header.data_index, self.item_total) else {
            return false;
        };
        let Some(mut item) = self.items.pop_back() else {
            return false;
        };
        let previous = item.data_index;
        item.data_index = next;
        item.bounds = self.template_bounds();
        self.bind_item(&mut item);
        self.place_before(&mut item, &header);
        self.items.push_front(item);
        self.recycle_count += 1;
        log::debug!(
            "RecyclerLayout: recycled {} footer->header, index {} -> {}",
            item.instance,
            previous,
            next
        );
        true
    }

    fn needs_growth(&self) -> bool {
        let (Some(header), Some(footer)) = (self.items.front(), self.items.back()) else {
            return self.item_total > 0;
        };
        if self.items.len() >= self.item_total {
            return false;
        }
        self.covered_extent() < self.viewport.growth_target() || self.line_open(header, footer)
    }

    /// A window of whole lines whose last line still has free slots and data
    /// to fill them.
    fn line_open(&self, header: &LayoutItem, footer: &LayoutItem) -> bool {
        header.cross_slot == 0
            && footer.cross_slot + 1 < self.config.group_size
            && self
                .loops
                .next_forward(footer.data_index, self.item_total)
                .is_some()
    }

    fn next_growth_slot(&self) -> Option<GrowthSlot> {
        let (Some(header), Some(footer)) = (self.items.front(), self.items.back()) else {
            return (self.item_total > 0).then_some(GrowthSlot::First);
        };
        if let Some(next) = self.loops.next_forward(footer.data_index, self.item_total) {
            return Some(GrowthSlot::Append(next));
        }
        self.loops
            .next_backward(header.data_index, self.item_total)
            .map(GrowthSlot::Prepend)
    }

    /// Instantiates items until the window covers the growth target, the data
    /// runs out or the pool refuses.
    fn grow(&mut self) -> usize {
        let started = Instant::now();
        let mut grown = 0;
        while self.needs_growth() {
            if self.items.len() >= MAX_LIVE_ITEMS_SAFETY {
                log::warn!(
                    "RecyclerLayout: reached {} live items, stopping growth. \
                     Check for zero-sized items.",
                    MAX_LIVE_ITEMS_SAFETY
                );
                break;
            }
            if started.elapsed() > GROWTH_TIME_BUDGET {
                log::warn!(
                    "RecyclerLayout: growth exceeded time budget ({:?}) at {} live items. stopping early.",
                    GROWTH_TIME_BUDGET,
                    self.items.len()
                );
                break;
            }
            let Some(slot) = self.next_growth_slot() else {
                break;
            };
            let Some(instance) = self.pool.acquire() else {
                if !self.pool_exhausted {
                    log::warn!(
                        "RecyclerLayout: no instance available, window covers {} of {} with {} items",
                        self.covered_extent(),
                        self.viewport.growth_target(),
                        self.items.len()
                    );
                }
                self.pool_exhausted = true;
                break;
            };
            self.pool_exhausted = false;
            let data_index = match slot {
                GrowthSlot::First => 0,
                GrowthSlot::Append(index) | GrowthSlot::Prepend(index) => index,
            };
            let mut item = LayoutItem {
                instance,
                data_index,
                bounds: self.template_bounds(),
                cross_slot: 0,
            };
            self.bind_item(&mut item);
            match slot {
                GrowthSlot::First => {
                    self.place_first(&mut item);
                    self.items.push_back(item);
                }
                GrowthSlot::Append(_) => {
                    if let Some(footer) = self.items.back().copied() {
                        self.place_after(&mut item, &footer);
                    }
                    self.items.push_back(item);
                }
                GrowthSlot::Prepend(_) => {
                    if let Some(header) = self.items.front().copied() {
                        self.place_before(&mut item, &header);
                    }
                    self.items.push_front(item);
                }
            }
            self.total_created += 1;
            grown += 1;
            log::trace!(
                "RecyclerLayout: grew {} for index {}",
                item.instance,
                item.data_index
            );
        }
        grown
    }

    fn template_bounds(&self) -> ItemBounds {
        let template = &self.config.template;
        ItemBounds {
            position: Point::ZERO,
            size: self.flow.size(
                self.flow.main_size(template.size),
                self.viewport.item_cross_size(),
            ),
            anchor: template.anchor,
            scale: template.scale,
        }
    }

    fn bind_item(&mut self, item: &mut LayoutItem) {
        self.binder.bind(item.instance, item.data_index);
        if let Some(size) = self.binder.measure(item.instance, item.data_index) {
            let cross = self.flow.cross_size(item.bounds.size);
            item.bounds.size = self.flow.size(self.flow.main_size(size).max(0.0), cross);
        }
    }

    fn place_first(&self, item: &mut LayoutItem) {
        item.cross_slot = 0;
        let main = self
            .flow
            .position_from_leading(&item.bounds, self.viewport.start());
        self.flow.set_main_position(&mut item.bounds, main);
        self.place_cross(item);
    }

    fn place_after(&self, item: &mut LayoutItem, previous: &LayoutItem) {
        item.cross_slot = (previous.cross_slot + 1) % self.config.group_size;
        let leading = if item.cross_slot == 0 {
            self.flow.trailing_edge(&previous.bounds) + self.main_spacing()
        } else {
            self.flow.leading_edge(&previous.bounds)
        };
        let main = self.flow.position_from_leading(&item.bounds, leading);
        self.flow.set_main_position(&mut item.bounds, main);
        self.place_cross(item);
    }

    fn place_before(&self, item: &mut LayoutItem, next: &LayoutItem) {
        let group = self.config.group_size;
        item.cross_slot = (next.cross_slot + group - 1) % group;
        let main = if next.cross_slot == 0 {
            let trailing = self.flow.leading_edge(&next.bounds) - self.main_spacing();
            self.flow.position_from_trailing(&item.bounds, trailing)
        } else {
            self.flow
                .position_from_leading(&item.bounds, self.flow.leading_edge(&next.bounds))
        };
        self.flow.set_main_position(&mut item.bounds, main);
        self.place_cross(item);
    }

    fn place_cross(&self, item: &mut LayoutItem) {
        let pitch = self.flow.cross_extent(&item.bounds) + self.cross_spacing();
        let leading = self.viewport.cross_start() + item.cross_slot as f32 * pitch;
        let cross = self.flow.cross_position_from_leading(&item.bounds, leading);
        self.flow.set_cross_position(&mut item.bounds, cross);
    }

    fn resize_at(&mut self, index: usize, size: Size) {
        let flow = self.flow;
        let Some(item) = self.items.get_mut(index) else {
            return;
        };
        let leading = flow.leading_edge(&item.bounds);
        let old_trailing = flow.trailing_edge(&item.bounds);
        let old_extent = flow.main_extent(&item.bounds);
        let cross = flow.cross_size(item.bounds.size);
        item.bounds.size = flow.size(flow.main_size(size).max(0.0), cross);
        let main = flow.position_from_leading(&item.bounds, leading);
        flow.set_main_position(&mut item.bounds, main);

        let delta = flow.main_extent(&item.bounds) - old_extent;
        if delta == 0.0 {
            return;
        }
        let shift = flow.from_flow(delta);
        for later in self.items.iter_mut().skip(index + 1) {
            if flow.leading_edge(&later.bounds) >= old_trailing - RESIZE_EPSILON {
                let main = flow.main(later.bounds.position) + shift;
                flow.set_main_position(&mut later.bounds, main);
            }
        }
    }

    fn update_content_size(&mut self) {
        let main = self.viewport.main_extent().max(self.covered_extent());
        self.content_size = self.flow.size(main, self.viewport.cross_extent());
    }
}
