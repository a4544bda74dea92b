//! A scroll driver that records everything the engine asks of it.

use reel_core::{Point, Size};
use reel_foundation::{Edge, ScrollDriver};

/// In-memory [`ScrollDriver`].
///
/// Tests set the offset, boundary state and flags directly and inspect the
/// recorded requests afterwards. Scroll requests are only recorded unless
/// `apply_scroll_requests` is set, in which case the offset jumps to the
/// requested target immediately.
#[derive(Clone, Debug, Default)]
pub struct MockScrollDriver {
    pub offset: Point,
    pub out_of_boundary: Point,
    pub braking: bool,
    pub auto_scrolling: bool,
    pub velocity: Point,
    pub apply_scroll_requests: bool,

    pub content_size: Size,
    pub extensions: Vec<(Edge, f32)>,
    pub scroll_requests: Vec<(Point, f32)>,
    pub bounce_requests: usize,
    pub auto_scroll_restarts: usize,
}

impl MockScrollDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Driver that jumps to every requested offset.
    pub fn applying() -> Self {
        Self {
            apply_scroll_requests: true,
            ..Self::default()
        }
    }

    /// Net boundary extension currently applied to `edge`.
    pub fn boundary_extension(&self, edge: Edge) -> f32 {
        self.extensions
            .iter()
            .filter(|(extended, _)| *extended == edge)
            .map(|(_, amount)| amount)
            .sum()
    }

    pub fn last_scroll_request(&self) -> Option<(Point, f32)> {
        self.scroll_requests.last().copied()
    }
}

impl ScrollDriver for MockScrollDriver {
    fn content_offset(&self) -> Point {
        self.offset
    }

    fn out_of_boundary(&self) -> Point {
        self.out_of_boundary
    }

    fn is_auto_scroll_braking(&self) -> bool {
        self.braking
    }

    fn is_auto_scrolling(&self) -> bool {
        self.auto_scrolling
    }

    fn touch_velocity(&self) -> Point {
        self.velocity
    }

    fn start_bounce_back_if_needed(&mut self) -> bool {
        if self.out_of_boundary == Point::ZERO {
            return false;
        }
        self.bounce_requests += 1;
        true
    }

    fn set_content_size(&mut self, size: Size) {
        self.content_size = size;
    }

    fn extend_boundary(&mut self, edge: Edge, amount: f32) {
        log::trace!("MockScrollDriver: extend {:?} by {}", edge, amount);
        self.extensions.push((edge, amount));
    }

    fn scroll_to_offset(&mut self, offset: Point, duration: f32) {
        self.scroll_requests.push((offset, duration));
        if self.apply_scroll_requests {
            self.offset = offset;
        }
    }

    fn start_auto_scroll(&mut self) {
        self.auto_scroll_restarts += 1;
    }
}
