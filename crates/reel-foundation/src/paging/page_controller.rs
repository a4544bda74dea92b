//! Page-snap decisions for paged lists.
//!
//! The controller is a decision function over the current page and the
//! gesture that just ended. It never moves content: it returns a
//! [`PageDecision`] that the caller turns into a scroll request.

use crate::driver::ScrollDriver;
use crate::error::ConfigError;
use crate::layout::LoopPolicy;
use reel_core::{FlowAxis, Point};

/// Default fraction of the viewport a drag must cover to turn the page.
pub const DEFAULT_SCROLL_THRESHOLD: f32 = 0.5;

/// Default flick velocity that turns the page regardless of distance.
pub const DEFAULT_QUICK_TURN_VELOCITY: f32 = 100.0;

/// Default seconds per page step of a snap animation.
pub const DEFAULT_TURNING_SPEED: f32 = 0.3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageConfig {
    pub scroll_threshold: f32,
    pub quick_turn_velocity: f32,
    pub turning_speed: f32,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            scroll_threshold: DEFAULT_SCROLL_THRESHOLD,
            quick_turn_velocity: DEFAULT_QUICK_TURN_VELOCITY,
            turning_speed: DEFAULT_TURNING_SPEED,
        }
    }
}

impl PageConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scroll_threshold.is_nan()
            || self.scroll_threshold <= 0.0
            || self.scroll_threshold > 1.0
        {
            return Err(ConfigError::InvalidPageThreshold {
                value: self.scroll_threshold,
            });
        }
        for (name, value) in [
            ("quick_turn_velocity", self.quick_turn_velocity),
            ("turning_speed", self.turning_speed),
        ] {
            if value.is_nan() || value < 0.0 {
                return Err(ConfigError::NegativePageSetting { name, value });
            }
        }
        Ok(())
    }
}

/// Snap target for the scroll driver.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageRequest {
    pub page: usize,
    /// Animation length in seconds.
    pub duration: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PageDecision {
    /// The driver is bouncing back from an overscroll; the page was set to
    /// the boundary page on that side.
    Rebound { page: usize },
    /// Snap to `request.page`. `turned` is false when snapping back.
    Snap { request: PageRequest, turned: bool },
    /// Nothing to page through.
    Idle,
}

/// Inputs that come from the layout rather than the gesture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PagingContext {
    pub item_total: usize,
    pub viewport_extent: f32,
}

#[derive(Debug)]
pub struct PageController {
    config: PageConfig,
    flow: FlowAxis,
    group_size: usize,
    loops: LoopPolicy,
    current_page: usize,
    last_dispatched_page: usize,
}

impl PageController {
    pub fn new(
        config: PageConfig,
        flow: FlowAxis,
        group_size: usize,
        loops: LoopPolicy,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        if group_size == 0 {
            return Err(ConfigError::ZeroGroupSize);
        }
        Ok(Self {
            config,
            flow,
            group_size,
            loops,
            current_page: 0,
            last_dispatched_page: 0,
        })
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn last_dispatched_page(&self) -> usize {
        self.last_dispatched_page
    }

    /// Page step implied by a drag, `±group_size` or 0.
    ///
    /// `move_offset` is touch start minus touch end, so dragging content
    /// toward the header reveals the next page.
    pub fn drag_direction(&self, move_offset: Point) -> isize {
        let along = move_offset.dot(self.flow.flow_vector());
        if along > 0.0 {
            self.group_size as isize
        } else if along < 0.0 {
            -(self.group_size as isize)
        } else {
            0
        }
    }

    /// Whether the drag covered enough of the viewport to turn the page.
    pub fn is_scrollable(&self, move_offset: Point, viewport_extent: f32) -> bool {
        self.flow.main(move_offset).abs() >= viewport_extent * self.config.scroll_threshold
    }

    /// Whether the release velocity alone turns the page.
    pub fn is_quickly_scrollable(&self, velocity: Point) -> bool {
        self.flow.main(velocity).abs() > self.config.quick_turn_velocity
    }

    /// Records `page` as current. Rejects pages outside `[0, item_total)`.
    pub fn save_page_index(&mut self, page: usize, item_total: usize) -> bool {
        if page >= item_total {
            log::warn!(
                "PageController: page {} out of range for {} items",
                page,
                item_total
            );
            return false;
        }
        self.current_page = page;
        true
    }

    /// Makes `page` current and returns the snap request for it.
    pub fn scroll_to_page(
        &mut self,
        page: usize,
        duration: f32,
        item_total: usize,
    ) -> Option<PageRequest> {
        self.save_page_index(page, item_total)
            .then_some(PageRequest { page, duration })
    }

    /// Adopts the page derived from the live window, e.g. after a programmatic
    /// scroll.
    pub fn sync_with_window(&mut self, page: usize, item_total: usize) -> bool {
        self.save_page_index(page, item_total)
    }

    /// Resolves the page a finished drag should settle on.
    pub fn auto_scroll_to_page(
        &mut self,
        touch_start: Point,
        touch_end: Point,
        context: PagingContext,
        driver: &mut dyn ScrollDriver,
    ) -> PageDecision {
        let total = context.item_total;
        if total == 0 {
            return PageDecision::Idle;
        }

        if driver.start_bounce_back_if_needed() {
            let along = driver.out_of_boundary().dot(self.flow.flow_vector());
            if along > 0.0 {
                self.current_page = total - 1;
            } else if along < 0.0 {
                self.current_page = 0;
            }
            return PageDecision::Rebound {
                page: self.current_page,
            };
        }

        let move_offset = touch_start - touch_end;
        let current = self.current_page.min(total - 1);
        let step = self.drag_direction(move_offset);
        let duration = self.config.turning_speed * step.unsigned_abs() as f32;
        let candidate = self.loops.wrap_page(current as isize + step, total);

        if let Some(next) = candidate.filter(|&next| next != current) {
            let authorized = self.is_scrollable(move_offset, context.viewport_extent)
                || self.is_quickly_scrollable(driver.touch_velocity());
            if authorized {
                if let Some(request) = self.scroll_to_page(next, duration, total) {
                    return PageDecision::Snap {
                        request,
                        turned: true,
                    };
                }
            }
        }

        self.current_page = current;
        PageDecision::Snap {
            request: PageRequest {
                page: current,
                duration,
            },
            turned: false,
        }
    }

    /// Returns the page to announce if it changed since the last announcement.
    pub fn dispatch_page_turning(&mut self) -> Option<usize> {
        if self.current_page == self.last_dispatched_page {
            return None;
        }
        self.last_dispatched_page = self.current_page;
        Some(self.current_page)
    }
}
