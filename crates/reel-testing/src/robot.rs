//! Scripted scroll gestures against a [`ReelView`].
//!
//! The robot plays the host's part: it moves the [`MockScrollDriver`] offset
//! and calls the view's notification hooks in the order a real scroll view
//! would.
//!
//! ```
//! use reel_core::{NullFactory, Point};
//! use reel_foundation::{ReelConfig, ReelView};
//! use reel_testing::{MockScrollDriver, RecordingBinder, ScrollRobot};
//!
//! let (binder, _log) = RecordingBinder::new();
//! let view = ReelView::new(ReelConfig::default(), NullFactory, binder, MockScrollDriver::new())
//!     .unwrap();
//! let mut robot = ScrollRobot::new(view);
//! robot.set_item_total(50);
//! robot.scroll_by(Point::new(0.0, 600.0), 12);
//! assert!(robot.view().layout().header().unwrap().data_index > 0);
//! ```

use reel_core::{InstanceFactory, Point};
use reel_foundation::{PageDecision, ReelView, ScrollEvent};

use crate::driver::MockScrollDriver;

/// Largest offset change per notification while settling.
const SETTLE_STEP: f32 = 10.0;

/// Seconds per step of [`ScrollRobot::drag`].
pub const DRAG_FRAME_TIME: f32 = 1.0 / 60.0;

pub struct ScrollRobot<F: InstanceFactory> {
    view: ReelView<F, MockScrollDriver>,
    settled_requests: usize,
}

impl<F: InstanceFactory> ScrollRobot<F> {
    pub fn new(view: ReelView<F, MockScrollDriver>) -> Self {
        let settled_requests = view.driver().scroll_requests.len();
        Self {
            view,
            settled_requests,
        }
    }

    pub fn view(&self) -> &ReelView<F, MockScrollDriver> {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut ReelView<F, MockScrollDriver> {
        &mut self.view
    }

    pub fn driver(&self) -> &MockScrollDriver {
        self.view.driver()
    }

    pub fn driver_mut(&mut self) -> &mut MockScrollDriver {
        self.view.driver_mut()
    }

    pub fn into_view(self) -> ReelView<F, MockScrollDriver> {
        self.view
    }

    pub fn set_item_total(&mut self, total: usize) {
        self.view.set_item_total(total);
        self.view.on_scrolling();
    }

    /// Moves the content offset to `offset` and notifies the view.
    pub fn scroll_to(&mut self, offset: Point) {
        self.view.driver_mut().offset = offset;
        self.view.on_scrolling();
    }

    /// Moves the content by `delta` in `steps` equal notifications.
    pub fn scroll_by(&mut self, delta: Point, steps: usize) {
        let steps = steps.max(1);
        let start = self.view.driver().offset;
        for i in 1..=steps {
            let t = i as f32 / steps as f32;
            self.scroll_to(Point::new(start.x + delta.x * t, start.y + delta.y * t));
        }
    }

    /// A finger drag from `from` to `to`, one step per [`DRAG_FRAME_TIME`]:
    /// the content follows the finger, touch-move hooks fire per step and the
    /// touch-end decision is returned.
    pub fn drag(&mut self, from: Point, to: Point, steps: usize) -> Option<PageDecision> {
        let steps = steps.max(1);
        self.drag_over(from, to, steps, steps as f32 * DRAG_FRAME_TIME)
    }

    /// Like [`drag`](Self::drag), spread over `seconds`. The driver reports
    /// the per-step movement as a velocity in px/s.
    pub fn drag_over(
        &mut self,
        from: Point,
        to: Point,
        steps: usize,
        seconds: f32,
    ) -> Option<PageDecision> {
        log::debug!("ScrollRobot: drag {:?} -> {:?} over {}s", from, to, seconds);
        let steps = steps.max(1);
        let step_time = (seconds / steps as f32).max(f32::EPSILON);
        let start = self.view.driver().offset;
        let delta = to - from;
        let velocity = Point::new(
            delta.x / steps as f32 / step_time,
            delta.y / steps as f32 / step_time,
        );
        for i in 1..=steps {
            let t = i as f32 / steps as f32;
            self.view.driver_mut().velocity = velocity;
            self.view.driver_mut().offset = Point::new(start.x + delta.x * t, start.y + delta.y * t);
            self.view.on_scrolling();
            self.view.on_touch_moved();
        }
        self.view.on_touch_ended(from, to)
    }

    /// Simulates momentum settling: starts auto-scroll, glides to the latest
    /// scroll request made since the previous settle, then ends the scroll.
    pub fn settle(&mut self) {
        self.view.driver_mut().auto_scrolling = true;
        self.view.on_auto_scroll_started();
        let requests = self.view.driver().scroll_requests.len();
        if requests > self.settled_requests {
            self.settled_requests = requests;
            if let Some((target, _)) = self.view.driver().last_scroll_request() {
                let delta = target - self.view.driver().offset;
                let distance = delta.x.abs().max(delta.y.abs());
                let steps = (distance / SETTLE_STEP).ceil() as usize;
                self.scroll_by(delta, steps);
            }
        }
        self.view.on_scrolling();
        self.view.driver_mut().auto_scrolling = false;
        self.view.driver_mut().velocity = Point::ZERO;
        self.view.on_scroll_ended_with_threshold();
    }

    /// Puts the driver in an overscrolled state whose correction is
    /// `out_of_boundary`.
    pub fn overscroll(&mut self, out_of_boundary: Point) {
        self.view.driver_mut().out_of_boundary = out_of_boundary;
    }

    pub fn take_events(&mut self) -> Vec<ScrollEvent> {
        self.view.take_events()
    }
}
