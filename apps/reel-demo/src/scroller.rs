//! A small scroll physics model standing in for a host scroll view.
//!
//! Offsets are clamped in flow space between bounds the demo derives from
//! the live window each frame. Releasing a drag flings with exponential
//! decay; overscroll springs back; snap requests glide with an ease-out.

use reel_core::{FlowAxis, Point, Size};
use reel_foundation::{Edge, ScrollDriver};

/// Velocity kept per frame while flinging.
const DECELERATION: f32 = 0.92;
/// Share of the overscroll recovered per frame.
const SPRING: f32 = 0.25;
/// Drag movement applied while out of bounds.
const RESISTANCE: f32 = 0.5;
const REST_SPEED: f32 = 5.0;
const BRAKING_SPEED: f32 = 120.0;

#[derive(Clone, Copy, Debug)]
struct Glide {
    from: Point,
    to: Point,
    elapsed: f32,
    duration: f32,
}

#[derive(Debug)]
pub struct Scroller {
    flow: FlowAxis,
    offset: Point,
    velocity: Point,
    touch_velocity: Point,
    content_size: Size,
    min_flow: f32,
    max_flow: f32,
    /// Room past the header end of the flow, i.e. above `max_flow`.
    leading_extension: f32,
    trailing_extension: f32,
    glide: Option<Glide>,
    settling: bool,
}

impl Scroller {
    pub fn new(flow: FlowAxis) -> Self {
        Self {
            flow,
            offset: Point::ZERO,
            velocity: Point::ZERO,
            touch_velocity: Point::ZERO,
            content_size: Size::ZERO,
            min_flow: f32::NEG_INFINITY,
            max_flow: f32::INFINITY,
            leading_extension: 0.0,
            trailing_extension: 0.0,
            glide: None,
            settling: false,
        }
    }

    pub fn content_size(&self) -> Size {
        self.content_size
    }

    pub fn is_settling(&self) -> bool {
        self.settling
    }

    /// Flow-space offset range the content may rest in, before boundary
    /// extensions.
    pub fn set_bounds(&mut self, min_flow: f32, max_flow: f32) {
        self.min_flow = min_flow;
        self.max_flow = max_flow;
    }

    pub fn drag_by(&mut self, delta: Point, dt: f32) {
        let delta = if self.correction() != 0.0 {
            scale(delta, RESISTANCE)
        } else {
            delta
        };
        self.offset = self.offset + delta;
        self.touch_velocity = scale(delta, 1.0 / dt);
        self.glide = None;
        self.settling = false;
    }

    /// Ends the drag. Flings with the last touch velocity unless a snap is
    /// already gliding.
    pub fn release(&mut self) {
        if self.glide.is_none() {
            self.velocity = self.touch_velocity;
        }
        self.settling = true;
    }

    /// Advances one frame. Returns `true` on the frame settling finishes.
    pub fn step(&mut self, dt: f32) -> bool {
        if !self.settling {
            return false;
        }
        if let Some(glide) = self.glide.as_mut() {
            glide.elapsed += dt;
            let t = (glide.elapsed / glide.duration).min(1.0);
            let eased = 1.0 - (1.0 - t).powi(3);
            self.offset = glide.from + scale(glide.to - glide.from, eased);
            if t >= 1.0 {
                self.glide = None;
                self.settling = false;
                return true;
            }
            return false;
        }

        self.offset = self.offset + scale(self.velocity, dt);
        self.velocity = scale(self.velocity, DECELERATION);
        let correction = self.correction();
        if correction != 0.0 {
            self.velocity = scale(self.velocity, 0.5);
            let main = self.flow.from_flow(correction * SPRING);
            self.offset = self.offset + self.flow.point(main, 0.0);
        }

        if self.speed() < REST_SPEED && self.correction().abs() < 0.5 {
            let main = self.flow.from_flow(self.correction());
            self.offset = self.offset + self.flow.point(main, 0.0);
            self.velocity = Point::ZERO;
            self.settling = false;
            return true;
        }
        false
    }

    fn speed(&self) -> f32 {
        self.flow.main(self.velocity).abs()
    }

    fn flow_offset(&self) -> f32 {
        self.flow.to_flow(self.flow.main(self.offset))
    }

    /// Flow-space move that brings the offset back inside its bounds.
    fn correction(&self) -> f32 {
        let offset = self.flow_offset();
        let max = self.max_flow + self.leading_extension;
        let min = (self.min_flow - self.trailing_extension).min(max);
        if offset > max {
            max - offset
        } else if offset < min {
            min - offset
        } else {
            0.0
        }
    }
}

impl ScrollDriver for Scroller {
    fn content_offset(&self) -> Point {
        self.offset
    }

    fn out_of_boundary(&self) -> Point {
        self.flow.point(self.flow.from_flow(self.correction()), 0.0)
    }

    fn is_auto_scroll_braking(&self) -> bool {
        self.settling && self.glide.is_none() && self.speed() < BRAKING_SPEED
    }

    fn is_auto_scrolling(&self) -> bool {
        self.settling
    }

    fn touch_velocity(&self) -> Point {
        self.touch_velocity
    }

    fn start_bounce_back_if_needed(&mut self) -> bool {
        if self.correction() == 0.0 {
            return false;
        }
        self.glide = None;
        self.velocity = Point::ZERO;
        self.settling = true;
        true
    }

    fn set_content_size(&mut self, size: Size) {
        self.content_size = size;
    }

    fn extend_boundary(&mut self, edge: Edge, amount: f32) {
        // Screen edges: the top/left edge is the trailing end of a reversed flow.
        let leading = (edge == Edge::Header) != self.flow.is_reversed();
        let extension = if leading {
            &mut self.leading_extension
        } else {
            &mut self.trailing_extension
        };
        *extension = (*extension + amount).max(0.0);
    }

    fn scroll_to_offset(&mut self, offset: Point, duration: f32) {
        if duration <= 0.0 {
            self.offset = offset;
            self.glide = None;
            return;
        }
        self.glide = Some(Glide {
            from: self.offset,
            to: offset,
            elapsed: 0.0,
            duration,
        });
        self.velocity = Point::ZERO;
        self.settling = true;
    }

    fn start_auto_scroll(&mut self) {
        self.settling = true;
    }
}

fn scale(p: Point, k: f32) -> Point {
    Point::new(p.x * k, p.y * k)
}
