//! Pull-to-refresh progress tracking.
//!
//! Overscroll past an edge is turned into a per-edge progress value. Pulling
//! far enough arms the edge; when momentum settling starts an armed edge
//! locks, holding its boundary open until [`RefreshTracker::release`].
//! Only one edge is ever active: touching one edge reports the other as
//! released with zero progress.

use crate::driver::{Edge, ScrollDriver};
use crate::error::ConfigError;
use smallvec::SmallVec;

/// Overscroll below this counts as zero.
const EPSILON: f32 = 1e-4;

pub const DEFAULT_OUT_OFFSET: f32 = 200.0;
pub const DEFAULT_TRIGGER_MULTIPLE: f32 = 2.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RefreshConfig {
    /// Overscroll distance that counts as progress 1 on the header edge, and
    /// the boundary extension held while it is locked.
    pub header_out_offset: f32,
    /// Progress at which the header edge arms.
    pub header_multiple: f32,
    pub footer_out_offset: f32,
    pub footer_multiple: f32,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            header_out_offset: DEFAULT_OUT_OFFSET,
            header_multiple: DEFAULT_TRIGGER_MULTIPLE,
            footer_out_offset: DEFAULT_OUT_OFFSET,
            footer_multiple: DEFAULT_TRIGGER_MULTIPLE,
        }
    }
}

impl RefreshConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (edge, offset, multiple) in [
            (Edge::Header, self.header_out_offset, self.header_multiple),
            (Edge::Footer, self.footer_out_offset, self.footer_multiple),
        ] {
            if !offset.is_finite() || offset <= 0.0 {
                return Err(ConfigError::InvalidRefreshOffset {
                    edge,
                    value: offset,
                });
            }
            if !multiple.is_finite() || multiple <= 0.0 {
                return Err(ConfigError::InvalidRefreshMultiple {
                    edge,
                    value: multiple,
                });
            }
        }
        Ok(())
    }

    pub fn out_offset(&self, edge: Edge) -> f32 {
        match edge {
            Edge::Header => self.header_out_offset,
            Edge::Footer => self.footer_out_offset,
        }
    }

    pub fn multiple(&self, edge: Edge) -> f32 {
        match edge {
            Edge::Header => self.header_multiple,
            Edge::Footer => self.footer_multiple,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RefreshStage {
    /// Pulling, not yet far enough.
    Touch,
    /// Pulled far enough; releasing will trigger.
    Wait,
    /// Refresh committed, boundary held open.
    Lock,
    /// Idle or easing back.
    Release,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RefreshEvent {
    pub edge: Edge,
    /// True only on the transition into the locked state.
    pub triggered: bool,
    pub progress: f32,
    pub stage: RefreshStage,
}

impl RefreshEvent {
    fn new(edge: Edge, progress: f32, stage: RefreshStage) -> Self {
        Self {
            edge,
            triggered: false,
            progress,
            stage,
        }
    }
}

pub type RefreshEvents = SmallVec<[RefreshEvent; 2]>;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EdgeState {
    pub progress: f32,
    pub armed: bool,
    pub locked: bool,
}

#[derive(Debug)]
pub struct RefreshTracker {
    config: RefreshConfig,
    header: EdgeState,
    footer: EdgeState,
}

impl RefreshTracker {
    pub fn new(config: RefreshConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            header: EdgeState::default(),
            footer: EdgeState::default(),
        })
    }

    pub fn config(&self) -> &RefreshConfig {
        &self.config
    }

    pub fn edge_state(&self, edge: Edge) -> EdgeState {
        match edge {
            Edge::Header => self.header,
            Edge::Footer => self.footer,
        }
    }

    pub fn is_locked(&self) -> bool {
        self.header.locked || self.footer.locked
    }

    fn state_mut(&mut self, edge: Edge) -> &mut EdgeState {
        match edge {
            Edge::Header => &mut self.header,
            Edge::Footer => &mut self.footer,
        }
    }

    fn progress_for(&self, edge: Edge, distance: f32) -> f32 {
        if distance < EPSILON {
            0.0
        } else {
            distance / self.config.out_offset(edge)
        }
    }

    /// Tracks an active drag. `overscroll` is positive past the header edge
    /// and negative past the footer edge.
    pub fn on_touch_moved(&mut self, overscroll: f32) -> RefreshEvents {
        let mut events = RefreshEvents::new();
        if self.is_locked() {
            return events;
        }
        let (edge, other) = match split(overscroll) {
            Some(pair) => pair,
            None => return self.clear_progress(),
        };
        let progress = self.progress_for(edge, overscroll.abs());
        let armed = progress >= self.config.multiple(edge);
        *self.state_mut(edge) = EdgeState {
            progress,
            armed,
            locked: false,
        };
        *self.state_mut(other) = EdgeState::default();
        let stage = if armed {
            RefreshStage::Wait
        } else {
            RefreshStage::Touch
        };
        events.push(RefreshEvent::new(edge, progress, stage));
        events.push(RefreshEvent::new(other, 0.0, RefreshStage::Release));
        events
    }

    /// Tracks momentum settling. Ignored while braking or when not settling.
    ///
    /// Unlocked progress only decreases; a locked edge holds at least 1.
    pub fn on_settle(
        &mut self,
        overscroll: f32,
        braking: bool,
        auto_scrolling: bool,
    ) -> RefreshEvents {
        let mut events = RefreshEvents::new();
        if braking || !auto_scrolling {
            return events;
        }
        let Some((edge, _)) = split(overscroll) else {
            if !self.is_locked() {
                return self.clear_progress();
            }
            return events;
        };
        let measured = self.progress_for(edge, overscroll.abs());
        let state = self.state_mut(edge);
        let stage = if state.locked {
            if state.progress != 1.0 {
                state.progress = measured.max(1.0);
            }
            RefreshStage::Lock
        } else {
            state.progress = state.progress.min(measured);
            RefreshStage::Release
        };
        events.push(RefreshEvent::new(edge, state.progress, stage));
        events
    }

    /// Locks an armed edge as momentum settling begins, extending the
    /// driver's boundary on that edge by its out-offset.
    pub fn commit_lock(&mut self, driver: &mut dyn ScrollDriver) -> RefreshEvents {
        let mut events = RefreshEvents::new();
        let edge = if self.header.armed && !self.header.locked {
            Edge::Header
        } else if self.footer.armed && !self.footer.locked {
            Edge::Footer
        } else {
            return events;
        };
        driver.extend_boundary(edge, self.config.out_offset(edge));
        let state = self.state_mut(edge);
        state.locked = true;
        log::debug!("RefreshTracker: {:?} locked at progress {}", edge, state.progress);
        events.push(RefreshEvent {
            edge,
            triggered: true,
            progress: state.progress,
            stage: RefreshStage::Lock,
        });
        events
    }

    /// Ends a refresh: retracts the boundary, clears progress, re-lays out via
    /// `relayout` and restarts settling. Does nothing unless an edge is locked.
    pub fn release(
        &mut self,
        driver: &mut dyn ScrollDriver,
        relayout: impl FnOnce(),
    ) -> RefreshEvents {
        self.header.armed = false;
        self.footer.armed = false;
        if !self.is_locked() {
            return RefreshEvents::new();
        }
        for edge in [Edge::Header, Edge::Footer] {
            if self.edge_state(edge).locked {
                driver.extend_boundary(edge, -self.config.out_offset(edge));
                log::debug!("RefreshTracker: {:?} released", edge);
            }
        }
        let events = self.clear_progress();
        relayout();
        self.header.locked = false;
        self.footer.locked = false;
        driver.start_auto_scroll();
        events
    }

    /// Zeroes both edges' progress and reports them released.
    pub fn clear_progress(&mut self) -> RefreshEvents {
        self.header.progress = 0.0;
        self.footer.progress = 0.0;
        let mut events = RefreshEvents::new();
        events.push(RefreshEvent::new(Edge::Header, 0.0, RefreshStage::Release));
        events.push(RefreshEvent::new(Edge::Footer, 0.0, RefreshStage::Release));
        events
    }
}

/// Active and opposite edge for a signed overscroll, `None` at zero.
fn split(overscroll: f32) -> Option<(Edge, Edge)> {
    if overscroll > 0.0 {
        Some((Edge::Header, Edge::Footer))
    } else if overscroll < 0.0 {
        Some((Edge::Footer, Edge::Header))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reel_core::{Point, Size};

    #[derive(Default)]
    struct BoundaryDriver {
        extensions: Vec<(Edge, f32)>,
        restarts: usize,
    }

    impl ScrollDriver for BoundaryDriver {
        fn content_offset(&self) -> Point {
            Point::ZERO
        }
        fn out_of_boundary(&self) -> Point {
            Point::ZERO
        }
        fn is_auto_scroll_braking(&self) -> bool {
            false
        }
        fn is_auto_scrolling(&self) -> bool {
            true
        }
        fn touch_velocity(&self) -> Point {
            Point::ZERO
        }
        fn start_bounce_back_if_needed(&mut self) -> bool {
            false
        }
        fn set_content_size(&mut self, _size: Size) {}
        fn extend_boundary(&mut self, edge: Edge, amount: f32) {
            self.extensions.push((edge, amount));
        }
        fn scroll_to_offset(&mut self, _offset: Point, _duration: f32) {}
        fn start_auto_scroll(&mut self) {
            self.restarts += 1;
        }
    }

    fn tracker() -> RefreshTracker {
        RefreshTracker::new(RefreshConfig::default()).unwrap()
    }

    #[test]
    fn pulling_header_reports_touch_then_wait() {
        let mut refresh = tracker();
        let events = refresh.on_touch_moved(100.0);
        // 100 / 200 = 0.5
        assert_eq!(events[0], RefreshEvent::new(Edge::Header, 0.5, RefreshStage::Touch));
        assert_eq!(events[1], RefreshEvent::new(Edge::Footer, 0.0, RefreshStage::Release));

        let events = refresh.on_touch_moved(400.0);
        assert_eq!(events[0].stage, RefreshStage::Wait);
        assert_eq!(events[0].progress, 2.0);
        assert!(refresh.edge_state(Edge::Header).armed);
    }

    #[test]
    fn tiny_overscroll_counts_as_zero_progress() {
        let mut refresh = tracker();
        let events = refresh.on_touch_moved(0.00001);
        assert_eq!(events[0].progress, 0.0);
    }

    #[test]
    fn edges_are_mutually_exclusive() {
        let mut refresh = tracker();
        for overscroll in [50.0, 120.0, -30.0, -250.0, 10.0, 0.0, -5.0] {
            refresh.on_touch_moved(overscroll);
            let header = refresh.edge_state(Edge::Header);
            let footer = refresh.edge_state(Edge::Footer);
            assert!(!(header.progress > 0.0 && footer.progress > 0.0));
            assert!(!(header.armed && footer.armed));
        }
    }

    #[test]
    fn settling_only_decreases_unlocked_progress() {
        let mut refresh = tracker();
        refresh.on_touch_moved(150.0);
        let events = refresh.on_settle(180.0, false, true);
        assert_eq!(events[0].progress, 0.75);
        let events = refresh.on_settle(60.0, false, true);
        assert_eq!(events[0].progress, 0.3);
        assert_eq!(events[0].stage, RefreshStage::Release);
    }

    #[test]
    fn settling_is_ignored_while_braking_or_idle() {
        let mut refresh = tracker();
        refresh.on_touch_moved(150.0);
        assert!(refresh.on_settle(10.0, true, true).is_empty());
        assert!(refresh.on_settle(10.0, false, false).is_empty());
        assert_eq!(refresh.edge_state(Edge::Header).progress, 0.75);
    }

    #[test]
    fn settling_back_to_zero_clears() {
        let mut refresh = tracker();
        refresh.on_touch_moved(-150.0);
        let events = refresh.on_settle(0.0, false, true);
        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|e| e.stage == RefreshStage::Release && e.progress == 0.0));
        assert_eq!(refresh.edge_state(Edge::Footer).progress, 0.0);
    }

    #[test]
    fn lock_extends_boundary_and_release_retracts() {
        let mut refresh = tracker();
        let mut driver = BoundaryDriver::default();
        refresh.on_touch_moved(420.0);

        let events = refresh.commit_lock(&mut driver);
        assert_eq!(events.len(), 1);
        assert!(events[0].triggered);
        assert_eq!(events[0].stage, RefreshStage::Lock);
        assert_eq!(driver.extensions, vec![(Edge::Header, 200.0)]);
        assert!(refresh.is_locked());

        // Locked: touches are ignored and settling holds progress at least 1.
        assert!(refresh.on_touch_moved(30.0).is_empty());
        let events = refresh.on_settle(100.0, false, true);
        assert_eq!(events[0].stage, RefreshStage::Lock);
        assert!(events[0].progress >= 1.0);

        let mut relayouts = 0;
        let events = refresh.release(&mut driver, || relayouts += 1);
        assert_eq!(events.len(), 2);
        assert_eq!(relayouts, 1);
        assert_eq!(driver.extensions.last(), Some(&(Edge::Header, -200.0)));
        assert_eq!(driver.restarts, 1);
        assert!(!refresh.is_locked());
        assert_eq!(refresh.edge_state(Edge::Header), EdgeState::default());
    }

    #[test]
    fn lock_requires_an_armed_edge() {
        let mut refresh = tracker();
        let mut driver = BoundaryDriver::default();
        refresh.on_touch_moved(100.0);
        assert!(refresh.commit_lock(&mut driver).is_empty());
        assert!(driver.extensions.is_empty());

        let mut relayouts = 0;
        assert!(refresh.release(&mut driver, || relayouts += 1).is_empty());
        assert_eq!(relayouts, 0);
        assert_eq!(driver.restarts, 0);
    }

    #[test]
    fn rejects_non_positive_offsets() {
        let config = RefreshConfig {
            footer_out_offset: 0.0,
            ..Default::default()
        };
        assert_eq!(
            RefreshTracker::new(config).err(),
            Some(ConfigError::InvalidRefreshOffset {
                edge: Edge::Footer,
                value: 0.0
            })
        );
    }
}
