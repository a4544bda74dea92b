//! Paged scrolling.

mod page_controller;

pub use page_controller::{
    PageConfig, PageController, PageDecision, PageRequest, PagingContext,
    DEFAULT_QUICK_TURN_VELOCITY, DEFAULT_SCROLL_THRESHOLD, DEFAULT_TURNING_SPEED,
};
