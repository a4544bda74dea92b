//! Recycling window, page snapping and pull-to-refresh tracking for Reel.
//!
//! [`RecyclerLayout`] keeps a bounded set of pooled instances laid out around
//! the viewport and moves them between the list ends as content scrolls.
//! [`ReelView`] wires it to a host [`ScrollDriver`] together with the optional
//! [`PageController`] and [`RefreshTracker`].

pub mod driver;
pub mod error;
pub mod layout;
pub mod paging;
pub mod refresh;
pub mod view;

pub use driver::{Edge, ScrollDriver};
pub use error::ConfigError;
pub use layout::{
    ItemBinder, ItemTemplate, LayoutConfig, LayoutItem, LayoutStats, LoopPolicy, RecyclerLayout,
    ScrollDirection, ViewportGeometry, DEFAULT_ITEM_SIZE_ESTIMATE, DEFAULT_OVERSCAN_MULTIPLE,
};
pub use paging::{
    PageConfig, PageController, PageDecision, PageRequest, PagingContext,
    DEFAULT_QUICK_TURN_VELOCITY, DEFAULT_SCROLL_THRESHOLD, DEFAULT_TURNING_SPEED,
};
pub use refresh::{
    EdgeState, RefreshConfig, RefreshEvent, RefreshEvents, RefreshStage, RefreshTracker,
    DEFAULT_OUT_OFFSET, DEFAULT_TRIGGER_MULTIPLE,
};
pub use view::{ReelConfig, ReelView, ScrollEvent};

pub mod prelude {
    pub use crate::driver::{Edge, ScrollDriver};
    pub use crate::layout::{ItemBinder, LayoutConfig, RecyclerLayout, ScrollDirection};
    pub use crate::paging::{PageConfig, PageDecision};
    pub use crate::refresh::{RefreshConfig, RefreshStage};
    pub use crate::view::{ReelConfig, ReelView, ScrollEvent};
    pub use reel_core::{
        EdgeInsets, HorizontalDirection, InstanceFactory, InstanceId, Orientation, Point, Size,
        Spacing, VerticalDirection,
    };
}
