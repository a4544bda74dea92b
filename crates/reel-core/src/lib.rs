//! Core building blocks for Reel: geometry primitives, axis-aware item math,
//! the reusable instance pool and a small observable value container.

pub mod axis;
pub mod geometry;
pub mod observable;
pub mod pool;

pub use axis::{
    max_extent, min_extent, FlowAxis, HorizontalDirection, ItemBounds, Orientation,
    VerticalDirection,
};
pub use geometry::{EdgeInsets, Point, Size, Spacing};
pub use observable::{ListenerId, Observable};
pub use pool::{
    InstanceFactory, InstanceId, InstancePool, NullFactory, PoolStats, DEFAULT_POOL_CAPACITY,
};
