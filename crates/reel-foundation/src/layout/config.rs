//! Layout configuration.

use crate::error::ConfigError;
use reel_core::{
    EdgeInsets, FlowAxis, HorizontalDirection, Orientation, Point, Size, Spacing,
    VerticalDirection, DEFAULT_POOL_CAPACITY,
};

/// Default overscan: the window covers twice the viewport extent.
pub const DEFAULT_OVERSCAN_MULTIPLE: f32 = 2.0;

/// Size, anchor and scale every new item starts from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ItemTemplate {
    pub size: Size,
    pub anchor: Point,
    pub scale: Point,
}

impl Default for ItemTemplate {
    fn default() -> Self {
        Self {
            size: Size::new(100.0, 100.0),
            anchor: Point::new(0.5, 0.5),
            scale: Point::ONE,
        }
    }
}

/// Configuration for [`RecyclerLayout`](super::RecyclerLayout).
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutConfig {
    pub orientation: Orientation,
    pub vertical_direction: VerticalDirection,
    pub horizontal_direction: HorizontalDirection,
    pub viewport: Size,
    pub template: ItemTemplate,
    /// Items per row (vertical) or column (horizontal). 1 is a plain list.
    pub group_size: usize,
    pub padding: EdgeInsets,
    pub spacing: Spacing,
    /// The window keeps instantiating items until it covers this many
    /// viewport extents.
    pub overscan_multiple: f32,
    /// Wrap at the top (vertical) or left (horizontal) edge.
    pub header_loop: bool,
    /// Wrap at the bottom (vertical) or right (horizontal) edge.
    pub footer_loop: bool,
    pub scale_affects_size: bool,
    pub pool_capacity: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            orientation: Orientation::Vertical,
            vertical_direction: VerticalDirection::TopToBottom,
            horizontal_direction: HorizontalDirection::LeftToRight,
            viewport: Size::new(480.0, 800.0),
            template: ItemTemplate::default(),
            group_size: 1,
            padding: EdgeInsets::default(),
            spacing: Spacing::default(),
            overscan_multiple: DEFAULT_OVERSCAN_MULTIPLE,
            header_loop: false,
            footer_loop: false,
            scale_affects_size: false,
            pool_capacity: DEFAULT_POOL_CAPACITY,
        }
    }
}

impl LayoutConfig {
    pub fn flow_axis(&self) -> FlowAxis {
        FlowAxis::new(
            self.orientation,
            self.vertical_direction,
            self.horizontal_direction,
            self.scale_affects_size,
        )
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.group_size == 0 {
            return Err(ConfigError::ZeroGroupSize);
        }
        if self.pool_capacity == 0 {
            return Err(ConfigError::ZeroPoolCapacity);
        }
        if !self.overscan_multiple.is_finite() || self.overscan_multiple < 1.0 {
            return Err(ConfigError::InvalidOverscan {
                multiple: self.overscan_multiple,
            });
        }
        // Infinite viewports are tolerated and clamped later; zero or negative are not.
        let viewport = self.viewport;
        if viewport.width.is_nan()
            || viewport.height.is_nan()
            || viewport.width <= 0.0
            || viewport.height <= 0.0
        {
            return Err(ConfigError::InvalidViewport { size: viewport });
        }
        let size = self.template.size;
        if !size.is_finite() || size.width < 0.0 || size.height < 0.0 {
            return Err(ConfigError::InvalidTemplateSize { size });
        }
        for (axis, value) in [("x", self.template.anchor.x), ("y", self.template.anchor.y)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::AnchorOutOfRange { axis, value });
            }
        }
        Ok(())
    }
}
