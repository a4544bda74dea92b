//! Viewport geometry for the recycling window.
//!
//! Converts the configured viewport, padding and grid settings into flow-space
//! boundaries once, and guards against infinite or unreasonably large
//! viewports (a list placed in an unconstrained parent) with a fallback extent.

use super::config::LayoutConfig;
use reel_core::{FlowAxis, Size};

/// Maximum reasonable viewport extent before treating it as infinite.
const MAX_REASONABLE_VIEWPORT: f32 = 100_000.0;

/// Number of items the fallback extent should hold.
const INFINITE_VIEWPORT_ITEM_COUNT: f32 = 20.0;

/// Item extent assumed when the template has none.
pub const DEFAULT_ITEM_SIZE_ESTIMATE: f32 = 48.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportGeometry {
    main_extent: f32,
    cross_extent: f32,
    leading_padding: f32,
    trailing_padding: f32,
    cross_leading_padding: f32,
    item_cross_size: f32,
    overscan_multiple: f32,
    is_infinite: bool,
}

impl ViewportGeometry {
    pub fn new(config: &LayoutConfig, flow: &FlowAxis) -> Self {
        let group = config.group_size.max(1) as f32;
        let main_spacing = flow.main_spacing(&config.spacing);
        let cross_spacing = flow.cross_spacing(&config.spacing);
        let cross_padding = flow.cross_padding_sum(&config.padding);

        let (main_extent, main_infinite) = effective_extent(
            flow.main_size(config.viewport),
            flow.main_size(config.template.size),
            main_spacing,
            INFINITE_VIEWPORT_ITEM_COUNT,
        );
        let (cross_extent, cross_infinite) = effective_extent(
            flow.cross_size(config.viewport),
            flow.cross_size(config.template.size),
            cross_spacing,
            group,
        );
        let cross_extent = if cross_infinite {
            cross_extent + cross_padding
        } else {
            cross_extent
        };

        let item_cross_size =
            ((cross_extent - cross_padding - (group - 1.0) * cross_spacing) / group).max(0.0);

        Self {
            main_extent,
            cross_extent,
            leading_padding: flow.leading_padding(&config.padding),
            trailing_padding: flow.trailing_padding(&config.padding),
            cross_leading_padding: flow.cross_leading_padding(&config.padding),
            item_cross_size,
            overscan_multiple: config.overscan_multiple,
            is_infinite: main_infinite || cross_infinite,
        }
    }

    #[inline]
    pub fn main_extent(&self) -> f32 {
        self.main_extent
    }

    #[inline]
    pub fn cross_extent(&self) -> f32 {
        self.cross_extent
    }

    pub fn size(&self, flow: &FlowAxis) -> Size {
        flow.size(self.main_extent, self.cross_extent)
    }

    pub fn is_infinite(&self) -> bool {
        self.is_infinite
    }

    /// Header-side edge of the viewport in flow space.
    #[inline]
    pub fn leading_boundary(&self) -> f32 {
        -self.main_extent / 2.0
    }

    /// Footer-side edge of the viewport in flow space.
    #[inline]
    pub fn trailing_boundary(&self) -> f32 {
        self.main_extent / 2.0
    }

    /// Flow-space position of the first item's leading edge.
    pub fn start(&self) -> f32 {
        self.leading_boundary() + self.leading_padding
    }

    /// Cross-flow position of the first slot's leading edge.
    pub fn cross_start(&self) -> f32 {
        -self.cross_extent / 2.0 + self.cross_leading_padding
    }

    pub fn leading_padding(&self) -> f32 {
        self.leading_padding
    }

    pub fn trailing_padding(&self) -> f32 {
        self.trailing_padding
    }

    /// Cross-axis size every item is given so `group_size` slots fill a row.
    pub fn item_cross_size(&self) -> f32 {
        self.item_cross_size
    }

    /// Extent the live window should cover.
    pub fn growth_target(&self) -> f32 {
        self.main_extent * self.overscan_multiple
    }
}

fn effective_extent(raw: f32, item_estimate: f32, spacing: f32, count: f32) -> (f32, bool) {
    if raw.is_finite() && raw <= MAX_REASONABLE_VIEWPORT {
        return (raw, false);
    }
    let item = if item_estimate > 0.0 {
        item_estimate
    } else {
        DEFAULT_ITEM_SIZE_ESTIMATE
    };
    let fallback = item * count + spacing * (count - 1.0).max(0.0);
    log::warn!(
        "RecyclerLayout: detected infinite viewport extent ({}), using fallback {}. \
         Give the list a bounded viewport.",
        raw,
        fallback
    );
    (fallback, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::config::ItemTemplate;
    use reel_core::{EdgeInsets, Orientation, Spacing};

    #[test]
    fn vertical_list_boundaries() {
        let config = LayoutConfig {
            viewport: Size::new(300.0, 500.0),
            padding: EdgeInsets {
                top: 10.0,
                bottom: 20.0,
                left: 5.0,
                right: 15.0,
            },
            ..Default::default()
        };
        let flow = config.flow_axis();
        let viewport = ViewportGeometry::new(&config, &flow);

        assert_eq!(viewport.leading_boundary(), -250.0);
        assert_eq!(viewport.trailing_boundary(), 250.0);
        assert_eq!(viewport.start(), -240.0);
        assert_eq!(viewport.cross_start(), -145.0);
        // 300 - 5 - 15 = 280
        assert_eq!(viewport.item_cross_size(), 280.0);
        assert_eq!(viewport.growth_target(), 1000.0);
        assert!(!viewport.is_infinite());
    }

    #[test]
    fn grid_splits_cross_extent() {
        let config = LayoutConfig {
            viewport: Size::new(320.0, 500.0),
            group_size: 3,
            spacing: Spacing::new(10.0, 4.0),
            ..Default::default()
        };
        let flow = config.flow_axis();
        let viewport = ViewportGeometry::new(&config, &flow);
        // (320 - 2 * 10) / 3 = 100
        assert_eq!(viewport.item_cross_size(), 100.0);
    }

    #[test]
    fn horizontal_uses_height_for_cross() {
        let config = LayoutConfig {
            orientation: Orientation::Horizontal,
            viewport: Size::new(600.0, 200.0),
            padding: EdgeInsets::symmetric(0.0, 10.0),
            ..Default::default()
        };
        let flow = config.flow_axis();
        let viewport = ViewportGeometry::new(&config, &flow);
        assert_eq!(viewport.main_extent(), 600.0);
        assert_eq!(viewport.item_cross_size(), 180.0);
    }

    #[test]
    fn infinite_viewport_falls_back() {
        let config = LayoutConfig {
            viewport: Size::new(300.0, f32::INFINITY),
            template: ItemTemplate {
                size: Size::new(300.0, 50.0),
                ..Default::default()
            },
            spacing: Spacing::new(0.0, 8.0),
            ..Default::default()
        };
        let flow = config.flow_axis();
        let viewport = ViewportGeometry::new(&config, &flow);
        assert!(viewport.is_infinite());
        // 50 * 20 + 8 * 19 = 1152
        assert_eq!(viewport.main_extent(), 1152.0);
    }

    #[test]
    fn zero_template_uses_default_estimate() {
        let config = LayoutConfig {
            viewport: Size::new(300.0, 200_000.0),
            template: ItemTemplate {
                size: Size::new(300.0, 0.0),
                ..Default::default()
            },
            ..Default::default()
        };
        let flow = config.flow_axis();
        let viewport = ViewportGeometry::new(&config, &flow);
        assert_eq!(viewport.main_extent(), DEFAULT_ITEM_SIZE_ESTIMATE * 20.0);
    }
}
