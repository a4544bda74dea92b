//! Axis-aware item geometry.
//!
//! Items are described by an anchored box (`ItemBounds`). A [`FlowAxis`] is built
//! once per layout from the orientation and the two directions; every placement,
//! boundary and recycle rule is then written against it instead of branching on
//! the four direction combinations at each call site.
//!
//! Flow space is a one-dimensional coordinate along the main axis that always
//! increases from the header toward the footer. Top-to-bottom and right-to-left
//! negate the raw coordinate; the other directions keep it.

use crate::geometry::{EdgeInsets, Point, Size, Spacing};

/// Scroll orientation of a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VerticalDirection {
    #[default]
    TopToBottom,
    BottomToTop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HorizontalDirection {
    #[default]
    LeftToRight,
    RightToLeft,
}

/// Lower edge of a box along one coordinate.
///
/// `anchor` is the fraction of `size` that lies below `position`.
#[inline]
pub fn min_extent(position: f32, size: f32, anchor: f32) -> f32 {
    position - size * anchor
}

/// Upper edge of a box along one coordinate.
#[inline]
pub fn max_extent(position: f32, size: f32, anchor: f32) -> f32 {
    position + size * (1.0 - anchor)
}

/// Position, size, anchor and scale of one laid-out item.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ItemBounds {
    pub position: Point,
    pub size: Size,
    pub anchor: Point,
    pub scale: Point,
}

impl ItemBounds {
    pub fn new(position: Point, size: Size, anchor: Point) -> Self {
        Self {
            position,
            size,
            anchor,
            scale: Point::ONE,
        }
    }

    /// Size as it occupies space in the list.
    pub fn effective_size(&self, scale_affects_size: bool) -> Size {
        if scale_affects_size {
            Size::new(
                self.size.width * self.scale.x.abs(),
                self.size.height * self.scale.y.abs(),
            )
        } else {
            self.size
        }
    }

    pub fn min_x(&self, scale_affects_size: bool) -> f32 {
        let size = self.effective_size(scale_affects_size);
        min_extent(self.position.x, size.width, self.anchor.x)
    }

    pub fn max_x(&self, scale_affects_size: bool) -> f32 {
        let size = self.effective_size(scale_affects_size);
        max_extent(self.position.x, size.width, self.anchor.x)
    }

    pub fn min_y(&self, scale_affects_size: bool) -> f32 {
        let size = self.effective_size(scale_affects_size);
        min_extent(self.position.y, size.height, self.anchor.y)
    }

    pub fn max_y(&self, scale_affects_size: bool) -> f32 {
        let size = self.effective_size(scale_affects_size);
        max_extent(self.position.y, size.height, self.anchor.y)
    }
}

/// Direction strategy for one (orientation, vertical, horizontal) combination.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlowAxis {
    orientation: Orientation,
    vertical: VerticalDirection,
    horizontal: HorizontalDirection,
    main_sign: f32,
    cross_sign: f32,
    scale_affects_size: bool,
}

impl FlowAxis {
    pub fn new(
        orientation: Orientation,
        vertical: VerticalDirection,
        horizontal: HorizontalDirection,
        scale_affects_size: bool,
    ) -> Self {
        let vertical_sign = match vertical {
            VerticalDirection::TopToBottom => -1.0,
            VerticalDirection::BottomToTop => 1.0,
        };
        let horizontal_sign = match horizontal {
            HorizontalDirection::LeftToRight => 1.0,
            HorizontalDirection::RightToLeft => -1.0,
        };
        let (main_sign, cross_sign) = match orientation {
            Orientation::Vertical => (vertical_sign, horizontal_sign),
            Orientation::Horizontal => (horizontal_sign, vertical_sign),
        };
        Self {
            orientation,
            vertical,
            horizontal,
            main_sign,
            cross_sign,
            scale_affects_size,
        }
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn scale_affects_size(&self) -> bool {
        self.scale_affects_size
    }

    /// True for bottom-to-top and right-to-left flows, where data indices grow
    /// toward the top/left edge.
    pub fn is_reversed(&self) -> bool {
        match self.orientation {
            Orientation::Vertical => self.vertical == VerticalDirection::BottomToTop,
            Orientation::Horizontal => self.horizontal == HorizontalDirection::RightToLeft,
        }
    }

    /// Unit vector pointing from header toward footer.
    pub fn flow_vector(&self) -> Point {
        self.point(self.main_sign, 0.0)
    }

    #[inline]
    pub fn main(&self, p: Point) -> f32 {
        match self.orientation {
            Orientation::Vertical => p.y,
            Orientation::Horizontal => p.x,
        }
    }

    #[inline]
    pub fn cross(&self, p: Point) -> f32 {
        match self.orientation {
            Orientation::Vertical => p.x,
            Orientation::Horizontal => p.y,
        }
    }

    pub fn point(&self, main: f32, cross: f32) -> Point {
        match self.orientation {
            Orientation::Vertical => Point::new(cross, main),
            Orientation::Horizontal => Point::new(main, cross),
        }
    }

    #[inline]
    pub fn main_size(&self, size: Size) -> f32 {
        match self.orientation {
            Orientation::Vertical => size.height,
            Orientation::Horizontal => size.width,
        }
    }

    #[inline]
    pub fn cross_size(&self, size: Size) -> f32 {
        match self.orientation {
            Orientation::Vertical => size.width,
            Orientation::Horizontal => size.height,
        }
    }

    pub fn size(&self, main: f32, cross: f32) -> Size {
        match self.orientation {
            Orientation::Vertical => Size::new(cross, main),
            Orientation::Horizontal => Size::new(main, cross),
        }
    }

    /// Raw main coordinate to flow space. The mapping is its own inverse.
    #[inline]
    pub fn to_flow(&self, raw: f32) -> f32 {
        raw * self.main_sign
    }

    #[inline]
    pub fn from_flow(&self, flow: f32) -> f32 {
        flow * self.main_sign
    }

    #[inline]
    pub fn to_cross_flow(&self, raw: f32) -> f32 {
        raw * self.cross_sign
    }

    #[inline]
    pub fn from_cross_flow(&self, flow: f32) -> f32 {
        flow * self.cross_sign
    }

    /// Change of the flow-space offset between two content offsets.
    pub fn flow_delta(&self, previous: Point, current: Point) -> f32 {
        self.to_flow(self.main(current) - self.main(previous))
    }

    /// Overscroll distance from the driver's out-of-boundary correction vector.
    ///
    /// Screen based, whatever the flow direction: positive values mean the
    /// content was pulled past the top (vertical) or left (horizontal) edge,
    /// negative values past the bottom or right edge.
    pub fn overscroll(&self, out_of_boundary: Point) -> f32 {
        match self.orientation {
            Orientation::Vertical => out_of_boundary.y,
            Orientation::Horizontal => -out_of_boundary.x,
        }
    }

    pub fn main_extent(&self, bounds: &ItemBounds) -> f32 {
        self.main_size(bounds.effective_size(self.scale_affects_size))
    }

    pub fn cross_extent(&self, bounds: &ItemBounds) -> f32 {
        self.cross_size(bounds.effective_size(self.scale_affects_size))
    }

    fn main_span(&self, bounds: &ItemBounds) -> (f32, f32) {
        let size = self.main_extent(bounds);
        let position = self.main(bounds.position);
        let anchor = self.main(bounds.anchor);
        let lo = self.to_flow(min_extent(position, size, anchor));
        let hi = self.to_flow(max_extent(position, size, anchor));
        (lo.min(hi), lo.max(hi))
    }

    /// Header-side edge of the item in flow space.
    pub fn leading_edge(&self, bounds: &ItemBounds) -> f32 {
        self.main_span(bounds).0
    }

    /// Footer-side edge of the item in flow space.
    pub fn trailing_edge(&self, bounds: &ItemBounds) -> f32 {
        self.main_span(bounds).1
    }

    pub fn cross_leading_edge(&self, bounds: &ItemBounds) -> f32 {
        let size = self.cross_extent(bounds);
        let position = self.cross(bounds.position);
        let anchor = self.cross(bounds.anchor);
        let lo = self.to_cross_flow(min_extent(position, size, anchor));
        let hi = self.to_cross_flow(max_extent(position, size, anchor));
        lo.min(hi)
    }

    /// Raw main coordinate that puts the item's leading edge at `leading`.
    pub fn position_from_leading(&self, bounds: &ItemBounds, leading: f32) -> f32 {
        let anchor = self.main(bounds.anchor);
        let depth = if self.main_sign > 0.0 {
            anchor
        } else {
            1.0 - anchor
        };
        self.from_flow(leading + self.main_extent(bounds) * depth)
    }

    /// Raw main coordinate that puts the item's trailing edge at `trailing`.
    pub fn position_from_trailing(&self, bounds: &ItemBounds, trailing: f32) -> f32 {
        self.position_from_leading(bounds, trailing - self.main_extent(bounds))
    }

    /// Raw cross coordinate that puts the item's cross-leading edge at `leading`.
    pub fn cross_position_from_leading(&self, bounds: &ItemBounds, leading: f32) -> f32 {
        let anchor = self.cross(bounds.anchor);
        let depth = if self.cross_sign > 0.0 {
            anchor
        } else {
            1.0 - anchor
        };
        self.from_cross_flow(leading + self.cross_extent(bounds) * depth)
    }

    pub fn set_main_position(&self, bounds: &mut ItemBounds, main: f32) {
        let cross = self.cross(bounds.position);
        bounds.position = self.point(main, cross);
    }

    pub fn set_cross_position(&self, bounds: &mut ItemBounds, cross: f32) {
        let main = self.main(bounds.position);
        bounds.position = self.point(main, cross);
    }

    /// Padding on the header side of the main axis.
    pub fn leading_padding(&self, padding: &EdgeInsets) -> f32 {
        match self.orientation {
            Orientation::Vertical => match self.vertical {
                VerticalDirection::TopToBottom => padding.top,
                VerticalDirection::BottomToTop => padding.bottom,
            },
            Orientation::Horizontal => match self.horizontal {
                HorizontalDirection::LeftToRight => padding.left,
                HorizontalDirection::RightToLeft => padding.right,
            },
        }
    }

    /// Padding on the footer side of the main axis.
    pub fn trailing_padding(&self, padding: &EdgeInsets) -> f32 {
        match self.orientation {
            Orientation::Vertical => match self.vertical {
                VerticalDirection::TopToBottom => padding.bottom,
                VerticalDirection::BottomToTop => padding.top,
            },
            Orientation::Horizontal => match self.horizontal {
                HorizontalDirection::LeftToRight => padding.right,
                HorizontalDirection::RightToLeft => padding.left,
            },
        }
    }

    pub fn cross_leading_padding(&self, padding: &EdgeInsets) -> f32 {
        match self.orientation {
            Orientation::Vertical => match self.horizontal {
                HorizontalDirection::LeftToRight => padding.left,
                HorizontalDirection::RightToLeft => padding.right,
            },
            Orientation::Horizontal => match self.vertical {
                VerticalDirection::TopToBottom => padding.top,
                VerticalDirection::BottomToTop => padding.bottom,
            },
        }
    }

    pub fn cross_padding_sum(&self, padding: &EdgeInsets) -> f32 {
        match self.orientation {
            Orientation::Vertical => padding.horizontal_sum(),
            Orientation::Horizontal => padding.vertical_sum(),
        }
    }

    pub fn main_spacing(&self, spacing: &Spacing) -> f32 {
        match self.orientation {
            Orientation::Vertical => spacing.y,
            Orientation::Horizontal => spacing.x,
        }
    }

    pub fn cross_spacing(&self, spacing: &Spacing) -> f32 {
        match self.orientation {
            Orientation::Vertical => spacing.x,
            Orientation::Horizontal => spacing.y,
        }
    }
}
