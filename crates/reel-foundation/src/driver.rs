//! Contract with the host's scroll physics.
//!
//! The engine never moves content itself. It reads the offset and edge state
//! from a [`ScrollDriver`] and hands it content size, boundary extensions and
//! snap requests.

use reel_core::{Point, Size};

/// One screen edge of the list along the main axis, as named by the
/// `header_*`/`footer_*` options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    /// Top of a vertical list, left of a horizontal one.
    Header,
    /// Bottom of a vertical list, right of a horizontal one.
    Footer,
}

pub trait ScrollDriver {
    /// Content origin relative to the viewport centre.
    fn content_offset(&self) -> Point;

    /// Correction the driver would apply to bring overscrolled content back
    /// inside its bounds. Zero while in bounds.
    fn out_of_boundary(&self) -> Point;

    fn is_auto_scroll_braking(&self) -> bool;

    fn is_auto_scrolling(&self) -> bool;

    /// Most recent touch-move velocity.
    fn touch_velocity(&self) -> Point;

    /// Starts a bounce-back animation if the content is out of bounds.
    /// Returns whether one was started.
    fn start_bounce_back_if_needed(&mut self) -> bool;

    fn set_content_size(&mut self, size: Size);

    /// Lets content rest `amount` past the given edge. Negative amounts undo
    /// an earlier extension.
    fn extend_boundary(&mut self, edge: Edge, amount: f32);

    /// Animates the content offset to `offset` over `duration` seconds.
    fn scroll_to_offset(&mut self, offset: Point, duration: f32);

    /// Restarts momentum settling from the current offset.
    fn start_auto_scroll(&mut self);
}
