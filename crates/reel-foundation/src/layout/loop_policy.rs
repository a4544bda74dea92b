//! Wrap-around rules shared by recycling and paging.

use reel_core::FlowAxis;

/// Which ends of the data range wrap around.
///
/// `forward` applies when stepping past the last data index (at the structural
/// footer), `backward` when stepping before index 0. The physical
/// `header_loop`/`footer_loop` flags name the top/left and bottom/right edges,
/// so they swap roles for bottom-to-top and right-to-left flows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoopPolicy {
    pub forward: bool,
    pub backward: bool,
}

impl LoopPolicy {
    pub fn new(header_loop: bool, footer_loop: bool, flow: &FlowAxis) -> Self {
        if flow.is_reversed() {
            Self {
                forward: header_loop,
                backward: footer_loop,
            }
        } else {
            Self {
                forward: footer_loop,
                backward: header_loop,
            }
        }
    }

    /// Data index that follows `current`, or `None` at an unlooped end.
    pub fn next_forward(&self, current: usize, total: usize) -> Option<usize> {
        if total == 0 {
            None
        } else if current + 1 < total {
            Some(current + 1)
        } else if self.forward {
            Some(0)
        } else {
            None
        }
    }

    /// Data index that precedes `current`, or `None` at an unlooped start.
    pub fn next_backward(&self, current: usize, total: usize) -> Option<usize> {
        if total == 0 {
            None
        } else if current > 0 {
            Some((current - 1).min(total - 1))
        } else if self.backward {
            Some(total - 1)
        } else {
            None
        }
    }

    /// Resolves a page candidate that may have stepped outside `[0, total)`.
    ///
    /// Overshooting the end wraps to the first page and undershooting the start
    /// wraps to the last page, when the matching end loops.
    pub fn wrap_page(&self, candidate: isize, total: usize) -> Option<usize> {
        if total == 0 {
            return None;
        }
        if candidate < 0 {
            return self.backward.then(|| total - 1);
        }
        let candidate = candidate as usize;
        if candidate >= total {
            return self.forward.then_some(0);
        }
        Some(candidate)
    }
}
