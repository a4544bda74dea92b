use reel_core::{InstanceId, ItemBounds, Size};

/// One live entry of the recycling window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutItem {
    pub instance: InstanceId,
    pub data_index: usize,
    pub bounds: ItemBounds,
    /// Column (vertical) or row (horizontal) within a grid line.
    pub cross_slot: usize,
}

/// Receives the data index assigned to an instance.
///
/// `bind` runs every time an instance is created for, or recycled to, a data
/// index. `measure` runs right after it and may report the size the bound
/// content needs; only its main-axis component is applied.
pub trait ItemBinder {
    fn bind(&mut self, instance: InstanceId, data_index: usize);

    fn measure(&mut self, instance: InstanceId, data_index: usize) -> Option<Size> {
        let _ = (instance, data_index);
        None
    }
}

impl<F> ItemBinder for F
where
    F: FnMut(InstanceId, usize),
{
    fn bind(&mut self, instance: InstanceId, data_index: usize) {
        self(instance, data_index)
    }
}

/// Statistics about the recycling window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutStats {
    /// Number of live items in the window.
    pub items_in_use: usize,

    /// Number of idle instances parked in the pool.
    pub items_in_pool: usize,

    /// Total number of instances the window has taken from the pool.
    pub total_created: usize,

    /// Number of recycle moves between the header and footer ends.
    pub recycle_count: usize,

    /// The pool ran out of instances and the window is under-filled.
    pub pool_exhausted: bool,
}
