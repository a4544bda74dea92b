//! Binder and factory doubles that remember what the engine did.

use reel_core::{InstanceFactory, InstanceId, Size};
use reel_foundation::ItemBinder;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Binding {
    pub instance: InstanceId,
    pub data_index: usize,
}

/// Shared view of the bindings a [`RecordingBinder`] received.
///
/// The binder itself moves into the layout; keep a clone of its log to
/// inspect it.
#[derive(Clone, Debug, Default)]
pub struct BindLog(Rc<RefCell<Vec<Binding>>>);

impl BindLog {
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    pub fn bindings(&self) -> Vec<Binding> {
        self.0.borrow().clone()
    }

    /// Data indices in binding order.
    pub fn indices(&self) -> Vec<usize> {
        self.0.borrow().iter().map(|binding| binding.data_index).collect()
    }

    /// Index most recently bound to `instance`.
    pub fn current_index(&self, instance: InstanceId) -> Option<usize> {
        self.0
            .borrow()
            .iter()
            .rev()
            .find(|binding| binding.instance == instance)
            .map(|binding| binding.data_index)
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    fn push(&self, binding: Binding) {
        self.0.borrow_mut().push(binding);
    }
}

type SizeFn = Box<dyn Fn(usize) -> Option<Size>>;

/// [`ItemBinder`] that logs every bind and optionally reports sizes.
#[derive(Default)]
pub struct RecordingBinder {
    log: BindLog,
    sizes: Option<SizeFn>,
}

impl RecordingBinder {
    pub fn new() -> (Self, BindLog) {
        let binder = Self::default();
        let log = binder.log.clone();
        (binder, log)
    }

    /// Reports `sizes(data_index)` from [`ItemBinder::measure`].
    pub fn with_sizes(sizes: impl Fn(usize) -> Option<Size> + 'static) -> (Self, BindLog) {
        let (mut binder, log) = Self::new();
        binder.sizes = Some(Box::new(sizes));
        (binder, log)
    }
}

impl ItemBinder for RecordingBinder {
    fn bind(&mut self, instance: InstanceId, data_index: usize) {
        self.log.push(Binding {
            instance,
            data_index,
        });
    }

    fn measure(&mut self, _instance: InstanceId, data_index: usize) -> Option<Size> {
        self.sizes.as_ref().and_then(|sizes| sizes(data_index))
    }
}

/// [`InstanceFactory`] that counts lifecycle calls.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CountingFactory {
    pub instantiated: usize,
    pub destroyed: usize,
    pub activations: usize,
    pub deactivations: usize,
}

impl CountingFactory {
    /// Instances built and not yet destroyed.
    pub fn alive(&self) -> usize {
        self.instantiated - self.destroyed
    }
}

impl InstanceFactory for CountingFactory {
    fn instantiate(&mut self, _id: InstanceId) {
        self.instantiated += 1;
    }

    fn destroy(&mut self, _id: InstanceId) {
        self.destroyed += 1;
    }

    fn set_active(&mut self, _id: InstanceId, active: bool) {
        if active {
            self.activations += 1;
        } else {
            self.deactivations += 1;
        }
    }
}
