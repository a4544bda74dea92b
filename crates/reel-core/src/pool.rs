//! Bounded pool of reusable item instances.
//!
//! The pool hands out opaque [`InstanceId`]s and delegates the heavy work of
//! building, parking and tearing down the real visual objects to an
//! [`InstanceFactory`]. An instance is either idle (parked in the pool) or in
//! use, never both, and the total of the two never exceeds the capacity.

use rustc_hash::FxHashSet;

/// Default maximum number of live instances.
pub const DEFAULT_POOL_CAPACITY: usize = 64;

/// Handle to one pooled visual instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(u32);

impl InstanceId {
    pub fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Builds and tears down the visual object behind an [`InstanceId`].
pub trait InstanceFactory {
    fn instantiate(&mut self, id: InstanceId);

    fn destroy(&mut self, id: InstanceId);

    /// Called with `true` when the instance is handed out and `false` when it
    /// is parked again.
    fn set_active(&mut self, id: InstanceId, active: bool) {
        let _ = (id, active);
    }
}

/// Factory for hosts that keep no per-instance state.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullFactory;

impl InstanceFactory for NullFactory {
    fn instantiate(&mut self, _id: InstanceId) {}

    fn destroy(&mut self, _id: InstanceId) {}
}

/// Snapshot of pool occupancy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PoolStats {
    pub total: usize,
    pub available: usize,
    pub in_use: usize,
    pub capacity: usize,
}

pub struct InstancePool<F: InstanceFactory> {
    factory: F,
    capacity: usize,
    idle: Vec<InstanceId>,
    in_use: FxHashSet<InstanceId>,
    next_id: u32,
}

impl<F: InstanceFactory> InstancePool<F> {
    pub fn new(factory: F, capacity: usize) -> Self {
        Self {
            factory,
            capacity,
            idle: Vec::new(),
            in_use: FxHashSet::default(),
            next_id: 0,
        }
    }

    /// Creates a pool and immediately builds `initial` idle instances.
    pub fn with_prewarm(factory: F, initial: usize, capacity: usize) -> Self {
        let mut pool = Self::new(factory, capacity);
        pool.prewarm(initial);
        pool
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn total(&self) -> usize {
        self.idle.len() + self.in_use.len()
    }

    pub fn is_in_use(&self, id: InstanceId) -> bool {
        self.in_use.contains(&id)
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    pub fn factory_mut(&mut self) -> &mut F {
        &mut self.factory
    }

    /// Builds idle instances until `count` are parked or capacity is reached.
    /// Returns how many were created.
    pub fn prewarm(&mut self, count: usize) -> usize {
        let mut created = 0;
        while self.idle.len() < count && self.total() < self.capacity {
            let id = self.create();
            self.factory.set_active(id, false);
            self.idle.push(id);
            created += 1;
        }
        created
    }

    /// Hands out an idle instance, creating one if there is room.
    ///
    /// Returns `None` when every instance up to the capacity is already in use.
    pub fn acquire(&mut self) -> Option<InstanceId> {
        let id = match self.idle.pop() {
            Some(id) => id,
            None if self.total() < self.capacity => self.create(),
            None => {
                log::debug!(
                    "InstancePool: acquire failed, capacity of {} instances reached",
                    self.capacity
                );
                return None;
            }
        };
        self.factory.set_active(id, true);
        self.in_use.insert(id);
        Some(id)
    }

    /// Returns an instance to the pool. Unknown or already idle instances are
    /// ignored. When the pool shrank below its live total the instance is
    /// destroyed instead of parked.
    pub fn release(&mut self, id: InstanceId) {
        if !self.in_use.remove(&id) {
            return;
        }
        if self.total() < self.capacity {
            self.factory.set_active(id, false);
            self.idle.push(id);
        } else {
            self.factory.destroy(id);
        }
    }

    /// Changes the capacity. Surplus idle instances are destroyed right away;
    /// surplus in-use instances are destroyed as they are released.
    pub fn resize(&mut self, capacity: usize) {
        self.capacity = capacity;
        while self.total() > self.capacity {
            match self.idle.pop() {
                Some(id) => self.factory.destroy(id),
                None => break,
            }
        }
    }

    /// Destroys every parked instance.
    pub fn clear_idle(&mut self) {
        for id in self.idle.drain(..) {
            self.factory.destroy(id);
        }
    }

    /// Destroys every instance, including those still handed out.
    pub fn clear_all(&mut self) {
        self.clear_idle();
        let mut in_use: Vec<InstanceId> = self.in_use.drain().collect();
        in_use.sort_unstable();
        for id in in_use {
            self.factory.destroy(id);
        }
    }

    pub fn stats(&self) -> PoolStats {
        PoolStats {
            total: self.total(),
            available: self.idle.len(),
            in_use: self.in_use.len(),
            capacity: self.capacity,
        }
    }

    fn create(&mut self) -> InstanceId {
        let id = InstanceId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.factory.instantiate(id);
        id
    }
}
