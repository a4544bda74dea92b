//! A value that notifies subscribers when it changes.

/// Identifies a subscription so it can be removed again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener<T> = Box<dyn FnMut(&T)>;

pub struct Observable<T> {
    value: T,
    listeners: Vec<(ListenerId, Listener<T>)>,
    next_listener_id: u64,
}

impl<T> Observable<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            listeners: Vec::new(),
            next_listener_id: 0,
        }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    /// Replaces the value and notifies every listener.
    pub fn set(&mut self, value: T) {
        self.value = value;
        self.notify();
    }

    /// Mutates the value in place; listeners are notified once afterwards.
    pub fn update<R>(&mut self, f: impl FnOnce(&mut T) -> R) -> R {
        let result = f(&mut self.value);
        self.notify();
        result
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&T) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns `false` if the listener was already removed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn notify(&mut self) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(&self.value);
        }
    }
}

impl<T: Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observable")
            .field("value", &self.value)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn set_and_update_notify_listeners() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut lengths = Observable::new(Vec::<u32>::new());
        let sink = Rc::clone(&seen);
        lengths.subscribe(move |v: &Vec<u32>| sink.borrow_mut().push(v.len()));

        lengths.update(|v| v.extend([1, 2, 3]));
        lengths.set(vec![7]);

        assert_eq!(*seen.borrow(), vec![3, 1]);
        assert_eq!(lengths.get(), &vec![7]);
    }

    #[test]
    fn unsubscribed_listener_is_silent() {
        let calls = Rc::new(RefCell::new(0));
        let mut value = Observable::new(0);
        let counter = Rc::clone(&calls);
        let id = value.subscribe(move |_| *counter.borrow_mut() += 1);

        value.set(1);
        assert!(value.unsubscribe(id));
        assert!(!value.unsubscribe(id));
        value.set(2);

        assert_eq!(*calls.borrow(), 1);
        assert_eq!(value.listener_count(), 0);
    }
}
