//! Ordered broadcast lists for listener registration.

use indexmap::IndexMap;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Subscribers notified in registration order.
///
/// Notification iterates a snapshot, so a listener may add or remove
/// subscribers (itself included) while it runs. Removals take effect for the
/// next broadcast.
pub struct CallbackList<F: ?Sized> {
    entries: RefCell<IndexMap<ListenerId, Rc<F>>>,
    next_id: Cell<u64>,
}

impl<F: ?Sized> CallbackList<F> {
    pub fn new() -> Self {
        Self {
            entries: RefCell::new(IndexMap::new()),
            next_id: Cell::new(1),
        }
    }

    pub fn add(&self, callback: Rc<F>) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.entries.borrow_mut().insert(id, callback);
        id
    }

    /// Returns `false` when the id was not registered.
    pub fn remove(&self, id: ListenerId) -> bool {
        self.entries.borrow_mut().shift_remove(&id).is_some()
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    pub fn snapshot(&self) -> Vec<Rc<F>> {
        self.entries.borrow().values().cloned().collect()
    }

    pub fn for_each(&self, mut f: impl FnMut(&F)) {
        for callback in self.snapshot() {
            f(&callback);
        }
    }
}

impl<F: ?Sized> Default for CallbackList<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: ?Sized> std::fmt::Debug for CallbackList<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackList")
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notifies_in_registration_order() {
        let list: CallbackList<dyn Fn(&mut Vec<u32>)> = CallbackList::new();
        list.add(Rc::new(|log: &mut Vec<u32>| log.push(1)));
        list.add(Rc::new(|log: &mut Vec<u32>| log.push(2)));
        list.add(Rc::new(|log: &mut Vec<u32>| log.push(3)));

        let mut log = Vec::new();
        list.for_each(|callback| callback(&mut log));
        assert_eq!(log, vec![1, 2, 3]);
    }

    #[test]
    fn removal_keeps_remaining_order() {
        let list: CallbackList<dyn Fn(&mut Vec<u32>)> = CallbackList::new();
        list.add(Rc::new(|log: &mut Vec<u32>| log.push(1)));
        let second = list.add(Rc::new(|log: &mut Vec<u32>| log.push(2)));
        list.add(Rc::new(|log: &mut Vec<u32>| log.push(3)));

        assert!(list.remove(second));
        assert!(!list.remove(second));

        let mut log = Vec::new();
        list.for_each(|callback| callback(&mut log));
        assert_eq!(log, vec![1, 3]);
    }

    #[test]
    fn listener_can_unsubscribe_itself_during_broadcast() {
        let list: Rc<CallbackList<dyn Fn()>> = Rc::new(CallbackList::new());
        let calls = Rc::new(Cell::new(0));
        let own_id = Rc::new(Cell::new(None));

        let list_for_cb = Rc::downgrade(&list);
        let id_for_cb = Rc::clone(&own_id);
        let counter = Rc::clone(&calls);
        let id = list.add(Rc::new(move || {
            counter.set(counter.get() + 1);
            if let (Some(list), Some(id)) = (list_for_cb.upgrade(), id_for_cb.get()) {
                list.remove(id);
            }
        }));
        own_id.set(Some(id));

        list.for_each(|callback| callback());
        list.for_each(|callback| callback());

        assert_eq!(calls.get(), 1);
        assert!(list.is_empty());
    }
}
