//! Ordered container of the materialized item views.

use std::collections::VecDeque;

/// Views for a contiguous run of indices, top to bottom.
///
/// The index of the first child is tracked by the owner; this container only
/// keeps the views in order.
#[derive(Debug)]
pub struct ItemsLayout<V> {
    children: VecDeque<V>,
}

impl<V> ItemsLayout<V> {
    pub fn new() -> Self {
        Self {
            children: VecDeque::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn child(&self, position: usize) -> Option<&V> {
        self.children.get(position)
    }

    pub fn first_child(&self) -> Option<&V> {
        self.children.front()
    }

    pub fn push_front(&mut self, view: V) {
        self.children.push_front(view);
    }

    pub fn push_back(&mut self, view: V) {
        self.children.push_back(view);
    }

    pub fn remove(&mut self, position: usize) -> Option<V> {
        self.children.remove(position)
    }

    pub fn clear(&mut self) {
        self.children.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &V> {
        self.children.iter()
    }
}

impl<V> Default for ItemsLayout<V> {
    fn default() -> Self {
        Self::new()
    }
}
