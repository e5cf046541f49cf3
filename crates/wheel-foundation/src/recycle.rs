//! Pools of detached item views waiting to be rebound.
//!
//! Views leaving the visible window are filed under their position relative
//! to the cursor, so "the item two above the selection" tends to get back the
//! view that last played that role. Placeholder views for out-of-range slots
//! live in their own pool.

use crate::layout::ItemsLayout;
use crate::range::ItemsRange;
use smallvec::SmallVec;
use wheel_core::map::HashMap;

/// Limits on how many detached views are kept.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecyclePolicy {
    /// Views kept per relative-position pool and in the placeholder pool.
    pub max_views_per_pool: usize,
    /// When false, views leaving the window are dropped.
    pub enabled: bool,
}

impl Default for RecyclePolicy {
    fn default() -> Self {
        Self {
            max_views_per_pool: 7,
            enabled: true,
        }
    }
}

impl RecyclePolicy {
    pub fn disabled() -> Self {
        Self {
            max_views_per_pool: 0,
            enabled: false,
        }
    }
}

/// Snapshot of recycler bookkeeping, for tests and debugging.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecycleStats {
    /// Views currently attached to the layout.
    pub items_in_use: usize,
    /// Detached item views across all relative pools.
    pub items_in_pool: usize,
    /// Detached placeholder views.
    pub empty_in_pool: usize,
    /// Times a pooled view was handed back out.
    pub reuse_count: usize,
}

/// Where the wheel stands while views are recycled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecycleContext {
    pub cursor: i32,
    pub item_count: i32,
    pub cyclic: bool,
}

impl RecycleContext {
    fn is_placeholder(&self, index: i32) -> bool {
        !self.cyclic && (index < 0 || index >= self.item_count)
    }
}

type Pool<V> = SmallVec<[V; 2]>;

pub struct WheelRecycler<V> {
    policy: RecyclePolicy,
    items: HashMap<i32, Pool<V>>,
    empty_items: Vec<V>,
    reuse_count: usize,
}

impl<V> WheelRecycler<V> {
    pub fn new(policy: RecyclePolicy) -> Self {
        Self {
            policy,
            items: HashMap::default(),
            empty_items: Vec::new(),
            reuse_count: 0,
        }
    }

    pub fn policy(&self) -> RecyclePolicy {
        self.policy
    }

    /// Detaches every child of `layout` whose index falls outside `range`.
    ///
    /// `first_item` is the index of the layout's first child. Returns the
    /// index of the first child after removal.
    pub fn recycle_items(
        &mut self,
        layout: &mut ItemsLayout<V>,
        first_item: i32,
        range: &ItemsRange,
        context: RecycleContext,
    ) -> i32 {
        let mut first_item = first_item;
        let mut index = first_item;
        let mut position = 0;
        while position < layout.len() {
            if range.contains(index) {
                position += 1;
            } else {
                if let Some(view) = layout.remove(position) {
                    self.recycle_view(view, index, context);
                }
                if position == 0 {
                    first_item += 1;
                }
            }
            index += 1;
        }
        first_item
    }

    /// A detached item view for the slot `relative` positions from the cursor.
    ///
    /// Prefers the pool for that exact position, then the nearest non-empty pool.
    pub fn get_item(&mut self, relative: i32) -> Option<V> {
        let key = match self.items.get(&relative) {
            Some(pool) if !pool.is_empty() => relative,
            _ => self
                .items
                .iter()
                .filter(|(_, pool)| !pool.is_empty())
                .map(|(key, _)| *key)
                .min_by_key(|key| ((key - relative).abs(), *key))?,
        };
        let pool = self.items.get_mut(&key)?;
        let view = pool.pop()?;
        if pool.is_empty() {
            self.items.remove(&key);
        }
        self.reuse_count += 1;
        Some(view)
    }

    pub fn get_empty_item(&mut self) -> Option<V> {
        let view = self.empty_items.pop()?;
        self.reuse_count += 1;
        Some(view)
    }

    /// Drops every pooled view.
    pub fn clear_all(&mut self) {
        self.items.clear();
        self.empty_items.clear();
    }

    pub fn stats(&self, items_in_use: usize) -> RecycleStats {
        RecycleStats {
            items_in_use,
            items_in_pool: self.items.values().map(|pool| pool.len()).sum(),
            empty_in_pool: self.empty_items.len(),
            reuse_count: self.reuse_count,
        }
    }

    fn recycle_view(&mut self, view: V, index: i32, context: RecycleContext) {
        if !self.policy.enabled {
            return;
        }
        let limit = self.policy.max_views_per_pool;
        if context.is_placeholder(index) {
            if self.empty_items.len() < limit {
                self.empty_items.push(view);
            }
            return;
        }
        let pool = self.items.entry(index - context.cursor).or_default();
        if pool.len() < limit {
            pool.push(view);
        }
    }
}

impl<V> Default for WheelRecycler<V> {
    fn default() -> Self {
        Self::new(RecyclePolicy::default())
    }
}

impl<V> std::fmt::Debug for WheelRecycler<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WheelRecycler")
            .field("policy", &self.policy)
            .field("stats", &self.stats(0))
            .finish()
    }
}
