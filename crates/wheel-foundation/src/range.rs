//! Window of item indices kept materialized around the cursor.

/// Contiguous run of item indices, `first..first + count`.
///
/// Indices may be negative or past the item count: in bounded mode those
/// slots hold placeholder views, in cyclic mode they wrap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct ItemsRange {
    first: i32,
    count: i32,
}

impl ItemsRange {
    pub const fn new(first: i32, count: i32) -> Self {
        Self { first, count }
    }

    /// Range that contains nothing; recycling against it releases every view.
    pub const fn empty() -> Self {
        Self { first: 0, count: 0 }
    }

    pub fn first(&self) -> i32 {
        self.first
    }

    pub fn last(&self) -> i32 {
        self.first + self.count - 1
    }

    pub fn count(&self) -> i32 {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count <= 0
    }

    pub fn contains(&self, index: i32) -> bool {
        index >= self.first && index <= self.last()
    }
}

/// Items needed to fill `viewport_height` around `cursor` shifted by `offset`.
///
/// Grows symmetrically one item above and below the cursor until the window
/// covers the viewport, then pads toward the side the offset exposes. Returns
/// `None` while the item height is unknown.
pub fn visible_items_range(
    cursor: i32,
    offset: i32,
    item_height: i32,
    viewport_height: i32,
) -> Option<ItemsRange> {
    if item_height <= 0 {
        return None;
    }

    let mut first = cursor;
    let mut count = 1;
    while count * item_height < viewport_height {
        first -= 1;
        count += 2;
    }

    if offset != 0 {
        if offset > 0 {
            first -= 1;
        }
        count += 1;

        // Whole items uncovered beyond the partially visible one.
        let empty_items = offset / item_height;
        first -= empty_items;
        count += empty_items.abs();
    }
    Some(ItemsRange::new(first, count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symmetric_growth_covers_viewport() {
        let range = visible_items_range(10, 0, 40, 205).expect("height known");
        assert!(range.count() * 40 >= 205);
        assert_eq!(range.count(), 7);
        assert_eq!(range.first(), 10 - (range.count() - 1) / 2);
        assert_eq!(range.last(), 13);
    }

    #[test]
    fn unknown_item_height_defers() {
        assert_eq!(visible_items_range(3, 0, 0, 200), None);
        assert_eq!(visible_items_range(3, 15, -1, 200), None);
    }

    #[test]
    fn positive_offset_exposes_item_above() {
        let base = visible_items_range(5, 0, 40, 200).expect("range");
        let shifted = visible_items_range(5, 10, 40, 200).expect("range");
        assert_eq!(shifted.first(), base.first() - 1);
        assert_eq!(shifted.count(), base.count() + 1);
        assert_eq!(shifted.last(), base.last());
    }

    #[test]
    fn negative_offset_exposes_item_below() {
        let base = visible_items_range(5, 0, 40, 200).expect("range");
        let shifted = visible_items_range(5, -10, 40, 200).expect("range");
        assert_eq!(shifted.first(), base.first());
        assert_eq!(shifted.last(), base.last() + 1);
    }

    #[test]
    fn large_offset_pads_whole_items_linearly() {
        let base = visible_items_range(5, 0, 40, 200).expect("range");
        let shifted = visible_items_range(5, 90, 40, 200).expect("range");
        assert_eq!(shifted.first(), base.first() - 3);
        assert_eq!(shifted.count(), base.count() + 3);

        let shifted = visible_items_range(5, -90, 40, 200).expect("range");
        assert_eq!(shifted.first(), base.first() + 2);
        assert_eq!(shifted.count(), base.count() + 3);
    }

    #[test]
    fn empty_range_contains_nothing() {
        let range = ItemsRange::empty();
        assert!(range.is_empty());
        assert!(!range.contains(0));
        assert!(!range.contains(-1));
    }
}
