//! Item views, factories and painters for headless tests.

use std::cell::Cell;
use wheel_foundation::{ItemView, TextStyle, TextViewFactory};
use wheel_graphics::{Brush, IntRect, IntSize};
use wheel_ui::{ItemPlacement, WheelPainter};

/// Fixed-size text cell.
#[derive(Clone, Debug, PartialEq)]
pub struct TestItemView {
    pub text: String,
    pub size: IntSize,
    /// Creation order, stable across rebinding.
    pub id: usize,
}

impl ItemView for TestItemView {
    fn measured_size(&self) -> IntSize {
        self.size
    }
}

/// Builds [`TestItemView`]s of one size and counts how many it made.
#[derive(Debug)]
pub struct TestTextFactory {
    item_size: IntSize,
    created: Cell<usize>,
}

impl TestTextFactory {
    pub const DEFAULT_ITEM_SIZE: IntSize = IntSize::new(60, 40);

    pub fn new(item_size: IntSize) -> Self {
        Self {
            item_size,
            created: Cell::new(0),
        }
    }

    /// Views built so far, items and placeholders together.
    pub fn created(&self) -> usize {
        self.created.get()
    }

    fn create(&self) -> TestItemView {
        let id = self.created.get();
        self.created.set(id + 1);
        TestItemView {
            text: String::new(),
            size: self.item_size,
            id,
        }
    }
}

impl Default for TestTextFactory {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ITEM_SIZE)
    }
}

impl TextViewFactory for TestTextFactory {
    type View = TestItemView;

    fn create_item_view(&self) -> TestItemView {
        self.create()
    }

    fn create_empty_view(&self) -> TestItemView {
        self.create()
    }

    fn bind_text(&self, view: &mut TestItemView, text: &str, _style: &TextStyle) {
        view.text.clear();
        view.text.push_str(text);
    }
}

/// One item paint call.
#[derive(Clone, Debug, PartialEq)]
pub struct PaintedItem {
    pub text: String,
    pub view_id: usize,
    pub placement: ItemPlacement,
}

/// Painter that keeps every call for later assertions.
#[derive(Clone, Debug, Default)]
pub struct RecordingPainter {
    pub items: Vec<PaintedItem>,
    pub center: Option<(Brush, IntRect)>,
    pub shadows: Vec<(Brush, IntRect)>,
}

impl RecordingPainter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.text.as_str()).collect()
    }

    /// The item painted across the middle of the center band.
    pub fn selected(&self) -> Option<&PaintedItem> {
        let (_, band) = self.center.as_ref()?;
        let middle = (band.top + band.bottom) / 2;
        self.items
            .iter()
            .find(|item| item.placement.bounds.top <= middle && middle < item.placement.bounds.bottom)
    }
}

impl WheelPainter<TestItemView> for RecordingPainter {
    fn draw_item(&mut self, view: &TestItemView, placement: &ItemPlacement) {
        self.items.push(PaintedItem {
            text: view.text.clone(),
            view_id: view.id,
            placement: *placement,
        });
    }

    fn draw_center_filter(&mut self, brush: &Brush, bounds: IntRect) {
        self.center = Some((brush.clone(), bounds));
    }

    fn draw_shadow(&mut self, brush: &Brush, bounds: IntRect) {
        self.shadows.push((brush.clone(), bounds));
    }
}
