use super::source::ItemSource;
use crate::adapter::{AdapterObservers, ItemView, WheelAdapter};
use std::cell::{Ref, RefCell};
use wheel_graphics::Color;

pub const DEFAULT_TEXT_COLOR: Color = Color::from_argb(0xFF58_5858);
pub const DEFAULT_TEXT_SIZE: f32 = 24.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub color: Color,
    pub size: f32,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            color: DEFAULT_TEXT_COLOR,
            size: DEFAULT_TEXT_SIZE,
        }
    }
}

/// Host hook that builds and binds text item views.
pub trait TextViewFactory {
    type View: ItemView;

    fn create_item_view(&self) -> Self::View;

    fn create_empty_view(&self) -> Self::View;

    fn bind_text(&self, view: &mut Self::View, text: &str, style: &TextStyle);
}

/// Adapter rendering each item of an [`ItemSource`] as a text view.
pub struct TextWheelAdapter<S, F> {
    source: RefCell<S>,
    factory: F,
    style: TextStyle,
    observers: AdapterObservers,
}

impl<S: ItemSource, F: TextViewFactory> TextWheelAdapter<S, F> {
    pub fn new(source: S, factory: F) -> Self {
        Self {
            source: RefCell::new(source),
            factory,
            style: TextStyle::default(),
            observers: AdapterObservers::new(),
        }
    }

    pub fn with_style(mut self, style: TextStyle) -> Self {
        self.style = style;
        self
    }

    pub fn style(&self) -> &TextStyle {
        &self.style
    }

    pub fn source(&self) -> Ref<'_, S> {
        self.source.borrow()
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// Replaces the source and tells observers the content changed.
    pub fn set_source(&self, source: S) {
        *self.source.borrow_mut() = source;
        self.observers.notify_data_changed();
    }

    /// Mutates the source in place and tells observers the content changed.
    pub fn update_source(&self, update: impl FnOnce(&mut S)) {
        update(&mut self.source.borrow_mut());
        self.observers.notify_data_changed();
    }
}

impl<S: ItemSource, F: TextViewFactory> WheelAdapter for TextWheelAdapter<S, F> {
    type View = F::View;

    fn item_count(&self) -> usize {
        self.source.borrow().item_count()
    }

    fn item(&self, index: usize, convert_view: Option<Self::View>) -> Option<Self::View> {
        let text = self.source.borrow().item_text(index)?;
        let mut view = convert_view.unwrap_or_else(|| self.factory.create_item_view());
        self.factory.bind_text(&mut view, &text, &self.style);
        Some(view)
    }

    fn empty_item(&self, convert_view: Option<Self::View>) -> Option<Self::View> {
        let mut view = convert_view.unwrap_or_else(|| self.factory.create_empty_view());
        self.factory.bind_text(&mut view, "", &self.style);
        Some(view)
    }

    fn observers(&self) -> &AdapterObservers {
        &self.observers
    }
}
