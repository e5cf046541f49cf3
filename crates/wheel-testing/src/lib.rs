//! Testing utilities and harness for the wheel picker

pub mod testing;
pub mod views;

pub use testing::*;
pub use views::*;

use std::fmt::Display;
use std::rc::Rc;
use wheel_foundation::{ArrayItems, TextWheelAdapter};

pub type TestTextAdapter<S> = TextWheelAdapter<S, TestTextFactory>;

/// Text adapter over `items` producing default-sized [`TestItemView`]s.
pub fn text_adapter<T: Display>(
    items: impl Into<Vec<T>>,
) -> Rc<TestTextAdapter<ArrayItems<T>>> {
    Rc::new(TextWheelAdapter::new(
        ArrayItems::new(items),
        TestTextFactory::default(),
    ))
}

/// Text adapter labelled `"0"` to `"{count - 1}"`.
pub fn numbered_adapter(count: usize) -> Rc<TestTextAdapter<ArrayItems<usize>>> {
    text_adapter((0..count).collect::<Vec<_>>())
}

pub mod prelude {
    pub use crate::testing::*;
    pub use crate::views::*;
    pub use crate::{numbered_adapter, text_adapter, TestTextAdapter};
}
