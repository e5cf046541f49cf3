//! Ready-made adapters built from small composable pieces.
//!
//! An [`ItemSource`] answers "how many items and what does each say". A
//! [`TextWheelAdapter`] pairs any source with a host [`TextViewFactory`] and
//! provides the full [`WheelAdapter`](crate::WheelAdapter) capability.

mod source;
mod text;

pub use source::{ArrayItems, ItemSource, NumericFormat, NumericItems};
pub use text::{TextStyle, TextViewFactory, TextWheelAdapter};
