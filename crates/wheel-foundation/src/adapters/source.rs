use crate::error::WheelError;
use std::fmt::Display;

/// Item count plus a text label for each index.
pub trait ItemSource {
    fn item_count(&self) -> usize;

    /// `None` when `index` is out of range.
    fn item_text(&self, index: usize) -> Option<String>;
}

/// Items backed by a slice of displayable values.
#[derive(Clone, Debug, PartialEq)]
pub struct ArrayItems<T> {
    items: Vec<T>,
}

impl<T: Display> ArrayItems<T> {
    pub fn new(items: impl Into<Vec<T>>) -> Self {
        Self {
            items: items.into(),
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }
}

impl<T: Display> ItemSource for ArrayItems<T> {
    fn item_count(&self) -> usize {
        self.items.len()
    }

    fn item_text(&self, index: usize) -> Option<String> {
        self.items.get(index).map(|item| item.to_string())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum NumericFormat {
    #[default]
    Plain,
    /// Left-pads with zeros to the given width, e.g. `05`.
    ZeroPad(usize),
}

impl NumericFormat {
    fn format(&self, value: i64) -> String {
        match self {
            NumericFormat::Plain => value.to_string(),
            NumericFormat::ZeroPad(width) => format!("{value:0width$}", width = *width),
        }
    }
}

/// Every integer from `min` to `max` inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NumericItems {
    min: i64,
    max: i64,
    format: NumericFormat,
}

impl NumericItems {
    pub fn new(min: i64, max: i64) -> Result<Self, WheelError> {
        if min > max {
            return Err(WheelError::InvalidRange { min, max });
        }
        Ok(Self {
            min,
            max,
            format: NumericFormat::Plain,
        })
    }

    pub fn with_format(mut self, format: NumericFormat) -> Self {
        self.format = format;
        self
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }

    pub fn value_at(&self, index: usize) -> Option<i64> {
        let value = self.min.checked_add(i64::try_from(index).ok()?)?;
        (value <= self.max).then_some(value)
    }
}

impl ItemSource for NumericItems {
    fn item_count(&self) -> usize {
        let count = i128::from(self.max) - i128::from(self.min) + 1;
        usize::try_from(count).unwrap_or(usize::MAX)
    }

    fn item_text(&self, index: usize) -> Option<String> {
        self.value_at(index).map(|value| self.format.format(value))
    }
}
