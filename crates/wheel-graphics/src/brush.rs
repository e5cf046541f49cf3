//! Brushes used by the wheel decorations.

use crate::color::Color;

#[derive(Clone, Debug, PartialEq)]
pub enum Brush {
    Solid(Color),
    /// Colors spread evenly from the top edge of the painted bounds to the bottom.
    VerticalGradient(Vec<Color>),
}

impl Brush {
    pub fn solid(color: Color) -> Self {
        Brush::Solid(color)
    }

    pub fn vertical_gradient(colors: Vec<Color>) -> Self {
        Brush::VerticalGradient(colors)
    }

    /// Same gradient painted bottom to top.
    pub fn reversed(&self) -> Self {
        match self {
            Brush::Solid(color) => Brush::Solid(*color),
            Brush::VerticalGradient(colors) => {
                Brush::VerticalGradient(colors.iter().rev().copied().collect())
            }
        }
    }
}
