//! RGB color used as the pixel type of textures.

use std::{iter::Sum, ops::Div};

use ::derive_more::{Add, AddAssign};

#[derive(Clone, Copy, Default, Debug, Add, AddAssign, PartialEq)]
/// Linear RGB color with `f32` channels.
pub struct Color {
    #[allow(missing_docs)]
    pub r: f32,
    #[allow(missing_docs)]
    pub g: f32,
    #[allow(missing_docs)]
    pub b: f32,
}

impl Color {
    /// Create a color from its channels.
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Color { r, g, b }
    }
}

impl From<f32> for Color {
    fn from(value: f32) -> Self {
        Self::new(value, value, value)
    }
}

impl Sum<Color> for Color {
    fn sum<I: Iterator<Item = Color>>(iter: I) -> Self {
        iter.reduce(|acc, cur| acc + cur)
            .unwrap_or(Color::default())
    }
}

impl Div<f32> for Color {
    type Output = Self;
    fn div(mut self, rhs: f32) -> Self::Output {
        self.r /= rhs;
        self.g /= rhs;
        self.b /= rhs;

        self
    }
}
