//! Basic image implementation backing textures.

#[derive(Clone, Debug, PartialEq)]
/// Generic image struct. Usage of the word `pixel` in this documentation refers to an instance of
/// the stored data type.
pub struct Image<T> {
    /// Width of the image in pixels
    pub width: u32,
    /// Height of the image in pixels
    pub height: u32,
    /// Vector containing the image's pixels, row by row
    pub pixels: Vec<T>,
}

fn pixel_count(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

impl<T: Clone> Image<T> {
    /// Create an image from a pixel width and height and a default value
    pub fn new(width: u32, height: u32, value: T) -> Self {
        Self {
            width,
            height,
            pixels: vec![value; pixel_count(width, height)],
        }
    }
}

impl<T: Default> Default for Image<T> {
    fn default() -> Self {
        Self {
            width: 1,
            height: 1,
            pixels: vec![T::default()],
        }
    }
}
