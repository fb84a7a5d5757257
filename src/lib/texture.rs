//! Texture assets and the weak references parameters and materials hold onto them.
//!
//! Textures are owned by whoever loaded them (usually a [TextureLibrary]) as [`Rc<Texture>`].
//! Graph nodes and materials only keep a [TextureRef], which does not keep the asset alive.

use std::{
    fmt::Debug,
    rc::{Rc, Weak},
};

use crate::{color::Color, image::Image};

#[derive(Clone, Debug, PartialEq)]
/// A named 2D texture.
pub struct Texture {
    /// Asset name, shown by texture pickers.
    pub name: String,
    /// Pixel data.
    pub image: Image<Color>,
}

impl Texture {
    /// Create a texture from existing pixel data.
    pub fn new(name: &str, image: Image<Color>) -> Self {
        Self {
            name: name.to_owned(),
            image,
        }
    }

    /// Create a texture filled with a single color.
    pub fn solid(name: &str, width: u32, height: u32, color: Color) -> Self {
        Self::new(name, Image::new(width, height, color))
    }

    /// Mean color of all pixels.
    pub fn average(&self) -> Color {
        self.image.pixels.iter().copied().sum::<Color>() / self.image.pixels.len().max(1) as f32
    }
}

#[derive(Clone, Default)]
/// Non-owning, possibly empty reference to a [Texture].
///
/// Two references are equal when they point to the same asset, regardless of its content.
pub struct TextureRef(Option<Weak<Texture>>);

impl TextureRef {
    /// Reference to no texture.
    pub fn none() -> Self {
        Self(None)
    }

    /// Get the referenced texture if it is still alive.
    pub fn upgrade(&self) -> Option<Rc<Texture>> {
        self.0.as_ref().and_then(Weak::upgrade)
    }

    /// Check if the reference is empty or the asset has been dropped.
    pub fn is_none(&self) -> bool {
        self.upgrade().is_none()
    }

    /// Identity comparison.
    pub fn same(&self, other: &Self) -> bool {
        match (&self.0, &other.0) {
            (None, None) => true,
            (Some(lhs), Some(rhs)) => Weak::ptr_eq(lhs, rhs),
            _ => false,
        }
    }

    /// Name of the referenced texture, if alive.
    pub fn name(&self) -> Option<String> {
        self.upgrade().map(|texture| texture.name.clone())
    }
}

impl From<&Rc<Texture>> for TextureRef {
    fn from(texture: &Rc<Texture>) -> Self {
        Self(Some(Rc::downgrade(texture)))
    }
}

impl PartialEq for TextureRef {
    fn eq(&self, other: &Self) -> bool {
        self.same(other)
    }
}

impl Debug for TextureRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.0, self.name()) {
            (None, _) => f.write_str("TextureRef(None)"),
            (Some(_), Some(name)) => write!(f, "TextureRef({name:?})"),
            (Some(_), None) => f.write_str("TextureRef(<dropped>)"),
        }
    }
}

#[derive(Debug, Default)]
/// Ordered set of loaded textures, owning them.
pub struct TextureLibrary {
    textures: Vec<Rc<Texture>>,
}

impl TextureLibrary {
    /// Take ownership of a texture and return a reference to it.
    pub fn add(&mut self, texture: Texture) -> TextureRef {
        let texture = Rc::new(texture);
        let reference = TextureRef::from(&texture);
        self.textures.push(texture);

        reference
    }

    /// Find a texture by name.
    pub fn get(&self, name: &str) -> Option<TextureRef> {
        self.textures
            .iter()
            .find(|texture| texture.name == name)
            .map(TextureRef::from)
    }

    /// Drop the library's ownership of a texture. References to it dangle afterwards unless
    /// someone else holds the [Rc].
    pub fn remove(&mut self, name: &str) -> Option<Rc<Texture>> {
        let position = self.textures.iter().position(|texture| texture.name == name)?;

        Some(self.textures.remove(position))
    }

    /// Iterate over the loaded textures in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Rc<Texture>> {
        self.textures.iter()
    }

    #[allow(missing_docs)]
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    #[allow(missing_docs)]
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}
