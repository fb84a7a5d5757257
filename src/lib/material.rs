//! Rendering material, seen as a table of named shader properties.
//!
//! Which properties exist is decided by whoever compiled the shader: setting a property the
//! material does not declare is an error, never an insertion.

use std::collections::HashMap;

use crate::{shader::graph::Name, texture::TextureRef};

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
/// [Material] property access error.
pub enum Error {
    #[error("Material has no property `{0}`")]
    /// The shader does not expose the property, possibly stripped by the compiler.
    MissingProperty(Name),

    #[error("Property `{name}` holds a {expected:?}, got a {got:?}")]
    /// Property exists with the other [PropertyKind].
    MismatchedKind {
        /// Property name.
        name: Name,
        /// Kind declared by the material.
        expected: PropertyKind,
        /// Kind of the value passed in.
        got: PropertyKind,
    },
}

#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// Shader property type.
pub enum PropertyKind {
    Float,
    Texture,
}

#[derive(Clone, Debug, PartialEq)]
/// Current value of a shader property.
pub enum MaterialProperty {
    #[allow(missing_docs)]
    Float(f32),
    #[allow(missing_docs)]
    Texture(TextureRef),
}

impl MaterialProperty {
    /// Get the property's [PropertyKind].
    pub fn kind(&self) -> PropertyKind {
        match self {
            MaterialProperty::Float(_) => PropertyKind::Float,
            MaterialProperty::Texture(_) => PropertyKind::Texture,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
/// A shader along with the values of its exposed properties.
pub struct Material {
    shader: Name,
    properties: HashMap<Name, MaterialProperty>,
}

impl From<(Name, HashMap<Name, MaterialProperty>)> for Material {
    fn from((shader, properties): (Name, HashMap<Name, MaterialProperty>)) -> Self {
        Material { shader, properties }
    }
}

impl Material {
    /// Create a material without any property.
    pub fn new(shader: impl Into<Name>) -> Self {
        Self {
            shader: shader.into(),
            properties: HashMap::new(),
        }
    }

    /// Name of the shader backing the material.
    pub fn shader(&self) -> &Name {
        &self.shader
    }

    /// Expose a float property, replacing any previous declaration.
    pub fn declare_float(&mut self, name: impl Into<Name>, value: f32) -> &mut Self {
        self.properties
            .insert(name.into(), MaterialProperty::Float(value));
        self
    }

    /// Expose a texture property, replacing any previous declaration.
    pub fn declare_texture(&mut self, name: impl Into<Name>, value: TextureRef) -> &mut Self {
        self.properties
            .insert(name.into(), MaterialProperty::Texture(value));
        self
    }

    #[allow(missing_docs)]
    pub fn has_property(&self, name: &Name) -> bool {
        self.properties.contains_key(name)
    }

    #[allow(missing_docs)]
    pub fn property(&self, name: &Name) -> Option<&MaterialProperty> {
        self.properties.get(name)
    }

    /// Iterate over all declared properties.
    pub fn properties(&self) -> impl Iterator<Item = (&Name, &MaterialProperty)> {
        self.properties.iter()
    }

    fn property_mut(&mut self, name: &Name) -> Result<&mut MaterialProperty, Error> {
        self.properties
            .get_mut(name)
            .ok_or_else(|| Error::MissingProperty(name.clone()))
    }

    /// Get a float property's value.
    pub fn float(&self, name: &Name) -> Result<f32, Error> {
        match self.property(name) {
            Some(MaterialProperty::Float(value)) => Ok(*value),
            Some(other) => Err(Error::MismatchedKind {
                name: name.clone(),
                expected: other.kind(),
                got: PropertyKind::Float,
            }),
            None => Err(Error::MissingProperty(name.clone())),
        }
    }

    /// Get a texture property's value.
    pub fn texture(&self, name: &Name) -> Result<&TextureRef, Error> {
        match self.property(name) {
            Some(MaterialProperty::Texture(value)) => Ok(value),
            Some(other) => Err(Error::MismatchedKind {
                name: name.clone(),
                expected: other.kind(),
                got: PropertyKind::Texture,
            }),
            None => Err(Error::MissingProperty(name.clone())),
        }
    }

    /// Set an already declared float property.
    pub fn set_float(&mut self, name: &Name, value: f32) -> Result<(), Error> {
        match self.property_mut(name)? {
            MaterialProperty::Float(current) => {
                *current = value;
                Ok(())
            }
            other => Err(Error::MismatchedKind {
                name: name.clone(),
                expected: other.kind(),
                got: PropertyKind::Float,
            }),
        }
    }

    /// Set an already declared texture property.
    pub fn set_texture(&mut self, name: &Name, value: TextureRef) -> Result<(), Error> {
        match self.property_mut(name)? {
            MaterialProperty::Texture(current) => {
                *current = value;
                Ok(())
            }
            other => Err(Error::MismatchedKind {
                name: name.clone(),
                expected: other.kind(),
                got: PropertyKind::Texture,
            }),
        }
    }
}
