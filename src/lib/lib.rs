#![warn(missing_docs)]

//! Library used by the texgraph editor. Provides a procedural texture node graph and the
//! parameter collection used to sync, apply and edit the graph's exposed inputs.

pub mod color;
pub mod image;
pub mod material;
pub mod parameter;
pub mod shader;
pub mod texture;

/// Commonly used types.
pub mod prelude {
    pub use crate::{
        color::Color,
        image::Image,
        material::{Material, MaterialProperty},
        parameter::{
            panel::EditorUi, ApplyReport, CollectionConfig, DuplicatePolicy, ParameterCollection,
            ParameterKey, SyncReport, Tolerance,
        },
        shader::graph::{FloatParameter, Graph, Name, Node, NodeId, TextureParameter},
        texture::{Texture, TextureLibrary, TextureRef},
    };
}
