//! User-exposed parameters of a [Graph].
//!
//! A [ParameterCollection] is a transient view built by scanning a graph's nodes once. It keeps
//! the graph's own node handles, so editing an entry edits the graph. Collections are used to
//! carry defaults over to a regenerated graph ([rebuild_with_defaults](ParameterCollection::rebuild_with_defaults)),
//! to write them back ([overwrite_into](ParameterCollection::overwrite_into)), to push values
//! onto a [Material](crate::material::Material)
//! ([apply_to_material](ParameterCollection::apply_to_material)) and to draw an edit panel
//! ([render_edit_panel](ParameterCollection::render_edit_panel)).

mod index;
pub mod panel;
mod sync;

#[cfg(feature = "egui")]
pub mod egui_ui;

pub use index::{DuplicatePolicy, ParameterIndex, DEFAULT_DUPLICATE_POLICY};
pub use sync::{ApplyReport, SyncReport};

use crate::shader::graph::{FloatParameter, Graph, Handle, Name, Node, TextureParameter};

use std::fmt::Display;

use float_eq::float_eq;
use log::debug;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
/// [ParameterCollection] error.
pub enum Error {
    #[error("Duplicate {0}")]
    /// Raised only under [DuplicatePolicy::Reject].
    DuplicateParameter(ParameterKey),
}

#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// The two kinds of parameter nodes.
pub enum ParameterKind {
    Float,
    Texture,
}

impl Display for ParameterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ParameterKind::Float => "float",
            ParameterKind::Texture => "texture",
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// Identity of a parameter across graphs: same name and same kind.
pub struct ParameterKey {
    #[allow(missing_docs)]
    pub kind: ParameterKind,
    #[allow(missing_docs)]
    pub name: Name,
}

impl ParameterKey {
    #[allow(missing_docs)]
    pub fn float(name: impl Into<Name>) -> Self {
        Self {
            kind: ParameterKind::Float,
            name: name.into(),
        }
    }

    #[allow(missing_docs)]
    pub fn texture(name: impl Into<Name>) -> Self {
        Self {
            kind: ParameterKind::Texture,
            name: name.into(),
        }
    }
}

impl Display for ParameterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} parameter `{}`", self.kind, self.name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// Float comparison tolerance. Two values are considered equal when either check passes.
pub struct Tolerance {
    /// Absolute difference.
    pub abs: f32,
    /// Difference relative to the larger magnitude.
    pub rmax: f32,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            abs: 8. * f32::EPSILON,
            rmax: 1e-6,
        }
    }
}

impl Tolerance {
    /// Check if `lhs` and `rhs` are equal within tolerance.
    pub fn approx_eq(&self, lhs: f32, rhs: f32) -> bool {
        float_eq!(lhs, rhs, abs <= self.abs, rmax <= self.rmax)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// Settings of a [ParameterCollection].
pub struct CollectionConfig {
    /// How duplicate names are resolved by lookups.
    pub duplicate_policy: DuplicatePolicy,
    /// Used by [render_edit_panel](ParameterCollection::render_edit_panel) to detect changes.
    pub change_tolerance: Tolerance,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            duplicate_policy: DEFAULT_DUPLICATE_POLICY,
            change_tolerance: Tolerance::default(),
        }
    }
}

#[derive(Clone, Debug, Default)]
/// Float and texture parameters of a [Graph], in node order.
pub struct ParameterCollection {
    floats: Vec<Handle<FloatParameter>>,
    textures: Vec<Handle<TextureParameter>>,
    config: CollectionConfig,
}

impl ParameterCollection {
    /// Collect the parameters of `graph` with the default [CollectionConfig].
    pub fn build(graph: &Graph) -> Self {
        Self::build_with(graph, CollectionConfig::default())
    }

    /// Collect the parameters of `graph`.
    pub fn build_with(graph: &Graph, config: CollectionConfig) -> Self {
        let mut res = Self {
            config,
            ..Default::default()
        };

        for node in graph.iter() {
            match node {
                Node::Float(handle) => res.floats.push(handle.clone()),
                Node::Texture(handle) => res.textures.push(handle.clone()),
                Node::Operation(_) => (),
            }
        }

        debug!(
            "Collected {} float and {} texture parameters out of {} nodes",
            res.floats.len(),
            res.textures.len(),
            graph.len()
        );

        res
    }

    #[allow(missing_docs)]
    pub fn config(&self) -> &CollectionConfig {
        &self.config
    }

    /// Float parameters, aliasing the graph's nodes.
    pub fn floats(&self) -> &[Handle<FloatParameter>] {
        &self.floats
    }

    /// Texture parameters, aliasing the graph's nodes.
    pub fn textures(&self) -> &[Handle<TextureParameter>] {
        &self.textures
    }

    /// Total number of parameters.
    pub fn len(&self) -> usize {
        self.floats.len() + self.textures.len()
    }

    #[allow(missing_docs)]
    pub fn is_empty(&self) -> bool {
        self.floats.is_empty() && self.textures.is_empty()
    }

    /// Name index following the collection's [DuplicatePolicy].
    pub fn index(&self) -> Result<ParameterIndex, Error> {
        self.index_with(self.config.duplicate_policy)
    }

    /// Name index following the given [DuplicatePolicy].
    pub fn index_with(&self, policy: DuplicatePolicy) -> Result<ParameterIndex, Error> {
        ParameterIndex::new(self, policy)
    }

    /// Find a float parameter by name.
    pub fn float(&self, name: &Name) -> Result<Option<Handle<FloatParameter>>, Error> {
        Ok(self
            .index()?
            .get(&ParameterKey::float(name.clone()))
            .map(|position| self.floats[position].clone()))
    }

    /// Find a texture parameter by name.
    pub fn texture(&self, name: &Name) -> Result<Option<Handle<TextureParameter>>, Error> {
        Ok(self
            .index()?
            .get(&ParameterKey::texture(name.clone()))
            .map(|position| self.textures[position].clone()))
    }

    /// Keys of all parameters, floats first, each in node order.
    pub fn keys(&self) -> impl Iterator<Item = ParameterKey> + '_ {
        self.floats
            .iter()
            .map(|handle| ParameterKey::float(handle.borrow().name.clone()))
            .chain(
                self.textures
                    .iter()
                    .map(|handle| ParameterKey::texture(handle.borrow().name.clone())),
            )
    }
}
