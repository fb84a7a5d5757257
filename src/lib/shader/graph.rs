//! Ordered node [Graph] of a procedural texture.
//!
//! Nodes are stored behind shared handles so that views over the graph (such as a
//! [ParameterCollection](crate::parameter::ParameterCollection)) alias the nodes instead of
//! copying them.

use crate::texture::TextureRef;

use std::{cell::RefCell, collections::HashMap, fmt::Display, rc::Rc};

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
/// Wrapper around [String].
pub struct NodeId(String);
impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}
impl From<String> for NodeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}
impl Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// Wrapper around [String].
pub struct Name(String);
impl From<&str> for Name {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}
impl From<String> for Name {
    fn from(value: String) -> Self {
        Self(value)
    }
}
impl From<&Name> for String {
    fn from(name: &Name) -> Self {
        name.0.clone()
    }
}
impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
impl Display for Name {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
/// Reference to a [Graph] or [Node] socket.
pub enum SocketRef {
    /// Node [NodeId] and output socket [Name]
    Node(NodeId, Name),
    /// Graph input socket [Name]
    Graph(Name),
}

#[macro_export]
/// Shorthand to reference sockets from the [Graph](Graph) or other [Node](Node)s.
/// # Example
/// ```
/// use texgraph::{sref, shader::graph::{SocketRef, Name, NodeId}};
///
/// let graph_socket = sref!(graph "socket_name");
/// assert_eq!(graph_socket, SocketRef::Graph(Name::from("socket_name")));
///
/// let node_socket = sref!(node "node_name" => "socket_name");
/// assert_eq!(node_socket, SocketRef::Node(NodeId::from("node_name"), Name::from("socket_name")));
/// ```
macro_rules! sref {
    (graph $field:expr) => {
        $crate::shader::graph::SocketRef::Graph($crate::shader::graph::Name::from($field))
    };

    (node $node:expr => $field:expr) => {
        $crate::shader::graph::SocketRef::Node(
            $crate::shader::graph::NodeId::from($node),
            $crate::shader::graph::Name::from($field),
        )
    };
}

#[macro_export]
/// Shorthand to reference sockets wrapped in an [Option::Some]. Calls [sref] internally so the
/// syntax is the same.
/// # Example
/// ```
/// use texgraph::{sref, ssref};
///
/// assert_eq!(ssref!(graph "value"), Some(sref!(graph "value")));
/// ```
macro_rules! ssref {
    ($($tree:tt)+) => {
        Some($crate::sref!($($tree)+))
    };
}

#[derive(Clone, Debug, PartialEq)]
/// User-exposed scalar input.
pub struct FloatParameter {
    /// Lookup key, also used as the material property name.
    pub name: Name,
    /// Raw value, or the normalized `0..=1` slider position when [slider](Self::slider) is set.
    pub default_value: f32,
    /// Lower slider bound.
    pub min: f32,
    /// Upper slider bound.
    pub max: f32,
    /// Edit through a bounded slider instead of a numeric field.
    pub slider: bool,
}

impl FloatParameter {
    /// Parameter edited as a raw number.
    pub fn new(name: impl Into<Name>, default_value: f32) -> Self {
        Self {
            name: name.into(),
            default_value,
            min: 0.,
            max: 1.,
            slider: false,
        }
    }

    /// Parameter edited through a slider between `min` and `max`, `position` being normalized.
    pub fn slider(name: impl Into<Name>, position: f32, min: f32, max: f32) -> Self {
        Self {
            name: name.into(),
            default_value: position,
            min,
            max,
            slider: true,
        }
    }

    /// Value sent to the shader.
    pub fn effective_value(&self) -> f32 {
        if self.slider {
            self.min + (self.max - self.min) * self.default_value
        } else {
            self.default_value
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
/// User-exposed texture input.
pub struct TextureParameter {
    /// Lookup key, also used as the material property name.
    pub name: Name,
    /// Texture used when nothing overrides it.
    pub default_texture: TextureRef,
}

impl TextureParameter {
    #[allow(missing_docs)]
    pub fn new(name: impl Into<Name>, default_texture: TextureRef) -> Self {
        Self {
            name: name.into(),
            default_texture,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
/// Any non-parameter node, e.g. a noise generator or a blend.
pub struct Operation {
    /// Operation name, resolved by the shader compiler.
    pub name: Name,
    /// Node inputs and what they are linked to.
    pub inputs: HashMap<Name, Option<SocketRef>>,
}

/// Shared, mutable node handle.
pub type Handle<T> = Rc<RefCell<T>>;

#[derive(Clone, Debug, PartialEq)]
/// A graph node. Cloning a node clones the handle, not the node.
pub enum Node {
    /// Scalar parameter.
    Float(Handle<FloatParameter>),
    /// Texture parameter.
    Texture(Handle<TextureParameter>),
    /// Anything else.
    Operation(Handle<Operation>),
}

impl Node {
    /// Copy the node into a fresh handle.
    pub fn duplicate(&self) -> Self {
        match self {
            Node::Float(node) => node.borrow().clone().into(),
            Node::Texture(node) => node.borrow().clone().into(),
            Node::Operation(node) => node.borrow().clone().into(),
        }
    }

    /// Check if the node is one of the parameter variants.
    pub fn is_parameter(&self) -> bool {
        matches!(self, Node::Float(_) | Node::Texture(_))
    }
}

impl From<FloatParameter> for Node {
    fn from(value: FloatParameter) -> Self {
        Self::Float(Rc::new(RefCell::new(value)))
    }
}

impl From<TextureParameter> for Node {
    fn from(value: TextureParameter) -> Self {
        Self::Texture(Rc::new(RefCell::new(value)))
    }
}

impl From<Operation> for Node {
    fn from(value: Operation) -> Self {
        Self::Operation(Rc::new(RefCell::new(value)))
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
/// Procedural texture graph, keeping its nodes in insertion order.
///
/// [Clone] shares the node handles between both graphs; use [duplicate](Graph::duplicate) for an
/// independent copy.
pub struct Graph {
    /// Nodes in insertion order.
    pub nodes: Vec<(NodeId, Node)>,
}

#[macro_export]
/// Instantiate a [Graph] concisely.
/// # Example
/// ```
/// use texgraph::{graph, node, ssref};
///
/// let graph = graph! {
///     "scale": node!(float "scale" = 4.),
///     "roughness": node!(slider "roughness" = 0.5, 0., 2.),
///     "albedo": node!(texture "albedo"),
///     "noise": node!(op "noise", inputs: "scale": ssref!(node "scale" => "value")),
/// };
///
/// assert_eq!(graph.len(), 4);
/// assert_eq!(graph.parameter_count(), 3);
/// ```
macro_rules! graph {
    { $($id:literal : $node:expr),* $(,)? } => {
        $crate::shader::graph::Graph {
            nodes: ::std::vec![
                $(($crate::shader::graph::NodeId::from($id), $crate::shader::graph::Node::from($node))),*
            ],
        }
    };
}

#[macro_export]
/// Instantiate a [Node] concisely.
///
/// # Examples
///
/// ```
/// use texgraph::{node, ssref, shader::graph::Node, texture::TextureRef};
///
/// let raw: Node = node!(float "scale" = 2.);
/// let slider: Node = node!(slider "roughness" = 0.25, 0., 4.);
/// let texture: Node = node!(texture "albedo" = TextureRef::none());
/// let blend: Node = node!(op "blend", inputs: "a": ssref!(node "noise" => "color"), "b": None);
///
/// assert!(raw.is_parameter() && slider.is_parameter() && texture.is_parameter());
/// assert!(!blend.is_parameter());
/// ```
macro_rules! node {
    (float $name:literal = $value:expr $(,)?) => {
        $crate::shader::graph::Node::from($crate::shader::graph::FloatParameter::new($name, $value))
    };

    (slider $name:literal = $position:expr, $min:expr, $max:expr $(,)?) => {
        $crate::shader::graph::Node::from($crate::shader::graph::FloatParameter::slider(
            $name, $position, $min, $max,
        ))
    };

    (texture $name:literal $(,)?) => {
        $crate::shader::graph::Node::from($crate::shader::graph::TextureParameter::new(
            $name,
            $crate::texture::TextureRef::none(),
        ))
    };

    (texture $name:literal = $texture:expr $(,)?) => {
        $crate::shader::graph::Node::from($crate::shader::graph::TextureParameter::new(
            $name, $texture,
        ))
    };

    (op $name:literal $(, inputs: $($input:literal : $socket_ref:expr),+)? $(,)?) => {
        $crate::shader::graph::Node::from({
            #[allow(unused_mut)]
            let mut inputs = ::std::collections::HashMap::new();
            $(
                $(
                    inputs.insert($crate::shader::graph::Name::from($input), $socket_ref);
                )+
            )?

            $crate::shader::graph::Operation {
                name: $crate::shader::graph::Name::from($name),
                inputs,
            }
        })
    };
}

impl Graph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node.
    pub fn push(&mut self, id: impl Into<NodeId>, node: impl Into<Node>) -> &mut Self {
        self.nodes.push((id.into(), node.into()));
        self
    }

    /// Get a node by its id.
    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes
            .iter()
            .find(|(node_id, _node)| node_id == id)
            .map(|(_id, node)| node)
    }

    /// Iterate over the nodes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().map(|(_id, node)| node)
    }

    #[allow(missing_docs)]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[allow(missing_docs)]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of [Float](Node::Float) and [Texture](Node::Texture) nodes.
    pub fn parameter_count(&self) -> usize {
        self.iter().filter(|node| node.is_parameter()).count()
    }

    /// Deep copy, with every node in a fresh handle.
    pub fn duplicate(&self) -> Self {
        Self {
            nodes: self
                .nodes
                .iter()
                .map(|(id, node)| (id.clone(), node.duplicate()))
                .collect(),
        }
    }
}
