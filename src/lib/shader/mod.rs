//! Procedural texture node graph. Compilation of the graph to shader code is done by the host.

pub mod graph;
