//! Scene graph.
//!
//! Responsibilities:
//! - compose local transforms into world transforms top-down
//! - drive per-node lifecycle hooks in a fixed, documented tree order
//! - keep node ownership exclusive (a parent owns its children by value)

mod behaviour;
mod graph;
mod node;

pub use behaviour::{NodeBehaviour, NullBehaviour, UpdateCtx};
pub use graph::SceneGraph;
pub use node::SceneNode;
