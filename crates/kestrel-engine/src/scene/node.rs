use std::fmt;

use anyhow::{Context, Result};
use glam::Affine3A;

use super::behaviour::{NodeBehaviour, NullBehaviour, UpdateCtx};

/// A node in the scene tree.
///
/// Each node is owned exclusively by its parent (the root by the graph):
/// [`add`](Self::add) takes the child by value and
/// [`remove`](Self::remove) hands the subtree back by value, so dual
/// ownership and cycles are unrepresentable rather than merely checked.
///
/// Names are not required to be unique; lookups return the first match in
/// depth-first order.
pub struct SceneNode {
    name: String,
    local: Affine3A,

    /// World transform from the most recent update pass. Only a cache for
    /// the duration of one pass; recomputed from scratch every pass so it
    /// always reflects the latest local transforms.
    world: Affine3A,

    behaviour: Box<dyn NodeBehaviour>,
    children: Vec<SceneNode>,
}

impl SceneNode {
    /// Creates a transform-only node with no logic.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_behaviour(name, Box::new(NullBehaviour))
    }

    pub fn with_behaviour(name: impl Into<String>, behaviour: Box<dyn NodeBehaviour>) -> Self {
        Self {
            name: name.into(),
            local: Affine3A::IDENTITY,
            world: Affine3A::IDENTITY,
            behaviour,
            children: Vec::new(),
        }
    }

    /// Builder-style local transform.
    pub fn with_local(mut self, local: Affine3A) -> Self {
        self.local = local;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn local_transform(&self) -> Affine3A {
        self.local
    }

    pub fn set_local_transform(&mut self, local: Affine3A) {
        self.local = local;
    }

    /// World transform computed by the most recent update pass.
    pub fn world_transform(&self) -> Affine3A {
        self.world
    }

    pub fn children(&self) -> &[SceneNode] {
        &self.children
    }

    /// Appends `node` as the last child.
    pub fn add(&mut self, node: SceneNode) {
        self.children.push(node);
    }

    /// Detaches and returns the first node named `name` below this one,
    /// searching depth-first. The caller owns the returned subtree:
    /// re-attach it with [`add`](Self::add) or drop it to destroy it.
    /// An absent name is a no-op, not an error.
    pub fn remove(&mut self, name: &str) -> Option<SceneNode> {
        for idx in 0..self.children.len() {
            if self.children[idx].name == name {
                return Some(self.children.remove(idx));
            }
            if let Some(found) = self.children[idx].remove(name) {
                return Some(found);
            }
        }
        None
    }

    /// Depth-first search for the first node named `name`, this node
    /// included.
    pub fn find(&self, name: &str) -> Option<&SceneNode> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(name))
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut SceneNode> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter_mut().find_map(|child| child.find_mut(name))
    }

    /// Initialises this node, then its children in insertion order.
    ///
    /// The first failure propagates immediately; siblings after the failed
    /// node are never initialised.
    pub fn initialise(&mut self) -> Result<()> {
        self.behaviour
            .initialise()
            .with_context(|| format!("failed to initialise scene node {:?}", self.name))?;
        for child in &mut self.children {
            child.initialise()?;
        }
        Ok(())
    }

    /// Runs one update pass: computes `world = parent_world * local`, runs
    /// the behaviour hook, then recurses into the children in insertion
    /// order with this node's world transform.
    pub fn update(&mut self, dt: f64, parent_world: &Affine3A) {
        self.world = *parent_world * self.local;

        let mut ctx = UpdateCtx {
            local: &mut self.local,
            world: self.world,
            dt,
        };
        self.behaviour.update(&mut ctx);

        for child in &mut self.children {
            child.update(dt, &self.world);
        }
    }

    /// Renders this node, then its children (pre-order).
    ///
    /// Parent-before-children is the fixed contract: a parent's draw state
    /// is in place before any of its children draw.
    pub fn render(&self) {
        self.behaviour.render(&self.world);
        for child in &self.children {
            child.render();
        }
    }

    /// Tears down the children before this node (post-order), visiting
    /// every node exactly once. Children release resources before the
    /// parent that provided them.
    pub fn shutdown(&mut self) {
        for child in &mut self.children {
            child.shutdown();
        }
        self.behaviour.shutdown();
    }
}

impl fmt::Debug for SceneNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneNode")
            .field("name", &self.name)
            .field("local", &self.local)
            .field("children", &self.children)
            .finish_non_exhaustive()
    }
}
