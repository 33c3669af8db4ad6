use anyhow::Result;
use glam::Affine3A;

use super::node::SceneNode;

/// Root of a scene tree.
///
/// Thin owner of the root node: seeds the update traversal with the
/// identity transform, so the root's world transform is its own local
/// transform, and forwards the structural operations. All traversal order
/// guarantees are documented on [`SceneNode`].
#[derive(Debug)]
pub struct SceneGraph {
    root: SceneNode,
}

impl SceneGraph {
    /// Creates a graph with an empty root node named `"root"`.
    pub fn new() -> Self {
        Self { root: SceneNode::new("root") }
    }

    /// Creates a graph around an existing root node.
    pub fn with_root(root: SceneNode) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &SceneNode {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut SceneNode {
        &mut self.root
    }

    /// Initialises every node; the first failure aborts the rest and is an
    /// unrecoverable setup error for the caller.
    pub fn initialise(&mut self) -> Result<()> {
        self.root.initialise()
    }

    /// Runs one update pass over the whole tree.
    pub fn update(&mut self, dt: f64) {
        self.root.update(dt, &Affine3A::IDENTITY);
    }

    pub fn render(&self) {
        self.root.render();
    }

    pub fn shutdown(&mut self) {
        self.root.shutdown();
    }

    /// Appends a node under the root.
    pub fn add(&mut self, node: SceneNode) {
        self.root.add(node);
    }

    /// Detaches the first node named `name` anywhere in the tree and
    /// returns it; `None` when absent.
    pub fn remove(&mut self, name: &str) -> Option<SceneNode> {
        self.root.remove(name)
    }

    pub fn find(&self, name: &str) -> Option<&SceneNode> {
        self.root.find(name)
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut SceneNode> {
        self.root.find_mut(name)
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    // ── lookup across add/remove ──────────────────────────────────────────

    #[test]
    fn find_tracks_add_and_remove() {
        let mut graph = SceneGraph::new();
        assert!(graph.find("x").is_none());

        graph.add(SceneNode::new("x"));
        assert_eq!(graph.find("x").map(SceneNode::name), Some("x"));

        let removed = graph.remove("x");
        assert!(removed.is_some());
        assert!(graph.find("x").is_none());
    }

    // ── root transform seeding ────────────────────────────────────────────

    #[test]
    fn root_world_is_identity_composed_with_its_local() {
        let local = Affine3A::from_translation(Vec3::new(0.0, 7.0, 0.0));
        let mut graph = SceneGraph::with_root(SceneNode::new("root").with_local(local));

        graph.update(0.016);
        assert_eq!(graph.root().world_transform(), local);
    }
}
