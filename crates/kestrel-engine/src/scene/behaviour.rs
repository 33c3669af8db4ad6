use anyhow::Result;
use glam::Affine3A;

/// Mutable view of a node handed to [`NodeBehaviour::update`].
///
/// `world` is the transform computed for the current pass
/// (`parent_world * local`). Edits to `local` take effect on the next
/// pass; the node's children are still visited with the current `world`.
pub struct UpdateCtx<'a> {
    pub local: &'a mut Affine3A,
    pub world: Affine3A,

    /// Wall-clock seconds since the previous update pass.
    pub dt: f64,
}

/// Per-node lifecycle capability.
///
/// The graph depends only on this trait; nodes without logic use the
/// defaults. Hooks are invoked in tree order by the owning traversal —
/// see `SceneNode` for the order guarantees.
pub trait NodeBehaviour {
    /// One-time setup. An error aborts the remaining siblings and fails
    /// the whole graph's startup; no partial-success state is kept.
    fn initialise(&mut self) -> Result<()> {
        Ok(())
    }

    /// Per-pass logic hook.
    fn update(&mut self, ctx: &mut UpdateCtx<'_>) {
        let _ = ctx;
    }

    /// Draw hook. `world` is the transform from the last update pass.
    fn render(&self, world: &Affine3A) {
        let _ = world;
    }

    /// Teardown hook, called exactly once per node.
    fn shutdown(&mut self) {}
}

/// Behaviour with no logic, for pure grouping/transform nodes.
#[derive(Debug, Default)]
pub struct NullBehaviour;

impl NodeBehaviour for NullBehaviour {}
