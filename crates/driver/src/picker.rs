use stardrift_common::{ObjectId, Ray};
use stardrift_kernel::Scene;
use stardrift_render::{NodeHandle, Renderer};

/// Tracks which object is under the pointer and keeps its highlight.
///
/// `nodes[i]` must be the renderer node mirroring object `i`.
#[derive(Debug, Default, Clone)]
pub struct HoverPicker {
    hovered: Option<ObjectId>,
}

impl HoverPicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hovered(&self) -> Option<ObjectId> {
        self.hovered
    }

    /// Nearest object hit by `ray`, if any.
    pub fn nearest<R: Renderer>(ray: &Ray, renderer: &R, nodes: &[NodeHandle]) -> Option<ObjectId> {
        let hit = renderer.intersect(ray, nodes).into_iter().next()?;
        nodes
            .iter()
            .position(|n| *n == hit.node)
            .map(|i| ObjectId(i as u32))
    }

    /// Pick along `ray` and move the highlight to the result.
    pub fn pick<R: Renderer>(
        &mut self,
        ray: &Ray,
        scene: &mut Scene,
        renderer: &mut R,
        nodes: &[NodeHandle],
    ) -> Option<ObjectId> {
        let target = Self::nearest(ray, renderer, nodes);
        self.hover(target, scene, renderer, nodes)
    }

    /// Make `target` the hovered object, restoring the previous one.
    pub fn hover<R: Renderer>(
        &mut self,
        target: Option<ObjectId>,
        scene: &mut Scene,
        renderer: &mut R,
        nodes: &[NodeHandle],
    ) -> Option<ObjectId> {
        if self.hovered == target {
            return target;
        }

        if let Some(prev) = self.hovered.take() {
            if let Some(object) = scene.object_mut(prev) {
                object.restore_color();
                mirror_color(renderer, nodes, prev, object.color());
            }
        }

        if let Some(id) = target {
            if let Some(object) = scene.object_mut(id) {
                object.highlight();
                mirror_color(renderer, nodes, id, object.color());
                tracing::debug!(object = id.0, kind = %object.kind, "hover");
                self.hovered = Some(id);
            }
        }
        self.hovered
    }
}

fn mirror_color<R: Renderer>(
    renderer: &mut R,
    nodes: &[NodeHandle],
    id: ObjectId,
    color: stardrift_common::Color,
) {
    let Some(&node) = nodes.get(id.index()) else {
        tracing::warn!(object = id.0, "no renderer node for object");
        return;
    };
    if let Err(e) = renderer.set_color(node, color) {
        tracing::warn!(object = id.0, error = %e, "failed to mirror hover color");
    }
}
