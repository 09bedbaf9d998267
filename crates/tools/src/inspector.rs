use glam::Vec3;
use stardrift_common::{Color, ObjectId, ShapeKind};
use stardrift_kernel::Scene;
use std::collections::BTreeMap;

/// Read-only queries against the scene for debugging and the CLI.
pub struct SceneInspector;

impl SceneInspector {
    pub fn summary(scene: &Scene) -> SceneSummary {
        let mut by_kind = BTreeMap::new();
        for object in scene.objects() {
            *by_kind.entry(object.kind).or_insert(0) += 1;
        }
        SceneSummary {
            object_count: scene.object_count(),
            star_count: scene.starfield().len(),
            by_kind,
            highlighted: scene.highlighted().collect(),
            starfield_opacity: scene.starfield().opacity,
        }
    }

    pub fn inspect_object(scene: &Scene, id: ObjectId) -> Option<ObjectInfo> {
        scene.object(id).map(|o| ObjectInfo {
            id,
            kind: o.kind,
            position: o.transform.position,
            base_position: o.base_position,
            scale: o.transform.scale.x,
            color: o.color(),
            hover_color: o.hover_color,
        })
    }
}

#[derive(Debug, Clone)]
pub struct SceneSummary {
    pub object_count: usize,
    pub star_count: usize,
    pub by_kind: BTreeMap<ShapeKind, usize>,
    pub highlighted: Vec<ObjectId>,
    pub starfield_opacity: f32,
}

impl std::fmt::Display for SceneSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Scene: objects={} stars={} highlighted={:?} star_opacity={:.2}",
            self.object_count, self.star_count, self.highlighted, self.starfield_opacity
        )?;
        for (kind, count) in &self.by_kind {
            write!(f, " {kind}={count}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct ObjectInfo {
    pub id: ObjectId,
    pub kind: ShapeKind,
    pub position: Vec3,
    pub base_position: Vec3,
    pub scale: f32,
    pub color: Color,
    pub hover_color: Color,
}

impl std::fmt::Display for ObjectInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Object [{:>2}] {:<11} pos=({:.2}, {:.2}, {:.2}) scale={:.2} color={} hover={}",
            self.id.0,
            self.kind,
            self.position.x,
            self.position.y,
            self.position.z,
            self.scale,
            self.color,
            self.hover_color,
        )
    }
}
