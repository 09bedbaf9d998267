use glam::Vec3;
use stardrift_common::{Color, Ray, ShapeKind, Transform};
use std::collections::BTreeMap;

use crate::camera::PerspectiveCamera;
use crate::geometry::intersect_shape;

/// Opaque reference to a node in the renderer's retained scene graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeHandle(pub u64);

/// What to create when adding a node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeDesc {
    Mesh {
        shape: ShapeKind,
        color: Color,
        opacity: f32,
        wireframe: bool,
    },
    /// A point cloud with per-point attributes, drawn additively.
    Points {
        positions: Vec<Vec3>,
        colors: Vec<[f32; 3]>,
        sizes: Vec<f32>,
        opacity: f32,
    },
}

/// One ray query result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub node: NodeHandle,
    pub distance: f32,
    pub point: Vec3,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("node {0:?} not found")]
    UnknownNode(NodeHandle),
}

/// The capability surface the frame driver relies on.
///
/// The renderer owns the retained scene graph; callers mirror their state
/// into it and never read scene truth back out, except through ray queries.
pub trait Renderer {
    /// What a submitted frame produces.
    type Frame;

    fn add_node(&mut self, desc: NodeDesc) -> NodeHandle;

    fn remove_node(&mut self, node: NodeHandle) -> Result<(), RenderError>;

    fn set_transform(&mut self, node: NodeHandle, transform: &Transform) -> Result<(), RenderError>;

    fn set_color(&mut self, node: NodeHandle, color: Color) -> Result<(), RenderError>;

    fn set_opacity(&mut self, node: NodeHandle, opacity: f32) -> Result<(), RenderError>;

    /// Mesh nodes among `targets` hit by `ray`, nearest first. Equal
    /// distances keep the order of `targets`.
    fn intersect(&self, ray: &Ray, targets: &[NodeHandle]) -> Vec<Hit>;

    /// Resize the drawable surface.
    fn resize(&mut self, width: u32, height: u32);

    /// Draw one frame of the scene as seen from `camera`.
    fn submit(&mut self, camera: &PerspectiveCamera) -> Self::Frame;
}

#[derive(Debug, Clone)]
struct Node {
    desc: NodeDesc,
    transform: Transform,
    color: Color,
    opacity: f32,
}

/// In-memory renderer: keeps the node table, answers ray queries against the
/// real shape geometry, and reports a summary per submitted frame.
///
/// Stands in for a GPU backend in the command-line host and in tests.
#[derive(Debug)]
pub struct HeadlessRenderer {
    nodes: BTreeMap<NodeHandle, Node>,
    next_handle: u64,
    size: (u32, u32),
    frames: u64,
}

impl HeadlessRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            nodes: BTreeMap::new(),
            next_handle: 0,
            size: (width, height),
            frames: 0,
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn frames_submitted(&self) -> u64 {
        self.frames
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    pub fn color(&self, node: NodeHandle) -> Option<Color> {
        self.nodes.get(&node).map(|n| n.color)
    }

    pub fn opacity(&self, node: NodeHandle) -> Option<f32> {
        self.nodes.get(&node).map(|n| n.opacity)
    }

    pub fn transform(&self, node: NodeHandle) -> Option<Transform> {
        self.nodes.get(&node).map(|n| n.transform)
    }

    /// Human-readable dump of every node.
    pub fn describe(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "=== Headless renderer ({}x{}, frames={}) ===\n",
            self.size.0, self.size.1, self.frames
        ));
        for (handle, node) in &self.nodes {
            let p = node.transform.position;
            let kind = match &node.desc {
                NodeDesc::Mesh { shape, .. } => shape.name().to_string(),
                NodeDesc::Points { positions, .. } => format!("Points[{}]", positions.len()),
            };
            out.push_str(&format!(
                "  [{:>3}] {:<12} pos=({:.2}, {:.2}, {:.2}) color={} opacity={:.2}\n",
                handle.0, kind, p.x, p.y, p.z, node.color, node.opacity
            ));
        }
        out
    }

    fn node_mut(&mut self, node: NodeHandle) -> Result<&mut Node, RenderError> {
        self.nodes.get_mut(&node).ok_or(RenderError::UnknownNode(node))
    }
}

impl Default for HeadlessRenderer {
    fn default() -> Self {
        Self::new(1280, 720)
    }
}

impl Renderer for HeadlessRenderer {
    type Frame = FrameSummary;

    fn add_node(&mut self, desc: NodeDesc) -> NodeHandle {
        let handle = NodeHandle(self.next_handle);
        self.next_handle += 1;
        let (color, opacity) = match &desc {
            NodeDesc::Mesh { color, opacity, .. } => (*color, *opacity),
            NodeDesc::Points { opacity, .. } => (Color::WHITE, *opacity),
        };
        self.nodes.insert(
            handle,
            Node {
                desc,
                transform: Transform::default(),
                color,
                opacity,
            },
        );
        handle
    }

    fn remove_node(&mut self, node: NodeHandle) -> Result<(), RenderError> {
        self.nodes
            .remove(&node)
            .map(|_| ())
            .ok_or(RenderError::UnknownNode(node))
    }

    fn set_transform(&mut self, node: NodeHandle, transform: &Transform) -> Result<(), RenderError> {
        self.node_mut(node)?.transform = *transform;
        Ok(())
    }

    fn set_color(&mut self, node: NodeHandle, color: Color) -> Result<(), RenderError> {
        self.node_mut(node)?.color = color;
        Ok(())
    }

    fn set_opacity(&mut self, node: NodeHandle, opacity: f32) -> Result<(), RenderError> {
        self.node_mut(node)?.opacity = opacity;
        Ok(())
    }

    fn intersect(&self, ray: &Ray, targets: &[NodeHandle]) -> Vec<Hit> {
        let mut hits: Vec<Hit> = targets
            .iter()
            .filter_map(|handle| {
                let node = self.nodes.get(handle)?;
                let NodeDesc::Mesh { shape, .. } = node.desc else {
                    return None;
                };
                let distance = intersect_shape(shape, &node.transform, ray)?;
                Some(Hit {
                    node: *handle,
                    distance,
                    point: ray.at(distance),
                })
            })
            .collect();
        // sort_by is stable: ties keep target order
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
        tracing::debug!(width, height, "render target resized");
    }

    fn submit(&mut self, camera: &PerspectiveCamera) -> FrameSummary {
        self.frames += 1;
        let meshes = self
            .nodes
            .values()
            .filter(|n| matches!(n.desc, NodeDesc::Mesh { .. }))
            .count();
        let points = self
            .nodes
            .values()
            .map(|n| match &n.desc {
                NodeDesc::Points { positions, .. } => positions.len(),
                NodeDesc::Mesh { .. } => 0,
            })
            .sum();
        tracing::trace!(frame = self.frames, meshes, "frame submitted");
        FrameSummary {
            frame: self.frames,
            meshes,
            points,
            eye: camera.position,
            size: self.size,
        }
    }
}

/// What the headless renderer reports for one submitted frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSummary {
    pub frame: u64,
    pub meshes: usize,
    pub points: usize,
    pub eye: Vec3,
    pub size: (u32, u32),
}

impl std::fmt::Display for FrameSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "frame={} meshes={} points={} eye=({:.2}, {:.2}, {:.2}) size={}x{}",
            self.frame,
            self.meshes,
            self.points,
            self.eye.x,
            self.eye.y,
            self.eye.z,
            self.size.0,
            self.size.1
        )
    }
}
