use glam::Vec3;
use stardrift_common::{Ray, ShapeKind, Transform};
use std::f32::consts::TAU;

const PARALLEL_EPSILON: f32 = 1e-9;
const MIN_DISTANCE: f32 = 1e-6;

/// Triangle mesh of a primitive in its local frame, used for picking.
#[derive(Debug, Clone)]
pub struct ShapeMesh {
    pub vertices: Vec<Vec3>,
    pub triangles: Vec<[usize; 3]>,
}

impl ShapeMesh {
    pub fn for_shape(kind: ShapeKind) -> Self {
        match kind {
            ShapeKind::Cube => cube(1.0),
            ShapeKind::Pyramid => pyramid(0.6, 1.2, 4),
            ShapeKind::Octahedron => octahedron(0.8),
            ShapeKind::Tetrahedron => tetrahedron(0.8),
        }
    }

    /// Radius of the smallest origin-centered sphere containing the mesh.
    pub fn bounding_radius(&self) -> f32 {
        self.vertices
            .iter()
            .map(|v| v.length())
            .fold(0.0, f32::max)
    }

    /// Nearest ray parameter where the local-space ray crosses any triangle.
    /// Both faces of a triangle count as hits.
    pub fn intersect_local(&self, origin: Vec3, direction: Vec3) -> Option<f32> {
        self.triangles
            .iter()
            .filter_map(|&[a, b, c]| {
                ray_triangle(
                    origin,
                    direction,
                    self.vertices[a],
                    self.vertices[b],
                    self.vertices[c],
                )
            })
            .min_by(f32::total_cmp)
    }
}

/// World distance along `ray` to the surface of a shape placed by
/// `transform`, if the ray hits it in front of its origin.
pub fn intersect_shape(kind: ShapeKind, transform: &Transform, ray: &Ray) -> Option<f32> {
    let mesh = ShapeMesh::for_shape(kind);

    // Bounding sphere rejection
    let radius = mesh.bounding_radius() * transform.scale.max_element();
    let to_center = transform.position - ray.origin;
    let along = to_center.dot(ray.direction);
    if to_center.length_squared() - along * along > radius * radius {
        return None;
    }

    // An affine map preserves the ray parameter, so `t` found in local space
    // is the world distance along the unit-length world direction.
    let inverse = transform.matrix().inverse();
    let origin = inverse.transform_point3(ray.origin);
    let direction = inverse.transform_vector3(ray.direction);
    mesh.intersect_local(origin, direction)
}

/// Moller-Trumbore ray/triangle test.
fn ray_triangle(origin: Vec3, direction: Vec3, a: Vec3, b: Vec3, c: Vec3) -> Option<f32> {
    let edge1 = b - a;
    let edge2 = c - a;
    let p = direction.cross(edge2);
    let det = edge1.dot(p);
    if det.abs() < PARALLEL_EPSILON {
        return None;
    }
    let inv_det = 1.0 / det;

    let s = origin - a;
    let u = s.dot(p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }
    let q = s.cross(edge1);
    let v = direction.dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = edge2.dot(q) * inv_det;
    (t > MIN_DISTANCE).then_some(t)
}

fn cube(size: f32) -> ShapeMesh {
    let h = size * 0.5;
    let vertices = (0..8)
        .map(|i| {
            let pick = |bit: usize| if i & bit != 0 { h } else { -h };
            Vec3::new(pick(1), pick(2), pick(4))
        })
        .collect();
    #[rustfmt::skip]
    let triangles = vec![
        [0, 2, 6], [0, 6, 4], // -x
        [1, 3, 7], [1, 7, 5], // +x
        [0, 1, 5], [0, 5, 4], // -y
        [2, 3, 7], [2, 7, 6], // +y
        [0, 1, 3], [0, 3, 2], // -z
        [4, 5, 7], [4, 7, 6], // +z
    ];
    ShapeMesh { vertices, triangles }
}

/// Cone with a polygonal base, apex up, centered on its mid-height.
fn pyramid(radius: f32, height: f32, segments: usize) -> ShapeMesh {
    let half = height * 0.5;
    let mut vertices = vec![Vec3::new(0.0, half, 0.0)];
    for k in 0..segments {
        let theta = k as f32 / segments as f32 * TAU;
        vertices.push(Vec3::new(radius * theta.sin(), -half, radius * theta.cos()));
    }

    let mut triangles = Vec::with_capacity(segments * 2);
    for k in 0..segments {
        let next = (k + 1) % segments;
        triangles.push([0, k + 1, next + 1]);
    }
    // Base cap as a fan
    for k in 1..segments - 1 {
        triangles.push([1, k + 1, k + 2]);
    }
    ShapeMesh { vertices, triangles }
}

fn octahedron(radius: f32) -> ShapeMesh {
    let vertices = vec![
        Vec3::new(radius, 0.0, 0.0),
        Vec3::new(-radius, 0.0, 0.0),
        Vec3::new(0.0, radius, 0.0),
        Vec3::new(0.0, -radius, 0.0),
        Vec3::new(0.0, 0.0, radius),
        Vec3::new(0.0, 0.0, -radius),
    ];
    #[rustfmt::skip]
    let triangles = vec![
        [2, 0, 4], [2, 4, 1], [2, 1, 5], [2, 5, 0],
        [3, 4, 0], [3, 1, 4], [3, 5, 1], [3, 0, 5],
    ];
    ShapeMesh { vertices, triangles }
}

fn tetrahedron(radius: f32) -> ShapeMesh {
    let vertices = [
        Vec3::new(1.0, 1.0, 1.0),
        Vec3::new(-1.0, -1.0, 1.0),
        Vec3::new(-1.0, 1.0, -1.0),
        Vec3::new(1.0, -1.0, -1.0),
    ]
    .iter()
    .map(|v| v.normalize() * radius)
    .collect();
    let triangles = vec![[2, 1, 0], [0, 3, 2], [1, 3, 0], [2, 3, 1]];
    ShapeMesh { vertices, triangles }
}
