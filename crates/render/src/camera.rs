use glam::{Mat4, Vec2, Vec3};
use stardrift_common::Ray;

/// Perspective camera that always looks at a fixed target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    pub target: Vec3,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 300.0),
            target: Vec3::ZERO,
            fov_degrees: 75.0,
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl PerspectiveCamera {
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// World-space ray from the camera through a point in normalized device
    /// coordinates (`[-1, 1]`, Y up).
    ///
    /// A camera sitting on its target looks down -Z; one looking straight up
    /// or down uses +X as its right axis.
    pub fn ray_through_ndc(&self, ndc: Vec2) -> Ray {
        let forward = (self.target - self.position)
            .try_normalize()
            .unwrap_or(Vec3::NEG_Z);
        let right = forward.cross(Vec3::Y).try_normalize().unwrap_or(Vec3::X);
        let up = right.cross(forward);
        let half_height = (self.fov_degrees.to_radians() * 0.5).tan();
        let half_width = half_height * self.aspect;

        let direction = forward + right * (ndc.x * half_width) + up * (ndc.y * half_height);
        Ray::new(self.position, direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_camera() {
        let cam = PerspectiveCamera::default();
        assert_eq!(cam.position.z, 300.0);
        let vp = cam.view_projection();
        assert!(!vp.col(0).x.is_nan());
    }

    #[test]
    fn center_ray_points_at_target() {
        let cam = PerspectiveCamera {
            position: Vec3::new(0.0, 0.0, 25.0),
            ..PerspectiveCamera::default()
        };
        let ray = cam.ray_through_ndc(Vec2::ZERO);
        assert_eq!(ray.origin, cam.position);
        assert!((ray.direction - Vec3::NEG_Z).length() < 1e-4);
    }

    #[test]
    fn edge_ray_matches_field_of_view() {
        let cam = PerspectiveCamera {
            position: Vec3::new(0.0, 0.0, 25.0),
            aspect: 1.0,
            fov_degrees: 90.0,
            ..PerspectiveCamera::default()
        };
        // Top edge of a 90 degree frustum is 45 degrees up
        let ray = cam.ray_through_ndc(Vec2::new(0.0, 1.0));
        assert!((ray.direction.y - (-ray.direction.z)).abs() < 1e-3);
        assert!(ray.direction.x.abs() < 1e-4);
    }

    #[test]
    fn offset_camera_still_aims_at_origin() {
        let cam = PerspectiveCamera {
            position: Vec3::new(3.0, -2.0, 20.0),
            ..PerspectiveCamera::default()
        };
        let ray = cam.ray_through_ndc(Vec2::ZERO);
        let expected = (Vec3::ZERO - cam.position).normalize();
        assert!((ray.direction - expected).length() < 1e-4);
    }

    #[test]
    fn degenerate_poses_give_finite_rays() {
        let on_target = PerspectiveCamera {
            position: Vec3::ZERO,
            ..PerspectiveCamera::default()
        };
        let ray = on_target.ray_through_ndc(Vec2::new(0.5, 0.5));
        assert!(ray.direction.is_finite());
        assert!((ray.direction.length() - 1.0).abs() < 1e-4);

        let overhead = PerspectiveCamera {
            position: Vec3::new(0.0, 40.0, 0.0),
            ..PerspectiveCamera::default()
        };
        let center = overhead.ray_through_ndc(Vec2::ZERO);
        assert!((center.direction - Vec3::NEG_Y).length() < 1e-4);
        assert!(overhead.ray_through_ndc(Vec2::new(-1.0, 1.0)).direction.is_finite());
    }

    #[test]
    fn ray_reprojects_to_its_ndc() {
        let cam = PerspectiveCamera {
            position: Vec3::new(1.0, 2.0, 25.0),
            aspect: 1.5,
            ..PerspectiveCamera::default()
        };
        let ray = cam.ray_through_ndc(Vec2::new(0.4, -0.3));
        let p = cam.view_projection().project_point3(ray.at(10.0));
        assert!((p.x - 0.4).abs() < 1e-3, "x = {}", p.x);
        assert!((p.y + 0.3).abs() < 1e-3, "y = {}", p.y);
    }
}
