//! Perspective camera aimed at the board origin.

use glam::{Mat4, Vec2, Vec3};

use crate::geometry::Ray;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub fov_y_degrees: f32,
    /// Viewport width divided by height.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 7.0),
            target: Vec3::ZERO,
            fov_y_degrees: 45.0,
            aspect: 2.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl Camera {
    pub fn new(fov_y_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            fov_y_degrees,
            aspect,
            near,
            far,
            ..Self::default()
        }
    }

    pub fn look_at_origin(&mut self) {
        self.target = Vec3::ZERO;
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fov_y_degrees.to_radians(),
            self.aspect.max(f32::EPSILON),
            self.near,
            self.far,
        )
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Projects a world point to normalized device coordinates.
    ///
    /// Returns `None` for points behind the camera.
    pub fn project(&self, world: Vec3) -> Option<Vec2> {
        let clip = self.view_projection() * world.extend(1.0);
        if clip.w <= f32::EPSILON {
            return None;
        }
        Some(Vec2::new(clip.x, clip.y) / clip.w)
    }

    /// Ray from the eye through a point in normalized device coordinates.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inverse = self.view_projection().inverse();
        let far = inverse.project_point3(ndc.extend(1.0));
        Ray::new(self.eye, far - self.eye)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera_at(eye: Vec3) -> Camera {
        Camera {
            eye,
            ..Camera::default()
        }
    }

    #[test]
    fn centre_ray_points_at_the_target() {
        let camera = camera_at(Vec3::new(0.0, 3.0, 6.0));
        let ray = camera.ray_from_ndc(Vec2::ZERO);
        let expected = (Vec3::ZERO - camera.eye).normalize();
        assert!(ray.direction.abs_diff_eq(expected, 1e-4));
        assert_eq!(ray.origin, camera.eye);
    }

    #[test]
    fn project_and_unproject_agree() {
        let camera = camera_at(Vec3::new(2.0, 5.0, -4.0));
        let point = Vec3::new(1.0, 0.0, -1.0);
        let ndc = camera.project(point).unwrap();
        let ray = camera.ray_from_ndc(ndc);
        let along = ray.direction.dot(point - ray.origin);
        assert!(ray.at(along).abs_diff_eq(point, 1e-3));
    }

    #[test]
    fn points_behind_the_eye_do_not_project() {
        let camera = camera_at(Vec3::new(0.0, 0.0, 7.0));
        assert!(camera.project(Vec3::new(0.0, 0.0, 20.0)).is_none());
        assert_eq!(camera.project(Vec3::ZERO), Some(Vec2::ZERO));
    }
}
