//! Camera and projection utilities

use nalgebra::{Matrix4, Point3, Vector3};

use crate::error::{RenderError, Result};

/// Pixel size of the drawing surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Surface {
    pub width: u32,
    pub height: u32,
}

impl Surface {
    /// Rejects a zero height, which would make the aspect ratio infinite.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if height == 0 {
            return Err(RenderError::InvalidSurface { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn aspect_ratio(&self) -> f32 {
        Camera::aspect_ratio(self.width, self.height)
    }
}

/// Fixed camera looking at the cube
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub eye: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            eye: Point3::new(3.0, 3.0, 3.0),
            target: Point3::origin(),
            up: Vector3::new(0.0, 1.0, 0.0),
            fov_y: 45f32.to_radians(),
            aspect: Self::aspect_ratio(width, height),
            near: 1.0,
            far: 100.0,
        }
    }

    pub fn for_surface(surface: Surface) -> Self {
        Self::new(surface.width, surface.height)
    }

    pub fn aspect_ratio(width: u32, height: u32) -> f32 {
        width as f32 / height as f32
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.eye, &self.target, &self.up)
    }

    /// OpenGL-style perspective projection
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        Matrix4::new_perspective(self.aspect, self.fov_y, self.near, self.far)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_creation() {
        let camera = Camera::new(800, 600);
        assert_eq!(camera.aspect, 800.0 / 600.0);
        assert_eq!(camera.eye, Point3::new(3.0, 3.0, 3.0));
        assert!((camera.fov_y - std::f32::consts::FRAC_PI_4).abs() < 1e-6);
    }

    #[test]
    fn test_same_ratio_gives_identical_projection() {
        let a = Camera::new(800, 600).projection_matrix();
        let b = Camera::new(1600, 1200).projection_matrix();
        assert_eq!(a, b);
        assert_ne!(a, Camera::new(600, 800).projection_matrix());
    }

    #[test]
    fn test_projection_maps_near_and_far_planes() {
        let projection = Camera::new(640, 480).projection_matrix();
        let near = projection.transform_point(&Point3::new(0.0, 0.0, -1.0));
        let far = projection.transform_point(&Point3::new(0.0, 0.0, -100.0));
        assert!((near.z + 1.0).abs() < 1e-5);
        assert!((far.z - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_view_matrix_moves_target_onto_negative_z() {
        let camera = Camera::default();
        let target = camera.view_matrix().transform_point(&camera.target);
        let distance = (3.0f32 * 9.0).sqrt();
        assert!(target.x.abs() < 1e-5);
        assert!(target.y.abs() < 1e-5);
        assert!((target.z + distance).abs() < 1e-5);
    }

    #[test]
    fn test_surface_rejects_zero_height() {
        assert_eq!(
            Surface::new(640, 0),
            Err(RenderError::InvalidSurface { width: 640, height: 0 })
        );
        assert_eq!(Surface::new(640, 480).unwrap().aspect_ratio(), 640.0 / 480.0);
    }
}
