//! Model transform and the rotation accumulator that drives it

use nalgebra::{Matrix4, Vector3};

/// Milliseconds of elapsed time per radian of accumulated rotation.
pub const ROTATION_DIVISOR: f64 = 500.0;

/// How much of the accumulated rotation each axis receives.
pub const AXIS_RATES: [f32; 3] = [0.5, 0.3, 0.2];

/// Accumulated rotation and the timestamp it was last advanced at
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spin {
    pub rotation: f32,
    pub last_timestamp: f64,
}

impl Spin {
    pub fn new() -> Self {
        Self::seeded(0.0)
    }

    /// Starts measuring elapsed time from `timestamp` instead of zero.
    pub fn seeded(timestamp: f64) -> Self {
        Self {
            rotation: 0.0,
            last_timestamp: timestamp,
        }
    }

    /// Advances to `now` (milliseconds) and returns the new state with its
    /// model matrix.
    ///
    /// The elapsed time is used as-is: a negative or huge delta flows
    /// straight into the rotation.
    pub fn advance(self, now: f64) -> (Spin, Matrix4<f32>) {
        self.step(now, now - self.last_timestamp)
    }

    /// Like [`Spin::advance`], but clamps the elapsed time into
    /// `[0, max_elapsed]`.
    pub fn advance_clamped(self, now: f64, max_elapsed: f64) -> (Spin, Matrix4<f32>) {
        let elapsed = (now - self.last_timestamp).clamp(0.0, max_elapsed.max(0.0));
        self.step(now, elapsed)
    }

    fn step(self, now: f64, elapsed: f64) -> (Spin, Matrix4<f32>) {
        let rotation = self.rotation + (elapsed / ROTATION_DIVISOR) as f32;
        let next = Spin {
            rotation,
            last_timestamp: now,
        };
        (next, Transform::model_matrix(rotation))
    }
}

impl Default for Spin {
    fn default() -> Self {
        Self::new()
    }
}

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    pub fn rotation_x(angle: f32) -> Matrix4<f32> {
        Matrix4::new_rotation(Vector3::new(angle, 0.0, 0.0))
    }

    pub fn rotation_y(angle: f32) -> Matrix4<f32> {
        Matrix4::new_rotation(Vector3::new(0.0, angle, 0.0))
    }

    pub fn rotation_z(angle: f32) -> Matrix4<f32> {
        Matrix4::new_rotation(Vector3::new(0.0, 0.0, angle))
    }

    /// Model matrix for an accumulated rotation `r`:
    /// `Rx(0.5 r) * Ry(0.3 r) * Rz(0.2 r)`.
    ///
    /// The order is part of the observable motion; reordering changes the
    /// wobble.
    pub fn model_matrix(rotation: f32) -> Matrix4<f32> {
        let [x, y, z] = AXIS_RATES;
        Self::rotation_x(x * rotation)
            * Self::rotation_y(y * rotation)
            * Self::rotation_z(z * rotation)
    }
}

/// Flattens a matrix into 16 floats, column by column, for uniform upload.
pub fn to_float_array(matrix: &Matrix4<f32>) -> [f32; 16] {
    let mut out = [0.0; 16];
    for column in 0..4 {
        for row in 0..4 {
            out[column * 4 + row] = matrix[(row, column)];
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: &Matrix4<f32>, b: &Matrix4<f32>) {
        assert!((a - b).norm() < 1e-5, "{a} != {b}");
    }

    #[test]
    fn test_identity_rotation() {
        assert_eq!(Transform::model_matrix(0.0), Matrix4::identity());
    }

    #[test]
    fn test_rotation_order_is_x_then_y_then_z() {
        let r = 2.0;
        let expected = Transform::rotation_x(1.0)
            * Transform::rotation_y(0.6)
            * Transform::rotation_z(0.4);
        assert_close(&Transform::model_matrix(r), &expected);

        let reversed = Transform::rotation_z(0.4)
            * Transform::rotation_y(0.6)
            * Transform::rotation_x(1.0);
        assert!((Transform::model_matrix(r) - reversed).norm() > 1e-3);
    }

    #[test]
    fn test_rotation_x_matches_right_handed_convention() {
        let m = Transform::rotation_x(std::f32::consts::FRAC_PI_2);
        let y = m.transform_vector(&Vector3::new(0.0, 1.0, 0.0));
        assert!((y - Vector3::new(0.0, 0.0, 1.0)).norm() < 1e-6);
    }

    #[test]
    fn test_timestamps_accumulate_rotation() {
        let spin = Spin::new();
        let (spin, _) = spin.advance(0.0);
        assert_eq!(spin.rotation, 0.0);
        let (spin, _) = spin.advance(500.0);
        assert_eq!(spin.rotation, 1.0);
        let (spin, model) = spin.advance(1000.0);
        assert_eq!(spin.rotation, 2.0);
        assert_eq!(spin.last_timestamp, 1000.0);
        assert_close(&model, &Transform::model_matrix(2.0));
    }

    #[test]
    fn test_non_decreasing_timestamps_never_reduce_rotation() {
        let mut spin = Spin::new();
        let mut previous = spin.rotation;
        for t in [0.0, 16.6, 16.6, 33.3, 50.0, 1000.0, 1000.0, 1016.7] {
            spin = spin.advance(t).0;
            assert!(spin.rotation >= previous);
            previous = spin.rotation;
        }
    }

    #[test]
    fn test_negative_elapsed_is_not_corrected() {
        let (spin, _) = Spin::seeded(1000.0).advance(500.0);
        assert_eq!(spin.rotation, -1.0);
    }

    #[test]
    fn test_clamped_advance_bounds_the_delta() {
        let (spin, _) = Spin::seeded(0.0).advance_clamped(10_000.0, 100.0);
        assert!((spin.rotation - 0.2).abs() < 1e-6);
        let (spin, _) = spin.advance_clamped(9_000.0, 100.0);
        assert!((spin.rotation - 0.2).abs() < 1e-6);
        assert_eq!(spin.last_timestamp, 9_000.0);
    }

    #[test]
    fn test_float_array_is_column_major() {
        let m = Matrix4::new(
            1.0, 2.0, 3.0, 4.0,
            5.0, 6.0, 7.0, 8.0,
            9.0, 10.0, 11.0, 12.0,
            13.0, 14.0, 15.0, 16.0,
        );
        let flat = to_float_array(&m);
        assert_eq!(&flat[0..4], &[1.0, 5.0, 9.0, 13.0]);
        assert_eq!(&flat[12..16], &[4.0, 8.0, 12.0, 16.0]);
        assert_eq!(&flat[..], m.as_slice());
    }
}
