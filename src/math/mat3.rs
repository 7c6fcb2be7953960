//! 3x3 rotation / linear-system matrix using column-vector convention.
//!
//! # Convention
//! - Vectors are **column vectors** on the right: `Mat3 * Vec`
//! - Transforms chain **right-to-left**: `A * B * v` applies B first, then A
//! - Camera rotations are composed by left multiplication, so a new
//!   rotation `R` turns an orientation `O` into `R * O`
//!
//! An orientation maps world-space offsets into camera space. Its transpose
//! maps camera-space directions back into the world.

use std::ops::Mul;

use super::vec3::Vec3;

/// Below this magnitude a determinant is treated as zero.
const SINGULAR_EPSILON: f32 = 1e-12;

/// 3x3 matrix stored as `data[row][col]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat3 {
    data: [[f32; 3]; 3],
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mat3 {
    pub fn new(data: [[f32; 3]; 3]) -> Self {
        Mat3 { data }
    }

    pub fn identity() -> Self {
        Mat3::new([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]])
    }

    /// Builds a matrix whose columns are `c0`, `c1` and `c2`.
    pub fn from_columns(c0: Vec3, c1: Vec3, c2: Vec3) -> Self {
        Mat3::new([[c0.x, c1.x, c2.x], [c0.y, c1.y, c2.y], [c0.z, c1.z, c2.z]])
    }

    /// Creates a rotation matrix around the X axis (camera tilt).
    ///
    /// Positive angles tilt the view upward when left-multiplied onto an
    /// orientation.
    pub fn rotation_x(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Mat3::new([[1.0, 0.0, 0.0], [0.0, c, s], [0.0, -s, c]])
    }

    /// Creates a rotation matrix around the Y axis (camera pan).
    ///
    /// Positive angles turn the view to the left when left-multiplied onto an
    /// orientation.
    pub fn rotation_y(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Mat3::new([[c, 0.0, -s], [0.0, 1.0, 0.0], [s, 0.0, c]])
    }

    pub fn transpose(&self) -> Self {
        let m = &self.data;
        Mat3::new([
            [m[0][0], m[1][0], m[2][0]],
            [m[0][1], m[1][1], m[2][1]],
            [m[0][2], m[1][2], m[2][2]],
        ])
    }

    pub fn determinant(&self) -> f32 {
        let m = &self.data;
        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    /// Computes the inverse of the matrix, if it exists.
    /// Returns `None` if the matrix is singular (determinant is zero).
    pub fn inverse(&self) -> Option<Mat3> {
        let m = &self.data;
        let det = self.determinant();

        if det.abs() < SINGULAR_EPSILON || !det.is_finite() {
            return None;
        }

        let inv_det = 1.0 / det;

        // Adjugate (transposed cofactor matrix) scaled by 1/det
        Some(Mat3::new([
            [
                (m[1][1] * m[2][2] - m[1][2] * m[2][1]) * inv_det,
                (m[0][2] * m[2][1] - m[0][1] * m[2][2]) * inv_det,
                (m[0][1] * m[1][2] - m[0][2] * m[1][1]) * inv_det,
            ],
            [
                (m[1][2] * m[2][0] - m[1][0] * m[2][2]) * inv_det,
                (m[0][0] * m[2][2] - m[0][2] * m[2][0]) * inv_det,
                (m[0][2] * m[1][0] - m[0][0] * m[1][2]) * inv_det,
            ],
            [
                (m[1][0] * m[2][1] - m[1][1] * m[2][0]) * inv_det,
                (m[0][1] * m[2][0] - m[0][0] * m[2][1]) * inv_det,
                (m[0][0] * m[1][1] - m[0][1] * m[1][0]) * inv_det,
            ],
        ]))
    }

    /// Access element at [row][col].
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row][col]
    }
}

/// Matrix multiplication: Mat3 * Mat3.
impl Mul<Mat3> for Mat3 {
    type Output = Mat3;

    fn mul(self, rhs: Mat3) -> Self::Output {
        let mut result = [[0.0f32; 3]; 3];

        for (row, out) in result.iter_mut().enumerate() {
            for (col, value) in out.iter_mut().enumerate() {
                *value = self.data[row][0] * rhs.data[0][col]
                    + self.data[row][1] * rhs.data[1][col]
                    + self.data[row][2] * rhs.data[2][col];
            }
        }

        Mat3::new(result)
    }
}

/// Transform a vector: Mat3 * Vec3 (column vector).
impl Mul<Vec3> for Mat3 {
    type Output = Vec3;

    fn mul(self, v: Vec3) -> Self::Output {
        Vec3::new(
            self.data[0][0] * v.x + self.data[0][1] * v.y + self.data[0][2] * v.z,
            self.data[1][0] * v.x + self.data[1][1] * v.y + self.data[1][2] * v.z,
            self.data[2][0] * v.x + self.data[2][1] * v.y + self.data[2][2] * v.z,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn assert_mat_eq(a: Mat3, b: Mat3) {
        for row in 0..3 {
            for col in 0..3 {
                assert_relative_eq!(a.get(row, col), b.get(row, col), epsilon = 1e-5);
            }
        }
    }

    #[test]
    fn inverse_times_matrix_is_identity() {
        let m = Mat3::from_columns(
            Vec3::new(0.0, -5.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 2.0),
        );
        let inv = m.inverse().expect("matrix is invertible");
        assert_mat_eq(inv * m, Mat3::identity());
        assert_mat_eq(m * inv, Mat3::identity());
    }

    #[test]
    fn singular_matrix_has_no_inverse() {
        let m = Mat3::from_columns(Vec3::RIGHT, Vec3::RIGHT * 2.0, Vec3::UP);
        assert!(m.inverse().is_none());
    }

    #[test]
    fn rotation_transpose_is_inverse() {
        let r = Mat3::rotation_x(0.3) * Mat3::rotation_y(1.1);
        assert_mat_eq(r.transpose() * r, Mat3::identity());
    }

    #[test]
    fn from_columns_places_vectors_in_columns() {
        let m = Mat3::from_columns(Vec3::new(1.0, 2.0, 3.0), Vec3::ZERO, Vec3::ZERO);
        let v = m * Vec3::RIGHT;
        assert_eq!(v, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn rotation_y_quarter_turn_maps_forward_to_side() {
        let r = Mat3::rotation_y(std::f32::consts::FRAC_PI_2);
        let v = r * Vec3::new(-1.0, 0.0, 0.0);
        assert_relative_eq!(v.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(v.z, -1.0, epsilon = 1e-6);
    }
}
