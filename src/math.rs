//! 3D rotation and projection helpers.
//!
//! Matrix operations for the orbit camera: point rotation, drag-based
//! arcball rotation, and axis-angle construction.

use nalgebra::{Matrix3, Vector3};

pub fn rotate_point_matrix(x: f64, y: f64, z: f64, rot: &Matrix3<f64>) -> (f64, f64, f64) {
    let v = rot * Vector3::new(x, y, z);
    (v.x, v.y, v.z)
}

/// Rotation about an arbitrary unit axis.
pub fn axis_angle_matrix(axis: Vector3<f64>, angle: f64) -> Matrix3<f64> {
    let c = angle.cos();
    let s = angle.sin();
    let t = 1.0 - c;
    let (x, y, z) = (axis.x, axis.y, axis.z);
    Matrix3::new(
        t * x * x + c,     t * x * y - s * z, t * x * z + s * y,
        t * x * y + s * z, t * y * y + c,     t * y * z - s * x,
        t * x * z - s * y, t * y * z + s * x, t * z * z + c,
    )
}

/// Camera tilt looking down at the scene plane from the given elevation.
pub fn tilt_matrix(elevation: f64) -> Matrix3<f64> {
    let (s, c) = (elevation.sin(), elevation.cos());
    Matrix3::new(
        1.0, 0.0, 0.0,
        0.0, c, -s,
        0.0, s, c,
    )
}

/// Maps two pointer positions (in scene units, relative to the view center)
/// to the arcball rotation between them: the axis and angle that carry the
/// first touch point to the second on a sphere of the given radius.
pub fn arcball_delta(
    prev: (f64, f64),
    cur: (f64, f64),
    radius: f64,
) -> Option<(Vector3<f64>, f64)> {
    let r_sq = radius * radius;
    let to_sphere = |px: f64, py: f64| -> Vector3<f64> {
        let d_sq = px * px + py * py;
        if d_sq <= r_sq {
            Vector3::new(px, py, (r_sq - d_sq).sqrt())
        } else {
            let s = radius / d_sq.sqrt();
            Vector3::new(px * s, py * s, 0.0)
        }
    };
    let a = to_sphere(prev.0, prev.1).normalize();
    let b = to_sphere(cur.0, cur.1).normalize();
    let cross = a.cross(&b);
    let cross_len = cross.norm();
    if cross_len <= 1e-12 {
        return None;
    }
    let axis = cross / cross_len;
    let angle = cross_len.atan2(a.dot(&b));
    Some((axis, angle))
}
