//! Vector math for anatomical joint angles.

use crate::common::Point3;

/// Which axes participate in an angle computation. Dropping one axis
/// projects the vectors onto the remaining coordinate plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plane {
    /// Full 3D angle.
    Full,
    /// XY plane (coronal), Z dropped.
    Coronal,
    /// YZ plane (sagittal), X dropped.
    Sagittal,
    /// XZ plane (transverse), Y dropped.
    Transverse,
}

impl Plane {
    fn project(&self, v: [f32; 3]) -> [f32; 3] {
        match self {
            Plane::Full => v,
            Plane::Coronal => [v[0], v[1], 0.0],
            Plane::Sagittal => [0.0, v[1], v[2]],
            Plane::Transverse => [v[0], 0.0, v[2]],
        }
    }
}

/// Angle in radians between the vectors `b -> a` and `b -> c`, restricted
/// to the given plane.
///
/// Returns `None` when either vector has zero length (coincident points),
/// which callers treat as "angle unavailable this tick". The result carries
/// no direction information and is always in `[0, pi]`.
pub fn angle_between(a: &Point3, b: &Point3, c: &Point3, plane: Plane) -> Option<f32> {
    let ba = plane.project(a.delta(b));
    let bc = plane.project(c.delta(b));

    let norm_ba = magnitude(ba);
    let norm_bc = magnitude(bc);
    if norm_ba == 0.0 || norm_bc == 0.0 {
        return None;
    }

    let dot = ba[0] * bc[0] + ba[1] * bc[1] + ba[2] * bc[2];
    // Floating point can push the ratio just outside acos' domain.
    let cos = (dot / (norm_ba * norm_bc)).clamp(-1.0, 1.0);
    Some(cos.acos())
}

fn magnitude(v: [f32; 3]) -> f32 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}
