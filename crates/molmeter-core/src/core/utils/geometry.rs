use nalgebra::{Point3, Vector3};

/// Returns the vector pointing from `b` to `a`.
#[inline]
pub fn subtract(a: &Point3<f64>, b: &Point3<f64>) -> Vector3<f64> {
    a - b
}

#[inline]
pub fn dot(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    a.dot(b)
}

#[inline]
pub fn cross(a: &Vector3<f64>, b: &Vector3<f64>) -> Vector3<f64> {
    a.cross(b)
}

/// Euclidean length of `v`.
///
/// Components are scaled by the largest absolute component before squaring, so
/// tiny non-zero vectors do not underflow to a length of zero.
#[inline]
pub fn magnitude(v: &Vector3<f64>) -> f64 {
    let scale = v.amax();
    if scale == 0.0 || !scale.is_finite() {
        return v.norm();
    }
    (v / scale).norm() * scale
}

/// Scales `v` to unit length.
///
/// A zero-length vector has no direction, so the zero vector is returned
/// instead of dividing by zero. Use [`try_normalize`] when the caller needs
/// to tell the two cases apart.
#[inline]
pub fn normalize(v: &Vector3<f64>) -> Vector3<f64> {
    try_normalize(v).unwrap_or_else(Vector3::zeros)
}

/// Scales `v` to unit length, or returns `None` if its magnitude is exactly zero.
#[inline]
pub fn try_normalize(v: &Vector3<f64>) -> Option<Vector3<f64>> {
    let scale = v.amax();
    if scale == 0.0 {
        return None;
    }
    let scaled = v / scale;
    Some(&scaled / scaled.norm())
}

/// Inverse cosine in degrees with the argument clamped to `[-1, 1]`.
///
/// Dot products of unit vectors can overshoot the domain of `acos` by a few
/// ulps; clamping keeps the result finite.
#[inline]
pub fn clamped_acos_degrees(cosine: f64) -> f64 {
    cosine.clamp(-1.0, 1.0).acos().to_degrees()
}
