use super::Degeneracy;
use crate::core::models::measurement::MeasurementKind;
use crate::core::utils::geometry::{
    clamped_acos_degrees, cross, dot, magnitude, subtract, try_normalize,
};
use nalgebra::Point3;

/// Computes the value of a measurement, falling back to `0.0` when it is undefined.
///
/// Distances are in the units of the input coordinates (Angstroms); angles and
/// torsions are in degrees. See [`evaluate`] for the cases that produce the
/// sentinel.
pub fn compute(points: &[Point3<f64>], kind: MeasurementKind) -> f64 {
    evaluate(points, kind).unwrap_or(0.0)
}

/// Computes the value of a measurement, reporting why it is undefined if it is.
///
/// # Errors
///
/// * [`Degeneracy::AtomCountMismatch`] if `points` does not hold exactly the number
///   of atoms `kind` requires.
/// * [`Degeneracy::NonFiniteCoordinates`] if any coordinate is infinite or NaN.
/// * [`Degeneracy::CoincidentAtoms`] if an angle arm has zero length.
/// * [`Degeneracy::CollinearChain`] if a torsion chain has no defined plane.
pub fn evaluate(points: &[Point3<f64>], kind: MeasurementKind) -> Result<f64, Degeneracy> {
    let expected = kind.required_atoms();
    if points.len() != expected {
        return Err(Degeneracy::AtomCountMismatch {
            kind,
            expected,
            found: points.len(),
        });
    }
    if points.iter().any(|p| p.coords.iter().any(|c| !c.is_finite())) {
        return Err(Degeneracy::NonFiniteCoordinates);
    }

    match kind {
        MeasurementKind::Distance => Ok(distance(&points[0], &points[1])),
        MeasurementKind::Angle => angle(&points[0], &points[1], &points[2]),
        MeasurementKind::Torsion => torsion(&points[0], &points[1], &points[2], &points[3]),
    }
}

#[inline]
pub fn distance(a: &Point3<f64>, b: &Point3<f64>) -> f64 {
    magnitude(&subtract(a, b))
}

/// Angle `a`–`vertex`–`c` in degrees, in `[0, 180]`.
pub fn angle(a: &Point3<f64>, vertex: &Point3<f64>, c: &Point3<f64>) -> Result<f64, Degeneracy> {
    let arm1 = try_normalize(&subtract(a, vertex)).ok_or(Degeneracy::CoincidentAtoms)?;
    let arm2 = try_normalize(&subtract(c, vertex)).ok_or(Degeneracy::CoincidentAtoms)?;
    Ok(clamped_acos_degrees(dot(&arm1, &arm2)))
}

/// Signed dihedral angle of the chain `p0`–`p1`–`p2`–`p3` in degrees, in `(-180, 180]`.
///
/// The magnitude is the angle between the normals of the planes `(p0, p1, p2)` and
/// `(p1, p2, p3)`; the sign is negative when the far plane is rotated clockwise
/// looking down the `p1 → p2` bond.
pub fn torsion(
    p0: &Point3<f64>,
    p1: &Point3<f64>,
    p2: &Point3<f64>,
    p3: &Point3<f64>,
) -> Result<f64, Degeneracy> {
    let b1 = subtract(p1, p0);
    let b2 = subtract(p2, p1);
    let b3 = subtract(p3, p2);

    let n1 = try_normalize(&cross(&b1, &b2)).ok_or(Degeneracy::CollinearChain)?;
    let n2 = try_normalize(&cross(&b2, &b3)).ok_or(Degeneracy::CollinearChain)?;

    let mut degrees = clamped_acos_degrees(dot(&n1, &n2));

    let m1 = cross(&n1, &b2);
    if dot(&m1, &n2) < 0.0 {
        degrees = -degrees;
    }

    // -180 and 180 are the same conformation; report the upper bound.
    if degrees <= -180.0 {
        degrees = 180.0;
    }
    Ok(degrees)
}
