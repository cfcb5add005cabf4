use nalgebra::{Point3, Unit, UnitQuaternion, Vector3};

pub fn midpoint(a: &Point3<f64>, b: &Point3<f64>) -> Point3<f64> {
    nalgebra::center(a, b)
}

pub fn distance(a: &Point3<f64>, b: &Point3<f64>) -> f64 {
    nalgebra::distance(a, b)
}

/// Smallest rotation taking `from` onto `to`.
///
/// Anti-parallel inputs have no unique minimal axis; they resolve to a half turn
/// about [`orthogonal_axis`] of `from`, which is +X for the +Y cylinder axis.
/// Zero-length inputs yield the identity.
pub fn rotation_to_align(from: &Vector3<f64>, to: &Vector3<f64>) -> UnitQuaternion<f64> {
    UnitQuaternion::rotation_between(from, to).unwrap_or_else(|| {
        UnitQuaternion::from_axis_angle(&orthogonal_axis(from), std::f64::consts::PI)
    })
}

/// A unit axis perpendicular to `v`; `+Y` maps to `+X`.
pub fn orthogonal_axis(v: &Vector3<f64>) -> Unit<Vector3<f64>> {
    let helper = if v.z.abs() < 0.9 {
        Vector3::z()
    } else {
        Vector3::x()
    };
    Unit::try_new(v.cross(&helper), f64::EPSILON).unwrap_or(Vector3::x_axis())
}
