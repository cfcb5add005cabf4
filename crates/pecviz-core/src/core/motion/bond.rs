use crate::core::utils::geometry::{distance, midpoint, rotation_to_align};
use nalgebra::{Point3, UnitQuaternion, Vector3};

/// Lengths below this are treated as coincident endpoints.
const DEGENERATE_LENGTH: f64 = 1e-12;

/// The two nuclei a bond cylinder connects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BondEndpoints {
    pub a: Point3<f64>,
    pub b: Point3<f64>,
}

impl BondEndpoints {
    pub fn new(a: Point3<f64>, b: Point3<f64>) -> Self {
        Self { a, b }
    }

    /// Places two nuclei symmetrically on the X axis, `bond_length` apart.
    pub fn along_x(bond_length: f64) -> Self {
        let half = bond_length / 2.0;
        Self {
            a: Point3::new(-half, 0.0, 0.0),
            b: Point3::new(half, 0.0, 0.0),
        }
    }

    pub fn transform(&self) -> BondTransform {
        transform(&self.a, &self.b)
    }
}

/// Placement of a unit cylinder stretched between two endpoints.
///
/// Always derived from a [`BondEndpoints`] pair and never stored on its own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BondTransform {
    pub midpoint: Point3<f64>,
    pub length: f64,
    pub rotation: UnitQuaternion<f64>,
}

/// The cylinder axis before rotation.
pub fn reference_axis() -> Vector3<f64> {
    Vector3::y()
}

/// Computes the cylinder transform joining `a` and `b`.
///
/// Coincident endpoints give a zero-length cylinder with the identity rotation
/// instead of a NaN orientation.
pub fn transform(a: &Point3<f64>, b: &Point3<f64>) -> BondTransform {
    let mid = midpoint(a, b);
    let length = distance(a, b);
    if length <= DEGENERATE_LENGTH {
        return BondTransform {
            midpoint: mid,
            length: 0.0,
            rotation: UnitQuaternion::identity(),
        };
    }
    let direction = (b - a) / length;
    BondTransform {
        midpoint: mid,
        length,
        rotation: rotation_to_align(&reference_axis(), &direction),
    }
}
