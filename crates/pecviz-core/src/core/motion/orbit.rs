use nalgebra::Point3;
use std::f64::consts::TAU;

/// Radius added to both semi-axes before the wobble term.
pub const BASE_RADIUS: f64 = 0.0;
/// Amplitude of the slow radial breathing shared by every orbit.
pub const WOBBLE_AMPLITUDE: f64 = 0.08;
/// Frequency of the radial breathing, relative to the orbit angle.
pub const WOBBLE_FREQUENCY: f64 = 0.45;
/// Amplitude of the out-of-plane bob.
pub const VERTICAL_AMPLITUDE: f64 = 0.12;

/// Static description of one animated electron's path.
///
/// Built once when the scene is assembled and never mutated afterwards; every frame
/// feeds it to [`position`] together with the current clock value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitParameters {
    /// Point the ellipse is centered on.
    pub center: Point3<f64>,
    /// Semi-axis along X.
    pub semi_major: f64,
    /// Semi-axis along Z.
    pub semi_minor: f64,
    /// Radians of orbit angle per second of clock time.
    pub angular_speed: f64,
    /// Phase offset in radians.
    pub phase: f64,
}

impl OrbitParameters {
    pub fn new(
        center: Point3<f64>,
        semi_major: f64,
        semi_minor: f64,
        angular_speed: f64,
        phase: f64,
    ) -> Self {
        Self {
            center,
            semi_major,
            semi_minor,
            angular_speed,
            phase,
        }
    }

    /// Clock time needed for one full revolution, or `None` for a stationary orbit.
    pub fn period(&self) -> Option<f64> {
        (self.angular_speed != 0.0).then(|| TAU / self.angular_speed.abs())
    }
}

/// Orbit angle at a given clock value.
#[inline]
pub fn orbit_angle(params: &OrbitParameters, clock: f64) -> f64 {
    clock * params.angular_speed + params.phase
}

/// Radial offset applied to both semi-axes at orbit angle `t`.
#[inline]
pub fn wobble(params: &OrbitParameters, t: f64) -> f64 {
    BASE_RADIUS + WOBBLE_AMPLITUDE * (t * WOBBLE_FREQUENCY + params.phase).sin()
}

/// Position of the electron at `clock` seconds.
///
/// Pure in both arguments, so callers may seek to any clock value, forwards or
/// backwards. The path is a stylized precessing ellipse in the XZ plane with a
/// double-frequency bob along Y.
pub fn position(params: &OrbitParameters, clock: f64) -> Point3<f64> {
    let t = orbit_angle(params, clock);
    let w = wobble(params, t);
    let (sin_t, cos_t) = t.sin_cos();
    Point3::new(
        params.center.x + (params.semi_major + w) * cos_t,
        params.center.y + VERTICAL_AMPLITUDE * (2.0 * t + params.phase).sin(),
        params.center.z + (params.semi_minor + w) * sin_t,
    )
}

/// Orbit angle folded into `[0, 2π)`, the in-plane direction of the electron.
pub fn planar_angle(params: &OrbitParameters, clock: f64) -> f64 {
    orbit_angle(params, clock).rem_euclid(TAU)
}
