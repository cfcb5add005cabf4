use super::description::{
    Camera, GroundShadow, Light, Material, MoleculeFrame, Rgb, SceneDescription, Stage,
    TrailStyle,
};
use crate::core::motion::bond::BondEndpoints;
use crate::core::motion::orbit::{OrbitParameters, position};
use nalgebra::Point3;
use std::f64::consts::FRAC_PI_2;
use std::sync::Arc;

/// Inputs of one frame, read once at its start.
///
/// Both the bond geometry and the electron positions of a frame are derived from
/// the same snapshot, so the bond length can never change halfway through a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSnapshot {
    /// Elapsed animation clock in seconds.
    pub clock: f64,
    /// Internuclear distance in Angstroms.
    pub bond_length: f64,
}

impl FrameSnapshot {
    pub fn new(clock: f64, bond_length: f64) -> Self {
        Self { clock, bond_length }
    }
}

/// Lighting, camera and materials of the H2 model.
pub fn h2_stage() -> Stage {
    let electron_blue = Rgb::from_hex(0x7dd3fc);
    Stage {
        camera: Camera {
            position: Point3::new(0.0, 0.65, 2.1),
            fov_degrees: 45.0,
            enable_pan: false,
            min_distance: 1.2,
            max_distance: 4.0,
        },
        lights: vec![
            Light::Ambient { intensity: 0.35 },
            Light::Directional {
                position: Point3::new(3.0, 3.0, 2.0),
                intensity: 1.2,
                cast_shadow: true,
                shadow_map_size: 1024,
            },
            Light::Point {
                position: Point3::new(-2.0, 1.5, -1.5),
                intensity: 0.6,
            },
        ],
        ground: GroundShadow {
            height: -0.35,
            scale: 4.0,
            frames: 60,
            color: Rgb::from_hex(0x0a0a0a),
        },
        environment: "city",
        nucleus_radius: 0.18,
        nucleus_material: Material::opaque(Rgb::from_hex(0xef4444), 0.4)
            .with_emission(Rgb::from_hex(0x7f1d1d), 1.2),
        electron_radius: 0.055,
        electron_material: Material::opaque(electron_blue, 0.2)
            .with_emission(Rgb::from_hex(0x1d4ed8), 1.3)
            .with_metalness(0.4),
        electron_trail: TrailStyle {
            width: 0.02,
            length: 8,
            decay: 0.9,
            color: electron_blue,
        },
        bond_radius: 0.04,
        bond_material: Material::opaque(Rgb::from_hex(0xeab308), 0.7).with_opacity(0.22),
    }
}

/// The two bonding electrons of the H2 model, orbiting `center`.
pub fn h2_electrons(center: Point3<f64>) -> Vec<OrbitParameters> {
    vec![
        OrbitParameters::new(center, 0.42, 0.28, 1.25, 0.0),
        OrbitParameters::new(center, 0.52, 0.35, 0.95, FRAC_PI_2),
    ]
}

/// Assembles per-frame scene descriptions from a fixed stage and a set of orbits.
#[derive(Debug, Clone)]
pub struct SceneComposer {
    stage: Arc<Stage>,
    electrons: Vec<OrbitParameters>,
}

impl SceneComposer {
    pub fn new(stage: Stage, electrons: Vec<OrbitParameters>) -> Self {
        Self {
            stage: Arc::new(stage),
            electrons,
        }
    }

    /// The hydrogen molecule: two nuclei on the X axis and two electrons around
    /// their midpoint.
    pub fn h2() -> Self {
        Self::new(h2_stage(), h2_electrons(Point3::origin()))
    }

    pub fn stage(&self) -> &Arc<Stage> {
        &self.stage
    }

    pub fn electrons(&self) -> &[OrbitParameters] {
        &self.electrons
    }

    pub fn compose(&self, snapshot: &FrameSnapshot) -> SceneDescription {
        let mut molecule = self.empty_frame();
        self.compose_into(snapshot, &mut molecule);
        SceneDescription {
            stage: Arc::clone(&self.stage),
            molecule,
        }
    }

    /// Recomputes `frame` in place, reusing its electron buffer.
    pub fn compose_into(&self, snapshot: &FrameSnapshot, frame: &mut MoleculeFrame) {
        let ends = BondEndpoints::along_x(snapshot.bond_length);
        frame.clock = snapshot.clock;
        frame.bond_length = snapshot.bond_length;
        frame.nuclei = [ends.a, ends.b];
        frame.bond = ends.transform();
        frame.electrons.clear();
        frame
            .electrons
            .extend(self.electrons.iter().map(|p| position(p, snapshot.clock)));
    }

    pub fn empty_frame(&self) -> MoleculeFrame {
        let ends = BondEndpoints::along_x(0.0);
        MoleculeFrame {
            clock: 0.0,
            bond_length: 0.0,
            nuclei: [ends.a, ends.b],
            bond: ends.transform(),
            electrons: Vec::with_capacity(self.electrons.len()),
        }
    }
}

impl Default for SceneComposer {
    fn default() -> Self {
        Self::h2()
    }
}
