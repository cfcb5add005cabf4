use crate::core::motion::bond::BondTransform;
use nalgebra::Point3;
use std::fmt;
use std::sync::Arc;

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Builds a color from a `0xRRGGBB` literal.
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Physically based surface parameters handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: Rgb,
    pub emissive: Option<Rgb>,
    pub emissive_intensity: f64,
    pub metalness: f64,
    pub roughness: f64,
    /// `1.0` is fully opaque.
    pub opacity: f64,
}

impl Material {
    pub const fn opaque(color: Rgb, roughness: f64) -> Self {
        Self {
            color,
            emissive: None,
            emissive_intensity: 0.0,
            metalness: 0.0,
            roughness,
            opacity: 1.0,
        }
    }

    pub const fn with_emission(mut self, emissive: Rgb, intensity: f64) -> Self {
        self.emissive = Some(emissive);
        self.emissive_intensity = intensity;
        self
    }

    pub const fn with_metalness(mut self, metalness: f64) -> Self {
        self.metalness = metalness;
        self
    }

    pub const fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn is_transparent(&self) -> bool {
        self.opacity < 1.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    Ambient {
        intensity: f64,
    },
    Directional {
        position: Point3<f64>,
        intensity: f64,
        cast_shadow: bool,
        shadow_map_size: u32,
    },
    Point {
        position: Point3<f64>,
        intensity: f64,
    },
}

/// Perspective camera with orbit-style user controls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Point3<f64>,
    pub fov_degrees: f64,
    pub enable_pan: bool,
    pub min_distance: f64,
    pub max_distance: f64,
}

/// Soft contact shadows accumulated on a ground plane below the molecule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundShadow {
    pub height: f64,
    pub scale: f64,
    pub frames: u32,
    pub color: Rgb,
}

/// Afterimage drawn by the renderer behind each moving electron.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailStyle {
    pub width: f64,
    pub length: u32,
    pub decay: f64,
    pub color: Rgb,
}

/// Parts of the scene that do not depend on the frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Stage {
    pub camera: Camera,
    pub lights: Vec<Light>,
    pub ground: GroundShadow,
    pub environment: &'static str,
    pub nucleus_radius: f64,
    pub nucleus_material: Material,
    pub electron_radius: f64,
    pub electron_material: Material,
    pub electron_trail: TrailStyle,
    pub bond_radius: f64,
    pub bond_material: Material,
}

/// Frame-dependent state of the molecule.
#[derive(Debug, Clone, PartialEq)]
pub struct MoleculeFrame {
    pub clock: f64,
    pub bond_length: f64,
    pub nuclei: [Point3<f64>; 2],
    pub bond: BondTransform,
    pub electrons: Vec<Point3<f64>>,
}

/// Everything the renderer needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneDescription {
    pub stage: Arc<Stage>,
    pub molecule: MoleculeFrame,
}
