//! Well-known field names of the potential energy curve and noise-run tables.

pub const BOND_LENGTH: &str = "bond_length_angstrom";
pub const VQE_ENERGY: &str = "vqe_energy_ha";
pub const EXACT_ENERGY: &str = "exact_energy_ha";
pub const DELTA: &str = "delta_ha";

pub const RESTART: &str = "restart";
pub const SHOTS: &str = "shots";
pub const DISTANCE: &str = "R_angstrom";
