//! Per-frame motion math: electron orbits and bond cylinder placement.
//!
//! Everything here is a pure function of its inputs. The renderer owns the retained
//! scene objects and applies the returned values to them.

pub mod bond;
pub mod orbit;
