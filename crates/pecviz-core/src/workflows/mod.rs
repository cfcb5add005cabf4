//! # Workflows Module
//!
//! High-level procedures that front ends call instead of wiring the engine themselves.
//!
//! - **Summary Workflow** ([`summary`]) - Loads the three datasets concurrently and
//!   reduces them to equilibrium, deviation and noise statistics.
//! - **Animation Workflow** ([`animate`]) - Samples a headless run of the H2 model at the
//!   current bond length and streams the frames to a scene renderer.
//!
//! Both report their phases through [`crate::engine::progress::ProgressReporter`].

pub mod animate;
pub mod summary;
