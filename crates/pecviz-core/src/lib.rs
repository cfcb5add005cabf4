//! # PECViz Core Library
//!
//! The procedural animation and data-reduction engine behind an interactive view of
//! small-molecule potential energy curves: an animated H2 model driven by a bond-length
//! control, and charts plus statistics computed from precomputed VQE results.
//!
//! ## Architectural Philosophy
//!
//! - **[`core`]: The Foundation.** Typed tabular records, the delimited-text parser,
//!   minimum search, and the pure per-frame motion math (`orbit`, `bond`) and scene
//!   composition.
//!
//! - **[`engine`]: The Coordination Layer.** Owns the only mutable shared state: the three
//!   dataset slots and the bond-length control. Loads are asynchronous and never clear
//!   already-loaded data on failure; every change is published to observers.
//!
//! - **[`workflows`]: The Public API.** High-level procedures used by front ends, such as
//!   loading every dataset and summarizing it, or sampling an animation trajectory.
//!
//! Rendering and charting are external collaborators reached through the
//! [`engine::animation::SceneRenderer`] and [`engine::observers::ChartRenderer`] traits.

pub mod core;
pub mod engine;
pub mod workflows;
