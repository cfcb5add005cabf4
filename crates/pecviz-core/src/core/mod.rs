//! # Core Module
//!
//! Stateless data models and pure algorithms of PECViz.
//!
//! - **Tabular data** ([`data`]) - Parsing delimited text into typed records and reducing
//!   datasets to minima and summary statistics
//! - **Motion** ([`motion`]) - Electron orbit positions and bond cylinder transforms
//! - **Scene** ([`scene`]) - Renderer-facing scene descriptions built from frame snapshots
//! - **Charts** ([`chart`]) - Series descriptions handed to the charting front end
//! - **File I/O** ([`io`]) - Reading and writing datasets and chart series
//!
//! Nothing in this module performs asynchronous work or holds mutable shared state;
//! that lives in [`crate::engine`].

pub mod chart;
pub mod data;
pub mod io;
pub mod motion;
pub mod scene;
pub mod utils;
