//! # Engine Module
//!
//! Stateful coordination of a visualizer session: who owns the datasets and the
//! bond-length control, how they change, and who gets told.
//!
//! ## Overview
//!
//! A session has exactly one [`state::VisualizerState`]. It owns the three dataset
//! slots ([`store::SeriesStore`]) and the bond-length control
//! ([`control::BondLengthControl`]); nothing else in the crate holds mutable shared state.
//! Two independent consumers read from it:
//!
//! - the frame loop ([`animation::AnimationLoop`]), which reads the bond length once per
//!   frame into a snapshot, composes the molecule and hands it to a
//!   [`animation::SceneRenderer`];
//! - the observers ([`observers`]), which wake on dataset commits and recompute
//!   statistics or re-render charts through a [`observers::ChartRenderer`].
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Control range, step and frame timing
//! - **Dataset slots** ([`store`]) - Asynchronous loads with a keep-previous-data failure policy
//! - **Control** ([`control`]) - The clamped, stepped bond-length value
//! - **State** ([`state`]) - The session coordinator and per-frame snapshots
//! - **Animation** ([`animation`]) - Frame clock and host loop
//! - **Observers** ([`observers`]) - Statistics and chart panels driven by slot changes
//! - **Progress Monitoring** ([`progress`]) - Events streamed to front ends
//! - **Error Handling** ([`error`]) - Engine-specific error types

pub mod animation;
pub mod config;
pub mod control;
pub mod error;
pub mod observers;
pub mod progress;
pub mod state;
pub mod store;
