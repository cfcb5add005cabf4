//! Renderer-facing scene descriptions.
//!
//! [`composer::SceneComposer`] turns a [`composer::FrameSnapshot`] into a
//! [`description::SceneDescription`]: a static [`description::Stage`] shared across
//! frames plus the per-frame nucleus, bond and electron placements.

pub mod composer;
pub mod description;
