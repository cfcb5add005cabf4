use super::config::AnimationConfig;
use super::state::VisualizerState;
use crate::core::scene::composer::{FrameSnapshot, SceneComposer};
use crate::core::scene::description::{MoleculeFrame, Stage};
use std::sync::Arc;
use tracing::trace;

/// The retained-mode 3D renderer that turns scene descriptions into pixels.
///
/// `prepare` is called once with the static parts of the scene; `render` then
/// receives one molecule frame per tick and applies it to its own objects.
pub trait SceneRenderer {
    type Error;

    fn prepare(&mut self, _stage: &Stage) -> Result<(), Self::Error> {
        Ok(())
    }

    fn render(&mut self, frame: &MoleculeFrame) -> Result<(), Self::Error>;
}

/// Maps frame indices onto animation clock values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameClock {
    fps: f64,
    start: f64,
}

impl FrameClock {
    pub fn new(fps: f64, start: f64) -> Self {
        Self { fps, start }
    }

    pub fn from_config(config: &AnimationConfig) -> Self {
        Self::new(config.fps, config.start_clock)
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }

    pub fn frame_interval(&self) -> f64 {
        1.0 / self.fps
    }

    /// Clock value, in seconds, of frame `index`.
    pub fn at(&self, index: u64) -> f64 {
        self.start + index as f64 / self.fps
    }
}

/// The host frame loop: snapshot, compose, render, once per tick.
///
/// The molecule frame is allocated once and recomposed in place every tick.
pub struct AnimationLoop {
    state: Arc<VisualizerState>,
    composer: SceneComposer,
    clock: FrameClock,
    frame: MoleculeFrame,
    next_index: u64,
}

impl AnimationLoop {
    pub fn new(state: Arc<VisualizerState>, composer: SceneComposer, clock: FrameClock) -> Self {
        let frame = composer.empty_frame();
        Self {
            state,
            composer,
            clock,
            frame,
            next_index: 0,
        }
    }

    pub fn composer(&self) -> &SceneComposer {
        &self.composer
    }

    pub fn frames_rendered(&self) -> u64 {
        self.next_index
    }

    /// Composes and renders the next frame, returning the snapshot it was built from.
    pub fn step<R: SceneRenderer>(&mut self, renderer: &mut R) -> Result<FrameSnapshot, R::Error> {
        let snapshot = self.state.snapshot(self.clock.at(self.next_index));
        self.composer.compose_into(&snapshot, &mut self.frame);
        trace!(
            frame = self.next_index,
            clock = snapshot.clock,
            bond_length = snapshot.bond_length,
            "Rendering frame"
        );
        renderer.render(&self.frame)?;
        self.next_index += 1;
        Ok(snapshot)
    }

    /// Prepares the renderer and runs `frames` ticks back to back.
    pub fn run<R: SceneRenderer>(&mut self, renderer: &mut R, frames: u64) -> Result<(), R::Error> {
        renderer.prepare(self.composer.stage())?;
        for _ in 0..frames {
            self.step(renderer)?;
        }
        Ok(())
    }
}
