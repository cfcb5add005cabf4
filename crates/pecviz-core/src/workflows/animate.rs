use crate::core::scene::composer::{FrameSnapshot, SceneComposer};
use crate::core::scene::description::MoleculeFrame;
use crate::engine::animation::{FrameClock, SceneRenderer};
use crate::engine::config::AnimationConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::state::VisualizerState;
use std::ops::Range;
use tracing::{debug, info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Frames composed together before they are handed to the renderer.
///
/// Bounds the memory of a batch run regardless of its length.
pub const SAMPLE_CHUNK: u64 = 256;

/// Snapshots of the frames in `indices`, all at one bond length.
pub fn frame_snapshots(
    clock: &FrameClock,
    bond_length: f64,
    indices: Range<u64>,
) -> Vec<FrameSnapshot> {
    indices
        .map(|i| FrameSnapshot::new(clock.at(i), bond_length))
        .collect()
}

/// Composes every snapshot independently.
///
/// Each frame is a pure function of its snapshot, so with the `parallel` feature the
/// frames are composed across the rayon pool; output order always matches input order.
pub fn sample_trajectory(
    composer: &SceneComposer,
    snapshots: &[FrameSnapshot],
) -> Vec<MoleculeFrame> {
    let compose = |snapshot: &FrameSnapshot| {
        let mut frame = composer.empty_frame();
        composer.compose_into(snapshot, &mut frame);
        frame
    };

    #[cfg(not(feature = "parallel"))]
    let frames = snapshots.iter().map(compose).collect();

    #[cfg(feature = "parallel")]
    let frames = snapshots.par_iter().map(compose).collect();

    frames
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationReport {
    pub frames: u64,
    pub bond_length: f64,
    /// Clock value of the last rendered frame.
    pub duration: f64,
}

/// Samples a headless animation of the current bond length and feeds it to `renderer`.
///
/// The bond length is read once from `state`, so the whole batch shares one value.
/// Frames are sampled [`SAMPLE_CHUNK`] at a time and rendered before the next chunk
/// is composed; progress advances once per chunk.
#[instrument(skip_all, name = "animate_workflow")]
pub fn run<R>(
    state: &VisualizerState,
    composer: &SceneComposer,
    config: &AnimationConfig,
    renderer: &mut R,
    reporter: &ProgressReporter,
) -> Result<AnimationReport, EngineError>
where
    R: SceneRenderer,
    R::Error: std::fmt::Display,
{
    config.validate()?;
    let clock = FrameClock::from_config(config);
    let total = config.frames as u64;
    let bond_length = state.control().get();

    let render_error = |frame: u64, e: R::Error| EngineError::Render {
        frame,
        message: e.to_string(),
    };
    renderer
        .prepare(composer.stage())
        .map_err(|e| render_error(0, e))?;

    reporter.report(Progress::FramesStart { total });
    let mut start = 0;
    while start < total {
        let end = total.min(start + SAMPLE_CHUNK);
        let frames = sample_trajectory(composer, &frame_snapshots(&clock, bond_length, start..end));
        debug!(start, end, "Sampled frame chunk");
        for (index, frame) in (start..).zip(&frames) {
            renderer.render(frame).map_err(|e| render_error(index, e))?;
        }
        reporter.report(Progress::FramesAdvanced { amount: end - start });
        start = end;
    }
    reporter.report(Progress::FramesFinish);
    info!(
        "Rendered {} frame(s) at bond length {:.3} Å.",
        total, bond_length
    );

    Ok(AnimationReport {
        frames: total,
        bond_length,
        duration: if total == 0 { clock.at(0) } else { clock.at(total - 1) },
    })
}
