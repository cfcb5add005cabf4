use crate::cli::AnimateArgs;
use crate::config::{CliOverrides, build_config};
use crate::data::DataManager;
use crate::error::{CliError, Result};
use crate::ui::{CliProgressHandler, UiEvent};
use pecviz::core::scene::composer::SceneComposer;
use pecviz::core::scene::description::MoleculeFrame;
use pecviz::engine::animation::{AnimationLoop, FrameClock, SceneRenderer};
use pecviz::engine::config::AnimationConfig;
use pecviz::engine::progress::{Progress, ProgressReporter};
use pecviz::engine::state::VisualizerState;
use pecviz::workflows;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::info;

/// Writes every rendered frame as one CSV row.
///
/// The header is written with the first frame, once the electron count is known.
pub struct CsvTrajectoryWriter<W: Write> {
    writer: csv::Writer<W>,
    header_written: bool,
    frames: u64,
}

impl<W: Write> CsvTrajectoryWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(writer),
            header_written: false,
            frames: 0,
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn finish(mut self) -> std::io::Result<W> {
        self.writer.flush()?;
        self.writer
            .into_inner()
            .map_err(|e| std::io::Error::other(e.to_string()))
    }

    fn header(electrons: usize) -> Vec<String> {
        let mut header: Vec<String> = [
            "frame",
            "clock",
            "bond_length",
            "nucleus_a_x",
            "nucleus_a_y",
            "nucleus_a_z",
            "nucleus_b_x",
            "nucleus_b_y",
            "nucleus_b_z",
            "bond_mid_x",
            "bond_mid_y",
            "bond_mid_z",
            "bond_qw",
            "bond_qx",
            "bond_qy",
            "bond_qz",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        for i in 1..=electrons {
            for axis in ["x", "y", "z"] {
                header.push(format!("electron_{}_{}", i, axis));
            }
        }
        header
    }
}

impl<W: Write> SceneRenderer for CsvTrajectoryWriter<W> {
    type Error = csv::Error;

    fn render(&mut self, frame: &MoleculeFrame) -> std::result::Result<(), Self::Error> {
        if !self.header_written {
            self.writer.write_record(Self::header(frame.electrons.len()))?;
            self.header_written = true;
        }

        let [a, b] = &frame.nuclei;
        let mid = &frame.bond.midpoint;
        let q = frame.bond.rotation.quaternion();
        let mut row = vec![
            self.frames.to_string(),
            frame.clock.to_string(),
            frame.bond_length.to_string(),
        ];
        row.extend(
            [a.x, a.y, a.z, b.x, b.y, b.z, mid.x, mid.y, mid.z, q.w, q.i, q.j, q.k]
                .iter()
                .map(|v| v.to_string()),
        );
        row.extend(
            frame
                .electrons
                .iter()
                .flat_map(|e| [e.x, e.y, e.z])
                .map(|v| v.to_string()),
        );
        self.writer.write_record(&row)?;
        self.frames += 1;
        Ok(())
    }
}

pub async fn run(args: AnimateArgs, ui_sender: mpsc::Sender<UiEvent>) -> Result<()> {
    let data_manager = DataManager::new()?;
    let default_config = data_manager.default_config_path().ok();
    let overrides = CliOverrides {
        bond_length: args.bond_length,
        fps: args.fps,
        frames: args.frames,
        start_clock: args.start_clock,
        ..Default::default()
    };
    let app = build_config(&args.settings, &overrides, default_config.as_deref())?;

    let state = VisualizerState::from_config(&app.core_config).shared();
    let composer = SceneComposer::h2();
    let file = File::create(&args.output)?;
    let mut renderer = CsvTrajectoryWriter::new(BufWriter::new(file));

    let progress_handler = CliProgressHandler::new(ui_sender);
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    let to_file_error = |e: csv::Error| CliError::FileParsing {
        path: args.output.clone(),
        source: e.into(),
    };

    if args.realtime {
        run_realtime(
            Arc::clone(&state),
            composer,
            &app.core_config.animation,
            &mut renderer,
            &reporter,
        )
        .await
        .map_err(to_file_error)?;
    } else {
        let report = tokio::task::block_in_place(|| {
            workflows::animate::run(
                &state,
                &composer,
                &app.core_config.animation,
                &mut renderer,
                &reporter,
            )
        })?;
        info!(
            "Animation workflow finished: {} frame(s) over {:.2} s.",
            report.frames, report.duration
        );
    }

    let frames = renderer.frames();
    renderer.finish()?;
    println!(
        "✓ {} frame(s) at bond length {:.3} Å written to: {}",
        frames,
        state.control().get(),
        args.output.display()
    );
    Ok(())
}

/// Paces the host frame loop on a wall-clock interval.
async fn run_realtime<R: SceneRenderer>(
    state: Arc<VisualizerState>,
    composer: SceneComposer,
    config: &AnimationConfig,
    renderer: &mut R,
    reporter: &ProgressReporter<'_>,
) -> std::result::Result<(), R::Error> {
    let clock = FrameClock::from_config(config);
    let total = config.frames as u64;
    let mut animation = AnimationLoop::new(state, composer, clock);
    renderer.prepare(animation.composer().stage())?;

    let mut interval = tokio::time::interval(Duration::from_secs_f64(clock.frame_interval()));
    reporter.report(Progress::FramesStart { total });
    for _ in 0..total {
        interval.tick().await;
        animation.step(renderer)?;
        reporter.report(Progress::FramesAdvanced { amount: 1 });
    }
    reporter.report(Progress::FramesFinish);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_frames(count: u64) -> String {
        let state = VisualizerState::default().shared();
        let mut animation =
            AnimationLoop::new(state, SceneComposer::h2(), FrameClock::new(10.0, 0.0));
        let mut writer = CsvTrajectoryWriter::new(Vec::new());
        animation.run(&mut writer, count).unwrap();
        assert_eq!(writer.frames(), count);
        String::from_utf8(writer.finish().unwrap()).unwrap()
    }

    #[test]
    fn trajectory_has_header_and_one_row_per_frame() {
        let text = render_frames(3);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("frame,clock,bond_length,nucleus_a_x"));
        assert!(lines[0].ends_with("electron_2_x,electron_2_y,electron_2_z"));
        assert_eq!(lines[0].split(',').count(), 16 + 6);
        let first: Vec<f64> = lines[1].split(',').map(|v| v.parse().unwrap()).collect();
        assert_eq!(&first[..3], &[0.0, 0.0, 0.735]);
        assert!((first[3] + 0.3675).abs() < 1e-12);
        assert!((first[6] - 0.3675).abs() < 1e-12);
        assert!(lines[3].starts_with("2,0.2,0.735"));
    }

    #[test]
    fn empty_run_writes_nothing() {
        assert_eq!(render_frames(0), "");
    }

    #[tokio::test(start_paused = true)]
    async fn realtime_loop_renders_all_frames() {
        let state = VisualizerState::default().shared();
        let config = AnimationConfig {
            fps: 50.0,
            frames: 5,
            start_clock: 0.0,
        };
        let mut writer = CsvTrajectoryWriter::new(Vec::new());

        run_realtime(
            state,
            SceneComposer::h2(),
            &config,
            &mut writer,
            &ProgressReporter::new(),
        )
        .await
        .unwrap();

        assert_eq!(writer.frames(), 5);
    }
}
