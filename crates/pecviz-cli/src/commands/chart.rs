use crate::cli::ChartArgs;
use crate::config::{CliOverrides, build_config};
use crate::data::DataManager;
use crate::error::{CliError, Result};
use crate::ui::{CliProgressHandler, UiEvent};
use pecviz::core::chart::ChartSpec;
use pecviz::core::io::csv::{CsvFile, CsvFileError, write_chart_series};
use pecviz::core::io::traits::TabularFile;
use pecviz::engine::observers::{ChartPanel, ChartRenderer, SlotWatcher};
use pecviz::engine::progress::ProgressReporter;
use pecviz::engine::state::VisualizerState;
use pecviz::engine::store::{LoadOutcome, Slot};
use pecviz::workflows::summary::{LoadReport, load_all};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Exports each chart as `<slot>_series.csv` below a directory.
pub struct CsvChartWriter {
    dir: PathBuf,
    with_data: bool,
    written: Vec<PathBuf>,
}

impl CsvChartWriter {
    pub fn new(dir: impl Into<PathBuf>, with_data: bool) -> Self {
        Self {
            dir: dir.into(),
            with_data,
            written: Vec::new(),
        }
    }

    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn series_path(&self, slot: Slot) -> PathBuf {
        self.dir.join(format!("{}_series.csv", slot.name()))
    }

    fn data_path(&self, slot: Slot) -> PathBuf {
        self.dir.join(format!("{}_data.csv", slot.name()))
    }
}

impl ChartRenderer for CsvChartWriter {
    type Error = CsvFileError;

    fn render_chart(&mut self, slot: Slot, chart: &ChartSpec) -> std::result::Result<(), Self::Error> {
        let path = self.series_path(slot);
        debug!("Writing '{}' series to {:?}", chart.title, path);
        let mut writer = BufWriter::new(File::create(&path)?);
        write_chart_series(chart, &mut writer)?;
        writer.flush()?;
        self.written.push(path);

        if self.with_data {
            if let Some(data) = chart.data.as_deref() {
                let path = self.data_path(slot);
                CsvFile::write_to_path(data, &path)?;
                self.written.push(path);
            }
        }
        Ok(())
    }
}

pub async fn run(args: ChartArgs, ui_sender: mpsc::Sender<UiEvent>) -> Result<()> {
    let data_manager = DataManager::new()?;
    let default_config = data_manager.default_config_path().ok();
    let app = build_config(
        &args.settings,
        &CliOverrides::from(&args.sources),
        default_config.as_deref(),
    )?;

    fs::create_dir_all(&args.output_dir)?;

    let state = VisualizerState::from_config(&app.core_config);
    let mut watcher = SlotWatcher::new(state.store());
    let sources = data_manager.sources_for(&app.data, args.slot);

    let progress_handler = CliProgressHandler::new(ui_sender);
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!("Loading datasets for chart export...");
    let loads = load_all(&state, &sources, &reporter).await;
    warn_retained(&loads);

    let written = export(
        &mut watcher,
        CsvChartWriter::new(&args.output_dir, args.with_data),
    )?;
    for path in &written {
        println!("✓ {}", path.display());
    }
    Ok(())
}

fn warn_retained(loads: &LoadReport) {
    for (slot, outcome) in &loads.outcomes {
        if let LoadOutcome::Retained { reason } = outcome {
            warn!("Skipping the {} chart: {}", slot.label(), reason);
        }
    }
}

/// Renders every slot committed since `watcher` last looked.
fn export(watcher: &mut SlotWatcher, writer: CsvChartWriter) -> Result<Vec<PathBuf>> {
    let loaded: Vec<_> = watcher
        .changed()
        .into_iter()
        .filter(|(_, data)| data.is_some())
        .collect();

    let mut panel = ChartPanel::new(writer);
    let rendered = panel.apply_all(&loaded);
    let writer = panel.into_renderer();
    if rendered == 0 {
        return Err(CliError::Data(format!(
            "No chart was written to {}; no dataset could be loaded.",
            writer.dir.display()
        )));
    }
    Ok(writer.written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use once_cell::sync::Lazy;
    use pecviz::core::data::record::Dataset;
    use pecviz::core::data::tabular;
    use pecviz::engine::observers::chart_for;
    use pecviz::engine::store::InlineSource;
    use pecviz::workflows::summary::SlotSources;
    use std::sync::Arc;
    use tempfile::tempdir;

    const H2: &str = "bond_length_angstrom,vqe_energy_ha,exact_energy_ha\n\
                      0.6,-1.11,-1.116\n0.735,-1.137,-1.137\n";
    const NOISE: &str = "restart,delta_ha,shots,R_angstrom\n0,0.004,4096,0.735\n";

    static NOISE_DATA: Lazy<Arc<Dataset>> =
        Lazy::new(|| Arc::new(tabular::parse(NOISE).expect("noise fixture parses")));

    #[tokio::test]
    async fn loaded_slots_are_exported_and_missing_ones_skipped() {
        let dir = tempdir().unwrap();
        let state = VisualizerState::default();
        let mut watcher = SlotWatcher::new(state.store());
        let sources = SlotSources {
            h2_curve: Some(InlineSource::new("h2", H2)),
            lih_curve: Some(InlineSource::new("lih", "")),
            noise_log: Some(InlineSource::new("noise", NOISE)),
        };
        load_all(&state, &sources, &ProgressReporter::new()).await;

        let written = export(&mut watcher, CsvChartWriter::new(dir.path(), true)).unwrap();

        let names: Vec<String> = written
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            vec!["h2_series.csv", "h2_data.csv", "noise_series.csv", "noise_data.csv"]
        );

        let series = fs::read_to_string(dir.path().join("h2_series.csv")).unwrap();
        assert!(series.starts_with("bond_length_angstrom,vqe_energy_ha,exact_energy_ha"));
        assert_eq!(series.lines().count(), 3);
        assert!(!dir.path().join("lih_series.csv").exists());
    }

    #[tokio::test]
    async fn nothing_loaded_is_a_data_error() {
        let dir = tempdir().unwrap();
        let state = VisualizerState::default();
        let mut watcher = SlotWatcher::new(state.store());
        let sources = SlotSources {
            h2_curve: Some(InlineSource::new("h2", "")),
            ..Default::default()
        };
        load_all(&state, &sources, &ProgressReporter::new()).await;

        let result = export(&mut watcher, CsvChartWriter::new(dir.path(), false));
        assert!(matches!(result, Err(CliError::Data(_))));
    }

    #[test]
    fn series_only_without_data_flag() {
        let dir = tempdir().unwrap();
        let mut writer = CsvChartWriter::new(dir.path(), false);
        let chart = chart_for(Slot::NoiseLog, Some(Arc::clone(&NOISE_DATA)));

        writer.render_chart(Slot::NoiseLog, &chart).unwrap();

        assert_eq!(writer.written(), &[dir.path().join("noise_series.csv")]);
        let series = fs::read_to_string(&writer.written()[0]).unwrap();
        assert_eq!(series, "restart,delta_ha\n0,0.004\n");
    }

    #[test]
    fn full_dataset_is_written_with_data_flag() {
        let dir = tempdir().unwrap();
        let mut writer = CsvChartWriter::new(dir.path(), true);
        let chart = chart_for(Slot::NoiseLog, Some(Arc::clone(&NOISE_DATA)));

        writer.render_chart(Slot::NoiseLog, &chart).unwrap();

        let data = CsvFile::read_from_path(dir.path().join("noise_data.csv")).unwrap();
        assert_eq!(data, **NOISE_DATA);
    }
}
