use crate::cli::SummaryArgs;
use crate::config::{CliOverrides, build_config};
use crate::data::DataManager;
use crate::error::Result;
use crate::ui::{CliProgressHandler, UiEvent};
use pecviz::core::data::summary::NoiseSummary;
use pecviz::engine::observers::Stat;
use pecviz::engine::progress::ProgressReporter;
use pecviz::engine::state::VisualizerState;
use pecviz::workflows::summary::{self, CurveSummary, SummaryReport};
use tokio::sync::mpsc;
use tracing::{info, warn};

pub async fn run(args: SummaryArgs, ui_sender: mpsc::Sender<UiEvent>) -> Result<()> {
    let data_manager = DataManager::new()?;
    let default_config = data_manager.default_config_path().ok();
    let app = build_config(
        &args.settings,
        &CliOverrides::from(&args.sources),
        default_config.as_deref(),
    )?;

    let state = VisualizerState::from_config(&app.core_config);
    let sources = data_manager.sources(&app.data);

    let progress_handler = CliProgressHandler::new(ui_sender);
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!("Invoking the summary workflow...");
    let report = summary::run(&state, &sources, &reporter).await;

    if report.loads.committed() == 0 {
        warn!("No dataset could be loaded; only placeholders are shown.");
    }
    print!("{}", render_report(&report));
    Ok(())
}

fn render_report(report: &SummaryReport) -> String {
    let mut out = String::new();
    out.push_str("\nStatistics\n");
    for card in &report.cards {
        out.push_str(&format!(
            "  {:<28} {:>14}   {}\n",
            card.label, card.value, card.hint
        ));
    }

    out.push_str("\nCurves\n");
    for curve in &report.curves {
        out.push_str(&render_curve(curve));
    }

    out.push_str("\nNoisy runs\n");
    out.push_str(&render_noise(&report.noise));
    out
}

fn render_curve(curve: &CurveSummary) -> String {
    let mut line = format!("  {:<10} {:>4} point(s)", curve.slot.label(), curve.points);
    match &curve.equilibrium {
        Stat::Ready(eq) => line.push_str(&format!(
            ", R_eq = {:.3} Å, E = {:.6} Ha",
            eq.bond_length, eq.energy
        )),
        Stat::NoData => line.push_str(", no data"),
        Stat::Unavailable(reason) => line.push_str(&format!(", unavailable: {}", reason)),
    }
    if let Some(dev) = curve.deviation {
        line.push_str(&format!(
            ", |VQE - exact| max {:.2e} / mean {:.2e} Ha",
            dev.max_abs, dev.mean_abs
        ));
    }
    line.push('\n');
    line
}

fn render_noise(noise: &Stat<NoiseSummary>) -> String {
    match noise {
        Stat::Ready(summary) => {
            let mut out = format!("  runs: {}\n", summary.runs);
            if let (Some(restart), Some(best)) = (&summary.best_restart, summary.best_delta) {
                out.push_str(&format!("  best: restart {} (Δ = {:.6} Ha)\n", restart, best));
            }
            if let (Some(mean), Some(std)) = (summary.mean_delta, summary.std_delta) {
                out.push_str(&format!("  Δ mean ± std: {:.6} ± {:.6} Ha\n", mean, std));
            }
            out
        }
        Stat::NoData => "  no data\n".to_string(),
        Stat::Unavailable(reason) => format!("  unavailable: {}\n", reason),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pecviz::engine::store::{InlineSource, Slot};
    use pecviz::workflows::summary::SlotSources;

    #[tokio::test]
    async fn report_renders_loaded_and_missing_datasets() {
        let state = VisualizerState::default();
        let sources = SlotSources {
            h2_curve: Some(InlineSource::new(
                "h2",
                "bond_length_angstrom,vqe_energy_ha,exact_energy_ha\n0.7,-1.13,-1.1305\n0.735,-1.137,-1.1373\n",
            )),
            noise_log: Some(InlineSource::new(
                "noise",
                "restart,delta_ha,shots,R_angstrom\n0,0.003,2048,0.735\n1,0.001,2048,0.735\n",
            )),
            ..Default::default()
        };
        let report = summary::run(&state, &sources, &ProgressReporter::new()).await;
        let text = render_report(&report);

        assert!(text.contains("R_eq = 0.735 Å, E = -1.137000 Ha"));
        assert!(text.contains("LiH PEC"));
        assert!(text.contains("no data"));
        assert!(text.contains("best: restart 1 (Δ = 0.001000 Ha)"));
        assert!(text.contains("Load LiH CSV"));
        assert_eq!(report.loads.outcome(Slot::LihCurve), None);
    }
}
