use crate::core::data::summary::{CurveDeviation, Equilibrium, NoiseSummary, curve_deviation};
use crate::engine::observers::{Stat, StatCard, StatisticsPanel};
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::state::VisualizerState;
use crate::engine::store::{DatasetSource, LoadOutcome, Slot};
use tracing::{info, instrument};

/// Where each slot should be loaded from; `None` leaves the slot untouched.
#[derive(Debug, Clone)]
pub struct SlotSources<S> {
    pub h2_curve: Option<S>,
    pub lih_curve: Option<S>,
    pub noise_log: Option<S>,
}

impl<S> Default for SlotSources<S> {
    fn default() -> Self {
        Self {
            h2_curve: None,
            lih_curve: None,
            noise_log: None,
        }
    }
}

impl<S> SlotSources<S> {
    /// One source per slot, built from the slot itself.
    pub fn from_fn(mut f: impl FnMut(Slot) -> Option<S>) -> Self {
        Self {
            h2_curve: f(Slot::H2Curve),
            lih_curve: f(Slot::LihCurve),
            noise_log: f(Slot::NoiseLog),
        }
    }

    pub fn get(&self, slot: Slot) -> Option<&S> {
        match slot {
            Slot::H2Curve => self.h2_curve.as_ref(),
            Slot::LihCurve => self.lih_curve.as_ref(),
            Slot::NoiseLog => self.noise_log.as_ref(),
        }
    }
}

/// Result of loading the three slots concurrently.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    pub outcomes: Vec<(Slot, LoadOutcome)>,
}

impl LoadReport {
    pub fn committed(&self) -> usize {
        self.outcomes.iter().filter(|(_, o)| o.is_committed()).count()
    }

    pub fn outcome(&self, slot: Slot) -> Option<&LoadOutcome> {
        self.outcomes
            .iter()
            .find_map(|(s, o)| (*s == slot).then_some(o))
    }
}

/// Loads every configured slot of `state` concurrently.
///
/// Individual failures are reported as retained outcomes and never abort the others.
pub async fn load_all<S: DatasetSource>(
    state: &VisualizerState,
    sources: &SlotSources<S>,
    reporter: &ProgressReporter<'_>,
) -> LoadReport {
    let load = |slot: Slot| async move {
        let source = sources.get(slot)?;
        reporter.report(Progress::SlotLoading {
            slot,
            location: source.location(),
        });
        let outcome = state.store().load(slot, source).await;
        reporter.report(match &outcome {
            LoadOutcome::Committed { records } => Progress::SlotCommitted {
                slot,
                records: *records,
            },
            LoadOutcome::Retained { reason } => Progress::SlotRetained {
                slot,
                reason: reason.clone(),
            },
        });
        Some((slot, outcome))
    };

    let (h2, lih, noise) = tokio::join!(
        load(Slot::H2Curve),
        load(Slot::LihCurve),
        load(Slot::NoiseLog)
    );
    LoadReport {
        outcomes: [h2, lih, noise].into_iter().flatten().collect(),
    }
}

/// Statistics of one potential energy curve.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveSummary {
    pub slot: Slot,
    pub points: usize,
    pub equilibrium: Stat<Equilibrium>,
    pub deviation: Option<CurveDeviation>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryReport {
    pub loads: LoadReport,
    pub curves: Vec<CurveSummary>,
    pub noise: Stat<NoiseSummary>,
    pub cards: Vec<StatCard>,
}

/// Reduces whatever the store currently holds to summary statistics.
pub fn summarize(state: &VisualizerState, loads: LoadReport) -> SummaryReport {
    let mut panel = StatisticsPanel::new();
    for slot in Slot::ALL {
        panel.apply(slot, &state.store().get(slot));
    }

    let curves = [Slot::H2Curve, Slot::LihCurve]
        .into_iter()
        .map(|slot| {
            let data = state.store().get(slot);
            CurveSummary {
                slot,
                points: data.as_ref().map_or(0, |d| d.len()),
                equilibrium: panel
                    .equilibrium(slot)
                    .cloned()
                    .unwrap_or(Stat::NoData),
                deviation: data.as_deref().and_then(curve_deviation),
            }
        })
        .collect();

    SummaryReport {
        loads,
        curves,
        noise: panel.noise().clone(),
        cards: panel.cards(),
    }
}

/// Loads the configured datasets and summarizes the result.
#[instrument(skip_all, name = "summary_workflow")]
pub async fn run<S: DatasetSource>(
    state: &VisualizerState,
    sources: &SlotSources<S>,
    reporter: &ProgressReporter<'_>,
) -> SummaryReport {
    reporter.report(Progress::PhaseStart { name: "Loading" });
    let loads = load_all(state, sources, reporter).await;
    reporter.report(Progress::PhaseFinish);

    info!(
        "Loaded {} of {} requested dataset(s).",
        loads.committed(),
        loads.outcomes.len()
    );
    reporter.phase("Summarizing", || summarize(state, loads))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::store::{FileSource, InlineSource};
    use std::fs;
    use std::sync::Mutex;
    use tempfile::tempdir;

    const H2: &str = "bond_length_angstrom,vqe_energy_ha,exact_energy_ha,delta_ha\n\
                      0.6,-1.1160,-1.1162,0.0002\n\
                      0.735,-1.1372,-1.1373,0.0001\n\
                      0.9,-1.1203,-1.1209,0.0006\n";
    const LIH: &str = "bond_length_angstrom,vqe_energy_ha,exact_energy_ha\n\
                       1.4,-7.860,-7.862\n1.6,-7.880,-7.882\n";

    #[tokio::test]
    async fn run_loads_and_summarizes_available_slots() {
        let state = VisualizerState::default();
        let sources = SlotSources {
            h2_curve: Some(InlineSource::new("h2", H2)),
            lih_curve: Some(InlineSource::new("lih", LIH)),
            noise_log: None,
        };

        let report = run(&state, &sources, &ProgressReporter::new()).await;

        assert_eq!(report.loads.committed(), 2);
        assert_eq!(report.curves.len(), 2);
        let h2 = &report.curves[0];
        assert_eq!(h2.points, 3);
        assert_eq!(h2.equilibrium.ready().unwrap().bond_length, 0.735);
        let dev = h2.deviation.unwrap();
        assert!((dev.max_abs - 0.0006).abs() < 1e-12);

        let lih = &report.curves[1];
        assert_eq!(lih.equilibrium.ready().unwrap().bond_length, 1.6);
        assert!((lih.deviation.unwrap().mean_abs - 0.002).abs() < 1e-9);

        assert_eq!(report.noise, Stat::NoData);
    }

    #[tokio::test]
    async fn missing_files_leave_placeholders() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("results/csv")).unwrap();
        fs::write(dir.path().join(Slot::H2Curve.default_path()), H2).unwrap();

        let state = VisualizerState::default();
        let sources = SlotSources::from_fn(|slot| Some(FileSource::well_known(dir.path(), slot)));
        let report = run(&state, &sources, &ProgressReporter::new()).await;

        assert!(report.loads.outcome(Slot::H2Curve).unwrap().is_committed());
        assert!(!report.loads.outcome(Slot::LihCurve).unwrap().is_committed());
        assert_eq!(report.curves[1].equilibrium, Stat::NoData);
        assert_eq!(report.cards[1].value, "—");
    }

    #[tokio::test]
    async fn load_all_reports_progress_per_slot() {
        let events = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|e| {
            events.lock().unwrap().push(e);
        }));
        let state = VisualizerState::default();
        let sources = SlotSources {
            noise_log: Some(InlineSource::new("noise", "restart,delta_ha\n0,0.1\n")),
            ..Default::default()
        };

        load_all(&state, &sources, &reporter).await;
        drop(reporter);

        assert_eq!(
            events.into_inner().unwrap(),
            vec![
                Progress::SlotLoading {
                    slot: Slot::NoiseLog,
                    location: "noise".into()
                },
                Progress::SlotCommitted {
                    slot: Slot::NoiseLog,
                    records: 1
                },
            ]
        );
    }
}
