use super::store::{DatasetSnapshot, SeriesStore, Slot};
use crate::core::chart::{ChartSpec, noise_chart, pec_chart};
use crate::core::data::summary::{Equilibrium, NoiseSummary, equilibrium, noise_summary};
use crate::core::data::value::FieldValue;
use tokio::sync::watch;
use tracing::{debug, warn};

/// The charting widget: draws named series handed over as a [`ChartSpec`].
pub trait ChartRenderer {
    type Error: std::fmt::Display;

    fn render_chart(&mut self, slot: Slot, chart: &ChartSpec) -> Result<(), Self::Error>;
}

/// The chart shown for `slot`, fed directly from its current dataset.
pub fn chart_for(slot: Slot, data: DatasetSnapshot) -> ChartSpec {
    let source = slot.file_name();
    match slot {
        Slot::H2Curve => pec_chart("H₂ Potential Energy Curve", source, data),
        Slot::LihCurve => pec_chart("LiH Potential Energy Curve", source, data),
        Slot::NoiseLog => noise_chart("H₂ @ 0.735 Å: Noisy Δ vs Restart", source, data),
    }
}

/// Subscription to all three dataset slots of a store.
#[derive(Debug, Clone)]
pub struct SlotWatcher {
    h2_curve: watch::Receiver<DatasetSnapshot>,
    lih_curve: watch::Receiver<DatasetSnapshot>,
    noise_log: watch::Receiver<DatasetSnapshot>,
}

impl SlotWatcher {
    pub fn new(store: &SeriesStore) -> Self {
        Self {
            h2_curve: store.subscribe(Slot::H2Curve),
            lih_curve: store.subscribe(Slot::LihCurve),
            noise_log: store.subscribe(Slot::NoiseLog),
        }
    }

    fn receiver(&mut self, slot: Slot) -> &mut watch::Receiver<DatasetSnapshot> {
        match slot {
            Slot::H2Curve => &mut self.h2_curve,
            Slot::LihCurve => &mut self.lih_curve,
            Slot::NoiseLog => &mut self.noise_log,
        }
    }

    /// Every slot committed to since the last call, with its newest dataset.
    pub fn changed(&mut self) -> Vec<(Slot, DatasetSnapshot)> {
        Slot::ALL
            .into_iter()
            .filter_map(|slot| {
                let rx = self.receiver(slot);
                match rx.has_changed() {
                    Ok(true) => Some((slot, rx.borrow_and_update().clone())),
                    _ => None,
                }
            })
            .collect()
    }

    /// Current content of every slot, marking all of them as seen.
    pub fn current(&mut self) -> Vec<(Slot, DatasetSnapshot)> {
        Slot::ALL
            .into_iter()
            .map(|slot| (slot, self.receiver(slot).borrow_and_update().clone()))
            .collect()
    }

    /// Waits until any slot is committed to. Returns `None` once the store is gone.
    pub async fn wait(&mut self) -> Option<Slot> {
        tokio::select! {
            r = self.h2_curve.changed() => r.ok().map(|_| Slot::H2Curve),
            r = self.lih_curve.changed() => r.ok().map(|_| Slot::LihCurve),
            r = self.noise_log.changed() => r.ok().map(|_| Slot::NoiseLog),
        }
    }
}

/// A statistic that may be waiting for its dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum Stat<T> {
    NoData,
    Ready(T),
    /// The dataset is loaded but the statistic cannot be derived from it.
    Unavailable(String),
}

impl<T> Stat<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Stat::Ready(value) => Some(value),
            _ => None,
        }
    }
}

/// A labelled value as shown on a statistics card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatCard {
    pub label: &'static str,
    pub value: String,
    pub hint: String,
}

const PLACEHOLDER: &str = "—";

/// Equilibrium and noise statistics, recomputed whenever their dataset changes.
#[derive(Debug, Clone, PartialEq)]
pub struct StatisticsPanel {
    h2: Stat<Equilibrium>,
    lih: Stat<Equilibrium>,
    noise: Stat<NoiseSummary>,
}

impl Default for StatisticsPanel {
    fn default() -> Self {
        Self {
            h2: Stat::NoData,
            lih: Stat::NoData,
            noise: Stat::NoData,
        }
    }
}

impl StatisticsPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn equilibrium(&self, slot: Slot) -> Option<&Stat<Equilibrium>> {
        match slot {
            Slot::H2Curve => Some(&self.h2),
            Slot::LihCurve => Some(&self.lih),
            Slot::NoiseLog => None,
        }
    }

    pub fn noise(&self) -> &Stat<NoiseSummary> {
        &self.noise
    }

    /// Recomputes the statistics derived from `slot`.
    pub fn apply(&mut self, slot: Slot, data: &DatasetSnapshot) {
        debug!(%slot, "Recomputing statistics");
        match slot {
            Slot::H2Curve => self.h2 = equilibrium_stat(slot, data),
            Slot::LihCurve => self.lih = equilibrium_stat(slot, data),
            Slot::NoiseLog => {
                self.noise = match data {
                    None => Stat::NoData,
                    Some(dataset) => match noise_summary(dataset) {
                        Ok(summary) => Stat::Ready(summary),
                        Err(e) => unavailable(slot, e),
                    },
                }
            }
        }
    }

    pub fn apply_all(&mut self, changes: &[(Slot, DatasetSnapshot)]) {
        for (slot, data) in changes {
            self.apply(*slot, data);
        }
    }

    pub fn cards(&self) -> Vec<StatCard> {
        vec![
            equilibrium_card("H₂ Equilibrium (from PEC)", "Load H₂ CSV", &self.h2),
            equilibrium_card("LiH Equilibrium (from PEC)", "Load LiH CSV", &self.lih),
            noise_card(&self.noise),
        ]
    }
}

fn equilibrium_stat(slot: Slot, data: &DatasetSnapshot) -> Stat<Equilibrium> {
    match equilibrium(data.as_ref()) {
        Ok(Some(eq)) => Stat::Ready(eq),
        Ok(None) => Stat::NoData,
        Err(e) => unavailable(slot, e),
    }
}

fn unavailable<T>(slot: Slot, error: impl std::fmt::Display) -> Stat<T> {
    warn!(%slot, error = %error, "Statistic unavailable for loaded dataset");
    Stat::Unavailable(error.to_string())
}

fn equilibrium_card(label: &'static str, prompt: &str, stat: &Stat<Equilibrium>) -> StatCard {
    let (value, hint) = match stat {
        Stat::Ready(eq) => (
            format!("{:.3} Å", eq.bond_length),
            format!("{:.6} Ha", eq.energy),
        ),
        Stat::NoData => (PLACEHOLDER.to_string(), prompt.to_string()),
        Stat::Unavailable(reason) => (PLACEHOLDER.to_string(), reason.clone()),
    };
    StatCard { label, value, hint }
}

fn noise_card(stat: &Stat<NoiseSummary>) -> StatCard {
    let label = "Noisy Runs";
    let (value, hint) = match stat {
        Stat::Ready(summary) => {
            let value = match summary.best_delta {
                Some(best) => format!("{} runs, best Δ {:.6} Ha", summary.runs, best),
                None => format!("{} runs", summary.runs),
            };
            let hint = format!(
                "Shots: {} · R: {} Å",
                show_field(&summary.shots),
                show_field(&summary.distance)
            );
            (value, hint)
        }
        Stat::NoData => (PLACEHOLDER.to_string(), "Load noisy runs CSV".to_string()),
        Stat::Unavailable(reason) => (PLACEHOLDER.to_string(), reason.clone()),
    };
    StatCard { label, value, hint }
}

fn show_field(value: &Option<FieldValue>) -> String {
    value
        .as_ref()
        .map_or_else(|| PLACEHOLDER.to_string(), FieldValue::to_string)
}

/// Keeps the three charts in sync with the store.
pub struct ChartPanel<R> {
    renderer: R,
}

impl<R: ChartRenderer> ChartPanel<R> {
    pub fn new(renderer: R) -> Self {
        Self { renderer }
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Re-renders the chart of every changed slot.
    ///
    /// A failing chart is logged and skipped so the remaining charts still update.
    pub fn apply_all(&mut self, changes: &[(Slot, DatasetSnapshot)]) -> usize {
        let mut rendered = 0;
        for (slot, data) in changes {
            let chart = chart_for(*slot, data.clone());
            match self.renderer.render_chart(*slot, &chart) {
                Ok(()) => rendered += 1,
                Err(e) => warn!(slot = %slot, error = %e, "Chart render failed"),
            }
        }
        rendered
    }
}
