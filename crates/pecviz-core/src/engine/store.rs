use super::error::LoadError;
use crate::core::data::record::Dataset;
use crate::core::data::tabular;
use std::fmt;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// The three fixed dataset slots of the visualizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Slot {
    /// Potential energy curve of H2.
    H2Curve,
    /// Potential energy curve of LiH.
    LihCurve,
    /// Log of repeated noisy VQE runs at a fixed bond length.
    NoiseLog,
}

impl Slot {
    pub const ALL: [Slot; 3] = [Slot::H2Curve, Slot::LihCurve, Slot::NoiseLog];

    /// Short identifier used on the command line and in config files.
    pub fn name(self) -> &'static str {
        match self {
            Slot::H2Curve => "h2",
            Slot::LihCurve => "lih",
            Slot::NoiseLog => "noise",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Slot::H2Curve => "H₂ PEC",
            Slot::LihCurve => "LiH PEC",
            Slot::NoiseLog => "Noisy Runs",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            Slot::H2Curve => "pec_h2_sto3g.csv",
            Slot::LihCurve => "pec_lih_sto3g.csv",
            Slot::NoiseLog => "h2_noisy_runs.csv",
        }
    }

    /// Well-known location relative to a data root, used for auto-loading.
    pub fn default_path(self) -> String {
        format!("results/csv/{}", self.file_name())
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Slot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "h2" => Ok(Slot::H2Curve),
            "lih" => Ok(Slot::LihCurve),
            "noise" | "noisy" => Ok(Slot::NoiseLog),
            other => Err(format!(
                "Unknown dataset slot '{}'. Expected 'h2', 'lih' or 'noise'.",
                other
            )),
        }
    }
}

/// Something that can produce the raw text of a dataset, possibly asynchronously.
pub trait DatasetSource {
    /// Human-readable location used in logs and error messages.
    fn location(&self) -> String;

    fn read_text(&self) -> impl Future<Output = Result<String, LoadError>> + Send;
}

/// A dataset file on the local filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The well-known file of `slot` below `root`.
    pub fn well_known(root: &Path, slot: Slot) -> Self {
        Self::new(root.join(slot.default_path()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DatasetSource for FileSource {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn read_text(&self) -> impl Future<Output = Result<String, LoadError>> + Send {
        let path = self.path.clone();
        async move {
            tokio::fs::read_to_string(&path)
                .await
                .map_err(|source| LoadError::Io {
                    location: path.display().to_string(),
                    source,
                })
        }
    }
}

/// Text that is already in memory, such as the content of a user-supplied file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineSource {
    name: String,
    text: String,
}

impl InlineSource {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

impl DatasetSource for InlineSource {
    fn location(&self) -> String {
        self.name.clone()
    }

    fn read_text(&self) -> impl Future<Output = Result<String, LoadError>> + Send {
        let text = self.text.clone();
        async move { Ok(text) }
    }
}

/// What a load did to its slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The slot now holds the new dataset.
    Committed { records: usize },
    /// The load failed; the slot keeps whatever it held before.
    Retained { reason: String },
}

impl LoadOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, LoadOutcome::Committed { .. })
    }
}

/// Current content of a slot; `None` until the first successful load.
pub type DatasetSnapshot = Option<Arc<Dataset>>;

/// Owner of the three dataset slots.
///
/// Each slot is a `watch` channel: readers take cheap `Arc` snapshots or subscribe
/// to be woken on every commit. Only the store writes. Loads of different slots are
/// independent; for one slot the last load to commit wins, with no ordering token,
/// so two racing loads may commit out of submission order.
#[derive(Debug)]
pub struct SeriesStore {
    h2_curve: watch::Sender<DatasetSnapshot>,
    lih_curve: watch::Sender<DatasetSnapshot>,
    noise_log: watch::Sender<DatasetSnapshot>,
}

impl Default for SeriesStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SeriesStore {
    pub fn new() -> Self {
        Self {
            h2_curve: watch::Sender::new(None),
            lih_curve: watch::Sender::new(None),
            noise_log: watch::Sender::new(None),
        }
    }

    fn slot(&self, slot: Slot) -> &watch::Sender<DatasetSnapshot> {
        match slot {
            Slot::H2Curve => &self.h2_curve,
            Slot::LihCurve => &self.lih_curve,
            Slot::NoiseLog => &self.noise_log,
        }
    }

    pub fn get(&self, slot: Slot) -> DatasetSnapshot {
        self.slot(slot).borrow().clone()
    }

    pub fn is_loaded(&self, slot: Slot) -> bool {
        self.slot(slot).borrow().is_some()
    }

    /// Returns a receiver that is notified on every commit to `slot`.
    pub fn subscribe(&self, slot: Slot) -> watch::Receiver<DatasetSnapshot> {
        self.slot(slot).subscribe()
    }

    /// Replaces the dataset of `slot` and notifies subscribers.
    pub fn set(&self, slot: Slot, dataset: Dataset) -> Arc<Dataset> {
        let dataset = Arc::new(dataset);
        info!(%slot, records = dataset.len(), "Committed dataset");
        self.slot(slot).send_replace(Some(Arc::clone(&dataset)));
        dataset
    }

    /// Parses in-memory text into `slot`.
    ///
    /// A parse failure keeps the previous dataset and is reported as
    /// [`LoadOutcome::Retained`].
    pub fn load_text(&self, slot: Slot, location: &str, text: &str) -> LoadOutcome {
        match tabular::parse(text) {
            Ok(dataset) => {
                let records = dataset.len();
                self.set(slot, dataset);
                LoadOutcome::Committed { records }
            }
            Err(source) => self.retain(
                slot,
                LoadError::Parse {
                    location: location.to_string(),
                    source,
                },
            ),
        }
    }

    /// Reads `source` and commits the parsed dataset into `slot`.
    ///
    /// Never fails: fetch and parse errors are logged and leave the slot unchanged.
    pub async fn load<S: DatasetSource>(&self, slot: Slot, source: &S) -> LoadOutcome {
        let location = source.location();
        debug!(%slot, %location, "Loading dataset");
        match source.read_text().await {
            Ok(text) => self.load_text(slot, &location, &text),
            Err(e) => self.retain(slot, e),
        }
    }

    fn retain(&self, slot: Slot, error: LoadError) -> LoadOutcome {
        warn!(%slot, error = %error, "Dataset load failed; keeping previous data");
        LoadOutcome::Retained {
            reason: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const LIH: &str = "bond_length_angstrom,vqe_energy_ha,exact_energy_ha\n1.6,-7.88,-7.882\n";

    struct FailingSource;

    impl DatasetSource for FailingSource {
        fn location(&self) -> String {
            "unreachable".into()
        }

        fn read_text(&self) -> impl Future<Output = Result<String, LoadError>> + Send {
            async {
                Err(LoadError::Fetch {
                    location: "unreachable".into(),
                    message: "HTTP 404".into(),
                })
            }
        }
    }

    #[test]
    fn slot_names_round_trip_through_from_str() {
        for slot in Slot::ALL {
            assert_eq!(slot.name().parse::<Slot>().unwrap(), slot);
        }
        assert!("xyz".parse::<Slot>().is_err());
    }

    #[test]
    fn slot_default_paths_follow_results_layout() {
        assert_eq!(Slot::H2Curve.default_path(), "results/csv/pec_h2_sto3g.csv");
        assert_eq!(Slot::LihCurve.default_path(), "results/csv/pec_lih_sto3g.csv");
        assert_eq!(Slot::NoiseLog.default_path(), "results/csv/h2_noisy_runs.csv");
    }

    #[test]
    fn new_store_has_no_data() {
        let store = SeriesStore::new();
        for slot in Slot::ALL {
            assert!(store.get(slot).is_none());
        }
    }

    #[tokio::test]
    async fn load_commits_inline_text() {
        let store = SeriesStore::new();
        let outcome = store
            .load(Slot::LihCurve, &InlineSource::new("upload", LIH))
            .await;
        assert_eq!(outcome, LoadOutcome::Committed { records: 1 });
        assert_eq!(store.get(Slot::LihCurve).unwrap().len(), 1);
        assert!(store.get(Slot::H2Curve).is_none());
    }

    #[tokio::test]
    async fn failed_load_keeps_previous_dataset() {
        let store = SeriesStore::new();
        store
            .load(Slot::LihCurve, &InlineSource::new("upload", LIH))
            .await;
        let before = store.get(Slot::LihCurve).unwrap();

        let outcome = store.load(Slot::LihCurve, &FailingSource).await;

        assert!(matches!(outcome, LoadOutcome::Retained { .. }));
        let after = store.get(Slot::LihCurve).unwrap();
        assert!(Arc::ptr_eq(&before, &after));
    }

    #[tokio::test]
    async fn unparsable_text_keeps_previous_dataset() {
        let store = SeriesStore::new();
        store.load_text(Slot::H2Curve, "first", LIH);
        let outcome = store.load_text(Slot::H2Curve, "second", "   \n");
        assert!(!outcome.is_committed());
        assert_eq!(store.get(Slot::H2Curve).unwrap().len(), 1);
    }

    #[tokio::test]
    async fn failed_first_load_leaves_slot_empty() {
        let store = SeriesStore::new();
        let outcome = store.load(Slot::NoiseLog, &FailingSource).await;
        assert_eq!(
            outcome,
            LoadOutcome::Retained {
                reason: "Failed to fetch 'unreachable': HTTP 404".into()
            }
        );
        assert!(!store.is_loaded(Slot::NoiseLog));
    }

    #[tokio::test]
    async fn later_load_overwrites_earlier_one() {
        let store = SeriesStore::new();
        store.load_text(Slot::NoiseLog, "a", "restart,delta_ha\n0,0.1");
        store.load_text(Slot::NoiseLog, "b", "restart,delta_ha\n0,0.1\n1,0.2");
        assert_eq!(store.get(Slot::NoiseLog).unwrap().len(), 2);
    }

    #[tokio::test]
    async fn file_and_inline_sources_produce_identical_datasets() {
        let dir = tempdir().unwrap();
        let file = FileSource::well_known(dir.path(), Slot::LihCurve);
        fs::create_dir_all(file.path().parent().unwrap()).unwrap();
        fs::write(file.path(), LIH).unwrap();

        let store = SeriesStore::new();
        store.load(Slot::LihCurve, &file).await;
        let from_file = store.get(Slot::LihCurve).unwrap();
        store
            .load(Slot::LihCurve, &InlineSource::new("upload", LIH))
            .await;
        let from_upload = store.get(Slot::LihCurve).unwrap();

        assert_eq!(*from_file, *from_upload);
    }

    #[tokio::test]
    async fn missing_file_is_retained_not_raised() {
        let dir = tempdir().unwrap();
        let store = SeriesStore::new();
        let outcome = store
            .load(Slot::H2Curve, &FileSource::well_known(dir.path(), Slot::H2Curve))
            .await;
        assert!(matches!(outcome, LoadOutcome::Retained { .. }));
    }

    #[tokio::test]
    async fn loads_of_different_slots_are_independent() {
        let store = SeriesStore::new();
        let h2 = InlineSource::new("h2", "bond_length_angstrom,vqe_energy_ha\n0.7,-1.1");
        let (a, b) = tokio::join!(
            store.load(Slot::H2Curve, &h2),
            store.load(Slot::LihCurve, &FailingSource)
        );
        assert!(a.is_committed());
        assert!(!b.is_committed());
        assert!(store.is_loaded(Slot::H2Curve));
        assert!(!store.is_loaded(Slot::LihCurve));
    }

    #[tokio::test]
    async fn subscribers_are_notified_on_commit() {
        let store = SeriesStore::new();
        let mut rx = store.subscribe(Slot::NoiseLog);
        assert!(!rx.has_changed().unwrap());

        store.load_text(Slot::NoiseLog, "log", "restart,delta_ha\n0,0.1\n1,0.2\n2,0.3");

        assert!(rx.has_changed().unwrap());
        let restarts = rx.borrow_and_update().as_ref().unwrap().column("restart");
        assert_eq!(restarts, vec![0.0, 1.0, 2.0]);
    }

    #[tokio::test]
    async fn retained_load_does_not_notify_subscribers() {
        let store = SeriesStore::new();
        let mut rx = store.subscribe(Slot::H2Curve);
        store.load(Slot::H2Curve, &FailingSource).await;
        assert!(!rx.has_changed().unwrap());
        let _ = rx.borrow_and_update();
    }
}
