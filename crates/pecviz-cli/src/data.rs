use crate::config::{DataBase, DataLocations};
use crate::error::{CliError, Result};
use directories::ProjectDirs;
use pecviz::engine::error::LoadError;
use pecviz::engine::store::{DatasetSource, FileSource, Slot};
use pecviz::workflows::summary::SlotSources;
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

const CONFIG_FILE_NAME: &str = "config.toml";
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Locates per-user files and turns configured data locations into dataset sources.
#[derive(Debug)]
pub struct DataManager {
    config_dir: Option<PathBuf>,
    client: reqwest::Client,
}

impl DataManager {
    pub fn new() -> Result<Self> {
        let config_dir = ProjectDirs::from("org", "pecviz", "pecviz")
            .map(|dirs| dirs.config_dir().to_path_buf());
        debug!("DataManager initialized with config dir: {:?}", &config_dir);
        Ok(Self {
            config_dir,
            client: Self::build_client()?,
        })
    }

    pub fn with_config_dir(path: PathBuf) -> Result<Self> {
        Ok(Self {
            config_dir: Some(path),
            client: Self::build_client()?,
        })
    }

    fn build_client() -> Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| CliError::Data(format!("Failed to build HTTP client: {}", e)))
    }

    /// The config file read when `--config` is not given.
    pub fn default_config_path(&self) -> Result<PathBuf> {
        self.config_dir
            .as_ref()
            .map(|dir| dir.join(CONFIG_FILE_NAME))
            .ok_or_else(|| CliError::Data("Could not determine config directory path.".to_string()))
    }

    /// Where `slot` is read from: an explicit file, or its well-known path below the base.
    pub fn source_for(&self, locations: &DataLocations, slot: Slot) -> CliSource {
        if let Some(path) = locations.explicit(slot) {
            return CliSource::File(FileSource::new(path.clone()));
        }
        match &locations.base {
            DataBase::Dir(dir) => CliSource::File(FileSource::well_known(dir, slot)),
            DataBase::Url(url) => CliSource::Http(HttpSource {
                url: join_url(url, &slot.default_path()),
                client: self.client.clone(),
            }),
        }
    }

    pub fn sources(&self, locations: &DataLocations) -> SlotSources<CliSource> {
        SlotSources::from_fn(|slot| Some(self.source_for(locations, slot)))
    }

    /// Sources for `only`, or for every slot when `None`.
    pub fn sources_for(
        &self,
        locations: &DataLocations,
        only: Option<Slot>,
    ) -> SlotSources<CliSource> {
        SlotSources::from_fn(|slot| {
            only.is_none_or(|s| s == slot)
                .then(|| self.source_for(locations, slot))
        })
    }
}

fn join_url(base: &str, relative: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), relative)
}

/// A dataset served over HTTP.
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn url(&self) -> &str {
        &self.url
    }

    async fn fetch(&self) -> std::result::Result<String, reqwest::Error> {
        self.client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await
    }
}

impl DatasetSource for HttpSource {
    fn location(&self) -> String {
        self.url.clone()
    }

    fn read_text(&self) -> impl Future<Output = std::result::Result<String, LoadError>> + Send {
        async move {
            self.fetch().await.map_err(|e| LoadError::Fetch {
                location: self.url.clone(),
                message: e.to_string(),
            })
        }
    }
}

/// Any dataset source the CLI can be configured with.
#[derive(Debug, Clone)]
pub enum CliSource {
    File(FileSource),
    Http(HttpSource),
}

impl DatasetSource for CliSource {
    fn location(&self) -> String {
        match self {
            CliSource::File(s) => s.location(),
            CliSource::Http(s) => s.location(),
        }
    }

    fn read_text(&self) -> impl Future<Output = std::result::Result<String, LoadError>> + Send {
        async move {
            match self {
                CliSource::File(s) => s.read_text().await,
                CliSource::Http(s) => s.read_text().await,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pecviz::engine::store::{LoadOutcome, SeriesStore};
    use tempfile::tempdir;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Answers exactly one request with `status` and `body`; returns its URL.
    async fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 1024];
            let _ = socket.read(&mut request).await;
            let response = format!(
                "HTTP/1.1 {}\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });
        format!("http://{}/results/csv/pec_h2_sto3g.csv", addr)
    }

    fn http_source(url: String) -> CliSource {
        CliSource::Http(HttpSource {
            url,
            client: reqwest::Client::builder().no_proxy().build().unwrap(),
        })
    }

    fn locations(base: DataBase) -> DataLocations {
        DataLocations {
            base,
            h2: None,
            lih: None,
            noise: None,
        }
    }

    #[test]
    fn default_config_path_lives_in_config_dir() {
        let dir = tempdir().unwrap();
        let manager = DataManager::with_config_dir(dir.path().to_path_buf()).unwrap();
        assert_eq!(
            manager.default_config_path().unwrap(),
            dir.path().join("config.toml")
        );
    }

    #[test]
    fn directory_base_resolves_well_known_paths() {
        let dir = tempdir().unwrap();
        let manager = DataManager::with_config_dir(dir.path().to_path_buf()).unwrap();
        let locations = locations(DataBase::Dir(PathBuf::from("public")));

        let source = manager.source_for(&locations, Slot::NoiseLog);
        assert_eq!(
            source.location(),
            PathBuf::from("public/results/csv/h2_noisy_runs.csv")
                .display()
                .to_string()
        );
    }

    #[test]
    fn url_base_resolves_to_http_sources() {
        let dir = tempdir().unwrap();
        let manager = DataManager::with_config_dir(dir.path().to_path_buf()).unwrap();
        let locations = locations(DataBase::Url("http://localhost:5173/".to_string()));

        match manager.source_for(&locations, Slot::H2Curve) {
            CliSource::Http(http) => assert_eq!(
                http.url(),
                "http://localhost:5173/results/csv/pec_h2_sto3g.csv"
            ),
            other => panic!("expected an HTTP source, got {:?}", other),
        }
    }

    #[test]
    fn explicit_files_win_over_the_base() {
        let dir = tempdir().unwrap();
        let manager = DataManager::with_config_dir(dir.path().to_path_buf()).unwrap();
        let mut locations = locations(DataBase::Url("http://localhost:5173".to_string()));
        locations.lih = Some(PathBuf::from("mine.csv"));

        assert!(matches!(
            manager.source_for(&locations, Slot::LihCurve),
            CliSource::File(_)
        ));
        assert!(matches!(
            manager.source_for(&locations, Slot::H2Curve),
            CliSource::Http(_)
        ));
    }

    #[test]
    fn sources_for_restricts_to_one_slot() {
        let dir = tempdir().unwrap();
        let manager = DataManager::with_config_dir(dir.path().to_path_buf()).unwrap();
        let locations = locations(DataBase::Dir(PathBuf::from(".")));

        let sources = manager.sources_for(&locations, Some(Slot::LihCurve));
        assert!(sources.get(Slot::H2Curve).is_none());
        assert!(sources.get(Slot::LihCurve).is_some());
        assert!(sources.get(Slot::NoiseLog).is_none());
        assert!(manager.sources(&locations).get(Slot::NoiseLog).is_some());
    }

    #[tokio::test]
    async fn file_source_failure_is_a_load_error() {
        let dir = tempdir().unwrap();
        let source = CliSource::File(FileSource::well_known(dir.path(), Slot::H2Curve));
        assert!(matches!(
            source.read_text().await,
            Err(LoadError::Io { .. })
        ));
    }

    #[tokio::test]
    async fn http_error_status_is_retained_by_the_store() {
        let store = SeriesStore::new();
        store.load_text(Slot::H2Curve, "seed", "bond_length_angstrom\n0.7\n");
        let url = serve_once("404 Not Found", "").await;

        let outcome = store.load(Slot::H2Curve, &http_source(url.clone())).await;

        match outcome {
            LoadOutcome::Retained { reason } => {
                assert!(reason.contains(&url));
                assert!(reason.contains("404"));
            }
            other => panic!("expected a retained outcome, got {:?}", other),
        }
        assert_eq!(store.get(Slot::H2Curve).unwrap().len(), 1);
    }

    #[tokio::test]
    async fn http_success_commits_the_served_dataset() {
        let store = SeriesStore::new();
        let url = serve_once(
            "200 OK",
            "bond_length_angstrom,vqe_energy_ha,exact_energy_ha\n0.7,-1.13,-1.13\n0.8,-1.12,-1.12\n",
        )
        .await;

        let outcome = store.load(Slot::H2Curve, &http_source(url)).await;

        assert_eq!(outcome, LoadOutcome::Committed { records: 2 });
        assert!(store.is_loaded(Slot::H2Curve));
    }
}
