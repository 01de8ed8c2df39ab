//! JSON file backed store.
//!
//! The whole store is one pretty-printed JSON document. Every mutation is
//! applied to a copy, written to a sibling temp file, renamed over the
//! original, and only then committed in memory.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::Mutex;

use crate::error::{Error, Result};
use crate::liturgy::types::{LiturgyRow, ServiceHeader, ServiceTemplateItem, Song};
use crate::store::memory::template_of;
use crate::store::snapshot::Snapshot;
use crate::store::LiturgyStore;
use crate::types::{ServiceId, SongId};

/// Store persisted to a single JSON file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    template_override: Option<Vec<ServiceTemplateItem>>,
    state: Mutex<Snapshot>,
}

impl JsonFileStore {
    /// Open the store at `path`; a missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let snapshot = match fs_err::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text)
                .map_err(|e| Error::parse(format!("Invalid liturgy store: {e}"), path.clone()))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No liturgy store at {}, starting empty", path.display());
                Snapshot::default()
            }
            Err(e) => return Err(Error::io(e, path)),
        };
        tracing::info!(
            "Loaded {} services and {} songs from {}",
            snapshot.services.len(),
            snapshot.songs.len(),
            path.display()
        );
        Ok(Self { path, template_override: None, state: Mutex::new(snapshot) })
    }

    /// Serve this template instead of the stored or standard one.
    #[must_use]
    pub fn with_template(mut self, template: Vec<ServiceTemplateItem>) -> Self {
        self.template_override = Some(template);
        self
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Add songs to the catalog and persist.
    pub async fn add_songs(&self, songs: Vec<Song>) -> Result<()> {
        self.mutate(|s| {
            s.songs.extend(songs);
            Ok(())
        })
        .await
    }

    async fn mutate<T>(&self, f: impl FnOnce(&mut Snapshot) -> Result<T> + Send) -> Result<T> {
        let mut guard = self.state.lock().await;
        let mut next = guard.clone();
        let out = f(&mut next)?;
        self.persist(&next)?;
        *guard = next;
        Ok(out)
    }

    fn persist(&self, snapshot: &Snapshot) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs_err::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(snapshot)
            .map_err(|e| Error::Store(format!("Could not serialize liturgy store: {e}")))?;
        let tmp = self.path.with_extension("json.tmp");
        fs_err::write(&tmp, json)?;
        fs_err::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[async_trait]
impl LiturgyStore for JsonFileStore {
    async fn fetch_rows(&self, service_id: &ServiceId) -> Result<Vec<LiturgyRow>> {
        self.state.lock().await.rows(service_id)
    }

    async fn delete_rows(&self, service_id: &ServiceId) -> Result<()> {
        self.mutate(|s| s.delete_rows(service_id)).await
    }

    async fn insert_rows(&self, service_id: &ServiceId, rows: &[LiturgyRow]) -> Result<()> {
        self.mutate(|s| s.insert_rows(service_id, rows)).await
    }

    async fn replace_rows(&self, service_id: &ServiceId, rows: &[LiturgyRow]) -> Result<()> {
        self.mutate(|s| s.replace_rows(service_id, rows)).await
    }

    async fn fetch_template(&self) -> Result<Vec<ServiceTemplateItem>> {
        if let Some(template) = &self.template_override {
            let mut items = template.clone();
            items.sort_by_key(|item| item.order);
            return Ok(items);
        }
        Ok(template_of(&*self.state.lock().await))
    }

    async fn create_service(&self, date: NaiveDate, title: Option<String>) -> Result<ServiceHeader> {
        self.mutate(|s| Ok(s.create_service(date, title))).await
    }

    async fn find_services_by_date(&self, date: NaiveDate) -> Result<Vec<ServiceHeader>> {
        Ok(self.state.lock().await.services_on(date))
    }

    async fn fetch_songs(&self) -> Result<Vec<Song>> {
        Ok(self.state.lock().await.songs.clone())
    }

    async fn last_performed_date(&self, song_id: &SongId) -> Result<Option<NaiveDate>> {
        Ok(self.state.lock().await.last_performed_date(song_id))
    }
}
