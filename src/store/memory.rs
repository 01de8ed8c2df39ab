//! In-process store.

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;

use crate::error::Result;
use crate::liturgy::types::{LiturgyRow, ServiceHeader, ServiceTemplateItem, Song};
use crate::services::template::standard_template;
use crate::store::snapshot::Snapshot;
use crate::store::LiturgyStore;
use crate::types::{ServiceId, SongId};

/// Store kept entirely in memory.
///
/// `replace_rows` swaps the row set under one write lock, so a failed save
/// leaves the previous rows in place.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<Snapshot>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with existing state.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self { state: RwLock::new(snapshot) }
    }

    /// Add songs to the catalog.
    pub async fn add_songs(&self, songs: impl IntoIterator<Item = Song> + Send) {
        self.state.write().await.songs.extend(songs);
    }

    /// Copy of the current state.
    pub async fn snapshot(&self) -> Snapshot {
        self.state.read().await.clone()
    }
}

/// Stored template, or the standard one when none is stored.
pub(crate) fn template_of(snapshot: &Snapshot) -> Vec<ServiceTemplateItem> {
    let mut items = if snapshot.template.is_empty() {
        standard_template()
    } else {
        snapshot.template.clone()
    };
    items.sort_by_key(|item| item.order);
    items
}

#[async_trait]
impl LiturgyStore for MemoryStore {
    async fn fetch_rows(&self, service_id: &ServiceId) -> Result<Vec<LiturgyRow>> {
        self.state.read().await.rows(service_id)
    }

    async fn delete_rows(&self, service_id: &ServiceId) -> Result<()> {
        self.state.write().await.delete_rows(service_id)
    }

    async fn insert_rows(&self, service_id: &ServiceId, rows: &[LiturgyRow]) -> Result<()> {
        self.state.write().await.insert_rows(service_id, rows)
    }

    async fn replace_rows(&self, service_id: &ServiceId, rows: &[LiturgyRow]) -> Result<()> {
        self.state.write().await.replace_rows(service_id, rows)
    }

    async fn fetch_template(&self) -> Result<Vec<ServiceTemplateItem>> {
        Ok(template_of(&*self.state.read().await))
    }

    async fn create_service(&self, date: NaiveDate, title: Option<String>) -> Result<ServiceHeader> {
        Ok(self.state.write().await.create_service(date, title))
    }

    async fn find_services_by_date(&self, date: NaiveDate) -> Result<Vec<ServiceHeader>> {
        Ok(self.state.read().await.services_on(date))
    }

    async fn fetch_songs(&self) -> Result<Vec<Song>> {
        Ok(self.state.read().await.songs.clone())
    }

    async fn last_performed_date(&self, song_id: &SongId) -> Result<Option<NaiveDate>> {
        Ok(self.state.read().await.last_performed_date(song_id))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::error::Error;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 5).unwrap()
    }

    #[tokio::test]
    async fn falls_back_to_standard_template() {
        let store = MemoryStore::new();
        let template = store.fetch_template().await.unwrap();
        assert_eq!(template, standard_template());
    }

    #[tokio::test]
    async fn stored_template_is_sorted() {
        let mut snapshot = Snapshot::default();
        snapshot.template = vec![
            ServiceTemplateItem {
                order: 2,
                moment: "Sermon".into(),
                default_description: None,
                allows_song: false,
                song_slot_count: 1,
            },
            ServiceTemplateItem {
                order: 1,
                moment: "Prelude".into(),
                default_description: None,
                allows_song: true,
                song_slot_count: 1,
            },
        ];
        let store = MemoryStore::from_snapshot(snapshot);
        let template = store.fetch_template().await.unwrap();
        assert_eq!(template[0].moment.as_str(), "Prelude");
    }

    #[tokio::test]
    async fn rows_for_unknown_service_are_not_found() {
        let store = MemoryStore::new();
        let err = store.fetch_rows(&ServiceId::new("nope")).await.unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[tokio::test]
    async fn created_services_are_found_by_date() {
        let store = MemoryStore::new();
        let header = store.create_service(date(), Some("Morning".into())).await.unwrap();
        let found = store.find_services_by_date(date()).await.unwrap();
        assert_eq!(found, vec![header]);
        assert!(store.fetch_rows(&found[0].id).await.unwrap().is_empty());
    }
}
