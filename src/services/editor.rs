//! Load, edit and save a service's liturgy.
//!
//! Loading groups the stored rows into blocks; saving flattens the blocks
//! and replaces the whole row set. There is no conflict detection: when two
//! sessions edit the same service, the last save wins.
//!
//! Song eligibility combines the moment menu with the store's template, so
//! a moment the template flags as song-bearing keeps its song slots even
//! when its label is unknown to the menu.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::error::Result;
use crate::liturgy::policy::{MomentCatalog, SongPolicy, TemplatePolicy};
use crate::liturgy::session::{LiturgyEdit, LiturgySession};
use crate::liturgy::types::{LiturgyRow, Song};
use crate::songs::recency::RecencyStatus;
use crate::songs::search::SongSearch;
use crate::store::LiturgyStore;
use crate::types::{ServiceId, SongId};

/// Editing entry point over a store.
pub struct LiturgyEditor<S, P = MomentCatalog> {
    store: Arc<S>,
    policy: TemplatePolicy<P>,
    search: SongSearch,
}

impl<S: LiturgyStore> LiturgyEditor<S> {
    /// Create an editor using the standard moment menu and the store's template.
    pub async fn new(store: Arc<S>) -> Result<Self> {
        Self::with_policy(store, MomentCatalog::standard()).await
    }
}

impl<S: LiturgyStore, P: SongPolicy> LiturgyEditor<S, P> {
    /// Create an editor with a custom base policy, extended by the store's template.
    pub async fn with_policy(store: Arc<S>, base: P) -> Result<Self> {
        let template = store.fetch_template().await?;
        let policy = TemplatePolicy::new(base, &template);
        Ok(Self { store, policy, search: SongSearch::default() })
    }

    /// Load a service into a new session.
    pub async fn open(&self, service_id: &ServiceId) -> Result<LiturgySession> {
        let rows = self.store.fetch_rows(service_id).await?;
        let session = LiturgySession::from_rows(service_id.clone(), &rows, &self.policy);
        tracing::debug!(
            "Opened service {service_id}: {} rows in {} blocks",
            rows.len(),
            session.blocks().len()
        );
        Ok(session)
    }

    /// Apply one edit with this editor's policy.
    pub fn apply(&self, session: &LiturgySession, edit: LiturgyEdit) -> Result<LiturgySession> {
        session.apply(edit, &self.policy)
    }

    /// Save a session, replacing every stored row of its service.
    ///
    /// An empty liturgy is rejected before the store is touched.
    pub async fn save(&self, session: &LiturgySession) -> Result<Vec<LiturgyRow>> {
        let rows = session.to_rows()?;
        self.store.replace_rows(session.service_id(), &rows).await?;
        tracing::info!("Saved {} liturgy rows for service {}", rows.len(), session.service_id());
        Ok(rows)
    }

    /// Recency of a song relative to `today`.
    pub async fn recency_for(&self, song_id: &SongId, today: NaiveDate) -> Result<RecencyStatus> {
        let last = self.store.last_performed_date(song_id).await?;
        Ok(RecencyStatus::classify(last, today))
    }

    /// Songs matching a picker query.
    pub async fn find_songs(&self, query: &str) -> Result<Vec<Song>> {
        let songs = self.store.fetch_songs().await?;
        Ok(self.search.find(query, &songs).into_iter().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::error::Error;
    use crate::store::MemoryStore;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, 7).unwrap()
    }

    #[tokio::test]
    async fn open_unknown_service_is_not_found() {
        let editor = LiturgyEditor::new(Arc::new(MemoryStore::new())).await.unwrap();
        let err = editor.open(&ServiceId::new("missing")).await.unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[tokio::test]
    async fn empty_save_never_reaches_store() {
        let store = Arc::new(MemoryStore::new());
        let header = store.create_service(date(), None).await.unwrap();
        let row = LiturgyRow {
            service_id: header.id.clone(),
            order: 1,
            moment: "Sermon".into(),
            description: None,
            song: None,
            key: None,
        };
        store.insert_rows(&header.id, std::slice::from_ref(&row)).await.unwrap();

        let editor = LiturgyEditor::new(Arc::clone(&store)).await.unwrap();
        let session = editor.open(&header.id).await.unwrap();
        let emptied = editor.apply(&session, LiturgyEdit::RemoveBlock { index: 0 }).unwrap();

        assert!(matches!(editor.save(&emptied).await, Err(Error::Validation(_))));
        assert_eq!(store.fetch_rows(&header.id).await.unwrap(), vec![row]);
    }

    #[tokio::test]
    async fn recency_uses_store_history() {
        let store = Arc::new(MemoryStore::new());
        let header = store.create_service(date(), None).await.unwrap();
        let row = LiturgyRow {
            service_id: header.id.clone(),
            order: 1,
            moment: "Prelude".into(),
            description: None,
            song: Some(SongId::new("s1")),
            key: None,
        };
        store.insert_rows(&header.id, &[row]).await.unwrap();

        let editor = LiturgyEditor::new(store).await.unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 7, 6).unwrap();
        assert_eq!(editor.recency_for(&SongId::new("s1"), today).await.unwrap(), RecencyStatus::LongAgo);
        assert_eq!(
            editor.recency_for(&SongId::new("s2"), today).await.unwrap(),
            RecencyStatus::FirstTime
        );
    }

    #[tokio::test]
    async fn find_songs_searches_catalog() {
        let store = Arc::new(MemoryStore::new());
        store
            .add_songs(vec![
                Song { id: SongId::new("s1"), name: "Amazing Grace".into() },
                Song { id: SongId::new("s2"), name: "Be Thou My Vision".into() },
            ])
            .await;
        let editor = LiturgyEditor::new(store).await.unwrap();
        let found = editor.find_songs("vision").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, SongId::new("s2"));
    }
}
