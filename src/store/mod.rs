//! Persistence collaborator for the liturgy engine.
//!
//! The engine never talks to a database directly. It goes through
//! [`LiturgyStore`], which mirrors the operations the hosted backend offers.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::{Error, Result};
use crate::liturgy::types::{LiturgyRow, ServiceHeader, ServiceTemplateItem, Song};
use crate::types::{ServiceId, SongId};

/// JSON file backed store
pub mod json;
/// In-process store
pub mod memory;
/// Shared store state
pub mod snapshot;

pub use json::JsonFileStore;
pub use memory::MemoryStore;
pub use snapshot::Snapshot;

/// Operations the engine needs from the backing store.
///
/// Unknown service ids fail with [`Error::NotFound`].
#[async_trait]
pub trait LiturgyStore: Send + Sync {
    /// Rows of a service, ordered by `order` ascending.
    async fn fetch_rows(&self, service_id: &ServiceId) -> Result<Vec<LiturgyRow>>;

    /// Delete every row of a service.
    async fn delete_rows(&self, service_id: &ServiceId) -> Result<()>;

    /// Insert rows for a service.
    async fn insert_rows(&self, service_id: &ServiceId, rows: &[LiturgyRow]) -> Result<()>;

    /// Replace a service's full row set.
    ///
    /// The default is two round trips, delete then insert, with no atomicity:
    /// if the insert fails the service is left without rows and the failure
    /// is reported as [`Error::PartialWrite`]. Stores that can swap the set
    /// in one step should override this.
    async fn replace_rows(&self, service_id: &ServiceId, rows: &[LiturgyRow]) -> Result<()> {
        self.delete_rows(service_id).await?;
        if let Err(e) = self.insert_rows(service_id, rows).await {
            tracing::error!("Insert after delete failed for service {service_id}: {e}");
            return Err(Error::PartialWrite {
                service_id: service_id.clone(),
                source: Box::new(e),
            });
        }
        Ok(())
    }

    /// The standard order of service, sorted by `order`.
    async fn fetch_template(&self) -> Result<Vec<ServiceTemplateItem>>;

    /// Create a service record with a fresh id.
    async fn create_service(&self, date: NaiveDate, title: Option<String>) -> Result<ServiceHeader>;

    /// Service records on a calendar date, in creation order.
    async fn find_services_by_date(&self, date: NaiveDate) -> Result<Vec<ServiceHeader>>;

    /// The song catalog.
    async fn fetch_songs(&self) -> Result<Vec<Song>>;

    /// Latest service date whose liturgy uses the song.
    async fn last_performed_date(&self, song_id: &SongId) -> Result<Option<NaiveDate>>;
}
