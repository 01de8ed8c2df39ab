//! Whole-store state shared by the in-memory and JSON file stores.

use std::collections::{BTreeMap, HashSet};

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::liturgy::types::{LiturgyRow, ServiceHeader, ServiceTemplateItem, Song};
use crate::types::{ServiceId, SongId};

/// Everything a store holds, serializable as one JSON document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Service records in creation order.
    #[serde(default)]
    pub services: Vec<ServiceHeader>,
    /// Rows per service.
    #[serde(default)]
    pub rows: BTreeMap<ServiceId, Vec<LiturgyRow>>,
    /// Song catalog.
    #[serde(default)]
    pub songs: Vec<Song>,
    /// Stored order of service; empty means the standard one.
    #[serde(default)]
    pub template: Vec<ServiceTemplateItem>,
}

impl Snapshot {
    /// Look up a service record.
    pub fn service(&self, service_id: &ServiceId) -> Result<&ServiceHeader> {
        self.services
            .iter()
            .find(|s| &s.id == service_id)
            .ok_or_else(|| Error::not_found("Service", service_id))
    }

    /// Rows of a service sorted by `order`.
    pub fn rows(&self, service_id: &ServiceId) -> Result<Vec<LiturgyRow>> {
        self.service(service_id)?;
        let mut rows = self.rows.get(service_id).cloned().unwrap_or_default();
        rows.sort_by_key(|r| r.order);
        Ok(rows)
    }

    /// Remove every row of a service.
    pub fn delete_rows(&mut self, service_id: &ServiceId) -> Result<()> {
        self.service(service_id)?;
        self.rows.remove(service_id);
        Ok(())
    }

    /// Add rows to a service, rejecting foreign or clashing `order` values.
    pub fn insert_rows(&mut self, service_id: &ServiceId, rows: &[LiturgyRow]) -> Result<()> {
        self.service(service_id)?;
        let existing = self.rows.entry(service_id.clone()).or_default();

        let mut seen: HashSet<u32> = existing.iter().map(|r| r.order).collect();
        for row in rows {
            if &row.service_id != service_id {
                return Err(Error::validation(format!(
                    "row {} belongs to service {}, not {service_id}",
                    row.order, row.service_id
                )));
            }
            if row.order == 0 || !seen.insert(row.order) {
                return Err(Error::validation(format!(
                    "order {} is not a free position in service {service_id}",
                    row.order
                )));
            }
        }

        existing.extend(rows.iter().cloned());
        Ok(())
    }

    /// Swap a service's row set in one step.
    pub fn replace_rows(&mut self, service_id: &ServiceId, rows: &[LiturgyRow]) -> Result<()> {
        let mut next = self.clone();
        next.delete_rows(service_id)?;
        next.insert_rows(service_id, rows)?;
        *self = next;
        Ok(())
    }

    /// Create a new service record for `date`.
    pub fn create_service(&mut self, date: NaiveDate, title: Option<String>) -> ServiceHeader {
        let header = ServiceHeader {
            id: ServiceId::generate(),
            date,
            title,
            created_at: Utc::now(),
        };
        self.services.push(header.clone());
        header
    }

    /// Services scheduled on `date`, in creation order.
    pub fn services_on(&self, date: NaiveDate) -> Vec<ServiceHeader> {
        self.services.iter().filter(|s| s.date == date).cloned().collect()
    }

    /// Latest date of any service whose rows reference `song_id`.
    pub fn last_performed_date(&self, song_id: &SongId) -> Option<NaiveDate> {
        self.services
            .iter()
            .filter(|service| {
                self.rows
                    .get(&service.id)
                    .is_some_and(|rows| rows.iter().any(|r| r.song.as_ref() == Some(song_id)))
            })
            .map(|service| service.date)
            .max()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn row(service_id: &ServiceId, order: u32, song: Option<&str>) -> LiturgyRow {
        LiturgyRow {
            service_id: service_id.clone(),
            order,
            moment: "Congregational Song".into(),
            description: None,
            song: song.map(SongId::from),
            key: None,
        }
    }

    #[test]
    fn unknown_service_is_not_found() {
        let snapshot = Snapshot::default();
        let err = snapshot.rows(&ServiceId::new("missing")).unwrap_err();
        assert!(matches!(err, Error::NotFound { entity: "Service", .. }));
    }

    #[test]
    fn insert_rejects_duplicate_order() {
        let mut snapshot = Snapshot::default();
        let id = snapshot.create_service(date(3), None).id;
        snapshot.insert_rows(&id, &[row(&id, 1, None)]).unwrap();
        let err = snapshot.insert_rows(&id, &[row(&id, 1, None)]).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn failed_replace_keeps_previous_rows() {
        let mut snapshot = Snapshot::default();
        let id = snapshot.create_service(date(3), None).id;
        snapshot.insert_rows(&id, &[row(&id, 1, Some("a"))]).unwrap();

        let clash = [row(&id, 1, None), row(&id, 1, None)];
        assert!(snapshot.replace_rows(&id, &clash).is_err());
        assert_eq!(snapshot.rows(&id).unwrap(), vec![row(&id, 1, Some("a"))]);
    }

    #[test]
    fn last_performed_takes_latest_service_date() {
        let mut snapshot = Snapshot::default();
        let early = snapshot.create_service(date(3), None).id;
        let late = snapshot.create_service(date(17), None).id;
        let other = snapshot.create_service(date(24), None).id;
        snapshot.insert_rows(&late, &[row(&late, 1, Some("a"))]).unwrap();
        snapshot.insert_rows(&early, &[row(&early, 1, Some("a"))]).unwrap();
        snapshot.insert_rows(&other, &[row(&other, 1, Some("b"))]).unwrap();

        assert_eq!(snapshot.last_performed_date(&SongId::new("a")), Some(date(17)));
        assert_eq!(snapshot.last_performed_date(&SongId::new("zzz")), None);
    }
}
