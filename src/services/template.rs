//! New services from the standard order of service.

use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::constants::template::STANDARD_ORDER;
use crate::error::{Error, Result};
use crate::liturgy::types::{LiturgyRow, ServiceHeader, ServiceTemplateItem};
use crate::store::LiturgyStore;
use crate::types::ServiceId;

/// The built-in standard order of service.
pub fn standard_template() -> Vec<ServiceTemplateItem> {
    STANDARD_ORDER
        .iter()
        .zip(1u32..)
        .map(|(&(moment, description, allows_song, slots), order)| ServiceTemplateItem {
            order,
            moment: moment.into(),
            default_description: description.map(String::from),
            allows_song,
            song_slot_count: slots,
        })
        .collect()
}

/// Load a template from a JSON array of items.
pub fn load_template(path: &Path) -> Result<Vec<ServiceTemplateItem>> {
    let text = fs_err::read_to_string(path)?;
    let items: Vec<ServiceTemplateItem> = serde_json::from_str(&text)
        .map_err(|e| Error::parse(format!("Invalid template: {e}"), path.to_path_buf()))?;
    if items.is_empty() {
        return Err(Error::parse("Template has no items", path.to_path_buf()));
    }
    Ok(items)
}

/// Initial rows for a service, numbered `1..=N` in template order.
///
/// Items with several song slots expand to that many empty rows sharing the
/// item's type and description. A slot count of zero is treated as one.
pub fn template_rows(service_id: &ServiceId, items: &[ServiceTemplateItem]) -> Vec<LiturgyRow> {
    let mut sorted: Vec<&ServiceTemplateItem> = items.iter().collect();
    sorted.sort_by_key(|item| item.order);

    sorted
        .into_iter()
        .flat_map(|item| (0..item.song_slot_count.max(1)).map(move |_| item))
        .zip(1u32..)
        .map(|(item, order)| LiturgyRow {
            service_id: service_id.clone(),
            order,
            moment: item.moment.clone(),
            description: item.default_description.clone(),
            song: None,
            key: None,
        })
        .collect()
}

/// Creates a service and seeds its liturgy from the store's template.
pub struct ServiceTemplateInstantiator<S> {
    store: Arc<S>,
}

impl<S: LiturgyStore> ServiceTemplateInstantiator<S> {
    /// Create an instantiator over a store.
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Create a service on `date` and insert its template rows.
    ///
    /// The template is checked before the service record is created, so an
    /// empty template leaves nothing behind.
    pub async fn instantiate(
        &self,
        date: NaiveDate,
        title: Option<String>,
    ) -> Result<(ServiceHeader, Vec<LiturgyRow>)> {
        let template = self.store.fetch_template().await?;
        if template.is_empty() {
            return Err(Error::validation("the order-of-service template is empty"));
        }

        let header = self.store.create_service(date, title).await?;
        let rows = template_rows(&header.id, &template);
        self.store.insert_rows(&header.id, &rows).await?;

        tracing::info!(
            "Created service {} on {} with {} liturgy rows",
            header.id,
            header.date,
            rows.len()
        );
        Ok((header, rows))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    fn item(order: u32, moment: &str, slots: u32) -> ServiceTemplateItem {
        ServiceTemplateItem {
            order,
            moment: moment.into(),
            default_description: Some(format!("{moment} notes")),
            allows_song: slots > 1,
            song_slot_count: slots,
        }
    }

    #[test]
    fn multi_slot_item_expands_to_consecutive_rows() {
        let items = vec![
            item(1, "Prelude", 1),
            item(2, "Congregational Song", 3),
            item(3, "Sermon", 1),
            item(4, "Benediction", 1),
        ];
        let rows = template_rows(&ServiceId::new("svc"), &items);

        assert_eq!(rows.len(), 6);
        assert_eq!(rows.iter().map(|r| r.order).collect::<Vec<_>>(), vec![1, 2, 3, 4, 5, 6]);
        assert!(rows[1..4].iter().all(|r| r.moment.as_str() == "Congregational Song"));
        assert!(rows.iter().all(|r| r.song.is_none() && r.key.is_none()));
        assert_eq!(rows[4].description.as_deref(), Some("Sermon notes"));
    }

    #[test]
    fn zero_slot_count_still_emits_a_row() {
        let rows = template_rows(&ServiceId::new("svc"), &[item(1, "Offering", 0)]);
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn items_are_ordered_by_template_order() {
        let rows =
            template_rows(&ServiceId::new("svc"), &[item(2, "Sermon", 1), item(1, "Prelude", 1)]);
        assert_eq!(rows[0].moment.as_str(), "Prelude");
        assert_eq!(rows[1].order, 2);
    }

    #[test]
    fn standard_template_is_numbered_and_has_songs() {
        let template = standard_template();
        assert_eq!(template.len(), STANDARD_ORDER.len());
        assert_eq!(template[0].order, 1);
        assert!(template.iter().any(|i| i.song_slot_count == 3));
    }

    #[test]
    fn load_template_reads_json_items() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("template.json");
        std::fs::write(
            &path,
            r#"[{"order": 1, "type": "Prelude", "allows_song": true},
                {"order": 2, "type": "Congregational Song", "allows_song": true, "song_slot_count": 2}]"#,
        )
        .unwrap();
        let items = load_template(&path).unwrap();
        assert_eq!(template_rows(&ServiceId::new("svc"), &items).len(), 3);
    }

    #[test]
    fn empty_template_file_is_rejected() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("template.json");
        std::fs::write(&path, "[]").unwrap();
        assert!(matches!(load_template(&path), Err(Error::Parse { .. })));
    }
}
