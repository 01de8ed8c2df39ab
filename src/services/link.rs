//! Attach a separately scheduled event to the service on a given date.
//!
//! Lookup and creation are separate store calls with no uniqueness check in
//! between. Two sessions that both find no service for a date and both
//! choose to create one end up with two services on that date. Callers
//! treat several candidates for one date as a normal state to choose from.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::liturgy::types::ServiceHeader;
use crate::services::template::ServiceTemplateInstantiator;
use crate::store::LiturgyStore;
use crate::types::ServiceId;

/// Services found for a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkCandidates {
    /// Date that was looked up.
    pub date: NaiveDate,
    /// Matching services, most recently created first.
    pub candidates: Vec<ServiceHeader>,
    /// Preselected candidate: the most recently created one.
    pub default_selection: Option<ServiceId>,
}

impl LinkCandidates {
    /// No service exists on the date yet.
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// The caller's decision after seeing the candidates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkChoice {
    /// Instantiate a new service from the template.
    CreateNew {
        /// Title for the new service.
        title: Option<String>,
    },
    /// Reuse one of the candidates.
    UseExisting(ServiceId),
}

/// Finds or creates the service an event links to.
pub struct ServiceLinkResolver<S> {
    store: Arc<S>,
    instantiator: ServiceTemplateInstantiator<S>,
}

impl<S: LiturgyStore> ServiceLinkResolver<S> {
    /// Create a resolver over a store.
    pub fn new(store: Arc<S>) -> Self {
        let instantiator = ServiceTemplateInstantiator::new(Arc::clone(&store));
        Self { store, instantiator }
    }

    /// List the services on `date`.
    pub async fn resolve(&self, date: NaiveDate) -> Result<LinkCandidates> {
        let mut candidates = self.store.find_services_by_date(date).await?;
        // Newest first; ties keep the later-inserted record in front.
        candidates.reverse();
        candidates.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        if candidates.len() > 1 {
            tracing::debug!("{} services share {date}, defaulting to the newest", candidates.len());
        }

        let default_selection = candidates.first().map(|c| c.id.clone());
        Ok(LinkCandidates { date, candidates, default_selection })
    }

    /// Apply the caller's choice for `date`.
    ///
    /// `UseExisting` must name a service on that date.
    pub async fn link(&self, date: NaiveDate, choice: LinkChoice) -> Result<ServiceHeader> {
        match choice {
            LinkChoice::CreateNew { title } => {
                let (header, _) = self.instantiator.instantiate(date, title).await?;
                Ok(header)
            }
            LinkChoice::UseExisting(id) => {
                let found = self.resolve(date).await?;
                found
                    .candidates
                    .into_iter()
                    .find(|c| c.id == id)
                    .ok_or_else(|| Error::not_found("Service on date", format!("{id} ({date})")))
            }
        }
    }
}
