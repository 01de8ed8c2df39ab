//! Service modules driving the liturgy engine against a store.
//!
//! Each service wraps one entry point: editing an existing liturgy, seeding
//! a new one from the template, or linking an event to a date's service.

pub mod editor;
pub mod link;
pub mod template;

pub use editor::LiturgyEditor;
pub use link::{LinkCandidates, LinkChoice, ServiceLinkResolver};
pub use template::{load_template, standard_template, template_rows, ServiceTemplateInstantiator};
