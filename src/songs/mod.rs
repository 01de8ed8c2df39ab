//! Song catalog helpers.
//!
//! The catalog itself is owned by the store; this module classifies and
//! searches what the store returns.

/// Last-performed recency classification
pub mod recency;
/// Fuzzy name search for the song picker
pub mod search;

pub use recency::RecencyStatus;
pub use search::SongSearch;
