//! Liturgy data types.
//!
//! Rows are the persisted unit; blocks exist only inside an editing session.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{MomentType, ServiceId, SongId};

/// One persisted liturgy line item.
///
/// Within a service, `order` is unique and dense (`1..=N`) at rest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiturgyRow {
    /// Owning service record.
    pub service_id: ServiceId,
    /// Position in the liturgy, starting at 1.
    pub order: u32,
    /// Moment label.
    #[serde(rename = "type")]
    pub moment: MomentType,
    /// Liturgical notes attached to this moment.
    #[serde(default)]
    pub description: Option<String>,
    /// Song performed at this moment, if any.
    #[serde(default)]
    pub song: Option<SongId>,
    /// Musical key; only meaningful when `song` is set.
    #[serde(default)]
    pub key: Option<String>,
}

/// A song entry inside a block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongSlot {
    /// Referenced song, or `None` for an empty slot.
    pub song: Option<SongId>,
    /// Musical key for the song.
    pub key: Option<String>,
}

impl SongSlot {
    /// A slot with no song selected.
    pub const fn empty() -> Self {
        Self { song: None, key: None }
    }

    /// Whether a song has been chosen for this slot.
    pub const fn has_song(&self) -> bool {
        self.song.is_some()
    }
}

/// Editable grouping of adjacent rows that share type and description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiturgyBlock {
    /// Moment label shared by every song in the block.
    pub moment: MomentType,
    /// Description shared by every song in the block.
    pub description: Option<String>,
    /// Ordered song slots; never empty.
    pub songs: Vec<SongSlot>,
    /// Whether the editor offers song selection for this block.
    pub allows_song: bool,
}

impl LiturgyBlock {
    /// Create a block with one empty song slot.
    pub fn new(moment: MomentType, description: Option<String>, allows_song: bool) -> Self {
        Self {
            moment,
            description,
            songs: vec![SongSlot::empty()],
            allows_song,
        }
    }

    /// The first song slot, which decides whether songless rows may merge.
    pub fn first_slot(&self) -> Option<&SongSlot> {
        self.songs.first()
    }
}

/// A service record owning one liturgy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceHeader {
    /// Service identifier.
    pub id: ServiceId,
    /// Calendar date of the service.
    pub date: NaiveDate,
    /// Optional display title.
    #[serde(default)]
    pub title: Option<String>,
    /// When the record was created; breaks ties between services on one date.
    pub created_at: DateTime<Utc>,
}

/// A song in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    /// Song identifier.
    pub id: SongId,
    /// Display name.
    pub name: String,
}

/// One moment of the standard order of service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceTemplateItem {
    /// Position in the template.
    pub order: u32,
    /// Moment label.
    #[serde(rename = "type")]
    pub moment: MomentType,
    /// Description copied onto the instantiated rows.
    #[serde(default)]
    pub default_description: Option<String>,
    /// Whether this moment takes songs.
    #[serde(default)]
    pub allows_song: bool,
    /// Number of empty song slots to pre-allocate.
    #[serde(default = "default_slot_count")]
    pub song_slot_count: u32,
}

const fn default_slot_count() -> u32 {
    1
}
