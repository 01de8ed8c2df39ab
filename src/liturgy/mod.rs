//! Liturgy composition engine.
//!
//! Converts a service's flat, ordered rows into editable blocks and back.
//! Everything here is pure; persistence lives in [`crate::store`].

/// Blocks back to rows
pub mod flatten;
/// Rows to blocks
pub mod grouping;
/// Song eligibility policy and moment menu
pub mod policy;
/// Immutable editing session
pub mod session;
/// Rows, blocks, headers and template items
pub mod types;

pub use flatten::flatten_blocks;
pub use grouping::group_rows;
pub use policy::{
    mentions_song_keyword, KeywordPolicy, KnownMoment, MomentCatalog, SongPolicy, TemplatePolicy,
};
pub use session::{LiturgyEdit, LiturgySession};
pub use types::{LiturgyBlock, LiturgyRow, ServiceHeader, ServiceTemplateItem, Song, SongSlot};
