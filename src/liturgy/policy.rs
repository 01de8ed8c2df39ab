//! Song eligibility policy and the menu of known moments.
//!
//! Whether a moment offers song selection is a product decision, so it sits
//! behind [`SongPolicy`] instead of being inlined into the grouping code.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::liturgy::types::ServiceTemplateItem;
use crate::types::MomentType;

/// Decides whether a moment type offers song selection.
pub trait SongPolicy {
    /// Returns true when blocks of this type may carry songs.
    fn allows_song(&self, moment: &MomentType) -> bool;
}

/// Keywords that mark a moment type as song-bearing.
const SONG_KEYWORDS: &[&str] = &["song", "prelude"];

/// True when the label case-insensitively contains a song keyword.
pub fn mentions_song_keyword(moment: &MomentType) -> bool {
    let lower = moment.as_str().to_lowercase();
    SONG_KEYWORDS.iter().any(|k| lower.contains(k))
}

/// One entry of the suggested moment menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnownMoment {
    /// Label offered in the menu.
    pub name: String,
    /// Whether the moment takes songs even without a song keyword.
    pub allows_song: bool,
}

impl KnownMoment {
    /// Create a menu entry.
    pub fn new(name: impl Into<String>, allows_song: bool) -> Self {
        Self { name: name.into(), allows_song }
    }
}

/// Swappable list of conventional moment types.
///
/// Used for UI suggestions and as the explicit eligibility signal that
/// complements [`mentions_song_keyword`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MomentCatalog {
    moments: Vec<KnownMoment>,
}

impl MomentCatalog {
    /// Create a catalog from explicit entries.
    pub const fn new(moments: Vec<KnownMoment>) -> Self {
        Self { moments }
    }

    /// The conventional menu offered by default.
    pub fn standard() -> Self {
        Self::new(vec![
            KnownMoment::new("Prelude", true),
            KnownMoment::new("Call to Worship", false),
            KnownMoment::new("Congregational Song", true),
            KnownMoment::new("Prayer", false),
            KnownMoment::new("Scripture Reading", false),
            KnownMoment::new("Offering", false),
            KnownMoment::new("Special Music", true),
            KnownMoment::new("Sermon", false),
            KnownMoment::new("Benediction", false),
            KnownMoment::new("Postlude", true),
        ])
    }

    /// All entries in menu order.
    pub fn moments(&self) -> &[KnownMoment] {
        &self.moments
    }

    /// Look up an entry by exact label.
    pub fn get(&self, moment: &MomentType) -> Option<&KnownMoment> {
        self.moments.iter().find(|m| m.name == moment.as_str())
    }

    /// Menu entries whose label starts with `prefix`, case-insensitively.
    pub fn suggestions(&self, prefix: &str) -> Vec<&KnownMoment> {
        let prefix = prefix.trim().to_lowercase();
        self.moments
            .iter()
            .filter(|m| m.name.to_lowercase().starts_with(&prefix))
            .collect()
    }
}

impl SongPolicy for MomentCatalog {
    fn allows_song(&self, moment: &MomentType) -> bool {
        mentions_song_keyword(moment) || self.get(moment).is_some_and(|m| m.allows_song)
    }
}

/// Wraps a policy so moments the order-of-service template flags as
/// song-bearing stay eligible, whatever their label.
#[derive(Debug, Clone, Default)]
pub struct TemplatePolicy<P> {
    base: P,
    song_moments: HashSet<MomentType>,
}

impl<P: SongPolicy> TemplatePolicy<P> {
    /// Combine `base` with the song-bearing moments of `template`.
    pub fn new(base: P, template: &[ServiceTemplateItem]) -> Self {
        let song_moments = template
            .iter()
            .filter(|item| item.allows_song)
            .map(|item| item.moment.clone())
            .collect();
        Self { base, song_moments }
    }
}

impl<P: SongPolicy> SongPolicy for TemplatePolicy<P> {
    fn allows_song(&self, moment: &MomentType) -> bool {
        self.song_moments.contains(moment) || self.base.allows_song(moment)
    }
}

/// Policy using only the keyword heuristic.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordPolicy;

impl SongPolicy for KeywordPolicy {
    fn allows_song(&self, moment: &MomentType) -> bool {
        mentions_song_keyword(moment)
    }
}
