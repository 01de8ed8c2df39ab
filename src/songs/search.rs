//! Song catalog search for the song-slot picker.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

use crate::constants::search::{MAX_SONG_RESULTS, MIN_FUZZY_SCORE};
use crate::liturgy::types::Song;

/// Name search over the song catalog.
///
/// Substring hits come first in catalog order, then fuzzy matches by score.
pub struct SongSearch {
    /// Minimum skim score (0-1000).
    pub min_score: i64,
    /// Maximum number of results.
    pub limit: usize,
}

impl Default for SongSearch {
    fn default() -> Self {
        Self { min_score: MIN_FUZZY_SCORE, limit: MAX_SONG_RESULTS }
    }
}

impl SongSearch {
    /// Find songs whose name matches `query`.
    pub fn find<'a>(&self, query: &str, songs: &'a [Song]) -> Vec<&'a Song> {
        let query_lower = query.trim().to_lowercase();
        if query_lower.is_empty() {
            return songs.iter().take(self.limit).collect();
        }

        let (exact, rest): (Vec<&Song>, Vec<&Song>) = songs
            .iter()
            .partition(|s| s.name.to_lowercase().contains(&query_lower));

        let matcher = SkimMatcherV2::default();
        let mut scored: Vec<_> = rest
            .into_iter()
            .filter_map(|song| {
                let score = matcher.fuzzy_match(&song.name.to_lowercase(), &query_lower)?;
                (score >= self.min_score).then_some((song, score))
            })
            .collect();
        scored.sort_by(|a, b| b.1.cmp(&a.1));

        exact
            .into_iter()
            .chain(scored.into_iter().map(|(song, _)| song))
            .take(self.limit)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SongId;

    fn catalog() -> Vec<Song> {
        ["Amazing Grace", "How Great Thou Art", "Be Thou My Vision", "Great Is Thy Faithfulness"]
            .iter()
            .enumerate()
            .map(|(i, name)| Song { id: SongId::new(format!("s{i}")), name: (*name).to_string() })
            .collect()
    }

    #[test]
    fn substring_hits_come_first() {
        let songs = catalog();
        let results = SongSearch::default().find("great", &songs);
        let names: Vec<_> = results.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(&names[..2], &["How Great Thou Art", "Great Is Thy Faithfulness"]);
    }

    #[test]
    fn fuzzy_match_finds_abbreviations() {
        let songs = catalog();
        let results = SongSearch::default().find("amzng grc", &songs);
        assert_eq!(results.first().map(|s| s.name.as_str()), Some("Amazing Grace"));
    }

    #[test]
    fn empty_query_lists_catalog_up_to_limit() {
        let songs = catalog();
        let search = SongSearch { limit: 2, ..SongSearch::default() };
        assert_eq!(search.find("  ", &songs).len(), 2);
    }
}
