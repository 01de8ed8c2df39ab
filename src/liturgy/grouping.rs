//! Flat rows to editable blocks.

use crate::liturgy::policy::SongPolicy;
use crate::liturgy::types::{LiturgyBlock, LiturgyRow, SongSlot};

/// Whether `row` joins `block` instead of opening a new one.
///
/// Type and description must match exactly. A row without a song only joins
/// a block whose first slot is also empty, so a songless row after a block
/// that starts with a song opens its own block. Songful rows may join a block
/// that started empty.
fn extends(block: &LiturgyBlock, row: &LiturgyRow) -> bool {
    row.moment == block.moment
        && row.description == block.description
        && (row.song.is_some() || block.first_slot().is_none_or(|slot| slot.song.is_none()))
}

fn open_block(row: &LiturgyRow, policy: &impl SongPolicy) -> LiturgyBlock {
    LiturgyBlock {
        moment: row.moment.clone(),
        description: row.description.clone(),
        songs: vec![SongSlot { song: row.song.clone(), key: row.key.clone() }],
        allows_song: policy.allows_song(&row.moment),
    }
}

/// Group one service's rows into maximal runs of mergeable adjacent rows.
///
/// Rows are ordered by `order` first; callers normally pass them sorted.
pub fn group_rows(rows: &[LiturgyRow], policy: &impl SongPolicy) -> Vec<LiturgyBlock> {
    let mut sorted: Vec<&LiturgyRow> = rows.iter().collect();
    sorted.sort_by_key(|row| row.order);

    let mut blocks: Vec<LiturgyBlock> = Vec::new();
    for row in sorted {
        match blocks.last_mut() {
            Some(current) if extends(current, row) => current.songs.push(SongSlot {
                song: row.song.clone(),
                key: row.key.clone(),
            }),
            _ => blocks.push(open_block(row, policy)),
        }
    }
    blocks
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::liturgy::policy::KeywordPolicy;
    use crate::types::{ServiceId, SongId};

    fn row(order: u32, moment: &str, description: Option<&str>, song: Option<&str>) -> LiturgyRow {
        LiturgyRow {
            service_id: ServiceId::new("svc"),
            order,
            moment: moment.into(),
            description: description.map(String::from),
            song: song.map(SongId::from),
            key: None,
        }
    }

    fn song_ids(block: &LiturgyBlock) -> Vec<Option<&str>> {
        block.songs.iter().map(|s| s.song.as_ref().map(SongId::as_str)).collect()
    }

    #[test]
    fn merges_adjacent_songs_of_same_moment() {
        let rows = vec![
            row(1, "Prelude", None, Some("A")),
            row(2, "Song", None, Some("B")),
            row(3, "Song", None, Some("C")),
            row(4, "Sermon", Some("notes"), None),
        ];
        let blocks = group_rows(&rows, &KeywordPolicy);

        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0].moment.as_str(), "Prelude");
        assert_eq!(song_ids(&blocks[0]), vec![Some("A")]);
        assert_eq!(song_ids(&blocks[1]), vec![Some("B"), Some("C")]);
        assert_eq!(blocks[2].description.as_deref(), Some("notes"));
        assert_eq!(song_ids(&blocks[2]), vec![None]);
        assert!(blocks[0].allows_song && blocks[1].allows_song);
        assert!(!blocks[2].allows_song);
    }

    #[test]
    fn songless_row_does_not_join_block_starting_with_song() {
        let rows = vec![row(1, "Song", None, Some("B")), row(2, "Song", None, None)];
        let blocks = group_rows(&rows, &KeywordPolicy);

        assert_eq!(blocks.len(), 2);
        assert_eq!(song_ids(&blocks[0]), vec![Some("B")]);
        assert_eq!(song_ids(&blocks[1]), vec![None]);
    }

    #[test]
    fn songful_row_joins_block_starting_empty() {
        let rows = vec![row(1, "Song", None, None), row(2, "Song", None, Some("B"))];
        let blocks = group_rows(&rows, &KeywordPolicy);

        assert_eq!(blocks.len(), 1);
        assert_eq!(song_ids(&blocks[0]), vec![None, Some("B")]);
    }

    #[test]
    fn empty_slots_merge_with_each_other() {
        let rows = vec![
            row(1, "Congregational Song", None, None),
            row(2, "Congregational Song", None, None),
            row(3, "Congregational Song", None, None),
        ];
        let blocks = group_rows(&rows, &KeywordPolicy);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].songs.len(), 3);
    }

    #[test]
    fn description_mismatch_splits_blocks() {
        let rows = vec![
            row(1, "Song", None, Some("A")),
            row(2, "Song", Some("Response"), Some("B")),
        ];
        assert_eq!(group_rows(&rows, &KeywordPolicy).len(), 2);
    }

    #[test]
    fn non_adjacent_matches_stay_separate() {
        let rows = vec![
            row(1, "Song", None, Some("A")),
            row(2, "Prayer", None, None),
            row(3, "Song", None, Some("B")),
        ];
        assert_eq!(group_rows(&rows, &KeywordPolicy).len(), 3);
    }

    #[test]
    fn rows_are_grouped_in_order_value_sequence() {
        let rows = vec![
            row(2, "Song", None, Some("B")),
            row(1, "Song", None, Some("A")),
        ];
        let blocks = group_rows(&rows, &KeywordPolicy);
        assert_eq!(song_ids(&blocks[0]), vec![Some("A"), Some("B")]);
    }

    #[test]
    fn stray_song_on_ineligible_moment_is_kept_but_not_offered() {
        let rows = vec![row(1, "Offering", None, Some("X"))];
        let blocks = group_rows(&rows, &KeywordPolicy);
        assert!(!blocks[0].allows_song);
        assert_eq!(song_ids(&blocks[0]), vec![Some("X")]);
    }

    #[test]
    fn no_rows_no_blocks() {
        assert!(group_rows(&[], &KeywordPolicy).is_empty());
    }
}
