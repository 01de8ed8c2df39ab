//! Editable blocks back to flat, densely numbered rows.

use crate::error::{Error, Result};
use crate::liturgy::types::{LiturgyBlock, LiturgyRow};
use crate::types::ServiceId;

/// Number of rows a block expands to.
pub fn expanded_len(block: &LiturgyBlock) -> usize {
    if block.allows_song {
        block.songs.len().max(1)
    } else {
        1
    }
}

/// Expand blocks into rows numbered `1..=N`.
///
/// Song-eligible blocks emit one row per slot. Other blocks emit a single
/// songless row; any stray slots they carry are dropped. Fails with a
/// validation error when nothing would be emitted.
pub fn flatten_blocks(service_id: &ServiceId, blocks: &[LiturgyBlock]) -> Result<Vec<LiturgyRow>> {
    let mut rows = Vec::with_capacity(blocks.iter().map(expanded_len).sum());
    let mut order = 0u32;

    let mut push = |block: &LiturgyBlock, song, key| {
        order += 1;
        rows.push(LiturgyRow {
            service_id: service_id.clone(),
            order,
            moment: block.moment.clone(),
            description: block.description.clone(),
            song,
            key,
        });
    };

    for block in blocks {
        if block.allows_song && !block.songs.is_empty() {
            for slot in &block.songs {
                push(block, slot.song.clone(), slot.key.clone());
            }
        } else {
            if !block.allows_song && block.songs.iter().any(|s| s.song.is_some()) {
                tracing::debug!(
                    "Dropping song entries on '{}': moment does not take songs",
                    block.moment
                );
            }
            push(block, None, None);
        }
    }

    if rows.is_empty() {
        return Err(Error::validation("a liturgy needs at least one item before it can be saved"));
    }
    Ok(rows)
}
