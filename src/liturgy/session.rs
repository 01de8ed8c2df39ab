//! Editing session value.
//!
//! A session holds the blocks of one service while it is being edited.
//! Edits never mutate a session in place: [`LiturgySession::apply`] returns
//! the next session, so the previous one stays usable as an undo point.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::liturgy::flatten::flatten_blocks;
use crate::liturgy::grouping::group_rows;
use crate::liturgy::policy::SongPolicy;
use crate::liturgy::types::{LiturgyBlock, LiturgyRow, SongSlot};
use crate::types::{MomentType, ServiceId, SongId};

/// A single user edit against a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LiturgyEdit {
    /// Insert a new block with one empty slot before `index` (or at the end).
    InsertBlock {
        /// Position of the new block.
        index: usize,
        /// Moment label of the new block.
        moment: MomentType,
        /// Description of the new block.
        description: Option<String>,
    },
    /// Remove a block.
    RemoveBlock {
        /// Block to remove.
        index: usize,
    },
    /// Move a block to another position.
    MoveBlock {
        /// Current position.
        from: usize,
        /// Target position after removal.
        to: usize,
    },
    /// Change the moment label; song eligibility is recomputed.
    SetMoment {
        /// Block to change.
        index: usize,
        /// New label.
        moment: MomentType,
    },
    /// Change the shared description.
    SetDescription {
        /// Block to change.
        index: usize,
        /// New description.
        description: Option<String>,
    },
    /// Append an empty song slot.
    AddSongSlot {
        /// Block to change.
        index: usize,
    },
    /// Remove a song slot; the last slot is cleared instead of removed.
    RemoveSongSlot {
        /// Block to change.
        index: usize,
        /// Slot to remove.
        slot: usize,
    },
    /// Choose (or clear) the song of a slot.
    SetSong {
        /// Block to change.
        index: usize,
        /// Slot to change.
        slot: usize,
        /// Song to use, or `None` to clear.
        song: Option<SongId>,
    },
    /// Set the musical key of a slot.
    SetKey {
        /// Block to change.
        index: usize,
        /// Slot to change.
        slot: usize,
        /// Key to use.
        key: Option<String>,
    },
}

/// Blocks of one service under edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiturgySession {
    service_id: ServiceId,
    blocks: Vec<LiturgyBlock>,
}

impl LiturgySession {
    /// Start a session from already grouped blocks.
    pub const fn new(service_id: ServiceId, blocks: Vec<LiturgyBlock>) -> Self {
        Self { service_id, blocks }
    }

    /// Start a session by grouping persisted rows.
    pub fn from_rows(service_id: ServiceId, rows: &[LiturgyRow], policy: &impl SongPolicy) -> Self {
        Self::new(service_id, group_rows(rows, policy))
    }

    /// Service being edited.
    pub const fn service_id(&self) -> &ServiceId {
        &self.service_id
    }

    /// Current blocks in liturgy order.
    pub fn blocks(&self) -> &[LiturgyBlock] {
        &self.blocks
    }

    /// Rows this session would save.
    pub fn to_rows(&self) -> Result<Vec<LiturgyRow>> {
        flatten_blocks(&self.service_id, &self.blocks)
    }

    /// Apply an edit, returning the resulting session.
    pub fn apply(&self, edit: LiturgyEdit, policy: &impl SongPolicy) -> Result<Self> {
        let mut blocks = self.blocks.clone();
        match edit {
            LiturgyEdit::InsertBlock { index, moment, description } => {
                if index > blocks.len() {
                    return Err(out_of_range("block", index, blocks.len() + 1));
                }
                let allows_song = policy.allows_song(&moment);
                blocks.insert(index, LiturgyBlock::new(moment, description, allows_song));
            }
            LiturgyEdit::RemoveBlock { index } => {
                check_block(&blocks, index)?;
                blocks.remove(index);
            }
            LiturgyEdit::MoveBlock { from, to } => {
                check_block(&blocks, from)?;
                check_block(&blocks, to)?;
                let block = blocks.remove(from);
                blocks.insert(to, block);
            }
            LiturgyEdit::SetMoment { index, moment } => {
                let block = block_mut(&mut blocks, index)?;
                block.allows_song = policy.allows_song(&moment);
                block.moment = moment;
            }
            LiturgyEdit::SetDescription { index, description } => {
                block_mut(&mut blocks, index)?.description = description;
            }
            LiturgyEdit::AddSongSlot { index } => {
                let block = block_mut(&mut blocks, index)?;
                if !block.allows_song {
                    return Err(Error::validation(format!(
                        "'{}' does not take songs",
                        block.moment
                    )));
                }
                block.songs.push(SongSlot::empty());
            }
            LiturgyEdit::RemoveSongSlot { index, slot } => {
                let block = block_mut(&mut blocks, index)?;
                check_slot(block, slot)?;
                if block.songs.len() == 1 {
                    block.songs[0] = SongSlot::empty();
                } else {
                    block.songs.remove(slot);
                }
            }
            LiturgyEdit::SetSong { index, slot, song } => {
                let block = block_mut(&mut blocks, index)?;
                if song.is_some() && !block.allows_song {
                    return Err(Error::validation(format!(
                        "'{}' does not take songs",
                        block.moment
                    )));
                }
                check_slot(block, slot)?;
                let entry = &mut block.songs[slot];
                if song.is_none() {
                    entry.key = None;
                }
                entry.song = song;
            }
            LiturgyEdit::SetKey { index, slot, key } => {
                let block = block_mut(&mut blocks, index)?;
                check_slot(block, slot)?;
                block.songs[slot].key = key;
            }
        }
        Ok(Self { service_id: self.service_id.clone(), blocks })
    }
}

fn out_of_range(what: &str, index: usize, len: usize) -> Error {
    Error::validation(format!("{what} index {index} is out of range (0..{len})"))
}

fn check_block(blocks: &[LiturgyBlock], index: usize) -> Result<()> {
    if index < blocks.len() {
        Ok(())
    } else {
        Err(out_of_range("block", index, blocks.len()))
    }
}

fn block_mut(blocks: &mut [LiturgyBlock], index: usize) -> Result<&mut LiturgyBlock> {
    let len = blocks.len();
    blocks.get_mut(index).ok_or_else(|| out_of_range("block", index, len))
}

fn check_slot(block: &LiturgyBlock, slot: usize) -> Result<()> {
    if slot < block.songs.len() {
        Ok(())
    } else {
        Err(out_of_range("song slot", slot, block.songs.len()))
    }
}
