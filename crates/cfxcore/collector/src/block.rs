// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use crate::hex_bytes;
use primitives::BlockHeader;
use serde::Serialize;

/// Per-block record, assembled once before the block's transactions run.
#[derive(Clone, Debug, Serialize)]
pub struct BlockRecord {
    /// Occurrence tag: `Block<height>`.
    pub op: String,
    pub parent_hash: String,
    pub uncle_hash: String,
    pub coinbase: String,
    pub state_root: String,
    pub tx_root: String,
    pub receipt_root: String,
    pub difficulty: String,
    pub number: String,
    pub gas_limit: u64,
    pub gas_used: u64,
    pub time: u64,
    pub extra: String,
    pub mix_digest: String,
    pub nonce: u64,
}

impl BlockRecord {
    pub fn new(header: &BlockHeader) -> Self {
        BlockRecord {
            op: format!("Block{}", header.height),
            parent_hash: format!("{:#x}", header.parent_hash),
            uncle_hash: format!("{:#x}", header.uncle_hash),
            coinbase: format!("{:#x}", header.author),
            state_root: format!("{:#x}", header.state_root),
            tx_root: format!("{:#x}", header.transactions_root),
            receipt_root: format!("{:#x}", header.receipts_root),
            difficulty: header.difficulty.to_string(),
            number: header.height.to_string(),
            gas_limit: header.gas_limit.as_u64(),
            gas_used: header.gas_used.as_u64(),
            time: header.timestamp,
            extra: hex_bytes(&header.extra_data),
            mix_digest: format!("{:#x}", header.mix_digest),
            nonce: header.nonce,
        }
    }
}
