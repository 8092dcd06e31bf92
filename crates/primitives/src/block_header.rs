// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use ethereum_types::{Address, H256, U256};

/// The header fields of the block currently being processed, as handed over
/// by the engine before its transactions are applied.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BlockHeader {
    /// Parent hash.
    pub parent_hash: H256,
    /// Hash of the uncle list.
    pub uncle_hash: H256,
    /// Block author (coinbase).
    pub author: Address,
    /// State root after this block.
    pub state_root: H256,
    /// Transactions root.
    pub transactions_root: H256,
    /// Receipts root.
    pub receipts_root: H256,
    /// Block difficulty.
    pub difficulty: U256,
    /// Block height.
    pub height: u64,
    /// Gas limit.
    pub gas_limit: U256,
    /// Gas used by the whole block.
    pub gas_used: U256,
    /// Block timestamp.
    pub timestamp: u64,
    /// Arbitrary extra data attached by the author.
    pub extra_data: Vec<u8>,
    /// Sealing mix digest.
    pub mix_digest: H256,
    /// Sealing nonce.
    pub nonce: u64,
}
