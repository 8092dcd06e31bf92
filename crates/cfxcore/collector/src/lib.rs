// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

//! Payload assembly: pure transforms flattening engine-native execution
//! objects into the fixed-shape records delivered to event subscribers.
//! Record construction is side-effect free and is expected to be skipped
//! entirely when an event has no subscribers.

mod block;
mod flag;
mod transaction;

pub use crate::{
    block::BlockRecord,
    flag::FlagRecord,
    transaction::{CallKind, CallRecord, CreateRecord, TransactionRecord},
};

use serde::Serialize;

/// A record delivered to subscribed handlers, one variant per event family.
#[derive(Clone, Debug, Serialize)]
#[serde(untagged)]
pub enum Payload {
    Block(BlockRecord),
    Transaction(TransactionRecord),
    Flag(FlagRecord),
}

impl Payload {
    /// The occurrence tag carried by the underlying record.
    pub fn op(&self) -> &str {
        match self {
            Payload::Block(r) => &r.op,
            Payload::Transaction(r) => &r.op,
            Payload::Flag(r) => &r.op,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl From<BlockRecord> for Payload {
    fn from(r: BlockRecord) -> Self { Payload::Block(r) }
}

impl From<TransactionRecord> for Payload {
    fn from(r: TransactionRecord) -> Self { Payload::Transaction(r) }
}

impl From<FlagRecord> for Payload {
    fn from(r: FlagRecord) -> Self { Payload::Flag(r) }
}

pub(crate) fn hex_bytes(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}
