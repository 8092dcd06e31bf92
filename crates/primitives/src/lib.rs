// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

//! Flattened views of the execution engine's native objects, as seen at the
//! observability boundary. These types carry exactly what the payload
//! builders need; they do not participate in consensus encoding.

extern crate keccak_hash as hash;

pub mod block_header;
pub mod receipt;
pub mod transaction;

pub use crate::{
    block_header::BlockHeader,
    receipt::{
        Receipt, TRANSACTION_OUTCOME_FAILURE, TRANSACTION_OUTCOME_SUCCESS,
    },
    transaction::{contract_address, Action, SignedTransaction},
};
