// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use ethereum_types::{Address, H256, U256};

pub const TRANSACTION_OUTCOME_SUCCESS: u8 = 0;
pub const TRANSACTION_OUTCOME_FAILURE: u8 = 1; // gas charged, effects discarded

/// Information describing execution of a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    /// Hash of the transaction this receipt belongs to.
    pub transaction_hash: H256,
    /// The gas used by this transaction alone.
    pub gas_used: U256,
    /// Transaction outcome.
    pub outcome_status: u8,
    /// Address of the created contract, for creation transactions.
    pub contract_address: Option<Address>,
}

impl Receipt {
    pub fn new(transaction_hash: H256, outcome: u8, gas_used: U256) -> Self {
        Self {
            transaction_hash,
            gas_used,
            outcome_status: outcome,
            contract_address: None,
        }
    }

    pub fn with_contract_address(mut self, address: Address) -> Self {
        self.contract_address = Some(address);
        self
    }

    pub fn is_success(&self) -> bool {
        self.outcome_status == TRANSACTION_OUTCOME_SUCCESS
    }
}
