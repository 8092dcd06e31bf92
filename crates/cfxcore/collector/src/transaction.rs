// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use crate::hex_bytes;
use ethereum_types::{Address, H256, U256};
use primitives::{Action, BlockHeader, SignedTransaction};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum CallKind {
    #[serde(rename = "CALL")]
    Call,
    #[serde(rename = "CREATE")]
    Create,
}

/// Target-side details of a top-level call.
#[derive(Clone, Debug, Serialize)]
pub struct CallRecord {
    /// Code at the call target; absent when the account does not exist.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_code: Option<String>,
    pub input_data: String,
}

/// Creation-side details reported once the created account is known.
#[derive(Clone, Debug, Serialize)]
pub struct CreateRecord {
    pub contract_addr: String,
    pub deploy_code: String,
    /// Code stored at the created address; absent when nothing persisted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime_code: Option<String>,
}

/// Record describing the top-level message of a transaction, assembled
/// separately at the start and at the end of its application.
#[derive(Clone, Debug, Serialize)]
pub struct TransactionRecord {
    pub op: String,
    pub tx_hash: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nonce: Option<u64>,
    /// The top-level message is always layer 1; nested frames count up.
    pub call_layer: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_type: Option<CallKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_info: Option<CallRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_info: Option<CreateRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_used: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_success: Option<bool>,
}

impl TransactionRecord {
    fn empty(op: &str, tx_hash: &H256) -> Self {
        TransactionRecord {
            op: op.to_owned(),
            tx_hash: format!("{:#x}", tx_hash),
            block_number: None,
            block_time: None,
            from: None,
            value: None,
            gas_price: None,
            gas_limit: None,
            nonce: None,
            call_layer: 1,
            call_type: None,
            to: None,
            call_info: None,
            create_info: None,
            gas_used: None,
            is_success: None,
        }
    }

    /// Record for the start of the top-level message. `target_code` is the
    /// code found at the call target, when that account exists.
    pub fn external_start(
        op: &str, tx: &SignedTransaction, header: &BlockHeader,
        target_code: Option<&[u8]>,
    ) -> Self {
        let mut record = Self::empty(op, &tx.hash);
        record.block_number = Some(header.height.to_string());
        record.block_time = Some(header.timestamp.to_string());
        record.from = Some(format!("{:#x}", tx.sender));
        record.value = Some(tx.value.to_string());
        record.gas_price = Some(tx.gas_price.to_string());
        record.gas_limit = Some(tx.gas.as_u64());
        record.nonce = Some(tx.nonce.as_u64());

        match tx.action {
            Action::Call(target) => {
                record.call_type = Some(CallKind::Call);
                record.to = Some(format!("{:#x}", target));
                record.call_info = Some(CallRecord {
                    contract_code: target_code.map(hex_bytes),
                    input_data: hex_bytes(&tx.data),
                });
            }
            Action::Create => {
                record.call_type = Some(CallKind::Create);
            }
        }
        record
    }

    /// Record for the end of the top-level message.
    pub fn external_end(
        op: &str, tx_hash: &H256, gas_used: U256, is_success: bool,
    ) -> Self {
        let mut record = Self::empty(op, tx_hash);
        record.gas_used = Some(gas_used.as_u64());
        record.is_success = Some(is_success);
        record
    }

    /// Attach creation details once the created address is known.
    /// `runtime_code` is the code persisted at that address, if any.
    pub fn with_creation(
        mut self, contract_addr: &Address, deploy_code: &[u8],
        runtime_code: Option<&[u8]>,
    ) -> Self {
        self.call_type = Some(CallKind::Create);
        self.to = Some(format!("{:#x}", contract_addr));
        self.create_info = Some(CreateRecord {
            contract_addr: format!("{:#x}", contract_addr),
            deploy_code: hex_bytes(deploy_code),
            runtime_code: runtime_code.map(hex_bytes),
        });
        self
    }
}
