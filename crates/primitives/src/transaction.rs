// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use ethereum_types::{Address, H256, U256};
use hash::keccak;
use rlp::RlpStream;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Create creates new contract.
    Create,
    /// Calls contract at given address.
    /// In the case of a transfer, this is the receiver's address.
    Call(Address),
}

impl Default for Action {
    fn default() -> Action { Action::Create }
}

/// The recovered top-level message of a transaction, as the engine presents
/// it right before application.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignedTransaction {
    /// Transaction hash; the per-transaction correlation id.
    pub hash: H256,
    /// Nonce of the sender account at signing time.
    pub nonce: U256,
    /// Gas price.
    pub gas_price: U256,
    /// Gas limit of this message.
    pub gas: U256,
    /// Call target, or contract creation.
    pub action: Action,
    /// Transferred value.
    pub value: U256,
    /// Input data (call input or contract deploy code).
    pub data: Vec<u8>,
    /// Recovered sender.
    pub sender: Address,
}

impl SignedTransaction {
    pub fn is_create(&self) -> bool { matches!(self.action, Action::Create) }

    /// The address a creation by this transaction would deploy to.
    pub fn new_contract_address(&self) -> Address {
        contract_address(&self.sender, &self.nonce)
    }
}

/// Address of the contract created by `sender` at `nonce`: the low 20 bytes
/// of the keccak of the rlp-encoded (sender, nonce) pair.
pub fn contract_address(sender: &Address, nonce: &U256) -> Address {
    let mut stream = RlpStream::new_list(2);
    stream.append(sender);
    stream.append(nonce);
    let digest = keccak(stream.out());
    Address::from_slice(&digest[12..])
}
