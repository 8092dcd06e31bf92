#![allow(dead_code)]

// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

//! Test doubles for the loader capability plus a miniature engine driving
//! the instrumentation points in the order the real transaction applier
//! does.

use cfx_collector::{BlockRecord, FlagRecord, Payload, TransactionRecord};
use cfx_plugin::{
    Decision, Dispatcher, ErrorKind, EventKind, ExecutionContext,
    ExtensionLoader, ExtensionModule, HandlerFn, PluginConfig,
    PluginRegistry, Result,
};
use ethereum_types::{Address, H256, U256};
use primitives::{
    Action, BlockHeader, Receipt, SignedTransaction,
    TRANSACTION_OUTCOME_FAILURE, TRANSACTION_OUTCOME_SUCCESS,
};
use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

// ---------------------------------------------------------------------------
// In-memory loader

#[derive(Clone)]
pub struct StaticModule {
    pub path: PathBuf,
    pub module_name: String,
    pub registration: Vec<u8>,
    pub handlers: HashMap<String, HandlerFn>,
}

impl StaticModule {
    /// A module whose entry point returns a well-formed descriptor naming
    /// `subscriptions`, with `handlers` as its resolvable symbols.
    pub fn new(
        path: &str, module_name: &str, subscriptions: &[(&str, &str)],
        handlers: &[(&str, HandlerFn)],
    ) -> Self {
        let option: serde_json::Map<String, serde_json::Value> = subscriptions
            .iter()
            .map(|(event, symbol)| {
                ((*event).to_owned(), serde_json::json!(symbol))
            })
            .collect();
        let registration = serde_json::json!({
            "pluginname": module_name,
            "option": option,
        })
        .to_string()
        .into_bytes();
        StaticModule {
            path: PathBuf::from(path),
            module_name: module_name.to_owned(),
            registration,
            handlers: handlers
                .iter()
                .map(|(symbol, handler)| ((*symbol).to_owned(), *handler))
                .collect(),
        }
    }

    /// A module whose entry point returns arbitrary bytes.
    pub fn with_raw_registration(path: &str, registration: &[u8]) -> Self {
        StaticModule {
            path: PathBuf::from(path),
            module_name: String::new(),
            registration: registration.to_vec(),
            handlers: HashMap::new(),
        }
    }
}

impl ExtensionModule for StaticModule {
    fn path(&self) -> &Path { &self.path }

    fn registration_bytes(&self) -> Result<Vec<u8>> {
        Ok(self.registration.clone())
    }

    fn resolve_handler(&self, symbol: &str) -> Result<HandlerFn> {
        self.handlers.get(symbol).copied().ok_or_else(|| {
            ErrorKind::HandlerResolution(
                self.module_name.clone(),
                symbol.to_owned(),
                "symbol not found".to_owned(),
            )
            .into()
        })
    }
}

#[derive(Clone, Default)]
pub struct StaticLoader {
    modules: HashMap<PathBuf, StaticModule>,
}

impl StaticLoader {
    pub fn new() -> Self { Self::default() }

    pub fn with_module(mut self, module: StaticModule) -> Self {
        self.modules.insert(module.path.clone(), module);
        self
    }
}

impl ExtensionLoader for StaticLoader {
    fn open(&self, path: &Path) -> Result<Box<dyn ExtensionModule>> {
        match self.modules.get(path) {
            Some(module) => Ok(Box::new(module.clone())),
            None => Err(ErrorKind::Load(
                path.display().to_string(),
                "no such module".to_owned(),
            )
            .into()),
        }
    }
}

// ---------------------------------------------------------------------------
// Shared handler bodies

pub fn continue_silently(
    _ctx: &ExecutionContext, _payload: &Payload,
) -> (Decision, String) {
    (Decision::Continue, String::new())
}

pub fn block_silently(
    _ctx: &ExecutionContext, _payload: &Payload,
) -> (Decision, String) {
    (Decision::Block, String::new())
}

// ---------------------------------------------------------------------------
// Engine double: code-bearing state with snapshots, and the applier

/// State double: code storage with whole-state snapshots, mirroring the
/// snapshot/revert interface the engine's state database exposes.
#[derive(Default)]
pub struct MockState {
    code: HashMap<Address, Vec<u8>>,
    snapshots: Vec<HashMap<Address, Vec<u8>>>,
}

impl MockState {
    pub fn new() -> Self { Self::default() }

    pub fn snapshot(&mut self) -> usize {
        self.snapshots.push(self.code.clone());
        self.snapshots.len() - 1
    }

    pub fn revert_to_snapshot(&mut self, id: usize) {
        self.code = self.snapshots[id].clone();
        self.snapshots.truncate(id);
    }

    pub fn set_code(&mut self, address: Address, code: Vec<u8>) {
        self.code.insert(address, code);
    }

    pub fn code_at(&self, address: &Address) -> Option<&Vec<u8>> {
        self.code.get(address)
    }

    pub fn exists(&self, address: &Address) -> bool {
        self.code.contains_key(address)
    }
}

pub struct TestEngine<'a> {
    pub registry: &'a PluginRegistry,
    pub dispatcher: Dispatcher,
    pub state: MockState,
    pub header: BlockHeader,
}

impl<'a> TestEngine<'a> {
    pub fn new(registry: &'a PluginRegistry) -> Self {
        TestEngine {
            dispatcher: registry.dispatcher(),
            registry,
            state: MockState::new(),
            header: BlockHeader {
                height: 1,
                timestamp: 1_600_000_000,
                gas_limit: U256::from(8_000_000u64),
                ..Default::default()
            },
        }
    }

    /// Fire the per-block record in its own session bracket, then apply
    /// every transaction.
    pub fn process_block(
        &mut self, txs: &[SignedTransaction],
    ) -> Vec<Receipt> {
        let mut ctx = ExecutionContext::new();
        ctx.reset(H256::from_low_u64_be(self.header.height));
        self.dispatcher.start(&mut ctx);
        if self.dispatcher.has_subscribers(EventKind::BlockInfo) {
            let payload = Payload::from(BlockRecord::new(&self.header));
            self.dispatcher.publish(EventKind::BlockInfo, &payload, &mut ctx);
        }
        self.dispatcher.stop(&mut ctx);

        txs.iter().map(|tx| self.apply_transaction(tx)).collect()
    }

    /// The instrumented transaction applier: safe-point drain, session
    /// bracket, top-level frame, start/end records, veto consultation and
    /// soft revert.
    pub fn apply_transaction(&mut self, tx: &SignedTransaction) -> Receipt {
        self.registry.apply_pending();

        let mut ctx = ExecutionContext::new();
        ctx.reset(tx.hash);
        self.dispatcher.start(&mut ctx);
        ctx.note_snapshot(self.state.snapshot());

        let (target, is_create) = match tx.action {
            Action::Call(address) => (address, false),
            Action::Create => (tx.new_contract_address(), true),
        };
        ctx.enter_call(target);

        if self.dispatcher.has_subscribers(EventKind::TxStart) {
            let payload =
                Payload::from(FlagRecord::new(EventKind::TxStart.name()));
            self.dispatcher.publish(EventKind::TxStart, &payload, &mut ctx);
        }

        if self.dispatcher.has_subscribers(EventKind::ExternalInfoStart) {
            let target_code = if is_create {
                None
            } else {
                self.state.code_at(&target).map(Vec::as_slice)
            };
            let record = TransactionRecord::external_start(
                EventKind::ExternalInfoStart.name(),
                tx,
                &self.header,
                target_code,
            );
            self.dispatcher.publish(
                EventKind::ExternalInfoStart,
                &Payload::from(record),
                &mut ctx,
            );
        }

        // Message application: a creation persists its runtime code.
        let gas_used = if is_create {
            self.state.set_code(target, tx.data.clone());
            U256::from(53_000u64)
        } else {
            U256::from(21_000u64)
        };

        let decision = ctx.finalize();
        let outcome = if decision.blocking {
            self.state.revert_to_snapshot(decision.revert_target);
            TRANSACTION_OUTCOME_FAILURE
        } else {
            TRANSACTION_OUTCOME_SUCCESS
        };

        let mut receipt = Receipt::new(tx.hash, outcome, gas_used);
        if is_create {
            receipt = receipt.with_contract_address(target);
        }

        if self.dispatcher.has_subscribers(EventKind::ExternalInfoEnd) {
            let mut record = TransactionRecord::external_end(
                EventKind::ExternalInfoEnd.name(),
                &tx.hash,
                gas_used,
                outcome == TRANSACTION_OUTCOME_SUCCESS,
            );
            if is_create {
                record = record.with_creation(
                    &target,
                    &tx.data,
                    self.state.code_at(&target).map(Vec::as_slice),
                );
            }
            self.dispatcher.publish(
                EventKind::ExternalInfoEnd,
                &Payload::from(record),
                &mut ctx,
            );
        }

        ctx.exit_call();

        if self.dispatcher.has_subscribers(EventKind::TxEnd) {
            let payload =
                Payload::from(FlagRecord::new(EventKind::TxEnd.name()));
            self.dispatcher.publish(EventKind::TxEnd, &payload, &mut ctx);
        }

        self.dispatcher.stop(&mut ctx);
        receipt
    }
}

// ---------------------------------------------------------------------------
// Misc fixtures

pub fn call_transaction(seed: u8, target: Address) -> SignedTransaction {
    SignedTransaction {
        hash: H256::repeat_byte(seed),
        nonce: U256::from(seed),
        gas_price: U256::from(20u64),
        gas: U256::from(90_000u64),
        action: Action::Call(target),
        value: U256::from(1u64),
        data: vec![0xca, 0x11],
        sender: Address::repeat_byte(0xaa),
    }
}

pub fn create_transaction(seed: u8) -> SignedTransaction {
    SignedTransaction {
        hash: H256::repeat_byte(seed),
        nonce: U256::from(seed),
        gas_price: U256::from(20u64),
        gas: U256::from(900_000u64),
        action: Action::Create,
        value: U256::zero(),
        data: vec![0x60, 0x60, 0x60],
        sender: Address::repeat_byte(0xbb),
    }
}

/// A registry over a `StaticLoader`, with data logs kept inside `dir`.
pub fn registry_with(
    dir: &Path, loader: StaticLoader, config: Option<PluginConfig>,
) -> PluginRegistry {
    let config = config
        .unwrap_or_default()
        .with_plugin_dir(dir.join("plugin"))
        .with_data_log_dir(dir.join("plugin_log"));
    PluginRegistry::new(Box::new(loader), config)
}
