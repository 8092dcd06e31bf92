// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

//! Per-transaction execution tracer. One context is created (or reset) for
//! each transaction and threaded by the engine through every
//! instrumentation point; it is the only carrier of cross-event state.

use ethereum_types::{Address, H256};

/// One open call frame. `depth` is the value of the depth counter at entry,
/// unique within the transaction even when an address recurs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CallFrame {
    pub address: Address,
    pub depth: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Started,
    Ended,
}

/// What the engine reads after dispatch for a transaction completes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FinalDecision {
    /// Some subscriber vetoed the unit of work.
    pub blocking: bool,
    /// Snapshot to restore when `blocking` is set; latched at the first
    /// veto and never overwritten by later ones.
    pub revert_target: usize,
}

#[derive(Debug)]
pub struct ExecutionContext {
    correlation_id: H256,
    call_stack: Vec<CallFrame>,
    all_calls: Vec<Address>,
    depth_counter: u64,
    blocking: bool,
    revert_target: usize,
    snapshot_id: usize,
    session: SessionState,
}

impl Default for ExecutionContext {
    fn default() -> Self { Self::new() }
}

impl ExecutionContext {
    pub fn new() -> Self {
        ExecutionContext {
            correlation_id: H256::zero(),
            call_stack: Vec::new(),
            all_calls: Vec::new(),
            depth_counter: 0,
            blocking: false,
            revert_target: 0,
            snapshot_id: 0,
            session: SessionState::Idle,
        }
    }

    /// Top-level transaction entry: drop all per-transaction state and bind
    /// the context to a new correlation id.
    pub fn reset(&mut self, correlation_id: H256) {
        self.correlation_id = correlation_id;
        self.call_stack.clear();
        self.all_calls.clear();
        self.depth_counter = 0;
        self.blocking = false;
        self.revert_target = 0;
        self.snapshot_id = 0;
        self.session = SessionState::Idle;
    }

    pub fn correlation_id(&self) -> H256 { self.correlation_id }

    /// Open a frame. Returns the depth assigned to this call occurrence.
    pub fn enter_call(&mut self, address: Address) -> u64 {
        self.depth_counter += 1;
        self.call_stack.push(CallFrame {
            address,
            depth: self.depth_counter,
        });
        self.all_calls.push(address);
        self.depth_counter
    }

    /// Close the innermost frame. The historical trace is never truncated.
    pub fn exit_call(&mut self) -> Option<CallFrame> {
        self.call_stack.pop()
    }

    pub fn call_stack(&self) -> &[CallFrame] { &self.call_stack }

    /// Every address visited by this transaction, in entry order.
    pub fn all_calls(&self) -> &[Address] { &self.all_calls }

    pub fn depth(&self) -> usize { self.call_stack.len() }

    /// The engine records the state snapshot taken before the observed unit
    /// of work; a veto reverts to the snapshot current at that moment.
    pub fn note_snapshot(&mut self, id: usize) { self.snapshot_id = id; }

    pub fn snapshot_id(&self) -> usize { self.snapshot_id }

    /// Latch a veto. The revert target is captured once, at the first call.
    pub(crate) fn mark_blocking(&mut self) {
        if !self.blocking {
            self.blocking = true;
            self.revert_target = self.snapshot_id;
        }
    }

    pub fn blocking(&self) -> bool { self.blocking }

    pub fn session(&self) -> SessionState { self.session }

    pub(crate) fn begin_session(&mut self) -> bool {
        if self.session == SessionState::Idle {
            self.session = SessionState::Started;
            true
        } else {
            false
        }
    }

    pub(crate) fn end_session(&mut self) -> bool {
        if self.session == SessionState::Started {
            self.session = SessionState::Ended;
            true
        } else {
            false
        }
    }

    pub fn finalize(&self) -> FinalDecision {
        FinalDecision {
            blocking: self.blocking,
            revert_target: self.revert_target,
        }
    }
}
