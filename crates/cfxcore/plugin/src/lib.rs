// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

//! Extension layer for the transaction execution engine: loadable modules
//! subscribe to named lifecycle events, receive flattened execution records
//! and may veto the observed unit of work, which the engine then soft-reverts
//! to the snapshot taken before it ran.
//!
//! The registry loads and validates modules and owns the event routing
//! table; the dispatcher fans payloads out to subscribed monitors under a
//! read lock, so registry mutation (a write lock) and dispatch exclude each
//! other. Per-transaction bookkeeping lives in [`ExecutionContext`], which
//! the engine threads through every instrumentation point; nothing here is
//! process-global. Handlers run synchronously on the engine's driver thread
//! and must not call back into the registry.

#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate log;

mod config;
mod context;
mod data_log;
mod descriptor;
mod dispatch;
mod error;
mod event;
mod loader;
mod monitor;
mod registry;

pub use crate::{
    config::{PluginConfig, ResolutionPolicy},
    context::{CallFrame, ExecutionContext, FinalDecision, SessionState},
    data_log::DataLog,
    descriptor::RegistrationDescriptor,
    dispatch::{
        DispatchOutcome, DispatchStatus, Dispatcher, HandlerFault,
        HandlerOverrun,
    },
    error::{Error, ErrorKind, Result},
    event::EventKind,
    loader::{
        Decision, DynamicLoader, ExtensionLoader, ExtensionModule, HandlerFn,
        RegisterFn, REGISTER_SYMBOL,
    },
    monitor::{Monitor, RoutingTable},
    registry::{PluginRegistry, RegistryRequest},
};
