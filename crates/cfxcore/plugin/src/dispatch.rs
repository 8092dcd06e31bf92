// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

//! The event bus. The engine checks [`Dispatcher::has_subscribers`] before
//! assembling a payload, brackets each transaction with `start`/`stop`, and
//! `publish`es records to every subscribed monitor in registration order.

use crate::{
    context::{ExecutionContext, SessionState},
    event::EventKind,
    loader::Decision,
    monitor::RoutingTable,
};
use cfx_collector::Payload;
use parking_lot::RwLock;
use std::{
    any::Any,
    panic::{self, AssertUnwindSafe},
    sync::Arc,
    time::{Duration, Instant},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DispatchStatus {
    /// The routing table had monitors for the event; they ran.
    Delivered,
    NoSubscribers,
    /// Publish was attempted outside the session bracket; nothing ran.
    OutOfSession,
}

/// A handler terminated abnormally; dispatch continued without it.
#[derive(Clone, Debug)]
pub struct HandlerFault {
    pub module: String,
    pub event: EventKind,
    pub detail: String,
}

/// A handler exceeded the configured time budget. Observational only: the
/// invocation already completed by the time the overrun is known.
#[derive(Clone, Debug)]
pub struct HandlerOverrun {
    pub module: String,
    pub event: EventKind,
    pub elapsed: Duration,
}

/// What one `publish` did, reported back to the engine's diagnostics.
#[derive(Debug)]
pub struct DispatchOutcome {
    pub status: DispatchStatus,
    /// Handlers that ran to completion.
    pub delivered: usize,
    /// Veto decisions returned during this publish.
    pub blocked: usize,
    pub faults: Vec<HandlerFault>,
    pub overruns: Vec<HandlerOverrun>,
}

impl DispatchOutcome {
    fn empty(status: DispatchStatus) -> Self {
        DispatchOutcome {
            status,
            delivered: 0,
            blocked: 0,
            faults: Vec::new(),
            overruns: Vec::new(),
        }
    }
}

pub struct Dispatcher {
    routing: Arc<RwLock<RoutingTable>>,
    time_budget: Option<Duration>,
}

impl Dispatcher {
    pub(crate) fn new(
        routing: Arc<RwLock<RoutingTable>>, time_budget: Option<Duration>,
    ) -> Self {
        Dispatcher {
            routing,
            time_budget,
        }
    }

    /// Cheap existence check so the engine can skip payload assembly.
    pub fn has_subscribers(&self, event: EventKind) -> bool {
        self.routing.read().has_subscribers(event)
    }

    /// Open the session bracket. Must precede the first publish for `ctx`.
    pub fn start(&self, ctx: &mut ExecutionContext) {
        if !ctx.begin_session() {
            debug_assert!(
                false,
                "session bracket opened twice for {:?}",
                ctx.correlation_id()
            );
            warn!(
                "session bracket opened twice for {:?}",
                ctx.correlation_id()
            );
        }
    }

    /// Close the session bracket and flush the module data logs. Called
    /// exactly once per transaction, also on the failure path.
    pub fn stop(&self, ctx: &mut ExecutionContext) {
        if !ctx.end_session() {
            debug_assert!(
                false,
                "session bracket closed without being open for {:?}",
                ctx.correlation_id()
            );
            warn!(
                "session bracket closed without being open for {:?}",
                ctx.correlation_id()
            );
        }
        self.routing.read().flush_data_logs();
    }

    /// Fan `payload` out to every monitor subscribed to `event`, in
    /// registration order, with no short-circuit on veto: every observer
    /// sees every occurrence exactly once. The first veto latches the
    /// revert target in `ctx`.
    pub fn publish(
        &self, event: EventKind, payload: &Payload,
        ctx: &mut ExecutionContext,
    ) -> DispatchOutcome {
        if ctx.session() != SessionState::Started {
            debug_assert!(
                false,
                "event {} published outside the session bracket",
                event
            );
            error!("event {} published outside the session bracket", event);
            return DispatchOutcome::empty(DispatchStatus::OutOfSession);
        }

        let routing = self.routing.read();
        let monitors = match routing.monitors(event) {
            Some(monitors) if !monitors.is_empty() => monitors,
            _ => return DispatchOutcome::empty(DispatchStatus::NoSubscribers),
        };

        let mut outcome = DispatchOutcome::empty(DispatchStatus::Delivered);
        for monitor in monitors {
            if !monitor.enabled {
                continue;
            }
            let begun = Instant::now();
            let invocation = panic::catch_unwind(AssertUnwindSafe(|| {
                (monitor.handler)(&*ctx, payload)
            }));
            let elapsed = begun.elapsed();
            if let Some(budget) = self.time_budget {
                if elapsed > budget {
                    warn!(
                        "handler of module {} spent {:?} on event {} \
                         (budget {:?})",
                        monitor.module_name, elapsed, event, budget
                    );
                    outcome.overruns.push(HandlerOverrun {
                        module: monitor.module_name.clone(),
                        event,
                        elapsed,
                    });
                }
            }
            match invocation {
                Ok((decision, message)) => {
                    outcome.delivered += 1;
                    if !message.is_empty() {
                        monitor.data_log.record(payload.op(), &message);
                    }
                    if decision == Decision::Block {
                        outcome.blocked += 1;
                        ctx.mark_blocking();
                        debug!(
                            "module {} blocked {} (revert target {})",
                            monitor.module_name,
                            event,
                            ctx.finalize().revert_target
                        );
                    }
                }
                // A faulting handler yields an implicit Continue; one bad
                // extension must not stall unrelated transactions.
                Err(cause) => {
                    let detail = panic_detail(cause);
                    error!(
                        "handler fault in module {} on event {}: {}",
                        monitor.module_name, event, detail
                    );
                    outcome.faults.push(HandlerFault {
                        module: monitor.module_name.clone(),
                        event,
                        detail,
                    });
                }
            }
        }
        outcome
    }
}

fn panic_detail(cause: Box<dyn Any + Send>) -> String {
    if let Some(message) = cause.downcast_ref::<&str>() {
        (*message).to_owned()
    } else if let Some(message) = cause.downcast_ref::<String>() {
        message.clone()
    } else {
        "opaque panic payload".to_owned()
    }
}
