// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use crate::{data_log::DataLog, event::EventKind, loader::HandlerFn};
use std::{collections::HashMap, fmt, sync::Arc};

/// A live subscription binding one module's handler to one event. Monitors
/// are constructed by the registry during registration and destroyed when
/// their module is unregistered; the dispatcher only reads them.
pub struct Monitor {
    pub module_name: String,
    pub event: EventKind,
    pub(crate) handler: HandlerFn,
    pub(crate) data_log: Arc<DataLog>,
    pub enabled: bool,
}

impl fmt::Debug for Monitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Monitor")
            .field("module_name", &self.module_name)
            .field("event", &self.event)
            .field("enabled", &self.enabled)
            .finish()
    }
}

/// Event -> monitors, in registration order. Registration order is the
/// dispatch order; a veto from an early monitor never suppresses later
/// ones.
#[derive(Debug, Default)]
pub struct RoutingTable {
    entries: HashMap<EventKind, Vec<Monitor>>,
}

impl RoutingTable {
    pub fn has_subscribers(&self, event: EventKind) -> bool {
        self.entries
            .get(&event)
            .map_or(false, |monitors| monitors.iter().any(|m| m.enabled))
    }

    pub fn monitors(&self, event: EventKind) -> Option<&[Monitor]> {
        self.entries.get(&event).map(Vec::as_slice)
    }

    pub fn subscriber_count(&self, event: EventKind) -> usize {
        self.entries.get(&event).map_or(0, Vec::len)
    }

    /// Append a module's monitors. The caller guarantees the batch is
    /// complete: either every monitor of a module is committed or none is.
    pub(crate) fn commit(&mut self, monitors: Vec<Monitor>) {
        for monitor in monitors {
            self.entries.entry(monitor.event).or_default().push(monitor);
        }
    }

    /// Remove every monitor belonging to `module_name`; returns how many
    /// were dropped.
    pub(crate) fn remove_module(&mut self, module_name: &str) -> usize {
        let mut removed = 0;
        self.entries.retain(|_, monitors| {
            let before = monitors.len();
            monitors.retain(|m| m.module_name != module_name);
            removed += before - monitors.len();
            !monitors.is_empty()
        });
        removed
    }

    pub(crate) fn clear(&mut self) { self.entries.clear(); }

    pub(crate) fn set_module_enabled(
        &mut self, module_name: &str, enabled: bool,
    ) -> usize {
        let mut changed = 0;
        for monitors in self.entries.values_mut() {
            for monitor in monitors.iter_mut() {
                if monitor.module_name == module_name {
                    monitor.enabled = enabled;
                    changed += 1;
                }
            }
        }
        changed
    }

    pub(crate) fn flush_data_logs(&self) {
        for monitors in self.entries.values() {
            for monitor in monitors {
                monitor.data_log.flush();
            }
        }
    }
}
