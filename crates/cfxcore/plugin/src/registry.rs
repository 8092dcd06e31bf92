// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

//! Module loading, validation and the routing table. Registration of one
//! module is atomic: every declared handler is resolved and type-bound
//! before any monitor becomes visible to dispatch, so a failing module
//! leaves no trace. Mutation happens from the engine's driver thread; the
//! dispatcher only ever takes the read side of the table lock.

use crate::{
    config::{PluginConfig, ResolutionPolicy},
    data_log::DataLog,
    descriptor::RegistrationDescriptor,
    dispatch::Dispatcher,
    error::{ErrorKind, Result},
    event::EventKind,
    loader::{ExtensionLoader, ExtensionModule, HandlerFn},
    monitor::{Monitor, RoutingTable},
};
use parking_lot::{Mutex, RwLock};
use std::{
    collections::VecDeque,
    path::{Path, PathBuf},
    sync::Arc,
};

/// Operator command, queued until the next inter-transaction safe point.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegistryRequest {
    Register(PathBuf),
    UnregisterAll,
}

struct LoadedModule {
    name: String,
    #[allow(dead_code)] // held to keep resolved handler pointers alive
    module: Box<dyn ExtensionModule>,
}

pub struct PluginRegistry {
    loader: Box<dyn ExtensionLoader>,
    config: PluginConfig,
    routing: Arc<RwLock<RoutingTable>>,
    modules: RwLock<Vec<LoadedModule>>,
    pending: Mutex<VecDeque<RegistryRequest>>,
}

impl PluginRegistry {
    pub fn new(loader: Box<dyn ExtensionLoader>, config: PluginConfig) -> Self {
        PluginRegistry {
            loader,
            config,
            routing: Arc::new(RwLock::new(RoutingTable::default())),
            modules: RwLock::new(Vec::new()),
            pending: Mutex::new(VecDeque::new()),
        }
    }

    pub fn config(&self) -> &PluginConfig { &self.config }

    /// An event bus sharing this registry's routing table.
    pub fn dispatcher(&self) -> Dispatcher {
        Dispatcher::new(self.routing.clone(), self.config.handler_time_budget)
    }

    /// Startup scan: load every module file matching the configured
    /// pattern, in sorted path order. Any error is returned to the caller,
    /// which is expected to refuse to start; under
    /// [`ResolutionPolicy::SkipModule`] a handler-resolution failure drops
    /// only the offending module. Returns how many modules registered.
    pub fn load_all(&self) -> Result<usize> {
        let pattern = self.config.module_glob();
        let walker = glob::glob(&pattern).map_err(|e| {
            ErrorKind::Load(pattern.clone(), e.to_string())
        })?;
        let mut paths: Vec<PathBuf> = Vec::new();
        for entry in walker {
            match entry {
                Ok(path) => paths.push(path),
                Err(e) => {
                    return Err(ErrorKind::Load(
                        pattern.clone(),
                        e.to_string(),
                    )
                    .into())
                }
            }
        }
        paths.sort();

        let mut registered = 0;
        for path in paths {
            match self.load_module(&path) {
                Ok(name) => {
                    info!(
                        "extension module {} registered from {}",
                        name,
                        path.display()
                    );
                    registered += 1;
                }
                Err(e) => {
                    let skippable = matches!(
                        e.kind(),
                        ErrorKind::HandlerResolution(..)
                    ) && self.config.resolution_policy
                        == ResolutionPolicy::SkipModule;
                    if !skippable {
                        return Err(e);
                    }
                    error!(
                        "skipping extension module at {}: {}",
                        path.display(),
                        e
                    );
                }
            }
        }
        Ok(registered)
    }

    /// Open one module file, decode its registration and commit it.
    pub fn load_module(&self, path: &Path) -> Result<String> {
        let module = self.loader.open(path)?;
        let bytes = module.registration_bytes()?;
        let descriptor = RegistrationDescriptor::decode(path, &bytes)?;
        self.register_module(descriptor, module)
    }

    /// Two-phase registration: resolve every declared handler first, then
    /// commit all monitors at once. A failure in the first phase leaves the
    /// routing table untouched.
    pub fn register_module(
        &self, descriptor: RegistrationDescriptor,
        module: Box<dyn ExtensionModule>,
    ) -> Result<String> {
        let name = descriptor.module_name.clone();
        if self.modules.read().iter().any(|m| m.name == name) {
            bail!(ErrorKind::DuplicateModule(name));
        }

        let mut resolved: Vec<(EventKind, HandlerFn)> =
            Vec::with_capacity(descriptor.handlers.len());
        for (event_name, symbol) in &descriptor.handlers {
            let event = event_name.parse::<EventKind>().map_err(|_| {
                ErrorKind::UnknownEvent(name.clone(), event_name.clone())
            })?;
            let handler = module.resolve_handler(symbol)?;
            resolved.push((event, handler));
        }

        let data_log =
            Arc::new(DataLog::open(&self.config.data_log_dir, &name)?);
        let monitors: Vec<Monitor> = resolved
            .into_iter()
            .map(|(event, handler)| Monitor {
                module_name: name.clone(),
                event,
                handler,
                data_log: data_log.clone(),
                enabled: true,
            })
            .collect();

        self.routing.write().commit(monitors);
        self.modules.write().push(LoadedModule {
            name: name.clone(),
            module,
        });
        debug!(
            "module {} registered with {} subscriptions",
            name,
            descriptor.handlers.len()
        );
        Ok(name)
    }

    /// Drop a module and all of its monitors. Returns whether anything was
    /// removed.
    pub fn unregister_module(&self, name: &str) -> bool {
        let removed = self.routing.write().remove_module(name);
        let mut modules = self.modules.write();
        let before = modules.len();
        modules.retain(|m| m.name != name);
        let dropped = before != modules.len();
        if dropped {
            info!("module {} unregistered ({} monitors)", name, removed);
        }
        dropped
    }

    pub fn unregister_all(&self) {
        self.routing.write().clear();
        let count = {
            let mut modules = self.modules.write();
            let count = modules.len();
            modules.clear();
            count
        };
        if count > 0 {
            info!("all {} extension modules unregistered", count);
        }
    }

    pub fn module_names(&self) -> Vec<String> {
        self.modules.read().iter().map(|m| m.name.clone()).collect()
    }

    /// Keep a module registered but skip (or resume) its dispatch.
    pub fn set_module_enabled(&self, name: &str, enabled: bool) -> usize {
        self.routing.write().set_module_enabled(name, enabled)
    }

    /// Queue an operator-triggered registration.
    pub fn request_register(&self, path: PathBuf) {
        self.pending
            .lock()
            .push_back(RegistryRequest::Register(path));
    }

    /// Queue an operator-triggered teardown of every module.
    pub fn request_unregister_all(&self) {
        self.pending.lock().push_back(RegistryRequest::UnregisterAll);
    }

    /// Drain queued operator commands. Called by the engine between
    /// transactions, never while a dispatch is in flight. Failures here are
    /// reported and dropped: the fail-fast contract binds startup loading
    /// only, a running node is not torn down by a bad runtime request.
    pub fn apply_pending(&self) {
        let drained: Vec<RegistryRequest> = {
            let mut pending = self.pending.lock();
            pending.drain(..).collect()
        };
        for request in drained {
            match request {
                RegistryRequest::Register(path) => {
                    if let Err(e) = self.load_module(&path) {
                        error!(
                            "queued registration from {} failed: {}",
                            path.display(),
                            e
                        );
                    }
                }
                RegistryRequest::UnregisterAll => self.unregister_all(),
            }
        }
    }
}
