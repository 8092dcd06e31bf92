// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

/// What to do when a module declares a handler that fails to resolve.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResolutionPolicy {
    /// Propagate the error; the host refuses to start.
    #[default]
    Fatal,
    /// Drop the whole module (registration stays atomic) and keep loading.
    SkipModule,
}

#[derive(Clone, Debug)]
pub struct PluginConfig {
    /// Directory scanned for extension module files at startup.
    pub plugin_dir: PathBuf,
    /// Glob pattern, relative to `plugin_dir`, selecting module files.
    pub module_pattern: String,
    /// Directory holding the per-module data log files.
    pub data_log_dir: PathBuf,
    /// Wall-clock budget per handler invocation. Overruns are reported,
    /// not interrupted: the call is synchronous and cannot be preempted.
    pub handler_time_budget: Option<Duration>,
    pub resolution_policy: ResolutionPolicy,
}

impl Default for PluginConfig {
    fn default() -> Self {
        PluginConfig {
            plugin_dir: PathBuf::from("plugin"),
            module_pattern: "*.so".to_owned(),
            data_log_dir: PathBuf::from("plugin_log"),
            handler_time_budget: None,
            resolution_policy: ResolutionPolicy::default(),
        }
    }
}

impl PluginConfig {
    pub fn new() -> Self { Self::default() }

    pub fn with_plugin_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.plugin_dir = dir.as_ref().to_path_buf();
        self
    }

    pub fn with_module_pattern(mut self, pattern: &str) -> Self {
        self.module_pattern = pattern.to_owned();
        self
    }

    pub fn with_data_log_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.data_log_dir = dir.as_ref().to_path_buf();
        self
    }

    pub fn with_handler_time_budget(mut self, budget: Duration) -> Self {
        self.handler_time_budget = Some(budget);
        self
    }

    pub fn with_resolution_policy(mut self, policy: ResolutionPolicy) -> Self {
        self.resolution_policy = policy;
        self
    }

    /// The full glob pattern used by the startup scan.
    pub fn module_glob(&self) -> String {
        self.plugin_dir
            .join(&self.module_pattern)
            .to_string_lossy()
            .into_owned()
    }
}
