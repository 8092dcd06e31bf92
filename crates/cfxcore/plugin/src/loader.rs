// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

//! The loading capability behind the registry. Production modules are
//! shared objects opened with `libloading`; tests substitute in-memory
//! implementations of the same two traits.

use crate::{
    context::ExecutionContext,
    error::{ErrorKind, Result, ResultExt},
};
use cfx_collector::Payload;
use libloading::Library;
use std::path::{Path, PathBuf};

/// The single parameterless entry point every module must export. It
/// returns the serialized registration descriptor.
pub const REGISTER_SYMBOL: &str = "Register";

/// A handler's verdict on the event it just observed.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    Continue = 0,
    Block = 1,
}

/// Signature of the registration entry point.
pub type RegisterFn = fn() -> Vec<u8>;

/// Signature every declared handler must match. Modules are built with the
/// same toolchain as the host; conformance is a trust contract, the loader
/// can only verify symbol presence.
pub type HandlerFn = fn(&ExecutionContext, &Payload) -> (Decision, String);

/// An opened module. Owned exclusively by the registry for the rest of the
/// process lifetime, which keeps every resolved handler pointer valid.
pub trait ExtensionModule: Send + Sync {
    fn path(&self) -> &Path;

    /// Invoke the module's registration entry point.
    fn registration_bytes(&self) -> Result<Vec<u8>>;

    fn resolve_handler(&self, symbol: &str) -> Result<HandlerFn>;
}

pub trait ExtensionLoader: Send + Sync {
    fn open(&self, path: &Path) -> Result<Box<dyn ExtensionModule>>;
}

/// Loader for native shared objects.
#[derive(Clone, Copy, Debug, Default)]
pub struct DynamicLoader;

impl ExtensionLoader for DynamicLoader {
    fn open(&self, path: &Path) -> Result<Box<dyn ExtensionModule>> {
        let library = unsafe { Library::new(path) }.chain_err(|| {
            ErrorKind::Load(
                path.display().to_string(),
                "failed to open shared object".to_owned(),
            )
        })?;
        Ok(Box::new(DynamicModule {
            library,
            path: path.to_path_buf(),
        }))
    }
}

struct DynamicModule {
    library: Library,
    path: PathBuf,
}

impl ExtensionModule for DynamicModule {
    fn path(&self) -> &Path { &self.path }

    fn registration_bytes(&self) -> Result<Vec<u8>> {
        let entry = unsafe {
            self.library.get::<RegisterFn>(REGISTER_SYMBOL.as_bytes())
        }
        .map_err(|e| {
            ErrorKind::Descriptor(
                self.path.display().to_string(),
                format!("missing `{}` entry point: {}", REGISTER_SYMBOL, e),
            )
        })?;
        Ok(entry())
    }

    fn resolve_handler(&self, symbol: &str) -> Result<HandlerFn> {
        let resolved = unsafe {
            self.library.get::<HandlerFn>(symbol.as_bytes())
        }
        .map_err(|e| {
            ErrorKind::HandlerResolution(
                self.path.display().to_string(),
                symbol.to_owned(),
                e.to_string(),
            )
        })?;
        // Copying out the fn pointer is sound while `library` stays open;
        // the registry holds it until unregistration.
        Ok(*resolved)
    }
}
