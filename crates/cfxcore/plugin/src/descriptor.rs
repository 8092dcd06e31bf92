// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use crate::error::{ErrorKind, Result};
use serde::Deserialize;
use std::{collections::BTreeMap, path::Path};

/// Decoded registration descriptor: the module's name and its declared
/// event subscriptions. The handler map is ordered so registration order
/// within one module is deterministic.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct RegistrationDescriptor {
    #[serde(rename = "pluginname")]
    pub module_name: String,
    /// eventName -> handler symbol name.
    #[serde(rename = "option")]
    pub handlers: BTreeMap<String, String>,
}

impl RegistrationDescriptor {
    /// Decode the bytes returned by a module's entry point.
    pub fn decode(origin: &Path, bytes: &[u8]) -> Result<Self> {
        let descriptor: RegistrationDescriptor = serde_json::from_slice(bytes)
            .map_err(|e| {
                ErrorKind::Descriptor(
                    origin.display().to_string(),
                    format!("undecodable registration: {}", e),
                )
            })?;
        if descriptor.module_name.is_empty() {
            bail!(ErrorKind::Descriptor(
                origin.display().to_string(),
                "empty pluginname".to_owned(),
            ));
        }
        Ok(descriptor)
    }
}
