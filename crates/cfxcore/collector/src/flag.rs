// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use serde::Serialize;

/// Marker record for events that carry no data beyond their occurrence.
#[derive(Clone, Debug, Serialize)]
pub struct FlagRecord {
    pub op: String,
    pub flag: bool,
}

impl FlagRecord {
    pub fn new(op: &str) -> Self {
        FlagRecord { op: op.to_owned(), flag: true }
    }
}
