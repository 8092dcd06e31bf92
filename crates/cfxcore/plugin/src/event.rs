// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// The lifecycle events the engine fires. The set is closed: a registration
/// descriptor naming anything else is rejected.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
pub enum EventKind {
    /// Once per block, before its transactions.
    #[strum(serialize = "BLOCK_INFO")]
    BlockInfo,
    /// Before a transaction begins.
    #[strum(serialize = "TXSTART")]
    TxStart,
    /// After a transaction completes, success or failure.
    #[strum(serialize = "TXEND")]
    TxEnd,
    /// Before the top-level message is applied.
    #[strum(serialize = "EXTERNALINFOSTART")]
    ExternalInfoStart,
    /// After the top-level message is applied.
    #[strum(serialize = "EXTERNALINFOEND")]
    ExternalInfoEnd,
}

impl EventKind {
    pub fn name(self) -> &'static str { self.into() }
}
