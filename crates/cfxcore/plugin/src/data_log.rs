// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use parking_lot::Mutex;
use std::{
    fs::{self, File, OpenOptions},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

/// Append-only per-module telemetry sink. One log is created per registered
/// module and shared by all of its monitors; the dispatcher writes handler
/// messages here and flushes at the end of each session bracket.
pub struct DataLog {
    path: PathBuf,
    writer: Mutex<BufWriter<File>>,
}

impl DataLog {
    pub fn open(dir: &Path, module_name: &str) -> std::io::Result<DataLog> {
        fs::create_dir_all(dir)?;
        let path = dir.join(format!("{}.datalog", module_name));
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(DataLog {
            path,
            writer: Mutex::new(BufWriter::new(file)),
        })
    }

    pub fn path(&self) -> &Path { &self.path }

    /// Append one line tagged with the occurrence it belongs to. Write
    /// errors are reported but never interrupt dispatch.
    pub fn record(&self, op: &str, line: &str) {
        let mut writer = self.writer.lock();
        if let Err(e) = writeln!(writer, "[{}] {}", op, line) {
            warn!("data log write to {} failed: {}", self.path.display(), e);
        }
    }

    pub fn flush(&self) {
        let mut writer = self.writer.lock();
        if let Err(e) = writer.flush() {
            warn!("data log flush to {} failed: {}", self.path.display(), e);
        }
    }
}
