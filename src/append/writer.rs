// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fmt;
use std::io;
use std::sync::Mutex;
use std::sync::MutexGuard;

use crate::Error;
use crate::append::Append;

/// An appender that writes lines to any [`io::Write`], one line at a time.
///
/// # Examples
///
/// ```
/// use logsift::append::Append;
/// use logsift::append::Writer;
///
/// let writer = Writer::new(Vec::new());
/// writer.append(b"Info: ready").unwrap();
/// assert_eq!(writer.into_inner(), b"Info: ready\n");
/// ```
pub struct Writer<W> {
    writer: Mutex<W>,
}

impl<W> fmt::Debug for Writer<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Writer {{ ... }}")
    }
}

impl<W: io::Write> Writer<W> {
    pub fn new(writer: W) -> Self {
        Writer {
            writer: Mutex::new(writer),
        }
    }

    fn writer(&self) -> MutexGuard<'_, W> {
        // a panic while writing leaves at most a partial line behind
        self.writer.lock().unwrap_or_else(|err| err.into_inner())
    }

    /// Run `f` with the underlying writer.
    pub fn with_inner<R>(&self, f: impl FnOnce(&W) -> R) -> R {
        f(&self.writer())
    }

    /// Consume the appender, returning the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(|err| err.into_inner())
    }
}

impl<W: io::Write + Send + 'static> Append for Writer<W> {
    fn append(&self, line: &[u8]) -> Result<(), Error> {
        let mut writer = self.writer();
        writer.write_all(line).map_err(Error::write_failed)?;
        writer.write_all(b"\n").map_err(Error::write_failed)?;
        Ok(())
    }

    fn flush(&self) -> Result<(), Error> {
        self.writer().flush().map_err(Error::write_failed)
    }
}
