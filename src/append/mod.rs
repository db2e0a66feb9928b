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

//! Sinks for rendered lines.

use std::fmt;
use std::sync::Arc;

use crate::Error;

pub use self::stdio::Stderr;
pub use self::stdio::Stdout;
pub use self::writer::Writer;

mod stdio;
mod writer;

/// A trait representing a sink that receives rendered lines.
pub trait Append: fmt::Debug + Send + Sync + 'static {
    /// Write one rendered line, without its line terminator.
    fn append(&self, line: &[u8]) -> Result<(), Error>;

    /// Flush any buffered lines.
    ///
    /// Default to a no-op.
    fn flush(&self) -> Result<(), Error> {
        Ok(())
    }
}

impl<T: Append + ?Sized> Append for Arc<T> {
    fn append(&self, line: &[u8]) -> Result<(), Error> {
        (**self).append(line)
    }

    fn flush(&self) -> Result<(), Error> {
        (**self).flush()
    }
}
