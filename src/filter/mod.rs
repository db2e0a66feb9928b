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

//! Filters deciding which records are forwarded.

use std::fmt;
use std::sync::Arc;

use crate::Record;

pub use self::custom::CustomFilter;
pub use self::set::FilterSet;
pub use self::set::Mode;
pub use self::set::Rule;
pub use self::set::Selection;

mod custom;
mod directive;
mod set;

/// Represents a filter that decides whether a record is forwarded.
pub trait Filter: fmt::Debug + Send + Sync + 'static {
    /// Whether `record` should be formatted and written.
    fn enabled(&self, record: &Record) -> bool;
}

impl<T: Filter + ?Sized> Filter for Arc<T> {
    fn enabled(&self, record: &Record) -> bool {
        (**self).enabled(record)
    }
}
