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

use std::fmt::Debug;

use crate::Record;
use crate::filter::Filter;

/// A filter that you can pass the custom filter function.
///
/// The custom filter function accepts [`&Record`][Record] and returns whether the record is
/// forwarded. For example:
///
/// ```rust
/// use logsift::Level;
/// use logsift::Record;
/// use logsift::filter::CustomFilter;
///
/// let filter = CustomFilter::new(|record: &Record| {
///     record.level() >= Level::Warning || record.message().contains("audit")
/// });
/// ```
pub struct CustomFilter {
    f: Box<dyn Fn(&Record) -> bool + Send + Sync + 'static>,
}

impl Debug for CustomFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CustomFilter {{ ... }}")
    }
}

impl CustomFilter {
    pub fn new(filter: impl Fn(&Record) -> bool + Send + Sync + 'static) -> Self {
        CustomFilter {
            f: Box::new(filter),
        }
    }
}

impl Filter for CustomFilter {
    fn enabled(&self, record: &Record) -> bool {
        (self.f)(record)
    }
}
