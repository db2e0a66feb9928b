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

//! Layouts for rendering records back to text.

use std::fmt;
use std::sync::Arc;

use crate::DisplayOptions;
use crate::Error;
use crate::Record;

#[cfg(feature = "colored")]
pub use self::color::LevelColor;
pub use self::custom::CustomLayout;
pub use self::text::TextLayout;

#[cfg(feature = "colored")]
mod color;
mod custom;
mod text;

/// Represents a layout for formatting records.
pub trait Layout: fmt::Debug + Send + Sync + 'static {
    /// Render `record` after `prefix`, showing the fields `options` enable.
    fn format(
        &self,
        prefix: &str,
        record: &Record,
        options: DisplayOptions,
    ) -> Result<Vec<u8>, Error>;
}

impl<T: Layout + ?Sized> Layout for Arc<T> {
    fn format(
        &self,
        prefix: &str,
        record: &Record,
        options: DisplayOptions,
    ) -> Result<Vec<u8>, Error> {
        (**self).format(prefix, record, options)
    }
}
