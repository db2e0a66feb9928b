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

//! Label conventions: how a severity level is spelled inside a line.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::Level;

pub use self::bracket::BracketLabel;
pub use self::colon::ColonLabel;

mod bracket;
mod colon;

/// A textual convention encoding the severity level of a line.
///
/// A label both recognizes its convention in parsed text and renders it when formatting.
pub trait Label: fmt::Debug + Send + Sync + 'static {
    /// Recognize a level label in `text`, the part of a line following the source location.
    ///
    /// Returns the level and the message left once the label is removed, or `None` if the
    /// text does not follow this convention.
    fn recognize<'a>(&self, text: &'a str) -> Option<(Level, Cow<'a, str>)>;

    /// Render `level` and `message` in this convention.
    ///
    /// `level` is the already rendered level name, which may carry color codes.
    fn render(&self, level: &str, message: &str, out: &mut String);
}

/// Classify `text` with the first label that recognizes it.
///
/// Text no label recognizes is kept verbatim with the [`Level::Undefined`] level.
pub(crate) fn classify<'a>(labels: &[Arc<dyn Label>], text: &'a str) -> (Level, Cow<'a, str>) {
    labels
        .iter()
        .find_map(|label| label.recognize(text))
        .unwrap_or((Level::Undefined, Cow::Borrowed(text)))
}

/// Drop a single separating space.
fn strip_separator(text: &str) -> &str {
    text.strip_prefix(' ').unwrap_or(text)
}
