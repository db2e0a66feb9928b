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

use std::borrow::Cow;

use crate::Level;
use crate::label::Label;
use crate::label::strip_separator;

/// The `[Level] message` convention.
///
/// The contents between the first `[` and the next `]` are matched exactly and
/// case-insensitively against level names. Text before the `[` is kept at the front of the
/// message.
///
/// ```
/// use logsift::Level;
/// use logsift::label::BracketLabel;
/// use logsift::label::Label;
///
/// let (level, message) = BracketLabel.recognize("[WARNING] low disk").unwrap();
/// assert_eq!(level, Level::Warning);
/// assert_eq!(message, "low disk");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct BracketLabel;

impl Label for BracketLabel {
    fn recognize<'a>(&self, text: &'a str) -> Option<(Level, Cow<'a, str>)> {
        let open = text.find('[')?;
        let inner = &text[open + 1..];
        let close = inner.find(']')?;
        let level = Level::from_label(&inner[..close])?;

        let rest = strip_separator(&inner[close + 1..]);
        let message = if open == 0 {
            Cow::Borrowed(rest)
        } else {
            Cow::Owned(format!("{}{rest}", &text[..open]))
        };
        Some((level, message))
    }

    fn render(&self, level: &str, message: &str, out: &mut String) {
        out.push('[');
        out.push_str(level);
        out.push_str("] ");
        out.push_str(message);
    }
}
