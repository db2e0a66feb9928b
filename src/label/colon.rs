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

/// The `Level: message` convention.
///
/// The line starts with a level name, matched exactly and case-insensitively, immediately
/// followed by `:`. Short words before a colon, or prefixes of level names, are never labels.
///
/// ```
/// use logsift::Level;
/// use logsift::label::ColonLabel;
/// use logsift::label::Label;
///
/// let (level, message) = ColonLabel.recognize("debug: message").unwrap();
/// assert_eq!(level, Level::Debug);
/// assert_eq!(message, "message");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ColonLabel;

impl Label for ColonLabel {
    fn recognize<'a>(&self, text: &'a str) -> Option<(Level, Cow<'a, str>)> {
        let (name, rest) = text.split_once(':')?;
        let level = Level::from_label(name)?;
        Some((level, Cow::Borrowed(strip_separator(rest))))
    }

    fn render(&self, level: &str, message: &str, out: &mut String) {
        out.push_str(level);
        out.push_str(": ");
        out.push_str(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recognize(text: &str) -> Option<(Level, String)> {
        ColonLabel
            .recognize(text)
            .map(|(level, message)| (level, message.into_owned()))
    }

    #[test]
    fn recognizes_every_message_level() {
        for (text, level) in [
            ("Trace: Message", Level::Trace),
            ("DEBUG: Message", Level::Debug),
            ("info: Message", Level::Info),
            ("Warning: Message", Level::Warning),
            ("Error: Message", Level::Error),
            ("Fatal: Message", Level::Fatal),
        ] {
            assert_eq!(recognize(text), Some((level, "Message".to_owned())));
        }
    }

    #[test]
    fn separator_space_is_optional() {
        assert_eq!(
            recognize("Trace:Example Message"),
            Some((Level::Trace, "Example Message".to_owned()))
        );
        assert_eq!(
            recognize("Info:  indented"),
            Some((Level::Info, " indented".to_owned()))
        );
    }

    #[test]
    fn rejects_words_that_are_not_levels() {
        assert_eq!(recognize("Note: Message"), None);
        assert_eq!(recognize("ok: done"), None);
        assert_eq!(recognize("Inf: Message"), None);
        assert_eq!(recognize("Information: Message"), None);
        assert_eq!(recognize("Off: Message"), None);
        assert_eq!(recognize(" Info: leading space"), None);
        assert_eq!(recognize("Info Message"), None);
    }

    #[test]
    fn render() {
        let mut out = String::new();
        ColonLabel.render("Warning", "low disk", &mut out);
        assert_eq!(out, "Warning: low disk");
    }
}
