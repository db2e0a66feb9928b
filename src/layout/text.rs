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

use std::fmt::Write;
use std::sync::Arc;

use crate::DisplayOptions;
use crate::Error;
use crate::Level;
use crate::Record;
use crate::label::BracketLabel;
use crate::label::ColonLabel;
use crate::label::Label;
use crate::layout::Layout;
#[cfg(feature = "colored")]
use crate::layout::LevelColor;
use crate::record::UNKNOWN_LOCATION;
use crate::record::ZERO_TIMESTAMP;

/// A layout that renders records in the same text convention the parser reads.
///
/// Output format, with every field enabled and the `Level: message` convention:
///
/// ```text
/// 2009/01/23 01:23:23.123123 /a/b/c/d.go:23: Debug: message
/// ```
///
/// Lines without a recognized level are rendered without a label. A displayed field the record
/// lacks is rendered as its zero value (`0001/01/01`, `00:00:00`, `???:0`).
///
/// # Examples
///
/// ```
/// use logsift::DisplayOptions;
/// use logsift::Level;
/// use logsift::Record;
/// use logsift::layout::Layout;
/// use logsift::layout::TextLayout;
///
/// let record = Record::builder().level(Level::Info).message("ready").build();
/// let bytes = TextLayout::bracket()
///     .format("app: ", &record, DisplayOptions::NONE)
///     .unwrap();
/// assert_eq!(bytes, b"app: [Info] ready");
/// ```
#[derive(Debug, Clone)]
pub struct TextLayout {
    label: Arc<dyn Label>,
    #[cfg(feature = "colored")]
    colors: Option<LevelColor>,
}

impl Default for TextLayout {
    fn default() -> Self {
        TextLayout::colon()
    }
}

impl TextLayout {
    /// Render levels as `Level: message`.
    pub fn colon() -> Self {
        TextLayout::with_label(Arc::new(ColonLabel))
    }

    /// Render levels as `[Level] message`.
    pub fn bracket() -> Self {
        TextLayout::with_label(Arc::new(BracketLabel))
    }

    /// Render levels with the given label convention.
    pub fn with_label(label: Arc<dyn Label>) -> Self {
        TextLayout {
            label,
            #[cfg(feature = "colored")]
            colors: None,
        }
    }

    /// Color level names. The colored output no longer parses back.
    #[cfg(feature = "colored")]
    pub fn with_colors(mut self, colors: LevelColor) -> Self {
        self.colors = Some(colors);
        self
    }

    fn level_name(&self, level: Level) -> String {
        #[cfg(feature = "colored")]
        {
            if let Some(colors) = &self.colors {
                return colors.colorize_level(level).to_string();
            }
        }
        level.as_str().to_owned()
    }

    /// Render `record` to a string.
    pub fn render(
        &self,
        prefix: &str,
        record: &Record,
        options: DisplayOptions,
    ) -> Result<String, Error> {
        let mut text = String::from(prefix);

        let timestamp = record.timestamp().unwrap_or(ZERO_TIMESTAMP);
        if options.has_date() {
            write!(&mut text, "{} ", timestamp.strftime("%Y/%m/%d")).map_err(Error::render_failed)?;
        }
        if options.has_time() {
            write!(&mut text, "{}", timestamp.strftime("%H:%M:%S")).map_err(Error::render_failed)?;
            if options.has_microseconds() {
                write!(&mut text, "{}", timestamp.strftime(".%6f"))
                    .map_err(Error::render_failed)?;
            }
            text.push(' ');
        }

        if options.has_file() {
            match record.location() {
                Some(location) => {
                    if options.has_short_file() {
                        text.push_str(location.short_file());
                    } else {
                        text.push_str(location.file());
                    }
                    if let Some(line) = location.line() {
                        write!(&mut text, ":{line}").map_err(Error::render_failed)?;
                    }
                }
                None => text.push_str(UNKNOWN_LOCATION),
            }
            text.push_str(": ");
        }

        match record.level() {
            Level::Undefined => text.push_str(record.message()),
            level => self
                .label
                .render(&self.level_name(level), record.message(), &mut text),
        }

        Ok(text)
    }
}

impl Layout for TextLayout {
    fn format(
        &self,
        prefix: &str,
        record: &Record,
        options: DisplayOptions,
    ) -> Result<Vec<u8>, Error> {
        self.render(prefix, record, options).map(String::into_bytes)
    }
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;
    use jiff::civil::date;

    use super::*;
    use crate::LineParser;
    use crate::record::Location;

    fn sample() -> Record {
        Record::builder()
            .timestamp(Some(date(2009, 1, 23).at(1, 23, 23, 123_123_000)))
            .location(Some(Location::new("/a/b/c/d.go", 23)))
            .level(Level::Debug)
            .message("message")
            .build()
    }

    fn render(layout: &TextLayout, options: DisplayOptions) -> String {
        layout.render("", &sample(), options).unwrap()
    }

    #[test]
    fn every_field() {
        let options =
            DisplayOptions::DATE | DisplayOptions::MICROSECONDS | DisplayOptions::SHORT_FILE;
        assert_snapshot!(render(&TextLayout::colon(), options), @"2009/01/23 01:23:23.123123 d.go:23: Debug: message");
        assert_snapshot!(render(&TextLayout::bracket(), options), @"2009/01/23 01:23:23.123123 d.go:23: [Debug] message");

        let options = DisplayOptions::STANDARD | DisplayOptions::LONG_FILE;
        assert_snapshot!(render(&TextLayout::colon(), options), @"2009/01/23 01:23:23 /a/b/c/d.go:23: Debug: message");
    }

    #[test]
    fn no_fields() {
        assert_snapshot!(render(&TextLayout::colon(), DisplayOptions::NONE), @"Debug: message");
        assert_snapshot!(render(&TextLayout::colon(), DisplayOptions::TIME), @"01:23:23 Debug: message");
        assert_snapshot!(render(&TextLayout::colon(), DisplayOptions::DATE), @"2009/01/23 Debug: message");
    }

    #[test]
    fn prefix_comes_first() {
        let text = TextLayout::colon()
            .render("[svc] ", &sample(), DisplayOptions::TIME)
            .unwrap();
        assert_snapshot!(text, @"[svc] 01:23:23 Debug: message");
    }

    #[test]
    fn missing_fields_render_as_zero() {
        let record = Record::builder().message("Some arbitrary sentence.").build();
        let options = DisplayOptions::STANDARD | DisplayOptions::MICROSECONDS | DisplayOptions::LONG_FILE;
        let text = TextLayout::colon().render("", &record, options).unwrap();
        assert_snapshot!(text, @"0001/01/01 00:00:00.000000 ???:0: Some arbitrary sentence.");

        let parsed = LineParser::new(options).parse(&text);
        assert_eq!(parsed.timestamp(), None);
        assert_eq!(parsed.location(), None);
        assert_eq!(parsed.level(), Level::Undefined);
        assert_eq!(parsed.message(), "Some arbitrary sentence.");
    }

    #[test]
    fn parses_back() {
        let record = sample();
        for options in [
            DisplayOptions::NONE,
            DisplayOptions::DATE | DisplayOptions::MICROSECONDS | DisplayOptions::LONG_FILE,
            DisplayOptions::STANDARD | DisplayOptions::LONG_FILE,
        ] {
            let text = TextLayout::colon().render("", &record, options).unwrap();
            let parsed = LineParser::new(options).parse(&text);
            assert_eq!(parsed.level(), record.level());
            assert_eq!(parsed.message(), record.message());
            if options.has_file() {
                assert_eq!(parsed.location(), record.location());
            }
            if options.has_microseconds() {
                assert_eq!(parsed.timestamp(), record.timestamp());
            }
        }
    }

    #[test]
    fn parses_back_without_location() {
        let record = Record::builder().level(Level::Info).message("m").build();
        for options in [DisplayOptions::SHORT_FILE, DisplayOptions::LONG_FILE] {
            let text = TextLayout::colon().render("", &record, options).unwrap();
            assert_eq!(text, "???:0: Info: m");
            assert_eq!(LineParser::new(options).parse(&text), record);
        }
    }
}
