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

//! Recover structured fields from rendered log lines.

use std::sync::Arc;

use jiff::civil::Date;
use jiff::civil::DateTime;
use jiff::civil::Time;

use crate::DisplayOptions;
use crate::Record;
use crate::label;
use crate::label::ColonLabel;
use crate::label::Label;
use crate::record::Location;
use crate::record::UNKNOWN_LOCATION;
use crate::record::ZERO_TIMESTAMP;

const DATE_FORMAT: &str = "%Y/%m/%d";
const TIME_FORMAT: &str = "%H:%M:%S%.f";
const DATE_TIME_FORMAT: &str = "%Y/%m/%d %H:%M:%S%.f";

/// Parses lines whose layout is described by a set of [`DisplayOptions`].
///
/// # Examples
///
/// ```
/// use logsift::DisplayOptions;
/// use logsift::Level;
/// use logsift::LineParser;
///
/// let parser = LineParser::new(DisplayOptions::SHORT_FILE);
/// let record = parser.parse("main.go:156: Trace: Message");
///
/// assert_eq!(record.location_str(), "main.go:156");
/// assert_eq!(record.level(), Level::Trace);
/// assert_eq!(record.message(), "Message");
/// ```
#[derive(Debug, Clone)]
pub struct LineParser {
    options: DisplayOptions,
    labels: Vec<Arc<dyn Label>>,
}

impl Default for LineParser {
    fn default() -> Self {
        LineParser::new(DisplayOptions::NONE)
    }
}

impl LineParser {
    /// Create a parser recognizing the `Level: message` convention.
    pub fn new(options: DisplayOptions) -> Self {
        LineParser {
            options,
            labels: vec![Arc::new(ColonLabel)],
        }
    }

    /// Replace the label conventions, tried in order.
    pub fn with_labels(mut self, labels: impl IntoIterator<Item = Arc<dyn Label>>) -> Self {
        self.labels = labels.into_iter().collect();
        self
    }

    /// Replace the display options.
    pub fn with_options(mut self, options: DisplayOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> DisplayOptions {
        self.options
    }

    pub fn labels(&self) -> &[Arc<dyn Label>] {
        &self.labels
    }

    /// Parse one line. See [`parse_line`].
    pub fn parse(&self, raw: &str) -> Record {
        parse_line(raw, self.options, &self.labels)
    }
}

/// Parse one line into a [`Record`].
///
/// Fields are consumed front to back: timestamp, source location, level label, message. Each
/// field is expected only if `options` enable it. Parsing never fails: a malformed timestamp
/// is dropped, but its text is still consumed. A line no label recognizes keeps its whole
/// remaining text as the message, with the [`Undefined`](crate::Level::Undefined) level.
pub fn parse_line(raw: &str, options: DisplayOptions, labels: &[Arc<dyn Label>]) -> Record {
    let (timestamp, rest) = parse_timestamp(raw, options);
    let (location, rest) = parse_location(rest, options);
    let (level, message) = label::classify(labels, rest);

    Record::builder()
        .timestamp(timestamp)
        .location(location)
        .level(level)
        .message(message)
        .build()
}

fn parse_timestamp(text: &str, options: DisplayOptions) -> (Option<DateTime>, &str) {
    let (date, time) = (options.has_date(), options.has_time());
    let count = match (date, time) {
        (false, false) => return (None, text),
        (true, true) => 2,
        _ => 1,
    };
    let Some((field, rest)) = split_fields(text, count) else {
        return (None, text);
    };

    let timestamp = match (date, time) {
        (true, true) => DateTime::strptime(DATE_TIME_FORMAT, field).ok(),
        (true, false) => Date::strptime(DATE_FORMAT, field)
            .ok()
            .map(|date| date.to_datetime(Time::midnight())),
        _ => Time::strptime(TIME_FORMAT, field)
            .ok()
            .map(|time| ZERO_TIMESTAMP.date().to_datetime(time)),
    };
    (timestamp, rest)
}

fn parse_location(text: &str, options: DisplayOptions) -> (Option<Location>, &str) {
    if !options.has_file() {
        return (None, text);
    }
    match text.split_once(": ") {
        Some((UNKNOWN_LOCATION, rest)) => (None, rest),
        Some((token, rest)) => (Some(Location::parse(token)), rest),
        None => (None, text),
    }
}

/// Split off the first `count` space separated fields. The last one must be followed by a
/// space.
fn split_fields(text: &str, count: usize) -> Option<(&str, &str)> {
    let (end, _) = text.match_indices(' ').nth(count - 1)?;
    Some((&text[..end], &text[end + 1..]))
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use jiff::civil::time;

    use super::*;
    use crate::Level;
    use crate::label::BracketLabel;

    #[test]
    fn message_only() {
        let record = LineParser::default().parse("Debug: Message");
        assert_eq!(
            record,
            Record::builder()
                .level(Level::Debug)
                .message("Message")
                .build()
        );
    }

    #[test]
    fn unconventional_text_is_preserved() {
        let record = LineParser::default().parse("Some arbitrary sentence.");
        assert_eq!(record.level(), Level::Undefined);
        assert_eq!(record.message(), "Some arbitrary sentence.");
        assert_eq!(record.timestamp(), None);
        assert_eq!(record.location(), None);
    }

    #[test]
    fn time_only() {
        let record = LineParser::new(DisplayOptions::TIME).parse("14:45:45 INFO: Message");
        assert_eq!(
            record.timestamp(),
            Some(date(1, 1, 1).to_datetime(time(14, 45, 45, 0)))
        );
        assert_eq!(record.level(), Level::Info);
        assert_eq!(record.message(), "Message");
    }

    #[test]
    fn time_and_short_file() {
        let parser = LineParser::new(DisplayOptions::TIME | DisplayOptions::SHORT_FILE);
        let record = parser.parse("14:45:45 main.go:156: Trace: Message");
        assert_eq!(record.timestamp().map(|ts| ts.time()), Some(time(14, 45, 45, 0)));
        assert_eq!(record.location_str(), "main.go:156");
        assert_eq!(record.location().and_then(|loc| loc.line()), Some(156));
        assert_eq!(record.level(), Level::Trace);
        assert_eq!(record.message(), "Message");
    }

    #[test]
    fn date_time_and_long_file() {
        let parser = LineParser::new(DisplayOptions::STANDARD | DisplayOptions::LONG_FILE);
        let record =
            parser.parse("2014/10/03 14:45:45 C:/Go/src/github.com/d2g/logfilter/main.go:155: Trace: Message");
        assert_eq!(record.timestamp(), Some(date(2014, 10, 3).at(14, 45, 45, 0)));
        assert_eq!(
            record.location().map(|loc| loc.file()),
            Some("C:/Go/src/github.com/d2g/logfilter/main.go")
        );
        assert_eq!(record.level(), Level::Trace);
        assert_eq!(record.message(), "Message");
    }

    #[test]
    fn microseconds_and_short_file() {
        let options =
            DisplayOptions::DATE | DisplayOptions::MICROSECONDS | DisplayOptions::SHORT_FILE;
        let record = LineParser::new(options)
            .parse("2009/01/23 01:23:23.123123 /a/b/c/d.go:23: debug: message");
        assert_eq!(
            record.timestamp(),
            Some(date(2009, 1, 23).at(1, 23, 23, 123_123_000))
        );
        assert_eq!(record.location_str(), "/a/b/c/d.go:23");
        assert_eq!(record.location().map(|loc| loc.short_file()), Some("d.go"));
        assert_eq!(record.level(), Level::Debug);
        assert_eq!(record.message(), "message");
    }

    #[test]
    fn date_only_consumes_one_field() {
        let record = LineParser::new(DisplayOptions::DATE).parse("2009/01/23 Info: Message");
        assert_eq!(record.timestamp(), Some(date(2009, 1, 23).at(0, 0, 0, 0)));
        assert_eq!(record.level(), Level::Info);
    }

    #[test]
    fn malformed_timestamp_is_consumed() {
        let record = LineParser::new(DisplayOptions::STANDARD).parse("yesterday noon Info: Message");
        assert_eq!(record.timestamp(), None);
        assert_eq!(record.level(), Level::Info);
        assert_eq!(record.message(), "Message");
    }

    #[test]
    fn unterminated_fields_are_kept() {
        let record = LineParser::new(DisplayOptions::STANDARD).parse("shutdown");
        assert_eq!(record.timestamp(), None);
        assert_eq!(record.message(), "shutdown");

        let record = LineParser::new(DisplayOptions::SHORT_FILE).parse("no location here");
        assert_eq!(record.location(), None);
        assert_eq!(record.message(), "no location here");
    }

    #[test]
    fn labels_are_tried_in_order() {
        let parser = LineParser::new(DisplayOptions::SHORT_FILE)
            .with_labels([Arc::new(BracketLabel) as Arc<dyn Label>]);

        let record = parser.parse("dummy.go:53: [Fatal] This is a Fatal message");
        assert_eq!(record.level(), Level::Fatal);
        assert_eq!(record.message(), "This is a Fatal message");

        let record = parser.parse("dummy.go:17: Fatal: not bracketed");
        assert_eq!(record.level(), Level::Undefined);
        assert_eq!(record.message(), "Fatal: not bracketed");
    }
}
