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

//! Parsed log lines.

use std::fmt;

use jiff::civil;
use jiff::civil::DateTime;

use crate::Level;

/// The zero timestamp, `0001-01-01 00:00:00`.
///
/// Rendered when a timestamp field is displayed but the record carries none, and read back
/// as "no timestamp".
pub const ZERO_TIMESTAMP: DateTime = civil::date(1, 1, 1).at(0, 0, 0, 0);

/// The location token rendered when a location is displayed but the record carries none, and
/// read back as "no location".
pub const UNKNOWN_LOCATION: &str = "???:0";

/// The source location of a line: the composite `file:line` token.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Location {
    raw: String,
    file_len: usize,
    line: Option<u32>,
}

impl Location {
    /// Create a location from a file path and a line number.
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        let mut raw = file.into();
        let file_len = raw.len();
        raw.push(':');
        raw.push_str(&line.to_string());
        Location {
            raw,
            file_len,
            line: Some(line),
        }
    }

    /// Split a composite `file:line` token.
    ///
    /// The line is the integer suffix after the last `:`. A token without such a suffix is
    /// kept whole as the file.
    pub fn parse(token: impl Into<String>) -> Self {
        let raw = token.into();
        let split = raw
            .rsplit_once(':')
            .and_then(|(file, line)| line.parse::<u32>().ok().map(|line| (file.len(), line)));
        match split {
            Some((file_len, line)) => Location {
                raw,
                file_len,
                line: Some(line),
            },
            None => Location {
                file_len: raw.len(),
                raw,
                line: None,
            },
        }
    }

    /// The composite token, as matched by filter patterns.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The source file.
    pub fn file(&self) -> &str {
        &self.raw[..self.file_len]
    }

    /// The final path element of the source file.
    pub fn short_file(&self) -> &str {
        let file = self.file();
        file.rsplit_once('/').map_or(file, |(_, name)| name)
    }

    /// The line number, if the token carried one.
    pub fn line(&self) -> Option<u32> {
        self.line
    }
}

impl fmt::Debug for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.raw, f)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// The structured fields recovered from one log line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Record {
    timestamp: Option<DateTime>,
    location: Option<Location>,
    level: Level,
    message: String,
}

impl Record {
    /// Create a builder.
    pub fn builder() -> RecordBuilder {
        RecordBuilder::default()
    }

    /// The time the line was emitted, if the line carried one.
    pub fn timestamp(&self) -> Option<DateTime> {
        self.timestamp
    }

    /// The source location, if the line carried one.
    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    /// The location string filter patterns are matched against. Empty without a location.
    pub fn location_str(&self) -> &str {
        self.location.as_ref().map_or("", Location::as_str)
    }

    /// The severity level.
    pub fn level(&self) -> Level {
        self.level
    }

    /// The message body.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Builder for [`Record`].
#[derive(Debug, Default)]
pub struct RecordBuilder {
    record: Record,
}

impl RecordBuilder {
    /// Set [`timestamp`](Record::timestamp). The zero timestamp is stored as `None`.
    pub fn timestamp(mut self, timestamp: Option<DateTime>) -> Self {
        self.record.timestamp = timestamp.filter(|ts| *ts != ZERO_TIMESTAMP);
        self
    }

    /// Set [`location`](Record::location).
    pub fn location(mut self, location: Option<Location>) -> Self {
        self.record.location = location;
        self
    }

    /// Set [`level`](Record::level).
    pub fn level(mut self, level: Level) -> Self {
        self.record.level = level;
        self
    }

    /// Set [`message`](Record::message).
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.record.message = message.into();
        self
    }

    /// Invoke the builder and return a `Record`.
    pub fn build(self) -> Record {
        self.record
    }
}
