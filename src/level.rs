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

//! Severity levels.

use std::fmt;
use std::str::FromStr;

/// An enum representing the severity of a log line.
///
/// The ordering is fixed: `Undefined < Trace < Debug < Info < Warning < Error < Fatal < Off`.
/// It is used both to classify lines and to compare them against rule thresholds.
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash, Default)]
pub enum Level {
    /// No level could be recognized in the line.
    #[default]
    Undefined = 0,
    /// The "trace" level.
    ///
    /// Designates very low priority, often extremely verbose, information.
    Trace = 1,
    /// The "debug" level.
    ///
    /// Designates lower priority information.
    Debug = 2,
    /// The "info" level.
    ///
    /// Designates useful information.
    Info = 3,
    /// The "warning" level.
    ///
    /// Designates hazardous situations.
    Warning = 4,
    /// The "error" level.
    ///
    /// Designates very serious errors.
    Error = 5,
    /// The "fatal" level.
    Fatal = 6,
    /// A threshold above every message level. Never the level of a line.
    Off = 7,
}

impl Level {
    /// Return the string representation of the `Level`.
    ///
    /// This returns the same string as the `fmt::Display` implementation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Undefined => "Undefined",
            Level::Trace => "Trace",
            Level::Debug => "Debug",
            Level::Info => "Info",
            Level::Warning => "Warning",
            Level::Error => "Error",
            Level::Fatal => "Fatal",
            Level::Off => "Off",
        }
    }

    /// Look up the level a line label names.
    ///
    /// The match is exact and case-insensitive. Only message levels (`Trace` to `Fatal`) are
    /// recognized: `Off` and `Undefined` are never the level of a line.
    pub fn from_label(label: &str) -> Option<Level> {
        MESSAGE_LEVELS
            .into_iter()
            .find(|level| label.eq_ignore_ascii_case(level.as_str()))
    }
}

const MESSAGE_LEVELS: [Level; 6] = [
    Level::Trace,
    Level::Debug,
    Level::Info,
    Level::Warning,
    Level::Error,
    Level::Fatal,
];

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// The type returned by `from_str` when the string doesn't match any of the levels.
#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub struct ParseLevelError {}

impl fmt::Display for ParseLevelError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.write_str("malformed log level")
    }
}

impl std::error::Error for ParseLevelError {}

impl FromStr for Level {
    type Err = ParseLevelError;
    fn from_str(s: &str) -> Result<Level, Self::Err> {
        for level in [Level::Undefined, Level::Off] {
            if s.eq_ignore_ascii_case(level.as_str()) {
                return Ok(level);
            }
        }
        Level::from_label(s).ok_or(ParseLevelError {})
    }
}
