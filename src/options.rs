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

//! Display options controlling which fields a line carries.

use std::fmt;
use std::ops::BitOr;
use std::ops::BitOrAssign;
use std::str::FromStr;

use crate::Error;

/// A set of fields that are present in parsed lines and rendered in formatted lines.
///
/// The fields appear in this order: date, time (optionally with microseconds), source
/// location, level label, message.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DisplayOptions(u32);

impl DisplayOptions {
    /// No optional field.
    pub const NONE: DisplayOptions = DisplayOptions(0);
    /// The date as `YYYY/MM/DD`.
    pub const DATE: DisplayOptions = DisplayOptions(1 << 0);
    /// The time as `HH:MM:SS`.
    pub const TIME: DisplayOptions = DisplayOptions(1 << 1);
    /// Microsecond resolution as `HH:MM:SS.ffffff`. Implies [`TIME`](Self::TIME).
    pub const MICROSECONDS: DisplayOptions = DisplayOptions(1 << 2);
    /// The full source path and line number.
    pub const LONG_FILE: DisplayOptions = DisplayOptions(1 << 3);
    /// The final path element and line number.
    pub const SHORT_FILE: DisplayOptions = DisplayOptions(1 << 4);
    /// Generate timestamps in UTC rather than the local time zone.
    pub const UTC: DisplayOptions = DisplayOptions(1 << 5);
    /// Date and time.
    pub const STANDARD: DisplayOptions = DisplayOptions(Self::DATE.0 | Self::TIME.0);

    const NAMES: [(&'static str, DisplayOptions); 6] = [
        ("date", Self::DATE),
        ("time", Self::TIME),
        ("microseconds", Self::MICROSECONDS),
        ("longfile", Self::LONG_FILE),
        ("shortfile", Self::SHORT_FILE),
        ("utc", Self::UTC),
    ];

    /// Create options from raw bits. Unknown bits are dropped.
    pub const fn from_bits(bits: u32) -> DisplayOptions {
        DisplayOptions(bits & 0b11_1111)
    }

    /// The raw bits.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// These options with every option in `other` disabled.
    pub const fn without(self, other: DisplayOptions) -> DisplayOptions {
        DisplayOptions(self.0 & !other.0)
    }

    /// Whether every option in `other` is enabled.
    pub const fn contains(self, other: DisplayOptions) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether any option in `other` is enabled.
    pub const fn intersects(self, other: DisplayOptions) -> bool {
        self.0 & other.0 != 0
    }

    pub fn has_date(self) -> bool {
        self.contains(Self::DATE)
    }

    /// Whether the time is displayed, which microsecond display implies.
    pub fn has_time(self) -> bool {
        self.intersects(Self::TIME | Self::MICROSECONDS)
    }

    pub fn has_microseconds(self) -> bool {
        self.contains(Self::MICROSECONDS)
    }

    /// Whether a source location is displayed, in either form.
    pub fn has_file(self) -> bool {
        self.intersects(Self::LONG_FILE | Self::SHORT_FILE)
    }

    pub fn has_short_file(self) -> bool {
        self.contains(Self::SHORT_FILE)
    }

    pub fn is_utc(self) -> bool {
        self.contains(Self::UTC)
    }

    /// Reject option sets enabling both the short and the long source location.
    pub fn validate(self) -> Result<DisplayOptions, Error> {
        if self.contains(Self::LONG_FILE | Self::SHORT_FILE) {
            return Err(Error::new("short and long file display are mutually exclusive")
                .with_context("options", self));
        }
        Ok(self)
    }
}

impl BitOr for DisplayOptions {
    type Output = DisplayOptions;

    fn bitor(self, rhs: DisplayOptions) -> DisplayOptions {
        DisplayOptions(self.0 | rhs.0)
    }
}

impl BitOrAssign for DisplayOptions {
    fn bitor_assign(&mut self, rhs: DisplayOptions) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for DisplayOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names = Self::NAMES
            .iter()
            .filter(|(_, option)| self.contains(*option))
            .map(|(name, _)| *name);

        match names.next() {
            None => f.write_str("none"),
            Some(first) => {
                f.write_str(first)?;
                for name in names {
                    write!(f, "|{name}")?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Debug for DisplayOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DisplayOptions({self})")
    }
}

impl FromStr for DisplayOptions {
    type Err = Error;

    /// Parse names separated by `|` or `,`, for example `date|time|shortfile`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut options = DisplayOptions::NONE;
        for name in s.split(['|', ',']).map(str::trim).filter(|s| !s.is_empty()) {
            if name.eq_ignore_ascii_case("none") {
                continue;
            }
            if name.eq_ignore_ascii_case("std") {
                options |= Self::STANDARD;
                continue;
            }
            match Self::NAMES
                .iter()
                .find(|(n, _)| name.eq_ignore_ascii_case(n))
            {
                Some((_, option)) => options |= *option,
                None => {
                    return Err(Error::new("unknown display option").with_context("option", name));
                }
            }
        }
        options.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn microseconds_imply_time() {
        let options = DisplayOptions::DATE | DisplayOptions::MICROSECONDS;
        assert!(options.has_date());
        assert!(options.has_time());
        assert!(!options.has_file());
    }

    #[test]
    fn parse_names() {
        let options: DisplayOptions = "date | time,shortfile".parse().unwrap();
        assert_eq!(
            options,
            DisplayOptions::STANDARD | DisplayOptions::SHORT_FILE
        );
        assert_eq!(options.to_string(), "date|time|shortfile");

        assert_eq!("".parse::<DisplayOptions>().unwrap(), DisplayOptions::NONE);
        assert_eq!("std".parse::<DisplayOptions>().unwrap(), DisplayOptions::STANDARD);
        assert!("date|hour".parse::<DisplayOptions>().is_err());
    }

    #[test]
    fn file_forms_are_exclusive() {
        let err = "shortfile|longfile".parse::<DisplayOptions>().unwrap_err();
        assert_eq!(
            err.message(),
            "short and long file display are mutually exclusive"
        );
        assert!(DisplayOptions::LONG_FILE.validate().is_ok());
    }
}
