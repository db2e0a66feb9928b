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

//! Feed records of the [`log`] crate through a [`Pipeline`].

use std::sync::Arc;

use jiff::Timestamp;
use jiff::Zoned;
use jiff::tz::TimeZone;

use crate::DisplayOptions;
use crate::Level;
use crate::Pipeline;
use crate::Record;
use crate::layout::TextLayout;
use crate::record::Location;
use crate::trap::DefaultTrap;
use crate::trap::Trap;

impl From<log::Level> for Level {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Self::Error,
            log::Level::Warn => Self::Warning,
            log::Level::Info => Self::Info,
            log::Level::Debug => Self::Debug,
            log::Level::Trace => Self::Trace,
        }
    }
}

/// A [`log::Log`] implementation that writes each record as a text line into a [`Pipeline`].
///
/// The line carries the fields the pipeline's options enable, always with the full source
/// path, and the pipeline's first label convention. The pipeline then parses, filters and
/// reformats it like any other line.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use logsift::DisplayOptions;
/// use logsift::LogBridge;
/// use logsift::Pipeline;
/// use logsift::append::Stdout;
///
/// let pipeline = Pipeline::builder()
///     .options(DisplayOptions::STANDARD | DisplayOptions::SHORT_FILE)
///     .append(Stdout::default())
///     .build()
///     .unwrap();
/// LogBridge::new(Arc::new(pipeline)).apply().unwrap();
///
/// log::info!("Hello info!");
/// ```
#[derive(Debug)]
pub struct LogBridge {
    pipeline: Arc<Pipeline>,
    trap: Box<dyn Trap>,
}

impl LogBridge {
    pub fn new(pipeline: Arc<Pipeline>) -> Self {
        LogBridge {
            pipeline,
            trap: Box::new(DefaultTrap::default()),
        }
    }

    /// Set the trap receiving errors from the pipeline.
    pub fn with_trap(mut self, trap: impl Trap) -> Self {
        self.trap = Box::new(trap);
        self
    }

    /// Set up the global logger with this bridge.
    ///
    /// The global maximum level is set to `Trace`, leaving the choice to the pipeline's filter.
    ///
    /// # Errors
    ///
    /// An error is returned if the global logger has already been set.
    pub fn apply(self) -> Result<(), log::SetLoggerError> {
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(log::LevelFilter::Trace);
        Ok(())
    }

    fn line(&self, record: &log::Record) -> Result<String, crate::Error> {
        let parser = self.pipeline.parser();
        let mut options = parser.options();
        if options.has_file() {
            options = options.without(DisplayOptions::SHORT_FILE) | DisplayOptions::LONG_FILE;
        }

        let now = if options.is_utc() {
            Timestamp::now().to_zoned(TimeZone::UTC).datetime()
        } else {
            Zoned::now().datetime()
        };
        let record = Record::builder()
            .timestamp(Some(now))
            .location(
                record
                    .file()
                    .map(|file| Location::new(file, record.line().unwrap_or(0))),
            )
            .level(record.level().into())
            .message(record.args().to_string())
            .build();

        let layout = match parser.labels().first() {
            Some(label) => TextLayout::with_label(label.clone()),
            None => TextLayout::colon(),
        };
        layout.render("", &record, options)
    }
}

impl log::Log for LogBridge {
    fn enabled(&self, _: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        let result = self
            .line(record)
            .and_then(|line| self.pipeline.process(line.as_bytes()));
        if let Err(err) = result {
            self.trap.trap(&err);
        }
    }

    fn flush(&self) {
        if let Err(err) = self.pipeline.flush() {
            self.trap.trap(&err);
        }
    }
}
