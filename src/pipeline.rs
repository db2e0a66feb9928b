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

//! The parse, filter and format pipeline.

use std::io;
use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::DisplayOptions;
use crate::Error;
use crate::LineParser;
use crate::Record;
use crate::append::Append;
use crate::append::Stderr;
use crate::filter::Filter;
use crate::filter::FilterSet;
use crate::label::Label;
use crate::layout::Layout;
use crate::layout::TextLayout;

/// What became of one input line.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The line was forwarded. Holds the length of the rendered line, without terminator.
    Written(usize),
    /// The filter suppressed the line. Nothing was written.
    Dropped,
}

#[derive(Debug, Clone)]
struct Settings {
    parser: LineParser,
    prefix: String,
    layout: Arc<dyn Layout>,
    filter: Arc<dyn Filter>,
}

/// Parses raw lines, filters them and writes the forwarded ones in a chosen layout.
///
/// Every call handles one line synchronously and independently. A pipeline is shared by
/// reference between threads: settings can be swapped while lines are processed, and each
/// line sees one consistent set of settings.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use logsift::DisplayOptions;
/// use logsift::Level;
/// use logsift::Outcome;
/// use logsift::Pipeline;
/// use logsift::append::Writer;
/// use logsift::filter::FilterSet;
///
/// let filters = Arc::new(FilterSet::new());
/// filters.exclude(["pkg/noisy"]).when(Level::Fatal);
///
/// let sink = Arc::new(Writer::new(Vec::new()));
/// let pipeline = Pipeline::builder()
///     .options(DisplayOptions::SHORT_FILE)
///     .filter(filters.clone())
///     .append(sink.clone())
///     .build()
///     .unwrap();
///
/// let outcome = pipeline.process(b"/src/pkg/noisy/a.go:3: Debug: chatter").unwrap();
/// assert_eq!(outcome, Outcome::Dropped);
/// let outcome = pipeline.process(b"/src/pkg/app/main.go:9: Info: started").unwrap();
/// assert_eq!(outcome, Outcome::Written(24));
///
/// sink.with_inner(|buf| assert_eq!(buf, b"main.go:9: Info: started\n"));
/// ```
#[derive(Debug)]
pub struct Pipeline {
    settings: ArcSwap<Settings>,
    append: Box<dyn Append>,
}

impl Pipeline {
    /// Create a new [`PipelineBuilder`].
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    /// Parse, filter and, if forwarded, format and write one line.
    ///
    /// One trailing line terminator is ignored. Bytes that are not UTF-8 are replaced.
    ///
    /// # Errors
    ///
    /// Errors from the layout or the sink are returned unchanged. A suppressed line is not an
    /// error but [`Outcome::Dropped`].
    pub fn process(&self, raw: &[u8]) -> Result<Outcome, Error> {
        let settings = self.settings.load();
        let text = String::from_utf8_lossy(raw);
        let record = settings.parser.parse(strip_line_ending(&text));

        if !settings.filter.enabled(&record) {
            return Ok(Outcome::Dropped);
        }

        let line = settings
            .layout
            .format(&settings.prefix, &record, settings.parser.options())?;
        self.append.append(&line)?;
        Ok(Outcome::Written(line.len()))
    }

    /// Parse one line with the current settings, without filtering or writing it.
    pub fn parse(&self, raw: &str) -> Record {
        self.settings.load().parser.parse(strip_line_ending(raw))
    }

    /// A snapshot of the current parser settings.
    pub fn parser(&self) -> LineParser {
        self.settings.load().parser.clone()
    }

    pub fn options(&self) -> DisplayOptions {
        self.settings.load().parser.options()
    }

    /// Change which fields lines are parsed and rendered with.
    ///
    /// # Errors
    ///
    /// An error is returned if `options` enable both file forms. The settings are left
    /// untouched.
    pub fn set_options(&self, options: DisplayOptions) -> Result<(), Error> {
        let options = options.validate()?;
        self.update(|settings| settings.parser = settings.parser.clone().with_options(options));
        Ok(())
    }

    /// Change the text written in front of every forwarded line.
    pub fn set_prefix(&self, prefix: impl Into<String>) {
        let prefix = prefix.into();
        self.update(|settings| settings.prefix.clone_from(&prefix));
    }

    /// Change the label conventions lines are parsed with, tried in order.
    pub fn set_labels(&self, labels: impl IntoIterator<Item = Arc<dyn Label>>) {
        let labels: Vec<_> = labels.into_iter().collect();
        self.update(|settings| {
            settings.parser = settings.parser.clone().with_labels(labels.iter().cloned())
        });
    }

    /// Change the layout forwarded lines are rendered with.
    pub fn set_layout(&self, layout: impl Layout) {
        let layout: Arc<dyn Layout> = Arc::new(layout);
        self.update(|settings| settings.layout = layout.clone());
    }

    /// Change the filter deciding which lines are forwarded.
    pub fn set_filter(&self, filter: impl Filter) {
        let filter: Arc<dyn Filter> = Arc::new(filter);
        self.update(|settings| settings.filter = filter.clone());
    }

    /// Flush the sink.
    pub fn flush(&self) -> Result<(), Error> {
        self.append.flush()
    }

    fn update(&self, f: impl Fn(&mut Settings)) {
        self.settings.rcu(|settings| {
            let mut next = Settings::clone(settings);
            f(&mut next);
            next
        });
    }
}

/// Each write is handled as one line. Suppressed lines still count as written.
impl io::Write for &Pipeline {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.process(buf).map_err(io::Error::other)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Pipeline::flush(self).map_err(io::Error::other)
    }
}

impl io::Write for Pipeline {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        (&*self).write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Pipeline::flush(self).map_err(io::Error::other)
    }
}

fn strip_line_ending(text: &str) -> &str {
    match text.strip_suffix('\n') {
        Some(line) => line.strip_suffix('\r').unwrap_or(line),
        None => text,
    }
}

/// A builder for configuring a [`Pipeline`].
///
/// Defaults: no optional fields, the `Level: message` convention for parsing and rendering,
/// a [`FilterSet`] forwarding everything, and standard error as the sink.
#[must_use = "call `build` to create the pipeline"]
#[derive(Debug)]
pub struct PipelineBuilder {
    parser: LineParser,
    prefix: String,
    layout: Arc<dyn Layout>,
    filter: Arc<dyn Filter>,
    append: Box<dyn Append>,
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        PipelineBuilder {
            parser: LineParser::default(),
            prefix: String::new(),
            layout: Arc::new(TextLayout::colon()),
            filter: Arc::new(FilterSet::new()),
            append: Box::new(Stderr::default()),
        }
    }
}

impl PipelineBuilder {
    /// Set the fields lines are parsed and rendered with.
    pub fn options(mut self, options: DisplayOptions) -> Self {
        self.parser = self.parser.with_options(options);
        self
    }

    /// Set the text written in front of every forwarded line.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Set the label conventions lines are parsed with, tried in order.
    pub fn labels(mut self, labels: impl IntoIterator<Item = Arc<dyn Label>>) -> Self {
        self.parser = self.parser.with_labels(labels);
        self
    }

    /// Set the layout forwarded lines are rendered with.
    pub fn layout(mut self, layout: impl Layout) -> Self {
        self.layout = Arc::new(layout);
        self
    }

    /// Set the filter. Pass an `Arc<FilterSet>` to keep a handle for changing rules later.
    pub fn filter(mut self, filter: impl Filter) -> Self {
        self.filter = Arc::new(filter);
        self
    }

    /// Set the sink forwarded lines are written to.
    pub fn append(mut self, append: impl Append) -> Self {
        self.append = Box::new(append);
        self
    }

    /// Build the pipeline.
    ///
    /// # Errors
    ///
    /// An error is returned if the display options enable both file forms.
    pub fn build(self) -> Result<Pipeline, Error> {
        self.parser.options().validate()?;
        Ok(Pipeline {
            settings: ArcSwap::from_pointee(Settings {
                parser: self.parser,
                prefix: self.prefix,
                layout: self.layout,
                filter: self.filter,
            }),
            append: self.append,
        })
    }
}
