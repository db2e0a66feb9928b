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

use std::fmt;
use std::io;

/// The error type of this crate.
///
/// Line parsing never fails. Errors only come from misused configuration and from the sink
/// a [`Pipeline`](crate::Pipeline) writes to.
///
/// An error carries a message, `key: value` context pairs naming what was involved, and the
/// underlying errors that caused it.
pub struct Error {
    message: String,
    context: Vec<(&'static str, String)>,
    sources: Vec<anyhow::Error>,
}

impl Error {
    pub fn new(message: impl Into<String>) -> Self {
        Error {
            message: message.into(),
            context: Vec::new(),
            sources: Vec::new(),
        }
    }

    /// Attach a `key: value` pair, such as the offending pattern or option.
    pub fn with_context(mut self, key: &'static str, value: impl ToString) -> Self {
        self.context.push((key, value.to_string()));
        self
    }

    /// Attach an underlying cause.
    pub fn with_source(mut self, src: impl Into<anyhow::Error>) -> Self {
        self.sources.push(src.into());
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The first context value attached under `key`.
    pub fn context(&self, key: &str) -> Option<&str> {
        self.context
            .iter()
            .find_map(|(k, v)| (*k == key).then_some(v.as_str()))
    }

    pub fn sources(&self) -> impl ExactSizeIterator<Item = &(dyn std::error::Error + 'static)> {
        self.sources.iter().map(|src| src.as_ref())
    }

    /// A sink failed to take a line.
    pub fn write_failed(err: io::Error) -> Error {
        Error::new("failed to write line").with_source(err)
    }

    /// A layout failed to render a record.
    pub fn render_failed(err: fmt::Error) -> Error {
        Error::new("failed to render line").with_source(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;

        for (i, (key, value)) in self.context.iter().enumerate() {
            let open = if i == 0 { ", context: { " } else { ", " };
            write!(f, "{open}{key}: {value}")?;
        }
        if !self.context.is_empty() {
            f.write_str(" }")?;
        }

        for (i, source) in self.sources.iter().enumerate() {
            let open = if i == 0 { ", sources: [" } else { ", " };
            write!(f, "{open}{source}")?;
        }
        if !self.sources.is_empty() {
            f.write_str("]")?;
        }

        Ok(())
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            return f
                .debug_struct("Error")
                .field("message", &self.message)
                .field("context", &self.context)
                .field("sources", &self.sources)
                .finish();
        }

        writeln!(f, "{}", self.message)?;
        if !self.context.is_empty() {
            writeln!(f, "\nContext:")?;
            for (key, value) in &self.context {
                writeln!(f, "   {key}: {value}")?;
            }
        }
        if !self.sources.is_empty() {
            writeln!(f, "\nSources:")?;
            for source in &self.sources {
                writeln!(f, "   {source:#}")?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.sources.first().map(|src| src.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;

    use super::*;

    #[test]
    fn display_with_context_and_sources() {
        let err = Error::new("failed to parse filter directives")
            .with_context("env", "LOGSIFT")
            .with_context("errors", "malformed filter level 'loud'")
            .with_source(io::Error::other("broken pipe"));

        assert_snapshot!(err.to_string(), @"failed to parse filter directives, context: { env: LOGSIFT, errors: malformed filter level 'loud' }, sources: [broken pipe]");
        assert_eq!(err.context("env"), Some("LOGSIFT"));
        assert_eq!(err.context("pattern"), None);
        assert_eq!(err.sources().len(), 1);
    }

    #[test]
    fn display_message_only() {
        assert_eq!(Error::new("sink closed").to_string(), "sink closed");
    }

    #[test]
    fn debug_lists_context() {
        let err = Error::write_failed(io::Error::other("disk full")).with_context("sink", "file");
        assert_snapshot!(format!("{err:?}").trim_end(), @r"
        failed to write line

        Context:
           sink: file

        Sources:
           disk full
        ");
    }
}
