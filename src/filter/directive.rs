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

//! Filter directives, such as `warning,!pkg/x=fatal,pkg/x/y=debug`.

use std::env;
use std::str::FromStr;

use crate::Error;
use crate::Level;
use crate::filter::FilterSet;
use crate::filter::Mode;

#[derive(Debug, PartialEq, Eq)]
enum Directive {
    Default(Level),
    Rule {
        pattern: String,
        mode: Mode,
        threshold: Level,
    },
}

struct ParseResult {
    directives: Vec<Directive>,
    errors: Vec<String>,
}

/// Parse a comma separated list of directives:
///
/// * `level` sets the threshold of the catch-all rule;
/// * `pattern` or `pattern=level` includes a location pattern;
/// * `!pattern` or `!pattern=level` excludes a location pattern.
fn parse_spec(spec: &str) -> ParseResult {
    let mut result = ParseResult {
        directives: vec![],
        errors: vec![],
    };

    for item in spec.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if let Ok(level) = item.parse::<Level>() {
            result.directives.push(Directive::Default(level));
            continue;
        }

        let (mode, rest) = match item.strip_prefix('!') {
            Some(rest) => (Mode::Exclude, rest),
            None => (Mode::Include, item),
        };

        let mut parts = rest.split('=');
        let pattern = parts.next().map(str::trim).unwrap_or_default();
        let level = parts.next().map(str::trim);
        if pattern.is_empty() || parts.next().is_some() {
            result
                .errors
                .push(format!("malformed filter directive '{item}'"));
            continue;
        }

        let threshold = match level {
            None => mode.default_threshold(),
            Some(level) => match level.parse() {
                Ok(level) => level,
                Err(_) => {
                    result
                        .errors
                        .push(format!("malformed filter level '{level}'"));
                    continue;
                }
            },
        };

        result.directives.push(Directive::Rule {
            pattern: pattern.to_owned(),
            mode,
            threshold,
        });
    }

    result
}

impl FilterSet {
    /// Create a set from a directive string.
    ///
    /// ```
    /// use logsift::Level;
    /// use logsift::filter::FilterSet;
    /// use logsift::filter::Mode;
    ///
    /// let filters = FilterSet::parse("warning,!pkg/noisy=fatal,pkg/noisy/debugme=trace").unwrap();
    /// assert_eq!(filters.rule("").map(|r| r.threshold()), Some(Level::Warning));
    /// assert_eq!(filters.rule("pkg/noisy").map(|r| r.mode()), Some(Mode::Exclude));
    /// ```
    ///
    /// # Errors
    ///
    /// An error listing every malformed directive is returned.
    pub fn parse(spec: &str) -> Result<FilterSet, Error> {
        let filters = FilterSet::new();
        filters.apply(spec)?;
        Ok(filters)
    }

    /// Create a set from the directives in the environment variable `key`.
    ///
    /// An unset variable yields a set holding only the catch-all rule.
    pub fn from_env(key: &str) -> Result<FilterSet, Error> {
        match env::var(key) {
            Ok(spec) => FilterSet::parse(&spec).map_err(|err| err.with_context("env", key)),
            Err(env::VarError::NotPresent) => Ok(FilterSet::new()),
            Err(err) => Err(Error::new("failed to read filter directives")
                .with_context("env", key)
                .with_source(err)),
        }
    }

    /// Apply a directive string on top of the current rules.
    ///
    /// # Errors
    ///
    /// If any directive is malformed, nothing is applied.
    pub fn apply(&self, spec: &str) -> Result<(), Error> {
        let ParseResult { directives, errors } = parse_spec(spec);
        if !errors.is_empty() {
            return Err(Error::new("failed to parse filter directives")
                .with_context("errors", errors.join("; ")));
        }

        for directive in directives {
            match directive {
                Directive::Default(level) => self.set_default(level),
                Directive::Rule {
                    pattern,
                    mode,
                    threshold,
                } => self.upsert(pattern, mode, threshold),
            }
        }
        Ok(())
    }
}

impl FromStr for FilterSet {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterSet::parse(s)
    }
}
