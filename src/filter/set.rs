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

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::Error;
use crate::Level;
use crate::Record;
use crate::filter::Filter;

/// Whether a matching rule forwards or suppresses a record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Forward records at or above the threshold.
    Include,
    /// Suppress records at or below the threshold.
    Exclude,
}

impl Mode {
    /// The threshold a rule gets when none is given: include everything, or exclude
    /// everything.
    pub fn default_threshold(self) -> Level {
        match self {
            Mode::Include => Level::Undefined,
            Mode::Exclude => Level::Off,
        }
    }
}

/// A single filter rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rule {
    pattern: String,
    mode: Mode,
    threshold: Level,
}

impl Rule {
    pub fn new(pattern: impl Into<String>, mode: Mode, threshold: Level) -> Self {
        Rule {
            pattern: pattern.into(),
            mode,
            threshold,
        }
    }

    fn catch_all() -> Self {
        Rule::new("", Mode::Include, Level::Undefined)
    }

    /// The substring matched against record locations.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn threshold(&self) -> Level {
        self.threshold
    }

    /// Whether the rule has a say on a record at `location` with `level`.
    pub fn applies(&self, location: &str, level: Level) -> bool {
        location.contains(self.pattern.as_str())
            && match self.mode {
                Mode::Include => level >= self.threshold,
                Mode::Exclude => level <= self.threshold,
            }
    }
}

/// An ordered, shared set of include and exclude rules.
///
/// Rules match a record when their pattern is a substring of the record's location and the
/// record's level passes their threshold. Among the matching rules, the one with the longest
/// pattern decides. On equal lengths the earliest registered rule wins.
///
/// The set always holds the catch-all rule with the empty pattern, which matches every
/// location. It starts out including everything.
///
/// Reads and updates may run concurrently: every update swaps in a complete new rule list,
/// and every evaluation sees one consistent list.
///
/// # Examples
///
/// ```
/// use logsift::Level;
/// use logsift::Record;
/// use logsift::filter::FilterSet;
/// use logsift::record::Location;
///
/// let filters = FilterSet::new();
/// filters.exclude(["pkg/noisy"]).when(Level::Fatal);
/// filters.include(["pkg/noisy/debugme"]).when(Level::Trace);
///
/// let record = |file: &str, level| {
///     Record::builder()
///         .location(Some(Location::new(file, 10)))
///         .level(level)
///         .build()
/// };
/// assert!(!filters.evaluate(&record("pkg/noisy/a.go", Level::Error)));
/// assert!(filters.evaluate(&record("pkg/noisy/debugme/b.go", Level::Trace)));
/// ```
#[derive(Debug)]
pub struct FilterSet {
    rules: ArcSwap<Vec<Rule>>,
}

impl Default for FilterSet {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterSet {
    /// Create a set holding only the catch-all rule.
    pub fn new() -> Self {
        FilterSet {
            rules: ArcSwap::from_pointee(vec![Rule::catch_all()]),
        }
    }

    /// Include records from locations containing any of `patterns`.
    ///
    /// Without [`Selection::when`], the rules get the [`Undefined`](Level::Undefined)
    /// threshold, including everything. The rules are written once the selection is dropped.
    pub fn include<I, S>(&self, patterns: I) -> Selection<'_>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.select(patterns, Mode::Include)
    }

    /// Exclude records from locations containing any of `patterns`.
    ///
    /// Without [`Selection::when`], the rules get the [`Off`](Level::Off) threshold, excluding
    /// everything. The rules are written once the selection is dropped.
    pub fn exclude<I, S>(&self, patterns: I) -> Selection<'_>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.select(patterns, Mode::Exclude)
    }

    fn select<I, S>(&self, patterns: I, mode: Mode) -> Selection<'_>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Selection {
            filters: self,
            patterns: patterns.into_iter().map(Into::into).collect(),
            mode,
            threshold: mode.default_threshold(),
        }
    }

    /// Insert a rule, or update the rule with the same pattern in place.
    pub fn upsert(&self, pattern: impl Into<String>, mode: Mode, threshold: Level) {
        self.upsert_all(&[pattern.into()], mode, threshold);
    }

    fn upsert_all(&self, patterns: &[String], mode: Mode, threshold: Level) {
        self.update(|rules| {
            for pattern in patterns {
                match rules.iter_mut().find(|rule| rule.pattern == *pattern) {
                    Some(rule) => {
                        rule.mode = mode;
                        rule.threshold = threshold;
                    }
                    None => rules.push(Rule::new(pattern.clone(), mode, threshold)),
                }
            }
        });
    }

    /// Set the threshold of the catch-all rule.
    pub fn set_default(&self, threshold: Level) {
        self.update(|rules| {
            match rules.iter_mut().find(|rule| rule.pattern.is_empty()) {
                Some(rule) => rule.threshold = threshold,
                None => rules.insert(0, Rule::new("", Mode::Include, threshold)),
            }
        });
    }

    /// Set the threshold of an existing rule.
    ///
    /// # Errors
    ///
    /// An error is returned if no rule is registered for `pattern`. The set is left untouched.
    pub fn set_threshold(&self, pattern: &str, threshold: Level) -> Result<(), Error> {
        let mut found = false;
        self.update(|rules| {
            found = false;
            if let Some(rule) = rules.iter_mut().find(|rule| rule.pattern == pattern) {
                rule.threshold = threshold;
                found = true;
            }
        });

        if found {
            Ok(())
        } else {
            Err(Error::new("no filter rule registered for pattern").with_context("pattern", pattern))
        }
    }

    /// Drop every rule but the catch-all one, which includes everything again.
    pub fn reset(&self) {
        self.rules.store(Arc::new(vec![Rule::catch_all()]));
    }

    /// A snapshot of the rules in registration order.
    pub fn rules(&self) -> Vec<Rule> {
        self.rules.load().as_ref().clone()
    }

    /// The rule registered for `pattern`.
    pub fn rule(&self, pattern: &str) -> Option<Rule> {
        self.rules
            .load()
            .iter()
            .find(|rule| rule.pattern == pattern)
            .cloned()
    }

    /// Whether `record` should be forwarded.
    pub fn evaluate(&self, record: &Record) -> bool {
        let rules = self.rules.load();
        let location = record.location_str();
        let level = record.level();

        let mut selected: Option<&Rule> = None;
        for rule in rules.iter() {
            let longer = selected.is_none_or(|s| rule.pattern.len() > s.pattern.len());
            if longer && rule.applies(location, level) {
                selected = Some(rule);
            }
        }

        // the catch-all rule matches every location, so this is only reached when its own
        // threshold rejects the record
        selected.is_some_and(|rule| rule.mode == Mode::Include)
    }

    fn update(&self, mut f: impl FnMut(&mut Vec<Rule>)) {
        self.rules.rcu(|rules| {
            let mut next = Vec::clone(rules);
            f(&mut next);
            next
        });
    }
}

impl Filter for FilterSet {
    fn enabled(&self, record: &Record) -> bool {
        self.evaluate(record)
    }
}

/// The rules selected by one [`FilterSet::include`] or [`FilterSet::exclude`] call.
///
/// All selected rules are written in a single update when the selection is dropped, so readers
/// never see them with a threshold other than the final one.
#[derive(Debug)]
pub struct Selection<'a> {
    filters: &'a FilterSet,
    patterns: Vec<String>,
    mode: Mode,
    threshold: Level,
}

impl Selection<'_> {
    /// Set the threshold of every selected rule.
    ///
    /// Include rules forward records at or above `threshold`. Exclude rules suppress records
    /// at or below it. Selecting no pattern makes this a no-op.
    pub fn when(mut self, threshold: Level) {
        self.threshold = threshold;
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

impl Drop for Selection<'_> {
    fn drop(&mut self) {
        if self.patterns.is_empty() {
            return;
        }
        self.filters.upsert_all(&self.patterns, self.mode, self.threshold);
    }
}
