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

use insta::assert_snapshot;
use logsift::DisplayOptions;
use logsift::Level;
use logsift::Pipeline;
use logsift::append::Writer;
use logsift::filter::FilterSet;
use logsift::label::BracketLabel;
use logsift::label::ColonLabel;
use logsift::label::Label;
use logsift::layout::TextLayout;

const DUMMY: &str = "/go/src/github.com/d2g/logfilter/dummy/dummy.go";

struct Harness {
    pipeline: Pipeline,
    filters: Arc<FilterSet>,
    sink: Arc<Writer<Vec<u8>>>,
}

impl Harness {
    fn new(options: DisplayOptions) -> Self {
        let filters = Arc::new(FilterSet::new());
        let sink = Arc::new(Writer::new(Vec::new()));
        let pipeline = Pipeline::builder()
            .options(options)
            .filter(filters.clone())
            .append(sink.clone())
            .build()
            .unwrap();
        Harness {
            pipeline,
            filters,
            sink,
        }
    }

    fn feed(&self, lines: &[String]) {
        for line in lines {
            let _ = self.pipeline.process(line.as_bytes()).unwrap();
        }
    }

    fn output(&self) -> String {
        self.sink
            .with_inner(|buf| String::from_utf8_lossy(buf).trim_end().to_owned())
    }
}

// What the dummy package writes with long file names enabled.
fn dummy_lines() -> Vec<String> {
    [
        (49, "Fatal: This is a Fatal message"),
        (41, "Error: This is a Error message"),
        (33, "Warning: This is a Warning message"),
        (25, "Info: This is a Info message"),
        (17, "Debug: This is a Debug message"),
        (9, "Trace: This is a Trace message"),
        (57, "Some package that doesn't implement the convention."),
    ]
    .into_iter()
    .map(|(line, text)| format!("{DUMMY}:{line}: {text}"))
    .collect()
}

#[test]
fn longer_pattern_overrides_exclusion() {
    let harness = Harness::new(DisplayOptions::SHORT_FILE);
    harness
        .filters
        .exclude(["github.com/d2g/logfilter"])
        .when(Level::Fatal);
    harness
        .filters
        .include(["github.com/d2g/logfilter/dummy"])
        .when(Level::Warning);

    harness.feed(&dummy_lines());

    assert_snapshot!(harness.output(), @r"
    dummy.go:49: Fatal: This is a Fatal message
    dummy.go:41: Error: This is a Error message
    dummy.go:33: Warning: This is a Warning message
    ");
}

#[test]
fn raised_default_with_package_override() {
    let harness = Harness::new(DisplayOptions::SHORT_FILE);
    harness.filters.set_default(Level::Warning);
    harness.filters.include(["github.com/d2g/logfilter/dummy"]);
    harness
        .filters
        .include(["github.com/d2g/logfilter/dummy"])
        .when(Level::Info);

    harness.feed(&[
        "/go/src/github.com/d2g/logfilter/example_doc_test.go:34: Debug: Not Displayed".to_owned(),
        format!("{DUMMY}:17: Debug: This is a Debug message"),
        format!("{DUMMY}:25: Info: This is a Info message"),
    ]);

    assert_snapshot!(harness.output(), @"dummy.go:25: Info: This is a Info message");
}

#[test]
fn reset_forwards_everything_again() {
    let harness = Harness::new(DisplayOptions::NONE);
    harness.filters.set_default(Level::Off);
    let _ = harness.pipeline.process(b"Fatal: gone").unwrap();

    harness.filters.reset();
    let _ = harness.pipeline.process(b"Trace: back").unwrap();
    let _ = harness.pipeline.process(b"no label at all").unwrap();

    assert_snapshot!(harness.output(), @r"
    Trace: back
    no label at all
    ");
}

#[test]
fn bracket_lines_rendered_with_colons() {
    let harness = Harness::new(DisplayOptions::STANDARD | DisplayOptions::LONG_FILE);
    harness.pipeline.set_labels([
        Arc::new(BracketLabel) as Arc<dyn Label>,
        Arc::new(ColonLabel),
    ]);
    harness.pipeline.set_layout(TextLayout::colon());
    harness.filters.set_default(Level::Info);

    harness.feed(&[
        "2024/05/01 10:00:00 /srv/app/db.go:12: [Debug] connecting".to_owned(),
        "2024/05/01 10:00:01 /srv/app/db.go:14: [WARNING] slow query".to_owned(),
        "2024/05/01 10:00:02 /srv/app/main.go:40: Error: shutting down".to_owned(),
    ]);

    assert_snapshot!(harness.output(), @r"
    2024/05/01 10:00:01 /srv/app/db.go:14: Warning: slow query
    2024/05/01 10:00:02 /srv/app/main.go:40: Error: shutting down
    ");
}

#[test]
fn directives_from_text() {
    let harness = Harness::new(DisplayOptions::LONG_FILE);
    harness
        .filters
        .apply("warning,!github.com/d2g/logfilter=fatal,github.com/d2g/logfilter/dummy=warning")
        .unwrap();

    harness.feed(&dummy_lines());
    let _ = harness
        .pipeline
        .process(b"/go/src/other/pkg.go:3: Error: unrelated")
        .unwrap();

    assert_snapshot!(harness.output(), @r"
    /go/src/github.com/d2g/logfilter/dummy/dummy.go:49: Fatal: This is a Fatal message
    /go/src/github.com/d2g/logfilter/dummy/dummy.go:41: Error: This is a Error message
    /go/src/github.com/d2g/logfilter/dummy/dummy.go:33: Warning: This is a Warning message
    /go/src/other/pkg.go:3: Error: unrelated
    ");
}

// Lines rendered in the same options they are parsed with come back unchanged.
#[test]
fn rendering_reproduces_canonical_lines() {
    let options = DisplayOptions::DATE
        | DisplayOptions::MICROSECONDS
        | DisplayOptions::LONG_FILE;
    let harness = Harness::new(options);

    let lines = [
        "2009/01/23 01:23:23.123123 /a/b/c/d.go:23: Debug: message",
        "2019/12/31 23:59:59.000001 /srv/main.go:1: Fatal: out of memory",
        "2000/02/29 00:00:00.500000 /x.go:7: plain text without a level",
    ];
    for line in lines {
        let _ = harness.pipeline.process(line.as_bytes()).unwrap();
    }

    assert_eq!(harness.output(), lines.join("\n"));
}
