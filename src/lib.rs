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

//! Logsift recovers structure from plain text log lines, decides per line whether to keep it,
//! and writes the kept lines back out in a chosen layout.
//!
//! # Overview
//!
//! A line such as
//!
//! ```text
//! 2009/01/23 01:23:23.123123 /a/b/c/d.go:23: Debug: message
//! ```
//!
//! is parsed into a [`Record`] according to the [`DisplayOptions`] that describe which fields
//! it carries. A [`FilterSet`](filter::FilterSet) of include and exclude rules, matched by
//! substring against the source location, decides whether the record is forwarded. Forwarded
//! records are rendered by a [`Layout`](layout::Layout) and written to an
//! [`Append`](append::Append) sink. A [`Pipeline`] ties these steps together, and
//! [`LogBridge`] feeds records of the `log` crate through one.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use logsift::DisplayOptions;
//! use logsift::Level;
//! use logsift::Pipeline;
//! use logsift::append::Writer;
//! use logsift::filter::FilterSet;
//!
//! let filters: Arc<FilterSet> = Arc::new("warning,github.com/d2g=debug".parse().unwrap());
//! let sink = Arc::new(Writer::new(Vec::new()));
//! let pipeline = Pipeline::builder()
//!     .options(DisplayOptions::LONG_FILE)
//!     .filter(filters.clone())
//!     .append(sink.clone())
//!     .build()
//!     .unwrap();
//!
//! let _ = pipeline.process(b"/src/app/main.go:3: Info: dropped").unwrap();
//! let _ = pipeline.process(b"/src/github.com/d2g/x.go:7: Debug: kept").unwrap();
//!
//! let out = sink.with_inner(|buf| String::from_utf8(buf.clone()).unwrap());
//! assert_eq!(out, "/src/github.com/d2g/x.go:7: Debug: kept\n");
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod append;
pub mod filter;
pub mod label;
pub mod layout;
pub mod record;
pub mod trap;

mod bridge;
mod error;
mod level;
mod options;
mod parser;
mod pipeline;

pub use self::bridge::LogBridge;
pub use self::error::Error;
pub use self::level::Level;
pub use self::level::ParseLevelError;
pub use self::options::DisplayOptions;
pub use self::parser::LineParser;
pub use self::parser::parse_line;
pub use self::pipeline::Outcome;
pub use self::pipeline::Pipeline;
pub use self::pipeline::PipelineBuilder;
pub use self::record::Record;
