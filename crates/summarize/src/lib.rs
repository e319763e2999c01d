// Copyright 2026 Hierarchy Index Team
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

//! Condensation of a cluster's children into a representative text plus
//! keywords: an extractive TF-IDF default, and an optional pluggable
//! abstractive backend that falls back to extractive on absence or
//! failure.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod backend;
mod error;
mod extractive;
mod summarizer;

pub use backend::AbstractiveBackend;
pub use error::{Result, SummarizeError};
pub use extractive::{extract_keywords, extractive_summary, word_count};
pub use summarizer::{summarize_cluster, SummarizeResult, SummaryMethod};
