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

//! The hierarchy builder and traverser: the level-by-level promotion
//! loop that turns a corpus of embedded documents into a `HierarchyTree`,
//! and the query-driven walk that answers retrieval requests against it.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod builder;
mod cancellation;
mod context;
mod error;
mod traverse;

pub use builder::build_hierarchy;
pub use cancellation::CancellationToken;
pub use context::{extract_sources, format_context, ContextSource};
pub use error::{BuildError, Result};
pub use traverse::{traverse, TraversalMetrics, TraversalResult};
