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

//! Error type for hierarchy construction and traversal.

use hierarchy_cluster::ClusterError;
use hierarchy_core::CoreError;
use hierarchy_summarize::SummarizeError;

/// Errors raised by `build` and `traverse`.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// The supplied configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The clusterer failed.
    #[error("clustering failed: {0}")]
    Cluster(#[from] ClusterError),

    /// The summarizer failed.
    #[error("summarization failed: {0}")]
    Summarize(#[from] SummarizeError),

    /// A data-model invariant was violated.
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Result type alias for build and traversal operations.
pub type Result<T> = std::result::Result<T, BuildError>;
