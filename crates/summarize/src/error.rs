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

//! Error type for the summarizer.

use hierarchy_core::CoreError;

/// Errors raised by `summarize`.
#[derive(Debug, thiserror::Error)]
pub enum SummarizeError {
    /// The supplied configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The abstractive backend raised an error. Callers should treat
    /// this as non-fatal and fall back to extractive summarization;
    /// `summarize_cluster` never returns this variant itself.
    #[error("abstractive backend failed: {0}")]
    BackendFailed(String),

    /// A data-model invariant was violated.
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Result type alias for summarization operations.
pub type Result<T> = std::result::Result<T, SummarizeError>;
