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

//! Error taxonomy shared by every crate in the workspace.

/// Errors surfaced by the similarity kernel and data model.
///
/// The variants correspond to the semantic categories of the error
/// taxonomy: `InvalidInput`/`DimensionMismatch` are caller-facing and
/// fatal to the current operation, `Internal` indicates an invariant
/// violation that must never occur in a correct build.
#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum CoreError {
    /// Two vectors (or a vector and the tree's fixed dimensionality)
    /// disagree in length.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Dimensionality expected by the operation.
        expected: usize,
        /// Dimensionality actually observed.
        found: usize,
    },

    /// An embedding contained a non-finite component (`NaN` or `±inf`).
    #[error("embedding contains a non-finite component")]
    NonFiniteEmbedding,

    /// A configuration value fell outside its documented range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A node id referenced by a parent/child edge does not exist.
    #[error("node not found: {0}")]
    NodeNotFound(String),

    /// A data-model invariant was violated; this is a bug, not a
    /// caller error, and must never occur in a correct implementation.
    #[error("internal invariant violated: {0}")]
    Internal(String),

    /// Cooperative cancellation was observed mid-build or mid-traversal.
    #[error("operation cancelled")]
    Cancelled,
}

/// Result type used throughout `hierarchy-core`.
pub type CoreResult<T> = Result<T, CoreError>;
