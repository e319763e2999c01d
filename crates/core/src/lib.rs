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

//! Hierarchy Index Core Data Types
//!
//! This crate provides the data model and configuration types shared by
//! the clustering, summarization, and hierarchy-building crates: the
//! `DocumentNode`/`HierarchyTree` tree representation, the similarity
//! kernel used to score and merge clusters, and the builder-style config
//! structs each pipeline stage validates before running.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod config;
mod error;
mod similarity;
mod types;

pub use config::{
    BuildConfig, ClusterConfig, Linkage, SummarizeConfig, TraverseConfig, TraverseStrategy,
};
pub use error::{CoreError, CoreResult};
pub use similarity::{centroid, cohesion, cosine, validate_finite};
pub use types::{
    BuildMetrics, DocumentCluster, DocumentNode, HierarchyTree, InputDocument, NodeKind,
    NodeMetadata,
};

/// Re-exports of the types most callers need, mirroring the crate root.
pub mod prelude {
    pub use crate::{
        centroid, cohesion, cosine, validate_finite, BuildConfig, BuildMetrics, ClusterConfig,
        CoreError, CoreResult, DocumentCluster, DocumentNode, HierarchyTree, InputDocument,
        Linkage, NodeKind, NodeMetadata, SummarizeConfig, TraverseConfig, TraverseStrategy,
    };
}
