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

//! Agglomerative hierarchical clustering of `DocumentNode`s.
//!
//! The clusterer is a pure, synchronous request/response unit: given a
//! set of nodes and a `ClusterConfig`, it returns the partition the
//! greedy best-pair merge rule settles on. It never mutates or persists
//! nodes; that is the builder's job.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod agglomerative;
mod error;

pub use agglomerative::cluster_documents;
pub use error::{ClusterError, Result};
