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

//! The data model shared by every stage of the pipeline: input documents,
//! the tree's `DocumentNode`, the ephemeral `DocumentCluster` produced by
//! clustering and consumed by summarization, and the `HierarchyTree`
//! container itself.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

/// A document as handed to the builder by the (external) embedding
/// pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InputDocument {
    /// Stable external identifier.
    pub id: String,
    /// Document text, opaque except to the extractive summarizer's
    /// sentence splitter and tokenizer.
    pub content: String,
    /// Embedding vector of the tree's fixed dimensionality `D`.
    pub embedding: Vec<f32>,
    /// Optional pre-extracted keywords.
    pub keywords: Vec<String>,
    /// Optional course week, used to compute a node's `week_range`.
    pub week: Option<i64>,
}

impl InputDocument {
    /// Create a new input document with no keywords or week.
    pub fn new(id: impl Into<String>, content: impl Into<String>, embedding: Vec<f32>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            embedding,
            keywords: Vec::new(),
            week: None,
        }
    }

    /// Attach keywords.
    pub fn with_keywords(mut self, keywords: Vec<String>) -> Self {
        self.keywords = keywords;
        self
    }

    /// Attach a week number.
    pub fn with_week(mut self, week: i64) -> Self {
        self.week = Some(week);
        self
    }
}

/// Whether a node is an original document or a summary of a cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// A leaf node wrapping one original document.
    Leaf,
    /// An internal node summarizing a cluster of children.
    Internal,
}

impl NodeKind {
    /// `true` for `Internal`.
    #[inline]
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }

    /// `true` for `Leaf`.
    #[inline]
    pub const fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf)
    }
}

/// Metadata attached to every `DocumentNode`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NodeMetadata {
    /// Number of members in the cluster this node summarizes (1 for leaves).
    pub cluster_size: usize,
    /// Average pairwise cosine similarity of the cluster's members.
    pub avg_similarity: f32,
    /// Up to 5 representative keywords.
    pub top_keywords: Vec<String>,
    /// `(min_week, max_week)` over any descendant that carries a week,
    /// absent if none do.
    pub week_range: Option<(i64, i64)>,
}

impl NodeMetadata {
    /// Metadata for a freshly created leaf.
    pub fn for_leaf(keywords: Vec<String>, week: Option<i64>) -> Self {
        Self {
            cluster_size: 1,
            avg_similarity: 1.0,
            top_keywords: keywords,
            week_range: week.map(|w| (w, w)),
        }
    }

    /// Merge this node's week range with a child's, widening as needed.
    pub fn merge_week_range(a: Option<(i64, i64)>, b: Option<(i64, i64)>) -> Option<(i64, i64)> {
        match (a, b) {
            (None, None) => None,
            (Some(r), None) | (None, Some(r)) => Some(r),
            (Some((a_min, a_max)), Some((b_min, b_max))) => {
                Some((a_min.min(b_min), a_max.max(b_max)))
            }
        }
    }
}

/// A node in the hierarchy tree: either a leaf wrapping an original
/// document, or an internal node summarizing a cluster of children.
///
/// See the owning `HierarchyTree`'s invariants for the full list this
/// type must uphold once placed in a tree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentNode {
    /// Unique id within the owning tree.
    pub id: String,
    /// Leaf or internal.
    pub kind: NodeKind,
    /// `0` for leaves; `max(child.level) + 1` for internal nodes.
    pub level: usize,
    /// Original document text (leaf) or cluster summary (internal).
    pub content: String,
    /// Leaf: the externally provided embedding. Internal: the centroid
    /// of the cluster's member embeddings.
    pub embedding: Vec<f32>,
    /// External leaf document ids covered by this node's subtree.
    pub material_ids: HashSet<String>,
    /// Parent id, or `None` for a root.
    pub parent_id: Option<String>,
    /// Ordered child ids; empty iff `kind == Leaf`.
    pub child_ids: Vec<String>,
    /// Node metadata (cluster size, similarity, keywords, week range).
    pub metadata: NodeMetadata,
}

impl DocumentNode {
    /// Construct a leaf node from an input document.
    pub fn leaf(id: String, doc: &InputDocument) -> Self {
        Self {
            id,
            kind: NodeKind::Leaf,
            level: 0,
            content: doc.content.clone(),
            embedding: doc.embedding.clone(),
            material_ids: HashSet::from([doc.id.clone()]),
            parent_id: None,
            child_ids: Vec::new(),
            metadata: NodeMetadata::for_leaf(doc.keywords.clone(), doc.week),
        }
    }

    /// `true` if this node has no parent.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// An ephemeral grouping of nodes produced by the clusterer and consumed
/// by the summarizer. Never persisted in a `HierarchyTree`.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentCluster {
    /// Member nodes, in the clusterer's deterministic iteration order.
    pub members: Vec<DocumentNode>,
    /// Arithmetic mean of member embeddings.
    pub centroid: Vec<f32>,
    /// Average pairwise cosine similarity of members (`1.0` for singletons).
    pub cohesion: f32,
}

impl DocumentCluster {
    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// `true` if the cluster has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Union of all members' `material_ids`.
    pub fn material_ids(&self) -> HashSet<String> {
        let mut ids = HashSet::new();
        for member in &self.members {
            ids.extend(member.material_ids.iter().cloned());
        }
        ids
    }
}

/// Aggregate metrics recorded during a `build_hierarchy` call.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BuildMetrics {
    /// Wall-clock time spent inside the clusterer, in milliseconds.
    pub cluster_time_ms: u64,
    /// Wall-clock time spent inside the summarizer, in milliseconds.
    pub summarize_time_ms: u64,
    /// Number of promotion passes executed.
    pub promotion_passes: usize,
    /// Number of summaries produced.
    pub summaries_produced: usize,
    /// Average cluster size over all clusters produced.
    pub avg_cluster_size: f32,
    /// Average cohesion over all clusters produced.
    pub avg_cohesion: f32,
}

/// The built tree: an immutable forest over a single corpus.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HierarchyTree {
    /// Opaque tree id.
    pub id: String,
    /// Corpus identifier this tree was built from.
    pub corpus_id: String,
    /// All nodes, keyed by id.
    pub nodes: HashMap<String, DocumentNode>,
    /// Ids of nodes with `parent_id = None`.
    pub root_ids: Vec<String>,
    /// Longest root-to-descendant path, in edges.
    pub max_depth: usize,
    /// Number of leaf nodes.
    pub leaf_count: usize,
    /// Number of internal nodes.
    pub internal_count: usize,
    /// Construction timestamp.
    pub built_at: chrono::DateTime<chrono::Utc>,
    /// Construction metrics.
    pub metrics: BuildMetrics,
    /// `true` if the build was aborted by cooperative cancellation; the
    /// tree, if present, reflects only the passes completed so far.
    pub incomplete: bool,
}

impl HierarchyTree {
    /// Total number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// `true` if the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
