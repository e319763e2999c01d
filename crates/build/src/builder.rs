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

//! The level-by-level promotion loop that alternates clustering and
//! summarization to build a `HierarchyTree`.

use std::collections::HashMap;
use std::time::Instant;

use hierarchy_cluster::cluster_documents;
use hierarchy_core::{
    validate_finite, BuildConfig, BuildMetrics, CoreError, DocumentNode, HierarchyTree, InputDocument, NodeKind, NodeMetadata,
};
use hierarchy_summarize::{summarize_cluster, AbstractiveBackend};
use tracing::{info, warn};

use crate::cancellation::CancellationToken;
use crate::error::Result;

/// Construct a `HierarchyTree` for `corpus_id` from `documents`.
///
/// Empty `documents` yields an empty tree, not an error. A dimension
/// mismatch among the provided embeddings aborts the build with
/// `CoreError::DimensionMismatch`; a `NaN` or `±inf` component in any
/// embedding aborts with `CoreError::NonFiniteEmbedding`. Both checks run
/// before any clustering starts, so a rejected corpus leaves no partial
/// work behind.
pub async fn build_hierarchy(
    corpus_id: &str,
    documents: Vec<InputDocument>,
    config: &BuildConfig,
    backend: Option<&dyn AbstractiveBackend>,
    cancellation: Option<&CancellationToken>,
) -> Result<HierarchyTree> {
    config.validate()?;

    if documents.is_empty() {
        return Ok(empty_tree(corpus_id));
    }

    let dimension = documents[0].embedding.len();
    for doc in &documents {
        if doc.embedding.len() != dimension {
            return Err(CoreError::DimensionMismatch {
                expected: dimension,
                found: doc.embedding.len(),
            }
            .into());
        }
        validate_finite(&doc.embedding)?;
    }

    let mut nodes: HashMap<String, DocumentNode> = HashMap::new();
    let mut current: Vec<DocumentNode> = Vec::with_capacity(documents.len());
    for doc in &documents {
        let leaf = DocumentNode::leaf(doc.id.clone(), doc);
        current.push(leaf.clone());
        nodes.insert(leaf.id.clone(), leaf);
    }
    let leaf_count = current.len();

    let mut level = 0usize;
    let mut promotion_passes = 0usize;
    let mut summaries_produced = 0usize;
    let mut cluster_time_ms = 0u64;
    let mut summarize_time_ms = 0u64;
    let mut cluster_sizes: Vec<usize> = Vec::new();
    let mut cohesions: Vec<f32> = Vec::new();
    let mut incomplete = false;

    while level < config.max_levels && current.len() >= config.min_nodes_per_level {
        if cancellation.is_some_and(CancellationToken::is_cancelled) {
            warn!(level, "build cancelled before promotion pass");
            incomplete = true;
            break;
        }

        let cluster_start = Instant::now();
        let clusters = cluster_documents(current.clone(), &config.cluster)?;
        cluster_time_ms += cluster_start.elapsed().as_millis() as u64;

        if clusters.is_empty() {
            info!(level, "clusterer returned no clusters, stopping promotion");
            break;
        }

        // current.len() > 2 excludes the trivial pairwise-merge case: with
        // exactly two nodes, one cluster spanning both is the only
        // non-singleton outcome the clusterer can ever produce, so it
        // carries the same information a merge at any other level does.
        // The termination only fires when the clusterer had room to
        // discriminate (3+ nodes) and chose not to.
        if clusters.len() == 1 && clusters[0].len() == current.len() && current.len() > 2 {
            info!(level, "single cluster covers the whole level, nodes become roots");
            break;
        }

        // Each cluster's summary is independent of the others at this
        // level, so the backend calls run concurrently rather than one
        // at a time.
        let summarize_start = Instant::now();
        let summaries = futures::future::try_join_all(
            clusters.iter().map(|cluster| summarize_cluster(cluster, &config.summarize, backend)),
        )
        .await?;
        summarize_time_ms += summarize_start.elapsed().as_millis() as u64;

        let mut new_internal = Vec::with_capacity(clusters.len());
        for (cluster, summary) in clusters.iter().zip(summaries) {
            cluster_sizes.push(cluster.len());
            cohesions.push(cluster.cohesion);
            summaries_produced += 1;

            let internal_id = uuid::Uuid::new_v4().to_string();
            let child_level = cluster.members.iter().map(|m| m.level).max().unwrap_or(0);
            let week_range = cluster
                .members
                .iter()
                .fold(None, |acc, m| NodeMetadata::merge_week_range(acc, m.metadata.week_range));

            let internal = DocumentNode {
                id: internal_id.clone(),
                kind: NodeKind::Internal,
                level: child_level + 1,
                content: summary.summary,
                embedding: cluster.centroid.clone(),
                material_ids: cluster.material_ids(),
                parent_id: None,
                child_ids: cluster.members.iter().map(|m| m.id.clone()).collect(),
                metadata: NodeMetadata {
                    cluster_size: cluster.len(),
                    avg_similarity: cluster.cohesion,
                    top_keywords: summary.keywords,
                    week_range,
                },
            };

            for member in &cluster.members {
                if let Some(existing) = nodes.get_mut(&member.id) {
                    existing.parent_id = Some(internal_id.clone());
                }
            }
            nodes.insert(internal_id, internal.clone());
            new_internal.push(internal);
        }

        promotion_passes += 1;
        current = new_internal;
        level += 1;
    }

    let mut root_ids: Vec<String> = nodes
        .values()
        .filter(|n| n.is_root())
        .map(|n| n.id.clone())
        .collect();
    if root_ids.is_empty() {
        // Root fallback: a non-empty corpus must always have roots; if
        // every node somehow ended up with a parent, fall back to the
        // leaves as a degenerate single-level tree.
        root_ids = documents.iter().map(|d| d.id.clone()).collect();
    }
    root_ids.sort();

    let max_depth = compute_max_depth(&nodes, &root_ids);
    let internal_count = nodes.len() - leaf_count;
    let avg_cluster_size = average(&cluster_sizes.iter().map(|&s| s as f32).collect::<Vec<_>>());
    let avg_cohesion = average(&cohesions);

    Ok(HierarchyTree {
        id: uuid::Uuid::new_v4().to_string(),
        corpus_id: corpus_id.to_string(),
        nodes,
        root_ids,
        max_depth,
        leaf_count,
        internal_count,
        built_at: chrono::Utc::now(),
        metrics: BuildMetrics {
            cluster_time_ms,
            summarize_time_ms,
            promotion_passes,
            summaries_produced,
            avg_cluster_size,
            avg_cohesion,
        },
        incomplete,
    })
}

fn empty_tree(corpus_id: &str) -> HierarchyTree {
    HierarchyTree {
        id: uuid::Uuid::new_v4().to_string(),
        corpus_id: corpus_id.to_string(),
        nodes: HashMap::new(),
        root_ids: Vec::new(),
        max_depth: 0,
        leaf_count: 0,
        internal_count: 0,
        built_at: chrono::Utc::now(),
        metrics: BuildMetrics::default(),
        incomplete: false,
    }
}

/// Longest root-to-descendant path, in edges.
fn compute_max_depth(nodes: &HashMap<String, DocumentNode>, root_ids: &[String]) -> usize {
    fn depth_of(nodes: &HashMap<String, DocumentNode>, id: &str) -> usize {
        match nodes.get(id) {
            Some(node) if !node.child_ids.is_empty() => {
                1 + node
                    .child_ids
                    .iter()
                    .map(|child| depth_of(nodes, child))
                    .max()
                    .unwrap_or(0)
            }
            _ => 0,
        }
    }

    root_ids.iter().map(|id| depth_of(nodes, id)).max().unwrap_or(0)
}

fn average(values: &[f32]) -> f32 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f32>() / values.len() as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hierarchy_core::ClusterConfig;

    fn doc(id: &str, embedding: Vec<f32>) -> InputDocument {
        InputDocument::new(
            id,
            format!("This is the course material body for document {id}, long enough to survive extraction."),
            embedding,
        )
    }

    #[tokio::test]
    async fn empty_corpus_yields_empty_tree() {
        let config = BuildConfig::default();
        let tree = build_hierarchy("corpus-1", Vec::new(), &config, None, None)
            .await
            .unwrap();
        assert!(tree.is_empty());
        assert!(tree.root_ids.is_empty());
    }

    #[tokio::test]
    async fn dimension_mismatch_aborts_build() {
        let docs = vec![doc("a", vec![1.0, 0.0]), doc("b", vec![1.0, 0.0, 0.0])];
        let config = BuildConfig::default();
        let result = build_hierarchy("corpus-1", docs, &config, None, None).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn single_document_corpus_is_its_own_root() {
        let docs = vec![doc("a", vec![1.0, 0.0])];
        let config = BuildConfig::default();
        let tree = build_hierarchy("corpus-1", docs, &config, None, None)
            .await
            .unwrap();
        assert_eq!(tree.leaf_count, 1);
        assert_eq!(tree.root_ids, vec!["a".to_string()]);
    }

    #[tokio::test]
    async fn promotes_similar_documents_into_an_internal_root() {
        let docs = vec![
            doc("a", vec![1.0, 0.0]),
            doc("b", vec![1.0, 0.0]),
            doc("c", vec![1.0, 0.0]),
        ];
        let config = BuildConfig::default().with_cluster_config(
            ClusterConfig::default()
                .with_similarity_threshold(0.5)
                .with_max_cluster_size(10)
                .with_min_cluster_size(1),
        );
        let tree = build_hierarchy("corpus-1", docs, &config, None, None)
            .await
            .unwrap();
        assert_eq!(tree.leaf_count, 3);
        assert_eq!(tree.internal_count, 1);
        assert_eq!(tree.root_ids.len(), 1);
        let root = &tree.nodes[&tree.root_ids[0]];
        assert_eq!(root.material_ids.len(), 3);
    }

    #[tokio::test]
    async fn invariants_hold_shape_and_levels() {
        let docs = vec![
            doc("a", vec![1.0, 0.0]),
            doc("b", vec![1.0, 0.0]),
            doc("c", vec![0.0, 1.0]),
            doc("d", vec![0.0, 1.0]),
        ];
        let config = BuildConfig::default().with_cluster_config(
            ClusterConfig::default()
                .with_similarity_threshold(0.5)
                .with_min_cluster_size(1),
        );
        let tree = build_hierarchy("corpus-1", docs, &config, None, None)
            .await
            .unwrap();

        for node in tree.nodes.values() {
            if let Some(parent_id) = &node.parent_id {
                let parent = tree.nodes.get(parent_id).expect("parent exists");
                assert!(parent.child_ids.contains(&node.id));
            }
            for child_id in &node.child_ids {
                let child = tree.nodes.get(child_id).expect("child exists");
                assert_eq!(child.parent_id.as_deref(), Some(node.id.as_str()));
            }
        }
        assert_eq!(tree.leaf_count + tree.internal_count, tree.nodes.len());
    }
}
