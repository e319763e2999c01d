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

//! Query-driven walk of a `HierarchyTree`.

use std::collections::{HashMap, HashSet};
use std::time::Instant;

use hierarchy_core::{
    cosine, validate_finite, CoreError, DocumentNode, HierarchyTree, TraverseConfig, TraverseStrategy,
};

use crate::error::Result;

/// Metrics recorded by a single `traverse` call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TraversalMetrics {
    /// Wall-clock time spent inside `traverse`, in milliseconds.
    pub traversal_time_ms: u64,
    /// Number of nodes visited (expanded or evaluated).
    pub nodes_visited: usize,
    /// Number of nodes returned.
    pub nodes_returned: usize,
    /// Greatest depth, in edges from the branch root, reached by any
    /// visited node.
    pub max_depth_reached: usize,
    /// Average query similarity over returned nodes; `0.0` if none.
    pub avg_similarity: f32,
}

/// The result of a `traverse` call.
#[derive(Debug, Clone, PartialEq)]
pub struct TraversalResult {
    /// Returned nodes, sorted by descending query similarity; ties
    /// broken by shallower level, then lexicographic id.
    pub nodes: Vec<DocumentNode>,
    /// Union of `materialIds` of `nodes`, deduplicated, in
    /// first-appearance order.
    pub material_ids: Vec<String>,
    /// Every node id visited, in visitation order.
    pub path: Vec<String>,
    /// Query similarity of each returned node, keyed by id.
    pub similarities: HashMap<String, f32>,
    /// Traversal metrics.
    pub metrics: TraversalMetrics,
}

struct FrontierEntry {
    id: String,
    depth: usize,
    similarity: f32,
    level: usize,
}

fn entry_for(tree: &HierarchyTree, id: &str, depth: usize, query: &[f32]) -> Result<FrontierEntry> {
    let node = tree
        .nodes
        .get(id)
        .ok_or_else(|| CoreError::NodeNotFound(id.to_string()))?;
    let similarity = cosine(query, &node.embedding)?;
    Ok(FrontierEntry {
        id: id.to_string(),
        depth,
        similarity,
        level: node.level,
    })
}

/// Walk `tree` from its roots, following `config.strategy`, and return
/// the nodes whose query similarity meets `config.min_similarity`.
///
/// A `NaN` or `±inf` component in `query_embedding` aborts the call with
/// `CoreError::NonFiniteEmbedding` before any node is visited.
pub fn traverse(tree: &HierarchyTree, query_embedding: &[f32], config: &TraverseConfig) -> Result<TraversalResult> {
    config.validate()?;
    validate_finite(query_embedding)?;

    let start = Instant::now();

    if tree.is_empty() {
        return Ok(TraversalResult {
            nodes: Vec::new(),
            material_ids: Vec::new(),
            path: Vec::new(),
            similarities: HashMap::new(),
            metrics: TraversalMetrics::default(),
        });
    }

    if let Some(sample) = tree.nodes.values().next() {
        if sample.embedding.len() != query_embedding.len() {
            return Err(CoreError::DimensionMismatch {
                expected: sample.embedding.len(),
                found: query_embedding.len(),
            }
            .into());
        }
    }

    let mut root_entries: Vec<FrontierEntry> = tree
        .root_ids
        .iter()
        .map(|id| entry_for(tree, id, 0, query_embedding))
        .collect::<Result<Vec<_>>>()?;
    sort_by_similarity_desc(&mut root_entries);

    let mut path: Vec<String> = Vec::new();
    let mut selected: Vec<(String, f32, usize)> = Vec::new();
    let mut max_depth_reached = 0usize;

    match config.strategy {
        TraverseStrategy::DepthFirst => {
            // Reverse so the highest-similarity entry is popped first.
            let mut stack: Vec<FrontierEntry> = root_entries;
            stack.reverse();
            run_stack(tree, query_embedding, config, &mut stack, &mut path, &mut selected, &mut max_depth_reached, true)?;
        }
        TraverseStrategy::BreadthFirst => {
            let mut frontier: Vec<FrontierEntry> = root_entries;
            run_priority(tree, query_embedding, config, &mut frontier, &mut path, &mut selected, &mut max_depth_reached, false)?;
        }
        TraverseStrategy::Adaptive => {
            let mut frontier: Vec<FrontierEntry> = root_entries;
            run_priority(tree, query_embedding, config, &mut frontier, &mut path, &mut selected, &mut max_depth_reached, true)?;
        }
    }

    if config.include_parents {
        backfill_parents(tree, query_embedding, &mut path, &mut selected)?;
    }

    sort_selected_for_output(&mut selected);

    let nodes: Vec<DocumentNode> = selected
        .iter()
        .map(|(id, _, _)| tree.nodes[id].clone())
        .collect();
    let similarities: HashMap<String, f32> = selected.iter().map(|(id, sim, _)| (id.clone(), *sim)).collect();
    let material_ids = collect_material_ids(&nodes);
    let avg_similarity = if selected.is_empty() {
        0.0
    } else {
        selected.iter().map(|(_, sim, _)| sim).sum::<f32>() / selected.len() as f32
    };

    Ok(TraversalResult {
        metrics: TraversalMetrics {
            traversal_time_ms: start.elapsed().as_millis() as u64,
            nodes_visited: path.len(),
            nodes_returned: nodes.len(),
            max_depth_reached,
            avg_similarity,
        },
        nodes,
        material_ids,
        path,
        similarities,
    })
}

/// Shared visit/expand loop for breadth-first and adaptive strategies:
/// at each step, pop the best-ranked frontier entry and expand it.
/// `ignore_depth_order` selects adaptive's similarity-only ranking over
/// breadth-first's depth-then-similarity ranking.
#[allow(clippy::too_many_arguments)]
fn run_priority(
    tree: &HierarchyTree,
    query: &[f32],
    config: &TraverseConfig,
    frontier: &mut Vec<FrontierEntry>,
    path: &mut Vec<String>,
    selected: &mut Vec<(String, f32, usize)>,
    max_depth_reached: &mut usize,
    ignore_depth_order: bool,
) -> Result<()> {
    loop {
        if selected.len() >= config.max_nodes {
            break;
        }
        if frontier.is_empty() {
            break;
        }

        let best_index = best_frontier_index(frontier, ignore_depth_order);
        let entry = frontier.remove(best_index);

        if config.max_depth >= 0 && entry.depth as i64 > config.max_depth {
            continue;
        }

        visit(&entry, path, max_depth_reached);
        if entry.similarity >= config.min_similarity {
            selected.push((entry.id.clone(), entry.similarity, entry.level));
        }

        let node = &tree.nodes[&entry.id];
        for child_id in &node.child_ids {
            frontier.push(entry_for(tree, child_id, entry.depth + 1, query)?);
        }
    }
    Ok(())
}

/// Visit/expand loop for depth-first: an explicit stack, highest
/// similarity child pushed last so it pops first.
#[allow(clippy::too_many_arguments)]
fn run_stack(
    tree: &HierarchyTree,
    query: &[f32],
    config: &TraverseConfig,
    stack: &mut Vec<FrontierEntry>,
    path: &mut Vec<String>,
    selected: &mut Vec<(String, f32, usize)>,
    max_depth_reached: &mut usize,
    _highest_similarity_first: bool,
) -> Result<()> {
    loop {
        if selected.len() >= config.max_nodes {
            break;
        }
        let Some(entry) = stack.pop() else {
            break;
        };

        if config.max_depth >= 0 && entry.depth as i64 > config.max_depth {
            continue;
        }

        visit(&entry, path, max_depth_reached);
        if entry.similarity >= config.min_similarity {
            selected.push((entry.id.clone(), entry.similarity, entry.level));
        }

        let node = &tree.nodes[&entry.id];
        let mut children: Vec<FrontierEntry> = node
            .child_ids
            .iter()
            .map(|child_id| entry_for(tree, child_id, entry.depth + 1, query))
            .collect::<Result<Vec<_>>>()?;
        sort_by_similarity_desc(&mut children);
        // Push lowest-similarity first so the highest pops first (LIFO).
        for child in children.into_iter().rev() {
            stack.push(child);
        }
    }
    Ok(())
}

fn visit(
    entry: &FrontierEntry,
    path: &mut Vec<String>,
    max_depth_reached: &mut usize,
) {
    path.push(entry.id.clone());
    *max_depth_reached = (*max_depth_reached).max(entry.depth);
}

/// Best index by (depth ascending, similarity descending) unless
/// `ignore_depth_order`, in which case by similarity descending alone.
/// Both fall back to `(level ascending, id ascending)` for determinism.
fn best_frontier_index(frontier: &[FrontierEntry], ignore_depth_order: bool) -> usize {
    let mut best = 0usize;
    for i in 1..frontier.len() {
        if is_better(&frontier[i], &frontier[best], ignore_depth_order) {
            best = i;
        }
    }
    best
}

fn is_better(a: &FrontierEntry, b: &FrontierEntry, ignore_depth_order: bool) -> bool {
    if !ignore_depth_order && a.depth != b.depth {
        return a.depth < b.depth;
    }
    if a.similarity != b.similarity {
        return a.similarity > b.similarity;
    }
    if a.level != b.level {
        return a.level < b.level;
    }
    a.id < b.id
}

fn sort_by_similarity_desc(entries: &mut [FrontierEntry]) {
    entries.sort_by(|a, b| {
        b.similarity
            .partial_cmp(&a.similarity)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.level.cmp(&b.level))
            .then_with(|| a.id.cmp(&b.id))
    });
}

fn sort_selected_for_output(selected: &mut [(String, f32, usize)]) {
    selected.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.2.cmp(&b.2))
            .then_with(|| a.0.cmp(&b.0))
    });
}

fn backfill_parents(
    tree: &HierarchyTree,
    query: &[f32],
    path: &mut Vec<String>,
    selected: &mut Vec<(String, f32, usize)>,
) -> Result<()> {
    let present: HashSet<String> = selected.iter().map(|(id, _, _)| id.clone()).collect();
    let mut to_add = Vec::new();

    for (id, _, _) in selected.iter() {
        let Some(node) = tree.nodes.get(id) else {
            continue;
        };
        if let Some(parent_id) = &node.parent_id {
            if !present.contains(parent_id) && !to_add.iter().any(|(pid, _, _): &(String, f32, usize)| pid == parent_id) {
                let parent = &tree.nodes[parent_id];
                let similarity = cosine(query, &parent.embedding)?;
                to_add.push((parent_id.clone(), similarity, parent.level));
            }
        }
    }

    for (id, sim, level) in to_add {
        if !path.contains(&id) {
            path.push(id.clone());
        }
        selected.push((id, sim, level));
    }
    Ok(())
}

fn collect_material_ids(nodes: &[DocumentNode]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut ordered = Vec::new();
    for node in nodes {
        for material_id in &node.material_ids {
            if seen.insert(material_id.clone()) {
                ordered.push(material_id.clone());
            }
        }
    }
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use hierarchy_core::{BuildConfig, ClusterConfig};

    async fn sample_tree() -> HierarchyTree {
        let docs = vec![
            hierarchy_core::InputDocument::new(
                "a",
                "Graph algorithms traverse nodes and edges efficiently.",
                vec![1.0, 0.0],
            ),
            hierarchy_core::InputDocument::new(
                "b",
                "Graph traversal is central to retrieval systems design.",
                vec![0.9, 0.1],
            ),
            hierarchy_core::InputDocument::new(
                "c",
                "Cooking pasta requires boiling water and salt generously.",
                vec![0.0, 1.0],
            ),
        ];
        let config = BuildConfig::default().with_cluster_config(
            ClusterConfig::default()
                .with_similarity_threshold(0.5)
                .with_min_cluster_size(1),
        );
        crate::builder::build_hierarchy("corpus-1", docs, &config, None, None)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn empty_tree_yields_empty_result() {
        let tree = HierarchyTree {
            id: "t".into(),
            corpus_id: "c".into(),
            nodes: HashMap::new(),
            root_ids: Vec::new(),
            max_depth: 0,
            leaf_count: 0,
            internal_count: 0,
            built_at: chrono::Utc::now(),
            metrics: Default::default(),
            incomplete: false,
        };
        let config = TraverseConfig::default();
        let result = traverse(&tree, &[1.0, 0.0], &config).unwrap();
        assert!(result.nodes.is_empty());
    }

    #[tokio::test]
    async fn breadth_first_returns_nodes_sorted_by_similarity() {
        let tree = sample_tree().await;
        let config = TraverseConfig::default().with_min_similarity(0.0).with_max_nodes(10);
        let result = traverse(&tree, &[1.0, 0.0], &config).unwrap();
        let sims: Vec<f32> = result.nodes.iter().map(|n| result.similarities[&n.id]).collect();
        for window in sims.windows(2) {
            assert!(window[0] >= window[1]);
        }
    }

    #[tokio::test]
    async fn dimension_mismatch_is_an_error() {
        let tree = sample_tree().await;
        let config = TraverseConfig::default();
        let result = traverse(&tree, &[1.0, 0.0, 0.0], &config);
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn min_similarity_filters_results() {
        let tree = sample_tree().await;
        let config = TraverseConfig::default().with_min_similarity(0.99).with_max_nodes(10);
        let result = traverse(&tree, &[1.0, 0.0], &config).unwrap();
        assert!(result.nodes.iter().all(|n| result.similarities[&n.id] >= 0.99));
    }

    #[tokio::test]
    async fn max_nodes_caps_the_result() {
        let tree = sample_tree().await;
        let config = TraverseConfig::default().with_min_similarity(-1.0).with_max_nodes(1);
        let result = traverse(&tree, &[1.0, 0.0], &config).unwrap();
        assert!(result.nodes.len() <= 1);
    }
}
