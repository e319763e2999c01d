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

//! Literal end-to-end scenarios, embedding dimension `D = 2`.

use hierarchy_build::{build_hierarchy, traverse};
use hierarchy_core::{BuildConfig, ClusterConfig, DocumentNode, InputDocument, TraverseConfig, TraverseStrategy};

fn doc(id: &str, content: &str, embedding: Vec<f32>) -> InputDocument {
    InputDocument::new(id, content, embedding)
}

/// S1 — trivial single document.
#[tokio::test]
async fn s1_trivial_single_document() {
    let docs = vec![doc("d1", "Hello world.", vec![1.0, 0.0])];
    let config = BuildConfig::default();
    let tree = build_hierarchy("corpus", docs, &config, None, None).await.unwrap();

    assert_eq!(tree.leaf_count, 1);
    assert_eq!(tree.internal_count, 0);
    assert_eq!(tree.max_depth, 0);
    assert_eq!(tree.root_ids, vec!["d1".to_string()]);

    let traverse_config = TraverseConfig::default().with_min_similarity(0.0);
    let result = traverse(&tree, &[1.0, 0.0], &traverse_config).unwrap();
    assert_eq!(result.nodes.len(), 1);
    assert_eq!(result.nodes[0].id, "d1");
    assert!((result.similarities["d1"] - 1.0).abs() < 1e-6);
}

/// S2 — two near-duplicates below threshold never merge and, dropped by
/// the min-size filter, both end up as roots.
#[tokio::test]
async fn s2_two_orthogonal_documents_stay_separate_roots() {
    let docs = vec![
        doc("d1", "Course notes on linear algebra basics.", vec![1.0, 0.0]),
        doc("d2", "Recipe notes for sourdough starter care.", vec![0.0, 1.0]),
    ];
    let config = BuildConfig::default().with_cluster_config(
        ClusterConfig::default()
            .with_similarity_threshold(0.7)
            .with_min_cluster_size(2),
    );
    let tree = build_hierarchy("corpus", docs, &config, None, None).await.unwrap();

    assert_eq!(tree.internal_count, 0);
    assert_eq!(tree.leaf_count, 2);
    let mut roots = tree.root_ids.clone();
    roots.sort();
    assert_eq!(roots, vec!["d1".to_string(), "d2".to_string()]);
}

/// S3 — two near-duplicates above threshold merge into one internal root.
#[tokio::test]
async fn s3_near_duplicates_above_threshold_merge() {
    let docs = vec![
        doc("d1", "Course notes on linear algebra basics.", vec![1.0, 0.0]),
        doc(
            "d2",
            "Course notes on linear algebra fundamentals.",
            vec![0.9950, 0.0998],
        ),
    ];
    let config = BuildConfig::default()
        .with_max_levels(1)
        .with_cluster_config(
            ClusterConfig::default()
                .with_similarity_threshold(0.7)
                .with_min_cluster_size(1),
        );
    let tree = build_hierarchy("corpus", docs, &config, None, None).await.unwrap();

    assert_eq!(tree.leaf_count, 2);
    assert_eq!(tree.internal_count, 1);
    assert_eq!(tree.max_depth, 1);
    assert_eq!(tree.root_ids.len(), 1);

    let root = &tree.nodes[&tree.root_ids[0]];
    let mut child_ids = root.child_ids.clone();
    child_ids.sort();
    assert_eq!(child_ids, vec!["d1".to_string(), "d2".to_string()]);
    assert_eq!(root.level, 1);
    assert!((root.embedding[0] - 0.9975).abs() < 1e-3);
    assert!((root.embedding[1] - 0.0499).abs() < 1e-3);
    assert_eq!(
        root.material_ids,
        std::collections::HashSet::from(["d1".to_string(), "d2".to_string()])
    );
}

/// S4 — extractive summary length under a small target. Each sentence is
/// padded with enough filler to clear the 20-character survival floor,
/// preserving the five-sentence, single-topic shape of the scenario.
#[tokio::test]
async fn s4_extractive_summary_respects_target_length() {
    let members = vec![
        doc(
            "d1",
            "Segment Alpha claims that A is indeed B in this context. \
             Segment Alpha further claims that C is indeed D in this context.",
            vec![1.0, 0.0],
        ),
        doc(
            "d2",
            "Segment Beta claims that E is indeed F in this context. \
             Segment Beta further claims that G is indeed H in this context. \
             Segment Beta finally claims that I is indeed J in this context.",
            vec![1.0, 0.0],
        ),
    ];
    let nodes: Vec<DocumentNode> = members
        .iter()
        .map(|d| DocumentNode::leaf(d.id.clone(), d))
        .collect();

    let summary = hierarchy_summarize::extractive_summary(&nodes, 6);
    let word_count = hierarchy_summarize::word_count(&summary);
    assert!((6..=7).contains(&word_count), "word count {word_count} out of [6, 7]");

    // Sentences must appear in original order: whichever survive, their
    // starting offsets in the summary are non-decreasing.
    let mut last_pos = 0usize;
    for sentence in summary.split(". ") {
        let sentence = sentence.trim();
        if sentence.is_empty() {
            continue;
        }
        let pos = summary.find(sentence).unwrap();
        assert!(pos >= last_pos);
        last_pos = pos;
    }

    let keywords = hierarchy_summarize::extract_keywords(&summary);
    assert!(keywords.len() <= 5);
    assert!(keywords.iter().all(|k| k.len() > 2));
}

/// S5 — single-cluster termination: three near-duplicates collapse into
/// one cluster that covers the whole level, so no summary is created and
/// all three leaves become roots.
#[tokio::test]
async fn s5_single_cluster_termination_produces_no_internal_node() {
    let docs = vec![
        doc("d1", "Lecture notes on graph traversal.", vec![1.0, 0.0]),
        doc("d2", "Lecture notes on graph search methods.", vec![0.99, 0.01]),
        doc("d3", "Lecture notes on graph exploration.", vec![0.98, 0.02]),
    ];
    let config = BuildConfig::default().with_cluster_config(
        ClusterConfig::default()
            .with_similarity_threshold(0.5)
            .with_min_cluster_size(2)
            .with_max_cluster_size(10),
    );
    let tree = build_hierarchy("corpus", docs, &config, None, None).await.unwrap();

    assert_eq!(tree.internal_count, 0);
    assert_eq!(tree.leaf_count, 3);
    let mut roots = tree.root_ids.clone();
    roots.sort();
    assert_eq!(roots, vec!["d1".to_string(), "d2".to_string(), "d3".to_string()]);
}

/// S6 — traversal cap and filter over a flat, ten-child tree.
#[tokio::test]
async fn s6_traversal_cap_and_filter() {
    use hierarchy_core::{DocumentNode, HierarchyTree, NodeKind, NodeMetadata};
    use std::collections::{HashMap, HashSet};

    // A hand-built fixture: root R with ten children whose query
    // similarities are precomputed in 0.1 steps from 1.0 down to 0.1.
    let mut nodes = HashMap::new();
    let mut child_ids = Vec::new();
    for i in 0..10 {
        let sim = 1.0 - (i as f32) * 0.1;
        let angle = sim.acos();
        let id = format!("c{i}");
        nodes.insert(
            id.clone(),
            DocumentNode {
                id: id.clone(),
                kind: NodeKind::Leaf,
                level: 0,
                content: format!("segment {i}"),
                embedding: vec![angle.cos(), angle.sin()],
                material_ids: HashSet::from([id.clone()]),
                parent_id: Some("R".to_string()),
                child_ids: Vec::new(),
                metadata: NodeMetadata::for_leaf(Vec::new(), None),
            },
        );
        child_ids.push(id);
    }

    // R's own query similarity (0.2) sits below the min_similarity floor
    // (0.55) used below, pinning down the scenario's "R may or may not
    // appear depending on its own similarity" caveat so the test is
    // deterministic: R is visited but never selected.
    let root_angle: f32 = 0.2_f32.acos();
    let material_ids: HashSet<String> = child_ids.iter().cloned().collect();
    nodes.insert(
        "R".to_string(),
        DocumentNode {
            id: "R".to_string(),
            kind: NodeKind::Internal,
            level: 1,
            content: "summary of ten segments".to_string(),
            embedding: vec![root_angle.cos(), root_angle.sin()],
            material_ids,
            parent_id: None,
            child_ids: child_ids.clone(),
            metadata: NodeMetadata {
                cluster_size: 10,
                avg_similarity: 0.5,
                top_keywords: Vec::new(),
                week_range: None,
            },
        },
    );

    let tree = HierarchyTree {
        id: "tree-1".to_string(),
        corpus_id: "corpus".to_string(),
        nodes,
        root_ids: vec!["R".to_string()],
        max_depth: 1,
        leaf_count: 10,
        internal_count: 1,
        built_at: chrono::Utc::now(),
        metrics: Default::default(),
        incomplete: false,
    };

    let traverse_config = TraverseConfig::default()
        .with_strategy(TraverseStrategy::BreadthFirst)
        .with_max_nodes(3)
        .with_min_similarity(0.55);
    let result = traverse(&tree, &[1.0, 0.0], &traverse_config).unwrap();

    assert_eq!(result.nodes.len(), 3);
    let mut sims: Vec<f32> = result.nodes.iter().map(|n| result.similarities[&n.id]).collect();
    sims.sort_by(|a, b| b.partial_cmp(a).unwrap());
    assert!((sims[0] - 1.0).abs() < 1e-3);
    assert!((sims[1] - 0.9).abs() < 1e-3);
    assert!((sims[2] - 0.8).abs() < 1e-3);
    for sim in &sims {
        assert!(*sim >= 0.55);
    }
    assert!(!result.nodes.iter().any(|n| n.id == "R"), "R falls below the floor and must not appear");

    let returned_materials: HashSet<String> = result.material_ids.iter().cloned().collect();
    assert_eq!(returned_materials, HashSet::from(["c0".to_string(), "c1".to_string(), "c2".to_string()]));
}
