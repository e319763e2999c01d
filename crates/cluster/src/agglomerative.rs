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

//! Bottom-up agglomerative clustering over `DocumentNode`s.

use hierarchy_core::{centroid, cohesion, cosine, ClusterConfig, DocumentCluster, DocumentNode, Linkage};
use tracing::{debug, trace};

use crate::error::{ClusterError, Result};

/// A working cluster during the merge loop. Keeps the same shape as
/// `DocumentCluster` but is mutated in place as merges happen.
struct WorkingCluster {
    members: Vec<DocumentNode>,
    centroid: Vec<f32>,
    cohesion: f32,
}

impl WorkingCluster {
    fn singleton(node: DocumentNode) -> Self {
        let centroid = node.embedding.clone();
        Self {
            members: vec![node],
            centroid,
            cohesion: 1.0,
        }
    }
}

/// Cluster-to-cluster similarity under the configured linkage, computed
/// from all pairwise member similarities.
fn linkage_similarity(a: &WorkingCluster, b: &WorkingCluster, linkage: Linkage) -> Result<f32> {
    let mut sum = 0.0_f32;
    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    let mut count = 0usize;

    for x in &a.members {
        for y in &b.members {
            let sim = cosine(&x.embedding, &y.embedding)?;
            sum += sim;
            min = min.min(sim);
            max = max.max(sim);
            count += 1;
        }
    }

    Ok(match linkage {
        Linkage::Average => sum / count.max(1) as f32,
        Linkage::Complete => min,
        Linkage::Single => max,
    })
}

/// Run the agglomerative algorithm over `nodes`, returning the partition
/// it produces. Empty input yields empty output. Nodes may be dropped
/// only by the final `min_cluster_size` filter.
pub fn cluster_documents(nodes: Vec<DocumentNode>, config: &ClusterConfig) -> Result<Vec<DocumentCluster>> {
    config
        .validate()
        .map_err(|e| ClusterError::InvalidConfig(e.to_string()))?;

    if nodes.is_empty() {
        return Ok(Vec::new());
    }

    let mut clusters: Vec<WorkingCluster> = nodes.into_iter().map(WorkingCluster::singleton).collect();

    debug!(initial = clusters.len(), "starting agglomerative merge");

    loop {
        if clusters.len() < 2 {
            break;
        }

        // Find the most similar pair, tie-broken by (lower i, lower j).
        let mut best_pair: Option<(usize, usize, f32)> = None;
        for i in 0..clusters.len() {
            for j in (i + 1)..clusters.len() {
                let sim = linkage_similarity(&clusters[i], &clusters[j], config.linkage)?;
                let is_better = match best_pair {
                    None => true,
                    Some((_, _, best_sim)) => sim > best_sim,
                };
                if is_better {
                    best_pair = Some((i, j, sim));
                }
            }
        }

        let (i, j, best_sim) = match best_pair {
            Some(pair) => pair,
            None => break,
        };

        if best_sim < config.similarity_threshold {
            trace!(best_sim, threshold = config.similarity_threshold, "stopping: below threshold");
            break;
        }

        let merged_size = clusters[i].members.len() + clusters[j].members.len();
        if merged_size > config.max_cluster_size {
            trace!(merged_size, max = config.max_cluster_size, "stopping: merge would exceed max size");
            break;
        }

        // Remove j first since j > i, so i's index stays valid.
        let b = clusters.remove(j);
        let a = clusters.remove(i);

        let mut members = a.members;
        members.extend(b.members);
        let embeddings: Vec<&[f32]> = members.iter().map(|n| n.embedding.as_slice()).collect();
        let merged_centroid = centroid(&embeddings);
        let merged_cohesion = cohesion(&embeddings)?;

        clusters.push(WorkingCluster {
            members,
            centroid: merged_centroid,
            cohesion: merged_cohesion,
        });
    }

    let result = clusters
        .into_iter()
        .filter(|c| c.members.len() >= config.min_cluster_size)
        .map(|c| DocumentCluster {
            members: c.members,
            centroid: c.centroid,
            cohesion: c.cohesion,
        })
        .collect::<Vec<_>>();

    debug!(produced = result.len(), "agglomerative merge complete");
    Ok(result)
}
