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

//! Configuration types and their documented defaults.
//!
//! Each config follows a builder-method idiom: `with_*` consuming-self
//! setters plus a `validate()` that returns `CoreResult<()>`.

use crate::error::{CoreError, CoreResult};

/// How pairwise member similarities combine into a cluster-to-cluster
/// similarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Linkage {
    /// Mean of pairwise similarities.
    #[default]
    Average,
    /// Minimum of pairwise similarities.
    Complete,
    /// Maximum of pairwise similarities.
    Single,
}

/// Configuration for the agglomerative clusterer.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterConfig {
    /// Stop merging once the best available pair falls below this.
    pub similarity_threshold: f32,
    /// Clusters with fewer members than this are dropped from the result.
    pub min_cluster_size: usize,
    /// A merge is refused if the resulting cluster would exceed this.
    pub max_cluster_size: usize,
    /// Linkage rule used to score candidate merges.
    pub linkage: Linkage,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.7,
            min_cluster_size: 2,
            max_cluster_size: 10,
            linkage: Linkage::Average,
        }
    }
}

impl ClusterConfig {
    /// Start from defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the similarity threshold.
    pub fn with_similarity_threshold(mut self, threshold: f32) -> Self {
        self.similarity_threshold = threshold;
        self
    }

    /// Set the minimum cluster size.
    pub fn with_min_cluster_size(mut self, size: usize) -> Self {
        self.min_cluster_size = size;
        self
    }

    /// Set the maximum cluster size.
    pub fn with_max_cluster_size(mut self, size: usize) -> Self {
        self.max_cluster_size = size;
        self
    }

    /// Set the linkage rule.
    pub fn with_linkage(mut self, linkage: Linkage) -> Self {
        self.linkage = linkage;
        self
    }

    /// Validate the configuration against the documented ranges.
    pub fn validate(&self) -> CoreResult<()> {
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(CoreError::InvalidConfig(
                "similarity_threshold must be in [0, 1]".to_string(),
            ));
        }
        if self.min_cluster_size < 1 {
            return Err(CoreError::InvalidConfig(
                "min_cluster_size must be >= 1".to_string(),
            ));
        }
        if self.max_cluster_size < self.min_cluster_size {
            return Err(CoreError::InvalidConfig(
                "max_cluster_size must be >= min_cluster_size".to_string(),
            ));
        }
        Ok(())
    }
}

/// Configuration for the summarizer.
#[derive(Debug, Clone, PartialEq)]
pub struct SummarizeConfig {
    /// Enable abstractive mode when a backend is configured.
    pub use_llm: bool,
    /// Opaque identifier passed to the abstractive backend.
    pub llm_provider: Option<String>,
    /// Target summary length in words (soft).
    pub target_length: usize,
    /// Hard limit on input size supplied to the abstractive backend,
    /// approximated as `len(text) / 4` tokens.
    pub max_input_tokens: usize,
    /// If `false`, `keywords` is empty regardless of mode.
    pub include_keywords: bool,
}

impl Default for SummarizeConfig {
    fn default() -> Self {
        Self {
            use_llm: false,
            llm_provider: None,
            target_length: 300,
            max_input_tokens: 4000,
            include_keywords: true,
        }
    }
}

impl SummarizeConfig {
    /// Start from defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable abstractive mode with the given provider tag.
    pub fn with_llm(mut self, provider: impl Into<String>) -> Self {
        self.use_llm = true;
        self.llm_provider = Some(provider.into());
        self
    }

    /// Set the target summary length in words.
    pub fn with_target_length(mut self, words: usize) -> Self {
        self.target_length = words;
        self
    }

    /// Set the hard input token budget for the abstractive backend.
    pub fn with_max_input_tokens(mut self, tokens: usize) -> Self {
        self.max_input_tokens = tokens;
        self
    }

    /// Enable or disable keyword extraction.
    pub fn with_keywords(mut self, enabled: bool) -> Self {
        self.include_keywords = enabled;
        self
    }

    /// Validate the configuration against the documented ranges.
    pub fn validate(&self) -> CoreResult<()> {
        if self.target_length < 1 {
            return Err(CoreError::InvalidConfig(
                "target_length must be >= 1".to_string(),
            ));
        }
        if self.max_input_tokens < 1 {
            return Err(CoreError::InvalidConfig(
                "max_input_tokens must be >= 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Configuration for the hierarchy builder.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildConfig {
    /// Hard cap on internal-level creation passes.
    pub max_levels: usize,
    /// Stop before clustering if the current level has fewer nodes.
    pub min_nodes_per_level: usize,
    /// Clustering configuration used at every level.
    pub cluster: ClusterConfig,
    /// Summarization configuration used at every level.
    pub summarize: SummarizeConfig,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            max_levels: 3,
            min_nodes_per_level: 2,
            cluster: ClusterConfig::default(),
            summarize: SummarizeConfig::default(),
        }
    }
}

impl BuildConfig {
    /// Start from defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of promotion passes.
    pub fn with_max_levels(mut self, levels: usize) -> Self {
        self.max_levels = levels;
        self
    }

    /// Set the minimum node count required to attempt another pass.
    pub fn with_min_nodes_per_level(mut self, min_nodes: usize) -> Self {
        self.min_nodes_per_level = min_nodes;
        self
    }

    /// Override the clustering configuration.
    pub fn with_cluster_config(mut self, cluster: ClusterConfig) -> Self {
        self.cluster = cluster;
        self
    }

    /// Override the summarization configuration.
    pub fn with_summarize_config(mut self, summarize: SummarizeConfig) -> Self {
        self.summarize = summarize;
        self
    }

    /// Validate this configuration and its nested configurations.
    pub fn validate(&self) -> CoreResult<()> {
        if self.max_levels < 1 {
            return Err(CoreError::InvalidConfig(
                "max_levels must be >= 1".to_string(),
            ));
        }
        if self.min_nodes_per_level < 2 {
            return Err(CoreError::InvalidConfig(
                "min_nodes_per_level must be >= 2".to_string(),
            ));
        }
        self.cluster.validate()?;
        self.summarize.validate()?;
        Ok(())
    }
}

/// Node expansion order used by the traverser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraverseStrategy {
    /// Level by level, starting from roots.
    #[default]
    BreadthFirst,
    /// Recurse into the highest-similarity child first.
    DepthFirst,
    /// Best-first over a priority queue keyed by query similarity.
    Adaptive,
}

/// Configuration for the traverser.
#[derive(Debug, Clone, PartialEq)]
pub struct TraverseConfig {
    /// Node expansion order.
    pub strategy: TraverseStrategy,
    /// Depth bound from each starting root. `-1` means unlimited.
    pub max_depth: i64,
    /// Hard cap on nodes returned.
    pub max_nodes: usize,
    /// Minimum query similarity for a node to be returned or expanded.
    pub min_similarity: f32,
    /// If `true`, add a selected node's parent when it is not already
    /// in the result.
    pub include_parents: bool,
}

impl Default for TraverseConfig {
    fn default() -> Self {
        Self {
            strategy: TraverseStrategy::BreadthFirst,
            max_depth: -1,
            max_nodes: 10,
            min_similarity: 0.5,
            include_parents: false,
        }
    }
}

impl TraverseConfig {
    /// Start from defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the expansion strategy.
    pub fn with_strategy(mut self, strategy: TraverseStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the per-root depth bound (`-1` for unlimited).
    pub fn with_max_depth(mut self, max_depth: i64) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the hard cap on returned nodes.
    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    /// Set the minimum query similarity.
    pub fn with_min_similarity(mut self, min_similarity: f32) -> Self {
        self.min_similarity = min_similarity.clamp(0.0, 1.0);
        self
    }

    /// Enable or disable parent back-fill.
    pub fn with_include_parents(mut self, include: bool) -> Self {
        self.include_parents = include;
        self
    }

    /// Validate the configuration against the documented ranges.
    pub fn validate(&self) -> CoreResult<()> {
        if self.max_depth < -1 {
            return Err(CoreError::InvalidConfig(
                "max_depth must be >= -1".to_string(),
            ));
        }
        if self.max_nodes < 1 {
            return Err(CoreError::InvalidConfig(
                "max_nodes must be >= 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.min_similarity) {
            return Err(CoreError::InvalidConfig(
                "min_similarity must be in [0, 1]".to_string(),
            ));
        }
        Ok(())
    }
}
