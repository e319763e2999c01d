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

//! Condensation of a `DocumentCluster` into a representative summary.

use std::collections::HashSet;

use hierarchy_core::{DocumentCluster, SummarizeConfig};
use tracing::warn;

use crate::backend::AbstractiveBackend;
use crate::error::Result;
use crate::extractive::{extract_keywords, extractive_summary, word_count};

/// Which path actually produced a `SummarizeResult`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryMethod {
    /// TF-IDF sentence extraction.
    Extractive,
    /// Delegated to the external abstractive backend.
    Abstractive,
}

/// The result of summarizing one cluster.
#[derive(Debug, Clone, PartialEq)]
pub struct SummarizeResult {
    /// The produced summary text.
    pub summary: String,
    /// Up to 5 keywords, empty if `includeKeywords` is false.
    pub keywords: Vec<String>,
    /// Word count of `summary`.
    pub word_count: usize,
    /// Which path produced `summary`.
    pub method: SummaryMethod,
    /// Ids of every child node the cluster summarizes.
    pub source_node_ids: HashSet<String>,
}

/// Concatenate child contents with blank-line separation, truncated to
/// `max_input_tokens * 4` characters (approximate token budget) with a
/// trailing ellipsis when cut.
fn build_abstractive_input(cluster: &DocumentCluster, max_input_tokens: usize) -> String {
    let joined = cluster
        .members
        .iter()
        .map(|m| m.content.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");

    let budget = max_input_tokens * 4;
    if joined.len() <= budget {
        joined
    } else {
        let mut truncated: String = joined.chars().take(budget).collect();
        truncated.push_str("...");
        truncated
    }
}

/// Summarize `cluster` per the configured mode, falling back to
/// extractive summarization if abstractive mode is requested but no
/// backend is supplied, or the backend call fails.
pub async fn summarize_cluster(
    cluster: &DocumentCluster,
    config: &SummarizeConfig,
    backend: Option<&dyn AbstractiveBackend>,
) -> Result<SummarizeResult> {
    let source_node_ids = cluster.material_ids();

    if cluster.is_empty() {
        return Ok(SummarizeResult {
            summary: String::new(),
            keywords: Vec::new(),
            word_count: 0,
            method: SummaryMethod::Extractive,
            source_node_ids,
        });
    }

    if cluster.len() == 1 {
        let summary = cluster.members[0].content.clone();
        let keywords = if config.include_keywords {
            extract_keywords(&summary)
        } else {
            Vec::new()
        };
        return Ok(SummarizeResult {
            word_count: word_count(&summary),
            summary,
            keywords,
            method: SummaryMethod::Extractive,
            source_node_ids,
        });
    }

    if config.use_llm {
        if let Some(backend) = backend {
            let input = build_abstractive_input(cluster, config.max_input_tokens);
            match backend.summarize(&input, config.target_length).await {
                Ok(summary) => {
                    let keywords = if config.include_keywords {
                        extract_keywords(&summary)
                    } else {
                        Vec::new()
                    };
                    return Ok(SummarizeResult {
                        word_count: word_count(&summary),
                        summary,
                        keywords,
                        method: SummaryMethod::Abstractive,
                        source_node_ids,
                    });
                }
                Err(err) => {
                    warn!(provider = backend.provider(), error = %err, "abstractive backend failed, falling back to extractive");
                }
            }
        }
    }

    let summary = extractive_summary(&cluster.members, config.target_length);
    let keywords = if config.include_keywords {
        extract_keywords(&summary)
    } else {
        Vec::new()
    };
    Ok(SummarizeResult {
        word_count: word_count(&summary),
        summary,
        keywords,
        method: SummaryMethod::Extractive,
        source_node_ids,
    })
}
