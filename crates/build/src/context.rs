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

//! Presentation helpers that turn a `TraversalResult` into a citable
//! context package for a retrieval consumer.

use crate::traverse::TraversalResult;

/// Citation metadata for one returned node.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextSource {
    /// Node id.
    pub id: String,
    /// Truncated content preview, at most 100 characters.
    pub preview: String,
    /// Query similarity of the node.
    pub score: f32,
    /// Leaf document ids this node's subtree covers.
    pub material_ids: Vec<String>,
}

fn preview(content: &str) -> String {
    if content.chars().count() > 100 {
        let truncated: String = content.chars().take(97).collect();
        format!("{truncated}...")
    } else {
        content.to_string()
    }
}

/// Format `result`'s nodes as a single context string, one paragraph per
/// node, ordered as returned (descending similarity).
pub fn format_context(result: &TraversalResult) -> String {
    result
        .nodes
        .iter()
        .enumerate()
        .map(|(i, node)| {
            let similarity = result.similarities.get(&node.id).copied().unwrap_or(0.0);
            format!("[{}] {} (similarity: {:.2})", i + 1, node.content, similarity)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Extract citation sources from `result`'s nodes, in the same order as
/// `format_context`'s paragraphs.
pub fn extract_sources(result: &TraversalResult) -> Vec<ContextSource> {
    result
        .nodes
        .iter()
        .map(|node| ContextSource {
            id: node.id.clone(),
            preview: preview(&node.content),
            score: result.similarities.get(&node.id).copied().unwrap_or(0.0),
            material_ids: node.material_ids.iter().cloned().collect(),
        })
        .collect()
}
