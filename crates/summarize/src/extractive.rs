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

//! Extractive summarization: sentence splitting, tokenization, TF-IDF
//! scoring, and greedy selection under a soft word-count target.

use std::collections::HashMap;

use hierarchy_core::DocumentNode;

/// A sentence tagged with its originating node and a global index
/// assigned by the iteration order of the cluster's children.
struct TaggedSentence {
    text: String,
    global_index: usize,
}

/// Split `content` on `.`, `!`, `?` (one or more), trim, and discard
/// sentences of length <= 20 characters.
fn split_sentences(content: &str) -> Vec<String> {
    content
        .split(|c| c == '.' || c == '!' || c == '?')
        .map(str::trim)
        .filter(|s| s.len() > 20)
        .map(str::to_string)
        .collect()
}

/// Lowercase, replace non-word characters with spaces, split on
/// whitespace, discard tokens of length <= 2.
fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let cleaned: String = lowered
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { ' ' })
        .collect();
    cleaned
        .split_whitespace()
        .filter(|t| t.len() > 2)
        .map(str::to_string)
        .collect()
}

/// Tag every surviving sentence across `members`, in iteration order.
fn extract_sentences(members: &[DocumentNode]) -> Vec<TaggedSentence> {
    let mut sentences = Vec::new();
    let mut global_index = 0usize;
    for member in members {
        for sentence in split_sentences(&member.content) {
            sentences.push(TaggedSentence {
                text: sentence,
                global_index,
            });
            global_index += 1;
        }
    }
    sentences
}

/// `score(s) = sum_t tf(t, s) * ln(N / df(t))`.
fn score_sentences(sentences: &[TaggedSentence]) -> Vec<(f32, Vec<String>)> {
    let tokenized: Vec<Vec<String>> = sentences.iter().map(|s| tokenize(&s.text)).collect();
    let n = tokenized.len().max(1) as f32;

    let mut df: HashMap<&str, usize> = HashMap::new();
    for tokens in &tokenized {
        let mut seen = std::collections::HashSet::new();
        for token in tokens {
            if seen.insert(token.as_str()) {
                *df.entry(token.as_str()).or_insert(0) += 1;
            }
        }
    }

    tokenized
        .into_iter()
        .map(|tokens| {
            let mut tf: HashMap<&str, usize> = HashMap::new();
            for token in &tokens {
                *tf.entry(token.as_str()).or_insert(0) += 1;
            }
            let score = tf
                .iter()
                .map(|(term, count)| {
                    let document_frequency = *df.get(term).unwrap_or(&1).max(&1) as f32;
                    *count as f32 * (n / document_frequency).ln()
                })
                .sum();
            (score, tokens)
        })
        .collect()
}

/// Select sentences in descending score (ties by lower global index),
/// accepting each only while the running word count stays within
/// `1.2 * target_length`, stopping once it reaches `target_length`.
fn select_sentences(
    sentences: &[TaggedSentence],
    scores: &[f32],
    target_length: usize,
) -> Vec<usize> {
    let mut order: Vec<usize> = (0..sentences.len()).collect();
    order.sort_by(|&a, &b| {
        scores[b]
            .partial_cmp(&scores[a])
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| sentences[a].global_index.cmp(&sentences[b].global_index))
    });

    let soft_cap = (target_length as f32 * 1.2).ceil() as usize;
    let mut accepted = Vec::new();
    let mut word_count = 0usize;

    for idx in order {
        let words = sentences[idx].text.split_whitespace().count();
        if word_count + words > soft_cap {
            continue;
        }
        accepted.push(idx);
        word_count += words;
        if word_count >= target_length {
            break;
        }
    }

    accepted
}

/// Top-5 terms by frequency in `text`, ties broken by first occurrence.
pub fn extract_keywords(text: &str) -> Vec<String> {
    let tokens = tokenize(text);
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut first_seen: HashMap<&str, usize> = HashMap::new();
    for (position, token) in tokens.iter().enumerate() {
        *counts.entry(token.as_str()).or_insert(0) += 1;
        first_seen.entry(token.as_str()).or_insert(position);
    }

    let mut terms: Vec<&str> = counts.keys().copied().collect();
    terms.sort_by(|&a, &b| {
        counts[b]
            .cmp(&counts[a])
            .then_with(|| first_seen[a].cmp(&first_seen[b]))
    });
    terms.truncate(5);
    terms.into_iter().map(str::to_string).collect()
}

/// Number of whitespace-separated non-empty runs in `text`.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Produce the extractive summary of `members`' concatenated content,
/// following the sentence-extraction, scoring, and greedy-selection
/// algorithm. Returns the empty string for an empty or sentence-less
/// cluster.
pub fn extractive_summary(members: &[DocumentNode], target_length: usize) -> String {
    let sentences = extract_sentences(members);
    if sentences.is_empty() {
        return String::new();
    }

    let scored = score_sentences(&sentences);
    let scores: Vec<f32> = scored.iter().map(|(s, _)| *s).collect();
    let mut accepted = select_sentences(&sentences, &scores, target_length);
    accepted.sort_unstable();

    accepted
        .into_iter()
        .map(|idx| sentences[idx].text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use hierarchy_core::InputDocument;

    fn leaf(id: &str, content: &str) -> DocumentNode {
        let doc = InputDocument::new(id, content, vec![1.0, 0.0]);
        DocumentNode::leaf(id.to_string(), &doc)
    }

    #[test]
    fn short_sentences_are_discarded() {
        let sentences = split_sentences("Hi. This one is long enough to survive the filter.");
        assert_eq!(sentences.len(), 1);
    }

    #[test]
    fn tokenize_drops_short_tokens_and_lowercases() {
        let tokens = tokenize("The Quick fox! an ox.");
        assert_eq!(tokens, vec!["the", "quick", "fox"]);
    }

    #[test]
    fn single_node_cluster_summary_is_verbatim_sentences() {
        let node = leaf(
            "a",
            "Distributed systems require careful handling of partial failure.",
        );
        let summary = extractive_summary(&[node], 300);
        assert!(summary.contains("Distributed systems"));
    }

    #[test]
    fn empty_cluster_yields_empty_summary() {
        assert_eq!(extractive_summary(&[], 300), "");
    }

    #[test]
    fn keywords_are_top_five_by_frequency() {
        let keywords = extract_keywords("graph graph graph index index tree forest leaf");
        assert_eq!(keywords[0], "graph");
        assert!(keywords.len() <= 5);
    }

    #[test]
    fn word_count_counts_whitespace_runs() {
        assert_eq!(word_count("  a  b   c "), 3);
    }
}
