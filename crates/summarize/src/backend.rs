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

//! The pluggable abstractive summarization backend.
//!
//! An `AbstractiveBackend` is a text-in/text-out service external to this
//! crate. `summarize_cluster` calls it only when `useLLM` is set and a
//! backend is wired in; on error or absence it falls back to extractive
//! summarization and reports the method it actually used.

use async_trait::async_trait;

use crate::error::Result;

/// A pluggable abstractive summarization service.
#[async_trait]
pub trait AbstractiveBackend: Send + Sync {
    /// Opaque identifier surfaced in error messages and logs.
    fn provider(&self) -> &str;

    /// Produce a summary of `text`, aiming for roughly `target_length`
    /// words. Implementations should return `Err` rather than panic on
    /// any failure; the caller always has an extractive fallback.
    async fn summarize(&self, text: &str, target_length: usize) -> Result<String>;
}
