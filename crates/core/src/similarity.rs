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

//! Pure, stateless similarity primitives. No allocation beyond
//! the returned values; safe to call from any synchronous context.

use crate::error::{CoreError, CoreResult};

/// Cosine similarity of `u` and `v`, clamped to `[-1, 1]`.
///
/// Returns `0.0` if either vector has zero magnitude. Fails with
/// `CoreError::DimensionMismatch` when the vectors differ in length.
pub fn cosine(u: &[f32], v: &[f32]) -> CoreResult<f32> {
    if u.len() != v.len() {
        return Err(CoreError::DimensionMismatch {
            expected: u.len(),
            found: v.len(),
        });
    }

    let mut dot = 0.0_f32;
    let mut norm_u = 0.0_f32;
    let mut norm_v = 0.0_f32;
    for (a, b) in u.iter().zip(v.iter()) {
        dot += a * b;
        norm_u += a * a;
        norm_v += b * b;
    }

    if norm_u == 0.0 || norm_v == 0.0 {
        return Ok(0.0);
    }

    let sim = dot / (norm_u.sqrt() * norm_v.sqrt());
    Ok(sim.clamp(-1.0, 1.0))
}

/// Arithmetic mean per coordinate. The empty vector iff `vectors` is empty.
pub fn centroid(vectors: &[&[f32]]) -> Vec<f32> {
    let Some(dim) = vectors.first().map(|v| v.len()) else {
        return Vec::new();
    };

    let mut sums = vec![0.0_f32; dim];
    for vector in vectors {
        for (sum, value) in sums.iter_mut().zip(vector.iter()) {
            *sum += value;
        }
    }

    let n = vectors.len() as f32;
    for sum in &mut sums {
        *sum /= n;
    }
    sums
}

/// Average pairwise cosine similarity across `vectors`. `1.0` for `n <= 1`.
pub fn cohesion(vectors: &[&[f32]]) -> CoreResult<f32> {
    let n = vectors.len();
    if n <= 1 {
        return Ok(1.0);
    }

    let mut total = 0.0_f32;
    let mut pairs = 0usize;
    for i in 0..n {
        for j in (i + 1)..n {
            total += cosine(vectors[i], vectors[j])?;
            pairs += 1;
        }
    }

    Ok((total / pairs as f32).clamp(-1.0, 1.0))
}

/// Validate that every component of `embedding` is finite.
pub fn validate_finite(embedding: &[f32]) -> CoreResult<()> {
    if embedding.iter().any(|x| !x.is_finite()) {
        return Err(CoreError::NonFiniteEmbedding);
    }
    Ok(())
}
