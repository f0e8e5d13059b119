//! Similarity ranker — per-fragment embeddings over a section set and
//! cosine-ranked retrieval of the most relevant excerpts.

use serde::Serialize;
use thiserror::Error;

use crate::embedder::{Embedder, EmbeddingError};
use crate::resume::sections::{SectionLabel, SectionSet};

/// Results returned per query when the caller does not say otherwise.
pub const DEFAULT_TOP_N: usize = 3;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("no section embeddings computed yet — upload a resume first")]
    NotReady,

    #[error(transparent)]
    Embedding(#[from] EmbeddingError),
}

/// One embedded content fragment: a whole paragraph section, or a single item
/// of a list section.
#[derive(Debug, Clone)]
struct IndexEntry {
    label: SectionLabel,
    content: String,
    vector: Vec<f32>,
}

/// Embeddings for exactly one version of a `SectionSet`.
/// Rebuilt wholesale whenever the owning set changes — entries are never
/// mixed across section-set versions.
#[derive(Debug, Clone, Default)]
pub struct SectionIndex {
    entries: Vec<IndexEntry>,
}

/// A query result pairing a section label, a content fragment, and its
/// cosine score. Produced fresh per query; never stored.
#[derive(Debug, Clone, Serialize)]
pub struct RankedMatch {
    pub section: SectionLabel,
    pub content: String,
    pub score: f32,
}

/// Embeds every fragment of the section set in traversal order: label
/// declaration order, then item order within a label.
///
/// A failed embedding call aborts the build — no partial index and no
/// zero-vector substitutes.
pub async fn embed_sections(
    sections: &SectionSet,
    embedder: &dyn Embedder,
) -> Result<SectionIndex, EmbeddingError> {
    let mut entries = Vec::new();
    for (label, content) in sections.iter() {
        for fragment in content.fragments() {
            let vector = embedder.embed(fragment).await?;
            entries.push(IndexEntry {
                label,
                content: fragment.to_string(),
                vector,
            });
        }
    }
    Ok(SectionIndex { entries })
}

impl SectionIndex {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Ranks every fragment against the query, descending by cosine score.
    ///
    /// The sort is stable, so equal scores keep traversal order. Asking for
    /// more results than there are fragments returns all of them.
    pub async fn search(
        &self,
        query: &str,
        top_n: usize,
        embedder: &dyn Embedder,
    ) -> Result<Vec<RankedMatch>, SearchError> {
        let query_vector = embedder.embed(query).await?;

        let mut matches: Vec<RankedMatch> = self
            .entries
            .iter()
            .map(|entry| RankedMatch {
                section: entry.label,
                content: entry.content.clone(),
                score: cosine_similarity(&query_vector, &entry.vector),
            })
            .collect();

        matches.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        matches.truncate(top_n);

        Ok(matches)
    }
}

/// Cosine similarity in [-1, 1]. Defined as 0.0 when either vector has zero
/// norm to avoid division by zero.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let mut dot = 0.0_f32;
    let mut norm_a = 0.0_f32;
    let mut norm_b = 0.0_f32;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    let denominator = norm_a.sqrt() * norm_b.sqrt();
    if denominator == 0.0 {
        return 0.0;
    }
    dot / denominator
}

/// Renders matches as human-readable `Section:\nContent` blocks separated by
/// blank lines.
pub fn render_matches(matches: &[RankedMatch]) -> String {
    matches
        .iter()
        .map(|m| format!("{}:\n{}", m.section.heading(), m.content.trim_end()))
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use async_trait::async_trait;

    use super::*;
    use crate::resume::sections::split_sections;

    /// Deterministic fake: a fixed text → vector table, unknown text maps to
    /// the zero vector.
    struct FixedEmbedder(HashMap<String, Vec<f32>>);

    impl FixedEmbedder {
        fn new(pairs: &[(&str, &[f32])]) -> Self {
            Self(
                pairs
                    .iter()
                    .map(|(text, vector)| (text.to_string(), vector.to_vec()))
                    .collect(),
            )
        }
    }

    #[async_trait]
    impl Embedder for FixedEmbedder {
        async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
            Ok(self.0.get(text).cloned().unwrap_or_else(|| vec![0.0, 0.0]))
        }
    }

    /// Fake for the unavailable-capability path.
    struct FailingEmbedder;

    #[async_trait]
    impl Embedder for FailingEmbedder {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>, EmbeddingError> {
            Err(EmbeddingError::Api {
                status: 503,
                message: "embedding backend down".to_string(),
            })
        }
    }

    fn skills_resume() -> SectionSet {
        split_sections("Skills\nRust, Python\n\nEducation\nBS Computer Science")
    }

    fn skills_embedder() -> FixedEmbedder {
        FixedEmbedder::new(&[
            ("Rust", &[1.0, 0.0]),
            ("Python", &[0.0, 1.0]),
            ("BS Computer Science\n", &[0.6, 0.8]),
            ("systems programming", &[1.0, 0.1]),
        ])
    }

    #[test]
    fn test_cosine_is_symmetric() {
        let a = [1.0, 2.0, 3.0];
        let b = [-4.0, 0.5, 2.0];
        assert_eq!(cosine_similarity(&a, &b), cosine_similarity(&b, &a));
    }

    #[test]
    fn test_cosine_of_vector_with_itself_is_one() {
        let a = [3.0, 4.0];
        assert!((cosine_similarity(&a, &a) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_of_opposite_vectors_is_minus_one() {
        let a = [1.0, 2.0];
        let b = [-1.0, -2.0];
        assert!((cosine_similarity(&a, &b) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_zero_norm_is_zero() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]), 0.0);
        assert_eq!(cosine_similarity(&[1.0, 2.0], &[0.0, 0.0]), 0.0);
    }

    #[tokio::test]
    async fn test_index_has_one_entry_per_fragment() {
        let index = embed_sections(&skills_resume(), &skills_embedder())
            .await
            .unwrap();
        // Two skill items plus one education paragraph.
        assert_eq!(index.len(), 3);
    }

    #[tokio::test]
    async fn test_search_ranks_closest_fragment_first() {
        let embedder = skills_embedder();
        let index = embed_sections(&skills_resume(), &embedder).await.unwrap();

        let matches = index
            .search("systems programming", 3, &embedder)
            .await
            .unwrap();
        assert_eq!(matches[0].content, "Rust");
        assert_eq!(matches[0].section, SectionLabel::Skills);
        assert!(matches[0].score > matches[1].score);
    }

    #[tokio::test]
    async fn test_search_is_deterministic() {
        let embedder = skills_embedder();
        let index = embed_sections(&skills_resume(), &embedder).await.unwrap();

        let first = index.search("systems programming", 3, &embedder).await.unwrap();
        let second = index.search("systems programming", 3, &embedder).await.unwrap();
        let order = |matches: &[RankedMatch]| {
            matches.iter().map(|m| m.content.clone()).collect::<Vec<_>>()
        };
        assert_eq!(order(&first), order(&second));
    }

    #[tokio::test]
    async fn test_search_with_large_n_returns_all_fragments() {
        let embedder = skills_embedder();
        let index = embed_sections(&skills_resume(), &embedder).await.unwrap();

        let matches = index.search("Rust", 50, &embedder).await.unwrap();
        assert_eq!(matches.len(), 3);
        for pair in matches.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[tokio::test]
    async fn test_equal_scores_keep_traversal_order() {
        // Every fragment maps to the zero vector, so every score is 0.0 and
        // the stable sort must preserve declaration-then-item order.
        let embedder = FixedEmbedder::new(&[("query", &[1.0, 0.0])]);
        let index = embed_sections(&skills_resume(), &embedder).await.unwrap();

        let matches = index.search("query", 10, &embedder).await.unwrap();
        let contents: Vec<&str> = matches.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["Rust", "Python", "BS Computer Science\n"]);
    }

    #[tokio::test]
    async fn test_failing_embedder_aborts_index_build() {
        let result = embed_sections(&skills_resume(), &FailingEmbedder).await;
        assert!(matches!(result, Err(EmbeddingError::Api { status: 503, .. })));
    }

    #[tokio::test]
    async fn test_failing_embedder_fails_query_with_no_results() {
        let index = embed_sections(&skills_resume(), &skills_embedder())
            .await
            .unwrap();
        let result = index.search("Rust", 3, &FailingEmbedder).await;
        assert!(matches!(result, Err(SearchError::Embedding(_))));
    }

    #[test]
    fn test_render_matches_produces_blank_line_separated_blocks() {
        let matches = vec![
            RankedMatch {
                section: SectionLabel::Skills,
                content: "Rust".to_string(),
                score: 0.9,
            },
            RankedMatch {
                section: SectionLabel::Education,
                content: "BS Computer Science\n".to_string(),
                score: 0.4,
            },
        ];
        assert_eq!(
            render_matches(&matches),
            "Skills:\nRust\n\nEducation:\nBS Computer Science"
        );
    }
}
