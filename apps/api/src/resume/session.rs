//! One uploaded résumé and the state derived from it.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::embedder::{Embedder, EmbeddingError};
use crate::resume::ranker::{embed_sections, RankedMatch, SearchError, SectionIndex};
use crate::resume::sections::SectionSet;

/// The current résumé: its section set plus the embeddings derived from it.
///
/// Ownership is linear: one upload owns one section set and one index at a
/// time. A new upload replaces the whole session (last-write-wins); the index
/// is rebuilt whenever the section set changes, so the two never diverge.
#[derive(Debug, Clone)]
pub struct ResumeSession {
    pub id: Uuid,
    pub file_name: String,
    pub uploaded_at: DateTime<Utc>,
    sections: SectionSet,
    index: Option<SectionIndex>,
}

impl ResumeSession {
    pub fn new(file_name: String, sections: SectionSet) -> Self {
        Self {
            id: Uuid::new_v4(),
            file_name,
            uploaded_at: Utc::now(),
            sections,
            index: None,
        }
    }

    pub fn sections(&self) -> &SectionSet {
        &self.sections
    }

    /// Number of embedded content fragments, 0 while no index exists.
    pub fn fragment_count(&self) -> usize {
        self.index.as_ref().map_or(0, SectionIndex::len)
    }

    /// Recomputes the section index from the current section set.
    ///
    /// An empty section set leaves the index unbuilt — there is nothing to
    /// embed, and queries keep failing as not ready. A failed embedding pass
    /// also leaves the index unbuilt rather than half-populated.
    pub async fn rebuild_index(&mut self, embedder: &dyn Embedder) -> Result<(), EmbeddingError> {
        if self.sections.is_empty() {
            self.index = None;
            return Ok(());
        }
        self.index = Some(embed_sections(&self.sections, embedder).await?);
        Ok(())
    }

    /// Ranks the session's fragments against the query.
    /// Fails with `SearchError::NotReady` until `rebuild_index` has succeeded.
    pub async fn search(
        &self,
        query: &str,
        top_n: usize,
        embedder: &dyn Embedder,
    ) -> Result<Vec<RankedMatch>, SearchError> {
        let index = self.index.as_ref().ok_or(SearchError::NotReady)?;
        index.search(query, top_n, embedder).await
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::resume::sections::split_sections;

    struct HashEmbedder;

    #[async_trait]
    impl Embedder for HashEmbedder {
        // Deterministic two-dimensional vector from the text bytes.
        async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
            let sum: u32 = text.bytes().map(u32::from).sum();
            Ok(vec![(sum % 97) as f32 + 1.0, (sum % 13) as f32 + 1.0])
        }
    }

    struct FailingEmbedder;

    #[async_trait]
    impl Embedder for FailingEmbedder {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>, EmbeddingError> {
            Err(EmbeddingError::EmptyResponse)
        }
    }

    #[tokio::test]
    async fn test_search_before_indexing_is_not_ready() {
        let session = ResumeSession::new(
            "resume.pdf".to_string(),
            split_sections("Skills\nRust"),
        );
        let result = session.search("Rust", 3, &HashEmbedder).await;
        assert!(matches!(result, Err(SearchError::NotReady)));
    }

    #[tokio::test]
    async fn test_empty_sections_never_become_ready() {
        let mut session = ResumeSession::new("empty.pdf".to_string(), split_sections(""));
        session.rebuild_index(&HashEmbedder).await.unwrap();

        assert_eq!(session.fragment_count(), 0);
        let result = session.search("anything", 3, &HashEmbedder).await;
        assert!(matches!(result, Err(SearchError::NotReady)));
    }

    #[tokio::test]
    async fn test_indexed_session_answers_queries() {
        let mut session = ResumeSession::new(
            "resume.pdf".to_string(),
            split_sections("Skills\nRust, Go\n\nEducation\nBS Computer Science"),
        );
        session.rebuild_index(&HashEmbedder).await.unwrap();

        assert_eq!(session.fragment_count(), 3);
        let matches = session.search("Rust", 2, &HashEmbedder).await.unwrap();
        assert_eq!(matches.len(), 2);
    }

    #[tokio::test]
    async fn test_failed_rebuild_leaves_session_not_ready() {
        let mut session = ResumeSession::new(
            "resume.pdf".to_string(),
            split_sections("Skills\nRust"),
        );
        assert!(session.rebuild_index(&FailingEmbedder).await.is_err());

        let result = session.search("Rust", 3, &HashEmbedder).await;
        assert!(matches!(result, Err(SearchError::NotReady)));
    }

    #[tokio::test]
    async fn test_hash_embedder_is_deterministic() {
        let a = HashEmbedder.embed("Rust").await.unwrap();
        let b = HashEmbedder.embed("Rust").await.unwrap();
        assert_eq!(a, b);
    }
}
