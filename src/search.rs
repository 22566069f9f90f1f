//! # Search
//!
//! Local-only retrieval over a ready session: embed the query remotely, rank
//! every stored record by cosine similarity, and resolve the survivors back
//! to local file handles. No image leaves the machine during a search.

use std::cmp::Ordering;
use tracing::debug;

use crate::api::EmbeddingClient;
use crate::error::VaultError;
use crate::models::{RenderableResult, ScoredRecord};
use crate::session::SessionState;
use crate::similarity::cosine_similarity;

/// Fixed cap on ranked records considered for rendering.
pub const RESULT_LIMIT: usize = 12;

/// Runs a free-text query against the session's loaded index.
///
/// Fails fast with [`VaultError::NotReady`], before any remote call, when
/// the session is missing either half or the query is blank. A failed query
/// embedding surfaces whole as [`VaultError::Embed`]; there are no partial
/// results.
///
/// Ranking is a full scan: every record is scored, the scores are sorted
/// descending with a stable sort so equal similarities keep their index
/// order, and the top [`RESULT_LIMIT`] survive. Records whose path has no
/// handle in the current folder selection are then dropped silently, so a
/// search can return fewer than [`RESULT_LIMIT`] results, but ranks beyond
/// the cap are never pulled in to back-fill.
pub async fn search(
    client: &EmbeddingClient,
    session: &SessionState,
    query: &str,
) -> Result<Vec<RenderableResult>, VaultError> {
    if query.trim().is_empty() || !session.is_ready() {
        return Err(VaultError::NotReady);
    }

    let Some(index) = session.index() else {
        return Err(VaultError::NotReady);
    };

    let query_vector = client.embed(query).await?;

    let mut scored: Vec<ScoredRecord<'_>> = index
        .records()
        .iter()
        .map(|record| ScoredRecord {
            record,
            similarity: cosine_similarity(&query_vector, &record.vector),
        })
        .collect();

    // Stable sort: equal-similarity records keep their index order.
    scored.sort_by(|a, b| {
        b.similarity
            .partial_cmp(&a.similarity)
            .unwrap_or(Ordering::Equal)
    });
    scored.truncate(RESULT_LIMIT);

    let mut results = Vec::with_capacity(scored.len());
    for hit in scored {
        match session.resolve(&hit.record.path) {
            Some(handle) => results.push(RenderableResult {
                path: hit.record.path.clone(),
                description: hit.record.description.clone(),
                similarity: hit.similarity,
                handle: handle.clone(),
            }),
            None => debug!("No local file for indexed path: {}", hit.record.path),
        }
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MemeVaultConfig;
    use crate::indexer::export_index;
    use crate::models::{ImageIndex, IndexRecord};
    use httpmock::prelude::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn client_for(server: &MockServer) -> EmbeddingClient {
        let config = MemeVaultConfig {
            api_base: server.base_url(),
            api_key: String::new(),
        };
        EmbeddingClient::new(&config).unwrap()
    }

    fn record(path: &str, vector: Vec<f32>) -> IndexRecord {
        IndexRecord {
            path: path.to_string(),
            description: format!("description of {path}"),
            vector,
        }
    }

    /// Session with the given records loaded and a folder containing the
    /// listed file names.
    fn session_with(records: Vec<IndexRecord>, files: &[&str]) -> (SessionState, TempDir) {
        let dir = TempDir::new().unwrap();
        for name in files {
            fs::write(dir.path().join(name), b"x").unwrap();
        }

        let mut session = SessionState::new();
        let artifact = export_index(&ImageIndex::from_records(records)).unwrap();
        session.load_index(&artifact).unwrap();
        session.load_folder(dir.path()).unwrap();

        (session, dir)
    }

    async fn mock_embed(server: &MockServer, vector: Vec<f32>) -> httpmock::Mock<'_> {
        let body = json!({ "vector": vector });
        server
            .mock_async(move |when, then| {
                when.method(POST).path("/embed-text");
                then.status(200).json_body(body);
            })
            .await
    }

    #[tokio::test]
    async fn test_ranking_is_stable_on_ties() {
        let server = MockServer::start_async().await;
        mock_embed(&server, vec![1.0, 0.0]).await;

        let (session, _dir) = session_with(
            vec![
                record("p1.png", vec![1.0, 0.0]),
                record("p2.png", vec![0.0, 1.0]),
                record("p3.png", vec![1.0, 0.0]),
            ],
            &["p1.png", "p2.png", "p3.png"],
        );

        let client = client_for(&server);
        let results = search(&client, &session, "red meme").await.unwrap();

        let paths: Vec<&str> = results.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["p1.png", "p3.png", "p2.png"]);
        assert!((results[0].similarity - 1.0).abs() < 1e-6);
        assert!((results[1].similarity - 1.0).abs() < 1e-6);
        assert!(results[2].similarity.abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_not_ready_makes_no_remote_call() {
        let server = MockServer::start_async().await;
        let embed = mock_embed(&server, vec![1.0]).await;

        let mut session = SessionState::new();
        let artifact = export_index(&ImageIndex::from_records(vec![record(
            "a.png",
            vec![1.0],
        )]))
        .unwrap();
        session.load_index(&artifact).unwrap();

        let client = client_for(&server);
        let result = search(&client, &session, "anything").await;

        assert!(matches!(result, Err(VaultError::NotReady)));
        assert_eq!(embed.hits_async().await, 0);
    }

    #[tokio::test]
    async fn test_blank_query_is_not_ready() {
        let server = MockServer::start_async().await;
        let embed = mock_embed(&server, vec![1.0]).await;

        let (session, _dir) = session_with(vec![record("a.png", vec![1.0])], &["a.png"]);

        let client = client_for(&server);
        assert!(matches!(
            search(&client, &session, "").await,
            Err(VaultError::NotReady)
        ));
        assert!(matches!(
            search(&client, &session, "   ").await,
            Err(VaultError::NotReady)
        ));
        assert_eq!(embed.hits_async().await, 0);
    }

    #[tokio::test]
    async fn test_embed_failure_propagates_whole() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/embed-text");
                then.status(500);
            })
            .await;

        let (session, _dir) = session_with(vec![record("a.png", vec![1.0])], &["a.png"]);

        let client = client_for(&server);
        let result = search(&client, &session, "query").await;

        assert!(matches!(result, Err(VaultError::Embed(_))));
    }

    #[tokio::test]
    async fn test_unmatched_handles_drop_without_backfill() {
        let server = MockServer::start_async().await;
        mock_embed(&server, vec![1.0, 0.0]).await;

        // Twelve top-scoring records, three of which have no local file, and
        // two lower-scoring records that do. The cap applies before handle
        // resolution, so the lower ranks must not reappear.
        let mut records = Vec::new();
        let mut present = Vec::new();
        for i in 1..=12 {
            let name = format!("r{i}.png");
            records.push(record(&name, vec![1.0, 0.0]));
            if ![2, 5, 9].contains(&i) {
                present.push(name);
            }
        }
        records.push(record("r13.png", vec![0.9, 0.1]));
        records.push(record("r14.png", vec![0.9, 0.1]));
        present.push("r13.png".to_string());
        present.push("r14.png".to_string());

        let names: Vec<&str> = present.iter().map(|s| s.as_str()).collect();
        let (session, _dir) = session_with(records, &names);

        let client = client_for(&server);
        let results = search(&client, &session, "query").await.unwrap();

        assert_eq!(results.len(), 9);
        assert!(results.iter().all(|r| r.path != "r13.png"));
        assert!(results.iter().all(|r| r.path != "r14.png"));
        assert!(results.iter().all(|r| !["r2.png", "r5.png", "r9.png"]
            .contains(&r.path.as_str())));
    }

    #[tokio::test]
    async fn test_mismatched_vector_lengths_rank_last() {
        let server = MockServer::start_async().await;
        mock_embed(&server, vec![1.0, 0.0]).await;

        let (session, _dir) = session_with(
            vec![
                record("stale.png", vec![1.0, 0.0, 0.0]),
                record("fresh.png", vec![0.5, 0.5]),
            ],
            &["stale.png", "fresh.png"],
        );

        let client = client_for(&server);
        let results = search(&client, &session, "query").await.unwrap();

        assert_eq!(results[0].path, "fresh.png");
        assert_eq!(results[1].path, "stale.png");
        assert_eq!(results[1].similarity, 0.0);
    }

    #[tokio::test]
    async fn test_results_resolve_to_local_handles() {
        let server = MockServer::start_async().await;
        mock_embed(&server, vec![1.0]).await;

        let (session, dir) = session_with(vec![record("a.png", vec![1.0])], &["a.png"]);

        let client = client_for(&server);
        let results = search(&client, &session, "query").await.unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].handle.path(), dir.path().join("a.png"));
        assert_eq!(results[0].description, "description of a.png");
    }
}
