//! Decides which remote match ids belong to a tournament or scrim.

use crate::error::PipelineError;
use crate::pubg_api::MatchApi;
use crate::storage::MatchStore;

fn clean_ids(ids: &[String]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    ids.iter()
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty() && seen.insert(id.clone()))
        .collect()
}

/// Resolve the authoritative match id set for `scope`.
///
/// Custom-match mode uses the admin-configured static list. Otherwise
/// the previously linked ids are used, unless there are none or the
/// caller asked for a fresh read, in which case the remote tournament
/// lookup is consulted and overrides the cache. Every resolved id is
/// linked to the tournament before returning so later cached reads see
/// the full history.
pub async fn resolve_match_ids(
    store: &dyn MatchStore,
    api: &dyn MatchApi,
    scope: &common::AggregationScope,
    fresh: bool,
) -> Result<Vec<String>, PipelineError> {
    let match_ids = if scope.custom_match_mode {
        let cleaned = clean_ids(&scope.custom_match_ids);
        if cleaned.is_empty() {
            return Err(PipelineError::configuration(
                "Custom match needs match IDs",
            ));
        }
        cleaned
    } else {
        let mut ids = Vec::new();
        if !fresh {
            ids = store.tournament_match_ids(&scope.tournament_id).await?;
        }
        if ids.is_empty() || fresh {
            let remote_tournament_id =
                scope.remote_tournament_id.as_deref().ok_or_else(|| {
                    PipelineError::configuration("PUBG tournament ID not configured")
                })?;
            ids = api.fetch_tournament_match_ids(remote_tournament_id).await?;
        }
        clean_ids(&ids)
    };

    if match_ids.is_empty() {
        return Err(PipelineError::configuration("No match IDs available"));
    }

    store
        .link_tournament_matches(&scope.tournament_id, &match_ids)
        .await?;

    Ok(match_ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MatchStore, MemoryStore};
    use crate::testutil::FakeApi;
    use pretty_assertions::assert_eq;

    fn scope(custom: bool) -> common::AggregationScope {
        common::AggregationScope {
            tournament_id: "t1".to_string(),
            custom_match_mode: custom,
            custom_match_ids: Vec::new(),
            remote_tournament_id: None,
            allow_non_custom: false,
            credential: None,
        }
    }

    #[tokio::test]
    async fn custom_mode_uses_the_configured_list() {
        let store = MemoryStore::new();
        let api = FakeApi::default();
        let mut scope = scope(true);
        scope.custom_match_ids = vec![
            " m1 ".to_string(),
            "m2".to_string(),
            "m1".to_string(),
            "".to_string(),
        ];

        let ids = resolve_match_ids(&store, &api, &scope, false).await.unwrap();

        assert_eq!(ids, vec!["m1".to_string(), "m2".to_string()]);
        assert_eq!(api.tournament_calls(), 0);
        // Resolved ids were linked for future cached reads.
        assert_eq!(
            store.tournament_match_ids("t1").await.unwrap(),
            vec!["m1".to_string(), "m2".to_string()]
        );
    }

    #[tokio::test]
    async fn custom_mode_without_ids_is_an_error() {
        let store = MemoryStore::new();
        let api = FakeApi::default();

        let result = resolve_match_ids(&store, &api, &scope(true), false).await;

        assert!(matches!(result, Err(PipelineError::Configuration(_))));
    }

    #[tokio::test]
    async fn cached_read_skips_the_remote_lookup() {
        let store = MemoryStore::new();
        store
            .link_tournament_matches("t1", &["m1".to_string()])
            .await
            .unwrap();
        let api = FakeApi {
            tournament_ids: vec!["m2".to_string()],
            ..FakeApi::default()
        };
        let mut scope = scope(false);
        scope.remote_tournament_id = Some("remote-1".to_string());

        let ids = resolve_match_ids(&store, &api, &scope, false).await.unwrap();

        assert_eq!(ids, vec!["m1".to_string()]);
        assert_eq!(api.tournament_calls(), 0);
    }

    #[tokio::test]
    async fn fresh_read_always_asks_the_remote_service() {
        let store = MemoryStore::new();
        store
            .link_tournament_matches("t1", &["m1".to_string()])
            .await
            .unwrap();
        let api = FakeApi {
            tournament_ids: vec!["m2".to_string(), "m3".to_string()],
            ..FakeApi::default()
        };
        let mut scope = scope(false);
        scope.remote_tournament_id = Some("remote-1".to_string());

        let ids = resolve_match_ids(&store, &api, &scope, true).await.unwrap();

        assert_eq!(ids, vec!["m2".to_string(), "m3".to_string()]);
        assert_eq!(api.tournament_calls(), 1);
        // The link table now holds old and new ids.
        assert_eq!(
            store.tournament_match_ids("t1").await.unwrap(),
            vec!["m1".to_string(), "m2".to_string(), "m3".to_string()]
        );
    }

    #[tokio::test]
    async fn empty_cache_falls_through_to_the_remote_lookup() {
        let store = MemoryStore::new();
        let api = FakeApi {
            tournament_ids: vec!["m1".to_string()],
            ..FakeApi::default()
        };
        let mut scope = scope(false);
        scope.remote_tournament_id = Some("remote-1".to_string());

        let ids = resolve_match_ids(&store, &api, &scope, false).await.unwrap();

        assert_eq!(ids, vec!["m1".to_string()]);
        assert_eq!(api.tournament_calls(), 1);
    }

    #[tokio::test]
    async fn missing_remote_id_without_cache_is_an_error() {
        let store = MemoryStore::new();
        let api = FakeApi::default();

        let result = resolve_match_ids(&store, &api, &scope(false), false).await;

        assert!(matches!(result, Err(PipelineError::Configuration(_))));
        assert_eq!(api.tournament_calls(), 0);
    }

    #[tokio::test]
    async fn missing_remote_id_with_cache_still_serves_cached_reads() {
        let store = MemoryStore::new();
        store
            .link_tournament_matches("t1", &["m1".to_string()])
            .await
            .unwrap();
        let api = FakeApi::default();

        let ids = resolve_match_ids(&store, &api, &scope(false), false).await.unwrap();
        assert_eq!(ids, vec!["m1".to_string()]);

        // A fresh read demands the remote id.
        let result = resolve_match_ids(&store, &api, &scope(false), true).await;
        assert!(matches!(result, Err(PipelineError::Configuration(_))));
    }
}
