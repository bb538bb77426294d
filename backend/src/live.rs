//! The live-data pipeline: resolve ids, fetch what the store is
//! missing, normalize, aggregate.

use crate::error::PipelineError;
use crate::normalizer;
use crate::pubg_api::MatchApi;
use crate::resolver;
use crate::storage::MatchStore;
use aggregation::document::MatchDocument;

/// One sequential pass over a tournament's matches. Remote fetches
/// happen only for ids the store does not already hold; documents that
/// fail to fetch or persist are dropped from the aggregation rather
/// than failing the request.
pub async fn live_data(
    store: &dyn MatchStore,
    api: &dyn MatchApi,
    aggregator: &aggregation::Aggregator,
    scope: &common::AggregationScope,
    options: &common::LiveOptions,
) -> Result<common::LiveData, PipelineError> {
    let match_ids = resolver::resolve_match_ids(store, api, scope, options.fresh).await?;
    let limited: Vec<String> = match_ids.iter().take(options.limit).cloned().collect();

    let mut stored = store.matches_by_ids(&limited).await?;
    let missing: Vec<String> = limited
        .iter()
        .filter(|id| !stored.contains_key(*id))
        .cloned()
        .collect();

    let mut fetched = Vec::new();
    if !missing.is_empty() {
        tracing::info!(
            "Fetching {} of {} matches for {}",
            missing.len(),
            limited.len(),
            scope.tournament_id
        );
        let payloads = api.fetch_matches(&missing).await?;
        for document in &payloads {
            match normalizer::normalize(store, document).await {
                Ok(()) => fetched.push(document.data.id.clone()),
                Err(e) => {
                    tracing::warn!("Normalizing match {}: {}", document.data.id, e);
                }
            }
        }
        stored = store.matches_by_ids(&limited).await?;
    }

    let from_store: Vec<String> = limited
        .iter()
        .filter(|id| stored.contains_key(*id) && !fetched.contains(id))
        .cloned()
        .collect();

    // Hand the documents to the aggregation in resolution order.
    let ordered: Vec<MatchDocument> = limited
        .iter()
        .filter_map(|id| stored.remove(id))
        .collect();

    let mut params = aggregation::AggregateParams::new(scope.tournament_id.clone());
    params.limit = options.limit;
    params.fresh = options.fresh;
    params.only_custom = scope.custom_match_mode && !scope.allow_non_custom;
    params.tournament_id = Some(
        scope
            .remote_tournament_id
            .clone()
            .unwrap_or_else(|| scope.tournament_id.clone()),
    );
    params.match_count = match_ids.len();

    let result = aggregator.aggregate(&ordered, &params);

    let source = if fetched.is_empty() {
        "db"
    } else if scope.custom_match_mode {
        "db+pubg-custom"
    } else {
        "db+pubg"
    };

    Ok(common::LiveData {
        source: source.to_string(),
        tournament_id: scope.tournament_id.clone(),
        remote_tournament_id: scope.remote_tournament_id.clone(),
        from_store,
        fetched,
        result,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crate::testutil::{document, participant, roster, FakeApi};
    use pretty_assertions::assert_eq;

    fn custom_scope(ids: &[&str]) -> common::AggregationScope {
        common::AggregationScope {
            tournament_id: "t1".to_string(),
            custom_match_mode: true,
            custom_match_ids: ids.iter().map(|id| id.to_string()).collect(),
            remote_tournament_id: None,
            allow_non_custom: true,
            credential: None,
        }
    }

    fn two_documents() -> Vec<aggregation::document::MatchDocument> {
        vec![
            document(
                "m1",
                true,
                vec![
                    roster("r1", 1, 1, &["p1"]),
                    participant("p1", "ace", 3, 1, Some("alive")),
                ],
            ),
            document(
                "m2",
                true,
                vec![
                    roster("r1", 2, 1, &["p2"]),
                    participant("p2", "beta", 1, 1, Some("alive")),
                ],
            ),
        ]
    }

    #[tokio::test]
    async fn custom_mode_fetches_each_missing_match_once() {
        let store = MemoryStore::new();
        let api = FakeApi::with_matches(two_documents());
        let aggregator = aggregation::Aggregator::new();

        let data = live_data(
            &store,
            &api,
            &aggregator,
            &custom_scope(&["m1", "m2"]),
            &common::LiveOptions::default(),
        )
        .await
        .unwrap();

        assert_eq!(api.match_calls(), 2);
        assert_eq!(api.tournament_calls(), 0);
        assert_eq!(data.source, "db+pubg-custom");
        assert_eq!(data.fetched, vec!["m1".to_string(), "m2".to_string()]);
        assert_eq!(data.from_store, Vec::<String>::new());
        assert_eq!(data.result.matches.len(), 2);
        assert_eq!(data.result.tournament.match_count, 2);
    }

    #[tokio::test]
    async fn stored_matches_are_not_refetched() {
        let store = MemoryStore::new();
        let api = FakeApi::with_matches(two_documents());
        let aggregator = aggregation::Aggregator::new();
        let scope = custom_scope(&["m1", "m2"]);

        live_data(&store, &api, &aggregator, &scope, &common::LiveOptions::default())
            .await
            .unwrap();
        assert_eq!(api.match_calls(), 2);

        // Everything is persisted now, bypass the aggregation cache to
        // prove the documents come from the store.
        let options = common::LiveOptions {
            fresh: true,
            ..common::LiveOptions::default()
        };
        let data = live_data(&store, &api, &aggregator, &scope, &options)
            .await
            .unwrap();

        assert_eq!(api.match_calls(), 2);
        assert_eq!(data.source, "db");
        assert_eq!(
            data.from_store,
            vec!["m1".to_string(), "m2".to_string()]
        );
        assert_eq!(data.result.matches.len(), 2);
    }

    #[tokio::test]
    async fn unfetchable_matches_are_dropped_not_fatal() {
        let store = MemoryStore::new();
        // Only m1 exists upstream.
        let api = FakeApi::with_matches(two_documents().into_iter().take(1).collect());
        let aggregator = aggregation::Aggregator::new();

        let data = live_data(
            &store,
            &api,
            &aggregator,
            &custom_scope(&["m1", "missing"]),
            &common::LiveOptions::default(),
        )
        .await
        .unwrap();

        assert_eq!(data.fetched, vec!["m1".to_string()]);
        assert_eq!(data.result.matches.len(), 1);
        // The unresolvable id still counted toward the total.
        assert_eq!(data.result.tournament.match_count, 2);
    }

    #[tokio::test]
    async fn aggregation_cache_serves_stale_reads_until_bypassed() {
        let store = MemoryStore::new();
        let api = FakeApi::with_matches(two_documents());
        let aggregator = aggregation::Aggregator::new();

        let first = live_data(
            &store,
            &api,
            &aggregator,
            &custom_scope(&["m1"]),
            &common::LiveOptions::default(),
        )
        .await
        .unwrap();
        assert_eq!(first.result.matches.len(), 1);

        // A second call sees more matches resolved, but the cached
        // aggregation is returned unchanged.
        let cached = live_data(
            &store,
            &api,
            &aggregator,
            &custom_scope(&["m1", "m2"]),
            &common::LiveOptions::default(),
        )
        .await
        .unwrap();
        assert_eq!(cached.result, first.result);

        let options = common::LiveOptions {
            fresh: true,
            ..common::LiveOptions::default()
        };
        let bypassed = live_data(
            &store,
            &api,
            &aggregator,
            &custom_scope(&["m1", "m2"]),
            &options,
        )
        .await
        .unwrap();
        assert_eq!(bypassed.result.matches.len(), 2);
    }

    #[tokio::test]
    async fn limit_bounds_the_fetches() {
        let store = MemoryStore::new();
        let api = FakeApi::with_matches(two_documents());
        let aggregator = aggregation::Aggregator::new();

        let options = common::LiveOptions {
            limit: 1,
            fresh: false,
        };
        let data = live_data(
            &store,
            &api,
            &aggregator,
            &custom_scope(&["m1", "m2"]),
            &options,
        )
        .await
        .unwrap();

        assert_eq!(api.match_calls(), 1);
        assert_eq!(data.result.matches.len(), 1);
        assert_eq!(data.result.tournament.match_count, 2);
    }
}
