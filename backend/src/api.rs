use std::sync::Arc;

pub struct AppState {
    pub store: Arc<dyn crate::storage::MatchStore>,
    pub aggregator: Arc<aggregation::Aggregator>,
    /// Fallback credential for requests that do not carry their own.
    pub default_api_key: Option<String>,
}

pub mod live {
    use axum::extract::State;
    use std::sync::Arc;

    #[derive(Debug, serde::Deserialize)]
    pub struct LiveRequest {
        pub scope: common::AggregationScope,
        #[serde(default)]
        pub options: common::LiveOptions,
    }

    pub fn router(state: Arc<super::AppState>) -> axum::Router {
        axum::Router::new()
            .route("/", axum::routing::post(run))
            .with_state(state)
    }

    async fn run(
        State(state): State<Arc<super::AppState>>,
        axum::Json(request): axum::Json<LiveRequest>,
    ) -> Result<axum::Json<common::LiveData>, crate::error::PipelineError> {
        tracing::info!("Live data for {:?}", request.scope.tournament_id);

        let mut scope = request.scope;
        if scope.credential.is_none() {
            scope.credential = state.default_api_key.clone();
        }

        let client = crate::pubg_api::Client::new(scope.credential.clone());
        let data = crate::live::live_data(
            state.store.as_ref(),
            &client,
            &state.aggregator,
            &scope,
            &request.options,
        )
        .await?;

        Ok(axum::Json(data))
    }
}

pub mod matches {
    use axum::extract::{Path, State};
    use std::sync::Arc;

    use aggregation::document::MatchDocument;

    pub fn router(state: Arc<super::AppState>) -> axum::Router {
        axum::Router::new()
            .route("/", axum::routing::get(list))
            .route("/:id", axum::routing::get(by_id))
            .with_state(state)
    }

    async fn list(
        State(state): State<Arc<super::AppState>>,
    ) -> Result<axum::Json<Vec<MatchDocument>>, axum::http::StatusCode> {
        let documents = state.store.all_matches().await.map_err(|e| {
            tracing::error!("Loading stored matches: {}", e);
            axum::http::StatusCode::INTERNAL_SERVER_ERROR
        })?;
        Ok(axum::Json(documents))
    }

    async fn by_id(
        State(state): State<Arc<super::AppState>>,
        Path(match_id): Path<String>,
    ) -> Result<axum::Json<MatchDocument>, axum::http::StatusCode> {
        let mut documents = state
            .store
            .matches_by_ids(&[match_id.clone()])
            .await
            .map_err(|e| {
                tracing::error!("Loading stored match {}: {}", match_id, e);
                axum::http::StatusCode::INTERNAL_SERVER_ERROR
            })?;

        documents
            .remove(&match_id)
            .map(axum::Json)
            .ok_or(axum::http::StatusCode::NOT_FOUND)
    }
}

pub mod players {
    use axum::extract::{Path, Query, State};
    use serde::Deserialize;
    use std::sync::Arc;

    use crate::pubg_api::MatchApi;

    #[derive(Debug, Deserialize)]
    pub struct MatchesQuery {
        pub limit: Option<usize>,
    }

    pub fn router(state: Arc<super::AppState>) -> axum::Router {
        axum::Router::new()
            .route("/:name/matches", axum::routing::get(recent_matches))
            .with_state(state)
    }

    async fn recent_matches(
        State(state): State<Arc<super::AppState>>,
        Path(name): Path<String>,
        Query(query): Query<MatchesQuery>,
    ) -> Result<axum::Json<common::PlayerMatchIds>, crate::error::PipelineError> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(crate::error::PipelineError::configuration(
                "Player name is required",
            ));
        }

        let client = crate::pubg_api::Client::new(state.default_api_key.clone());
        let match_ids = client
            .fetch_player_match_ids(&name, query.limit.unwrap_or(50))
            .await?;

        Ok(axum::Json(common::PlayerMatchIds {
            player_name: name,
            match_ids,
        }))
    }
}

pub fn router(state: AppState) -> axum::Router {
    let state = Arc::new(state);
    axum::Router::new()
        .nest("/live", live::router(state.clone()))
        .nest("/matches", matches::router(state.clone()))
        .nest("/players", players::router(state))
}
