use serde::Deserialize;

use crate::error::ApiError;
use aggregation::document::MatchDocument;

static PUBG_BASE: &str = "https://api.pubg.com/shards/steam";

/// Read-only access to the remote match API. One implementation talks
/// to the real service, tests script their own.
#[async_trait::async_trait]
pub trait MatchApi: Send + Sync {
    async fn fetch_match(&self, id: &str) -> Result<MatchDocument, ApiError>;

    async fn fetch_tournament_match_ids(
        &self,
        remote_tournament_id: &str,
    ) -> Result<Vec<String>, ApiError>;

    async fn fetch_player_match_ids(
        &self,
        name: &str,
        limit: usize,
    ) -> Result<Vec<String>, ApiError>;

    /// Fetch several matches, strictly sequentially and with duplicate
    /// ids requested only once. Individual fetch failures are logged
    /// and skipped, a missing credential aborts the batch.
    async fn fetch_matches(&self, ids: &[String]) -> Result<Vec<MatchDocument>, ApiError> {
        let mut seen = std::collections::HashSet::new();
        let mut payloads = Vec::new();
        for id in ids.iter().map(|id| id.trim()).filter(|id| !id.is_empty()) {
            if !seen.insert(id.to_string()) {
                continue;
            }
            match self.fetch_match(id).await {
                Ok(document) => payloads.push(document),
                Err(ApiError::MissingCredential) => return Err(ApiError::MissingCredential),
                Err(e) => {
                    tracing::warn!("Fetching match {}: {}", id, e);
                }
            }
        }
        Ok(payloads)
    }
}

pub struct Client {
    http: reqwest::Client,
    base: String,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TournamentResponse {
    data: TournamentData,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct TournamentData {
    relationships: TournamentRelationships,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct TournamentRelationships {
    matches: RefList,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct RefList {
    data: Vec<MatchRef>,
}

#[derive(Debug, Deserialize)]
struct MatchRef {
    id: String,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct PlayersResponse {
    data: Vec<PlayerRecord>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct PlayerRecord {
    relationships: PlayerRelationships,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct PlayerRelationships {
    matches: RefList,
}

impl Client {
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_base(PUBG_BASE, api_key)
    }

    pub fn with_base<IS>(base: IS, api_key: Option<String>) -> Self
    where
        IS: Into<String>,
    {
        Self {
            http: reqwest::Client::new(),
            base: base.into(),
            api_key,
        }
    }

    async fn get<T>(&self, path: &str, args: &[(&str, &str)]) -> Result<T, ApiError>
    where
        T: serde::de::DeserializeOwned,
    {
        let key = self.api_key.as_deref().ok_or(ApiError::MissingCredential)?;

        let response = self
            .http
            .get(format!("{}{}", self.base, path))
            .query(args)
            .header("Authorization", format!("Bearer {}", key))
            .header("Accept", "application/vnd.api+json")
            .send()
            .await
            .map_err(ApiError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if status == reqwest::StatusCode::NOT_FOUND {
                return Err(ApiError::NotFound {
                    path: path.to_string(),
                    body,
                });
            }
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response.json::<T>().await.map_err(ApiError::Transport)
    }
}

#[async_trait::async_trait]
impl MatchApi for Client {
    async fn fetch_match(&self, id: &str) -> Result<MatchDocument, ApiError> {
        self.get(&format!("/matches/{}", id), &[]).await
    }

    async fn fetch_tournament_match_ids(
        &self,
        remote_tournament_id: &str,
    ) -> Result<Vec<String>, ApiError> {
        let response: TournamentResponse = self
            .get(&format!("/tournaments/{}", remote_tournament_id), &[])
            .await?;

        let mut seen = std::collections::HashSet::new();
        Ok(response
            .data
            .relationships
            .matches
            .data
            .into_iter()
            .map(|reference| reference.id)
            .filter(|id| !id.is_empty() && seen.insert(id.clone()))
            .collect())
    }

    async fn fetch_player_match_ids(
        &self,
        name: &str,
        limit: usize,
    ) -> Result<Vec<String>, ApiError> {
        let response: PlayersResponse = self
            .get("/players", &[("filter[playerNames]", name)])
            .await?;

        let ids = response
            .data
            .into_iter()
            .next()
            .map(|player| {
                player
                    .relationships
                    .matches
                    .data
                    .into_iter()
                    .map(|reference| reference.id)
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        Ok(ids.into_iter().take(limit).collect())
    }
}
