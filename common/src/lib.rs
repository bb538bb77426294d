//! Shared request/response types between the backend and its consumers.

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AggregationScope {
    /// Logical tournament/scrim identifier, used as the cache identity
    /// and as the key into the tournament/match link table.
    pub tournament_id: String,
    #[serde(default)]
    pub custom_match_mode: bool,
    #[serde(default)]
    pub custom_match_ids: Vec<String>,
    #[serde(default)]
    pub remote_tournament_id: Option<String>,
    #[serde(default)]
    pub allow_non_custom: bool,
    #[serde(default)]
    pub credential: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LiveOptions {
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub fresh: bool,
}

fn default_limit() -> usize {
    12
}

impl Default for LiveOptions {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            fresh: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AggregationResult {
    pub tournament: AggregatedTournament,
    pub matches: Vec<MatchSummary>,
    pub team_stats: Vec<TeamStats>,
    pub player_stats: Vec<PlayerStats>,
    pub leaderboards: Leaderboards,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AggregatedTournament {
    pub id: String,
    /// Number of matches resolved for the tournament before the limit
    /// was applied, not the number that survived filtering.
    pub match_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MatchSummary {
    pub match_id: String,
    pub map_name: Option<String>,
    pub game_mode: Option<String>,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub duration: Option<i32>,
    pub match_type: Option<String>,
    pub winner_team_id: Option<String>,
    pub winner_team_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TeamStats {
    pub team_id: String,
    pub team_name: String,
    pub matches_played: u32,
    pub wins: u32,
    pub total_kills: i64,
    pub total_points: i64,
    pub avg_placement: f64,
    pub win_rate: f64,
    pub players: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PlayerStats {
    pub player_name: String,
    pub matches_played: u32,
    pub total_kills: i64,
    pub assists: i64,
    pub revives: i64,
    pub deaths: i64,
    pub death_reason: DeathReason,
    pub total_points: i64,
    pub avg_placement: f64,
    pub kd_ratio: f64,
    pub damage: i64,
    pub wins: u32,
}

/// Last-known elimination cause across every match a player was seen
/// in. Only reported when a single category was observed; any mixture
/// (or an unrecognized cause) collapses to `CannotDetermine`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum DeathReason {
    #[serde(rename = "alive")]
    Alive,
    #[serde(rename = "killed")]
    Killed,
    #[serde(rename = "suicide")]
    Suicide,
    #[serde(rename = "Cannot determine")]
    CannotDetermine,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Leaderboards {
    pub teams: Vec<TeamStats>,
    pub players: Vec<PlayerStats>,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PlayerMatchIds {
    pub player_name: String,
    pub match_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LiveData {
    /// `db`, `db+pubg` or `db+pubg-custom`, depending on whether any
    /// documents had to be fetched remotely.
    pub source: String,
    pub tournament_id: String,
    pub remote_tournament_id: Option<String>,
    pub from_store: Vec<String>,
    pub fetched: Vec<String>,
    #[serde(flatten)]
    pub result: AggregationResult,
}
