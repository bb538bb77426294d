use diesel::prelude::*;

// `treat_none_as_null` on the changeset derives gives re-ingestion
// full-overwrite semantics: a column the new payload omits is cleared,
// never merged with the previous value.

#[derive(Queryable, Selectable, Insertable, AsChangeset, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::schema::matches)]
#[diesel(treat_none_as_null = true)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MatchRow {
    pub match_id: String,
    pub payload: serde_json::Value,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub duration: Option<i32>,
    pub game_mode: Option<String>,
    pub is_custom_match: bool,
    pub map_name: Option<String>,
    pub map_display_name: Option<String>,
    pub match_type: Option<String>,
    pub season_state: Option<String>,
    pub shard_id: Option<String>,
    pub title_id: Option<String>,
    pub stats: serde_json::Value,
    pub tags: serde_json::Value,
}

#[derive(Queryable, Selectable, Insertable, AsChangeset, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::schema::match_rosters)]
#[diesel(treat_none_as_null = true)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RosterRow {
    pub roster_id: String,
    pub match_id: String,
    pub team_id: Option<String>,
    pub rank: Option<i32>,
    pub won: bool,
    pub shard_id: Option<String>,
}

#[derive(Queryable, Selectable, Insertable, AsChangeset, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::schema::match_participants)]
#[diesel(treat_none_as_null = true)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ParticipantRow {
    pub participant_id: String,
    pub match_id: String,
    pub roster_id: Option<String>,
    pub player_id: Option<String>,
    pub player_name: Option<String>,
    pub shard_id: Option<String>,
    pub dbnos: Option<i32>,
    pub assists: Option<i32>,
    pub boosts: Option<i32>,
    pub damage_dealt: Option<f64>,
    pub death_type: Option<String>,
    pub headshot_kills: Option<i32>,
    pub heals: Option<i32>,
    pub kill_place: Option<i32>,
    pub kill_streaks: Option<i32>,
    pub kills: Option<i32>,
    pub longest_kill: Option<f64>,
    pub revives: Option<i32>,
    pub ride_distance: Option<f64>,
    pub road_kills: Option<i32>,
    pub swim_distance: Option<f64>,
    pub team_kills: Option<i32>,
    pub time_survived: Option<f64>,
    pub vehicle_destroys: Option<i32>,
    pub walk_distance: Option<f64>,
    pub weapons_acquired: Option<i32>,
    pub win_place: Option<i32>,
    pub raw_stats: Option<serde_json::Value>,
}

#[derive(Queryable, Selectable, Insertable, AsChangeset, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::schema::match_assets)]
#[diesel(treat_none_as_null = true)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AssetRow {
    pub asset_id: String,
    pub match_id: String,
    pub url: Option<String>,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub description: Option<String>,
    pub name: Option<String>,
}

#[derive(Queryable, Selectable, Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::schema::match_roster_participants)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RosterParticipantRow {
    pub roster_id: String,
    pub participant_id: String,
}

#[derive(Queryable, Selectable, Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::schema::tournament_matches)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TournamentMatchRow {
    pub tournament_id: String,
    pub match_id: String,
}
