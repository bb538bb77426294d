//! Persistence for normalized match state.
//!
//! `PgStore` is the durable Postgres implementation; `MemoryStore`
//! keeps everything in process memory and is used when no database is
//! configured, as well as by the tests. Upserts are insert-or-overwrite
//! so two requests ingesting the same match concurrently both land in
//! a consistent final state without locking.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::error::StorageError;
use crate::models::{
    AssetRow, MatchRow, ParticipantRow, RosterParticipantRow, RosterRow, TournamentMatchRow,
};
use aggregation::document::MatchDocument;

#[async_trait::async_trait]
pub trait MatchStore: Send + Sync {
    async fn upsert_match(&self, row: MatchRow) -> Result<(), StorageError>;
    async fn upsert_roster(&self, row: RosterRow) -> Result<(), StorageError>;
    async fn upsert_participant(&self, row: ParticipantRow) -> Result<(), StorageError>;
    async fn upsert_asset(&self, row: AssetRow) -> Result<(), StorageError>;

    /// Insert-if-absent. Pairs are never removed, so membership
    /// history accumulates across re-ingestions.
    async fn link_roster_participants(
        &self,
        pairs: &[(String, String)],
    ) -> Result<(), StorageError>;

    /// Insert-if-absent association of a tournament with match ids.
    async fn link_tournament_matches(
        &self,
        tournament_id: &str,
        match_ids: &[String],
    ) -> Result<(), StorageError>;

    /// Previously linked match ids, in the order they were first seen.
    async fn tournament_match_ids(&self, tournament_id: &str)
        -> Result<Vec<String>, StorageError>;

    async fn matches_by_ids(
        &self,
        ids: &[String],
    ) -> Result<std::collections::HashMap<String, MatchDocument>, StorageError>;

    async fn all_matches(&self) -> Result<Vec<MatchDocument>, StorageError>;
}

fn parse_payload(match_id: &str, payload: serde_json::Value) -> Option<MatchDocument> {
    match serde_json::from_value(payload) {
        Ok(document) => Some(document),
        Err(e) => {
            tracing::warn!("Stored payload for {} no longer parses: {}", match_id, e);
            None
        }
    }
}

pub struct PgStore {
    database_url: std::sync::Arc<String>,
}

impl PgStore {
    pub fn new<IS>(database_url: IS) -> Self
    where
        IS: Into<String>,
    {
        Self {
            database_url: std::sync::Arc::new(database_url.into()),
        }
    }

    async fn connect(&self) -> Result<diesel_async::AsyncPgConnection, StorageError> {
        use diesel_async::AsyncConnection;

        diesel_async::AsyncPgConnection::establish(&self.database_url)
            .await
            .map_err(StorageError::Connection)
    }
}

#[async_trait::async_trait]
impl MatchStore for PgStore {
    async fn upsert_match(&self, row: MatchRow) -> Result<(), StorageError> {
        use crate::schema::matches::dsl;

        let mut con = self.connect().await?;
        diesel::insert_into(dsl::matches)
            .values(&row)
            .on_conflict(dsl::match_id)
            .do_update()
            .set((&row, dsl::updated_at.eq(diesel::dsl::now)))
            .execute(&mut con)
            .await?;
        Ok(())
    }

    async fn upsert_roster(&self, row: RosterRow) -> Result<(), StorageError> {
        use crate::schema::match_rosters::dsl;

        let mut con = self.connect().await?;
        diesel::insert_into(dsl::match_rosters)
            .values(&row)
            .on_conflict(dsl::roster_id)
            .do_update()
            .set(&row)
            .execute(&mut con)
            .await?;
        Ok(())
    }

    async fn upsert_participant(&self, row: ParticipantRow) -> Result<(), StorageError> {
        use crate::schema::match_participants::dsl;

        let mut con = self.connect().await?;
        diesel::insert_into(dsl::match_participants)
            .values(&row)
            .on_conflict(dsl::participant_id)
            .do_update()
            .set(&row)
            .execute(&mut con)
            .await?;
        Ok(())
    }

    async fn upsert_asset(&self, row: AssetRow) -> Result<(), StorageError> {
        use crate::schema::match_assets::dsl;

        let mut con = self.connect().await?;
        diesel::insert_into(dsl::match_assets)
            .values(&row)
            .on_conflict(dsl::asset_id)
            .do_update()
            .set(&row)
            .execute(&mut con)
            .await?;
        Ok(())
    }

    async fn link_roster_participants(
        &self,
        pairs: &[(String, String)],
    ) -> Result<(), StorageError> {
        use crate::schema::match_roster_participants::dsl;

        let mut con = self.connect().await?;
        for (roster_id, participant_id) in pairs {
            diesel::insert_into(dsl::match_roster_participants)
                .values(RosterParticipantRow {
                    roster_id: roster_id.clone(),
                    participant_id: participant_id.clone(),
                })
                .on_conflict_do_nothing()
                .execute(&mut con)
                .await?;
        }
        Ok(())
    }

    async fn link_tournament_matches(
        &self,
        tournament_id: &str,
        match_ids: &[String],
    ) -> Result<(), StorageError> {
        use crate::schema::tournament_matches::dsl;

        let mut con = self.connect().await?;
        for match_id in match_ids.iter().filter(|id| !id.is_empty()) {
            diesel::insert_into(dsl::tournament_matches)
                .values(TournamentMatchRow {
                    tournament_id: tournament_id.to_string(),
                    match_id: match_id.clone(),
                })
                .on_conflict_do_nothing()
                .execute(&mut con)
                .await?;
        }
        Ok(())
    }

    async fn tournament_match_ids(
        &self,
        tournament_id: &str,
    ) -> Result<Vec<String>, StorageError> {
        use crate::schema::tournament_matches::dsl;

        let mut con = self.connect().await?;
        let ids = dsl::tournament_matches
            .filter(dsl::tournament_id.eq(tournament_id))
            .order(dsl::created_at.asc())
            .select(dsl::match_id)
            .load::<String>(&mut con)
            .await?;
        Ok(ids)
    }

    async fn matches_by_ids(
        &self,
        ids: &[String],
    ) -> Result<std::collections::HashMap<String, MatchDocument>, StorageError> {
        use crate::schema::matches::dsl;

        if ids.is_empty() {
            return Ok(std::collections::HashMap::new());
        }

        let mut con = self.connect().await?;
        let rows: Vec<(String, serde_json::Value)> = dsl::matches
            .filter(dsl::match_id.eq_any(ids))
            .select((dsl::match_id, dsl::payload))
            .load(&mut con)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(match_id, payload)| {
                parse_payload(&match_id, payload).map(|document| (match_id, document))
            })
            .collect())
    }

    async fn all_matches(&self) -> Result<Vec<MatchDocument>, StorageError> {
        use crate::schema::matches::dsl;

        let mut con = self.connect().await?;
        let rows: Vec<(String, serde_json::Value)> = dsl::matches
            .select((dsl::match_id, dsl::payload))
            .load(&mut con)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(match_id, payload)| parse_payload(&match_id, payload))
            .collect())
    }
}

/// Full relational state of the in-memory store, in insertion order.
/// Cloneable so tests can snapshot and compare.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MemoryState {
    pub matches: Vec<MatchRow>,
    pub rosters: Vec<RosterRow>,
    pub participants: Vec<ParticipantRow>,
    pub assets: Vec<AssetRow>,
    pub roster_participants: Vec<(String, String)>,
    pub tournament_matches: Vec<(String, String)>,
}

#[derive(Default)]
pub struct MemoryStore {
    state: std::sync::Mutex<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> MemoryState {
        self.state.lock().unwrap().clone()
    }
}

fn upsert_by_key<T, K, F>(rows: &mut Vec<T>, row: T, key: F)
where
    K: PartialEq,
    F: Fn(&T) -> K,
{
    match rows.iter_mut().find(|existing| key(existing) == key(&row)) {
        Some(existing) => *existing = row,
        None => rows.push(row),
    }
}

#[async_trait::async_trait]
impl MatchStore for MemoryStore {
    async fn upsert_match(&self, row: MatchRow) -> Result<(), StorageError> {
        let mut state = self.state.lock().unwrap();
        upsert_by_key(&mut state.matches, row, |m| m.match_id.clone());
        Ok(())
    }

    async fn upsert_roster(&self, row: RosterRow) -> Result<(), StorageError> {
        let mut state = self.state.lock().unwrap();
        upsert_by_key(&mut state.rosters, row, |r| r.roster_id.clone());
        Ok(())
    }

    async fn upsert_participant(&self, row: ParticipantRow) -> Result<(), StorageError> {
        let mut state = self.state.lock().unwrap();
        upsert_by_key(&mut state.participants, row, |p| p.participant_id.clone());
        Ok(())
    }

    async fn upsert_asset(&self, row: AssetRow) -> Result<(), StorageError> {
        let mut state = self.state.lock().unwrap();
        upsert_by_key(&mut state.assets, row, |a| a.asset_id.clone());
        Ok(())
    }

    async fn link_roster_participants(
        &self,
        pairs: &[(String, String)],
    ) -> Result<(), StorageError> {
        let mut state = self.state.lock().unwrap();
        for pair in pairs {
            if !state.roster_participants.contains(pair) {
                state.roster_participants.push(pair.clone());
            }
        }
        Ok(())
    }

    async fn link_tournament_matches(
        &self,
        tournament_id: &str,
        match_ids: &[String],
    ) -> Result<(), StorageError> {
        let mut state = self.state.lock().unwrap();
        for match_id in match_ids.iter().filter(|id| !id.is_empty()) {
            let pair = (tournament_id.to_string(), match_id.clone());
            if !state.tournament_matches.contains(&pair) {
                state.tournament_matches.push(pair);
            }
        }
        Ok(())
    }

    async fn tournament_match_ids(
        &self,
        tournament_id: &str,
    ) -> Result<Vec<String>, StorageError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .tournament_matches
            .iter()
            .filter(|(tournament, _)| tournament == tournament_id)
            .map(|(_, match_id)| match_id.clone())
            .collect())
    }

    async fn matches_by_ids(
        &self,
        ids: &[String],
    ) -> Result<std::collections::HashMap<String, MatchDocument>, StorageError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .matches
            .iter()
            .filter(|row| ids.contains(&row.match_id))
            .filter_map(|row| {
                parse_payload(&row.match_id, row.payload.clone())
                    .map(|document| (row.match_id.clone(), document))
            })
            .collect())
    }

    async fn all_matches(&self) -> Result<Vec<MatchDocument>, StorageError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .matches
            .iter()
            .filter_map(|row| parse_payload(&row.match_id, row.payload.clone()))
            .collect())
    }
}
