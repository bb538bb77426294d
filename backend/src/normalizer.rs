//! Flattens one match document into the relational tables.
//!
//! Write order is Match, then rosters, then participants, then
//! membership pairs. A failure part way through leaves a partially
//! normalized document behind, which the next ingestion of the same
//! match id overwrites; the ordering guarantees a participant never
//! references a roster row that was not written first.

use crate::error::StorageError;
use crate::models::{AssetRow, MatchRow, ParticipantRow, RosterRow};
use crate::storage::MatchStore;
use aggregation::document::{IncludedItem, MatchDocument};
use aggregation::scoring;

pub async fn normalize(store: &dyn MatchStore, document: &MatchDocument) -> Result<(), StorageError> {
    let match_id = document.data.id.clone();
    let attributes = &document.data.attributes;
    let payload = serde_json::to_value(document)?;

    store
        .upsert_match(MatchRow {
            match_id: match_id.clone(),
            payload,
            created_at: attributes.created_at,
            duration: attributes.duration,
            game_mode: attributes.game_mode.clone(),
            is_custom_match: attributes.is_custom_match,
            map_name: attributes.map_name.clone(),
            map_display_name: attributes
                .map_name
                .as_deref()
                .and_then(scoring::display_map_name),
            match_type: attributes.match_type.clone(),
            season_state: attributes.season_state.clone(),
            shard_id: attributes.shard_id.clone(),
            title_id: attributes.title_id.clone(),
            stats: attributes
                .stats
                .clone()
                .unwrap_or_else(|| serde_json::json!({})),
            tags: attributes
                .tags
                .clone()
                .unwrap_or_else(|| serde_json::json!({})),
        })
        .await?;

    // Pass 1: rosters, and which participants each one claims. When a
    // participant is claimed by several rosters the last one wins the
    // current-state pointer.
    let mut participant_roster = std::collections::HashMap::<String, String>::new();
    let mut pairs: Vec<(String, String)> = Vec::new();
    for item in &document.included {
        let roster = match item {
            IncludedItem::Roster(roster) => roster,
            _ => continue,
        };
        store
            .upsert_roster(RosterRow {
                roster_id: roster.id.clone(),
                match_id: match_id.clone(),
                team_id: roster
                    .attributes
                    .stats
                    .team_id
                    .as_ref()
                    .map(|team_id| team_id.to_string()),
                rank: roster.attributes.stats.rank,
                won: roster.won(),
                shard_id: roster.attributes.shard_id.clone(),
            })
            .await?;
        for reference in &roster.relationships.participants.data {
            participant_roster.insert(reference.id.clone(), roster.id.clone());
            pairs.push((roster.id.clone(), reference.id.clone()));
        }
    }

    // Pass 2: participants and assets.
    for item in &document.included {
        match item {
            IncludedItem::Participant(participant) => {
                let stats = &participant.attributes.stats;
                store
                    .upsert_participant(ParticipantRow {
                        participant_id: participant.id.clone(),
                        match_id: match_id.clone(),
                        roster_id: participant_roster.get(&participant.id).cloned(),
                        player_id: stats.player_id.clone(),
                        player_name: stats.name.clone(),
                        shard_id: participant.attributes.shard_id.clone(),
                        dbnos: stats.dbnos,
                        assists: stats.assists,
                        boosts: stats.boosts,
                        damage_dealt: stats.damage_dealt,
                        death_type: stats.death_type.clone(),
                        headshot_kills: stats.headshot_kills,
                        heals: stats.heals,
                        kill_place: stats.kill_place,
                        kill_streaks: stats.kill_streaks,
                        kills: stats.kills,
                        longest_kill: stats.longest_kill,
                        revives: stats.revives,
                        ride_distance: stats.ride_distance,
                        road_kills: stats.road_kills,
                        swim_distance: stats.swim_distance,
                        team_kills: stats.team_kills,
                        time_survived: stats.time_survived,
                        vehicle_destroys: stats.vehicle_destroys,
                        walk_distance: stats.walk_distance,
                        weapons_acquired: stats.weapons_acquired,
                        win_place: stats.win_place,
                        raw_stats: Some(serde_json::to_value(stats)?),
                    })
                    .await?;
            }
            IncludedItem::Asset(asset) => {
                store
                    .upsert_asset(AssetRow {
                        asset_id: asset.id.clone(),
                        match_id: match_id.clone(),
                        url: asset.attributes.url.clone(),
                        created_at: asset.attributes.created_at,
                        description: asset.attributes.description.clone(),
                        name: asset.attributes.name.clone(),
                    })
                    .await?;
            }
            _ => {}
        }
    }

    store.link_roster_participants(&pairs).await?;

    Ok(())
}
