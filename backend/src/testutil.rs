//! Builders and fakes shared by the backend unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::ApiError;
use crate::pubg_api::MatchApi;
use aggregation::document::{
    Flag, IncludedItem, MatchAttributes, MatchData, MatchDocument, ParticipantAttributes,
    ParticipantItem, ParticipantStats, RecordRef, RelationshipList, RosterAttributes, RosterItem,
    RosterRelationships, RosterStats, TeamId,
};

pub fn document(id: &str, custom: bool, included: Vec<IncludedItem>) -> MatchDocument {
    MatchDocument {
        data: MatchData {
            id: id.to_string(),
            attributes: MatchAttributes {
                is_custom_match: custom,
                game_mode: Some("squad-fpp".to_string()),
                map_name: Some("Baltic_Main".to_string()),
                duration: Some(1800),
                ..MatchAttributes::default()
            },
            other: Default::default(),
        },
        included,
    }
}

pub fn roster(id: &str, team_id: i64, rank: i32, member_ids: &[&str]) -> IncludedItem {
    IncludedItem::Roster(RosterItem {
        id: id.to_string(),
        attributes: RosterAttributes {
            won: Some(Flag::Bool(rank == 1)),
            stats: RosterStats {
                rank: Some(rank),
                win_place: None,
                team_id: Some(TeamId::Number(team_id)),
                ..RosterStats::default()
            },
            ..RosterAttributes::default()
        },
        relationships: RosterRelationships {
            participants: RelationshipList {
                data: member_ids
                    .iter()
                    .map(|id| RecordRef { id: id.to_string() })
                    .collect(),
            },
        },
    })
}

pub fn participant(
    id: &str,
    name: &str,
    kills: i32,
    win_place: i32,
    death_type: Option<&str>,
) -> IncludedItem {
    IncludedItem::Participant(ParticipantItem {
        id: id.to_string(),
        attributes: ParticipantAttributes {
            stats: ParticipantStats {
                name: Some(name.to_string()),
                kills: Some(kills),
                win_place: Some(win_place),
                death_type: death_type.map(|d| d.to_string()),
                ..ParticipantStats::default()
            },
            ..ParticipantAttributes::default()
        },
    })
}

/// Scripted stand-in for the remote API that counts how often each
/// endpoint was hit.
#[derive(Default)]
pub struct FakeApi {
    pub matches: std::collections::HashMap<String, MatchDocument>,
    pub tournament_ids: Vec<String>,
    pub match_calls: AtomicUsize,
    pub tournament_calls: AtomicUsize,
}

impl FakeApi {
    pub fn with_matches(documents: Vec<MatchDocument>) -> Self {
        Self {
            matches: documents
                .into_iter()
                .map(|document| (document.data.id.clone(), document))
                .collect(),
            ..Self::default()
        }
    }

    pub fn match_calls(&self) -> usize {
        self.match_calls.load(Ordering::SeqCst)
    }

    pub fn tournament_calls(&self) -> usize {
        self.tournament_calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl MatchApi for FakeApi {
    async fn fetch_match(&self, id: &str) -> Result<MatchDocument, ApiError> {
        self.match_calls.fetch_add(1, Ordering::SeqCst);
        self.matches
            .get(id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound {
                path: format!("/matches/{}", id),
                body: String::new(),
            })
    }

    async fn fetch_tournament_match_ids(
        &self,
        _remote_tournament_id: &str,
    ) -> Result<Vec<String>, ApiError> {
        self.tournament_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.tournament_ids.clone())
    }

    async fn fetch_player_match_ids(
        &self,
        _name: &str,
        _limit: usize,
    ) -> Result<Vec<String>, ApiError> {
        Ok(Vec::new())
    }
}
