use aggregation::document::{
    Flag, IncludedItem, MatchAttributes, MatchData, MatchDocument, ParticipantAttributes,
    ParticipantItem, ParticipantStats, RecordRef, RelationshipList, RosterAttributes,
    RosterItem, RosterRelationships, RosterStats, TeamId,
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
                match_type: Some("custom".to_string()),
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
            won: Some(Flag::Text(if rank == 1 { "true" } else { "false" }.to_string())),
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
                assists: Some(0),
                revives: Some(0),
                damage_dealt: Some(0.0),
                ..ParticipantStats::default()
            },
            ..ParticipantAttributes::default()
        },
    })
}
