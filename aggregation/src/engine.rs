//! Turns an ordered set of match documents into per-match, per-team
//! and per-player statistics plus ranked leaderboards.

use crate::document::{MatchDocument, ParticipantStats};
use crate::scoring;

#[derive(Debug, Clone, PartialEq)]
pub struct AggregateParams {
    /// Identity of the aggregation, used as the cache key together
    /// with `limit` and `only_custom`.
    pub cache_id: String,
    pub limit: usize,
    /// Skip the cache lookup and recompute.
    pub fresh: bool,
    /// Drop documents that are not flagged as custom matches.
    pub only_custom: bool,
    /// Remote tournament identifier reported back in the result, the
    /// cache id is used when there is none.
    pub tournament_id: Option<String>,
    /// Total number of matches resolved before truncation.
    pub match_count: usize,
}

impl AggregateParams {
    pub fn new<IS>(cache_id: IS) -> Self
    where
        IS: Into<String>,
    {
        Self {
            cache_id: cache_id.into(),
            limit: 12,
            fresh: false,
            only_custom: false,
            tournament_id: None,
            match_count: 0,
        }
    }
}

#[derive(Debug, Default)]
struct PlayerAcc {
    name: String,
    matches_played: u32,
    kills: i64,
    assists: i64,
    revives: i64,
    deaths: i64,
    damage: f64,
    wins: u32,
    points: i64,
    placement_total: i64,
    alive: u32,
    killed: u32,
    suicide: u32,
    unknown: u32,
}

#[derive(Debug, Default)]
struct TeamAcc {
    team_id: String,
    matches_played: u32,
    wins: u32,
    kills: i64,
    points: i64,
    placement_total: i64,
    players: Vec<String>,
}

/// Compute the aggregated view over `payloads`, truncated to
/// `params.limit` in the order given. The caller supplies documents in
/// the order it wants considered, nothing is re-sorted here.
pub fn compute(payloads: &[MatchDocument], params: &AggregateParams) -> common::AggregationResult {
    let mut matches = Vec::new();

    // Accumulators keyed by display name / raw team id, in
    // first-encounter order. Tie-breaks downstream depend on it.
    let mut player_index = std::collections::HashMap::<String, usize>::new();
    let mut player_accs = Vec::<PlayerAcc>::new();
    let mut team_index = std::collections::HashMap::<String, usize>::new();
    let mut team_accs = Vec::<TeamAcc>::new();

    for document in payloads.iter().take(params.limit) {
        let attributes = &document.data.attributes;
        if params.only_custom && !attributes.is_custom_match {
            continue;
        }

        let mut participant_stats =
            std::collections::HashMap::<&str, &ParticipantStats>::new();
        for participant in document.participants() {
            participant_stats.insert(participant.id.as_str(), &participant.attributes.stats);
        }

        for participant in document.participants() {
            let stats = &participant.attributes.stats;
            let name = stats.name.clone().unwrap_or_else(|| "Unknown".to_string());

            let index = *player_index.entry(name.clone()).or_insert_with(|| {
                player_accs.push(PlayerAcc {
                    name,
                    ..PlayerAcc::default()
                });
                player_accs.len() - 1
            });
            let current = &mut player_accs[index];

            let kills = i64::from(stats.kills.unwrap_or(0));
            let rank = stats.placement();

            current.matches_played += 1;
            current.kills += kills;
            current.assists += i64::from(stats.assists.unwrap_or(0));
            current.revives += i64::from(stats.revives.unwrap_or(0));
            current.damage += stats.damage_dealt.unwrap_or(0.0);
            current.placement_total += i64::from(rank);
            if rank == 1 {
                current.wins += 1;
            }
            match stats.death_type.as_deref() {
                Some("alive") => current.alive += 1,
                Some("byplayer") => {
                    current.deaths += 1;
                    current.killed += 1;
                }
                Some("suicide") => {
                    current.deaths += 1;
                    current.suicide += 1;
                }
                _ => current.unknown += 1,
            }
            current.points += kills + scoring::placement_points(rank);
        }

        let mut winner_team_id = None;
        for roster in document.rosters() {
            let rank = roster.rank();
            let team_id = roster.team_id();
            if rank == 1 && winner_team_id.is_none() {
                winner_team_id = Some(team_id.clone());
            }

            let member_stats: Vec<&ParticipantStats> = roster
                .relationships
                .participants
                .data
                .iter()
                .filter_map(|reference| participant_stats.get(reference.id.as_str()).copied())
                .collect();
            let roster_kills: i64 = member_stats
                .iter()
                .map(|stats| i64::from(stats.kills.unwrap_or(0)))
                .sum();

            let index = *team_index.entry(team_id.clone()).or_insert_with(|| {
                team_accs.push(TeamAcc {
                    team_id,
                    ..TeamAcc::default()
                });
                team_accs.len() - 1
            });
            let current = &mut team_accs[index];

            current.matches_played += 1;
            if rank == 1 {
                current.wins += 1;
            }
            current.kills += roster_kills;
            current.points += roster_kills + scoring::placement_points(rank);
            current.placement_total += i64::from(rank);
            for stats in &member_stats {
                if let Some(name) = stats.name.as_deref() {
                    if !current.players.iter().any(|existing| existing == name) {
                        current.players.push(name.to_string());
                    }
                }
            }
        }

        matches.push(common::MatchSummary {
            match_id: document.data.id.clone(),
            map_name: attributes
                .map_name
                .as_deref()
                .and_then(scoring::display_map_name),
            game_mode: attributes.game_mode.clone(),
            created_at: attributes.created_at,
            duration: attributes.duration,
            match_type: attributes.match_type.clone(),
            winner_team_name: winner_team_id
                .as_deref()
                .map(|id| format!("Team {}", id)),
            winner_team_id,
        });
    }

    let team_stats: Vec<common::TeamStats> =
        team_accs.into_iter().map(finalize_team).collect();
    let player_stats: Vec<common::PlayerStats> =
        player_accs.into_iter().map(finalize_player).collect();

    let leaderboards = common::Leaderboards {
        teams: top_by_points(&team_stats, |team| team.total_points),
        players: top_by_points(&player_stats, |player| player.total_points),
    };

    common::AggregationResult {
        tournament: common::AggregatedTournament {
            id: params
                .tournament_id
                .clone()
                .unwrap_or_else(|| params.cache_id.clone()),
            match_count: params.match_count,
        },
        matches,
        team_stats,
        player_stats,
        leaderboards,
    }
}

fn finalize_team(acc: TeamAcc) -> common::TeamStats {
    let matches = acc.matches_played;
    common::TeamStats {
        team_name: format!("Team {}", acc.team_id),
        team_id: acc.team_id,
        matches_played: matches,
        wins: acc.wins,
        total_kills: acc.kills,
        total_points: acc.points,
        avg_placement: round2(ratio(acc.placement_total as f64, matches)),
        win_rate: round1(ratio(f64::from(acc.wins), matches) * 100.0),
        players: acc.players,
    }
}

fn finalize_player(acc: PlayerAcc) -> common::PlayerStats {
    common::PlayerStats {
        player_name: acc.name,
        matches_played: acc.matches_played,
        total_kills: acc.kills,
        assists: acc.assists,
        revives: acc.revives,
        deaths: acc.deaths,
        death_reason: classify_death_reason(acc.alive, acc.killed, acc.suicide, acc.unknown),
        total_points: acc.points,
        avg_placement: round2(ratio(acc.placement_total as f64, acc.matches_played)),
        kd_ratio: round2(ratio(acc.kills as f64, acc.matches_played)),
        damage: acc.damage.round() as i64,
        wins: acc.wins,
    }
}

/// A category is only reported when it is the sole one observed across
/// all of the player's matches. Mixtures, or any match with an
/// unrecognized elimination cause, collapse to `CannotDetermine`.
fn classify_death_reason(alive: u32, killed: u32, suicide: u32, unknown: u32) -> common::DeathReason {
    if unknown > 0 {
        return common::DeathReason::CannotDetermine;
    }
    match (alive > 0, killed > 0, suicide > 0) {
        (true, false, false) => common::DeathReason::Alive,
        (false, true, false) => common::DeathReason::Killed,
        (false, false, true) => common::DeathReason::Suicide,
        _ => common::DeathReason::CannotDetermine,
    }
}

/// Top 10 by points, descending. The sort is stable so ties keep their
/// first-encountered order.
fn top_by_points<T, F>(entries: &[T], points: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> i64,
{
    let mut sorted = entries.to_vec();
    sorted.sort_by(|a, b| points(b).cmp(&points(a)));
    sorted.truncate(10);
    sorted
}

fn ratio(total: f64, count: u32) -> f64 {
    if count == 0 {
        return 0.0;
    }
    total / f64::from(count)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
