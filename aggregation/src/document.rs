//! Serde model of a match document as returned by the PUBG API.
//!
//! The remote service speaks JSON:API: a `data` object carrying the
//! match header and an `included` array mixing roster, participant and
//! asset records. Everything round-trips through serde so the whole
//! document can be persisted as JSONB and read back later; keys and
//! record types the model does not know are carried verbatim in
//! catch-all maps instead of being dropped.

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MatchDocument {
    pub data: MatchData,
    #[serde(default)]
    pub included: Vec<IncludedItem>,
}

impl MatchDocument {
    pub fn match_id(&self) -> &str {
        &self.data.id
    }

    pub fn rosters(&self) -> impl Iterator<Item = &RosterItem> {
        self.included.iter().filter_map(|item| match item {
            IncludedItem::Roster(roster) => Some(roster),
            _ => None,
        })
    }

    pub fn participants(&self) -> impl Iterator<Item = &ParticipantItem> {
        self.included.iter().filter_map(|item| match item {
            IncludedItem::Participant(participant) => Some(participant),
            _ => None,
        })
    }

    pub fn assets(&self) -> impl Iterator<Item = &AssetItem> {
        self.included.iter().filter_map(|item| match item {
            IncludedItem::Asset(asset) => Some(asset),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MatchData {
    pub id: String,
    #[serde(default)]
    pub attributes: MatchAttributes,
    /// `type`, `relationships`, `links` and whatever else the service
    /// puts next to the header, kept verbatim.
    #[serde(flatten)]
    pub other: std::collections::HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MatchAttributes {
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub duration: Option<i32>,
    pub game_mode: Option<String>,
    pub is_custom_match: bool,
    pub map_name: Option<String>,
    pub match_type: Option<String>,
    pub season_state: Option<String>,
    pub shard_id: Option<String>,
    pub title_id: Option<String>,
    pub stats: Option<serde_json::Value>,
    pub tags: Option<serde_json::Value>,
    #[serde(flatten)]
    pub other: std::collections::HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum IncludedItem {
    Roster(RosterItem),
    Participant(ParticipantItem),
    Asset(AssetItem),
    /// Record types the model does not know, kept as the raw value so
    /// the persisted payload stays byte-faithful.
    Unknown(serde_json::Value),
}

#[derive(serde::Serialize)]
struct TaggedRecord<'r, T> {
    #[serde(rename = "type")]
    kind: &'r str,
    #[serde(flatten)]
    record: &'r T,
}

impl serde::Serialize for IncludedItem {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            IncludedItem::Roster(record) => TaggedRecord {
                kind: "roster",
                record,
            }
            .serialize(serializer),
            IncludedItem::Participant(record) => TaggedRecord {
                kind: "participant",
                record,
            }
            .serialize(serializer),
            IncludedItem::Asset(record) => TaggedRecord {
                kind: "asset",
                record,
            }
            .serialize(serializer),
            IncludedItem::Unknown(value) => value.serialize(serializer),
        }
    }
}

impl<'de> serde::Deserialize<'de> for IncludedItem {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        let kind = value
            .get("type")
            .and_then(|kind| kind.as_str())
            .unwrap_or("")
            .to_string();
        match kind.as_str() {
            "roster" => serde_json::from_value(value)
                .map(IncludedItem::Roster)
                .map_err(serde::de::Error::custom),
            "participant" => serde_json::from_value(value)
                .map(IncludedItem::Participant)
                .map_err(serde::de::Error::custom),
            "asset" => serde_json::from_value(value)
                .map(IncludedItem::Asset)
                .map_err(serde::de::Error::custom),
            _ => Ok(IncludedItem::Unknown(value)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RosterItem {
    pub id: String,
    #[serde(default)]
    pub attributes: RosterAttributes,
    #[serde(default)]
    pub relationships: RosterRelationships,
}

impl RosterItem {
    /// Final placement, falling back to `winPlace` when the service
    /// omits `rank`.
    pub fn rank(&self) -> i32 {
        self.attributes
            .stats
            .rank
            .or(self.attributes.stats.win_place)
            .unwrap_or(0)
    }

    /// Raw remote team identifier rendered as a string, `-` when the
    /// service sent none.
    pub fn team_id(&self) -> String {
        match &self.attributes.stats.team_id {
            Some(team_id) => team_id.to_string(),
            None => "-".to_string(),
        }
    }

    pub fn won(&self) -> bool {
        self.attributes
            .won
            .as_ref()
            .map(|flag| flag.as_bool())
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RosterAttributes {
    pub shard_id: Option<String>,
    pub won: Option<Flag>,
    pub stats: RosterStats,
    #[serde(flatten)]
    pub other: std::collections::HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RosterStats {
    pub rank: Option<i32>,
    pub win_place: Option<i32>,
    pub team_id: Option<TeamId>,
    #[serde(flatten)]
    pub other: std::collections::HashMap<String, serde_json::Value>,
}

/// The service reports team ids as numbers on some shards and strings
/// on others.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum TeamId {
    Number(i64),
    Text(String),
}

impl std::fmt::Display for TeamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TeamId::Number(n) => write!(f, "{}", n),
            TeamId::Text(t) => write!(f, "{}", t),
        }
    }
}

/// Boolean attribute that the service sometimes sends as the strings
/// `"true"`/`"false"`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Flag {
    Bool(bool),
    Text(String),
}

impl Flag {
    pub fn as_bool(&self) -> bool {
        match self {
            Flag::Bool(b) => *b,
            Flag::Text(t) => t == "true",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RosterRelationships {
    pub participants: RelationshipList,
}

#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RelationshipList {
    pub data: Vec<RecordRef>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RecordRef {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParticipantItem {
    pub id: String,
    #[serde(default)]
    pub attributes: ParticipantAttributes,
}

#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParticipantAttributes {
    pub shard_id: Option<String>,
    pub actor: Option<String>,
    pub stats: ParticipantStats,
    #[serde(flatten)]
    pub other: std::collections::HashMap<String, serde_json::Value>,
}

/// Per-match combat statistics for one player. Keys the model does not
/// know about are kept in `other` so the raw blob survives a
/// round-trip through the store.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParticipantStats {
    #[serde(rename = "DBNOs")]
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
    pub name: Option<String>,
    pub player_id: Option<String>,
    pub rank: Option<i32>,
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
    #[serde(flatten)]
    pub other: std::collections::HashMap<String, serde_json::Value>,
}

impl ParticipantStats {
    /// Placement used for scoring, `winPlace` with `rank` as fallback.
    pub fn placement(&self) -> i32 {
        self.win_place.or(self.rank).unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AssetItem {
    pub id: String,
    #[serde(default)]
    pub attributes: AssetAttributes,
}

#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AssetAttributes {
    #[serde(rename = "URL")]
    pub url: Option<String>,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub description: Option<String>,
    pub name: Option<String>,
    #[serde(flatten)]
    pub other: std::collections::HashMap<String, serde_json::Value>,
}
