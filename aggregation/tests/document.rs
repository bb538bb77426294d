use aggregation::document::{IncludedItem, MatchDocument};
use pretty_assertions::assert_eq;
use serde_json::json;

fn raw_document() -> serde_json::Value {
    json!({
        "data": {
            "type": "match",
            "id": "m1",
            "attributes": {
                "gameMode": "squad-fpp",
                "mapName": "Baltic_Main",
                "isCustomMatch": true,
                "futureHeaderField": "kept"
            },
            "relationships": {
                "rosters": { "data": [{ "type": "roster", "id": "r1" }] }
            },
            "links": { "self": "https://api.example/matches/m1" }
        },
        "included": [
            {
                "type": "roster",
                "id": "r1",
                "attributes": {
                    "won": "true",
                    "stats": { "rank": 1, "teamId": 7, "futureStatField": 9 },
                    "futureRosterField": 42
                },
                "relationships": {
                    "participants": { "data": [{ "type": "participant", "id": "p1" }] }
                }
            },
            {
                "type": "participant",
                "id": "p1",
                "attributes": {
                    "stats": {
                        "name": "ace",
                        "kills": 3,
                        "winPlace": 1,
                        "futurePlayerField": 0.5
                    }
                }
            },
            { "type": "objective", "id": "o1", "attributes": { "kind": "bluezone" } }
        ]
    })
}

#[test]
fn unknown_keys_survive_a_round_trip() {
    let raw = raw_document();
    let document: MatchDocument = serde_json::from_value(raw.clone()).unwrap();

    // The typed views still work on top of the extra keys.
    assert_eq!(document.rosters().count(), 1);
    assert_eq!(document.participants().count(), 1);
    assert!(document.rosters().next().unwrap().won());

    let stored = serde_json::to_value(&document).unwrap();
    assert_eq!(stored["data"]["type"], json!("match"));
    assert_eq!(stored["data"]["relationships"], raw["data"]["relationships"]);
    assert_eq!(stored["data"]["links"], raw["data"]["links"]);
    assert_eq!(
        stored["data"]["attributes"]["futureHeaderField"],
        json!("kept")
    );
    assert_eq!(
        stored["included"][0]["attributes"]["futureRosterField"],
        json!(42)
    );
    assert_eq!(
        stored["included"][0]["attributes"]["stats"]["futureStatField"],
        json!(9)
    );
    assert_eq!(
        stored["included"][1]["attributes"]["stats"]["futurePlayerField"],
        json!(0.5)
    );
}

#[test]
fn unrecognized_included_records_are_kept_verbatim() {
    let raw = raw_document();
    let document: MatchDocument = serde_json::from_value(raw.clone()).unwrap();

    assert!(matches!(
        &document.included[2],
        IncludedItem::Unknown(value) if value["type"] == json!("objective")
    ));

    let stored = serde_json::to_value(&document).unwrap();
    assert_eq!(stored["included"][2], raw["included"][2]);
}
