/// Placement bonus by final rank. Top placements earn a fixed number
/// of points, 9th and below earn nothing.
pub fn placement_points(rank: i32) -> i64 {
    match rank {
        1 => 10,
        2 => 6,
        3 => 5,
        4 => 4,
        5 => 3,
        6 => 2,
        7 | 8 => 1,
        _ => 0,
    }
}

/// Internal map codenames as reported by the PUBG API, keyed to their
/// in-game display names.
static MAP_NAMES: phf::Map<&'static str, &'static str> = phf::phf_map! {
    "Baltic_Main" => "Erangel",
    "Desert_Main" => "Miramar",
    "Savage_Main" => "Sanhok",
    "DihorOtok_Main" => "Vikendi",
    "Range_Main" => "Camp Jackal",
    "Summerland_Main" => "Karakin",
    "Chimera_Main" => "Paramo",
    "Heaven_Main" => "Haven",
    "Tiger_Main" => "Taego",
    "Kiki_Main" => "Deston",
    "Neon_Main" => "Rondo",
};

/// Translate a raw map codename into its display name. Unrecognized
/// codenames pass through unchanged, blank input yields `None`.
pub fn display_map_name(raw: &str) -> Option<String> {
    let cleaned = raw.trim();
    if cleaned.is_empty() {
        return None;
    }
    Some(
        MAP_NAMES
            .get(cleaned)
            .map(|name| (*name).to_string())
            .unwrap_or_else(|| cleaned.to_string()),
    )
}
