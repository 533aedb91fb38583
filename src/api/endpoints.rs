// Scoreboard document locations, relative to a data directory or base URL

pub const SCOREBOARDS_DIR: &str = "scoreboards";
pub const SCOREBOARD_SUFFIX: &str = "_tournament_scoreboards.json";

pub fn scoreboard_file_name(player: &str) -> String {
    format!("{}{}", player, SCOREBOARD_SUFFIX)
}

pub fn encoded_scoreboard_file_name(player: &str) -> String {
    format!("{}{}", urlencoding::encode(player), SCOREBOARD_SUFFIX)
}

/// `scoreboards/<url-encoded player>_tournament_scoreboards.json`
pub fn scoreboard_path(player: &str) -> String {
    format!("{}/{}", SCOREBOARDS_DIR, encoded_scoreboard_file_name(player))
}

pub fn scoreboard_url(base_url: &str, player: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), scoreboard_path(player))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scoreboard_path_encodes_player() {
        assert_eq!(
            scoreboard_path("Faker Jr"),
            "scoreboards/Faker%20Jr_tournament_scoreboards.json"
        );
        assert_eq!(
            scoreboard_file_name("Faker Jr"),
            "Faker Jr_tournament_scoreboards.json"
        );
    }

    #[test]
    fn test_scoreboard_url_joins_base() {
        assert_eq!(
            scoreboard_url("https://example.org/data/", "Caps"),
            "https://example.org/data/scoreboards/Caps_tournament_scoreboards.json"
        );
    }
}
