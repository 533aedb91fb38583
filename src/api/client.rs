use crate::error::AppError;
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::{debug, error};

use super::endpoints::{
    encoded_scoreboard_file_name, scoreboard_file_name, scoreboard_url, SCOREBOARDS_DIR,
};
use super::models::MatchRecord;

const USER_AGENT: &str = "player_analytics/0.1.0";

/// Supplier of a player's match history. Loads once; never retries.
pub trait MatchSource {
    fn fetch_matches(&self, player: &str) -> Result<Vec<MatchRecord>, AppError>;
}

/// Reads scoreboard documents from `<data_dir>/scoreboards/`.
pub struct FileSource {
    data_dir: PathBuf,
}

impl FileSource {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        FileSource {
            data_dir: data_dir.into(),
        }
    }

    fn candidates(&self, player: &str) -> Vec<PathBuf> {
        let dir = self.data_dir.join(SCOREBOARDS_DIR);
        let raw = dir.join(scoreboard_file_name(player));
        let encoded = dir.join(encoded_scoreboard_file_name(player));

        if raw == encoded {
            vec![raw]
        } else {
            vec![raw, encoded]
        }
    }
}

impl MatchSource for FileSource {
    fn fetch_matches(&self, player: &str) -> Result<Vec<MatchRecord>, AppError> {
        for path in self.candidates(player) {
            debug!(path = %path.display(), "reading scoreboard document");

            match fs::read_to_string(&path) {
                Ok(body) => return parse_matches(&body, player),
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => {
                    error!("Failed to load player data for {}: {}", player, e);
                    return Err(AppError::IoError(format!(
                        "Failed to read {}: {}",
                        path.display(),
                        e
                    )));
                }
            }
        }

        error!("Failed to load player data for {}", player);
        Err(AppError::PlayerNotFound(player.to_string()))
    }
}

/// Fetches scoreboard documents over HTTP from a static site.
pub struct HttpSource {
    base_url: String,
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        HttpSource {
            base_url: base_url.into(),
        }
    }

    fn execute_request(&self, url: &str, player: &str) -> Result<String, AppError> {
        let response = ureq::get(url).set("User-Agent", USER_AGENT).call();

        match response {
            Ok(resp) => resp.into_string().map_err(|e| AppError::HttpError(e.to_string())),
            Err(ureq::Error::Status(404, _)) => {
                error!("Failed to load player data for {}: not found", player);
                Err(AppError::PlayerNotFound(player.to_string()))
            }
            Err(e) => {
                error!("Failed to load player data for {}: {}", player, e);
                Err(AppError::HttpError(e.to_string()))
            }
        }
    }
}

impl MatchSource for HttpSource {
    fn fetch_matches(&self, player: &str) -> Result<Vec<MatchRecord>, AppError> {
        let url = scoreboard_url(&self.base_url, player);
        debug!(%url, "fetching scoreboard document");

        let body = self.execute_request(&url, player)?;
        parse_matches(&body, player)
    }
}

/// Parses a scoreboard document. `null` and `[]` both mean no data.
pub fn parse_matches(body: &str, player: &str) -> Result<Vec<MatchRecord>, AppError> {
    let document: Value = serde_json::from_str(body).map_err(|e| {
        error!("Failed to parse player data for {}: {}", player, e);
        AppError::JsonError(e.to_string())
    })?;

    let games = match document {
        Value::Null => Vec::new(),
        Value::Array(games) => games,
        _ => {
            error!("Scoreboard document for {} is not an array", player);
            return Err(AppError::JsonError(
                "expected a JSON array of games".to_string(),
            ));
        }
    };

    if games.is_empty() {
        error!("No game data found for {}", player);
        return Err(AppError::NoGameData(player.to_string()));
    }

    let records = games
        .into_iter()
        .map(serde_json::from_value::<MatchRecord>)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| {
            error!("Failed to parse a game for {}: {}", player, e);
            AppError::JsonError(e.to_string())
        })?;

    debug!(games = records.len(), "parsed scoreboard document");
    Ok(records)
}
