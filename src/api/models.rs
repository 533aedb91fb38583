use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

// One row of `<player>_tournament_scoreboards.json` (ScoreboardGames joined with ScoreboardPlayers)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchRecord {
    #[serde(rename = "Team", default, deserialize_with = "lenient_text")]
    pub team: Option<String>,
    #[serde(rename = "Team1", default, deserialize_with = "lenient_text")]
    pub team1: Option<String>,
    #[serde(rename = "Team2", default, deserialize_with = "lenient_text")]
    pub team2: Option<String>,
    #[serde(rename = "Winner", default, deserialize_with = "lenient_float")]
    pub winner: f64,
    #[serde(rename = "Kills", default)]
    pub kills: Counter,
    #[serde(rename = "Deaths", default)]
    pub deaths: Counter,
    #[serde(rename = "Assists", default)]
    pub assists: Counter,
    #[serde(rename = "CS", default, deserialize_with = "lenient_int")]
    pub cs: i64,
    #[serde(rename = "DamageToChampions", default, deserialize_with = "lenient_float")]
    pub damage_to_champions: f64,
    #[serde(rename = "Gamelength Number", default, deserialize_with = "lenient_float")]
    pub game_length_minutes: f64,
    #[serde(rename = "Champion", default, deserialize_with = "lenient_text")]
    pub champion: Option<String>,
    #[serde(rename = "Role", default, deserialize_with = "lenient_text")]
    pub role: Option<String>,
    #[serde(rename = "DateTime UTC", default, deserialize_with = "lenient_text")]
    pub date_time_utc: Option<String>,
}

impl MatchRecord {
    /// Side number of the player: 1 when `Team` matches `Team1`, otherwise 2.
    pub fn side(&self) -> i64 {
        if self.team == self.team1 {
            1
        } else {
            2
        }
    }

    pub fn won(&self) -> bool {
        self.winner == self.side() as f64
    }

    /// Champion name, `None` when absent or empty.
    pub fn champion_name(&self) -> Option<&str> {
        self.champion.as_deref().filter(|c| !c.is_empty())
    }

    pub fn known_role(&self) -> Option<Role> {
        self.role.as_deref().and_then(|r| r.parse().ok())
    }

    /// Literal "K/D/A" as it appeared in the document.
    pub fn kda_literal(&self) -> String {
        format!(
            "{}/{}/{}",
            self.kills.literal(),
            self.deaths.literal(),
            self.assists.literal()
        )
    }

    pub fn played_at(&self) -> Option<DateTime<Utc>> {
        self.date_time_utc.as_deref().and_then(parse_timestamp)
    }
}

/// Integer counter that keeps the source text for display.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Counter {
    pub value: i64,
    pub raw: Option<String>,
}

impl Counter {
    #[allow(dead_code)]
    pub fn new(value: i64) -> Self {
        Counter {
            value,
            raw: Some(value.to_string()),
        }
    }

    pub fn literal(&self) -> &str {
        self.raw.as_deref().unwrap_or("-")
    }
}

impl<'de> Deserialize<'de> for Counter {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Counter {
            value: coerce_int(&value),
            raw: value_text(&value),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Role {
    Top,
    Jungle,
    Mid,
    Bot,
    Support,
}

impl Role {
    pub const ALL: [Role; 5] = [Role::Top, Role::Jungle, Role::Mid, Role::Bot, Role::Support];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Top => "Top",
            Role::Jungle => "Jungle",
            Role::Mid => "Mid",
            Role::Bot => "Bot",
            Role::Support => "Support",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .iter()
            .copied()
            .find(|role| role.as_str() == s)
            .ok_or(())
    }
}

pub fn coerce_float(value: &Value) -> f64 {
    let number = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                0.0
            } else {
                s.parse::<f64>().unwrap_or(0.0)
            }
        }
        _ => 0.0,
    };

    if number.is_finite() {
        number
    } else {
        0.0
    }
}

pub fn coerce_int(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n.as_i64().unwrap_or_else(|| coerce_float(value).trunc() as i64),
        _ => coerce_float(value).trunc() as i64,
    }
}

fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        // Whole-valued floats print without the fraction: 5.0 -> "5".
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => {
                Some(format!("{}", f as i64))
            }
            _ => Some(n.to_string()),
        },
        other => Some(other.to_string()),
    }
}

fn lenient_int<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(|v| coerce_int(&v))
}

fn lenient_float<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(|v| coerce_float(&v))
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(|v| value_text(&v))
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use serde_json::json;

    fn record(value: Value) -> MatchRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_numeric_coercion() {
        assert_eq!(coerce_int(&json!("5")), 5);
        assert_eq!(coerce_int(&json!(5)), 5);
        assert_eq!(coerce_int(&json!(5.0)), 5);
        assert_eq!(coerce_int(&json!(" 5 ")), 5);
        assert_eq!(coerce_int(&json!("7.9")), 7);
        assert_eq!(coerce_int(&json!("abc")), 0);
        assert_eq!(coerce_int(&json!("")), 0);
        assert_eq!(coerce_int(&Value::Null), 0);
        assert_eq!(coerce_int(&json!(true)), 0);
        assert_eq!(coerce_float(&json!("25.5")), 25.5);
        assert_eq!(coerce_float(&json!("inf")), 0.0);
    }

    #[test]
    fn test_record_from_scoreboard_row() {
        let game = record(json!({
            "GameId": "LEC/2023 Season/Spring Season_Week 1_1_1",
            "Team": "G2 Esports",
            "Team1": "Fnatic",
            "Team2": "G2 Esports",
            "Winner": "2",
            "Gamelength Number": "31.4",
            "Role": "Mid",
            "Champion": "Kai'Sa",
            "Kills": "4",
            "Deaths": "1",
            "Assists": "9",
            "CS": "301",
            "DamageToChampions": "21873",
            "DateTime UTC": "2023-01-21 17:12:00"
        }));

        assert_eq!(game.side(), 2);
        assert!(game.won());
        assert_eq!(game.kills.value, 4);
        assert_eq!(game.cs, 301);
        assert_eq!(game.damage_to_champions, 21873.0);
        assert_eq!(game.game_length_minutes, 31.4);
        assert_eq!(game.known_role(), Some(Role::Mid));
        assert_eq!(game.champion_name(), Some("Kai'Sa"));
        assert_eq!(game.kda_literal(), "4/1/9");

        let played = game.played_at().unwrap();
        assert_eq!((played.year(), played.month(), played.day()), (2023, 1, 21));
        assert_eq!(played.hour(), 17);
    }

    #[test]
    fn test_missing_fields_default_to_zero() {
        let game = record(json!({ "Kills": 3, "Assists": null, "CS": "n/a" }));

        assert_eq!(game.kills.value, 3);
        assert_eq!(game.deaths.value, 0);
        assert_eq!(game.assists.value, 0);
        assert_eq!(game.cs, 0);
        assert_eq!(game.kda_literal(), "3/-/-");
        assert_eq!(game.champion_name(), None);
        assert_eq!(game.played_at(), None);
        // Both team fields missing compare equal, so the player is on side 1.
        assert_eq!(game.side(), 1);
    }

    #[test]
    fn test_fractional_winner_never_matches_side() {
        let game = record(json!({ "Team": "A", "Team1": "A", "Winner": "1.5" }));
        assert_eq!(game.side(), 1);
        assert!(!game.won());

        let game = record(json!({ "Team": "A", "Team1": "A", "Winner": 1.0 }));
        assert!(game.won());
    }

    #[test]
    fn test_kda_literal_drops_whole_fraction() {
        let game = record(json!({ "Kills": 5.0, "Deaths": 2.5, "Assists": "7.0" }));
        assert_eq!(game.kda_literal(), "5/2.5/7.0");
        assert_eq!(game.kills.value, 5);
    }

    #[test]
    fn test_role_parsing_is_literal() {
        assert_eq!("Support".parse::<Role>(), Ok(Role::Support));
        assert!("Coach".parse::<Role>().is_err());
        assert!("mid".parse::<Role>().is_err());
    }

    #[test]
    fn test_timestamp_formats() {
        assert!(parse_timestamp("2024-03-02T10:00:00Z").is_some());
        assert!(parse_timestamp("2024-03-02 10:00:00").is_some());
        assert!(parse_timestamp("2024-03-02").is_some());
        assert!(parse_timestamp("yesterday").is_none());
    }
}
