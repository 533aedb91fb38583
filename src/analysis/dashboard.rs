use super::champion_stats::win_rate;
use super::player_stats::PlayerSummary;
use crate::api::models::{MatchRecord, Role};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::cmp::Ordering;

pub const MINI_CHAMPIONS: usize = 4;
pub const TREND_GAMES: usize = 10;
const KDA_GAUGE_CAP: f64 = 10.0;

const ICON_NAME_OVERRIDES: [(&str, &str); 4] = [
    ("Kai'Sa", "Kaisa"),
    ("Kog'Maw", "KogMaw"),
    ("Cho'Gath", "Chogath"),
    ("LeBlanc", "Leblanc"),
];

/// Data Dragon champion icon URLs for one patch.
#[derive(Debug, Clone)]
pub struct ChampionIcons {
    version: String,
}

impl ChampionIcons {
    pub fn new(version: impl Into<String>) -> Self {
        ChampionIcons {
            version: version.into(),
        }
    }

    pub fn image_name(champion: &str) -> String {
        ICON_NAME_OVERRIDES
            .iter()
            .find(|(name, _)| *name == champion)
            .map(|(_, image)| image.to_string())
            .unwrap_or_else(|| champion.chars().filter(|c| c.is_ascii_alphabetic()).collect())
    }

    pub fn url(&self, champion: &str) -> String {
        format!(
            "https://ddragon.leagueoflegends.com/cdn/{}/img/champion/{}.png",
            self.version,
            Self::image_name(champion)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WinRateTier {
    High,
    Medium,
    Low,
}

impl WinRateTier {
    pub fn from_win_rate(win_rate: f64) -> Self {
        if win_rate >= 60.0 {
            WinRateTier::High
        } else if win_rate >= 50.0 {
            WinRateTier::Medium
        } else {
            WinRateTier::Low
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Overview {
    pub total_games: usize,
    pub wins: usize,
    pub losses: usize,
    pub win_rate: f64,
    pub kda: f64,
    pub kda_gauge_percent: f64,
    pub cs_per_min: f64,
    pub avg_damage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleShare {
    pub role: Role,
    pub games: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormMarker {
    pub won: bool,
    pub tooltip: String,
}

impl FormMarker {
    pub fn letter(&self) -> &'static str {
        if self.won {
            "W"
        } else {
            "L"
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChampionCard {
    pub name: String,
    pub icon_url: String,
    pub games: usize,
    pub wins: usize,
    pub losses: usize,
    pub kda: f64,
    pub win_rate: f64,
    pub tier: WinRateTier,
}

#[derive(Debug, Clone, Serialize)]
pub struct GameRow {
    pub played_at: Option<DateTime<Utc>>,
    pub date: String,
    pub champion: String,
    pub icon_url: String,
    pub kda: String,
    pub cs: i64,
    pub cs_per_min: f64,
    pub damage: f64,
    pub won: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrendPoint {
    pub date: String,
    pub kda: f64,
    pub cs_per_min: f64,
}

/// Everything a renderer needs; built once, read-only afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub player: String,
    pub overview: Overview,
    pub roles: Vec<RoleShare>,
    pub recent_form: Vec<FormMarker>,
    pub champions: Vec<ChampionCard>,
    pub games: Vec<GameRow>,
    pub trend: Vec<TrendPoint>,
}

impl Dashboard {
    pub fn build(
        player: &str,
        summary: &PlayerSummary,
        records: &[MatchRecord],
        icons: &ChampionIcons,
    ) -> Self {
        Dashboard {
            player: player.to_string(),
            overview: overview(summary),
            roles: role_distribution(summary),
            recent_form: recent_form(summary),
            champions: champion_cards(summary, icons),
            games: game_rows(records, icons),
            trend: trend(records),
        }
    }
}

fn overview(summary: &PlayerSummary) -> Overview {
    Overview {
        total_games: summary.games,
        wins: summary.wins,
        losses: summary.losses,
        win_rate: summary.win_rate,
        kda: summary.kda,
        kda_gauge_percent: (summary.kda / KDA_GAUGE_CAP * 100.0).min(100.0),
        cs_per_min: summary.cs_per_min,
        avg_damage: summary.avg_damage,
    }
}

/// Played roles, most played first, as a share of all known-role games.
pub fn role_distribution(summary: &PlayerSummary) -> Vec<RoleShare> {
    let total = summary.role_counts.total();

    let mut shares: Vec<RoleShare> = summary
        .role_counts
        .iter()
        .filter(|(_, games)| *games > 0)
        .map(|(role, games)| RoleShare {
            role,
            games,
            percentage: win_rate(games, total),
        })
        .collect();

    shares.sort_by(|a, b| b.games.cmp(&a.games));
    shares
}

fn recent_form(summary: &PlayerSummary) -> Vec<FormMarker> {
    summary
        .recent_form
        .iter()
        .map(|game| FormMarker {
            won: game.won,
            tooltip: format!(
                "{}: {} ({})",
                game.champion.as_deref().unwrap_or("Unknown"),
                game.kda,
                if game.won { "Win" } else { "Loss" }
            ),
        })
        .collect()
}

fn champion_cards(summary: &PlayerSummary, icons: &ChampionIcons) -> Vec<ChampionCard> {
    summary
        .top_champions
        .iter()
        .take(MINI_CHAMPIONS)
        .map(|champ| ChampionCard {
            name: champ.name.clone(),
            icon_url: icons.url(&champ.name),
            games: champ.games,
            wins: champ.wins,
            losses: champ.losses(),
            kda: champ.kda,
            win_rate: champ.win_rate,
            tier: WinRateTier::from_win_rate(champ.win_rate),
        })
        .collect()
}

// Undated games sort after every dated one.
fn newest_first(a: &Option<DateTime<Utc>>, b: &Option<DateTime<Utc>>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn per_minute(value: f64, minutes: f64) -> f64 {
    value / if minutes > 0.0 { minutes } else { 1.0 }
}

fn format_date(played_at: Option<DateTime<Utc>>, raw: Option<&str>) -> String {
    match played_at {
        Some(dt) => dt.format("%b %-d, %Y").to_string(),
        None => raw.unwrap_or("Unknown").to_string(),
    }
}

/// Every game, newest first.
pub fn game_rows(records: &[MatchRecord], icons: &ChampionIcons) -> Vec<GameRow> {
    let mut rows: Vec<GameRow> = records
        .iter()
        .map(|game| {
            let played_at = game.played_at();
            let champion = game.champion.clone().unwrap_or_default();
            GameRow {
                played_at,
                date: format_date(played_at, game.date_time_utc.as_deref()),
                icon_url: icons.url(&champion),
                champion,
                kda: game.kda_literal(),
                cs: game.cs,
                cs_per_min: per_minute(game.cs as f64, game.game_length_minutes),
                damage: game.damage_to_champions,
                won: game.won(),
            }
        })
        .collect();

    rows.sort_by(|a, b| newest_first(&a.played_at, &b.played_at));
    rows
}

/// The ten most recent games in chronological order.
pub fn trend(records: &[MatchRecord]) -> Vec<TrendPoint> {
    let mut dated: Vec<(Option<DateTime<Utc>>, &MatchRecord)> =
        records.iter().map(|game| (game.played_at(), game)).collect();
    dated.sort_by(|a, b| newest_first(&a.0, &b.0));
    dated.truncate(TREND_GAMES);
    dated.reverse();

    dated
        .into_iter()
        .map(|(played_at, game)| {
            let deaths = if game.deaths.value != 0 {
                game.deaths.value
            } else {
                1
            };
            TrendPoint {
                date: format_date(played_at, game.date_time_utc.as_deref()),
                kda: game.kills.value.saturating_add(game.assists.value) as f64 / deaths as f64,
                cs_per_min: per_minute(game.cs as f64, game.game_length_minutes),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::player_stats::aggregate;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn icons() -> ChampionIcons {
        ChampionIcons::new("13.24.1")
    }

    fn dated_games() -> Vec<MatchRecord> {
        serde_json::from_value(json!([
            { "Champion": "Ahri", "DateTime UTC": "2024-02-01 10:00:00", "Kills": "3", "Deaths": "0", "Assists": "4", "CS": "250", "Gamelength Number": "25", "Role": "Mid" },
            { "Champion": "Zed", "DateTime UTC": "2024-03-01 10:00:00", "Kills": "1", "Deaths": "2", "Assists": "1", "CS": "100", "Gamelength Number": "0", "Role": "Mid" },
            { "Champion": "Lee Sin", "Kills": "0", "Deaths": "1", "Assists": "0", "Role": "Jungle" },
            { "Champion": "Kai'Sa", "DateTime UTC": "2024-01-01 10:00:00", "Role": "Bot" }
        ]))
        .unwrap()
    }

    #[test]
    fn test_icon_names() {
        assert_eq!(ChampionIcons::image_name("Kai'Sa"), "Kaisa");
        assert_eq!(ChampionIcons::image_name("LeBlanc"), "Leblanc");
        assert_eq!(ChampionIcons::image_name("Dr. Mundo"), "DrMundo");
        assert_eq!(ChampionIcons::image_name("Nunu & Willump"), "NunuWillump");
        assert_eq!(ChampionIcons::image_name("Rek'Sai"), "RekSai");
        assert_eq!(
            icons().url("Cho'Gath"),
            "https://ddragon.leagueoflegends.com/cdn/13.24.1/img/champion/Chogath.png"
        );
    }

    #[test]
    fn test_win_rate_tiers() {
        assert_eq!(WinRateTier::from_win_rate(60.0), WinRateTier::High);
        assert_eq!(WinRateTier::from_win_rate(59.9), WinRateTier::Medium);
        assert_eq!(WinRateTier::from_win_rate(50.0), WinRateTier::Medium);
        assert_eq!(WinRateTier::from_win_rate(49.9), WinRateTier::Low);
    }

    #[test]
    fn test_game_rows_newest_first() {
        let rows = game_rows(&dated_games(), &icons());
        let order: Vec<_> = rows.iter().map(|r| r.champion.as_str()).collect();
        assert_eq!(order, vec!["Zed", "Ahri", "Kai'Sa", "Lee Sin"]);
        assert_eq!(rows[0].date, "Mar 1, 2024");
        assert_eq!(rows[0].cs_per_min, 100.0);
        assert_eq!(rows[1].cs_per_min, 10.0);
        assert_eq!(rows[3].date, "Unknown");
    }

    #[test]
    fn test_trend_is_chronological() {
        let points = trend(&dated_games());
        let dates: Vec<_> = points.iter().map(|p| p.date.as_str()).collect();
        assert_eq!(dates, vec!["Unknown", "Jan 1, 2024", "Feb 1, 2024", "Mar 1, 2024"]);
        assert_eq!(points[2].kda, 7.0);
        assert_eq!(points[3].kda, 1.0);
    }

    #[test]
    fn test_role_distribution_sorted() {
        let summary = aggregate(&dated_games());
        let roles = role_distribution(&summary);
        assert_eq!(
            roles,
            vec![
                RoleShare { role: Role::Mid, games: 2, percentage: 50.0 },
                RoleShare { role: Role::Jungle, games: 1, percentage: 25.0 },
                RoleShare { role: Role::Bot, games: 1, percentage: 25.0 },
            ]
        );
    }

    #[test]
    fn test_dashboard_build() {
        let games = dated_games();
        let summary = aggregate(&games);
        let dashboard = Dashboard::build("Caps", &summary, &games, &icons());

        assert_eq!(dashboard.player, "Caps");
        assert_eq!(dashboard.overview.total_games, 4);
        assert_eq!(dashboard.champions.len(), 4);
        assert_eq!(dashboard.recent_form.len(), 4);
        // No Winner column: every game is a loss.
        assert_eq!(dashboard.overview.losses, 4);
        assert_eq!(dashboard.recent_form[0].tooltip, "Kai'Sa: -/-/- (Loss)");
        assert_eq!(dashboard.recent_form[0].letter(), "L");
        assert!(dashboard.overview.kda_gauge_percent <= 100.0);
    }
}
