use super::champion_stats::{kda_ratio, win_rate, ChampionStats, ChampionStatsTracker};
use crate::api::models::{MatchRecord, Role};
use serde::Serialize;
use tracing::info;

pub const TOP_CHAMPIONS: usize = 5;
pub const RECENT_FORM_GAMES: usize = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RoleCounts {
    pub top: usize,
    pub jungle: usize,
    pub mid: usize,
    pub bot: usize,
    pub support: usize,
}

impl RoleCounts {
    pub fn get(&self, role: Role) -> usize {
        match role {
            Role::Top => self.top,
            Role::Jungle => self.jungle,
            Role::Mid => self.mid,
            Role::Bot => self.bot,
            Role::Support => self.support,
        }
    }

    fn increment(&mut self, role: Role) {
        let slot = match role {
            Role::Top => &mut self.top,
            Role::Jungle => &mut self.jungle,
            Role::Mid => &mut self.mid,
            Role::Bot => &mut self.bot,
            Role::Support => &mut self.support,
        };
        *slot += 1;
    }

    pub fn total(&self) -> usize {
        Role::ALL.iter().map(|&role| self.get(role)).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Role, usize)> + '_ {
        Role::ALL.iter().map(move |&role| (role, self.get(role)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentGame {
    pub champion: Option<String>,
    pub won: bool,
    pub kda: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerSummary {
    pub games: usize,
    pub wins: usize,
    pub losses: usize,
    pub kills: i64,
    pub deaths: i64,
    pub assists: i64,
    pub cs: i64,
    pub damage: f64,
    pub game_minutes: f64,
    pub win_rate: f64,
    pub kda: f64,
    pub cs_per_min: f64,
    pub avg_damage: f64,
    pub champion_stats: Vec<ChampionStats>,
    pub top_champions: Vec<ChampionStats>,
    pub role_counts: RoleCounts,
    pub recent_form: Vec<RecentGame>,
}

impl PlayerSummary {
    #[allow(dead_code)]
    pub fn champion(&self, name: &str) -> Option<&ChampionStats> {
        self.champion_stats.iter().find(|c| c.name == name)
    }
}

/// Folds a match history into summary statistics.
///
/// Games are classified as wins or losses by comparing `Winner` with the
/// player's side. Champion totals keep first-seen order, which also breaks
/// ties in `top_champions`. `recent_form` holds the first ten games of the
/// input, reversed; the input is not re-sorted by date.
pub fn aggregate(records: &[MatchRecord]) -> PlayerSummary {
    let mut wins = 0;
    let mut losses = 0;
    let (mut kills, mut deaths, mut assists, mut cs) = (0i64, 0i64, 0i64, 0i64);
    let mut damage = 0.0;
    let mut game_minutes = 0.0;
    let mut champions = ChampionStatsTracker::new();
    let mut role_counts = RoleCounts::default();
    let mut recent_form = Vec::with_capacity(RECENT_FORM_GAMES);

    for game in records {
        let won = game.won();
        if won {
            wins += 1;
        } else {
            losses += 1;
        }

        kills = kills.saturating_add(game.kills.value);
        deaths = deaths.saturating_add(game.deaths.value);
        assists = assists.saturating_add(game.assists.value);
        cs = cs.saturating_add(game.cs);
        damage += game.damage_to_champions;
        game_minutes += game.game_length_minutes;

        if let Some(champion) = game.champion_name() {
            champions.add_game(champion, game, won);
        }

        if let Some(role) = game.known_role() {
            role_counts.increment(role);
        }

        if recent_form.len() < RECENT_FORM_GAMES {
            recent_form.push(RecentGame {
                champion: game.champion.clone(),
                won,
                kda: game.kda_literal(),
            });
        }
    }

    recent_form.reverse();

    let games = records.len();
    let top_champions = champions.most_played(TOP_CHAMPIONS);

    let summary = PlayerSummary {
        games,
        wins,
        losses,
        kills,
        deaths,
        assists,
        cs,
        damage,
        game_minutes,
        win_rate: win_rate(wins, games),
        kda: kda_ratio(kills, deaths, assists),
        cs_per_min: if game_minutes > 0.0 {
            cs as f64 / game_minutes
        } else {
            0.0
        },
        avg_damage: if games > 0 { damage / games as f64 } else { 0.0 },
        champion_stats: champions.into_stats(),
        top_champions,
        role_counts,
        recent_form,
    };

    info!(
        games = summary.games,
        wins = summary.wins,
        champions = summary.champion_stats.len(),
        "aggregated match history"
    );

    summary
}
