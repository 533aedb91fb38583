use crate::api::models::MatchRecord;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChampionStats {
    pub name: String,
    pub games: usize,
    pub wins: usize,
    pub kills: i64,
    pub deaths: i64,
    pub assists: i64,
    pub cs: i64,
    pub damage: f64,
    pub win_rate: f64,
    pub kda: f64,
}

impl ChampionStats {
    pub fn new(name: String) -> Self {
        ChampionStats {
            name,
            games: 0,
            wins: 0,
            kills: 0,
            deaths: 0,
            assists: 0,
            cs: 0,
            damage: 0.0,
            win_rate: 0.0,
            kda: 0.0,
        }
    }

    pub fn losses(&self) -> usize {
        self.games - self.wins
    }

    fn add_game(&mut self, game: &MatchRecord, won: bool) {
        self.games += 1;
        if won {
            self.wins += 1;
        }
        self.kills = self.kills.saturating_add(game.kills.value);
        self.deaths = self.deaths.saturating_add(game.deaths.value);
        self.assists = self.assists.saturating_add(game.assists.value);
        self.cs = self.cs.saturating_add(game.cs);
        self.damage += game.damage_to_champions;

        self.win_rate = win_rate(self.wins, self.games);
        self.kda = kda_ratio(self.kills, self.deaths, self.assists);
    }
}

/// Win percentage, 0 when no games were played.
pub fn win_rate(wins: usize, games: usize) -> f64 {
    if games == 0 {
        0.0
    } else {
        (wins as f64 / games as f64) * 100.0
    }
}

/// (kills + assists) / deaths, or kills + assists when the player never died.
pub fn kda_ratio(kills: i64, deaths: i64, assists: i64) -> f64 {
    let takedowns = kills.saturating_add(assists) as f64;
    if deaths > 0 {
        takedowns / deaths as f64
    } else {
        takedowns
    }
}

/// Per-champion totals in first-seen order.
#[derive(Debug, Default)]
pub struct ChampionStatsTracker {
    stats: Vec<ChampionStats>,
    index: HashMap<String, usize>,
}

impl ChampionStatsTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_game(&mut self, champion_name: &str, game: &MatchRecord, won: bool) {
        let slot = match self.index.get(champion_name) {
            Some(&slot) => slot,
            None => {
                self.stats.push(ChampionStats::new(champion_name.to_string()));
                self.index
                    .insert(champion_name.to_string(), self.stats.len() - 1);
                self.stats.len() - 1
            }
        };

        self.stats[slot].add_game(game, won);
    }

    #[allow(dead_code)]
    pub fn get_champion(&self, name: &str) -> Option<&ChampionStats> {
        self.index.get(name).map(|&slot| &self.stats[slot])
    }

    /// Most played first; ties keep first-seen order.
    pub fn most_played(&self, top_n: usize) -> Vec<ChampionStats> {
        let mut ranked = self.stats.clone();
        ranked.sort_by(|a, b| b.games.cmp(&a.games));
        ranked.truncate(top_n);
        ranked
    }

    pub fn into_stats(self) -> Vec<ChampionStats> {
        self.stats
    }
}
