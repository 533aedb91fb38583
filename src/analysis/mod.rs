pub mod champion_stats;
pub mod dashboard;
pub mod player_stats;
