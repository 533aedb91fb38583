use crate::analysis::dashboard::{Dashboard, WinRateTier};
use crate::error::AppError;
use colored::*;
use std::io::Write;
use tabled::{settings::Style, Table, Tabled};

/// Projects a built dashboard onto some output.
pub trait Renderer {
    fn render(&self, dashboard: &Dashboard, out: &mut dyn Write) -> Result<(), AppError>;
}

pub struct TerminalRenderer;

pub struct JsonRenderer;

#[derive(Tabled)]
struct ChampionRow {
    #[tabled(rename = "#")]
    rank: String,
    champion: String,
    games: String,
    record: String,
    win_rate: String,
    kda: String,
}

#[derive(Tabled)]
struct GameTableRow {
    date: String,
    champion: String,
    kda: String,
    cs: String,
    cs_per_min: String,
    damage: String,
    result: String,
}

#[derive(Tabled)]
struct TrendRow {
    date: String,
    kda: String,
    cs_per_min: String,
}

fn io_err(e: std::io::Error) -> AppError {
    AppError::IoError(e.to_string())
}

fn tier_colored(text: String, tier: WinRateTier) -> ColoredString {
    match tier {
        WinRateTier::High => text.green(),
        WinRateTier::Medium => text.yellow(),
        WinRateTier::Low => text.red(),
    }
}

/// Rounds and groups digits by thousands, e.g. `12345.6` -> `12,346`.
pub fn format_thousands(value: f64) -> String {
    let rounded = value.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

impl TerminalRenderer {
    fn render_overview(&self, dashboard: &Dashboard, out: &mut dyn Write) -> std::io::Result<()> {
        let overview = &dashboard.overview;

        writeln!(
            out,
            "\n{}",
            format!("📊 PLAYER ANALYTICS: {}", dashboard.player).bold().cyan()
        )?;
        writeln!(out, "{}\n", "=".repeat(60).cyan())?;
        writeln!(
            out,
            "{} {} games, {} W / {} L ({:.1}% WR)",
            "📈 Overall:".bold(),
            overview.total_games,
            overview.wins.to_string().green(),
            overview.losses.to_string().red(),
            overview.win_rate
        )?;
        writeln!(
            out,
            "{} {:.2} ({:.0}% of gauge)",
            "⚔️  KDA:".bold(),
            overview.kda,
            overview.kda_gauge_percent
        )?;
        writeln!(out, "{} {:.1}", "🌾 CS/min:".bold(), overview.cs_per_min)?;
        writeln!(
            out,
            "{} {}",
            "💥 Avg damage:".bold(),
            format_thousands(overview.avg_damage)
        )?;

        Ok(())
    }

    fn render_roles(&self, dashboard: &Dashboard, out: &mut dyn Write) -> std::io::Result<()> {
        if dashboard.roles.is_empty() {
            return Ok(());
        }

        writeln!(out, "\n{}", "Role Distribution".bold().yellow())?;
        for share in &dashboard.roles {
            let width = (share.percentage / 5.0).round() as usize;
            writeln!(
                out,
                "  {:<8} {} {:.0}%",
                share.role.as_str(),
                "█".repeat(width).cyan(),
                share.percentage
            )?;
        }

        Ok(())
    }

    fn render_form(&self, dashboard: &Dashboard, out: &mut dyn Write) -> std::io::Result<()> {
        if dashboard.recent_form.is_empty() {
            return Ok(());
        }

        let strip: Vec<String> = dashboard
            .recent_form
            .iter()
            .map(|marker| {
                if marker.won {
                    marker.letter().green().bold().to_string()
                } else {
                    marker.letter().red().bold().to_string()
                }
            })
            .collect();

        writeln!(out, "\n{} {}", "Recent Form".bold().yellow(), strip.join(" "))?;
        for marker in &dashboard.recent_form {
            writeln!(out, "  {}", marker.tooltip.dimmed())?;
        }

        Ok(())
    }

    fn render_champions(&self, dashboard: &Dashboard, out: &mut dyn Write) -> std::io::Result<()> {
        if dashboard.champions.is_empty() {
            return Ok(());
        }

        writeln!(out, "\n{}", "🏆 Top Champions".bold().cyan())?;

        let rows: Vec<ChampionRow> = dashboard
            .champions
            .iter()
            .enumerate()
            .map(|(idx, champ)| ChampionRow {
                rank: format!("#{}", idx + 1),
                champion: champ.name.clone(),
                games: champ.games.to_string(),
                record: format!("{}W {}L", champ.wins, champ.losses),
                win_rate: tier_colored(format!("{:.0}%", champ.win_rate), champ.tier).to_string(),
                kda: format!("{:.2}", champ.kda),
            })
            .collect();

        let mut table = Table::new(rows);
        table.with(Style::rounded());
        writeln!(out, "{}", table)
    }

    fn render_games(&self, dashboard: &Dashboard, out: &mut dyn Write) -> std::io::Result<()> {
        writeln!(out, "\n{}", "📋 Performance".bold().cyan())?;

        let rows: Vec<GameTableRow> = dashboard
            .games
            .iter()
            .map(|game| GameTableRow {
                date: game.date.clone(),
                champion: game.champion.clone(),
                kda: game.kda.clone(),
                cs: game.cs.to_string(),
                cs_per_min: format!("{:.1}", game.cs_per_min),
                damage: format_thousands(game.damage),
                result: if game.won {
                    "Win".green().to_string()
                } else {
                    "Loss".red().to_string()
                },
            })
            .collect();

        let mut table = Table::new(rows);
        table.with(Style::rounded());
        writeln!(out, "{}", table)
    }

    fn render_trend(&self, dashboard: &Dashboard, out: &mut dyn Write) -> std::io::Result<()> {
        if dashboard.trend.is_empty() {
            return Ok(());
        }

        writeln!(out, "\n{}", "📉 Trend (last 10 games)".bold().cyan())?;

        let rows: Vec<TrendRow> = dashboard
            .trend
            .iter()
            .map(|point| TrendRow {
                date: point.date.clone(),
                kda: format!("{:.2}", point.kda),
                cs_per_min: format!("{:.2}", point.cs_per_min),
            })
            .collect();

        let mut table = Table::new(rows);
        table.with(Style::rounded());
        writeln!(out, "{}\n", table)
    }
}

impl Renderer for TerminalRenderer {
    fn render(&self, dashboard: &Dashboard, out: &mut dyn Write) -> Result<(), AppError> {
        self.render_overview(dashboard, out).map_err(io_err)?;
        self.render_roles(dashboard, out).map_err(io_err)?;
        self.render_form(dashboard, out).map_err(io_err)?;
        self.render_champions(dashboard, out).map_err(io_err)?;
        self.render_games(dashboard, out).map_err(io_err)?;
        self.render_trend(dashboard, out).map_err(io_err)?;
        Ok(())
    }
}

impl Renderer for JsonRenderer {
    fn render(&self, dashboard: &Dashboard, out: &mut dyn Write) -> Result<(), AppError> {
        serde_json::to_writer_pretty(&mut *out, dashboard)
            .map_err(|e| AppError::JsonError(format!("Failed to serialize dashboard: {}", e)))?;
        writeln!(out).map_err(io_err)
    }
}

pub fn display_error(error: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
}

pub fn display_info(message: &str) {
    eprintln!("{} {}", "ℹ️".cyan(), message);
}

pub fn display_success(message: &str) {
    eprintln!("{} {}", "✓".green(), message);
}
