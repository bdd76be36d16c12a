pub mod json;
pub mod md;

use crate::error::PoolError;
use crate::pool::access;
use crate::pool::Pool;
use crate::scoreboard::{self, podium};
use crate::types::config::PoolConfig;
use crate::types::report::{
    Outcome, PickView, PodiumPlace, PredictionView, RankedEntry, ScoreboardReport,
};

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Md,
}

pub fn render(report: &ScoreboardReport, format: OutputFormat) -> Result<String, PoolError> {
    match format {
        OutputFormat::Json => json::to_json(report).map_err(PoolError::Json),
        OutputFormat::Md => Ok(md::to_markdown(report)),
    }
}

/// Scores the season and assembles everything a viewer is allowed to see.
pub fn build_report(pool: &Pool, config: &PoolConfig, viewer: Option<&str>) -> ScoreboardReport {
    let settings = config.scoreboard_settings();
    let winners = scoreboard::build_winner_index(&pool.nominees);
    let entries = scoreboard::score(
        &pool.predictions,
        &pool.categories,
        &winners,
        settings.name_order,
    );

    let split = podium::split(&entries, settings.podium_size);
    let heights = podium::podium_heights(split.top, &settings);
    let podium = split
        .top
        .iter()
        .zip(heights)
        .enumerate()
        .map(|(index, (entry, bar_height))| PodiumPlace {
            place: index + 1,
            entry: entry.clone(),
            bar_height,
        })
        .collect();
    let rest = split
        .rest
        .iter()
        .enumerate()
        .map(|(index, entry)| RankedEntry {
            place: split.top.len() + index + 1,
            entry: entry.clone(),
        })
        .collect();

    let predictions = pool
        .predictions
        .iter()
        .map(|prediction| {
            let visible = access::can_view_picks(
                config,
                pool.settings.hide_others_picks,
                viewer,
                prediction.email.as_deref(),
            );
            let picks = visible.then(|| {
                pool.categories
                    .iter()
                    .map(|category| {
                        let pick = prediction.pick(&category.id);
                        let outcome = match winners.get(category.id.as_str()) {
                            None => Outcome::Pending,
                            Some(winner) if pick == Some(winner.name.as_str()) => Outcome::Correct,
                            Some(_) => Outcome::Missed,
                        };
                        PickView {
                            category_id: category.id.clone(),
                            category: category.label.clone(),
                            pick: pick.map(str::to_string),
                            outcome,
                        }
                    })
                    .collect()
            });
            PredictionView {
                id: prediction.id.clone(),
                name: prediction.name.clone(),
                created_at: prediction.created_at,
                picks,
            }
        })
        .collect();

    ScoreboardReport {
        year: pool.year,
        decided_categories: scoreboard::decided_count(&pool.categories, &winners),
        total_categories: pool.categories.len(),
        scoreboard_on_top: pool.settings.scoreboard_on_top,
        podium,
        rest,
        predictions,
    }
}
