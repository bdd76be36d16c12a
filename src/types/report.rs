use crate::types::model::ScoreboardEntry;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ScoreboardReport {
    pub year: i32,
    pub decided_categories: usize,
    pub total_categories: usize,
    pub scoreboard_on_top: bool,
    pub podium: Vec<PodiumPlace>,
    pub rest: Vec<RankedEntry>,
    pub predictions: Vec<PredictionView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RankedEntry {
    pub place: usize,
    #[serde(flatten)]
    pub entry: ScoreboardEntry,
}

#[derive(Debug, Clone, Serialize)]
pub struct PodiumPlace {
    pub place: usize,
    #[serde(flatten)]
    pub entry: ScoreboardEntry,
    pub bar_height: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PredictionView {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// `None` when the viewer may not see this prediction's picks.
    pub picks: Option<Vec<PickView>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PickView {
    pub category_id: String,
    pub category: String,
    pub pick: Option<String>,
    pub outcome: Outcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Correct,
    Missed,
    Pending,
}

impl ScoreboardReport {
    pub fn is_empty(&self) -> bool {
        self.podium.is_empty()
    }
}
