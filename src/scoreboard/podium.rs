use crate::types::config::ScoreboardSettings;
use crate::types::model::ScoreboardEntry;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Podium<'a> {
    pub top: &'a [ScoreboardEntry],
    pub rest: &'a [ScoreboardEntry],
}

/// Splits an already sorted scoreboard into the first `size` entries and the rest.
pub fn split(entries: &[ScoreboardEntry], size: usize) -> Podium<'_> {
    let (top, rest) = entries.split_at(size.min(entries.len()));
    Podium { top, rest }
}

/// Linear height between `min` and `max` by the ratio to the leader's points.
pub fn bar_height(points: u32, leader_points: u32, min: f64, max: f64) -> f64 {
    if leader_points == 0 {
        return min;
    }
    let ratio = f64::from(points) / f64::from(leader_points);
    min + (max - min) * ratio
}

/// Heights for each podium entry, the first entry being the leader.
pub fn podium_heights(top: &[ScoreboardEntry], settings: &ScoreboardSettings) -> Vec<f64> {
    let leader_points = top.first().map(|entry| entry.points).unwrap_or(0);
    top.iter()
        .map(|entry| {
            bar_height(
                entry.points,
                leader_points,
                settings.min_bar_height,
                settings.max_bar_height,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(points: &[u32]) -> Vec<ScoreboardEntry> {
        points
            .iter()
            .enumerate()
            .map(|(index, points)| ScoreboardEntry {
                prediction_id: format!("p{index}"),
                name: format!("Player {index}"),
                points: *points,
            })
            .collect()
    }

    #[test]
    fn split_slices_by_index() {
        let scoreboard = entries(&[5, 4, 3, 2, 1]);
        let podium = split(&scoreboard, 3);
        assert_eq!(podium.top.len(), 3);
        assert_eq!(podium.rest.len(), 2);
        assert_eq!(podium.rest[0].prediction_id, "p3");
    }

    #[test]
    fn split_short_scoreboard_has_no_rest() {
        let scoreboard = entries(&[2, 1]);
        let podium = split(&scoreboard, 3);
        assert_eq!(podium.top.len(), 2);
        assert!(podium.rest.is_empty());

        let podium = split(&[], 3);
        assert!(podium.top.is_empty());
        assert!(podium.rest.is_empty());
    }

    #[test]
    fn leader_gets_max_height() {
        assert_eq!(bar_height(4, 4, 180.0, 260.0), 260.0);
        assert_eq!(bar_height(2, 4, 180.0, 260.0), 220.0);
        assert_eq!(bar_height(0, 4, 180.0, 260.0), 180.0);
    }

    #[test]
    fn zero_leader_uses_min_everywhere() {
        let scoreboard = entries(&[0, 0, 0]);
        let heights = podium_heights(&scoreboard, &ScoreboardSettings::default());
        assert_eq!(heights, vec![180.0, 180.0, 180.0]);
    }

    #[test]
    fn podium_heights_follow_settings() {
        let settings = ScoreboardSettings {
            min_bar_height: 100.0,
            max_bar_height: 200.0,
            ..ScoreboardSettings::default()
        };
        let scoreboard = entries(&[4, 3, 1]);
        let heights = podium_heights(&scoreboard, &settings);
        assert_eq!(heights, vec![200.0, 175.0, 125.0]);
    }
}
