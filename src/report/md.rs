use crate::types::report::{Outcome, ScoreboardReport};

pub fn to_markdown(report: &ScoreboardReport) -> String {
    let mut output = String::new();
    output.push_str(&format!("# Awards Pool {}\n\n", report.year));
    output.push_str(&format!(
        "Decided categories: {} / {}\n\n",
        report.decided_categories, report.total_categories
    ));

    if report.scoreboard_on_top {
        push_scoreboard(&mut output, report);
        push_predictions(&mut output, report);
    } else {
        push_predictions(&mut output, report);
        push_scoreboard(&mut output, report);
    }

    output
}

fn points_label(points: u32) -> String {
    if points == 1 {
        "1 point".to_string()
    } else {
        format!("{points} points")
    }
}

fn push_scoreboard(output: &mut String, report: &ScoreboardReport) {
    output.push_str("## Scoreboard\n\n");
    if report.is_empty() {
        output.push_str("No predictions yet, or no winners have been marked.\n\n");
        return;
    }

    output.push_str("### Podium\n\n");
    for place in &report.podium {
        output.push_str(&format!(
            "- #{} {}: {} (bar {:.0})\n",
            place.place,
            place.entry.name,
            points_label(place.entry.points),
            place.bar_height
        ));
    }
    output.push('\n');

    if !report.rest.is_empty() {
        output.push_str("### Standings\n\n");
        for ranked in &report.rest {
            output.push_str(&format!(
                "- #{} {}: {}\n",
                ranked.place,
                ranked.entry.name,
                points_label(ranked.entry.points)
            ));
        }
        output.push('\n');
    }
}

fn push_predictions(output: &mut String, report: &ScoreboardReport) {
    output.push_str("## Predictions\n\n");
    if report.predictions.is_empty() {
        output.push_str("- none\n\n");
        return;
    }

    for prediction in &report.predictions {
        match prediction.created_at {
            Some(created_at) => output.push_str(&format!(
                "### {} ({})\n\n",
                prediction.name,
                created_at.format("%Y-%m-%d %H:%M UTC")
            )),
            None => output.push_str(&format!("### {}\n\n", prediction.name)),
        }

        match &prediction.picks {
            None => output.push_str("- picks hidden\n"),
            Some(picks) => {
                for pick in picks {
                    let marker = match pick.outcome {
                        Outcome::Correct => " [correct]",
                        Outcome::Missed => " [missed]",
                        Outcome::Pending => "",
                    };
                    output.push_str(&format!(
                        "- {}: {}{}\n",
                        pick.category,
                        pick.pick.as_deref().unwrap_or("-"),
                        marker
                    ));
                }
            }
        }
        output.push('\n');
    }
}
