use super::Snapshot;
use crate::error::{PoolError, Result};
use crate::types::model::{Extra, Picks, PoolSettings, Prediction};
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

/// A participant's submission, applied on top of any existing prediction.
#[derive(Debug, Clone, Default)]
pub struct PredictionDraft {
    pub name: String,
    pub email: String,
    pub user_id: Option<String>,
    pub picks: Picks,
    pub cleared: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Upsert {
    Created(String),
    Updated(String),
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SettingsPatch {
    pub hide_others_picks: Option<bool>,
    pub scoreboard_on_top: Option<bool>,
}

impl SettingsPatch {
    pub fn is_empty(&self) -> bool {
        self.hide_others_picks.is_none() && self.scoreboard_on_top.is_none()
    }
}

fn ensure_category(snapshot: &Snapshot, year: i32, category_id: &str) -> Result<()> {
    if snapshot
        .categories
        .iter()
        .any(|category| category.year == year && category.id == category_id)
    {
        Ok(())
    } else {
        Err(PoolError::UnknownCategory(category_id.to_string()))
    }
}

/// Flags `nominee_id` as the only winner of its category for the season.
pub fn set_winner(
    snapshot: &mut Snapshot,
    year: i32,
    category_id: &str,
    nominee_id: &str,
) -> Result<()> {
    ensure_category(snapshot, year, category_id)?;
    if !snapshot.nominees.iter().any(|nominee| {
        nominee.year == year && nominee.category_id == category_id && nominee.id == nominee_id
    }) {
        return Err(PoolError::UnknownNominee(format!(
            "{nominee_id} in category {category_id}"
        )));
    }

    for nominee in snapshot
        .nominees
        .iter_mut()
        .filter(|nominee| nominee.year == year && nominee.category_id == category_id)
    {
        nominee.is_winner = nominee.id == nominee_id;
    }
    tracing::info!(category = category_id, nominee = nominee_id, "winner set");
    Ok(())
}

/// Returns how many flags were cleared.
pub fn clear_winner(snapshot: &mut Snapshot, year: i32, category_id: &str) -> Result<usize> {
    ensure_category(snapshot, year, category_id)?;
    let mut cleared = 0;
    for nominee in snapshot.nominees.iter_mut().filter(|nominee| {
        nominee.year == year && nominee.category_id == category_id && nominee.is_winner
    }) {
        nominee.is_winner = false;
        cleared += 1;
    }
    tracing::info!(category = category_id, cleared, "winner cleared");
    Ok(cleared)
}

fn validate_draft(snapshot: &Snapshot, year: i32, draft: &PredictionDraft) -> Result<String> {
    let name = draft.name.trim().to_string();
    if name.is_empty() {
        return Err(PoolError::EmptyName);
    }

    for (category_id, pick) in &draft.picks {
        ensure_category(snapshot, year, category_id)?;
        let offered = snapshot.nominees.iter().any(|nominee| {
            nominee.year == year && &nominee.category_id == category_id && &nominee.name == pick
        });
        if !offered {
            return Err(PoolError::InvalidPick(format!(
                "'{pick}' is not a nominee in category {category_id}"
            )));
        }
    }
    for category_id in &draft.cleared {
        ensure_category(snapshot, year, category_id)?;
    }
    Ok(name)
}

fn apply_picks(prediction: &mut Prediction, picks: Picks, cleared: &[String]) {
    prediction.picks.extend(picks);
    for category_id in cleared {
        prediction.picks.remove(category_id);
    }
}

/// Creates or updates the prediction owned by `draft.email`.
pub fn upsert_prediction(
    snapshot: &mut Snapshot,
    year: i32,
    draft: PredictionDraft,
    now: DateTime<Utc>,
) -> Result<Upsert> {
    let name = validate_draft(snapshot, year, &draft)?;
    let email = draft.email.trim().to_lowercase();

    let existing = snapshot
        .predictions
        .iter_mut()
        .find(|prediction| prediction.year == year && prediction.owned_by(&email));

    match existing {
        Some(prediction) => {
            prediction.name = name;
            prediction.email = Some(email);
            if draft.user_id.is_some() {
                prediction.user_id = draft.user_id;
            }
            apply_picks(prediction, draft.picks, &draft.cleared);
            tracing::info!(prediction = %prediction.id, "prediction updated");
            Ok(Upsert::Updated(prediction.id.clone()))
        }
        None => {
            let id = prediction_id(&email, year, now);
            let mut prediction = Prediction {
                id: id.clone(),
                name,
                email: Some(email),
                user_id: draft.user_id,
                picks: Picks::new(),
                created_at: Some(now),
                year,
                extra: Extra::new(),
            };
            apply_picks(&mut prediction, draft.picks, &draft.cleared);
            snapshot.predictions.push(prediction);
            tracing::info!(prediction = %id, "prediction created");
            Ok(Upsert::Created(id))
        }
    }
}

/// Edits the prediction `id` in place. Owner e-mail and identity are left as stored.
pub fn edit_prediction(
    snapshot: &mut Snapshot,
    year: i32,
    id: &str,
    draft: PredictionDraft,
) -> Result<()> {
    let name = validate_draft(snapshot, year, &draft)?;
    let prediction = snapshot
        .predictions
        .iter_mut()
        .find(|prediction| prediction.year == year && prediction.id == id)
        .ok_or_else(|| PoolError::UnknownPrediction(id.to_string()))?;

    prediction.name = name;
    apply_picks(prediction, draft.picks, &draft.cleared);
    tracing::info!(prediction = id, "prediction edited");
    Ok(())
}

fn prediction_id(email: &str, year: i32, now: DateTime<Utc>) -> String {
    let digest = Sha256::digest(format!("{email}|{year}|{}", now.to_rfc3339()).as_bytes());
    let hex = format!("{digest:x}");
    format!("pred-{}", &hex[..16])
}

pub fn delete_prediction(snapshot: &mut Snapshot, year: i32, id: &str) -> Result<()> {
    let before = snapshot.predictions.len();
    snapshot
        .predictions
        .retain(|prediction| !(prediction.year == year && prediction.id == id));
    if snapshot.predictions.len() == before {
        return Err(PoolError::UnknownPrediction(id.to_string()));
    }
    tracing::info!(prediction = id, "prediction deleted");
    Ok(())
}

/// Deletes every prediction of the season whose e-mail equals `email`. A blank
/// address deletes nothing.
pub fn purge_by_email(snapshot: &mut Snapshot, year: i32, email: &str) -> usize {
    let email = email.trim().to_lowercase();
    if email.is_empty() {
        return 0;
    }
    let before = snapshot.predictions.len();
    snapshot.predictions.retain(|prediction| {
        prediction.year != year
            || prediction
                .email
                .as_deref()
                .map(str::to_lowercase)
                .as_deref()
                != Some(email.as_str())
    });
    let removed = before - snapshot.predictions.len();
    tracing::info!(removed, "predictions purged");
    removed
}

pub fn update_settings(snapshot: &mut Snapshot, year: i32, patch: SettingsPatch) -> PoolSettings {
    let position = match snapshot.settings.iter().position(|row| row.year == year) {
        Some(position) => position,
        None => {
            snapshot.settings.push(PoolSettings {
                year,
                ..PoolSettings::default()
            });
            snapshot.settings.len() - 1
        }
    };
    let settings = &mut snapshot.settings[position];
    if let Some(hide) = patch.hide_others_picks {
        settings.hide_others_picks = hide;
    }
    if let Some(on_top) = patch.scoreboard_on_top {
        settings.scoreboard_on_top = on_top;
    }
    settings.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::fixtures::sample;
    use crate::scoreboard;
    use crate::types::config::NameOrder;

    fn now() -> DateTime<Utc> {
        "2026-03-01T12:00:00Z"
            .parse()
            .expect("timestamp should parse")
    }

    fn standings(snapshot: &Snapshot) -> Vec<crate::types::model::ScoreboardEntry> {
        let pool = snapshot.season(2026);
        let winners = scoreboard::build_winner_index(&pool.nominees);
        scoreboard::score(&pool.predictions, &pool.categories, &winners, NameOrder::Lexical)
    }

    fn draft(name: &str, email: &str, picks: &[(&str, &str)]) -> PredictionDraft {
        PredictionDraft {
            name: name.to_string(),
            email: email.to_string(),
            user_id: None,
            picks: picks
                .iter()
                .map(|(category_id, pick)| (category_id.to_string(), pick.to_string()))
                .collect(),
            cleared: Vec::new(),
        }
    }

    #[test]
    fn set_winner_leaves_one_flag_per_category() {
        let mut snapshot = sample();
        set_winner(&mut snapshot, 2026, "c1", "n1").expect("first winner");
        set_winner(&mut snapshot, 2026, "c1", "n2").expect("second winner");

        let flagged: Vec<&str> = snapshot
            .nominees
            .iter()
            .filter(|nominee| nominee.category_id == "c1" && nominee.is_winner)
            .map(|nominee| nominee.id.as_str())
            .collect();
        assert_eq!(flagged, vec!["n2"]);
    }

    #[test]
    fn set_winner_rejects_nominee_from_other_category() {
        let mut snapshot = sample();
        let err = set_winner(&mut snapshot, 2026, "c1", "n3").expect_err("wrong category");
        assert!(matches!(err, PoolError::UnknownNominee(_)));
        assert!(snapshot.nominees.iter().all(|nominee| nominee.year != 2026 || !nominee.is_winner));
    }

    #[test]
    fn set_winner_rejects_category_from_other_season() {
        let mut snapshot = sample();
        let err = set_winner(&mut snapshot, 2026, "old", "n9").expect_err("other season");
        assert!(matches!(err, PoolError::UnknownCategory(_)));
    }

    #[test]
    fn winner_changes_flow_into_scoreboard() {
        let mut snapshot = sample();
        set_winner(&mut snapshot, 2026, "c1", "n2").expect("winner set");

        let board = standings(&snapshot);
        assert_eq!(board[0].name, "Bo");
        assert_eq!(board[0].points, 1);

        let cleared = clear_winner(&mut snapshot, 2026, "c1").expect("winner cleared");
        assert_eq!(cleared, 1);
        let board = standings(&snapshot);
        assert!(board.iter().all(|entry| entry.points == 0));
    }

    #[test]
    fn upsert_creates_then_updates_by_email() {
        let mut snapshot = sample();
        let created = upsert_prediction(
            &mut snapshot,
            2026,
            draft("  Cy  ", "Cy@Example.com", &[("c1", "Dune")]),
            now(),
        )
        .expect("create should succeed");
        let Upsert::Created(id) = created else {
            panic!("expected a new prediction");
        };

        let stored = snapshot
            .predictions
            .iter()
            .find(|prediction| prediction.id == id)
            .expect("created prediction should exist");
        assert_eq!(stored.name, "Cy");
        assert_eq!(stored.email.as_deref(), Some("cy@example.com"));
        assert_eq!(stored.created_at, Some(now()));

        let mut update = draft("Cy", "cy@example.com", &[("c2", "Villeneuve")]);
        update.cleared.push("c1".to_string());
        let updated = upsert_prediction(&mut snapshot, 2026, update, now())
            .expect("update should succeed");
        assert_eq!(updated, Upsert::Updated(id.clone()));

        let stored = snapshot
            .predictions
            .iter()
            .find(|prediction| prediction.id == id)
            .expect("updated prediction should exist");
        assert_eq!(stored.pick("c1"), None);
        assert_eq!(stored.pick("c2"), Some("Villeneuve"));
    }

    #[test]
    fn upsert_ignores_same_email_in_other_season() {
        let mut snapshot = sample();
        let before = snapshot.predictions.len();
        let result = upsert_prediction(
            &mut snapshot,
            2026,
            draft("Ana", "ana@example.com", &[("c2", "Villeneuve")]),
            now(),
        )
        .expect("update should succeed");
        assert_eq!(result, Upsert::Updated("p1".to_string()));
        assert_eq!(snapshot.predictions.len(), before);
        let old = snapshot
            .predictions
            .iter()
            .find(|prediction| prediction.id == "p0")
            .expect("old prediction kept");
        assert_eq!(old.pick("old"), Some("Oppenheimer"));
    }

    #[test]
    fn upsert_rejects_blank_name_and_unknown_picks() {
        let mut snapshot = sample();
        let err = upsert_prediction(&mut snapshot, 2026, draft("   ", "x@example.com", &[]), now())
            .expect_err("blank name");
        assert!(matches!(err, PoolError::EmptyName));

        let err = upsert_prediction(
            &mut snapshot,
            2026,
            draft("X", "x@example.com", &[("c1", "Villeneuve")]),
            now(),
        )
        .expect_err("nominee from another category");
        assert!(matches!(err, PoolError::InvalidPick(_)));

        let err = upsert_prediction(
            &mut snapshot,
            2026,
            draft("X", "x@example.com", &[("nope", "Dune")]),
            now(),
        )
        .expect_err("unknown category");
        assert!(matches!(err, PoolError::UnknownCategory(_)));
    }

    #[test]
    fn edit_prediction_keeps_owner_identity() {
        let mut snapshot = sample();
        let mut changes = draft(" Ana B ", "admin@example.com", &[("c1", "Roma")]);
        changes.cleared.push("c2".to_string());
        edit_prediction(&mut snapshot, 2026, "p1", changes).expect("edit should succeed");

        let stored = snapshot
            .predictions
            .iter()
            .find(|prediction| prediction.id == "p1")
            .expect("prediction should exist");
        assert_eq!(stored.name, "Ana B");
        assert_eq!(stored.email.as_deref(), Some("ana@example.com"));
        assert_eq!(stored.pick("c1"), Some("Roma"));
        assert_eq!(stored.pick("c2"), None);
    }

    #[test]
    fn edit_prediction_rejects_unknown_or_other_season_id() {
        let mut snapshot = sample();
        let err = edit_prediction(&mut snapshot, 2026, "p0", draft("Old", "", &[]))
            .expect_err("other season");
        assert!(matches!(err, PoolError::UnknownPrediction(_)));
        let err = edit_prediction(&mut snapshot, 2026, "p1", draft(" ", "", &[]))
            .expect_err("blank name");
        assert!(matches!(err, PoolError::EmptyName));
    }

    #[test]
    fn delete_prediction_is_scoped_to_season() {
        let mut snapshot = sample();
        let err = delete_prediction(&mut snapshot, 2026, "p0").expect_err("other season");
        assert!(matches!(err, PoolError::UnknownPrediction(_)));

        delete_prediction(&mut snapshot, 2026, "p1").expect("delete should succeed");
        assert!(snapshot.predictions.iter().all(|prediction| prediction.id != "p1"));
    }

    #[test]
    fn purge_by_email_removes_matches_in_season_only() {
        let mut snapshot = sample();
        assert_eq!(purge_by_email(&mut snapshot, 2026, "   "), 0);
        assert_eq!(purge_by_email(&mut snapshot, 2026, " ANA@example.com "), 1);
        assert!(snapshot.predictions.iter().any(|prediction| prediction.id == "p0"));
        assert!(snapshot.predictions.iter().all(|prediction| prediction.id != "p1"));
    }

    #[test]
    fn update_settings_creates_missing_row() {
        let mut snapshot = sample();
        let settings = update_settings(
            &mut snapshot,
            2025,
            SettingsPatch {
                scoreboard_on_top: Some(true),
                ..SettingsPatch::default()
            },
        );
        assert!(settings.scoreboard_on_top);
        assert!(!settings.hide_others_picks);
        assert_eq!(snapshot.settings_for(2025), settings);

        let settings = update_settings(
            &mut snapshot,
            2026,
            SettingsPatch {
                hide_others_picks: Some(false),
                ..SettingsPatch::default()
            },
        );
        assert!(!settings.hide_others_picks);
        assert_eq!(snapshot.settings.len(), 2);
    }
}
