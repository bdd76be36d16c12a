use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};

pub type Picks = BTreeMap<String, String>;

/// Stored fields this tool does not model; written back untouched.
pub type Extra = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub sort_order: i32,
    pub year: i32,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nominee {
    pub id: String,
    pub category_id: String,
    /// Stored under `nominee` by the hosted pool tables.
    #[serde(rename(serialize = "nominee"), alias = "nominee")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub is_winner: bool,
    #[serde(default)]
    pub sort_order: i32,
    pub year: i32,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Category id to the chosen nominee's display name.
    #[serde(default, deserialize_with = "lenient_picks")]
    pub picks: Picks,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    pub year: i32,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Prediction {
    /// The stored pick for a category, if any.
    pub fn pick(&self, category_id: &str) -> Option<&str> {
        self.picks.get(category_id).map(String::as_str)
    }

    pub fn owned_by(&self, email: &str) -> bool {
        self.email
            .as_deref()
            .is_some_and(|own| same_email(own, email))
    }
}

/// E-mail equality as stored: trimmed and lowercased on both sides.
pub fn same_email(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

/// Global toggles for one season.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PoolSettings {
    pub year: i32,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub hide_others_picks: bool,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub scoreboard_on_top: bool,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreboardEntry {
    pub prediction_id: String,
    pub name: String,
    pub points: u32,
}

// A `null` or missing flag is treated as false.
fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

// Picks arrive as a loosely typed object. Anything that is not a non-blank
// string is dropped so a bad pick never fails the whole record.
fn lenient_picks<'de, D>(deserializer: D) -> Result<Picks, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    let Some(Value::Object(map)) = raw else {
        return Ok(Picks::new());
    };
    Ok(map
        .into_iter()
        .filter_map(|(category_id, value)| match value {
            Value::String(name) if !name.trim().is_empty() => Some((category_id, name)),
            _ => None,
        })
        .collect())
}

/// Builds a picks map from `category=nominee` pairs, as given on the command line.
pub fn parse_pick(raw: &str) -> Option<(String, String)> {
    let (category_id, nominee) = raw.split_once('=')?;
    let category_id = category_id.trim();
    if category_id.is_empty() || nominee.trim().is_empty() {
        return None;
    }
    Some((category_id.to_string(), nominee.to_string()))
}

pub fn group_by_category<'a>(
    categories: &[Category],
    nominees: &'a [Nominee],
) -> HashMap<String, Vec<&'a Nominee>> {
    let mut grouped: HashMap<String, Vec<&'a Nominee>> = categories
        .iter()
        .map(|category| (category.id.clone(), Vec::new()))
        .collect();
    for nominee in nominees {
        grouped
            .entry(nominee.category_id.clone())
            .or_default()
            .push(nominee);
    }
    grouped
}
