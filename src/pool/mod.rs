pub mod access;
pub mod mutate;
pub mod pager;
pub mod store;

use crate::types::model::{Category, Extra, Nominee, PoolSettings, Prediction};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Reverse;

/// Records that could not be decoded, kept verbatim with their original
/// position so a save writes them back where they were.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Unreadable {
    pub categories: Vec<(usize, Value)>,
    pub nominees: Vec<(usize, Value)>,
    pub predictions: Vec<(usize, Value)>,
    pub settings: Vec<(usize, Value)>,
}

impl Unreadable {
    pub fn len(&self) -> usize {
        self.categories.len() + self.nominees.len() + self.predictions.len() + self.settings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Every stored record, across all seasons.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub nominees: Vec<Nominee>,
    #[serde(default)]
    pub predictions: Vec<Prediction>,
    #[serde(default)]
    pub settings: Vec<PoolSettings>,
    #[serde(flatten)]
    pub extra: Extra,
    #[serde(skip)]
    pub unreadable: Unreadable,
}

/// One season's records, in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct Pool {
    pub year: i32,
    pub categories: Vec<Category>,
    pub nominees: Vec<Nominee>,
    pub predictions: Vec<Prediction>,
    pub settings: PoolSettings,
}

impl Snapshot {
    /// Filters to `year`; categories and nominees by sort order, newest predictions first.
    pub fn season(&self, year: i32) -> Pool {
        let mut categories: Vec<Category> = self
            .categories
            .iter()
            .filter(|category| category.year == year)
            .cloned()
            .collect();
        categories.sort_by_key(|category| category.sort_order);

        let mut nominees: Vec<Nominee> = self
            .nominees
            .iter()
            .filter(|nominee| nominee.year == year)
            .cloned()
            .collect();
        nominees.sort_by_key(|nominee| nominee.sort_order);

        let mut predictions: Vec<Prediction> = self
            .predictions
            .iter()
            .filter(|prediction| prediction.year == year)
            .cloned()
            .collect();
        predictions.sort_by_key(|prediction| Reverse(prediction.created_at));

        Pool {
            year,
            categories,
            nominees,
            predictions,
            settings: self.settings_for(year),
        }
    }

    pub fn settings_for(&self, year: i32) -> PoolSettings {
        self.settings
            .iter()
            .find(|settings| settings.year == year)
            .cloned()
            .unwrap_or(PoolSettings {
                year,
                ..PoolSettings::default()
            })
    }

    pub fn find_prediction(&self, year: i32, id: &str) -> Option<&Prediction> {
        self.predictions
            .iter()
            .find(|prediction| prediction.year == year && prediction.id == id)
    }
}

impl Pool {
    /// The prediction owned by `email`, compared case-insensitively.
    pub fn prediction_for(&self, email: &str) -> Option<&Prediction> {
        self.predictions
            .iter()
            .find(|prediction| prediction.owned_by(email))
    }

    /// Case-insensitive substring match over owner name and e-mail.
    pub fn filter_predictions(&self, filter: &str) -> Vec<&Prediction> {
        let needle = filter.trim().to_lowercase();
        self.predictions
            .iter()
            .filter(|prediction| {
                needle.is_empty()
                    || prediction.name.to_lowercase().contains(&needle)
                    || prediction
                        .email
                        .as_deref()
                        .is_some_and(|email| email.to_lowercase().contains(&needle))
            })
            .collect()
    }
}
