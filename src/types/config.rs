use crate::error::PoolError;
use crate::types::model::same_email;
use serde::Deserialize;

pub const DEFAULT_YEAR: i32 = 2026;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PoolConfig {
    pub season: Option<SeasonConfig>,
    pub admin: Option<AdminConfig>,
    pub scoreboard: Option<ScoreboardConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeasonConfig {
    #[serde(default = "default_year")]
    pub year: i32,
}

fn default_year() -> i32 {
    DEFAULT_YEAR
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    #[serde(default)]
    pub emails: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NameOrder {
    #[default]
    Lexical,
    Caseless,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoreboardConfig {
    pub podium_size: Option<usize>,
    pub min_bar_height: Option<f64>,
    pub max_bar_height: Option<f64>,
    pub name_order: Option<NameOrder>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreboardSettings {
    pub podium_size: usize,
    pub min_bar_height: f64,
    pub max_bar_height: f64,
    pub name_order: NameOrder,
}

impl Default for ScoreboardSettings {
    fn default() -> Self {
        Self {
            podium_size: 3,
            min_bar_height: 180.0,
            max_bar_height: 260.0,
            name_order: NameOrder::Lexical,
        }
    }
}

impl PoolConfig {
    pub fn year(&self) -> i32 {
        self.season
            .as_ref()
            .map(|season| season.year)
            .unwrap_or(DEFAULT_YEAR)
    }

    pub fn is_admin(&self, email: &str) -> bool {
        let email = email.trim();
        !email.is_empty()
            && self.admin.as_ref().is_some_and(|admin| {
                admin
                    .emails
                    .iter()
                    .any(|candidate| same_email(candidate, email))
            })
    }

    pub fn scoreboard_settings(&self) -> ScoreboardSettings {
        let defaults = ScoreboardSettings::default();
        match &self.scoreboard {
            Some(scoreboard) => ScoreboardSettings {
                podium_size: scoreboard.podium_size.unwrap_or(defaults.podium_size),
                min_bar_height: scoreboard
                    .min_bar_height
                    .unwrap_or(defaults.min_bar_height),
                max_bar_height: scoreboard
                    .max_bar_height
                    .unwrap_or(defaults.max_bar_height),
                name_order: scoreboard.name_order.unwrap_or(defaults.name_order),
            },
            None => defaults,
        }
    }

    pub fn validate(&self) -> Result<(), PoolError> {
        let settings = self.scoreboard_settings();
        if settings.podium_size == 0 {
            return Err(PoolError::ConfigParse(
                "scoreboard.podium_size must be at least 1".to_string(),
            ));
        }
        if settings.min_bar_height < 0.0 || settings.max_bar_height < 0.0 {
            return Err(PoolError::ConfigParse(
                "scoreboard bar heights must not be negative".to_string(),
            ));
        }
        if settings.min_bar_height > settings.max_bar_height {
            return Err(PoolError::ConfigParse(format!(
                "scoreboard.min_bar_height ({}) exceeds scoreboard.max_bar_height ({})",
                settings.min_bar_height, settings.max_bar_height
            )));
        }
        Ok(())
    }
}
