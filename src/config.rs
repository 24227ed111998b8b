use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::SlotRef;

/// Précondition violée : le moteur refuse de tourner.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("grid must define at least one day")]
    NoDays,
    #[error("grid must define at least one period")]
    NoPeriods,
    #[error("duplicate day label: {0}")]
    DuplicateDay(String),
    #[error("duplicate period label: {0}")]
    DuplicatePeriod(String),
    #[error("window end must be strictly after start")]
    InvalidWindow,
}

/// Forme de la grille : listes ordonnées de libellés, injectées par
/// l'appelant, jamais codées en dur dans le moteur.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    pub days: Vec<String>,
    pub periods: Vec<String>,
}

impl GridConfig {
    pub fn new(days: Vec<String>, periods: Vec<String>) -> Result<Self, ConfigError> {
        let config = Self { days, periods };
        config.validate()?;
        Ok(config)
    }

    /// Grille de référence : cinq jours ouvrés et les périodes fournies.
    pub fn weekdays(periods: Vec<String>) -> Result<Self, ConfigError> {
        let days = ["Mon", "Tue", "Wed", "Thu", "Fri"]
            .into_iter()
            .map(String::from)
            .collect();
        Self::new(days, periods)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.days.is_empty() {
            return Err(ConfigError::NoDays);
        }
        if self.periods.is_empty() {
            return Err(ConfigError::NoPeriods);
        }
        if let Some(dup) = first_duplicate(&self.days) {
            return Err(ConfigError::DuplicateDay(dup.clone()));
        }
        if let Some(dup) = first_duplicate(&self.periods) {
            return Err(ConfigError::DuplicatePeriod(dup.clone()));
        }
        Ok(())
    }

    pub fn cell_count(&self) -> usize {
        self.days.len() * self.periods.len()
    }

    /// Résout une référence de créneau ; `None` si hors grille.
    pub fn slot_index(&self, slot: &SlotRef) -> Option<(usize, usize)> {
        let day = self.days.iter().position(|d| d == &slot.day)?;
        let period = self.periods.iter().position(|p| p == &slot.period)?;
        Some((day, period))
    }
}

fn first_duplicate(labels: &[String]) -> Option<&String> {
    labels
        .iter()
        .enumerate()
        .find(|(idx, label)| labels[..*idx].contains(label))
        .map(|(_, label)| label)
}

/// Fenêtre active `[start, end)` ; borne haute optionnelle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveWindow {
    start: DateTime<Utc>,
    end: Option<DateTime<Utc>>,
}

impl ActiveWindow {
    /// Fenêtre ouverte vers le haut : tout ce qui arrive depuis `start`.
    pub fn since(start: DateTime<Utc>) -> Self {
        Self { start, end: None }
    }

    pub fn bounded(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, ConfigError> {
        if end <= start {
            return Err(ConfigError::InvalidWindow);
        }
        Ok(Self {
            start,
            end: Some(end),
        })
    }

    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        ts >= self.start && self.end.map_or(true, |end| ts < end)
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> Option<DateTime<Utc>> {
        self.end
    }
}
