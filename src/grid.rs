use serde::{Deserialize, Serialize};

use crate::config::GridConfig;
use crate::model::{PersonRef, Role, SlotRef};

/// Case du planning : au plus un occupant par rôle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterCell {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intern: Option<PersonRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub senior: Option<PersonRef>,
}

impl RosterCell {
    pub fn seat(&self, role: Role) -> Option<&PersonRef> {
        match role {
            Role::Intern => self.intern.as_ref(),
            Role::Senior => self.senior.as_ref(),
        }
    }

    pub(crate) fn seat_mut(&mut self, role: Role) -> &mut Option<PersonRef> {
        match role {
            Role::Intern => &mut self.intern,
            Role::Senior => &mut self.senior,
        }
    }

    /// Occupants dans l'ordre de rendu : intern avant senior.
    pub fn occupants(&self) -> impl Iterator<Item = (Role, &PersonRef)> {
        self.intern
            .as_ref()
            .map(|p| (Role::Intern, p))
            .into_iter()
            .chain(self.senior.as_ref().map(|p| (Role::Senior, p)))
    }

    pub fn is_empty(&self) -> bool {
        self.intern.is_none() && self.senior.is_none()
    }
}

/// Grille hebdomadaire `jours × périodes`, créée à chaque calcul et remise
/// telle quelle au rendu ; le moteur n'en conserve rien.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterGrid {
    config: GridConfig,
    cells: Vec<RosterCell>,
}

impl RosterGrid {
    /// Grille vide ; `config` est supposée validée par l'appelant.
    pub(crate) fn empty(config: GridConfig) -> Self {
        let cells = vec![RosterCell::default(); config.cell_count()];
        Self { config, cells }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    fn offset(&self, day: usize, period: usize) -> usize {
        day * self.config.periods.len() + period
    }

    pub fn cell(&self, day: usize, period: usize) -> &RosterCell {
        &self.cells[self.offset(day, period)]
    }

    pub(crate) fn cell_mut(&mut self, day: usize, period: usize) -> &mut RosterCell {
        let idx = self.offset(day, period);
        &mut self.cells[idx]
    }

    pub fn cell_at(&self, slot: &SlotRef) -> Option<&RosterCell> {
        self.config
            .slot_index(slot)
            .map(|(day, period)| self.cell(day, period))
    }

    /// Itère `(jour, période, case)` ligne de jours par ligne de jours.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &RosterCell)> {
        self.config.days.iter().enumerate().flat_map(move |(di, day)| {
            self.config
                .periods
                .iter()
                .enumerate()
                .map(move |(pi, period)| (day.as_str(), period.as_str(), self.cell(di, pi)))
        })
    }

    /// Nombre de cases sans aucun occupant.
    pub fn uncovered_cells(&self) -> usize {
        self.cells.iter().filter(|c| c.is_empty()).count()
    }

    pub fn occupant_count(&self) -> usize {
        self.cells.iter().map(|c| c.occupants().count()).sum()
    }
}
