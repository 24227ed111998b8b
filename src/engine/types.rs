use serde::Serialize;
use thiserror::Error;

use crate::config::ConfigError;
use crate::grid::RosterGrid;

/// Échec de décodage d'une soumission brute ; signalé, jamais fatal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodeFailure {
    pub origin_id: String,
    pub reason: String,
}

/// Résultat complet d'un calcul : la grille peuplée, les personnes restées
/// sans siège et les enregistrements indécodables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterOutcome {
    pub grid: RosterGrid,
    pub unplaced: Vec<String>,
    pub decode_failures: Vec<DecodeFailure>,
}

impl RosterOutcome {
    pub fn uncovered_cells(&self) -> usize {
        self.grid.uncovered_cells()
    }

    pub fn unplaced_count(&self) -> usize {
        self.unplaced.len()
    }
}

#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
