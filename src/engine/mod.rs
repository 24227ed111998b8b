mod allocate;
mod dedup;
mod types;

pub use types::{DecodeFailure, EngineError, RosterOutcome};

use crate::config::{ActiveWindow, GridConfig};
use crate::model::{RawSubmission, Submission};

/// Moteur d'allocation : `(soumissions, fenêtre) -> (grille, non-placés)`.
///
/// Calcul pur, synchrone, sans état conservé entre deux appels ; toute
/// l'entrée est matérialisée par l'appelant avant invocation.
#[derive(Debug, Clone)]
pub struct Engine {
    config: GridConfig,
}

impl Engine {
    /// Valide la forme de grille une fois pour toutes (précondition fatale).
    pub fn new(config: GridConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Calcule le planning à partir de soumissions déjà typées.
    pub fn compute(&self, submissions: &[Submission], window: &ActiveWindow) -> RosterOutcome {
        let effective = dedup::effective(submissions, window);
        let (grid, unplaced) = allocate::allocate(&effective, &self.config);
        RosterOutcome {
            grid,
            unplaced,
            decode_failures: Vec::new(),
        }
    }

    /// Variante sur enregistrements bruts : décode d'abord, collecte les
    /// échecs sans interrompre le calcul.
    pub fn compute_raw(&self, records: &[RawSubmission], window: &ActiveWindow) -> RosterOutcome {
        let mut decoded = Vec::with_capacity(records.len());
        let mut failures = Vec::new();

        for record in records {
            match record.decode() {
                Ok(sub) => decoded.push(sub),
                Err(err) => failures.push(DecodeFailure {
                    origin_id: record.origin_id.clone(),
                    reason: err.to_string(),
                }),
            }
        }

        let mut outcome = self.compute(&decoded, window);
        outcome.decode_failures = failures;
        outcome
    }
}
