#![forbid(unsafe_code)]
//! Permanence — génération de plannings de permanence hebdomadaires (sans BD).
//!
//! - Modèle typé des disponibilités soumises.
//! - Fenêtre active + déduplication par dernier horodatage.
//! - Allocation gloutonne premier-apte, une personne par semaine au plus.
//! - Tout en UTC ; parsing RFC3339 ; affichage local en dehors de la lib.

pub mod config;
pub mod engine;
pub mod grid;
pub mod io;
pub mod model;
pub mod store;

pub use config::{ActiveWindow, ConfigError, GridConfig};
pub use engine::{DecodeFailure, Engine, EngineError, RosterOutcome};
pub use grid::{RosterCell, RosterGrid};
pub use io::{
    export_grid_csv, export_outcome_json, import_submissions_csv, parse_slot_list, render_text,
    WeekRange,
};
pub use model::{DecodeError, PersonRef, RawSubmission, Role, SlotRef, Submission};
pub use store::{JsonStore, StoreConfig, SubmissionStore};
