use std::collections::BTreeMap;

use crate::config::GridConfig;
use crate::grid::RosterGrid;
use crate::model::{PersonRef, Submission};

/// Allocation gloutonne premier-apte : chaque personne reçoit au plus une
/// case, chaque siège au plus un occupant.
pub(super) fn allocate(
    effective: &BTreeMap<String, Submission>,
    config: &GridConfig,
) -> (RosterGrid, Vec<String>) {
    let mut grid = RosterGrid::empty(config.clone());
    let mut unplaced = Vec::new();

    for (name, sub) in effective {
        // Références hors grille ignorées : dérive de format tolérée.
        let mut candidates: Vec<(usize, usize)> = sub
            .availability
            .iter()
            .filter_map(|slot| config.slot_index(slot))
            .collect();

        // Sièges libres d'abord ; le tri est stable, l'ordre de préférence
        // survit à l'intérieur de chaque groupe.
        candidates.sort_by_key(|&(day, period)| grid.cell(day, period).seat(sub.role).is_some());

        let open = candidates
            .into_iter()
            .find(|&(day, period)| grid.cell(day, period).seat(sub.role).is_none());

        match open {
            Some((day, period)) => {
                *grid.cell_mut(day, period).seat_mut(sub.role) = Some(PersonRef {
                    name: sub.name.clone(),
                    phone: sub.phone.clone(),
                });
            }
            None => unplaced.push(name.clone()),
        }
    }

    (grid, unplaced)
}
