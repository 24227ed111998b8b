use std::collections::BTreeMap;

use crate::config::ActiveWindow;
use crate::model::Submission;

/// Réduit les soumissions à une « effective » par nom.
///
/// Fenêtre `[start, end)` d'abord, puis dernier horodatage gagnant ; à
/// horodatage égal la première soumission vue est conservée. Le BTreeMap
/// fixe l'ordre d'itération (nom croissant) pour toute la suite.
pub(super) fn effective(
    submissions: &[Submission],
    window: &ActiveWindow,
) -> BTreeMap<String, Submission> {
    let mut out: BTreeMap<String, Submission> = BTreeMap::new();

    for sub in submissions {
        if !window.contains(sub.timestamp) {
            continue;
        }
        match out.get(&sub.name) {
            Some(kept) if kept.timestamp >= sub.timestamp => {}
            _ => {
                out.insert(sub.name.clone(), sub.clone());
            }
        }
    }

    out
}
