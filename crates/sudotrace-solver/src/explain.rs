//! Human-readable explanations of applied techniques.

use sudotrace_core::{EntryKind, Grid, fmt::discard_text, render};

use crate::technique::{Deduction, TechniqueId};

/// One explained move: the single-line description and a grid snapshot with
/// the move's decoration.
///
/// The snapshot shows the grid as it looked *before* the eliminations, with
/// the removed candidates restored so the `Removed` tint has something to
/// point at.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// `<Technique>: <defining cells or candidates> => <eliminations>`.
    pub summary: String,
    /// The decorated multi-line grid dump.
    pub snapshot: String,
}

/// Builds the explanation of the most recently committed deduction.
///
/// Call right after [`commit`](crate::technique::commit): the grid's last
/// journal entry is what carries the recorded eliminations.
#[must_use]
pub fn explain_last(grid: &Grid, id: TechniqueId, deduction: &Deduction) -> Explanation {
    let caption = id.caption();
    let (summary, snapshot) = match grid.last_entry() {
        Some(entry) => {
            let summary = match entry.kind() {
                EntryKind::Place { .. } => {
                    format!("{caption}: {}", deduction.subject)
                }
                EntryKind::Discard => format!(
                    "{caption}: {} => {}",
                    deduction.subject,
                    discard_text(entry.removed())
                ),
            };
            let snapshot = render::dump_restored(grid, entry.removed(), &deduction.tints);
            (summary, snapshot)
        }
        None => (format!("{caption}: {}", deduction.subject), render::dump(grid)),
    };
    Explanation { summary, snapshot }
}
