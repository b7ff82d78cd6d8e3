//! Table edits.
//!
//! Applies user edits from the table view to the assignment store.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::store::AssignmentStore;

/// One edit of a Family or Category cell in the table view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TableEdit {
    /// New family; the row's category no longer applies and is cleared.
    SetFamily { row: usize, value: String },
    SetCategory { row: usize, value: String },
}

impl TableEdit {
    pub fn row(&self) -> usize {
        match self {
            Self::SetFamily { row, .. } | Self::SetCategory { row, .. } => *row,
        }
    }
}

/// Apply an edit to the store.
///
/// Values are trimmed before they are stored.
///
/// # Errors
/// `RowOutOfRange` if the edit names a row the table does not have.
pub fn apply_edit(store: &mut AssignmentStore, edit: &TableEdit) -> Result<()> {
    let result = match edit {
        TableEdit::SetFamily { row, value } => store.set_family(*row, value.trim()),
        TableEdit::SetCategory { row, value } => store.set_category(*row, value.trim()),
    };
    result?;
    tracing::debug!(row = edit.row(), "applied table edit");
    Ok(())
}
