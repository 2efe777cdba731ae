//! Filter structures for board assembly.

use serde::{Deserialize, Serialize};

/// Optional filters applied when assembling the board.
///
/// All filters combine with AND; an unset field matches everything.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BoardFilter {
    /// Only tasks assigned to this sprint
    pub sprint_id: Option<u64>,

    /// Only tasks under this epic
    pub epic_id: Option<u64>,

    /// Only tasks assigned to this user
    pub assignee_id: Option<u64>,
}

impl BoardFilter {
    /// Whether no filter is set.
    pub fn is_empty(&self) -> bool {
        self.sprint_id.is_none() && self.epic_id.is_none() && self.assignee_id.is_none()
    }
}
