//! Drag-and-drop and picker resolution.
//!
//! Both input paths end in an assignment. A drop on a shift column names the
//! slot directly; a drop on a weekly day card spans every shift, so the caller
//! has to ask which one.

use serde::{Deserialize, Serialize};

use crate::assignment::AssignmentKey;
use crate::day::DayKey;
use crate::id::{EmployeeId, ShiftId};
use crate::shift::ShiftDefinition;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DropTarget {
    /// A shift column of the daily view.
    Shift { day: DayKey, shift_id: ShiftId },
    /// A day card of the weekly view.
    Day { day: DayKey },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DropOutcome {
    Assign {
        key: AssignmentKey,
        employee_id: EmployeeId,
    },
    ChooseShift {
        day: DayKey,
        employee_id: EmployeeId,
        options: Vec<ShiftOption>,
    },
}

/// One entry of the shift-selection prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShiftOption {
    pub shift_id: ShiftId,
    pub title: String,
}

/// ## Summary
/// Turns a drop into either a concrete slot or a shift-selection prompt.
#[must_use]
pub fn resolve_drop(
    target: DropTarget,
    employee_id: EmployeeId,
    shifts: &[ShiftDefinition],
) -> DropOutcome {
    match target {
        DropTarget::Shift { day, shift_id } => DropOutcome::Assign {
            key: AssignmentKey::new(day, shift_id),
            employee_id,
        },
        DropTarget::Day { day } => DropOutcome::ChooseShift {
            day,
            employee_id,
            options: shifts
                .iter()
                .map(|shift| ShiftOption {
                    shift_id: shift.id.clone(),
                    title: shift.title(),
                })
                .collect(),
        },
    }
}
