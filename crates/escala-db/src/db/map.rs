//! Conversions from stored rows to the board's raw input types.
//!
//! The board validates raw rows itself, so nothing here can fail.

use escala_board::{RawAssignment, RawEmployee, RawShift};

use crate::model::assignment::{NewShiftAssignment, ShiftAssignment};
use crate::model::employee::Employee;
use crate::model::shift::{NewShiftDefinition, ShiftDefinition};

impl From<ShiftAssignment> for RawAssignment {
    fn from(row: ShiftAssignment) -> Self {
        Self {
            day: row.day,
            shift_id: row.shift_id,
            employee_id: row.employee_id,
        }
    }
}

impl From<ShiftDefinition> for RawShift {
    fn from(row: ShiftDefinition) -> Self {
        Self {
            id: row.id,
            label: row.label,
            start_time: row.start_time,
            end_time: row.end_time,
            free_label: row.free_label,
            text_color: row.text_color,
            background_color: row.background_color,
        }
    }
}

impl From<Employee> for RawEmployee {
    fn from(row: Employee) -> Self {
        Self {
            id: row.id,
            name: row.name,
            code: row.code,
            role: row.role,
        }
    }
}

#[must_use]
pub fn new_assignment<'a>(raw: &'a RawAssignment) -> NewShiftAssignment<'a> {
    NewShiftAssignment {
        day: raw.day,
        shift_id: &raw.shift_id,
        employee_id: &raw.employee_id,
    }
}

/// ## Summary
/// Borrows `raw` as an insertable row at `position`.
#[must_use]
pub fn new_shift(raw: &RawShift, position: i32) -> NewShiftDefinition<'_> {
    NewShiftDefinition {
        id: &raw.id,
        position,
        label: &raw.label,
        start_time: raw.start_time.as_deref(),
        end_time: raw.end_time.as_deref(),
        free_label: raw.free_label.as_deref(),
        text_color: raw.text_color.as_deref(),
        background_color: raw.background_color.as_deref(),
    }
}
