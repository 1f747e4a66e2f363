//! The assignment map: (day, shift) -> ordered employees.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::day::DayKey;
use crate::error::BoardResult;
use crate::id::{EmployeeId, ShiftId};
use crate::navigation::DateWindow;

/// Composite key of one board slot.
///
/// Ordering is by day, then shift id, so iterating a map never depends on
/// hashing.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AssignmentKey {
    pub day: DayKey,
    pub shift_id: ShiftId,
}

impl AssignmentKey {
    #[must_use]
    pub const fn new(day: DayKey, shift_id: ShiftId) -> Self {
        Self { day, shift_id }
    }
}

/// Persisted form of a single assignment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssignmentRecord {
    pub day: DayKey,
    pub shift_id: ShiftId,
    pub employee_id: EmployeeId,
}

impl AssignmentRecord {
    #[must_use]
    pub fn key(&self) -> AssignmentKey {
        AssignmentKey::new(self.day, self.shift_id.clone())
    }

    #[must_use]
    pub fn to_raw(&self) -> RawAssignment {
        RawAssignment {
            day: self.day.date(),
            shift_id: self.shift_id.to_string(),
            employee_id: self.employee_id.to_string(),
        }
    }
}

/// An assignment row as read from storage, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAssignment {
    pub day: NaiveDate,
    pub shift_id: String,
    pub employee_id: String,
}

impl RawAssignment {
    /// ## Summary
    /// Validates the row and converts it into an `AssignmentRecord`.
    ///
    /// ## Errors
    /// Returns `BoardError::InvalidId` if either identifier is blank.
    pub fn parse(self) -> BoardResult<AssignmentRecord> {
        Ok(AssignmentRecord {
            day: DayKey::new(self.day),
            shift_id: ShiftId::parse(&self.shift_id)?,
            employee_id: EmployeeId::parse(&self.employee_id)?,
        })
    }
}

/// Outcome of a mutation on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Change {
    Applied,
    Unchanged,
}

impl Change {
    #[must_use]
    pub const fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentMap {
    slots: BTreeMap<AssignmentKey, Vec<EmployeeId>>,
}

impl AssignmentMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// ## Summary
    /// Folds persisted records into a map, keeping the order they arrive in.
    ///
    /// Duplicate records collapse into one entry.
    #[must_use]
    pub fn from_records(records: impl IntoIterator<Item = AssignmentRecord>) -> Self {
        let mut map = Self::new();
        for record in records {
            let key = record.key();
            map.assign(key, record.employee_id);
        }
        map
    }

    /// ## Summary
    /// Parses raw storage rows and folds the ones inside `window` into a map.
    ///
    /// Malformed rows and rows outside the window are logged and skipped.
    #[must_use]
    pub fn from_raw_rows(window: &DateWindow, rows: impl IntoIterator<Item = RawAssignment>) -> Self {
        let records = rows.into_iter().filter_map(|row| {
            let day = row.day;
            match row.parse() {
                Ok(record) if window.contains(record.day) => Some(record),
                Ok(record) => {
                    tracing::warn!(day = %record.day, "Skipping assignment row outside window");
                    None
                }
                Err(e) => {
                    tracing::warn!(%day, error = %e, "Skipping malformed assignment row");
                    None
                }
            }
        });
        Self::from_records(records)
    }

    /// Employees in the slot, in assignment order.
    #[must_use]
    pub fn get(&self, key: &AssignmentKey) -> &[EmployeeId] {
        self.slots.get(key).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn contains(&self, key: &AssignmentKey, employee_id: &EmployeeId) -> bool {
        self.get(key).contains(employee_id)
    }

    /// ## Summary
    /// Appends `employee_id` to the slot unless it is already there.
    pub fn assign(&mut self, key: AssignmentKey, employee_id: EmployeeId) -> Change {
        let slot = self.slots.entry(key).or_default();
        if slot.contains(&employee_id) {
            return Change::Unchanged;
        }
        slot.push(employee_id);
        Change::Applied
    }

    /// ## Summary
    /// Removes exactly `employee_id` from the slot, leaving the others in order.
    pub fn unassign(&mut self, key: &AssignmentKey, employee_id: &EmployeeId) -> Change {
        let Some(slot) = self.slots.get_mut(key) else {
            return Change::Unchanged;
        };
        let Some(position) = slot.iter().position(|e| e == employee_id) else {
            return Change::Unchanged;
        };
        slot.remove(position);
        if slot.is_empty() {
            self.slots.remove(key);
        }
        Change::Applied
    }

    /// ## Summary
    /// Puts a slot back to a previously captured state.
    ///
    /// Only used to undo an optimistic change whose persistence failed.
    pub fn restore_slot(&mut self, key: AssignmentKey, previous: Vec<EmployeeId>) {
        if previous.is_empty() {
            self.slots.remove(&key);
        } else {
            self.slots.insert(key, previous);
        }
    }

    /// Non-empty slots in key order.
    pub fn slots(&self) -> impl Iterator<Item = (&AssignmentKey, &[EmployeeId])> {
        self.slots
            .iter()
            .filter(|(_, employees)| !employees.is_empty())
            .map(|(key, employees)| (key, employees.as_slice()))
    }

    /// Non-empty slots of one day in shift id order.
    pub fn slots_for_day(&self, day: DayKey) -> impl Iterator<Item = (&ShiftId, &[EmployeeId])> {
        self.slots()
            .filter(move |(key, _)| key.day == day)
            .map(|(key, employees)| (&key.shift_id, employees))
    }

    /// Every assignment as a flat record list.
    #[must_use]
    pub fn records(&self) -> Vec<AssignmentRecord> {
        self.slots()
            .flat_map(|(key, employees)| {
                employees.iter().map(|employee_id| AssignmentRecord {
                    day: key.day,
                    shift_id: key.shift_id.clone(),
                    employee_id: employee_id.clone(),
                })
            })
            .collect()
    }

    /// Total number of assignments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
