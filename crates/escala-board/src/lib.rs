//! Shift-board domain: day keys and week navigation, shift definitions, the
//! employee directory, the assignment map and its exports.

pub mod assignment;
pub mod day;
pub mod drop;
pub mod employee;
pub mod error;
pub mod export;
pub mod id;
pub mod navigation;
pub mod shift;

pub use assignment::{AssignmentKey, AssignmentMap, AssignmentRecord, RawAssignment};
pub use day::DayKey;
pub use employee::{Employee, EmployeeDirectory, RawEmployee};
pub use error::{BoardError, BoardResult};
pub use id::{EmployeeId, ShiftId};
pub use navigation::{DateWindow, Navigator, ViewMode};
pub use shift::{RawShift, ShiftDefinition, ShiftSchedule, ShiftStyle};
