use std::sync::atomic::{AtomicBool, Ordering};

use escala_board::{DateWindow, DayKey, RawAssignment, RawEmployee, RawShift};
use futures::FutureExt;
use tokio::sync::Mutex;

use crate::error::{ServiceError, ServiceResult};
use crate::store::{BoardStore, StoreFuture};

#[derive(Debug, Default)]
struct MemoryState {
    /// Insertion order is the slot order seen by a reload.
    assignments: Vec<RawAssignment>,
    shifts: Vec<RawShift>,
    employees: Vec<RawEmployee>,
}

/// In-process `BoardStore` for development and tests.
///
/// Reads and writes can be made to fail on demand to exercise the board's
/// failure handling.
#[derive(Debug, Default)]
pub struct MemoryBoardStore {
    state: Mutex<MemoryState>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryBoardStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_employees(mut self, employees: Vec<RawEmployee>) -> Self {
        self.state.get_mut().employees = employees;
        self
    }

    #[must_use]
    pub fn with_shifts(mut self, shifts: Vec<RawShift>) -> Self {
        self.state.get_mut().shifts = shifts;
        self
    }

    #[must_use]
    pub fn with_assignments(mut self, assignments: Vec<RawAssignment>) -> Self {
        self.state.get_mut().assignments = assignments;
        self
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Every stored assignment, in insertion order.
    pub async fn assignments(&self) -> Vec<RawAssignment> {
        self.state.lock().await.assignments.clone()
    }

    fn check(&self, flag: &AtomicBool, op: &str) -> ServiceResult<()> {
        if flag.load(Ordering::SeqCst) {
            return Err(ServiceError::StorageUnavailable(format!(
                "memory store refused {op}"
            )));
        }
        Ok(())
    }
}

impl BoardStore for MemoryBoardStore {
    fn fetch_assignments(&self, window: DateWindow) -> StoreFuture<'_, Vec<RawAssignment>> {
        async move {
            self.check(&self.fail_reads, "fetch_assignments")?;
            let state = self.state.lock().await;
            let mut rows = state
                .assignments
                .iter()
                .filter(|row| window.contains(DayKey::new(row.day)))
                .cloned()
                .collect::<Vec<_>>();
            // Stable: keeps insertion order within a day.
            rows.sort_by_key(|row| row.day);
            Ok(rows)
        }
        .boxed()
    }

    fn insert_assignment(&self, row: RawAssignment) -> StoreFuture<'_, bool> {
        async move {
            self.check(&self.fail_writes, "insert_assignment")?;
            let mut state = self.state.lock().await;
            if state.assignments.contains(&row) {
                return Ok(false);
            }
            state.assignments.push(row);
            Ok(true)
        }
        .boxed()
    }

    fn delete_assignment(&self, row: RawAssignment) -> StoreFuture<'_, bool> {
        async move {
            self.check(&self.fail_writes, "delete_assignment")?;
            let mut state = self.state.lock().await;
            let before = state.assignments.len();
            state.assignments.retain(|stored| stored != &row);
            Ok(state.assignments.len() < before)
        }
        .boxed()
    }

    fn list_shifts(&self) -> StoreFuture<'_, Vec<RawShift>> {
        async move {
            self.check(&self.fail_reads, "list_shifts")?;
            Ok(self.state.lock().await.shifts.clone())
        }
        .boxed()
    }

    fn replace_shifts(&self, shifts: Vec<RawShift>) -> StoreFuture<'_, ()> {
        async move {
            self.check(&self.fail_writes, "replace_shifts")?;
            self.state.lock().await.shifts = shifts;
            Ok(())
        }
        .boxed()
    }

    fn list_employees(&self) -> StoreFuture<'_, Vec<RawEmployee>> {
        async move {
            self.check(&self.fail_reads, "list_employees")?;
            let mut employees = self.state.lock().await.employees.clone();
            employees.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
            Ok(employees)
        }
        .boxed()
    }
}
