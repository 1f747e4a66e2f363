//! Storage boundary of the board.
//!
//! The board only speaks in raw rows; validation happens on the way in.

pub mod memory;
pub mod postgres;

use escala_board::{DateWindow, RawAssignment, RawEmployee, RawShift};
use futures::future::BoxFuture;

use crate::error::ServiceResult;

pub use memory::MemoryBoardStore;
pub use postgres::PgBoardStore;

pub type StoreFuture<'a, T> = BoxFuture<'a, ServiceResult<T>>;

pub trait BoardStore: Send + Sync {
    /// Assignments whose day falls inside `window`, in insertion order per slot.
    fn fetch_assignments(&self, window: DateWindow) -> StoreFuture<'_, Vec<RawAssignment>>;

    /// Stores the triple; an existing identical triple counts as success.
    /// Resolves to `true` if a new row was written.
    fn insert_assignment(&self, row: RawAssignment) -> StoreFuture<'_, bool>;

    /// Removes exactly the given triple. Resolves to `true` if a row was removed.
    fn delete_assignment(&self, row: RawAssignment) -> StoreFuture<'_, bool>;

    /// Configured shifts in display order. Empty when nothing was saved yet.
    fn list_shifts(&self) -> StoreFuture<'_, Vec<RawShift>>;

    /// Replaces the whole shift list in one step.
    fn replace_shifts(&self, shifts: Vec<RawShift>) -> StoreFuture<'_, ()>;

    /// Employees ordered by name.
    fn list_employees(&self) -> StoreFuture<'_, Vec<RawEmployee>>;
}
