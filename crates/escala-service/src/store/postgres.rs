use std::sync::Arc;

use futures::FutureExt;

use escala_board::{DateWindow, RawAssignment, RawEmployee, RawShift};
use escala_db::db::DbProvider;
use escala_db::db::map::{new_assignment, new_shift};
use escala_db::db::query;
use tracing::Instrument;

use crate::store::{BoardStore, StoreFuture};

/// `BoardStore` backed by the PostgreSQL pool.
#[derive(Clone)]
pub struct PgBoardStore {
    db: Arc<dyn DbProvider>,
}

impl PgBoardStore {
    #[must_use]
    pub fn new(db: Arc<dyn DbProvider>) -> Self {
        Self { db }
    }
}

impl BoardStore for PgBoardStore {
    #[tracing::instrument(skip_all, fields(start = %window.start, end = %window.end))]
    fn fetch_assignments(&self, window: DateWindow) -> StoreFuture<'_, Vec<RawAssignment>> {
        async move {
            let mut conn = self.db.get_connection().await?;
            let rows = query::assignment::by_date_range(
                &mut conn,
                window.start.date(),
                window.end.date(),
            )
            .await?;

            tracing::debug!(count = rows.len(), "Fetched assignment rows");
            Ok(rows.into_iter().map(RawAssignment::from).collect())
        }
        .in_current_span()
        .boxed()
    }

    #[tracing::instrument(skip_all, fields(day = %row.day, shift_id = %row.shift_id, employee_id = %row.employee_id))]
    fn insert_assignment(&self, row: RawAssignment) -> StoreFuture<'_, bool> {
        async move {
            let mut conn = self.db.get_connection().await?;
            let inserted = query::assignment::insert(&mut conn, &new_assignment(&row)).await?;
            if !inserted {
                tracing::debug!("Assignment already stored");
            }
            Ok(inserted)
        }
        .in_current_span()
        .boxed()
    }

    #[tracing::instrument(skip_all, fields(day = %row.day, shift_id = %row.shift_id, employee_id = %row.employee_id))]
    fn delete_assignment(&self, row: RawAssignment) -> StoreFuture<'_, bool> {
        async move {
            let mut conn = self.db.get_connection().await?;
            let deleted = query::assignment::delete(
                &mut conn,
                row.day,
                &row.shift_id,
                &row.employee_id,
            )
            .await?;
            Ok(deleted)
        }
        .in_current_span()
        .boxed()
    }

    fn list_shifts(&self) -> StoreFuture<'_, Vec<RawShift>> {
        async move {
            let mut conn = self.db.get_connection().await?;
            let rows = query::shift::list_ordered(&mut conn).await?;
            Ok(rows.into_iter().map(RawShift::from).collect())
        }
        .in_current_span()
        .boxed()
    }

    #[tracing::instrument(skip_all, fields(count = shifts.len()))]
    fn replace_shifts(&self, shifts: Vec<RawShift>) -> StoreFuture<'_, ()> {
        async move {
            let rows = shifts
                .iter()
                .enumerate()
                .map(|(position, shift)| {
                    new_shift(shift, i32::try_from(position).unwrap_or(i32::MAX))
                })
                .collect::<Vec<_>>();

            let mut conn = self.db.get_connection().await?;
            query::shift::replace_all(&mut conn, &rows).await?;
            tracing::info!("Shift configuration replaced");
            Ok(())
        }
        .in_current_span()
        .boxed()
    }

    fn list_employees(&self) -> StoreFuture<'_, Vec<RawEmployee>> {
        async move {
            let mut conn = self.db.get_connection().await?;
            let rows = query::employee::list_active(&mut conn).await?;
            Ok(rows.into_iter().map(RawEmployee::from).collect())
        }
        .in_current_span()
        .boxed()
    }
}
