use crate::db::schema;
use diesel::{pg::Pg, prelude::*};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Identifiable, Queryable, Selectable)]
#[diesel(table_name = schema::shift_assignment)]
#[diesel(check_for_backend(Pg))]
#[diesel(primary_key(day, shift_id, employee_id))]
pub struct ShiftAssignment {
    pub day: chrono::NaiveDate,
    pub shift_id: String,
    pub employee_id: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Insertable)]
#[diesel(table_name = schema::shift_assignment)]
pub struct NewShiftAssignment<'a> {
    pub day: chrono::NaiveDate,
    pub shift_id: &'a str,
    pub employee_id: &'a str,
}
