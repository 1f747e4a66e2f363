use crate::db::schema;
use diesel::{pg::Pg, prelude::*};

/// A configured shift. Either both `start_time` and `end_time` are set
/// (`HH:MM`) or `free_label` carries the schedule text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Identifiable, Queryable, Selectable)]
#[diesel(table_name = schema::shift_definition)]
#[diesel(check_for_backend(Pg))]
pub struct ShiftDefinition {
    pub id: String,
    pub position: i32,
    pub label: String,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub free_label: Option<String>,
    pub text_color: Option<String>,
    pub background_color: Option<String>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Insertable)]
#[diesel(table_name = schema::shift_definition)]
pub struct NewShiftDefinition<'a> {
    pub id: &'a str,
    pub position: i32,
    pub label: &'a str,
    pub start_time: Option<&'a str>,
    pub end_time: Option<&'a str>,
    pub free_label: Option<&'a str>,
    pub text_color: Option<&'a str>,
    pub background_color: Option<&'a str>,
}
