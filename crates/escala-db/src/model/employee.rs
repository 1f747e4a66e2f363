use crate::db::schema;
use diesel::{pg::Pg, prelude::*};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Identifiable, Queryable, Selectable)]
#[diesel(table_name = schema::employee)]
#[diesel(check_for_backend(Pg))]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub code: Option<String>,
    pub role: Option<String>,
    pub active: bool,
}
