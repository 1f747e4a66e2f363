//! Read-only employee directory used for display names and the picker search.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{BoardError, BoardResult};
use crate::id::EmployeeId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub code: Option<String>,
    pub role: String,
}

impl Employee {
    /// First name plus the initial of the second name.
    #[must_use]
    pub fn short_name(&self) -> String {
        abbreviate_name(&self.name)
    }

    /// ## Summary
    /// Case-insensitive substring match over name, code and role.
    ///
    /// `needle` must already be lowercase.
    fn matches_lowercase(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self
                .code
                .as_deref()
                .is_some_and(|code| code.to_lowercase().contains(needle))
            || self.role.to_lowercase().contains(needle)
    }
}

/// ## Summary
/// Abbreviates a full name to "First S." form.
///
/// Examples:
/// - "Ana Souza Lima" -> "Ana S."
/// - "Bruno" -> "Bruno"
#[must_use]
pub fn abbreviate_name(name: &str) -> String {
    let mut parts = name.split_whitespace();
    match (parts.next(), parts.next().and_then(|second| second.chars().next())) {
        (Some(first), Some(initial)) => format!("{first} {}.", initial.to_uppercase()),
        (Some(first), None) => first.to_string(),
        (None, _) => String::new(),
    }
}

/// An employee row as read from storage, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawEmployee {
    pub id: String,
    pub name: String,
    pub code: Option<String>,
    pub role: Option<String>,
}

impl RawEmployee {
    /// ## Summary
    /// Validates the row and converts it into an `Employee`.
    ///
    /// ## Errors
    /// Returns an error if the id or the name is blank.
    pub fn parse(self) -> BoardResult<Employee> {
        let id = EmployeeId::parse(&self.id)?;
        let name = self.name.split_whitespace().collect::<Vec<_>>().join(" ");
        if name.is_empty() {
            return Err(BoardError::MalformedRow(format!("employee {id} has no name")));
        }

        Ok(Employee {
            id,
            name,
            code: self
                .code
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty()),
            role: self.role.map(|r| r.trim().to_string()).unwrap_or_default(),
        })
    }
}

/// Employees in directory order with an id index.
#[derive(Debug, Clone, Default)]
pub struct EmployeeDirectory {
    employees: Vec<Employee>,
    index: HashMap<EmployeeId, usize>,
}

impl EmployeeDirectory {
    /// Later duplicates of an id are dropped.
    #[must_use]
    pub fn new(employees: Vec<Employee>) -> Self {
        let mut index = HashMap::with_capacity(employees.len());
        let mut unique = Vec::with_capacity(employees.len());
        for employee in employees {
            if index.contains_key(&employee.id) {
                tracing::warn!(employee_id = %employee.id, "Duplicate employee id in directory");
                continue;
            }
            index.insert(employee.id.clone(), unique.len());
            unique.push(employee);
        }
        Self {
            employees: unique,
            index,
        }
    }

    /// ## Summary
    /// Parses raw rows, logging and skipping the malformed ones.
    #[must_use]
    pub fn from_raw(rows: impl IntoIterator<Item = RawEmployee>) -> Self {
        let employees = rows
            .into_iter()
            .filter_map(|row| match row.parse() {
                Ok(employee) => Some(employee),
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping malformed employee row");
                    None
                }
            })
            .collect();
        Self::new(employees)
    }

    #[must_use]
    pub fn get(&self, id: &EmployeeId) -> Option<&Employee> {
        self.index.get(id).and_then(|&i| self.employees.get(i))
    }

    #[must_use]
    pub fn contains(&self, id: &EmployeeId) -> bool {
        self.index.contains_key(id)
    }

    /// Abbreviated name, or the raw id for employees missing from the directory.
    #[must_use]
    pub fn display_name(&self, id: &EmployeeId) -> String {
        self.get(id)
            .map_or_else(|| id.to_string(), Employee::short_name)
    }

    #[must_use]
    pub fn all(&self) -> &[Employee] {
        &self.employees
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.employees.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    /// ## Summary
    /// Picker search: case-insensitive substring over name, code and role.
    ///
    /// A blank query returns everyone. Results keep directory order.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&Employee> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.employees.iter().collect();
        }
        self.employees
            .iter()
            .filter(|e| e.matches_lowercase(&needle))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(id: &str, name: &str, code: Option<&str>, role: &str) -> Employee {
        RawEmployee {
            id: id.to_string(),
            name: name.to_string(),
            code: code.map(str::to_string),
            role: Some(role.to_string()),
        }
        .parse()
        .expect("valid employee")
    }

    fn directory() -> EmployeeDirectory {
        EmployeeDirectory::new(vec![
            employee("emp-A", "Ana Souza Lima", Some("A01"), "Garçonete"),
            employee("emp-B", "Bruno Costa", Some("B07"), "Cozinheiro"),
            employee("emp-C", "Carla", None, "Caixa"),
        ])
    }

    #[test]
    fn test_abbreviate_name() {
        assert_eq!(abbreviate_name("Ana Souza Lima"), "Ana S.");
        assert_eq!(abbreviate_name("  Bruno   costa "), "Bruno C.");
        assert_eq!(abbreviate_name("Carla"), "Carla");
        assert_eq!(abbreviate_name("   "), "");
    }

    #[test]
    fn test_display_name_falls_back_to_id() {
        let dir = directory();
        let known = EmployeeId::parse("emp-B").expect("valid id");
        let unknown = EmployeeId::parse("emp-Z").expect("valid id");
        assert_eq!(dir.display_name(&known), "Bruno C.");
        assert_eq!(dir.display_name(&unknown), "emp-Z");
    }

    #[test]
    fn test_search_is_case_insensitive_over_name_code_and_role() {
        let dir = directory();

        let by_name: Vec<_> = dir.search("SOUZA").iter().map(|e| e.id.as_str()).collect();
        assert_eq!(by_name, vec!["emp-A"]);

        let by_code: Vec<_> = dir.search("b07").iter().map(|e| e.id.as_str()).collect();
        assert_eq!(by_code, vec!["emp-B"]);

        let by_role: Vec<_> = dir.search("caixa").iter().map(|e| e.id.as_str()).collect();
        assert_eq!(by_role, vec!["emp-C"]);

        // "co" hits Bruno's surname and role, and nothing else
        let partial: Vec<_> = dir.search("co").iter().map(|e| e.id.as_str()).collect();
        assert_eq!(partial, vec!["emp-B"]);
    }

    #[test]
    fn test_blank_search_returns_everyone_in_order() {
        let dir = directory();
        let all: Vec<_> = dir.search("  ").iter().map(|e| e.id.as_str()).collect();
        assert_eq!(all, vec!["emp-A", "emp-B", "emp-C"]);
    }

    #[test_log::test]
    fn test_from_raw_skips_malformed_rows() {
        let dir = EmployeeDirectory::from_raw(vec![
            RawEmployee {
                id: "emp-A".to_string(),
                name: "Ana".to_string(),
                ..RawEmployee::default()
            },
            RawEmployee {
                id: " ".to_string(),
                name: "Sem Id".to_string(),
                ..RawEmployee::default()
            },
            RawEmployee {
                id: "emp-B".to_string(),
                name: String::new(),
                ..RawEmployee::default()
            },
        ]);
        assert_eq!(dir.len(), 1);
        assert!(dir.get(&EmployeeId::parse("emp-A").expect("valid id")).is_some());
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let dir = EmployeeDirectory::new(vec![
            employee("emp-A", "Ana Souza", None, "Garçonete"),
            employee("emp-A", "Outra Ana", None, "Caixa"),
        ]);
        assert_eq!(dir.len(), 1);
        assert_eq!(dir.all()[0].name, "Ana Souza");
    }
}
