//! String identifiers for shifts and employees.
//!
//! Both are trimmed and must be non-empty; the checks live in one place so that
//! rows coming back from storage and request bodies go through the same gate.

use crate::error::{BoardError, BoardResult};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
        )]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// ## Summary
            /// Parses an identifier, trimming surrounding whitespace.
            ///
            /// ## Errors
            /// Returns `BoardError::InvalidId` if the trimmed value is empty.
            pub fn parse(value: &str) -> BoardResult<Self> {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    return Err(BoardError::InvalidId(format!(
                        "{} must not be empty",
                        stringify!($name)
                    )));
                }
                Ok(Self(trimmed.to_string()))
            }

            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = BoardError;

            fn try_from(value: String) -> BoardResult<Self> {
                Self::parse(&value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// Identifier of a configured shift, e.g. `t1`.
    ShiftId
);

string_id!(
    /// Identifier of an employee in the directory.
    EmployeeId
);
