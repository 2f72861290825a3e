//! Row types for the two lookup tables.
//!
//! Both tables are populated externally. Columns other than `id` are
//! nullable, so the row types carry `Option`s and the store decides what
//! counts as a usable value.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A row of the `cgpa` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct CgpaRecord {
    pub id: i32,
    pub roll_no: Option<String>,
    pub cgpa: Option<Decimal>,
}

impl CgpaRecord {
    pub fn new(id: i32, roll_no: impl Into<String>, cgpa: Decimal) -> Self {
        Self {
            id,
            roll_no: Some(roll_no.into()),
            cgpa: Some(cgpa),
        }
    }
}

/// A row of the `syllabus` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct SyllabusRecord {
    pub id: i32,
    pub branch: Option<String>,
    pub semester: Option<String>,
    pub syllabus_file: Option<String>,
}

impl SyllabusRecord {
    pub fn new(
        id: i32,
        branch: impl Into<String>,
        semester: impl Into<String>,
        syllabus_file: impl Into<String>,
    ) -> Self {
        Self {
            id,
            branch: Some(branch.into()),
            semester: Some(semester.into()),
            syllabus_file: Some(syllabus_file.into()),
        }
    }

    /// The file name, if it is present and non-empty.
    pub fn usable_file(&self) -> Option<&str> {
        self.syllabus_file.as_deref().filter(|f| !f.is_empty())
    }
}
