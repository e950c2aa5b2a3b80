//! Read-only student and subject rows.
//!
//! Students, classes, and subjects are owned by the surrounding school
//! administration system; this service only reads them when assembling
//! reports.

use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::ids::{ClassId, SchoolId, StudentId, SubjectId};

/// A student row as read from the shared schema.
#[derive(Serialize, FromRow, Debug, Clone, ToSchema)]
pub struct Student {
    pub id: StudentId,
    pub school_id: SchoolId,
    pub class_id: ClassId,
    pub first_name: String,
    pub last_name: String,
    pub is_active: bool,
}

impl Student {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A subject row as read from the shared schema.
#[derive(Serialize, FromRow, Debug, Clone, ToSchema)]
pub struct Subject {
    pub id: SubjectId,
    pub school_id: SchoolId,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name() {
        let student = Student {
            id: StudentId::new(),
            school_id: SchoolId::new(),
            class_id: ClassId::new(),
            first_name: "Ada".to_string(),
            last_name: "Obi".to_string(),
            is_active: true,
        };
        assert_eq!(student.full_name(), "Ada Obi");
    }
}
