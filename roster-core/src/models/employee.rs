use serde::{Deserialize, Serialize};
use std::fmt;

use super::gender::Gender;

/// An employee record as exchanged with the employees endpoint.
///
/// The identifier is assigned by the server. Drafts that have not been
/// created yet carry an empty `id`, which is left off the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Employee {
    #[serde(rename = "_id", alias = "id", skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub email: String,
    pub phone_number: String,
    pub job_title: String,
    pub department: String,
}

impl Employee {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = gender;
        self
    }

    pub fn with_phone_number(mut self, phone_number: impl Into<String>) -> Self {
        self.phone_number = phone_number.into();
        self
    }

    pub fn with_job_title(mut self, job_title: impl Into<String>) -> Self {
        self.job_title = job_title.into();
        self
    }

    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = department.into();
        self
    }

    /// Returns true once the server has issued an identifier.
    pub fn has_id(&self) -> bool {
        !self.id.is_empty()
    }

    /// Copy of this record with the identifier stripped, as sent on create.
    pub fn without_id(&self) -> Self {
        Self {
            id: String::new(),
            ..self.clone()
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Sets a single field by its wire name.
    pub fn set_field(&mut self, field: &str, value: &str) -> Result<(), String> {
        match field {
            "first_name" => self.first_name = value.to_string(),
            "last_name" => self.last_name = value.to_string(),
            "gender" => self.gender = value.parse()?,
            "email" => self.email = value.to_string(),
            "phone_number" | "phone" => self.phone_number = value.to_string(),
            "job_title" => self.job_title = value.to_string(),
            "department" => self.department = value.to_string(),
            _ => {
                return Err(format!(
                    "Unknown field '{}'. Valid fields: first_name, last_name, gender, email, \
                     phone_number, job_title, department",
                    field
                ))
            }
        }
        Ok(())
    }
}

impl fmt::Display for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.full_name();
        writeln!(f, "{}", name)?;
        writeln!(f, "{}", "=".repeat(name.len()))?;

        if self.has_id() {
            writeln!(f, "ID: {}", self.id)?;
        }
        if self.gender.is_set() {
            writeln!(f, "Gender: {}", self.gender)?;
        }
        writeln!(f, "Email: {}", self.email)?;
        writeln!(f, "Phone: {}", self.phone_number)?;
        writeln!(f, "Job Title: {}", self.job_title)?;
        write!(f, "Department: {}", self.department)
    }
}
