use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Gender of an employee. `Unset` travels as an empty string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
    #[default]
    #[serde(rename = "")]
    Unset,
}

impl Gender {
    pub fn is_set(&self) -> bool {
        !matches!(self, Gender::Unset)
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "Male"),
            Gender::Female => write!(f, "Female"),
            Gender::Other => write!(f, "Other"),
            Gender::Unset => Ok(()),
        }
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            "" | "unset" => Ok(Gender::Unset),
            _ => Err(format!(
                "Invalid gender '{}'. Valid options: Male, Female, Other",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_from_str() {
        assert_eq!(Gender::from_str("male").unwrap(), Gender::Male);
        assert_eq!(Gender::from_str("FEMALE").unwrap(), Gender::Female);
        assert_eq!(Gender::from_str("Other").unwrap(), Gender::Other);
        assert_eq!(Gender::from_str("").unwrap(), Gender::Unset);
    }

    #[test]
    fn test_gender_from_str_invalid() {
        assert!(Gender::from_str("robot").is_err());
    }

    #[test]
    fn test_unset_gender_travels_as_empty_string() {
        assert_eq!(serde_json::to_string(&Gender::Unset).unwrap(), "\"\"");
        assert_eq!(serde_json::to_string(&Gender::Female).unwrap(), "\"Female\"");

        let parsed: Gender = serde_json::from_str("\"\"").unwrap();
        assert_eq!(parsed, Gender::Unset);
    }
}
