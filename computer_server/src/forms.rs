//! Computer form binding and validation.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::models::computer::{Computer, ComputerData};

/// Date format used by the form inputs.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const NAME_MAX_LEN: usize = 255;

/// Raw form submission, kept as strings so it can be redisplayed verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ComputerForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub introduced: String,
    #[serde(default)]
    pub discontinued: String,
    /// Company id, or empty for none.
    #[serde(default)]
    pub company: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl ComputerForm {
    /// Prefill the form from a stored computer.
    pub fn from_computer(computer: &Computer) -> Self {
        let format_date = |d: Option<NaiveDate>| {
            d.map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default()
        };
        Self {
            name: computer.name.clone(),
            introduced: format_date(computer.introduced),
            discontinued: format_date(computer.discontinued),
            company: computer
                .company_id
                .map(|id| id.to_string())
                .unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<ComputerData, Vec<FieldError>> {
        let mut errors = Vec::new();

        let name = self.name.trim();
        if name.is_empty() {
            errors.push(FieldError::new("name", "This field is required"));
        } else if name.chars().count() > NAME_MAX_LEN {
            errors.push(FieldError::new(
                "name",
                format!("Maximum length is {NAME_MAX_LEN}"),
            ));
        }

        let introduced = parse_date("introduced", &self.introduced, &mut errors);
        let discontinued = parse_date("discontinued", &self.discontinued, &mut errors);

        let company = self.company.trim();
        let company_id = if company.is_empty() {
            None
        } else {
            match company.parse::<i64>() {
                Ok(id) => Some(id),
                Err(_) => {
                    errors.push(FieldError::new("company", "Invalid company"));
                    None
                }
            }
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ComputerData {
            name: name.to_string(),
            introduced,
            discontinued,
            company_id,
        })
    }
}

fn parse_date(
    field: &'static str,
    raw: &str,
    errors: &mut Vec<FieldError>,
) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(_) => {
            errors.push(FieldError::new(field, "Invalid date, expected yyyy-MM-dd"));
            None
        }
    }
}

/// Message for `field`, if it failed validation.
pub fn error_for<'a>(errors: &'a [FieldError], field: &str) -> Option<&'a str> {
    errors
        .iter()
        .find(|e| e.field == field)
        .map(|e| e.message.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, introduced: &str, discontinued: &str, company: &str) -> ComputerForm {
        ComputerForm {
            name: name.to_string(),
            introduced: introduced.to_string(),
            discontinued: discontinued.to_string(),
            company: company.to_string(),
        }
    }

    #[test]
    fn valid_form_binds_all_fields() {
        let data = form(" Macintosh ", "1984-01-24", "", "1").validate().unwrap();
        assert_eq!(data.name, "Macintosh");
        assert_eq!(data.introduced, NaiveDate::from_ymd_opt(1984, 1, 24));
        assert_eq!(data.discontinued, None);
        assert_eq!(data.company_id, Some(1));
    }

    #[test]
    fn name_is_required() {
        let errors = form("   ", "", "", "").validate().unwrap_err();
        assert_eq!(error_for(&errors, "name"), Some("This field is required"));
    }

    #[test]
    fn every_bad_field_is_reported() {
        let errors = form("", "24/01/1984", "yesterday", "apple")
            .validate()
            .unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["name", "introduced", "discontinued", "company"]);
    }

    #[test]
    fn name_length_is_bounded() {
        let long = "x".repeat(NAME_MAX_LEN + 1);
        let errors = form(&long, "", "", "").validate().unwrap_err();
        assert!(error_for(&errors, "name").is_some());
    }

    #[test]
    fn prefill_round_trips_through_validation() {
        let computer = Computer {
            id: 21,
            name: "Macintosh".to_string(),
            introduced: NaiveDate::from_ymd_opt(1984, 1, 24),
            discontinued: None,
            company_id: Some(1),
        };
        let prefilled = ComputerForm::from_computer(&computer);
        assert_eq!(prefilled.introduced, "1984-01-24");
        assert_eq!(prefilled.company, "1");
        let data = prefilled.validate().unwrap();
        assert_eq!(data.name, computer.name);
        assert_eq!(data.introduced, computer.introduced);
        assert_eq!(data.company_id, computer.company_id);
    }
}
