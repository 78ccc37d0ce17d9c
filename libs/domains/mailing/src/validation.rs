//! Field-level validation of incoming send requests.
//!
//! Violations are rendered one per line as `Error in field '<Field>'. <Reason>`,
//! in the order the fields are declared on [`SendEmailRequest`].

use std::fmt;

use validator::{Validate, ValidationErrors};

use crate::models::SendEmailRequest;

/// Request fields paired with the name used in violation messages.
const FIELDS: [(&str, &str); 6] = [
    ("to", "To"),
    ("to_name", "ToName"),
    ("from", "From"),
    ("from_name", "FromName"),
    ("subject", "Subject"),
    ("body", "Body"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    Required,
    InvalidEmail,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::Required => f.write_str("Is required"),
            Violation::InvalidEmail => f.write_str("Must be a valid email"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: &'static str,
    pub violation: Violation,
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error in field '{}'. {}", self.field, self.violation)
    }
}

/// All violations found in one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolations(Vec<FieldViolation>);

impl FieldViolations {
    pub fn iter(&self) -> impl Iterator<Item = &FieldViolation> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for FieldViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{}", violation)?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldViolations {}

impl From<ValidationErrors> for FieldViolations {
    fn from(errors: ValidationErrors) -> Self {
        let field_errors = errors.field_errors();

        let violations = FIELDS
            .iter()
            .filter_map(|&(key, field)| {
                let errors = field_errors.get(key)?;
                // An empty field only reports that it is required.
                let violation = if errors.iter().any(|e| e.code == "required") {
                    Violation::Required
                } else if errors.iter().any(|e| e.code == "email") {
                    Violation::InvalidEmail
                } else {
                    return None;
                };
                Some(FieldViolation { field, violation })
            })
            .collect();

        FieldViolations(violations)
    }
}

/// Check presence of every field and the syntax of both addresses.
pub fn validate_request(request: &SendEmailRequest) -> Result<(), FieldViolations> {
    request.validate().map_err(FieldViolations::from)
}
