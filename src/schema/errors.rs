//! Schema error types
//!
//! Error codes:
//! - AERO_FORM_NOT_FOUND (REJECT)
//! - AERO_INVALID_FORM_DEFINITION (REJECT)
//! - AERO_REQUIRED_FIELD_MISSING (REJECT)
//! - AERO_UNRESOLVED_FIELD (REJECT)

use std::fmt;

use super::types::{FieldId, FormId};

/// Severity levels for schema errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Client request rejected
    Reject,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
        }
    }
}

/// Schema-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaErrorCode {
    /// Form id does not exist
    AeroFormNotFound,
    /// A field definition is structurally invalid
    AeroInvalidFormDefinition,
    /// A required field has no non-empty answer
    AeroRequiredFieldMissing,
    /// An answer references a field the form does not define
    AeroUnresolvedField,
}

impl SchemaErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaErrorCode::AeroFormNotFound => "AERO_FORM_NOT_FOUND",
            SchemaErrorCode::AeroInvalidFormDefinition => "AERO_INVALID_FORM_DEFINITION",
            SchemaErrorCode::AeroRequiredFieldMissing => "AERO_REQUIRED_FIELD_MISSING",
            SchemaErrorCode::AeroUnresolvedField => "AERO_UNRESOLVED_FIELD",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        Severity::Reject
    }
}

impl fmt::Display for SchemaErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Schema error type with full context
#[derive(Debug, Clone)]
pub struct SchemaError {
    code: SchemaErrorCode,
    message: String,
    form_id: Option<FormId>,
    field_id: Option<FieldId>,
}

impl SchemaError {
    /// Create a form not found error
    pub fn form_not_found(form_id: &FormId) -> Self {
        Self {
            code: SchemaErrorCode::AeroFormNotFound,
            message: format!("Form '{}' not found", form_id),
            form_id: Some(form_id.clone()),
            field_id: None,
        }
    }

    /// Create an invalid field definition error
    pub fn invalid_definition(field_id: FieldId, reason: impl Into<String>) -> Self {
        Self {
            code: SchemaErrorCode::AeroInvalidFormDefinition,
            message: format!("Invalid definition for field '{}': {}", field_id, reason.into()),
            form_id: None,
            field_id: Some(field_id),
        }
    }

    /// Create a missing required field error.
    ///
    /// The message names the field by its prompt, which is what a
    /// respondent sees.
    pub fn missing_required(form_id: &FormId, field_id: &FieldId, prompt: &str) -> Self {
        Self {
            code: SchemaErrorCode::AeroRequiredFieldMissing,
            message: format!("Missing required field: {}", prompt),
            form_id: Some(form_id.clone()),
            field_id: Some(field_id.clone()),
        }
    }

    /// Create an unresolved field error
    pub fn unresolved_field(form_id: &FormId, field_id: &FieldId) -> Self {
        Self {
            code: SchemaErrorCode::AeroUnresolvedField,
            message: format!("Unknown field '{}' for form '{}'", field_id, form_id),
            form_id: Some(form_id.clone()),
            field_id: Some(field_id.clone()),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> SchemaErrorCode {
        self.code
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the form id if applicable
    pub fn form_id(&self) -> Option<&FormId> {
        self.form_id.as_ref()
    }

    /// Returns the offending field id if applicable
    pub fn field_id(&self) -> Option<&FieldId> {
        self.field_id.as_ref()
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.code.severity(), self.code.code(), self.message)
    }
}

impl std::error::Error for SchemaError {}

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;
