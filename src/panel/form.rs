//! Team form state and validation

use std::fmt;

use crate::client::models::{CreateTeamRequest, Permission, PermissionFlags, UpdateTeamRequest};

/// Which request the form will produce on submit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

/// A field of the team form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormField::Name => f.write_str("name"),
        }
    }
}

/// Validation problem attached to one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: FormField,
    pub message: String,
}

impl FieldError {
    pub fn new(field: FormField, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Values currently entered in the team form, plus the errors from the
/// last failed validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamForm {
    pub name: String,
    pub flags: PermissionFlags,
    errors: Vec<FieldError>,
}

impl TeamForm {
    /// Form pre-populated from fetched flags (edit mode never shows a name field)
    pub fn with_flags(flags: PermissionFlags) -> Self {
        Self {
            flags,
            ..Self::default()
        }
    }

    /// Reset every field to its default and drop errors.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.errors.retain(|e| e.field != FormField::Name);
    }

    pub fn set_flag(&mut self, permission: Permission, value: bool) {
        self.flags.set(permission, value);
    }

    /// Error message for one field, for an inline indicator
    pub fn error_for(&self, field: FormField) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub(crate) fn set_errors(&mut self, errors: Vec<FieldError>) {
        self.errors = errors;
    }
}

/// Form values that passed validation, shaped as the request to send
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidTeamForm {
    Create(CreateTeamRequest),
    Update(UpdateTeamRequest),
}

/// Check the form for `mode`.
///
/// Creating requires a name that is not blank after trimming; the trimmed
/// name is what gets sent. Editing ignores the name entirely.
pub fn validate(form: &TeamForm, mode: FormMode) -> Result<ValidTeamForm, Vec<FieldError>> {
    match mode {
        FormMode::Create => {
            let name = form.name.trim();
            if name.is_empty() {
                return Err(vec![FieldError::new(FormField::Name, "Name is required")]);
            }
            Ok(ValidTeamForm::Create(CreateTeamRequest {
                name: name.to_string(),
                flags: form.flags,
            }))
        }
        FormMode::Edit => Ok(ValidTeamForm::Update(UpdateTeamRequest { flags: form.flags })),
    }
}
