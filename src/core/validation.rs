//! Schema-driven validation of mutation payloads
//!
//! Payloads are first passed through [`clean`] (trims string values), then
//! checked field by field. All failures are collected and reported together.

use crate::core::error::{FieldValidationError, ValidationError};
use crate::core::field::{FieldDescriptor, FieldKind, FieldValue};
use crate::core::record::Record;
use crate::core::schema::CollectionSchema;

/// Which kind of write is being validated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteKind {
    /// Full record: required fields must be present
    Create,
    /// Partial record: only the supplied fields are checked
    Update,
}

/// Trim surrounding whitespace from every string value
pub fn clean(record: Record) -> Record {
    record
        .iter()
        .map(|(field, value)| {
            let value = match value {
                FieldValue::String(s) => FieldValue::String(s.trim().to_string()),
                other => other.clone(),
            };
            (field.to_string(), value)
        })
        .collect()
}

/// Validator: field is required (present, not null and not blank)
fn required(descriptor: &FieldDescriptor, value: Option<&FieldValue>) -> Result<(), String> {
    match value {
        None | Some(FieldValue::Null) => Err(format!("'{}' is required", descriptor.name)),
        Some(FieldValue::String(s)) if s.is_empty() => {
            Err(format!("'{}' must not be empty", descriptor.name))
        }
        Some(_) => Ok(()),
    }
}

/// Validator: value matches the field kind
///
/// Numeric fields hold numbers; text and categorical fields accept any scalar.
fn kind(descriptor: &FieldDescriptor, value: &FieldValue) -> Result<(), String> {
    if value.is_null() {
        return Ok(());
    }
    match descriptor.kind {
        FieldKind::Numeric if value.as_number().is_none() => Err(format!(
            "'{}' must be a number (got {})",
            descriptor.name,
            value.type_name()
        )),
        _ => Ok(()),
    }
}

/// Validator: string value matches the declared format
fn format(descriptor: &FieldDescriptor, value: &FieldValue) -> Result<(), String> {
    match descriptor.format {
        Some(format) if !value.is_null() && !format.validate(value) => Err(format!(
            "'{}' must be {}",
            descriptor.name,
            format.describe()
        )),
        _ => Ok(()),
    }
}

/// Validate a payload against a schema
///
/// Fields not declared in the schema are accepted untouched: records may
/// carry extra data the list views do not query on.
pub fn validate(
    schema: &CollectionSchema,
    record: &Record,
    write: WriteKind,
) -> Result<(), ValidationError> {
    let mut errors = Vec::new();

    for descriptor in &schema.fields {
        let value = record.get(&descriptor.name);

        if write == WriteKind::Create
            && descriptor.required
            && let Err(message) = required(descriptor, value)
        {
            errors.push(FieldValidationError::new(&descriptor.name, message));
            continue;
        }

        // An update may omit a required field but not clear it
        if write == WriteKind::Update
            && descriptor.required
            && value.is_some()
            && let Err(message) = required(descriptor, value)
        {
            errors.push(FieldValidationError::new(&descriptor.name, message));
            continue;
        }

        let Some(value) = value else {
            continue;
        };

        let checks: [fn(&FieldDescriptor, &FieldValue) -> Result<(), String>; 2] = [kind, format];
        for check in checks {
            if let Err(message) = check(descriptor, value) {
                errors.push(FieldValidationError::new(&descriptor.name, message));
                break;
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::FieldErrors(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::field::FieldFormat;

    fn contacts() -> CollectionSchema {
        CollectionSchema::new("contacts", "name")
            .field(FieldDescriptor::text("name").searchable().required())
            .field(
                FieldDescriptor::text("phone_number")
                    .searchable()
                    .with_format(FieldFormat::Phone),
            )
            .field(FieldDescriptor::numeric("score"))
    }

    fn field_errors(result: Result<(), ValidationError>) -> Vec<String> {
        match result {
            Err(ValidationError::FieldErrors(errors)) => {
                errors.into_iter().map(|e| e.field).collect()
            }
            other => panic!("expected field errors, got {:?}", other),
        }
    }

    #[test]
    fn test_clean_trims_strings_only() {
        let record = clean(Record::new().with("name", "  Ann ").with("score", 3.0));
        assert_eq!(record.text("name").as_deref(), Some("Ann"));
        assert_eq!(record.number("score"), Some(3.0));
    }

    #[test]
    fn test_valid_create() {
        let record = Record::new()
            .with("name", "John Doe")
            .with("phone_number", "9876543210");
        assert!(validate(&contacts(), &record, WriteKind::Create).is_ok());
    }

    #[test]
    fn test_missing_required_on_create() {
        let record = Record::new().with("phone_number", "9876543210");
        assert_eq!(
            field_errors(validate(&contacts(), &record, WriteKind::Create)),
            vec!["name"]
        );
    }

    #[test]
    fn test_update_may_omit_required() {
        let record = Record::new().with("phone_number", "9876543210");
        assert!(validate(&contacts(), &record, WriteKind::Update).is_ok());
    }

    #[test]
    fn test_update_cannot_clear_required() {
        let record = Record::new().with("name", FieldValue::Null);
        assert_eq!(
            field_errors(validate(&contacts(), &record, WriteKind::Update)),
            vec!["name"]
        );
    }

    #[test]
    fn test_blank_required_after_clean() {
        let record = clean(Record::new().with("name", "   "));
        assert_eq!(
            field_errors(validate(&contacts(), &record, WriteKind::Create)),
            vec!["name"]
        );
        assert!(validate(&contacts(), &record, WriteKind::Update).is_err());
    }

    #[test]
    fn test_all_errors_reported() {
        let record = Record::new()
            .with("phone_number", "12")
            .with("score", "high");
        assert_eq!(
            field_errors(validate(&contacts(), &record, WriteKind::Create)),
            vec!["name", "phone_number", "score"]
        );
    }

    #[test]
    fn test_unknown_fields_pass_through() {
        let record = Record::new()
            .with("name", "Jane")
            .with("utm_campaign", "spring_2024");
        assert!(validate(&contacts(), &record, WriteKind::Create).is_ok());
    }
}
