//! Validated JSON extractor - Combines deserialization with validation.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use crate::errors::AppError;

/// Deserializes the body and runs its `validator` rules.
///
/// # Example
///
/// ```rust,ignore
/// use landra::api::extractors::ValidatedJson;
/// use landra::domain::PropertyInput;
///
/// async fn create(ValidatedJson(input): ValidatedJson<PropertyInput>) {
///     // input already passed its field rules
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;

        value
            .validate()
            .map_err(|e| AppError::validation(format_validation_errors(&e)))?;

        Ok(ValidatedJson(value))
    }
}

/// Flatten errors into one message, sorted by field so output is stable.
fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut messages = Vec::new();
    collect_messages(errors, &mut messages);
    messages.join(", ")
}

fn collect_messages(errors: &ValidationErrors, out: &mut Vec<String>) {
    let mut fields: Vec<_> = errors.errors().iter().collect();
    fields.sort_by_key(|(field, _)| field.to_string());

    for (field, kind) in fields {
        match kind {
            ValidationErrorsKind::Field(errs) => {
                out.extend(errs.iter().map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{} is invalid", field))
                }));
            }
            ValidationErrorsKind::Struct(nested) => collect_messages(nested, out),
            ValidationErrorsKind::List(items) => {
                for nested in items.values() {
                    collect_messages(nested, out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CreateTenant, EmergencyContact};
    use uuid::Uuid;

    #[test]
    fn test_nested_messages_are_reported() {
        let input = CreateTenant {
            property_id: Uuid::new_v4(),
            first_name: String::new(),
            last_name: "Reyes".into(),
            email: "maria@example.ph".into(),
            phone: "09171234567".into(),
            emergency_contact: Some(EmergencyContact {
                name: "Jose".into(),
                phone: String::new(),
                relationship: "Brother".into(),
            }),
        };

        let errors = input.validate().unwrap_err();
        let message = format_validation_errors(&errors);

        assert!(message.contains("Emergency contact phone is required"));
        assert!(message.contains("First name is required"));
    }
}
