use validator::ValidationErrors;

use crate::models::{OperationBody, OperationRequest};
use crate::services::assistant_service::PipelineError;

/// Checks the required fields of an inbound body and turns it into an
/// [`OperationRequest`]. Text is passed on verbatim; nothing is executed or
/// truncated here.
pub fn validate_body<B: OperationBody>(body: B) -> Result<OperationRequest, PipelineError> {
    validator::Validate::validate(&body)
        .map_err(|errors| PipelineError::Validation(describe(&errors)))?;

    body.into_request().map_err(PipelineError::Validation)
}

/// Joins field messages in a stable order, e.g.
/// `"Kode diperlukan; Bahasa pemrograman diperlukan"`.
fn describe(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .iter()
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |error| match &error.message {
                Some(message) => message.to_string(),
                None => format!("Field '{}' tidak valid", field),
            })
        })
        .collect::<Vec<_>>()
        .join("; ")
}
