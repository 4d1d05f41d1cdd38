use serde::Serialize;
use utoipa::ToSchema;

/// One rejected request field, rendered into the `errors` array of the envelope.
#[derive(Serialize, Clone, Debug, PartialEq, ToSchema)]
pub struct FieldError {
    #[schema(example = "email")]
    pub field: String,
    #[schema(example = "Please provide a valid email address")]
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub value: Option<serde_json::Value>,
}

impl FieldError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
            value: None,
        }
    }

    pub fn with_value(field: &str, message: &str, value: impl Serialize) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
            value: serde_json::to_value(value).ok(),
        }
    }
}

/// Collects field errors while a request is checked, so every problem is reported at once.
#[derive(Debug, Default)]
pub struct Violations(Vec<FieldError>);

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &str, message: &str) {
        self.0.push(FieldError::new(field, message));
    }

    pub fn push_with_value(&mut self, field: &str, message: &str, value: impl Serialize) {
        self.0.push(FieldError::with_value(field, message, value));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_errors(self) -> Vec<FieldError> {
        self.0
    }

    /// `Ok(value)` when nothing was recorded.
    pub fn finish<T>(self, value: T) -> Result<T, Vec<FieldError>> {
        if self.0.is_empty() {
            Ok(value)
        } else {
            Err(self.0)
        }
    }
}
