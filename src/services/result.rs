//! The uniform result record every façade operation returns.

use crate::error::OperationError;
use serde::Serialize;

/// Outcome of a façade operation: `{success, message, data?}`.
///
/// Front ends always show `message`; `data` carries the affected records on
/// success and is absent on failure.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OperationResult<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> OperationResult<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }

    pub fn from_error(error: &OperationError) -> Self {
        Self::failure(error.to_string())
    }

    pub fn is_success(&self) -> bool {
        self.success
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_omits_data_when_serialized() {
        let result: OperationResult<u32> = OperationResult::failure("nope");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json, serde_json::json!({"success": false, "message": "nope"}));
    }
}
