use serde::{Deserialize, Serialize};

/// Public API error response format.
///
/// Every failure, whatever its status code, serializes as
/// `{"error": "<message>"}` so clients can surface the message directly.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ErrorResponse {
    pub error: String,
}
