//! Response body shared by the deploy endpoints.

use serde::Serialize;

/// `{ "message": "..." }` body used for both success and failure responses.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
