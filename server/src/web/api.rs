use serde::Serialize;
use utoipa::ToSchema;

/// Generic JSON error body returned by API endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct ServerErrorResponse {
    /// Human-readable error message
    error: String,
}

impl ServerErrorResponse {
    pub fn new(error: String) -> Self {
        Self { error }
    }
}
