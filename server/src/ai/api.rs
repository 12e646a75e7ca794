use crate::ai::{MOTIVATION_PROMPT, RelayError, TextGenerator, elaboration_prompt};
use crate::web::api::ServerErrorResponse;
use axum::{
    Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::Json,
    routing::post,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Clone)]
pub struct AiState {
    pub generator: Arc<dyn TextGenerator>,
}

/// Request body for the elaboration endpoint.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AskAiRequest {
    /// The task text to elaborate on
    #[serde(default)]
    task_text: String,
}

/// API response carrying the provider's elaboration text.
#[derive(Debug, Serialize, ToSchema)]
pub struct AskAiResponse {
    /// The provider's raw text response
    details: String,
}

/// API response carrying the provider's motivational text.
#[derive(Debug, Serialize, ToSchema)]
pub struct MotivateResponse {
    /// The provider's raw text response
    motivation: String,
}

fn relay_error_response(err: RelayError) -> (StatusCode, Json<ServerErrorResponse>) {
    let message = match err {
        RelayError::MissingApiKey => {
            tracing::error!("Provider API key is not configured");
            "Server configuration error: Missing API key."
        }
        err => {
            tracing::error!("Provider call failed: {}", err);
            "An error occurred contacting AI"
        }
    };
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ServerErrorResponse::new(message.to_string())),
    )
}

/// Handler for POST /ask-ai - Relays a task's text to the provider for
/// elaboration.
#[tracing::instrument(skip(state, payload))]
#[utoipa::path(
    post,
    path = "/ask-ai",
    request_body = AskAiRequest,
    responses(
        (status = 200, description = "Elaboration text from the provider", body = AskAiResponse),
        (status = 400, description = "Missing task text", body = ServerErrorResponse),
        (status = 500, description = "Missing credential or provider error", body = ServerErrorResponse)
    ),
    tag = "AI"
)]
pub async fn ask_ai_handler(
    State(state): State<Arc<AiState>>,
    payload: Result<Json<AskAiRequest>, JsonRejection>,
) -> Result<Json<AskAiResponse>, (StatusCode, Json<ServerErrorResponse>)> {
    let Ok(Json(request)) = payload else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ServerErrorResponse::new("Request must be JSON".to_string())),
        ));
    };

    let task_text = request.task_text.trim();
    if task_text.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ServerErrorResponse::new(
                "Missing task text in request.".to_string(),
            )),
        ));
    }

    let prompt = elaboration_prompt(task_text);
    match state.generator.generate(&prompt).await {
        Ok(details) => Ok(Json(AskAiResponse { details })),
        Err(err) => Err(relay_error_response(err)),
    }
}

/// Handler for POST /motivate-me - Relays the fixed motivational prompt to
/// the provider.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    post,
    path = "/motivate-me",
    responses(
        (status = 200, description = "Motivational text from the provider", body = MotivateResponse),
        (status = 500, description = "Missing credential or provider error", body = ServerErrorResponse)
    ),
    tag = "AI"
)]
pub async fn motivate_me_handler(
    State(state): State<Arc<AiState>>,
) -> Result<Json<MotivateResponse>, (StatusCode, Json<ServerErrorResponse>)> {
    match state.generator.generate(MOTIVATION_PROMPT).await {
        Ok(motivation) => Ok(Json(MotivateResponse { motivation })),
        Err(err) => Err(relay_error_response(err)),
    }
}

/// Creates and returns the AI relay router.
pub fn create_api_router(state: Arc<AiState>) -> Router {
    Router::new()
        .route("/ask-ai", post(ask_ai_handler))
        .route("/motivate-me", post(motivate_me_handler))
        .with_state(state)
}
